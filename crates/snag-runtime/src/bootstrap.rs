//! Client bootstrap.
//!
//! Composes a ready client in one synchronous pass:
//!
//! ```text
//! options, extra plugins, environment
//!   └─ merge schema (base, built-ins, extra plugins)
//!   └─ resolve transport and logger from the environment
//!   └─ configure (aggregate error is logged, then returned)
//!   └─ select plugins for the configuration
//!   └─ register each plugin in order (first init failure aborts)
//! ```

use tracing::{debug, info, warn};

use snag_core::{
    AggregateConfigError, Client, Environment, Logger, Notifier, PluginDescriptor, RawOptions,
    base_schema, merge_schema,
};
use snag_plugins::builtin_plugins;

use crate::environment::ProcessEnvironment;
use crate::error::{BootstrapError, BootstrapResult};
use crate::policy::select_plugins;
use crate::resolver::{resolve_logger, resolve_transport};

/// Identity sent with every payload.
pub const NOTIFIER: Notifier = Notifier {
    name: "Snag Rust",
    version: env!("CARGO_PKG_VERSION"),
    url: env!("CARGO_PKG_REPOSITORY"),
};

/// Builds and configures a client for `env`.
///
/// `options` is either an API key or a full option map. `extra_plugins`
/// contribute schema entries after the built-ins and are registered after
/// the built-in enrichment plugins, before the throttle.
pub fn bootstrap(
    options: impl Into<RawOptions>,
    extra_plugins: &[PluginDescriptor],
    env: &dyn Environment,
) -> BootstrapResult<Client> {
    let plugins: Vec<PluginDescriptor> = builtin_plugins()
        .into_iter()
        .chain(extra_plugins.iter().copied())
        .collect();
    let schema = merge_schema(&base_schema(), &plugins);
    debug!(options = schema.len(), "Schema merged");

    let mut client = Client::new(NOTIFIER, schema);
    client.set_transport(resolve_transport(env));
    if let Some(logger) = resolve_logger(env) {
        client.set_logger(logger);
    }
    client.set_host(env.host());

    let config = match client.configure(options).cloned() {
        Ok(config) => config,
        Err(err) => {
            report_config_error(client.logger(), &err);
            return Err(BootstrapError::Config(err));
        }
    };

    for plugin in select_plugins(&config, extra_plugins) {
        client.use_plugin(&plugin)?;
    }

    info!(
        transport = client.transport().map(|t| t.name()).unwrap_or_default(),
        plugins = client.plugins().len(),
        "Client ready"
    );
    Ok(client)
}

/// [`bootstrap`] against the current process.
pub fn bootstrap_process(
    options: impl Into<RawOptions>,
    extra_plugins: &[PluginDescriptor],
) -> BootstrapResult<Client> {
    bootstrap(options, extra_plugins, &ProcessEnvironment::new())
}

/// Logs the summary, then each field error, through the client logger.
/// Without one the lines go straight to `tracing`.
fn report_config_error(logger: Option<&dyn Logger>, err: &AggregateConfigError) {
    match logger {
        Some(logger) => {
            logger.warn(err.summary());
            for field in err.errors() {
                logger.warn(&field.to_string());
            }
        }
        None => {
            warn!(errors = err.errors().len(), "{}", err.summary());
            for field in err.errors() {
                warn!(key = %field.key, "{field}");
            }
        }
    }
}

/// Chained form of [`bootstrap`].
///
/// ```rust,ignore
/// let client = Bootstrap::new("API_KEY")
///     .plugin(MY_PLUGIN)
///     .start()?;
/// ```
pub struct Bootstrap<'a> {
    options: RawOptions,
    plugins: Vec<PluginDescriptor>,
    env: Option<&'a dyn Environment>,
}

impl<'a> Bootstrap<'a> {
    /// Starts from `options`.
    pub fn new(options: impl Into<RawOptions>) -> Self {
        Self {
            options: options.into(),
            plugins: Vec::new(),
            env: None,
        }
    }

    /// Overrides a single option.
    pub fn option(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.options = self.options.with(key, value);
        self
    }

    /// Adds a caller plugin.
    pub fn plugin(mut self, plugin: PluginDescriptor) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Uses `env` instead of the current process.
    pub fn environment(mut self, env: &'a dyn Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Runs the bootstrap.
    pub fn start(self) -> BootstrapResult<Client> {
        match self.env {
            Some(env) => bootstrap(self.options, &self.plugins, env),
            None => bootstrap_process(self.options, &self.plugins),
        }
    }
}
