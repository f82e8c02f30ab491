//! The core client.
//!
//! A [`Client`] starts out bare: a notifier identity and a schema. Its
//! transport, logger and host facts are injected, [`Client::configure`]
//! validates options against the schema, and plugins are registered one at a
//! time with [`Client::use_plugin`]. Plugins shape the report pipeline by
//! registering `on_error` hooks and enabling capture and breadcrumb channels.
//!
//! ```text
//! notify(report)
//!   └─ fill from config (release stage, version, user, metadata, breadcrumbs)
//!   └─ notifyReleaseStages filter
//!   └─ on_error hooks, in registration order (any may drop the report)
//!   └─ transport.send_report
//! ```

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::capability::{BoxedLogger, BoxedTransport, HostInfo, Logger};
use crate::config::{ConfigSchema, RawOptions, ValidatedConfig, validate_options};
use crate::error::{ConfigResult, NotifyError, NotifyResult, PluginResult};
use crate::plugin::PluginDescriptor;
use crate::report::{Breadcrumb, BreadcrumbKind, CaptureKind, Report, Severity};

/// Identity of the notifier library, sent with every payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Notifier {
    /// Library name.
    pub name: &'static str,
    /// Library version.
    pub version: &'static str,
    /// Library homepage.
    pub url: &'static str,
}

/// Hook run for every report before delivery. Returning `false` drops it.
pub type OnErrorFn = Arc<dyn Fn(&mut Report) -> bool + Send + Sync>;

/// The monitoring client.
pub struct Client {
    notifier: Notifier,
    schema: ConfigSchema,
    config: Option<ValidatedConfig>,
    transport: Option<BoxedTransport>,
    logger: Option<BoxedLogger>,
    host: HostInfo,
    plugins: Vec<&'static str>,
    on_error: Vec<OnErrorFn>,
    captures: HashSet<CaptureKind>,
    breadcrumb_kinds: HashSet<BreadcrumbKind>,
    breadcrumbs: Mutex<VecDeque<Breadcrumb>>,
    context: Option<String>,
}

impl Client {
    /// Creates an unconfigured client.
    pub fn new(notifier: Notifier, schema: ConfigSchema) -> Self {
        Self {
            notifier,
            schema,
            config: None,
            transport: None,
            logger: None,
            host: HostInfo::default(),
            plugins: Vec::new(),
            on_error: Vec::new(),
            captures: HashSet::new(),
            breadcrumb_kinds: HashSet::new(),
            breadcrumbs: Mutex::new(VecDeque::new()),
            context: None,
        }
    }

    /// Returns the notifier identity.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Returns the schema the client validates against.
    pub fn schema(&self) -> &ConfigSchema {
        &self.schema
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    /// Installs the transport.
    pub fn set_transport(&mut self, transport: BoxedTransport) {
        debug!(transport = transport.name(), "Transport installed");
        self.transport = Some(transport);
    }

    /// Returns the installed transport.
    pub fn transport(&self) -> Option<&BoxedTransport> {
        self.transport.as_ref()
    }

    /// Installs the logger.
    pub fn set_logger(&mut self, logger: BoxedLogger) {
        self.logger = Some(logger);
    }

    /// Returns the installed logger. `None` means library messages are dropped.
    pub fn logger(&self) -> Option<&dyn Logger> {
        self.logger.as_deref()
    }

    /// Sets the host facts read by enrichment plugins.
    pub fn set_host(&mut self, host: HostInfo) {
        self.host = host;
    }

    /// Returns the host facts.
    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Validates `options` against the client's schema and stores the result.
    ///
    /// On failure nothing is stored and any previous configuration is kept.
    pub fn configure(&mut self, options: impl Into<RawOptions>) -> ConfigResult<&ValidatedConfig> {
        let options = options.into().normalize();
        let config = validate_options(&self.schema, &options)?;
        debug!(options = config.iter().count(), "Client configured");
        let config = &*self.config.insert(config);
        Ok(config)
    }

    /// Returns the validated configuration, once configured.
    pub fn config(&self) -> Option<&ValidatedConfig> {
        self.config.as_ref()
    }

    // =========================================================================
    // Plugins
    // =========================================================================

    /// Runs a plugin's `init` and records it as registered.
    ///
    /// An `init` failure is returned unchanged and the plugin is not recorded.
    pub fn use_plugin(&mut self, plugin: &PluginDescriptor) -> PluginResult<()> {
        (plugin.init)(self)?;
        self.plugins.push(plugin.name);
        info!(plugin = plugin.name, "Plugin registered");
        Ok(())
    }

    /// Names of registered plugins, in registration order.
    pub fn plugins(&self) -> &[&'static str] {
        &self.plugins
    }

    /// Appends an `on_error` hook.
    pub fn on_error<F>(&mut self, hook: F)
    where
        F: Fn(&mut Report) -> bool + Send + Sync + 'static,
    {
        self.on_error.push(Arc::new(hook));
    }

    /// Turns on an automatic capture channel.
    pub fn enable_capture(&mut self, kind: CaptureKind) {
        self.captures.insert(kind);
    }

    /// Whether an automatic capture channel is on.
    pub fn is_capturing(&self, kind: CaptureKind) -> bool {
        self.captures.contains(&kind)
    }

    /// Turns on automatic breadcrumbs of `kind`.
    pub fn enable_breadcrumbs(&mut self, kind: BreadcrumbKind) {
        self.breadcrumb_kinds.insert(kind);
    }

    /// Whether automatic breadcrumbs of `kind` are recorded.
    pub fn records_breadcrumbs(&self, kind: BreadcrumbKind) -> bool {
        self.breadcrumb_kinds.contains(&kind)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Sets the default context for reports.
    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = Some(context.into());
    }

    /// Leaves a breadcrumb explicitly.
    pub fn leave_breadcrumb(&self, breadcrumb: Breadcrumb) {
        let limit = self.config.as_ref().map_or(20, |c| c.max_breadcrumbs());
        if limit == 0 {
            return;
        }
        let mut crumbs = self.breadcrumbs.lock();
        while crumbs.len() >= limit {
            crumbs.pop_front();
        }
        crumbs.push_back(breadcrumb);
    }

    /// Records an automatic breadcrumb if its channel is on.
    ///
    /// Returns whether it was recorded.
    pub fn record_breadcrumb(&self, breadcrumb: Breadcrumb) -> bool {
        if !self.records_breadcrumbs(breadcrumb.kind) {
            return false;
        }
        self.leave_breadcrumb(breadcrumb);
        true
    }

    /// Snapshot of the retained breadcrumbs, oldest first.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.breadcrumbs.lock().iter().cloned().collect()
    }

    /// Reports an automatically captured error if its channel is on.
    ///
    /// Returns `Ok(false)` when the channel is off or the report was dropped.
    pub async fn capture(&self, kind: CaptureKind, mut report: Report) -> NotifyResult<bool> {
        if !self.is_capturing(kind) {
            return Ok(false);
        }
        report.unhandled = true;
        report.severity = Severity::Error;
        report.severity_reason = Some(kind.severity_reason().to_string());
        self.notify(report).await
    }

    /// Runs a report through the pipeline and delivers it.
    ///
    /// Returns `Ok(true)` when the transport accepted the report, `Ok(false)`
    /// when the release-stage filter or a hook dropped it.
    pub async fn notify(&self, mut report: Report) -> NotifyResult<bool> {
        let config = self.config.as_ref().ok_or(NotifyError::NotConfigured)?;
        let transport = self.transport.as_ref().ok_or(NotifyError::NoTransport)?;

        self.prepare(config, &mut report);

        if let Some(stages) = config.notify_release_stages()
            && !report
                .release_stage
                .as_deref()
                .is_some_and(|stage| stages.contains(&stage))
        {
            debug!(
                release_stage = ?report.release_stage,
                "Report not sent due to notifyReleaseStages"
            );
            return Ok(false);
        }

        for hook in &self.on_error {
            if !hook(&mut report) {
                debug!(error_class = %report.error_class, "Report dropped by on_error hook");
                return Ok(false);
            }
        }

        if let Err(e) = transport.send_report(&self.notifier, config, &report).await {
            warn!(transport = transport.name(), error = %e, "Report delivery failed");
            if let Some(logger) = self.logger() {
                logger.error(&format!("Report failed to send: {e}"));
            }
            return Err(e.into());
        }

        self.leave_breadcrumb(
            Breadcrumb::new(report.error_class.clone(), BreadcrumbKind::Error)
                .with_meta("errorClass", report.error_class.clone())
                .with_meta("errorMessage", report.error_message.clone())
                .with_meta("severity", serde_json::to_value(report.severity).unwrap_or_default()),
        );

        Ok(true)
    }

    fn prepare(&self, config: &ValidatedConfig, report: &mut Report) {
        if report.release_stage.is_none() {
            report.release_stage = config.release_stage().map(str::to_string);
        }
        if report.app_version.is_none() {
            report.app_version = config.app_version().map(str::to_string);
        }
        if report.context.is_none() {
            report.context.clone_from(&self.context);
        }
        merge_missing(&mut report.user, config.get("user"));
        merge_missing(&mut report.meta_data, config.get("metaData"));
        if report.breadcrumbs.is_empty() {
            report.breadcrumbs = self.breadcrumbs();
        }
    }
}

fn merge_missing(target: &mut Map<String, Value>, source: Option<&Value>) {
    if let Some(Value::Object(source)) = source {
        for (key, value) in source {
            target.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("notifier", &self.notifier)
            .field("configured", &self.config.is_some())
            .field("transport", &self.transport.as_ref().map(|t| t.name()))
            .field("logger", &self.logger.is_some())
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}
