//! # Snag Plugins
//!
//! Built-in plugins shipped with the Snag notifier.
//!
//! Every plugin is a `static` [`PluginDescriptor`]; the bootstrap decides which
//! of them to register and in which order.
//!
//! | Plugin | Name | Options | Description |
//! |--------|------|---------|-------------|
//! | [`DEVICE`] | `device` | `collectUserIp` | Device facts, IP redaction |
//! | [`CONTEXT`] | `context` | | Page path as report context |
//! | [`REQUEST`] | `request` | | Page URL on the request section |
//! | [`WINDOW_ERROR`] | `window onerror` | | Uncaught error capture |
//! | [`UNHANDLED_REJECTION`] | `unhandled rejection` | | Unhandled rejection capture |
//! | [`NAVIGATION_BREADCRUMBS`] | `navigation breadcrumbs` | `navigationBreadcrumbsEnabled` | Location changes |
//! | [`INTERACTION_BREADCRUMBS`] | `interaction breadcrumbs` | `interactionBreadcrumbsEnabled` | Clicks |
//! | [`CONSOLE_BREADCRUMBS`] | `console breadcrumbs` | `consoleBreadcrumbsEnabled` | Console output |
//! | [`INLINE_SCRIPT_CONTENT`] | `inline script content` | `trackInlineScripts` | Document source for inline frames |
//! | [`THROTTLE`] | `throttle` | `maxEvents` | Delivery cap |

pub mod console;
pub mod context;
pub mod device;
pub mod inline_script;
pub mod interaction;
pub mod navigation;
pub mod request;
pub mod throttle;
pub mod unhandled_rejection;
pub mod window_error;

use snag_core::{Client, PluginDescriptor};

pub use console::{CONSOLE_BREADCRUMBS, console_breadcrumb};
pub use context::CONTEXT;
pub use device::DEVICE;
pub use inline_script::INLINE_SCRIPT_CONTENT;
pub use interaction::{INTERACTION_BREADCRUMBS, click_breadcrumb};
pub use navigation::{NAVIGATION_BREADCRUMBS, navigation_breadcrumb};
pub use request::REQUEST;
pub use throttle::THROTTLE;
pub use unhandled_rejection::{UNHANDLED_REJECTION, rejection_report};
pub use window_error::{WINDOW_ERROR, uncaught_report};

/// Every built-in plugin, in registration order.
///
/// Used to build the merged schema; activation picks a subset.
pub fn builtin_plugins() -> [PluginDescriptor; 10] {
    [
        DEVICE,
        CONTEXT,
        REQUEST,
        WINDOW_ERROR,
        UNHANDLED_REJECTION,
        NAVIGATION_BREADCRUMBS,
        INTERACTION_BREADCRUMBS,
        CONSOLE_BREADCRUMBS,
        INLINE_SCRIPT_CONTENT,
        THROTTLE,
    ]
}

/// Whether a breadcrumb channel's `*BreadcrumbsEnabled` option leaves it on.
/// Unset means on.
pub(crate) fn breadcrumb_channel_enabled(client: &Client, option: &str) -> bool {
    client.config().and_then(|c| c.get_bool(option)) != Some(false)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::Value;

    use snag_core::{
        Client, HostInfo, Notifier, PluginDescriptor, Report, Transport, TransportResult,
        ValidatedConfig, base_schema, merge_schema,
    };

    pub(crate) const NOTIFIER: Notifier = Notifier {
        name: "Snag Test",
        version: "0.0.0",
        url: "https://example.com",
    };

    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        pub(crate) sent: Mutex<Vec<Report>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn send_report(
            &self,
            _notifier: &Notifier,
            _config: &ValidatedConfig,
            report: &Report,
        ) -> TransportResult<()> {
            self.sent.lock().push(report.clone());
            Ok(())
        }
    }

    /// A configured client with `plugin` registered.
    pub(crate) fn configured_with(
        plugin: &PluginDescriptor,
        options: Value,
        host: HostInfo,
    ) -> (Client, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let schema = merge_schema(&base_schema(), std::slice::from_ref(plugin));
        let mut client = Client::new(NOTIFIER, schema);
        client.set_host(host);
        client.set_transport(transport.clone());
        let Value::Object(options) = options else {
            unreachable!("options must be an object")
        };
        client.configure(options).unwrap();
        client.use_plugin(plugin).unwrap();
        (client, transport)
    }

    pub(crate) fn send(client: &Client, report: Report) -> bool {
        tokio_test::block_on(client.notify(report)).unwrap()
    }
}
