//! Delivery throttle.
//!
//! Caps the number of reports a client delivers. Registered last so the
//! count reflects reports every other hook let through.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use tracing::debug;

use snag_core::config::OptionDescriptor;
use snag_core::config::schema::is_int_in;
use snag_core::{Client, PluginDescriptor, PluginError, PluginResult, define_plugin};

/// Default value of `maxEvents`.
pub const DEFAULT_MAX_EVENTS: u64 = 10;

/// The throttle plugin.
pub static THROTTLE: PluginDescriptor = define_plugin! {
    name: "throttle",
    desc: "Limits the number of reports sent per client.",
    config_schema: &[(
        "maxEvents",
        OptionDescriptor::new(
            default_max_events,
            is_max_events,
            "should be a positive integer ≤100",
        ),
    )],
    init: init,
};

fn default_max_events() -> Value {
    json!(DEFAULT_MAX_EVENTS)
}

fn is_max_events(value: &Value) -> bool {
    is_int_in(value, 1, 100)
}

fn init(client: &mut Client) -> PluginResult<()> {
    let config = client
        .config()
        .ok_or_else(|| PluginError::new(THROTTLE.name, "client is not configured"))?;
    let max = config.get_u64("maxEvents").unwrap_or(DEFAULT_MAX_EVENTS) as usize;
    let sent = Arc::new(AtomicUsize::new(0));

    client.on_error(move |report| {
        let admitted = sent
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| (n < max).then_some(n + 1))
            .is_ok();
        if !admitted {
            debug!(max_events = max, error_class = %report.error_class, "Report throttled");
        }
        admitted
    });
    Ok(())
}
