//! Console breadcrumbs.
//!
//! Records console output as `log` breadcrumbs. Whether the plugin is
//! registered at all depends on the release stage; once registered,
//! `consoleBreadcrumbsEnabled: false` still switches the channel off.

use serde_json::Value;

use snag_core::config::OptionDescriptor;
use snag_core::config::schema::{is_bool, null};
use snag_core::{
    Breadcrumb, BreadcrumbKind, Client, LogLevel, PluginDescriptor, PluginResult, define_plugin,
};

use crate::breadcrumb_channel_enabled;

/// The console breadcrumbs plugin.
pub static CONSOLE_BREADCRUMBS: PluginDescriptor = define_plugin! {
    name: "console breadcrumbs",
    desc: "Records console output.",
    config_schema: &[(
        "consoleBreadcrumbsEnabled",
        OptionDescriptor::new(null, is_bool, "should be true|false"),
    )],
    init: init,
};

fn init(client: &mut Client) -> PluginResult<()> {
    if breadcrumb_channel_enabled(client, "consoleBreadcrumbsEnabled") {
        client.enable_breadcrumbs(BreadcrumbKind::Log);
    }
    Ok(())
}

/// Breadcrumb for one console call. Arguments are stored as `[0]`, `[1]`, ...
pub fn console_breadcrumb(level: LogLevel, args: &[Value]) -> Breadcrumb {
    let mut crumb =
        Breadcrumb::new("Console output", BreadcrumbKind::Log).with_meta("severity", level.as_str());
    for (i, arg) in args.iter().enumerate() {
        let rendered = match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        crumb = crumb.with_meta(format!("[{i}]"), rendered);
    }
    crumb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::configured_with;
    use serde_json::json;
    use snag_core::HostInfo;

    #[test]
    fn test_console_breadcrumb_args() {
        let crumb = console_breadcrumb(LogLevel::Warn, &[json!("low disk"), json!({ "free": 3 })]);
        assert_eq!(crumb.meta_data["severity"], json!("warn"));
        assert_eq!(crumb.meta_data["[0]"], json!("low disk"));
        assert_eq!(crumb.meta_data["[1]"], json!("{\"free\":3}"));
    }

    #[test]
    fn test_option_switches_channel_off() {
        let (client, _) = configured_with(
            &CONSOLE_BREADCRUMBS,
            json!({ "apiKey": "k", "consoleBreadcrumbsEnabled": false }),
            HostInfo::default(),
        );
        assert!(!client.records_breadcrumbs(BreadcrumbKind::Log));
    }
}
