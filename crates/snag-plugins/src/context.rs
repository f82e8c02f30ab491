//! Context enrichment: reports without a context get the host page's path.

use snag_core::{Client, PluginDescriptor, PluginResult, define_plugin};

/// The context plugin.
pub static CONTEXT: PluginDescriptor = define_plugin! {
    name: "context",
    desc: "Defaults the report context to the page path.",
    init: init,
};

fn init(client: &mut Client) -> PluginResult<()> {
    let Some(path) = client.host().path() else {
        return Ok(());
    };
    client.on_error(move |report| {
        if report.context.is_none() {
            report.context = Some(path.clone());
        }
        true
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{configured_with, send};
    use serde_json::json;
    use snag_core::{HostInfo, Report};

    fn host() -> HostInfo {
        HostInfo {
            location: Some("https://shop.example.com/basket?step=2".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_context_defaults_to_path() {
        let (client, transport) = configured_with(&CONTEXT, json!({ "apiKey": "k" }), host());
        send(&client, Report::new("Error", "boom"));
        assert_eq!(transport.sent.lock()[0].context.as_deref(), Some("/basket"));
    }

    #[test]
    fn test_explicit_context_wins() {
        let (client, transport) = configured_with(&CONTEXT, json!({ "apiKey": "k" }), host());
        let mut report = Report::new("Error", "boom");
        report.context = Some("checkout".into());
        send(&client, report);
        assert_eq!(transport.sent.lock()[0].context.as_deref(), Some("checkout"));
    }
}
