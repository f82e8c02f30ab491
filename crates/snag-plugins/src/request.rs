//! Request enrichment: records the host page address as `request.url`.

use serde_json::Value;

use snag_core::{Client, PluginDescriptor, PluginResult, define_plugin};

/// The request plugin.
pub static REQUEST: PluginDescriptor = define_plugin! {
    name: "request",
    desc: "Adds the page URL to the report's request section.",
    init: init,
};

fn init(client: &mut Client) -> PluginResult<()> {
    let Some(url) = client.host().location.clone() else {
        return Ok(());
    };
    client.on_error(move |report| {
        report
            .request
            .entry("url")
            .or_insert_with(|| Value::from(url.as_str()));
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

    #[test]
    fn test_request_url_recorded() {
        let host = HostInfo {
            location: Some("https://example.com/a?b=c".into()),
            ..Default::default()
        };
        let (client, transport) = configured_with(&REQUEST, json!({ "apiKey": "k" }), host);
        send(&client, Report::new("Error", "boom"));
        assert_eq!(
            transport.sent.lock()[0].request["url"],
            json!("https://example.com/a?b=c")
        );
    }

    #[test]
    fn test_no_location_no_hook() {
        let (client, transport) =
            configured_with(&REQUEST, json!({ "apiKey": "k" }), HostInfo::default());
        send(&client, Report::new("Error", "boom"));
        assert!(transport.sent.lock()[0].request.is_empty());
    }
}
