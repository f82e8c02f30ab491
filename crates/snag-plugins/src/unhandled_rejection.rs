//! Unhandled rejection capture.
//!
//! Turns on the client's [`CaptureKind::UnhandledRejection`] channel. Hosts
//! build the report from the rejection reason with [`rejection_report`].

use serde_json::Value;

use snag_core::{CaptureKind, Client, PluginDescriptor, PluginResult, Report, define_plugin};

/// The unhandled-rejection capture plugin.
pub static UNHANDLED_REJECTION: PluginDescriptor = define_plugin! {
    name: "unhandled rejection",
    desc: "Reports rejected futures nobody awaited.",
    init: init,
};

fn init(client: &mut Client) -> PluginResult<()> {
    client.enable_capture(CaptureKind::UnhandledRejection);
    Ok(())
}

/// Builds a report from a rejection reason.
///
/// Objects with `name`/`message` fields keep them; anything else is rendered
/// into the message and attached verbatim as `metaData.promise.rejection reason`.
pub fn rejection_report(reason: &Value) -> Report {
    match reason {
        Value::Object(fields) if fields.contains_key("message") => {
            let class = fields.get("name").and_then(Value::as_str).unwrap_or("Error");
            let message = fields.get("message").and_then(Value::as_str).unwrap_or_default();
            Report::new(class, message)
        }
        Value::String(text) => Report::new("UnhandledRejection", text.as_str()),
        other => {
            let mut report = Report::new(
                "UnhandledRejection",
                format!("Rejection reason was not an Error: {other}"),
            );
            report.add_meta("promise", "rejection reason", other.clone());
            report
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::configured_with;
    use serde_json::json;
    use snag_core::HostInfo;

    #[test]
    fn test_reason_shapes() {
        let err = rejection_report(&json!({ "name": "RangeError", "message": "too far" }));
        assert_eq!(err.error_class, "RangeError");
        assert_eq!(err.error_message, "too far");

        let text = rejection_report(&json!("nope"));
        assert_eq!(text.error_class, "UnhandledRejection");
        assert_eq!(text.error_message, "nope");

        let number = rejection_report(&json!(42));
        assert_eq!(number.meta_data["promise"]["rejection reason"], json!(42));
    }

    #[test]
    fn test_capture_reason() {
        let (client, transport) =
            configured_with(&UNHANDLED_REJECTION, json!({ "apiKey": "k" }), HostInfo::default());
        let report = rejection_report(&json!("nope"));
        assert!(
            tokio_test::block_on(client.capture(CaptureKind::UnhandledRejection, report)).unwrap()
        );
        assert_eq!(
            transport.sent.lock()[0].severity_reason.as_deref(),
            Some("unhandledPromiseRejection")
        );
    }
}
