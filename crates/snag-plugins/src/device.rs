//! Device enrichment.
//!
//! Attaches host facts to every report: operating system, architecture,
//! locale, user agent and the report time. When `collectUserIp` is `false`
//! the user id and client IP are replaced with a placeholder so the collector
//! never derives them from the connection.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use snag_core::config::OptionDescriptor;
use snag_core::config::schema::{is_bool, yes};
use snag_core::{Client, HostInfo, PluginDescriptor, PluginResult, Report, define_plugin};

/// Placeholder used when IP collection is off.
pub const NOT_COLLECTED: &str = "[NOT COLLECTED]";

/// The device plugin.
pub static DEVICE: PluginDescriptor = define_plugin! {
    name: "device",
    desc: "Adds device facts and honours collectUserIp.",
    config_schema: &[(
        "collectUserIp",
        OptionDescriptor::new(yes, is_bool, "should be true|false"),
    )],
    init: init,
};

fn init(client: &mut Client) -> PluginResult<()> {
    let host = client.host().clone();
    let collect_ip = client
        .config()
        .and_then(|c| c.get_bool("collectUserIp"))
        .unwrap_or(true);

    client.on_error(move |report| {
        apply_device(report, &host);
        if !collect_ip {
            redact_ip(report);
        }
        true
    });
    Ok(())
}

fn apply_device(report: &mut Report, host: &HostInfo) {
    let facts = [
        ("osName", host.os_name.as_deref()),
        ("arch", host.arch.as_deref()),
        ("locale", host.locale.as_deref()),
        ("userAgent", host.user_agent.as_deref()),
    ];
    for (key, value) in facts {
        if let Some(value) = value {
            report
                .device
                .entry(key)
                .or_insert_with(|| Value::from(value));
        }
    }
    report.device.entry("time").or_insert_with(|| {
        Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    });
}

fn redact_ip(report: &mut Report) {
    report
        .user
        .entry("id")
        .or_insert_with(|| Value::from(NOT_COLLECTED));
    report
        .request
        .insert("clientIp".to_string(), Value::from(NOT_COLLECTED));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{configured_with, send};
    use serde_json::json;

    fn host() -> HostInfo {
        HostInfo {
            os_name: Some("linux".into()),
            arch: Some("x86_64".into()),
            locale: Some("en-GB".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_device_facts_attached() {
        let (client, transport) = configured_with(&DEVICE, json!({ "apiKey": "k" }), host());
        send(&client, Report::new("Error", "boom"));

        let sent = transport.sent.lock();
        assert_eq!(sent[0].device["osName"], json!("linux"));
        assert_eq!(sent[0].device["locale"], json!("en-GB"));
        assert!(sent[0].device.contains_key("time"));
        assert!(!sent[0].request.contains_key("clientIp"));
    }

    #[test]
    fn test_ip_redacted_when_disabled() {
        let (client, transport) = configured_with(
            &DEVICE,
            json!({ "apiKey": "k", "collectUserIp": false }),
            host(),
        );
        send(&client, Report::new("Error", "boom"));

        let sent = transport.sent.lock();
        assert_eq!(sent[0].user["id"], json!(NOT_COLLECTED));
        assert_eq!(sent[0].request["clientIp"], json!(NOT_COLLECTED));
    }

    #[test]
    fn test_explicit_user_id_kept() {
        let (client, transport) = configured_with(
            &DEVICE,
            json!({ "apiKey": "k", "collectUserIp": false, "user": { "id": "u-1" } }),
            host(),
        );
        send(&client, Report::new("Error", "boom"));
        assert_eq!(transport.sent.lock()[0].user["id"], json!("u-1"));
    }
}
