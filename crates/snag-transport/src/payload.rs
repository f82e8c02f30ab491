//! Notify payload construction.
//!
//! Both transports send the same JSON document; they differ only in how the
//! API key and payload metadata travel with it.

use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};

use snag_core::{Notifier, Report, ValidatedConfig};

/// Payload version sent in headers or query strings.
pub const PAYLOAD_VERSION: &str = "4";

/// Builds the notify payload for a single report.
pub fn build_payload(notifier: &Notifier, config: &ValidatedConfig, report: &Report) -> Value {
    json!({
        "apiKey": config.api_key(),
        "payloadVersion": PAYLOAD_VERSION,
        "notifier": notifier,
        "events": [event(report)],
    })
}

fn event(report: &Report) -> Value {
    json!({
        "payloadVersion": PAYLOAD_VERSION,
        "exceptions": [{
            "errorClass": report.error_class,
            "message": report.error_message,
            "stacktrace": report.stacktrace,
        }],
        "severity": report.severity,
        "unhandled": report.unhandled,
        "severityReason": report.severity_reason.as_ref().map(|t| json!({ "type": t })),
        "context": report.context,
        "app": {
            "releaseStage": report.release_stage,
            "version": report.app_version,
        },
        "device": report.device,
        "request": report.request,
        "user": report.user,
        "metaData": report.meta_data,
        "breadcrumbs": report.breadcrumbs,
    })
}

/// Current time in the collector's timestamp format.
pub fn sent_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
