//! Modern HTTP transport.
//!
//! Posts the payload as JSON and carries the API key and payload metadata in
//! request headers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request};
use tracing::debug;

use snag_core::{Notifier, Report, Transport, TransportError, TransportResult, ValidatedConfig};

use crate::payload::{PAYLOAD_VERSION, build_payload, sent_at};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "Bugsnag-Api-Key";
/// Header carrying the payload version.
pub const PAYLOAD_VERSION_HEADER: &str = "Bugsnag-Payload-Version";
/// Header carrying the send time.
pub const SENT_AT_HEADER: &str = "Bugsnag-Sent-At";

/// Transport used when the host has no legacy cross-domain facility.
#[derive(Debug, Clone)]
pub struct ModernTransport {
    client: Client,
    timeout: Option<Duration>,
}

impl ModernTransport {
    /// Name reported in logs.
    pub const NAME: &'static str = "modern";

    /// Creates the transport with default settings.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            timeout: None,
        }
    }

    /// Applies `timeout` to every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the request without sending it.
    pub fn build_request(
        &self,
        notifier: &Notifier,
        config: &ValidatedConfig,
        report: &Report,
    ) -> TransportResult<Request> {
        let payload = build_payload(notifier, config, report);
        let mut builder = self
            .client
            .post(config.notify_endpoint())
            .header(API_KEY_HEADER, config.api_key())
            .header(PAYLOAD_VERSION_HEADER, PAYLOAD_VERSION)
            .header(SENT_AT_HEADER, sent_at())
            .json(&payload);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))
    }
}

impl Default for ModernTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ModernTransport {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn send_report(
        &self,
        notifier: &Notifier,
        config: &ValidatedConfig,
        report: &Report,
    ) -> TransportResult<()> {
        let request = self.build_request(notifier, config, report)?;
        let url = request.url().to_string();
        debug!(url = %url, "Sending report");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::{Value, json};
    use snag_core::{base_schema, validate_options};

    const NOTIFIER: Notifier = Notifier {
        name: "Snag Test",
        version: "0.0.0",
        url: "https://example.com",
    };

    fn config(options: Value) -> ValidatedConfig {
        validate_options(&base_schema(), options.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_request_carries_key_in_headers() {
        let transport = ModernTransport::new();
        let config = config(json!({ "apiKey": "abc" }));
        let request = transport
            .build_request(&NOTIFIER, &config, &Report::new("Error", "boom"))
            .unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().as_str(), "https://notify.bugsnag.com/");
        assert_eq!(request.url().query(), None);
        let headers = request.headers();
        assert_eq!(headers[API_KEY_HEADER], "abc");
        assert_eq!(headers[PAYLOAD_VERSION_HEADER], PAYLOAD_VERSION);
        assert!(headers.contains_key(SENT_AT_HEADER));
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(request.timeout(), None);
    }

    #[test]
    fn test_timeout_applied_to_requests() {
        let transport = ModernTransport::new().with_timeout(Duration::from_secs(5));
        let request = transport
            .build_request(&NOTIFIER, &config(json!({ "apiKey": "abc" })), &Report::new("Error", "boom"))
            .unwrap();
        assert_eq!(request.timeout(), Some(&Duration::from_secs(5)));
    }

    #[test]
    fn test_request_uses_configured_endpoint() {
        let transport = ModernTransport::new();
        let config = config(json!({
            "apiKey": "abc",
            "endpoints": { "notify": "https://errors.internal/notify", "sessions": "https://errors.internal/sessions" },
        }));
        let request = transport
            .build_request(&NOTIFIER, &config, &Report::new("Error", "boom"))
            .unwrap();
        assert_eq!(request.url().as_str(), "https://errors.internal/notify");
    }
}
