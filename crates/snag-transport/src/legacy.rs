//! Legacy cross-domain transport.
//!
//! Older hosts can only make simple cross-domain requests: no custom headers
//! and no JSON content type. The API key and payload metadata therefore move
//! into the query string, the body is sent as `text/plain`, and the endpoint
//! scheme is rewritten to match the hosting page.

use async_trait::async_trait;
use reqwest::{Client, Request, Url};
use tracing::debug;

use snag_core::{Notifier, Report, Transport, TransportError, TransportResult, ValidatedConfig};

use crate::payload::{PAYLOAD_VERSION, build_payload, sent_at};

/// Transport used when the host exposes the legacy cross-domain facility.
#[derive(Debug, Clone)]
pub struct LegacyTransport {
    client: Client,
    page_scheme: Option<String>,
}

impl LegacyTransport {
    /// Name reported in logs.
    pub const NAME: &'static str = "legacy";

    /// Creates the transport for a page served over `page_scheme`.
    pub fn new(page_scheme: Option<String>) -> Self {
        Self {
            client: Client::new(),
            page_scheme,
        }
    }

    /// Resolves the endpoint URL with query parameters and the page's scheme.
    pub fn endpoint_url(&self, config: &ValidatedConfig) -> TransportResult<Url> {
        let mut url = Url::parse(config.notify_endpoint())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        if let Some(scheme) = self.page_scheme.as_deref()
            && matches!(scheme, "http" | "https")
            && url.scheme() != scheme
        {
            url.set_scheme(scheme).map_err(|()| {
                TransportError::InvalidRequest(format!("cannot switch endpoint to {scheme}"))
            })?;
        }

        url.query_pairs_mut()
            .append_pair("apiKey", config.api_key())
            .append_pair("payloadVersion", PAYLOAD_VERSION)
            .append_pair("sentAt", &sent_at());
        Ok(url)
    }

    /// Builds the request without sending it.
    pub fn build_request(
        &self,
        notifier: &Notifier,
        config: &ValidatedConfig,
        report: &Report,
    ) -> TransportResult<Request> {
        let url = self.endpoint_url(config)?;
        let body = serde_json::to_string(&build_payload(notifier, config, report))?;
        self.client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))
    }
}

#[async_trait]
impl Transport for LegacyTransport {
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
        let url = request.url().clone();
        debug!(host = ?url.host_str(), "Sending report over legacy transport");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TransportError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use snag_core::{HostInfo, base_schema, validate_options};

    const NOTIFIER: Notifier = Notifier {
        name: "Snag Test",
        version: "0.0.0",
        url: "https://example.com",
    };

    fn config(options: Value) -> ValidatedConfig {
        validate_options(&base_schema(), options.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_key_travels_in_query() {
        let transport = LegacyTransport::new(Some("https".into()));
        let config = config(json!({ "apiKey": "abc" }));
        let request = transport
            .build_request(&NOTIFIER, &config, &Report::new("Error", "boom"))
            .unwrap();

        let query: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(query[0], ("apiKey".to_string(), "abc".to_string()));
        assert_eq!(query[1], ("payloadVersion".to_string(), PAYLOAD_VERSION.to_string()));
        assert_eq!(query[2].0, "sentAt");
        assert_eq!(request.headers()["content-type"], "text/plain");
        assert!(!request.headers().contains_key("Bugsnag-Api-Key"));
    }

    #[test]
    fn test_scheme_follows_page() {
        let config = config(json!({ "apiKey": "abc" }));

        let http = LegacyTransport::new(Some("http".into()));
        assert_eq!(http.endpoint_url(&config).unwrap().scheme(), "http");

        let https = LegacyTransport::new(Some("https".into()));
        assert_eq!(https.endpoint_url(&config).unwrap().scheme(), "https");

        let file = LegacyTransport::new(Some("file".into()));
        assert_eq!(file.endpoint_url(&config).unwrap().scheme(), "https");
    }

    #[test]
    fn test_scheme_follows_uppercase_page_location() {
        let host = HostInfo {
            location: Some("HTTP://intranet.example/app".into()),
            ..Default::default()
        };
        let transport = LegacyTransport::new(host.scheme());
        let config = config(json!({ "apiKey": "abc" }));
        assert_eq!(transport.endpoint_url(&config).unwrap().scheme(), "http");
    }
}
