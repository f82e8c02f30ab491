//! Inline script content.
//!
//! Errors raised by scripts embedded in the hosting document point at the
//! document itself, whose source the collector cannot fetch. For such frames
//! this plugin attaches the surrounding document lines as `code`.

use std::collections::BTreeMap;

use snag_core::config::OptionDescriptor;
use snag_core::config::schema::{is_bool, yes};
use snag_core::{Client, Frame, PluginDescriptor, PluginResult, define_plugin};
use url::Url;

/// Lines kept on each side of the failing line.
const SURROUNDING_LINES: u32 = 3;
/// Longest line kept, in characters.
const MAX_LINE_LENGTH: usize = 200;

/// The inline script content plugin.
pub static INLINE_SCRIPT_CONTENT: PluginDescriptor = define_plugin! {
    name: "inline script content",
    desc: "Attaches document source around errors in inline scripts.",
    config_schema: &[(
        "trackInlineScripts",
        OptionDescriptor::new(yes, is_bool, "should be true|false"),
    )],
    init: init,
};

fn init(client: &mut Client) -> PluginResult<()> {
    let enabled = client
        .config()
        .and_then(|c| c.get_bool("trackInlineScripts"))
        .unwrap_or(true);
    let host = client.host();
    let (Some(page), Some(document)) = (host.url(), host.document.clone()) else {
        return Ok(());
    };
    if !enabled {
        return Ok(());
    }

    let page = without_fragment(page);
    let lines: Vec<String> = document.lines().map(str::to_string).collect();

    client.on_error(move |report| {
        for frame in &mut report.stacktrace {
            if frame.code.is_none()
                && frame
                    .file
                    .as_deref()
                    .and_then(|file| Url::parse(file).ok())
                    .map(without_fragment)
                    .as_ref()
                    == Some(&page)
            {
                attach_code(frame, &lines);
            }
        }
        true
    });
    Ok(())
}

fn without_fragment(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

fn attach_code(frame: &mut Frame, lines: &[String]) {
    let Some(line) = frame.line_number.filter(|&n| n > 0) else {
        return;
    };
    let first = line.saturating_sub(SURROUNDING_LINES).max(1);
    let last = line.saturating_add(SURROUNDING_LINES);

    let code: BTreeMap<String, String> = (first..=last)
        .filter_map(|n| {
            let text = lines.get(n as usize - 1)?;
            Some((n.to_string(), text.chars().take(MAX_LINE_LENGTH).collect()))
        })
        .collect();
    if !code.is_empty() {
        frame.code = Some(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{configured_with, send};
    use serde_json::json;
    use snag_core::{HostInfo, Report};

    const DOCUMENT: &str = "<html>\n<head>\n<script>\nvar a = 1;\nfoo();\nvar b = 2;\n</script>\n</head>\n<body></body>\n</html>";

    fn host() -> HostInfo {
        HostInfo {
            location: Some("https://example.com/index.html".into()),
            document: Some(DOCUMENT.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_code_attached_for_page_frames() {
        let (client, transport) =
            configured_with(&INLINE_SCRIPT_CONTENT, json!({ "apiKey": "k" }), host());
        let report = Report::new("ReferenceError", "foo is not defined")
            .with_frame(Frame::new("https://example.com/index.html#top", 5))
            .with_frame(Frame::new("https://cdn.example.com/lib.js", 5));
        send(&client, report);

        let sent = transport.sent.lock();
        let code = sent[0].stacktrace[0].code.as_ref().unwrap();
        assert_eq!(code["5"], "foo();");
        assert_eq!(code.len(), 7);
        assert!(sent[0].stacktrace[1].code.is_none());
    }

    #[test]
    fn test_page_match_ignores_url_case() {
        let (client, transport) =
            configured_with(&INLINE_SCRIPT_CONTENT, json!({ "apiKey": "k" }), host());
        send(
            &client,
            Report::new("Error", "boom")
                .with_frame(Frame::new("HTTPS://Example.COM/index.html#main", 5)),
        );
        assert!(transport.sent.lock()[0].stacktrace[0].code.is_some());
    }

    #[test]
    fn test_window_clamped_at_document_start() {
        let mut frame = Frame::new("page", 1);
        let lines: Vec<String> = DOCUMENT.lines().map(str::to_string).collect();
        attach_code(&mut frame, &lines);
        let code = frame.code.unwrap();
        assert_eq!(code.keys().next().map(String::as_str), Some("1"));
        assert_eq!(code.len(), 4);
    }

    #[test]
    fn test_disabled_by_option() {
        let (client, transport) = configured_with(
            &INLINE_SCRIPT_CONTENT,
            json!({ "apiKey": "k", "trackInlineScripts": false }),
            host(),
        );
        send(
            &client,
            Report::new("Error", "boom").with_frame(Frame::new("https://example.com/index.html", 5)),
        );
        assert!(transport.sent.lock()[0].stacktrace[0].code.is_none());
    }
}
