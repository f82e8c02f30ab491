//! Uncaught error capture.
//!
//! Turns on the client's [`CaptureKind::UncaughtError`] channel. The host's
//! global error handler builds a report with [`uncaught_report`] and hands it
//! to [`Client::capture`].

use snag_core::{CaptureKind, Client, Frame, PluginDescriptor, PluginResult, Report, define_plugin};

/// The uncaught-error capture plugin.
pub static WINDOW_ERROR: PluginDescriptor = define_plugin! {
    name: "window onerror",
    desc: "Reports errors that reach the host's global error handler.",
    init: init,
};

fn init(client: &mut Client) -> PluginResult<()> {
    client.enable_capture(CaptureKind::UncaughtError);
    Ok(())
}

/// Builds a report from the arguments a global error handler receives.
///
/// `message` may carry a `Class: message` prefix, which is split off into the
/// error class.
pub fn uncaught_report(
    message: &str,
    file: Option<&str>,
    line: Option<u32>,
    column: Option<u32>,
) -> Report {
    let (class, text) = match message.split_once(": ") {
        Some((class, text)) if !class.is_empty() && !class.contains(char::is_whitespace) => {
            (class, text)
        }
        _ => ("Error", message),
    };

    let mut report = Report::new(class, text);
    if file.is_some() || line.is_some() {
        report.stacktrace.push(Frame {
            file: file.map(str::to_string),
            line_number: line,
            column_number: column,
            ..Default::default()
        });
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::configured_with;
    use serde_json::json;
    use snag_core::{HostInfo, Severity};

    #[test]
    fn test_report_class_split() {
        let report = uncaught_report("TypeError: x is undefined", Some("app.js"), Some(4), Some(2));
        assert_eq!(report.error_class, "TypeError");
        assert_eq!(report.error_message, "x is undefined");
        assert_eq!(report.stacktrace[0].column_number, Some(2));

        let plain = uncaught_report("Script error.", None, None, None);
        assert_eq!(plain.error_class, "Error");
        assert!(plain.stacktrace.is_empty());
    }

    #[test]
    fn test_capture_marks_unhandled() {
        let (client, transport) =
            configured_with(&WINDOW_ERROR, json!({ "apiKey": "k" }), HostInfo::default());
        assert!(client.is_capturing(CaptureKind::UncaughtError));

        let report = uncaught_report("Error: boom", Some("app.js"), Some(1), None);
        let sent = tokio_test::block_on(client.capture(CaptureKind::UncaughtError, report)).unwrap();
        assert!(sent);

        let sent = transport.sent.lock();
        assert!(sent[0].unhandled);
        assert_eq!(sent[0].severity, Severity::Error);
    }
}
