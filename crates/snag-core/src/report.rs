//! Report and breadcrumb model.
//!
//! These are the values that flow through the client's `on_error` hooks and
//! out through the transport. Field names serialize in the collector's
//! camelCase form.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Report severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Info,
    /// Warning. Default for handled reports.
    #[default]
    Warning,
    /// Error. Default for automatically captured reports.
    Error,
}

/// Automatic capture channels, each owned by a capture plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptureKind {
    /// Errors nobody caught.
    UncaughtError,
    /// Rejected futures/promises nobody handled.
    UnhandledRejection,
}

impl CaptureKind {
    /// The `severityReason.type` attached to reports from this channel.
    pub fn severity_reason(&self) -> &'static str {
        match self {
            Self::UncaughtError => "unhandledException",
            Self::UnhandledRejection => "unhandledPromiseRejection",
        }
    }
}

/// Breadcrumb categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreadcrumbKind {
    /// Left explicitly by the application.
    Manual,
    /// Console output.
    Log,
    /// Page or route changes.
    Navigation,
    /// User interaction.
    User,
    /// Outgoing requests.
    Request,
    /// A previously reported error.
    Error,
    /// State changes.
    State,
}

/// A contextual event retained to explain a later report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    /// Short description.
    pub name: String,
    /// Category.
    #[serde(rename = "type")]
    pub kind: BreadcrumbKind,
    /// Extra structured data.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta_data: Map<String, Value>,
    /// When the breadcrumb was left.
    pub timestamp: DateTime<Utc>,
}

impl Breadcrumb {
    /// Creates a breadcrumb stamped with the current time.
    pub fn new(name: impl Into<String>, kind: BreadcrumbKind) -> Self {
        Self {
            name: name.into(),
            kind,
            meta_data: Map::new(),
            timestamp: Utc::now(),
        }
    }

    /// Adds a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta_data.insert(key.into(), value.into());
        self
    }
}

/// One stack frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// File or URL.
    pub file: Option<String>,
    /// 1-based line number.
    pub line_number: Option<u32>,
    /// 1-based column number.
    pub column_number: Option<u32>,
    /// Function or method name.
    pub method: Option<String>,
    /// Surrounding source, keyed by line number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<BTreeMap<String, String>>,
}

impl Frame {
    /// Creates a frame at `file:line`.
    pub fn new(file: impl Into<String>, line_number: u32) -> Self {
        Self {
            file: Some(file.into()),
            line_number: Some(line_number),
            ..Default::default()
        }
    }
}

/// An error report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Error type name.
    pub error_class: String,
    /// Error message.
    pub error_message: String,
    /// Stack, innermost frame first.
    pub stacktrace: Vec<Frame>,
    /// Severity.
    pub severity: Severity,
    /// Whether the error reached the host without being handled.
    pub unhandled: bool,
    /// Why the severity was chosen.
    pub severity_reason: Option<String>,
    /// Where in the application the error happened.
    pub context: Option<String>,
    /// Application release stage.
    pub release_stage: Option<String>,
    /// Application version.
    pub app_version: Option<String>,
    /// Device facts.
    pub device: Map<String, Value>,
    /// Request facts.
    pub request: Map<String, Value>,
    /// User facts.
    pub user: Map<String, Value>,
    /// Free-form metadata, grouped by section.
    pub meta_data: Map<String, Value>,
    /// Breadcrumbs at the time of the report.
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl Report {
    /// Creates a handled report.
    pub fn new(error_class: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            error_class: error_class.into(),
            error_message: error_message.into(),
            stacktrace: Vec::new(),
            severity: Severity::default(),
            unhandled: false,
            severity_reason: None,
            context: None,
            release_stage: None,
            app_version: None,
            device: Map::new(),
            request: Map::new(),
            user: Map::new(),
            meta_data: Map::new(),
            breadcrumbs: Vec::new(),
        }
    }

    /// Creates a report from any error value.
    pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        let class = std::any::type_name::<E>()
            .rsplit("::")
            .next()
            .unwrap_or("Error")
            .to_string();
        Self::new(class, error.to_string())
    }

    /// Appends a stack frame.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.stacktrace.push(frame);
        self
    }

    /// Sets the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Adds a value under `section.key` in the metadata.
    pub fn add_meta(&mut self, section: &str, key: impl Into<String>, value: impl Into<Value>) {
        let entry = self
            .meta_data
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = entry {
            map.insert(key.into(), value.into());
        }
    }
}
