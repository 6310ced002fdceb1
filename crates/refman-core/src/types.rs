use serde::{Deserialize, Serialize};

/// One recognized heading line, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub id: String,
}

/// An indexable entry opened by a heading of level 2 or deeper.
///
/// `start_offset` is the position of the heading's block in
/// [`CompiledDocument::blocks`](crate::CompiledDocument::blocks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub level: u8,
    pub start_offset: usize,
    pub short_description: String,
}

/// A level-2 category heading from the category pass together with the
/// level-3 keyword sections listed beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub keywords: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub line: Option<usize>,
}

/// How serious a [`Diagnostic`] is.
///
/// The compiler currently only emits `Warn`. `Error` and `Info` are reserved
/// for stricter lints; `refman check` already fails on `Error` and lists
/// `Info` without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warn,
    Info,
}

impl Diagnostic {
    pub(crate) fn warn(message: impl Into<String>, line: usize) -> Self {
        Self {
            severity: DiagnosticSeverity::Warn,
            message: message.into(),
            line: Some(line),
        }
    }
}
