use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// User-facing message produced at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub severity: Severity,
    pub text: String,
}

impl Feedback {
    pub fn new<T: Into<String>>(severity: Severity, text: T) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    pub fn success<T: Into<String>>(text: T) -> Self {
        Self::new(Severity::Success, text)
    }

    pub fn warning<T: Into<String>>(text: T) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn error<T: Into<String>>(text: T) -> Self {
        Self::new(Severity::Error, text)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
