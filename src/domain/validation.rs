// Field-scoped validation issues
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Advisory,
}

/// A rule violation attached to a request path such as `left.inputs.phaseAMs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub reason: String,
    #[serde(skip)]
    pub severity: Severity,
}

impl FieldError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
            severity: Severity::Error,
        }
    }

    pub fn advisory(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            severity: Severity::Advisory,
            ..Self::new(path, reason)
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Single-line form used when an advisory is surfaced as a warning.
    pub fn to_warning(&self) -> String {
        format!("{}: {}", self.path, self.reason)
    }
}

/// How the `pfVacuumKpa >= omVacuumKpa` rule is applied.
///
/// The rule has not been confirmed by the product owner, so deployments can
/// soften it without a code change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PfOmRule {
    #[default]
    Enforce,
    Warn,
    Off,
}
