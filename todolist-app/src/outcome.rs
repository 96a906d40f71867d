/// Operation outcomes handed to the presentation layer
///
/// Every service operation returns an [`Outcome`]. Callers only look at its
/// kind and message (and, for successes, its payload); the service never
/// returns a raw error.

use serde::Serialize;
use std::fmt;

/// Message class of an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    /// The operation did what was asked
    Success,

    /// Nothing to do, or nothing matched; not a failure
    Info,

    /// Rejected input or a system failure
    Error,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Success => f.write_str("success"),
            OutcomeKind::Info => f.write_str("info"),
            OutcomeKind::Error => f.write_str("error"),
        }
    }
}

/// User-facing result of a service operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T = ()> {
    kind: OutcomeKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<T>,
}

impl<T> Outcome<T> {
    /// Successful outcome carrying a payload
    pub fn success(message: impl Into<String>, payload: T) -> Self {
        Self {
            kind: OutcomeKind::Success,
            message: message.into(),
            payload: Some(payload),
        }
    }

    /// Informational outcome
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Info,
            message: message.into(),
            payload: None,
        }
    }

    /// Error outcome
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Error,
            message: message.into(),
            payload: None,
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    /// Display text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Payload, present only on success
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Success
    }

    pub fn is_info(&self) -> bool {
        self.kind == OutcomeKind::Info
    }

    pub fn is_error(&self) -> bool {
        self.kind == OutcomeKind::Error
    }
}

impl<T> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
