//! Error types for placeholder handlers and token resolution

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::Span;

/// Failure raised by a placeholder handler while producing its value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderError {
    #[error("{message}")]
    Failed { message: String },

    #[error("invalid parameter '{param}': {reason}")]
    InvalidParameter { param: String, reason: String },
}

impl PlaceholderError {
    /// Create a generic handler failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            reason: reason.into(),
        }
    }
}

/// Why a token was left verbatim in the output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    #[error("unknown placeholder '{identifier}'")]
    UnknownIdentifier { identifier: String },

    #[error("placeholder '{identifier}' requires a player context")]
    MissingRequiredContext { identifier: String },

    #[error("placeholder '{identifier}' does not accept parameters")]
    UnsupportedParameters { identifier: String },

    #[error("placeholder '{identifier}' failed: {message}")]
    HandlerFailure { identifier: String, message: String },

    #[error("placeholder '{identifier}' is beyond the recursion limit")]
    RecursionLimit { identifier: String },
}

impl Unresolved {
    /// Identifier of the offending token
    pub fn identifier(&self) -> &str {
        match self {
            Self::UnknownIdentifier { identifier }
            | Self::MissingRequiredContext { identifier }
            | Self::UnsupportedParameters { identifier }
            | Self::HandlerFailure { identifier, .. }
            | Self::RecursionLimit { identifier } => identifier,
        }
    }

    /// Short hint shown under the diagnostic label
    fn help(&self) -> Option<&'static str> {
        match self {
            Self::UnknownIdentifier { .. } => {
                Some("register it before parsing, or check the spelling")
            }
            Self::MissingRequiredContext { .. } => Some("parse this message with a player"),
            Self::UnsupportedParameters { .. } => Some("remove the `:params` part"),
            Self::RecursionLimit { .. } => Some("raise `max_depth` in the [resolver] config"),
            Self::HandlerFailure { .. } => None,
        }
    }
}

/// An unresolved token located in a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Byte range of the token
    pub span: Span,
    /// Reason the token stays verbatim
    pub reason: Unresolved,
}

impl Diagnostic {
    /// Format the diagnostic with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let mut report = Report::build(ReportKind::Warning, filename, self.span.start)
            .with_message(self.reason.to_string())
            .with_label(
                Label::new((filename, self.span.clone()))
                    .with_message("left as literal text")
                    .with_color(Color::Yellow),
            );
        if let Some(help) = self.reason.help() {
            report = report.with_help(help);
        }

        // Writing into a Vec cannot fail short of allocation failure
        if report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .is_err()
        {
            return format!("{}: {}", filename, self.reason);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_error_display() {
        assert_eq!(PlaceholderError::failed("boom").to_string(), "boom");
        let err = PlaceholderError::invalid_parameter("abc", "expected a number");
        assert_eq!(err.to_string(), "invalid parameter 'abc': expected a number");
    }

    #[test]
    fn test_unresolved_identifier() {
        let reason = Unresolved::HandlerFailure {
            identifier: "ping".to_string(),
            message: "offline".to_string(),
        };
        assert_eq!(reason.identifier(), "ping");
        assert!(reason.to_string().contains("offline"));
    }

    #[test]
    fn test_diagnostic_format_mentions_reason() {
        let source = "hello {nope}";
        let diag = Diagnostic {
            span: 6..12,
            reason: Unresolved::UnknownIdentifier {
                identifier: "nope".to_string(),
            },
        };
        let out = diag.format(source, "motd.txt");
        assert!(out.contains("unknown placeholder 'nope'"));
        assert!(out.contains("motd.txt"));
    }
}
