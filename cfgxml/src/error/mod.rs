//! Error types and reporting

use crate::span::Span;
use crate::util::format_suggestion_hint;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Error raised while compiling a configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Lexical error at {position}: unrecognized input near {snippet:?}")]
    Lexical {
        position: usize,
        snippet: String,
        span: Span,
    },

    #[error("Syntax error at {span}: {message}")]
    Syntax { message: String, span: Span },

    #[error("Undefined name at {span}: `{name}`{}", format_suggestion_hint(.suggestion.as_deref()))]
    UndefinedName {
        name: String,
        suggestion: Option<String>,
        span: Span,
    },

    /// Reading the input or writing the output file failed
    #[error("IO error: {message}")]
    Io { message: String },
}

impl ConfigError {
    pub fn lexical(position: usize, snippet: impl Into<String>, span: Span) -> Self {
        Self::Lexical {
            position,
            snippet: snippet.into(),
            span,
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::Syntax {
            message: message.into(),
            span,
        }
    }

    pub fn undefined_name(name: impl Into<String>, suggestion: Option<String>, span: Span) -> Self {
        Self::UndefinedName {
            name: name.into(),
            suggestion,
            span,
        }
    }

    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexical { span, .. } => Some(*span),
            Self::Syntax { span, .. } => Some(*span),
            Self::UndefinedName { span, .. } => Some(*span),
            Self::Io { .. } => None,
        }
    }

    /// Short label text, without the location prefix of `Display`
    pub fn message(&self) -> String {
        match self {
            Self::Lexical { snippet, .. } => format!("unrecognized input near {snippet:?}"),
            Self::Syntax { message, .. } => message.clone(),
            Self::UndefinedName {
                name, suggestion, ..
            } => format!(
                "undefined name `{name}`{}",
                format_suggestion_hint(suggestion.as_deref())
            ),
            Self::Io { message } => message.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lexical { .. } => "Lexical",
            Self::Syntax { .. } => "Syntax",
            Self::UndefinedName { .. } => "Name",
            Self::Io { .. } => "IO",
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err.to_string())
    }
}

/// Report error with ariadne
pub fn report_error(filename: &str, source: &str, error: &ConfigError) -> std::io::Result<()> {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let kind = error.kind();

    if let Some(span) = error.span() {
        // Clamp so end-of-input errors still point inside the source
        let start = span.start.min(source.len());
        let end = span.end.clamp(start, source.len());
        Report::build(ReportKind::Error, (filename, start..end))
            .with_message(format!("{kind} error"))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(error.message())
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((filename, Source::from(source)))
    } else {
        Report::build(ReportKind::Error, (filename, 0..0))
            .with_message(format!("{kind} error: {}", error.message()))
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_error_display() {
        let err = ConfigError::lexical(4, "#oops", Span::new(4, 5));
        let text = err.to_string();
        assert!(text.contains("at 4"));
        assert!(text.contains("#oops"));
        assert_eq!(err.kind(), "Lexical");
        assert_eq!(err.span(), Some(Span::new(4, 5)));
    }

    #[test]
    fn test_syntax_error_message() {
        let err = ConfigError::syntax("expected `;`, found end of input", Span::new(9, 9));
        assert_eq!(err.message(), "expected `;`, found end of input");
        assert_eq!(err.to_string(), "Syntax error at 9..9: expected `;`, found end of input");
    }

    #[test]
    fn test_undefined_name_with_suggestion() {
        let err = ConfigError::undefined_name("widht", Some("width".to_string()), Span::new(0, 5));
        assert!(err.message().contains("undefined name `widht`"));
        assert!(err.message().contains("did you mean `width`?"));
        assert!(err.to_string().contains("did you mean `width`?"));
    }

    #[test]
    fn test_undefined_name_without_suggestion() {
        let err = ConfigError::undefined_name("zzz", None, Span::new(0, 3));
        assert_eq!(err.message(), "undefined name `zzz`");
    }

    #[test]
    fn test_io_error_has_no_span() {
        let err: ConfigError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.span().is_none());
        assert_eq!(err.kind(), "IO");
        assert!(err.to_string().starts_with("IO error"));
    }
}
