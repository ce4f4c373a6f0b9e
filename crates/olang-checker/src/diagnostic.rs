//! Diagnostic rendering for semantic and syntax errors
//!
//! Wraps the error taxonomy in codespan diagnostics with stable error codes,
//! source-context labels, colored terminal output, and a JSON form for
//! tooling.

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, Severity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use olang_parser::{LexError, ParseError, Span};
use serde::{Deserialize, Serialize};

use crate::error::SemanticError;

/// Error code for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        self.0
    }
}

/// Stable code for each semantic failure kind.
fn error_code(error: &SemanticError) -> ErrorCode {
    match error {
        SemanticError::NameCollision { .. } => ErrorCode("E2001"),
        SemanticError::Redefinition { .. } => ErrorCode("E2002"),
        SemanticError::UnresolvedReference { .. } => ErrorCode("E2003"),
        SemanticError::CircularInheritance { .. } => ErrorCode("E2004"),
        SemanticError::UnresolvedMember { .. } => ErrorCode("E2005"),
    }
}

/// A diagnostic message with source code context
pub struct Diagnostic {
    inner: CsDiagnostic<usize>,
    code: Option<ErrorCode>,
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            inner: CsDiagnostic::new(Severity::Error).with_message(message),
            code: None,
        }
    }

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code.clone());
        self.inner = self.inner.with_code(code.0);
        self
    }

    /// Add a primary label (main error location)
    pub fn with_primary_label(
        mut self,
        file_id: usize,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        let label = Label::primary(file_id, span.start..span.end).with_message(message);
        self.inner.labels.push(label);
        self
    }

    /// Add a note (additional context)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.inner.notes.push(note.into());
        self
    }

    /// Create a diagnostic from a SemanticError
    pub fn from_semantic_error(error: &SemanticError, file_id: usize) -> Self {
        use SemanticError::*;

        match error {
            NameCollision {
                class,
                signature,
                span,
            } => Diagnostic::error(format!(
                "{} defined more than once in class {}",
                signature, class
            ))
            .with_code(error_code(error))
            .with_primary_label(file_id, *span, "duplicate declaration"),

            Redefinition { name, span } => {
                Diagnostic::error(format!("Class {} is already defined", name))
                    .with_code(error_code(error))
                    .with_primary_label(file_id, *span, "second definition here")
            }

            UnresolvedReference { name } => {
                Diagnostic::error(format!("Class {} is referenced but never defined", name))
                    .with_code(error_code(error))
                    .with_note(format!(
                        "'{}' is used as a type but no class of that name exists",
                        name
                    ))
            }

            CircularInheritance { cycle } => {
                Diagnostic::error(format!("Circular inheritance detected: {}", cycle))
                    .with_code(error_code(error))
                    .with_note("Every extends chain must end at class Class")
            }

            UnresolvedMember {
                class,
                member,
                span,
            } => Diagnostic::error(format!(
                "Class {} has no member {} matching this use",
                class, member
            ))
            .with_code(error_code(error))
            .with_primary_label(file_id, *span, "member not found"),
        }
    }

    /// Create a diagnostic from a ParseError
    pub fn from_parse_error(error: &ParseError, file_id: usize) -> Self {
        Diagnostic::error(error.message.clone())
            .with_code(ErrorCode("E1001"))
            .with_primary_label(file_id, error.span, "syntax error")
    }

    /// Create a diagnostic from a LexError
    pub fn from_lex_error(error: &LexError, file_id: usize) -> Self {
        let span = match error {
            LexError::UnexpectedCharacter { span, .. } => *span,
            LexError::InvalidNumber { span, .. } => *span,
        };
        Diagnostic::error(error.to_string())
            .with_code(ErrorCode("E1000"))
            .with_primary_label(file_id, span, "invalid token")
    }

    /// Emit the diagnostic to stderr with colors
    pub fn emit(
        &self,
        files: &SimpleFiles<String, String>,
    ) -> Result<(), codespan_reporting::files::Error> {
        let mut writer = StandardStream::stderr(ColorChoice::Auto);
        let config = term::Config::default();
        term::emit(&mut writer, &config, files, &self.inner)
    }

    /// Get the underlying codespan diagnostic (for testing/custom rendering)
    pub fn inner(&self) -> &CsDiagnostic<usize> {
        &self.inner
    }

    /// Convert to the JSON representation for tooling
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&JsonDiagnostic::from_diagnostic(self))
    }
}

/// JSON representation of a diagnostic for tooling integration
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    /// Error code (e.g., "E2001")
    pub code: Option<String>,
    /// Main error message
    pub message: String,
    /// Byte offsets of labeled source regions
    pub labels: Vec<JsonLabel>,
    /// Additional notes
    pub notes: Vec<String>,
}

/// JSON representation of a diagnostic label
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLabel {
    pub start: usize,
    pub end: usize,
    pub message: String,
}

impl JsonDiagnostic {
    fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
        JsonDiagnostic {
            code: diagnostic.code.as_ref().map(|c| c.as_str().to_string()),
            message: diagnostic.inner.message.clone(),
            labels: diagnostic
                .inner
                .labels
                .iter()
                .map(|label| JsonLabel {
                    start: label.range.start,
                    end: label.range.end,
                    message: label.message.clone(),
                })
                .collect(),
            notes: diagnostic.inner.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_error_codes() {
        let collision = SemanticError::NameCollision {
            class: "Dog".into(),
            signature: "Field name".into(),
            span: Span::new(10, 14, 2, 5),
        };
        let diag = Diagnostic::from_semantic_error(&collision, 0);
        assert_eq!(diag.code, Some(ErrorCode("E2001")));
        assert_eq!(
            diag.inner().message,
            "Field name defined more than once in class Dog"
        );

        let unresolved = SemanticError::UnresolvedReference {
            name: "Ghost".into(),
        };
        let diag = Diagnostic::from_semantic_error(&unresolved, 0);
        assert_eq!(diag.code, Some(ErrorCode("E2003")));
        assert!(diag.inner().labels.is_empty());
    }

    #[test]
    fn test_json_form() {
        let error = SemanticError::Redefinition {
            name: "A".into(),
            span: Span::new(20, 21, 3, 7),
        };
        let json = Diagnostic::from_semantic_error(&error, 0).to_json().unwrap();
        let parsed: JsonDiagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.code.as_deref(), Some("E2002"));
        assert_eq!(parsed.labels[0].start, 20);
    }
}
