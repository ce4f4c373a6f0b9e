//! Semantic analysis errors
//!
//! All failures raised by the class registry and member resolution. Every
//! error aborts the current compilation pass at the point of violation;
//! nothing here is caught or aggregated inside the checker.

use olang_parser::Span;
use thiserror::Error;

/// Errors raised during class registration and resolution
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SemanticError {
    /// Duplicate member signature within a single class
    #[error("{signature} defined more than once in class {class}")]
    NameCollision {
        /// The class containing the duplicate
        class: String,
        /// Rendered signature of the clashing declaration
        signature: String,
        /// Position of the duplicate declaration
        span: Span,
    },

    /// A class name was defined twice
    #[error("Class {name} is already defined")]
    Redefinition {
        /// The redefined class name
        name: String,
        /// Position of the second definition
        span: Span,
    },

    /// A referenced class never received a definition
    #[error("Class {name} is referenced but never defined")]
    UnresolvedReference {
        /// The name that stayed unresolved
        name: String,
    },

    /// The extends chain loops back on itself
    #[error("Circular inheritance detected: {cycle}")]
    CircularInheritance {
        /// Rendering of the cycle, e.g. "A -> B -> A"
        cycle: String,
    },

    /// A member lookup came up empty where a type was required
    #[error("Class {class} has no member {member} matching this use")]
    UnresolvedMember {
        /// The class searched (including its ancestors where applicable)
        class: String,
        /// The missing member name
        member: String,
        /// Position of the offending use
        span: Span,
    },
}

impl SemanticError {
    /// The source position the error points at, when it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            SemanticError::NameCollision { span, .. } => Some(*span),
            SemanticError::Redefinition { span, .. } => Some(*span),
            SemanticError::UnresolvedReference { .. } => None,
            SemanticError::CircularInheritance { .. } => None,
            SemanticError::UnresolvedMember { span, .. } => Some(*span),
        }
    }
}
