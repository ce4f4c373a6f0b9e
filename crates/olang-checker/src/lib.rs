//! O Language Class Checker
//!
//! The class symbol table and type resolution engine for the O compiler.
//!
//! This crate provides:
//! - A class registry with forward-reference resolution (placeholders
//!   promoted in place when the definition arrives)
//! - Class descriptors with per-class method, field, and constructor tables
//! - Exact-signature overload matching with inheritance-aware lookup
//! - A hand-authored builtin catalogue of the O standard library
//! - Field type inference over initializer expressions
//! - Diagnostic rendering with source context
//!
//! # Usage
//!
//! ```ignore
//! use olang_checker::Binder;
//! use olang_parser::Parser;
//!
//! let program = Parser::new(source)?.parse()?;
//! let registry = Binder::new().bind_program(&program)?;
//!
//! let dog = registry.lookup("Dog").unwrap();
//! let name_ty = registry.field_type(dog, "name");
//! ```

#![warn(missing_docs)]

pub mod binder;
pub mod builtins;
pub mod context;
pub mod descriptor;
pub mod diagnostic;
pub mod error;
pub mod registry;

// Re-export main types
pub use binder::Binder;
pub use context::{infer_field_types, ClassContext, ExprChecker, ExpressionTypes};
pub use descriptor::{
    ClassDescriptor, ClassId, ClassVariant, ConstructorSig, FieldSig, MethodSig, ReturnType,
};
pub use diagnostic::Diagnostic;
pub use error::SemanticError;
pub use registry::ClassRegistry;
