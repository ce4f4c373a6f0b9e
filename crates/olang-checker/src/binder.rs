//! Program binding - builds the class registry from a parsed program
//!
//! Classes are defined strictly in declaration order; forward references are
//! carried as placeholders and must all be promoted by the time binding
//! finishes. The first failure aborts the pass.

use olang_parser::ast::Program;

use crate::context::{infer_field_types, ExprChecker, ExpressionTypes};
use crate::error::SemanticError;
use crate::registry::ClassRegistry;

/// Binder - turns a parsed program into a validated [`ClassRegistry`].
pub struct Binder {
    registry: ClassRegistry,
}

impl Binder {
    /// Create a binder with a fresh registry.
    pub fn new() -> Self {
        Binder {
            registry: ClassRegistry::new(),
        }
    }

    /// Bind a program using the default expression typing.
    pub fn bind_program(self, program: &Program) -> Result<ClassRegistry, SemanticError> {
        let mut types = ExprChecker::new();
        self.bind_program_with(program, &mut types)
    }

    /// Bind a program with a caller-supplied expression semantics layer.
    ///
    /// Defines every class in declaration order, infers deferred field
    /// types, then validates that no placeholder survived and that the
    /// inheritance graph is sound.
    pub fn bind_program_with(
        mut self,
        program: &Program,
        types: &mut dyn ExpressionTypes,
    ) -> Result<ClassRegistry, SemanticError> {
        for class in &program.classes {
            self.registry.define(class)?;
        }

        // Placeholders and cycles are rejected before inference so the
        // base-chain walks below always terminate.
        self.registry.validate()?;
        infer_field_types(&mut self.registry, types)?;

        Ok(self.registry)
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}
