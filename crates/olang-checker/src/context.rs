//! Per-class validation context and field type inference
//!
//! A [`ClassContext`] is the lightweight handle passed into expression
//! validation so `this` and unqualified field references resolve against the
//! right class. The expression semantics themselves sit behind the
//! [`ExpressionTypes`] trait; [`ExprChecker`] is the default implementation
//! covering the expression forms that appear in field initializers.

use olang_parser::ast::Expression;

use crate::descriptor::{ClassId, ClassVariant, ReturnType};
use crate::error::SemanticError;
use crate::registry::ClassRegistry;

/// The class a member expression is being validated inside.
#[derive(Debug, Clone, Copy)]
pub struct ClassContext {
    pub class: ClassId,
}

impl ClassContext {
    pub fn new(class: ClassId) -> Self {
        ClassContext { class }
    }
}

/// The expression-validation capability consumed during field type
/// inference. Implementations return the type name an expression evaluates
/// to, or fail the compilation.
///
/// The registry is mutable because naming a type in an expression can
/// materialize a builtin or register a placeholder, exactly as it does in a
/// declaration.
pub trait ExpressionTypes {
    /// Validate one expression in the given class context and report its
    /// type name. Void-returning calls report the name `Void`.
    fn validate_expression(
        &mut self,
        registry: &mut ClassRegistry,
        ctx: &ClassContext,
        expr: &Expression,
    ) -> Result<String, SemanticError>;
}

/// Run expression validation over every field whose type is still deferred,
/// recording the inferred type names on the descriptors.
pub fn infer_field_types(
    registry: &mut ClassRegistry,
    types: &mut dyn ExpressionTypes,
) -> Result<(), SemanticError> {
    let classes: Vec<ClassId> = registry.source_classes().collect();

    for class in classes {
        let ctx = ClassContext::new(class);

        let deferred: Vec<(usize, Expression)> = registry
            .get(class)
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.ty.is_none())
            .filter_map(|(index, field)| field.init.clone().map(|init| (index, init)))
            .collect();

        for (index, init) in deferred {
            let ty = types.validate_expression(registry, &ctx, &init)?;
            registry.set_field_type(class, index, ty);
        }
    }

    Ok(())
}

/// Default expression typing for field initializers: literals, `this`,
/// field references, constructor calls, and method calls.
#[derive(Debug, Default)]
pub struct ExprChecker;

impl ExprChecker {
    pub fn new() -> Self {
        ExprChecker
    }

    fn type_of(
        &mut self,
        registry: &mut ClassRegistry,
        ctx: &ClassContext,
        expr: &Expression,
    ) -> Result<String, SemanticError> {
        match expr {
            Expression::IntegerLiteral { .. } => Ok("Integer".to_string()),
            Expression::RealLiteral { .. } => Ok("Real".to_string()),
            Expression::BooleanLiteral { .. } => Ok("Boolean".to_string()),
            Expression::StringLiteral { .. } => Ok("String".to_string()),

            Expression::This { .. } => Ok(registry.name(ctx.class).to_string()),

            // A bare name in a field initializer is a reference to another
            // field, own or inherited.
            Expression::Identifier(ident) => registry
                .field_type(ctx.class, &ident.name)
                .map(str::to_string)
                .ok_or_else(|| SemanticError::UnresolvedMember {
                    class: registry.name(ctx.class).to_string(),
                    member: ident.name.clone(),
                    span: ident.span,
                }),

            Expression::FieldAccess {
                receiver, field, ..
            } => {
                let receiver_ty = self.type_of(registry, ctx, receiver)?;
                let receiver_class = class_named(registry, &receiver_ty)?;
                registry
                    .field_type(receiver_class, &field.name)
                    .map(str::to_string)
                    .ok_or_else(|| SemanticError::UnresolvedMember {
                        class: receiver_ty,
                        member: field.name.clone(),
                        span: field.span,
                    })
            }

            Expression::Call { callee, args, span } => {
                let arg_types = args
                    .iter()
                    .map(|arg| self.type_of(registry, ctx, arg))
                    .collect::<Result<Vec<_>, _>>()?;

                match callee.as_ref() {
                    // `ClassName(args)` constructs an instance.
                    Expression::Identifier(class_name) => {
                        let class = class_named(registry, &class_name.name)?;
                        if registry.has_constructor(class, &arg_types) {
                            Ok(class_name.name.clone())
                        } else {
                            Err(SemanticError::UnresolvedMember {
                                class: class_name.name.clone(),
                                member: format!("this({})", arg_types.join(", ")),
                                span: *span,
                            })
                        }
                    }

                    // `receiver.method(args)`
                    Expression::FieldAccess {
                        receiver, field, ..
                    } => {
                        let receiver_ty = self.type_of(registry, ctx, receiver)?;
                        let receiver_class = class_named(registry, &receiver_ty)?;
                        let return_type = registry
                            .method_return_type(receiver_class, &field.name, &arg_types)
                            .cloned();
                        match return_type {
                            Some(ReturnType::Named(name)) => Ok(name),
                            Some(ReturnType::Void) => Ok("Void".to_string()),
                            None => Err(SemanticError::UnresolvedMember {
                                class: receiver_ty,
                                member: format!("{}({})", field.name, arg_types.join(", ")),
                                span: field.span,
                            }),
                        }
                    }

                    other => Err(SemanticError::UnresolvedMember {
                        class: self.type_of(registry, ctx, other)?,
                        member: "'()'".to_string(),
                        span: *span,
                    }),
                }
            }
        }
    }
}

/// Resolve a type name that appeared in an expression. Names that resolve to
/// a placeholder have no definition anywhere, which is reported immediately
/// rather than left to surface as a missing member.
fn class_named(registry: &mut ClassRegistry, name: &str) -> Result<ClassId, SemanticError> {
    let id = registry.resolve(name);
    if registry.get(id).variant == ClassVariant::Placeholder {
        return Err(SemanticError::UnresolvedReference {
            name: name.to_string(),
        });
    }
    Ok(id)
}

impl ExpressionTypes for ExprChecker {
    fn validate_expression(
        &mut self,
        registry: &mut ClassRegistry,
        ctx: &ClassContext,
        expr: &Expression,
    ) -> Result<String, SemanticError> {
        self.type_of(registry, ctx, expr)
    }
}
