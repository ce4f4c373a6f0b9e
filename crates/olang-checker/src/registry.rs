//! The class registry: name resolution, forward references, and member
//! lookup across inheritance.
//!
//! One [`ClassRegistry`] holds every descriptor of one compilation in an
//! arena. Names resolve through two tiers: user-defined classes (including
//! transient placeholders for forward references) first, the builtin
//! catalogue second. A registry is an ordinary owned value; independent
//! compilations never share state.

use olang_parser::ast;
use rustc_hash::FxHashMap;

use crate::builtins::{self, BuiltinClass};
use crate::descriptor::{
    ClassDescriptor, ClassId, ClassVariant, ConstructorSig, FieldSig, MethodSig, ReturnType,
};
use crate::error::SemanticError;

/// The class symbol table for one compilation.
#[derive(Debug)]
pub struct ClassRegistry {
    /// Arena of all descriptors, indexed by [`ClassId`]
    classes: Vec<ClassDescriptor>,
    /// User-defined tier: source classes and placeholders
    source: FxHashMap<String, ClassId>,
    /// Builtin tier: catalogue entries materialized so far
    builtins: FxHashMap<String, ClassId>,
}

impl ClassRegistry {
    /// Create an empty registry. Builtins are materialized lazily on first
    /// resolution, not up front.
    pub fn new() -> Self {
        ClassRegistry {
            classes: Vec::new(),
            source: FxHashMap::default(),
            builtins: FxHashMap::default(),
        }
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve a class name to a descriptor handle. Never fails.
    ///
    /// Resolution order: the user-defined tier wins over the builtin
    /// catalogue, so a source class shadows a builtin name for every
    /// resolution made after it is registered; resolutions made earlier
    /// already hold the builtin handle. Names in neither tier get a fresh
    /// [`ClassVariant::Placeholder`] entry, to be promoted when (if) the
    /// definition arrives.
    pub fn resolve(&mut self, name: &str) -> ClassId {
        if let Some(&id) = self.source.get(name) {
            return id;
        }
        if let Some(&id) = self.builtins.get(name) {
            return id;
        }
        if let Some(entry) = builtins::lookup(name) {
            return self.materialize_builtin(entry);
        }

        let id = self.push(ClassDescriptor::placeholder(name));
        self.source.insert(name.to_string(), id);
        id
    }

    /// Look up a name without creating anything.
    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.source
            .get(name)
            .or_else(|| self.builtins.get(name))
            .copied()
    }

    /// Materialize a builtin descriptor from its catalogue entry, along with
    /// its whole base chain. Memoized: repeated resolution of the same
    /// builtin name yields the same handle.
    fn materialize_builtin(&mut self, entry: &'static BuiltinClass) -> ClassId {
        if let Some(&id) = self.builtins.get(&entry.name) {
            return id;
        }

        // Builtin bases live in the catalogue only; the chain stops at the
        // catalogue root, which has no base.
        let base = entry.base.as_deref().map(|base_name| {
            let base_entry = builtins::lookup(base_name)
                .unwrap_or_else(|| panic!("catalogue base {} missing", base_name));
            self.materialize_builtin(base_entry)
        });

        let descriptor = ClassDescriptor {
            name: entry.name.clone(),
            base,
            methods: entry
                .methods
                .iter()
                .map(|m| MethodSig {
                    name: m.name.clone(),
                    params: m.params.clone(),
                    return_type: match &m.return_type {
                        Some(name) => ReturnType::Named(name.clone()),
                        None => ReturnType::Void,
                    },
                    span: None,
                })
                .collect(),
            fields: entry
                .fields
                .iter()
                .map(|f| FieldSig {
                    name: f.name.clone(),
                    ty: Some(f.ty.clone()),
                    init: None,
                    span: None,
                })
                .collect(),
            constructors: entry
                .constructors
                .iter()
                .map(|c| ConstructorSig {
                    params: c.params.clone(),
                    span: None,
                    synthesized: false,
                })
                .collect(),
            variant: ClassVariant::Builtin,
            span: None,
        };

        let id = self.push(descriptor);
        self.builtins.insert(entry.name.clone(), id);
        id
    }

    // ========================================================================
    // Definition
    // ========================================================================

    /// Register a parsed class declaration as a source descriptor.
    ///
    /// A placeholder previously handed out for this name is promoted in its
    /// arena slot, so every handle referencing it now sees the full
    /// definition. Defining a name whose source descriptor is already
    /// resolved is a [`SemanticError::Redefinition`].
    pub fn define(&mut self, class: &ast::Class) -> Result<ClassId, SemanticError> {
        let name = class.name.name.as_str();

        if let Some(&existing) = self.source.get(name) {
            if self.get(existing).variant != ClassVariant::Placeholder {
                return Err(SemanticError::Redefinition {
                    name: name.to_string(),
                    span: class.name.span,
                });
            }
        }

        let methods = self.ingest_methods(class)?;
        let fields = self.ingest_fields(class)?;
        let constructors = self.ingest_constructors(class)?;

        // Base resolution may itself register a placeholder, including one
        // for this very name (`class A extends A`), so the slot is looked up
        // again afterwards.
        let base = match &class.extends {
            Some(extends) => self.resolve(&extends.name),
            None => self.resolve(builtins::ROOT_CLASS),
        };

        let descriptor = ClassDescriptor {
            name: name.to_string(),
            base: Some(base),
            methods,
            fields,
            constructors,
            variant: ClassVariant::Source,
            span: Some(class.name.span),
        };

        let id = match self.source.get(name) {
            Some(&id) => {
                // Placeholder promotion: rewrite the slot, keep the handle.
                self.classes[id.0 as usize] = descriptor;
                id
            }
            None => {
                let id = self.push(descriptor);
                self.source.insert(name.to_string(), id);
                id
            }
        };

        Ok(id)
    }

    fn ingest_methods(&self, class: &ast::Class) -> Result<Vec<MethodSig>, SemanticError> {
        let mut methods: Vec<MethodSig> = Vec::new();

        for method in &class.methods {
            let sig = MethodSig {
                name: method.name.name.clone(),
                params: param_types(&method.params),
                return_type: match &method.return_type {
                    Some(annotation) => ReturnType::Named(annotation.name.clone()),
                    None => ReturnType::Void,
                },
                span: Some(method.name.span),
            };

            if methods.iter().any(|m| m.matches(&sig.name, &sig.params)) {
                return Err(SemanticError::NameCollision {
                    class: class.name.name.clone(),
                    signature: sig.to_string(),
                    span: method.name.span,
                });
            }
            methods.push(sig);
        }

        Ok(methods)
    }

    fn ingest_fields(&self, class: &ast::Class) -> Result<Vec<FieldSig>, SemanticError> {
        let mut fields: Vec<FieldSig> = Vec::new();

        for field in &class.fields {
            if fields.iter().any(|f| f.name == field.name.name) {
                return Err(SemanticError::NameCollision {
                    class: class.name.name.clone(),
                    signature: format!("Field {}", field.name.name),
                    span: field.name.span,
                });
            }
            fields.push(FieldSig {
                name: field.name.name.clone(),
                ty: field.type_annotation.as_ref().map(|t| t.name.clone()),
                init: field.initializer.clone(),
                span: Some(field.name.span),
            });
        }

        Ok(fields)
    }

    fn ingest_constructors(&self, class: &ast::Class) -> Result<Vec<ConstructorSig>, SemanticError> {
        let mut constructors: Vec<ConstructorSig> = Vec::new();

        for constructor in &class.constructors {
            let params = param_types(&constructor.params);
            if constructors.iter().any(|c| c.matches(&params)) {
                return Err(SemanticError::NameCollision {
                    class: class.name.name.clone(),
                    signature: format!(
                        "Constructor {}({})",
                        class.name.name,
                        params.join(", ")
                    ),
                    span: constructor.span,
                });
            }
            constructors.push(ConstructorSig {
                params,
                span: Some(constructor.span),
                synthesized: false,
            });
        }

        // Every class can be constructed with no arguments unless it says
        // otherwise.
        if !constructors.iter().any(|c| c.params.is_empty()) {
            constructors.push(ConstructorSig {
                params: Vec::new(),
                span: None,
                synthesized: true,
            });
        }

        Ok(constructors)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check that every referenced name reached a definition and that no
    /// extends chain loops. Run after all declarations are defined.
    pub fn validate(&self) -> Result<(), SemanticError> {
        // Arena order is creation order, so the first placeholder reported
        // is deterministic.
        for descriptor in &self.classes {
            if descriptor.variant == ClassVariant::Placeholder {
                return Err(SemanticError::UnresolvedReference {
                    name: descriptor.name.clone(),
                });
            }
        }

        for start in 0..self.classes.len() {
            let start = ClassId(start as u32);
            let mut path = vec![start];
            let mut current = self.get(start).base;

            while let Some(next) = current {
                if let Some(pos) = path.iter().position(|&id| id == next) {
                    let mut names: Vec<&str> =
                        path[pos..].iter().map(|&id| self.name(id)).collect();
                    names.push(self.name(next));
                    return Err(SemanticError::CircularInheritance {
                        cycle: names.join(" -> "),
                    });
                }
                path.push(next);
                current = self.get(next).base;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Member resolution
    // ========================================================================

    /// Return type of the method matching (name, argument types) exactly,
    /// searching this class and then its ancestors.
    pub fn method_return_type(
        &self,
        class: ClassId,
        name: &str,
        arg_types: &[String],
    ) -> Option<&ReturnType> {
        let descriptor = self.get(class);
        if let Some(method) = descriptor.find_method(name, arg_types) {
            return Some(&method.return_type);
        }
        descriptor
            .base
            .and_then(|base| self.method_return_type(base, name, arg_types))
    }

    /// The constructor matching the argument types exactly. Constructors are
    /// not inherited; only this class's own table is searched.
    pub fn get_constructor(&self, class: ClassId, arg_types: &[String]) -> Option<&ConstructorSig> {
        self.get(class).find_constructor(arg_types)
    }

    /// Type of the named field, searching this class and then its ancestors.
    /// Fields whose type is still deferred yield `None`.
    pub fn field_type(&self, class: ClassId, name: &str) -> Option<&str> {
        let descriptor = self.get(class);
        if let Some(field) = descriptor.find_field(name) {
            return field.ty.as_deref();
        }
        descriptor
            .base
            .and_then(|base| self.field_type(base, name))
    }

    /// Whether a method with this exact signature exists here or on an
    /// ancestor.
    pub fn has_method(&self, class: ClassId, name: &str, arg_types: &[String]) -> bool {
        self.method_return_type(class, name, arg_types).is_some()
    }

    /// Whether the named field exists here or on an ancestor.
    pub fn has_field(&self, class: ClassId, name: &str) -> bool {
        let descriptor = self.get(class);
        if descriptor.find_field(name).is_some() {
            return true;
        }
        descriptor
            .base
            .map(|base| self.has_field(base, name))
            .unwrap_or(false)
    }

    /// Whether this class itself declares (or synthesized) a constructor
    /// with these exact parameter types.
    pub fn has_constructor(&self, class: ClassId, arg_types: &[String]) -> bool {
        self.get_constructor(class, arg_types).is_some()
    }

    /// Record the inferred type of a deferred field. Used by the field
    /// inference pass; annotated fields are never rewritten.
    pub(crate) fn set_field_type(&mut self, class: ClassId, field_index: usize, ty: String) {
        let field = &mut self.classes[class.0 as usize].fields[field_index];
        debug_assert!(field.ty.is_none(), "field {} already typed", field.name);
        field.ty = Some(ty);
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Borrow a descriptor by handle.
    pub fn get(&self, id: ClassId) -> &ClassDescriptor {
        &self.classes[id.0 as usize]
    }

    /// The class name for a handle.
    pub fn name(&self, id: ClassId) -> &str {
        &self.get(id).name
    }

    /// Handles of all user-defined (non-placeholder) classes, in definition
    /// order.
    pub fn source_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, d)| d.variant == ClassVariant::Source)
            .map(|(i, _)| ClassId(i as u32))
    }

    /// Human-readable rendering for diagnostics and tooling, e.g.
    /// `class Dog extends Animal`.
    pub fn describe(&self, id: ClassId, include_base: bool) -> String {
        let descriptor = self.get(id);
        let mut rendered = match descriptor.variant {
            ClassVariant::Source => format!("class {}", descriptor.name),
            ClassVariant::Builtin => format!("builtin class {}", descriptor.name),
            ClassVariant::Placeholder => return format!("unresolved class {}", descriptor.name),
        };

        if include_base {
            if let Some(base) = descriptor.base {
                rendered.push_str(" extends ");
                rendered.push_str(self.name(base));
            }
        }

        rendered
    }

    fn push(&mut self, descriptor: ClassDescriptor) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(descriptor);
        id
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn param_types(params: &[ast::Parameter]) -> Vec<String> {
    params
        .iter()
        .map(|p| p.type_annotation.name.clone())
        .collect()
}
