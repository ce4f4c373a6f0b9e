//! Class descriptors and member signature tables
//!
//! A [`ClassDescriptor`] is the in-memory model of one class: its name, base
//! class handle, and owned member tables. Descriptors are stored in the
//! registry's arena and referenced by [`ClassId`], so a placeholder can be
//! promoted to a full definition without invalidating anyone's handle.

use olang_parser::Span;
use std::fmt;

/// Stable handle to a class descriptor in a [`crate::ClassRegistry`] arena.
///
/// Handles stay valid across placeholder promotion: the slot is rewritten,
/// the id is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub(crate) u32);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// Where a descriptor's definition came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassVariant {
    /// Materialized from the builtin catalogue; immutable once created
    Builtin,
    /// Built from a parsed class declaration
    Source,
    /// Referenced by name but not yet defined; transient
    Placeholder,
}

/// A method's return type. Void is a distinct state, not a type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    /// The method returns nothing
    Void,
    /// The method returns a value of the named class
    Named(String),
}

impl ReturnType {
    /// The type name, or `None` for void.
    pub fn name(&self) -> Option<&str> {
        match self {
            ReturnType::Void => None,
            ReturnType::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Void => write!(f, "Void"),
            ReturnType::Named(name) => write!(f, "{}", name),
        }
    }
}

/// A method signature.
///
/// Identity is the name plus the ordered parameter type list; the return
/// type is carried but excluded from matching.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSig {
    pub name: String,
    /// Ordered parameter type names
    pub params: Vec<String>,
    pub return_type: ReturnType,
    /// Declaration position; `None` for builtins
    pub span: Option<Span>,
}

impl MethodSig {
    /// Exact-match test: name and ordered parameter types, one to one.
    pub fn matches(&self, name: &str, arg_types: &[String]) -> bool {
        self.name == name && self.params == arg_types
    }
}

impl fmt::Display for MethodSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method {}({})", self.name, self.params.join(", "))?;
        if let ReturnType::Named(name) = &self.return_type {
            write!(f, " -> {}", name)?;
        }
        Ok(())
    }
}

/// A constructor signature. Identity is the ordered parameter type list;
/// the "name" is always the owning class's name.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorSig {
    /// Ordered parameter type names
    pub params: Vec<String>,
    /// Declaration position; `None` for builtins and synthesized defaults
    pub span: Option<Span>,
    /// True for the compiler-provided zero-parameter constructor
    pub synthesized: bool,
}

impl ConstructorSig {
    /// Exact-match test against an ordered argument type list.
    pub fn matches(&self, arg_types: &[String]) -> bool {
        self.params == arg_types
    }
}

/// A field signature. `ty` stays `None` until the initializer-inference
/// pass supplies a type for unannotated fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSig {
    pub name: String,
    pub ty: Option<String>,
    /// Initializer expression, kept for deferred type inference
    pub init: Option<olang_parser::ast::Expression>,
    /// Declaration position; `None` for builtins
    pub span: Option<Span>,
}

/// The full type information for one class.
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    pub name: String,
    /// Direct base class; `None` only for the catalogue root
    pub base: Option<ClassId>,
    pub methods: Vec<MethodSig>,
    pub fields: Vec<FieldSig>,
    pub constructors: Vec<ConstructorSig>,
    pub variant: ClassVariant,
    /// Declaration position; `None` for builtins and placeholders
    pub span: Option<Span>,
}

impl ClassDescriptor {
    /// An empty placeholder descriptor for a referenced-but-undefined name.
    pub(crate) fn placeholder(name: impl Into<String>) -> Self {
        ClassDescriptor {
            name: name.into(),
            base: None,
            methods: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            variant: ClassVariant::Placeholder,
            span: None,
        }
    }

    /// Find a locally declared method by exact signature.
    pub fn find_method(&self, name: &str, arg_types: &[String]) -> Option<&MethodSig> {
        self.methods.iter().find(|m| m.matches(name, arg_types))
    }

    /// Find a locally declared constructor by exact parameter list.
    pub fn find_constructor(&self, arg_types: &[String]) -> Option<&ConstructorSig> {
        self.constructors.iter().find(|c| c.matches(arg_types))
    }

    /// Find a locally declared field by name.
    pub fn find_field(&self, name: &str) -> Option<&FieldSig> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render a constructor signature for diagnostics, e.g. `Dog(String)`.
    pub fn render_constructor(&self, params: &[String]) -> String {
        format!("Constructor {}({})", self.name, params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(name: &str, params: &[&str], ret: ReturnType) -> MethodSig {
        MethodSig {
            name: name.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
            return_type: ret,
            span: None,
        }
    }

    #[test]
    fn test_method_match_is_exact() {
        let plus = sig("Plus", &["Integer"], ReturnType::Named("Integer".into()));

        assert!(plus.matches("Plus", &["Integer".to_string()]));
        assert!(!plus.matches("Plus", &["Real".to_string()]));
        assert!(!plus.matches("Plus", &[]));
        assert!(!plus.matches("Minus", &["Integer".to_string()]));
    }

    #[test]
    fn test_return_type_not_part_of_identity() {
        let a = sig("get", &[], ReturnType::Named("Integer".into()));
        let b = sig("get", &[], ReturnType::Named("Real".into()));

        // Both match the same lookup key
        assert!(a.matches("get", &[]));
        assert!(b.matches("get", &[]));
    }

    #[test]
    fn test_method_display() {
        let bark = sig("bark", &[], ReturnType::Named("String".into()));
        assert_eq!(bark.to_string(), "Method bark() -> String");

        let greet = sig("greet", &["String", "Integer"], ReturnType::Void);
        assert_eq!(greet.to_string(), "Method greet(String, Integer)");
    }

    #[test]
    fn test_constructor_match() {
        let ctor = ConstructorSig {
            params: vec!["String".to_string()],
            span: None,
            synthesized: false,
        };
        assert!(ctor.matches(&["String".to_string()]));
        assert!(!ctor.matches(&[]));
    }

    #[test]
    fn test_placeholder_is_empty() {
        let ph = ClassDescriptor::placeholder("Future");
        assert_eq!(ph.variant, ClassVariant::Placeholder);
        assert!(ph.base.is_none());
        assert!(ph.find_field("anything").is_none());
    }
}
