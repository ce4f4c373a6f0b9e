//! The builtin class catalogue
//!
//! A hand-authored, immutable table describing the O standard library
//! surface: one entry per builtin class with its base, fields, methods, and
//! constructors. The table is built once per process on first access;
//! registries materialize descriptors from it on demand.

use once_cell::sync::Lazy;

/// Method signature for a builtin class
#[derive(Debug, Clone)]
pub struct BuiltinMethod {
    pub name: String,
    /// Ordered parameter type names
    pub params: Vec<String>,
    /// `None` means the method returns nothing
    pub return_type: Option<String>,
}

/// Field signature for a builtin class
#[derive(Debug, Clone)]
pub struct BuiltinField {
    pub name: String,
    pub ty: String,
}

/// Constructor signature for a builtin class
#[derive(Debug, Clone)]
pub struct BuiltinConstructor {
    /// Ordered parameter type names
    pub params: Vec<String>,
}

/// Catalogue entry for one builtin class
#[derive(Debug, Clone)]
pub struct BuiltinClass {
    pub name: String,
    /// Declared parent; `None` only for the catalogue root
    pub base: Option<String>,
    pub fields: Vec<BuiltinField>,
    pub methods: Vec<BuiltinMethod>,
    pub constructors: Vec<BuiltinConstructor>,
}

impl BuiltinClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.base = Some(base.to_string());
        self
    }

    pub fn with_field(mut self, name: &str, ty: &str) -> Self {
        self.fields.push(BuiltinField {
            name: name.to_string(),
            ty: ty.to_string(),
        });
        self
    }

    pub fn with_method(mut self, name: &str, params: Vec<&str>, return_type: &str) -> Self {
        self.methods.push(BuiltinMethod {
            name: name.to_string(),
            params: params.into_iter().map(String::from).collect(),
            return_type: Some(return_type.to_string()),
        });
        self
    }

    pub fn with_void_method(mut self, name: &str, params: Vec<&str>) -> Self {
        self.methods.push(BuiltinMethod {
            name: name.to_string(),
            params: params.into_iter().map(String::from).collect(),
            return_type: None,
        });
        self
    }

    pub fn with_constructor(mut self, params: Vec<&str>) -> Self {
        self.constructors.push(BuiltinConstructor {
            params: params.into_iter().map(String::from).collect(),
        });
        self
    }
}

/// Name of the implicit root class every base-less class extends.
pub const ROOT_CLASS: &str = "Class";

static STANDARD_CLASSES: Lazy<Vec<BuiltinClass>> = Lazy::new(|| {
    vec![
        BuiltinClass::new(ROOT_CLASS).with_constructor(vec![]),
        BuiltinClass::new("AnyValue")
            .with_base(ROOT_CLASS)
            .with_constructor(vec![]),
        BuiltinClass::new("AnyRef")
            .with_base(ROOT_CLASS)
            .with_constructor(vec![]),
        BuiltinClass::new("Integer")
            .with_base("AnyValue")
            .with_field("Min", "Integer")
            .with_field("Max", "Integer")
            .with_constructor(vec!["Integer"])
            .with_constructor(vec!["Real"])
            .with_method("toReal", vec![], "Real")
            .with_method("toBoolean", vec![], "Boolean")
            .with_method("UnaryMinus", vec![], "Integer")
            .with_method("Plus", vec!["Integer"], "Integer")
            .with_method("Plus", vec!["Real"], "Real")
            .with_method("Minus", vec!["Integer"], "Integer")
            .with_method("Minus", vec!["Real"], "Real")
            .with_method("Mult", vec!["Integer"], "Integer")
            .with_method("Mult", vec!["Real"], "Real")
            .with_method("Div", vec!["Integer"], "Integer")
            .with_method("Div", vec!["Real"], "Real")
            .with_method("Rem", vec!["Integer"], "Integer")
            .with_method("Less", vec!["Integer"], "Boolean")
            .with_method("Less", vec!["Real"], "Boolean")
            .with_method("LessEqual", vec!["Integer"], "Boolean")
            .with_method("LessEqual", vec!["Real"], "Boolean")
            .with_method("Greater", vec!["Integer"], "Boolean")
            .with_method("Greater", vec!["Real"], "Boolean")
            .with_method("GreaterEqual", vec!["Integer"], "Boolean")
            .with_method("GreaterEqual", vec!["Real"], "Boolean")
            .with_method("Equal", vec!["Integer"], "Boolean")
            .with_method("Equal", vec!["Real"], "Boolean"),
        BuiltinClass::new("Real")
            .with_base("AnyValue")
            .with_field("Min", "Real")
            .with_field("Max", "Real")
            .with_field("Epsilon", "Real")
            .with_constructor(vec!["Integer"])
            .with_constructor(vec!["Real"])
            .with_method("toInteger", vec![], "Integer")
            .with_method("UnaryMinus", vec![], "Real")
            .with_method("Plus", vec!["Integer"], "Real")
            .with_method("Plus", vec!["Real"], "Real")
            .with_method("Minus", vec!["Integer"], "Real")
            .with_method("Minus", vec!["Real"], "Real")
            .with_method("Mult", vec!["Integer"], "Real")
            .with_method("Mult", vec!["Real"], "Real")
            .with_method("Div", vec!["Integer"], "Real")
            .with_method("Div", vec!["Real"], "Real")
            .with_method("Rem", vec!["Integer"], "Real")
            .with_method("Less", vec!["Integer"], "Boolean")
            .with_method("Less", vec!["Real"], "Boolean")
            .with_method("LessEqual", vec!["Integer"], "Boolean")
            .with_method("LessEqual", vec!["Real"], "Boolean")
            .with_method("Greater", vec!["Integer"], "Boolean")
            .with_method("Greater", vec!["Real"], "Boolean")
            .with_method("GreaterEqual", vec!["Integer"], "Boolean")
            .with_method("GreaterEqual", vec!["Real"], "Boolean")
            .with_method("Equal", vec!["Integer"], "Boolean")
            .with_method("Equal", vec!["Real"], "Boolean"),
        BuiltinClass::new("Boolean")
            .with_base("AnyValue")
            .with_constructor(vec!["Boolean"])
            .with_method("toInteger", vec![], "Integer")
            .with_method("And", vec!["Boolean"], "Boolean")
            .with_method("Or", vec!["Boolean"], "Boolean")
            .with_method("Xor", vec!["Boolean"], "Boolean")
            .with_method("Not", vec![], "Boolean"),
        BuiltinClass::new("String")
            .with_base("AnyRef")
            .with_constructor(vec![])
            .with_constructor(vec!["String"])
            .with_method("Length", vec![], "Integer")
            .with_method("Concatenate", vec!["String"], "String")
            .with_method("Equal", vec!["String"], "Boolean"),
        BuiltinClass::new("Array")
            .with_base("AnyRef")
            .with_constructor(vec!["Integer"])
            .with_method("Length", vec![], "Integer")
            .with_method("Get", vec!["Integer"], "AnyRef")
            .with_void_method("Set", vec!["Integer", "AnyRef"])
            .with_method("toList", vec![], "List"),
        BuiltinClass::new("List")
            .with_base("AnyRef")
            .with_constructor(vec![])
            .with_constructor(vec!["AnyRef"])
            .with_method("Append", vec!["AnyRef"], "List")
            .with_method("Head", vec![], "AnyRef")
            .with_method("Tail", vec![], "List")
            .with_method("Length", vec![], "Integer"),
        BuiltinClass::new("IO")
            .with_base("AnyRef")
            .with_constructor(vec![])
            .with_void_method("Print", vec!["Integer"])
            .with_void_method("Print", vec!["Real"])
            .with_void_method("Print", vec!["Boolean"])
            .with_void_method("Print", vec!["String"])
            .with_method("ReadLine", vec![], "String"),
    ]
});

/// The full catalogue, built on first access and immutable thereafter.
pub fn standard_classes() -> &'static [BuiltinClass] {
    &STANDARD_CLASSES
}

/// Look up one catalogue entry by class name.
pub fn lookup(name: &str) -> Option<&'static BuiltinClass> {
    standard_classes().iter().find(|class| class.name == name)
}
