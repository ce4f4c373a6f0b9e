//! Tests for class registration, forward references, and redefinition

use olang_checker::{Binder, ClassRegistry, ClassVariant, SemanticError};
use olang_parser::Parser;

fn parse(source: &str) -> olang_parser::ast::Program {
    Parser::new(source)
        .expect("lexing should succeed")
        .parse()
        .expect("parsing should succeed")
}

fn bind(source: &str) -> ClassRegistry {
    Binder::new()
        .bind_program(&parse(source))
        .expect("binding should succeed")
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_implicit_root() {
    let registry = bind("class Animal is end");
    let animal = registry.lookup("Animal").unwrap();
    let base = registry.get(animal).base.unwrap();
    assert_eq!(registry.name(base), "Class");
}

#[test]
fn test_explicit_extends() {
    let registry = bind(
        r#"
        class Animal is end
        class Dog extends Animal is end
        "#,
    );
    let dog = registry.lookup("Dog").unwrap();
    let base = registry.get(dog).base.unwrap();
    assert_eq!(registry.name(base), "Animal");
}

#[test]
fn test_forward_reference_promoted() {
    // Dog references Animal before Animal is defined.
    let source = r#"
        class Dog extends Animal is end
        class Animal is
            var name : String
        end
    "#;
    let program = parse(source);

    let mut registry = ClassRegistry::new();
    let dog = registry.define(&program.classes[0]).unwrap();

    // Between the two definitions the base is a placeholder.
    let base = registry.get(dog).base.unwrap();
    assert_eq!(registry.get(base).variant, ClassVariant::Placeholder);

    let animal = registry.define(&program.classes[1]).unwrap();

    // The same handle now sees the full definition; nothing was re-pointed.
    assert_eq!(base, animal);
    assert_eq!(registry.get(base).variant, ClassVariant::Source);

    // And members of Animal are reachable through Dog.
    assert_eq!(registry.field_type(dog, "name"), Some("String"));
    registry.validate().unwrap();
}

#[test]
fn test_forward_reference_via_binder() {
    let registry = bind(
        r#"
        class Dog extends Animal is end
        class Animal is
            var name : String
        end
        "#,
    );
    let dog = registry.lookup("Dog").unwrap();
    assert_eq!(registry.field_type(dog, "name"), Some("String"));
}

#[test]
fn test_unresolved_base_is_reported() {
    let program = parse("class Dog extends Ghost is end");
    let err = Binder::new().bind_program(&program).unwrap_err();
    assert_eq!(
        err,
        SemanticError::UnresolvedReference {
            name: "Ghost".to_string()
        }
    );
}

#[test]
fn test_redefinition() {
    let program = parse("class A is end class A is end");
    let mut registry = ClassRegistry::new();

    registry.define(&program.classes[0]).unwrap();
    let err = registry.define(&program.classes[1]).unwrap_err();

    match err {
        SemanticError::Redefinition { name, span } => {
            assert_eq!(name, "A");
            // The error points at the second declaration.
            assert_eq!(span, program.classes[1].name.span);
        }
        other => panic!("expected redefinition, got {:?}", other),
    }
}

#[test]
fn test_redefinition_via_binder() {
    let program = parse("class A is end class A is end");
    let err = Binder::new().bind_program(&program).unwrap_err();
    assert!(matches!(err, SemanticError::Redefinition { .. }));
}

#[test]
fn test_builtin_resolution_is_stable() {
    let mut registry = ClassRegistry::new();
    let first = registry.resolve("Integer");
    let second = registry.resolve("Integer");
    assert_eq!(first, second);
    assert_eq!(registry.get(first).variant, ClassVariant::Builtin);
}

#[test]
fn test_source_class_shadows_builtin_if_defined_first() {
    // "Integer" is defined as a user class before anything touches the
    // builtin of that name, so the source tier wins.
    let program = parse(
        r#"
        class Integer is
            var tag : String
        end
        "#,
    );
    let mut registry = ClassRegistry::new();
    let user_integer = registry.define(&program.classes[0]).unwrap();

    let resolved = registry.resolve("Integer");
    assert_eq!(resolved, user_integer);
    assert_eq!(registry.get(resolved).variant, ClassVariant::Source);
}

#[test]
fn test_builtin_shadowing_is_position_dependent() {
    // Resolutions made before the source definition hold the builtin
    // handle; resolutions made after see the source class.
    let program = parse("class Integer is end");
    let mut registry = ClassRegistry::new();

    let builtin = registry.resolve("Integer");
    assert_eq!(registry.get(builtin).variant, ClassVariant::Builtin);

    let user = registry.define(&program.classes[0]).unwrap();
    assert_ne!(builtin, user);

    let resolved = registry.resolve("Integer");
    assert_eq!(resolved, user);
    // The earlier handle still points at the untouched builtin descriptor.
    assert_eq!(registry.get(builtin).variant, ClassVariant::Builtin);
}

#[test]
fn test_builtin_wins_for_never_defined_names() {
    let registry = bind("class Box is var count : Integer end");
    let integer = registry.lookup("Integer").unwrap();
    assert_eq!(registry.get(integer).variant, ClassVariant::Builtin);
}

#[test]
fn test_self_extends_is_circular() {
    let program = parse("class Ouroboros extends Ouroboros is end");
    let err = Binder::new().bind_program(&program).unwrap_err();
    match err {
        SemanticError::CircularInheritance { cycle } => {
            assert!(cycle.contains("Ouroboros"));
        }
        other => panic!("expected circular inheritance, got {:?}", other),
    }
}

#[test]
fn test_mutual_extends_is_circular() {
    let program = parse(
        r#"
        class A extends B is end
        class B extends A is end
        "#,
    );
    let err = Binder::new().bind_program(&program).unwrap_err();
    assert!(matches!(err, SemanticError::CircularInheritance { .. }));
}

#[test]
fn test_describe() {
    let registry = bind(
        r#"
        class Animal is end
        class Dog extends Animal is end
        "#,
    );
    let dog = registry.lookup("Dog").unwrap();
    assert_eq!(registry.describe(dog, true), "class Dog extends Animal");
    assert_eq!(registry.describe(dog, false), "class Dog");

    let animal = registry.lookup("Animal").unwrap();
    assert_eq!(registry.describe(animal, true), "class Animal extends Class");
}

#[test]
fn test_definition_order_preserved() {
    let registry = bind("class A is end class B is end class C is end");
    let names: Vec<&str> = registry
        .source_classes()
        .map(|id| registry.name(id))
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn test_field_types_inferred_from_initializers() {
    let registry = bind(
        r#"
        class Counter is
            var count := 0
            var label := "items"
            var ratio := 1.5
            var enabled := true
        end
        "#,
    );
    let counter = registry.lookup("Counter").unwrap();
    assert_eq!(registry.field_type(counter, "count"), Some("Integer"));
    assert_eq!(registry.field_type(counter, "label"), Some("String"));
    assert_eq!(registry.field_type(counter, "ratio"), Some("Real"));
    assert_eq!(registry.field_type(counter, "enabled"), Some("Boolean"));
}

#[test]
fn test_field_type_inferred_from_constructor_call() {
    let registry = bind(
        r#"
        class Animal is end
        class Zoo is
            var resident := Animal()
        end
        "#,
    );
    let zoo = registry.lookup("Zoo").unwrap();
    assert_eq!(registry.field_type(zoo, "resident"), Some("Animal"));
}

#[test]
fn test_field_type_inferred_from_method_call() {
    let registry = bind(
        r#"
        class Stats is
            var base := 10
            var doubled := this.base.Mult(2)
        end
        "#,
    );
    let stats = registry.lookup("Stats").unwrap();
    assert_eq!(registry.field_type(stats, "doubled"), Some("Integer"));
}

#[test]
fn test_initializer_with_unknown_member_fails() {
    let program = parse(
        r#"
        class Broken is
            var value := this.missing
        end
        "#,
    );
    let err = Binder::new().bind_program(&program).unwrap_err();
    match err {
        SemanticError::UnresolvedMember { class, member, .. } => {
            assert_eq!(class, "Broken");
            assert_eq!(member, "missing");
        }
        other => panic!("expected unresolved member, got {:?}", other),
    }
}

#[test]
fn test_constructor_call_with_wrong_args_fails() {
    let program = parse(
        r#"
        class Animal is
            this(name: String) is end
        end
        class Zoo is
            var resident := Animal(42)
        end
        "#,
    );
    let err = Binder::new().bind_program(&program).unwrap_err();
    match err {
        SemanticError::UnresolvedMember { class, member, .. } => {
            assert_eq!(class, "Animal");
            assert_eq!(member, "this(Integer)");
        }
        other => panic!("expected unresolved member, got {:?}", other),
    }
}

#[test]
fn test_registry_resolve_never_fails() {
    let mut registry = ClassRegistry::new();
    let id = registry.resolve("CompletelyUnknown");
    assert_eq!(registry.name(id), "CompletelyUnknown");
    assert_eq!(registry.get(id).variant, ClassVariant::Placeholder);
}

#[test]
fn test_constructor_overloads_kept_distinct() {
    let registry = bind(
        r#"
        class Point is
            this(x: Integer) is end
            this(x: Integer, y: Integer) is end
        end
        "#,
    );
    let point = registry.lookup("Point").unwrap();
    assert!(registry.has_constructor(point, &strings(&["Integer"])));
    assert!(registry.has_constructor(point, &strings(&["Integer", "Integer"])));
    assert!(!registry.has_constructor(point, &strings(&["Real"])));
}
