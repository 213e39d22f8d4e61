//! Unit tests for the implementation generator

use std::path::{Path, PathBuf};

use splice_application::{
    ImplementationGenerator, ResolutionAggregator, generate_implementations, import_specifier,
    output_path,
};
use splice_domain::{
    ClassDescription, ClassMember, Expression, GeneratedFile, Graph, ImportDeclaration, Statement,
};

use crate::fixtures;

fn generate_single(graph: &Graph) -> GeneratedFile {
    let mut files = generate_implementations(graph, false).expect("generation");
    assert_eq!(files.len(), 1);
    files.remove(0)
}

fn member_names(class: &ClassDescription) -> Vec<String> {
    class
        .members
        .iter()
        .map(|member| match member {
            ClassMember::Method(method) => {
                let prefix = if method.is_async { "async " } else { "" };
                format!("{prefix}{}()", method.name)
            }
            ClassMember::Field(field) => field.name.clone(),
            ClassMember::Constructor(_) => "constructor".to_string(),
        })
        .collect()
}

fn call(name: &str) -> Expression {
    Expression::this_property(name).call(vec![])
}

#[test]
fn test_class_name_and_base() {
    let file = generate_single(&fixtures::simple());
    let class = &file.classes[0];

    assert_eq!(class.name, "ComponentImpl");
    assert_eq!(class.extends, "Component");
}

#[test]
fn test_member_order() {
    let file = generate_single(&fixtures::circular());

    assert_eq!(
        member_names(&file.classes[0]),
        vec![
            "t1()",
            "t2()",
            "t3()",
            "t4()",
            "_Module1",
            "_Module2",
            "constructor",
            "_Module1_p1()",
            "_Module1_p2()",
            "_Module2_p3()",
            "_Module2_p4()",
        ]
    );
}

#[test]
fn test_constructor_calls_super_then_instantiates_modules() {
    let file = generate_single(&fixtures::circular());
    let constructor = file.classes[0].constructor().expect("constructor");

    assert_eq!(constructor.body[0], Statement::SuperCall);
    assert_eq!(
        constructor.body[2],
        Statement::Assign {
            target: Expression::this_property("_Module2"),
            value: Expression::New {
                class: "Module2".to_string(),
                arguments: vec![],
            },
        }
    );
}

#[test]
fn test_provider_accessor_body() {
    let file = generate_single(&fixtures::circular());
    let accessor = file.classes[0].method("_Module2_p4").expect("accessor");

    assert_eq!(
        accessor.body,
        Expression::this_property("_Module2")
            .property("p4")
            .call(vec![call("_Module1_p1")])
    );
}

#[test]
fn test_resolver_override_delegates_to_accessor() {
    let file = generate_single(&fixtures::circular());
    let resolver = file.classes[0].method("t3").expect("resolver");

    assert_eq!(resolver.body, call("_Module2_p3"));
}

#[test]
fn test_async_accessors_are_awaited() {
    let file = generate_single(&fixtures::async_providers(false));
    let class = &file.classes[0];

    assert_eq!(
        member_names(class),
        vec![
            "async t1()",
            "async t2()",
            "async t3()",
            "_Module",
            "constructor",
            "async _Module_p1()",
            "async _Module_p2()",
            "async _Module_p3()",
            "async _Module_synthetic_0()",
        ]
    );
    assert_eq!(
        class.method("_Module_p2").expect("p2").body,
        Expression::this_property("_Module")
            .property("p2")
            .call(vec![call("_Module_p1").awaited_if(true)])
    );
    assert_eq!(
        class.method("_Module_synthetic_0").expect("set").body,
        Expression::New {
            class: "Set".to_string(),
            arguments: vec![Expression::Array {
                elements: vec![call("_Module_p2").awaited_if(true)],
            }],
        }
    );
}

#[test]
fn test_dedup_generates_one_accessor_per_provider() {
    let file = generate_single(&fixtures::diamond());
    let class = &file.classes[0];

    let pb_accessors = class
        .methods()
        .filter(|method| method.name == "_Module_pb")
        .count();
    assert_eq!(pb_accessors, 1);
    assert_eq!(class.method("b").expect("b").body, call("_Module_pb"));
    assert_eq!(
        class.method("_Module_pc").expect("pc").body,
        Expression::this_property("_Module")
            .property("pc")
            .call(vec![call("_Module_pb")])
    );
}

#[test]
fn test_set_accessors_are_numbered_in_request_order() {
    let file = generate_single(&fixtures::aggregation());
    let class = &file.classes[0];

    // the `all` resolver asks for its set name before any accessor body does
    assert_eq!(class.method("all").expect("all").body, call("_Module_synthetic_0"));
    assert_eq!(
        class.method("_Module_p4").expect("p4").body,
        Expression::this_property("_Module")
            .property("p4")
            .call(vec![call("_Module_synthetic_1")])
    );
    match &class.method("_Module_synthetic_1").expect("set").body {
        Expression::New { arguments, .. } => match &arguments[0] {
            Expression::Array { elements } => assert_eq!(elements.len(), 3),
            other => panic!("Expected array literal, got {other:?}"),
        },
        other => panic!("Expected new expression, got {other:?}"),
    }
}

#[test]
fn test_required_fallback_elements_span_modules() {
    let file = generate_single(&fixtures::required_fallback(true));
    let class = &file.classes[0];

    assert_eq!(
        class.method("_Module2_synthetic_0").expect("set").body,
        Expression::New {
            class: "Set".to_string(),
            arguments: vec![Expression::Array {
                elements: vec![call("_Module2_p1"), call("_Module1_p1")],
            }],
        }
    );
}

#[test]
fn test_imports_name_component_then_modules() {
    let file = generate_single(&fixtures::circular());

    assert_eq!(file.path, PathBuf::from("src/gen/index.ts"));
    assert_eq!(
        file.imports,
        vec![
            ImportDeclaration::new("Component", "../index.js"),
            ImportDeclaration::new("Module1", "../index.js"),
            ImportDeclaration::new("Module2", "../index.js"),
        ]
    );
}

#[test]
fn test_components_sharing_a_source_share_a_file() {
    let mut builder = Graph::builder();
    let a = builder.types_mut().class("A");
    let b = builder.types_mut().class("B");
    let m1 = fixtures::module(&mut builder, "Module1");
    let m2 = builder.add_module("Module2", "src/other.ts").expect("module");
    builder.add_provider(m1, "pa", vec![], a, false);
    builder.add_provider(m2, "pb", vec![], b, false);
    let c1 = builder.add_component("Component1", fixtures::SOURCE, m1).expect("c1");
    let c2 = builder.add_component("Component2", fixtures::SOURCE, m2).expect("c2");
    builder.add_resolver(c1, "a", a);
    builder.add_resolver(c2, "b", b);
    let graph = builder.build();

    let file = generate_single(&graph);

    let names: Vec<_> = file.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Component1Impl", "Component2Impl"]);
    assert_eq!(
        file.imports,
        vec![
            ImportDeclaration::new("Component1", "../index.js"),
            ImportDeclaration::new("Module1", "../index.js"),
            ImportDeclaration::new("Component2", "../index.js"),
            ImportDeclaration::new("Module2", "../other.js"),
        ]
    );
}

#[test]
fn test_components_in_different_sources_get_separate_files() {
    let mut builder = Graph::builder();
    let a = builder.types_mut().class("A");
    let m = fixtures::module(&mut builder, "Module");
    builder.add_provider(m, "pa", vec![], a, false);
    let c1 = builder.add_component("First", "src/a/first.ts", m).expect("c1");
    let c2 = builder.add_component("Second", "src/b/second.ts", m).expect("c2");
    builder.add_resolver(c1, "a", a);
    builder.add_resolver(c2, "a", a);
    let graph = builder.build();

    let files = generate_implementations(&graph, true).expect("generation");

    let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("src/a/gen/first.ts"),
            PathBuf::from("src/b/gen/second.ts"),
        ]
    );
    assert_eq!(files[0].imports[1], ImportDeclaration::new("Module", "../../index.js"));
}

#[test]
fn test_generation_is_deterministic() {
    let graph = fixtures::required_fallback(true);

    let first = generate_implementations(&graph, true).expect("first run");
    let second = generate_implementations(&graph, false).expect("second run");

    assert_eq!(first, second);
}

#[test]
fn test_generate_class_from_resolution() {
    let graph = fixtures::simple();
    let (component, _) = graph.components().next().expect("component");
    let resolution = ResolutionAggregator::new(&graph)
        .aggregate(component)
        .expect("resolution");

    let class = ImplementationGenerator::new(&graph).generate_class(&resolution);

    assert_eq!(
        member_names(&class),
        vec!["a()", "_Module", "constructor", "_Module_p1()"]
    );
}

#[test]
fn test_output_path_inserts_generated_segment() {
    assert_eq!(
        output_path(Path::new("/work/app/src/index.ts")).expect("path"),
        PathBuf::from("/work/app/src/gen/index.ts")
    );
    assert_eq!(
        output_path(Path::new("index.ts")).expect("path"),
        PathBuf::from("gen/index.ts")
    );
    assert!(output_path(Path::new("/")).is_err());
}

#[test]
fn test_import_specifiers() {
    let out = Path::new("/work/src/gen");

    assert_eq!(
        import_specifier(out, Path::new("/work/src/index.ts")).expect("specifier"),
        "../index.js"
    );
    assert_eq!(
        import_specifier(out, Path::new("/work/src/gen/helpers.ts")).expect("specifier"),
        "./helpers.js"
    );
    assert_eq!(
        import_specifier(out, Path::new("/work/lib/modules/db.ts")).expect("specifier"),
        "../../lib/modules/db.js"
    );
    assert_eq!(
        import_specifier(out, Path::new("/work/src/./nested/../index.ts")).expect("specifier"),
        "../index.js"
    );
}
