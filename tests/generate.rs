use std::fs::read_to_string;

use factgen::{
    discovery::discover,
    render::{generate_factory, module_namespace},
};

fn sample() -> String {
    read_to_string("tests/inputs/nodes.types").unwrap()
}

#[test]
fn generates_sample_catalog() {
    let src = sample();
    let discovery = discover(&src).unwrap_or_else(|err| panic!("{}", err.render(&src)));
    let out = generate_factory(&discovery, "ts", &["factory.ts", "utilities.ts"]);

    assert!(out.starts_with("// <auto-generated />\n"));
    assert!(out.ends_with("}\n"));

    for node in [
        "Identifier",
        "NumericLiteral",
        "ComputedPropertyName",
        "Parameter",
        "Block",
        "ExpressionStatement",
        "ReturnStatement",
        "FunctionDeclaration",
        "SourceFile",
    ] {
        assert!(out.contains(&format!("    export function create{node}(")));
        assert!(out.contains(&format!("    export function is{node}(")));
    }
    for union in ["Statement", "Declaration"] {
        assert!(out.contains(&format!("    export function is{union}(")));
    }
    assert!(out.contains("    export function cloneNode<TNode extends Node>"));
    assert!(out.contains("    export function acceptTransformer("));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let src = sample();
    let references = ["factory.ts", "utilities.ts"];

    let first = generate_factory(&discover(&src).unwrap(), "ts", &references);
    let again = generate_factory(&discover(&src).unwrap(), "ts", &references);
    assert_eq!(first, again);
}

#[test]
fn emits_catalog_order_per_section() {
    let src = sample();
    let discovery = discover(&src).unwrap();
    let out = generate_factory(&discovery, "ts", &["factory.ts", "utilities.ts"]);

    for prefix in ["create", "update", "is"] {
        let mut last = 0;
        for node in ["Identifier", "Block", "FunctionDeclaration", "SourceFile"] {
            let Some(position) = out.find(&format!("    export function {prefix}{node}(")) else {
                continue;
            };
            assert!(position > last, "{prefix}{node} emitted out of order");
            last = position;
        }
    }
}

#[test]
fn factory_namespace_is_reused() {
    let factory_src = "// factory helpers\nnamespace compiler {\n    export function createNode() {}\n}\n";
    assert_eq!(module_namespace(factory_src), "compiler");

    let src = sample();
    let out = generate_factory(
        &discover(&src).unwrap(),
        module_namespace(factory_src),
        &["factory.ts", "utilities.ts"],
    );
    assert!(out.contains("namespace compiler {\n"));
}
