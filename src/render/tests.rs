use indoc::indoc;

use super::{generate_factory, module_namespace};
use crate::discovery::discover;

fn generate(src: &str) -> String {
    let discovery = discover(src).unwrap_or_else(|err| panic!("{}", err.render(src)));
    generate_factory(&discovery, "ts", &["factory.ts", "utilities.ts"])
}

#[test]
fn single_node_module() {
    let out = generate("node NumericLiteral { text: string, }");
    let expected = concat!(
        "// <auto-generated />\n",
        "/// <reference path=\"factory.ts\" />\n",
        "/// <reference path=\"utilities.ts\" />\n",
        "namespace ts {\n",
        "    export function createNumericLiteral(text?: string, location?: TextRange, flags?: NodeFlags): NumericLiteral {\n",
        "        let node = createNode<NumericLiteral>(SyntaxKind.NumericLiteral, location, flags);\n",
        "        if (text) node.text = text;\n",
        "        return node;\n",
        "    }\n",
        "\n",
        "    export function updateNumericLiteral(node: NumericLiteral, text: string): NumericLiteral {\n",
        "        if (text !== node.text) {\n",
        "            let newNode = createNumericLiteral(text);\n",
        "            return updateFrom(node, newNode);\n",
        "        }\n",
        "        return node;\n",
        "    }\n",
        "\n",
        "    export function isNumericLiteral(node: Node): node is NumericLiteral {\n",
        "        return node && node.kind === SyntaxKind.NumericLiteral;\n",
        "    }\n",
        "\n",
        "    export function cloneNode<TNode extends Node>(node: TNode, location?: TextRange, flags?: NodeFlags): TNode;\n",
        "    export function cloneNode(node: Node, location?: TextRange, flags: NodeFlags = node.flags): Node {\n",
        "        if (node) {\n",
        "            let clone: Node;\n",
        "            switch (node.kind) {\n",
        "                case SyntaxKind.NumericLiteral:\n",
        "                    clone = createNumericLiteral((<NumericLiteral>node).text, location, flags);\n",
        "                    break;\n",
        "            }\n",
        "            if (clone) {\n",
        "                clone.original = node;\n",
        "                return clone;\n",
        "            }\n",
        "        }\n",
        "        return node;\n",
        "    }\n",
        "\n",
        "    export function acceptTransformer(node: Node, visitor: (node: Node) => Node): Node {\n",
        "        if (node) {\n",
        "            switch (node.kind) {\n",
        "                case SyntaxKind.NumericLiteral:\n",
        "                    return updateNumericLiteral(<NumericLiteral>node, (<NumericLiteral>node).text);\n",
        "            }\n",
        "        }\n",
        "        return node;\n",
        "    }\n",
        "}\n",
    );
    assert_eq!(out, expected);
}

#[test]
fn create_assignment_strategies() {
    let out = generate(indoc! {"
        node ClassDeclaration {
            modifiers: ModifiersArray,
            members: [ClassElement],
            name: Identifier,
        }
    "});

    assert!(out.contains(
        "    export function createClassDeclaration(modifiers?: ModifiersArray, members?: NodeArray<ClassElement>, name?: Identifier, location?: TextRange, flags?: NodeFlags): ClassDeclaration {\n"
    ));
    assert!(out.contains("        if (modifiers) setModifiers(node, modifiers);\n"));
    assert!(out.contains("        if (members) node.members = createNodeArray(members);\n"));
    assert!(out.contains("        if (name) node.name = name;\n"));
}

#[test]
fn update_sources_factory_fields_from_node() {
    let out = generate(indoc! {"
        node SourceFile {
            statements: [Statement],
            factory fileName: string,
        }
    "});

    // the factory-only field is absent from the update signature and
    // comparison, but threaded through the rebuild from the node
    assert!(out.contains(
        "    export function updateSourceFile(node: SourceFile, statements: NodeArray<Statement>): SourceFile {\n"
    ));
    assert!(out.contains("        if (statements !== node.statements) {\n"));
    assert!(out.contains("            let newNode = createSourceFile(statements, node.fileName);\n"));
}

#[test]
fn union_type_predicate() {
    let out = generate(indoc! {"
        node Block {
            statements: [Statement],
        }
        node ExpressionStatement {
            expression: Node,
        }
        type Statement = Block | ExpressionStatement;
    "});

    let expected = concat!(
        "    export function isStatement(node: Node): node is Statement {\n",
        "        if (node) {\n",
        "            switch (node.kind) {\n",
        "                case SyntaxKind.Block:\n",
        "                case SyntaxKind.ExpressionStatement:\n",
        "                    return true;\n",
        "            }\n",
        "        }\n",
        "        return false;\n",
        "    }\n",
    );
    assert!(out.contains(expected), "missing union predicate:\n{out}");
}

#[test]
fn accept_transformer_visitor_shapes() {
    let out = generate(indoc! {"
        node Identifier {
            text: string,
        }
        node Block {
            statements: [Statement],
        }
        node FunctionDeclaration {
            modifiers: ModifiersArray,
            name: Identifier,
            body: Node,
        }
        type Statement = Block | FunctionDeclaration;
    "});

    // unfiltered list, filtered single child, unfiltered single child
    assert!(out.contains(
        "                    return updateFunctionDeclaration(<FunctionDeclaration>node, visitNodes((<FunctionDeclaration>node).modifiers, visitor), visitNode((<FunctionDeclaration>node).name, visitor, isIdentifier), visitNode((<FunctionDeclaration>node).body, visitor));\n"
    ));
    // list filtered by a union predicate
    assert!(out.contains(
        "                    return updateBlock(<Block>node, visitNodes((<Block>node).statements, visitor, isStatement));\n"
    ));
    // scalar passed through untouched
    assert!(out.contains(
        "                    return updateIdentifier(<Identifier>node, (<Identifier>node).text);\n"
    ));
}

#[test]
fn nodes_without_parameters() {
    let out = generate("node EndOfFileToken {}");
    assert!(out.contains(
        "    export function createEndOfFileToken(location?: TextRange, flags?: NodeFlags): EndOfFileToken {\n"
    ));
    assert!(out.contains("                    clone = createEndOfFileToken(location, flags);\n"));
    // no update surface, so no update function
    assert!(!out.contains("updateEndOfFileToken"));
}

#[test]
fn emits_in_catalog_order() {
    let out = generate(indoc! {"
        node Alpha { text: string, }
        node Beta { text: string, }
        type Literal = Alpha | Beta;
    "});

    let functions = [
        "function createAlpha",
        "function createBeta",
        "function updateAlpha",
        "function updateBeta",
        "function isAlpha",
        "function isBeta",
        "function isLiteral",
        "function cloneNode",
        "function acceptTransformer",
    ];
    let positions: Vec<usize> = functions
        .iter()
        .map(|name| out.find(name).unwrap_or_else(|| panic!("missing {name}")))
        .collect();
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "functions out of order: {positions:?}"
    );
}

#[test]
fn generation_is_deterministic() {
    let src = indoc! {"
        node Identifier { text: string, }
        node Block { statements: [Statement], }
        type Statement = Block;
    "};
    assert_eq!(generate(src), generate(src));
}

#[test]
fn header_carries_namespace_and_references() {
    let discovery = discover("node Identifier { text: string, }").unwrap();
    let out = generate_factory(&discovery, "compiler", &["myFactory.ts", "utils.ts"]);
    assert!(out.starts_with(concat!(
        "// <auto-generated />\n",
        "/// <reference path=\"myFactory.ts\" />\n",
        "/// <reference path=\"utils.ts\" />\n",
        "namespace compiler {\n",
    )));
    assert!(out.ends_with("}\n"));
}

#[test]
fn namespace_recovery() {
    assert_eq!(module_namespace("namespace ts {\n"), "ts");
    assert_eq!(module_namespace("namespace ts{\n"), "ts");
    assert_eq!(module_namespace("// factory\nnamespace compiler\n{\n"), "compiler");
    assert_eq!(module_namespace("no declaration here"), "ts");
}
