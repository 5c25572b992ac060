//! Renders the catalog into the generated factory module: one
//! create/update/test function per node kind, union-type predicates,
//! and the `cloneNode`/`acceptTransformer` dispatch functions, in
//! catalog order.

use std::fmt::Write as _;

use crate::catalog::{Discovery, Strategy, SyntaxNode, SyntaxType};

macro_rules! ln {
    ($f:ident, $($tt:tt)*) => (writeln!($f, $($tt)*).unwrap());
    ($f:ident) => (writeln!($f).unwrap());
}

macro_rules! w {
    ($f:ident, $($tt:tt)*) => (write!($f, $($tt)*).unwrap());
}

pub fn generate_factory(discovery: &Discovery, namespace: &str, references: &[&str]) -> String {
    let mut out = String::new();

    emit_header(&mut out, namespace, references);
    for node in discovery.createable_nodes() {
        emit_create_fn(&mut out, node);
    }
    for node in discovery.updateable_nodes() {
        emit_update_fn(&mut out, node);
    }
    for node in discovery.testable_nodes() {
        emit_test_fn(&mut out, node);
    }
    for ty in discovery.testable_types() {
        emit_type_test_fn(&mut out, ty);
    }
    emit_clone_dispatch(discovery, &mut out);
    emit_accept_dispatch(discovery, &mut out);
    ln!(out, "}}");

    out
}

/// Recovers the namespace name declared by the factory module; the
/// generated module reopens the same namespace.
pub fn module_namespace(src: &str) -> &str {
    let mut words = src.split_whitespace();
    while let Some(word) = words.next() {
        if word == "namespace" {
            if let Some(name) = words.next() {
                let name = name.trim_end_matches('{');
                if !name.is_empty() {
                    return name;
                }
            }
        }
    }
    "ts"
}

fn emit_header(out: &mut String, namespace: &str, references: &[&str]) {
    ln!(out, "// <auto-generated />");
    for reference in references {
        ln!(out, "/// <reference path=\"{reference}\" />");
    }
    ln!(out, "namespace {namespace} {{");
}

fn emit_create_fn(out: &mut String, node: &SyntaxNode) {
    let ty = &node.type_name;

    w!(out, "    export function {}(", node.create_fn);
    for member in &node.create_params {
        w!(out, "{}?: {}, ", member.name, member.ty);
    }
    ln!(out, "location?: TextRange, flags?: NodeFlags): {ty} {{");
    ln!(
        out,
        "        let node = createNode<{ty}>(SyntaxKind.{}, location, flags);",
        node.kind_name
    );
    for member in &node.create_params {
        match member.strategy() {
            Strategy::Modifiers => {
                ln!(out, "        if ({0}) setModifiers(node, {0});", member.name)
            }
            Strategy::NodeList => ln!(
                out,
                "        if ({0}) node.{1} = createNodeArray({0});",
                member.name,
                member.property
            ),
            Strategy::Direct => ln!(
                out,
                "        if ({0}) node.{1} = {0};",
                member.name,
                member.property
            ),
        }
    }
    ln!(out, "        return node;");
    ln!(out, "    }}");
    ln!(out);
}

fn emit_update_fn(out: &mut String, node: &SyntaxNode) {
    let ty = &node.type_name;
    let params = node
        .update_params()
        .map(|member| format!(", {}: {}", member.name, member.ty))
        .join("");
    let compare = node
        .update_params()
        .map(|member| format!("{} !== node.{}", member.name, member.property))
        .join(" || ");
    // rebuild via create, in create-parameter order; factory-synthesized
    // fields are sourced from the existing node
    let rebuild = node
        .create_params
        .iter()
        .map(|member| {
            if member.is_factory {
                format!("node.{}", member.property)
            } else {
                member.name.clone()
            }
        })
        .join(", ");

    ln!(
        out,
        "    export function {}(node: {ty}{params}): {ty} {{",
        node.update_fn
    );
    ln!(out, "        if ({compare}) {{");
    ln!(out, "            let newNode = {}({rebuild});", node.create_fn);
    ln!(out, "            return updateFrom(node, newNode);");
    ln!(out, "        }}");
    ln!(out, "        return node;");
    ln!(out, "    }}");
    ln!(out);
}

fn emit_test_fn(out: &mut String, node: &SyntaxNode) {
    let ty = &node.type_name;
    ln!(
        out,
        "    export function {}(node: Node): node is {ty} {{",
        node.test_fn
    );
    ln!(
        out,
        "        return node && node.kind === SyntaxKind.{};",
        node.kind_name
    );
    ln!(out, "    }}");
    ln!(out);
}

fn emit_type_test_fn(out: &mut String, ty: &SyntaxType) {
    ln!(
        out,
        "    export function {}(node: Node): node is {} {{",
        ty.test_fn,
        ty.type_name
    );
    ln!(out, "        if (node) {{");
    ln!(out, "            switch (node.kind) {{");
    for member in &ty.members {
        ln!(out, "                case SyntaxKind.{member}:");
    }
    ln!(out, "                    return true;");
    ln!(out, "            }}");
    ln!(out, "        }}");
    ln!(out, "        return false;");
    ln!(out, "    }}");
    ln!(out);
}

fn emit_clone_dispatch(discovery: &Discovery, out: &mut String) {
    ln!(
        out,
        "    export function cloneNode<TNode extends Node>(node: TNode, location?: TextRange, flags?: NodeFlags): TNode;"
    );
    ln!(
        out,
        "    export function cloneNode(node: Node, location?: TextRange, flags: NodeFlags = node.flags): Node {{"
    );
    ln!(out, "        if (node) {{");
    ln!(out, "            let clone: Node;");
    ln!(out, "            switch (node.kind) {{");
    for node in discovery.createable_nodes() {
        let args = node
            .create_params
            .iter()
            .map(|member| format!("(<{}>node).{}, ", node.type_name, member.property))
            .join("");
        ln!(out, "                case SyntaxKind.{}:", node.kind_name);
        ln!(
            out,
            "                    clone = {}({args}location, flags);",
            node.create_fn
        );
        ln!(out, "                    break;");
    }
    ln!(out, "            }}");
    ln!(out, "            if (clone) {{");
    ln!(out, "                clone.original = node;");
    ln!(out, "                return clone;");
    ln!(out, "            }}");
    ln!(out, "        }}");
    ln!(out, "        return node;");
    ln!(out, "    }}");
    ln!(out);
}

fn emit_accept_dispatch(discovery: &Discovery, out: &mut String) {
    ln!(
        out,
        "    export function acceptTransformer(node: Node, visitor: (node: Node) => Node): Node {{"
    );
    ln!(out, "        if (node) {{");
    ln!(out, "            switch (node.kind) {{");
    for node in discovery.updateable_nodes() {
        let ty = &node.type_name;
        let args = node
            .update_params()
            .map(|member| {
                let field = format!("(<{ty}>node).{}", member.property);
                match (&member.visitor_fn, &member.visitor_test) {
                    (Some(visit), Some(test)) => format!(", {visit}({field}, visitor, {test})"),
                    (Some(visit), None) => format!(", {visit}({field}, visitor)"),
                    (None, _) => format!(", {field}"),
                }
            })
            .join("");
        ln!(out, "                case SyntaxKind.{}:", node.kind_name);
        ln!(
            out,
            "                    return {}(<{ty}>node{args});",
            node.update_fn
        );
    }
    ln!(out, "            }}");
    ln!(out, "        }}");
    ln!(out, "        return node;");
    ln!(out, "    }}");
}

pub struct Join<Iter, Sep>
where
    Iter: Iterator,
{
    iter: Iter,
    sep: Sep,
}

impl<Iter, Sep> std::fmt::Display for Join<Iter, Sep>
where
    Iter: Iterator + Clone,
    <Iter as Iterator>::Item: std::fmt::Display,
    Sep: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut iter = self.iter.clone().peekable();
        while let Some(item) = iter.next() {
            write!(f, "{item}")?;
            if iter.peek().is_some() {
                write!(f, "{}", self.sep)?;
            }
        }
        Ok(())
    }
}

pub trait JoinIter: Sized + Iterator {
    fn join<Sep>(self, sep: Sep) -> Join<Self, Sep>;
}

impl<Iter> JoinIter for Iter
where
    Iter: Sized + Iterator + Clone,
{
    fn join<Sep>(self, sep: Sep) -> Join<Self, Sep> {
        Join { iter: self, sep }
    }
}

#[cfg(test)]
mod tests;
