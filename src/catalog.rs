//! The node-kind catalog: plain data describing every syntax construct
//! the factory module is generated for. Produced by [`crate::discovery`],
//! consumed read-only by [`crate::render`].

use rustc_hash::FxHashMap;

/// How a constructor argument is written into its node field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Routed through `setModifiers`, which normalizes the modifier set.
    Modifiers,
    /// Wrapped in a parent-linked `createNodeArray` child list.
    NodeList,
    /// Plain field assignment.
    Direct,
}

#[derive(Debug, Clone)]
pub struct Param {
    /// Constructor argument name.
    pub name: String,
    /// Constructor argument type, as emitted.
    pub ty: String,
    /// The node field this argument writes and update reads.
    pub property: String,
    pub is_modifiers_array: bool,
    pub is_node_array: bool,
    /// Synthesized field: never sourced from update arguments.
    pub is_factory: bool,
    /// Child-rewrite entry point, present only on child-bearing fields.
    pub visitor_fn: Option<String>,
    /// Restricts the rewrite to children passing this predicate.
    pub visitor_test: Option<String>,
}

impl Param {
    /// Selects the assignment strategy for this parameter. Total over
    /// the three cases; a descriptor carrying both flags is a provider
    /// contract violation, and the modifiers route wins.
    pub fn strategy(&self) -> Strategy {
        if self.is_modifiers_array {
            Strategy::Modifiers
        } else if self.is_node_array {
            Strategy::NodeList
        } else {
            Strategy::Direct
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub type_name: String,
    /// Discriminant, emitted as `SyntaxKind.{kind_name}`.
    pub kind_name: String,
    pub create_fn: String,
    pub update_fn: String,
    pub test_fn: String,
    /// Constructor argument order. Preserved verbatim at every
    /// emission site.
    pub create_params: Vec<Param>,
}

impl SyntaxNode {
    /// The externally updateable surface: create parameters minus the
    /// factory-synthesized ones, in create order.
    pub fn update_params(&self) -> impl Iterator<Item = &Param> + Clone {
        self.create_params.iter().filter(|member| !member.is_factory)
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxType {
    pub type_name: String,
    pub test_fn: String,
    /// Kind names of the union's member nodes, in declaration order.
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// The full catalog driving one generation run.
#[derive(Debug, Default)]
pub struct Discovery {
    by_name: FxHashMap<String, NodeId>,
    createable: Vec<NodeId>,
    updateable: Vec<NodeId>,
    testable: Vec<NodeId>,
    flat: Vec<SyntaxNode>,
    types: Vec<SyntaxType>,
}

impl Discovery {
    pub fn get(&self, type_name: &str) -> Option<&SyntaxNode> {
        self.by_name.get(type_name).map(|id| &self.flat[id.0])
    }

    /// Adds a node in declaration order. Returns `None` if a node with
    /// the same name already exists.
    pub fn add(&mut self, node: SyntaxNode) -> Option<NodeId> {
        if self.by_name.contains_key(&node.type_name) {
            return None;
        }

        let id = NodeId(self.flat.len());
        self.by_name.insert(node.type_name.clone(), id);
        self.createable.push(id);
        // an update function with nothing to compare would rebuild
        // unconditionally; such nodes are create/test only
        if node.update_params().next().is_some() {
            self.updateable.push(id);
        }
        self.testable.push(id);
        self.flat.push(node);
        Some(id)
    }

    pub fn add_type(&mut self, ty: SyntaxType) {
        self.types.push(ty);
    }

    pub fn createable_nodes(&self) -> impl Iterator<Item = &SyntaxNode> + Clone {
        self.createable.iter().map(|id| &self.flat[id.0])
    }

    pub fn updateable_nodes(&self) -> impl Iterator<Item = &SyntaxNode> + Clone {
        self.updateable.iter().map(|id| &self.flat[id.0])
    }

    pub fn testable_nodes(&self) -> impl Iterator<Item = &SyntaxNode> + Clone {
        self.testable.iter().map(|id| &self.flat[id.0])
    }

    pub fn testable_types(&self) -> &[SyntaxType] {
        &self.types
    }
}
