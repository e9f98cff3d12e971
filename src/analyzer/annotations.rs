use std::collections::HashMap;

use crate::ast::{ast::NodeId, types::Type};

/// Where a variable access resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableBinding {
    Global(NodeId),
    Local(NodeId),
    Parameter { function: NodeId, index: usize },
}

/// Where a call resolved to. Host functions have no node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionBinding {
    User(NodeId),
    Builtin { name: String, arity: usize },
}

/// Everything the analyzer learned about a tree, keyed by node id.
///
/// The tree itself is never touched; consumers look up a node's id here.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    expression_types: HashMap<NodeId, Type>,
    declaration_types: HashMap<NodeId, Type>,
    variables: HashMap<NodeId, VariableBinding>,
    functions: HashMap<NodeId, FunctionBinding>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_type(&mut self, id: NodeId, ty: Type) {
        self.expression_types.insert(id, ty);
    }

    pub fn record_declaration(&mut self, id: NodeId, ty: Type) {
        self.declaration_types.insert(id, ty);
    }

    pub fn record_variable(&mut self, id: NodeId, binding: VariableBinding) {
        self.variables.insert(id, binding);
    }

    pub fn record_function(&mut self, id: NodeId, binding: FunctionBinding) {
        self.functions.insert(id, binding);
    }

    /// Static type of an expression.
    pub fn type_of(&self, id: NodeId) -> Option<Type> {
        self.expression_types.get(&id).copied()
    }

    /// Resolved type of a global, `LET` or function return.
    pub fn declared_type_of(&self, id: NodeId) -> Option<Type> {
        self.declaration_types.get(&id).copied()
    }

    pub fn variable_of(&self, id: NodeId) -> Option<VariableBinding> {
        self.variables.get(&id).copied()
    }

    pub fn function_of(&self, id: NodeId) -> Option<&FunctionBinding> {
        self.functions.get(&id)
    }
}
