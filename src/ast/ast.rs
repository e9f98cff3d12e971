use super::{expressions::{Expr, ExprKind}, statements::Stmt};

/// Identity of a node that the analyzer annotates.
///
/// Ids are handed out by the parser in source order and are unique
/// within one parsed [`Source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// A whole program: every global precedes every function.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub globals: Vec<Global>,
    pub functions: Vec<Function>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    pub id: NodeId,
    pub name: String,
    pub type_name: String,
    pub mutable: bool,
    pub initializer: Option<Expr>,
}

impl Global {
    /// `LIST` globals are the ones initialized with a bracketed literal.
    pub fn is_list(&self) -> bool {
        matches!(
            self.initializer.as_ref().map(|expr| &expr.kind),
            Some(ExprKind::ListLiteral(_))
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub id: NodeId,
    pub name: String,
    pub parameter_names: Vec<String>,
    pub parameter_type_names: Vec<String>,
    pub return_type_name: Option<String>,
    pub body: Vec<Stmt>,
}

impl Function {
    pub fn arity(&self) -> usize {
        self.parameter_names.len()
    }
}
