/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the syntax tree
///
/// Submodules:
/// - ast: Top-level nodes (source, globals, functions) and node ids
/// - expressions: Definitions for the expression variants
/// - statements: Definitions for the statement variants
/// - types: The nominal type lattice and assignability
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
