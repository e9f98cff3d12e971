/// Semantic analysis module
/// Resolves names against scope and assigns a static type to every expression.
///
/// Submodules:
/// - analyzer: The checking passes over globals, functions, statements and expressions
/// - annotations: Side tables of types and bindings keyed by node id
pub mod analyzer;
pub mod annotations;
