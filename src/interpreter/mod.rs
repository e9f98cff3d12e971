//! Tree-walking interpreter.
//!
//! Runs a parsed program directly. Every statement reports whether its
//! block should continue or unwind to the enclosing call with a value.
pub mod expr;
pub mod interpreter;
pub mod stmt;
pub mod value;
