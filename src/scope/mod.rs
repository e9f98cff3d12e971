//! Parent-linked environments shared by the analyzer and the interpreter.
pub mod scope;
