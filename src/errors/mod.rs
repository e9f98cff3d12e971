//! Error types and error handling for the language pipeline.
//!
//! This module defines the error types shared by every stage. It includes:
//!
//! - Error structures tagged with the stage that raised them
//! - Byte positions for lexer and parser errors
//! - Specific error variants (reasons) for each failure
//! - Helpful error names and suggestions for rendering

pub mod errors;

#[cfg(test)]
mod tests;
