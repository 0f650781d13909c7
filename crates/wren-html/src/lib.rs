//! Markup tokenizer for the Wren renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - a single-pass split of a document into text runs and
//!   `<...>` directive names
//! - **Directives** - the fixed, case-sensitive set of tag names that the
//!   layout engine reacts to (`b`, `i`, `small`, `big`, `br`, `/p` and their
//!   closing forms)
//!
//! # Not Implemented
//!
//! - Attribute parsing
//! - Character references (`&amp;` stays literal)
//! - Tree construction or any recovery from unbalanced tags

/// Markup tokenizer for converting input into tokens.
pub mod tokenizer;

pub use tokenizer::{Directive, Token, Tokenizer, TokenizerState, text_content, tokenize};
