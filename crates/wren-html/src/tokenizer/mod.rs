//! Markup tokenizer module.
//!
//! Turns raw document text into a flat stream of text runs and directive
//! names. There is no tree construction, no attribute parsing, and no
//! character reference decoding.

/// Tokenizer state machine implementation.
pub mod lexer;
/// Token types produced by the tokenizer.
pub mod token;

pub use lexer::{Tokenizer, TokenizerState, text_content, tokenize};
pub use token::{Directive, Token};
