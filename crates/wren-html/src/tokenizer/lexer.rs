use strum_macros::Display;

use super::token::Token;

/// The tokenizer state machine.
///
/// There are only two states: outside markup, where characters accumulate
/// into text, and inside a `<...>` directive, where they accumulate into a
/// tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Accumulating literal text.
    Data,
    /// Accumulating the contents of a markup directive.
    TagName,
}

/// Splits a document into [`Token`]s in a single left-to-right pass.
///
/// The tokenizer never fails. Malformed markup degrades instead:
/// - a stray `>` outside markup closes an (implicit) directive made of the
///   text accumulated so far
/// - a `<` inside an unclosed directive turns what was collected so far into
///   text and starts a new directive
/// - an unterminated `<...` at the end of input is dropped
/// - character references such as `&amp;` stay literal text
pub struct Tokenizer<'a> {
    state: TokenizerState,
    input: &'a str,
    buffer: String,
    token_stream: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input. The initial state is
    /// [`TokenizerState::Data`].
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            state: TokenizerState::Data,
            input,
            buffer: String::new(),
            token_stream: Vec::new(),
        }
    }

    /// The state the tokenizer is currently in.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Tokenize the whole input.
    pub fn run(&mut self) {
        for c in self.input.chars() {
            match self.state {
                TokenizerState::Data => self.handle_data_state(c),
                TokenizerState::TagName => self.handle_tag_name_state(c),
            }
        }
        self.handle_eof();
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after [`run`](Self::run).
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    fn handle_data_state(&mut self, c: char) {
        match c {
            '<' => {
                self.emit_text_token();
                self.switch_to(TokenizerState::TagName);
            }
            '>' => {
                // Nothing opened this directive, but it still closes one.
                self.emit_tag_token();
            }
            c => self.buffer.push(c),
        }
    }

    fn handle_tag_name_state(&mut self, c: char) {
        match c {
            '>' => {
                self.emit_tag_token();
                self.switch_to(TokenizerState::Data);
            }
            // The unclosed directive so far is demoted to text.
            '<' => self.emit_text_token(),
            c => self.buffer.push(c),
        }
    }

    fn handle_eof(&mut self) {
        match self.state {
            TokenizerState::Data => self.emit_text_token(),
            TokenizerState::TagName => self.buffer.clear(),
        }
    }

    fn switch_to(&mut self, state: TokenizerState) {
        self.state = state;
    }

    /// Emit the buffer as text if it holds anything.
    fn emit_text_token(&mut self) {
        if !self.buffer.is_empty() {
            let content = std::mem::take(&mut self.buffer);
            self.token_stream.push(Token::Text { content });
        }
    }

    /// Emit the buffer as a tag name, even if empty.
    fn emit_tag_token(&mut self) {
        let name = std::mem::take(&mut self.buffer);
        self.token_stream.push(Token::Tag { name });
    }
}

/// Tokenize `document` in one call.
#[must_use]
pub fn tokenize(document: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(document);
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Concatenate the contents of all text tokens, in order.
///
/// This is the document with its markup stripped.
#[must_use]
pub fn text_content(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Text { content } => Some(content.as_str()),
            Token::Tag { .. } => None,
        })
        .collect()
}
