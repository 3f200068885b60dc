use std::cell::{Cell, RefCell};

use crate::tokenizer::Token;

/// https://drafts.csswg.org/css-syntax-3/#css-token-stream
///
/// Reads past the end of the token list yield `<EOF-token>`. The stream is
/// shared by reference between the consume algorithms, so the cursor lives in
/// a [`Cell`].
pub struct TokenStream {
    tokens: Vec<Token>,
    position: Cell<usize>,
    marks: RefCell<Vec<usize>>,
}

/// What a [`TokenStream::process`] step wants to happen next.
pub enum Step<T> {
    Continue,
    Done(T),
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> TokenStream {
        TokenStream {
            tokens,
            position: Cell::new(0),
            marks: RefCell::default(),
        }
    }

    fn advance(&self) {
        self.position.set(self.position.get() + 1);
    }

    pub fn next_token(&self) -> &Token {
        self.tokens
            .get(self.position.get())
            .unwrap_or(&Token::EndOfFile)
    }

    pub fn empty(&self) -> bool {
        matches!(self.next_token(), Token::EndOfFile)
    }

    pub fn consume_a_token(&self) -> &Token {
        let token = self.next_token();
        self.advance();
        token
    }

    pub fn discard_a_token(&self) {
        if !self.empty() {
            self.advance();
        }
    }

    /// Remembers the current position so a speculative parse can be undone.
    pub fn mark(&self) {
        self.marks.borrow_mut().push(self.position.get());
    }

    pub fn restore_a_mark(&self) {
        let mark = self.marks.borrow_mut().pop();
        if let Some(position) = mark {
            self.position.set(position);
        }
    }

    pub fn discard_a_mark(&self) {
        self.marks.borrow_mut().pop();
    }

    pub fn discard_whitespace(&self) {
        while matches!(self.next_token(), Token::Whitespace) {
            self.advance();
        }
    }

    /// https://drafts.csswg.org/css-syntax-3/#token-stream-process
    ///
    /// Calls `step` with the next token until it returns [`Step::Done`]. The
    /// step is responsible for consuming tokens.
    pub fn process<T>(&self, mut step: impl FnMut(&Token) -> Step<T>) -> T {
        loop {
            if let Step::Done(result) = step(self.next_token()) {
                return result;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Step, TokenStream};
    use crate::tokenizer::{Token, Tokenizer};

    fn stream(text: &str) -> TokenStream {
        TokenStream::new(Tokenizer::new(text).tokenize())
    }

    #[test]
    fn reads_past_the_end_as_eof() {
        let input = TokenStream::new(vec![Token::Whitespace]);
        assert_eq!(input.consume_a_token(), &Token::Whitespace);
        assert!(input.empty());
        assert_eq!(input.consume_a_token(), &Token::EndOfFile);
        input.discard_a_token();
        assert_eq!(input.next_token(), &Token::EndOfFile);
    }

    #[test]
    fn marks_restore_the_position() {
        let input = stream("a b");
        input.mark();
        input.discard_a_token();
        input.discard_whitespace();
        assert!(matches!(input.next_token(), Token::Ident { value } if value == "b"));

        input.restore_a_mark();
        assert!(matches!(input.next_token(), Token::Ident { value } if value == "a"));

        input.mark();
        input.discard_a_token();
        input.discard_a_mark();
        input.restore_a_mark();
        assert_eq!(input.next_token(), &Token::Whitespace);
    }

    #[test]
    fn process_runs_until_done() {
        let input = stream("a b c");
        let mut idents = Vec::new();
        let count = input.process(|token| match token {
            Token::EndOfFile => Step::Done(idents.len()),
            Token::Ident { value } => {
                idents.push(value.clone());
                input.discard_a_token();
                Step::Continue
            }
            _ => {
                input.discard_a_token();
                Step::Continue
            }
        });
        assert_eq!(count, 3);
        assert_eq!(idents, ["a", "b", "c"]);
    }
}
