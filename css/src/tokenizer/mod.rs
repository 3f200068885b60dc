#![allow(clippy::manual_is_ascii_check)]

pub use token::{HashType, NumberType, Token};

pub mod token;

macro_rules! definition {
    (digit) => {
        '0'..='9'
    };
    (hex_digit) => {
        definition!(digit) | 'A'..='F' | 'a'..='f'
    };
    (uppercase_letter) => {
        'A'..='Z'
    };
    (lowercase_letter) => {
        'a'..='z'
    };
    (letter) => {
        definition!(uppercase_letter) | definition!(lowercase_letter)
    };
    (non_ascii_code_point) => {
        '\u{0080}'..='\u{10FFFF}'
    };
    (ident_start_code_point) => {
        definition!(letter) | definition!(non_ascii_code_point) | '_'
    };
    (ident_code_point) => {
        definition!(ident_start_code_point) | definition!(digit) | '-'
    };
    (non_printable_code_point) => {
        '\u{0000}'..='\u{0008}' | '\u{000B}' | '\u{000E}'..='\u{001F}' | '\u{007F}'
    };
    (newline) => {
        '\n'
    };
    (whitespace) => {
        '\n' | '\t' | ' '
    };
}

const MAXIMUM_ALLOWED_CODE_POINT: u32 = 0x10FFFF;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    input: Vec<char>,
    position: isize,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            input: preprocess(input).chars().collect(),
            position: -1,
        }
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = vec![];

        loop {
            let token = self.consume_a_token();
            tracing::trace!(target: "css", ?token, "token");
            match token {
                Token::EndOfFile => {
                    tokens.push(token);
                    break;
                }
                _ => tokens.push(token),
            }
        }

        tokens
    }

    fn peek(&self, offset: isize) -> Option<char> {
        let n = self.position + offset;
        if n < 0 {
            return None;
        }
        self.input.get(n as usize).copied()
    }

    // https://www.w3.org/TR/css-syntax-3/#next-input-code-point
    fn next_input_code_point(&self) -> Option<char> {
        self.peek(1)
    }

    // https://www.w3.org/TR/css-syntax-3/#current-input-code-point
    fn current_input_code_point(&self) -> Option<char> {
        self.peek(0)
    }

    fn consume_next_input_code_point(&mut self) -> Option<char> {
        self.position += 1;
        self.current_input_code_point()
    }

    // https://www.w3.org/TR/css-syntax-3/#reconsume-the-current-input-code-point
    fn reconsume_current_input_code_point(&mut self) {
        self.position -= 1;
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-token
    fn consume_a_token(&mut self) -> Token {
        self.consume_comments();

        let Some(code_point) = self.consume_next_input_code_point() else {
            return Token::EndOfFile;
        };

        match code_point {
            definition!(whitespace) => {
                self.consume_as_much_whitespace_as_possible();
                Token::Whitespace
            }
            '"' | '\'' => self.consume_a_string_token(code_point),
            '#' => {
                // If the next input code point is an ident code point or the next two input code points are a valid escape
                let next = self.peek(1);
                if matches!(next, Some(definition!(ident_code_point)))
                    || is_valid_escape(next, self.peek(2))
                {
                    let hash_type = match would_start_an_ident_sequence(
                        self.peek(1),
                        self.peek(2),
                        self.peek(3),
                    ) {
                        true => HashType::Id,
                        false => HashType::Unrestricted,
                    };
                    return Token::Hash {
                        value: self.consume_an_ident_sequence(),
                        hash_type,
                    };
                }
                Token::Delim { value: code_point }
            }
            '(' => Token::LeftParenthesis,
            ')' => Token::RightParenthesis,
            '+' | '.' => {
                if self.stream_starts_with_a_number() {
                    self.reconsume_current_input_code_point();
                    return self.consume_a_numeric_token();
                }
                Token::Delim { value: code_point }
            }
            ',' => Token::Comma,
            '-' => {
                if self.stream_starts_with_a_number() {
                    self.reconsume_current_input_code_point();
                    return self.consume_a_numeric_token();
                }

                // Otherwise, if the next 2 input code points are U+002D HYPHEN-MINUS U+003E GREATER-THAN SIGN (->),
                // consume them and return a <CDC-token>.
                if self.peek(1) == Some('-') && self.peek(2) == Some('>') {
                    self.consume_next_input_code_point();
                    self.consume_next_input_code_point();
                    return Token::Cdc;
                }

                if self.stream_starts_with_an_ident_sequence() {
                    self.reconsume_current_input_code_point();
                    return self.consume_an_ident_like_token();
                }

                Token::Delim { value: code_point }
            }
            ':' => Token::Colon,
            ';' => Token::Semicolon,
            '<' => {
                // If the next 3 input code points are U+0021 EXCLAMATION MARK U+002D HYPHEN-MINUS U+002D HYPHEN-MINUS (!--),
                // consume them and return a <CDO-token>.
                if self.peek(1) == Some('!') && self.peek(2) == Some('-') && self.peek(3) == Some('-')
                {
                    for _ in 0..3 {
                        self.consume_next_input_code_point();
                    }
                    return Token::Cdo;
                }
                Token::Delim { value: code_point }
            }
            '@' => {
                if would_start_an_ident_sequence(self.peek(1), self.peek(2), self.peek(3)) {
                    return Token::AtKeyword {
                        value: self.consume_an_ident_sequence(),
                    };
                }
                Token::Delim { value: code_point }
            }
            '[' => Token::LeftSquareBracket,
            '\\' => {
                if is_valid_escape(Some(code_point), self.peek(1)) {
                    self.reconsume_current_input_code_point();
                    return self.consume_an_ident_like_token();
                }
                log_parse_error!("invalid escape");
                Token::Delim { value: code_point }
            }
            ']' => Token::RightSquareBracket,
            '{' => Token::LeftCurlyBracket,
            '}' => Token::RightCurlyBracket,
            definition!(digit) => {
                self.reconsume_current_input_code_point();
                self.consume_a_numeric_token()
            }
            definition!(ident_start_code_point) => {
                self.reconsume_current_input_code_point();
                self.consume_an_ident_like_token()
            }
            _ => Token::Delim { value: code_point },
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-comment
    fn consume_comments(&mut self) {
        while self.peek(1) == Some('/') && self.peek(2) == Some('*') {
            self.consume_next_input_code_point();
            self.consume_next_input_code_point();
            loop {
                match (self.peek(1), self.peek(2)) {
                    (Some('*'), Some('/')) => {
                        self.consume_next_input_code_point();
                        self.consume_next_input_code_point();
                        break;
                    }
                    (None, _) => {
                        log_parse_error!("EOF in comment");
                        return;
                    }
                    _ => {
                        self.consume_next_input_code_point();
                    }
                }
            }
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-numeric-token
    fn consume_a_numeric_token(&mut self) -> Token {
        let (value, number_type) = self.consume_a_number();

        if would_start_an_ident_sequence(self.peek(1), self.peek(2), self.peek(3)) {
            return Token::Dimension {
                value,
                number_type,
                unit: self.consume_an_ident_sequence(),
            };
        }

        if self.next_input_code_point() == Some('%') {
            self.consume_next_input_code_point();
            return Token::Percentage { value };
        }

        Token::Number { value, number_type }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token
    fn consume_an_ident_like_token(&mut self) -> Token {
        let string = self.consume_an_ident_sequence();

        if string.eq_ignore_ascii_case("url") && self.next_input_code_point() == Some('(') {
            self.consume_next_input_code_point();

            // While the next two input code points are whitespace, consume the next input code point.
            while matches!(self.peek(1), Some(definition!(whitespace)))
                && matches!(self.peek(2), Some(definition!(whitespace)))
            {
                self.consume_next_input_code_point();
            }

            let quoted = match (self.peek(1), self.peek(2)) {
                (Some('"' | '\''), _) => true,
                (Some(definition!(whitespace)), Some('"' | '\'')) => true,
                _ => false,
            };
            if quoted {
                return Token::Function { value: string };
            }
            return self.consume_a_url_token();
        }

        if self.next_input_code_point() == Some('(') {
            self.consume_next_input_code_point();
            return Token::Function { value: string };
        }

        Token::Ident { value: string }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-string-token
    fn consume_a_string_token(&mut self, ending_code_point: char) -> Token {
        let mut value = String::new();

        loop {
            match self.consume_next_input_code_point() {
                Some(code_point) if code_point == ending_code_point => {
                    return Token::String { value };
                }
                None => {
                    log_parse_error!("EOF in string token");
                    return Token::String { value };
                }
                Some(definition!(newline)) => {
                    log_parse_error!("newline in string token");
                    self.reconsume_current_input_code_point();
                    return Token::BadString;
                }
                Some('\\') => match self.next_input_code_point() {
                    None => {}
                    Some(definition!(newline)) => {
                        self.consume_next_input_code_point();
                    }
                    Some(_) => value.push(self.consume_an_escaped_code_point()),
                },
                Some(code_point) => value.push(code_point),
            }
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-url-token
    fn consume_a_url_token(&mut self) -> Token {
        let mut value = String::new();
        self.consume_as_much_whitespace_as_possible();

        loop {
            match self.consume_next_input_code_point() {
                Some(')') => return Token::Url { value },
                None => {
                    log_parse_error!("EOF in url token");
                    return Token::Url { value };
                }
                Some(definition!(whitespace)) => {
                    self.consume_as_much_whitespace_as_possible();
                    match self.next_input_code_point() {
                        Some(')') => {
                            self.consume_next_input_code_point();
                            return Token::Url { value };
                        }
                        None => {
                            log_parse_error!("EOF in url token");
                            self.consume_next_input_code_point();
                            return Token::Url { value };
                        }
                        Some(_) => {
                            self.consume_the_remnants_of_a_bad_url();
                            return Token::BadUrl;
                        }
                    }
                }
                Some('"' | '\'' | '(' | definition!(non_printable_code_point)) => {
                    log_parse_error!("unexpected character in url token");
                    self.consume_the_remnants_of_a_bad_url();
                    return Token::BadUrl;
                }
                Some('\\') => {
                    if is_valid_escape(Some('\\'), self.next_input_code_point()) {
                        value.push(self.consume_an_escaped_code_point());
                    } else {
                        log_parse_error!("invalid escape in url token");
                        self.consume_the_remnants_of_a_bad_url();
                        return Token::BadUrl;
                    }
                }
                Some(code_point) => value.push(code_point),
            }
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url
    fn consume_the_remnants_of_a_bad_url(&mut self) {
        loop {
            match self.consume_next_input_code_point() {
                Some(')') | None => return,
                Some('\\') if is_valid_escape(Some('\\'), self.next_input_code_point()) => {
                    self.consume_an_escaped_code_point();
                }
                Some(_) => {}
            }
        }
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point
    fn consume_an_escaped_code_point(&mut self) -> char {
        match self.consume_next_input_code_point() {
            Some(code_point @ definition!(hex_digit)) => {
                let mut hex = code_point.to_string();
                while hex.len() < 6 {
                    match self.next_input_code_point() {
                        Some(digit @ definition!(hex_digit)) => {
                            hex.push(digit);
                            self.consume_next_input_code_point();
                        }
                        _ => break,
                    }
                }
                if matches!(self.next_input_code_point(), Some(definition!(whitespace))) {
                    self.consume_next_input_code_point();
                }

                u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|value| *value != 0 && *value <= MAXIMUM_ALLOWED_CODE_POINT)
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            None => {
                log_parse_error!("EOF in escape");
                char::REPLACEMENT_CHARACTER
            }
            Some(code_point) => code_point,
        }
    }

    fn stream_starts_with_an_ident_sequence(&self) -> bool {
        would_start_an_ident_sequence(self.peek(0), self.peek(1), self.peek(2))
    }

    fn stream_starts_with_a_number(&self) -> bool {
        would_start_a_number(self.peek(0), self.peek(1), self.peek(2))
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-name
    fn consume_an_ident_sequence(&mut self) -> String {
        let mut result = String::new();

        while let Some(code_point) = self.consume_next_input_code_point() {
            match code_point {
                definition!(ident_code_point) => result.push(code_point),
                '\\' if is_valid_escape(Some(code_point), self.next_input_code_point()) => {
                    result.push(self.consume_an_escaped_code_point());
                }
                _ => {
                    self.reconsume_current_input_code_point();
                    return result;
                }
            }
        }

        // Leave the position on the last code point so the next consume sees EOF.
        self.reconsume_current_input_code_point();
        result
    }

    // https://www.w3.org/TR/css-syntax-3/#consume-number
    fn consume_a_number(&mut self) -> (f32, NumberType) {
        let mut number_type = NumberType::Integer;
        let mut repr = String::new();

        if let Some(sign @ ('+' | '-')) = self.next_input_code_point() {
            repr.push(sign);
            self.consume_next_input_code_point();
        }

        self.consume_digits_into(&mut repr);

        if self.peek(1) == Some('.') && matches!(self.peek(2), Some(definition!(digit))) {
            repr.push('.');
            self.consume_next_input_code_point();
            number_type = NumberType::Number;
            self.consume_digits_into(&mut repr);
        }

        if let Some(e @ ('E' | 'e')) = self.peek(1) {
            let exponent_len = match (self.peek(2), self.peek(3)) {
                (Some(definition!(digit)), _) => Some(1),
                (Some('+' | '-'), Some(definition!(digit))) => Some(2),
                _ => None,
            };
            if let Some(exponent_len) = exponent_len {
                repr.push(e);
                self.consume_next_input_code_point();
                if exponent_len == 2 {
                    if let Some(sign) = self.consume_next_input_code_point() {
                        repr.push(sign);
                    }
                }
                number_type = NumberType::Number;
                self.consume_digits_into(&mut repr);
            }
        }

        let value = repr.parse::<f32>().unwrap_or_else(|_| {
            log_parse_error!(format!("'{repr}' is not a number"));
            0.0
        });
        (value, number_type)
    }

    fn consume_digits_into(&mut self, repr: &mut String) {
        while let Some(digit @ definition!(digit)) = self.next_input_code_point() {
            repr.push(digit);
            self.consume_next_input_code_point();
        }
    }

    fn consume_as_much_whitespace_as_possible(&mut self) {
        while matches!(self.next_input_code_point(), Some(definition!(whitespace))) {
            self.consume_next_input_code_point();
        }
    }
}

// https://www.w3.org/TR/css-syntax-3/#input-preprocessing
fn preprocess(input: &str) -> String {
    input
        .replace("\r\n", "\n")
        .replace(['\r', '\u{000C}'], "\n")
        .replace('\u{0000}', "\u{FFFD}")
}

// https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && !matches!(second, Some(definition!(newline)) | None)
}

// https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier
fn would_start_an_ident_sequence(first: Option<char>, second: Option<char>, third: Option<char>) -> bool {
    match first {
        Some('-') => {
            matches!(second, Some(definition!(ident_start_code_point) | '-'))
                || is_valid_escape(second, third)
        }
        Some(definition!(ident_start_code_point)) => true,
        Some('\\') => is_valid_escape(first, second),
        _ => false,
    }
}

// https://www.w3.org/TR/css-syntax-3/#starts-with-a-number
fn would_start_a_number(first: Option<char>, second: Option<char>, third: Option<char>) -> bool {
    match first {
        Some('+' | '-') => match second {
            Some(definition!(digit)) => true,
            Some('.') => matches!(third, Some(definition!(digit))),
            _ => false,
        },
        Some('.') => matches!(second, Some(definition!(digit))),
        Some(definition!(digit)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{HashType, NumberType, Token, Tokenizer};

    fn ident(value: &str) -> Token {
        Token::Ident {
            value: value.to_string(),
        }
    }

    #[test]
    fn simple_rule() {
        let tokens = Tokenizer::new("div{color:red}").tokenize();
        assert_eq!(
            tokens,
            vec![
                ident("div"),
                Token::LeftCurlyBracket,
                ident("color"),
                Token::Colon,
                ident("red"),
                Token::RightCurlyBracket,
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn comments_are_dropped() {
        let tokens = Tokenizer::new("/* web-component styles */a/**/b").tokenize();
        assert_eq!(tokens, vec![ident("a"), ident("b"), Token::EndOfFile]);

        let tokens = Tokenizer::new("a /* unterminated").tokenize();
        assert_eq!(tokens, vec![ident("a"), Token::Whitespace, Token::EndOfFile]);
    }

    #[test]
    fn numbers_and_dimensions() {
        let tokens = Tokenizer::new("2px 0.87 50% -1e2").tokenize();
        assert_eq!(
            tokens,
            vec![
                Token::Dimension {
                    value: 2.0,
                    number_type: NumberType::Integer,
                    unit: "px".to_string()
                },
                Token::Whitespace,
                Token::Number {
                    value: 0.87,
                    number_type: NumberType::Number
                },
                Token::Whitespace,
                Token::Percentage { value: 50.0 },
                Token::Whitespace,
                Token::Number {
                    value: -100.0,
                    number_type: NumberType::Number
                },
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn hashes_functions_and_at_keywords() {
        let tokens = Tokenizer::new("#00FF00 rgba( @media :host").tokenize();
        assert_eq!(
            tokens,
            vec![
                Token::Hash {
                    value: "00FF00".to_string(),
                    hash_type: HashType::Unrestricted
                },
                Token::Whitespace,
                Token::Function {
                    value: "rgba".to_string()
                },
                Token::Whitespace,
                Token::AtKeyword {
                    value: "media".to_string()
                },
                Token::Whitespace,
                Token::Colon,
                ident("host"),
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn strings_and_urls() {
        let tokens = Tokenizer::new(r#""a\"b" url( img.png ) url("x")"#).tokenize();
        assert_eq!(
            tokens[0],
            Token::String {
                value: "a\"b".to_string()
            }
        );
        assert_eq!(
            tokens[2],
            Token::Url {
                value: "img.png".to_string()
            }
        );
        assert_eq!(
            tokens[4],
            Token::Function {
                value: "url".to_string()
            }
        );
    }

    #[test]
    fn escapes_in_idents() {
        let tokens = Tokenizer::new(r"\41 b").tokenize();
        assert_eq!(tokens, vec![ident("Ab"), Token::EndOfFile]);
    }
}
