use std::collections::VecDeque;

use crate::character_references::NAMED_CHARACTER_REFERENCES;

mod character_references;

macro_rules! on {
    ($c:expr) => {
        Some($c)
    };
}

macro_rules! on_whitespace {
    () => {
        on!('\t') | // Tab
        on!('\n') | // Line Feed
        on!('\u{000c}') | // Form Feed
        on!(' ') // Space
    };
}

macro_rules! on_null {
    () => {
        on!('\u{0000}')
    };
}

macro_rules! on_anything_else {
    () => {
        Some(_)
    };
    ($c:ident) => {
        Some($c)
    };
}

macro_rules! on_eof {
    () => {
        None
    };
}

macro_rules! on_ascii_upper_alpha {
    ($c:ident) => {
        Some($c @ 'A'..='Z')
    };
}

macro_rules! on_ascii_alpha {
    () => {
        Some('A'..='Z') | Some('a'..='z')
    };
}

macro_rules! log_parse_error {
    ($message:expr) => {
        tracing::warn!(target: "tokenizer", "parse error: {}", $message)
    };
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
    BogusComment,
    MarkupDeclarationOpen,
    CommentStart,
    CommentStartDash,
    Comment,
    CommentEndDash,
    CommentEnd,
    Doctype,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Doctype {
        name: Option<String>,
        force_quirks: bool,
    },
    StartTag {
        name: String,
        self_closing: bool,
        attributes: Vec<Attribute>,
    },
    EndTag {
        name: String,
    },
    Comment {
        data: String,
    },
    Character {
        data: char,
    },
    EndOfFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Splits HTML markup into tokens.
///
/// Only the states needed for fragment markup are implemented: there is no
/// RCDATA, RAWTEXT or script data handling, and doctypes are collapsed into
/// a single state that keeps the name.
#[derive(Debug)]
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    state: State,
    current_input_character: Option<char>,
    current_token: Option<Token>,
    current_attribute: Option<Attribute>,
    pending: VecDeque<Token>,
    eof_emitted: bool,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        // https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream
        let input = input.replace("\r\n", "\n").replace('\r', "\n");
        Self {
            input: input.chars().collect(),
            position: 0,
            state: State::Data,
            current_input_character: None,
            current_token: None,
            current_attribute: None,
            pending: VecDeque::new(),
            eof_emitted: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    fn consume_next_input_character(&mut self) {
        self.current_input_character = self.input.get(self.position).copied();
        self.position += 1;
    }

    fn next_characters_are(&self, chars: &str, case_insensitive: bool) -> bool {
        let len = chars.chars().count();
        let Some(next) = self.input.get(self.position..self.position + len) else {
            return false;
        };
        let next: String = next.iter().collect();
        match case_insensitive {
            true => chars.eq_ignore_ascii_case(&next),
            false => chars == next,
        }
    }

    fn consume_characters(&mut self, chars: &str) {
        self.position += chars.chars().count();
    }

    fn switch_to(&mut self, state: State) {
        self.state = state;
    }

    fn reconsume_in(&mut self, state: State) {
        self.position -= 1;
        self.switch_to(state);
    }

    fn emit_token(&mut self, token: Token) {
        tracing::trace!(target: "tokenizer", ?token, "emit");
        if token == Token::EndOfFile {
            self.eof_emitted = true;
        }
        self.pending.push_back(token);
    }

    fn emit_character(&mut self, data: char) {
        self.emit_token(Token::Character { data });
    }

    fn set_current_token(&mut self, token: Token) {
        self.current_token = Some(token);
    }

    fn push_current_attribute_to_current_tag(&mut self) {
        let Some(attribute) = self.current_attribute.take() else {
            return;
        };
        if let Some(Token::StartTag { attributes, .. }) = &mut self.current_token {
            // When the user agent leaves the attribute name state, if there is already an
            // attribute on the token with the exact same name, the new attribute is dropped.
            if attributes.iter().any(|a| a.name == attribute.name) {
                log_parse_error!(format!("duplicate-attribute '{}'", attribute.name));
                return;
            }
            attributes.push(attribute);
        }
    }

    fn set_current_attribute(&mut self, name: &str) {
        self.push_current_attribute_to_current_tag();
        self.current_attribute = Some(Attribute {
            name: name.to_string(),
            value: String::new(),
        });
    }

    fn emit_current_token(&mut self) {
        self.push_current_attribute_to_current_tag();
        if let Some(token) = self.current_token.take() {
            self.emit_token(token);
        }
    }

    fn append_to_tag_name(&mut self, c: char) {
        if let Some(Token::StartTag { name, .. } | Token::EndTag { name }) = &mut self.current_token
        {
            name.push(c);
        }
    }

    fn append_to_attribute_name(&mut self, c: char) {
        if let Some(attribute) = &mut self.current_attribute {
            attribute.name.push(c);
        }
    }

    fn append_to_attribute_value(&mut self, s: &str) {
        if let Some(attribute) = &mut self.current_attribute {
            attribute.value.push_str(s);
        }
    }

    fn append_to_comment(&mut self, s: &str) {
        if let Some(Token::Comment { data }) = &mut self.current_token {
            data.push_str(s);
        }
    }

    // https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state
    // Called right after the '&' was consumed. Returns the characters the reference stands for,
    // or a lone '&' when nothing matched.
    fn consume_a_character_reference(&mut self) -> String {
        if self.next_characters_are("#", false) {
            return self.consume_a_numeric_character_reference();
        }

        for (name, value) in NAMED_CHARACTER_REFERENCES {
            if self.next_characters_are(name, false) {
                self.consume_characters(name);
                return value.to_string();
            }
        }

        "&".to_string()
    }

    // https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state
    fn consume_a_numeric_character_reference(&mut self) -> String {
        let start = self.position;
        self.consume_characters("#");

        let radix = match self.input.get(self.position) {
            Some('x') | Some('X') => {
                self.position += 1;
                16
            }
            _ => 10,
        };

        let mut digits = String::new();
        while let Some(c) = self.input.get(self.position) {
            if !c.is_digit(radix) {
                break;
            }
            digits.push(*c);
            self.position += 1;
        }

        if digits.is_empty() {
            log_parse_error!("absence-of-digits-in-numeric-character-reference");
            self.position = start;
            return "&".to_string();
        }

        if self.next_characters_are(";", false) {
            self.consume_characters(";");
        } else {
            log_parse_error!("missing-semicolon-after-character-reference");
        }

        let character = u32::from_str_radix(&digits, radix)
            .ok()
            .filter(|code| *code != 0)
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        character.to_string()
    }

    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }

            if self.eof_emitted {
                return None;
            }

            self.step();
        }
    }

    fn step(&mut self) {
        self.consume_next_input_character();
        match self.state {
            // https://html.spec.whatwg.org/multipage/parsing.html#data-state
            State::Data => match self.current_input_character {
                on!('&') => {
                    for c in self.consume_a_character_reference().chars() {
                        self.emit_character(c);
                    }
                }
                on!('<') => self.switch_to(State::TagOpen),
                on_null!() => {
                    log_parse_error!("unexpected-null-character");
                    self.emit_character('\u{0000}');
                }
                on_eof!() => self.emit_token(Token::EndOfFile),
                on_anything_else!(c) => self.emit_character(c),
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state
            State::TagOpen => match self.current_input_character {
                on!('!') => self.switch_to(State::MarkupDeclarationOpen),
                on!('/') => self.switch_to(State::EndTagOpen),
                on_ascii_alpha!() => {
                    self.set_current_token(Token::StartTag {
                        name: String::new(),
                        self_closing: false,
                        attributes: Vec::new(),
                    });
                    self.reconsume_in(State::TagName);
                }
                on!('?') => {
                    log_parse_error!("unexpected-question-mark-instead-of-tag-name");
                    self.set_current_token(Token::Comment {
                        data: String::new(),
                    });
                    self.reconsume_in(State::BogusComment);
                }
                on_eof!() => {
                    log_parse_error!("eof-before-tag-name");
                    self.emit_character('<');
                    self.emit_token(Token::EndOfFile);
                }
                on_anything_else!() => {
                    log_parse_error!("invalid-first-character-of-tag-name");
                    self.emit_character('<');
                    self.reconsume_in(State::Data);
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state
            State::EndTagOpen => match self.current_input_character {
                on_ascii_alpha!() => {
                    self.set_current_token(Token::EndTag {
                        name: String::new(),
                    });
                    self.reconsume_in(State::TagName);
                }
                on!('>') => {
                    log_parse_error!("missing-end-tag-name");
                    self.switch_to(State::Data);
                }
                on_eof!() => {
                    log_parse_error!("eof-before-tag-name");
                    self.emit_character('<');
                    self.emit_character('/');
                    self.emit_token(Token::EndOfFile);
                }
                on_anything_else!() => {
                    log_parse_error!("invalid-first-character-of-tag-name");
                    self.set_current_token(Token::Comment {
                        data: String::new(),
                    });
                    self.reconsume_in(State::BogusComment);
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state
            State::TagName => match self.current_input_character {
                on_whitespace!() => self.switch_to(State::BeforeAttributeName),
                on!('/') => self.switch_to(State::SelfClosingStartTag),
                on!('>') => {
                    self.switch_to(State::Data);
                    self.emit_current_token();
                }
                on_ascii_upper_alpha!(c) => self.append_to_tag_name(c.to_ascii_lowercase()),
                on_null!() => {
                    log_parse_error!("unexpected-null-character");
                    self.append_to_tag_name(char::REPLACEMENT_CHARACTER);
                }
                on_eof!() => {
                    log_parse_error!("eof-in-tag");
                    self.emit_token(Token::EndOfFile);
                }
                on_anything_else!(c) => self.append_to_tag_name(c),
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state
            State::BeforeAttributeName => match self.current_input_character {
                on_whitespace!() => {}
                on!('/') | on!('>') | on_eof!() => self.reconsume_in(State::AfterAttributeName),
                on!('=') => {
                    log_parse_error!("unexpected-equals-sign-before-attribute-name");
                    self.set_current_attribute("=");
                    self.switch_to(State::AttributeName);
                }
                on_anything_else!() => {
                    self.set_current_attribute("");
                    self.reconsume_in(State::AttributeName);
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state
            State::AttributeName => match self.current_input_character {
                on_whitespace!() | on!('/') | on!('>') | on_eof!() => {
                    self.reconsume_in(State::AfterAttributeName)
                }
                on!('=') => self.switch_to(State::BeforeAttributeValue),
                on_ascii_upper_alpha!(c) => self.append_to_attribute_name(c.to_ascii_lowercase()),
                on_null!() => {
                    log_parse_error!("unexpected-null-character");
                    self.append_to_attribute_name(char::REPLACEMENT_CHARACTER);
                }
                on_anything_else!(c) => {
                    if let '"' | '\'' | '<' = c {
                        log_parse_error!("unexpected-character-in-attribute-name");
                    }
                    self.append_to_attribute_name(c);
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state
            State::AfterAttributeName => match self.current_input_character {
                on_whitespace!() => {}
                on!('/') => self.switch_to(State::SelfClosingStartTag),
                on!('=') => self.switch_to(State::BeforeAttributeValue),
                on!('>') => {
                    self.switch_to(State::Data);
                    self.emit_current_token();
                }
                on_eof!() => {
                    log_parse_error!("eof-in-tag");
                    self.emit_token(Token::EndOfFile);
                }
                on_anything_else!() => {
                    self.set_current_attribute("");
                    self.reconsume_in(State::AttributeName);
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state
            State::BeforeAttributeValue => match self.current_input_character {
                on_whitespace!() => {}
                on!('"') => self.switch_to(State::AttributeValueDoubleQuoted),
                on!('\'') => self.switch_to(State::AttributeValueSingleQuoted),
                on!('>') => {
                    log_parse_error!("missing-attribute-value");
                    self.switch_to(State::Data);
                    self.emit_current_token();
                }
                _ => self.reconsume_in(State::AttributeValueUnquoted),
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state
            // https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state
            State::AttributeValueDoubleQuoted | State::AttributeValueSingleQuoted => {
                let quote = match self.state {
                    State::AttributeValueDoubleQuoted => '"',
                    _ => '\'',
                };
                match self.current_input_character {
                    Some(c) if c == quote => self.switch_to(State::AfterAttributeValueQuoted),
                    on!('&') => {
                        let value = self.consume_a_character_reference();
                        self.append_to_attribute_value(&value);
                    }
                    on_null!() => {
                        log_parse_error!("unexpected-null-character");
                        self.append_to_attribute_value("\u{FFFD}");
                    }
                    on_eof!() => {
                        log_parse_error!("eof-in-tag");
                        self.emit_token(Token::EndOfFile);
                    }
                    on_anything_else!(c) => self.append_to_attribute_value(&c.to_string()),
                }
            }
            // https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state
            State::AttributeValueUnquoted => match self.current_input_character {
                on_whitespace!() => self.switch_to(State::BeforeAttributeName),
                on!('&') => {
                    let value = self.consume_a_character_reference();
                    self.append_to_attribute_value(&value);
                }
                on!('>') => {
                    self.switch_to(State::Data);
                    self.emit_current_token();
                }
                on_null!() => {
                    log_parse_error!("unexpected-null-character");
                    self.append_to_attribute_value("\u{FFFD}");
                }
                on_eof!() => {
                    log_parse_error!("eof-in-tag");
                    self.emit_token(Token::EndOfFile);
                }
                on_anything_else!(c) => {
                    if let '"' | '\'' | '<' | '=' | '`' = c {
                        log_parse_error!("unexpected-character-in-unquoted-attribute-value");
                    }
                    self.append_to_attribute_value(&c.to_string());
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state
            State::AfterAttributeValueQuoted => match self.current_input_character {
                on_whitespace!() => self.switch_to(State::BeforeAttributeName),
                on!('/') => self.switch_to(State::SelfClosingStartTag),
                on!('>') => {
                    self.switch_to(State::Data);
                    self.emit_current_token();
                }
                on_eof!() => {
                    log_parse_error!("eof-in-tag");
                    self.emit_token(Token::EndOfFile);
                }
                on_anything_else!() => {
                    log_parse_error!("missing-whitespace-between-attributes");
                    self.reconsume_in(State::BeforeAttributeName);
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state
            State::SelfClosingStartTag => match self.current_input_character {
                on!('>') => {
                    if let Some(Token::StartTag { self_closing, .. }) = &mut self.current_token {
                        *self_closing = true;
                    }
                    self.switch_to(State::Data);
                    self.emit_current_token();
                }
                on_eof!() => {
                    log_parse_error!("eof-in-tag");
                    self.emit_token(Token::EndOfFile);
                }
                on_anything_else!() => {
                    log_parse_error!("unexpected-solidus-in-tag");
                    self.reconsume_in(State::BeforeAttributeName);
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state
            State::BogusComment => match self.current_input_character {
                on!('>') => {
                    self.switch_to(State::Data);
                    self.emit_current_token();
                }
                on_eof!() => {
                    self.emit_current_token();
                    self.emit_token(Token::EndOfFile);
                }
                on_null!() => self.append_to_comment("\u{FFFD}"),
                on_anything_else!(c) => self.append_to_comment(&c.to_string()),
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state
            State::MarkupDeclarationOpen => {
                // This state looks ahead instead of consuming.
                self.position -= 1;
                if self.next_characters_are("--", false) {
                    self.consume_characters("--");
                    self.set_current_token(Token::Comment {
                        data: String::new(),
                    });
                    self.switch_to(State::CommentStart);
                } else if self.next_characters_are("DOCTYPE", true) {
                    self.consume_characters("DOCTYPE");
                    self.set_current_token(Token::Doctype {
                        name: None,
                        force_quirks: false,
                    });
                    self.switch_to(State::Doctype);
                } else {
                    log_parse_error!("incorrectly-opened-comment");
                    self.set_current_token(Token::Comment {
                        data: String::new(),
                    });
                    self.switch_to(State::BogusComment);
                }
            }
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state
            State::CommentStart => match self.current_input_character {
                on!('-') => self.switch_to(State::CommentStartDash),
                on!('>') => {
                    log_parse_error!("abrupt-closing-of-empty-comment");
                    self.switch_to(State::Data);
                    self.emit_current_token();
                }
                _ => self.reconsume_in(State::Comment),
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state
            State::CommentStartDash => match self.current_input_character {
                on!('-') => self.switch_to(State::CommentEnd),
                on!('>') => {
                    log_parse_error!("abrupt-closing-of-empty-comment");
                    self.switch_to(State::Data);
                    self.emit_current_token();
                }
                on_eof!() => {
                    log_parse_error!("eof-in-comment");
                    self.emit_current_token();
                    self.emit_token(Token::EndOfFile);
                }
                on_anything_else!() => {
                    self.append_to_comment("-");
                    self.reconsume_in(State::Comment);
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-state
            State::Comment => match self.current_input_character {
                on!('-') => self.switch_to(State::CommentEndDash),
                on_null!() => {
                    log_parse_error!("unexpected-null-character");
                    self.append_to_comment("\u{FFFD}");
                }
                on_eof!() => {
                    log_parse_error!("eof-in-comment");
                    self.emit_current_token();
                    self.emit_token(Token::EndOfFile);
                }
                on_anything_else!(c) => self.append_to_comment(&c.to_string()),
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state
            State::CommentEndDash => match self.current_input_character {
                on!('-') => self.switch_to(State::CommentEnd),
                on_eof!() => {
                    log_parse_error!("eof-in-comment");
                    self.emit_current_token();
                    self.emit_token(Token::EndOfFile);
                }
                on_anything_else!() => {
                    self.append_to_comment("-");
                    self.reconsume_in(State::Comment);
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state
            State::CommentEnd => match self.current_input_character {
                on!('>') => {
                    self.switch_to(State::Data);
                    self.emit_current_token();
                }
                on!('-') => self.append_to_comment("-"),
                on_eof!() => {
                    log_parse_error!("eof-in-comment");
                    self.emit_current_token();
                    self.emit_token(Token::EndOfFile);
                }
                on_anything_else!() => {
                    self.append_to_comment("--");
                    self.reconsume_in(State::Comment);
                }
            },
            // FIXME: Public and system identifiers are skipped, only the name is kept.
            State::Doctype => match self.current_input_character {
                on!('>') => {
                    self.switch_to(State::Data);
                    self.emit_current_token();
                }
                on_eof!() => {
                    log_parse_error!("eof-in-doctype");
                    if let Some(Token::Doctype { force_quirks, .. }) = &mut self.current_token {
                        *force_quirks = true;
                    }
                    self.emit_current_token();
                    self.emit_token(Token::EndOfFile);
                }
                on_whitespace!() => {
                    if let Some(Token::Doctype { name: Some(_), .. }) = &self.current_token {
                        // Everything after the name is ignored.
                        self.skip_until('>');
                    }
                }
                on_anything_else!(c) => {
                    if let Some(Token::Doctype { name, .. }) = &mut self.current_token {
                        name.get_or_insert_with(String::new)
                            .push(c.to_ascii_lowercase());
                    }
                }
            },
        }
    }

    fn skip_until(&mut self, c: char) {
        while let Some(next) = self.input.get(self.position) {
            if *next == c {
                break;
            }
            self.position += 1;
        }
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Attribute, Token, Tokenizer};

    fn tokenize(input: &str) -> Vec<Token> {
        Tokenizer::new(input).collect()
    }

    fn text(tokens: &[Token]) -> String {
        tokens
            .iter()
            .filter_map(|token| match token {
                Token::Character { data } => Some(*data),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn carriage_returns_become_line_feeds() {
        let tokens = tokenize("<p\rid=a>x\r\ny\rz</p>");
        assert_eq!(
            tokens[0],
            Token::StartTag {
                name: "p".to_string(),
                self_closing: false,
                attributes: vec![Attribute {
                    name: "id".to_string(),
                    value: "a".to_string()
                }],
            }
        );
        assert_eq!(text(&tokens), "x\ny\nz");
    }

    #[test]
    fn start_tag_with_attributes() {
        let tokens = tokenize(r#"<DIV class="a" data-attr='b' hidden id=c>"#);
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "div".to_string(),
                    self_closing: false,
                    attributes: vec![
                        Attribute {
                            name: "class".to_string(),
                            value: "a".to_string()
                        },
                        Attribute {
                            name: "data-attr".to_string(),
                            value: "b".to_string()
                        },
                        Attribute {
                            name: "hidden".to_string(),
                            value: String::new()
                        },
                        Attribute {
                            name: "id".to_string(),
                            value: "c".to_string()
                        },
                    ],
                },
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn duplicate_attribute_is_dropped() {
        let tokens = tokenize(r#"<p a="1" a="2">"#);
        let Token::StartTag { attributes, .. } = &tokens[0] else {
            panic!("expected a start tag, got {:?}", tokens[0]);
        };
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].value, "1");
    }

    #[test]
    fn self_closing_and_end_tags() {
        let tokens = tokenize("<br/><h1>Hi</h1>");
        assert_eq!(
            tokens[0],
            Token::StartTag {
                name: "br".to_string(),
                self_closing: true,
                attributes: vec![],
            }
        );
        assert_eq!(text(&tokens), "Hi");
        assert!(tokens.contains(&Token::EndTag {
            name: "h1".to_string()
        }));
        assert_eq!(tokens.last(), Some(&Token::EndOfFile));
    }

    #[test]
    fn comments() {
        assert_eq!(
            tokenize("<!-- slot goes here -->"),
            vec![
                Token::Comment {
                    data: " slot goes here ".to_string()
                },
                Token::EndOfFile
            ]
        );
        assert_eq!(
            tokenize("<!-a-b->"),
            vec![
                Token::Comment {
                    data: "-a-b-".to_string()
                },
                Token::EndOfFile
            ]
        );
    }

    #[test]
    fn doctype_keeps_name() {
        let tokens = tokenize("<!DOCTYPE HTML>");
        assert_eq!(
            tokens[0],
            Token::Doctype {
                name: Some("html".to_string()),
                force_quirks: false
            }
        );
    }

    #[test]
    fn character_references() {
        assert_eq!(text(&tokenize("a &amp; b &lt;&#65;&#x42;")), "a & b <AB");
        assert_eq!(text(&tokenize("&unknown; &#;")), "&unknown; &#;");

        let tokens = tokenize(r#"<a title="&quot;x&quot;">"#);
        let Token::StartTag { attributes, .. } = &tokens[0] else {
            panic!("expected a start tag");
        };
        assert_eq!(attributes[0].value, "\"x\"");
    }

    #[test]
    fn lone_less_than_sign_is_text() {
        assert_eq!(text(&tokenize("1 < 2")), "1 < 2");
    }
}
