use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    EndOfFile,

    Ident {
        value: String,
    },
    Function {
        value: String,
    },
    AtKeyword {
        value: String,
    },
    Hash {
        value: String,
        hash_type: HashType,
    },
    String {
        value: String,
    },
    BadString,
    Url {
        value: String,
    },
    BadUrl,
    Delim {
        value: char,
    },
    Number {
        value: f32,
        number_type: NumberType,
    },
    Percentage {
        value: f32,
    },
    Dimension {
        value: f32,
        number_type: NumberType,
        unit: String,
    },
    Whitespace,
    Cdo,
    Cdc,
    Colon,
    Semicolon,
    Comma,
    LeftSquareBracket,
    RightSquareBracket,
    LeftParenthesis,
    RightParenthesis,
    LeftCurlyBracket,
    RightCurlyBracket,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberType {
    Integer,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashType {
    Id,
    Unrestricted,
}

impl Token {
    /// The token that closes a simple block opened by this token.
    pub fn mirror(&self) -> Option<Token> {
        match self {
            Token::LeftCurlyBracket => Some(Token::RightCurlyBracket),
            Token::LeftSquareBracket => Some(Token::RightSquareBracket),
            Token::LeftParenthesis => Some(Token::RightParenthesis),
            _ => None,
        }
    }
}

// https://drafts.csswg.org/cssom/#serialize-a-css-value
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::EndOfFile | Token::BadString | Token::BadUrl => Ok(()),
            Token::Ident { value } => write!(f, "{value}"),
            Token::Function { value } => write!(f, "{value}("),
            Token::AtKeyword { value } => write!(f, "@{value}"),
            Token::Hash { value, .. } => write!(f, "#{value}"),
            Token::String { value } => write!(f, "\"{}\"", value.replace('"', "\\\"")),
            Token::Url { value } => write!(f, "url({value})"),
            Token::Delim { value } => write!(f, "{value}"),
            Token::Number { value, .. } => write!(f, "{value}"),
            Token::Percentage { value } => write!(f, "{value}%"),
            Token::Dimension { value, unit, .. } => write!(f, "{value}{unit}"),
            Token::Whitespace => write!(f, " "),
            Token::Cdo => write!(f, "<!--"),
            Token::Cdc => write!(f, "-->"),
            Token::Colon => write!(f, ":"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::LeftSquareBracket => write!(f, "["),
            Token::RightSquareBracket => write!(f, "]"),
            Token::LeftParenthesis => write!(f, "("),
            Token::RightParenthesis => write!(f, ")"),
            Token::LeftCurlyBracket => write!(f, "{{"),
            Token::RightCurlyBracket => write!(f, "}}"),
        }
    }
}
