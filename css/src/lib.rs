pub use cssom::{CssAtRule, CssDeclaration, CssRule, CssStyleDeclaration, CssStyleRule, CssStyleSheet};

macro_rules! log_parse_error {
    ($message:expr) => {
        tracing::warn!(target: "css", "parse error ({}:{}): {}", file!(), line!(), $message)
    };
}
pub(crate) use log_parse_error;

pub mod cssom;
pub mod parser;
pub mod tokenizer;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("failed to parse '{0}' as a single rule")]
    Syntax(String),
    #[error("index {index} is out of range for a rule list of length {length}")]
    IndexSize { index: usize, length: usize },
    #[error("{0}")]
    NotAllowed(&'static str),
}
