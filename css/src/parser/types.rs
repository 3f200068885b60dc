use std::fmt;

use crate::tokenizer::Token;

/// https://drafts.csswg.org/css-syntax-3/#css-stylesheet
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub location: Option<String>,
    pub rules: Vec<Rule>,
}

impl StyleSheet {
    pub fn new(location: Option<&str>) -> Self {
        Self {
            location: location.map(|s| s.to_string()),
            rules: vec![],
        }
    }
}

/// https://drafts.csswg.org/css-syntax-3/#css-rule
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    AtRule(AtRule),
    QualifiedRule(QualifiedRule),
}

/// https://drafts.csswg.org/css-syntax-3/#at-rule
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    pub name: String,
    pub prelude: Vec<ComponentValue>,
    pub declarations: Vec<Declaration>,
    pub child_rules: Vec<Rule>,
    pub has_block: bool,
}

/// https://www.w3.org/TR/css-syntax-3/#qualified-rule
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedRule {
    pub prelude: Vec<ComponentValue>,
    pub declarations: Vec<Declaration>,
    pub child_rules: Vec<Rule>,
}

/// https://drafts.csswg.org/css-syntax-3/#declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: Vec<ComponentValue>,
    pub important: bool,
}

/// https://www.w3.org/TR/css-syntax-3/#component-value
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// https://www.w3.org/TR/css-syntax-3/#preserved-tokens
    PreservedToken(Token),
    /// https://drafts.csswg.org/css-syntax-3/#function
    Function(Function),
    /// https://www.w3.org/TR/css-syntax-3/#simple-block
    SimpleBlock(SimpleBlock),
}

impl ComponentValue {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, ComponentValue::PreservedToken(Token::Whitespace))
    }
}

/// https://drafts.csswg.org/css-syntax-3/#function
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub value: Vec<ComponentValue>,
}

/// https://www.w3.org/TR/css-syntax-3/#simple-block
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleBlock {
    pub associated_token: Token,
    pub values: Vec<ComponentValue>,
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentValue::PreservedToken(token) => write!(f, "{token}"),
            ComponentValue::Function(function) => {
                write!(f, "{}(", function.name)?;
                for value in &function.value {
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
            ComponentValue::SimpleBlock(block) => {
                write!(f, "{}", block.associated_token)?;
                for value in &block.values {
                    write!(f, "{value}")?;
                }
                match block.associated_token.mirror() {
                    Some(ending) => write!(f, "{ending}"),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Serializes a list of component values, collapsing the surrounding whitespace.
pub fn serialize_component_values(values: &[ComponentValue]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<String>()
        .trim()
        .to_string()
}
