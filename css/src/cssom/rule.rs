use std::fmt;

use crate::parser::types::{serialize_component_values, AtRule, QualifiedRule, Rule};

use super::{CssDeclaration, CssStyleDeclaration};

/// 6.4. CSS Rules
/// https://drafts.csswg.org/cssom/#css-rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssRule {
    Style(CssStyleRule),
    At(CssAtRule),
}

impl CssRule {
    pub fn as_style_rule(&self) -> Option<&CssStyleRule> {
        match self {
            CssRule::Style(rule) => Some(rule),
            CssRule::At(_) => None,
        }
    }

    pub fn is_import(&self) -> bool {
        matches!(self, CssRule::At(rule) if rule.name.eq_ignore_ascii_case("import"))
    }

    // https://drafts.csswg.org/cssom/#serialize-a-css-rule
    pub fn css_text(&self) -> String {
        self.to_string()
    }
}

impl From<&Rule> for CssRule {
    fn from(rule: &Rule) -> Self {
        match rule {
            Rule::QualifiedRule(rule) => CssRule::Style(CssStyleRule::from(rule)),
            Rule::AtRule(rule) => CssRule::At(CssAtRule::from(rule)),
        }
    }
}

/// https://drafts.csswg.org/cssom/#the-cssstylerule-interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssStyleRule {
    pub selector_text: String,
    pub style: CssStyleDeclaration,
    pub css_rules: Vec<CssRule>,
}

impl From<&QualifiedRule> for CssStyleRule {
    fn from(rule: &QualifiedRule) -> Self {
        Self {
            selector_text: serialize_component_values(&rule.prelude),
            style: CssStyleDeclaration::new(rule.declarations.iter().map(CssDeclaration::from).collect()),
            css_rules: rule.child_rules.iter().map(CssRule::from).collect(),
        }
    }
}

/// Any at-rule (`@media`, `@import`, `@font-face`, ...), kept with its prelude and block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssAtRule {
    pub name: String,
    pub prelude: String,
    pub block: Option<(CssStyleDeclaration, Vec<CssRule>)>,
}

impl From<&AtRule> for CssAtRule {
    fn from(rule: &AtRule) -> Self {
        Self {
            name: rule.name.clone(),
            prelude: serialize_component_values(&rule.prelude),
            block: rule.has_block.then(|| {
                (
                    CssStyleDeclaration::new(rule.declarations.iter().map(CssDeclaration::from).collect()),
                    rule.child_rules.iter().map(CssRule::from).collect(),
                )
            }),
        }
    }
}

fn write_block(
    f: &mut fmt::Formatter<'_>,
    style: &CssStyleDeclaration,
    rules: &[CssRule],
) -> fmt::Result {
    write!(f, "{{")?;
    if !style.is_empty() {
        write!(f, " {}", style.css_text())?;
    }
    for rule in rules {
        write!(f, " {rule}")?;
    }
    write!(f, " }}")
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssRule::Style(rule) => {
                write!(f, "{} ", rule.selector_text)?;
                write_block(f, &rule.style, &rule.css_rules)
            }
            CssRule::At(rule) => {
                write!(f, "@{}", rule.name)?;
                if !rule.prelude.is_empty() {
                    write!(f, " {}", rule.prelude)?;
                }
                match &rule.block {
                    Some((style, rules)) => {
                        write!(f, " ")?;
                        write_block(f, style, rules)
                    }
                    None => write!(f, ";"),
                }
            }
        }
    }
}
