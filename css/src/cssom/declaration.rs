use std::fmt;

use crate::parser::types::{serialize_component_values, Declaration};

/// 6.5 Declarations
/// https://drafts.csswg.org/cssom/#css-declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssDeclaration {
    pub property_name: String,
    pub value: String,
    pub important: bool,
}

impl From<&Declaration> for CssDeclaration {
    fn from(declaration: &Declaration) -> Self {
        Self {
            // Custom properties are case-sensitive, everything else is matched ASCII case-insensitively.
            property_name: match declaration.name.starts_with("--") {
                true => declaration.name.clone(),
                false => declaration.name.to_ascii_lowercase(),
            },
            value: serialize_component_values(&declaration.value),
            important: declaration.important,
        }
    }
}

// https://drafts.csswg.org/cssom/#serialize-a-css-declaration
impl fmt::Display for CssDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property_name, self.value)?;
        if self.important {
            write!(f, " !important")?;
        }
        write!(f, ";")
    }
}

/// 6.6 CSS Declaration Blocks
/// https://drafts.csswg.org/cssom/#css-declaration-blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssStyleDeclaration {
    declarations: Vec<CssDeclaration>,
}

impl CssStyleDeclaration {
    pub fn new(declarations: Vec<CssDeclaration>) -> Self {
        Self { declarations }
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CssDeclaration> {
        self.declarations.iter()
    }

    // https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertyvalue
    // The last declaration of a property wins.
    pub fn get_property_value(&self, property: &str) -> Option<&str> {
        self.find(property).map(|declaration| declaration.value.as_str())
    }

    // https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertypriority
    pub fn get_property_priority(&self, property: &str) -> Option<&'static str> {
        self.find(property)
            .map(|declaration| match declaration.important {
                true => "important",
                false => "",
            })
    }

    fn find(&self, property: &str) -> Option<&CssDeclaration> {
        self.declarations.iter().rev().find(|declaration| {
            match property.starts_with("--") {
                true => declaration.property_name == property,
                false => declaration.property_name.eq_ignore_ascii_case(property),
            }
        })
    }

    // https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|declaration| declaration.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
