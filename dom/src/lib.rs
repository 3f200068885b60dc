//! An arena backed DOM with shadow roots and custom elements.
//!
//! Nodes live in a [`typed_arena::Arena`] and link to each other through
//! [`arena::NodeRef`]s. A [`Document`] carries the [`CustomElementRegistry`]
//! it was created with, so elements created through it (or inserted into it)
//! are upgraded as soon as their definition is known.

pub use custom_elements::{
    AttributeChange, CustomElementDefinition, CustomElementError, CustomElementRegistry,
    ElementDefinitionOptions, LifecycleCallbacks,
};
pub use document::Document;
pub use element::{CustomElementState, ElementData};
pub use idl::dom_exception::{DomException, ErrorName};
pub use node::{CharacterDataVariant, Node, NodeData};
pub use shadow_root::{ShadowRootData, ShadowRootInit, ShadowRootMode};
pub use template::{Template, TemplateNode};

pub mod arena;
pub mod custom_elements;
pub mod document;
pub mod element;
pub mod idl;
pub mod mutation_algorithms;
pub mod node;
pub mod shadow_root;
pub mod template;

/// https://infra.spec.whatwg.org/#namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Html,
    MathMl,
    Svg,
}

impl Namespace {
    pub fn url(&self) -> &'static str {
        match self {
            Namespace::Html => "http://www.w3.org/1999/xhtml",
            Namespace::MathMl => "http://www.w3.org/1998/Math/MathML",
            Namespace::Svg => "http://www.w3.org/2000/svg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl From<tokenizer::Attribute> for Attribute {
    fn from(value: tokenizer::Attribute) -> Self {
        Attribute::new(value.name, value.value)
    }
}
