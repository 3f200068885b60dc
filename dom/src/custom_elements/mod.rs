//! https://html.spec.whatwg.org/multipage/custom-elements.html

pub use callbacks::{AttributeChange, LifecycleCallbacks};
pub use definition::{CustomElementDefinition, ElementDefinitionOptions};
pub use name::is_valid_custom_element_name;
pub use registry::CustomElementRegistry;

mod callbacks;
mod definition;
mod name;
mod reactions;
mod registry;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomElementError {
    #[error("'{0}' is not a valid custom element name")]
    InvalidName(String),
    #[error("a custom element named '{0}' has already been defined")]
    DuplicateRegistration(String),
    #[error("the stylesheet of '{0}' is not a constructed stylesheet and can not be adopted")]
    NotConstructedStyleSheet(String),
}

impl From<CustomElementError> for crate::DomException {
    fn from(value: CustomElementError) -> Self {
        match value {
            CustomElementError::InvalidName(_) => crate::ErrorName::SyntaxError.into(),
            CustomElementError::DuplicateRegistration(_) => crate::DomException::new(
                crate::ErrorName::NotSupportedError,
                "A custom element with this name has already been defined.",
            ),
            CustomElementError::NotConstructedStyleSheet(_) => crate::DomException::new(
                crate::ErrorName::NotAllowedError,
                "Only constructed stylesheets can be adopted.",
            ),
        }
    }
}
