use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::arena::NodeLink;
use crate::custom_elements::{AttributeChange, CustomElementDefinition};
use crate::node::Node;
use crate::{Attribute, DomException, ErrorName, Namespace};

/// https://dom.spec.whatwg.org/#concept-element-custom-element-state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomElementState {
    /// A valid custom element name without a definition yet.
    Undefined,
    /// The definition's construction failed.
    Failed,
    /// An ordinary element.
    Uncustomized,
    /// Upgraded with a definition.
    Custom,
}

pub struct ElementData<'a> {
    namespace: Namespace,
    local_name: String,
    pub(crate) attributes: RefCell<Vec<Attribute>>,
    pub(crate) shadow_root: NodeLink<'a>,
    pub(crate) custom_element_state: Cell<CustomElementState>,
    pub(crate) custom_element_definition: RefCell<Option<Rc<CustomElementDefinition>>>,
}

impl ElementData<'_> {
    pub(crate) fn new(local_name: &str, state: CustomElementState) -> Self {
        Self {
            namespace: Namespace::Html,
            local_name: local_name.to_string(),
            attributes: RefCell::new(Vec::new()),
            shadow_root: Cell::new(None),
            custom_element_state: Cell::new(state),
            custom_element_definition: RefCell::new(None),
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn attributes(&self) -> Ref<'_, Vec<Attribute>> {
        self.attributes.borrow()
    }

    pub fn custom_element_state(&self) -> CustomElementState {
        self.custom_element_state.get()
    }

    pub fn custom_element_definition(&self) -> Option<Rc<CustomElementDefinition>> {
        self.custom_element_definition.borrow().clone()
    }

    /// https://dom.spec.whatwg.org/#concept-element-custom
    pub fn is_custom(&self) -> bool {
        self.custom_element_state() == CustomElementState::Custom
    }

    /// https://dom.spec.whatwg.org/#concept-element-defined
    pub fn is_defined(&self) -> bool {
        matches!(
            self.custom_element_state(),
            CustomElementState::Uncustomized | CustomElementState::Custom
        )
    }
}

impl fmt::Debug for ElementData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("local_name", &self.local_name)
            .field("attributes", &self.attributes.borrow())
            .field("custom_element_state", &self.custom_element_state.get())
            .field("has_shadow_root", &self.shadow_root.get().is_some())
            .finish()
    }
}

/// https://html.spec.whatwg.org/multipage/syntax.html#attributes-2
pub(crate) fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_ascii_whitespace() || matches!(c, '\0' | '/' | '>' | '='))
}

/// https://dom.spec.whatwg.org/#valid-element-local-name
pub(crate) fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            !chars.any(|c| c.is_ascii_whitespace() || matches!(c, '\0' | '/' | '>'))
        }
        _ => false,
    }
}

impl<'a> Node<'a> {
    pub fn local_name(&self) -> Option<&str> {
        self.as_element().map(|element| element.local_name())
    }

    pub fn custom_element_state(&self) -> Option<CustomElementState> {
        self.as_element()
            .map(|element| element.custom_element_state())
    }

    /// The definition of a custom element. `None` unless the element has been upgraded.
    pub fn custom_element_definition(&self) -> Option<Rc<CustomElementDefinition>> {
        self.as_element()
            .filter(|element| element.is_custom())
            .and_then(|element| element.custom_element_definition())
    }

    /// https://dom.spec.whatwg.org/#dom-element-getattribute
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let element = self.as_element()?;
        let name = name.to_ascii_lowercase();
        element
            .attributes()
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.clone())
    }

    /// https://dom.spec.whatwg.org/#dom-element-hasattribute
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// https://dom.spec.whatwg.org/#dom-element-getattributenames
    pub fn attribute_names(&self) -> Vec<String> {
        self.as_element()
            .map(|element| {
                element
                    .attributes()
                    .iter()
                    .map(|attribute| attribute.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// https://dom.spec.whatwg.org/#dom-element-setattribute
    pub fn set_attribute(&'a self, name: &str, value: &str) -> Result<(), DomException> {
        let Some(element) = self.as_element() else {
            return Err(DomException::new(
                ErrorName::NotSupportedError,
                "Only elements carry attributes.",
            ));
        };

        // 1. If qualifiedName is not a valid attribute local name, then throw an "InvalidCharacterError" DOMException.
        if !is_valid_attribute_name(name) {
            return Err(ErrorName::InvalidCharacterError.into());
        }

        // 2. If this is in the HTML namespace, then set qualifiedName to qualifiedName in ASCII lowercase.
        let name = name.to_ascii_lowercase();

        // 3-5. Change the attribute if it exists, otherwise append a new one.
        let old_value = {
            let mut attributes = element.attributes.borrow_mut();
            match attributes.iter_mut().find(|attribute| attribute.name == name) {
                Some(attribute) => Some(std::mem::replace(
                    &mut attribute.value,
                    value.to_string(),
                )),
                None => {
                    attributes.push(Attribute::new(name.as_str(), value));
                    None
                }
            }
        };

        self.handle_attribute_changes(&name, old_value, Some(value.to_string()));
        Ok(())
    }

    /// https://dom.spec.whatwg.org/#dom-element-removeattribute
    ///
    /// Returns the removed value, if there was one.
    pub fn remove_attribute(&'a self, name: &str) -> Option<String> {
        let element = self.as_element()?;
        let name = name.to_ascii_lowercase();

        let removed = {
            let mut attributes = element.attributes.borrow_mut();
            let index = attributes
                .iter()
                .position(|attribute| attribute.name == name)?;
            attributes.remove(index)
        };

        self.handle_attribute_changes(&name, Some(removed.value.clone()), None);
        Some(removed.value)
    }

    /// https://dom.spec.whatwg.org/#dom-element-toggleattribute
    pub fn toggle_attribute(&'a self, name: &str, force: Option<bool>) -> Result<bool, DomException> {
        if !is_valid_attribute_name(name) {
            return Err(ErrorName::InvalidCharacterError.into());
        }

        match (self.has_attribute(name), force) {
            (false, None | Some(true)) => {
                self.set_attribute(name, "")?;
                Ok(true)
            }
            (true, None | Some(false)) => {
                self.remove_attribute(name);
                Ok(false)
            }
            (present, Some(_)) => Ok(present),
        }
    }

    /// https://dom.spec.whatwg.org/#handle-attribute-changes
    fn handle_attribute_changes(
        &'a self,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) {
        // If element is custom, then enqueue a custom element callback reaction with element,
        // callback name "attributeChangedCallback", and « attribute's local name, oldValue, newValue, attribute's namespace ».
        let Some(definition) = self.custom_element_definition() else {
            return;
        };
        if !definition.observes(name) {
            return;
        }

        let change = AttributeChange {
            name: name.to_string(),
            old_value,
            new_value,
        };
        definition.lifecycle_callbacks().attribute_changed(self, &change);
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_attribute_name, is_valid_element_name};

    #[test]
    fn attribute_names() {
        assert!(is_valid_attribute_name("data-attr"));
        assert!(is_valid_attribute_name("aria-label"));
        assert!(!is_valid_attribute_name(""));
        assert!(!is_valid_attribute_name("a b"));
        assert!(!is_valid_attribute_name("a=b"));
        assert!(!is_valid_attribute_name("a/"));
    }

    #[test]
    fn element_names() {
        assert!(is_valid_element_name("div"));
        assert!(is_valid_element_name("web-component"));
        assert!(!is_valid_element_name(""));
        assert!(!is_valid_element_name("1div"));
        assert!(!is_valid_element_name("di v"));
        assert!(!is_valid_element_name("a>"));
    }
}
