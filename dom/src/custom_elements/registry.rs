use std::cell::RefCell;
use std::rc::Rc;

use crate::arena::NodeRef;
use crate::Namespace;

use super::{is_valid_custom_element_name, CustomElementDefinition, CustomElementError};

/// https://html.spec.whatwg.org/multipage/custom-elements.html#customelementregistry
///
/// An explicit registry value. It is handed to every [`crate::Document`] that
/// should know about its definitions, so independent registries can coexist
/// (one per test, for example). Each name can be defined exactly once and a
/// definition never changes afterwards.
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    definitions: RefCell<Vec<Rc<CustomElementDefinition>>>,
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// https://html.spec.whatwg.org/multipage/custom-elements.html#dom-customelementregistry-define
    ///
    /// Elements created before the definition existed are not upgraded here;
    /// see [`CustomElementRegistry::upgrade`].
    pub fn define(
        &self,
        definition: CustomElementDefinition,
    ) -> Result<Rc<CustomElementDefinition>, CustomElementError> {
        let name = definition.name().to_string();

        // 2. If name is not a valid custom element name, then throw a "SyntaxError" DOMException.
        if !is_valid_custom_element_name(&name) {
            return Err(CustomElementError::InvalidName(name));
        }

        // 3. If this's custom element definition set contains an item with name name, then throw a "NotSupportedError" DOMException.
        if self.is_defined(&name) {
            return Err(CustomElementError::DuplicateRegistration(name));
        }

        // Every instance adopts the stylesheet, which only works for constructed sheets.
        if !definition.style_sheet().constructed() {
            return Err(CustomElementError::NotConstructedStyleSheet(name));
        }

        let definition = Rc::new(definition);
        self.definitions.borrow_mut().push(definition.clone());
        tracing::info!(
            name = %name,
            observed_attributes = ?definition.observed_attribute_names(),
            "defined custom element"
        );
        Ok(definition)
    }

    /// https://html.spec.whatwg.org/multipage/custom-elements.html#dom-customelementregistry-get
    pub fn get(&self, name: &str) -> Option<Rc<CustomElementDefinition>> {
        self.definitions
            .borrow()
            .iter()
            .find(|definition| definition.name() == name)
            .cloned()
    }

    /// https://html.spec.whatwg.org/multipage/custom-elements.html#dom-customelementregistry-getname
    pub fn get_name(&self, definition: &Rc<CustomElementDefinition>) -> Option<String> {
        self.definitions
            .borrow()
            .iter()
            .find(|defined| Rc::ptr_eq(defined, definition))
            .map(|defined| defined.name().to_string())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Defined names, in definition order.
    pub fn names(&self) -> Vec<String> {
        self.definitions
            .borrow()
            .iter()
            .map(|definition| definition.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.borrow().is_empty()
    }

    /// https://html.spec.whatwg.org/multipage/custom-elements.html#look-up-a-custom-element-definition
    pub(crate) fn look_up(
        &self,
        namespace: Namespace,
        local_name: &str,
    ) -> Option<Rc<CustomElementDefinition>> {
        // 2. If namespace is not the HTML namespace, then return null.
        if namespace != Namespace::Html {
            return None;
        }

        self.definitions
            .borrow()
            .iter()
            .find(|definition| definition.local_name() == local_name)
            .cloned()
    }

    /// https://html.spec.whatwg.org/multipage/custom-elements.html#dom-customelementregistry-upgrade
    ///
    /// Upgrades every shadow-including inclusive descendant of `root` that has a
    /// definition in this registry, in shadow-including tree order.
    pub fn upgrade(&self, root: NodeRef<'_>) {
        for candidate in root.shadow_including_inclusive_descendants() {
            let Some(element) = candidate.as_element() else {
                continue;
            };
            let Some(definition) = self.look_up(element.namespace(), element.local_name()) else {
                continue;
            };
            if let Err(exception) = candidate.upgrade(definition) {
                tracing::warn!(element = element.local_name(), %exception, "upgrade failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use css::CssStyleSheet;

    use super::CustomElementRegistry;
    use crate::{CustomElementDefinition, CustomElementError, Template};

    fn definition(name: &str) -> CustomElementDefinition {
        CustomElementDefinition::new(name, CssStyleSheet::new(), Template::default())
    }

    #[test]
    fn define_and_query() {
        let registry = CustomElementRegistry::new();
        assert!(registry.is_empty());

        let defined = registry.define(definition("web-component")).unwrap();
        registry.define(definition("other-component")).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.is_defined("web-component"));
        assert!(!registry.is_defined("missing-component"));
        assert!(Rc::ptr_eq(&registry.get("web-component").unwrap(), &defined));
        assert_eq!(registry.get_name(&defined).as_deref(), Some("web-component"));
        assert_eq!(registry.names(), ["web-component", "other-component"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let registry = CustomElementRegistry::new();
        registry.define(definition("web-component")).unwrap();

        assert_eq!(
            registry.define(definition("web-component")).unwrap_err(),
            CustomElementError::DuplicateRegistration("web-component".to_string())
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn invalid_names_are_rejected() {
        let registry = CustomElementRegistry::new();
        for name in ["div", "Web-Component", "font-face", ""] {
            assert_eq!(
                registry.define(definition(name)).unwrap_err(),
                CustomElementError::InvalidName(name.to_string())
            );
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn located_style_sheets_are_rejected() {
        let registry = CustomElementRegistry::new();
        let style_sheet = CssStyleSheet::from_location("component.css", ":host { display: block; }");

        assert_eq!(
            registry
                .define(CustomElementDefinition::new(
                    "web-component",
                    style_sheet,
                    Template::default()
                ))
                .unwrap_err(),
            CustomElementError::NotConstructedStyleSheet("web-component".to_string())
        );
        assert!(!registry.is_defined("web-component"));
    }

    #[test]
    fn registries_are_independent() {
        let a = CustomElementRegistry::new();
        let b = CustomElementRegistry::new();
        a.define(definition("web-component")).unwrap();

        assert!(b.define(definition("web-component")).is_ok());
        assert!(Rc::ptr_eq(&a.get("web-component").unwrap(), &a.get("web-component").unwrap()));
    }
}
