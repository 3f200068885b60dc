use std::rc::Rc;

use crate::arena::NodeRef;
use crate::document::Document;
use crate::element::CustomElementState;
use crate::node::Node;
use crate::{DomException, ErrorName};

use super::{AttributeChange, CustomElementDefinition};

impl<'a> Node<'a> {
    /// https://html.spec.whatwg.org/multipage/custom-elements.html#concept-upgrade-an-element
    pub(crate) fn upgrade(
        &'a self,
        definition: Rc<CustomElementDefinition>,
    ) -> Result<(), DomException> {
        let Some(element) = self.as_element() else {
            return Err(ErrorName::NotSupportedError.into());
        };

        // 1. If element's custom element state is not "undefined" or "uncustomized", then return.
        if !matches!(
            element.custom_element_state(),
            CustomElementState::Undefined | CustomElementState::Uncustomized
        ) {
            return Ok(());
        }

        // 2. Set element's custom element definition to definition.
        *element.custom_element_definition.borrow_mut() = Some(definition.clone());

        // 3. Set element's custom element state to "failed".
        element.custom_element_state.set(CustomElementState::Failed);

        // 8. Run the constructor. If it fails, set element's custom element definition to null and rethrow.
        if let Err(exception) = self.construct(&definition) {
            *element.custom_element_definition.borrow_mut() = None;
            tracing::warn!(
                element = element.local_name(),
                %exception,
                "constructing custom element failed"
            );
            return Err(exception);
        }

        // 9. Set element's custom element state to "custom".
        element.custom_element_state.set(CustomElementState::Custom);

        // 4. For each attribute in element's attribute list, in order, enqueue a custom element callback reaction
        //    with element, callback name "attributeChangedCallback", and « attribute's local name, null, attribute's value ».
        let attributes = element.attributes().clone();
        for attribute in attributes {
            if definition.observes(&attribute.name) {
                let change = AttributeChange {
                    name: attribute.name,
                    old_value: None,
                    new_value: Some(attribute.value),
                };
                definition
                    .lifecycle_callbacks()
                    .attribute_changed(self, &change);
            }
        }

        // 5. If element is connected, then enqueue a custom element callback reaction with element, callback name "connectedCallback".
        if self.is_connected() {
            definition.lifecycle_callbacks().connected(self);
        }

        Ok(())
    }

    /// Builds the instance's isolated scope: a shadow root that adopts the
    /// definition's stylesheet and holds a fresh copy of its template.
    ///
    /// A template that contains its own element (directly or through other
    /// definitions) fails the nested construction instead of recursing.
    fn construct(&'a self, definition: &CustomElementDefinition) -> Result<(), DomException> {
        if definition.constructing.get() {
            return Err(DomException::new(
                ErrorName::InvalidStateError,
                "The element is already being constructed further up the tree.",
            ));
        }
        let Some(document) = Document::of(self) else {
            return Err(ErrorName::InvalidStateError.into());
        };

        let shadow_root =
            self.attach_a_shadow_root(definition.element_options().shadow_root_mode)?;
        shadow_root.adopt_style_sheet(definition.style_sheet().clone())?;

        let content = {
            let _constructing = Constructing::enter(definition);
            definition.template().instantiate(document)?
        };
        shadow_root.append_child(content)?;

        definition.lifecycle_callbacks().constructed(self);
        Ok(())
    }

    /// https://html.spec.whatwg.org/multipage/custom-elements.html#concept-try-upgrade
    pub(crate) fn try_to_upgrade(&'a self) {
        let Some(element) = self.as_element() else {
            return;
        };
        let Some(registry) = self.registry() else {
            return;
        };

        // 1. Let definition be the result of looking up a custom element definition given element's node document,
        //    element's namespace, element's local name, and element's is value.
        // 2. If definition is not null, then enqueue a custom element upgrade reaction given element and definition.
        if let Some(definition) = registry.look_up(element.namespace(), element.local_name()) {
            if let Err(exception) = self.upgrade(definition) {
                tracing::warn!(element = element.local_name(), %exception, "upgrade failed");
            }
        }
    }

    /// Runs `connected` for a custom element, or tries to upgrade an element that is not custom yet.
    pub(crate) fn react_to_connection(&'a self) {
        match self.custom_element_definition() {
            Some(definition) => definition.lifecycle_callbacks().connected(self),
            None => self.try_to_upgrade(),
        }
    }

    pub(crate) fn react_to_disconnection(&'a self) {
        if let Some(definition) = self.custom_element_definition() {
            definition.lifecycle_callbacks().disconnected(self);
        }
    }

    pub(crate) fn react_to_adoption(&'a self, old_document: NodeRef<'a>, new_document: NodeRef<'a>) {
        if let Some(definition) = self.custom_element_definition() {
            definition
                .lifecycle_callbacks()
                .adopted(self, old_document, new_document);
        }
    }
}

/// Marks a definition as under construction until dropped, panics included.
struct Constructing<'d>(&'d CustomElementDefinition);

impl<'d> Constructing<'d> {
    fn enter(definition: &'d CustomElementDefinition) -> Self {
        definition.constructing.set(true);
        Constructing(definition)
    }
}

impl Drop for Constructing<'_> {
    fn drop(&mut self) {
        self.0.constructing.set(false);
    }
}
