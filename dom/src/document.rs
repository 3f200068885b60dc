use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::arena::{Arena, NodeRef};
use crate::custom_elements::{is_valid_custom_element_name, CustomElementRegistry};
use crate::element::{is_valid_element_name, CustomElementState, ElementData};
use crate::node::{CharacterDataVariant, DocumentData, Node, NodeData};
use crate::template::Template;
use crate::{DomException, ErrorName, Namespace};

/// A handle to a document node.
///
/// Every node the document creates is allocated in the arena it was created
/// with, and elements are upgraded with definitions from its registry.
/// Documents exchange nodes (see [`Document::adopt_node`]) only when they
/// share the node lifetime `'a`; a moved node stays in the arena that
/// allocated it.
#[derive(Clone, Copy)]
pub struct Document<'a> {
    node: NodeRef<'a>,
    data: &'a DocumentData<'a>,
}

impl<'a> Document<'a> {
    /// Creates a document with an `<html>` root holding `<head>` and `<body>`.
    pub fn new(arena: Arena<'a>, registry: Rc<CustomElementRegistry>) -> Document<'a> {
        let node: NodeRef<'a> = arena.alloc(Node::new(
            None,
            NodeData::Document(DocumentData { arena, registry }),
        ));
        let NodeData::Document(data) = &node.data else {
            unreachable!("a document node was just allocated")
        };
        let document = Document { node, data };

        let html = document.create_uncustomized_element("html");
        let head = document.create_uncustomized_element("head");
        let body = document.create_uncustomized_element("body");
        html.insert(head, None);
        html.insert(body, None);
        node.insert(html, None);

        document
    }

    /// The document `node` belongs to, if that is a document node.
    pub fn of(node: NodeRef<'a>) -> Option<Document<'a>> {
        let node = node.node_document();
        match &node.data {
            NodeData::Document(data) => Some(Document { node, data }),
            _ => None,
        }
    }

    pub fn node(&self) -> NodeRef<'a> {
        self.node
    }

    pub fn arena(&self) -> Arena<'a> {
        self.data.arena
    }

    pub fn registry(&self) -> &Rc<CustomElementRegistry> {
        &self.data.registry
    }

    /// https://dom.spec.whatwg.org/#dom-document-documentelement
    pub fn document_element(&self) -> Option<NodeRef<'a>> {
        self.node
            .children()
            .iter()
            .find(|child| child.is_element())
            .copied()
    }

    /// https://html.spec.whatwg.org/multipage/dom.html#dom-document-head
    pub fn head(&self) -> Option<NodeRef<'a>> {
        self.document_element_child("head")
    }

    /// https://html.spec.whatwg.org/multipage/dom.html#dom-document-body
    pub fn body(&self) -> Option<NodeRef<'a>> {
        self.document_element_child("body")
    }

    fn document_element_child(&self, local_name: &str) -> Option<NodeRef<'a>> {
        let html = self
            .document_element()
            .filter(|element| element.is_element_with_tag("html"))?;
        let child = html
            .children()
            .iter()
            .find(|child| child.is_element_with_tag(local_name))
            .copied();
        child
    }

    fn alloc(&self, data: NodeData<'a>) -> NodeRef<'a> {
        self.data.arena.alloc(Node::new(Some(self.node), data))
    }

    fn create_uncustomized_element(&self, local_name: &str) -> NodeRef<'a> {
        self.alloc(NodeData::Element(ElementData::new(
            local_name,
            CustomElementState::Uncustomized,
        )))
    }

    /// https://dom.spec.whatwg.org/#dom-document-createelement
    pub fn create_element(&self, local_name: &str) -> Result<NodeRef<'a>, DomException> {
        // 1. If localName is not a valid element local name, then throw an "InvalidCharacterError" DOMException.
        if !is_valid_element_name(local_name) {
            return Err(ErrorName::InvalidCharacterError.into());
        }

        // 2. If this is an HTML document, then set localName to localName in ASCII lowercase.
        self.create_an_element(&local_name.to_ascii_lowercase())
    }

    /// https://dom.spec.whatwg.org/#concept-create-element
    ///
    /// Always runs with the synchronous custom elements flag set: an element
    /// with a definition is constructed before this returns. A failed
    /// construction is reported and the element is returned in the "failed"
    /// state.
    pub(crate) fn create_an_element(&self, local_name: &str) -> Result<NodeRef<'a>, DomException> {
        // 3. Let definition be the result of looking up a custom element definition.
        let definition = self.registry().look_up(Namespace::Html, local_name);

        match definition {
            // 6. Otherwise, if definition is non-null: create the element in the "undefined" state and
            //    upgrade it right away.
            Some(definition) => {
                let element = self.alloc(NodeData::Element(ElementData::new(
                    local_name,
                    CustomElementState::Undefined,
                )));
                // Failures are logged by the upgrade and leave the element "failed".
                let _ = element.upgrade(definition);
                Ok(element)
            }
            // 7. Otherwise: the state is "undefined" for valid custom element names, "uncustomized" otherwise.
            None => {
                let state = match is_valid_custom_element_name(local_name) {
                    true => CustomElementState::Undefined,
                    false => CustomElementState::Uncustomized,
                };
                Ok(self.alloc(NodeData::Element(ElementData::new(local_name, state))))
            }
        }
    }

    /// https://dom.spec.whatwg.org/#dom-document-createtextnode
    pub fn create_text_node(&self, data: &str) -> NodeRef<'a> {
        self.create_character_data(data, CharacterDataVariant::Text)
    }

    /// https://dom.spec.whatwg.org/#dom-document-createcomment
    pub fn create_comment(&self, data: &str) -> NodeRef<'a> {
        self.create_character_data(data, CharacterDataVariant::Comment)
    }

    pub(crate) fn create_character_data(
        &self,
        data: &str,
        variant: CharacterDataVariant,
    ) -> NodeRef<'a> {
        self.alloc(NodeData::CharacterData {
            data: RefCell::new(data.to_string()),
            variant,
        })
    }

    /// https://dom.spec.whatwg.org/#dom-document-createdocumentfragment
    pub fn create_document_fragment(&self) -> NodeRef<'a> {
        self.alloc(NodeData::DocumentFragment)
    }

    /// Parses `markup` into a new document fragment owned by this document.
    pub fn parse_fragment(&self, markup: &str) -> Result<NodeRef<'a>, DomException> {
        Template::parse(markup).instantiate(*self)
    }

    /// https://dom.spec.whatwg.org/#dom-document-importnode
    pub fn import_node(&self, node: NodeRef<'a>, deep: bool) -> Result<NodeRef<'a>, DomException> {
        node.clone_into(*self, deep)
    }

    /// https://dom.spec.whatwg.org/#dom-document-adoptnode
    pub fn adopt_node(&self, node: NodeRef<'a>) -> Result<NodeRef<'a>, DomException> {
        // 1. If node is a document, then throw a "NotSupportedError" DOMException.
        if node.is_document() {
            return Err(ErrorName::NotSupportedError.into());
        }

        // 2. If node is a shadow root, then throw a "HierarchyRequestError" DOMException.
        if node.is_shadow_root() {
            return Err(ErrorName::HierarchyRequestError.into());
        }

        // 4. Adopt node into this.
        node.adopt_into(self.node);

        // 5. Return node.
        Ok(node)
    }

    pub fn dump(&self) -> String {
        self.node.dump()
    }
}

impl fmt::Debug for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("children", &self.node.children())
            .field("registry", &self.data.registry.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use typed_arena::Arena;

    use crate::{CustomElementRegistry, CustomElementState, Document, ErrorName};

    #[test]
    fn new_documents_have_a_body() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));

        assert!(document.body().is_some());
        assert!(document.head().is_some());
        assert!(document.body().unwrap().is_connected());
        assert_eq!(document.dump(), "#document\n  <html>\n    <head>\n    <body>\n");
    }

    #[test]
    fn create_element_lowercases_and_validates() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));

        let element = document.create_element("DIV").unwrap();
        assert_eq!(element.local_name(), Some("div"));
        assert!(!element.is_connected());

        let error = document.create_element("not valid").unwrap_err();
        assert_eq!(error.name, ErrorName::InvalidCharacterError);
    }

    #[test]
    fn custom_element_states_without_a_definition() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));

        let undefined = document.create_element("web-component").unwrap();
        assert_eq!(
            undefined.custom_element_state(),
            Some(CustomElementState::Undefined)
        );
        assert!(undefined.shadow_root().is_none());

        let plain = document.create_element("span").unwrap();
        assert_eq!(
            plain.custom_element_state(),
            Some(CustomElementState::Uncustomized)
        );
    }

    #[test]
    fn adopting_moves_nodes_between_documents() {
        let arena = Arena::new();
        let registry = Rc::new(CustomElementRegistry::new());
        let first = Document::new(&arena, registry.clone());
        let second = Document::new(&arena, registry);

        let paragraph = first.create_element("p").unwrap();
        first.body().unwrap().append_child(paragraph).unwrap();

        second.adopt_node(paragraph).unwrap();
        assert!(paragraph.parent().is_none());
        assert!(paragraph.node_document().is_same_node(second.node()));

        let error = second.adopt_node(first.node()).unwrap_err();
        assert_eq!(error.name, ErrorName::NotSupportedError);
    }

    #[test]
    fn documents_on_separate_arenas_exchange_nodes() {
        let first_arena = Arena::new();
        let second_arena = Arena::new();
        let registry = Rc::new(CustomElementRegistry::new());
        let first = Document::new(&first_arena, registry.clone());
        let second = Document::new(&second_arena, registry);

        let paragraph = first.create_element("p").unwrap();
        second.body().unwrap().append_child(paragraph).unwrap();

        assert!(paragraph.node_document().is_same_node(second.node()));
        assert!(paragraph.is_connected());
        assert!(first.body().unwrap().first_child().is_none());
    }

    #[test]
    fn parse_fragment_builds_nodes() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));

        let fragment = document
            .parse_fragment("<p id=\"greeting\">Hello <b>world</b></p>")
            .unwrap();
        assert_eq!(fragment.text_content().as_deref(), Some("Hello world"));

        document.body().unwrap().append_child(fragment).unwrap();
        assert_eq!(
            document.dump(),
            concat!(
                "#document\n",
                "  <html>\n",
                "    <head>\n",
                "    <body>\n",
                "      <p id=\"greeting\">\n",
                "        #text \"Hello\"\n",
                "        <b>\n",
                "          #text \"world\"\n",
            )
        );
    }

    #[test]
    fn import_node_copies_into_another_document() {
        let arena = Arena::new();
        let registry = Rc::new(CustomElementRegistry::new());
        let first = Document::new(&arena, registry.clone());
        let second = Document::new(&arena, registry);

        let original = first.parse_fragment("<ul><li>one</li></ul>").unwrap();
        let copy = second.import_node(original, true).unwrap();

        assert_eq!(copy, original);
        assert!(copy.node_document().is_same_node(second.node()));
        assert!(original.node_document().is_same_node(first.node()));
    }
}
