//! https://dom.spec.whatwg.org/#mutation-algorithms
//!
//! Custom element reactions run synchronously from here: `connected` after an
//! insertion connects an element, `disconnected` after a removal disconnects it
//! and `adopted` after it moves to another document.

use crate::arena::NodeRef;
use crate::document::Document;
use crate::node::{Node, NodeData};
use crate::{DomException, ErrorName};

impl<'a> Node<'a> {
    /// https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity
    pub fn ensure_pre_insertion_validity(
        &'a self,
        node: NodeRef<'a>,
        child: Option<NodeRef<'a>>,
    ) -> Result<(), DomException> {
        // 1. If parent is not a Document, DocumentFragment, or Element node, then throw a "HierarchyRequestError" DOMException.
        if !self.is_document()
            && !self.is_document_fragment()
            && !self.is_shadow_root()
            && !self.is_element()
        {
            return Err(ErrorName::HierarchyRequestError.into());
        }

        // 2. If node is a host-including inclusive ancestor of parent, then throw a "HierarchyRequestError" DOMException.
        if node.is_host_including_inclusive_ancestor_of(self) {
            return Err(DomException::new(
                ErrorName::HierarchyRequestError,
                "The new child is an ancestor of the parent.",
            ));
        }

        // 3. If child is non-null and its parent is not parent, then throw a "NotFoundError" DOMException.
        if let Some(child) = child {
            if !Node::are_same_optional(child.parent(), Some(self)) {
                return Err(DomException::new(
                    ErrorName::NotFoundError,
                    "The reference child is not a child of this node.",
                ));
            }
        }

        // 4. If node is not a DocumentFragment, DocumentType, Element, or CharacterData node, then throw a "HierarchyRequestError" DOMException.
        if !node.is_document_fragment() && !node.is_element() && !node.is_character_data() {
            return Err(ErrorName::HierarchyRequestError.into());
        }

        // 5. If either node is a Text node and parent is a document, or node is a doctype and parent is not a document,
        //    then throw a "HierarchyRequestError" DOMException.
        if node.is_text() && self.is_document() {
            return Err(ErrorName::HierarchyRequestError.into());
        }

        // 6. If parent is a document, and any of the statements below, switched on the interface node implements,
        //    are true, then throw a "HierarchyRequestError" DOMException.
        if self.is_document() {
            let parent_has_element_child = self.children().iter().any(|child| child.is_element());
            let invalid = match &node.data {
                NodeData::DocumentFragment => {
                    let element_children = node
                        .children()
                        .iter()
                        .filter(|child| child.is_element())
                        .count();
                    // If node has more than one element child or has a Text node child.
                    element_children > 1
                        || node.children().iter().any(|child| child.is_text())
                        // Otherwise, if node has one element child and parent has an element child.
                        || (element_children == 1 && parent_has_element_child)
                }
                // parent has an element child.
                NodeData::Element(_) => parent_has_element_child,
                _ => false,
            };
            if invalid {
                return Err(DomException::new(
                    ErrorName::HierarchyRequestError,
                    "A document can only have one document element.",
                ));
            }
        }

        Ok(())
    }

    /// https://dom.spec.whatwg.org/#concept-node-pre-insert
    pub fn pre_insert(
        &'a self,
        node: NodeRef<'a>,
        child: Option<NodeRef<'a>>,
    ) -> Result<NodeRef<'a>, DomException> {
        // 1. Ensure pre-insertion validity of node into parent before child.
        self.ensure_pre_insertion_validity(node, child)?;

        // 2. Let referenceChild be child.
        // 3. If referenceChild is node, then set referenceChild to node's next sibling.
        let reference_child = match child {
            Some(child) if Node::are_same(child, node) => node.next_sibling(),
            _ => child,
        };

        // 4. Insert node into parent before referenceChild.
        self.insert(node, reference_child);

        // 5. Return node.
        Ok(node)
    }

    /// https://dom.spec.whatwg.org/#dom-node-appendchild
    pub fn append_child(&'a self, node: NodeRef<'a>) -> Result<NodeRef<'a>, DomException> {
        self.pre_insert(node, None)
    }

    /// https://dom.spec.whatwg.org/#dom-node-insertbefore
    pub fn insert_before(
        &'a self,
        node: NodeRef<'a>,
        child: Option<NodeRef<'a>>,
    ) -> Result<NodeRef<'a>, DomException> {
        self.pre_insert(node, child)
    }

    /// https://dom.spec.whatwg.org/#concept-node-insert
    pub(crate) fn insert(&'a self, node: NodeRef<'a>, child: Option<NodeRef<'a>>) {
        // 1. Let nodes be node's children, if node is a DocumentFragment node; otherwise « node ».
        let nodes = match node.is_document_fragment() {
            true => node.child_nodes(),
            false => vec![node],
        };

        // 3. If count is 0, then return.
        if nodes.is_empty() {
            return;
        }

        // 4. If node is a DocumentFragment node, then remove its children with the suppress observers flag set.
        if node.is_document_fragment() {
            for fragment_child in &nodes {
                fragment_child.remove_from_parent();
            }
        }

        let document = self.node_document();

        // 7. For each node in nodes, in tree order:
        for node in nodes {
            // 7.1. Adopt node into parent's node document.
            node.adopt_into(document);

            // 7.2. If child is null, then append node to parent's children.
            // 7.3. Otherwise, insert node into parent's children before child's index.
            {
                let mut children = self.children.borrow_mut();
                let index = child
                    .and_then(|child| children.iter().position(|c| Node::are_same(c, child)))
                    .unwrap_or(children.len());
                children.insert(index, node);
            }
            node.parent.set(Some(self));

            // 7.7. For each shadow-including inclusive descendant inclusiveDescendant of node, in shadow-including tree order:
            for inclusive_descendant in node.shadow_including_inclusive_descendants() {
                // 7.7.1. Run the insertion steps with inclusiveDescendant.
                // 7.7.2. If inclusiveDescendant is not connected, then continue.
                if !inclusive_descendant.is_connected() {
                    continue;
                }

                // 7.7.3. If inclusiveDescendant is an element: if it is custom, enqueue a custom element callback
                //        reaction with callback name "connectedCallback"; otherwise, try to upgrade it.
                if inclusive_descendant.is_element() {
                    inclusive_descendant.react_to_connection();
                }
            }
        }
    }

    /// https://dom.spec.whatwg.org/#concept-node-pre-remove
    pub fn remove_child(&'a self, child: NodeRef<'a>) -> Result<NodeRef<'a>, DomException> {
        // 1. If child's parent is not parent, then throw a "NotFoundError" DOMException.
        if !Node::are_same_optional(child.parent(), Some(self)) {
            return Err(DomException::new(
                ErrorName::NotFoundError,
                "The node to be removed is not a child of this node.",
            ));
        }

        // 2. Remove child.
        child.remove_from_parent();

        // 3. Return child.
        Ok(child)
    }

    /// https://dom.spec.whatwg.org/#dom-childnode-remove
    pub fn remove(&'a self) {
        self.remove_from_parent();
    }

    /// https://dom.spec.whatwg.org/#concept-node-remove
    pub(crate) fn remove_from_parent(&'a self) {
        // 1. Let parent be node's parent.
        // 2. Assert: parent is non-null.
        let Some(parent) = self.parent() else {
            return;
        };

        // 13. Let isParentConnected be parent's connected.
        let is_parent_connected = parent.is_connected();

        // 11. Remove node from its parent's children.
        parent
            .children
            .borrow_mut()
            .retain(|child| !Node::are_same(child, self));
        self.parent.set(None);

        if !is_parent_connected {
            return;
        }

        // 15. If node is custom and isParentConnected is true, then enqueue a custom element callback reaction
        //     with node, callback name "disconnectedCallback".
        // 16. For each shadow-including descendant descendant of node, in shadow-including tree order:
        //     If descendant is custom and isParentConnected is true, then enqueue a custom element callback
        //     reaction with descendant, callback name "disconnectedCallback".
        for inclusive_descendant in self.shadow_including_inclusive_descendants() {
            inclusive_descendant.react_to_disconnection();
        }
    }

    /// https://dom.spec.whatwg.org/#concept-node-adopt
    pub(crate) fn adopt_into(&'a self, document: NodeRef<'a>) {
        // 1. Let oldDocument be node's node document.
        let old_document = self.node_document();

        // 2. If node's parent is non-null, then remove node.
        if self.parent().is_some() {
            self.remove_from_parent();
        }

        // 3. If document is not oldDocument, then:
        if Node::are_same(document, old_document) {
            return;
        }

        let inclusive_descendants = self.shadow_including_inclusive_descendants();

        // 3.1. For each inclusiveDescendant in node's shadow-including inclusive descendants:
        //      Set inclusiveDescendant's node document to document.
        for inclusive_descendant in &inclusive_descendants {
            inclusive_descendant.document.set(Some(document));
        }

        // 3.2. For each inclusiveDescendant in node's shadow-including inclusive descendants that is custom,
        //      enqueue a custom element callback reaction with inclusiveDescendant, callback name "adoptedCallback",
        //      and « oldDocument, document ».
        for inclusive_descendant in &inclusive_descendants {
            inclusive_descendant.react_to_adoption(old_document, document);
        }
    }

    /// https://dom.spec.whatwg.org/#dom-node-clonenode
    pub fn clone_node(&'a self, deep: bool) -> Result<NodeRef<'a>, DomException> {
        let Some(document) = Document::of(self) else {
            return Err(ErrorName::NotSupportedError.into());
        };
        self.clone_into(document, deep)
    }

    /// https://dom.spec.whatwg.org/#concept-node-clone
    ///
    /// Custom elements are cloned by creating a new element with the same name,
    /// so the copy gets its own shadow root from its definition.
    pub(crate) fn clone_into(
        &'a self,
        document: Document<'a>,
        deep: bool,
    ) -> Result<NodeRef<'a>, DomException> {
        let copy = match &self.data {
            NodeData::Document(_) | NodeData::ShadowRoot(_) => {
                return Err(ErrorName::NotSupportedError.into());
            }
            NodeData::Element(element) => {
                let copy = document.create_an_element(element.local_name())?;
                let attributes = element.attributes().clone();
                for attribute in attributes {
                    copy.set_attribute(&attribute.name, &attribute.value)?;
                }
                copy
            }
            NodeData::DocumentFragment => document.create_document_fragment(),
            NodeData::CharacterData { data, variant } => {
                document.create_character_data(&data.borrow(), *variant)
            }
        };

        if deep {
            for child in self.child_nodes() {
                let child_copy = child.clone_into(document, true)?;
                copy.append_child(child_copy)?;
            }
        }

        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use typed_arena::Arena;

    use crate::{CustomElementRegistry, Document, ErrorName};

    #[test]
    fn append_and_remove() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));
        let parent = document.create_element("div").unwrap();
        let a = document.create_text_node("a");
        let b = document.create_text_node("b");

        parent.append_child(a).unwrap();
        parent.insert_before(b, Some(a)).unwrap();
        assert_eq!(parent.text_content().as_deref(), Some("ba"));
        assert!(b.next_sibling().is_some_and(|next| next.is_same_node(a)));
        assert!(a.previous_sibling().is_some_and(|previous| previous.is_same_node(b)));

        parent.remove_child(b).unwrap();
        assert_eq!(parent.text_content().as_deref(), Some("a"));
        assert!(b.parent().is_none());
    }

    #[test]
    fn inserting_before_itself_keeps_the_position() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));
        let parent = document.create_element("div").unwrap();
        let a = document.create_text_node("a");
        let b = document.create_text_node("b");
        parent.append_child(a).unwrap();
        parent.append_child(b).unwrap();

        parent.insert_before(a, Some(a)).unwrap();
        assert_eq!(parent.text_content().as_deref(), Some("ab"));
    }

    #[test]
    fn fragments_move_their_children() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));
        let fragment = document.create_document_fragment();
        fragment.append_child(document.create_text_node("a")).unwrap();
        fragment.append_child(document.create_text_node("b")).unwrap();
        let parent = document.create_element("p").unwrap();

        parent.append_child(fragment).unwrap();
        assert!(!fragment.has_child_nodes());
        assert_eq!(parent.children().len(), 2);
    }

    #[test]
    fn hierarchy_errors() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));
        let outer = document.create_element("div").unwrap();
        let inner = document.create_element("div").unwrap();
        outer.append_child(inner).unwrap();

        let error = inner.append_child(outer).unwrap_err();
        assert_eq!(error.name, ErrorName::HierarchyRequestError);

        let error = inner.append_child(inner).unwrap_err();
        assert_eq!(error.name, ErrorName::HierarchyRequestError);

        let text = document.create_text_node("text");
        let error = text.append_child(outer).unwrap_err();
        assert_eq!(error.name, ErrorName::HierarchyRequestError);

        let error = document
            .node()
            .append_child(document.create_text_node("x"))
            .unwrap_err();
        assert_eq!(error.name, ErrorName::HierarchyRequestError);

        let error = document
            .node()
            .append_child(document.create_element("html").unwrap())
            .unwrap_err();
        assert_eq!(error.name, ErrorName::HierarchyRequestError);
    }

    #[test]
    fn not_found_errors() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));
        let parent = document.create_element("div").unwrap();
        let stranger = document.create_element("span").unwrap();
        let node = document.create_text_node("x");

        let error = parent.insert_before(node, Some(stranger)).unwrap_err();
        assert_eq!(error.name, ErrorName::NotFoundError);

        let error = parent.remove_child(stranger).unwrap_err();
        assert_eq!(error.name, ErrorName::NotFoundError);
    }

    #[test]
    fn shadow_hosts_can_not_be_inserted_into_their_shadow_tree() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));
        let host = document.create_element("div").unwrap();
        let shadow_root = host.attach_shadow(Default::default()).unwrap();

        let error = shadow_root.append_child(host).unwrap_err();
        assert_eq!(error.name, ErrorName::HierarchyRequestError);
    }

    #[test]
    fn deep_clones_are_equal_but_distinct() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));
        let original = document
            .parse_fragment("<div class=\"card\"><h1>Title</h1><!-- note --></div>")
            .unwrap();

        let copy = original.clone_node(true).unwrap();
        assert_eq!(copy, original);
        assert!(!copy.is_same_node(original));

        let shallow = original.first_child().unwrap().clone_node(false).unwrap();
        assert_eq!(shallow.get_attribute("class").as_deref(), Some("card"));
        assert!(!shallow.has_child_nodes());
    }

    #[test]
    fn documents_and_shadow_roots_can_not_be_cloned() {
        let arena = Arena::new();
        let document = Document::new(&arena, Rc::new(CustomElementRegistry::new()));
        let host = document.create_element("div").unwrap();
        let shadow_root = host.attach_shadow(Default::default()).unwrap();

        assert_eq!(
            document.node().clone_node(true).unwrap_err().name,
            ErrorName::NotSupportedError
        );
        assert_eq!(
            shadow_root.clone_node(true).unwrap_err().name,
            ErrorName::NotSupportedError
        );
    }
}
