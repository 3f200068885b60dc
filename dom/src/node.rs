use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::arena::{Arena, NodeLink, NodeRef};
use crate::custom_elements::CustomElementRegistry;
use crate::element::ElementData;
use crate::shadow_root::ShadowRootData;

/// A node in a document tree.
///
/// Equality (`==`) is structural, see [`Node::is_equal_node`]. Use
/// [`Node::are_same`] or [`Node::is_same_node`] for identity.
pub struct Node<'a> {
    pub(crate) document: NodeLink<'a>,
    pub(crate) parent: NodeLink<'a>,
    pub(crate) children: RefCell<Vec<NodeRef<'a>>>,
    pub data: NodeData<'a>,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        let data_matches = match (&self.data, &other.data) {
            (NodeData::Document(_), NodeData::Document(_)) => true,
            (NodeData::DocumentFragment, NodeData::DocumentFragment) => true,
            (NodeData::ShadowRoot(a), NodeData::ShadowRoot(b)) => a.mode() == b.mode(),
            (NodeData::Element(a), NodeData::Element(b)) => {
                let a_attributes = a.attributes();
                let b_attributes = b.attributes();
                a.namespace() == b.namespace()
                    && a.local_name() == b.local_name()
                    && a_attributes.len() == b_attributes.len()
                    && a_attributes
                        .iter()
                        .all(|attribute| b_attributes.contains(attribute))
            }
            (
                NodeData::CharacterData {
                    data: a_data,
                    variant: a_variant,
                },
                NodeData::CharacterData {
                    data: b_data,
                    variant: b_variant,
                },
            ) => a_variant == b_variant && *a_data.borrow() == *b_data.borrow(),
            _ => false,
        };

        let a_children = self.children.borrow();
        let b_children = other.children.borrow();
        data_matches
            && a_children.len() == b_children.len()
            && a_children.iter().zip(b_children.iter()).all(|(a, b)| a == b)
    }
}

impl<'a> Node<'a> {
    pub(crate) fn new(document: Option<NodeRef<'a>>, data: NodeData<'a>) -> Node<'a> {
        Node {
            document: Cell::new(document),
            parent: Cell::new(None),
            children: RefCell::new(Vec::new()),
            data,
        }
    }

    pub fn are_same(a: &Node<'a>, b: &Node<'a>) -> bool {
        std::ptr::eq(a, b)
    }

    pub fn are_same_optional(a: Option<NodeRef<'a>>, b: Option<NodeRef<'a>>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => Node::are_same(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// https://dom.spec.whatwg.org/#dom-node-issamenode
    pub fn is_same_node(&self, other: &Node<'a>) -> bool {
        std::ptr::eq(self, other)
    }

    /// https://dom.spec.whatwg.org/#dom-node-isequalnode
    pub fn is_equal_node(&self, other: &Node<'a>) -> bool {
        self == other
    }

    /// https://dom.spec.whatwg.org/#concept-node-document
    pub fn node_document(&'a self) -> NodeRef<'a> {
        match self.document.get() {
            Some(document) => document,
            None => self,
        }
    }

    pub(crate) fn arena(&'a self) -> Option<Arena<'a>> {
        match &self.node_document().data {
            NodeData::Document(document) => Some(document.arena),
            _ => None,
        }
    }

    pub(crate) fn registry(&'a self) -> Option<Rc<CustomElementRegistry>> {
        match &self.node_document().data {
            NodeData::Document(document) => Some(document.registry.clone()),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.parent.get()
    }

    pub fn children(&self) -> Ref<'_, Vec<NodeRef<'a>>> {
        self.children.borrow()
    }

    /// A snapshot of the children that can be held across mutations.
    pub fn child_nodes(&self) -> Vec<NodeRef<'a>> {
        self.children.borrow().clone()
    }

    pub fn has_child_nodes(&self) -> bool {
        !self.children.borrow().is_empty()
    }

    pub fn first_child(&self) -> Option<NodeRef<'a>> {
        self.children.borrow().first().copied()
    }

    pub fn last_child(&self) -> Option<NodeRef<'a>> {
        self.children.borrow().last().copied()
    }

    pub fn previous_sibling(&'a self) -> Option<NodeRef<'a>> {
        let parent = self.parent()?;
        let index = self.index();
        match index {
            0 => None,
            _ => parent.children.borrow().get(index - 1).copied(),
        }
    }

    pub fn next_sibling(&'a self) -> Option<NodeRef<'a>> {
        let parent = self.parent()?;
        let index = self.index();
        parent.children.borrow().get(index + 1).copied()
    }

    /// https://dom.spec.whatwg.org/#concept-tree-index
    pub fn index(&'a self) -> usize {
        self.parent()
            .and_then(|parent| {
                parent
                    .children
                    .borrow()
                    .iter()
                    .position(|child| Node::are_same(child, self))
            })
            .unwrap_or(0)
    }

    /// https://dom.spec.whatwg.org/#concept-tree-root
    pub fn root(&'a self) -> NodeRef<'a> {
        let mut current = self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// https://dom.spec.whatwg.org/#concept-shadow-including-root
    pub fn shadow_including_root(&'a self) -> NodeRef<'a> {
        let root = self.root();
        match root.host() {
            Some(host) => host.shadow_including_root(),
            None => root,
        }
    }

    /// https://dom.spec.whatwg.org/#connected
    pub fn is_connected(&'a self) -> bool {
        self.shadow_including_root().is_document()
    }

    /// https://dom.spec.whatwg.org/#concept-tree-inclusive-ancestor
    pub fn inclusive_ancestors(&'a self) -> Vec<NodeRef<'a>> {
        let mut nodes = vec![self];
        let mut current = self.parent();
        while let Some(ancestor) = current {
            nodes.push(ancestor);
            current = ancestor.parent();
        }
        nodes
    }

    /// https://dom.spec.whatwg.org/#concept-tree-host-including-inclusive-ancestor
    pub fn is_host_including_inclusive_ancestor_of(&'a self, other: NodeRef<'a>) -> bool {
        let mut current = other;
        loop {
            if Node::are_same(current, self) {
                return true;
            }
            current = match (current.parent(), current.host()) {
                (Some(parent), _) => parent,
                (None, Some(host)) => host,
                (None, None) => return false,
            };
        }
    }

    /// Descendants in tree order, starting with `self`. Shadow trees are not entered.
    pub fn inclusive_descendants(&'a self) -> Vec<NodeRef<'a>> {
        let mut nodes = Vec::new();
        self.collect_descendants(&mut nodes, false);
        nodes
    }

    /// https://dom.spec.whatwg.org/#concept-shadow-including-inclusive-descendant
    ///
    /// Collected in shadow-including tree order: a host's shadow root and its
    /// subtree come right after the host, before the host's children.
    pub fn shadow_including_inclusive_descendants(&'a self) -> Vec<NodeRef<'a>> {
        let mut nodes = Vec::new();
        self.collect_descendants(&mut nodes, true);
        nodes
    }

    fn collect_descendants(&'a self, nodes: &mut Vec<NodeRef<'a>>, include_shadow: bool) {
        nodes.push(self);
        if include_shadow {
            if let Some(shadow_root) = self.internal_shadow_root() {
                shadow_root.collect_descendants(nodes, include_shadow);
            }
        }
        for child in self.children.borrow().iter() {
            child.collect_descendants(nodes, include_shadow);
        }
    }

    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document(_))
    }

    pub fn is_document_fragment(&self) -> bool {
        matches!(self.data, NodeData::DocumentFragment)
    }

    pub fn is_shadow_root(&self) -> bool {
        matches!(self.data, NodeData::ShadowRoot(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn is_character_data(&self) -> bool {
        matches!(self.data, NodeData::CharacterData { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self.data,
            NodeData::CharacterData {
                variant: CharacterDataVariant::Text,
                ..
            }
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(
            self.data,
            NodeData::CharacterData {
                variant: CharacterDataVariant::Comment,
                ..
            }
        )
    }

    pub fn as_element(&self) -> Option<&ElementData<'a>> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_shadow_root(&self) -> Option<&ShadowRootData<'a>> {
        match &self.data {
            NodeData::ShadowRoot(shadow_root) => Some(shadow_root),
            _ => None,
        }
    }

    pub fn is_element_with_tag(&self, tag: &str) -> bool {
        self.local_name().is_some_and(|name| name == tag)
    }

    /// The data of a Text or Comment node.
    pub fn data(&self) -> Option<String> {
        match &self.data {
            NodeData::CharacterData { data, .. } => Some(data.borrow().clone()),
            _ => None,
        }
    }

    /// Replaces the data of a Text or Comment node. Other nodes are left untouched.
    pub fn set_data(&self, value: &str) {
        if let NodeData::CharacterData { data, .. } = &self.data {
            *data.borrow_mut() = value.to_string();
        }
    }

    /// https://dom.spec.whatwg.org/#dom-node-textcontent
    pub fn text_content(&'a self) -> Option<String> {
        match &self.data {
            NodeData::Document(_) => None,
            NodeData::CharacterData { data, .. } => Some(data.borrow().clone()),
            _ => Some(
                self.inclusive_descendants()
                    .iter()
                    .filter(|node| node.is_text())
                    .filter_map(|node| node.data())
                    .collect(),
            ),
        }
    }

    /// Renders the tree rooted at this node, shadow trees included, one node per line.
    pub fn dump(&'a self) -> String {
        let mut output = String::new();
        self.internal_dump(0, &mut output);
        output
    }

    fn internal_dump(&'a self, depth: usize, output: &mut String) {
        let indent = "  ";

        let Some(line) = self.data.dump_line() else {
            return;
        };
        output.push_str(&indent.repeat(depth));
        output.push_str(&line);
        output.push('\n');

        if let Some(shadow_root) = self.internal_shadow_root() {
            shadow_root.internal_dump(depth + 1, output);
        }
        for child in self.children.borrow().iter() {
            child.internal_dump(depth + 1, output);
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Node {
            document: _,
            parent,
            children,
            data,
        } = self;

        if self.is_document() {
            return write!(f, "Document {{ ... }}");
        }

        f.debug_struct("Node")
            .field("data", data)
            .field("children", &children.borrow())
            .field("parent", &parent.get().map(|v| v.data.to_string()))
            .finish()
    }
}

pub enum NodeData<'a> {
    Document(DocumentData<'a>),
    DocumentFragment,
    ShadowRoot(ShadowRootData<'a>),
    Element(ElementData<'a>),
    CharacterData {
        data: RefCell<String>,
        variant: CharacterDataVariant,
    },
}

/// Per-document state: the arena new nodes are allocated in and the registry
/// consulted when elements are created or inserted.
pub struct DocumentData<'a> {
    pub(crate) arena: Arena<'a>,
    pub(crate) registry: Rc<CustomElementRegistry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterDataVariant {
    Text,
    Comment,
}

impl NodeData<'_> {
    fn dump_line(&self) -> Option<String> {
        match self {
            NodeData::Document(_) => Some("#document".to_string()),
            NodeData::DocumentFragment => Some("#document-fragment".to_string()),
            NodeData::ShadowRoot(shadow_root) => {
                Some(format!("#shadow-root ({})", shadow_root.mode()))
            }
            NodeData::Element(element) => {
                let mut line = format!("<{}", element.local_name());
                for attribute in element.attributes().iter() {
                    line.push_str(&format!(" {}=\"{}\"", attribute.name, attribute.value));
                }
                line.push('>');
                Some(line)
            }
            NodeData::CharacterData {
                data,
                variant: CharacterDataVariant::Text,
            } => {
                let data = data.borrow();
                match data.trim() {
                    "" => None,
                    trimmed => Some(format!("#text \"{trimmed}\"")),
                }
            }
            NodeData::CharacterData {
                data,
                variant: CharacterDataVariant::Comment,
            } => Some(format!("<!--{}-->", data.borrow())),
        }
    }
}

impl fmt::Display for NodeData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeData::Document(_) => write!(f, "Document"),
            NodeData::DocumentFragment => write!(f, "DocumentFragment"),
            NodeData::ShadowRoot(_) => write!(f, "ShadowRoot"),
            NodeData::Element(element) => write!(f, "Element({})", element.local_name()),
            NodeData::CharacterData { variant, .. } => match variant {
                CharacterDataVariant::Text => write!(f, "Text"),
                CharacterDataVariant::Comment => write!(f, "Comment"),
            },
        }
    }
}

impl fmt::Debug for NodeData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeData::Document(_) => write!(f, "Document"),
            NodeData::DocumentFragment => write!(f, "DocumentFragment"),
            NodeData::ShadowRoot(shadow_root) => fmt::Debug::fmt(shadow_root, f),
            NodeData::Element(element) => fmt::Debug::fmt(element, f),
            NodeData::CharacterData { data, variant } => f
                .debug_struct("CharacterData")
                .field("data", &data.borrow())
                .field("variant", variant)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::node::{CharacterDataVariant, Node, NodeData};

    fn text<'a>(data: &str) -> Node<'a> {
        Node::new(
            None,
            NodeData::CharacterData {
                data: RefCell::new(data.to_string()),
                variant: CharacterDataVariant::Text,
            },
        )
    }

    #[test]
    fn are_same_optional() {
        let a = &text("a");
        let b = &text("a");

        assert!(!Node::are_same_optional(Some(a), Some(b)));
        assert!(!Node::are_same_optional(Some(a), None));
        assert!(!Node::are_same_optional(None, Some(b)));
        assert!(Node::are_same_optional(Some(a), Some(a)));
        assert!(Node::are_same_optional(None, None));
    }

    #[test]
    fn equality_is_structural() {
        let a = &text("a");
        let b = &text("a");
        let c = &text("c");

        assert!(!Node::are_same(a, b));
        assert!(a.is_equal_node(b));
        assert!(!a.is_equal_node(c));
        assert!(a.is_same_node(a));
    }

    #[test]
    fn set_data_only_touches_character_data() {
        let a = &text("before");
        a.set_data("after");
        assert_eq!(a.data().as_deref(), Some("after"));

        let fragment = &Node::new(None, NodeData::DocumentFragment);
        fragment.set_data("ignored");
        assert_eq!(fragment.data(), None);
    }
}
