use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use css::CssStyleSheet;

use crate::arena::NodeRef;
use crate::custom_elements::is_valid_custom_element_name;
use crate::node::{Node, NodeData};
use crate::{DomException, ErrorName, Namespace};

/// https://dom.spec.whatwg.org/#shadowroot-mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

impl fmt::Display for ShadowRootMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadowRootMode::Open => write!(f, "open"),
            ShadowRootMode::Closed => write!(f, "closed"),
        }
    }
}

/// https://dom.spec.whatwg.org/#dictdef-shadowrootinit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowRootInit {
    pub mode: ShadowRootMode,
}

/// https://dom.spec.whatwg.org/#interface-shadowroot
pub struct ShadowRootData<'a> {
    mode: ShadowRootMode,
    host: NodeRef<'a>,
    adopted_style_sheets: RefCell<Vec<Rc<CssStyleSheet>>>,
}

impl<'a> ShadowRootData<'a> {
    pub fn mode(&self) -> ShadowRootMode {
        self.mode
    }

    pub fn host(&self) -> NodeRef<'a> {
        self.host
    }

    /// https://drafts.csswg.org/cssom/#dom-documentorshadowroot-adoptedstylesheets
    pub fn adopted_style_sheets(&self) -> Vec<Rc<CssStyleSheet>> {
        self.adopted_style_sheets.borrow().clone()
    }
}

impl fmt::Debug for ShadowRootData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowRoot")
            .field("mode", &self.mode)
            .field("host", &self.host.local_name())
            .field(
                "adopted_style_sheets",
                &self.adopted_style_sheets.borrow().len(),
            )
            .finish()
    }
}

/// Built-in elements that may host a shadow root, next to valid custom element names.
const VALID_SHADOW_HOST_NAMES: &[&str] = &[
    "article",
    "aside",
    "blockquote",
    "body",
    "div",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "main",
    "nav",
    "p",
    "section",
    "span",
];

impl<'a> Node<'a> {
    /// https://dom.spec.whatwg.org/#dom-element-attachshadow
    pub fn attach_shadow(&'a self, init: ShadowRootInit) -> Result<NodeRef<'a>, DomException> {
        self.attach_a_shadow_root(init.mode)
    }

    /// https://dom.spec.whatwg.org/#concept-attach-a-shadow-root
    pub(crate) fn attach_a_shadow_root(
        &'a self,
        mode: ShadowRootMode,
    ) -> Result<NodeRef<'a>, DomException> {
        let Some(element) = self.as_element() else {
            return Err(ErrorName::NotSupportedError.into());
        };

        // 1. If element's namespace is not the HTML namespace, then throw a "NotSupportedError" DOMException.
        if element.namespace() != Namespace::Html {
            return Err(ErrorName::NotSupportedError.into());
        }

        // 2. If element's local name is not a valid shadow host name, then throw a "NotSupportedError" DOMException.
        let local_name = element.local_name();
        if !is_valid_custom_element_name(local_name) && !VALID_SHADOW_HOST_NAMES.contains(&local_name)
        {
            return Err(DomException::new(
                ErrorName::NotSupportedError,
                "This element can not host a shadow root.",
            ));
        }

        // 4. If element is a shadow host, then throw a "NotSupportedError" DOMException.
        if element.shadow_root.get().is_some() {
            return Err(DomException::new(
                ErrorName::NotSupportedError,
                "The element already hosts a shadow root.",
            ));
        }

        let Some(arena) = self.arena() else {
            return Err(ErrorName::InvalidStateError.into());
        };

        // 5. Let shadow be a new shadow root whose node document is element's node document, host is element, and mode is mode.
        let shadow: NodeRef<'a> = arena.alloc(Node::new(
            Some(self.node_document()),
            NodeData::ShadowRoot(ShadowRootData {
                mode,
                host: self,
                adopted_style_sheets: RefCell::new(Vec::new()),
            }),
        ));

        // 12. Set element's shadow root to shadow.
        element.shadow_root.set(Some(shadow));
        tracing::trace!(host = local_name, %mode, "attached shadow root");

        Ok(shadow)
    }

    /// https://dom.spec.whatwg.org/#dom-element-shadowroot
    ///
    /// Closed shadow roots are hidden.
    pub fn shadow_root(&self) -> Option<NodeRef<'a>> {
        self.internal_shadow_root()
            .filter(|shadow_root| {
                shadow_root
                    .as_shadow_root()
                    .is_some_and(|data| data.mode() == ShadowRootMode::Open)
            })
    }

    pub(crate) fn internal_shadow_root(&self) -> Option<NodeRef<'a>> {
        self.as_element()
            .and_then(|element| element.shadow_root.get())
    }

    /// https://dom.spec.whatwg.org/#element-shadow-host
    pub fn is_shadow_host(&self) -> bool {
        self.internal_shadow_root().is_some()
    }

    /// https://dom.spec.whatwg.org/#concept-documentfragment-host
    pub fn host(&self) -> Option<NodeRef<'a>> {
        self.as_shadow_root().map(|shadow_root| shadow_root.host())
    }

    /// The adopted stylesheets of a shadow root. Empty for every other node.
    pub fn adopted_style_sheets(&self) -> Vec<Rc<CssStyleSheet>> {
        self.as_shadow_root()
            .map(|shadow_root| shadow_root.adopted_style_sheets())
            .unwrap_or_default()
    }

    /// Appends a stylesheet to a shadow root's adopted stylesheets. The sheet is
    /// shared, not copied.
    pub fn adopt_style_sheet(&self, style_sheet: Rc<CssStyleSheet>) -> Result<(), DomException> {
        let Some(shadow_root) = self.as_shadow_root() else {
            return Err(ErrorName::HierarchyRequestError.into());
        };

        // Only constructed stylesheets may be adopted.
        if !style_sheet.constructed() {
            return Err(DomException::new(
                ErrorName::NotAllowedError,
                "Only constructed stylesheets can be adopted.",
            ));
        }

        shadow_root.adopted_style_sheets.borrow_mut().push(style_sheet);
        Ok(())
    }
}
