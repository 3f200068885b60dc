use std::fmt;
use std::rc::Rc;

use crate::arena::NodeRef;

type ElementCallback = Rc<dyn for<'a> Fn(NodeRef<'a>)>;
type AdoptedCallback = Rc<dyn for<'a> Fn(NodeRef<'a>, NodeRef<'a>, NodeRef<'a>)>;
type AttributeChangedCallback = Rc<dyn for<'a> Fn(NodeRef<'a>, &AttributeChange)>;

/// One change to an observed attribute, as reported to `attribute_changed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// https://html.spec.whatwg.org/multipage/custom-elements.html#concept-custom-element-definition-lifecycle-callbacks
///
/// Every hook is optional. A missing hook is a no-op; the invocation is still
/// logged. Hooks run synchronously inside the DOM operation that triggers them
/// and a panicking hook unwinds through that operation.
///
/// ```
/// use dom::LifecycleCallbacks;
///
/// let callbacks = LifecycleCallbacks::new()
///     .on_connected(|element| println!("{:?} connected", element.local_name()))
///     .on_attribute_changed(|_, change| println!("{} changed", change.name));
/// # let _ = callbacks;
/// ```
#[derive(Clone, Default)]
pub struct LifecycleCallbacks {
    constructed: Option<ElementCallback>,
    connected: Option<ElementCallback>,
    disconnected: Option<ElementCallback>,
    adopted: Option<AdoptedCallback>,
    attribute_changed: Option<AttributeChangedCallback>,
}

impl LifecycleCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs once per instance, after the shadow root has been populated.
    pub fn on_constructed<F>(mut self, callback: F) -> Self
    where
        F: for<'a> Fn(NodeRef<'a>) + 'static,
    {
        self.constructed = Some(Rc::new(callback));
        self
    }

    pub fn on_connected<F>(mut self, callback: F) -> Self
    where
        F: for<'a> Fn(NodeRef<'a>) + 'static,
    {
        self.connected = Some(Rc::new(callback));
        self
    }

    pub fn on_disconnected<F>(mut self, callback: F) -> Self
    where
        F: for<'a> Fn(NodeRef<'a>) + 'static,
    {
        self.disconnected = Some(Rc::new(callback));
        self
    }

    /// Receives the element, its old document and its new document.
    pub fn on_adopted<F>(mut self, callback: F) -> Self
    where
        F: for<'a> Fn(NodeRef<'a>, NodeRef<'a>, NodeRef<'a>) + 'static,
    {
        self.adopted = Some(Rc::new(callback));
        self
    }

    pub fn on_attribute_changed<F>(mut self, callback: F) -> Self
    where
        F: for<'a> Fn(NodeRef<'a>, &AttributeChange) + 'static,
    {
        self.attribute_changed = Some(Rc::new(callback));
        self
    }

    pub(crate) fn constructed(&self, element: NodeRef<'_>) {
        tracing::debug!(element = ?element.local_name(), "constructed");
        if let Some(callback) = &self.constructed {
            callback(element);
        }
    }

    pub(crate) fn connected(&self, element: NodeRef<'_>) {
        tracing::debug!(element = ?element.local_name(), "connected");
        if let Some(callback) = &self.connected {
            callback(element);
        }
    }

    pub(crate) fn disconnected(&self, element: NodeRef<'_>) {
        tracing::debug!(element = ?element.local_name(), "disconnected");
        if let Some(callback) = &self.disconnected {
            callback(element);
        }
    }

    pub(crate) fn adopted<'a>(
        &self,
        element: NodeRef<'a>,
        old_document: NodeRef<'a>,
        new_document: NodeRef<'a>,
    ) {
        tracing::debug!(element = ?element.local_name(), "adopted into a new document");
        if let Some(callback) = &self.adopted {
            callback(element, old_document, new_document);
        }
    }

    pub(crate) fn attribute_changed(&self, element: NodeRef<'_>, change: &AttributeChange) {
        tracing::debug!(
            element = ?element.local_name(),
            name = %change.name,
            old_value = ?change.old_value,
            new_value = ?change.new_value,
            "attribute changed"
        );
        if let Some(callback) = &self.attribute_changed {
            callback(element, change);
        }
    }
}

impl fmt::Debug for LifecycleCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleCallbacks")
            .field("constructed", &self.constructed.is_some())
            .field("connected", &self.connected.is_some())
            .field("disconnected", &self.disconnected.is_some())
            .field("adopted", &self.adopted.is_some())
            .field("attribute_changed", &self.attribute_changed.is_some())
            .finish()
    }
}
