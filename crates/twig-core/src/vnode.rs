//! Virtual node descriptions.
//!
//! A [`VNode`] tree is produced fresh on every render and never mutated
//! afterwards. It describes *what* the target should look like; the
//! [`Materializer`](crate::Materializer) and [`Reconciler`](crate::Reconciler)
//! decide how to get there.

use crate::document::NodeId;
use crate::events::{Event, Listener, EVENT_PREFIX};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// Deferred child, invoked again on every materialization.
#[derive(Clone)]
pub struct Thunk(Rc<dyn Fn() -> VNode>);

impl Thunk {
    pub fn new(producer: impl Fn() -> VNode + 'static) -> Self {
        Self(Rc::new(producer))
    }

    pub fn invoke(&self) -> VNode {
        (self.0)()
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thunk({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}

/// Value stored under an attribute key.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Listener(Listener),
}

impl AttrValue {
    /// String written to the target, or `None` when nothing should be written.
    ///
    /// `Bool(false)` omits the attribute and `Bool(true)` writes it empty.
    pub fn to_attribute(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Number(number) => Some(format_number(*number)),
            Self::Bool(true) => Some(String::new()),
            Self::Bool(false) | Self::Listener(_) => None,
        }
    }

    /// Truthiness used for boolean properties such as `checked`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::Bool(flag) => *flag,
            Self::Listener(_) => true,
        }
    }

    pub fn as_listener(&self) -> Option<&Listener> {
        match self {
            Self::Listener(listener) => Some(listener),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<Listener> for AttrValue {
    fn from(value: Listener) -> Self {
        Self::Listener(value)
    }
}

/// Description of a single element: tag, attributes/listeners and children.
#[derive(Clone, Debug)]
pub struct ElementNode {
    pub tag: String,
    pub attrs: IndexMap<String, AttrValue>,
    pub children: Vec<VNode>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Sets `key`. A repeated key overwrites the earlier value but keeps its position.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", AttrValue::Text(class.into()))
    }

    /// Binds `callback` for the `kind` event (`"click"`, `"keydown"`, ...).
    pub fn on(self, kind: &str, callback: impl Into<Listener>) -> Self {
        let key = format!("{EVENT_PREFIX}{kind}");
        self.attr(key, AttrValue::Listener(callback.into()))
    }

    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

/// Starts an element description. Shorthand for [`ElementNode::new`].
pub fn el(tag: impl Into<String>) -> ElementNode {
    ElementNode::new(tag)
}

/// Immutable description of a piece of UI.
#[derive(Clone, Debug)]
pub enum VNode {
    /// Renders as an empty text node so positions stay aligned.
    Empty,
    Text(String),
    Thunk(Thunk),
    /// Sequence of nodes without a wrapping element. May nest arbitrarily.
    Fragment(Vec<VNode>),
    /// A concrete node passed through unchanged.
    Materialized(NodeId),
    Element(ElementNode),
}

impl VNode {
    pub fn text(value: impl fmt::Display) -> Self {
        Self::Text(value.to_string())
    }

    pub fn number(value: f64) -> Self {
        Self::Text(format_number(value))
    }

    pub fn thunk(producer: impl Fn() -> VNode + 'static) -> Self {
        Self::Thunk(Thunk::new(producer))
    }

    pub fn fragment<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VNode>,
    {
        Self::Fragment(children.into_iter().map(Into::into).collect())
    }

    pub fn element(
        tag: impl Into<String>,
        attrs: impl IntoIterator<Item = (String, AttrValue)>,
        children: Vec<VNode>,
    ) -> Self {
        Self::Element(ElementNode {
            tag: tag.into(),
            attrs: attrs.into_iter().collect(),
            children,
        })
    }

    /// Wraps `callback` as an attribute value for an `on*` key.
    pub fn listener(callback: impl Fn(&Event) + 'static) -> AttrValue {
        AttrValue::Listener(Listener::new(callback))
    }
}

impl From<ElementNode> for VNode {
    fn from(value: ElementNode) -> Self {
        Self::Element(value)
    }
}

impl From<&str> for VNode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for VNode {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for VNode {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i32> for VNode {
    fn from(value: i32) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for VNode {
    fn from(value: i64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for VNode {
    fn from(value: u64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<usize> for VNode {
    fn from(value: usize) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for VNode {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<NodeId> for VNode {
    fn from(value: NodeId) -> Self {
        Self::Materialized(value)
    }
}

impl From<Thunk> for VNode {
    fn from(value: Thunk) -> Self {
        Self::Thunk(value)
    }
}

impl From<Vec<VNode>> for VNode {
    fn from(value: Vec<VNode>) -> Self {
        Self::Fragment(value)
    }
}

impl<T: Into<VNode>> From<Option<T>> for VNode {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Formats numbers the way text content expects them: integral values have no
/// fractional part (`3`, not `3.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Flattens nested fragments into one ordered list, at any depth.
pub fn flatten(children: &[VNode]) -> Vec<&VNode> {
    let mut flat = Vec::with_capacity(children.len());
    let mut stack = vec![children.iter()];
    while let Some(iter) = stack.last_mut() {
        match iter.next() {
            Some(VNode::Fragment(nested)) => stack.push(nested.iter()),
            Some(node) => flat.push(node),
            None => {
                stack.pop();
            }
        }
    }
    flat
}

#[cfg(test)]
#[path = "tests/vnode_tests.rs"]
mod tests;
