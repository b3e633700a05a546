//! Virtual-tree data model and the element descriptor builder.
//!
//! A [`VNode`] is an immutable description of a piece of UI: either a text
//! primitive or an element with a tag, a property bag, and ordered children.
//! Component tags never survive construction — [`h`] expands them on the
//! spot, so a stored tree only ever contains element and text nodes.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// Payload handed to an `on*` handler when an event is dispatched against a
/// live node.
#[derive(Clone, Debug, Default)]
pub struct Event {
    /// Event name as dispatched, e.g. `"click"` or `"input"`.
    pub name: String,
    /// Optional payload, e.g. the current value of an input element.
    pub value: Option<String>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// A cheaply clonable event callback. Two handlers compare equal only when
/// they share the same allocation, which is what the reconciler uses to
/// decide whether a listener must be swapped.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl EventHandler {
    pub fn new(handler: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn invoke(&self, event: &Event) {
        (self.0)(event)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHandler(..)")
    }
}

/// A single property value: a plain attribute or an event handler.
#[derive(Clone, Debug)]
pub enum PropValue {
    Attr(String),
    Handler(EventHandler),
}

impl PropValue {
    /// Equality as the reconciler sees it: attributes by value, handlers by
    /// identity.
    pub fn same(&self, other: &PropValue) -> bool {
        match (self, other) {
            (PropValue::Attr(a), PropValue::Attr(b)) => a == b,
            (PropValue::Handler(a), PropValue::Handler(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Attr(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Attr(value)
    }
}

impl From<EventHandler> for PropValue {
    fn from(handler: EventHandler) -> Self {
        PropValue::Handler(handler)
    }
}

/// Property bag passed to [`h`]. Iteration order is insertion order.
///
/// When a component tag is expanded, the bag also carries the flattened
/// child sequence, mirroring the `{ ...props, children }` convention.
#[derive(Clone, Debug, Default)]
pub struct Props {
    values: IndexMap<String, PropValue>,
    children: Vec<VNode>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute entry.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), PropValue::Attr(value.into()));
        self
    }

    /// Builder-style handler entry. The property is stored under the
    /// conventional `on`-prefixed name, so `.on("click", ..)` registers the
    /// `onclick` property.
    pub fn on(mut self, event: &str, handler: impl Fn(&Event) + 'static) -> Self {
        self.values.insert(
            format!("on{event}"),
            PropValue::Handler(EventHandler::new(handler)),
        );
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: PropValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The flattened child sequence handed to a component invocation.
    pub fn children(&self) -> &[VNode] {
        &self.children
    }

    pub(crate) fn with_children(mut self, children: Vec<VNode>) -> Self {
        self.children = children;
        self
    }
}

/// An immutable virtual-tree node.
#[derive(Clone, Debug)]
pub enum VNode {
    /// Primitive content, rendered as a text node.
    Text(String),
    /// Composite content: tag, properties, ordered children.
    Element(VElement),
}

#[derive(Clone, Debug)]
pub struct VElement {
    pub tag: String,
    pub props: Props,
    pub children: Vec<VNode>,
}

impl VNode {
    pub fn as_element(&self) -> Option<&VElement> {
        match self {
            VNode::Element(element) => Some(element),
            VNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            VNode::Text(value) => Some(value),
            VNode::Element(_) => None,
        }
    }
}

/// Builds a text node from anything displayable.
pub fn text(value: impl fmt::Display) -> VNode {
    VNode::Text(value.to_string())
}

/// A component: a function from a property bag to a virtual node.
///
/// Components are plain values; closures can capture their configuration,
/// which is how the router carries its route table.
#[derive(Clone)]
pub struct Component(Rc<dyn Fn(Props) -> VNode>);

impl Component {
    pub fn new(render: impl Fn(Props) -> VNode + 'static) -> Self {
        Self(Rc::new(render))
    }

    pub fn render(&self, props: Props) -> VNode {
        (self.0)(props)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Component(..)")
    }
}

impl From<fn(Props) -> VNode> for Component {
    fn from(render: fn(Props) -> VNode) -> Self {
        Component::new(render)
    }
}

/// What an element descriptor is built from: a live-element tag name or a
/// component to expand. Resolved exactly once, at construction.
#[derive(Clone, Debug)]
pub enum Tag {
    Element(String),
    Component(Component),
}

impl From<&str> for Tag {
    fn from(tag: &str) -> Self {
        Tag::Element(tag.to_string())
    }
}

impl From<String> for Tag {
    fn from(tag: String) -> Self {
        Tag::Element(tag)
    }
}

impl From<Component> for Tag {
    fn from(component: Component) -> Self {
        Tag::Component(component)
    }
}

impl From<fn(Props) -> VNode> for Tag {
    fn from(render: fn(Props) -> VNode) -> Self {
        Tag::Component(Component::new(render))
    }
}

/// One child argument to [`h`]: a single node or an inline sequence.
/// Sequences are collapsed exactly one level, which supports spreading a
/// mapped list of children among its siblings.
pub enum Child {
    Node(VNode),
    Nodes(Vec<VNode>),
}

impl From<VNode> for Child {
    fn from(node: VNode) -> Self {
        Child::Node(node)
    }
}

impl From<Vec<VNode>> for Child {
    fn from(nodes: Vec<VNode>) -> Self {
        Child::Nodes(nodes)
    }
}

impl From<&str> for Child {
    fn from(value: &str) -> Self {
        Child::Node(VNode::Text(value.to_string()))
    }
}

impl From<String> for Child {
    fn from(value: String) -> Self {
        Child::Node(VNode::Text(value))
    }
}

pub(crate) fn flatten(children: Vec<Child>) -> Vec<VNode> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Child::Node(node) => out.push(node),
            Child::Nodes(nodes) => out.extend(nodes),
        }
    }
    out
}

/// The element descriptor builder.
///
/// An element tag yields a [`VNode::Element`] with the flattened children.
/// A component tag is invoked with the property bag (children included) and
/// its result is returned directly, so composite components expand into
/// element subtrees here and never appear in a stored tree.
pub fn h(tag: impl Into<Tag>, props: Props, children: Vec<Child>) -> VNode {
    let children = flatten(children);
    match tag.into() {
        Tag::Component(component) => component.render(props.with_children(children)),
        Tag::Element(tag) => VNode::Element(VElement {
            tag,
            props,
            children,
        }),
    }
}

/// Collects heterogeneous child expressions into the argument [`h`] expects.
#[macro_export]
macro_rules! children {
    () => { ::std::vec::Vec::<$crate::Child>::new() };
    ($($child:expr),+ $(,)?) => {
        ::std::vec![$($crate::Child::from($child)),+]
    };
}

/// Builds a [`Props`] bag from `name: value` attribute entries. Handlers are
/// added with [`Props::on`].
#[macro_export]
macro_rules! props {
    () => { $crate::Props::new() };
    ($($name:ident : $value:expr),+ $(,)?) => {{
        let mut props = $crate::Props::new();
        $(props.insert(stringify!($name), $crate::PropValue::from($value));)+
        props
    }};
}
