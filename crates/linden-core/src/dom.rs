//! The live tree: an in-memory document the reconciler patches in place.
//!
//! Nodes live in a slab addressed by [`NodeId`]; the handle is cheap to
//! clone and uses interior mutability so event handlers can re-enter the
//! runtime while the document is reachable from both sides. Every applied
//! mutation bumps a counter, which is how tests assert that reconciling an
//! unchanged tree writes nothing.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::collections::map::HashMap;
use crate::vnode::{Event, EventHandler};

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    Missing { id: NodeId },
    NotAnElement { id: NodeId },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::Missing { id } => write!(f, "node {id} missing"),
            DomError::NotAnElement { id } => write!(f, "node {id} is not an element"),
        }
    }
}

impl std::error::Error for DomError {}

pub enum LiveNode {
    Element(ElementNode),
    Text(String),
}

pub struct ElementNode {
    tag: String,
    attrs: IndexMap<String, String>,
    listeners: HashMap<String, EventHandler>,
    children: Vec<NodeId>,
}

impl ElementNode {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            listeners: HashMap::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Default)]
struct DocumentInner {
    nodes: Vec<Option<LiveNode>>,
    mutations: u64,
}

impl DocumentInner {
    fn node(&self, id: NodeId) -> Result<&LiveNode, DomError> {
        self.nodes
            .get(id)
            .and_then(Option::as_ref)
            .ok_or(DomError::Missing { id })
    }

    fn element(&self, id: NodeId) -> Result<&ElementNode, DomError> {
        match self.node(id)? {
            LiveNode::Element(element) => Ok(element),
            LiveNode::Text(_) => Err(DomError::NotAnElement { id }),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementNode, DomError> {
        match self
            .nodes
            .get_mut(id)
            .and_then(Option::as_mut)
            .ok_or(DomError::Missing { id })?
        {
            LiveNode::Element(element) => Ok(element),
            LiveNode::Text(_) => Err(DomError::NotAnElement { id }),
        }
    }

    fn create(&mut self, node: LiveNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Some(node));
        id
    }

    /// Frees a node and its whole subtree. Already-freed children are
    /// skipped rather than treated as faults.
    fn free(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(id).and_then(Option::take) {
            Some(LiveNode::Element(element)) => element.children,
            _ => return,
        };
        for child in children {
            self.free(child);
        }
    }

    fn text_content(&self, id: NodeId, out: &mut String) {
        match self.nodes.get(id).and_then(Option::as_ref) {
            Some(LiveNode::Text(value)) => out.push_str(value),
            Some(LiveNode::Element(element)) => {
                for &child in &element.children {
                    self.text_content(child, out);
                }
            }
            None => {}
        }
    }

    fn dump_node(&self, output: &mut String, id: NodeId, depth: usize) {
        let indent = "  ".repeat(depth);
        match self.nodes.get(id).and_then(Option::as_ref) {
            Some(LiveNode::Text(value)) => {
                output.push_str(&format!("{indent}[{id}] {value:?}\n"));
            }
            Some(LiveNode::Element(element)) => {
                output.push_str(&format!("{indent}[{id}] {}", element.tag));
                for (name, value) in &element.attrs {
                    output.push_str(&format!(" {name}={value:?}"));
                }
                output.push('\n');
                for &child in &element.children {
                    self.dump_node(output, child, depth + 1);
                }
            }
            None => {
                output.push_str(&format!("{indent}[{id}] (missing)\n"));
            }
        }
    }
}

/// Shared handle to a live document tree.
#[derive(Clone, Default)]
pub struct Document {
    inner: Rc<RefCell<DocumentInner>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_element(&self, tag: impl Into<String>) -> NodeId {
        self.inner
            .borrow_mut()
            .create(LiveNode::Element(ElementNode::new(tag)))
    }

    pub fn create_text(&self, value: impl Into<String>) -> NodeId {
        self.inner.borrow_mut().create(LiveNode::Text(value.into()))
    }

    /// The live child at `index` under `parent`, if any. Reads are lenient:
    /// a missing or non-element parent yields `None`.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        let inner = self.inner.borrow();
        inner
            .element(parent)
            .ok()
            .and_then(|element| element.children.get(index).copied())
    }

    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        let inner = self.inner.borrow();
        inner
            .element(id)
            .map(|element| element.children.clone())
            .unwrap_or_default()
    }

    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut inner = self.inner.borrow_mut();
        inner.element_mut(parent)?.children.push(child);
        inner.mutations += 1;
        log::trace!("append {child} under {parent}");
        Ok(())
    }

    /// Replaces the child at `index` with `child`, freeing the old subtree.
    /// If the slot is unexpectedly empty the new node is appended instead.
    pub fn replace_child(&self, parent: NodeId, index: usize, child: NodeId) -> Result<(), DomError> {
        let mut inner = self.inner.borrow_mut();
        let old = {
            let element = inner.element_mut(parent)?;
            match element.children.get_mut(index) {
                Some(slot) => Some(std::mem::replace(slot, child)),
                None => {
                    element.children.push(child);
                    None
                }
            }
        };
        match old {
            Some(old) => {
                inner.free(old);
                log::trace!("replace child {index} of {parent} with {child}");
            }
            None => log::trace!("replace at absent index {index} of {parent}: appended {child}"),
        }
        inner.mutations += 1;
        Ok(())
    }

    /// Removes the child at `index`, freeing its subtree. An absent child is
    /// a no-op, not a fault.
    pub fn remove_child_at(&self, parent: NodeId, index: usize) -> Result<(), DomError> {
        let mut inner = self.inner.borrow_mut();
        let old = {
            let element = inner.element_mut(parent)?;
            if index >= element.children.len() {
                log::trace!("remove at absent index {index} of {parent}: no-op");
                return Ok(());
            }
            element.children.remove(index)
        };
        inner.free(old);
        inner.mutations += 1;
        log::trace!("remove child {index} of {parent}");
        Ok(())
    }

    pub fn set_attribute(&self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let mut inner = self.inner.borrow_mut();
        inner
            .element_mut(id)?
            .attrs
            .insert(name.to_string(), value.to_string());
        inner.mutations += 1;
        Ok(())
    }

    pub fn remove_attribute(&self, id: NodeId, name: &str) -> Result<(), DomError> {
        let mut inner = self.inner.borrow_mut();
        if inner.element_mut(id)?.attrs.shift_remove(name).is_some() {
            inner.mutations += 1;
        }
        Ok(())
    }

    pub fn set_listener(&self, id: NodeId, event: &str, handler: EventHandler) -> Result<(), DomError> {
        let mut inner = self.inner.borrow_mut();
        inner
            .element_mut(id)?
            .listeners
            .insert(event.to_string(), handler);
        inner.mutations += 1;
        Ok(())
    }

    pub fn remove_listener(&self, id: NodeId, event: &str) -> Result<(), DomError> {
        let mut inner = self.inner.borrow_mut();
        if inner.element_mut(id)?.listeners.remove(event).is_some() {
            inner.mutations += 1;
        }
        Ok(())
    }

    /// Invokes the listener registered for `event` on `id`, if any. The
    /// handler runs with no document borrow held, so it may freely trigger
    /// a re-render. Returns whether a handler ran.
    pub fn dispatch(&self, id: NodeId, event: &str, payload: Option<&str>) -> Result<bool, DomError> {
        let handler = {
            let inner = self.inner.borrow();
            inner.element(id)?.listeners.get(event).cloned()
        };
        match handler {
            Some(handler) => {
                let event = match payload {
                    Some(value) => Event::with_value(event, value),
                    None => Event::new(event),
                };
                handler.invoke(&event);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn tag_of(&self, id: NodeId) -> Option<String> {
        let inner = self.inner.borrow();
        inner.element(id).ok().map(|element| element.tag.clone())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        let inner = self.inner.borrow();
        inner.element(id).ok()?.attrs.get(name).cloned()
    }

    pub fn has_listener(&self, id: NodeId, event: &str) -> bool {
        let inner = self.inner.borrow();
        inner
            .element(id)
            .map(|element| element.listeners.contains_key(event))
            .unwrap_or(false)
    }

    pub fn text_value(&self, id: NodeId) -> Option<String> {
        let inner = self.inner.borrow();
        match inner.node(id).ok()? {
            LiveNode::Text(value) => Some(value.clone()),
            LiveNode::Element(_) => None,
        }
    }

    /// Concatenated text content of the subtree rooted at `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.inner.borrow().text_content(id, &mut out);
        out
    }

    /// Number of live (not yet freed) nodes.
    pub fn len(&self) -> usize {
        self.inner
            .borrow()
            .nodes
            .iter()
            .filter(|node| node.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total count of mutations applied so far.
    pub fn mutations(&self) -> u64 {
        self.inner.borrow().mutations
    }

    pub fn dump_tree(&self, root: Option<NodeId>) -> String {
        let mut output = String::new();
        if let Some(root_id) = root {
            self.inner.borrow().dump_node(&mut output, root_id, 0);
        } else {
            output.push_str("(no root)\n");
        }
        output
    }
}
