//! A small harness for exercising components against a live document.

use linden_core::{render, App, Component, Document, NodeId};

/// Mounts a component into a fresh document and exposes the common ways
/// tests poke at the resulting tree.
pub struct TestApp {
    document: Document,
    container: NodeId,
    _app: App,
}

impl TestApp {
    /// Builds a fresh document with a `root` container and renders
    /// `component` into it.
    pub fn mount(component: Component) -> Self {
        let document = Document::new();
        let container = document.create_element("root");
        let app = render(component, &document, container);
        Self {
            document,
            container,
            _app: app,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Concatenated text content of the whole mounted tree.
    pub fn text(&self) -> String {
        self.document.text_content(self.container)
    }

    /// First node with the given tag, depth-first.
    pub fn find(&self, tag: &str) -> Option<NodeId> {
        self.find_all(tag).into_iter().next()
    }

    /// Every node with the given tag, in depth-first order.
    pub fn find_all(&self, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect(self.container, tag, &mut found);
        found
    }

    fn collect(&self, id: NodeId, tag: &str, found: &mut Vec<NodeId>) {
        if self.document.tag_of(id).as_deref() == Some(tag) && id != self.container {
            found.push(id);
        }
        for child in self.document.children_of(id) {
            self.collect(child, tag, found);
        }
    }

    /// Dispatches a `click` against `id`. Returns whether a handler ran.
    pub fn click(&self, id: NodeId) -> bool {
        self.document
            .dispatch(id, "click", None)
            .expect("click target should exist")
    }

    /// Dispatches an `input` event carrying `value`.
    pub fn input(&self, id: NodeId, value: &str) -> bool {
        self.document
            .dispatch(id, "input", Some(value))
            .expect("input target should exist")
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.document.attribute(id, name)
    }

    /// Readable snapshot of the mounted tree.
    pub fn dump(&self) -> String {
        self.document.dump_tree(Some(self.container))
    }
}
