use crate::dom::DomError;
use crate::{Document, EventHandler};

#[test]
fn append_and_address_children_by_position() {
    let document = Document::new();
    let root = document.create_element("root");
    let first = document.create_text("a");
    let second = document.create_text("b");
    document.append_child(root, first).unwrap();
    document.append_child(root, second).unwrap();

    assert_eq!(document.child_at(root, 0), Some(first));
    assert_eq!(document.child_at(root, 1), Some(second));
    assert_eq!(document.child_at(root, 2), None);
    assert_eq!(document.children_of(root), vec![first, second]);
}

#[test]
fn removal_at_absent_index_is_a_noop() {
    let document = Document::new();
    let root = document.create_element("root");
    let before = document.mutations();
    document.remove_child_at(root, 5).unwrap();
    assert_eq!(document.mutations(), before);
}

#[test]
fn removal_frees_the_whole_subtree() {
    let document = Document::new();
    let root = document.create_element("root");
    let branch = document.create_element("div");
    let leaf = document.create_text("leaf");
    document.append_child(branch, leaf).unwrap();
    document.append_child(root, branch).unwrap();
    assert_eq!(document.len(), 3);

    document.remove_child_at(root, 0).unwrap();
    assert_eq!(document.len(), 1);
    assert_eq!(document.children_of(root), Vec::new());
}

#[test]
fn replace_frees_the_old_subtree() {
    let document = Document::new();
    let root = document.create_element("root");
    let old = document.create_element("p");
    let old_text = document.create_text("old");
    document.append_child(old, old_text).unwrap();
    document.append_child(root, old).unwrap();

    let new = document.create_text("new");
    document.replace_child(root, 0, new).unwrap();
    assert_eq!(document.child_at(root, 0), Some(new));
    assert_eq!(document.len(), 2);
}

#[test]
fn attributes_set_and_remove() {
    let document = Document::new();
    let node = document.create_element("div");
    document.set_attribute(node, "class", "a").unwrap();
    assert_eq!(document.attribute(node, "class"), Some("a".to_string()));
    document.remove_attribute(node, "class").unwrap();
    assert_eq!(document.attribute(node, "class"), None);
}

#[test]
fn attribute_ops_on_text_nodes_fail() {
    let document = Document::new();
    let node = document.create_text("plain");
    assert_eq!(
        document.set_attribute(node, "class", "a"),
        Err(DomError::NotAnElement { id: node })
    );
}

#[test]
fn dispatch_invokes_the_registered_listener() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let document = Document::new();
    let node = document.create_element("button");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    document
        .set_listener(
            node,
            "click",
            EventHandler::new(move |event| sink.borrow_mut().push(event.name.clone())),
        )
        .unwrap();

    assert!(document.dispatch(node, "click", None).unwrap());
    assert!(!document.dispatch(node, "keydown", None).unwrap());
    assert_eq!(*seen.borrow(), vec!["click".to_string()]);
}

#[test]
fn dispatch_carries_the_payload() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let document = Document::new();
    let node = document.create_element("input");
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    document
        .set_listener(
            node,
            "input",
            EventHandler::new(move |event| *sink.borrow_mut() = event.value.clone()),
        )
        .unwrap();

    document.dispatch(node, "input", Some("typed")).unwrap();
    assert_eq!(*seen.borrow(), Some("typed".to_string()));
}

#[test]
fn dispatch_on_a_missing_node_is_an_error() {
    let document = Document::new();
    assert_eq!(
        document.dispatch(99, "click", None),
        Err(DomError::Missing { id: 99 })
    );
}

#[test]
fn handlers_may_mutate_the_document() {
    // Listener invocation must not hold a document borrow, so a handler can
    // create nodes (or trigger a re-render) while it runs.
    let document = Document::new();
    let node = document.create_element("button");
    let doc = document.clone();
    document
        .set_listener(
            node,
            "click",
            EventHandler::new(move |_| {
                doc.create_element("spawned");
            }),
        )
        .unwrap();

    document.dispatch(node, "click", None).unwrap();
    assert_eq!(document.len(), 2);
}

#[test]
fn text_content_concatenates_the_subtree() {
    let document = Document::new();
    let root = document.create_element("div");
    let p = document.create_element("p");
    document.append_child(p, document.create_text("count: ")).unwrap();
    document.append_child(p, document.create_text("0")).unwrap();
    document.append_child(root, p).unwrap();
    assert_eq!(document.text_content(root), "count: 0");
}

#[test]
fn dump_tree_shows_tags_attrs_and_text() {
    let document = Document::new();
    let root = document.create_element("div");
    document.set_attribute(root, "class", "box").unwrap();
    document.append_child(root, document.create_text("hi")).unwrap();

    let dump = document.dump_tree(Some(root));
    assert!(dump.contains("div"));
    assert!(dump.contains("class=\"box\""));
    assert!(dump.contains("\"hi\""));
    assert_eq!(document.dump_tree(None), "(no root)\n");
}
