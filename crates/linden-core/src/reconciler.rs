//! Positional tree diffing and live-node materialization.
//!
//! Children are matched purely by index, never by key: inserting or
//! removing in the middle of a child list makes every later sibling look
//! changed and triggers cascading replacements. That is the documented
//! baseline behavior, not something to repair here.

use crate::dom::{Document, DomError, NodeId};
use crate::vnode::{PropValue, Props, VNode};

/// Recursively patches the live child at `index` under `parent` so it
/// matches `new`, given that it currently matches `old`.
pub(crate) fn diff(
    document: &Document,
    old: Option<&VNode>,
    new: Option<&VNode>,
    parent: NodeId,
    index: usize,
) -> Result<(), DomError> {
    let Some(new) = new else {
        // Tree shrank: drop the live child, tolerating an absent one.
        return document.remove_child_at(parent, index);
    };
    let Some(old) = old else {
        // Tree grew: materialize and append.
        let id = create_live_node(document, new)?;
        return document.append_child(parent, id);
    };
    match (old, new) {
        (VNode::Text(previous), VNode::Text(current)) if previous == current => Ok(()),
        (VNode::Element(previous), VNode::Element(current)) if previous.tag == current.tag => {
            let Some(live) = document.child_at(parent, index) else {
                // The live side lost this slot somehow; rebuild it.
                let id = create_live_node(document, new)?;
                return document.append_child(parent, id);
            };
            diff_props(document, live, &previous.props, &current.props)?;
            let old_len = previous.children.len();
            let new_len = current.children.len();
            for child_index in 0..new_len {
                diff(
                    document,
                    previous.children.get(child_index),
                    current.children.get(child_index),
                    live,
                    child_index,
                )?;
            }
            // Trailing removals run back to front so the surviving indices
            // stay stable while children shift.
            for child_index in (new_len..old_len).rev() {
                diff(document, previous.children.get(child_index), None, live, child_index)?;
            }
            Ok(())
        }
        // Changed primitive value, changed tag, or primitive/composite kind
        // mismatch: replace the subtree wholesale.
        _ => {
            let id = create_live_node(document, new)?;
            document.replace_child(parent, index, id)
        }
    }
}

/// Applies the property delta between `old` and `new` to the live element
/// `id`. Equal-valued properties are left untouched.
pub(crate) fn diff_props(
    document: &Document,
    id: NodeId,
    old: &Props,
    new: &Props,
) -> Result<(), DomError> {
    for (name, value) in new.iter() {
        let previous = old.get(name);
        if previous.map(|previous| previous.same(value)).unwrap_or(false) {
            continue;
        }
        match value {
            PropValue::Handler(handler) => {
                match previous {
                    Some(PropValue::Handler(_)) => document.remove_listener(id, &event_name(name))?,
                    Some(PropValue::Attr(_)) => document.remove_attribute(id, name)?,
                    None => {}
                }
                document.set_listener(id, &event_name(name), handler.clone())?;
            }
            PropValue::Attr(value) => {
                if let Some(PropValue::Handler(_)) = previous {
                    document.remove_listener(id, &event_name(name))?;
                }
                document.set_attribute(id, name, value)?;
            }
        }
    }
    for (name, value) in old.iter() {
        if new.get(name).is_some() {
            continue;
        }
        match value {
            PropValue::Handler(_) => document.remove_listener(id, &event_name(name))?,
            PropValue::Attr(_) => document.remove_attribute(id, name)?,
        }
    }
    Ok(())
}

/// Constructs a brand-new live node for `vnode`, recursively. This is the
/// only place live nodes are created; existing nodes are never touched.
pub(crate) fn create_live_node(document: &Document, vnode: &VNode) -> Result<NodeId, DomError> {
    match vnode {
        VNode::Text(value) => Ok(document.create_text(value.clone())),
        VNode::Element(element) => {
            let id = document.create_element(&element.tag);
            diff_props(document, id, &Props::new(), &element.props)?;
            for child in &element.children {
                let child_id = create_live_node(document, child)?;
                document.append_child(id, child_id)?;
            }
            Ok(id)
        }
    }
}

/// `onClick` → `click`: strip the `on` prefix and lowercase the rest.
fn event_name(prop: &str) -> String {
    prop.strip_prefix("on").unwrap_or(prop).to_ascii_lowercase()
}
