//! Core runtime for Linden, a minimal declarative UI engine.
//!
//! A program describes its UI as a virtual tree built with [`h`], keeps
//! per-component state with [`use_state`] and [`use_effect`], and lets the
//! render driver patch a live [`Document`] to match each new description.
//! Reconciliation is positional: children are matched by index, never by
//! key, and every state update runs one synchronous render cycle.
//!
//! ```
//! use linden_core::{children, h, props, render, text, use_state, Component, Document, Props, VNode};
//!
//! fn counter(_props: Props) -> VNode {
//!     let (count, set_count) = use_state(|| 0);
//!     h(
//!         "div",
//!         props!(class: "counter"),
//!         children![
//!             text(format!("count: {count}")),
//!             h(
//!                 "button",
//!                 Props::new().on("click", move |_| set_count.set(count + 1)),
//!                 children!["+"],
//!             ),
//!         ],
//!     )
//! }
//!
//! let document = Document::new();
//! let container = document.create_element("root");
//! let app = render(Component::new(counter), &document, container);
//! assert_eq!(document.text_content(app.container()), "count: 0+");
//! ```

pub mod collections;
pub mod dom;
pub mod hash;
pub mod hooks;
mod reconciler;
pub mod runtime;
pub mod vnode;

pub use dom::{Document, DomError, NodeId};
pub use hooks::{use_effect, use_state, DepList, Key, SetState};
pub use runtime::{render, App, Phase};
pub use vnode::{
    h, text, Child, Component, Event, EventHandler, PropValue, Props, Tag, VElement, VNode,
};

#[cfg(test)]
mod tests;
