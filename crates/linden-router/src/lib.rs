//! Path-based routing built on the Linden core.
//!
//! A route table maps exact paths to components, with a mandatory `"*"`
//! fallback that is validated when the router is constructed — a table
//! without one is a configuration error, never a render-time surprise.
//! The current path lives in a [`Location`]: an observable handle standing
//! in for a browser's hash fragment, so navigation can be driven by
//! [`link`] elements or directly from tests.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use linden_core::{h, use_effect, use_state, Child, Component, Props, VNode};

/// The path that matches when nothing else does.
pub const FALLBACK_PATH: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    MissingFallback,
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::MissingFallback => {
                write!(f, "route table has no \"{FALLBACK_PATH}\" fallback entry")
            }
        }
    }
}

impl std::error::Error for RouterError {}

/// One entry in the route table.
pub struct Route {
    pub path: String,
    pub component: Component,
}

impl Route {
    pub fn new(path: impl Into<String>, component: Component) -> Self {
        Self {
            path: path.into(),
            component,
        }
    }
}

struct LocationInner {
    current: RefCell<String>,
    listeners: RefCell<Vec<Rc<dyn Fn(&str)>>>,
}

/// Shared, observable current path.
#[derive(Clone)]
pub struct Location {
    inner: Rc<LocationInner>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            inner: Rc::new(LocationInner {
                current: RefCell::new("/".to_string()),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> String {
        self.inner.current.borrow().clone()
    }

    /// Changes the current path and notifies subscribers. Listeners run
    /// with no borrow held, so they may navigate or re-render freely.
    pub fn assign(&self, path: impl Into<String>) {
        let path = path.into();
        *self.inner.current.borrow_mut() = path.clone();
        let listeners: Vec<Rc<dyn Fn(&str)>> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&path);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&str) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Location")
            .field("current", &self.current())
            .finish()
    }
}

/// Builds the router component for `routes`, which must contain a
/// [`FALLBACK_PATH`] entry.
///
/// The component keeps the current path in state, subscribes to `location`
/// once on its first render, resolves the table by exact match with the
/// wildcard as fallback, and expands the matched component in place.
pub fn router(location: Location, routes: Vec<Route>) -> Result<Component, RouterError> {
    if !routes.iter().any(|route| route.path == FALLBACK_PATH) {
        return Err(RouterError::MissingFallback);
    }
    let routes = Rc::new(routes);
    Ok(Component::new(move |_props: Props| {
        let (path, set_path) = use_state(|| location.current());
        {
            let location = location.clone();
            use_effect(
                move || location.subscribe(move |path| set_path.set(path.to_string())),
                (),
            );
        }
        let route = routes
            .iter()
            .find(|route| route.path == path)
            .or_else(|| routes.iter().find(|route| route.path == FALLBACK_PATH))
            .expect("fallback presence was validated at construction");
        log::debug!("routing {path:?} to the {:?} entry", route.path);
        h(route.component.clone(), Props::new(), Vec::new())
    }))
}

/// An anchor element that assigns `to` when clicked, the way the original
/// hash links navigate.
pub fn link(location: &Location, to: &str, children: Vec<Child>) -> VNode {
    let target = to.to_string();
    let location = location.clone();
    h(
        "a",
        Props::new()
            .attr("href", format!("#{to}"))
            .on("click", move |_| location.assign(target.clone())),
        children,
    )
}
