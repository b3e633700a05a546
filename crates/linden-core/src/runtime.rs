//! The render driver: owns one render session and runs whole cycles.
//!
//! All render state (root component, document handle, previous tree, hook
//! store, effect queue) lives on the session object rather than in process
//! globals. Hooks reach the session ambiently through a thread-local stack
//! that is only populated while a cycle's build phase is executing.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::thread_local;

use crate::dom::{Document, DomError, NodeId};
use crate::hooks::{HookStore, Key, SetState};
use crate::reconciler;
use crate::vnode::{Component, Props, VNode};

/// Where a cycle currently is. Hooks are legal only during `Build`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Build,
    Apply,
    Effects,
}

pub(crate) struct AppInner {
    root: Component,
    document: Document,
    container: NodeId,
    previous: RefCell<Option<VNode>>,
    hooks: RefCell<HookStore>,
    effects: RefCell<Vec<Box<dyn FnOnce()>>>,
    phase: Cell<Phase>,
    dirty: Cell<bool>,
    rendered_once: Cell<bool>,
}

thread_local! {
    static ACTIVE_SESSIONS: RefCell<Vec<Rc<AppInner>>> = RefCell::new(Vec::new());
}

pub(crate) fn with_active_session<R>(f: impl FnOnce(&Rc<AppInner>) -> R) -> R {
    let session = ACTIVE_SESSIONS.with(|stack| stack.borrow().last().cloned());
    let session = session.expect(
        "no render session active: hooks may only be called from a component \
         function during a render cycle",
    );
    f(&session)
}

impl AppInner {
    fn install<R>(self: &Rc<Self>, f: impl FnOnce() -> R) -> R {
        ACTIVE_SESSIONS.with(|stack| stack.borrow_mut().push(Rc::clone(self)));
        struct Guard;
        impl Drop for Guard {
            fn drop(&mut self) {
                ACTIVE_SESSIONS.with(|stack| {
                    stack.borrow_mut().pop();
                });
            }
        }
        let guard = Guard;
        let result = f();
        drop(guard);
        result
    }

    fn assert_build_phase(&self, hook: &str) {
        assert!(
            self.phase.get() == Phase::Build,
            "{hook} called outside the build phase of a render cycle"
        );
    }

    pub(crate) fn hook_state<T: Clone + 'static>(
        self: &Rc<Self>,
        init: impl FnOnce() -> T,
    ) -> (T, SetState<T>) {
        self.assert_build_phase("use_state");
        let cell = self
            .hooks
            .borrow_mut()
            .state_slot(|| Box::new(init()) as Box<dyn Any>);
        let value = {
            let guard = cell.borrow();
            guard.downcast_ref::<T>().cloned().unwrap_or_else(|| {
                panic!("hook order changed between renders: state slot holds a different type")
            })
        };
        let setter = SetState::new(Rc::downgrade(&cell), Rc::downgrade(self));
        (value, setter)
    }

    pub(crate) fn hook_effect(self: &Rc<Self>, callback: Box<dyn FnOnce()>, deps: Vec<Key>) {
        self.assert_build_phase("use_effect");
        let changed = self.hooks.borrow_mut().effect_slot(deps);
        if changed {
            self.effects.borrow_mut().push(callback);
        }
    }

    /// Entry point for setters. Outside a cycle this renders synchronously;
    /// during one (e.g. a setter fired from an effect) it marks the session
    /// dirty and the driver loops once the cycle unwinds.
    pub(crate) fn request_render(self: &Rc<Self>) {
        if self.phase.get() != Phase::Idle {
            self.dirty.set(true);
            return;
        }
        if let Err(err) = self.run_cycles() {
            log::error!("render cycle failed: {err}");
        }
    }

    fn run_cycles(self: &Rc<Self>) -> Result<(), DomError> {
        loop {
            self.render_cycle()?;
            if !self.dirty.get() {
                return Ok(());
            }
        }
    }

    /// One atomic cycle: reset the cursor and effect queue, rebuild the
    /// virtual tree from the root, reconcile against the previous tree,
    /// commit, then run queued effects in order.
    fn render_cycle(self: &Rc<Self>) -> Result<(), DomError> {
        self.dirty.set(false);
        self.phase.set(Phase::Build);
        self.hooks.borrow_mut().reset();
        self.effects.borrow_mut().clear();

        let root = self.root.clone();
        let new_tree = self.install(|| root.render(Props::new()));

        {
            // Diagnostic only: a shrinking count is how a router legitimately
            // swaps a stateful subtree out, so the stale slots are kept for
            // the next render that reaches them again.
            let hooks = self.hooks.borrow();
            if self.rendered_once.get() && hooks.cursor() != hooks.len() {
                log::warn!(
                    "hook count changed between renders ({} -> {}); trailing slots kept",
                    hooks.len(),
                    hooks.cursor()
                );
            }
        }
        self.rendered_once.set(true);

        self.phase.set(Phase::Apply);
        let previous = self.previous.borrow_mut().take();
        let patched = reconciler::diff(
            &self.document,
            previous.as_ref(),
            Some(&new_tree),
            self.container,
            0,
        );
        *self.previous.borrow_mut() = Some(new_tree);
        patched?;

        self.phase.set(Phase::Effects);
        let effects: Vec<Box<dyn FnOnce()>> = self.effects.borrow_mut().drain(..).collect();
        for effect in effects {
            effect();
        }
        self.phase.set(Phase::Idle);
        Ok(())
    }
}

/// A live render session. Keep it alive for as long as its setters should
/// keep working: they hold weak references and go dead with the session.
pub struct App {
    inner: Rc<AppInner>,
}

impl App {
    pub fn document(&self) -> Document {
        self.inner.document.clone()
    }

    pub fn container(&self) -> NodeId {
        self.inner.container
    }

    /// The current phase, mostly useful to assert quiescence in tests.
    pub fn phase(&self) -> Phase {
        self.inner.phase.get()
    }
}

/// Registers `root` against `container` and performs the first render
/// cycle. Calling this again for the same document builds an independent
/// session; setters belonging to a dropped session become no-ops.
pub fn render(root: Component, document: &Document, container: NodeId) -> App {
    let app = App {
        inner: Rc::new(AppInner {
            root,
            document: document.clone(),
            container,
            previous: RefCell::new(None),
            hooks: RefCell::new(HookStore::default()),
            effects: RefCell::new(Vec::new()),
            phase: Cell::new(Phase::Idle),
            dirty: Cell::new(false),
            rendered_once: Cell::new(false),
        }),
    };
    if let Err(err) = app.inner.run_cycles() {
        log::error!("initial render failed: {err}");
    }
    app
}
