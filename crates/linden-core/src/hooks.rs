//! Positional hook storage and the public hook surface.
//!
//! Hooks are identified purely by call order: the store is a flat slot
//! sequence with a cursor that the render driver resets to zero at the top
//! of every cycle. State and effects must therefore be requested in the
//! same order and number on every render; see the crate docs for the
//! hazard and the diagnostics applied when the shape drifts.

use std::any::Any;
use std::cell::RefCell;
use std::hash::Hash;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::hash;
use crate::runtime::{with_active_session, AppInner};

pub type Key = u64;

pub(crate) enum HookSlot {
    State(Rc<RefCell<Box<dyn Any>>>),
    Effect { deps: Vec<Key> },
}

#[derive(Default)]
pub(crate) struct HookStore {
    slots: Vec<HookSlot>,
    cursor: usize,
}

impl HookStore {
    pub(crate) fn reset(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// The state cell at the current cursor position, allocating it from
    /// `init` on the first render. Advances the cursor.
    pub(crate) fn state_slot(
        &mut self,
        init: impl FnOnce() -> Box<dyn Any>,
    ) -> Rc<RefCell<Box<dyn Any>>> {
        let cursor = self.cursor;
        self.cursor += 1;
        match self.slots.get(cursor) {
            Some(HookSlot::State(cell)) => Rc::clone(cell),
            Some(HookSlot::Effect { .. }) => panic!(
                "hook order changed between renders: slot {cursor} held an effect, \
                 but a state hook was requested"
            ),
            None => {
                let cell = Rc::new(RefCell::new(init()));
                self.slots.push(HookSlot::State(Rc::clone(&cell)));
                cell
            }
        }
    }

    /// Compares `deps` against the record at the current cursor position and
    /// overwrites it. Returns whether the effect should run: true on the
    /// first render at this position, or when length or any element differs.
    /// Advances the cursor.
    pub(crate) fn effect_slot(&mut self, deps: Vec<Key>) -> bool {
        let cursor = self.cursor;
        self.cursor += 1;
        let changed = match self.slots.get(cursor) {
            Some(HookSlot::Effect { deps: previous }) => {
                previous.len() != deps.len()
                    || previous.iter().zip(deps.iter()).any(|(a, b)| a != b)
            }
            Some(HookSlot::State(_)) => panic!(
                "hook order changed between renders: slot {cursor} held state, \
                 but an effect hook was requested"
            ),
            None => true,
        };
        if cursor < self.slots.len() {
            self.slots[cursor] = HookSlot::Effect { deps };
        } else {
            self.slots.push(HookSlot::Effect { deps });
        }
        changed
    }
}

/// A dependency list for [`use_effect`]: each element contributes one key,
/// and the stored list is compared by length and element-wise equality.
pub trait DepList {
    fn keys(&self) -> Vec<Key>;
}

impl DepList for () {
    fn keys(&self) -> Vec<Key> {
        Vec::new()
    }
}

macro_rules! impl_dep_list_for_tuple {
    ($($name:ident : $index:tt),+) => {
        impl<$($name: Hash),+> DepList for ($($name,)+) {
            fn keys(&self) -> Vec<Key> {
                vec![$(hash::hash_one(&self.$index)),+]
            }
        }
    };
}

impl_dep_list_for_tuple!(A: 0);
impl_dep_list_for_tuple!(A: 0, B: 1);
impl_dep_list_for_tuple!(A: 0, B: 1, C: 2);
impl_dep_list_for_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_dep_list_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_dep_list_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);

impl<T: Hash> DepList for &[T] {
    fn keys(&self) -> Vec<Key> {
        self.iter().map(hash::hash_one).collect()
    }
}

impl<T: Hash> DepList for Vec<T> {
    fn keys(&self) -> Vec<Key> {
        self.iter().map(hash::hash_one).collect()
    }
}

/// The setter half of [`use_state`]. Cloneable and `'static`; holds only
/// weak references, so setters outlive their session harmlessly as no-ops.
pub struct SetState<T> {
    slot: Weak<RefCell<Box<dyn Any>>>,
    session: Weak<AppInner>,
    _marker: PhantomData<fn(T)>,
}

impl<T> Clone for SetState<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Weak::clone(&self.slot),
            session: Weak::clone(&self.session),
            _marker: PhantomData,
        }
    }
}

impl<T: 'static> SetState<T> {
    pub(crate) fn new(slot: Weak<RefCell<Box<dyn Any>>>, session: Weak<AppInner>) -> Self {
        Self {
            slot,
            session,
            _marker: PhantomData,
        }
    }

    /// Overwrites the stored value unconditionally and triggers a full
    /// render cycle before returning. If a cycle is already in flight the
    /// re-render is deferred until it unwinds.
    pub fn set(&self, value: T) {
        let Some(slot) = self.slot.upgrade() else {
            log::warn!("state setter invoked after its render session was dropped");
            return;
        };
        *slot.borrow_mut() = Box::new(value);
        if let Some(session) = self.session.upgrade() {
            AppInner::request_render(&session);
        }
    }
}

/// Component state that survives re-renders.
///
/// The initial value is consulted only on the first render at this call
/// position; afterwards the stored value wins. Must be called from a
/// component function during an active render cycle.
pub fn use_state<T: Clone + 'static>(init: impl FnOnce() -> T) -> (T, SetState<T>) {
    with_active_session(|session| session.hook_state(init))
}

/// Schedules `callback` to run after the live tree has been patched, but
/// only when `deps` differs from the previous render's list (always on the
/// first render at this call position). Same calling constraint as
/// [`use_state`].
pub fn use_effect<D: DepList>(callback: impl FnOnce() + 'static, deps: D) {
    with_active_session(|session| session.hook_effect(Box::new(callback), deps.keys()))
}
