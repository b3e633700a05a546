use std::any::Any;

use crate::hooks::{DepList, HookStore};

#[test]
fn state_slot_is_allocated_once_and_reused() {
    let mut store = HookStore::default();
    let first = store.state_slot(|| Box::new(7i32) as Box<dyn Any>);

    store.reset();
    let second = store.state_slot(|| Box::new(99i32) as Box<dyn Any>);
    assert!(std::rc::Rc::ptr_eq(&first, &second));
    assert_eq!(second.borrow().downcast_ref::<i32>(), Some(&7));
}

#[test]
fn effect_slot_reports_first_invocation_as_changed() {
    let mut store = HookStore::default();
    assert!(store.effect_slot(vec![1]));

    store.reset();
    assert!(!store.effect_slot(vec![1]));

    store.reset();
    assert!(store.effect_slot(vec![2]));
}

#[test]
fn effect_slot_compares_by_length_and_element() {
    let mut store = HookStore::default();
    store.effect_slot(vec![1, 2]);

    store.reset();
    assert!(store.effect_slot(vec![1, 2, 3]), "length change is a change");

    store.reset();
    assert!(store.effect_slot(vec![1, 9, 3]), "element change is a change");

    store.reset();
    assert!(!store.effect_slot(vec![1, 9, 3]));
}

#[test]
fn cursor_walks_slots_in_call_order() {
    let mut store = HookStore::default();
    store.state_slot(|| Box::new(0i32) as Box<dyn Any>);
    store.effect_slot(vec![]);
    assert_eq!(store.cursor(), 2);
    assert_eq!(store.len(), 2);

    store.reset();
    assert_eq!(store.cursor(), 0);
}

#[test]
#[should_panic(expected = "hook order changed between renders")]
fn slot_shape_mismatch_panics() {
    let mut store = HookStore::default();
    store.state_slot(|| Box::new(0i32) as Box<dyn Any>);
    store.reset();
    store.effect_slot(vec![]);
}

#[test]
fn empty_deps_produce_no_keys() {
    assert!(().keys().is_empty());
}

#[test]
fn tuple_deps_hash_element_wise() {
    let a = (1, "x").keys();
    let b = (1, "x").keys();
    let c = (1, "y").keys();
    assert_eq!(a.len(), 2);
    assert_eq!(a, b);
    assert_eq!(a[0], c[0]);
    assert_ne!(a[1], c[1]);
}

#[test]
fn slice_and_vec_deps_match() {
    let values = vec![1, 2, 3];
    assert_eq!(values.keys(), values.as_slice().keys());
    assert_eq!(values.keys().len(), 3);
}
