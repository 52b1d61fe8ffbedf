// Tests for ordered animation sequences.

mod common;

use common::ctx;
use motion_core::sequence::{Sequence, SETTLE_BUFFER_MS};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn steps_fire_in_offset_order_regardless_of_insertion() {
    let (rt, ctx) = ctx(false, false);
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut seq = Sequence::new(ctx);
    for (offset, tag) in [(300.0, "c"), (100.0, "a"), (200.0, "b")] {
        let order = Rc::clone(&order);
        seq.add(offset, move || order.borrow_mut().push(tag));
    }
    seq.play();
    rt.advance(1000.0);
    assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn equal_offsets_keep_insertion_order() {
    let (rt, ctx) = ctx(false, false);
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut seq = Sequence::new(ctx);
    for tag in ["first", "second", "third"] {
        let order = Rc::clone(&order);
        seq.add(50.0, move || order.borrow_mut().push(tag));
    }
    seq.play();
    rt.advance(100.0);
    assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn resolves_one_buffer_after_last_step() {
    let (rt, ctx) = ctx(false, false);
    let mut seq = Sequence::new(ctx);
    seq.add(100.0, || {}).add(400.0, || {});
    let done = seq.play();

    rt.advance(400.0);
    assert!(!done.is_done(), "must not resolve before the settle buffer");
    rt.advance(400.0 + SETTLE_BUFFER_MS);
    assert!(done.is_done());
    assert!(!seq.is_playing());
}

#[test]
fn reduced_motion_runs_all_steps_immediately_in_insertion_order() {
    let (rt, ctx) = ctx(true, false);
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut seq = Sequence::new(ctx);
    for (offset, tag) in [(300.0, "late"), (0.0, "early")] {
        let order = Rc::clone(&order);
        seq.add(offset, move || order.borrow_mut().push(tag));
    }
    let done = seq.play();
    assert!(done.is_done());
    assert_eq!(*order.borrow(), vec!["late", "early"]);
    assert_eq!(rt.pending_timers(), 0);
}

#[test]
fn play_while_playing_is_rejected() {
    let (rt, ctx) = ctx(false, false);
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    let mut seq = Sequence::new(ctx);
    seq.add(100.0, move || *c.borrow_mut() += 1);
    seq.play();
    let second = seq.play();
    assert!(second.is_done(), "second play resolves without scheduling");
    rt.advance(1000.0);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn cancel_stops_unfired_steps_and_clears_playing() {
    let (rt, ctx) = ctx(false, false);
    let fired = Rc::new(RefCell::new(Vec::new()));
    let mut seq = Sequence::new(ctx);
    for (offset, tag) in [(50.0, "early"), (500.0, "late")] {
        let fired = Rc::clone(&fired);
        seq.add(offset, move || fired.borrow_mut().push(tag));
    }
    let done = seq.play();
    rt.advance(100.0);
    seq.cancel();
    rt.advance(2000.0);

    assert_eq!(*fired.borrow(), vec!["early"]);
    assert!(!seq.is_playing());
    assert!(!done.is_done(), "cancelled run never resolves");
}

#[test]
fn sequence_is_replayable_after_completion() {
    let (rt, ctx) = ctx(false, false);
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    let mut seq = Sequence::new(ctx);
    seq.add(10.0, move || *c.borrow_mut() += 1);

    seq.play();
    rt.advance(200.0);
    assert_eq!(*count.borrow(), 1);

    seq.play();
    rt.advance(400.0);
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn clear_drops_steps() {
    let (rt, ctx) = ctx(false, false);
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    let mut seq = Sequence::new(ctx);
    seq.add(10.0, move || *c.borrow_mut() += 1);
    assert_eq!(seq.len(), 1);
    seq.clear();
    assert!(seq.is_empty());
    seq.play();
    rt.advance(1000.0);
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn empty_sequence_resolves_after_buffer_only() {
    let (rt, ctx) = ctx(false, false);
    let mut seq = Sequence::new(ctx);
    let done = seq.play();
    assert!(!done.is_done());
    rt.advance(SETTLE_BUFFER_MS);
    assert!(done.is_done());
}
