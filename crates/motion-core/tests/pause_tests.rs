// Tests for the global pause switch.

mod common;

use common::MemoryStore;
use motion_core::pause::{PauseControl, Pausable, PAUSE_STORAGE_KEY, SessionStore};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct FakeController {
    pauses: usize,
    resumes: usize,
}

impl Pausable for FakeController {
    fn pause(&mut self) {
        self.pauses += 1;
    }
    fn resume(&mut self) {
        self.resumes += 1;
    }
}

#[test]
fn pause_and_resume_fan_out_to_all_controllers() {
    let mut control = PauseControl::new(MemoryStore::default());
    let a = Rc::new(RefCell::new(FakeController::default()));
    let b = Rc::new(RefCell::new(FakeController::default()));
    control.register(a.clone());
    control.register(b.clone());

    control.pause();
    assert!(control.is_paused());
    assert_eq!(a.borrow().pauses, 1);
    assert_eq!(b.borrow().pauses, 1);

    control.resume();
    assert!(!control.is_paused());
    assert_eq!(a.borrow().resumes, 1);
    assert_eq!(b.borrow().resumes, 1);
}

#[test]
fn pause_is_idempotent() {
    let mut control = PauseControl::new(MemoryStore::default());
    let c = Rc::new(RefCell::new(FakeController::default()));
    control.register(c.clone());

    control.pause();
    control.pause();
    assert_eq!(c.borrow().pauses, 1);

    control.resume();
    control.resume();
    assert_eq!(c.borrow().resumes, 1);
}

#[test]
fn toggle_flips_state() {
    let mut control = PauseControl::new(MemoryStore::default());
    control.toggle();
    assert!(control.is_paused());
    control.toggle();
    assert!(!control.is_paused());
}

#[test]
fn state_persists_to_session_store() {
    let store = MemoryStore::default();
    let mut control = PauseControl::new(store.clone());
    control.pause();
    assert_eq!(store.get(PAUSE_STORAGE_KEY).as_deref(), Some("true"));
    control.resume();
    assert_eq!(store.get(PAUSE_STORAGE_KEY).as_deref(), Some("false"));
}

#[test]
fn init_restores_persisted_pause() {
    let store = MemoryStore::default();
    store
        .0
        .borrow_mut()
        .insert(PAUSE_STORAGE_KEY.to_owned(), "true".to_owned());
    let mut control = PauseControl::new(store);
    control.init(false);
    assert!(control.is_paused());
}

#[test]
fn init_ignores_other_stored_values() {
    let store = MemoryStore::default();
    store
        .0
        .borrow_mut()
        .insert(PAUSE_STORAGE_KEY.to_owned(), "yes".to_owned());
    let mut control = PauseControl::new(store);
    control.init(false);
    assert!(!control.is_paused());
}

#[test]
fn init_with_reduced_motion_starts_paused() {
    let mut control = PauseControl::new(MemoryStore::default());
    control.init(true);
    assert!(control.is_paused());
}

#[test]
fn init_applies_state_without_writing_it_back() {
    let store = MemoryStore::default();
    let c = Rc::new(RefCell::new(FakeController::default()));
    let mut control = PauseControl::new(store.clone());
    control.register(c.clone());
    control.init(true);

    // Registered controllers are paused, but a reduced-motion visit must
    // not stamp the session as user-paused.
    assert!(control.is_paused());
    assert_eq!(c.borrow().pauses, 1);
    assert_eq!(store.get(PAUSE_STORAGE_KEY), None);
}

#[test]
fn late_registration_while_paused_pauses_immediately() {
    let mut control = PauseControl::new(MemoryStore::default());
    control.pause();

    let c = Rc::new(RefCell::new(FakeController::default()));
    control.register(c.clone());
    assert_eq!(c.borrow().pauses, 1);
}

#[test]
fn unregister_stops_fan_out() {
    let mut control = PauseControl::new(MemoryStore::default());
    let kept = Rc::new(RefCell::new(FakeController::default()));
    let dropped = Rc::new(RefCell::new(FakeController::default()));
    control.register(kept.clone());
    let handle: Rc<RefCell<dyn Pausable>> = dropped.clone();
    control.register(handle.clone());
    control.unregister(&handle);

    control.pause();
    assert_eq!(kept.borrow().pauses, 1);
    assert_eq!(dropped.borrow().pauses, 0);
}

#[test]
fn pause_round_trip_restores_prior_state() {
    let store = MemoryStore::default();
    let c = Rc::new(RefCell::new(FakeController::default()));
    {
        let mut control = PauseControl::new(store.clone());
        control.register(c.clone());
        control.pause();
    }
    // Next page load: persisted pause is re-applied to fresh controllers.
    let mut control = PauseControl::new(store);
    control.register(c.clone());
    control.init(false);
    assert!(control.is_paused());
    assert_eq!(c.borrow().pauses, 2);
}
