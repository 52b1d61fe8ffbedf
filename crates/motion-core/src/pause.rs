//! Global animation pause control.
//!
//! A single switch that halts every registered animation subsystem and
//! persists across page loads within a session. Pausing is an accessibility
//! affordance, so controllers must leave content readable when paused
//! rather than frozen mid-hide.

use std::cell::RefCell;
use std::rc::Rc;

/// Session storage key for the persisted pause flag.
pub const PAUSE_STORAGE_KEY: &str = "motion-paused";

/// Anything that can be halted and resumed by the global pause switch.
///
/// Implementations must be idempotent: pausing twice is the same as pausing
/// once, and must not hide content that is already visible.
pub trait Pausable {
    fn pause(&mut self);
    fn resume(&mut self);
}

/// Session-scoped string persistence seam.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

pub struct PauseControl<S: SessionStore> {
    store: S,
    controllers: Vec<Rc<RefCell<dyn Pausable>>>,
    paused: bool,
}

impl<S: SessionStore> PauseControl<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            controllers: Vec::new(),
            paused: false,
        }
    }

    /// Restore persisted state. When `reduced_motion` is set the page starts
    /// paused regardless of what the previous visit stored. The initial
    /// state is applied without writing it back, so a reduced-motion visit
    /// does not stamp the session as user-paused.
    pub fn init(&mut self, reduced_motion: bool) {
        let stored = self.store.get(PAUSE_STORAGE_KEY);
        if reduced_motion || stored.as_deref() == Some("true") {
            self.paused = true;
            for controller in &self.controllers {
                controller.borrow_mut().pause();
            }
        }
    }

    /// Add a controller to the switch. If the page is already paused the
    /// controller is paused immediately so late registrations cannot sneak
    /// animations past an active pause.
    pub fn register(&mut self, controller: Rc<RefCell<dyn Pausable>>) {
        if self.paused {
            controller.borrow_mut().pause();
        }
        self.controllers.push(controller);
    }

    pub fn unregister(&mut self, controller: &Rc<RefCell<dyn Pausable>>) {
        self.controllers.retain(|c| !Rc::ptr_eq(c, controller));
    }

    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        for controller in &self.controllers {
            controller.borrow_mut().pause();
        }
        self.store.set(PAUSE_STORAGE_KEY, "true");
        log::debug!("animations paused");
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        for controller in &self.controllers {
            controller.borrow_mut().resume();
        }
        self.store.set(PAUSE_STORAGE_KEY, "false");
        log::debug!("animations resumed");
    }

    pub fn toggle(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn destroy(&mut self) {
        self.controllers.clear();
    }
}
