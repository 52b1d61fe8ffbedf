//! Shared per-page engine context.
//!
//! One `MotionContext` is created at page init and threaded through every
//! component; there are no module-level globals. The reduced-motion flag is
//! live: the shell's media-query subscription updates it mid-session.

use crate::capability::{is_low_power, MotionMode, PlatformSignals};
use crate::runtime::Runtime;
use std::cell::Cell;
use std::rc::Rc;

pub struct MotionContext {
    runtime: Runtime,
    reduced_motion: Cell<bool>,
    low_power: bool,
}

impl MotionContext {
    pub fn new(runtime: Runtime, signals: &PlatformSignals) -> Rc<Self> {
        Rc::new(Self {
            runtime,
            reduced_motion: Cell::new(signals.reduced_motion),
            low_power: is_low_power(signals),
        })
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion.get()
    }

    /// Update the live reduced-motion preference (media query change).
    pub fn set_reduced_motion(&self, reduced: bool) {
        self.reduced_motion.set(reduced);
    }

    /// Low-power classification fixed at construction time.
    pub fn low_power(&self) -> bool {
        self.low_power
    }

    pub fn mode(&self) -> MotionMode {
        if self.reduced_motion.get() {
            MotionMode::Reduced
        } else if self.low_power {
            MotionMode::Simplified
        } else {
            MotionMode::Full
        }
    }
}
