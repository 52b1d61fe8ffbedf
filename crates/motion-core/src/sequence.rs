//! Ordered multi-step animation sequences.
//!
//! A `Sequence` is a set of (offset, action) steps played back relative to a
//! single start instant. Resolution means every step was *initiated*, not
//! that step-internal animations finished; callers that need the latter keep
//! the per-step [`Completion`] handles themselves.

use crate::context::MotionContext;
use crate::runtime::{Completion, TimerId};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Padding after the last step fires before the play handle resolves.
pub const SETTLE_BUFFER_MS: f64 = 100.0;

struct Step {
    offset_ms: f64,
    action: Rc<RefCell<dyn FnMut()>>,
}

pub struct Sequence {
    ctx: Rc<MotionContext>,
    steps: Vec<Step>,
    pending: SmallVec<[TimerId; 8]>,
    playing: Rc<Cell<bool>>,
}

impl Sequence {
    pub fn new(ctx: Rc<MotionContext>) -> Self {
        Self {
            ctx,
            steps: Vec::new(),
            pending: SmallVec::new(),
            playing: Rc::new(Cell::new(false)),
        }
    }

    /// Append a step firing `offset_ms` after `play()`. Chainable.
    pub fn add(&mut self, offset_ms: f64, action: impl FnMut() + 'static) -> &mut Self {
        self.steps.push(Step {
            offset_ms,
            action: Rc::new(RefCell::new(action)),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    /// Play the sequence.
    ///
    /// Steps execute in ascending offset order, ties broken by insertion
    /// order. Under reduced motion every action runs immediately and the
    /// handle resolves at once. Playing while already playing warns and
    /// returns a resolved handle without scheduling anything.
    pub fn play(&mut self) -> Completion {
        if self.playing.get() {
            log::warn!("sequence: play() while already playing");
            return Completion::resolved();
        }
        self.playing.set(true);

        if self.ctx.reduced_motion() {
            for step in &self.steps {
                (step.action.borrow_mut())();
            }
            self.playing.set(false);
            return Completion::resolved();
        }

        let mut order: Vec<&Step> = self.steps.iter().collect();
        order.sort_by(|a, b| a.offset_ms.total_cmp(&b.offset_ms));
        let last_offset = order.last().map_or(0.0, |s| s.offset_ms);

        for step in order {
            let action = Rc::clone(&step.action);
            let id = self
                .ctx
                .runtime()
                .schedule(step.offset_ms, move || (action.borrow_mut())());
            self.pending.push(id);
        }

        let completion = Completion::pending();
        let resolved = completion.clone();
        let playing = Rc::clone(&self.playing);
        let id = self
            .ctx
            .runtime()
            .schedule(last_offset + SETTLE_BUFFER_MS, move || {
                playing.set(false);
                resolved.resolve();
            });
        self.pending.push(id);
        completion
    }

    /// Abort all not-yet-fired steps. Fired steps are not rolled back.
    pub fn cancel(&mut self) {
        for id in self.pending.drain(..) {
            self.ctx.runtime().cancel(id);
        }
        self.playing.set(false);
    }

    /// Cancel and drop every step.
    pub fn clear(&mut self) {
        self.cancel();
        self.steps.clear();
    }
}
