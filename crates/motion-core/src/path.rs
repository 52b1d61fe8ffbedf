//! Stroke-dashoffset path draw animations.
//!
//! A path "draws itself" by starting with its dash pattern offset a full
//! path length (stroke hidden) and transitioning the offset to zero. The
//! engine computes the style values and their timing; applying them is the
//! platform's job behind [`StrokeSurface`].

use crate::context::MotionContext;
use crate::easing::{DRAW_EASING, ERASE_EASING};
use crate::runtime::{Completion, TimerId};
use std::rc::Rc;

/// Assumed traversal length for elements without real path geometry
/// (lines, circles rendered as strokes).
pub const FALLBACK_PATH_LENGTH: f64 = 100.0;

/// Buffer after duration + delay before the transition is handed back to CSS.
pub const DRAW_SETTLE_MS: f64 = 50.0;

pub const DEFAULT_DRAW_MS: f64 = 600.0;
pub const DEFAULT_ERASE_MS: f64 = 400.0;

/// Platform seam for a single stroked element.
pub trait StrokeSurface {
    /// Measured path length, or `None` when the element has no geometry.
    fn measure_length(&self) -> Option<f64>;
    /// Set the dash pattern. `None` clears the dash array entirely.
    fn set_dash(&mut self, dash_array: Option<f64>, dash_offset: f64);
    /// Set an inline transition; `None` restores the stylesheet default.
    fn set_transition(&mut self, transition: Option<&str>);
    /// Force a synchronous layout read so prior style writes are committed
    /// before the transition target is applied.
    fn force_layout(&self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawDirection {
    #[default]
    Forward,
    Reverse,
}

#[derive(Clone, Debug)]
pub struct DrawOptions {
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: String,
    pub direction: DrawDirection,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DRAW_MS,
            delay_ms: 0.0,
            easing: DRAW_EASING.to_owned(),
            direction: DrawDirection::Forward,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EraseOptions {
    pub duration_ms: f64,
    pub easing: String,
}

impl Default for EraseOptions {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_ERASE_MS,
            easing: ERASE_EASING.to_owned(),
        }
    }
}

/// Per-element draw/erase animator with a cached path length.
pub struct PathAnimator<S: StrokeSurface + Clone + 'static> {
    ctx: Rc<MotionContext>,
    surface: S,
    total_length: Option<f64>,
    prepared: bool,
    settle_timer: Option<TimerId>,
}

impl<S: StrokeSurface + Clone + 'static> PathAnimator<S> {
    pub fn new(ctx: Rc<MotionContext>, surface: S) -> Self {
        Self {
            ctx,
            surface,
            total_length: None,
            prepared: false,
            settle_timer: None,
        }
    }

    /// Path length, measured once and cached.
    pub fn total_length(&mut self) -> f64 {
        if self.total_length.is_none() {
            self.total_length = Some(
                self.surface
                    .measure_length()
                    .unwrap_or(FALLBACK_PATH_LENGTH),
            );
        }
        self.total_length.expect("length cached above")
    }

    /// Hide the full stroke without animating. Call before the element is
    /// visible to avoid a flash of the undrawn stroke.
    pub fn prepare(&mut self) {
        let len = self.total_length();
        self.surface.set_dash(Some(len), len);
        self.prepared = true;
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Animate from hidden to fully drawn.
    pub fn draw(&mut self, options: DrawOptions) -> Completion {
        if self.ctx.reduced_motion() {
            self.surface.set_dash(None, 0.0);
            self.prepared = false;
            return Completion::resolved();
        }

        let len = self.total_length();
        let start_offset = match options.direction {
            DrawDirection::Forward => len,
            DrawDirection::Reverse => -len,
        };
        self.surface.set_dash(Some(len), start_offset);
        self.surface.set_transition(Some(&format!(
            "stroke-dashoffset {}ms {} {}ms",
            options.duration_ms, options.easing, options.delay_ms
        )));
        // Commit the hidden state before retargeting, or the transition
        // never runs.
        self.surface.force_layout();
        self.surface.set_dash(Some(len), 0.0);
        self.prepared = false;

        self.settle(options.duration_ms + options.delay_ms)
    }

    /// Animate the stroke erasing itself back to hidden.
    pub fn erase(&mut self, options: EraseOptions) -> Completion {
        let len = self.total_length();
        if self.ctx.reduced_motion() {
            self.surface.set_dash(Some(len), len);
            self.prepared = true;
            return Completion::resolved();
        }

        self.surface.set_transition(Some(&format!(
            "stroke-dashoffset {}ms {}",
            options.duration_ms, options.easing
        )));
        self.surface.set_dash(Some(len), len);
        self.prepared = true;

        self.settle(options.duration_ms)
    }

    fn settle(&mut self, total_ms: f64) -> Completion {
        let completion = Completion::pending();
        let resolved = completion.clone();
        let mut surface = self.surface.clone();
        self.settle_timer = Some(self.ctx.runtime().schedule(
            total_ms + DRAW_SETTLE_MS,
            move || {
                surface.set_transition(None);
                resolved.resolve();
            },
        ));
        completion
    }

    /// Return synchronously to the hidden state, transitions disabled. A
    /// settle timer still in flight from a prior draw or erase is dropped
    /// so it cannot re-enable transitions afterwards.
    pub fn reset(&mut self) {
        if let Some(id) = self.settle_timer.take() {
            self.ctx.runtime().cancel(id);
        }
        let len = self.total_length();
        self.surface.set_transition(Some("none"));
        self.surface.set_dash(Some(len), len);
        self.prepared = true;
    }

    /// Jump straight to the fully drawn state (reduced-motion end state).
    pub fn skip_to_drawn(&mut self) {
        self.surface.set_dash(None, 0.0);
        self.prepared = false;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
