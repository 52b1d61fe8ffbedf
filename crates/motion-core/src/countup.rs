//! Animated numeric count-up.
//!
//! Drives a text target from a start value to an end value over a fixed
//! duration on the frame clock, formatting each intermediate value with
//! locale-aware separators. The final frame always writes the exact end
//! value so rounding drift can never leave a wrong number on screen.

use crate::context::MotionContext;
use crate::easing::Easing;
use crate::error::MotionError;
use crate::format::format_number;
use crate::runtime::{FrameId, Runtime};
use std::cell::Cell;
use std::rc::Rc;

pub const DEFAULT_COUNT_MS: f64 = 2000.0;

/// Platform seam for the element whose text is animated.
pub trait TextTarget {
    fn set_text(&mut self, text: &str);
}

pub struct CountUpOptions {
    pub start: f64,
    pub end: f64,
    pub duration_ms: f64,
    pub prefix: String,
    pub suffix: String,
    pub locale: String,
    pub decimals: u8,
    pub easing: Easing,
    /// Called with the displayed (post-rounding) value each frame.
    pub on_update: Option<Box<dyn FnMut(f64)>>,
    pub on_complete: Option<Box<dyn FnOnce()>>,
}

impl CountUpOptions {
    pub fn new(end: f64) -> Self {
        Self {
            start: 0.0,
            end,
            duration_ms: DEFAULT_COUNT_MS,
            prefix: String::new(),
            suffix: String::new(),
            locale: "en-US".to_string(),
            decimals: 0,
            easing: Easing::EaseOutQuad,
            on_update: None,
            on_complete: None,
        }
    }
}

/// Cancellation handle for a running count-up.
pub struct CountUpHandle {
    cancelled: Rc<Cell<bool>>,
    frame: Rc<Cell<Option<FrameId>>>,
    runtime: Option<Runtime>,
}

impl std::fmt::Debug for CountUpHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountUpHandle")
            .field("cancelled", &self.cancelled.get())
            .field("frame", &self.frame.get())
            .finish_non_exhaustive()
    }
}

impl CountUpHandle {
    fn inert() -> Self {
        Self {
            cancelled: Rc::new(Cell::new(true)),
            frame: Rc::new(Cell::new(None)),
            runtime: None,
        }
    }

    /// Stop the animation where it is. The exact-end write is skipped.
    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let (Some(runtime), Some(id)) = (&self.runtime, self.frame.take()) {
            runtime.cancel_frame(id);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Start a count-up on `target`.
///
/// Under reduced motion the final formatted value is written immediately
/// and both callbacks fire; the returned handle is already finished.
pub fn count_up<T: TextTarget + Clone + 'static>(
    mut target: T,
    mut opts: CountUpOptions,
    ctx: &Rc<MotionContext>,
) -> Result<CountUpHandle, MotionError> {
    if !opts.end.is_finite() {
        return Err(MotionError::NonFinite {
            field: "end",
            value: opts.end,
        });
    }
    if !opts.start.is_finite() {
        return Err(MotionError::NonFinite {
            field: "start",
            value: opts.start,
        });
    }

    if ctx.reduced_motion() {
        target.set_text(&render(&opts, opts.end));
        if let Some(mut on_update) = opts.on_update.take() {
            on_update(opts.end);
        }
        if let Some(on_complete) = opts.on_complete.take() {
            on_complete();
        }
        return Ok(CountUpHandle::inert());
    }

    let runtime = ctx.runtime().clone();
    let cancelled = Rc::new(Cell::new(false));
    let frame = Rc::new(Cell::new(None));
    let handle = CountUpHandle {
        cancelled: Rc::clone(&cancelled),
        frame: Rc::clone(&frame),
        runtime: Some(runtime.clone()),
    };

    let state = Rc::new(Cell::new(None::<f64>));
    let id = runtime.request_frame({
        let runtime = runtime.clone();
        move |now| step(runtime, target, opts, state, cancelled, frame, now)
    });
    handle.frame.set(Some(id));
    Ok(handle)
}

fn step<T: TextTarget + Clone + 'static>(
    runtime: Runtime,
    mut target: T,
    mut opts: CountUpOptions,
    start_ts: Rc<Cell<Option<f64>>>,
    cancelled: Rc<Cell<bool>>,
    frame: Rc<Cell<Option<FrameId>>>,
    now: f64,
) {
    if cancelled.get() {
        return;
    }
    let began = match start_ts.get() {
        Some(t) => t,
        None => {
            start_ts.set(Some(now));
            now
        }
    };
    let progress = if opts.duration_ms <= 0.0 {
        1.0
    } else {
        ((now - began) / opts.duration_ms).clamp(0.0, 1.0)
    };
    let eased = opts.easing.apply(progress);
    let value = opts.start + (opts.end - opts.start) * eased;

    if progress >= 1.0 {
        // Exact-end write; never trust the interpolated value here.
        target.set_text(&render(&opts, opts.end));
        if let Some(mut on_update) = opts.on_update.take() {
            on_update(opts.end);
        }
        if let Some(on_complete) = opts.on_complete.take() {
            on_complete();
        }
        return;
    }

    let displayed = if opts.decimals == 0 { value.round() } else { value };
    target.set_text(&render(&opts, displayed));
    if let Some(on_update) = opts.on_update.as_mut() {
        on_update(displayed);
    }

    let id = runtime.request_frame({
        let runtime = runtime.clone();
        let frame = Rc::clone(&frame);
        move |next| step(runtime, target, opts, start_ts, cancelled, frame, next)
    });
    frame.set(Some(id));
}

fn render(opts: &CountUpOptions, value: f64) -> String {
    format!(
        "{}{}{}",
        opts.prefix,
        format_number(value, &opts.locale, opts.decimals),
        opts.suffix
    )
}
