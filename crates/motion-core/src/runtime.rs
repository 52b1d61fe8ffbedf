//! Single-threaded timer and frame scheduling.
//!
//! The browser drives everything through one event loop; this module models
//! that loop explicitly so the engine can be exercised without a real
//! platform. Timers fire in ascending deadline order with ties broken by
//! registration order. Frame callbacks follow rAF semantics: a callback
//! requested while a frame batch is running fires on the next frame.
//!
//! The platform shell calls [`Runtime::advance`] with the current timestamp
//! from its own animation-frame loop; tests call it with synthetic clocks.

use fnv::FnvHashSet;
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

pub type TimerId = u64;
pub type FrameId = u64;

enum TimerKind {
    Once(Box<dyn FnOnce()>),
    Repeating {
        interval_ms: f64,
        callback: Box<dyn FnMut()>,
    },
}

struct PendingTimer {
    deadline_ms: f64,
    seq: u64,
    id: TimerId,
    kind: TimerKind,
}

impl PartialEq for PendingTimer {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}
impl Eq for PendingTimer {}
impl PartialOrd for PendingTimer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for PendingTimer {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert so the earliest (deadline, seq)
        // pops first.
        other
            .deadline_ms
            .total_cmp(&self.deadline_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

struct RuntimeInner {
    timers: BinaryHeap<PendingTimer>,
    cancelled: FnvHashSet<TimerId>,
    frames: Vec<(FrameId, Box<dyn FnOnce(f64)>)>,
    cancelled_frames: FnvHashSet<FrameId>,
    next_id: u64,
    now_ms: f64,
}

/// Cloneable handle to the shared event loop.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RefCell<RuntimeInner>>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RuntimeInner {
                timers: BinaryHeap::new(),
                cancelled: FnvHashSet::default(),
                frames: Vec::new(),
                cancelled_frames: FnvHashSet::default(),
                next_id: 1,
                now_ms: 0.0,
            })),
        }
    }

    /// Current logical time in milliseconds.
    pub fn now(&self) -> f64 {
        self.inner.borrow().now_ms
    }

    /// Schedule a one-shot callback `delay_ms` from now.
    pub fn schedule(&self, delay_ms: f64, callback: impl FnOnce() + 'static) -> TimerId {
        self.push_timer(delay_ms, TimerKind::Once(Box::new(callback)))
    }

    /// Schedule a callback that repeats every `interval_ms` until cancelled.
    pub fn schedule_repeating(
        &self,
        interval_ms: f64,
        callback: impl FnMut() + 'static,
    ) -> TimerId {
        self.push_timer(
            interval_ms,
            TimerKind::Repeating {
                interval_ms,
                callback: Box::new(callback),
            },
        )
    }

    fn push_timer(&self, delay_ms: f64, kind: TimerKind) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let deadline_ms = inner.now_ms + delay_ms.max(0.0);
        inner.timers.push(PendingTimer {
            deadline_ms,
            seq: id,
            id,
            kind,
        });
        id
    }

    /// Cancel a timer. Idempotent; a no-op after the timer has fired.
    pub fn cancel(&self, id: TimerId) {
        self.inner.borrow_mut().cancelled.insert(id);
    }

    /// Request a callback on the next frame, receiving the frame timestamp.
    pub fn request_frame(&self, callback: impl FnOnce(f64) + 'static) -> FrameId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.frames.push((id, Box::new(callback)));
        id
    }

    /// Cancel a pending frame callback. Idempotent.
    pub fn cancel_frame(&self, id: FrameId) {
        self.inner.borrow_mut().cancelled_frames.insert(id);
    }

    /// Number of timers still queued (cancelled ones included until they
    /// reach the front). Mostly for idle detection and tests.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Run every timer due at or before `now_ms`, then the current frame
    /// batch. Callbacks may schedule further work; timers they schedule
    /// inside the window run in the same call, frame requests run next
    /// frame.
    pub fn advance(&self, now_ms: f64) {
        loop {
            let timer = {
                let mut inner = self.inner.borrow_mut();
                match inner.timers.peek() {
                    Some(t) if t.deadline_ms <= now_ms => {
                        let t = inner.timers.pop().expect("peeked timer");
                        if inner.cancelled.remove(&t.id) {
                            continue;
                        }
                        // Nested schedules resolve against the logical
                        // deadline, as they would in a browser task.
                        inner.now_ms = t.deadline_ms;
                        t
                    }
                    _ => break,
                }
            };
            match timer.kind {
                TimerKind::Once(cb) => cb(),
                TimerKind::Repeating {
                    interval_ms,
                    mut callback,
                } => {
                    callback();
                    let mut inner = self.inner.borrow_mut();
                    if inner.cancelled.remove(&timer.id) {
                        continue;
                    }
                    let seq = inner.next_id;
                    inner.next_id += 1;
                    inner.timers.push(PendingTimer {
                        deadline_ms: timer.deadline_ms + interval_ms.max(0.0),
                        seq,
                        id: timer.id,
                        kind: TimerKind::Repeating {
                            interval_ms,
                            callback,
                        },
                    });
                }
            }
        }

        let batch = {
            let mut inner = self.inner.borrow_mut();
            inner.now_ms = now_ms;
            std::mem::take(&mut inner.frames)
        };
        for (id, cb) in batch {
            let skip = self.inner.borrow_mut().cancelled_frames.remove(&id);
            if !skip {
                cb(now_ms);
            }
        }
    }
}

/// Resolution handle for a scheduled animation.
///
/// The engine's "promises" are polled flags: resolution means the work was
/// initiated (plus a settle buffer), not that every style transition it
/// started has visually finished.
#[derive(Clone)]
pub struct Completion {
    done: Rc<Cell<bool>>,
}

impl Completion {
    pub(crate) fn pending() -> Self {
        Self {
            done: Rc::new(Cell::new(false)),
        }
    }

    /// An already-resolved handle.
    pub fn resolved() -> Self {
        Self {
            done: Rc::new(Cell::new(true)),
        }
    }

    pub(crate) fn resolve(&self) {
        self.done.set(true);
    }

    pub fn is_done(&self) -> bool {
        self.done.get()
    }
}
