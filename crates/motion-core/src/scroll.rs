//! Scroll-triggered reveals.
//!
//! Scroll TRIGGERS animations, it does not scrub them: each registered
//! element transitions exactly once from dormant to revealed when it first
//! crosses its visibility threshold, and never reverts on scroll-up. The
//! platform shell owns the actual visibility watchers; it feeds
//! intersections into [`ScrollTrigger::handle_intersection`] and creates
//! one watcher per [`ObserverGroup`] returned from `init()`.

use crate::capability::MotionMode;
use crate::context::MotionContext;
use crate::pause::Pausable;
use crate::runtime::{Runtime, TimerId};
use std::cell::Cell;
use std::rc::Rc;

/// Fraction of the viewport height the trigger point is pulled up by in
/// full mode, so elements animate before reaching the exact center.
pub const ROOT_MARGIN_BOTTOM_PCT: f64 = 20.0;

/// Extra time past the transition duration before the `will-change` hint is
/// force-cleared when no transition-end notification arrives (elements that
/// become `display: none` never emit one).
pub const WILL_CHANGE_FALLBACK_MS: f64 = 100.0;

/// Fade applied in simplified (low-power) mode.
pub const SIMPLIFIED_FADE_MS: f64 = 100.0;

/// Declarative visibility threshold classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThresholdKind {
    /// 25 % visible. Default for text content.
    #[default]
    Content,
    /// 50 % visible. For visual blocks that need more presence on screen.
    Visual,
    /// Any intersection at all.
    Immediate,
}

impl ThresholdKind {
    pub fn ratio(self) -> f64 {
        match self {
            ThresholdKind::Content => 0.25,
            ThresholdKind::Visual => 0.50,
            ThresholdKind::Immediate => 0.0,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "content" => Some(ThresholdKind::Content),
            "visual" => Some(ThresholdKind::Visual),
            "immediate" => Some(ThresholdKind::Immediate),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Unobserved,
    Observed,
    Revealed,
}

/// Per-element declarative configuration, read once at registration.
#[derive(Clone, Debug, Default)]
pub struct RevealSpec {
    pub threshold: ThresholdKind,
    /// Extra delay before the reveal transition starts.
    pub delay_ms: f64,
    /// Position within a stagger-group container, when nested in one.
    pub stagger_index: Option<usize>,
}

/// Stable handle for a registered element; registration order is the
/// tie-break order for everything downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementKey(pub usize);

/// Parameters for one platform visibility watcher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverConfig {
    pub threshold: f64,
    pub root_margin_bottom_pct: f64,
}

/// A watcher plus the elements it should observe.
#[derive(Clone, Debug)]
pub struct ObserverGroup {
    pub config: ObserverConfig,
    pub members: Vec<ElementKey>,
}

#[derive(Clone, Copy, Debug)]
pub struct ScrollOptions {
    /// Skip animations entirely when the user prefers reduced motion.
    pub respect_reduced_motion: bool,
    /// Animate only on first viewport entry; no re-animation on scroll back.
    pub once_only: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            respect_reduced_motion: true,
            once_only: true,
        }
    }
}

/// Platform seam for one revealable element.
pub trait RevealTarget {
    /// Apply the revealed marker; CSS owns the actual transition.
    fn mark_visible(&mut self);
    /// Disable transitions so the final state applies instantly.
    fn disable_transition(&mut self);
    /// Replace the transition with the short simplified fade.
    fn set_simplified_fade(&mut self);
    /// Toggle the compositor `will-change` hint.
    fn set_will_change(&mut self, active: bool);
    /// Expose the stagger position as a custom style property.
    fn set_stagger_index(&mut self, index: usize);
    /// Effective transition duration, for the fallback cleanup timer.
    fn transition_duration_ms(&self) -> f64;
}

struct Entry<E> {
    target: E,
    spec: RevealSpec,
    state: RevealState,
    /// Set once the revealed marker has actually been applied (the state
    /// flips at trigger time, before any extra delay elapses).
    marked: Rc<Cell<bool>>,
    cleanup_done: Rc<Cell<bool>>,
    fallback_timer: Rc<Cell<Option<TimerId>>>,
}

pub struct ScrollTrigger<E: RevealTarget + Clone + 'static> {
    ctx: Rc<MotionContext>,
    options: ScrollOptions,
    entries: Vec<Entry<E>>,
    mode: MotionMode,
    paused: bool,
    initialized: bool,
}

impl<E: RevealTarget + Clone + 'static> ScrollTrigger<E> {
    pub fn new(ctx: Rc<MotionContext>, options: ScrollOptions) -> Self {
        Self {
            ctx,
            options,
            entries: Vec::new(),
            mode: MotionMode::Full,
            paused: false,
            initialized: false,
        }
    }

    /// Register an element before `init()`. Returns its key.
    pub fn register(&mut self, target: E, spec: RevealSpec) -> ElementKey {
        let key = ElementKey(self.entries.len());
        self.entries.push(Entry {
            target,
            spec,
            state: RevealState::Unobserved,
            marked: Rc::new(Cell::new(false)),
            cleanup_done: Rc::new(Cell::new(false)),
            fallback_timer: Rc::new(Cell::new(None)),
        });
        key
    }

    /// Classify the session and build the watcher plan.
    ///
    /// Reduced motion reveals everything synchronously and returns no
    /// groups. Low power returns a single zero-threshold group. Full mode
    /// returns one group per distinct threshold class, each with the pulled
    /// up trigger margin, and assigns stagger indices.
    pub fn init(&mut self) -> Vec<ObserverGroup> {
        if self.initialized {
            return Vec::new();
        }
        self.initialized = true;

        self.mode = if self.options.respect_reduced_motion && self.ctx.reduced_motion() {
            MotionMode::Reduced
        } else if self.ctx.low_power() {
            MotionMode::Simplified
        } else {
            MotionMode::Full
        };

        match self.mode {
            MotionMode::Reduced => {
                self.reveal_all();
                Vec::new()
            }
            MotionMode::Simplified => {
                let members: Vec<ElementKey> = (0..self.entries.len()).map(ElementKey).collect();
                for entry in &mut self.entries {
                    entry.state = RevealState::Observed;
                }
                if members.is_empty() {
                    return Vec::new();
                }
                vec![ObserverGroup {
                    config: ObserverConfig {
                        threshold: 0.0,
                        root_margin_bottom_pct: 0.0,
                    },
                    members,
                }]
            }
            MotionMode::Full => {
                for entry in &mut self.entries {
                    if let Some(index) = entry.spec.stagger_index {
                        entry.target.set_stagger_index(index);
                    }
                    entry.state = RevealState::Observed;
                }
                let mut groups = Vec::new();
                for kind in [
                    ThresholdKind::Content,
                    ThresholdKind::Visual,
                    ThresholdKind::Immediate,
                ] {
                    let members: Vec<ElementKey> = self
                        .entries
                        .iter()
                        .enumerate()
                        .filter(|(_, e)| e.spec.threshold == kind)
                        .map(|(i, _)| ElementKey(i))
                        .collect();
                    if !members.is_empty() {
                        groups.push(ObserverGroup {
                            config: ObserverConfig {
                                threshold: kind.ratio(),
                                root_margin_bottom_pct: ROOT_MARGIN_BOTTOM_PCT,
                            },
                            members,
                        });
                    }
                }
                groups
            }
        }
    }

    /// Feed an intersection change for `key`.
    ///
    /// Returns true when the element was consumed by this crossing, i.e.
    /// the shell should unobserve it under once-only semantics.
    pub fn handle_intersection(&mut self, key: ElementKey, is_intersecting: bool) -> bool {
        if self.paused || !is_intersecting {
            return false;
        }
        let Some(entry) = self.entries.get_mut(key.0) else {
            log::warn!("scroll: intersection for unknown element {key:?}");
            return false;
        };
        if entry.state == RevealState::Revealed {
            return false;
        }
        entry.state = RevealState::Revealed;

        if self.mode == MotionMode::Simplified {
            entry.target.set_simplified_fade();
            entry.target.mark_visible();
            entry.marked.set(true);
            return self.options.once_only;
        }

        let runtime = self.ctx.runtime().clone();
        let target = entry.target.clone();
        let marked = Rc::clone(&entry.marked);
        let cleanup_done = Rc::clone(&entry.cleanup_done);
        let fallback = Rc::clone(&entry.fallback_timer);
        if entry.spec.delay_ms > 0.0 {
            let rt = runtime.clone();
            runtime.schedule(entry.spec.delay_ms, move || {
                animate_target(&rt, target, marked, cleanup_done, fallback);
            });
        } else {
            animate_target(&runtime, target, marked, cleanup_done, fallback);
        }
        self.options.once_only
    }

    /// The platform saw the reveal transition finish for `key`: clear the
    /// compositor hint now and drop the fallback timer.
    pub fn notify_transition_end(&mut self, key: ElementKey) {
        let Some(entry) = self.entries.get_mut(key.0) else {
            return;
        };
        if !entry.cleanup_done.replace(true) {
            entry.target.set_will_change(false);
        }
        if let Some(id) = entry.fallback_timer.take() {
            self.ctx.runtime().cancel(id);
        }
    }

    /// Force every not-yet-revealed element to its final state, no
    /// animation. Used for reduced-motion (initial or live toggle).
    pub fn reveal_all(&mut self) {
        for entry in &mut self.entries {
            force_reveal(entry);
        }
    }

    /// Observe a single late-added element. Returns the watcher parameters
    /// for it, or `None` when it was revealed synchronously. The config
    /// follows the mode the session was classified into at `init()`.
    pub fn observe(&mut self, target: E, spec: RevealSpec) -> Option<(ElementKey, ObserverConfig)> {
        let threshold = spec.threshold;
        let key = self.register(target, spec);
        if self.options.respect_reduced_motion && self.ctx.reduced_motion() {
            force_reveal(&mut self.entries[key.0]);
            return None;
        }
        let entry = &mut self.entries[key.0];
        entry.state = RevealState::Observed;
        let config = match self.mode {
            MotionMode::Simplified => ObserverConfig {
                threshold: 0.0,
                root_margin_bottom_pct: 0.0,
            },
            _ => {
                if let Some(index) = entry.spec.stagger_index {
                    entry.target.set_stagger_index(index);
                }
                ObserverConfig {
                    threshold: threshold.ratio(),
                    root_margin_bottom_pct: ROOT_MARGIN_BOTTOM_PCT,
                }
            }
        };
        Some((key, config))
    }

    pub fn state(&self, key: ElementKey) -> Option<RevealState> {
        self.entries.get(key.0).map(|e| e.state)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn once_only(&self) -> bool {
        self.options.once_only
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    /// Drop all registrations. The shell disconnects its watchers.
    pub fn destroy(&mut self) {
        self.entries.clear();
        self.paused = false;
        self.initialized = false;
    }
}

impl<E: RevealTarget + Clone + 'static> Pausable for ScrollTrigger<E> {
    /// Suppress future intersection reveals and force-show everything still
    /// hidden, so no content sits invisible while paused.
    fn pause(&mut self) {
        self.paused = true;
        for entry in &mut self.entries {
            force_reveal(entry);
        }
    }

    /// Re-enable intersection reveals. Force-shown elements stay revealed.
    fn resume(&mut self) {
        self.paused = false;
    }
}

fn force_reveal<E: RevealTarget + Clone + 'static>(entry: &mut Entry<E>) {
    if entry.marked.get() {
        return;
    }
    entry.target.disable_transition();
    entry.target.mark_visible();
    entry.marked.set(true);
    entry.state = RevealState::Revealed;
}

/// Apply the reveal with the will-change dance: hint on, marker applied,
/// hint cleared on transition end or by the fallback timer, whichever comes
/// first (exactly once).
fn animate_target<E: RevealTarget + Clone + 'static>(
    runtime: &Runtime,
    mut target: E,
    marked: Rc<Cell<bool>>,
    cleanup_done: Rc<Cell<bool>>,
    fallback: Rc<Cell<Option<TimerId>>>,
) {
    target.set_will_change(true);
    target.mark_visible();
    marked.set(true);

    let duration = target.transition_duration_ms();
    let mut cleanup_target = target.clone();
    let id = runtime.schedule(duration + WILL_CHANGE_FALLBACK_MS, move || {
        if !cleanup_done.replace(true) {
            cleanup_target.set_will_change(false);
        }
    });
    fallback.set(Some(id));
}
