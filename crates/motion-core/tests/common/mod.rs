// Shared test doubles for the engine's platform seams.

#![allow(dead_code)]

use motion_core::capability::PlatformSignals;
use motion_core::context::MotionContext;
use motion_core::countup::TextTarget;
use motion_core::hero::{HeroSurface, Lane, ParticleId};
use motion_core::path::StrokeSurface;
use motion_core::pause::SessionStore;
use motion_core::runtime::Runtime;
use motion_core::scroll::RevealTarget;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub fn ctx(reduced_motion: bool, low_power: bool) -> (Runtime, Rc<MotionContext>) {
    let runtime = Runtime::new();
    let signals = PlatformSignals {
        reduced_motion,
        cpu_cores: if low_power { Some(2) } else { Some(8) },
        device_memory_gb: if low_power { Some(2.0) } else { Some(8.0) },
        save_data: false,
    };
    let ctx = MotionContext::new(runtime.clone(), &signals);
    (runtime, ctx)
}

#[derive(Debug, Default)]
pub struct RevealLog {
    pub visible: bool,
    pub transition_disabled: bool,
    pub simplified_fade: bool,
    pub will_change: bool,
    pub will_change_sets: usize,
    pub will_change_clears: usize,
    pub stagger_index: Option<usize>,
    pub duration_ms: f64,
}

#[derive(Clone, Default)]
pub struct MockReveal(pub Rc<RefCell<RevealLog>>);

impl MockReveal {
    pub fn with_duration(duration_ms: f64) -> Self {
        let reveal = Self::default();
        reveal.0.borrow_mut().duration_ms = duration_ms;
        reveal
    }
}

impl RevealTarget for MockReveal {
    fn mark_visible(&mut self) {
        self.0.borrow_mut().visible = true;
    }
    fn disable_transition(&mut self) {
        self.0.borrow_mut().transition_disabled = true;
    }
    fn set_simplified_fade(&mut self) {
        self.0.borrow_mut().simplified_fade = true;
    }
    fn set_will_change(&mut self, active: bool) {
        let mut log = self.0.borrow_mut();
        log.will_change = active;
        if active {
            log.will_change_sets += 1;
        } else {
            log.will_change_clears += 1;
        }
    }
    fn set_stagger_index(&mut self, index: usize) {
        self.0.borrow_mut().stagger_index = Some(index);
    }
    fn transition_duration_ms(&self) -> f64 {
        self.0.borrow().duration_ms
    }
}

#[derive(Debug, Default)]
pub struct StrokeLog {
    pub length: Option<f64>,
    /// (dash array length, dash offset) pairs, in application order.
    pub dashes: Vec<(Option<f64>, f64)>,
    pub transitions: Vec<Option<String>>,
    pub layouts_forced: usize,
}

#[derive(Clone, Default)]
pub struct MockStroke(pub Rc<RefCell<StrokeLog>>);

impl MockStroke {
    pub fn with_length(length: f64) -> Self {
        let stroke = Self::default();
        stroke.0.borrow_mut().length = Some(length);
        stroke
    }

    pub fn last_dash(&self) -> Option<(Option<f64>, f64)> {
        self.0.borrow().dashes.last().copied()
    }

    pub fn last_transition(&self) -> Option<Option<String>> {
        self.0.borrow().transitions.last().cloned()
    }
}

impl StrokeSurface for MockStroke {
    fn measure_length(&self) -> Option<f64> {
        self.0.borrow().length
    }
    fn set_dash(&mut self, array: Option<f64>, offset: f64) {
        self.0.borrow_mut().dashes.push((array, offset));
    }
    fn set_transition(&mut self, transition: Option<&str>) {
        self.0
            .borrow_mut()
            .transitions
            .push(transition.map(str::to_owned));
    }
    fn force_layout(&self) {
        self.0.borrow_mut().layouts_forced += 1;
    }
}

#[derive(Clone, Default)]
pub struct MockText(pub Rc<RefCell<Vec<String>>>);

impl MockText {
    pub fn last(&self) -> Option<String> {
        self.0.borrow().last().cloned()
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().len()
    }
}

impl TextTarget for MockText {
    fn set_text(&mut self, text: &str) {
        self.0.borrow_mut().push(text.to_owned());
    }
}

#[derive(Debug)]
pub struct HeroLog {
    pub sources: usize,
    pub nodes: usize,
    pub output_groups: usize,
    pub faded_sources: Vec<usize>,
    pub shown_sources: Vec<usize>,
    pub node_fills: Vec<(usize, String)>,
    pub node_transitions: Vec<(usize, Option<f64>)>,
    pub progress_fills: Vec<Option<f64>>,
    pub faded_output_groups: Vec<usize>,
    pub shown_output_groups: Vec<usize>,
    pub spawned: Vec<(ParticleId, Lane, usize, String)>,
    pub placements: Vec<(ParticleId, f64)>,
    pub removed: Vec<ParticleId>,
    next_particle: ParticleId,
}

#[derive(Clone)]
pub struct MockHero(pub Rc<RefCell<HeroLog>>);

impl MockHero {
    pub fn new(sources: usize, nodes: usize, output_groups: usize) -> Self {
        Self(Rc::new(RefCell::new(HeroLog {
            sources,
            nodes,
            output_groups,
            faded_sources: Vec::new(),
            shown_sources: Vec::new(),
            node_fills: Vec::new(),
            node_transitions: Vec::new(),
            progress_fills: Vec::new(),
            faded_output_groups: Vec::new(),
            shown_output_groups: Vec::new(),
            spawned: Vec::new(),
            placements: Vec::new(),
            removed: Vec::new(),
            next_particle: 0,
        })))
    }

    pub fn live_particles(&self) -> usize {
        let log = self.0.borrow();
        log.spawned.len() - log.removed.len()
    }
}

impl HeroSurface for MockHero {
    fn source_count(&self) -> usize {
        self.0.borrow().sources
    }
    fn node_count(&self) -> usize {
        self.0.borrow().nodes
    }
    fn output_group_count(&self) -> usize {
        self.0.borrow().output_groups
    }
    fn fade_in_source(&mut self, index: usize, _duration_ms: f64) {
        self.0.borrow_mut().faded_sources.push(index);
    }
    fn show_source(&mut self, index: usize) {
        self.0.borrow_mut().shown_sources.push(index);
    }
    fn set_node_transition(&mut self, index: usize, duration_ms: Option<f64>) {
        self.0.borrow_mut().node_transitions.push((index, duration_ms));
    }
    fn set_node_fill(&mut self, index: usize, fill: &str) {
        self.0.borrow_mut().node_fills.push((index, fill.to_owned()));
    }
    fn fill_progress(&mut self, duration_ms: f64) {
        self.0.borrow_mut().progress_fills.push(Some(duration_ms));
    }
    fn fill_progress_instant(&mut self) {
        self.0.borrow_mut().progress_fills.push(None);
    }
    fn fade_in_output_group(&mut self, index: usize, _duration_ms: f64) {
        self.0.borrow_mut().faded_output_groups.push(index);
    }
    fn show_output_group(&mut self, index: usize) {
        self.0.borrow_mut().shown_output_groups.push(index);
    }
    fn spawn_particle(&mut self, lane: Lane, line: usize, color: &str, _radius: f64) -> ParticleId {
        let mut log = self.0.borrow_mut();
        let id = log.next_particle;
        log.next_particle += 1;
        log.spawned.push((id, lane, line, color.to_owned()));
        id
    }
    fn place_particle(&mut self, id: ParticleId, _lane: Lane, _line: usize, t: f64) {
        self.0.borrow_mut().placements.push((id, t));
    }
    fn remove_particle(&mut self, id: ParticleId) {
        self.0.borrow_mut().removed.push(id);
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore(pub Rc<RefCell<HashMap<String, String>>>);

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }
    fn set(&mut self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
    }
}
