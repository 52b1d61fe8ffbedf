//! Hero pipeline animation.
//!
//! Orchestrates the five-phase "sources feed a model, model produces
//! outputs" sequence: source cards fade in, input connection lines draw
//! with particles flowing along them, the model grid illuminates in a
//! diagonal wave while a progress bar fills, output lines draw, and output
//! labels appear. After the choreographed run an ambient loop keeps
//! particles drifting along round-robined lines.
//!
//! All geometry and rendering live behind [`HeroSurface`]; this module owns
//! only timing and phase ordering.

use crate::context::MotionContext;
use crate::easing::Easing;
use crate::path::{DrawOptions, PathAnimator, StrokeSurface};
use crate::pause::Pausable;
use crate::runtime::{Completion, Runtime, TimerId};
use crate::sequence::Sequence;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// Phase start offsets within the choreographed sequence.
pub const PHASE_SOURCES_MS: f64 = 0.0;
pub const PHASE_INPUT_FLOW_MS: f64 = 1200.0;
pub const PHASE_PROCESSING_MS: f64 = 2400.0;
pub const PHASE_OUTPUT_FLOW_MS: f64 = 4200.0;
pub const PHASE_OUTPUTS_MS: f64 = 5400.0;

pub const SOURCE_STAGGER_MS: f64 = 150.0;
pub const SOURCE_FADE_MS: f64 = 300.0;

pub const INPUT_DRAW_START_MS: f64 = 200.0;
pub const INPUT_DRAW_STAGGER_MS: f64 = 150.0;
pub const INPUT_DRAW_MS: f64 = 500.0;

pub const PARTICLES_PER_LINE: usize = 3;
pub const PARTICLE_GAP_MS: f64 = 80.0;
pub const PARTICLE_LINE_STAGGER_MS: f64 = 120.0;
pub const PARTICLE_TRANSIT_MS: f64 = 800.0;
pub const PARTICLE_RADIUS: f64 = 1.5;
pub const PARTICLE_REMOVE_DELAY_MS: f64 = 50.0;

pub const GRID_COLUMNS: usize = 6;
pub const GRID_STAGGER_MS: f64 = 75.0;
pub const NODE_ACTIVATE_MS: f64 = 200.0;
pub const PROGRESS_FILL_MS: f64 = 1800.0;

pub const OUTPUT_DRAW_MS: f64 = 400.0;
pub const OUTPUT_DRAW_STAGGER_MS: f64 = 100.0;
pub const OUTPUT_LABEL_START_MS: f64 = 4400.0;
pub const OUTPUT_LABEL_STAGGER_MS: f64 = 100.0;
pub const OUTPUT_LABEL_FADE_MS: f64 = 250.0;

pub const AMBIENT_INTERVAL_MS: f64 = 2000.0;
pub const AMBIENT_TRANSIT_MS: f64 = 1200.0;

pub const PARTICLE_COLORS: [&str; 5] =
    ["#3B82F6", "#10B981", "#8B5CF6", "#F59E0B", "#EF4444"];

pub const NODE_DORMANT_FILL: &str = "#E5E7EB";
pub const NODE_ACTIVE_FILL: &str = "#10B981";

/// Which side of the model a connection line sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lane {
    Input,
    Output,
}

/// Opaque id for a spawned particle, issued by the surface.
pub type ParticleId = u64;

/// Rendering seam for the hero diagram.
///
/// `place_particle` positions a particle at a normalized distance along a
/// lane's line; the surface resolves that to coordinates.
pub trait HeroSurface {
    fn source_count(&self) -> usize;
    fn node_count(&self) -> usize;
    fn output_group_count(&self) -> usize;

    fn fade_in_source(&mut self, index: usize, duration_ms: f64);
    /// Final state, no transition.
    fn show_source(&mut self, index: usize);

    fn set_node_transition(&mut self, index: usize, duration_ms: Option<f64>);
    fn set_node_fill(&mut self, index: usize, fill: &str);

    fn fill_progress(&mut self, duration_ms: f64);
    fn fill_progress_instant(&mut self);

    fn fade_in_output_group(&mut self, index: usize, duration_ms: f64);
    fn show_output_group(&mut self, index: usize);

    fn spawn_particle(&mut self, lane: Lane, line: usize, color: &str, radius: f64) -> ParticleId;
    fn place_particle(&mut self, id: ParticleId, lane: Lane, line: usize, t: f64);
    fn remove_particle(&mut self, id: ParticleId);
}

/// Delay for a diagonal top-left to bottom-right wave over a grid laid out
/// in row-major order.
pub fn diagonal_wave_delay(index: usize, columns: usize, stagger_ms: f64) -> f64 {
    let columns = columns.max(1);
    let row = index / columns;
    let col = index % columns;
    (row + col) as f64 * stagger_ms
}

/// Normalized particle position for an elapsed time, clamped to [0, 1].
pub fn particle_progress(elapsed_ms: f64, duration_ms: f64, easing: Easing) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    easing.apply((elapsed_ms / duration_ms).clamp(0.0, 1.0))
}

/// Line picked by the ambient loop for tick `index`: the inputs followed by
/// the outputs, cycled as one list.
pub fn ambient_line(index: usize, inputs: usize, outputs: usize) -> Option<(Lane, usize)> {
    let total = inputs + outputs;
    if total == 0 {
        return None;
    }
    let slot = index % total;
    if slot < inputs {
        Some((Lane::Input, slot))
    } else {
        Some((Lane::Output, slot - inputs))
    }
}

pub struct HeroSequencer<S, P>
where
    S: HeroSurface + Clone + 'static,
    P: StrokeSurface + Clone + 'static,
{
    ctx: Rc<MotionContext>,
    surface: S,
    input_paths: Vec<Rc<RefCell<PathAnimator<P>>>>,
    output_paths: Vec<Rc<RefCell<PathAnimator<P>>>>,
    sequence: Sequence,
    ambient_timer: Rc<Cell<Option<TimerId>>>,
    ambient_index: Rc<Cell<usize>>,
    paused: Rc<Cell<bool>>,
    has_played: bool,
}

impl<S, P> HeroSequencer<S, P>
where
    S: HeroSurface + Clone + 'static,
    P: StrokeSurface + Clone + 'static,
{
    pub fn new(
        ctx: Rc<MotionContext>,
        surface: S,
        input_lines: Vec<P>,
        output_lines: Vec<P>,
    ) -> Self {
        let input_paths = input_lines
            .into_iter()
            .map(|s| Rc::new(RefCell::new(PathAnimator::new(Rc::clone(&ctx), s))))
            .collect();
        let output_paths = output_lines
            .into_iter()
            .map(|s| Rc::new(RefCell::new(PathAnimator::new(Rc::clone(&ctx), s))))
            .collect();
        let sequence = Sequence::new(Rc::clone(&ctx));
        Self {
            ctx,
            surface,
            input_paths,
            output_paths,
            sequence,
            ambient_timer: Rc::new(Cell::new(None)),
            ambient_index: Rc::new(Cell::new(0)),
            paused: Rc::new(Cell::new(false)),
            has_played: false,
        }
    }

    /// Hide all connection lines so the sequence can draw them in.
    pub fn prepare(&mut self) {
        for path in self.input_paths.iter().chain(&self.output_paths) {
            path.borrow_mut().prepare();
        }
    }

    /// Run the full choreography. Idempotent; a second call is a no-op that
    /// resolves immediately. Under reduced motion the diagram jumps to its
    /// final state and the ambient loop never starts.
    pub fn play(&mut self) -> Completion {
        if self.has_played {
            return Completion::resolved();
        }
        self.has_played = true;

        if self.ctx.reduced_motion() {
            self.show_final_state();
            return Completion::resolved();
        }

        self.prepare();
        self.build_sequence();
        self.sequence.play()
    }

    fn build_sequence(&mut self) {
        let runtime = self.ctx.runtime().clone();

        // Phase 1: source cards.
        for i in 0..self.surface.source_count() {
            let mut surface = self.surface.clone();
            self.sequence
                .add(PHASE_SOURCES_MS + i as f64 * SOURCE_STAGGER_MS, move || {
                    surface.fade_in_source(i, SOURCE_FADE_MS);
                });
        }

        // Input lines draw staggered alongside the source labels.
        for (i, path) in self.input_paths.iter().enumerate() {
            let path = Rc::clone(path);
            self.sequence.add(
                INPUT_DRAW_START_MS + i as f64 * INPUT_DRAW_STAGGER_MS,
                move || {
                    path.borrow_mut().draw(DrawOptions {
                        duration_ms: INPUT_DRAW_MS,
                        ..DrawOptions::default()
                    });
                },
            );
        }

        // Phase 2: particles stream along the input lines, color per line.
        for i in 0..self.input_paths.len() {
            let color = PARTICLE_COLORS[i % PARTICLE_COLORS.len()];
            for p in 0..PARTICLES_PER_LINE {
                let runtime = runtime.clone();
                let surface = self.surface.clone();
                let offset = PHASE_INPUT_FLOW_MS
                    + i as f64 * PARTICLE_LINE_STAGGER_MS
                    + p as f64 * PARTICLE_GAP_MS;
                self.sequence.add(offset, move || {
                    launch_particle(
                        &runtime,
                        surface.clone(),
                        Lane::Input,
                        i,
                        color,
                        PARTICLE_TRANSIT_MS,
                    );
                });
            }
        }

        // Phase 3: grid wave and progress fill.
        for n in 0..self.surface.node_count() {
            let mut surface = self.surface.clone();
            let offset =
                PHASE_PROCESSING_MS + diagonal_wave_delay(n, GRID_COLUMNS, GRID_STAGGER_MS);
            self.sequence.add(offset, move || {
                surface.set_node_transition(n, Some(NODE_ACTIVATE_MS));
                surface.set_node_fill(n, NODE_ACTIVE_FILL);
            });
        }
        {
            let mut surface = self.surface.clone();
            self.sequence.add(PHASE_PROCESSING_MS, move || {
                surface.fill_progress(PROGRESS_FILL_MS);
            });
        }

        // Phase 4: output lines.
        for (i, path) in self.output_paths.iter().enumerate() {
            let path = Rc::clone(path);
            self.sequence.add(
                PHASE_OUTPUT_FLOW_MS + i as f64 * OUTPUT_DRAW_STAGGER_MS,
                move || {
                    path.borrow_mut().draw(DrawOptions {
                        duration_ms: OUTPUT_DRAW_MS,
                        ..DrawOptions::default()
                    });
                },
            );
        }

        // Output labels follow the line draws.
        for i in 0..self.surface.output_group_count() {
            let mut surface = self.surface.clone();
            self.sequence.add(
                OUTPUT_LABEL_START_MS + i as f64 * OUTPUT_LABEL_STAGGER_MS,
                move || {
                    surface.fade_in_output_group(i, OUTPUT_LABEL_FADE_MS);
                },
            );
        }

        // Phase 5: the ambient tail takes over at the final boundary.
        {
            let surface = self.surface.clone();
            let ambient_timer = Rc::clone(&self.ambient_timer);
            let ambient_index = Rc::clone(&self.ambient_index);
            let paused = Rc::clone(&self.paused);
            let inputs = self.input_paths.len();
            let outputs = self.output_paths.len();
            self.sequence.add(PHASE_OUTPUTS_MS, move || {
                if !paused.get() {
                    start_ambient_flow(
                        &runtime,
                        surface.clone(),
                        Rc::clone(&ambient_timer),
                        Rc::clone(&ambient_index),
                        inputs,
                        outputs,
                    );
                }
            });
        }
    }

    /// Everything visible, lines fully drawn, no motion.
    pub fn show_final_state(&mut self) {
        for i in 0..self.surface.source_count() {
            self.surface.show_source(i);
        }
        for path in self.input_paths.iter().chain(&self.output_paths) {
            path.borrow_mut().skip_to_drawn();
        }
        for n in 0..self.surface.node_count() {
            self.surface.set_node_transition(n, None);
            self.surface.set_node_fill(n, NODE_ACTIVE_FILL);
        }
        self.surface.fill_progress_instant();
        for i in 0..self.surface.output_group_count() {
            self.surface.show_output_group(i);
        }
    }

    pub fn has_played(&self) -> bool {
        self.has_played
    }

    pub fn is_ambient_running(&self) -> bool {
        self.ambient_timer.get().is_some()
    }

    fn stop_ambient(&self) {
        if let Some(id) = self.ambient_timer.take() {
            self.ctx.runtime().cancel(id);
        }
    }

    pub fn destroy(&mut self) {
        self.stop_ambient();
        self.sequence.clear();
        self.paused.set(true);
    }
}

impl<S, P> Pausable for HeroSequencer<S, P>
where
    S: HeroSurface + Clone + 'static,
    P: StrokeSurface + Clone + 'static,
{
    /// Stop the ambient loop and drop not-yet-fired steps. Steps that
    /// already ran are left as they are.
    fn pause(&mut self) {
        self.paused.set(true);
        self.stop_ambient();
        self.sequence.cancel();
    }

    /// Resume restarts only the ambient loop. The one-shot choreography is
    /// never replayed.
    fn resume(&mut self) {
        self.paused.set(false);
        if self.has_played && self.ambient_timer.get().is_none() {
            start_ambient_flow(
                self.ctx.runtime(),
                self.surface.clone(),
                Rc::clone(&self.ambient_timer),
                Rc::clone(&self.ambient_index),
                self.input_paths.len(),
                self.output_paths.len(),
            );
        }
    }
}

/// Animate one particle along a line on the frame clock, removing it
/// shortly after arrival.
fn launch_particle<S: HeroSurface + Clone + 'static>(
    runtime: &Runtime,
    mut surface: S,
    lane: Lane,
    line: usize,
    color: &str,
    duration_ms: f64,
) {
    let id = surface.spawn_particle(lane, line, color, PARTICLE_RADIUS);
    surface.place_particle(id, lane, line, 0.0);
    let start: Rc<Cell<Option<f64>>> = Rc::new(Cell::new(None));
    let rt = runtime.clone();
    runtime.request_frame(move |now| {
        particle_step(rt, surface, id, lane, line, duration_ms, start, now)
    });
}

#[allow(clippy::too_many_arguments)]
fn particle_step<S: HeroSurface + Clone + 'static>(
    runtime: Runtime,
    mut surface: S,
    id: ParticleId,
    lane: Lane,
    line: usize,
    duration_ms: f64,
    start: Rc<Cell<Option<f64>>>,
    now: f64,
) {
    let began = match start.get() {
        Some(t) => t,
        None => {
            start.set(Some(now));
            now
        }
    };
    let elapsed = now - began;
    let t = particle_progress(elapsed, duration_ms, Easing::EaseOutQuad);
    surface.place_particle(id, lane, line, t);
    if elapsed >= duration_ms {
        let mut cleanup = surface.clone();
        runtime.schedule(PARTICLE_REMOVE_DELAY_MS, move || {
            cleanup.remove_particle(id);
        });
        return;
    }
    let rt = runtime.clone();
    runtime.request_frame(move |next| {
        particle_step(rt, surface, id, lane, line, duration_ms, start, next)
    });
}

/// Round-robin ambient particles, one every interval, over the combined
/// line list.
fn start_ambient_flow<S: HeroSurface + Clone + 'static>(
    runtime: &Runtime,
    surface: S,
    ambient_timer: Rc<Cell<Option<TimerId>>>,
    ambient_index: Rc<Cell<usize>>,
    inputs: usize,
    outputs: usize,
) {
    if inputs == 0 && outputs == 0 {
        return;
    }
    let rt = runtime.clone();
    let id = runtime.schedule_repeating(AMBIENT_INTERVAL_MS, move || {
        let index = ambient_index.get();
        ambient_index.set(index + 1);
        if let Some((lane, line)) = ambient_line(index, inputs, outputs) {
            let color = PARTICLE_COLORS[index % PARTICLE_COLORS.len()];
            launch_particle(&rt, surface.clone(), lane, line, color, AMBIENT_TRANSIT_MS);
        }
    });
    ambient_timer.set(Some(id));
}
