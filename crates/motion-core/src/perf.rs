//! Frame-rate and asset-budget sampling.
//!
//! Collects frame timestamps into a sliding window and summarizes them
//! against the budgets the animation layer is designed to: 60 fps target
//! with a 30 fps floor, bounded concurrent animations, and a capped SVG
//! payload. Reporting goes through the log facade only.

use std::collections::VecDeque;

pub const FPS_TARGET: f64 = 60.0;
pub const FPS_MINIMUM: f64 = 30.0;
pub const FRAME_BUDGET_MS: f64 = 16.67;

pub const CONCURRENT_TARGET: usize = 20;
pub const CONCURRENT_MAX: usize = 30;

pub const SVG_PAYLOAD_TARGET_KB: f64 = 30.0;
pub const SVG_PAYLOAD_MAX_KB: f64 = 50.0;

/// Frame timestamps kept in the sliding window (10s at 60fps).
pub const SAMPLE_WINDOW: usize = 600;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PerfReport {
    pub sample_count: usize,
    pub average_fps: f64,
    /// fps implied by the single worst frame in the window.
    pub min_fps: f64,
    pub worst_frame_ms: f64,
    pub dropped_frames: usize,
    pub below_minimum: bool,
    pub peak_concurrency: usize,
    pub svg_payload_kb: Option<f64>,
    pub svg_over_budget: bool,
}

pub struct PerfSampler {
    intervals: VecDeque<f64>,
    last_timestamp: Option<f64>,
    running: bool,
    peak_concurrency: usize,
    svg_payload_kb: Option<f64>,
}

impl Default for PerfSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfSampler {
    pub fn new() -> Self {
        Self {
            intervals: VecDeque::with_capacity(SAMPLE_WINDOW),
            last_timestamp: None,
            running: false,
            peak_concurrency: 0,
            svg_payload_kb: None,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
        self.last_timestamp = None;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_timestamp = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record one frame timestamp and the number of animations live during
    /// it. Intervals implying an fps outside (1, 200) are discarded as
    /// clock noise (tab switches, suspends).
    pub fn record_frame(&mut self, timestamp_ms: f64, concurrent_animations: usize) {
        if !self.running {
            return;
        }
        if concurrent_animations > self.peak_concurrency {
            self.peak_concurrency = concurrent_animations;
            if concurrent_animations > CONCURRENT_MAX {
                log::warn!(
                    "perf: {concurrent_animations} concurrent animations exceeds the {CONCURRENT_MAX} cap"
                );
            } else if concurrent_animations > CONCURRENT_TARGET {
                log::debug!(
                    "perf: {concurrent_animations} concurrent animations above the {CONCURRENT_TARGET} target"
                );
            }
        }
        if let Some(last) = self.last_timestamp {
            let interval = timestamp_ms - last;
            if interval > 5.0 && interval < 1000.0 {
                if self.intervals.len() == SAMPLE_WINDOW {
                    self.intervals.pop_front();
                }
                self.intervals.push_back(interval);
            }
        }
        self.last_timestamp = Some(timestamp_ms);
    }

    pub fn set_svg_payload_kb(&mut self, kb: f64) {
        self.svg_payload_kb = Some(kb);
        if kb > SVG_PAYLOAD_MAX_KB {
            log::warn!("svg payload {kb:.1}KB exceeds {SVG_PAYLOAD_MAX_KB}KB cap");
        } else if kb > SVG_PAYLOAD_TARGET_KB {
            log::debug!("svg payload {kb:.1}KB above {SVG_PAYLOAD_TARGET_KB}KB target");
        }
    }

    pub fn sample_count(&self) -> usize {
        self.intervals.len()
    }

    /// Summarize the current window.
    pub fn report(&self) -> PerfReport {
        let sample_count = self.intervals.len();
        if sample_count == 0 {
            return PerfReport {
                peak_concurrency: self.peak_concurrency,
                svg_payload_kb: self.svg_payload_kb,
                svg_over_budget: self
                    .svg_payload_kb
                    .map(|kb| kb > SVG_PAYLOAD_MAX_KB)
                    .unwrap_or(false),
                ..PerfReport::default()
            };
        }
        let total: f64 = self.intervals.iter().sum();
        let average_ms = total / sample_count as f64;
        let worst_frame_ms = self
            .intervals
            .iter()
            .copied()
            .fold(0.0_f64, f64::max);
        let dropped_frames = self
            .intervals
            .iter()
            .filter(|&&ms| ms > FRAME_BUDGET_MS * 2.0)
            .count();
        let average_fps = 1000.0 / average_ms;
        PerfReport {
            sample_count,
            average_fps,
            min_fps: 1000.0 / worst_frame_ms,
            worst_frame_ms,
            dropped_frames,
            below_minimum: average_fps < FPS_MINIMUM,
            peak_concurrency: self.peak_concurrency,
            svg_payload_kb: self.svg_payload_kb,
            svg_over_budget: self
                .svg_payload_kb
                .map(|kb| kb > SVG_PAYLOAD_MAX_KB)
                .unwrap_or(false),
        }
    }

    /// Log the current report at a level matched to its severity.
    pub fn log_report(&self) {
        let report = self.report();
        if report.sample_count == 0 {
            log::debug!("perf: no frame samples yet");
            return;
        }
        if report.below_minimum {
            log::warn!(
                "perf: {:.1}fps average over {} frames (minimum {FPS_MINIMUM}), {} dropped, worst {:.1}ms",
                report.average_fps,
                report.sample_count,
                report.dropped_frames,
                report.worst_frame_ms,
            );
        } else {
            log::debug!(
                "perf: {:.1}fps average over {} frames, {} dropped, worst {:.1}ms",
                report.average_fps,
                report.sample_count,
                report.dropped_frames,
                report.worst_frame_ms,
            );
        }
    }
}
