//! Easing curves shared by the frame-driven animators.
//!
//! Stroke-draw transitions run on CSS and keep their cubic-bezier strings;
//! everything driven from the frame loop uses the quadratic curves below.

/// CSS easing for path draw transitions (gentle deceleration).
pub const DRAW_EASING: &str = "cubic-bezier(0.25, 0.46, 0.45, 0.94)";

/// CSS easing for path erase transitions (acceleration into the erase).
pub const ERASE_EASING: &str = "cubic-bezier(0.55, 0.06, 0.68, 0.19)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Slow start, fast finish. Used where acceleration emphasizes scale.
    EaseInQuad,
    /// Fast start, slow finish. Default for counters: the deceleration
    /// keeps the target number readable as it lands.
    #[default]
    EaseOutQuad,
}

impl Easing {
    /// Map a progress fraction in [0, 1] to its eased fraction.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
        }
    }

    /// Parse the declarative easing names used in element attributes.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Easing::Linear),
            "ease-in" => Some(Easing::EaseInQuad),
            "ease-out" => Some(Easing::EaseOutQuad),
            _ => None,
        }
    }
}
