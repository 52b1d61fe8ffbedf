//! Platform-independent animation engine for the marketing site's motion
//! layer: scroll-triggered reveals, timed sequences, SVG stroke draws,
//! count-ups, the hero pipeline choreography, and the global pause switch.
//!
//! Nothing in this crate touches the DOM. Time comes from an externally
//! clocked [`runtime::Runtime`]; rendering goes through the trait seams
//! each module defines (`RevealTarget`, `StrokeSurface`, `TextTarget`,
//! `HeroSurface`, `SessionStore`). The companion web crate binds those
//! seams to the browser.

pub mod capability;
pub mod context;
pub mod countup;
pub mod easing;
pub mod error;
pub mod format;
pub mod hero;
pub mod path;
pub mod pause;
pub mod perf;
pub mod runtime;
pub mod scroll;
pub mod sequence;

pub use capability::{MotionMode, PlatformSignals};
pub use context::MotionContext;
pub use error::MotionError;
pub use runtime::{Completion, Runtime};
