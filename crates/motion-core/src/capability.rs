//! Session capability classification.
//!
//! The platform shell samples environment signals once at startup and the
//! engine picks one of three motion modes from them. Missing signals are
//! treated as "capable": an absent device-memory reading must not push a
//! desktop browser into the simplified tier.

/// CPU core count at or below which the device is treated as low power.
pub const LOW_POWER_MAX_CORES: u32 = 2;

/// Device memory (GB) at or below which the device is treated as low power.
pub const LOW_POWER_MAX_MEMORY_GB: f64 = 2.0;

/// Raw environment signals read by the platform shell.
#[derive(Clone, Debug, Default)]
pub struct PlatformSignals {
    /// `prefers-reduced-motion: reduce` media query state.
    pub reduced_motion: bool,
    /// Logical CPU count, when the platform exposes it.
    pub cpu_cores: Option<u32>,
    /// Device memory in GB, when the platform exposes it.
    pub device_memory_gb: Option<f64>,
    /// Data-saver mode requested by the user agent.
    pub save_data: bool,
}

/// How much motion this session gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionMode {
    /// Threshold-grouped observers, full transitions, hero timeline.
    Full,
    /// Single zero-threshold observer, short fades only.
    Simplified,
    /// No animation: final visual state applied synchronously.
    Reduced,
}

/// Whether the session should degrade to simplified animations.
pub fn is_low_power(signals: &PlatformSignals) -> bool {
    if signals.reduced_motion {
        return true;
    }
    if signals.cpu_cores.is_some_and(|cores| cores <= LOW_POWER_MAX_CORES) {
        return true;
    }
    if signals
        .device_memory_gb
        .is_some_and(|gb| gb <= LOW_POWER_MAX_MEMORY_GB)
    {
        return true;
    }
    signals.save_data
}

/// Classify the session from its signals.
pub fn classify(signals: &PlatformSignals) -> MotionMode {
    if signals.reduced_motion {
        MotionMode::Reduced
    } else if is_low_power(signals) {
        MotionMode::Simplified
    } else {
        MotionMode::Full
    }
}
