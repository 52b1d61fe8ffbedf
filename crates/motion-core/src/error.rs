use thiserror::Error;

/// Errors surfaced for caller-supplied configuration.
///
/// The taxonomy is deliberately narrow: bad arguments fail fast here,
/// soft misconfiguration is logged and skipped at the boundary, and a
/// missing platform structure degrades to a no-op. Nothing is fatal.
#[derive(Debug, Error)]
pub enum MotionError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}
