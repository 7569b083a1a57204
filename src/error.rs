//! Notifier errors

use thiserror::Error;

/// Errors raised while configuring or driving a notifier
#[derive(Error, Debug)]
pub enum NotifierError {
    /// A required host surface was not supplied to the builder
    #[error("missing required surface: {0}")]
    MissingSurface(&'static str),

    /// A multiplier lies outside its documented range
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// Linger time must be a finite, non-negative number of seconds
    #[error("invalid linger time: {0}s")]
    InvalidLinger(f32),

    /// Torque axis for the fixed policy must be non-zero and finite
    #[error("invalid fixed torque axis: {0}")]
    InvalidTorqueAxis(glam::Vec3),

    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config document could not be parsed
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
