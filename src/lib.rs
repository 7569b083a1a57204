//! Simple Note VR - in-world notification toasts for VR scenes
//!
//! Core modules:
//! - `notifier`: Notification lifecycle (show, hold, fall away, clear)
//! - `placement`: Billboard pose in front of the viewer
//! - `sizing`: Background size derived from text length
//! - `timer`: Cancellable two-stage note timer driven by the host loop
//! - `surface`: Traits the host engine implements (viewer, text, sprite, physics)
//! - `headless`: In-memory host used by tests and the demo binary
//! - `config`: Data-driven notifier configuration

pub mod config;
pub mod error;
pub mod headless;
pub mod notifier;
pub mod placement;
pub mod sizing;
pub mod surface;
pub mod timer;

pub use config::{FontHandle, NotifierConfig, Rgba, SpriteHandle, TorquePolicy};
pub use error::NotifierError;
pub use notifier::{NoteEvent, NotePhase, Notifier, NotifierBuilder, Release};
pub use placement::{Pose, place_note};

use glam::Vec3;

/// Notifier constants
pub mod consts {
    use glam::Vec3;

    /// Host loop timestep used by the demo (90 Hz, a common headset refresh rate)
    pub const SIM_DT: f32 = 1.0 / 90.0;

    /// Character count that spans one world unit of background at multiplier 1
    pub const REFERENCE_CHAR_COUNT: f32 = 30.0;
    /// Background height at multiplier 1
    pub const BASE_BACKGROUND_HEIGHT: f32 = 0.1;
    /// Character size written to the text surface at multiplier 1
    pub const BASE_CHARACTER_SIZE: f32 = 0.01;
    /// Font size requested from the text surface
    pub const FONT_SIZE: u32 = 30;

    /// Linger time used by the single-argument notify
    pub const DEFAULT_LINGER_SECS: f32 = 1.5;
    /// Time between the fall starting and the note clearing
    pub const DROP_DELAY_SECS: f32 = 2.0;

    /// Upward impulse applied when the note starts falling
    pub const FALL_IMPULSE: f32 = 1.5;
    /// Mass of the transient rigid body
    pub const BODY_MASS: f32 = 120.0;
    /// Torque axis for the fixed policy (world left)
    pub const FIXED_TORQUE_AXIS: Vec3 = Vec3::NEG_X;

    /// Distance-to-camera multiplier range
    pub const DISTANCE_MIN: f32 = 0.4;
    pub const DISTANCE_MAX: f32 = 5.0;
    /// Character-size multiplier range
    pub const CHARACTER_SIZE_MIN: f32 = 1.0;
    pub const CHARACTER_SIZE_MAX: f32 = 30.0;
    /// Background-width multiplier range
    pub const BACKGROUND_WIDTH_MIN: f32 = 1.0;
    pub const BACKGROUND_WIDTH_MAX: f32 = 10.0;
}

/// Uniformly distributed unit vector on the sphere
#[inline]
pub fn random_unit_vector<R: rand::Rng>(rng: &mut R) -> Vec3 {
    // z uniform in [-1, 1] and a uniform azimuth gives a uniform sphere sample
    let z: f32 = rng.random_range(-1.0..=1.0);
    let phi: f32 = rng.random_range(0.0..std::f32::consts::TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}
