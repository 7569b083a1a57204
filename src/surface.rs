//! Host engine surfaces
//!
//! The notifier never renders or simulates anything itself. It drives these
//! traits, which the host engine implements on top of its own text meshes,
//! sprites and physics solver.

use glam::{Quat, Vec2, Vec3};

use crate::config::{FontHandle, Rgba, SpriteHandle};

/// The active camera, polled once each time a note is shown
pub trait Viewer {
    fn position(&self) -> Vec3;
    fn forward(&self) -> Vec3;
}

/// Root transform of the note; text, background and body hang off it
pub trait NoteAnchor {
    fn set_pose(&mut self, position: Vec3, rotation: Quat);
}

/// Point of the text block placed at the note's origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    MiddleCenter,
}

/// Horizontal alignment of lines within the text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Text mesh on the note
pub trait TextSurface {
    fn set_text(&mut self, text: &str);
    fn set_character_size(&mut self, size: f32);
    fn set_font_size(&mut self, size: u32);
    fn set_color(&mut self, color: Rgba);
    /// Font and its material
    fn set_font(&mut self, font: FontHandle);
    fn set_anchor(&mut self, anchor: TextAnchor);
    fn set_alignment(&mut self, alignment: TextAlignment);
}

/// Background sprite behind the text
pub trait BackgroundSurface {
    fn set_sprite(&mut self, sprite: SpriteHandle);
    fn set_color(&mut self, color: Rgba);
    fn set_size(&mut self, size: Vec2);
}

/// Opaque id of a rigid body attached by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u64);

/// Rigid body parameters for the falling note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySettings {
    pub mass: f32,
    pub use_gravity: bool,
    /// Interpolate rendered pose between physics steps
    pub interpolate: bool,
}

/// Attaches transient rigid bodies to the note's transform
pub trait PhysicsProvider {
    fn attach_body(&mut self, settings: BodySettings) -> BodyHandle;
    /// Instantaneous linear impulse
    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3);
    /// Instantaneous angular impulse
    fn apply_torque_impulse(&mut self, body: BodyHandle, torque: Vec3);
    /// Remove the body; the note keeps whatever pose the solver left it in
    fn detach_body(&mut self, body: BodyHandle);
}
