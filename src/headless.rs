//! In-memory host
//!
//! Implements every surface trait on top of one shared scene record so tests
//! and the demo binary can drive a notifier without an engine and inspect
//! exactly what it did.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Quat, Vec2, Vec3};

use crate::config::{FontHandle, Rgba, SpriteHandle};
use crate::surface::{
    BackgroundSurface, BodyHandle, BodySettings, NoteAnchor, PhysicsProvider, TextAlignment,
    TextAnchor, TextSurface, Viewer,
};

/// A rigid body currently attached to the note
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRecord {
    pub handle: BodyHandle,
    pub settings: BodySettings,
    pub impulses: Vec<Vec3>,
    pub torques: Vec<Vec3>,
}

/// Everything the notifier has written to the host
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    // === Viewer ===
    pub viewer_position: Vec3,
    pub viewer_forward: Vec3,

    // === Note transform ===
    pub note_position: Vec3,
    pub note_rotation: Quat,
    pub pose_updates: u32,

    // === Text ===
    pub text: String,
    pub character_size: f32,
    pub font_size: u32,
    pub text_color: Rgba,
    pub font: Option<FontHandle>,
    pub anchor: Option<TextAnchor>,
    pub alignment: Option<TextAlignment>,

    // === Background ===
    pub sprite: Option<SpriteHandle>,
    pub frame_color: Rgba,
    pub background_size: Vec2,

    // === Physics ===
    pub bodies: Vec<BodyRecord>,
    pub bodies_attached: u32,
    pub bodies_detached: u32,
    next_body: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            viewer_position: Vec3::new(0.0, 1.6, 0.0),
            viewer_forward: Vec3::Z,

            note_position: Vec3::ZERO,
            note_rotation: Quat::IDENTITY,
            pose_updates: 0,

            text: String::new(),
            character_size: 0.0,
            font_size: 0,
            text_color: Rgba::BLACK,
            font: None,
            anchor: None,
            alignment: None,

            sprite: None,
            frame_color: Rgba::BLACK,
            background_size: Vec2::ZERO,

            bodies: Vec::new(),
            bodies_attached: 0,
            bodies_detached: 0,
            next_body: 1,
        }
    }
}

/// Shared handle to a headless scene; clones see the same state
#[derive(Debug, Clone, Default)]
pub struct HeadlessScene {
    state: Rc<RefCell<SceneState>>,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the camera
    pub fn set_viewer(&self, position: Vec3, forward: Vec3) {
        let mut state = self.state.borrow_mut();
        state.viewer_position = position;
        state.viewer_forward = forward;
    }

    /// Copy of the current scene record
    pub fn snapshot(&self) -> SceneState {
        self.state.borrow().clone()
    }

    /// The single live body, if exactly one is attached
    pub fn live_body(&self) -> Option<BodyRecord> {
        let state = self.state.borrow();
        match state.bodies.as_slice() {
            [body] => Some(body.clone()),
            _ => None,
        }
    }

    fn with_body(&self, body: BodyHandle, f: impl FnOnce(&mut BodyRecord)) {
        let mut state = self.state.borrow_mut();
        match state.bodies.iter_mut().find(|b| b.handle == body) {
            Some(record) => f(record),
            None => log::warn!("Impulse on unknown body {:?}", body),
        }
    }
}

impl Viewer for HeadlessScene {
    fn position(&self) -> Vec3 {
        self.state.borrow().viewer_position
    }

    fn forward(&self) -> Vec3 {
        self.state.borrow().viewer_forward
    }
}

impl NoteAnchor for HeadlessScene {
    fn set_pose(&mut self, position: Vec3, rotation: Quat) {
        let mut state = self.state.borrow_mut();
        state.note_position = position;
        state.note_rotation = rotation;
        state.pose_updates += 1;
    }
}

impl TextSurface for HeadlessScene {
    fn set_text(&mut self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.text.clear();
        state.text.push_str(text);
    }

    fn set_character_size(&mut self, size: f32) {
        self.state.borrow_mut().character_size = size;
    }

    fn set_font_size(&mut self, size: u32) {
        self.state.borrow_mut().font_size = size;
    }

    fn set_color(&mut self, color: Rgba) {
        self.state.borrow_mut().text_color = color;
    }

    fn set_font(&mut self, font: FontHandle) {
        self.state.borrow_mut().font = Some(font);
    }

    fn set_anchor(&mut self, anchor: TextAnchor) {
        self.state.borrow_mut().anchor = Some(anchor);
    }

    fn set_alignment(&mut self, alignment: TextAlignment) {
        self.state.borrow_mut().alignment = Some(alignment);
    }
}

impl BackgroundSurface for HeadlessScene {
    fn set_sprite(&mut self, sprite: SpriteHandle) {
        self.state.borrow_mut().sprite = Some(sprite);
    }

    fn set_color(&mut self, color: Rgba) {
        self.state.borrow_mut().frame_color = color;
    }

    fn set_size(&mut self, size: Vec2) {
        self.state.borrow_mut().background_size = size;
    }
}

impl PhysicsProvider for HeadlessScene {
    fn attach_body(&mut self, settings: BodySettings) -> BodyHandle {
        let mut state = self.state.borrow_mut();
        let handle = BodyHandle(state.next_body);
        state.next_body += 1;
        state.bodies_attached += 1;
        state.bodies.push(BodyRecord {
            handle,
            settings,
            impulses: Vec::new(),
            torques: Vec::new(),
        });
        handle
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3) {
        self.with_body(body, |record| record.impulses.push(impulse));
    }

    fn apply_torque_impulse(&mut self, body: BodyHandle, torque: Vec3) {
        self.with_body(body, |record| record.torques.push(torque));
    }

    fn detach_body(&mut self, body: BodyHandle) {
        let mut state = self.state.borrow_mut();
        let before = state.bodies.len();
        state.bodies.retain(|b| b.handle != body);
        if state.bodies.len() < before {
            state.bodies_detached += 1;
        } else {
            log::warn!("Detach of unknown body {:?}", body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let scene = HeadlessScene::new();
        let mut text = scene.clone();
        TextSurface::set_text(&mut text, "shared");
        assert_eq!(scene.snapshot().text, "shared");
    }

    #[test]
    fn test_body_lifecycle() {
        let mut scene = HeadlessScene::new();
        let settings = BodySettings {
            mass: 1.0,
            use_gravity: true,
            interpolate: false,
        };
        let a = scene.attach_body(settings);
        let b = scene.attach_body(settings);
        assert_ne!(a, b);
        assert!(scene.live_body().is_none());

        scene.apply_impulse(a, Vec3::Y);
        scene.detach_body(b);
        let live = scene.live_body().expect("one body left");
        assert_eq!(live.handle, a);
        assert_eq!(live.impulses, vec![Vec3::Y]);

        scene.detach_body(a);
        let state = scene.snapshot();
        assert!(state.bodies.is_empty());
        assert_eq!(state.bodies_attached, 2);
        assert_eq!(state.bodies_detached, 2);
    }
}
