//! Notification lifecycle
//!
//! One notifier drives one note. A note is shown in front of the viewer,
//! lingers (or is held), then falls away on a transient rigid body and
//! clears:
//!
//! ```text
//! Idle --notify--> Visible --linger--> Falling --drop delay--> Idle
//! Idle --notify_hold--> Held --notify_release--^
//! ```
//!
//! A new `notify`/`notify_hold` always wins: the armed sequence is cancelled,
//! any live body is detached and the display is cleared before the new note
//! is shown. The host advances time by calling [`Notifier::tick`].

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::{NotifierConfig, TorquePolicy};
use crate::consts::*;
use crate::error::NotifierError;
use crate::placement::{Pose, place_note};
use crate::random_unit_vector;
use crate::sizing::{background_size, character_size};
use crate::surface::{
    BackgroundSurface, BodyHandle, BodySettings, NoteAnchor, PhysicsProvider, TextAlignment,
    TextAnchor, TextSurface, Viewer,
};
use crate::timer::{NoteTimer, SequenceId, Stage, TimerEvent};

/// Observable lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotePhase {
    /// Nothing shown
    Idle,
    /// Shown, will fall when the linger time elapses
    Visible,
    /// Shown until released
    Held,
    /// Body attached, clearing after the drop delay
    Falling,
}

impl NotePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotePhase::Idle => "idle",
            NotePhase::Visible => "visible",
            NotePhase::Held => "held",
            NotePhase::Falling => "falling",
        }
    }
}

/// Lifecycle transitions produced by [`Notifier::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteEvent {
    /// The note started falling with this torque impulse
    Falling { sequence: SequenceId, torque: Vec3 },
    /// The note was cleared
    Cleared { sequence: SequenceId },
}

/// Result of [`Notifier::notify_release`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// The held note started falling
    Released { sequence: SequenceId, torque: Vec3 },
    /// Nothing was held; state untouched
    NotHeld,
}

/// Collects the config and host surfaces for a [`Notifier`]
#[derive(Default)]
pub struct NotifierBuilder {
    config: NotifierConfig,
    viewer: Option<Box<dyn Viewer>>,
    anchor: Option<Box<dyn NoteAnchor>>,
    text: Option<Box<dyn TextSurface>>,
    background: Option<Box<dyn BackgroundSurface>>,
    physics: Option<Box<dyn PhysicsProvider>>,
}

impl NotifierBuilder {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn viewer(mut self, viewer: impl Viewer + 'static) -> Self {
        self.viewer = Some(Box::new(viewer));
        self
    }

    pub fn anchor(mut self, anchor: impl NoteAnchor + 'static) -> Self {
        self.anchor = Some(Box::new(anchor));
        self
    }

    pub fn text(mut self, text: impl TextSurface + 'static) -> Self {
        self.text = Some(Box::new(text));
        self
    }

    pub fn background(mut self, background: impl BackgroundSurface + 'static) -> Self {
        self.background = Some(Box::new(background));
        self
    }

    pub fn physics(mut self, physics: impl PhysicsProvider + 'static) -> Self {
        self.physics = Some(Box::new(physics));
        self
    }

    /// Validate the config, check every surface is present and initialize them
    pub fn build(self) -> Result<Notifier, NotifierError> {
        self.config.validate()?;

        let viewer = self.viewer.ok_or(NotifierError::MissingSurface("viewer"))?;
        let anchor = self.anchor.ok_or(NotifierError::MissingSurface("anchor"))?;
        let text = self.text.ok_or(NotifierError::MissingSurface("text"))?;
        let background = self
            .background
            .ok_or(NotifierError::MissingSurface("background"))?;
        let physics = self.physics.ok_or(NotifierError::MissingSurface("physics"))?;

        let mut notifier = Notifier {
            rng: Pcg32::seed_from_u64(self.config.seed),
            character_size: character_size(BASE_CHARACTER_SIZE, self.config.character_size),
            config: self.config,
            viewer,
            anchor,
            text,
            background,
            physics,
            timer: NoteTimer::new(DROP_DELAY_SECS),
            current_text: String::new(),
            background_size: Vec2::ZERO,
            pose: Pose::default(),
            body: None,
        };
        notifier.init_surfaces();

        log::info!(
            "Notifier ready (distance={}, character_size={}, torque={})",
            notifier.config.distance,
            notifier.config.character_size,
            notifier.config.torque.as_str()
        );
        Ok(notifier)
    }
}

/// In-world notification toast
pub struct Notifier {
    config: NotifierConfig,

    viewer: Box<dyn Viewer>,
    anchor: Box<dyn NoteAnchor>,
    text: Box<dyn TextSurface>,
    background: Box<dyn BackgroundSurface>,
    physics: Box<dyn PhysicsProvider>,

    timer: NoteTimer,
    rng: Pcg32,
    /// Base character size times the multiplier, fixed at build time
    character_size: f32,

    current_text: String,
    background_size: Vec2,
    pose: Pose,
    /// Present only while falling
    body: Option<BodyHandle>,
}

impl Notifier {
    pub fn builder(config: NotifierConfig) -> NotifierBuilder {
        NotifierBuilder::new(config)
    }

    fn init_surfaces(&mut self) {
        self.text.set_character_size(self.character_size);
        self.text.set_anchor(TextAnchor::MiddleCenter);
        self.text.set_alignment(TextAlignment::Center);
        self.text.set_font_size(FONT_SIZE);
        self.text.set_color(self.config.text_color);
        self.text.set_font(self.config.font);
        self.text.set_text("");

        self.background.set_sprite(self.config.background_sprite);
        self.background.set_color(self.config.frame_color);
        self.background.set_size(Vec2::ZERO);
    }

    // === Accessors ===

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    pub fn phase(&self) -> NotePhase {
        match self.timer.stage() {
            Stage::Idle => NotePhase::Idle,
            Stage::Linger(_) => NotePhase::Visible,
            Stage::Hold => NotePhase::Held,
            Stage::Drop(_) => NotePhase::Falling,
        }
    }

    pub fn is_held(&self) -> bool {
        self.phase() == NotePhase::Held
    }

    /// Text currently displayed (empty when idle)
    pub fn text(&self) -> &str {
        &self.current_text
    }

    pub fn background_size(&self) -> Vec2 {
        self.background_size
    }

    pub fn character_size(&self) -> f32 {
        self.character_size
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Id of the armed sequence
    pub fn sequence(&self) -> Option<SequenceId> {
        self.timer.current()
    }

    // === Operations ===

    /// Show `text` and let it fall after `linger_secs`
    pub fn notify(&mut self, text: &str, linger_secs: f32) -> Result<SequenceId, NotifierError> {
        if !linger_secs.is_finite() || linger_secs < 0.0 {
            return Err(NotifierError::InvalidLinger(linger_secs));
        }

        Ok(self.show_timed(text, linger_secs))
    }

    /// Show `text` with the default linger time
    pub fn notify_default(&mut self, text: &str) -> SequenceId {
        self.show_timed(text, DEFAULT_LINGER_SECS)
    }

    /// Show `text` until [`Notifier::notify_release`]
    pub fn notify_hold(&mut self, text: &str) -> SequenceId {
        self.preempt();
        self.show(text);
        let sequence = self.timer.arm_hold();
        log::info!("Note {:?} held: {:?}", sequence, text);
        sequence
    }

    /// Drop a held note immediately
    pub fn notify_release(&mut self) -> Release {
        match self.timer.release() {
            Some(sequence) => {
                let torque = self.start_fall();
                log::info!("Note {:?} released", sequence);
                Release::Released { sequence, torque }
            }
            None => {
                log::warn!(
                    "notify_release with nothing held (phase: {})",
                    self.phase().as_str()
                );
                Release::NotHeld
            }
        }
    }

    /// Cancel whatever is showing and return to idle
    pub fn cancel(&mut self) {
        self.preempt();
    }

    /// Advance the note timer by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Vec<NoteEvent> {
        let mut events = Vec::new();
        for event in self.timer.advance(dt) {
            match event {
                TimerEvent::Fall(sequence) => {
                    let torque = self.start_fall();
                    log::info!("Note {:?} falling", sequence);
                    events.push(NoteEvent::Falling { sequence, torque });
                }
                TimerEvent::Clear(sequence) => {
                    self.reset();
                    log::info!("Note {:?} cleared", sequence);
                    events.push(NoteEvent::Cleared { sequence });
                }
            }
        }
        events
    }

    // === Internals ===

    /// Cancel the armed sequence and clear the display
    fn preempt(&mut self) {
        let cancelled = self.timer.cancel();
        if cancelled.is_some() || self.body.is_some() {
            log::debug!("Preempting note {:?}", cancelled);
            self.reset();
        }
    }

    fn show_timed(&mut self, text: &str, linger_secs: f32) -> SequenceId {
        self.preempt();
        self.show(text);
        let sequence = self.timer.arm_linger(linger_secs);
        log::info!("Note {:?} shown for {}s: {:?}", sequence, linger_secs, text);
        sequence
    }

    /// Place the note and present `text`
    fn show(&mut self, text: &str) {
        self.pose = place_note(
            self.viewer.position(),
            self.viewer.forward(),
            self.config.distance,
        );
        self.anchor.set_pose(self.pose.position, self.pose.rotation);

        self.current_text.clear();
        self.current_text.push_str(text);
        self.background_size = background_size(
            text,
            self.config.character_size,
            self.config.background_width,
        );

        self.text.set_character_size(self.character_size);
        self.text.set_text(text);
        self.background.set_size(self.background_size);
    }

    /// Attach a body and kick it; returns the torque impulse applied
    fn start_fall(&mut self) -> Vec3 {
        // A body can only be live here if a fall was already started
        if let Some(stale) = self.body.take() {
            self.physics.detach_body(stale);
        }

        let body = self.physics.attach_body(BodySettings {
            mass: BODY_MASS,
            use_gravity: true,
            interpolate: true,
        });
        let torque = self.torque_axis();
        self.physics.apply_impulse(body, Vec3::Y * FALL_IMPULSE);
        self.physics.apply_torque_impulse(body, torque);
        self.body = Some(body);
        torque
    }

    fn torque_axis(&mut self) -> Vec3 {
        match self.config.torque {
            TorquePolicy::Fixed { axis } => axis,
            TorquePolicy::Random => random_unit_vector(&mut self.rng),
        }
    }

    /// Detach any body and clear text and background
    fn reset(&mut self) {
        if let Some(body) = self.body.take() {
            self.physics.detach_body(body);
        }
        self.current_text.clear();
        self.background_size = Vec2::ZERO;
        self.text.set_text("");
        self.background.set_size(Vec2::ZERO);
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(body) = self.body.take() {
            self.physics.detach_body(body);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("phase", &self.phase())
            .field("text", &self.current_text)
            .field("background_size", &self.background_size)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
