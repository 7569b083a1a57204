//! Simple Note VR demo
//!
//! Drives a notifier against the headless scene at headset rate and logs
//! every transition. Pass a JSON config path as the first argument to try
//! other multipliers or torque policies.
//!
//! ```text
//! RUST_LOG=info simple-note-vr [config.json]
//! ```

use glam::Vec3;

use simple_note_vr::consts::*;
use simple_note_vr::headless::HeadlessScene;
use simple_note_vr::{NotePhase, Notifier, NotifierConfig, NotifierError};

fn main() {
    env_logger::init();
    log::info!("Simple Note VR (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), NotifierError> {
    let config = match std::env::args().nth(1) {
        Some(path) => NotifierConfig::load(path)?,
        None => NotifierConfig::default(),
    };

    let scene = HeadlessScene::new();
    scene.set_viewer(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.0, -0.2, 1.0).normalize());

    let mut notifier = Notifier::builder(config)
        .viewer(scene.clone())
        .anchor(scene.clone())
        .text(scene.clone())
        .background(scene.clone())
        .physics(scene.clone())
        .build()?;

    // Timed note
    notifier.notify("Hello", DEFAULT_LINGER_SECS)?;
    let state = scene.snapshot();
    log::info!(
        "Placed at {:?}, background {:?}",
        state.note_position,
        state.background_size
    );
    run_until_idle(&mut notifier, &scene);

    // Held note, preempted once, then released
    notifier.notify_hold("Saving...");
    run_for(&mut notifier, &scene, 0.5);
    notifier.notify_hold("Saving... done");
    run_for(&mut notifier, &scene, 0.5);
    notifier.notify_release();
    notifier.notify_release();
    run_until_idle(&mut notifier, &scene);

    println!("\n✓ Demo finished, note is {}", notifier.phase().as_str());
    Ok(())
}

fn run_for(notifier: &mut Notifier, scene: &HeadlessScene, secs: f32) {
    let steps = (secs / SIM_DT).round() as u32;
    for _ in 0..steps {
        step(notifier, scene);
    }
}

fn run_until_idle(notifier: &mut Notifier, scene: &HeadlessScene) {
    // Bounded so a held note cannot spin forever
    let max_steps = ((DEFAULT_LINGER_SECS + DROP_DELAY_SECS) / SIM_DT) as u32 * 4;
    for _ in 0..max_steps {
        if notifier.phase() == NotePhase::Idle {
            return;
        }
        step(notifier, scene);
    }
    log::warn!("Note still {} after {max_steps} steps", notifier.phase().as_str());
}

fn step(notifier: &mut Notifier, scene: &HeadlessScene) {
    for event in notifier.tick(SIM_DT) {
        log::debug!("{:?}", event);
        if let Some(body) = scene.live_body() {
            log::info!(
                "Body {:?}: impulses {:?}, torques {:?}",
                body.handle,
                body.impulses,
                body.torques
            );
        }
    }
}
