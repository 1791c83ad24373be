//! Smash Sides headless runner
//!
//! Plays one session with a simple autopilot and prints the final snapshot.
//! Usage: `smash-sides [config.json]`

#[cfg(not(target_arch = "wasm32"))]
use smash_sides::sim::{GameEvent, Session, Zone};
#[cfg(not(target_arch = "wasm32"))]
use smash_sides::{SessionConfig, Side};

/// Frame rate the runner simulates
#[cfg(not(target_arch = "wasm32"))]
const FPS: f64 = 60.0;
/// Hard stop for sessions that never end on their own
#[cfg(not(target_arch = "wasm32"))]
const MAX_SECONDS: f64 = 600.0;

/// Smash whatever is sitting in the sweet spot
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(session: &mut Session) {
    let sweet_spot = session.zones().band(Zone::B);
    for side in [Side::Left, Side::Right] {
        let target = session
            .registry()
            .nearest_on_side(side)
            .filter(|e| sweet_spot.contains(e.distance))
            .map(|e| e.orientation);
        if let Some(orientation) = target {
            session.attempt_smash(side, orientation);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Smash Sides (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match SessionConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Could not load {path}: {e}; using defaults");
                SessionConfig::default()
            }
        },
        None => SessionConfig::default(),
    };

    let mut session = Session::new(config);
    session.start();

    let mut frame: u64 = 0;
    while !session.has_ended() {
        let now = frame as f64 / FPS;
        if now > MAX_SECONDS {
            log::warn!("Stopping after {MAX_SECONDS}s without an ending");
            break;
        }

        for event in session.update(now) {
            match event {
                GameEvent::Smashed(smash) => log::info!(
                    "{} +{} (x{})",
                    smash.zone.feedback(),
                    smash.points,
                    smash.sequence.max(1)
                ),
                GameEvent::Collided(hit) => log::info!("Hit from the {:?}", hit.side),
                GameEvent::Ended { score } => log::info!("Game over, score {score}"),
                _ => {}
            }
        }
        autopilot(&mut session);
        frame += 1;
    }

    // Flush events queued by the last smashes
    session.take_events();

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode snapshot: {e}"),
    }
    println!("Time: {}", session.time_text());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by the host page; nothing to run here
}
