//! Hazard Run headless driver
//!
//! Runs the simulation with a scripted autopilot in place of a windowed
//! front end, logging progress and printing the final snapshot as JSON.
//!
//! Usage: `hazard-run [tuning.json]`

use std::time::Instant;

use hazard_run::Tuning;
use hazard_run::sim::{GameSession, TickInput, tick};

/// Frame delta used when driving without a real clock
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames to simulate (one minute of play)
const FRAMES: u32 = 60 * 60;

fn load_tuning() -> Tuning {
    let Some(path) = std::env::args().nth(1) else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Bad tuning file {}: {}, using defaults", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Cannot read {}: {}, using defaults", path, e);
            Tuning::default()
        }
    }
}

/// Simple autopilot: walk toward the goal, shoot periodically, and hop
/// over whatever blocks the way.
fn autopilot(session: &GameSession, frame: u32) -> TickInput {
    let to_goal = session.level.goal.center - session.player.planar();
    let desired = to_goal.y.atan2(to_goal.x).to_degrees();
    let error = (desired - session.player.facing_deg + 180.0).rem_euclid(360.0) - 180.0;

    let mut input = TickInput {
        fire: frame % 30 == 0,
        ..Default::default()
    };
    if error.abs() > session.player.rot_speed {
        input.rotate_left = error > 0.0;
        input.rotate_right = error < 0.0;
    } else if frame % 6 == 0 {
        input.move_forward = true;
    }
    if frame % 90 == 45 {
        input.jump = true;
    }
    input
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Hazard Run (headless) starting...");

    let seed = 423;
    let mut session = GameSession::with_tuning(seed, load_tuning());
    let started = Instant::now();

    for frame in 0..FRAMES {
        let input = autopilot(&session, frame);
        tick(&mut session, &input, FRAME_DT);
        if session.is_game_over() {
            log::info!("Run ended after {} frames", frame + 1);
            break;
        }
    }

    log::info!(
        "Simulated {} ticks in {:.1?}: level {}, score {}, lives {}, health {}",
        session.time_ticks,
        started.elapsed(),
        session.current_level,
        session.score,
        session.lives,
        session.health
    );

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
}
