//! Brickout entry point
//!
//! Headless demo run: the autopilot plays a full game and the outcome lands
//! in the log. Pass a seed as the first argument to replay a particular run;
//! set RUST_LOG=debug to watch individual bricks and items.

use brickout::Game;
use brickout::consts::*;
use brickout::platform::{FixedInput, HudLog, InputState, LogNotifier};
use brickout::sim::{GameState, GridLayout, TerminalEvent};

/// Frame budget for the demo (20 minutes at 60 ticks per second). The ball
/// path only depends on the seed, so a run that can no longer reach a brick
/// is cut off here rather than bouncing forever.
const MAX_DEMO_FRAMES: u64 = 20 * 60 * 60;

fn main() {
    env_logger::init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xB81C0);

    let layout = match GridLayout::new(FIELD_WIDTH, FIELD_HEIGHT) {
        Ok(layout) => layout,
        Err(err) => {
            log::error!("invalid field configuration: {err}");
            std::process::exit(1);
        }
    };

    log::info!("Brickout (headless) starting, seed {seed}");
    let mut game = Game::new(
        GameState::new(layout, seed),
        FixedInput(InputState::default()),
        HudLog::every(600),
        LogNotifier,
    );
    game.autopilot = true;

    match game.run(MAX_DEMO_FRAMES) {
        Some(TerminalEvent::Won) => {
            log::info!(
                "cleared the field in {} ticks, {} lives left",
                game.state().time_ticks,
                game.state().lives
            );
        }
        Some(TerminalEvent::Lost) => {
            log::info!(
                "game over at tick {}, final score {}",
                game.state().time_ticks,
                game.state().score
            );
        }
        None => {
            log::warn!(
                "frame budget exhausted at tick {}, score {}",
                game.state().time_ticks,
                game.state().score
            );
        }
    }
}
