//! Brickout - a single-screen brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (layout, collisions, game state, tick)
//! - `game`: Cooperative game loop wiring the simulation to injected
//!   input/render/notifier collaborators
//! - `platform`: Input/render/notifier abstractions and reusable adapters

pub mod game;
pub mod platform;
pub mod sim;

pub use game::Game;
pub use platform::{InputSource, InputState, RenderSink, TerminalNotifier};

/// Game configuration constants
///
/// All gameplay tuning lives here; nothing is runtime-mutable. `GridLayout`
/// validates the field dimensions once at construction.
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Brick grid: gap between cells, and grid offsets from the field edges
    pub const BRICK_PADDING: f32 = 8.0;
    pub const BRICK_OFFSET_TOP: f32 = 40.0;
    pub const BRICK_OFFSET_LEFT: f32 = 32.0;
    /// Row count is fixed; column count derives from the field width
    pub const BRICK_ROWS: usize = 8;
    /// Candidate cell width used to derive the column count
    pub const BRICK_CELL_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 28.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 16.0;
    /// Horizontal paddle travel per tick while an input is held
    pub const PADDLE_STEP: f32 = 12.0;

    /// Ball defaults - velocity is in field units per tick
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_START_DX: f32 = 4.0;
    pub const BALL_START_DY: f32 = -4.0;
    /// Fresh balls spawn this far above the bottom edge
    pub const BALL_SPAWN_MARGIN: f32 = 60.0;
    /// Radius bounds enforced by the big/small item effects
    pub const BALL_RADIUS_MIN: f32 = 6.0;
    pub const BALL_RADIUS_MAX: f32 = 40.0;
    /// Radius delta applied per big/small item
    pub const BALL_GROW_STEP: f32 = 8.0;
    pub const BALL_SHRINK_STEP: f32 = 6.0;

    /// Item (power-up) defaults
    pub const ITEM_RADIUS: f32 = 16.0;
    /// Fall speed in field units per tick
    pub const ITEM_FALL_SPEED: f32 = 3.0;
    /// Probability that a destroyed brick drops an item
    pub const ITEM_DROP_CHANCE: f32 = 0.3;

    pub const START_LIVES: u8 = 3;
}
