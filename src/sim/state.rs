//! Game state and core simulation types
//!
//! `GameState` is the single owned world: the loop holds it, the tick mutates
//! it, render/input collaborators only ever see snapshots.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::GridLayout;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start input; nothing advances
    NotStarted,
    /// Active gameplay
    Running,
    /// All bricks destroyed - terminal
    Won,
    /// Lives exhausted - terminal
    Lost,
}

impl GamePhase {
    /// Terminal phases stop the loop; restarting means a fresh `GameState`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Signal ending the current play session, emitted exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalEvent {
    Won,
    Lost,
}

/// A ball in play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Fresh ball at the canonical start position and velocity.
    pub fn spawn(layout: &GridLayout) -> Self {
        Self {
            pos: Vec2::new(
                layout.field_width / 2.0,
                layout.field_height - BALL_SPAWN_MARGIN,
            ),
            vel: Vec2::new(BALL_START_DX, BALL_START_DY),
            radius: BALL_RADIUS,
        }
    }

    /// Grow by one big-item step, capped.
    pub fn grow(&mut self) {
        self.radius = (self.radius + BALL_GROW_STEP).min(BALL_RADIUS_MAX);
    }

    /// Shrink by one small-item step, floored.
    pub fn shrink(&mut self) {
        self.radius = (self.radius - BALL_SHRINK_STEP).max(BALL_RADIUS_MIN);
    }

    /// Multiball copy: same position and radius, mirrored horizontal velocity.
    pub fn split(&self) -> Self {
        Self {
            pos: self.pos,
            vel: Vec2::new(-self.vel.x, self.vel.y),
            radius: self.radius,
        }
    }
}

/// A grid cell; position is fixed at layout time, only `alive` ever changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub col: usize,
    pub row: usize,
    /// Top-left corner, derived once from (col, row)
    pub origin: Vec2,
    pub alive: bool,
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge; clamped to [0, field_width - width]
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle centered on the field.
    pub fn centered(field_width: f32) -> Self {
        Self {
            x: (field_width - PADDLE_WIDTH) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    /// Re-center after a life loss.
    pub fn recenter(&mut self, field_width: f32) {
        self.x = (field_width - self.width) / 2.0;
    }

    /// Keep the paddle inside the field.
    pub fn clamp_to(&mut self, field_width: f32) {
        self.x = self.x.clamp(0.0, field_width - self.width);
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Duplicate every active ball
    Multi,
    /// Grow every ball's radius
    Big,
    /// Shrink every ball's radius
    Small,
}

impl ItemKind {
    /// All kinds, in drop-roll order.
    pub const ALL: [ItemKind; 3] = [ItemKind::Multi, ItemKind::Big, ItemKind::Small];
}

/// A falling power-up spawned from a destroyed brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub kind: ItemKind,
    /// Fall speed per tick
    pub vy: f32,
    /// Cleared on catch or drop-off; inert items are compacted each tick
    pub active: bool,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducible item drops
    pub seed: u64,
    pub layout: GridLayout,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddle: Paddle,
    /// Active balls, in spawn order (the documented tie-break order)
    pub balls: Vec<Ball>,
    /// Column-major: index = col * rows + row, so plain iteration is the
    /// columns-outer/rows-inner collision scan
    pub bricks: Vec<Brick>,
    pub items: Vec<Item>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game over a validated layout.
    pub fn new(layout: GridLayout, seed: u64) -> Self {
        let mut bricks = Vec::with_capacity(layout.columns * layout.rows);
        for col in 0..layout.columns {
            for row in 0..layout.rows {
                bricks.push(Brick {
                    col,
                    row,
                    origin: layout.brick_origin(col, row),
                    alive: true,
                });
            }
        }

        log::info!(
            "new game: {}x{} bricks, seed {}",
            layout.columns,
            layout.rows,
            seed
        );

        let paddle = Paddle::centered(layout.field_width);
        let ball = Ball::spawn(&layout);
        Self {
            seed,
            phase: GamePhase::NotStarted,
            score: 0,
            lives: START_LIVES,
            time_ticks: 0,
            paddle,
            balls: vec![ball],
            bricks,
            items: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            layout,
        }
    }

    /// Score value that ends the game in a win.
    #[inline]
    pub fn winning_score(&self) -> u32 {
        self.layout.total_bricks()
    }

    /// Put a fresh ball in play at the canonical start.
    pub fn spawn_ball(&mut self) {
        self.balls.push(Ball::spawn(&self.layout));
    }

    /// After losing a life with lives remaining: one fresh ball, paddle
    /// recentered, everything else untouched.
    pub fn reset_after_life_loss(&mut self) {
        self.spawn_ball();
        self.paddle.recenter(self.layout.field_width);
    }

    /// Bricks still standing.
    pub fn alive_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }
}
