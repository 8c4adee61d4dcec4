//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (velocities are in field units per tick)
//! - Seeded RNG only
//! - Stable iteration order (bricks column-major, balls in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod layout;
pub mod state;
pub mod tick;

pub use layout::{GridLayout, LayoutError};
pub use state::{Ball, Brick, GamePhase, GameState, Item, ItemKind, Paddle, TerminalEvent};
pub use tick::{TickInput, tick};
