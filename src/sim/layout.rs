//! Brick grid layout
//!
//! The grid is computed once from the field dimensions: the column count
//! derives from a fixed candidate cell width, then the brick width is
//! re-derived so the columns fill the usable span evenly. Cell origins are
//! pure functions of (column, row) and the layout constants, so recomputing
//! them always yields the same coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::*;

/// Field configuration rejected at construction time.
///
/// Layout parameters are fixed constants; the field dimensions are the only
/// runtime inputs, and a NaN or non-positive dimension is a fatal
/// configuration error rather than something the tick loop should tolerate.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A field dimension is NaN or infinite.
    NonFinite {
        /// Name of the offending dimension (for logging).
        name: &'static str,
        value: f32,
    },
    /// A field dimension is zero or negative.
    NonPositive {
        name: &'static str,
        value: f32,
    },
    /// The field is too narrow to fit a single brick column.
    TooNarrow {
        field_width: f32,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NonFinite { name, value } => {
                write!(f, "field dimension '{}' is not finite: {}", name, value)
            }
            LayoutError::NonPositive { name, value } => {
                write!(f, "field dimension '{}' must be positive, got {}", name, value)
            }
            LayoutError::TooNarrow { field_width } => write!(
                f,
                "field width {} leaves no room for a brick column (offsets {} per side, cell {})",
                field_width, BRICK_OFFSET_LEFT, BRICK_CELL_WIDTH
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

/// The brick grid, computed once per game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub field_width: f32,
    pub field_height: f32,
    /// Columns derived from the field width
    pub columns: usize,
    /// Rows are fixed by configuration
    pub rows: usize,
    /// Actual brick width after redistributing the leftover span
    pub brick_width: f32,
    pub brick_height: f32,
}

impl GridLayout {
    /// Compute the grid for a field, validating the dimensions.
    pub fn new(field_width: f32, field_height: f32) -> Result<Self, LayoutError> {
        for (name, value) in [("field_width", field_width), ("field_height", field_height)] {
            if !value.is_finite() {
                return Err(LayoutError::NonFinite { name, value });
            }
            if value <= 0.0 {
                return Err(LayoutError::NonPositive { name, value });
            }
        }

        let usable = field_width - 2.0 * BRICK_OFFSET_LEFT;
        let columns = ((usable + BRICK_PADDING) / (BRICK_CELL_WIDTH + BRICK_PADDING)).floor();
        if columns < 1.0 {
            return Err(LayoutError::TooNarrow { field_width });
        }
        let brick_width = ((usable - (columns - 1.0) * BRICK_PADDING) / columns).floor();

        Ok(Self {
            field_width,
            field_height,
            columns: columns as usize,
            rows: BRICK_ROWS,
            brick_width,
            brick_height: BRICK_HEIGHT,
        })
    }

    /// The standard play field.
    pub fn standard() -> Result<Self, LayoutError> {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT)
    }

    /// Top-left corner of the brick at (column, row).
    #[inline]
    pub fn brick_origin(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(
            BRICK_OFFSET_LEFT + col as f32 * (self.brick_width + BRICK_PADDING),
            BRICK_OFFSET_TOP + row as f32 * (self.brick_height + BRICK_PADDING),
        )
    }

    /// Size of a single brick cell.
    #[inline]
    pub fn brick_size(&self) -> Vec2 {
        Vec2::new(self.brick_width, self.brick_height)
    }

    /// Total brick count; reaching this score wins the game.
    #[inline]
    pub fn total_bricks(&self) -> u32 {
        (self.columns * self.rows) as u32
    }
}
