//! Grid coordinates and cardinal directions.
//!
//! ## Coordinates
//!
//! `Position` is zero-based: `x` is the column, `y` is the row, and row 0 is
//! the northern edge of the board. Scenario text uses one-based `row col`
//! pairs; conversion happens in the loader, never here.
//!
//! ## Direction order
//!
//! Two orders matter:
//! - `Direction::ALL` (N, S, E, W) is the order used by every search and
//!   propagation loop, so it fixes the order in which random draws and
//!   records happen.
//! - `Direction::mask_index` (N, W, S, E) is the digit order of the 4-digit
//!   wall masks in scenario layouts.

use serde::{Deserialize, Serialize};

/// Cell coordinate on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column (0-based, west to east).
    pub x: u32,
    /// Row (0-based, north to south).
    pub y: u32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The neighbouring position one step in `direction`, if it does not
    /// underflow. Callers still check the upper board bounds.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Position { x, y })
    }

    /// Direction leading from `self` to an orthogonally adjacent `other`.
    #[must_use]
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.step(d) == Some(other))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Cardinal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Toward row 0.
    North,
    /// Toward the last row.
    South,
    /// Toward the last column.
    East,
    /// Toward column 0.
    West,
}

impl Direction {
    /// Iteration order for searches, explosions and flashover.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Column/row delta of one step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// The direction pointing back.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Digit position in a wall mask (`N W S E`).
    #[must_use]
    pub const fn mask_index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::West => 1,
            Direction::South => 2,
            Direction::East => 3,
        }
    }

    /// Inverse of [`Direction::mask_index`].
    #[must_use]
    pub const fn from_mask_index(index: usize) -> Option<Direction> {
        match index {
            0 => Some(Direction::North),
            1 => Some(Direction::West),
            2 => Some(Direction::South),
            3 => Some(Direction::East),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}
