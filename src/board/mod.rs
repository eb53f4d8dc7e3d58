//! Board data model: walls with mirrored faces, cells, and the grid.
//!
//! The board is plain data plus the mutation helpers that keep it
//! consistent (wall/mirror symmetry, single hazard per cell). Game rules
//! live in `engine` and `agents`.

pub mod wall;
pub mod cell;
pub mod grid;

pub use wall::{DoorState, Wall, WallArena, WallCondition, WallId, DESTROYED_DAMAGE};
pub use cell::{Cell, Hazard, Poi, PoiKind};
pub use grid::Board;
