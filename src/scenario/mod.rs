//! Scenario contract: the building a world starts from.
//!
//! A `Scenario` is plain data: per-cell wall masks and door states, points
//! of interest, initial blazes, door pairs, entrances and the agent count.
//! It is built with the `with_*` methods or loaded from the text format with
//! [`parse_layout`], and turned into a [`Board`] by [`Scenario::build_board`].
//!
//! Nothing here is validated. Coordinates off the grid are ignored when the
//! board is built; walls without a matching face on the neighbour simply
//! stay unmirrored.

pub mod error;
pub mod parse;

pub use error::ScenarioError;
pub use parse::{parse_layout, SAMPLE_LAYOUT};

use serde::{Deserialize, Serialize};

use crate::board::{Board, DoorState, Hazard, Poi, PoiKind};
use crate::core::{Direction, Position};

/// Agents created when a scenario does not say otherwise.
pub const DEFAULT_AGENT_COUNT: usize = 2;

/// Wall faces and door states of one cell, indexed by [`Direction::mask_index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLayout {
    pub walls: [bool; 4],
    pub doors: [DoorState; 4],
}

impl CellLayout {
    /// A cell with no walls.
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }

    /// A cell with a plain wall on every side.
    #[must_use]
    pub fn enclosed() -> Self {
        Self {
            walls: [true; 4],
            doors: [DoorState::None; 4],
        }
    }

    /// True if the cell has a wall face on `direction`.
    #[must_use]
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.mask_index()]
    }

    /// The 4-digit mask (`N W S E`) as it appears in layout text.
    #[must_use]
    pub fn mask(&self) -> String {
        self.walls.iter().map(|&w| if w { '1' } else { '0' }).collect()
    }
}

/// Everything needed to build a board and its roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub width: u32,
    pub height: u32,
    /// Row-major cell layouts. Missing entries are open cells.
    pub cells: Vec<CellLayout>,
    pub pois: Vec<(Position, PoiKind)>,
    pub blazes: Vec<Position>,
    /// Adjacent cell pairs whose shared boundary becomes a closed door.
    pub doors: Vec<(Position, Position)>,
    /// Entrance cells; they are also the exits.
    pub entrances: Vec<Position>,
    pub exterior: Vec<Position>,
    pub agent_count: usize,
    /// Damage already sustained before the first round.
    pub structural_damage: u32,
}

impl Scenario {
    /// An open building with no walls, hazards, POIs or entrances.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![CellLayout::open(); width as usize * height as usize],
            pois: Vec::new(),
            blazes: Vec::new(),
            doors: Vec::new(),
            entrances: Vec::new(),
            exterior: Vec::new(),
            agent_count: DEFAULT_AGENT_COUNT,
            structural_damage: 0,
        }
    }

    /// The stock 8x6 map: 3 POIs, 6 blazes, 8 doors and 4 entrances.
    #[must_use]
    pub fn sample() -> Self {
        parse_layout(SAMPLE_LAYOUT, 8, 6).expect("sample layout is well-formed")
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Layout of the cell at `pos`; open when missing.
    #[must_use]
    pub fn layout(&self, pos: Position) -> CellLayout {
        self.index(pos)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or_default()
    }

    /// Replace the layout of one cell.
    #[must_use]
    pub fn with_cell(mut self, pos: Position, layout: CellLayout) -> Self {
        if let Some(i) = self.index(pos) {
            if self.cells.len() <= i {
                self.cells.resize(i + 1, CellLayout::open());
            }
            self.cells[i] = layout;
        }
        self
    }

    /// Put a plain wall on both faces of the boundary between `a` and its
    /// neighbour in `direction`.
    #[must_use]
    pub fn with_wall(self, a: Position, direction: Direction) -> Self {
        let mut first = self.layout(a);
        first.walls[direction.mask_index()] = true;
        let mut scenario = self.with_cell(a, first);
        if let Some(b) = a.step(direction) {
            let mut second = scenario.layout(b);
            second.walls[direction.opposite().mask_index()] = true;
            scenario = scenario.with_cell(b, second);
        }
        scenario
    }

    /// Wall every cell on all four sides.
    #[must_use]
    pub fn with_all_walls(mut self) -> Self {
        self.cells = vec![CellLayout::enclosed(); self.width as usize * self.height as usize];
        self
    }

    /// Add a POI.
    #[must_use]
    pub fn with_poi(mut self, pos: Position, kind: PoiKind) -> Self {
        self.pois.push((pos, kind));
        self
    }

    /// Add an initial blaze.
    #[must_use]
    pub fn with_blaze(mut self, pos: Position) -> Self {
        self.blazes.push(pos);
        self
    }

    /// Turn the boundary between two adjacent cells into a closed door.
    #[must_use]
    pub fn with_door(mut self, a: Position, b: Position) -> Self {
        self.doors.push((a, b));
        self
    }

    /// Add an entrance (and exit).
    #[must_use]
    pub fn with_entrance(mut self, pos: Position) -> Self {
        self.entrances.push(pos);
        self
    }

    /// Mark a cell as outside the building.
    #[must_use]
    pub fn with_exterior(mut self, pos: Position) -> Self {
        self.exterior.push(pos);
        self
    }

    /// Set the number of agents.
    #[must_use]
    pub fn with_agents(mut self, count: usize) -> Self {
        self.agent_count = count;
        self
    }

    /// Start with some structural damage already done.
    #[must_use]
    pub fn with_structural_damage(mut self, damage: u32) -> Self {
        self.structural_damage = damage;
        self
    }

    /// Build the board: wall faces from the masks, doors from the door
    /// pairs, mirrors linked last so every pair agrees from the start.
    #[must_use]
    pub fn build_board(&self) -> Board {
        let mut board = Board::new(self.width, self.height);

        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                let layout = self.layout(pos);
                for direction in Direction::ALL {
                    if layout.has_wall(direction) {
                        board.add_wall(pos, direction, layout.doors[direction.mask_index()]);
                    }
                }
            }
        }
        for &(a, b) in &self.doors {
            board.place_door(a, b);
        }
        board.link_mirrors();

        for &(pos, kind) in &self.pois {
            if let Some(cell) = board.cell_mut(pos) {
                cell.poi = Some(Poi::hidden(kind));
            }
        }
        for &pos in &self.blazes {
            board.set_hazard(pos, Hazard::Blaze);
        }
        for &pos in &self.exterior {
            if let Some(cell) = board.cell_mut(pos) {
                cell.exterior = true;
            }
        }
        for &pos in &self.entrances {
            board.add_exit(pos);
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_wall_sets_both_faces() {
        let scenario = Scenario::new(3, 3).with_wall(Position::new(1, 1), Direction::East);
        assert!(scenario.layout(Position::new(1, 1)).has_wall(Direction::East));
        assert!(scenario.layout(Position::new(2, 1)).has_wall(Direction::West));
        assert_eq!(scenario.layout(Position::new(2, 1)).mask(), "0100");
    }

    #[test]
    fn test_build_board_links_and_doors() {
        let a = Position::new(0, 0);
        let b = Position::new(1, 0);
        let board = Scenario::new(2, 1)
            .with_wall(a, Direction::East)
            .with_door(a, b)
            .build_board();

        let face = board.wall(a, Direction::East).unwrap();
        assert!(face.is_closed_door());
        assert!(face.mirror.is_some());
        assert!(board.wall(b, Direction::West).unwrap().is_closed_door());
    }

    #[test]
    fn test_build_board_ignores_off_grid() {
        let board = Scenario::new(2, 2)
            .with_poi(Position::new(5, 5), PoiKind::Victim)
            .with_blaze(Position::new(2, 0))
            .with_poi(Position::new(1, 1), PoiKind::FalseAlarm)
            .build_board();

        assert_eq!(board.active_poi_count(), 1);
        assert!(board.cells().all(|c| c.hazard == Hazard::Clear));
    }

    #[test]
    fn test_exterior_and_entrances() {
        let board = Scenario::new(3, 1)
            .with_exterior(Position::new(2, 0))
            .with_entrance(Position::new(0, 0))
            .build_board();

        assert!(board.cell(Position::new(2, 0)).unwrap().exterior);
        assert_eq!(board.exits(), &[Position::new(0, 0)]);
    }

    #[test]
    fn test_sample_scenario() {
        let scenario = Scenario::sample();
        assert_eq!((scenario.width, scenario.height), (8, 6));
        assert_eq!(scenario.pois.len(), 3);
        assert_eq!(scenario.blazes.len(), 6);
        assert_eq!(scenario.doors.len(), 8);
        assert_eq!(scenario.entrances.len(), 4);

        let board = scenario.build_board();
        for (id, _) in board.walls().iter() {
            assert!(board.walls().is_symmetric(id));
        }
    }
}
