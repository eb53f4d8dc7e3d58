//! The board: a dense row-major grid of cells plus the wall arena.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Hazard};
use super::wall::{DoorState, Wall, WallArena, WallId};
use crate::core::{Direction, Position};

/// Grid of cells, their walls, and the entrance cells (which double as exits).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    walls: WallArena,
    exits: Vec<Position>,
}

impl Board {
    /// An open board with no walls, hazards or exits.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(Position::new(x, y))))
            .collect();
        Self {
            width,
            height,
            cells,
            walls: WallArena::new(),
            exits: Vec::new(),
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True if `pos` lies on the board.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Mutable cell at `pos`.
    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(move |i| &mut self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The on-board neighbour of `pos` in `direction`.
    #[must_use]
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        pos.step(direction).filter(|&p| self.contains(p))
    }

    /// Wall arena.
    #[must_use]
    pub fn walls(&self) -> &WallArena {
        &self.walls
    }

    /// Mutable wall arena.
    pub fn walls_mut(&mut self) -> &mut WallArena {
        &mut self.walls
    }

    /// Handle of the wall face on `direction` side of `pos`.
    #[must_use]
    pub fn wall_id(&self, pos: Position, direction: Direction) -> Option<WallId> {
        self.cell(pos)?.wall(direction)
    }

    /// Wall face on `direction` side of `pos`.
    #[must_use]
    pub fn wall(&self, pos: Position, direction: Direction) -> Option<&Wall> {
        self.wall_id(pos, direction).map(|id| self.walls.get(id))
    }

    /// Add a wall face on one side of a cell. Mirrors are linked separately.
    pub fn add_wall(&mut self, pos: Position, direction: Direction, door: DoorState) -> Option<WallId> {
        self.index(pos)?;
        let id = self.walls.insert(Wall::new(door));
        self.cell_mut(pos)?.set_wall(direction, id);
        Some(id)
    }

    /// Turn the boundary between two adjacent cells into a closed door, on
    /// whichever faces exist. Non-adjacent pairs are ignored.
    pub fn place_door(&mut self, a: Position, b: Position) {
        if !self.contains(a) || !self.contains(b) {
            return;
        }
        let Some(direction) = a.direction_to(b) else {
            return;
        };
        for (pos, side) in [(a, direction), (b, direction.opposite())] {
            if let Some(id) = self.wall_id(pos, side) {
                self.walls.set_door(id, DoorState::Closed);
            }
        }
    }

    /// Link every wall face with the opposite face of its neighbour.
    pub fn link_mirrors(&mut self) {
        let mut pairs = Vec::new();
        for cell in &self.cells {
            for direction in Direction::ALL {
                let Some(id) = cell.wall(direction) else {
                    continue;
                };
                let Some(next) = self.neighbor(cell.position, direction) else {
                    continue;
                };
                if let Some(mirror) = self.wall_id(next, direction.opposite()) {
                    pairs.push((id, mirror));
                }
            }
        }
        for (a, b) in pairs {
            self.walls.link(a, b);
        }
    }

    /// Register an entrance. Entrances are also the exits.
    pub fn add_exit(&mut self, pos: Position) {
        self.exits.push(pos);
    }

    /// Entrance/exit cells in registration order.
    #[must_use]
    pub fn exits(&self) -> &[Position] {
        &self.exits
    }

    /// True if `pos` is an exit.
    #[must_use]
    pub fn is_exit(&self, pos: Position) -> bool {
        self.exits.contains(&pos)
    }

    /// Closest exit by Manhattan distance; the first registered wins ties.
    #[must_use]
    pub fn nearest_exit_by_distance(&self, pos: Position) -> Option<Position> {
        self.exits.iter().copied().min_by_key(|e| e.manhattan(pos))
    }

    /// True if the wall on `pos`'s own `direction` side stops passage.
    ///
    /// Only the near face is consulted. Used for adjacency checks (suppressing
    /// a neighbour, flashover), not for movement.
    #[must_use]
    pub fn is_blocked_from(&self, pos: Position, direction: Direction) -> bool {
        self.wall(pos, direction).is_some_and(|w| !w.is_passable())
    }

    /// True unless an intact plain wall sits on `pos`'s `direction` side.
    ///
    /// Closed doors do not block sight.
    #[must_use]
    pub fn can_see(&self, pos: Position, direction: Direction) -> bool {
        !self.wall(pos, direction).is_some_and(Wall::is_blocking)
    }

    /// Hazard at `pos`, `Clear` off the board.
    #[must_use]
    pub fn hazard(&self, pos: Position) -> Hazard {
        self.cell(pos).map_or(Hazard::Clear, |c| c.hazard)
    }

    /// Set the hazard at `pos`.
    pub fn set_hazard(&mut self, pos: Position, hazard: Hazard) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.hazard = hazard;
        }
    }

    /// Unrevealed POIs plus revealed victims still on the board.
    #[must_use]
    pub fn active_poi_count(&self) -> u32 {
        self.cells
            .iter()
            .filter(|c| c.has_hidden_poi() || c.has_revealed_victim())
            .count() as u32
    }

    /// Victims on the board, revealed or not.
    #[must_use]
    pub fn victims_on_board(&self) -> u32 {
        self.cells.iter().filter(|c| c.has_victim()).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::wall::WallCondition;

    fn walled_pair() -> Board {
        // Two cells side by side with a wall between them.
        let mut board = Board::new(2, 1);
        board.add_wall(Position::new(0, 0), Direction::East, DoorState::None);
        board.add_wall(Position::new(1, 0), Direction::West, DoorState::None);
        board.link_mirrors();
        board
    }

    #[test]
    fn test_dimensions_and_lookup() {
        let board = Board::new(8, 6);
        assert_eq!(board.cells().count(), 48);
        assert!(board.cell(Position::new(7, 5)).is_some());
        assert!(board.cell(Position::new(8, 0)).is_none());
        assert_eq!(board.cell(Position::new(3, 2)).unwrap().position, Position::new(3, 2));
    }

    #[test]
    fn test_neighbor_respects_bounds() {
        let board = Board::new(3, 3);
        assert_eq!(board.neighbor(Position::new(2, 1), Direction::East), None);
        assert_eq!(
            board.neighbor(Position::new(2, 1), Direction::West),
            Some(Position::new(1, 1))
        );
    }

    #[test]
    fn test_link_mirrors() {
        let board = walled_pair();
        let a = board.wall_id(Position::new(0, 0), Direction::East).unwrap();
        let b = board.wall_id(Position::new(1, 0), Direction::West).unwrap();
        assert_eq!(board.walls().get(a).mirror, Some(b));
        assert_eq!(board.walls().get(b).mirror, Some(a));
    }

    #[test]
    fn test_place_door_both_faces() {
        let mut board = Board::new(2, 1);
        board.add_wall(Position::new(0, 0), Direction::East, DoorState::None);
        board.add_wall(Position::new(1, 0), Direction::West, DoorState::None);
        board.place_door(Position::new(1, 0), Position::new(0, 0));
        board.link_mirrors();

        assert!(board.wall(Position::new(0, 0), Direction::East).unwrap().is_closed_door());
        assert!(board.wall(Position::new(1, 0), Direction::West).unwrap().is_closed_door());
        assert!(board.is_blocked_from(Position::new(0, 0), Direction::East));
        assert!(board.can_see(Position::new(0, 0), Direction::East));
    }

    #[test]
    fn test_place_door_ignores_non_adjacent() {
        let mut board = walled_pair();
        board.place_door(Position::new(0, 0), Position::new(1, 1));
        assert!(board.wall(Position::new(0, 0), Direction::East).unwrap().is_blocking());
    }

    #[test]
    fn test_damage_from_either_side() {
        let mut board = walled_pair();
        let b = board.wall_id(Position::new(1, 0), Direction::West).unwrap();
        assert_eq!(board.walls_mut().apply_hit(b), Some(WallCondition::Damaged));
        assert_eq!(board.wall(Position::new(0, 0), Direction::East).unwrap().damage, 1);
        assert!(!board.can_see(Position::new(0, 0), Direction::East));
    }

    #[test]
    fn test_nearest_exit() {
        let mut board = Board::new(8, 6);
        board.add_exit(Position::new(5, 0));
        board.add_exit(Position::new(0, 2));
        board.add_exit(Position::new(7, 3));

        assert_eq!(board.nearest_exit_by_distance(Position::new(1, 1)), Some(Position::new(0, 2)));
        assert_eq!(board.nearest_exit_by_distance(Position::new(6, 1)), Some(Position::new(5, 0)));
        assert!(board.is_exit(Position::new(7, 3)));
        assert!(!board.is_exit(Position::new(7, 4)));
    }
}
