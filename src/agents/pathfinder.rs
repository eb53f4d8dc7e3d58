//! Cost-aware route search.
//!
//! ## Step cost
//!
//! Moving from a cell to an orthogonal neighbour costs:
//! - 1 AP, or 2 while carrying a victim;
//! - +1 for each closed door face on the boundary (own side and far side);
//! - +10 if the destination is ablaze. This is a search weight only, to keep
//!   routes away from blazes; it is never charged as AP.
//!
//! An intact plain wall on either face excludes the edge. Exterior cells
//! are never entered.
//!
//! Both entry points run the same A* search with a Manhattan heuristic.
//! Frontier ties break by insertion order, which fixes routes for a given
//! board.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use crate::board::{Board, DoorState, Wall};
use crate::core::{Direction, Position};

/// Extra search weight for entering a blaze.
pub const BLAZE_DETOUR_COST: u32 = 10;

/// Sentinel returned by [`Pathfinder::cost_to`] when the goal is unreachable.
pub const UNREACHABLE: u32 = 9999;

/// Route search over a board, from the point of view of one agent.
#[derive(Clone, Copy, Debug)]
pub struct Pathfinder<'a> {
    board: &'a Board,
    carrying: bool,
}

struct Search {
    cost: u32,
    came_from: FxHashMap<Position, (Position, Direction)>,
}

impl<'a> Pathfinder<'a> {
    /// Search as an agent that is (or is not) carrying a victim.
    #[must_use]
    pub fn new(board: &'a Board, carrying: bool) -> Self {
        Self { board, carrying }
    }

    /// Weighted cost of one step, or `None` if the edge cannot be crossed.
    #[must_use]
    pub fn step_cost(&self, from: Position, direction: Direction) -> Option<u32> {
        let to = self.board.neighbor(from, direction)?;
        let dest = self.board.cell(to)?;
        if dest.exterior {
            return None;
        }

        let near = face_surcharge(self.board.wall(from, direction))?;
        let far = face_surcharge(self.board.wall(to, direction.opposite()))?;
        let base = if self.carrying { 2 } else { 1 };
        let detour = if dest.hazard.is_blaze() { BLAZE_DETOUR_COST } else { 0 };
        Some(near + far + base + detour)
    }

    /// Directions of the cheapest route to `goal`.
    ///
    /// `Some(vec![])` when already there, `None` when unreachable.
    #[must_use]
    pub fn route_to(&self, from: Position, goal: Position) -> Option<Vec<Direction>> {
        let search = self.search(from, goal)?;
        let mut route = Vec::new();
        let mut current = goal;
        while current != from {
            let &(prev, direction) = search.came_from.get(&current)?;
            route.push(direction);
            current = prev;
        }
        route.reverse();
        Some(route)
    }

    /// Weighted cost of the cheapest route, or [`UNREACHABLE`].
    #[must_use]
    pub fn cost_to(&self, from: Position, goal: Position) -> u32 {
        self.search(from, goal).map_or(UNREACHABLE, |s| s.cost)
    }

    fn search(&self, from: Position, goal: Position) -> Option<Search> {
        let mut came_from = FxHashMap::default();
        if from == goal {
            return Some(Search { cost: 0, came_from });
        }
        if !self.board.contains(goal) {
            return None;
        }

        let mut best: FxHashMap<Position, u32> = FxHashMap::default();
        let mut frontier = BinaryHeap::new();
        let mut seq: u64 = 0;

        best.insert(from, 0);
        frontier.push(Reverse((from.manhattan(goal), seq, 0u32, from)));

        while let Some(Reverse((_, _, g, current))) = frontier.pop() {
            if current == goal {
                return Some(Search { cost: g, came_from });
            }
            if best.get(&current).is_some_and(|&b| g > b) {
                continue;
            }

            for direction in Direction::ALL {
                let Some(cost) = self.step_cost(current, direction) else {
                    continue;
                };
                let Some(next) = self.board.neighbor(current, direction) else {
                    continue;
                };
                let next_g = g + cost;
                if best.get(&next).map_or(true, |&b| next_g < b) {
                    best.insert(next, next_g);
                    came_from.insert(next, (current, direction));
                    seq += 1;
                    frontier.push(Reverse((next_g + next.manhattan(goal), seq, next_g, next)));
                }
            }
        }
        None
    }
}

/// Surcharge for crossing one wall face, `None` if it blocks.
fn face_surcharge(wall: Option<&Wall>) -> Option<u32> {
    match wall {
        None => Some(0),
        Some(w) if w.is_destroyed() => Some(0),
        Some(w) => match w.door {
            DoorState::Open => Some(0),
            DoorState::Closed => Some(1),
            DoorState::None => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Hazard;
    use crate::scenario::Scenario;

    fn p(x: u32, y: u32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_already_there() {
        let board = Scenario::new(3, 3).build_board();
        let finder = Pathfinder::new(&board, false);
        assert_eq!(finder.route_to(p(1, 1), p(1, 1)), Some(vec![]));
        assert_eq!(finder.cost_to(p(1, 1), p(1, 1)), 0);
    }

    #[test]
    fn test_open_grid_cost() {
        let board = Scenario::new(4, 4).build_board();
        let finder = Pathfinder::new(&board, false);
        assert_eq!(finder.cost_to(p(0, 0), p(3, 2)), 5);
        assert_eq!(finder.route_to(p(0, 0), p(3, 2)).unwrap().len(), 5);

        let carrying = Pathfinder::new(&board, true);
        assert_eq!(carrying.cost_to(p(0, 0), p(3, 2)), 10);
    }

    #[test]
    fn test_wall_forces_detour() {
        // Wall between (0,0) and (1,0); the route goes around through row 1.
        let board = Scenario::new(2, 2)
            .with_wall(p(0, 0), Direction::East)
            .build_board();
        let finder = Pathfinder::new(&board, false);

        assert_eq!(finder.step_cost(p(0, 0), Direction::East), None);
        assert_eq!(finder.cost_to(p(0, 0), p(1, 0)), 3);
        assert_eq!(
            finder.route_to(p(0, 0), p(1, 0)),
            Some(vec![Direction::South, Direction::East, Direction::North])
        );
    }

    #[test]
    fn test_closed_door_surcharge() {
        let board = Scenario::new(2, 1)
            .with_wall(p(0, 0), Direction::East)
            .with_door(p(0, 0), p(1, 0))
            .build_board();
        let finder = Pathfinder::new(&board, false);

        // One surcharge per closed face.
        assert_eq!(finder.cost_to(p(0, 0), p(1, 0)), 3);
    }

    #[test]
    fn test_open_door_is_free() {
        let mut board = Scenario::new(2, 1)
            .with_wall(p(0, 0), Direction::East)
            .with_door(p(0, 0), p(1, 0))
            .build_board();
        let id = board.wall_id(p(0, 0), Direction::East).unwrap();
        board.walls_mut().open_door(id);

        let finder = Pathfinder::new(&board, false);
        assert_eq!(finder.cost_to(p(0, 0), p(1, 0)), 1);
    }

    #[test]
    fn test_blaze_detour() {
        let mut board = Scenario::new(3, 2).build_board();
        board.set_hazard(p(1, 0), Hazard::Blaze);
        let finder = Pathfinder::new(&board, false);

        // Around the blaze is 4, through it is 12.
        assert_eq!(finder.cost_to(p(0, 0), p(2, 0)), 4);
        let route = finder.route_to(p(0, 0), p(2, 0)).unwrap();
        assert_eq!(route.first(), Some(&Direction::South));

        assert_eq!(finder.cost_to(p(0, 0), p(1, 0)), 1 + BLAZE_DETOUR_COST);
    }

    #[test]
    fn test_unreachable() {
        let board = Scenario::new(2, 1)
            .with_wall(p(0, 0), Direction::East)
            .build_board();
        let finder = Pathfinder::new(&board, false);
        assert_eq!(finder.route_to(p(0, 0), p(1, 0)), None);
        assert_eq!(finder.cost_to(p(0, 0), p(1, 0)), UNREACHABLE);
        assert_eq!(finder.cost_to(p(0, 0), p(9, 9)), UNREACHABLE);
    }

    #[test]
    fn test_exterior_never_entered() {
        let board = Scenario::new(3, 1)
            .with_exterior(p(1, 0))
            .build_board();
        let finder = Pathfinder::new(&board, false);
        assert_eq!(finder.cost_to(p(0, 0), p(2, 0)), UNREACHABLE);
        assert_eq!(finder.cost_to(p(0, 0), p(1, 0)), UNREACHABLE);
    }

    #[test]
    fn test_route_matches_cost_on_sample() {
        let board = Scenario::sample().build_board();
        let finder = Pathfinder::new(&board, false);
        let from = p(5, 0);
        for cell in board.cells() {
            let cost = finder.cost_to(from, cell.position);
            let route = finder.route_to(from, cell.position);
            assert_eq!(cost == UNREACHABLE, route.is_none());
            if let Some(route) = route {
                let mut at = from;
                let mut walked = 0;
                for d in route {
                    walked += finder.step_cost(at, d).unwrap();
                    at = board.neighbor(at, d).unwrap();
                }
                assert_eq!(at, cell.position);
                assert_eq!(walked, cost);
            }
        }
    }
}
