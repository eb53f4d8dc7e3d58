//! Hazard propagation and POI replenishment.
//!
//! ## Hazard advance
//!
//! One roll of a row die and a column die picks a cell. Off the board the
//! roll is recorded and nothing else happens. Otherwise the cell moves one
//! stage up: clear to ember, ember to blaze, and a blaze explodes. Every
//! in-grid roll is followed by flashover and the victim check.
//!
//! ## Explosion
//!
//! Agents on the cell are knocked down. Then, for each side in
//! `Direction::ALL` order, the face on the exploding cell's side decides:
//! - standing closed door: blown away, no structural damage;
//! - any other standing wall: one hit and one point of structural damage;
//! - nothing standing: agents on the neighbour are knocked down and the
//!   neighbour becomes a blaze.
//!
//! An agent is knocked down at most once per explosion.
//!
//! Reaching the collapse threshold ends the game on the spot; the remaining
//! sides are not processed.

use tracing::{debug, warn};

use super::record::{HazardChanges, HazardRoll, Outcome, PoiPlacement, RollEffect, WallDamage};
use super::world::World;
use crate::board::{Hazard, Poi, PoiKind, WallCondition};
use crate::core::{AgentId, Direction, Position};

impl World {
    /// Roll the hazard dice and apply the result.
    pub fn advance_hazard(&mut self) {
        if self.is_finished() {
            return;
        }
        let row_die = self.rng.roll_die(self.config.row_die_sides);
        let column_die = self.rng.roll_die(self.config.column_die_sides);
        let target = Position::new(u32::from(column_die) - 1, u32::from(row_die) - 1);
        self.apply_roll(row_die, column_die, target);
    }

    /// Apply a hazard roll that landed on `target`, without touching the dice.
    pub fn advance_hazard_at(&mut self, target: Position) {
        if self.is_finished() {
            return;
        }
        let die = |v: u32| u8::try_from(v + 1).unwrap_or(u8::MAX);
        self.apply_roll(die(target.y), die(target.x), target);
    }

    fn apply_roll(&mut self, row_die: u8, column_die: u8, target: Position) {
        let mut changes = HazardChanges::default();

        let (before, effect) = if self.board.contains(target) {
            let before = self.board.hazard(target);
            let effect = match before {
                Hazard::Clear => {
                    self.board.set_hazard(target, Hazard::Ember);
                    RollEffect::Ember
                }
                Hazard::Ember => {
                    self.board.set_hazard(target, Hazard::Blaze);
                    RollEffect::Blaze
                }
                Hazard::Blaze => {
                    self.explode(target, &mut changes);
                    RollEffect::Explosion
                }
            };
            if !self.is_finished() {
                changes.flashovers = self.flashover();
                self.check_victims(&mut changes);
            }
            (Some(before), effect)
        } else {
            (None, RollEffect::OffBoard)
        };

        debug!(round = self.round, row_die, column_die, %target, ?effect, "Hazard roll");
        self.current.rolls.push(HazardRoll {
            row_die,
            column_die,
            target,
            before,
            effect,
            changes,
        });
    }

    fn explode(&mut self, at: Position, changes: &mut HazardChanges) {
        self.explosions += 1;
        debug!(round = self.round, %at, explosions = self.explosions, "Explosion");

        self.knock_down_all(at, changes);

        for direction in Direction::ALL {
            if let Some(id) = self.board.wall_id(at, direction) {
                let wall = self.board.walls().get(id);
                if wall.standing && !wall.is_destroyed() {
                    if wall.is_closed_door() {
                        self.board.walls_mut().destroy(id);
                        changes.walls.push(WallDamage {
                            cell: at,
                            side: direction,
                            condition: WallCondition::Destroyed,
                            door: true,
                        });
                    } else {
                        let condition = self
                            .board
                            .walls_mut()
                            .apply_hit(id)
                            .unwrap_or(WallCondition::Destroyed);
                        self.structural_damage += 1;
                        changes.walls.push(WallDamage {
                            cell: at,
                            side: direction,
                            condition,
                            door: false,
                        });
                        if self.structural_damage >= self.config.collapse_threshold {
                            self.finish(Outcome::DefeatCollapse);
                            return;
                        }
                    }
                    continue;
                }
            }

            let Some(next) = self.board.neighbor(at, direction) else {
                continue;
            };
            self.knock_down_all(next, changes);
            if !self.board.hazard(next).is_blaze() {
                self.board.set_hazard(next, Hazard::Blaze);
                changes.blazes_added.push(next);
            }
        }
    }

    /// Knock down everyone on `at` who has not already been hit by this
    /// explosion. Relocation can move an agent onto a cell the blast
    /// reaches later.
    fn knock_down_all(&mut self, at: Position, changes: &mut HazardChanges) {
        let occupants: Vec<AgentId> = self
            .board
            .cell(at)
            .map(|c| c.occupants.to_vec())
            .unwrap_or_default();
        for agent in occupants {
            if changes.knocked_down.contains(&agent) {
                continue;
            }
            if self.knock_down(agent) {
                changes.knocked_down.push(agent);
            }
        }
    }

    /// Promote embers next to a blaze until nothing changes.
    ///
    /// An ember catches if a neighbour is ablaze and the face on the ember's
    /// own side lets it through. Returns the promoted cells in order.
    pub fn flashover(&mut self) -> Vec<Position> {
        let mut promoted = Vec::new();
        loop {
            let mut changed = false;
            let embers: Vec<Position> = self
                .board
                .cells()
                .filter(|c| c.hazard.is_ember())
                .map(|c| c.position)
                .collect();
            for pos in embers {
                let catches = Direction::ALL.into_iter().any(|d| {
                    self.board
                        .neighbor(pos, d)
                        .is_some_and(|n| self.board.hazard(n).is_blaze())
                        && !self.board.is_blocked_from(pos, d)
                });
                if catches {
                    self.board.set_hazard(pos, Hazard::Blaze);
                    promoted.push(pos);
                    changed = true;
                }
            }
            if !changed {
                return promoted;
            }
        }
    }

    /// Victims under a blaze are lost.
    fn check_victims(&mut self, changes: &mut HazardChanges) {
        let doomed: Vec<Position> = self
            .board
            .cells()
            .filter(|c| c.hazard.is_blaze() && c.has_victim())
            .map(|c| c.position)
            .collect();
        for pos in doomed {
            if let Some(cell) = self.board.cell_mut(pos) {
                cell.poi = None;
            }
            self.lost += 1;
            changes.victims_lost.push(pos);
            debug!(round = self.round, %pos, lost = self.lost, "Victim lost");
            if self.lost >= self.config.lost_quota {
                self.finish(Outcome::DefeatVictimsLost);
                return;
            }
        }
    }

    /// Top the board up to the minimum number of active POIs.
    ///
    /// Cells are drawn uniformly; a draw is kept if the cell is inside the
    /// building, free of hazards and has no POI. Gives up after
    /// `placement_attempts_per_cell` draws per cell.
    pub fn replenish_pois(&mut self) {
        if self.is_finished() {
            return;
        }
        let mut active = self.board.active_poi_count();
        let cells = self.board.width() * self.board.height();
        let max_attempts = cells.saturating_mul(self.config.placement_attempts_per_cell);
        let mut attempts = 0;

        while active < self.config.min_active_pois {
            if attempts >= max_attempts {
                warn!(round = self.round, active, attempts, "POI replenishment gave up");
                return;
            }
            attempts += 1;
            let x = self.rng.gen_range_u32(self.board.width());
            let y = self.rng.gen_range_u32(self.board.height());
            let pos = Position::new(x, y);
            let free = self
                .board
                .cell(pos)
                .is_some_and(|c| !c.exterior && !c.hazard.is_present() && c.poi.is_none());
            if !free {
                continue;
            }

            let kind = if self.rng.gen_bool(self.config.victim_probability) {
                PoiKind::Victim
            } else {
                PoiKind::FalseAlarm
            };
            if let Some(cell) = self.board.cell_mut(pos) {
                cell.poi = Some(Poi::hidden(kind));
            }
            if kind == PoiKind::Victim {
                self.victims_placed += 1;
            }
            self.current.placements.push(PoiPlacement { position: pos, kind });
            debug!(round = self.round, %pos, ?kind, "POI placed");
            active += 1;
        }
    }
}
