//! Atomic agent actions.
//!
//! Every primitive checks all of its preconditions before touching the
//! world and returns `false` ("not taken") when one fails. Nothing happens
//! once the game is over or for an agent out of play.
//!
//! ## AP costs
//!
//! | Action | Cost |
//! |--------|------|
//! | Move | 1, or 2 carrying, +1 into a blaze |
//! | Open a closed door face | 1 |
//! | Blaze to ember | 2 |
//! | Ember to clear | 1 |
//! | Reveal, pick up, deposit | 0 |

use tracing::{debug, warn};

use super::record::{ActionKind, KnockdownRecord, KnockdownResult, Outcome};
use super::world::World;
use crate::agents::Goal;
use crate::board::{Hazard, Poi, PoiKind};
use crate::core::{AgentId, Direction, Position};

impl World {
    fn can_act(&self, agent: AgentId) -> bool {
        !self.is_finished() && self.agent(agent).alive
    }

    fn place_agent(&mut self, agent: AgentId, to: Position) {
        let from = self.agent(agent).position;
        if let Some(cell) = self.board.cell_mut(from) {
            cell.leave(agent);
        }
        if let Some(cell) = self.board.cell_mut(to) {
            cell.enter(agent);
        }
        self.agent_mut(agent).position = to;
    }

    /// Step one cell in `direction`.
    ///
    /// Closed door faces on the boundary are opened first, 1 AP each, each
    /// recorded as its own action. The step itself follows if the remaining
    /// AP covers it. Entering a blaze knocks the agent down after the move;
    /// entering an unrevealed POI reveals it.
    ///
    /// Returns true if anything was done, including opening a door without
    /// being able to step through.
    pub fn move_agent(&mut self, agent: AgentId, direction: Direction) -> bool {
        if !self.can_act(agent) || self.agent(agent).ap == 0 {
            return false;
        }
        let from = self.agent(agent).position;
        let Some(to) = self.board.neighbor(from, direction) else {
            return false;
        };
        let near = self.board.wall_id(from, direction);
        let far = self.board.wall_id(to, direction.opposite());
        let faces = [near, far];
        if faces
            .iter()
            .flatten()
            .any(|&id| self.board.walls().get(id).is_blocking())
        {
            return false;
        }

        let mut acted = false;
        for id in faces.into_iter().flatten() {
            if !self.board.walls().get(id).is_closed_door() {
                continue;
            }
            if !self.agent_mut(agent).spend(1) {
                return acted;
            }
            self.board.walls_mut().open_door(id);
            self.record_action(agent, ActionKind::OpenDoor, from, to, 1);
            debug!(?agent, %from, %to, "Door opened");
            acted = true;
        }

        let carrying = self.agent(agent).carrying_victim;
        let into_blaze = self.board.hazard(to).is_blaze();
        let base = if carrying { 2 } else { 1 };
        let cost = base + u32::from(into_blaze);
        if !self.agent_mut(agent).spend(cost) {
            return acted;
        }
        self.place_agent(agent, to);
        self.record_action(agent, ActionKind::Move, from, to, cost);
        debug!(?agent, %from, %to, cost, "Moved");

        if into_blaze {
            self.knock_down(agent);
        }
        let still_here = self.agent(agent).alive && self.agent(agent).position == to;
        if still_here && self.board.cell(to).is_some_and(|c| c.has_hidden_poi()) {
            self.reveal_poi(agent);
        }
        true
    }

    /// Knock a hazard on the agent's own cell or an adjacent cell down one
    /// stage: blaze to ember for 2 AP, or ember to clear for 1 AP.
    ///
    /// Walls are not checked here; callers decide what the agent can reach.
    pub fn suppress(&mut self, agent: AgentId, target: Position) -> bool {
        if !self.can_act(agent) {
            return false;
        }
        let from = self.agent(agent).position;
        if from != target && from.direction_to(target).is_none() {
            return false;
        }
        let (kind, cost, after) = match self.board.hazard(target) {
            Hazard::Blaze => (ActionKind::SuppressBlaze, 2, Hazard::Ember),
            Hazard::Ember => (ActionKind::SuppressEmber, 1, Hazard::Clear),
            Hazard::Clear => return false,
        };
        if !self.board.contains(target) || !self.agent_mut(agent).spend(cost) {
            return false;
        }
        self.board.set_hazard(target, after);
        self.record_action(agent, kind, from, target, cost);
        debug!(?agent, %target, ?kind, "Hazard suppressed");
        true
    }

    /// Reveal the unrevealed POI on the agent's cell.
    ///
    /// A victim is picked up at once if the agent's hands are free. A false
    /// alarm is discarded and the agent's goal is dropped.
    pub fn reveal_poi(&mut self, agent: AgentId) -> bool {
        if !self.can_act(agent) {
            return false;
        }
        let at = self.agent(agent).position;
        let Some(cell) = self.board.cell_mut(at) else {
            return false;
        };
        let Some(poi) = cell.poi.as_mut().filter(|p| !p.revealed) else {
            return false;
        };
        poi.revealed = true;
        let outcome = poi.kind;
        self.record_action(agent, ActionKind::RevealPoi { outcome }, at, at, 0);
        debug!(?agent, %at, ?outcome, "POI revealed");

        match outcome {
            PoiKind::Victim => {
                self.pick_up_victim(agent);
            }
            PoiKind::FalseAlarm => {
                if let Some(cell) = self.board.cell_mut(at) {
                    cell.poi = None;
                }
                self.false_alarms += 1;
                self.agent_mut(agent).goal = None;
            }
        }
        true
    }

    /// Pick up the revealed victim on the agent's cell and head for the
    /// cheapest exit.
    pub fn pick_up_victim(&mut self, agent: AgentId) -> bool {
        if !self.can_act(agent) || self.agent(agent).carrying_victim {
            return false;
        }
        let at = self.agent(agent).position;
        let Some(cell) = self.board.cell_mut(at) else {
            return false;
        };
        if !cell.has_revealed_victim() {
            return false;
        }
        cell.poi = None;
        self.agent_mut(agent).carrying_victim = true;
        let exit = self.cheapest_exit(agent);
        self.agent_mut(agent).goal = exit.map(Goal::Deliver);
        self.record_action(agent, ActionKind::PickUpVictim, at, at, 0);
        debug!(?agent, %at, ?exit, "Victim picked up");
        true
    }

    /// Put the carried victim down at an exit, rescuing it.
    pub fn deposit_victim(&mut self, agent: AgentId) -> bool {
        if !self.can_act(agent) || !self.agent(agent).carrying_victim {
            return false;
        }
        let at = self.agent(agent).position;
        if !self.board.is_exit(at) {
            return false;
        }
        let a = self.agent_mut(agent);
        a.carrying_victim = false;
        a.goal = None;
        self.rescued += 1;
        self.record_action(agent, ActionKind::DepositVictim, at, at, 0);
        debug!(?agent, %at, rescued = self.rescued, "Victim rescued");
        if self.rescued >= self.config.rescue_quota {
            self.finish(Outcome::Victory);
        }
        true
    }

    /// Knock an agent down.
    ///
    /// A carried victim is put down, revealed, on the nearest cell without a
    /// POI. At the knockdown limit the agent leaves play; otherwise it is
    /// moved to the Manhattan-nearest exit for free. The goal is dropped
    /// either way.
    pub fn knock_down(&mut self, agent: AgentId) -> bool {
        if !self.can_act(agent) {
            return false;
        }
        let at = self.agent(agent).position;
        let carrying = self.agent(agent).carrying_victim;
        {
            let a = self.agent_mut(agent);
            a.knockdowns += 1;
            a.carrying_victim = false;
            a.goal = None;
        }
        let dropped_victim = if carrying { self.drop_victim(at) } else { None };

        let result = if self.agent(agent).knockdowns >= self.config.max_knockdowns {
            if let Some(cell) = self.board.cell_mut(at) {
                cell.leave(agent);
            }
            self.agent_mut(agent).alive = false;
            KnockdownResult::OutOfPlay
        } else if let Some(exit) = self.board.nearest_exit_by_distance(at) {
            self.place_agent(agent, exit);
            KnockdownResult::Relocated(exit)
        } else {
            KnockdownResult::Stayed
        };

        debug!(?agent, %at, ?result, knockdowns = self.agent(agent).knockdowns, "Knocked down");
        self.current.knockdowns.push(KnockdownRecord {
            agent,
            at,
            dropped_victim,
            result,
        });
        true
    }

    /// Put a victim down as close to `at` as possible. Counts it as lost if
    /// every cell already holds a POI.
    fn drop_victim(&mut self, at: Position) -> Option<Position> {
        let spot = self
            .board
            .cells()
            .filter(|c| c.poi.is_none() && !c.exterior)
            .map(|c| c.position)
            .min_by_key(|p| (p.manhattan(at), p.y, p.x));

        let Some(spot) = spot else {
            self.lost += 1;
            warn!(%at, lost = self.lost, "No room to put down victim; counted as lost");
            if self.lost >= self.config.lost_quota {
                self.finish(Outcome::DefeatVictimsLost);
            }
            return None;
        };
        if let Some(cell) = self.board.cell_mut(spot) {
            cell.poi = Some(Poi::revealed_victim());
        }
        Some(spot)
    }
}
