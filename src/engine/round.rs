//! The round loop.
//!
//! ## Round order
//!
//! 1. Agents in play get their AP back (leftover carries over up to a cap).
//! 2. Coordinated strategy only: the auction hands out goals.
//! 3. Each agent in play, in roster order, takes a full turn; one hazard
//!    advance follows every turn.
//! 4. POIs are replenished.
//! 5. Victory is checked and the round record is appended.
//!
//! The game can end anywhere in between. Whatever is left of the round is
//! skipped, but the record of the round in flight is still appended.

use tracing::{debug, info};

use super::record::{Outcome, RoundRecord};
use super::world::World;
use crate::agents::{policy_for, TurnPolicy};
use crate::auction::run_auction;
use crate::core::{AgentId, Strategy};

impl World {
    /// Play one round. Returns true if the game goes on afterwards.
    ///
    /// Calling this on a finished world does nothing and returns false.
    pub fn run_round(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.round += 1;
        self.current = RoundRecord::new(self.round);
        info!(round = self.round, "Round started");

        for agent in self.agents.iter_mut().filter(|a| a.alive) {
            agent.ap = self.config.replenished_ap(agent.ap);
        }

        if self.config.strategy == Strategy::Coordinated {
            self.current.assignments = run_auction(self);
        }

        let policy = policy_for(self.config.strategy);
        for id in AgentId::all(self.agents.len()) {
            if self.is_finished() {
                break;
            }
            if !self.agent(id).alive {
                continue;
            }
            self.take_turn(id, policy);
            self.advance_hazard();
        }

        self.replenish_pois();
        if !self.is_finished() && self.rescued >= self.config.rescue_quota {
            self.finish(Outcome::Victory);
        }

        self.current.status = self.status();
        self.history.push_back(std::mem::take(&mut self.current));
        info!(
            round = self.round,
            rescued = self.rescued,
            lost = self.lost,
            damage = self.structural_damage,
            "Round finished"
        );
        !self.is_finished()
    }

    /// Play rounds until the game ends or `max_rounds` have been played.
    /// Returns the number of rounds played by this call.
    pub fn run(&mut self, max_rounds: u32) -> u32 {
        let mut played = 0;
        while played < max_rounds && !self.is_finished() {
            self.run_round();
            played += 1;
        }
        played
    }

    /// Let `policy` act for `id` until it runs out of AP, of ideas or of
    /// the per-turn action cap.
    fn take_turn(&mut self, id: AgentId, policy: &dyn TurnPolicy) {
        let mut actions = 0;
        while actions < self.config.max_actions_per_turn {
            let agent = self.agent(id);
            if self.is_finished() || !agent.alive || agent.ap == 0 {
                break;
            }
            if !policy.act(self, id) {
                break;
            }
            actions += 1;
        }
        debug!(round = self.round, agent = ?id, actions, ap = self.agent(id).ap, "Turn over");
    }
}
