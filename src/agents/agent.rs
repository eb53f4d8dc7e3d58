//! Agent state and goals.

use serde::{Deserialize, Serialize};

use crate::core::{AgentId, Position};

/// What an agent has been told (or decided) to do next.
///
/// Each variant carries its target cell. Goals never outlive the round
/// they were assigned in, except when an agent picks one for itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    /// Carry the current victim to this exit.
    Deliver(Position),
    /// Pick up the revealed victim here.
    Rescue(Position),
    /// Reveal the POI here.
    Investigate(Position),
    /// Put out the blaze here.
    SuppressBlaze(Position),
}

impl Goal {
    /// Cell the goal points at.
    #[must_use]
    pub fn target(self) -> Position {
        match self {
            Goal::Deliver(p) | Goal::Rescue(p) | Goal::Investigate(p) | Goal::SuppressBlaze(p) => p,
        }
    }
}

/// One member of the rescue crew.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub position: Position,
    /// Action points left this round.
    pub ap: u32,
    pub knockdowns: u32,
    pub carrying_victim: bool,
    /// False once knocked out of play. The agent stays in the roster.
    pub alive: bool,
    pub goal: Option<Goal>,
}

impl Agent {
    /// A fresh agent with no AP; AP is granted at the start of each round.
    #[must_use]
    pub fn new(id: AgentId, position: Position) -> Self {
        Self {
            id,
            position,
            ap: 0,
            knockdowns: 0,
            carrying_victim: false,
            alive: true,
            goal: None,
        }
    }

    /// True if the agent can take part in auctions without a forced goal.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.alive && !self.carrying_victim
    }

    /// True if `cost` AP is available.
    #[must_use]
    pub fn can_afford(&self, cost: u32) -> bool {
        self.ap >= cost
    }

    /// Deduct `cost` AP. Returns false, leaving AP untouched, if unaffordable.
    pub fn spend(&mut self, cost: u32) -> bool {
        match self.ap.checked_sub(cost) {
            Some(left) => {
                self.ap = left;
                true
            }
            None => false,
        }
    }
}
