//! Agent identification.
//!
//! Agents are numbered densely from 0 in the order they are created at world
//! initialization. The id doubles as the agent's index into the world roster,
//! and roster order is the order in which agents take their turns.

use serde::{Deserialize, Serialize};

/// Agent identifier supporting up to 255 agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u8);

impl AgentId {
    /// Create a new agent ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the roster index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all agent IDs for a roster of `agent_count` agents.
    ///
    /// ```
    /// use rescue_sim::core::AgentId;
    ///
    /// let agents: Vec<_> = AgentId::all(3).collect();
    /// assert_eq!(agents, vec![AgentId::new(0), AgentId::new(1), AgentId::new(2)]);
    /// ```
    pub fn all(agent_count: usize) -> impl Iterator<Item = AgentId> {
        (0..agent_count.min(u8::MAX as usize) as u8).map(AgentId)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Agent {}", self.0)
    }
}
