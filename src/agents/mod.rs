//! Agents: per-agent state, route search and turn policies.

pub mod agent;
pub mod pathfinder;
pub mod policy;

pub use agent::{Agent, Goal};
pub use pathfinder::{Pathfinder, BLAZE_DETOUR_COST, UNREACHABLE};
pub use policy::{policy_for, CoordinatedPolicy, RandomWalkPolicy, TurnPolicy};
