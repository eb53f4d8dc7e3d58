//! Core engine types: agent ids, grid geometry, RNG, rules configuration.
//!
//! This module contains the building blocks shared by the board, the agents
//! and the world. Nothing here knows about hazards or turns.

pub mod ids;
pub mod geometry;
pub mod rng;
pub mod config;

pub use ids::AgentId;
pub use geometry::{Direction, Position};
pub use rng::GameRng;
pub use config::{RulesConfig, Strategy};
