//! # rescue-sim
//!
//! A deterministic turn engine for a cooperative fire-rescue board game
//! played by autonomous agents.
//!
//! ## Design Principles
//!
//! 1. **Explicit World**: All state lives in a [`World`] value. There are no
//!    globals, and every mutation goes through its methods.
//!
//! 2. **Reproducible**: One seeded RNG stream, consumed in a fixed order.
//!    The same scenario and seed give identical round records.
//!
//! 3. **Configuration Over Convention**: Every tunable constant lives in
//!    [`RulesConfig`].
//!
//! ## Architecture
//!
//! - **Mirrored walls**: Each boundary is two faces in an arena, linked by
//!   `WallId`. The arena updates both faces together.
//!
//! - **Auction then policy**: Once per round a greedy auction hands out
//!   goals. During its turn each agent follows a prioritized policy.
//!
//! - **Persistent history**: Round records are kept in an `im::Vector`.
//!
//! ## Modules
//!
//! - `core`: Agent ids, grid geometry, RNG, rules configuration
//! - `board`: Walls, cells and the grid
//! - `scenario`: Layout contract, text loader, sample map
//! - `agents`: Agent state, pathfinding, turn policies
//! - `auction`: Per-round goal assignment
//! - `engine`: World, actions, hazards, round loop, records, export
//!
//! ## Example
//!
//! ```
//! use rescue_sim::{RulesConfig, Scenario, World};
//!
//! let mut world = World::new(&Scenario::sample(), RulesConfig::default(), 42);
//! let played = world.run(50);
//! assert_eq!(world.history().len() as u32, played);
//! ```

pub mod core;
pub mod board;
pub mod scenario;
pub mod agents;
pub mod auction;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{AgentId, Direction, GameRng, Position, RulesConfig, Strategy};

pub use crate::board::{Board, Cell, DoorState, Hazard, Poi, PoiKind, Wall, WallArena, WallId};

pub use crate::scenario::{parse_layout, Scenario, ScenarioError};

pub use crate::agents::{Agent, Goal, Pathfinder, TurnPolicy};

pub use crate::auction::run_auction;

pub use crate::engine::{GameStatus, Outcome, RoundRecord, Snapshot, World};
