//! The simulation engine: world state, action primitives, hazards, the
//! round loop, round records and snapshot export.
//!
//! `World` is split across files by concern; each file adds an `impl World`
//! block:
//!
//! - `world`: construction, accessors, bookkeeping
//! - `actions`: agent action primitives and knockdowns
//! - `hazard`: hazard advance, explosions, flashover, POI replenishment
//! - `round`: the round loop

pub mod world;
pub mod actions;
pub mod hazard;
pub mod round;
pub mod record;
pub mod export;

pub use world::World;
pub use record::{
    ActionKind, ActionRecord, Assignment, GameStatus, HazardChanges, HazardRoll, KnockdownRecord,
    KnockdownResult, Outcome, PoiPlacement, RollEffect, RoundRecord, WallDamage,
};
pub use export::{AgentStart, DoorRecord, EntranceRecord, InitialLayout, PoiRecord, Snapshot};
