//! Round records: the turn log consumed by renderers.
//!
//! One [`RoundRecord`] is appended per round. Within a round, actions,
//! hazard rolls and knockdowns appear in the order they happened.

use serde::{Deserialize, Serialize};

use crate::agents::Goal;
use crate::board::{Hazard, PoiKind, WallCondition};
use crate::core::{AgentId, Direction, Position};

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Enough victims rescued.
    Victory,
    /// Structural damage reached the collapse threshold.
    DefeatCollapse,
    /// Too many victims lost.
    DefeatVictimsLost,
}

/// Kind of an executed agent action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    OpenDoor,
    /// Blaze turned into an ember.
    SuppressBlaze,
    /// Ember cleared.
    SuppressEmber,
    RevealPoi { outcome: PoiKind },
    PickUpVictim,
    DepositVictim,
}

/// One executed action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub agent: AgentId,
    pub kind: ActionKind,
    pub from: Position,
    /// Destination of a move, the door's far cell, or the suppressed cell.
    /// Equal to `from` for in-place actions.
    pub to: Position,
    pub ap_cost: u32,
}

/// What happened to an agent after a knockdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnockdownResult {
    /// Moved to this exit.
    Relocated(Position),
    /// Knocked out of play.
    OutOfPlay,
    /// Still in play with nowhere to go (no exits).
    Stayed,
}

/// One knockdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockdownRecord {
    pub agent: AgentId,
    pub at: Position,
    /// Where the carried victim was put down, if any.
    pub dropped_victim: Option<Position>,
    pub result: KnockdownResult,
}

/// One goal handed out by the auction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub agent: AgentId,
    pub goal: Goal,
    /// Winning bid.
    pub cost: u32,
}

/// Immediate effect of a hazard roll on its target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollEffect {
    /// The dice pointed off the board.
    OffBoard,
    /// Clear cell became an ember.
    Ember,
    /// Ember became a blaze.
    Blaze,
    /// Blaze exploded.
    Explosion,
}

/// A wall face hit by an explosion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallDamage {
    pub cell: Position,
    pub side: Direction,
    pub condition: WallCondition,
    /// True if the face was a closed door blown off its hinges.
    pub door: bool,
}

/// Side effects of one hazard roll.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardChanges {
    /// Cells set ablaze by an explosion.
    pub blazes_added: Vec<Position>,
    pub walls: Vec<WallDamage>,
    /// Embers promoted by flashover.
    pub flashovers: Vec<Position>,
    pub victims_lost: Vec<Position>,
    pub knocked_down: Vec<AgentId>,
}

/// One hazard roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardRoll {
    pub row_die: u8,
    pub column_die: u8,
    /// Cell the dice point at (possibly off the board).
    pub target: Position,
    /// Hazard before the roll, `None` when off the board.
    pub before: Option<Hazard>,
    pub effect: RollEffect,
    pub changes: HazardChanges,
}

/// A POI added by replenishment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiPlacement {
    pub position: Position,
    pub kind: PoiKind,
}

/// Game counters at the end of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub rescued: u32,
    pub lost: u32,
    pub structural_damage: u32,
    pub explosions: u32,
    pub false_alarms: u32,
    pub finished: bool,
    pub outcome: Option<Outcome>,
}

/// Everything that happened in one round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub assignments: Vec<Assignment>,
    pub actions: Vec<ActionRecord>,
    pub rolls: Vec<HazardRoll>,
    pub knockdowns: Vec<KnockdownRecord>,
    pub placements: Vec<PoiPlacement>,
    pub status: GameStatus,
}

impl RoundRecord {
    /// An empty record for round `round`.
    #[must_use]
    pub fn new(round: u32) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }
}
