//! Snapshot export.
//!
//! A [`Snapshot`] is the initial layout of the building plus every completed
//! round record, which is all a renderer needs to replay a game. It
//! serializes to pretty JSON for inspection and to bincode for compact
//! storage.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::record::RoundRecord;
use crate::agents::Agent;
use crate::board::{Board, DoorState, Hazard, PoiKind, WallId};
use crate::core::{AgentId, Direction, Position};

/// A door, listed once per boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorRecord {
    pub cell: Position,
    pub side: Direction,
    pub open: bool,
}

/// An entrance and the side of the board it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntranceRecord {
    pub position: Position,
    pub facing: Direction,
}

/// Where an agent started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStart {
    pub agent: AgentId,
    pub position: Position,
}

/// A POI on the initial board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiRecord {
    pub position: Position,
    pub kind: PoiKind,
    pub revealed: bool,
}

/// The building before the first round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialLayout {
    pub width: u32,
    pub height: u32,
    /// Row-major 4-digit wall masks (`N W S E`) of standing walls.
    pub masks: Vec<String>,
    pub doors: Vec<DoorRecord>,
    pub agents: Vec<AgentStart>,
    pub pois: Vec<PoiRecord>,
    pub blazes: Vec<Position>,
    pub embers: Vec<Position>,
    pub entrances: Vec<EntranceRecord>,
    pub structural_damage: u32,
}

impl InitialLayout {
    /// Capture `board` and the agents' starting cells.
    #[must_use]
    pub fn capture(board: &Board, agents: &[Agent], structural_damage: u32) -> Self {
        let mut masks = Vec::with_capacity(board.cells().count());
        let mut doors = Vec::new();
        let mut seen: FxHashSet<WallId> = FxHashSet::default();
        let mut pois = Vec::new();
        let mut blazes = Vec::new();
        let mut embers = Vec::new();

        for cell in board.cells() {
            let mut mask = ['0'; 4];
            for side in Direction::ALL {
                let Some(id) = cell.wall(side) else {
                    continue;
                };
                let wall = board.walls().get(id);
                if wall.is_destroyed() {
                    continue;
                }
                mask[side.mask_index()] = '1';
                if wall.door == DoorState::None || !seen.insert(id) {
                    continue;
                }
                if let Some(mirror) = wall.mirror {
                    seen.insert(mirror);
                }
                doors.push(DoorRecord {
                    cell: cell.position,
                    side,
                    open: wall.door == DoorState::Open,
                });
            }
            masks.push(mask.iter().collect());

            if let Some(poi) = cell.poi {
                pois.push(PoiRecord {
                    position: cell.position,
                    kind: poi.kind,
                    revealed: poi.revealed,
                });
            }
            match cell.hazard {
                Hazard::Blaze => blazes.push(cell.position),
                Hazard::Ember => embers.push(cell.position),
                Hazard::Clear => {}
            }
        }

        let entrances = board
            .exits()
            .iter()
            .map(|&position| EntranceRecord {
                position,
                facing: facing(board, position),
            })
            .collect();
        let agents = agents
            .iter()
            .map(|a| AgentStart {
                agent: a.id,
                position: a.position,
            })
            .collect();

        Self {
            width: board.width(),
            height: board.height(),
            masks,
            doors,
            agents,
            pois,
            blazes,
            embers,
            entrances,
            structural_damage,
        }
    }
}

/// Board edge an entrance sits on; north when it is not on an edge.
fn facing(board: &Board, pos: Position) -> Direction {
    if pos.y == 0 {
        Direction::North
    } else if pos.y + 1 == board.height() {
        Direction::South
    } else if pos.x == 0 {
        Direction::West
    } else if pos.x + 1 == board.width() {
        Direction::East
    } else {
        Direction::North
    }
}

/// Initial layout plus the completed rounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub layout: InitialLayout,
    pub rounds: Vec<RoundRecord>,
}

impl Snapshot {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Compact binary encoding.
    pub fn to_bincode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn from_bincode(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
