//! Board cells: walls, hazard, point of interest and occupants.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::wall::WallId;
use crate::core::{AgentId, Direction, Position};

/// Hazard state of a cell.
///
/// Ember and blaze are mutually exclusive, so they share one field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hazard {
    /// No hazard.
    #[default]
    Clear,
    /// Pre-ignition stage. Becomes a blaze on a direct roll or by flashover.
    Ember,
    /// Active hazard. Knocks down agents, destroys victims, explodes on a roll.
    Blaze,
}

impl Hazard {
    /// True for [`Hazard::Blaze`].
    #[must_use]
    pub fn is_blaze(self) -> bool {
        self == Hazard::Blaze
    }

    /// True for [`Hazard::Ember`].
    #[must_use]
    pub fn is_ember(self) -> bool {
        self == Hazard::Ember
    }

    /// True unless clear.
    #[must_use]
    pub fn is_present(self) -> bool {
        self != Hazard::Clear
    }
}

/// What a point of interest turns out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoiKind {
    /// A victim to carry out.
    Victim,
    /// Nothing there; discarded when revealed.
    FalseAlarm,
}

/// A point of interest on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Poi {
    /// Hidden identity.
    pub kind: PoiKind,
    /// True once an agent has looked.
    pub revealed: bool,
}

impl Poi {
    /// An unrevealed POI.
    #[must_use]
    pub const fn hidden(kind: PoiKind) -> Self {
        Self {
            kind,
            revealed: false,
        }
    }

    /// A revealed victim.
    #[must_use]
    pub const fn revealed_victim() -> Self {
        Self {
            kind: PoiKind::Victim,
            revealed: true,
        }
    }

    /// True for any victim, revealed or not.
    #[must_use]
    pub fn is_victim(self) -> bool {
        self.kind == PoiKind::Victim
    }

    /// True for a victim that has been revealed and waits for pickup.
    #[must_use]
    pub fn is_revealed_victim(self) -> bool {
        self.revealed && self.is_victim()
    }
}

/// One board tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Where this cell is.
    pub position: Position,

    /// Wall faces on this cell's sides, indexed by [`Direction::mask_index`].
    walls: [Option<WallId>; 4],

    /// Hazard state.
    pub hazard: Hazard,

    /// Point of interest, if any.
    pub poi: Option<Poi>,

    /// Active agents standing here, in arrival order.
    pub occupants: SmallVec<[AgentId; 4]>,

    /// Outside the building. Never searched or targeted.
    pub exterior: bool,
}

impl Cell {
    /// An open cell with no walls.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            walls: [None; 4],
            hazard: Hazard::Clear,
            poi: None,
            occupants: SmallVec::new(),
            exterior: false,
        }
    }

    /// Wall face on the given side.
    #[must_use]
    pub fn wall(&self, direction: Direction) -> Option<WallId> {
        self.walls[direction.mask_index()]
    }

    /// Attach a wall face on the given side.
    pub fn set_wall(&mut self, direction: Direction, wall: WallId) {
        self.walls[direction.mask_index()] = Some(wall);
    }

    /// True for an unrevealed POI, whatever its kind.
    #[must_use]
    pub fn has_hidden_poi(&self) -> bool {
        self.poi.is_some_and(|p| !p.revealed)
    }

    /// True for a revealed victim awaiting pickup.
    #[must_use]
    pub fn has_revealed_victim(&self) -> bool {
        self.poi.is_some_and(Poi::is_revealed_victim)
    }

    /// True for any victim, revealed or not.
    #[must_use]
    pub fn has_victim(&self) -> bool {
        self.poi.is_some_and(Poi::is_victim)
    }

    /// Add an agent to the occupant list.
    pub fn enter(&mut self, agent: AgentId) {
        if !self.occupants.contains(&agent) {
            self.occupants.push(agent);
        }
    }

    /// Remove an agent from the occupant list.
    pub fn leave(&mut self, agent: AgentId) {
        self.occupants.retain(|a| *a != agent);
    }
}
