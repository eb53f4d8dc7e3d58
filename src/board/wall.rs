//! Walls, doors and the wall arena.
//!
//! A physical boundary between two cells is stored as two `Wall` records, one
//! per face, each holding the `WallId` of its mirror. All mutation goes
//! through `WallArena`, which updates both faces together so that a wall and
//! its mirror never disagree on `damage`, `door` or `standing`.
//!
//! Faces on the board edge (or facing a cell whose layout has no matching
//! wall) have no mirror.

use serde::{Deserialize, Serialize};

/// Damage at which a wall is destroyed.
pub const DESTROYED_DAMAGE: u8 = 2;

/// Handle to a wall face in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallId(pub u32);

impl WallId {
    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Door state of a wall face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorState {
    /// Plain wall.
    #[default]
    None,
    /// Closed door: passable for 1 AP, blocks flashover.
    Closed,
    /// Open door: passable for free.
    Open,
}

/// Outward-facing condition of a wall, used in records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallCondition {
    /// Undamaged.
    Intact,
    /// One hit taken.
    Damaged,
    /// Gone, along with any door it carried.
    Destroyed,
}

/// One face of a wall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    /// Hits taken (0 intact, 1 damaged, 2 destroyed).
    pub damage: u8,
    /// Door state.
    pub door: DoorState,
    /// False once destroyed.
    pub standing: bool,
    /// Face on the other side of the same boundary.
    pub mirror: Option<WallId>,
}

impl Wall {
    /// A standing, undamaged wall face.
    #[must_use]
    pub fn new(door: DoorState) -> Self {
        Self {
            damage: 0,
            door,
            standing: true,
            mirror: None,
        }
    }

    /// True once the wall has been destroyed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.damage >= DESTROYED_DAMAGE || !self.standing
    }

    /// True if agents and flames can cross this face.
    #[must_use]
    pub fn is_passable(&self) -> bool {
        self.is_destroyed() || self.door == DoorState::Open
    }

    /// True for an intact plain wall, which nothing can cross.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        !self.is_destroyed() && self.door == DoorState::None
    }

    /// True for a standing closed door.
    #[must_use]
    pub fn is_closed_door(&self) -> bool {
        !self.is_destroyed() && self.door == DoorState::Closed
    }

    /// Condition for records.
    #[must_use]
    pub fn condition(&self) -> WallCondition {
        if self.is_destroyed() {
            WallCondition::Destroyed
        } else if self.damage > 0 {
            WallCondition::Damaged
        } else {
            WallCondition::Intact
        }
    }
}

/// Storage for every wall face on the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallArena {
    walls: Vec<Wall>,
}

impl WallArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a wall face and return its handle.
    pub fn insert(&mut self, wall: Wall) -> WallId {
        let id = WallId(self.walls.len() as u32);
        self.walls.push(wall);
        id
    }

    /// Number of wall faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// True if no walls were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Look up a wall face.
    #[must_use]
    pub fn get(&self, id: WallId) -> &Wall {
        &self.walls[id.index()]
    }

    /// Iterate over all faces with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (WallId, &Wall)> {
        self.walls
            .iter()
            .enumerate()
            .map(|(i, w)| (WallId(i as u32), w))
    }

    /// Link two faces as mirrors of each other.
    pub fn link(&mut self, a: WallId, b: WallId) {
        self.walls[a.index()].mirror = Some(b);
        self.walls[b.index()].mirror = Some(a);
    }

    /// Set the door state on a face without touching its mirror.
    ///
    /// Only used while building a board, before mirrors are linked.
    pub fn set_door(&mut self, id: WallId, door: DoorState) {
        self.walls[id.index()].door = door;
    }

    /// Open a closed door on both faces.
    ///
    /// Returns true if the door changed state.
    pub fn open_door(&mut self, id: WallId) -> bool {
        self.swing_door(id, DoorState::Closed, DoorState::Open)
    }

    /// Close an open door on both faces.
    ///
    /// Returns true if the door changed state.
    pub fn close_door(&mut self, id: WallId) -> bool {
        self.swing_door(id, DoorState::Open, DoorState::Closed)
    }

    fn swing_door(&mut self, id: WallId, from: DoorState, to: DoorState) -> bool {
        let wall = &self.walls[id.index()];
        if !wall.standing || wall.is_destroyed() || wall.door != from {
            return false;
        }
        let mirror = wall.mirror;
        self.walls[id.index()].door = to;
        if let Some(m) = mirror {
            self.walls[m.index()].door = to;
        }
        true
    }

    /// Damage a wall by one hit. The second hit destroys it.
    ///
    /// Returns the resulting condition, or `None` if the wall was already
    /// destroyed and nothing changed.
    pub fn apply_hit(&mut self, id: WallId) -> Option<WallCondition> {
        let wall = &mut self.walls[id.index()];
        if wall.is_destroyed() {
            return None;
        }
        wall.damage += 1;
        if wall.damage >= DESTROYED_DAMAGE {
            self.destroy(id);
            return Some(WallCondition::Destroyed);
        }
        let (damage, mirror) = (wall.damage, wall.mirror);
        if let Some(m) = mirror {
            self.walls[m.index()].damage = damage;
        }
        Some(WallCondition::Damaged)
    }

    /// Destroy a wall, removing any door, on both faces.
    ///
    /// Returns false if the wall was already destroyed.
    pub fn destroy(&mut self, id: WallId) -> bool {
        let wall = &self.walls[id.index()];
        if !wall.standing {
            return false;
        }
        let mirror = wall.mirror;
        for face in std::iter::once(id).chain(mirror) {
            let w = &mut self.walls[face.index()];
            w.standing = false;
            w.door = DoorState::None;
            w.damage = DESTROYED_DAMAGE;
        }
        true
    }

    /// True if `id` and its mirror agree on every mutable field.
    #[must_use]
    pub fn is_symmetric(&self, id: WallId) -> bool {
        let wall = self.get(id);
        match wall.mirror {
            None => true,
            Some(m) => {
                let other = self.get(m);
                wall.damage == other.damage
                    && wall.door == other.door
                    && wall.standing == other.standing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked_pair(door: DoorState) -> (WallArena, WallId, WallId) {
        let mut arena = WallArena::new();
        let a = arena.insert(Wall::new(door));
        let b = arena.insert(Wall::new(door));
        arena.link(a, b);
        (arena, a, b)
    }

    #[test]
    fn test_open_and_close_door_mirrors() {
        let (mut arena, a, b) = linked_pair(DoorState::Closed);

        assert!(arena.open_door(a));
        assert_eq!(arena.get(b).door, DoorState::Open);
        assert!(arena.get(b).is_passable());

        assert!(!arena.open_door(b));

        assert!(arena.close_door(b));
        assert_eq!(arena.get(a).door, DoorState::Closed);
        assert!(arena.is_symmetric(a));
    }

    #[test]
    fn test_plain_wall_has_no_door_to_open() {
        let (mut arena, a, _) = linked_pair(DoorState::None);
        assert!(!arena.open_door(a));
        assert!(arena.get(a).is_blocking());
    }

    #[test]
    fn test_hit_then_destroy() {
        let (mut arena, a, b) = linked_pair(DoorState::None);

        assert_eq!(arena.apply_hit(b), Some(WallCondition::Damaged));
        assert_eq!(arena.get(a).damage, 1);
        assert_eq!(arena.get(a).condition(), WallCondition::Damaged);
        assert!(arena.get(a).is_blocking());

        assert_eq!(arena.apply_hit(a), Some(WallCondition::Destroyed));
        assert!(arena.get(b).is_destroyed());
        assert!(!arena.get(b).standing);
        assert!(arena.get(b).is_passable());

        assert_eq!(arena.apply_hit(a), None);
        assert_eq!(arena.get(a).damage, DESTROYED_DAMAGE);
    }

    #[test]
    fn test_destroy_removes_door() {
        let (mut arena, a, b) = linked_pair(DoorState::Closed);

        assert!(arena.destroy(a));
        assert_eq!(arena.get(b).door, DoorState::None);
        assert!(!arena.destroy(b));
        assert!(!arena.open_door(a));
        assert!(arena.is_symmetric(b));
    }

    #[test]
    fn test_unmirrored_face() {
        let mut arena = WallArena::new();
        let edge = arena.insert(Wall::new(DoorState::None));

        assert_eq!(arena.apply_hit(edge), Some(WallCondition::Damaged));
        assert_eq!(arena.apply_hit(edge), Some(WallCondition::Destroyed));
        assert!(arena.is_symmetric(edge));
    }
}
