//! Per-search room bookkeeping: which rooms the search may enter, their
//! terrain, and the cost overlays fetched from the caller.

use crate::constants::*;
use crate::cost_matrix::CostMatrix;
use crate::location::*;
use crate::terrain::*;
use fnv::FnvHashMap;
use log::*;

/// What the caller wants the search to use for a room.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum RoomCosts {
    /// Terrain costs only.
    #[default]
    Default,
    /// Terrain costs overridden by the matrix.
    Matrix(CostMatrix),
    /// The search must not enter this room.
    Blocked,
}

impl From<Option<CostMatrix>> for RoomCosts {
    fn from(matrix: Option<CostMatrix>) -> Self {
        match matrix {
            Some(matrix) => RoomCosts::Matrix(matrix),
            None => RoomCosts::Default,
        }
    }
}

impl From<CostMatrix> for RoomCosts {
    fn from(matrix: CostMatrix) -> Self {
        RoomCosts::Matrix(matrix)
    }
}

/// Source of per-room cost data, consulted the first time a search touches
/// a room. Implementations may start another search.
pub trait RoomCallback {
    fn room_costs(&mut self, room: RoomId) -> RoomCosts;
}

impl<F> RoomCallback for F
where
    F: FnMut(RoomId) -> RoomCosts,
{
    fn room_costs(&mut self, room: RoomId) -> RoomCosts {
        self(room)
    }
}

/// Callback that never overrides terrain.
pub struct TerrainOnly;

impl RoomCallback for TerrainOnly {
    fn room_costs(&mut self, _room: RoomId) -> RoomCosts {
        RoomCosts::Default
    }
}

/// A room admitted into the current search.
pub struct RoomSlot<'a> {
    room: RoomId,
    terrain: &'a RoomTerrain,
    costs: Option<CostMatrix>,
}

impl<'a> RoomSlot<'a> {
    pub fn overlay(&self) -> Option<&CostMatrix> {
        self.costs.as_ref()
    }

    /// Cost of entering local `(x, y)`, or `None` if the cell is impassable.
    #[inline]
    pub fn cell_cost(&self, x: u8, y: u8, plain_cost: u32, swamp_cost: u32) -> Option<u32> {
        let flags = self.terrain.get_xy(x, y);
        if flags.is_wall() {
            return None;
        }

        if let Some(costs) = &self.costs {
            match costs.get(x, y) {
                COST_OBSTACLE => return None,
                COST_DEFAULT => {}
                cost => return Some(cost as u32),
            }
        }

        if flags.is_swamp() {
            Some(swamp_cost)
        } else {
            Some(plain_cost)
        }
    }
}

/// Rooms admitted by one search, with their overlays memoized.
///
/// The callback is asked about each room at most once. Rooms missing from the
/// terrain store and rooms the callback blocks are remembered as unavailable.
pub struct RoomTable<'a> {
    terrain: &'a TerrainStore,
    callback: &'a mut dyn RoomCallback,
    slots: Vec<RoomSlot<'a>>,
    index: FnvHashMap<RoomId, Option<usize>>,
    max_rooms: usize,
    room_limit_hit: bool,
}

impl<'a> RoomTable<'a> {
    pub fn new(
        terrain: &'a TerrainStore,
        callback: &'a mut dyn RoomCallback,
        max_rooms: u8,
    ) -> Self {
        RoomTable {
            terrain,
            callback,
            slots: Vec::with_capacity(max_rooms as usize),
            index: FnvHashMap::default(),
            max_rooms: max_rooms as usize,
            room_limit_hit: false,
        }
    }

    /// Slot index for `room`, admitting it on first use. Returns `None` when
    /// the room is unavailable or the room budget is spent.
    pub fn lookup(&mut self, room: RoomId) -> Option<usize> {
        if let Some(entry) = self.index.get(&room) {
            return *entry;
        }

        let terrain = match self.terrain.room(room) {
            Some(terrain) => terrain,
            None => {
                trace!("Room {} has no terrain", room);
                self.index.insert(room, None);
                return None;
            }
        };

        if self.slots.len() >= self.max_rooms {
            self.room_limit_hit = true;
            return None;
        }

        let costs = match self.callback.room_costs(room) {
            RoomCosts::Blocked => {
                trace!("Room {} blocked by callback", room);
                self.index.insert(room, None);
                return None;
            }
            RoomCosts::Default => None,
            RoomCosts::Matrix(matrix) => Some(matrix),
        };

        trace!(
            "Admitted room {} (slot {}, overlay: {})",
            room,
            self.slots.len(),
            costs.is_some()
        );

        let slot = self.slots.len();
        self.slots.push(RoomSlot {
            room,
            terrain,
            costs,
        });
        self.index.insert(room, Some(slot));
        Some(slot)
    }

    /// Overlay for `room`: `None` if the room is unavailable, `Some(None)`
    /// if it is admitted without an overlay.
    pub fn overlay_for(&mut self, room: RoomId) -> Option<Option<&CostMatrix>> {
        let slot = self.lookup(room)?;
        Some(self.slots[slot].overlay())
    }

    #[inline]
    pub fn slot(&self, index: usize) -> &RoomSlot<'a> {
        &self.slots[index]
    }

    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.slots.iter().map(|s| s.room)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True once a room was turned away because `max_rooms` were in use.
    pub fn room_limit_hit(&self) -> bool {
        self.room_limit_hit
    }
}
