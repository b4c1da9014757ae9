//! World terrain: per-cell passability for every room, packed two bits per
//! cell and immutable once built.
//!
//! A process normally installs one store through [`load_terrain`] before any
//! search runs. The store is read concurrently by every search thread without
//! locking.

use crate::constants::*;
use crate::error::TerrainError;
use crate::location::*;
use bitflags::*;
use fnv::FnvHashMap;
use log::*;
use once_cell::sync::OnceCell;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TerrainFlags: u8 {
        const NONE = 0;
        const WALL = 1;
        const SWAMP = 2;
    }
}

impl TerrainFlags {
    #[inline]
    pub fn is_wall(self) -> bool {
        self.contains(TerrainFlags::WALL)
    }

    #[inline]
    pub fn is_swamp(self) -> bool {
        !self.is_wall() && self.contains(TerrainFlags::SWAMP)
    }
}

const PACKED_LEN: usize = ROOM_AREA / 4;

/// Terrain for one room.
#[derive(Clone)]
pub struct RoomTerrain {
    room: RoomId,
    packed: Box<[u8; PACKED_LEN]>,
}

impl RoomTerrain {
    /// Builds a room from 2500 row-major (`y * 50 + x`) terrain flag bytes.
    /// Bits other than `WALL` and `SWAMP` are ignored.
    pub fn new(room: RoomId, buffer: &[u8]) -> Result<RoomTerrain, TerrainError> {
        if buffer.len() != ROOM_AREA {
            return Err(TerrainError::InvalidLength {
                room,
                len: buffer.len(),
            });
        }

        let mut packed = Box::new([0u8; PACKED_LEN]);
        for (index, value) in buffer.iter().enumerate() {
            let flags = TerrainFlags::from_bits_truncate(*value);
            packed[index / 4] |= flags.bits() << ((index % 4) * 2);
        }

        Ok(RoomTerrain { room, packed })
    }

    /// A room with no walls or swamps.
    pub fn plain(room: RoomId) -> RoomTerrain {
        RoomTerrain {
            room,
            packed: Box::new([0u8; PACKED_LEN]),
        }
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    #[inline]
    pub fn get_xy(&self, x: u8, y: u8) -> TerrainFlags {
        let index = (y as usize * ROOM_WIDTH as usize) + (x as usize);
        TerrainFlags::from_bits_truncate((self.packed[index / 4] >> ((index % 4) * 2)) & 0b11)
    }

    pub fn is_wall(&self, x: u8, y: u8) -> bool {
        self.get_xy(x, y).is_wall()
    }

    pub fn is_swamp(&self, x: u8, y: u8) -> bool {
        self.get_xy(x, y).is_swamp()
    }

    /// All passable tiles on the room border, clockwise from the top-left.
    pub fn get_exits(&self) -> Vec<Position> {
        let mut exits = Vec::new();
        let mut push = |x: u8, y: u8| {
            if !self.is_wall(x, y) {
                exits.extend(self.room.position(x, y));
            }
        };
        for x in 0..ROOM_WIDTH {
            push(x, 0);
        }
        for y in 1..ROOM_HEIGHT - 1 {
            push(ROOM_WIDTH - 1, y);
        }
        for x in (0..ROOM_WIDTH).rev() {
            push(x, ROOM_HEIGHT - 1);
        }
        for y in (1..ROOM_HEIGHT - 1).rev() {
            push(0, y);
        }
        exits
    }
}

/// Immutable terrain for every room in the world.
pub struct TerrainStore {
    rooms: FnvHashMap<RoomId, RoomTerrain>,
}

impl TerrainStore {
    pub fn new<I>(rooms: I) -> Result<TerrainStore, TerrainError>
    where
        I: IntoIterator<Item = RoomTerrain>,
    {
        let mut table = FnvHashMap::default();
        for terrain in rooms {
            let room = terrain.room();
            if table.insert(room, terrain).is_some() {
                return Err(TerrainError::DuplicateRoom(room));
            }
        }

        Ok(TerrainStore { rooms: table })
    }

    #[inline]
    pub fn room(&self, room: RoomId) -> Option<&RoomTerrain> {
        self.rooms.get(&room)
    }

    /// Terrain at a position, or `None` for rooms outside the loaded world.
    #[inline]
    pub fn terrain_at(&self, pos: Position) -> Option<TerrainFlags> {
        self.room(pos.room()).map(|t| t.get_xy(pos.x(), pos.y()))
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

static TERRAIN: OnceCell<TerrainStore> = OnceCell::new();

/// Installs the process-wide terrain. Only the first call succeeds; later
/// calls leave the installed data untouched and return `AlreadyLoaded`.
pub fn load_terrain<I>(rooms: I) -> Result<&'static TerrainStore, TerrainError>
where
    I: IntoIterator<Item = RoomTerrain>,
{
    if TERRAIN.get().is_some() {
        return Err(TerrainError::AlreadyLoaded);
    }

    let store = TerrainStore::new(rooms)?;
    let count = store.room_count();
    TERRAIN
        .set(store)
        .map_err(|_| TerrainError::AlreadyLoaded)?;

    info!("Loaded terrain for {} rooms", count);

    TERRAIN.get().ok_or(TerrainError::AlreadyLoaded)
}

/// The process-wide terrain, if [`load_terrain`] has run.
pub fn terrain() -> Option<&'static TerrainStore> {
    TERRAIN.get()
}
