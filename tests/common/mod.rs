#![allow(dead_code)]

use itertools::Itertools;
use screeps_path_finder::constants::*;
use screeps_path_finder::*;

pub fn room(name: &str) -> RoomId {
    name.parse().unwrap()
}

pub fn pos(name: &str, x: u8, y: u8) -> Position {
    room(name).position(x, y).unwrap()
}

/// Builds terrain room by room; unspecified cells are plain.
#[derive(Default)]
pub struct WorldBuilder {
    rooms: Vec<(RoomId, Vec<u8>)>,
}

impl WorldBuilder {
    pub fn new() -> Self {
        WorldBuilder::default()
    }

    pub fn room(mut self, name: &str) -> Self {
        self.rooms.push((room(name), vec![0u8; ROOM_AREA]));
        self
    }

    fn set(&mut self, p: Position, flags: TerrainFlags) {
        let (_, cells) = self
            .rooms
            .iter_mut()
            .find(|(r, _)| *r == p.room())
            .expect("room must be added before its cells");
        cells[p.y() as usize * ROOM_WIDTH as usize + p.x() as usize] = flags.bits();
    }

    pub fn wall(mut self, p: Position) -> Self {
        self.set(p, TerrainFlags::WALL);
        self
    }

    pub fn swamp(mut self, p: Position) -> Self {
        self.set(p, TerrainFlags::SWAMP);
        self
    }

    /// Walls around `center`, leaving the center itself open.
    pub fn ring(mut self, center: Position) -> Self {
        for dx in -1i8..=1 {
            for dy in -1i8..=1 {
                if (dx, dy) != (0, 0) {
                    let p = center.checked_add((dx, dy)).unwrap();
                    self.set(p, TerrainFlags::WALL);
                }
            }
        }
        self
    }

    /// Scatters walls and swamps over a room from a fixed seed.
    pub fn scatter(mut self, name: &str, seed: u64) -> Self {
        let mut rng = XorShift(seed | 1);
        let target = room(name);
        for y in 0..ROOM_HEIGHT {
            for x in 0..ROOM_WIDTH {
                let p = target.position(x, y).unwrap();
                match rng.next() % 10 {
                    0 | 1 => self.set(p, TerrainFlags::WALL),
                    2 | 3 | 4 => self.set(p, TerrainFlags::SWAMP),
                    _ => {}
                }
            }
        }
        self
    }

    pub fn build(self) -> TerrainStore {
        let rooms: Vec<RoomTerrain> = self
            .rooms
            .into_iter()
            .map(|(r, cells)| RoomTerrain::new(r, &cells).unwrap())
            .collect();
        TerrainStore::new(rooms).unwrap()
    }
}

pub struct XorShift(pub u64);

impl XorShift {
    pub fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// Cost of entering `p`, mirroring how the engine prices cells.
pub fn cell_cost(
    store: &TerrainStore,
    overlay: Option<&CostMatrix>,
    p: Position,
    plain: u32,
    swamp: u32,
) -> Option<u32> {
    let flags = store.terrain_at(p)?;
    if flags.is_wall() {
        return None;
    }
    match overlay.map(|m| m.get(p.x(), p.y())) {
        Some(COST_OBSTACLE) => None,
        Some(cost) if cost != COST_DEFAULT => Some(cost as u32),
        _ if flags.is_swamp() => Some(swamp),
        _ => Some(plain),
    }
}

/// Asserts that `origin` followed by `path` is a chain of single moves.
pub fn assert_connected(origin: Position, path: &[Position]) {
    for (a, b) in std::iter::once(&origin).chain(path.iter()).tuple_windows() {
        assert!(a != b && a.is_near_to(*b), "{} -> {} is not a single move", a, b);
    }
}
