pub const ROOM_WIDTH: u8 = 50;
pub const ROOM_HEIGHT: u8 = 50;
pub const ROOM_AREA: usize = (ROOM_WIDTH as usize) * (ROOM_HEIGHT as usize);

/// Number of rooms along each axis of the world grid (`W127..E127`, `N127..S127`).
pub const WORLD_ROOMS: u32 = 256;

/// Width (and height) of the world in cells.
pub const WORLD_SIZE: u32 = WORLD_ROOMS * ROOM_WIDTH as u32;

/// Upper bound on the number of distinct rooms a single search may touch.
pub const MAX_ROOMS: u8 = 64;

/// Idle engines kept per thread. Two covers one level of recursion from a
/// room callback; deeper nesting allocates.
pub const POOL_CAPACITY: usize = 2;

/// Cost matrix value marking a cell impassable.
pub const COST_OBSTACLE: u8 = 255;

/// Cost matrix value deferring to the terrain cost.
pub const COST_DEFAULT: u8 = 0;

/// Identity of the engine exposed to embedders for compatibility checks.
pub const VERSION: u32 = 11;

/// Neighbor offsets for 8-directional movement.
pub const NEIGHBORS_8: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];
