use crate::constants::*;
use crate::error::RoomNameParseError;
use serde::*;
use std::fmt;
use std::str::FromStr;

/// A room's coordinate in the world grid.
///
/// `x` runs west to east (`W127` is 0, `E0` is 128), `y` runs north to south
/// (`N127` is 0, `S0` is 128).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct RoomId {
    x: u8,
    y: u8,
}

impl RoomId {
    pub fn from_coords(x: u8, y: u8) -> Self {
        RoomId { x, y }
    }

    #[inline]
    pub fn x(self) -> u8 {
        self.x
    }

    #[inline]
    pub fn y(self) -> u8 {
        self.y
    }

    #[inline]
    pub fn packed_repr(self) -> u16 {
        ((self.x as u16) << 8) | self.y as u16
    }

    #[inline]
    pub fn from_packed(packed: u16) -> Self {
        RoomId {
            x: (packed >> 8) as u8,
            y: (packed & 0xFF) as u8,
        }
    }

    /// The cell at local `(x, y)` in this room. Returns `None` off the room.
    pub fn position(self, x: u8, y: u8) -> Option<Position> {
        if x < ROOM_WIDTH && y < ROOM_HEIGHT {
            Position::from_world(
                self.x as u32 * ROOM_WIDTH as u32 + x as u32,
                self.y as u32 * ROOM_HEIGHT as u32 + y as u32,
            )
        } else {
            None
        }
    }

    /// Room offset by whole rooms, if still inside the world.
    pub fn offset(self, dx: i32, dy: i32) -> Option<RoomId> {
        let x = self.x as i32 + dx;
        let y = self.y as i32 + dy;
        if (0..WORLD_ROOMS as i32).contains(&x) && (0..WORLD_ROOMS as i32).contains(&y) {
            Some(RoomId::from_coords(x as u8, y as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.x < 128 {
            write!(f, "W{}", 127 - self.x)?;
        } else {
            write!(f, "E{}", self.x - 128)?;
        }
        if self.y < 128 {
            write!(f, "N{}", 127 - self.y)
        } else {
            write!(f, "S{}", self.y - 128)
        }
    }
}

impl FromStr for RoomId {
    type Err = RoomNameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || RoomNameParseError(s.to_string());

        let bytes = s.as_bytes();
        let split = bytes
            .iter()
            .skip(1)
            .position(|b| matches!(b, b'N' | b'S' | b'n' | b's'))
            .map(|i| i + 1)
            .ok_or_else(err)?;

        let (horizontal, vertical) = s.split_at(split);
        let x = parse_axis(horizontal, 'W', 'E').ok_or_else(err)?;
        let y = parse_axis(vertical, 'N', 'S').ok_or_else(err)?;

        Ok(RoomId::from_coords(x, y))
    }
}

/// Parses one half of a room name (`W12`, `S3`) into the packed axis index.
fn parse_axis(part: &str, negative: char, positive: char) -> Option<u8> {
    let mut chars = part.chars();
    let dir = chars.next()?.to_ascii_uppercase();
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u32 = digits.parse().ok()?;
    if n > 127 {
        return None;
    }
    if dir == negative {
        Some((127 - n) as u8)
    } else if dir == positive {
        Some((128 + n) as u8)
    } else {
        None
    }
}

impl Serialize for RoomId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RoomId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(RoomId::from_packed)
    }
}

/// A single cell in the world, stored as global coordinates so that
/// neighbors across a room edge are one step apart.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct Position {
    xx: u16,
    yy: u16,
}

impl Position {
    /// Returns `None` if the coordinates fall outside the world.
    pub fn from_world(xx: u32, yy: u32) -> Option<Self> {
        if xx < WORLD_SIZE && yy < WORLD_SIZE {
            Some(Position {
                xx: xx as u16,
                yy: yy as u16,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn world_x(self) -> u32 {
        self.xx as u32
    }

    #[inline]
    pub fn world_y(self) -> u32 {
        self.yy as u32
    }

    #[inline]
    pub fn room(self) -> RoomId {
        RoomId::from_coords(
            (self.xx / ROOM_WIDTH as u16) as u8,
            (self.yy / ROOM_HEIGHT as u16) as u8,
        )
    }

    /// Local x within the room.
    #[inline]
    pub fn x(self) -> u8 {
        (self.xx % ROOM_WIDTH as u16) as u8
    }

    /// Local y within the room.
    #[inline]
    pub fn y(self) -> u8 {
        (self.yy % ROOM_HEIGHT as u16) as u8
    }

    /// Chebyshev distance, valid across room boundaries.
    pub fn range_to(self, other: Self) -> u32 {
        let dx = (self.xx as i32 - other.xx as i32).unsigned_abs();
        let dy = (self.yy as i32 - other.yy as i32).unsigned_abs();
        dx.max(dy)
    }

    pub fn is_near_to(self, other: Self) -> bool {
        self.range_to(other) <= 1
    }

    /// The neighbor at `(dx, dy)`, crossing into the adjacent room at edges.
    #[inline]
    pub fn checked_add(self, (dx, dy): (i8, i8)) -> Option<Position> {
        let xx = self.xx as i32 + dx as i32;
        let yy = self.yy as i32 + dy as i32;
        if (0..WORLD_SIZE as i32).contains(&xx) && (0..WORLD_SIZE as i32).contains(&yy) {
            Some(Position {
                xx: xx as u16,
                yy: yy as u16,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn packed_repr(self) -> u32 {
        ((self.xx as u32) << 16) | self.yy as u32
    }

    #[inline]
    pub fn from_packed(packed: u32) -> Option<Self> {
        Position::from_world(packed >> 16, packed & 0xFFFF)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {},{}]", self.room(), self.x(), self.y())
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let packed = u32::deserialize(deserializer)?;
        Position::from_packed(packed).ok_or_else(|| de::Error::custom("position outside the world"))
    }
}
