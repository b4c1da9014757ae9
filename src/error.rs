use crate::location::RoomId;
use thiserror::Error;

/// Rejected search requests. Raised before any search work happens.
///
/// Running out of budget or failing to reach a goal are not errors; they are
/// reported through [`SearchStatus`](crate::search::SearchStatus).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("at least one goal is required")]
    NoGoals,

    #[error("{name} must be positive, got {value}")]
    InvalidCost { name: &'static str, value: u32 },

    #[error("max_rooms must be at least 1")]
    InvalidMaxRooms,

    #[error("max_ops must be at least 1")]
    InvalidMaxOps,

    #[error("heuristic weight must be a number >= 1.0, got {0}")]
    InvalidHeuristicWeight(f64),

    #[error("terrain has not been loaded")]
    TerrainNotLoaded,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    #[error("terrain is already loaded")]
    AlreadyLoaded,

    #[error("terrain for room {room} has {len} cells, expected 2500")]
    InvalidLength { room: RoomId, len: usize },

    #[error("terrain for room {0} supplied more than once")]
    DuplicateRoom(RoomId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid room name: {0:?}")]
pub struct RoomNameParseError(pub String);
