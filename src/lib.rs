//! Multi-room path finder for 50x50 room grids.
//!
//! Terrain is loaded once per process with [`load_terrain`]; searches then run
//! on any thread through [`search()`], each with its own callback supplying
//! per-room [`CostMatrix`] overrides.

pub mod arena;
pub mod constants;
pub mod cost_matrix;
pub mod error;
pub mod location;
pub mod options;
pub mod pool;
pub mod room_data;
pub mod search;
pub mod terrain;

pub use constants::VERSION;
pub use cost_matrix::CostMatrix;
pub use error::{RoomNameParseError, SearchError, TerrainError};
pub use location::{Position, RoomId};
pub use options::SearchOptions;
pub use pool::{search, search_in};
pub use room_data::{RoomCallback, RoomCosts, TerrainOnly};
pub use search::{PathFinder, SearchGoal, SearchResult, SearchStatus};
pub use terrain::{load_terrain, terrain, RoomTerrain, TerrainFlags, TerrainStore};
