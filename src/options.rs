//! Search parameters.
//!
//! `SearchOptions` can be built fluently or deserialized from a request
//! (camelCase keys, every field optional):
//!
//! ```
//! use screeps_path_finder::SearchOptions;
//!
//! let options = SearchOptions::new().plain_cost(2).swamp_cost(10).max_rooms(1);
//! assert_eq!(options.max_ops, 2000);
//! ```

use crate::constants::*;
use crate::error::SearchError;
use log::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    #[serde(default = "default_plain_cost")]
    pub plain_cost: u32,
    #[serde(default = "default_swamp_cost")]
    pub swamp_cost: u32,
    #[serde(default = "default_max_rooms")]
    pub max_rooms: u8,
    #[serde(default = "default_max_ops")]
    pub max_ops: u32,
    /// Upper bound on path cost; 0 means unbounded.
    #[serde(default)]
    pub max_cost: u32,
    #[serde(default)]
    pub flee: bool,
    #[serde(default = "default_heuristic_weight")]
    pub heuristic_weight: f64,
}

fn default_plain_cost() -> u32 {
    1
}

fn default_swamp_cost() -> u32 {
    5
}

fn default_max_rooms() -> u8 {
    16
}

fn default_max_ops() -> u32 {
    2000
}

fn default_heuristic_weight() -> f64 {
    1.0
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            plain_cost: default_plain_cost(),
            swamp_cost: default_swamp_cost(),
            max_rooms: default_max_rooms(),
            max_ops: default_max_ops(),
            max_cost: 0,
            flee: false,
            heuristic_weight: default_heuristic_weight(),
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        SearchOptions::default()
    }

    pub fn plain_cost(mut self, cost: u32) -> Self {
        self.plain_cost = cost;
        self
    }

    pub fn swamp_cost(mut self, cost: u32) -> Self {
        self.swamp_cost = cost;
        self
    }

    pub fn max_rooms(mut self, rooms: u8) -> Self {
        self.max_rooms = rooms;
        self
    }

    pub fn max_ops(mut self, ops: u32) -> Self {
        self.max_ops = ops;
        self
    }

    pub fn max_cost(mut self, cost: u32) -> Self {
        self.max_cost = cost;
        self
    }

    pub fn flee(mut self, flee: bool) -> Self {
        self.flee = flee;
        self
    }

    pub fn heuristic_weight(mut self, weight: f64) -> Self {
        self.heuristic_weight = weight;
        self
    }

    /// Checks the options and returns the room budget clamped to `MAX_ROOMS`.
    pub fn validate(&self) -> Result<u8, SearchError> {
        if self.plain_cost == 0 {
            return Err(SearchError::InvalidCost {
                name: "plain_cost",
                value: self.plain_cost,
            });
        }
        if self.swamp_cost == 0 {
            return Err(SearchError::InvalidCost {
                name: "swamp_cost",
                value: self.swamp_cost,
            });
        }
        if self.max_rooms == 0 {
            return Err(SearchError::InvalidMaxRooms);
        }
        if self.max_ops == 0 {
            return Err(SearchError::InvalidMaxOps);
        }
        // NaN fails this comparison too.
        if !(self.heuristic_weight >= 1.0) || self.heuristic_weight.is_infinite() {
            return Err(SearchError::InvalidHeuristicWeight(self.heuristic_weight));
        }

        if self.max_rooms > MAX_ROOMS {
            debug!("max_rooms {} clamped to {}", self.max_rooms, MAX_ROOMS);
        }
        Ok(self.max_rooms.min(MAX_ROOMS))
    }
}
