use crate::constants::*;
use log::*;
use serde::{Deserialize, Serialize};

/// Per-room movement cost overrides.
///
/// `0` defers to the terrain cost, `255` blocks the cell, anything else is
/// the absolute cost of entering the cell. Wall terrain stays impassable
/// regardless of the value here.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CostMatrix {
    data: Vec<u8>,
}

impl Default for CostMatrix {
    fn default() -> Self {
        CostMatrix::new()
    }
}

impl CostMatrix {
    pub fn new() -> Self {
        CostMatrix {
            data: vec![COST_DEFAULT; ROOM_AREA],
        }
    }

    /// Builds a matrix from row-major (`y * 50 + x`) bytes supplied by an
    /// external source. Missing cells keep the terrain cost and surplus
    /// bytes are dropped.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.len() != ROOM_AREA {
            warn!(
                "Cost matrix has {} cells, expected {}; unmatched cells use terrain cost",
                bytes.len(),
                ROOM_AREA
            );
        }

        let mut matrix = CostMatrix::new();
        let len = bytes.len().min(ROOM_AREA);
        matrix.data[..len].copy_from_slice(&bytes[..len]);
        matrix
    }

    #[inline]
    pub fn get(&self, x: u8, y: u8) -> u8 {
        self.data[y as usize * ROOM_WIDTH as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u8, y: u8, cost: u8) {
        self.data[y as usize * ROOM_WIDTH as usize + x as usize] = cost;
    }

    /// Blocks every cell in the inclusive rectangle.
    pub fn block_rect(&mut self, x0: u8, y0: u8, x1: u8, y1: u8) {
        for y in y0..=y1.min(ROOM_HEIGHT - 1) {
            for x in x0..=x1.min(ROOM_WIDTH - 1) {
                self.set(x, y, COST_OBSTACLE);
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Serialize for CostMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CostMatrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = Vec::<u8>::deserialize(deserializer)?;
        if data.len() != ROOM_AREA {
            return Err(serde::de::Error::custom("Invalid cost matrix size"));
        }
        Ok(CostMatrix { data })
    }
}
