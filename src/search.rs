//! Weighted A* over the room grid.
//!
//! `PathFinder` expands cells across room boundaries, admitting rooms through
//! a per-search [`RoomTable`] and stopping when a goal is satisfied or one of
//! the operation, cost or room budgets runs out. In flee mode the objective
//! is inverted: the search looks for the cheapest cell outside every goal's
//! range.
//!
//! A `PathFinder` keeps its node storage between searches; see
//! [`crate::pool`] for how instances are shared on a thread.

use crate::arena::*;
use crate::constants::*;
use crate::error::SearchError;
use crate::location::*;
use crate::options::SearchOptions;
use crate::room_data::*;
use crate::terrain::TerrainStore;
use itertools::Itertools;
use log::*;
use serde::{Deserialize, Serialize};

/// A target cell and how close the search must get to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchGoal {
    pub pos: Position,
    #[serde(default)]
    pub range: u32,
}

impl SearchGoal {
    pub fn new(pos: Position, range: u32) -> Self {
        SearchGoal { pos, range }
    }
}

impl From<Position> for SearchGoal {
    fn from(pos: Position) -> Self {
        SearchGoal { pos, range: 0 }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// The path ends at a cell satisfying the objective.
    Found,
    /// A budget ran out; the path leads to the most promising cell reached.
    Incomplete,
    /// Nothing reachable satisfies the objective.
    NoPath,
}

/// Outcome of a search.
///
/// `path` excludes the origin and ends at the accepted cell, so
/// `path.len()` is the number of moves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub path: Vec<Position>,
    pub cost: u32,
    pub ops: u32,
    pub status: SearchStatus,
}

impl SearchResult {
    fn no_path(ops: u32) -> Self {
        SearchResult {
            path: Vec::new(),
            cost: 0,
            ops,
            status: SearchStatus::NoPath,
        }
    }

    /// True whenever the target was not reached, so `NoPath` counts as well
    /// as a budget cut-off. Mirrors the `incomplete` flag hosts report.
    pub fn is_incomplete(&self) -> bool {
        self.status != SearchStatus::Found
    }

    pub fn end(&self) -> Option<Position> {
        self.path.last().copied()
    }

    /// Distinct rooms the path passes through, in order of first entry.
    pub fn rooms(&self) -> Vec<RoomId> {
        self.path.iter().map(|p| p.room()).unique().collect()
    }
}

/// What the search is trying to satisfy.
struct Objective<'a> {
    goals: &'a [SearchGoal],
    flee: bool,
    weight: f64,
}

impl<'a> Objective<'a> {
    /// Seek: cells still to cover before the nearest goal is in range.
    /// Flee: cells still to cover before every goal is out of range.
    /// Zero means the objective is met.
    fn heuristic(&self, pos: Position) -> u32 {
        if self.flee {
            self.goals
                .iter()
                .map(|goal| {
                    let distance = pos.range_to(goal.pos);
                    if distance <= goal.range {
                        (goal.range - distance).saturating_add(1)
                    } else {
                        0
                    }
                })
                .max()
                .unwrap_or(0)
        } else {
            self.goals
                .iter()
                .map(|goal| pos.range_to(goal.pos).saturating_sub(goal.range))
                .min()
                .unwrap_or(0)
        }
    }

    #[inline]
    fn priority(&self, g: u32, h: u32) -> u32 {
        g.saturating_add((h as f64 * self.weight) as u32)
    }
}

enum Termination {
    Found,
    OutOfOps,
    Exhausted,
}

/// Reusable search engine.
#[derive(Default)]
pub struct PathFinder {
    arena: NodeArena,
    #[cfg(test)]
    pub(crate) expansions: Vec<OpenEntry>,
}

impl PathFinder {
    pub fn new() -> Self {
        PathFinder::default()
    }

    /// Finds a route from `origin` to any of `goals` (or away from all of
    /// them when `options.flee` is set).
    ///
    /// `callback` is consulted once for each room the search touches. It may
    /// start a nested search, which must use a different `PathFinder`.
    pub fn search(
        &mut self,
        terrain: &TerrainStore,
        origin: Position,
        goals: &[SearchGoal],
        callback: &mut dyn RoomCallback,
        options: &SearchOptions,
    ) -> Result<SearchResult, SearchError> {
        if goals.is_empty() {
            return Err(SearchError::NoGoals);
        }
        let max_rooms = options.validate()?;

        self.arena.reset();
        #[cfg(test)]
        self.expansions.clear();

        let objective = Objective {
            goals,
            flee: options.flee,
            weight: options.heuristic_weight,
        };
        let mut rooms = RoomTable::new(terrain, callback, max_rooms);

        if rooms.lookup(origin.room()).is_none() {
            debug!("Search origin {} is in an unavailable room", origin);
            return Ok(SearchResult::no_path(0));
        }

        let origin_h = objective.heuristic(origin);
        if origin_h == 0 {
            return Ok(SearchResult {
                path: Vec::new(),
                cost: 0,
                ops: 0,
                status: SearchStatus::Found,
            });
        }

        self.arena
            .push(origin, None, 0, origin_h, objective.priority(0, origin_h));

        // Closest approach so far, by (h, g).
        let mut best = (origin, origin_h, 0u32);
        let mut ops = 0u32;
        let mut cost_limit_hit = false;

        let termination = loop {
            if ops >= options.max_ops {
                break Termination::OutOfOps;
            }
            let current = match self.arena.pop() {
                Some(current) => current,
                None => break Termination::Exhausted,
            };
            ops += 1;

            #[cfg(test)]
            self.expansions.push(current);

            if current.h == 0 {
                best = (current.pos, 0, current.g);
                break Termination::Found;
            }
            if (current.h, current.g) < (best.1, best.2) {
                best = (current.pos, current.h, current.g);
            }

            cost_limit_hit |= self.expand(&mut rooms, &objective, current, options);
        };

        let (end, _, cost) = best;
        let result = match termination {
            Termination::Found => SearchResult {
                path: self.arena.path_to(end),
                cost,
                ops,
                status: SearchStatus::Found,
            },
            Termination::OutOfOps => SearchResult {
                path: self.arena.path_to(end),
                cost,
                ops,
                status: SearchStatus::Incomplete,
            },
            Termination::Exhausted
                if end != origin && (cost_limit_hit || rooms.room_limit_hit()) =>
            {
                SearchResult {
                    path: self.arena.path_to(end),
                    cost,
                    ops,
                    status: SearchStatus::Incomplete,
                }
            }
            Termination::Exhausted => SearchResult::no_path(ops),
        };

        debug!(
            "Search from {} finished: {:?}, ops={}, cost={}, length={}, rooms=[{}], nodes={}",
            origin,
            result.status,
            result.ops,
            result.cost,
            result.path.len(),
            rooms.rooms().join(", "),
            self.arena.visited()
        );

        Ok(result)
    }

    /// Queue every improvable neighbor of `current`. Returns true if some
    /// neighbor was dropped for exceeding `max_cost`.
    fn expand(
        &mut self,
        rooms: &mut RoomTable<'_>,
        objective: &Objective<'_>,
        current: OpenEntry,
        options: &SearchOptions,
    ) -> bool {
        let mut cost_limit_hit = false;
        let current_room = current.pos.room();
        let current_slot = rooms.lookup(current_room);

        for &offset in NEIGHBORS_8.iter() {
            let next = match current.pos.checked_add(offset) {
                Some(next) => next,
                None => continue,
            };
            if self.arena.is_closed(next) {
                continue;
            }

            let next_room = next.room();
            let slot = if next_room == current_room {
                current_slot
            } else {
                rooms.lookup(next_room)
            };
            let step = match slot.and_then(|slot| {
                rooms
                    .slot(slot)
                    .cell_cost(next.x(), next.y(), options.plain_cost, options.swamp_cost)
            }) {
                Some(step) => step,
                None => continue,
            };

            let g = current.g.saturating_add(step);
            if options.max_cost > 0 && g > options.max_cost {
                cost_limit_hit = true;
                continue;
            }
            if let Some(existing) = self.arena.get(next) {
                if g >= existing.g {
                    continue;
                }
            }

            let h = objective.heuristic(next);
            self.arena
                .push(next, Some(current.pos), g, h, objective.priority(g, h));
        }

        cost_limit_hit
    }
}
