//! Per-thread pool of reusable [`PathFinder`]s.
//!
//! A search takes an engine out of the pool for its whole duration, so a room
//! callback that starts another search on the same thread always gets a
//! different engine. When the pool runs dry a temporary engine is allocated
//! and discarded afterwards.

use crate::constants::*;
use crate::error::SearchError;
use crate::location::Position;
use crate::options::SearchOptions;
use crate::room_data::RoomCallback;
use crate::search::*;
use crate::terrain::*;
use log::*;
use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

thread_local! {
    static PATH_FINDERS: RefCell<Vec<PathFinder>> =
        RefCell::new((0..POOL_CAPACITY).map(|_| PathFinder::new()).collect());
}

/// An engine checked out of the current thread's pool. Dropping it hands the
/// engine back.
pub struct PooledPathFinder {
    finder: Option<PathFinder>,
}

impl Deref for PooledPathFinder {
    type Target = PathFinder;

    fn deref(&self) -> &PathFinder {
        self.finder.as_ref().expect("engine is held until drop")
    }
}

impl DerefMut for PooledPathFinder {
    fn deref_mut(&mut self) -> &mut PathFinder {
        self.finder.as_mut().expect("engine is held until drop")
    }
}

impl Drop for PooledPathFinder {
    fn drop(&mut self) {
        if let Some(finder) = self.finder.take() {
            release(finder);
        }
    }
}

/// Take an idle engine, allocating one if every pooled engine is busy.
pub fn acquire() -> PooledPathFinder {
    let pooled = PATH_FINDERS.with(|pool| pool.borrow_mut().pop());
    let finder = match pooled {
        Some(finder) => finder,
        None => {
            debug!("Path finder pool exhausted, allocating a temporary engine");
            PathFinder::new()
        }
    };

    PooledPathFinder {
        finder: Some(finder),
    }
}

fn release(finder: PathFinder) {
    // During thread teardown the pool may already be gone; the engine is
    // simply dropped then.
    let _ = PATH_FINDERS.try_with(|pool| {
        let mut pool = pool.borrow_mut();
        if pool.len() < POOL_CAPACITY {
            pool.push(finder);
        }
    });
}

/// Number of idle engines in the current thread's pool.
pub fn idle_engines() -> usize {
    PATH_FINDERS.with(|pool| pool.borrow().len())
}

/// Search against an explicit terrain store using a pooled engine.
pub fn search_in<C>(
    terrain: &TerrainStore,
    origin: Position,
    goals: &[SearchGoal],
    mut callback: C,
    options: &SearchOptions,
) -> Result<SearchResult, SearchError>
where
    C: RoomCallback,
{
    let mut finder = acquire();
    finder.search(terrain, origin, goals, &mut callback, options)
}

/// Search against the process-wide terrain installed by [`load_terrain`].
pub fn search<C>(
    origin: Position,
    goals: &[SearchGoal],
    callback: C,
    options: &SearchOptions,
) -> Result<SearchResult, SearchError>
where
    C: RoomCallback,
{
    let terrain = terrain().ok_or(SearchError::TerrainNotLoaded)?;
    search_in(terrain, origin, goals, callback, options)
}
