mod common;

use common::*;
use screeps_path_finder::constants::*;
use screeps_path_finder::*;
use std::sync::Barrier;
use std::thread;

// The process-wide store can only be installed once, so everything touching
// it lives in a single test.
#[test]
fn terrain_loads_once_and_serves_every_thread() {
    let wall = pos("E0S0", 10, 10);
    let mut cells = vec![0u8; ROOM_AREA];
    for y in 5..=15 {
        cells[y * 50 + wall.x() as usize] = TerrainFlags::WALL.bits();
    }

    let no_terrain = search(
        pos("E0S0", 1, 1),
        &[pos("E0S0", 5, 5).into()],
        |_r: RoomId| RoomCosts::Default,
        &SearchOptions::new(),
    );
    assert_eq!(no_terrain, Err(SearchError::TerrainNotLoaded));

    let rooms = vec![
        RoomTerrain::new(room("E0S0"), &cells).unwrap(),
        RoomTerrain::plain(room("E1S0")),
    ];
    let store = load_terrain(rooms).unwrap();
    assert_eq!(store.room_count(), 2);

    let reload = load_terrain(vec![RoomTerrain::plain(room("E0S0"))]);
    assert_eq!(reload.err(), Some(TerrainError::AlreadyLoaded));

    // Reloading from inside a running search must fail and leave the wall.
    let mut reloads = Vec::new();
    let mut nested = Vec::new();
    let outer = search(
        pos("E0S0", 9, 10),
        &[pos("E0S0", 11, 10).into()],
        |r: RoomId| {
            reloads.push(load_terrain(vec![RoomTerrain::plain(r)]).err());
            nested.push(
                search(
                    pos("E1S0", 1, 1),
                    &[pos("E1S0", 3, 3).into()],
                    |_r: RoomId| RoomCosts::Default,
                    &SearchOptions::new(),
                )
                .unwrap(),
            );
            RoomCosts::Default
        },
        &SearchOptions::new(),
    )
    .unwrap();

    assert!(!reloads.is_empty());
    assert!(reloads.iter().all(|r| *r == Some(TerrainError::AlreadyLoaded)));
    assert!(nested.iter().all(|r| r.status == SearchStatus::Found && r.cost == 2));
    assert_eq!(outer.status, SearchStatus::Found);
    assert_eq!(outer.cost, 12);
    assert_connected(pos("E0S0", 9, 10), &outer.path);
    assert_eq!(pool::idle_engines(), POOL_CAPACITY);

    let installed = terrain().unwrap();
    assert_eq!(installed.room_count(), 2);
    assert!(installed.terrain_at(wall).unwrap().is_wall());

    let threads = 4;
    let barrier = Barrier::new(threads);
    let results: Vec<(SearchResult, Option<TerrainError>)> = thread::scope(|scope| {
        let workers: Vec<_> = (0..threads)
            .map(|i| {
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    let mut reload = None;
                    let origin = pos("E0S0", 5 + i as u8, 10);
                    let result = search(
                        origin,
                        &[pos("E1S0", 5, 10).into()],
                        |r: RoomId| {
                            if reload.is_none() {
                                reload = load_terrain(vec![RoomTerrain::plain(r)]).err();
                            }
                            RoomCosts::Default
                        },
                        &SearchOptions::new().max_ops(10_000),
                    )
                    .unwrap();
                    (result, reload)
                })
            })
            .collect();

        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    for (result, reload) in &results {
        assert_eq!(result.status, SearchStatus::Found);
        assert!(!result.path.contains(&wall));
        assert_eq!(*reload, Some(TerrainError::AlreadyLoaded));
    }
    assert!(terrain().unwrap().terrain_at(wall).unwrap().is_wall());
}

#[test]
fn version_is_exposed() {
    assert_eq!(VERSION, 11);
}
