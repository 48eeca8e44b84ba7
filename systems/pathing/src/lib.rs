#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement-range queries over the board's reachable subgraph.
//!
//! The board derives which cells may be traversed under a given set of
//! rules; this system answers "how far can a mover get" questions against
//! that subgraph without touching board state. Interconnection shortcuts
//! between open passages count as single steps, exactly as the subgraph
//! encodes them.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use hexhall_board::ReachableView;
use hexhall_core::HexCoord;

/// Cells a mover starting on `origin` can stand on within `max_steps`.
///
/// Breadth-first over the reachable subgraph; the origin itself is
/// included when it is traversable, and an origin outside the subgraph
/// yields the empty set.
#[must_use]
pub fn movement_range(
    view: ReachableView<'_>,
    origin: HexCoord,
    max_steps: u32,
) -> BTreeSet<HexCoord> {
    bfs_distances(view, origin, Some(max_steps))
        .into_keys()
        .collect()
}

/// Step distance from `origin` to every cell it can reach.
///
/// The full breadth-first expansion of [`movement_range`]; cells outside
/// the subgraph, or cut off from the origin, are absent from the map.
#[must_use]
pub fn distances_from(view: ReachableView<'_>, origin: HexCoord) -> BTreeMap<HexCoord, u32> {
    bfs_distances(view, origin, None)
}

fn bfs_distances(
    view: ReachableView<'_>,
    origin: HexCoord,
    limit: Option<u32>,
) -> BTreeMap<HexCoord, u32> {
    let mut distances = BTreeMap::new();
    if !view.contains(origin) {
        return distances;
    }

    let _ = distances.insert(origin, 0);
    let mut queue = VecDeque::new();
    queue.push_back(origin);

    while let Some(cell) = queue.pop_front() {
        let Some(&distance) = distances.get(&cell) else {
            continue;
        };
        if limit.is_some_and(|max_steps| distance >= max_steps) {
            continue;
        }
        for neighbor in view.neighbors(cell) {
            if distances.contains_key(&neighbor) {
                continue;
            }
            let _ = distances.insert(neighbor, distance + 1);
            queue.push_back(neighbor);
        }
    }

    distances
}
