//! Revealed-set derivation from lit walls and character adjacency.

use std::collections::{BTreeMap, BTreeSet};

use hexhall_core::{HexCoord, TokenId, TokenKind};

use crate::graph::SpaceGraph;
use crate::tokens::TokenRegistry;

/// Adds every walkable board-neighbor of a lit wall or of a
/// character-occupied space to the revealed set.
///
/// Purely additive over whatever beam tracing already revealed; nothing
/// is ever removed here. An unplaced character reveals nothing.
pub(crate) fn reveal_adjacent(
    graph: &SpaceGraph,
    registry: &TokenRegistry,
    occupancy: &BTreeMap<TokenId, HexCoord>,
    lights_on: &BTreeSet<HexCoord>,
    revealed: &mut BTreeSet<HexCoord>,
) {
    for &lit in lights_on {
        for neighbor in graph.neighbors(lit) {
            if graph.is_walkable(neighbor) {
                let _ = revealed.insert(neighbor);
            }
        }
    }
    for (token, _) in registry.of_kind(TokenKind::Character) {
        let Some(&space) = occupancy.get(&token) else {
            continue;
        };
        for neighbor in graph.neighbors(space) {
            if graph.is_walkable(neighbor) {
                let _ = revealed.insert(neighbor);
            }
        }
    }
}
