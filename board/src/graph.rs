//! Static space graph built once from the board definition.

use std::collections::{BTreeMap, BTreeSet};

use hexhall_core::{BoardDefinition, BoardError, DrawPos, HexCoord, SpaceKind};

/// Immutable attributes of a single board space.
#[derive(Clone, Copy, Debug)]
struct Space {
    kind: SpaceKind,
    position: DrawPos,
}

/// Typed space nodes with a fixed symmetric adjacency relation.
///
/// Built once from a [`BoardDefinition`] and never mutated afterwards;
/// every derivation reads the same adjacency. A per-kind index is kept so
/// resolvers can enumerate, say, all exit spaces without a full scan.
#[derive(Clone, Debug)]
pub(crate) struct SpaceGraph {
    spaces: BTreeMap<HexCoord, Space>,
    adjacency: BTreeMap<HexCoord, BTreeSet<HexCoord>>,
    by_kind: BTreeMap<SpaceKind, BTreeSet<HexCoord>>,
}

impl SpaceGraph {
    /// Validates the definition and builds the graph.
    ///
    /// Rejects duplicate coordinates and links whose endpoints are not
    /// defined spaces. Links are stored symmetrically; self-links are
    /// ignored.
    pub(crate) fn from_definition(definition: &BoardDefinition) -> Result<Self, BoardError> {
        let mut spaces = BTreeMap::new();
        let mut adjacency: BTreeMap<HexCoord, BTreeSet<HexCoord>> = BTreeMap::new();
        let mut by_kind: BTreeMap<SpaceKind, BTreeSet<HexCoord>> = BTreeMap::new();

        for kind in SpaceKind::ALL {
            let _ = by_kind.insert(kind, BTreeSet::new());
        }

        for space in &definition.spaces {
            let previous = spaces.insert(
                space.coord,
                Space {
                    kind: space.kind,
                    position: space.position,
                },
            );
            if previous.is_some() {
                return Err(BoardError::DuplicateSpace(space.coord));
            }
            let _ = adjacency.insert(space.coord, BTreeSet::new());
            if let Some(members) = by_kind.get_mut(&space.kind) {
                let _ = members.insert(space.coord);
            }
        }

        for &(a, b) in &definition.links {
            if !spaces.contains_key(&a) {
                return Err(BoardError::UnknownSpace(a));
            }
            if !spaces.contains_key(&b) {
                return Err(BoardError::UnknownSpace(b));
            }
            if a == b {
                continue;
            }
            if let Some(neighbors) = adjacency.get_mut(&a) {
                let _ = neighbors.insert(b);
            }
            if let Some(neighbors) = adjacency.get_mut(&b) {
                let _ = neighbors.insert(a);
            }
        }

        Ok(Self {
            spaces,
            adjacency,
            by_kind,
        })
    }

    /// Kind of the space at the coordinate, if it exists.
    pub(crate) fn kind(&self, coord: HexCoord) -> Option<SpaceKind> {
        self.spaces.get(&coord).map(|space| space.kind)
    }

    /// Draw position of the space at the coordinate, if it exists.
    pub(crate) fn position(&self, coord: HexCoord) -> Option<DrawPos> {
        self.spaces.get(&coord).map(|space| space.position)
    }

    /// Reports whether the coordinate is a floor or passage space.
    pub(crate) fn is_walkable(&self, coord: HexCoord) -> bool {
        self.kind(coord).is_some_and(SpaceKind::is_walkable)
    }

    /// Board neighbors of the coordinate under the static adjacency.
    pub(crate) fn neighbors(&self, coord: HexCoord) -> impl Iterator<Item = HexCoord> + '_ {
        self.adjacency.get(&coord).into_iter().flatten().copied()
    }

    /// Every space of the provided kind.
    pub(crate) fn of_kind(&self, kind: SpaceKind) -> &BTreeSet<HexCoord> {
        static EMPTY: BTreeSet<HexCoord> = BTreeSet::new();
        self.by_kind.get(&kind).unwrap_or(&EMPTY)
    }
}
