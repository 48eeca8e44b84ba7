//! Open/closed derivation for exits and passages.

use std::collections::{BTreeMap, BTreeSet};

use hexhall_core::{BoardError, HexCoord, SpaceKind, TokenId, TokenKind, TokenState};

use crate::graph::SpaceGraph;
use crate::tokens::TokenRegistry;

/// Partition of all exit spaces into open and closed, driven by gates.
///
/// Exits are open unless a closed gate token occupies them; an exit with
/// no gate at all is implicitly open. Rebuilt in place by
/// `Board::compute_exits`.
#[derive(Clone, Debug, Default)]
pub(crate) struct ExitState {
    pub(crate) open: BTreeSet<HexCoord>,
    pub(crate) closed: BTreeSet<HexCoord>,
}

impl ExitState {
    /// Recomputes the partition from current gate state and occupancy.
    ///
    /// Fails with [`BoardError::GateSpaceMismatch`] when a gate occupies a
    /// space that is not an exit; an unplaced gate affects nothing.
    pub(crate) fn rebuild(
        &mut self,
        graph: &SpaceGraph,
        registry: &TokenRegistry,
        occupancy: &BTreeMap<TokenId, HexCoord>,
    ) -> Result<(), BoardError> {
        let mut closed = BTreeSet::new();
        for (token, state) in registry.of_kind(TokenKind::Gate) {
            let Some(&space) = occupancy.get(&token) else {
                continue;
            };
            if graph.kind(space) != Some(SpaceKind::Exit) {
                return Err(BoardError::GateSpaceMismatch { token, space });
            }
            if matches!(state, TokenState::Gate { closed: true }) {
                let _ = closed.insert(space);
            }
        }
        self.open = graph.of_kind(SpaceKind::Exit).difference(&closed).copied().collect();
        self.closed = closed;
        Ok(())
    }
}

/// Partition of all passage spaces into open and closed, driven by doors,
/// plus the interconnection relation over the open ones.
#[derive(Clone, Debug, Default)]
pub(crate) struct PassageState {
    pub(crate) open: BTreeSet<HexCoord>,
    pub(crate) closed: BTreeSet<HexCoord>,
    pub(crate) web: PassageWeb,
}

impl PassageState {
    /// Recomputes the partition and the interconnection relation.
    ///
    /// Fails with [`BoardError::DoorSpaceMismatch`] when a door occupies a
    /// space that is not a passage; an unplaced door affects nothing.
    pub(crate) fn rebuild(
        &mut self,
        graph: &SpaceGraph,
        registry: &TokenRegistry,
        occupancy: &BTreeMap<TokenId, HexCoord>,
    ) -> Result<(), BoardError> {
        let mut closed = BTreeSet::new();
        for (token, state) in registry.of_kind(TokenKind::Door) {
            let Some(&space) = occupancy.get(&token) else {
                continue;
            };
            if graph.kind(space) != Some(SpaceKind::Passage) {
                return Err(BoardError::DoorSpaceMismatch { token, space });
            }
            if matches!(state, TokenState::Door { closed: true }) {
                let _ = closed.insert(space);
            }
        }
        let all = graph.of_kind(SpaceKind::Passage);
        self.open = all.difference(&closed).copied().collect();
        self.closed = closed;
        self.web = PassageWeb {
            nodes: all.clone(),
            linked: self.open.clone(),
        };
        Ok(())
    }
}

/// Interconnection relation over passage spaces.
///
/// Every pair of distinct open passages is directly connected — stepping
/// between any two of them costs one move regardless of board distance —
/// while closed passages sit in the relation as isolated nodes. The
/// complete graph is answered from the open set instead of materializing
/// its edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassageWeb {
    nodes: BTreeSet<HexCoord>,
    linked: BTreeSet<HexCoord>,
}

impl PassageWeb {
    /// Reports whether the coordinate is a passage tracked by the relation.
    #[must_use]
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.nodes.contains(&coord)
    }

    /// Reports whether two distinct passages are directly interconnected.
    #[must_use]
    pub fn are_linked(&self, a: HexCoord, b: HexCoord) -> bool {
        a != b && self.linked.contains(&a) && self.linked.contains(&b)
    }

    /// Passages directly reachable from the coordinate through the relation.
    pub fn links_from(&self, from: HexCoord) -> impl Iterator<Item = HexCoord> + '_ {
        let connected = self.linked.contains(&from);
        self.linked
            .iter()
            .copied()
            .filter(move |&other| connected && other != from)
    }

    /// The open passages participating in the complete graph.
    #[must_use]
    pub fn linked(&self) -> &BTreeSet<HexCoord> {
        &self.linked
    }

    /// Passages present in the relation without any interconnection edge.
    pub fn isolated(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.nodes.difference(&self.linked).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexhall_core::{BoardDefinition, DrawPos, SpaceDefinition, TokenDefinition};

    fn board_with_passages(coords: &[(i32, i32)]) -> SpaceGraph {
        let definition = BoardDefinition {
            spaces: coords
                .iter()
                .map(|&(q, r)| SpaceDefinition {
                    coord: HexCoord::new(q, r),
                    kind: SpaceKind::Passage,
                    position: DrawPos::new(q as f32, r as f32),
                })
                .collect(),
            links: Vec::new(),
        };
        SpaceGraph::from_definition(&definition).expect("valid definition")
    }

    fn door(id: u32, closed: bool) -> TokenDefinition {
        TokenDefinition {
            id: TokenId::new(id),
            state: TokenState::Door { closed },
            start_space: None,
        }
    }

    #[test]
    fn web_is_complete_over_open_passages_only() {
        let graph = board_with_passages(&[(0, 0), (1, 0), (2, 0)]);
        let registry =
            TokenRegistry::from_definitions(&[door(1, true)]).expect("valid definitions");
        let mut occupancy = BTreeMap::new();
        let _ = occupancy.insert(TokenId::new(1), HexCoord::new(2, 0));

        let mut passages = PassageState::default();
        passages
            .rebuild(&graph, &registry, &occupancy)
            .expect("doors on passages");

        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(1, 0);
        let sealed = HexCoord::new(2, 0);

        assert!(passages.web.are_linked(a, b));
        assert!(passages.web.are_linked(b, a));
        assert!(!passages.web.are_linked(a, a));
        assert!(!passages.web.are_linked(a, sealed));
        assert!(passages.web.contains(sealed));
        assert_eq!(passages.web.isolated().collect::<Vec<_>>(), vec![sealed]);
        assert_eq!(passages.web.links_from(sealed).count(), 0);
        assert_eq!(passages.web.links_from(a).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn gate_on_non_exit_space_is_an_authoring_error() {
        let graph = board_with_passages(&[(0, 0)]);
        let registry = TokenRegistry::from_definitions(&[TokenDefinition {
            id: TokenId::new(1),
            state: TokenState::Gate { closed: true },
            start_space: None,
        }])
        .expect("valid definitions");
        let mut occupancy = BTreeMap::new();
        let _ = occupancy.insert(TokenId::new(1), HexCoord::new(0, 0));

        let mut exits = ExitState::default();
        assert_eq!(
            exits.rebuild(&graph, &registry, &occupancy).unwrap_err(),
            BoardError::GateSpaceMismatch {
                token: TokenId::new(1),
                space: HexCoord::new(0, 0),
            }
        );
    }

    #[test]
    fn unplaced_door_leaves_every_passage_open() {
        let graph = board_with_passages(&[(0, 0), (1, 0)]);
        let registry =
            TokenRegistry::from_definitions(&[door(1, true)]).expect("valid definitions");
        let occupancy = BTreeMap::new();

        let mut passages = PassageState::default();
        passages
            .rebuild(&graph, &registry, &occupancy)
            .expect("no door is placed");

        assert_eq!(passages.open.len(), 2);
        assert!(passages.closed.is_empty());
    }
}
