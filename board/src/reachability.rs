//! Reachable-subgraph derivation for movement queries.

use std::collections::{BTreeMap, BTreeSet};

use hexhall_core::{HexCoord, SpaceKind, TraversalRules};

use crate::graph::SpaceGraph;
use crate::portals::{ExitState, PassageState};

/// Induced subgraph of the board a mover may traverse.
///
/// Nodes are the traversable spaces selected by [`TraversalRules`]; edges
/// are the static board adjacency restricted to that node set, plus the
/// passage-interconnection shortcuts when passages are enabled. Rebuilt
/// in place by `Board::update_reachable`.
#[derive(Clone, Debug, Default)]
pub(crate) struct ReachableGraph {
    adjacency: BTreeMap<HexCoord, BTreeSet<HexCoord>>,
}

impl ReachableGraph {
    /// Recomputes the subgraph under the provided traversal rules.
    ///
    /// The base node set is floor ∪ passage; open exits and walls join it
    /// when the corresponding rule is set. Relies on `compute_exits` and
    /// `compute_passages` having run first, per the caller's dependency
    /// order.
    pub(crate) fn rebuild(
        &mut self,
        graph: &SpaceGraph,
        exits: &ExitState,
        passages: &PassageState,
        rules: TraversalRules,
    ) {
        let mut nodes: BTreeSet<HexCoord> = graph.of_kind(SpaceKind::Floor).clone();
        nodes.extend(graph.of_kind(SpaceKind::Passage).iter().copied());
        if rules.with_exits {
            nodes.extend(exits.open.iter().copied());
        }
        if rules.with_walls {
            nodes.extend(graph.of_kind(SpaceKind::Wall).iter().copied());
        }

        self.adjacency.clear();
        for &node in &nodes {
            let neighbors: BTreeSet<HexCoord> = graph
                .neighbors(node)
                .filter(|neighbor| nodes.contains(neighbor))
                .collect();
            let _ = self.adjacency.insert(node, neighbors);
        }

        if rules.with_passages {
            for from in passages.web.linked() {
                if let Some(neighbors) = self.adjacency.get_mut(from) {
                    neighbors.extend(passages.web.links_from(*from));
                }
            }
        }
    }

    /// Reports whether the coordinate is a node of the subgraph.
    pub(crate) fn contains(&self, coord: HexCoord) -> bool {
        self.adjacency.contains_key(&coord)
    }

    /// Traversal neighbors of the coordinate within the subgraph.
    pub(crate) fn neighbors(&self, coord: HexCoord) -> impl Iterator<Item = HexCoord> + '_ {
        self.adjacency.get(&coord).into_iter().flatten().copied()
    }

    /// Every node of the subgraph in coordinate order.
    pub(crate) fn cells(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.adjacency.keys().copied()
    }
}

/// Read-only view of the reachable subgraph handed to pure systems.
#[derive(Clone, Copy, Debug)]
pub struct ReachableView<'a> {
    graph: &'a ReachableGraph,
}

impl<'a> ReachableView<'a> {
    /// Captures a new view over the provided subgraph.
    pub(crate) fn new(graph: &'a ReachableGraph) -> Self {
        Self { graph }
    }

    /// Reports whether the coordinate is traversable.
    #[must_use]
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.graph.contains(coord)
    }

    /// Traversal neighbors of the coordinate.
    pub fn neighbors(&self, coord: HexCoord) -> impl Iterator<Item = HexCoord> + 'a {
        self.graph.neighbors(coord)
    }

    /// Every traversable coordinate in deterministic order.
    pub fn cells(&self) -> impl Iterator<Item = HexCoord> + 'a {
        self.graph.cells()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenRegistry;
    use hexhall_core::{BoardDefinition, DrawPos, SpaceDefinition, TokenDefinition, TokenId, TokenState};

    fn graph_from(
        spaces: &[(i32, i32, SpaceKind)],
        links: &[((i32, i32), (i32, i32))],
    ) -> SpaceGraph {
        let definition = BoardDefinition {
            spaces: spaces
                .iter()
                .map(|&(q, r, kind)| SpaceDefinition {
                    coord: HexCoord::new(q, r),
                    kind,
                    position: DrawPos::new(q as f32, r as f32),
                })
                .collect(),
            links: links
                .iter()
                .map(|&((aq, ar), (bq, br))| (HexCoord::new(aq, ar), HexCoord::new(bq, br)))
                .collect(),
        };
        SpaceGraph::from_definition(&definition).expect("valid definition")
    }

    #[test]
    fn base_subgraph_spans_floors_and_passages() {
        let graph = graph_from(
            &[
                (0, 0, SpaceKind::Floor),
                (1, 0, SpaceKind::Passage),
                (2, 0, SpaceKind::Wall),
                (3, 0, SpaceKind::Exit),
            ],
            &[((0, 0), (1, 0)), ((1, 0), (2, 0)), ((2, 0), (3, 0))],
        );

        let mut reachable = ReachableGraph::default();
        reachable.rebuild(
            &graph,
            &ExitState::default(),
            &PassageState::default(),
            TraversalRules::default(),
        );

        assert!(reachable.contains(HexCoord::new(0, 0)));
        assert!(reachable.contains(HexCoord::new(1, 0)));
        assert!(!reachable.contains(HexCoord::new(2, 0)));
        assert!(!reachable.contains(HexCoord::new(3, 0)));
        assert_eq!(
            reachable.neighbors(HexCoord::new(1, 0)).collect::<Vec<_>>(),
            vec![HexCoord::new(0, 0)]
        );
    }

    #[test]
    fn open_exits_and_walls_join_on_request() {
        let graph = graph_from(
            &[
                (0, 0, SpaceKind::Floor),
                (1, 0, SpaceKind::Wall),
                (2, 0, SpaceKind::Exit),
            ],
            &[((0, 0), (1, 0)), ((1, 0), (2, 0))],
        );
        let registry = TokenRegistry::from_definitions(&[]).expect("empty catalog");
        let mut exits = ExitState::default();
        exits
            .rebuild(&graph, &registry, &BTreeMap::new())
            .expect("no gates");

        let mut reachable = ReachableGraph::default();
        reachable.rebuild(
            &graph,
            &exits,
            &PassageState::default(),
            TraversalRules {
                with_exits: true,
                with_passages: false,
                with_walls: true,
            },
        );

        assert!(reachable.contains(HexCoord::new(1, 0)));
        assert!(reachable.contains(HexCoord::new(2, 0)));
        assert_eq!(
            reachable.neighbors(HexCoord::new(1, 0)).collect::<Vec<_>>(),
            vec![HexCoord::new(0, 0), HexCoord::new(2, 0)]
        );
    }

    #[test]
    fn passage_shortcuts_merge_on_top_of_adjacency() {
        // Two passages with no board path between them.
        let graph = graph_from(
            &[
                (0, 0, SpaceKind::Passage),
                (5, 5, SpaceKind::Passage),
                (6, 5, SpaceKind::Passage),
            ],
            &[((5, 5), (6, 5))],
        );
        let registry = TokenRegistry::from_definitions(&[TokenDefinition {
            id: TokenId::new(1),
            state: TokenState::Door { closed: true },
            start_space: None,
        }])
        .expect("valid definitions");
        let mut occupancy = BTreeMap::new();
        let _ = occupancy.insert(TokenId::new(1), HexCoord::new(6, 5));
        let mut passages = PassageState::default();
        passages
            .rebuild(&graph, &registry, &occupancy)
            .expect("door on passage");

        let mut reachable = ReachableGraph::default();
        reachable.rebuild(
            &graph,
            &ExitState::default(),
            &passages,
            TraversalRules {
                with_exits: false,
                with_passages: true,
                with_walls: false,
            },
        );

        // Open passages gain the shortcut; the closed one keeps only
        // board adjacency.
        assert_eq!(
            reachable.neighbors(HexCoord::new(0, 0)).collect::<Vec<_>>(),
            vec![HexCoord::new(5, 5)]
        );
        assert_eq!(
            reachable.neighbors(HexCoord::new(6, 5)).collect::<Vec<_>>(),
            vec![HexCoord::new(5, 5)]
        );
    }
}
