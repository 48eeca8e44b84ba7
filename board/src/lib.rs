#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state for Hexhall.
//!
//! The [`Board`] aggregate owns the static space graph, the token
//! catalog, the token-to-space occupancy relation, and every derived set.
//! Placement mutates occupancy; the resolvers rebuild the derived sets in
//! place and are called by the surrounding game in dependency order:
//! placement changes, then exits/passages, lighting, beams, visibility,
//! and reachability. There is no incremental invalidation — each resolver
//! recomputes from current occupancy and the supplied time value.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use hexhall_core::{
    BoardDefinition, BoardError, HexCoord, TokenDefinition, TokenId, TraversalRules,
};

mod graph;
mod lighting;
mod portals;
mod reachability;
mod tokens;
mod visibility;

pub use portals::PassageWeb;
pub use reachability::ReachableView;

use graph::SpaceGraph;
use lighting::{BeamMap, LightState};
use portals::{ExitState, PassageState};
use reachability::ReachableGraph;
use tokens::TokenRegistry;

/// Represents the authoritative Hexhall board state.
#[derive(Clone, Debug)]
pub struct Board {
    graph: SpaceGraph,
    registry: TokenRegistry,
    occupancy: BTreeMap<TokenId, HexCoord>,
    exits: ExitState,
    passages: PassageState,
    lights: LightState,
    beams: BeamMap,
    revealed: BTreeSet<HexCoord>,
    reachable: ReachableGraph,
}

impl Board {
    /// Builds a board from loader-supplied definitions.
    ///
    /// Validates the space graph and the token catalog, then seeds
    /// occupancy by placing every token that names a `start_space`
    /// through the normal placement rules, so a character defined on a
    /// wall is rejected at load rather than discovered later.
    pub fn from_definitions(
        board: &BoardDefinition,
        tokens: &[TokenDefinition],
    ) -> Result<Self, BoardError> {
        let mut constructed = Self {
            graph: SpaceGraph::from_definition(board)?,
            registry: TokenRegistry::from_definitions(tokens)?,
            occupancy: BTreeMap::new(),
            exits: ExitState::default(),
            passages: PassageState::default(),
            lights: LightState::default(),
            beams: BeamMap::default(),
            revealed: BTreeSet::new(),
            reachable: ReachableGraph::default(),
        };
        for definition in tokens {
            if let Some(start) = definition.start_space {
                constructed.place(definition.id, start)?;
            }
        }
        Ok(constructed)
    }

    /// Places a token on a space, replacing any prior occupancy.
    ///
    /// Fails with [`BoardError::UnknownToken`] for an unregistered token,
    /// [`BoardError::UnknownSpace`] for a space that is not on the board,
    /// and [`BoardError::IncompatibleTokenType`] when the space kind is
    /// outside the token's compatibility set. On failure nothing changes,
    /// including any prior occupancy of the token.
    pub fn place(&mut self, token: TokenId, space: HexCoord) -> Result<(), BoardError> {
        let Some(token_kind) = self.registry.kind_of(token) else {
            return Err(BoardError::UnknownToken(token));
        };
        let Some(space_kind) = self.graph.kind(space) else {
            return Err(BoardError::UnknownSpace(space));
        };
        if !token_kind.may_occupy(space_kind) {
            return Err(BoardError::IncompatibleTokenType {
                token,
                token_kind,
                space,
                space_kind,
            });
        }
        let _ = self.occupancy.insert(token, space);
        Ok(())
    }

    /// Clears the token's occupancy, returning the vacated space.
    ///
    /// A token with no current occupancy is a valid, common case and a
    /// no-op, not an error.
    pub fn remove(&mut self, token: TokenId) -> Option<HexCoord> {
        self.occupancy.remove(&token)
    }

    /// Sets the `closed` flag of a gate or door token.
    ///
    /// Fails with [`BoardError::UnknownToken`] or, for any other token
    /// kind, [`BoardError::AttributeMismatch`].
    pub fn set_closed(&mut self, token: TokenId, closed: bool) -> Result<(), BoardError> {
        self.registry.set_closed(token, closed)
    }

    /// Sets the shutoff time of a light token.
    ///
    /// Fails with [`BoardError::UnknownToken`] or, for any other token
    /// kind, [`BoardError::AttributeMismatch`].
    pub fn set_shutoff(&mut self, token: TokenId, shutoff: Duration) -> Result<(), BoardError> {
        self.registry.set_shutoff(token, shutoff)
    }

    /// Recomputes the open/closed partition of all exit spaces.
    ///
    /// Exits are open unless a closed gate occupies them. Fails with
    /// [`BoardError::GateSpaceMismatch`] when a gate sits on a space that
    /// is not an exit; an unplaced gate affects no exit.
    pub fn compute_exits(&mut self) -> Result<(), BoardError> {
        self.exits.rebuild(&self.graph, &self.registry, &self.occupancy)
    }

    /// Recomputes the open/closed partition of all passage spaces and the
    /// interconnection relation over the open ones.
    ///
    /// Fails with [`BoardError::DoorSpaceMismatch`] when a door sits on a
    /// space that is not a passage; an unplaced door affects no passage.
    pub fn compute_passages(&mut self) -> Result<(), BoardError> {
        self.passages
            .rebuild(&self.graph, &self.registry, &self.occupancy)
    }

    /// Recomputes which lit walls are on or off at the provided time.
    ///
    /// A radial light is on while `shutoff > now`. Fails with
    /// [`BoardError::LightSpaceMismatch`] when a light sits on a space
    /// that is not a wall.
    pub fn compute_radial_lights(&mut self, now: Duration) -> Result<(), BoardError> {
        self.lights
            .rebuild(&self.graph, &self.registry, &self.occupancy, now)
    }

    /// Retraces every light beam and resets the revealed set to the
    /// traced cells.
    ///
    /// This is the first revealing stage of a derivation pass;
    /// [`Board::compute_revealed_spaces`] adds adjacency reveals on top.
    pub fn compute_light_beams(&mut self) {
        self.revealed.clear();
        self.beams.rebuild(
            &self.graph,
            &self.registry,
            &self.occupancy,
            &mut self.revealed,
        );
    }

    /// Adds adjacency reveals to the revealed set.
    ///
    /// Every walkable board-neighbor of a lit wall or of a
    /// character-occupied space becomes revealed; entries already present
    /// from beam tracing are kept.
    pub fn compute_revealed_spaces(&mut self) {
        visibility::reveal_adjacent(
            &self.graph,
            &self.registry,
            &self.occupancy,
            &self.lights.on,
            &mut self.revealed,
        );
    }

    /// Recomputes the reachable subgraph under the provided rules.
    ///
    /// Reads the open-exit set and the passage interconnection, so
    /// [`Board::compute_exits`] and [`Board::compute_passages`] must have
    /// run since the last placement change.
    pub fn update_reachable(&mut self, rules: TraversalRules) {
        self.reachable
            .rebuild(&self.graph, &self.exits, &self.passages, rules);
    }
}

/// Query functions that provide read-only access to the board state.
pub mod query {
    use std::collections::{BTreeMap, BTreeSet};

    use hexhall_core::{DrawPos, HexCoord, SpaceKind, TokenId, TokenKind, TokenState};

    use super::{Board, PassageWeb, ReachableView};

    /// Kind of the space at the coordinate, if it is on the board.
    #[must_use]
    pub fn space_kind(board: &Board, coord: HexCoord) -> Option<SpaceKind> {
        board.graph.kind(coord)
    }

    /// Draw position of the space at the coordinate, if it is on the board.
    #[must_use]
    pub fn space_position(board: &Board, coord: HexCoord) -> Option<DrawPos> {
        board.graph.position(coord)
    }

    /// Every space of the provided kind.
    #[must_use]
    pub fn spaces_of(board: &Board, kind: SpaceKind) -> &BTreeSet<HexCoord> {
        board.graph.of_kind(kind)
    }

    /// Board neighbors of the coordinate under the static adjacency.
    pub fn adjacent(board: &Board, coord: HexCoord) -> impl Iterator<Item = HexCoord> + '_ {
        board.graph.neighbors(coord)
    }

    /// Space currently occupied by the token, if any.
    #[must_use]
    pub fn token_space(board: &Board, token: TokenId) -> Option<HexCoord> {
        board.occupancy.get(&token).copied()
    }

    /// State of the token, if it is registered.
    #[must_use]
    pub fn token_state(board: &Board, token: TokenId) -> Option<&TokenState> {
        board.registry.state(token)
    }

    /// Captures a read-only snapshot of every token in identifier order.
    #[must_use]
    pub fn token_view(board: &Board) -> TokenView {
        let snapshots = board
            .registry
            .iter()
            .map(|(id, state)| TokenSnapshot {
                id,
                kind: state.kind(),
                state: *state,
                space: token_space(board, id),
            })
            .collect();
        TokenView { snapshots }
    }

    /// Exit spaces currently open.
    #[must_use]
    pub fn open_exits(board: &Board) -> &BTreeSet<HexCoord> {
        &board.exits.open
    }

    /// Exit spaces currently sealed by a closed gate.
    #[must_use]
    pub fn closed_exits(board: &Board) -> &BTreeSet<HexCoord> {
        &board.exits.closed
    }

    /// Passage spaces currently open.
    #[must_use]
    pub fn open_passages(board: &Board) -> &BTreeSet<HexCoord> {
        &board.passages.open
    }

    /// Passage spaces currently sealed by a closed door.
    #[must_use]
    pub fn closed_passages(board: &Board) -> &BTreeSet<HexCoord> {
        &board.passages.closed
    }

    /// Interconnection relation over the passage spaces.
    #[must_use]
    pub fn passage_web(board: &Board) -> &PassageWeb {
        &board.passages.web
    }

    /// Wall spaces whose radial light is currently on.
    #[must_use]
    pub fn lights_on(board: &Board) -> &BTreeSet<HexCoord> {
        &board.lights.on
    }

    /// Wall spaces whose radial light has shut off.
    #[must_use]
    pub fn lights_off(board: &Board) -> &BTreeSet<HexCoord> {
        &board.lights.off
    }

    /// Every traced beam keyed by its source space.
    #[must_use]
    pub fn beams(board: &Board) -> &BTreeMap<HexCoord, Vec<HexCoord>> {
        board.beams.all()
    }

    /// Ordered cells illuminated by the beam from the source space.
    #[must_use]
    pub fn beam(board: &Board, source: HexCoord) -> Option<&[HexCoord]> {
        board.beams.from_source(source)
    }

    /// Floor and passage cells currently revealed.
    #[must_use]
    pub fn revealed(board: &Board) -> &BTreeSet<HexCoord> {
        &board.revealed
    }

    /// Read-only view of the reachable subgraph for movement systems.
    #[must_use]
    pub fn reachable_view(board: &Board) -> ReachableView<'_> {
        ReachableView::new(&board.reachable)
    }

    /// Read-only snapshot describing every token on the board.
    #[derive(Clone, Debug, Default)]
    pub struct TokenView {
        snapshots: Vec<TokenSnapshot>,
    }

    impl TokenView {
        /// Iterator over the captured snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &TokenSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<TokenSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single token's situation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TokenSnapshot {
        /// Identifier the token keeps for its whole lifetime.
        pub id: TokenId,
        /// Kind the token was created with.
        pub kind: TokenKind,
        /// Current attribute state of the token.
        pub state: TokenState,
        /// Space the token occupies, if it is placed.
        pub space: Option<HexCoord>,
    }
}
