//! Radial light derivation and straight-line beam tracing.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use hexhall_core::{BoardError, HexCoord, SpaceKind, TokenId, TokenKind, TokenState};

use crate::graph::SpaceGraph;
use crate::tokens::TokenRegistry;

/// Partition of lit wall spaces into on and off for a given time.
///
/// Only walls bearing a beamless light token appear in either set; walls
/// without a light are in neither. Rebuilt in place by
/// `Board::compute_radial_lights`.
#[derive(Clone, Debug, Default)]
pub(crate) struct LightState {
    pub(crate) on: BTreeSet<HexCoord>,
    pub(crate) off: BTreeSet<HexCoord>,
}

impl LightState {
    /// Recomputes the partition for the provided simulated time.
    ///
    /// A light is on while `shutoff > now`; a wall bearing several radial
    /// lights is on while any of them is. Fails with
    /// [`BoardError::LightSpaceMismatch`] when a light occupies a space
    /// that is not a wall; an unplaced light affects nothing, and beam
    /// emitters are traced separately.
    pub(crate) fn rebuild(
        &mut self,
        graph: &SpaceGraph,
        registry: &TokenRegistry,
        occupancy: &BTreeMap<TokenId, HexCoord>,
        now: Duration,
    ) -> Result<(), BoardError> {
        self.on.clear();
        self.off.clear();
        for (token, state) in registry.of_kind(TokenKind::Light) {
            let TokenState::Light { shutoff, beam } = state else {
                continue;
            };
            if beam.is_some() {
                continue;
            }
            let Some(&space) = occupancy.get(&token) else {
                continue;
            };
            if graph.kind(space) != Some(SpaceKind::Wall) {
                return Err(BoardError::LightSpaceMismatch { token, space });
            }
            if *shutoff > now {
                let _ = self.on.insert(space);
            } else {
                let _ = self.off.insert(space);
            }
        }
        // Keep the sets a partition when lights share a wall.
        self.off.retain(|space| !self.on.contains(space));
        Ok(())
    }
}

/// Ordered beam sequences keyed by the space each emitter occupies.
///
/// Every source keeps its own sequence; tracing one beam never clears
/// another's cells.
#[derive(Clone, Debug, Default)]
pub(crate) struct BeamMap {
    beams: BTreeMap<HexCoord, Vec<HexCoord>>,
}

impl BeamMap {
    /// Retraces every beam from current emitter occupancy.
    ///
    /// Starting one step beyond the source, the beam extends cell by cell
    /// while it stays on floor or passage spaces; the first other cell
    /// stops it and is never included, and the source itself is never part
    /// of its own beam. Each traced cell is added to `revealed`. An
    /// unplaced emitter is skipped. Emitters sharing a source space are
    /// traced in identifier order and the last sequence wins the map
    /// entry, though every traced cell still reaches `revealed`.
    pub(crate) fn rebuild(
        &mut self,
        graph: &SpaceGraph,
        registry: &TokenRegistry,
        occupancy: &BTreeMap<TokenId, HexCoord>,
        revealed: &mut BTreeSet<HexCoord>,
    ) {
        self.beams.clear();
        for (token, state) in registry.iter() {
            let TokenState::Light {
                beam: Some(direction),
                ..
            } = state
            else {
                continue;
            };
            let Some(&source) = occupancy.get(&token) else {
                continue;
            };
            let mut cells = Vec::new();
            let mut cursor = source.offset(*direction);
            while graph.is_walkable(cursor) {
                let _ = revealed.insert(cursor);
                cells.push(cursor);
                cursor = cursor.offset(*direction);
            }
            let _ = self.beams.insert(source, cells);
        }
    }

    /// Every beam, keyed by source space in coordinate order.
    pub(crate) fn all(&self) -> &BTreeMap<HexCoord, Vec<HexCoord>> {
        &self.beams
    }

    /// Cells illuminated by the beam emitted from the source space.
    pub(crate) fn from_source(&self, source: HexCoord) -> Option<&[HexCoord]> {
        self.beams.get(&source).map(Vec::as_slice)
    }
}
