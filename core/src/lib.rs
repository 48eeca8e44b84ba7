#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hexhall board engine.
//!
//! This crate defines the vocabulary that connects loader adapters, the
//! authoritative board, and pure systems: hex coordinates, space and token
//! kinds, the tagged token state, the placement compatibility table, error
//! kinds, and the serde-derived definition types that external loaders
//! supply when a board is constructed.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Axial hex coordinate identifying a single board space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct HexCoord {
    q: i32,
    r: i32,
}

impl HexCoord {
    /// Creates a new axial coordinate.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Column axis component of the coordinate.
    #[must_use]
    pub const fn q(&self) -> i32 {
        self.q
    }

    /// Row axis component of the coordinate.
    #[must_use]
    pub const fn r(&self) -> i32 {
        self.r
    }

    /// Returns the coordinate displaced by the provided direction vector.
    #[must_use]
    pub const fn offset(self, direction: HexVector) -> Self {
        Self {
            q: self.q + direction.dq,
            r: self.r + direction.dr,
        }
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Direction vector between axial hex coordinates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct HexVector {
    dq: i32,
    dr: i32,
}

impl HexVector {
    /// Creates a new direction vector.
    #[must_use]
    pub const fn new(dq: i32, dr: i32) -> Self {
        Self { dq, dr }
    }

    /// Column axis component of the vector.
    #[must_use]
    pub const fn dq(&self) -> i32 {
        self.dq
    }

    /// Row axis component of the vector.
    #[must_use]
    pub const fn dr(&self) -> i32 {
        self.dr
    }
}

/// Two-dimensional draw position carried for rendering collaborators.
///
/// The board core never interprets these values; they travel with each
/// space so an adapter can draw the board without a second lookup table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawPos {
    x: f32,
    y: f32,
}

impl DrawPos {
    /// Creates a new draw position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal draw component.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical draw component.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Static classification of a board space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SpaceKind {
    /// Opening in the board perimeter that gates may seal.
    Exit,
    /// Ordinary walkable cell.
    Floor,
    /// Decorative light fixture cell; never occupied by tokens.
    Light,
    /// Walkable junction cell that doors may seal.
    Passage,
    /// Impassable cell that wall-mounted lights occupy.
    Wall,
}

impl SpaceKind {
    /// Every space kind, in declaration order.
    pub const ALL: [SpaceKind; 5] = [
        SpaceKind::Exit,
        SpaceKind::Floor,
        SpaceKind::Light,
        SpaceKind::Passage,
        SpaceKind::Wall,
    ];

    /// Reports whether characters and beams treat the space as walkable.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, SpaceKind::Floor | SpaceKind::Passage)
    }
}

impl fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpaceKind::Exit => "exit",
            SpaceKind::Floor => "floor",
            SpaceKind::Light => "light",
            SpaceKind::Passage => "passage",
            SpaceKind::Wall => "wall",
        };
        f.write_str(name)
    }
}

/// Behavioral classification of a movable token.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TokenKind {
    /// Seals or opens an exit space.
    Gate,
    /// Seals or opens a passage space.
    Door,
    /// Wall-mounted light, radial or beam-emitting.
    Light,
    /// Player or non-player character.
    Character,
}

impl TokenKind {
    /// Every token kind, in declaration order.
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Gate,
        TokenKind::Door,
        TokenKind::Light,
        TokenKind::Character,
    ];

    /// Space kinds the token kind is allowed to occupy.
    #[must_use]
    pub const fn compatible_spaces(self) -> &'static [SpaceKind] {
        match self {
            TokenKind::Gate => &[SpaceKind::Exit],
            TokenKind::Door => &[SpaceKind::Passage],
            TokenKind::Light => &[SpaceKind::Wall],
            TokenKind::Character => &[SpaceKind::Floor, SpaceKind::Passage],
        }
    }

    /// Reports whether the token kind may occupy the provided space kind.
    #[must_use]
    pub const fn may_occupy(self, space: SpaceKind) -> bool {
        matches!(
            (self, space),
            (TokenKind::Gate, SpaceKind::Exit)
                | (TokenKind::Door, SpaceKind::Passage)
                | (TokenKind::Light, SpaceKind::Wall)
                | (TokenKind::Character, SpaceKind::Floor)
                | (TokenKind::Character, SpaceKind::Passage)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Gate => "gate",
            TokenKind::Door => "door",
            TokenKind::Light => "light",
            TokenKind::Character => "character",
        };
        f.write_str(name)
    }
}

/// Unique identifier assigned to a token.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TokenId(u32);

impl TokenId {
    /// Creates a new token identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tag distinguishing one character token from another for visibility.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CharId(u32);

impl CharId {
    /// Creates a new character tag with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tag.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Per-kind token state.
///
/// Exactly one case per [`TokenKind`] carrying that kind's relevant
/// fields, so attribute reads are exhaustive and a token can never change
/// kind after creation. The `closed` and `shutoff` fields are mutated
/// through the board's targeted setters only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenState {
    /// Gate sealing an exit while `closed` is true.
    Gate {
        /// Whether the gate currently seals its exit.
        closed: bool,
    },
    /// Door sealing a passage while `closed` is true.
    Door {
        /// Whether the door currently seals its passage.
        closed: bool,
    },
    /// Wall-mounted light, radial unless a beam direction is present.
    Light {
        /// Simulated time at which the light switches off.
        shutoff: Duration,
        /// Direction of the emitted beam; radial light when absent.
        beam: Option<HexVector>,
    },
    /// Character occupying walkable spaces.
    Character {
        /// Tag identifying the character for visibility purposes.
        char_id: CharId,
    },
}

impl TokenState {
    /// Kind of token this state belongs to.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            TokenState::Gate { .. } => TokenKind::Gate,
            TokenState::Door { .. } => TokenKind::Door,
            TokenState::Light { .. } => TokenKind::Light,
            TokenState::Character { .. } => TokenKind::Character,
        }
    }
}

/// Traversal rules selecting which space kinds the reachable subgraph
/// includes beyond the floor and passage base set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraversalRules {
    /// Include currently open exits in the traversable set.
    pub with_exits: bool,
    /// Merge the open-passage interconnection shortcuts into the graph.
    pub with_passages: bool,
    /// Include every wall space in the traversable set.
    pub with_walls: bool,
}

/// Errors surfaced by board construction, placement, and derivation.
///
/// All kinds indicate malformed definitions or authoring mistakes rather
/// than transient conditions; callers fail fast and never retry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The referenced space is not part of the board.
    #[error("space {0} is not on the board")]
    UnknownSpace(HexCoord),
    /// The referenced token is not in the registry.
    #[error("token {0} is not in the registry")]
    UnknownToken(TokenId),
    /// Two space definitions share the same coordinate.
    #[error("duplicate space definition at {0}")]
    DuplicateSpace(HexCoord),
    /// Two token definitions share the same identifier.
    #[error("duplicate token definition for token {0}")]
    DuplicateToken(TokenId),
    /// The placement violates the kind compatibility table.
    #[error("{token_kind} token {token} cannot occupy {space_kind} space {space}")]
    IncompatibleTokenType {
        /// Token whose placement was rejected.
        token: TokenId,
        /// Kind of the rejected token.
        token_kind: TokenKind,
        /// Space targeted by the placement.
        space: HexCoord,
        /// Kind of the targeted space.
        space_kind: SpaceKind,
    },
    /// A gate token occupies a space that is not an exit.
    #[error("gate token {token} occupies non-exit space {space}")]
    GateSpaceMismatch {
        /// Offending gate token.
        token: TokenId,
        /// Space the gate occupies.
        space: HexCoord,
    },
    /// A door token occupies a space that is not a passage.
    #[error("door token {token} occupies non-passage space {space}")]
    DoorSpaceMismatch {
        /// Offending door token.
        token: TokenId,
        /// Space the door occupies.
        space: HexCoord,
    },
    /// A light token occupies a space that is not a wall.
    #[error("light token {token} occupies non-wall space {space}")]
    LightSpaceMismatch {
        /// Offending light token.
        token: TokenId,
        /// Space the light occupies.
        space: HexCoord,
    },
    /// The token's kind does not carry the mutated attribute.
    #[error("token {token} has no {attribute} attribute")]
    AttributeMismatch {
        /// Token whose mutation was rejected.
        token: TokenId,
        /// Name of the attribute the caller tried to set.
        attribute: &'static str,
    },
}

/// Definition of a single board space supplied by a loader adapter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpaceDefinition {
    /// Grid coordinate identifying the space.
    pub coord: HexCoord,
    /// Static classification of the space.
    pub kind: SpaceKind,
    /// Draw position carried for rendering collaborators.
    pub position: DrawPos,
}

/// Definition of the static board supplied by a loader adapter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardDefinition {
    /// Every space on the board.
    pub spaces: Vec<SpaceDefinition>,
    /// Symmetric adjacency links between space coordinates.
    pub links: Vec<(HexCoord, HexCoord)>,
}

/// Definition of a single token supplied by a loader adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDefinition {
    /// Identifier the token keeps for its whole lifetime.
    pub id: TokenId,
    /// Initial state; the variant fixes the token's kind forever.
    pub state: TokenState,
    /// Space the token starts on, placed through the normal rules.
    pub start_space: Option<HexCoord>,
}
