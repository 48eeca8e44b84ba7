//! Token catalog keyed by identity, grouped by kind.

use std::collections::BTreeMap;
use std::time::Duration;

use hexhall_core::{BoardError, TokenDefinition, TokenId, TokenKind, TokenState};

/// Catalog of every token on the board, created once from definitions.
///
/// Identity and kind never change after construction; the mutable
/// attributes (`closed`, `shutoff`) are reached through targeted setters
/// so a token's state variant can never be swapped for another kind.
#[derive(Clone, Debug, Default)]
pub(crate) struct TokenRegistry {
    tokens: BTreeMap<TokenId, TokenState>,
}

impl TokenRegistry {
    /// Builds the registry, rejecting duplicate identifiers.
    pub(crate) fn from_definitions(definitions: &[TokenDefinition]) -> Result<Self, BoardError> {
        let mut tokens = BTreeMap::new();
        for definition in definitions {
            let previous = tokens.insert(definition.id, definition.state);
            if previous.is_some() {
                return Err(BoardError::DuplicateToken(definition.id));
            }
        }
        Ok(Self { tokens })
    }

    /// State of the token, if it is registered.
    pub(crate) fn state(&self, token: TokenId) -> Option<&TokenState> {
        self.tokens.get(&token)
    }

    /// Kind of the token, if it is registered.
    pub(crate) fn kind_of(&self, token: TokenId) -> Option<TokenKind> {
        self.tokens.get(&token).map(TokenState::kind)
    }

    /// Every registered token in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (TokenId, &TokenState)> {
        self.tokens.iter().map(|(id, state)| (*id, state))
    }

    /// Every registered token of the provided kind, in identifier order.
    pub(crate) fn of_kind(&self, kind: TokenKind) -> impl Iterator<Item = (TokenId, &TokenState)> {
        self.iter().filter(move |(_, state)| state.kind() == kind)
    }

    /// Sets the `closed` flag of a gate or door token.
    pub(crate) fn set_closed(&mut self, token: TokenId, closed: bool) -> Result<(), BoardError> {
        match self.tokens.get_mut(&token) {
            None => Err(BoardError::UnknownToken(token)),
            Some(TokenState::Gate { closed: flag }) | Some(TokenState::Door { closed: flag }) => {
                *flag = closed;
                Ok(())
            }
            Some(_) => Err(BoardError::AttributeMismatch {
                token,
                attribute: "closed",
            }),
        }
    }

    /// Sets the shutoff time of a light token.
    pub(crate) fn set_shutoff(
        &mut self,
        token: TokenId,
        shutoff: Duration,
    ) -> Result<(), BoardError> {
        match self.tokens.get_mut(&token) {
            None => Err(BoardError::UnknownToken(token)),
            Some(TokenState::Light { shutoff: time, .. }) => {
                *time = shutoff;
                Ok(())
            }
            Some(_) => Err(BoardError::AttributeMismatch {
                token,
                attribute: "shutoff",
            }),
        }
    }
}
