use serde::{Deserialize, Serialize};

use crate::types::{PlayerError, Players};

/// Removing a player takes two steps: the removal is initiated, which shows a
/// confirmation, and then it is either confirmed or cancelled. Both paths lead
/// back to `Idle`.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum RemovalState {
    Idle,
    PendingDelete(usize),
}

impl RemovalState {
    /// Ask to remove the player at `index`. Initiating again while a removal is
    /// already pending replaces the pending index.
    #[must_use]
    pub fn initiate(self, index: usize) -> RemovalState {
        RemovalState::PendingDelete(index)
    }

    #[must_use]
    pub fn cancel(self) -> RemovalState {
        RemovalState::Idle
    }

    /// Carry out the pending removal, if there is one. The gate always returns
    /// to `Idle` afterwards, which is the caller's responsibility.
    pub fn confirm(self, players: &Players) -> Result<ConfirmResult, PlayerError> {
        match self {
            RemovalState::Idle => Ok(ConfirmResult::NothingPending),
            RemovalState::PendingDelete(index) => {
                let remaining = players.remove_player(index)?;
                Ok(ConfirmResult::Removed(index, remaining))
            }
        }
    }

    pub fn pending_index(self) -> Option<usize> {
        match self {
            RemovalState::Idle => None,
            RemovalState::PendingDelete(index) => Some(index),
        }
    }

    pub fn is_confirmation_visible(self) -> bool {
        self.pending_index().is_some()
    }
}

impl Default for RemovalState {
    fn default() -> Self {
        RemovalState::Idle
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfirmResult {
    NothingPending,
    Removed(usize, Players),
}
