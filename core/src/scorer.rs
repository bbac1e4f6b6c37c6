use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ScorerConfig;
use crate::states::{ConfirmResult, RemovalState};
use crate::storage::{decode_snapshot, encode_snapshot, SnapshotError, StorageError, Store};
use crate::types::{PlayerError, Players};
use crate::view::ScoreboardView;

/// Something the presentation asks the scorer to do.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(tag = "type")]
pub enum Action {
    AddPlayer,
    InitiateRemove { index: usize },
    ConfirmRemove,
    CancelRemove,
    RenamePlayer { index: usize, name: String },
    UpdateScore { player: usize, round: usize, value: String },
    ResetScores,
}

/// Owns the player list and the removal gate, and mirrors the player list to
/// its store after every change.
#[derive(Debug)]
pub struct Scorer<S> {
    players: Players,
    removal: RemovalState,
    store: S,
    config: ScorerConfig,
}

impl<S: Store> Scorer<S> {
    /// Start from whatever the store holds. If it holds nothing usable, start
    /// from a single default player instead; a bad snapshot is never an error.
    pub fn load(store: S, config: ScorerConfig) -> Self {
        let players = match store.get(&config.storage_key) {
            Ok(Some(snapshot)) => match decode_snapshot(&snapshot) {
                Ok(players) => {
                    debug!("Loaded {} players from {:?}", players.len(), config.storage_key);
                    players
                }
                Err(e) => {
                    warn!("Discarding stored players: {}", e);
                    Players::new()
                }
            },
            Ok(None) => {
                debug!("No stored players under {:?}", config.storage_key);
                Players::new()
            }
            Err(e) => {
                warn!("Couldn't read stored players: {}", e);
                Players::new()
            }
        };

        Self {
            players,
            removal: RemovalState::Idle,
            store,
            config,
        }
    }

    pub fn players(&self) -> &'_ Players {
        &self.players
    }

    pub fn removal(&self) -> RemovalState {
        self.removal
    }

    pub fn config(&self) -> &'_ ScorerConfig {
        &self.config
    }

    pub fn store(&self) -> &'_ S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn total(&self, index: usize) -> Result<i64, PlayerError> {
        self.players.total(index)
    }

    pub fn view(&self) -> ScoreboardView {
        ScoreboardView::new(&self.players, self.removal)
    }

    pub fn apply(&mut self, action: Action) -> Result<(), ScorerError> {
        debug!("Applying {:?}", action);
        match action {
            Action::AddPlayer => self.add_player(),
            Action::InitiateRemove { index } => self.initiate_remove(index),
            Action::ConfirmRemove => self.confirm_remove().map(|_| ()),
            Action::CancelRemove => {
                self.cancel_remove();
                Ok(())
            }
            Action::RenamePlayer { index, name } => self.rename_player(index, name),
            Action::UpdateScore {
                player,
                round,
                value,
            } => self.update_score(player, round, &value),
            Action::ResetScores => self.reset_scores(),
        }
    }

    pub fn add_player(&mut self) -> Result<(), ScorerError> {
        let players = self.players.add_player();
        self.commit(players)
    }

    /// Show the confirmation for removing the player at `index`. The player
    /// list is not touched until the removal is confirmed.
    pub fn initiate_remove(&mut self, index: usize) -> Result<(), ScorerError> {
        self.players.player(index)?;
        self.removal = self.removal.initiate(index);
        Ok(())
    }

    /// Remove the pending player, if any. Returns whether a player was removed.
    /// The confirmation is dismissed whatever the outcome.
    ///
    /// A pending index that no longer names a player fails with
    /// `PlayerDoesntExist`, even when `keep_last_player` would also refuse.
    pub fn confirm_remove(&mut self) -> Result<bool, ScorerError> {
        let removal = std::mem::take(&mut self.removal);
        if let Some(index) = removal.pending_index() {
            self.players.player(index)?;
            if self.config.keep_last_player && self.players.len() == 1 {
                return Err(PlayerError::LastPlayer.into());
            }
        }

        match removal.confirm(&self.players)? {
            ConfirmResult::NothingPending => Ok(false),
            ConfirmResult::Removed(index, players) => {
                debug!("Removed player {}", index);
                self.commit(players)?;
                Ok(true)
            }
        }
    }

    pub fn cancel_remove(&mut self) {
        self.removal = self.removal.cancel();
    }

    pub fn rename_player(&mut self, index: usize, name: String) -> Result<(), ScorerError> {
        let players = self.players.rename_player(index, name)?;
        self.commit(players)
    }

    pub fn update_score(&mut self, index: usize, round: usize, raw: &str) -> Result<(), ScorerError> {
        let players = self.players.update_score(index, round, raw)?;
        self.commit(players)
    }

    pub fn reset_scores(&mut self) -> Result<(), ScorerError> {
        let players = self.players.reset_all_scores();
        self.commit(players)
    }

    /// Every change to the player list goes through here: the new list
    /// replaces the old one, then gets written out.
    fn commit(&mut self, players: Players) -> Result<(), ScorerError> {
        self.players = players;
        self.save()
    }

    /// Write the full player list to the store, overwriting the previous
    /// snapshot.
    pub fn save(&mut self) -> Result<(), ScorerError> {
        let snapshot = encode_snapshot(&self.players)?;
        self.store.set(&self.config.storage_key, &snapshot)?;
        debug!(
            "Saved {} players to {:?}",
            self.players.len(),
            self.config.storage_key
        );
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error("Couldn't save players: {0}")]
    Storage(#[from] StorageError),
    #[error("Couldn't save players: {0}")]
    Snapshot(#[from] SnapshotError),
}
