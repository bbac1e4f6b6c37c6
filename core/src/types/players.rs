use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{parse_score, Player, Scores, ROUNDS};

/// The ordered set of players at the table. Order is display order, and is
/// preserved across ser/de: the serialized form is a bare JSON array.
///
/// Every operation is pure: it returns a new `Players` and leaves `self`
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct Players {
    players: Vec<Player>,
}

impl Players {
    /// A table with a single default player.
    pub fn new() -> Self {
        Self {
            players: vec![Player::new(Player::default_name(1))],
        }
    }

    pub fn from_players(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Get all of the players in display order.
    pub fn players(&self) -> &'_ [Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Get the player at `index`. Returns `PlayerDoesntExist` if out of range.
    pub fn player(&self, index: usize) -> Result<&'_ Player, PlayerError> {
        self.players
            .get(index)
            .ok_or(PlayerError::PlayerDoesntExist(index))
    }

    /// Append a player named after its position at the time it was added.
    /// Existing names are never renumbered, so names may repeat after a removal.
    pub fn add_player(&self) -> Self {
        let mut self_ = self.clone();
        self_
            .players
            .push(Player::new(Player::default_name(self.players.len() + 1)));
        self_
    }

    /// Remove the player at `index`; later players shift down by one. This
    /// does not stop the last player from being removed.
    pub fn remove_player(&self, index: usize) -> Result<Self, PlayerError> {
        self.player(index)?;
        let mut self_ = self.clone();
        self_.players.remove(index);
        Ok(self_)
    }

    /// Replace the name of the player at `index` verbatim.
    pub fn rename_player(&self, index: usize, name: String) -> Result<Self, PlayerError> {
        let mut self_ = self.clone();
        let p = self_
            .players
            .get_mut(index)
            .ok_or(PlayerError::PlayerDoesntExist(index))?;
        p.name = name;
        Ok(self_)
    }

    /// Set one round's score for one player from raw field text. Text that
    /// isn't a number counts as zero.
    pub fn update_score(&self, index: usize, round: usize, raw: &str) -> Result<Self, PlayerError> {
        self.set_score(index, round, parse_score(raw))
    }

    pub fn set_score(&self, index: usize, round: usize, score: i64) -> Result<Self, PlayerError> {
        let mut self_ = self.clone();
        let p = self_
            .players
            .get_mut(index)
            .ok_or(PlayerError::PlayerDoesntExist(index))?;
        p.scores = p
            .scores
            .with_round(round, score)
            .ok_or(PlayerError::RoundDoesntExist(round))?;
        Ok(self_)
    }

    /// Reset all scores to zero, keeping names and seating.
    pub fn reset_all_scores(&self) -> Self {
        let mut self_ = self.clone();
        for p in self_.players.iter_mut() {
            p.scores = Scores::default();
        }
        self_
    }

    /// The sum of all rounds for the player at `index`.
    pub fn total(&self, index: usize) -> Result<i64, PlayerError> {
        Ok(self.player(index)?.total())
    }
}

impl Default for Players {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Error, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Player {0} does not exist")]
    PlayerDoesntExist(usize),
    #[error("Round {0} does not exist (there are {rounds} rounds)", rounds = ROUNDS)]
    RoundDoesntExist(usize),
    #[error("Can't remove the last player")]
    LastPlayer,
}
