//! Everything a front end needs to draw the score table.

use serde::{Deserialize, Serialize};

use crate::states::RemovalState;
use crate::types::{Players, Scores, ROUNDS};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ScoreboardView {
    /// Number of round columns.
    pub rounds: usize,
    pub rows: Vec<PlayerRow>,
    /// Present while a removal is waiting to be confirmed.
    pub confirmation: Option<PendingRemovalView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct PlayerRow {
    pub index: usize,
    pub name: String,
    pub scores: Scores,
    pub total: i64,
    /// The remove control is only offered while more than one player is left.
    pub removable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct PendingRemovalView {
    pub index: usize,
    pub name: Option<String>,
}

impl ScoreboardView {
    pub fn new(players: &Players, removal: RemovalState) -> Self {
        let removable = players.len() > 1;
        let rows = players
            .players()
            .iter()
            .enumerate()
            .map(|(index, p)| PlayerRow {
                index,
                name: p.name().to_string(),
                scores: p.scores(),
                total: p.total(),
                removable,
            })
            .collect();
        let confirmation = removal.pending_index().map(|index| PendingRemovalView {
            index,
            name: players.player(index).ok().map(|p| p.name().to_string()),
        });

        Self {
            rounds: ROUNDS,
            rows,
            confirmation,
        }
    }
}
