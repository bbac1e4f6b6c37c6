//! State core for a Sushi Go score tracker: a list of players with three
//! rounds of scores each, a confirmation step before removing a player, and a
//! persisted snapshot of the list. Drawing the table is left to the host.

pub mod config;
pub mod scorer;
pub mod states;
pub mod storage;
pub mod types;
pub mod view;

pub use config::ScorerConfig;
pub use scorer::{Action, Scorer, ScorerError};
pub use storage::{FileStore, MemoryStore, NullStore, Store};
pub use types::{Player, PlayerError, Players, Scores, ROUNDS};
