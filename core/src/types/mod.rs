//! Generic types used throughout the core codebase.

use std::convert::TryFrom;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

mod players;

pub use players::{PlayerError, Players};

/// The number of rounds in a game of Sushi Go. Every player carries exactly
/// one score per round.
pub const ROUNDS: usize = 3;

/// Information tracked about a player throughout the game.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) scores: Scores,
}

impl Player {
    /// A player with the given name and no points in any round.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: Scores::default(),
        }
    }

    /// The default name for the `n`th player (1-based).
    pub fn default_name(n: usize) -> String {
        format!("Player {}", n)
    }

    #[must_use]
    pub fn with_scores(self, scores: [i64; ROUNDS]) -> Self {
        Self {
            scores: Scores(scores),
            ..self
        }
    }

    pub fn name(&self) -> &'_ str {
        &self.name
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn total(&self) -> i64 {
        self.scores.total()
    }
}

/// The per-round scores for a single player. Serialized as a bare array so that
/// snapshots look like `[3, 0, 12]`.
///
/// Deserializing needs exactly `ROUNDS` entries but accepts any JSON number in
/// each one: fractions are truncated and anything outside `i64` saturates.
#[derive(Debug, Default, Copy, Clone, Serialize, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct Scores(pub [i64; ROUNDS]);

impl Scores {
    #[must_use]
    pub fn with_round(self, round: usize, score: i64) -> Option<Scores> {
        let mut scores = self.0;
        *scores.get_mut(round)? = score;
        Some(Scores(scores))
    }

    /// Sum of all rounds. Saturates rather than overflowing.
    pub fn total(self) -> i64 {
        self.iter().fold(0i64, |acc, s| acc.saturating_add(s))
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }
}

impl<'de> Deserialize<'de> for Scores {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let stored = <[StoredScore; ROUNDS]>::deserialize(deserializer)?;
        let mut scores = [0; ROUNDS];
        for (score, s) in scores.iter_mut().zip(stored.iter()) {
            *score = s.0;
        }
        Ok(Scores(scores))
    }
}

/// A single stored score, which may have been written as an integer too big
/// for `i64` or in exponent form (`1e+21`).
struct StoredScore(i64);

impl<'de> Deserialize<'de> for StoredScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StoredScoreVisitor)
    }
}

struct StoredScoreVisitor;

impl<'de> Visitor<'de> for StoredScoreVisitor {
    type Value = StoredScore;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<StoredScore, E> {
        Ok(StoredScore(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<StoredScore, E> {
        Ok(StoredScore(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<StoredScore, E> {
        // `as` truncates toward zero and saturates at the i64 bounds.
        Ok(StoredScore(v as i64))
    }
}

/// Interpret raw text from a score field.
///
/// Leading whitespace and an optional sign are accepted, followed by as many
/// decimal digits as are present; anything after the digits is ignored. If no
/// digits are found (empty input, `"abc"`, a lone `"-"` while the user is still
/// typing) the score is zero. Out-of-range values saturate.
pub fn parse_score(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = s.bytes().take_while(u8::is_ascii_digit);

    let mut value: i64 = 0;
    for d in digits {
        let d = i64::from(d - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    value
}
