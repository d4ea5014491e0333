use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::GameId;

/// Number of wrong guesses that ends a round.
pub const MAX_WRONG_GUESSES: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum WordDifficulty {
    Easy,
    Medium,
    Hard,
}

impl WordDifficulty {
    pub const ALL: [WordDifficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            WordDifficulty::Easy => "easy",
            WordDifficulty::Medium => "medium",
            WordDifficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for WordDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError(pub String);

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty '{}', expected easy, medium or hard", self.0)
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for WordDifficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(WordDifficulty::Easy),
            "medium" => Ok(WordDifficulty::Medium),
            "hard" => Ok(WordDifficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Long-run statistics for one single-player session lineage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameStatistics {
    pub games_played: u32,
    pub games_won: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_guesses: u32,
    pub average_guesses_per_win: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameState {
    pub id: GameId,
    pub word: String, // Never sent to clients while playing, see GameView
    pub guessed_letters: BTreeSet<char>,
    pub wrong_guesses: u32,
    pub max_wrong: u32,
    pub status: GameStatus,
    pub difficulty: WordDifficulty,
    pub category: String,
    pub hints_used: u32,
    pub hints_allowed: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub statistics: GameStatistics,
}

/// Client-facing projection of a single-player game.
/// The word is only present once the game is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameView {
    pub id: GameId,
    pub display_word: Vec<Option<char>>,
    pub word: Option<String>,
    pub guessed_letters: Vec<char>,
    pub wrong_guesses: u32,
    pub max_wrong: u32,
    pub remaining_guesses: u32,
    pub status: GameStatus,
    pub difficulty: WordDifficulty,
    pub category: String,
    pub hints_used: u32,
    pub hints_allowed: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub statistics: GameStatistics,
}
