use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::WordDifficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GameMode {
    Single,
    TwoPlayer,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Single => "single",
            GameMode::TwoPlayer => "two_player",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single" => Some(GameMode::Single),
            "two_player" => Some(GameMode::TwoPlayer),
            _ => None,
        }
    }
}

/// A finished game as stored for later review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameHistoryEntry {
    pub id: String,
    pub player_key: String,
    pub player_name: Option<String>,
    pub mode: GameMode,
    pub word: String,
    pub difficulty: WordDifficulty,
    pub category: String,
    pub won: bool,
    pub guesses: u32,
    pub wrong_guesses: u32,
    pub hints_used: u32,
    pub duration_ms: i64,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerTotals {
    pub games: u32,
    pub wins: u32,
    pub total_guesses: u32,
    pub hints_used: u32,
}
