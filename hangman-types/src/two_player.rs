use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameId, GameStatus, WordDifficulty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum PlayerSlot {
    Player1,
    Player2,
}

impl PlayerSlot {
    pub fn other(&self) -> Self {
        match self {
            PlayerSlot::Player1 => PlayerSlot::Player2,
            PlayerSlot::Player2 => PlayerSlot::Player1,
        }
    }
}

/// One player's half of a two-player match. No long-run statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerGameState {
    pub player_id: PlayerSlot,
    pub player_name: String,
    pub word: String,
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum TwoPlayerStatus {
    Playing,
    Player1Won,
    Player2Won,
    BothLost,
    GameOver,
}

impl TwoPlayerStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TwoPlayerStatus::Playing)
    }

    pub fn winner(&self) -> Option<PlayerSlot> {
        match self {
            TwoPlayerStatus::Player1Won => Some(PlayerSlot::Player1),
            TwoPlayerStatus::Player2Won => Some(PlayerSlot::Player2),
            TwoPlayerStatus::Playing | TwoPlayerStatus::BothLost | TwoPlayerStatus::GameOver => {
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Scores {
    pub player1: u32,
    pub player2: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TwoPlayerGameState {
    pub id: GameId,
    pub player1: PlayerGameState,
    pub player2: PlayerGameState,
    pub current_turn: PlayerSlot,
    pub game_status: TwoPlayerStatus,
    pub round_number: u32,
    pub scores: Scores,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl TwoPlayerGameState {
    pub fn player(&self, slot: PlayerSlot) -> &PlayerGameState {
        match slot {
            PlayerSlot::Player1 => &self.player1,
            PlayerSlot::Player2 => &self.player2,
        }
    }
}

/// Client-facing projection of one player inside a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerView {
    pub player_id: PlayerSlot,
    pub player_name: String,
    pub display_word: Vec<Option<char>>,
    pub word: Option<String>,
    pub guessed_letters: Vec<char>,
    pub wrong_guesses: u32,
    pub max_wrong: u32,
    pub status: GameStatus,
    pub hints_used: u32,
    pub hints_allowed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchView {
    pub id: GameId,
    pub player1: PlayerView,
    pub player2: PlayerView,
    pub current_turn: PlayerSlot,
    pub game_status: TwoPlayerStatus,
    pub round_number: u32,
    pub scores: Scores,
    pub difficulty: WordDifficulty,
    pub category: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_other() {
        assert_eq!(PlayerSlot::Player1.other(), PlayerSlot::Player2);
        assert_eq!(PlayerSlot::Player2.other(), PlayerSlot::Player1);
    }

    #[test]
    fn test_status_winner() {
        assert_eq!(TwoPlayerStatus::Player1Won.winner(), Some(PlayerSlot::Player1));
        assert_eq!(TwoPlayerStatus::Player2Won.winner(), Some(PlayerSlot::Player2));
        assert_eq!(TwoPlayerStatus::BothLost.winner(), None);
        assert_eq!(TwoPlayerStatus::GameOver.winner(), None);
        assert!(!TwoPlayerStatus::Playing.is_terminal());
        assert!(TwoPlayerStatus::GameOver.is_terminal());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&TwoPlayerStatus::Player1Won).unwrap(),
            "\"player1Won\""
        );
        assert_eq!(
            serde_json::to_string(&PlayerSlot::Player2).unwrap(),
            "\"player2\""
        );
    }
}
