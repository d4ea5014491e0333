use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{GameError, GameHistoryEntry, GameView, PlayerTotals, RoomView, WordDifficulty};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryInfo {
    pub name: String,
    pub is_default: bool,
    pub difficulties: Vec<WordDifficulty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct NewGameRequest {
    pub difficulty: Option<WordDifficulty>,
    pub category: Option<String>,
    pub hints_allowed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRequest {
    pub letter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionResponse {
    pub session_id: String,
    pub game: GameView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoryResponse {
    pub session_id: String,
    pub totals: PlayerTotals,
    pub entries: Vec<GameHistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateRoomRequest {
    pub player_name: String,
    /// Same-device play: seat a second player immediately and start.
    #[serde(default)]
    pub opponent_name: Option<String>,
    #[serde(default)]
    pub difficulty: Option<WordDifficulty>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub hints_allowed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JoinRoomRequest {
    pub player_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoomGuessRequest {
    pub player_id: Uuid,
    pub letter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoomPlayerRequest {
    pub player_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoomJoined {
    pub room: RoomView,
    pub player_id: Uuid,
    pub opponent_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
    pub details: GameError,
}
