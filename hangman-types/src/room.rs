use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{MatchView, PlayerSlot, RoomId, TwoPlayerGameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoomPlayer {
    pub id: Uuid,
    pub name: String,
    pub connected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum RoomStatus {
    Waiting,
    Playing,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameRoom {
    pub id: RoomId,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub player1: Option<RoomPlayer>,
    pub player2: Option<RoomPlayer>,
    pub game: Option<TwoPlayerGameState>,
    pub status: RoomStatus,
}

impl GameRoom {
    /// Which seat the given room player occupies, if any.
    pub fn slot_of(&self, player_id: Uuid) -> Option<PlayerSlot> {
        if self.player1.as_ref().is_some_and(|p| p.id == player_id) {
            Some(PlayerSlot::Player1)
        } else if self.player2.as_ref().is_some_and(|p| p.id == player_id) {
            Some(PlayerSlot::Player2)
        } else {
            None
        }
    }

    pub fn is_full(&self) -> bool {
        self.player1.is_some() && self.player2.is_some()
    }
}

/// Room as sent to clients: the embedded match is projected so words stay hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoomView {
    pub id: RoomId,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub player1: Option<RoomPlayer>,
    pub player2: Option<RoomPlayer>,
    pub game: Option<MatchView>,
    pub status: RoomStatus,
}
