use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    InvalidLetter { letter: String },
    InvalidRequest { reason: String },
    NoWordsAvailable { category: String, difficulty: String },
    UnknownCategory { category: String },
    SessionNotFound { session_id: String },
    RoomNotFound { room_id: String },
    RoomFull,
    RoomNotReady,
    NotInRoom,
    NotYourTurn,
    RoundInProgress,
    RateLimitExceeded,
    InternalError { message: String },
}
