use hangman_core::EngineError;
use hangman_types::{ErrorResponse, GameError};
use thiserror::Error;
use tracing::{error, warn};
use warp::http::StatusCode;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Room is full")]
    RoomFull,

    #[error("Player is not seated in this room")]
    NotInRoom,

    #[error("It is not your turn")]
    NotYourTurn,

    #[error("Room is waiting for a second player")]
    RoomNotReady,

    #[error("Too many requests")]
    RateLimited,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl warp::reject::Reject for ServiceError {}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Engine(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ServiceError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::SessionNotFound(_) | ServiceError::RoomNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ServiceError::RoomFull | ServiceError::NotYourTurn | ServiceError::RoomNotReady => {
                StatusCode::CONFLICT
            }
            ServiceError::NotInRoom => StatusCode::FORBIDDEN,
            ServiceError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ServiceError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn details(&self) -> GameError {
        match self {
            ServiceError::Engine(err) => match err {
                EngineError::InvalidLetter(letter) => GameError::InvalidLetter {
                    letter: letter.clone(),
                },
                EngineError::UnknownCategory(category) => GameError::UnknownCategory {
                    category: category.clone(),
                },
                EngineError::NoWordsAvailable {
                    category,
                    difficulty,
                } => GameError::NoWordsAvailable {
                    category: category.clone(),
                    difficulty: difficulty.to_string(),
                },
                EngineError::RoundInProgress(_) => GameError::RoundInProgress,
                EngineError::InvalidWordList { .. } => GameError::InternalError {
                    message: err.to_string(),
                },
            },
            ServiceError::SessionNotFound(session_id) => GameError::SessionNotFound {
                session_id: session_id.clone(),
            },
            ServiceError::RoomNotFound(room_id) => GameError::RoomNotFound {
                room_id: room_id.clone(),
            },
            ServiceError::RoomFull => GameError::RoomFull,
            ServiceError::NotInRoom => GameError::NotInRoom,
            ServiceError::NotYourTurn => GameError::NotYourTurn,
            ServiceError::RoomNotReady => GameError::RoomNotReady,
            ServiceError::RateLimited => GameError::RateLimitExceeded,
            ServiceError::InvalidRequest(reason) => GameError::InvalidRequest {
                reason: reason.clone(),
            },
            ServiceError::Persistence(_) => GameError::InternalError {
                message: "Failed to access game history".to_string(),
            },
        }
    }

    pub fn to_response(&self) -> (StatusCode, ErrorResponse) {
        let status = self.status();
        // Server-side details stay in the log.
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            warn!("Request rejected: {}", self);
            self.to_string()
        };

        (
            status,
            ErrorResponse {
                error: message,
                details: self.details(),
            },
        )
    }

    pub fn into_reply(self) -> warp::reply::WithStatus<warp::reply::Json> {
        let (status, body) = self.to_response();
        warp::reply::with_status(warp::reply::json(&body), status)
    }
}
