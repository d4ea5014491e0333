use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::warn;
use warp::Filter;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;

use crate::error::{ServiceError, ServiceResult};
use crate::rate_limiter::ClientRateLimits;
use crate::rooms::RoomManager;
use crate::sessions::GameService;
use hangman_types::{
    CreateRoomRequest, ErrorResponse, GameError, GuessRequest, JoinRoomRequest, NewGameRequest,
    RoomGuessRequest, RoomPlayerRequest,
};

pub mod config;
pub mod error;
pub mod rate_limiter;
pub mod recording;
pub mod rooms;
pub mod sessions;
pub mod store;
pub mod words;

const MAX_BODY_BYTES: u64 = 4 * 1024;

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<u64>,
}

fn with_shared<T: Send + Sync + ?Sized>(
    value: Arc<T>,
) -> impl Filter<Extract = (Arc<T>,), Error = Infallible> + Clone {
    warp::any().map(move || value.clone())
}

/// JSON body; malformed input becomes a 400 with the usual error payload.
fn json_body<T: DeserializeOwned + Send + 'static>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES)
        .and(warp::body::bytes())
        .and_then(|body: Bytes| async move {
            serde_json::from_slice::<T>(&body)
                .map_err(|err| warp::reject::custom(ServiceError::InvalidRequest(err.to_string())))
        })
}

/// Like `json_body`, but an empty body (`Content-Length: 0`) means `T::default()`.
fn optional_json_body<T: DeserializeOwned + Default + Send + 'static>()
-> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES)
        .and(warp::body::bytes())
        .and_then(|body: Bytes| async move {
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(T::default());
            }
            serde_json::from_slice::<T>(&body)
                .map_err(|err| warp::reject::custom(ServiceError::InvalidRequest(err.to_string())))
        })
}

fn rate_limited(
    limits: Arc<ClientRateLimits>,
) -> impl Filter<Extract = (), Error = warp::Rejection> + Clone {
    warp::addr::remote()
        .and_then(move |addr: Option<SocketAddr>| {
            let limits = limits.clone();
            async move {
                if limits.check(addr.map(|a| a.ip())) {
                    Ok(())
                } else {
                    warn!("Rate limit exceeded for {:?}", addr);
                    Err(warp::reject::custom(ServiceError::RateLimited))
                }
            }
        })
        .untuple_one()
}

fn reply<T: Serialize>(result: ServiceResult<T>, success: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(body) => warp::reply::with_status(warp::reply::json(&body), success),
        Err(err) => err.into_reply(),
    }
}

pub fn create_routes(
    game_service: Arc<GameService>,
    room_manager: Arc<RoomManager>,
    rate_limits: Arc<ClientRateLimits>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let games = with_shared(game_service);
    let rooms = with_shared(room_manager);

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let categories = warp::path!("categories")
        .and(warp::get())
        .and(games.clone())
        .map(|games: Arc<GameService>| {
            warp::reply::with_status(warp::reply::json(&games.catalog().category_info()), StatusCode::OK)
        });

    // Single-player sessions
    let start_session = warp::path!("sessions")
        .and(warp::post())
        .and(optional_json_body::<NewGameRequest>())
        .and(games.clone())
        .and_then(handle_start_session);

    let current_game = warp::path!("sessions" / String)
        .and(warp::get())
        .and(games.clone())
        .and_then(handle_current_game);

    let new_game = warp::path!("sessions" / String / "games")
        .and(warp::post())
        .and(optional_json_body::<NewGameRequest>())
        .and(games.clone())
        .and_then(handle_new_game);

    let session_guess = warp::path!("sessions" / String / "guess")
        .and(warp::post())
        .and(json_body::<GuessRequest>())
        .and(games.clone())
        .and_then(handle_session_guess);

    let session_hint = warp::path!("sessions" / String / "hint")
        .and(warp::post())
        .and(games.clone())
        .and_then(handle_session_hint);

    let session_history = warp::path!("sessions" / String / "history")
        .and(warp::get())
        .and(warp::query::<HistoryQuery>())
        .and(games.clone())
        .and_then(handle_session_history);

    // Two-player rooms
    let create_room = warp::path!("rooms")
        .and(warp::post())
        .and(json_body::<CreateRoomRequest>())
        .and(rooms.clone())
        .and_then(handle_create_room);

    let get_room = warp::path!("rooms" / String)
        .and(warp::get())
        .and(rooms.clone())
        .and_then(handle_get_room);

    let join_room = warp::path!("rooms" / String / "join")
        .and(warp::post())
        .and(json_body::<JoinRoomRequest>())
        .and(rooms.clone())
        .and_then(handle_join_room);

    let room_guess = warp::path!("rooms" / String / "guess")
        .and(warp::post())
        .and(json_body::<RoomGuessRequest>())
        .and(rooms.clone())
        .and_then(handle_room_guess);

    let room_hint = warp::path!("rooms" / String / "hint")
        .and(warp::post())
        .and(json_body::<RoomPlayerRequest>())
        .and(rooms.clone())
        .and_then(handle_room_hint);

    let rematch = warp::path!("rooms" / String / "rematch")
        .and(warp::post())
        .and(json_body::<RoomPlayerRequest>())
        .and(rooms.clone())
        .and_then(handle_rematch);

    let leave_room = warp::path!("rooms" / String / "leave")
        .and(warp::post())
        .and(json_body::<RoomPlayerRequest>())
        .and(rooms.clone())
        .and_then(handle_leave_room);

    let api = warp::path("api").and(rate_limited(rate_limits)).and(
        categories
            .or(start_session)
            .or(current_game)
            .or(new_game)
            .or(session_guess)
            .or(session_hint)
            .or(session_history)
            .or(create_room)
            .or(get_room)
            .or(join_room)
            .or(room_guess)
            .or(room_hint)
            .or(rematch)
            .or(leave_room),
    );

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(api)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log("hangman"))
}

async fn handle_start_session(
    request: NewGameRequest,
    games: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply(games.start_session(request).await, StatusCode::CREATED))
}

async fn handle_current_game(
    session_id: String,
    games: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply(games.current(&session_id).await, StatusCode::OK))
}

async fn handle_new_game(
    session_id: String,
    request: NewGameRequest,
    games: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply(games.new_game(&session_id, request).await, StatusCode::CREATED))
}

async fn handle_session_guess(
    session_id: String,
    request: GuessRequest,
    games: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply(games.guess(&session_id, &request.letter).await, StatusCode::OK))
}

async fn handle_session_hint(
    session_id: String,
    games: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply(games.hint(&session_id).await, StatusCode::OK))
}

async fn handle_session_history(
    session_id: String,
    query: HistoryQuery,
    games: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let limit = query.limit.unwrap_or(20).min(100); // Default 20, max 100
    Ok(reply(games.history(&session_id, limit).await, StatusCode::OK))
}

async fn handle_create_room(
    request: CreateRoomRequest,
    rooms: Arc<RoomManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply(rooms.create_room(request).await, StatusCode::CREATED))
}

async fn handle_get_room(
    room_id: String,
    rooms: Arc<RoomManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply(rooms.get_room(&room_id).await, StatusCode::OK))
}

async fn handle_join_room(
    room_id: String,
    request: JoinRoomRequest,
    rooms: Arc<RoomManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply(rooms.join_room(&room_id, request).await, StatusCode::OK))
}

async fn handle_room_guess(
    room_id: String,
    request: RoomGuessRequest,
    rooms: Arc<RoomManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = rooms
        .guess(&room_id, request.player_id, &request.letter)
        .await;
    Ok(reply(result, StatusCode::OK))
}

async fn handle_room_hint(
    room_id: String,
    request: RoomPlayerRequest,
    rooms: Arc<RoomManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply(rooms.hint(&room_id, request.player_id).await, StatusCode::OK))
}

async fn handle_rematch(
    room_id: String,
    request: RoomPlayerRequest,
    rooms: Arc<RoomManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply(rooms.rematch(&room_id, request.player_id).await, StatusCode::OK))
}

async fn handle_leave_room(
    room_id: String,
    request: RoomPlayerRequest,
    rooms: Arc<RoomManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(reply(rooms.leave_room(&room_id, request.player_id).await, StatusCode::OK))
}

async fn handle_rejection(err: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(service_error) = err.find::<ServiceError>() {
        let (status, body) = service_error.to_response();
        return Ok(warp::reply::with_status(warp::reply::json(&body), status));
    }

    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required".to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
    } else if let Some(query_error) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, query_error.to_string())
    } else {
        warn!("Unhandled rejection: {:?}", err);
        (StatusCode::BAD_REQUEST, "Bad request".to_string())
    };

    let body = ErrorResponse {
        error: message.clone(),
        details: GameError::InvalidRequest { reason: message },
    };
    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}
