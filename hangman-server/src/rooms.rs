use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use hangman_core::{
    WordCatalog, create_two_player_game, get_two_player_hint, player_summary,
    process_two_player_guess, room_view, start_next_round,
};
use hangman_types::{
    CreateRoomRequest, GameMode, GameRoom, JoinRoomRequest, PlayerSlot, RoomJoined, RoomPlayer,
    RoomStatus, RoomView, TwoPlayerGameState, WordDifficulty,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ServiceError, ServiceResult};
use crate::recording::{GameRecorder, summary_to_record};
use crate::sessions::DEFAULT_DIFFICULTY;
use crate::store::{InMemoryStore, KeyLocks, KeyValueStore};

/// Word settings chosen at creation, reused for every round in the room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSettings {
    pub difficulty: WordDifficulty,
    pub category: String,
    pub hints_allowed: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostedRoom {
    pub room: GameRoom,
    pub settings: RoomSettings,
}

pub struct RoomManager {
    catalog: Arc<WordCatalog>,
    config: Config,
    rooms: Arc<dyn KeyValueStore<HostedRoom>>,
    locks: KeyLocks,
    recorder: Option<Arc<dyn GameRecorder>>,
}

fn player_name(name: &str) -> ServiceResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::InvalidRequest(
            "player_name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn seat(name: String) -> RoomPlayer {
    RoomPlayer {
        id: Uuid::new_v4(),
        name,
        connected: true,
    }
}

impl RoomManager {
    pub fn new(catalog: Arc<WordCatalog>, config: Config) -> Self {
        Self {
            catalog,
            config,
            rooms: Arc::new(InMemoryStore::new()),
            locks: KeyLocks::new(),
            recorder: None,
        }
    }

    pub fn with_store(mut self, rooms: Arc<dyn KeyValueStore<HostedRoom>>) -> Self {
        self.rooms = rooms;
        self
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn GameRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    fn start_match(&self, room: &mut GameRoom, settings: &RoomSettings) -> ServiceResult<()> {
        let (Some(player1), Some(player2)) = (&room.player1, &room.player2) else {
            return Err(ServiceError::RoomNotReady);
        };

        let category = self.catalog.resolve(Some(&settings.category))?;
        let game = create_two_player_game(
            &player1.name,
            &player2.name,
            settings.difficulty,
            category,
            settings.hints_allowed,
        )?;

        room.game = Some(game);
        room.status = RoomStatus::Playing;
        Ok(())
    }

    /// Open a room. With an `opponent_name` both seats are filled on this
    /// device and the match starts straight away.
    pub async fn create_room(&self, request: CreateRoomRequest) -> ServiceResult<RoomJoined> {
        let creator = player_name(&request.player_name)?;
        let opponent = request
            .opponent_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let settings = RoomSettings {
            difficulty: request.difficulty.unwrap_or(DEFAULT_DIFFICULTY),
            category: self
                .catalog
                .resolve(request.category.as_deref())?
                .name()
                .to_string(),
            hints_allowed: self.config.hints_for(request.hints_allowed),
        };

        let player1 = seat(creator.clone());
        let player2 = opponent.map(seat);
        let player_id = player1.id;
        let opponent_id = player2.as_ref().map(|p| p.id);

        let mut room = GameRoom {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            created_by: creator,
            player1: Some(player1),
            player2,
            game: None,
            status: RoomStatus::Waiting,
        };
        if room.is_full() {
            self.start_match(&mut room, &settings)?;
        }

        info!(
            "Room {} created by {} ({} / {})",
            room.id, room.created_by, settings.category, settings.difficulty
        );
        let view = room_view(&room);
        self.rooms
            .set(&room.id.to_string(), HostedRoom { room, settings })
            .await;

        Ok(RoomJoined {
            room: view,
            player_id,
            opponent_id,
        })
    }

    pub async fn join_room(&self, room_id: &str, request: JoinRoomRequest) -> ServiceResult<RoomJoined> {
        let name = player_name(&request.player_name)?;

        let _guard = self.locks.lock(room_id).await;
        let mut hosted = self.load(room_id).await?;
        if hosted.room.player2.is_some() {
            return Err(ServiceError::RoomFull);
        }

        let player = seat(name);
        let player_id = player.id;
        hosted.room.player2 = Some(player);
        self.start_match(&mut hosted.room, &hosted.settings)?;

        info!("Player {} joined room {}", player_id, room_id);
        let view = room_view(&hosted.room);
        self.rooms.set(room_id, hosted).await;

        Ok(RoomJoined {
            room: view,
            player_id,
            opponent_id: None,
        })
    }

    pub async fn get_room(&self, room_id: &str) -> ServiceResult<RoomView> {
        let hosted = self.load(room_id).await?;
        Ok(room_view(&hosted.room))
    }

    pub async fn guess(&self, room_id: &str, player_id: Uuid, letter: &str) -> ServiceResult<RoomView> {
        self.play(room_id, player_id, |game| process_two_player_guess(game, letter))
            .await
    }

    pub async fn hint(&self, room_id: &str, player_id: Uuid) -> ServiceResult<RoomView> {
        self.play(room_id, player_id, get_two_player_hint).await
    }

    /// Start the next round once the current one is over.
    pub async fn rematch(&self, room_id: &str, player_id: Uuid) -> ServiceResult<RoomView> {
        let _guard = self.locks.lock(room_id).await;
        let mut hosted = self.load(room_id).await?;
        hosted.room.slot_of(player_id).ok_or(ServiceError::NotInRoom)?;
        let game = hosted.room.game.as_ref().ok_or(ServiceError::RoomNotReady)?;

        let category = self.catalog.resolve(Some(&hosted.settings.category))?;
        let next = start_next_round(game, hosted.settings.difficulty, category)?;

        info!("Room {} starting round {}", room_id, next.round_number);
        hosted.room.game = Some(next);
        hosted.room.status = RoomStatus::Playing;

        let view = room_view(&hosted.room);
        self.rooms.set(room_id, hosted).await;
        Ok(view)
    }

    /// Mark the player as gone. The room is closed once nobody is left.
    pub async fn leave_room(&self, room_id: &str, player_id: Uuid) -> ServiceResult<RoomView> {
        let _guard = self.locks.lock(room_id).await;
        let mut hosted = self.load(room_id).await?;
        let slot = hosted.room.slot_of(player_id).ok_or(ServiceError::NotInRoom)?;

        let occupant = match slot {
            PlayerSlot::Player1 => &mut hosted.room.player1,
            PlayerSlot::Player2 => &mut hosted.room.player2,
        };
        if let Some(player) = occupant.as_mut() {
            player.connected = false;
        }

        let view = room_view(&hosted.room);
        let anyone_left = [&hosted.room.player1, &hosted.room.player2]
            .into_iter()
            .flatten()
            .any(|player| player.connected);

        if anyone_left {
            info!("Player {} left room {}", player_id, room_id);
            self.rooms.set(room_id, hosted).await;
        } else {
            info!("Room {} closed", room_id);
            self.rooms.delete(room_id).await;
        }

        Ok(view)
    }

    pub async fn purge_idle(&self, max_idle: Duration) -> usize {
        let purged = self.rooms.purge_idle(max_idle).await;
        self.locks.prune();
        purged
    }

    async fn load(&self, room_id: &str) -> ServiceResult<HostedRoom> {
        self.rooms
            .get(room_id)
            .await
            .ok_or_else(|| ServiceError::RoomNotFound(room_id.to_string()))
    }

    async fn play<F>(&self, room_id: &str, player_id: Uuid, transition: F) -> ServiceResult<RoomView>
    where
        F: FnOnce(&TwoPlayerGameState) -> hangman_core::EngineResult<TwoPlayerGameState>,
    {
        let _guard = self.locks.lock(room_id).await;
        let mut hosted = self.load(room_id).await?;
        let slot = hosted.room.slot_of(player_id).ok_or(ServiceError::NotInRoom)?;
        let game = hosted.room.game.as_ref().ok_or(ServiceError::RoomNotReady)?;

        if game.game_status.is_terminal() {
            return Ok(room_view(&hosted.room));
        }
        if game.current_turn != slot {
            return Err(ServiceError::NotYourTurn);
        }

        let updated = transition(game)?;
        if &updated == game {
            return Ok(room_view(&hosted.room));
        }

        self.record_finished(&hosted.room, game, &updated).await;
        if updated.game_status.is_terminal() {
            info!(
                "Room {} round {} over: {:?}",
                room_id, updated.round_number, updated.game_status
            );
            hosted.room.status = RoomStatus::Finished;
        }
        hosted.room.game = Some(updated);

        let view = room_view(&hosted.room);
        self.rooms.set(room_id, hosted).await;
        Ok(view)
    }

    async fn record_finished(&self, room: &GameRoom, before: &TwoPlayerGameState, after: &TwoPlayerGameState) {
        let Some(recorder) = &self.recorder else {
            return;
        };

        for (slot, seat) in [
            (PlayerSlot::Player1, &room.player1),
            (PlayerSlot::Player2, &room.player2),
        ] {
            let (Some(seat), false) = (seat, before.player(slot).status.is_terminal()) else {
                continue;
            };
            let Some(summary) = player_summary(after.player(slot)) else {
                continue;
            };

            let record = summary_to_record(
                &seat.id.to_string(),
                Some(&seat.name),
                GameMode::TwoPlayer,
                summary,
            );
            if let Err(err) = recorder.record(record).await {
                error!("Failed to record round for player {} in room {}: {}", seat.id, room.id, err);
            }
        }
    }
}
