use std::sync::Arc;
use std::time::Duration;

use hangman_core::{WordCatalog, create_game_with_statistics, game_summary, game_view, get_hint, process_guess};
use hangman_types::{
    GameMode, GameState, GameStatistics, GameView, HistoryResponse, NewGameRequest,
    SessionResponse, WordDifficulty,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ServiceError, ServiceResult};
use crate::recording::{GameRecorder, summary_to_record};
use crate::store::{InMemoryStore, KeyLocks, KeyValueStore};

pub const DEFAULT_DIFFICULTY: WordDifficulty = WordDifficulty::Medium;

/// Single-player sessions: one current game per session, statistics carried
/// from game to game.
pub struct GameService {
    catalog: Arc<WordCatalog>,
    config: Config,
    sessions: Arc<dyn KeyValueStore<GameState>>,
    locks: KeyLocks,
    recorder: Option<Arc<dyn GameRecorder>>,
}

impl GameService {
    pub fn new(catalog: Arc<WordCatalog>, config: Config) -> Self {
        Self {
            catalog,
            config,
            sessions: Arc::new(InMemoryStore::new()),
            locks: KeyLocks::new(),
            recorder: None,
        }
    }

    pub fn with_store(mut self, sessions: Arc<dyn KeyValueStore<GameState>>) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn GameRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    fn start_game(&self, request: &NewGameRequest, statistics: GameStatistics) -> ServiceResult<GameState> {
        let category = self.catalog.resolve(request.category.as_deref())?;
        let game = create_game_with_statistics(
            request.difficulty.unwrap_or(DEFAULT_DIFFICULTY),
            category,
            self.config.hints_for(request.hints_allowed),
            statistics,
        )?;
        Ok(game)
    }

    pub async fn start_session(&self, request: NewGameRequest) -> ServiceResult<SessionResponse> {
        let session_id = Uuid::new_v4().to_string();
        let game = self.start_game(&request, GameStatistics::default())?;

        info!(
            "Started session {} ({} / {})",
            session_id, game.category, game.difficulty
        );
        let view = game_view(&game);
        self.sessions.set(&session_id, game).await;

        Ok(SessionResponse {
            session_id,
            game: view,
        })
    }

    pub async fn current(&self, session_id: &str) -> ServiceResult<GameView> {
        let game = self.load(session_id).await?;
        Ok(game_view(&game))
    }

    /// Replace the session's game. An unfinished game is abandoned without
    /// touching the statistics.
    pub async fn new_game(&self, session_id: &str, request: NewGameRequest) -> ServiceResult<SessionResponse> {
        let _guard = self.locks.lock(session_id).await;
        let previous = self.load(session_id).await?;

        let game = self.start_game(&request, previous.statistics.clone())?;
        if !previous.status.is_terminal() {
            info!("Session {} abandoned game {}", session_id, previous.id);
        }

        let view = game_view(&game);
        self.sessions.set(session_id, game).await;

        Ok(SessionResponse {
            session_id: session_id.to_string(),
            game: view,
        })
    }

    pub async fn guess(&self, session_id: &str, letter: &str) -> ServiceResult<GameView> {
        let _guard = self.locks.lock(session_id).await;
        let game = self.load(session_id).await?;

        let updated = process_guess(&game, letter)?;
        self.commit(session_id, &game, updated).await
    }

    pub async fn hint(&self, session_id: &str) -> ServiceResult<GameView> {
        let _guard = self.locks.lock(session_id).await;
        let game = self.load(session_id).await?;

        let updated = get_hint(&game)?;
        self.commit(session_id, &game, updated).await
    }

    pub async fn history(&self, session_id: &str, limit: u64) -> ServiceResult<HistoryResponse> {
        let (totals, entries) = match &self.recorder {
            Some(recorder) => recorder
                .history(session_id, limit)
                .await
                .map_err(|err| ServiceError::Persistence(err.to_string()))?,
            None => Default::default(),
        };

        Ok(HistoryResponse {
            session_id: session_id.to_string(),
            totals,
            entries,
        })
    }

    pub async fn purge_idle(&self, max_idle: Duration) -> usize {
        let purged = self.sessions.purge_idle(max_idle).await;
        self.locks.prune();
        purged
    }

    async fn load(&self, session_id: &str) -> ServiceResult<GameState> {
        self.sessions
            .get(session_id)
            .await
            .ok_or_else(|| ServiceError::SessionNotFound(session_id.to_string()))
    }

    async fn commit(&self, session_id: &str, before: &GameState, after: GameState) -> ServiceResult<GameView> {
        let view = game_view(&after);
        if &after == before {
            return Ok(view);
        }

        let finished = !before.status.is_terminal() && after.status.is_terminal();
        if finished {
            info!(
                "Session {} finished game {}: {:?} after {} wrong guesses",
                session_id, after.id, after.status, after.wrong_guesses
            );
            self.record(session_id, &after).await;
        }

        self.sessions.set(session_id, after).await;
        Ok(view)
    }

    async fn record(&self, session_id: &str, game: &GameState) {
        let (Some(recorder), Some(summary)) = (&self.recorder, game_summary(game)) else {
            return;
        };

        let record = summary_to_record(session_id, None, GameMode::Single, summary);
        if let Err(err) = recorder.record(record).await {
            error!("Failed to record game {} for session {}: {}", game.id, session_id, err);
        }
    }
}
