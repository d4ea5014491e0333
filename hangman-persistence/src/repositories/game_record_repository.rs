use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::entities::{game_records, prelude::*};
use hangman_types::{GameHistoryEntry, GameMode, PlayerTotals, WordDifficulty};

/// A finished round, ready to be stored.
#[derive(Debug, Clone)]
pub struct NewGameRecord {
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

pub struct GameRecordRepository {
    db: DatabaseConnection,
}

impl GameRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_entry(model: game_records::Model) -> Result<GameHistoryEntry> {
        let mode = GameMode::parse(&model.mode)
            .ok_or_else(|| anyhow!("Unknown game mode '{}' in record {}", model.mode, model.id))?;
        let difficulty = model.difficulty.parse::<WordDifficulty>()?;

        Ok(GameHistoryEntry {
            id: model.id,
            player_key: model.player_key,
            player_name: model.player_name,
            mode,
            word: model.word,
            difficulty,
            category: model.category,
            won: model.won,
            guesses: model.guesses.max(0) as u32,
            wrong_guesses: model.wrong_guesses.max(0) as u32,
            hints_used: model.hints_used.max(0) as u32,
            duration_ms: model.duration_ms,
            finished_at: model.finished_at.with_timezone(&Utc),
        })
    }

    pub async fn record_game(&self, record: NewGameRecord) -> Result<GameHistoryEntry> {
        let record_model = game_records::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            player_key: Set(record.player_key),
            player_name: Set(record.player_name),
            mode: Set(record.mode.as_str().to_string()),
            word: Set(record.word),
            difficulty: Set(record.difficulty.as_str().to_string()),
            category: Set(record.category),
            won: Set(record.won),
            guesses: Set(record.guesses as i32),
            wrong_guesses: Set(record.wrong_guesses as i32),
            hints_used: Set(record.hints_used as i32),
            duration_ms: Set(record.duration_ms),
            finished_at: Set(record.finished_at.into()),
        };

        let saved = GameRecords::insert(record_model).exec(&self.db).await?;

        // Fetch the stored record
        let stored = GameRecords::find_by_id(saved.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow!("Failed to retrieve stored game record"))?;

        Self::model_to_entry(stored)
    }

    /// Most recent first.
    pub async fn recent_for_player(&self, player_key: &str, limit: u64) -> Result<Vec<GameHistoryEntry>> {
        let models = GameRecords::find()
            .filter(game_records::Column::PlayerKey.eq(player_key))
            .order_by_desc(game_records::Column::FinishedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::model_to_entry).collect()
    }

    pub async fn totals_for_player(&self, player_key: &str) -> Result<PlayerTotals> {
        let models = GameRecords::find()
            .filter(game_records::Column::PlayerKey.eq(player_key))
            .all(&self.db)
            .await?;

        Ok(models.iter().fold(PlayerTotals::default(), |totals, model| PlayerTotals {
            games: totals.games + 1,
            wins: totals.wins + u32::from(model.won),
            total_guesses: totals.total_guesses + model.guesses.max(0) as u32,
            hints_used: totals.hints_used + model.hints_used.max(0) as u32,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use chrono::Duration;
    use migration::{Migrator, MigratorTrait};

    async fn setup_test_db() -> GameRecordRepository {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        GameRecordRepository::new(db)
    }

    fn record(player_key: &str, word: &str, won: bool, finished_at: DateTime<Utc>) -> NewGameRecord {
        NewGameRecord {
            player_key: player_key.to_string(),
            player_name: None,
            mode: GameMode::Single,
            word: word.to_string(),
            difficulty: WordDifficulty::Easy,
            category: "animals".to_string(),
            won,
            guesses: 5,
            wrong_guesses: if won { 2 } else { 7 },
            hints_used: 1,
            duration_ms: 12_000,
            finished_at,
        }
    }

    #[tokio::test]
    async fn test_record_and_read_back() {
        let repo = setup_test_db().await;

        let stored = repo
            .record_game(record("session-1", "CAT", true, Utc::now()))
            .await
            .unwrap();
        assert_eq!(stored.player_key, "session-1");
        assert_eq!(stored.word, "CAT");
        assert_eq!(stored.mode, GameMode::Single);
        assert_eq!(stored.difficulty, WordDifficulty::Easy);
        assert!(stored.won);

        let recent = repo.recent_for_player("session-1", 10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, stored.id);
    }

    #[tokio::test]
    async fn test_recent_is_ordered_and_limited() {
        let repo = setup_test_db().await;
        let now = Utc::now();

        for (i, word) in ["ONE", "TWO", "SIX"].iter().enumerate() {
            let finished_at = now - Duration::minutes(10 - i as i64);
            repo.record_game(record("session-1", word, true, finished_at))
                .await
                .unwrap();
        }
        repo.record_game(record("session-2", "OWL", false, now))
            .await
            .unwrap();

        let recent = repo.recent_for_player("session-1", 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].word, "SIX");
        assert_eq!(recent[1].word, "TWO");
    }

    #[tokio::test]
    async fn test_totals() {
        let repo = setup_test_db().await;
        let now = Utc::now();

        repo.record_game(record("session-1", "CAT", true, now)).await.unwrap();
        repo.record_game(record("session-1", "DOG", false, now)).await.unwrap();
        repo.record_game(record("session-1", "OWL", true, now)).await.unwrap();

        let totals = repo.totals_for_player("session-1").await.unwrap();
        assert_eq!(
            totals,
            PlayerTotals {
                games: 3,
                wins: 2,
                total_guesses: 15,
                hints_used: 3,
            }
        );

        let empty = repo.totals_for_player("nobody").await.unwrap();
        assert_eq!(empty, PlayerTotals::default());
    }
}
