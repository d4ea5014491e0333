use async_trait::async_trait;
use hangman_core::GameSummary;
use hangman_persistence::repositories::{GameRecordRepository, NewGameRecord};
use hangman_types::{GameHistoryEntry, GameMode, PlayerTotals};

/// Sink for finished rounds. Sessions and rooms work without one.
#[async_trait]
pub trait GameRecorder: Send + Sync {
    async fn record(&self, record: NewGameRecord) -> anyhow::Result<()>;

    async fn history(
        &self,
        player_key: &str,
        limit: u64,
    ) -> anyhow::Result<(PlayerTotals, Vec<GameHistoryEntry>)>;
}

#[async_trait]
impl GameRecorder for GameRecordRepository {
    async fn record(&self, record: NewGameRecord) -> anyhow::Result<()> {
        self.record_game(record).await.map(|_| ())
    }

    async fn history(
        &self,
        player_key: &str,
        limit: u64,
    ) -> anyhow::Result<(PlayerTotals, Vec<GameHistoryEntry>)> {
        let totals = self.totals_for_player(player_key).await?;
        let entries = self.recent_for_player(player_key, limit).await?;
        Ok((totals, entries))
    }
}

pub fn summary_to_record(
    player_key: &str,
    player_name: Option<&str>,
    mode: GameMode,
    summary: GameSummary,
) -> NewGameRecord {
    NewGameRecord {
        player_key: player_key.to_string(),
        player_name: player_name.map(str::to_string),
        mode,
        word: summary.word,
        difficulty: summary.difficulty,
        category: summary.category,
        won: summary.won,
        guesses: summary.guesses,
        wrong_guesses: summary.wrong_guesses,
        hints_used: summary.hints_used,
        duration_ms: summary.duration_ms,
        finished_at: summary.finished_at,
    }
}
