use hangman_types::GameStatistics;

pub struct StatisticsTracker;

impl StatisticsTracker {
    /// Statistics after a won game that took `guesses` letters (hints included).
    pub fn record_win(stats: &GameStatistics, guesses: u32) -> GameStatistics {
        let games_won = stats.games_won + 1;
        let current_streak = stats.current_streak + 1;
        let total_guesses = stats.total_guesses + guesses;

        GameStatistics {
            games_played: stats.games_played + 1,
            games_won,
            current_streak,
            best_streak: stats.best_streak.max(current_streak),
            total_guesses,
            average_guesses_per_win: Self::rounded_average(total_guesses, games_won),
        }
    }

    /// Statistics after a lost game. The best streak is kept.
    pub fn record_loss(stats: &GameStatistics, guesses: u32) -> GameStatistics {
        GameStatistics {
            games_played: stats.games_played + 1,
            current_streak: 0,
            total_guesses: stats.total_guesses + guesses,
            ..stats.clone()
        }
    }

    /// Round half up, zero when nothing was won.
    fn rounded_average(total: u32, count: u32) -> u32 {
        if count == 0 {
            return 0;
        }
        let (total, count) = (u64::from(total), u64::from(count));
        ((2 * total + count) / (2 * count)) as u32
    }
}
