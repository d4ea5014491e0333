use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use hangman_types::{GameState, GameStatistics, GameStatus, MAX_WRONG_GUESSES, WordDifficulty};
use rand::Rng;
use rand::seq::IndexedRandom;
use uuid::Uuid;

use crate::letters::{apply_letter, is_valid_word, normalize_letter, reveal, unguessed_letters};
use crate::word_selection::select_random_word;
use crate::{EngineError, EngineResult, StatisticsTracker, WordCategory};

/// Start a fresh single-player game with zeroed statistics.
pub fn create_game(
    difficulty: WordDifficulty,
    category: &WordCategory,
    hints_allowed: u32,
) -> EngineResult<GameState> {
    create_game_with_statistics(difficulty, category, hints_allowed, GameStatistics::default())
}

/// Start the next game of a session, carrying the session's statistics forward.
pub fn create_game_with_statistics(
    difficulty: WordDifficulty,
    category: &WordCategory,
    hints_allowed: u32,
    statistics: GameStatistics,
) -> EngineResult<GameState> {
    let word = select_random_word(difficulty, category)?;
    create_game_with_word(&word, difficulty, category.name(), hints_allowed, statistics)
}

/// Start a game with a caller-chosen word.
pub fn create_game_with_word(
    word: &str,
    difficulty: WordDifficulty,
    category: &str,
    hints_allowed: u32,
    statistics: GameStatistics,
) -> EngineResult<GameState> {
    let word = word.trim().to_ascii_uppercase();
    if !is_valid_word(&word) {
        return Err(EngineError::InvalidWordList {
            category: category.to_string(),
            line: 0,
            reason: format!("'{}' must contain only letters A-Z", word),
        });
    }

    Ok(GameState {
        id: Uuid::new_v4(),
        word,
        guessed_letters: BTreeSet::new(),
        wrong_guesses: 0,
        max_wrong: MAX_WRONG_GUESSES,
        status: GameStatus::Playing,
        difficulty,
        category: category.to_string(),
        hints_used: 0,
        hints_allowed,
        start_time: Utc::now(),
        end_time: None,
        statistics,
    })
}

/// Apply a guessed letter.
///
/// Guesses on a finished game and repeated letters return the state unchanged.
/// Anything that does not normalize to a single letter A-Z is an error.
pub fn process_guess(state: &GameState, letter: &str) -> EngineResult<GameState> {
    if state.status.is_terminal() {
        return Ok(state.clone());
    }

    let letter = normalize_letter(letter)?;
    let Some(outcome) = apply_letter(
        &state.word,
        &state.guessed_letters,
        state.wrong_guesses,
        state.max_wrong,
        letter,
    ) else {
        return Ok(state.clone());
    };

    Ok(finish_transition(
        state,
        outcome.guessed_letters,
        outcome.wrong_guesses,
        state.hints_used,
        outcome.status,
    ))
}

/// Reveal one random unguessed letter, if hints remain.
pub fn get_hint(state: &GameState) -> EngineResult<GameState> {
    get_hint_with_rng(state, &mut rand::rng())
}

pub fn get_hint_with_rng<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> EngineResult<GameState> {
    if state.status.is_terminal() || state.hints_used >= state.hints_allowed {
        return Ok(state.clone());
    }

    let candidates = unguessed_letters(&state.word, &state.guessed_letters);
    let Some(&letter) = candidates.choose(rng) else {
        return Ok(state.clone());
    };

    // A revealed letter is always in the word, so this never adds a wrong guess.
    let Some(outcome) = apply_letter(
        &state.word,
        &state.guessed_letters,
        state.wrong_guesses,
        state.max_wrong,
        letter,
    ) else {
        return Ok(state.clone());
    };

    Ok(finish_transition(
        state,
        outcome.guessed_letters,
        outcome.wrong_guesses,
        state.hints_used + 1,
        outcome.status,
    ))
}

fn finish_transition(
    state: &GameState,
    guessed_letters: BTreeSet<char>,
    wrong_guesses: u32,
    hints_used: u32,
    status: GameStatus,
) -> GameState {
    let guesses = guessed_letters.len() as u32;
    let (statistics, end_time) = match status {
        GameStatus::Playing => (state.statistics.clone(), None),
        GameStatus::Won => (
            StatisticsTracker::record_win(&state.statistics, guesses),
            Some(Utc::now()),
        ),
        GameStatus::Lost => (
            StatisticsTracker::record_loss(&state.statistics, guesses),
            Some(Utc::now()),
        ),
    };

    GameState {
        guessed_letters,
        wrong_guesses,
        hints_used,
        status,
        end_time,
        statistics,
        ..state.clone()
    }
}

/// Each letter of the word, or `None` where it is still hidden.
pub fn display_word(state: &GameState) -> Vec<Option<char>> {
    reveal(&state.word, &state.guessed_letters)
}

/// What a host needs to record about a finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub won: bool,
    pub word: String,
    pub difficulty: WordDifficulty,
    pub category: String,
    pub guesses: u32,
    pub wrong_guesses: u32,
    pub hints_used: u32,
    pub duration_ms: i64,
    pub finished_at: DateTime<Utc>,
}

/// `None` while the game is still being played.
pub fn game_summary(state: &GameState) -> Option<GameSummary> {
    let finished_at = state.end_time?;
    Some(GameSummary {
        won: state.status == GameStatus::Won,
        word: state.word.clone(),
        difficulty: state.difficulty,
        category: state.category.clone(),
        guesses: state.guessed_letters.len() as u32,
        wrong_guesses: state.wrong_guesses,
        hints_used: state.hints_used,
        duration_ms: (finished_at - state.start_time).num_milliseconds(),
        finished_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game(word: &str, hints_allowed: u32) -> GameState {
        create_game_with_word(
            word,
            WordDifficulty::Easy,
            "animals",
            hints_allowed,
            GameStatistics::default(),
        )
        .unwrap()
    }

    fn play(state: &GameState, letters: &[&str]) -> GameState {
        letters
            .iter()
            .fold(state.clone(), |s, l| process_guess(&s, l).unwrap())
    }

    #[test]
    fn test_create_game() {
        let category = WordCategory::new("pets")
            .with_words(WordDifficulty::Easy, ["CAT", "DOG"])
            .unwrap();
        let state = create_game(WordDifficulty::Easy, &category, 2).unwrap();

        assert!(["CAT", "DOG"].contains(&state.word.as_str()));
        assert!(state.guessed_letters.is_empty());
        assert_eq!(state.wrong_guesses, 0);
        assert_eq!(state.max_wrong, 7);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.hints_used, 0);
        assert_eq!(state.hints_allowed, 2);
        assert_eq!(state.category, "pets");
        assert!(state.end_time.is_none());
        assert_eq!(state.statistics, GameStatistics::default());
    }

    #[test]
    fn test_create_game_propagates_missing_words() {
        let category = WordCategory::new("empty");
        let result = create_game(WordDifficulty::Hard, &category, 0);
        assert!(matches!(result, Err(EngineError::NoWordsAvailable { .. })));
    }

    #[test]
    fn test_create_game_with_word_rejects_bad_words() {
        let result = create_game_with_word("no way", WordDifficulty::Easy, "x", 0, GameStatistics::default());
        assert!(result.is_err());

        let state = create_game_with_word("cat", WordDifficulty::Easy, "x", 0, GameStatistics::default()).unwrap();
        assert_eq!(state.word, "CAT");
    }

    #[test]
    fn test_winning_sequence() {
        let state = game("CAT", 0);

        let after_c = process_guess(&state, "c").unwrap();
        assert_eq!(after_c.status, GameStatus::Playing);
        assert_eq!(after_c.wrong_guesses, 0);

        let after_a = process_guess(&after_c, "A").unwrap();
        assert_eq!(after_a.status, GameStatus::Playing);

        let after_t = process_guess(&after_a, "T").unwrap();
        assert_eq!(after_t.status, GameStatus::Won);
        assert!(after_t.end_time.is_some());
        assert_eq!(after_t.statistics.games_won, 1);
        assert_eq!(after_t.statistics.games_played, 1);
        assert_eq!(after_t.statistics.total_guesses, 3);
        assert_eq!(after_t.statistics.average_guesses_per_win, 3);
    }

    #[test]
    fn test_losing_sequence() {
        let state = play(&game("CAT", 0), &["X", "Y", "Z", "Q", "W", "E"]);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.wrong_guesses, 6);

        let state = process_guess(&state, "R").unwrap();
        assert_eq!(state.status, GameStatus::Lost);
        assert_eq!(state.wrong_guesses, 7);
        assert!(state.end_time.is_some());
        assert_eq!(state.statistics.games_played, 1);
        assert_eq!(state.statistics.games_won, 0);
        assert_eq!(state.statistics.current_streak, 0);
        assert_eq!(state.statistics.total_guesses, 7);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let state = game("CAT", 0);
        let snapshot = state.clone();
        let next = process_guess(&state, "C").unwrap();
        assert_eq!(state, snapshot);
        assert_ne!(next, snapshot);
    }

    #[test]
    fn test_duplicate_guess_is_free() {
        let state = process_guess(&game("CAT", 0), "X").unwrap();
        let again = process_guess(&state, "x").unwrap();
        assert_eq!(again, state);
        assert_eq!(again.wrong_guesses, 1);
    }

    #[test]
    fn test_invalid_letter_is_error() {
        let state = game("CAT", 0);
        assert_eq!(
            process_guess(&state, "ab"),
            Err(EngineError::InvalidLetter("ab".to_string()))
        );
        assert!(process_guess(&state, "7").is_err());
        assert!(process_guess(&state, "").is_err());
    }

    #[test]
    fn test_finished_game_ignores_guesses() {
        let won = play(&game("CAT", 0), &["C", "A", "T"]);
        assert_eq!(process_guess(&won, "Z").unwrap(), won);
        // Terminal check happens before validation.
        assert_eq!(process_guess(&won, "not a letter").unwrap(), won);
    }

    #[test]
    fn test_hint_reveals_letter() {
        let state = game("CAT", 1);
        let mut rng = StdRng::seed_from_u64(3);
        let hinted = get_hint_with_rng(&state, &mut rng).unwrap();

        assert_eq!(hinted.hints_used, 1);
        assert_eq!(hinted.guessed_letters.len(), 1);
        let letter = *hinted.guessed_letters.iter().next().unwrap();
        assert!("CAT".contains(letter));
        assert_eq!(hinted.wrong_guesses, 0);
        assert_eq!(hinted.status, GameStatus::Playing);
    }

    #[test]
    fn test_hint_exhausted_is_noop() {
        let state = get_hint(&game("CAT", 1)).unwrap();
        assert_eq!(state.hints_used, 1);
        let again = get_hint(&state).unwrap();
        assert_eq!(again, state);
        assert_eq!(again.hints_used, 1);
    }

    #[test]
    fn test_hint_on_finished_game_is_noop() {
        let lost = play(&game("CAT", 3), &["X", "Y", "Z", "Q", "W", "E", "R"]);
        assert_eq!(get_hint(&lost).unwrap(), lost);
    }

    #[test]
    fn test_hint_can_win() {
        let state = play(&game("CAT", 1), &["C", "A", "Z"]);
        let won = get_hint(&state).unwrap();
        assert_eq!(won.status, GameStatus::Won);
        assert!(won.guessed_letters.contains(&'T'));
        assert_eq!(won.hints_used, 1);
        assert_eq!(won.statistics.games_won, 1);
        assert_eq!(won.statistics.total_guesses, 4);
        assert!(won.end_time.is_some());
    }

    #[test]
    fn test_hint_never_loses() {
        let state = play(&game("CAT", 1), &["X", "Y", "Z", "Q", "W", "E"]);
        assert_eq!(state.wrong_guesses, 6);
        let hinted = get_hint(&state).unwrap();
        assert_eq!(hinted.wrong_guesses, 6);
        assert_eq!(hinted.status, GameStatus::Playing);
    }

    #[test]
    fn test_display_word() {
        let state = play(&game("LEVEL", 0), &["L"]);
        assert_eq!(
            display_word(&state),
            vec![Some('L'), None, None, None, Some('L')]
        );
    }

    #[test]
    fn test_statistics_carry_over() {
        let won = play(&game("CAT", 0), &["C", "A", "T"]);
        let next = create_game_with_word(
            "DOG",
            WordDifficulty::Easy,
            "animals",
            0,
            won.statistics.clone(),
        )
        .unwrap();
        let won_again = play(&next, &["D", "O", "G"]);
        assert_eq!(won_again.statistics.games_won, 2);
        assert_eq!(won_again.statistics.current_streak, 2);
        assert_eq!(won_again.statistics.best_streak, 2);
    }

    #[test]
    fn test_summary_only_for_finished_games() {
        let state = game("CAT", 0);
        assert!(game_summary(&state).is_none());

        let won = play(&state, &["C", "X", "A", "T"]);
        let summary = game_summary(&won).unwrap();
        assert!(summary.won);
        assert_eq!(summary.word, "CAT");
        assert_eq!(summary.guesses, 4);
        assert_eq!(summary.wrong_guesses, 1);
        assert_eq!(summary.hints_used, 0);
        assert!(summary.duration_ms >= 0);
    }
}
