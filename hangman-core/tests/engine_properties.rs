mod common;

use common::*;
use hangman_core::{
    get_hint, get_two_player_hint, process_guess, process_two_player_guess, resolve_game_status,
};
use hangman_types::{GameState, GameStatus, PlayerSlot, TwoPlayerStatus};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Move {
    Guess(String),
    Hint,
}

fn move_strategy() -> impl Strategy<Value = Move> {
    prop_oneof![
        8 => "[a-zA-Z]".prop_map(Move::Guess),
        1 => "[0-9!?]{0,2}".prop_map(Move::Guess),
        2 => Just(Move::Hint),
    ]
}

fn apply(state: &GameState, mv: &Move) -> GameState {
    match mv {
        Move::Guess(letter) => process_guess(state, letter).unwrap_or_else(|_| state.clone()),
        Move::Hint => get_hint(state).unwrap(),
    }
}

fn all_letters_guessed(state: &GameState) -> bool {
    state.word.chars().all(|c| state.guessed_letters.contains(&c))
}

proptest! {
    #[test]
    fn guessed_letters_only_grow(word in "[A-Z]{1,10}", moves in prop::collection::vec(move_strategy(), 0..40)) {
        let mut state = game_with_word(&word);
        for mv in &moves {
            let next = apply(&state, mv);
            prop_assert!(next.guessed_letters.is_superset(&state.guessed_letters));
            prop_assert!(next.wrong_guesses >= state.wrong_guesses);
            state = next;
        }
    }

    #[test]
    fn status_follows_word_and_misses(word in "[A-Z]{1,10}", moves in prop::collection::vec(move_strategy(), 0..40)) {
        let mut state = game_with_word(&word);
        for mv in &moves {
            state = apply(&state, mv);
            let guessed = all_letters_guessed(&state);
            prop_assert_eq!(state.status == GameStatus::Won, guessed);
            prop_assert_eq!(
                state.status == GameStatus::Lost,
                !guessed && state.wrong_guesses >= state.max_wrong
            );
            prop_assert!(state.wrong_guesses <= state.max_wrong);
            prop_assert_eq!(state.end_time.is_some(), state.status.is_terminal());
        }
    }

    #[test]
    fn finished_games_are_frozen(word in "[A-Z]{1,6}", letter in "[a-zA-Z0-9]{0,2}") {
        let won = play_letters(&game_with_word(&word), &word);
        prop_assert_eq!(won.status, GameStatus::Won);
        prop_assert_eq!(&process_guess(&won, &letter).unwrap(), &won);
        prop_assert_eq!(&get_hint(&won).unwrap(), &won);
    }

    #[test]
    fn repeated_guesses_are_free(word in "[A-Z]{2,10}", letter in "[A-Z]") {
        let state = process_guess(&game_with_word(&word), &letter).unwrap();
        prop_assume!(state.status == GameStatus::Playing);
        let again = process_guess(&state, &letter.to_lowercase()).unwrap();
        prop_assert_eq!(again, state);
    }

    #[test]
    fn streaks_accumulate(wins in 1usize..8) {
        let mut state = game_with_word("CAT");
        for _ in 0..wins {
            state = play_letters(&state, "CAT");
            state = game_with_word_and_stats("CAT", state.statistics.clone());
        }
        let stats = &state.statistics;
        prop_assert_eq!(stats.games_won as usize, wins);
        prop_assert_eq!(stats.current_streak as usize, wins);
        prop_assert!(stats.best_streak as usize >= wins);

        let lost = play_letters(&state, "BDEFGHJ");
        prop_assert_eq!(lost.status, GameStatus::Lost);
        prop_assert_eq!(lost.statistics.current_streak, 0);
        prop_assert_eq!(lost.statistics.best_streak as usize, wins);
        prop_assert!(lost.statistics.games_won <= lost.statistics.games_played);
    }

    #[test]
    fn match_status_matches_players(
        word1 in "[A-Z]{1,6}",
        word2 in "[A-Z]{1,6}",
        moves in prop::collection::vec(move_strategy(), 0..40),
    ) {
        let mut state = match_with_words(&word1, &word2);
        for mv in &moves {
            let before = state.clone();
            state = match mv {
                Move::Guess(letter) => process_two_player_guess(&state, letter).unwrap_or_else(|_| state.clone()),
                Move::Hint => get_two_player_hint(&state).unwrap(),
            };

            if before.game_status.is_terminal() {
                prop_assert_eq!(&state, &before);
                continue;
            }

            prop_assert_eq!(state.game_status, resolve_game_status(&state.player1, &state.player2));
            if state.game_status.is_terminal() {
                prop_assert!(state.end_time.is_some());
                prop_assert!(state.scores.player1 + state.scores.player2 <= 1);
            }
        }
    }

    #[test]
    fn new_letters_pass_the_turn(word1 in "[A-Z]{3,8}", word2 in "[A-Z]{3,8}", letter in "[A-Z]") {
        let state = match_with_words(&word1, &word2);
        let next = process_two_player_guess(&state, &letter).unwrap();
        prop_assume!(next.game_status == TwoPlayerStatus::Playing);
        prop_assert_eq!(next.current_turn, PlayerSlot::Player2);

        let repeat = process_two_player_guess(&next, &letter).unwrap();
        prop_assume!(repeat.game_status == TwoPlayerStatus::Playing);
        // Player 2 has not guessed this letter yet, so it is new for them.
        prop_assert_eq!(repeat.current_turn, PlayerSlot::Player1);

        let invalid = process_two_player_guess(&repeat, "??");
        prop_assert!(invalid.is_err());
    }
}
