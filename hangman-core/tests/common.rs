#![allow(dead_code)]

use hangman_core::{
    WordCatalog, WordCategory, create_game_with_word, create_two_player_game_with_words,
    process_guess, process_two_player_guess,
};
use hangman_types::{GameState, GameStatistics, TwoPlayerGameState, WordDifficulty};

/// A small category with known words for predictable testing
pub fn create_test_category() -> WordCategory {
    WordCategory::from_word_list(
        "testing",
        "[easy]\ncat\ndog\nowl\n[medium]\nrabbit\nturtle\n[hard]\nquizzical\n",
    )
    .unwrap()
}

pub fn create_test_catalog() -> WordCatalog {
    WordCatalog::new(vec![create_test_category()], "testing").unwrap()
}

/// Creates a fresh single-player game for a specific word
pub fn game_with_word(word: &str) -> GameState {
    game_with_word_and_stats(word, GameStatistics::default())
}

pub fn game_with_word_and_stats(word: &str, statistics: GameStatistics) -> GameState {
    create_game_with_word(word, WordDifficulty::Easy, "testing", 2, statistics).unwrap()
}

/// Applies each letter in order, panicking on invalid input
pub fn play_letters(state: &GameState, letters: &str) -> GameState {
    letters.chars().fold(state.clone(), |s, c| {
        process_guess(&s, &c.to_string()).unwrap()
    })
}

/// Creates a match with a known word for each player
pub fn match_with_words(word1: &str, word2: &str) -> TwoPlayerGameState {
    create_two_player_game_with_words(
        ("Alice", word1),
        ("Bob", word2),
        WordDifficulty::Easy,
        "testing",
        1,
    )
    .unwrap()
}

pub fn play_match(state: &TwoPlayerGameState, letters: &str) -> TwoPlayerGameState {
    letters.chars().fold(state.clone(), |s, c| {
        process_two_player_guess(&s, &c.to_string()).unwrap()
    })
}
