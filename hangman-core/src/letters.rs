use std::collections::BTreeSet;

use hangman_types::GameStatus;

use crate::{EngineError, EngineResult};

/// Normalize a free-form guess to a single uppercase letter A-Z.
pub fn normalize_letter(input: &str) -> EngineResult<char> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(EngineError::InvalidLetter(input.to_string())),
    }
}

/// Non-empty and ASCII letters only.
pub fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn unique_letters(word: &str) -> BTreeSet<char> {
    word.chars().collect()
}

pub fn is_word_guessed(word: &str, guessed: &BTreeSet<char>) -> bool {
    word.chars().all(|c| guessed.contains(&c))
}

/// Letters of the word not yet guessed, in alphabetical order.
pub fn unguessed_letters(word: &str, guessed: &BTreeSet<char>) -> Vec<char> {
    unique_letters(word)
        .into_iter()
        .filter(|c| !guessed.contains(c))
        .collect()
}

pub fn derive_status(word: &str, guessed: &BTreeSet<char>, wrong_guesses: u32, max_wrong: u32) -> GameStatus {
    if is_word_guessed(word, guessed) {
        GameStatus::Won
    } else if wrong_guesses >= max_wrong {
        GameStatus::Lost
    } else {
        GameStatus::Playing
    }
}

pub fn reveal(word: &str, guessed: &BTreeSet<char>) -> Vec<Option<char>> {
    word.chars()
        .map(|c| guessed.contains(&c).then_some(c))
        .collect()
}

/// Outcome of applying one new letter to a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LetterOutcome {
    pub guessed_letters: BTreeSet<char>,
    pub wrong_guesses: u32,
    pub status: GameStatus,
}

/// Shared transition for single-player games and each half of a match.
/// Returns `None` when the letter was already guessed.
pub(crate) fn apply_letter(
    word: &str,
    guessed: &BTreeSet<char>,
    wrong_guesses: u32,
    max_wrong: u32,
    letter: char,
) -> Option<LetterOutcome> {
    if guessed.contains(&letter) {
        return None;
    }

    let mut guessed_letters = guessed.clone();
    guessed_letters.insert(letter);

    let wrong_guesses = if word.contains(letter) {
        wrong_guesses
    } else {
        wrong_guesses + 1
    };

    let status = derive_status(word, &guessed_letters, wrong_guesses, max_wrong);
    Some(LetterOutcome {
        guessed_letters,
        wrong_guesses,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_letter() {
        assert_eq!(normalize_letter("a"), Ok('A'));
        assert_eq!(normalize_letter("Z"), Ok('Z'));
        assert_eq!(normalize_letter(" q\n"), Ok('Q'));
    }

    #[test]
    fn test_normalize_letter_rejects_non_letters() {
        for input in ["", " ", "ab", "1", "!", "é", "a b", "AA"] {
            assert_eq!(
                normalize_letter(input),
                Err(EngineError::InvalidLetter(input.to_string())),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_valid_words() {
        assert!(is_valid_word("HELLO"));
        assert!(is_valid_word("hello"));
        assert!(!is_valid_word(""));
        assert!(!is_valid_word("ICE CREAM"));
        assert!(!is_valid_word("CAFÉ"));
    }

    #[test]
    fn test_word_guessed_ignores_repeats() {
        let guessed: BTreeSet<char> = ['L', 'E', 'V'].into_iter().collect();
        assert!(is_word_guessed("LEVEL", &guessed));
        assert!(!is_word_guessed("LEVER", &guessed));
    }

    #[test]
    fn test_unguessed_letters() {
        let guessed: BTreeSet<char> = ['A'].into_iter().collect();
        assert_eq!(unguessed_letters("BANANA", &guessed), vec!['B', 'N']);
    }

    #[test]
    fn test_reveal() {
        let guessed: BTreeSet<char> = ['C', 'T'].into_iter().collect();
        assert_eq!(reveal("CAT", &guessed), vec![Some('C'), None, Some('T')]);
    }

    #[test]
    fn test_apply_letter() {
        let empty = BTreeSet::new();

        let hit = apply_letter("CAT", &empty, 0, 7, 'A').unwrap();
        assert_eq!(hit.wrong_guesses, 0);
        assert_eq!(hit.status, GameStatus::Playing);
        assert!(empty.is_empty());

        let miss = apply_letter("CAT", &hit.guessed_letters, 6, 7, 'X').unwrap();
        assert_eq!(miss.wrong_guesses, 7);
        assert_eq!(miss.status, GameStatus::Lost);

        assert!(apply_letter("CAT", &hit.guessed_letters, 0, 7, 'A').is_none());
    }

    #[test]
    fn test_win_beats_loss_threshold() {
        let guessed: BTreeSet<char> = ['C', 'A', 'T'].into_iter().collect();
        assert_eq!(derive_status("CAT", &guessed, 7, 7), GameStatus::Won);
    }
}
