use std::collections::BTreeSet;

use chrono::Utc;
use hangman_types::{
    GameStatus, MAX_WRONG_GUESSES, PlayerGameState, PlayerSlot, Scores, TwoPlayerGameState,
    TwoPlayerStatus, WordDifficulty,
};
use rand::Rng;
use rand::seq::IndexedRandom;
use uuid::Uuid;

use crate::game_state::GameSummary;
use crate::letters::{LetterOutcome, apply_letter, is_valid_word, normalize_letter, unguessed_letters};
use crate::word_selection::select_random_word;
use crate::{EngineError, EngineResult, WordCategory};

/// Start a match. Each player gets an independently drawn word.
pub fn create_two_player_game(
    player1_name: &str,
    player2_name: &str,
    difficulty: WordDifficulty,
    category: &WordCategory,
    hints_allowed: u32,
) -> EngineResult<TwoPlayerGameState> {
    let word1 = select_random_word(difficulty, category)?;
    let word2 = select_random_word(difficulty, category)?;
    create_two_player_game_with_words(
        (player1_name, &word1),
        (player2_name, &word2),
        difficulty,
        category.name(),
        hints_allowed,
    )
}

/// Start a match with caller-chosen words, given as `(name, word)` per player.
pub fn create_two_player_game_with_words(
    player1: (&str, &str),
    player2: (&str, &str),
    difficulty: WordDifficulty,
    category: &str,
    hints_allowed: u32,
) -> EngineResult<TwoPlayerGameState> {
    let player1 = new_player(PlayerSlot::Player1, player1, difficulty, category, hints_allowed)?;
    let player2 = new_player(PlayerSlot::Player2, player2, difficulty, category, hints_allowed)?;

    Ok(TwoPlayerGameState {
        id: Uuid::new_v4(),
        start_time: player1.start_time,
        player1,
        player2,
        current_turn: PlayerSlot::Player1,
        game_status: TwoPlayerStatus::Playing,
        round_number: 1,
        scores: Scores::default(),
        end_time: None,
    })
}

fn new_player(
    slot: PlayerSlot,
    (name, word): (&str, &str),
    difficulty: WordDifficulty,
    category: &str,
    hints_allowed: u32,
) -> EngineResult<PlayerGameState> {
    let word = word.trim().to_ascii_uppercase();
    if !is_valid_word(&word) {
        return Err(EngineError::InvalidWordList {
            category: category.to_string(),
            line: 0,
            reason: format!("'{}' must contain only letters A-Z", word),
        });
    }

    Ok(PlayerGameState {
        player_id: slot,
        player_name: name.trim().to_string(),
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
    })
}

/// The match outcome as a function of the two players' statuses.
pub fn resolve_game_status(player1: &PlayerGameState, player2: &PlayerGameState) -> TwoPlayerStatus {
    use GameStatus::{Lost, Playing, Won};

    match (player1.status, player2.status) {
        (Won, Won) => TwoPlayerStatus::GameOver,
        (Won, _) => TwoPlayerStatus::Player1Won,
        (_, Won) => TwoPlayerStatus::Player2Won,
        (Lost, Lost) => TwoPlayerStatus::BothLost,
        // One player is out, the other keeps going.
        (Lost, Playing) | (Playing, Lost) => TwoPlayerStatus::Playing,
        (Playing, Playing) => TwoPlayerStatus::Playing,
    }
}

/// Apply a guess for whichever player holds the turn.
pub fn process_two_player_guess(
    state: &TwoPlayerGameState,
    letter: &str,
) -> EngineResult<TwoPlayerGameState> {
    if state.game_status.is_terminal() {
        return Ok(state.clone());
    }

    let current = state.player(state.current_turn);
    let updated = player_guess(current, letter)?;
    Ok(advance(state, updated, true))
}

/// Reveal a letter for the player holding the turn. Does not pass the turn.
pub fn get_two_player_hint(state: &TwoPlayerGameState) -> EngineResult<TwoPlayerGameState> {
    get_two_player_hint_with_rng(state, &mut rand::rng())
}

pub fn get_two_player_hint_with_rng<R: Rng + ?Sized>(
    state: &TwoPlayerGameState,
    rng: &mut R,
) -> EngineResult<TwoPlayerGameState> {
    if state.game_status.is_terminal() {
        return Ok(state.clone());
    }

    let updated = player_hint(state.player(state.current_turn), rng);
    Ok(advance(state, updated, false))
}

/// Begin the next round of a finished match with fresh words. Scores carry
/// over; odd rounds open with player 1, even rounds with player 2.
pub fn start_next_round(
    state: &TwoPlayerGameState,
    difficulty: WordDifficulty,
    category: &WordCategory,
) -> EngineResult<TwoPlayerGameState> {
    if !state.game_status.is_terminal() {
        return Err(EngineError::RoundInProgress(state.round_number));
    }

    let fresh = create_two_player_game(
        &state.player1.player_name,
        &state.player2.player_name,
        difficulty,
        category,
        state.player1.hints_allowed,
    )?;

    let round_number = state.round_number + 1;
    let current_turn = if round_number % 2 == 1 {
        PlayerSlot::Player1
    } else {
        PlayerSlot::Player2
    };

    Ok(TwoPlayerGameState {
        id: state.id,
        current_turn,
        round_number,
        scores: state.scores,
        ..fresh
    })
}

fn player_guess(player: &PlayerGameState, letter: &str) -> EngineResult<PlayerGameState> {
    if player.status.is_terminal() {
        return Ok(player.clone());
    }

    let letter = normalize_letter(letter)?;
    Ok(match apply_letter(
        &player.word,
        &player.guessed_letters,
        player.wrong_guesses,
        player.max_wrong,
        letter,
    ) {
        Some(outcome) => with_outcome(player, outcome, player.hints_used),
        None => player.clone(),
    })
}

fn player_hint<R: Rng + ?Sized>(player: &PlayerGameState, rng: &mut R) -> PlayerGameState {
    if player.status.is_terminal() || player.hints_used >= player.hints_allowed {
        return player.clone();
    }

    let candidates = unguessed_letters(&player.word, &player.guessed_letters);
    let outcome = candidates.choose(rng).and_then(|&letter| {
        apply_letter(
            &player.word,
            &player.guessed_letters,
            player.wrong_guesses,
            player.max_wrong,
            letter,
        )
    });

    match outcome {
        Some(outcome) => with_outcome(player, outcome, player.hints_used + 1),
        None => player.clone(),
    }
}

fn with_outcome(player: &PlayerGameState, outcome: LetterOutcome, hints_used: u32) -> PlayerGameState {
    let end_time = outcome.status.is_terminal().then(Utc::now);
    PlayerGameState {
        guessed_letters: outcome.guessed_letters,
        wrong_guesses: outcome.wrong_guesses,
        status: outcome.status,
        hints_used,
        end_time,
        ..player.clone()
    }
}

/// Fold an updated player back into the match and resolve status, turn and score.
fn advance(
    state: &TwoPlayerGameState,
    updated: PlayerGameState,
    passes_turn: bool,
) -> TwoPlayerGameState {
    let slot = state.current_turn;
    let grew = updated.guessed_letters.len() > state.player(slot).guessed_letters.len();

    let mut next = state.clone();
    match slot {
        PlayerSlot::Player1 => next.player1 = updated,
        PlayerSlot::Player2 => next.player2 = updated,
    }

    next.game_status = resolve_game_status(&next.player1, &next.player2);

    if next.game_status == TwoPlayerStatus::Playing {
        // Only a new letter passes the turn, and only to an opponent still in the round.
        let opponent = slot.other();
        if passes_turn && grew && next.player(opponent).status == GameStatus::Playing {
            next.current_turn = opponent;
        }
    } else {
        next.end_time = Some(Utc::now());
        match next.game_status.winner() {
            Some(PlayerSlot::Player1) => next.scores.player1 += 1,
            Some(PlayerSlot::Player2) => next.scores.player2 += 1,
            None => {}
        }
    }

    next
}

/// Round summary for one player of a match, once that player is done.
pub fn player_summary(player: &PlayerGameState) -> Option<GameSummary> {
    let finished_at = player.end_time?;
    Some(GameSummary {
        won: player.status == GameStatus::Won,
        word: player.word.clone(),
        difficulty: player.difficulty,
        category: player.category.clone(),
        guesses: player.guessed_letters.len() as u32,
        wrong_guesses: player.wrong_guesses,
        hints_used: player.hints_used,
        duration_ms: (finished_at - player.start_time).num_milliseconds(),
        finished_at,
    })
}
