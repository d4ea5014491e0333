use hangman_types::{GameRoom, GameState, GameView, MatchView, PlayerGameState, PlayerView, RoomView, TwoPlayerGameState};

use crate::letters::reveal;

/// Safe projection of a single-player game; the word is hidden until the game ends.
pub fn game_view(state: &GameState) -> GameView {
    GameView {
        id: state.id,
        display_word: reveal(&state.word, &state.guessed_letters),
        word: state.status.is_terminal().then(|| state.word.clone()),
        guessed_letters: state.guessed_letters.iter().copied().collect(),
        wrong_guesses: state.wrong_guesses,
        max_wrong: state.max_wrong,
        remaining_guesses: state.max_wrong.saturating_sub(state.wrong_guesses),
        status: state.status,
        difficulty: state.difficulty,
        category: state.category.clone(),
        hints_used: state.hints_used,
        hints_allowed: state.hints_allowed,
        start_time: state.start_time,
        end_time: state.end_time,
        statistics: state.statistics.clone(),
    }
}

/// Both players see each other's progress; words are revealed once a player
/// is out or the match is over.
pub fn match_view(state: &TwoPlayerGameState) -> MatchView {
    let match_over = state.game_status.is_terminal();
    MatchView {
        id: state.id,
        player1: player_view(&state.player1, match_over),
        player2: player_view(&state.player2, match_over),
        current_turn: state.current_turn,
        game_status: state.game_status,
        round_number: state.round_number,
        scores: state.scores,
        difficulty: state.player1.difficulty,
        category: state.player1.category.clone(),
        start_time: state.start_time,
        end_time: state.end_time,
    }
}

fn player_view(player: &PlayerGameState, match_over: bool) -> PlayerView {
    let revealed = match_over || player.status.is_terminal();
    PlayerView {
        player_id: player.player_id,
        player_name: player.player_name.clone(),
        display_word: reveal(&player.word, &player.guessed_letters),
        word: revealed.then(|| player.word.clone()),
        guessed_letters: player.guessed_letters.iter().copied().collect(),
        wrong_guesses: player.wrong_guesses,
        max_wrong: player.max_wrong,
        status: player.status,
        hints_used: player.hints_used,
        hints_allowed: player.hints_allowed,
    }
}

pub fn room_view(room: &GameRoom) -> RoomView {
    RoomView {
        id: room.id,
        created_at: room.created_at,
        created_by: room.created_by.clone(),
        player1: room.player1.clone(),
        player2: room.player2.clone(),
        game: room.game.as_ref().map(match_view),
        status: room.status,
    }
}
