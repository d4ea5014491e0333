//! Pure Hangman game-state transitions.
//!
//! Every operation takes a state by reference and returns a new state; nothing
//! here performs I/O or keeps state between calls. Hosts must serialize
//! transitions per game (at most one in flight per session or room key),
//! otherwise concurrent guesses against the same prior state lose updates.

mod builtin;
pub mod errors;
pub mod game_state;
pub mod letters;
pub mod statistics;
pub mod two_player;
pub mod views;
pub mod word_selection;

// Re-export main components
pub use errors::*;
pub use game_state::*;
pub use letters::{normalize_letter, unguessed_letters};
pub use statistics::*;
pub use two_player::*;
pub use views::*;
pub use word_selection::*;
