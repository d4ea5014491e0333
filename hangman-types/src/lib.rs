pub mod errors;
pub mod game;
pub mod history;
pub mod messages;
pub mod room;
pub mod two_player;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use history::*;
pub use messages::*;
pub use room::*;
pub use two_player::*;

pub type GameId = uuid::Uuid;
pub type RoomId = uuid::Uuid;
