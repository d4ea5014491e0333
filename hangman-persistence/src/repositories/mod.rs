pub mod game_record_repository;

pub use game_record_repository::{GameRecordRepository, NewGameRecord};
