pub mod game_records;
pub mod prelude;
