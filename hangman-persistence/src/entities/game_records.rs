use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "game_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub player_key: String,
    pub player_name: Option<String>,
    pub mode: String,
    pub word: String,
    pub difficulty: String,
    pub category: String,
    pub won: bool,
    pub guesses: i32,
    pub wrong_guesses: i32,
    pub hints_used: i32,
    pub duration_ms: i64,
    pub finished_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
