use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameRecords::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameRecords::PlayerKey).string().not_null())
                    .col(ColumnDef::new(GameRecords::PlayerName).string().null())
                    .col(ColumnDef::new(GameRecords::Mode).string().not_null())
                    .col(ColumnDef::new(GameRecords::Word).string().not_null())
                    .col(ColumnDef::new(GameRecords::Difficulty).string().not_null())
                    .col(ColumnDef::new(GameRecords::Category).string().not_null())
                    .col(ColumnDef::new(GameRecords::Won).boolean().not_null())
                    .col(
                        ColumnDef::new(GameRecords::Guesses)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameRecords::WrongGuesses)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameRecords::HintsUsed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameRecords::DurationMs)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameRecords::FinishedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // History lookups are always per player
        manager
            .create_index(
                Index::create()
                    .name("idx_game_records_player_key")
                    .table(GameRecords::Table)
                    .col(GameRecords::PlayerKey)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GameRecords {
    Table,
    Id,
    PlayerKey,
    PlayerName,
    Mode,
    Word,
    Difficulty,
    Category,
    Won,
    Guesses,
    WrongGuesses,
    HintsUsed,
    DurationMs,
    FinishedAt,
}
