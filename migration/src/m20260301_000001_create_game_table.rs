use sea_orm_migration::prelude::*;

/// Creates the `game` table holding the board game catalogue.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Game {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    Name,
    JapaneseName,
    ImageUrl,
    MinPlayers,
    MaxPlayers,
    PlayingTime,
    YearPublished,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Game::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Game::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Game::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Game::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Game::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Game::JapaneseName).string_len(255).null())
                    .col(ColumnDef::new(Game::ImageUrl).string_len(500).null())
                    .col(ColumnDef::new(Game::MinPlayers).integer().null())
                    .col(ColumnDef::new(Game::MaxPlayers).integer().null())
                    .col(ColumnDef::new(Game::PlayingTime).integer().null())
                    .col(ColumnDef::new(Game::YearPublished).integer().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Game::Table).to_owned())
            .await
    }
}
