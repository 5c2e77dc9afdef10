use sea_orm_migration::prelude::*;

/// Creates the `review` table.
///
/// Mechanics, categories and recommended player counts are stored as integer
/// bitmasks. Bit positions are owned by the tag catalogue in the API crate and
/// must never be reordered.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Review {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    GameId,
    Title,
    Content,
    OverallScore,
    ComplexityScore,
    LuckFactor,
    InteractionScore,
    DowntimeScore,
    MechanicFlags,
    CategoryFlags,
    RecommendedPlayerFlags,
    IsPublished,
}

#[derive(DeriveIden)]
enum Game {
    Table,
    Id,
}

#[async_trait::async_trait]
#[allow(clippy::too_many_lines)]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Review::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Review::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Review::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Review::GameId).integer().not_null())
                    .col(ColumnDef::new(Review::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Review::Content).text().not_null())
                    .col(ColumnDef::new(Review::OverallScore).double().null())
                    .col(ColumnDef::new(Review::ComplexityScore).double().null())
                    .col(ColumnDef::new(Review::LuckFactor).double().null())
                    .col(ColumnDef::new(Review::InteractionScore).double().null())
                    .col(ColumnDef::new(Review::DowntimeScore).double().null())
                    .col(
                        ColumnDef::new(Review::MechanicFlags)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Review::CategoryFlags)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Review::RecommendedPlayerFlags)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Review::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_game_id")
                            .from(Review::Table, Review::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_game_id")
                    .table(Review::Table)
                    .col(Review::GameId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_is_published")
                    .table(Review::Table)
                    .col(Review::IsPublished)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}
