use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VideoGames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoGames::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(VideoGames::Title, 200))
                    .col(string_len(VideoGames::Publisher, 100))
                    .col(string_len(VideoGames::Developer, 100))
                    .col(timestamp_with_time_zone(VideoGames::ReleaseDate))
                    // Stable genre code, see Genre::code
                    .col(integer(VideoGames::Genre))
                    .col(decimal_len(VideoGames::Price, 18, 2))
                    .col(string_len(VideoGames::Description, 2000).default(""))
                    .col(integer(VideoGames::Rating))
                    .col(string_len(VideoGames::CoverImageUrl, 500).default(""))
                    .col(boolean(VideoGames::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(VideoGames::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(VideoGames::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_video_games_title", VideoGames::Title),
            ("idx_video_games_genre", VideoGames::Genre),
            ("idx_video_games_is_active", VideoGames::IsActive),
            ("idx_video_games_created_at", VideoGames::CreatedAt),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(VideoGames::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VideoGames::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VideoGames {
    Table,
    Id,
    Title,
    Publisher,
    Developer,
    ReleaseDate,
    Genre,
    Price,
    Description,
    Rating,
    CoverImageUrl,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
