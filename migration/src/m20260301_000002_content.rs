use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Post::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Post::Kind).string().not_null())
                    .col(ColumnDef::new(Post::Slug).string().not_null())
                    .col(ColumnDef::new(Post::Title).string().not_null())
                    .col(ColumnDef::new(Post::TitleLocales).text().null())
                    .col(ColumnDef::new(Post::Summary).text().not_null())
                    .col(ColumnDef::new(Post::SummaryLocales).text().null())
                    .col(ColumnDef::new(Post::Body).text().not_null())
                    .col(ColumnDef::new(Post::BodyLocales).text().null())
                    .col(ColumnDef::new(Post::ImageUrl).text().null())
                    .col(ColumnDef::new(Post::TagsLocales).text().null())
                    .col(ColumnDef::new(Post::Details).text().null())
                    .col(
                        ColumnDef::new(Post::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Post::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Post::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Post::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // slug 在同一内容类型内唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_posts_kind_slug")
                    .table(Post::Table)
                    .col(Post::Kind)
                    .col(Post::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PpeCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PpeCategory::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PpeCategory::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PpeCategory::Title).string().not_null())
                    .col(ColumnDef::new(PpeCategory::TitleLocales).text().null())
                    .col(ColumnDef::new(PpeCategory::Description).text().not_null())
                    .col(ColumnDef::new(PpeCategory::DescriptionLocales).text().null())
                    .col(ColumnDef::new(PpeCategory::ImageUrl).text().null())
                    .col(
                        ColumnDef::new(PpeCategory::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PpeCategory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PpeCategory::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PpeSection::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PpeSection::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PpeSection::CategoryId).string().not_null())
                    .col(ColumnDef::new(PpeSection::Title).string().not_null())
                    .col(ColumnDef::new(PpeSection::TitleLocales).text().null())
                    .col(ColumnDef::new(PpeSection::Body).text().not_null())
                    .col(ColumnDef::new(PpeSection::BodyLocales).text().null())
                    .col(
                        ColumnDef::new(PpeSection::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PpeSection::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PpeSection::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ppe_sections_category")
                    .table(PpeSection::Table)
                    .col(PpeSection::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_ppe_sections_category").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PpeSection::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PpeCategory::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_posts_kind_slug").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Post {
    #[sea_orm(iden = "posts")]
    Table,
    Id,
    Kind,
    Slug,
    Title,
    TitleLocales,
    Summary,
    SummaryLocales,
    Body,
    BodyLocales,
    ImageUrl,
    TagsLocales,
    Details,
    Published,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PpeCategory {
    #[sea_orm(iden = "ppe_categories")]
    Table,
    Id,
    Slug,
    Title,
    TitleLocales,
    Description,
    DescriptionLocales,
    ImageUrl,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PpeSection {
    #[sea_orm(iden = "ppe_sections")]
    Table,
    Id,
    CategoryId,
    Title,
    TitleLocales,
    Body,
    BodyLocales,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}
