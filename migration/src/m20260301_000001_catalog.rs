use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Product::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Product::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Product::Name).string().not_null())
                    .col(ColumnDef::new(Product::NameLocales).text().null())
                    .col(ColumnDef::new(Product::Description).text().not_null())
                    .col(ColumnDef::new(Product::DescriptionLocales).text().null())
                    .col(ColumnDef::new(Product::Category).string().not_null())
                    .col(ColumnDef::new(Product::SubCategory).string().null())
                    .col(ColumnDef::new(Product::BrandSlug).string().null())
                    .col(ColumnDef::new(Product::ImageUrl).text().null())
                    .col(ColumnDef::new(Product::Gallery).text().null())
                    .col(ColumnDef::new(Product::EnStandards).text().null())
                    .col(ColumnDef::new(Product::Sizes).text().null())
                    .col(ColumnDef::new(Product::WorkEnvironments).text().null())
                    .col(ColumnDef::new(Product::FeaturesLocales).text().null())
                    .col(ColumnDef::new(Product::Safety).text().null())
                    .col(ColumnDef::new(Product::Clothing).text().null())
                    .col(ColumnDef::new(Product::Flags).text().null())
                    .col(
                        ColumnDef::new(Product::Published)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Product::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Product::UpdatedAt)
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
                    .name("idx_products_category")
                    .table(Product::Table)
                    .col(Product::Category)
                    .col(Product::SubCategory)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Brand::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Brand::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Brand::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Brand::Name).string().not_null())
                    .col(ColumnDef::new(Brand::Description).text().not_null())
                    .col(ColumnDef::new(Brand::DescriptionLocales).text().null())
                    .col(ColumnDef::new(Brand::LogoUrl).text().null())
                    .col(ColumnDef::new(Brand::Website).text().null())
                    .col(
                        ColumnDef::new(Brand::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Brand::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Brand::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_products_category").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Brand::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product {
    #[sea_orm(iden = "products")]
    Table,
    Id,
    Slug,
    Name,
    NameLocales,
    Description,
    DescriptionLocales,
    Category,
    SubCategory,
    BrandSlug,
    ImageUrl,
    Gallery,
    EnStandards,
    Sizes,
    WorkEnvironments,
    FeaturesLocales,
    Safety,
    Clothing,
    Flags,
    Published,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Brand {
    #[sea_orm(iden = "brands")]
    Table,
    Id,
    Slug,
    Name,
    Description,
    DescriptionLocales,
    LogoUrl,
    Website,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}
