use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `portfolio_items` table and its columns.
#[derive(DeriveIden)]
enum PortfolioItems {
    Table,
    Id,
    Title,
    Description,
    Category,
    ImageFilename,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PortfolioItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PortfolioItems::Title).string().not_null())
                    .col(
                        ColumnDef::new(PortfolioItems::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PortfolioItems::Category).string().not_null())
                    .col(
                        ColumnDef::new(PortfolioItems::ImageFilename)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The replace-on-write path looks items up by category on every
        // mutation, so keep that lookup indexed.
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_items_category")
                    .table(PortfolioItems::Table)
                    .col(PortfolioItems::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortfolioItems::Table).to_owned())
            .await
    }
}
