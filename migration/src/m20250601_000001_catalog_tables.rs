//! 目录数据表迁移
//!
//! `stores` 与 `coupons` 两张表结构相同：每行保存 `{ id, data }`，
//! `data` 为记录的 JSON 文本。另外创建 `blog_posts` 和 `clicks`。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // stores / coupons
        manager
            .create_table(record_table(
                Stores::Table,
                Stores::Id,
                Stores::Data,
                Stores::CreatedAt,
            ))
            .await?;
        manager
            .create_table(record_table(
                Coupons::Table,
                Coupons::Id,
                Coupons::Data,
                Coupons::CreatedAt,
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPosts::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogPosts::Slug).string_len(255).not_null())
                    .col(ColumnDef::new(BlogPosts::Data).text().not_null())
                    .col(
                        ColumnDef::new(BlogPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // slug 只在创建时做唯一性检查，这里不加 unique 约束
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blog_posts_slug")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::Slug)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clicks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clicks::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clicks::StoreId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Clicks::CreatedAt)
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
                    .name("idx_clicks_store_id")
                    .table(Clicks::Table)
                    .col(Clicks::StoreId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_clicks_store_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clicks::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_blog_posts_slug").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Coupons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stores::Table).to_owned())
            .await
    }
}

fn record_table<T, C>(table: T, id: C, data: C, created_at: C) -> TableCreateStatement
where
    T: IntoIden + 'static,
    C: IntoIden + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(id).string_len(64).not_null().primary_key())
        .col(ColumnDef::new(data).text().not_null())
        .col(
            ColumnDef::new(created_at)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Stores {
    Table,
    Id,
    Data,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Coupons {
    Table,
    Id,
    Data,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    Slug,
    Data,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Clicks {
    Table,
    Id,
    StoreId,
    CreatedAt,
}
