use sea_orm_migration::prelude::*;

use crate::m20251019_000001_create_lottery_tables::{Sales, Tickets};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按期次列出彩票
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_tickets_draw")
                    .table(Tickets::Table)
                    .col(Tickets::DrawId)
                    .to_owned(),
            )
            .await?;

        // 客户购票历史
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_tickets_customer")
                    .table(Tickets::Table)
                    .col(Tickets::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_sales_customer")
                    .table(Sales::Table)
                    .col(Sales::CustomerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("ix_sales_customer")
                    .table(Sales::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ix_tickets_customer")
                    .table(Tickets::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ix_tickets_draw")
                    .table(Tickets::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
