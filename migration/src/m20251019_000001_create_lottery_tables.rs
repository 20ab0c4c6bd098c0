use sea_orm_migration::prelude::*;

/// Draws (抽奖期次)
#[derive(DeriveIden)]
pub(crate) enum Draws {
    Table,
    Id,
    Name,
    DrawDate,
}

/// Customers (客户, email 唯一)
#[derive(DeriveIden)]
pub(crate) enum Customers {
    Table,
    Id,
    Name,
    Email,
}

/// Tickets (彩票, 同一期次内号码唯一)
#[derive(DeriveIden)]
pub(crate) enum Tickets {
    Table,
    Id,
    DrawId,
    Number,
    Price,
    State,
    CustomerId,
}

/// Sales (销售记录, 每张彩票最多一条)
#[derive(DeriveIden)]
pub(crate) enum Sales {
    Table,
    Id,
    TicketId,
    CustomerId,
    SoldAt,
    Price,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 约束说明:
/// - tickets (draw_id, number) 组合唯一: 不同期次可以复用相同编号 (例如每期都有 "0001")
/// - sales.ticket_id 唯一: 并发售票时由数据库裁决, 第二条插入必然失败
/// - customers.email 唯一 (大小写敏感)
/// - 外键均不级联, 删除期次时由应用层在同一事务内先删彩票
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Draws::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Draws::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Draws::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Draws::DrawDate).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Customers::Email).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ux_customers_email")
                    .table(Customers::Table)
                    .col(Customers::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tickets::DrawId).big_integer().not_null())
                    .col(ColumnDef::new(Tickets::Number).string_len(6).not_null())
                    .col(ColumnDef::new(Tickets::Price).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(Tickets::State)
                            .string_len(16)
                            .not_null()
                            .default("AVAILABLE"),
                    )
                    .col(ColumnDef::new(Tickets::CustomerId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_draw")
                            .from(Tickets::Table, Tickets::DrawId)
                            .to(Draws::Table, Draws::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_customer")
                            .from(Tickets::Table, Tickets::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一期次内号码唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ux_tickets_draw_number")
                    .table(Tickets::Table)
                    .col(Tickets::DrawId)
                    .col(Tickets::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sales::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sales::TicketId).big_integer().not_null())
                    .col(ColumnDef::new(Sales::CustomerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Sales::SoldAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sales::Price).decimal_len(12, 2).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_ticket")
                            .from(Sales::Table, Sales::TicketId)
                            .to(Tickets::Table, Tickets::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_customer")
                            .from(Sales::Table, Sales::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 一张彩票只能有一条销售记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ux_sales_ticket")
                    .table(Sales::Table)
                    .col(Sales::TicketId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：销售 -> 彩票 -> 客户 -> 期次
        manager
            .drop_table(Table::drop().if_exists().table(Sales::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Tickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Draws::Table).to_owned())
            .await?;
        Ok(())
    }
}
