use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 销售记录实体 (只追加，不更新不删除)
/// 说明:
/// - ticket_id 唯一，一张彩票一生最多被卖一次
/// - price 为售出时彩票价格的快照，之后改价不影响历史记录
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ticket_id: i64,
    pub customer_id: i64,
    pub sold_at: DateTime<Utc>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
