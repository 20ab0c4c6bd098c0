use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 彩票生命周期: AVAILABLE -> SOLD，只发生一次且不可逆
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketState {
    #[sea_orm(string_value = "AVAILABLE")]
    Available,
    #[sea_orm(string_value = "SOLD")]
    Sold,
}

impl std::fmt::Display for TicketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketState::Available => write!(f, "AVAILABLE"),
            TicketState::Sold => write!(f, "SOLD"),
        }
    }
}

/// 彩票实体
/// 说明:
/// - (draw_id, number) 组合唯一
/// - customer_id 仅在 state = SOLD 时非空
/// - draw_id 创建后不可变
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub draw_id: i64,
    /// 1-6 位数字字符串
    pub number: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    pub state: TicketState,
    pub customer_id: Option<i64>,
}

impl Model {
    pub fn is_available(&self) -> bool {
        self.state == TicketState::Available
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
