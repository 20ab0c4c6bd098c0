use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::customer_entity;

/// 注册 / 更新客户
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerRequest {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<customer_entity::Model> for CustomerResponse {
    fn from(m: customer_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryQuery {
    #[schema(example = "jane@example.com")]
    pub email: String,
}

/// 客户购票历史中的彩票摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TicketSummary {
    pub id: i64,
    pub number: String,
    pub price: Decimal,
    /// 状态文本 (AVAILABLE / SOLD)
    pub state: String,
    pub draw_id: i64,
    pub draw_name: String,
}

/// 客户购票历史
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerHistoryResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub tickets: Vec<TicketSummary>,
}
