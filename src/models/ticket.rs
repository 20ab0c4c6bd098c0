use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{TicketState, ticket_entity};

/// 单张创建彩票
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    pub draw_id: i64,
    /// 1-6 位数字
    #[schema(example = "0001")]
    pub number: String,
    /// 最多两位小数
    #[schema(value_type = String, example = "10000.50")]
    pub price: Decimal,
    /// 为空时默认为 AVAILABLE
    pub state: Option<TicketState>,
}

/// 批量生成彩票参数
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateTicketsQuery {
    #[schema(example = 10)]
    pub count: u32,
    #[schema(value_type = String, example = "10000.50")]
    pub unit_price: Decimal,
}

/// 按期次列出彩票的过滤参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TicketQuery {
    pub state: Option<TicketState>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketResponse {
    pub id: i64,
    pub draw_id: i64,
    pub number: String,
    pub price: Decimal,
    pub state: TicketState,
    pub customer_id: Option<i64>,
}

impl From<ticket_entity::Model> for TicketResponse {
    fn from(m: ticket_entity::Model) -> Self {
        Self {
            id: m.id,
            draw_id: m.draw_id,
            number: m.number,
            price: m.price,
            state: m.state,
            customer_id: m.customer_id,
        }
    }
}
