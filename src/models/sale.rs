use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sale_entity;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaleRequest {
    pub ticket_id: i64,
    pub customer_id: i64,
}

/// 售票结果 (销售记录 + 彩票号码 + 客户姓名)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaleResponse {
    pub sale_id: i64,
    pub ticket_id: i64,
    pub ticket_number: String,
    pub customer_id: i64,
    pub customer_name: String,
    pub sold_at: DateTime<Utc>,
    pub price: Decimal,
}

/// 销售记录 (对账用)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaleRecordResponse {
    pub id: i64,
    pub ticket_id: i64,
    pub customer_id: i64,
    pub sold_at: DateTime<Utc>,
    pub price: Decimal,
}

impl From<sale_entity::Model> for SaleRecordResponse {
    fn from(m: sale_entity::Model) -> Self {
        Self {
            id: m.id,
            ticket_id: m.ticket_id,
            customer_id: m.customer_id,
            sold_at: m.sold_at,
            price: m.price,
        }
    }
}
