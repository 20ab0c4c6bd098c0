use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::draw_entity;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDrawRequest {
    #[schema(example = "Sorteo Extraordinario de Navidad")]
    pub name: String,
    #[schema(example = "2025-12-24")]
    pub draw_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrawResponse {
    pub id: i64,
    pub name: String,
    pub draw_date: NaiveDate,
}

impl From<draw_entity::Model> for DrawResponse {
    fn from(m: draw_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            draw_date: m.draw_date,
        }
    }
}
