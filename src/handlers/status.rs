use actix_web::{HttpResponse, Result, web};
use chrono::Utc;

use crate::models::*;

#[utoipa::path(
    get,
    path = "/status",
    tag = "status",
    responses(
        (status = 200, description = "服务正常", body = StatusResponse)
    )
)]
pub async fn status() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(StatusResponse {
        status: "OK".to_string(),
        message: "Lottery sales API is running".to_string(),
        timestamp: Utc::now(),
    })))
}

pub fn status_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(status));
}
