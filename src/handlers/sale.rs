use crate::models::*;
use crate::services::SaleService;
use actix_web::{HttpResponse, ResponseError, Result, web};

/// 售票: 写销售记录并将彩票置为 SOLD (单个事务)
#[utoipa::path(
    post,
    path = "/sales",
    tag = "sale",
    request_body = SaleRequest,
    responses(
        (status = 201, description = "售票成功", body = SaleResponse),
        (status = 404, description = "彩票或客户不存在"),
        (status = 409, description = "彩票已售出")
    )
)]
pub async fn sell(
    service: web::Data<SaleService>,
    request: web::Json<SaleRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    match service.sell(request.ticket_id, request.customer_id).await {
        Ok(sale) => Ok(HttpResponse::Created().json(ApiResponse::success(sale))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/sales/ticket/{ticket_id}",
    tag = "sale",
    params(("ticket_id" = i64, Path, description = "彩票ID")),
    responses(
        (status = 200, description = "彩票的销售记录", body = SaleRecordResponse),
        (status = 404, description = "该彩票没有销售记录")
    )
)]
pub async fn get_by_ticket(
    service: web::Data<SaleService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_by_ticket(path.into_inner()).await {
        Ok(sale) => Ok(HttpResponse::Ok().json(ApiResponse::success(sale))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn sale_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sales")
            .route("", web::post().to(sell))
            .route("/ticket/{ticket_id}", web::get().to(get_by_ticket)),
    );
}
