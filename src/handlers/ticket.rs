use crate::models::*;
use crate::services::TicketService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/tickets",
    tag = "ticket",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "创建彩票成功", body = TicketResponse),
        (status = 400, description = "号码或价格无效"),
        (status = 404, description = "期次不存在"),
        (status = 409, description = "该期次内号码已存在")
    )
)]
pub async fn create_ticket(
    service: web::Data<TicketService>,
    request: web::Json<CreateTicketRequest>,
) -> Result<HttpResponse> {
    match service.create_ticket(request.into_inner()).await {
        Ok(ticket) => Ok(HttpResponse::Created().json(ApiResponse::success(ticket))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/tickets/{id}",
    tag = "ticket",
    params(("id" = i64, Path, description = "彩票ID")),
    responses(
        (status = 200, description = "获取彩票成功", body = TicketResponse),
        (status = 404, description = "彩票不存在")
    )
)]
pub async fn get_ticket(
    service: web::Data<TicketService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_ticket(path.into_inner()).await {
        Ok(ticket) => Ok(HttpResponse::Ok().json(ApiResponse::success(ticket))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/tickets/draw/{draw_id}",
    tag = "ticket",
    params(("draw_id" = i64, Path, description = "期次ID")),
    responses(
        (status = 200, description = "获取期次彩票成功", body = [TicketResponse]),
        (status = 404, description = "期次不存在")
    )
)]
pub async fn list_by_draw(
    service: web::Data<TicketService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.list_by_draw(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn ticket_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tickets")
            .route("", web::post().to(create_ticket))
            .route("/draw/{draw_id}", web::get().to(list_by_draw))
            .route("/{id}", web::get().to(get_ticket)),
    );
}
