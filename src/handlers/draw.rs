use crate::entities::TicketState;
use crate::models::*;
use crate::services::{DrawService, TicketService};
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/draws",
    tag = "draw",
    request_body = CreateDrawRequest,
    responses(
        (status = 201, description = "创建期次成功", body = DrawResponse),
        (status = 400, description = "请求参数错误")
    )
)]
pub async fn create_draw(
    service: web::Data<DrawService>,
    request: web::Json<CreateDrawRequest>,
) -> Result<HttpResponse> {
    match service.create_draw(request.into_inner()).await {
        Ok(draw) => Ok(HttpResponse::Created().json(ApiResponse::success(draw))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draws",
    tag = "draw",
    responses(
        (status = 200, description = "获取期次列表成功", body = [DrawResponse])
    )
)]
pub async fn list_draws(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.list_draws().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draws/{id}",
    tag = "draw",
    params(("id" = i64, Path, description = "期次ID")),
    responses(
        (status = 200, description = "获取期次成功", body = DrawResponse),
        (status = 404, description = "期次不存在")
    )
)]
pub async fn get_draw(service: web::Data<DrawService>, path: web::Path<i64>) -> Result<HttpResponse> {
    match service.get_draw(path.into_inner()).await {
        Ok(draw) => Ok(HttpResponse::Ok().json(ApiResponse::success(draw))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 删除期次，同一事务内先删除其全部彩票
#[utoipa::path(
    delete,
    path = "/draws/{id}",
    tag = "draw",
    params(("id" = i64, Path, description = "期次ID")),
    responses(
        (status = 204, description = "期次及其彩票已删除"),
        (status = 404, description = "期次不存在"),
        (status = 409, description = "期次已有售出彩票")
    )
)]
pub async fn delete_draw(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_draw(path.into_inner()).await {
        Ok(_) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

/// 为期次批量生成彩票，号码接在现有最大号码之后 (新期次从 0001 开始)
#[utoipa::path(
    post,
    path = "/draws/{id}/tickets",
    tag = "draw",
    params(
        ("id" = i64, Path, description = "期次ID"),
        ("count" = u32, Query, description = "生成数量 (>= 1)"),
        ("unit_price" = String, Query, description = "单价 (> 0，最多两位小数)")
    ),
    responses(
        (status = 201, description = "生成彩票成功", body = [TicketResponse]),
        (status = 400, description = "数量或单价无效"),
        (status = 404, description = "期次不存在"),
        (status = 409, description = "号码与并发生成冲突")
    )
)]
pub async fn generate_tickets(
    service: web::Data<TicketService>,
    path: web::Path<i64>,
    query: web::Query<GenerateTicketsQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    match service
        .generate_tickets(path.into_inner(), query.count, query.unit_price)
        .await
    {
        Ok(list) => Ok(HttpResponse::Created().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draws/{id}/tickets",
    tag = "draw",
    params(
        ("id" = i64, Path, description = "期次ID"),
        ("state" = Option<TicketState>, Query, description = "状态过滤: AVAILABLE / SOLD")
    ),
    responses(
        (status = 200, description = "获取彩票列表成功", body = [TicketResponse]),
        (status = 404, description = "期次不存在")
    )
)]
pub async fn list_draw_tickets(
    service: web::Data<TicketService>,
    path: web::Path<i64>,
    query: web::Query<TicketQuery>,
) -> Result<HttpResponse> {
    let draw_id = path.into_inner();
    let result = match query.into_inner().state {
        Some(state) => service.list_by_draw_and_state(draw_id, state).await,
        None => service.list_by_draw(draw_id).await,
    };
    match result {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/draws")
            .route("", web::post().to(create_draw))
            .route("", web::get().to(list_draws))
            .route("/{id}", web::get().to(get_draw))
            .route("/{id}", web::delete().to(delete_draw))
            .route("/{id}/tickets", web::post().to(generate_tickets))
            .route("/{id}/tickets", web::get().to(list_draw_tickets)),
    );
}
