use crate::models::*;
use crate::services::{CustomerService, TicketService};
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/customers",
    tag = "customer",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "注册客户成功", body = CustomerResponse),
        (status = 400, description = "姓名或邮箱无效"),
        (status = 409, description = "邮箱已被注册")
    )
)]
pub async fn register(
    service: web::Data<CustomerService>,
    request: web::Json<CustomerRequest>,
) -> Result<HttpResponse> {
    match service.register(request.into_inner()).await {
        Ok(customer) => Ok(HttpResponse::Created().json(ApiResponse::success(customer))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customers",
    tag = "customer",
    responses(
        (status = 200, description = "获取客户列表成功", body = [CustomerResponse])
    )
)]
pub async fn list(service: web::Data<CustomerService>) -> Result<HttpResponse> {
    match service.list().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customer",
    params(("id" = i64, Path, description = "客户ID")),
    responses(
        (status = 200, description = "获取客户成功", body = CustomerResponse),
        (status = 404, description = "客户不存在")
    )
)]
pub async fn get(service: web::Data<CustomerService>, path: web::Path<i64>) -> Result<HttpResponse> {
    match service.get(path.into_inner()).await {
        Ok(customer) => Ok(HttpResponse::Ok().json(ApiResponse::success(customer))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customer",
    params(("id" = i64, Path, description = "客户ID")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "更新客户成功", body = CustomerResponse),
        (status = 400, description = "姓名或邮箱无效"),
        (status = 404, description = "客户不存在"),
        (status = 409, description = "邮箱已被其他客户注册")
    )
)]
pub async fn update(
    service: web::Data<CustomerService>,
    path: web::Path<i64>,
    request: web::Json<CustomerRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), request.into_inner()).await {
        Ok(customer) => Ok(HttpResponse::Ok().json(ApiResponse::success(customer))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customer",
    params(("id" = i64, Path, description = "客户ID")),
    responses(
        (status = 204, description = "客户已删除"),
        (status = 404, description = "客户不存在"),
        (status = 409, description = "客户存在销售记录")
    )
)]
pub async fn delete(
    service: web::Data<CustomerService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customers/{id}/tickets",
    tag = "customer",
    params(("id" = i64, Path, description = "客户ID")),
    responses(
        (status = 200, description = "客户已购彩票", body = [TicketResponse])
    )
)]
pub async fn customer_tickets(
    service: web::Data<TicketService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.list_by_customer(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customers/history",
    tag = "customer",
    params(("email" = String, Query, description = "客户邮箱")),
    responses(
        (status = 200, description = "获取购票历史成功", body = CustomerHistoryResponse),
        (status = 400, description = "邮箱格式无效"),
        (status = 404, description = "客户不存在")
    )
)]
pub async fn history(
    service: web::Data<CustomerService>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    history_response(&service, &query.into_inner().email).await
}

#[utoipa::path(
    get,
    path = "/customers/email/{email}",
    tag = "customer",
    params(("email" = String, Path, description = "客户邮箱")),
    responses(
        (status = 200, description = "获取购票历史成功", body = CustomerHistoryResponse),
        (status = 400, description = "邮箱格式无效"),
        (status = 404, description = "客户不存在")
    )
)]
pub async fn history_by_path(
    service: web::Data<CustomerService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    history_response(&service, &path.into_inner()).await
}

async fn history_response(service: &CustomerService, email: &str) -> Result<HttpResponse> {
    if let Err(e) = crate::utils::validate_email(email) {
        return Ok(e.error_response());
    }
    match service.history_by_email(email).await {
        Ok(history) => Ok(HttpResponse::Ok().json(ApiResponse::success(history))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn customer_config(cfg: &mut web::ServiceConfig) {
    // 固定路径需在 /{id} 之前注册
    cfg.service(
        web::scope("/customers")
            .route("/history", web::get().to(history))
            .route("/email/{email}", web::get().to(history_by_path))
            .route("", web::post().to(register))
            .route("", web::get().to(list))
            .route("/{id}", web::get().to(get))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(delete))
            .route("/{id}/tickets", web::get().to(customer_tickets)),
    );
}
