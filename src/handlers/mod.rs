pub mod customer;
pub mod draw;
pub mod sale;
pub mod status;
pub mod ticket;

pub use customer::customer_config;
pub use draw::draw_config;
pub use sale::sale_config;
pub use status::status_config;
pub use ticket::ticket_config;

use crate::error::AppError;
use actix_web::web;

/// `/api/v1` 下的全部路由
///
/// 请求体与查询参数解析失败同样返回统一的错误结构 (400)
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(format!("Invalid request body: {err}")).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(format!("Invalid query string: {err}")).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(format!("Invalid path parameter: {err}")).into()
            }))
            .configure(status_config)
            .configure(draw_config)
            .configure(ticket_config)
            .configure(customer_config)
            .configure(sale_config),
    );
}
