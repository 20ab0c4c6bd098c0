use actix_cors::Cors;

/// 售票终端与后台页面跨域访问
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .expose_headers(vec!["content-type"])
        .max_age(3600)
}
