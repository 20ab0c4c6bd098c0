use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write;

use loteria_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 单行 JSON 日志
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&record.args().to_string())
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to connect to the lottery database");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let draw_service = DrawService::new(pool.clone());
    let ticket_service = TicketService::new(pool.clone());
    let customer_service = CustomerService::new(pool.clone());
    let sale_service = SaleService::new(pool.clone());

    log::info!(
        "Starting lottery sales server at {}:{}",
        config.server.host,
        config.server.port
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(ticket_service.clone()))
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(sale_service.clone()))
            .configure(swagger_config)
            .configure(handlers::api_config)
    });

    let server = match config.server.workers {
        Some(workers) => server.workers(workers),
        None => server,
    };

    server
        .bind((config.server.host.as_str(), config.server.port))?
        .run()
        .await
}
