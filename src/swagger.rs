use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::TicketState;
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::status::status,
        handlers::draw::create_draw,
        handlers::draw::list_draws,
        handlers::draw::get_draw,
        handlers::draw::delete_draw,
        handlers::draw::generate_tickets,
        handlers::draw::list_draw_tickets,
        handlers::ticket::create_ticket,
        handlers::ticket::get_ticket,
        handlers::ticket::list_by_draw,
        handlers::customer::register,
        handlers::customer::list,
        handlers::customer::get,
        handlers::customer::update,
        handlers::customer::delete,
        handlers::customer::customer_tickets,
        handlers::customer::history,
        handlers::customer::history_by_path,
        handlers::sale::sell,
        handlers::sale::get_by_ticket,
    ),
    components(
        schemas(
            TicketState,
            CreateDrawRequest,
            DrawResponse,
            CreateTicketRequest,
            GenerateTicketsQuery,
            TicketQuery,
            TicketResponse,
            CustomerRequest,
            CustomerResponse,
            HistoryQuery,
            TicketSummary,
            CustomerHistoryResponse,
            SaleRequest,
            SaleResponse,
            SaleRecordResponse,
            StatusResponse,
            ApiError,
        )
    ),
    tags(
        (name = "status", description = "Service status API"),
        (name = "draw", description = "Draw management API"),
        (name = "ticket", description = "Ticket inventory API"),
        (name = "customer", description = "Customer management API"),
        (name = "sale", description = "Ticket sales API"),
    ),
    info(
        title = "Loteria Backend API",
        version = "1.0.0",
        description = "Lottery ticket sales REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
