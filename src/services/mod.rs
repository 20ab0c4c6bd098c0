pub mod customer_service;
pub mod draw_service;
pub mod sale_service;
pub mod ticket_service;

pub use customer_service::*;
pub use draw_service::*;
pub use sale_service::*;
pub use ticket_service::*;
