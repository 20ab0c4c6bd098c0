pub mod customers;
pub mod draws;
pub mod sales;
pub mod tickets;

pub use customers as customer_entity;
pub use draws as draw_entity;
pub use sales as sale_entity;
pub use tickets as ticket_entity;
pub use tickets::TicketState;
