pub mod common;
pub mod customer;
pub mod draw;
pub mod sale;
pub mod ticket;

pub use common::*;
pub use customer::*;
pub use draw::*;
pub use sale::*;
pub use ticket::*;
