pub mod ticket_number;
pub mod validation;

pub use ticket_number::*;
pub use validation::*;
