mod correlation;
mod host_operation_outcome_listener;
mod inbound_message_handler;
mod logic;

pub use correlation::*;
pub(crate) use host_operation_outcome_listener::*;
pub(crate) use inbound_message_handler::*;
pub use logic::*;
