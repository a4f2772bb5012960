mod execution_context;
mod request_dispatcher;
mod request_dispatcher_helpers;
mod request_listener;

pub use execution_context::*;
pub use request_dispatcher::*;
pub use request_listener::*;
