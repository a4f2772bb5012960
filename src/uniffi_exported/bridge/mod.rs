mod bridge_request;
mod privileged_bridge_executor;

pub use bridge_request::*;
pub use privileged_bridge_executor::*;
