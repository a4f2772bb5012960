mod http_method;
mod native_transport_executor;
mod request_body;
mod response_format;
mod result_body;
mod transport_descriptor;
mod transport_outcome;
mod transport_outcome_listener;
mod transport_response;

pub use http_method::*;
pub use native_transport_executor::*;
pub use request_body::*;
pub use response_format::*;
pub use result_body::*;
pub use transport_descriptor::*;
pub use transport_outcome::*;
pub use transport_outcome_listener::*;
pub use transport_response::*;
