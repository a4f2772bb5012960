mod correlation_id;
mod in_flight_set;
mod request_handle;

pub use correlation_id::*;
pub(crate) use in_flight_set::*;
pub use request_handle::*;
