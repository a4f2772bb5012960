mod execute_natively;
mod result_from_outcome;
mod transport_route;

pub(crate) use execute_natively::*;
pub(crate) use result_from_outcome::*;
pub use transport_route::*;
