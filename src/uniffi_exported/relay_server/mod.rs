mod relay_server;
mod relay_upstream;

pub use relay_server::*;
pub use relay_upstream::*;
