mod bridge;
mod channel;
mod dispatcher;
mod relay_server;
mod transport;

pub use bridge::*;
pub use channel::*;
pub use dispatcher::*;
pub use relay_server::*;
pub use transport::*;
