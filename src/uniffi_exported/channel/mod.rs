mod inbound_message_listener;
mod message_channel;
mod relay_message;

pub use inbound_message_listener::*;
pub use message_channel::*;
pub use relay_message::*;
