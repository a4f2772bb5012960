/// Something that consumes raw messages arriving on a [`MessageChannel`](crate::MessageChannel).
pub(crate) trait InboundMessageHandler: Send + Sync {
    fn handle_inbound(&self, message: String);
}
