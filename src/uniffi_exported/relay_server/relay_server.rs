use crate::prelude::*;

/// The privileged side of the relay: receives `relay-request` messages on a
/// [`MessageChannel`], executes them, and answers each with a
/// `relay-response` carrying the same id.
///
/// Every request is executed on its own; a slow request never holds back the
/// reply to another one.
#[derive(Object)]
pub struct RelayServer {
    inner: Arc<RelayServerInner>,
}

struct RelayServerInner {
    channel: Arc<dyn MessageChannel>,
    upstream: RelayUpstream,
    failure_detail: FailureDetail,
}

#[export]
impl RelayServer {
    /// A relay server in a privileged context, executing requests with the
    /// host's native transport.
    #[uniffi::constructor]
    pub fn new(
        channel: Arc<dyn MessageChannel>,
        native_transport: Arc<dyn NativeTransportExecutor>,
        failure_detail: FailureDetail,
    ) -> Self {
        Self::with_upstream(
            channel,
            RelayUpstream::Native(native_transport),
            failure_detail,
        )
    }

    /// A relay server that forwards every request through `upstream`.
    #[uniffi::constructor]
    pub fn forwarding(
        channel: Arc<dyn MessageChannel>,
        upstream: Arc<RequestDispatcher>,
        failure_detail: FailureDetail,
    ) -> Self {
        Self::with_upstream(channel, RelayUpstream::Forward(upstream), failure_detail)
    }

    /// Starts receiving the messages arriving on the channel.
    pub fn listen(&self) {
        let handler: Arc<dyn InboundMessageHandler> = self.inner.clone();
        self.inner
            .channel
            .on_message(Arc::new(InboundMessageListener::new(Arc::downgrade(
                &handler,
            ))));
    }

    pub fn handle_message(&self, message: String) {
        self.inner.handle_inbound(message)
    }
}

impl RelayServer {
    pub fn with_upstream(
        channel: Arc<dyn MessageChannel>,
        upstream: RelayUpstream,
        failure_detail: FailureDetail,
    ) -> Self {
        Self {
            inner: Arc::new(RelayServerInner {
                channel,
                upstream,
                failure_detail,
            }),
        }
    }
}

impl RelayServerInner {
    fn reply_continuation(&self, id: CorrelationId) -> Continuation {
        let channel = Arc::clone(&self.channel);
        let failure_detail = self.failure_detail;
        Box::new(move |result| {
            let reply = match result {
                Ok(body) => RelayMessage::success(id.clone(), body),
                Err(error) => {
                    debug!(correlation_id = %id, %error, "Relayed request failed");
                    RelayMessage::failure(id.clone(), failure_detail.reason_for(&error))
                }
            };
            let sent = reply
                .to_json()
                .map_err(RelayError::from)
                .and_then(|reply| channel.send(reply).map_err(RelayError::from));
            if let Err(error) = sent {
                warn!(correlation_id = %id, %error, "Failed to send relay-response");
            }
        })
    }
}

impl InboundMessageHandler for RelayServerInner {
    fn handle_inbound(&self, message: String) {
        let message = match RelayMessage::from_json(&message) {
            Ok(message) => message,
            Err(error) => {
                warn!(%error, "Dropping malformed relay message");
                return;
            }
        };

        let id = message.id();
        let Some((id, descriptor)) = message.into_descriptor() else {
            warn!(correlation_id = %id, "Dropping relay-response received by relay server");
            return;
        };

        debug!(correlation_id = %id, url = %descriptor.url, "Relaying request");
        self.upstream
            .execute(descriptor, self.reply_continuation(id));
    }
}
