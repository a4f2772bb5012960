use crate::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Single entry point for HTTP requests from any execution context.
///
/// Depending on the [`ExecutionContext`] and on what the host installed, a
/// request is executed by the native transport directly, relayed over a
/// [`MessageChannel`] to a privileged peer (see [`RelayServer`]), or handed to
/// the host's [`PrivilegedBridgeExecutor`]. Relayed and bridged requests are
/// tagged with a [`CorrelationId`] and tracked in an in-flight set, so results
/// arriving in any order resolve the right caller.
#[derive(Object)]
pub struct RequestDispatcher {
    context: ExecutionContext,
    native_transport: Option<Arc<dyn NativeTransportExecutor>>,
    relay_channel: Option<Arc<dyn MessageChannel>>,
    bridge: Option<Arc<dyn PrivilegedBridgeExecutor>>,
    in_flight: Arc<InFlightSet>,
    inbound_registered: AtomicBool,
}

#[export(async_runtime = "tokio")]
impl RequestDispatcher {
    /// Constructs a new [`RequestDispatcher`] from the transports the host
    /// has available in this context, any of which may be missing.
    #[uniffi::constructor]
    pub fn new(
        context: ExecutionContext,
        native_transport: Option<Arc<dyn NativeTransportExecutor>>,
        relay_channel: Option<Arc<dyn MessageChannel>>,
        bridge: Option<Arc<dyn PrivilegedBridgeExecutor>>,
    ) -> Self {
        Self {
            context,
            native_transport,
            relay_channel,
            bridge,
            in_flight: Arc::new(InFlightSet::new()),
            inbound_registered: AtomicBool::new(false),
        }
    }

    /// The transport the next request would take.
    pub fn route(&self) -> TransportRoute {
        if self.context.has_network_privilege {
            TransportRoute::Native
        } else if self
            .relay_channel
            .as_ref()
            .is_some_and(|channel| channel.is_connected())
        {
            TransportRoute::Relay
        } else if self.bridge.is_some() {
            TransportRoute::Bridge
        } else {
            TransportRoute::Unavailable
        }
    }

    /// Executes `descriptor` and calls exactly one of the `listener`'s
    /// methods exactly once with the outcome.
    pub fn request(&self, descriptor: TransportDescriptor, listener: Arc<dyn RequestListener>) {
        let failure_detail = self.context.failure_detail;
        self.submit(
            descriptor,
            Box::new(move |result| match result {
                Ok(body) => listener.on_success(Arc::new(RelayedBody::new(body))),
                Err(error) => listener.on_failure(failure_detail.reason_for(&error)),
            }),
        )
    }

    /// Executes `descriptor` and awaits its result.
    pub async fn fetch(
        &self,
        descriptor: TransportDescriptor,
    ) -> Result<Arc<RelayedBody>, RelayError> {
        self.dispatch(descriptor)
            .await
            .map(|body| Arc::new(RelayedBody::new(body)))
    }

    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.len() as u64
    }

    /// Fails every relayed or bridged request that has been in flight longer
    /// than the configured relay timeout. Only needed by hosts that do not
    /// drive a tokio runtime; otherwise a timer does this per request.
    pub fn sweep_expired(&self) -> u64 {
        match self.context.relay_timeout() {
            Some(timeout) => self.in_flight.remove_expired(timeout) as u64,
            None => 0,
        }
    }
}

impl RequestDispatcher {
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Executes `descriptor` and calls `on_success` with the body on
    /// success, or `on_failure` otherwise. Exactly one of them runs, once.
    pub fn request_with(
        &self,
        descriptor: TransportDescriptor,
        on_success: impl FnOnce(ResultBody) + Send + 'static,
        on_failure: impl FnOnce() + Send + 'static,
    ) {
        self.submit(
            descriptor,
            Box::new(move |result| match result {
                Ok(body) => on_success(body),
                Err(_) => on_failure(),
            }),
        )
    }

    /// Executes `descriptor` and awaits its result, with the full error.
    pub async fn dispatch(&self, descriptor: TransportDescriptor) -> Result<ResultBody, RelayError> {
        let (sender, receiver) = channel();
        self.submit(
            descriptor,
            Box::new(move |result| {
                if sender.send(result).is_err() {
                    debug!("Caller stopped awaiting result");
                }
            }),
        );
        receiver
            .await
            .map_err(|_| RelayError::from(RustSideError::FailedToReceiveResult))?
    }

    pub(crate) fn submit(&self, descriptor: TransportDescriptor, continuation: Continuation) {
        let route = self.route();
        debug!(
            url = %descriptor.url,
            method = descriptor.method.as_str(),
            ?route,
            "Dispatching request"
        );

        match route {
            TransportRoute::Native => match &self.native_transport {
                Some(native_transport) => {
                    execute_natively(native_transport, descriptor, continuation)
                }
                None => {
                    warn!(url = %descriptor.url, "Privileged context without native transport");
                    continuation(Err(RustSideError::NoTransportAvailable.into()))
                }
            },
            TransportRoute::Relay => self.relay(descriptor, continuation),
            TransportRoute::Bridge => self.bridge(descriptor, continuation),
            TransportRoute::Unavailable => {
                warn!(url = %descriptor.url, "No transport available for request");
                continuation(Err(RustSideError::NoTransportAvailable.into()))
            }
        }
    }

    fn relay(&self, descriptor: TransportDescriptor, continuation: Continuation) {
        let Some(channel) = self.relay_channel.as_ref() else {
            return continuation(Err(RustSideError::NoTransportAvailable.into()));
        };
        self.register_inbound(channel);

        let handle = RequestHandle::new(descriptor, TransportRoute::Relay, continuation);
        let message = match RelayMessage::request(handle.id.clone(), &handle.descriptor).to_json() {
            Ok(message) => message,
            Err(error) => {
                handle.resolve(Err(error.into()));
                return;
            }
        };

        // Inserted before sending, a peer may answer before `send` returns.
        let id = self.in_flight.insert(handle);
        match channel.send(message) {
            Ok(()) => {
                self.in_flight.mark_dispatched(&id);
                self.arm_timeout(&id);
            }
            Err(error) => {
                warn!(correlation_id = %id, %error, "Failed to send relay-request");
                self.in_flight.resolve(&id, Err(error.into()));
            }
        }
    }

    fn bridge(&self, descriptor: TransportDescriptor, continuation: Continuation) {
        let Some(bridge) = self.bridge.as_ref() else {
            return continuation(Err(RustSideError::NoTransportAvailable.into()));
        };

        let handle = RequestHandle::new(descriptor, TransportRoute::Bridge, continuation);
        let request = BridgeRequest::new(handle.id.clone(), handle.descriptor.clone());
        let id = self.in_flight.insert(handle);

        let (in_flight, outcome_id) = (Arc::clone(&self.in_flight), id.clone());
        let listener = Arc::new(TransportOutcomeListener::correlated(id.clone(), move |outcome| {
            in_flight.resolve_with(&outcome_id, |descriptor| {
                result_from_outcome(descriptor.response_format, outcome)
            });
        }));

        match bridge.execute_bridge_request(request, listener) {
            Ok(()) => {
                self.in_flight.mark_dispatched(&id);
                self.arm_timeout(&id);
            }
            Err(error) => {
                warn!(correlation_id = %id, %error, "Privileged bridge refused request");
                self.in_flight.resolve(&id, Err(error.into()));
            }
        }
    }

    fn register_inbound(&self, channel: &Arc<dyn MessageChannel>) {
        if self.inbound_registered.swap(true, Ordering::AcqRel) {
            return;
        }
        let handler: Arc<dyn InboundMessageHandler> = self.in_flight.clone();
        channel.on_message(Arc::new(InboundMessageListener::new(Arc::downgrade(
            &handler,
        ))));
    }

    /// Races the request against the relay timeout. The timer is aborted as
    /// soon as the request resolves, so settled requests leave no task behind.
    fn arm_timeout(&self, id: &CorrelationId) {
        let Some(timeout) = self.context.relay_timeout() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            trace!(correlation_id = %id, "No tokio runtime, timeout left to `sweep_expired`");
            return;
        };
        let (in_flight, expiring) = (Arc::clone(&self.in_flight), id.clone());
        let timer = runtime.spawn(async move {
            tokio::time::sleep(timeout).await;
            in_flight.expire(&expiring);
        });
        self.in_flight.attach_timer(id, timer.abort_handle());
    }
}

#[cfg(test)]
impl RequestDispatcher {
    pub(crate) fn state_of(&self, id: &CorrelationId) -> Option<RequestState> {
        self.in_flight.state_of(id)
    }
}
