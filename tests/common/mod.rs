//! In-process stand-ins for the host: message channels, native transport,
//! privileged bridge and request listeners.

#![allow(dead_code)]

use relaybridge::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// One end of an in-memory channel pair. Delivery is synchronous.
#[derive(Default)]
pub struct LoopbackEndpoint {
    connected: AtomicBool,
    peer: Mutex<Weak<LoopbackEndpoint>>,
    listener: Mutex<Option<Arc<InboundMessageListener>>>,
    sent: Mutex<Vec<String>>,
}

impl LoopbackEndpoint {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// Delivers `message` as if the peer had sent it.
    pub fn deliver(&self, message: String) {
        let listener = self.listener.lock().unwrap().clone();
        if let Some(listener) = listener {
            listener.receive(message);
        }
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }
}

impl MessageChannel for LoopbackEndpoint {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn send(&self, message: String) -> Result<(), HostSideError> {
        self.sent.lock().unwrap().push(message.clone());
        let peer = self.peer.lock().unwrap().upgrade();
        match peer {
            Some(peer) => {
                peer.deliver(message);
                Ok(())
            }
            None => Err(HostSideError::ChannelSendFailed {
                reason: "peer gone".to_owned(),
            }),
        }
    }

    fn on_message(&self, listener: Arc<InboundMessageListener>) {
        *self.listener.lock().unwrap() = Some(listener);
    }
}

pub fn loopback_pair() -> (Arc<LoopbackEndpoint>, Arc<LoopbackEndpoint>) {
    let left = Arc::new(LoopbackEndpoint::default());
    let right = Arc::new(LoopbackEndpoint::default());
    *left.peer.lock().unwrap() = Arc::downgrade(&right);
    *right.peer.lock().unwrap() = Arc::downgrade(&left);
    left.connected.store(true, Ordering::SeqCst);
    right.connected.store(true, Ordering::SeqCst);
    (left, right)
}

/// A channel that is configured but has no peer established.
pub fn unconnected_channel() -> Arc<LoopbackEndpoint> {
    Arc::new(LoopbackEndpoint::default())
}

/// Native transport that answers immediately with a fixed status and body.
pub struct FixedTransport {
    pub status_code: u16,
    pub body: String,
    pub requests: Mutex<Vec<TransportDescriptor>>,
}

impl FixedTransport {
    pub fn new(status_code: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status_code,
            body: body.to_owned(),
            requests: Mutex::new(Vec::new()),
        })
    }
}

impl NativeTransportExecutor for FixedTransport {
    fn execute_native_request(
        &self,
        request: TransportDescriptor,
        listener_rust_side: Arc<TransportOutcomeListener>,
    ) -> Result<(), HostSideError> {
        self.requests.lock().unwrap().push(request);
        listener_rust_side.notify_outcome(TransportOutcome::Success {
            response: TransportResponse::new(self.status_code, self.body.clone().into_bytes()),
        });
        Ok(())
    }
}

/// Native transport that parks every request until the test completes it.
#[derive(Default)]
pub struct ParkedTransport {
    parked: Mutex<Vec<(TransportDescriptor, Arc<TransportOutcomeListener>)>>,
}

impl ParkedTransport {
    pub fn parked_count(&self) -> usize {
        self.parked.lock().unwrap().len()
    }

    /// Completes the parked request for `url` with status 200 and `body`.
    pub fn complete(&self, url: &str, body: &str) {
        let listener = {
            let mut parked = self.parked.lock().unwrap();
            let index = parked
                .iter()
                .position(|(descriptor, _)| descriptor.url == url)
                .expect("no parked request for url");
            parked.remove(index).1
        };
        listener.notify_outcome(TransportOutcome::Success {
            response: TransportResponse::new(200, body.as_bytes().to_vec()),
        });
    }
}

impl NativeTransportExecutor for ParkedTransport {
    fn execute_native_request(
        &self,
        request: TransportDescriptor,
        listener_rust_side: Arc<TransportOutcomeListener>,
    ) -> Result<(), HostSideError> {
        self.parked.lock().unwrap().push((request, listener_rust_side));
        Ok(())
    }
}

/// Privileged bridge that parks every request until the test completes it.
#[derive(Default)]
pub struct ParkedBridge {
    parked: Mutex<Vec<(BridgeRequest, Arc<TransportOutcomeListener>)>>,
}

impl ParkedBridge {
    pub fn requests(&self) -> Vec<BridgeRequest> {
        self.parked
            .lock()
            .unwrap()
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    pub fn listener_for(&self, url: &str) -> Arc<TransportOutcomeListener> {
        self.parked
            .lock()
            .unwrap()
            .iter()
            .find(|(request, _)| request.descriptor.url == url)
            .map(|(_, listener)| Arc::clone(listener))
            .expect("no parked bridge request for url")
    }

    pub fn complete(&self, url: &str, status_code: u16, body: &str) {
        self.listener_for(url).notify_outcome(TransportOutcome::Success {
            response: TransportResponse::new(status_code, body.as_bytes().to_vec()),
        });
    }
}

impl PrivilegedBridgeExecutor for ParkedBridge {
    fn execute_bridge_request(
        &self,
        request: BridgeRequest,
        listener_rust_side: Arc<TransportOutcomeListener>,
    ) -> Result<(), HostSideError> {
        self.parked.lock().unwrap().push((request, listener_rust_side));
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Success(ResultBody),
    Failure(Option<FailureReason>),
}

/// Records every call made to it, to check exactly-once delivery.
#[derive(Default)]
pub struct CollectingListener {
    events: Mutex<Vec<Event>>,
}

impl CollectingListener {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl RequestListener for CollectingListener {
    fn on_success(&self, body: Arc<RelayedBody>) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Success(body.body().clone()));
    }

    fn on_failure(&self, reason: Option<FailureReason>) {
        self.events.lock().unwrap().push(Event::Failure(reason));
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
