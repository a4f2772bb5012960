mod common;

use common::*;
use relaybridge::*;
use serde_json::json;
use std::sync::Arc;

struct RelaySetup {
    page: RequestDispatcher,
    page_channel: Arc<LoopbackEndpoint>,
    server: RelayServer,
    transport: Arc<ParkedTransport>,
}

/// A restricted page dispatcher wired to a privileged relay server whose
/// native transport parks requests.
fn relay_setup(failure_detail: FailureDetail) -> RelaySetup {
    init_tracing();
    let (page_channel, background_channel) = loopback_pair();
    let transport = Arc::new(ParkedTransport::default());
    let server = RelayServer::new(background_channel, transport.clone(), failure_detail);
    server.listen();
    let page = RequestDispatcher::new(
        ExecutionContext::restricted().with_failure_detail(failure_detail),
        None,
        Some(page_channel.clone() as Arc<dyn MessageChannel>),
        None,
    );
    RelaySetup {
        page,
        page_channel,
        server,
        transport,
    }
}

#[test]
fn out_of_order_responses_resolve_their_own_callers() {
    let setup = relay_setup(FailureDetail::Minimal);
    let (a, b) = (
        Arc::new(CollectingListener::default()),
        Arc::new(CollectingListener::default()),
    );

    assert_eq!(setup.page.route(), TransportRoute::Relay);
    setup
        .page
        .request(TransportDescriptor::get("https://x/a"), a.clone());
    setup
        .page
        .request(TransportDescriptor::get("https://x/b"), b.clone());
    assert_eq!(setup.transport.parked_count(), 2);
    assert_eq!(setup.page.in_flight_count(), 2);

    setup.transport.complete("https://x/b", "result of b");
    assert!(a.events().is_empty());
    assert_eq!(
        b.events(),
        vec![Event::Success(ResultBody::Text("result of b".to_owned()))]
    );

    setup.transport.complete("https://x/a", "result of a");
    assert_eq!(
        a.events(),
        vec![Event::Success(ResultBody::Text("result of a".to_owned()))]
    );
    assert_eq!(b.events().len(), 1);
    assert_eq!(setup.page.in_flight_count(), 0);
}

#[test]
fn many_concurrent_requests_each_resolve_exactly_once() {
    let setup = relay_setup(FailureDetail::Minimal);
    let listeners = (0..16)
        .map(|index| {
            let listener = Arc::new(CollectingListener::default());
            setup.page.request(
                TransportDescriptor::get(format!("https://x/{index}")).expecting_json(),
                listener.clone(),
            );
            listener
        })
        .collect::<Vec<_>>();

    for index in (0..16).rev().step_by(2).chain((0..16).step_by(2)) {
        setup
            .transport
            .complete(&format!("https://x/{index}"), &json!({ "index": index }).to_string());
    }

    for (index, listener) in listeners.iter().enumerate() {
        assert_eq!(
            listener.events(),
            vec![Event::Success(ResultBody::Json(json!({ "index": index })))]
        );
    }
    assert_eq!(setup.page.in_flight_count(), 0);
}

#[test]
fn relayed_request_keeps_method_headers_and_body() {
    let (page_channel, background_channel) = loopback_pair();
    let transport = FixedTransport::new(201, "created");
    let server = RelayServer::new(background_channel, transport.clone(), FailureDetail::Minimal);
    server.listen();
    let page = RequestDispatcher::new(
        ExecutionContext::restricted(),
        None,
        Some(page_channel as Arc<dyn MessageChannel>),
        None,
    );
    let descriptor = TransportDescriptor::post("https://x/y", vec![0u8, 159, 146, 150])
        .with_header("X-Token", "abc");
    let listener = Arc::new(CollectingListener::default());

    page.request(descriptor.clone(), listener.clone());

    assert_eq!(*transport.requests.lock().unwrap(), vec![descriptor]);
    assert_eq!(
        listener.events(),
        vec![Event::Success(ResultBody::Text("created".to_owned()))]
    );
}

#[test]
fn relay_failure_is_minimal_by_default_and_detailed_on_request() {
    for (detail, expected) in [
        (FailureDetail::Minimal, None),
        (
            FailureDetail::Detailed,
            Some(FailureReason::Status { status_code: 502 }),
        ),
    ] {
        let (page_channel, background_channel) = loopback_pair();
        let server = RelayServer::new(
            background_channel,
            FixedTransport::new(502, "bad gateway"),
            detail,
        );
        server.listen();
        let page = RequestDispatcher::new(
            ExecutionContext::restricted().with_failure_detail(detail),
            None,
            Some(page_channel.clone() as Arc<dyn MessageChannel>),
            None,
        );
        let listener = Arc::new(CollectingListener::default());

        page.request(TransportDescriptor::get("https://x/y"), listener.clone());

        assert_eq!(listener.events(), vec![Event::Failure(expected)]);
        let reply = page_channel.sent();
        assert_eq!(reply.len(), 1);
    }
}

#[test]
fn server_ignores_relayed_responses_and_garbage() {
    let setup = relay_setup(FailureDetail::Minimal);

    setup.server.handle_message("garbage".to_owned());
    setup.server.handle_message(
        RelayMessage::success(CorrelationId::new(), ResultBody::Text("x".to_owned()))
            .to_json()
            .unwrap(),
    );

    assert_eq!(setup.transport.parked_count(), 0);
    assert!(setup.page_channel.sent().is_empty());
}

#[test]
fn forwarding_hop_preserves_ids_on_both_channels() {
    init_tracing();
    // page <-> content script <-> background
    let (page_channel, content_down) = loopback_pair();
    let (content_up, background_channel) = loopback_pair();
    let transport = Arc::new(ParkedTransport::default());

    let background = RelayServer::new(background_channel, transport.clone(), FailureDetail::Minimal);
    background.listen();
    let content_dispatcher = Arc::new(RequestDispatcher::new(
        ExecutionContext::restricted(),
        None,
        Some(content_up.clone() as Arc<dyn MessageChannel>),
        None,
    ));
    let content = RelayServer::forwarding(
        content_down.clone(),
        content_dispatcher.clone(),
        FailureDetail::Minimal,
    );
    content.listen();
    let page = RequestDispatcher::new(
        ExecutionContext::restricted(),
        None,
        Some(page_channel.clone() as Arc<dyn MessageChannel>),
        None,
    );

    let (a, b) = (
        Arc::new(CollectingListener::default()),
        Arc::new(CollectingListener::default()),
    );
    page.request(TransportDescriptor::get("https://x/a").expecting_json(), a.clone());
    page.request(TransportDescriptor::get("https://x/b"), b.clone());
    assert_eq!(content_dispatcher.in_flight_count(), 2);

    transport.complete("https://x/b", "b");
    transport.complete("https://x/a", r#"{"a":1}"#);

    assert_eq!(a.events(), vec![Event::Success(ResultBody::Json(json!({"a": 1})))]);
    assert_eq!(b.events(), vec![Event::Success(ResultBody::Text("b".to_owned()))]);
    assert_eq!(content_dispatcher.in_flight_count(), 0);
    assert_eq!(page.in_flight_count(), 0);

    let page_ids = page_channel
        .sent()
        .iter()
        .map(|message| RelayMessage::from_json(message).unwrap().id())
        .collect::<Vec<_>>();
    let replied_ids = content_down
        .sent()
        .iter()
        .map(|message| RelayMessage::from_json(message).unwrap().id())
        .collect::<Vec<_>>();
    assert_eq!(replied_ids, vec![page_ids[1].clone(), page_ids[0].clone()]);
}

#[test]
fn disconnected_relay_falls_back_to_bridge() {
    let (page_channel, background_channel) = loopback_pair();
    let server = RelayServer::new(
        background_channel,
        FixedTransport::new(200, "relayed"),
        FailureDetail::Minimal,
    );
    server.listen();
    let bridge = Arc::new(ParkedBridge::default());
    let page = RequestDispatcher::new(
        ExecutionContext::restricted(),
        None,
        Some(page_channel.clone() as Arc<dyn MessageChannel>),
        Some(bridge.clone() as Arc<dyn PrivilegedBridgeExecutor>),
    );
    let listener = Arc::new(CollectingListener::default());

    page_channel.disconnect();
    page.request(TransportDescriptor::get("https://x/y"), listener.clone());
    bridge.complete("https://x/y", 200, "bridged");

    assert!(page_channel.sent().is_empty());
    assert_eq!(
        listener.events(),
        vec![Event::Success(ResultBody::Text("bridged".to_owned()))]
    );
}
