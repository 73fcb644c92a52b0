//! Integration tests for the authenticated request gateway
//!
//! Exercises the single-flight renewal properties end to end against a mock
//! HTTP server: token-dependent responders make the credential generations
//! observable (`Bearer A1` is expired, `Bearer A2` is fresh), and the
//! refresh endpoint's expected call count proves the single-flight
//! invariant.

use std::sync::Arc;
use std::time::Duration;

use neumoapp_gateway::session::storage::MemoryStorage;
use neumoapp_gateway::{
    CredentialPair, CredentialStore, Gateway, GatewayConfig, GatewayError, HttpRenewalClient,
    RequestSpec,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TestGateway = Gateway<HttpRenewalClient, MemoryStorage>;

/// Build a gateway against the mock server, seeded with the `A1`/`R1`
/// credential pair.
async fn authenticated_gateway(server: &MockServer) -> Arc<TestGateway> {
    let config = GatewayConfig::new(server.uri()).with_timeout(Duration::from_secs(5));
    let store = Arc::new(CredentialStore::new(MemoryStorage::new()));
    store
        .set(CredentialPair::new("A1", Some("R1".to_string())))
        .await
        .expect("seed credentials");

    let renewal = HttpRenewalClient::new(&config).expect("renewal client builds");
    Arc::new(Gateway::new(&config, store, renewal).expect("gateway builds"))
}

/// Mount a GET endpoint that rejects the expired token and accepts the
/// renewed one.
async fn mount_token_gated_endpoint(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount the refresh endpoint with an expected call count.
async fn mount_refresh(server: &MockServer, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refresh_token": "R1"})))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn renewed_tokens() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": "A2",
        "refresh_token": "R2",
        "token_type": "bearer",
    }))
}

/// Validates the single-flight invariant and transparent replay.
///
/// Three concurrent calls all receive an expiry rejection under `A1`; the
/// refresh endpoint (held open so all three join the in-flight renewal) must
/// be hit exactly once, every caller must resume with its replay's `A2`
/// response, and the store must hold the renewed pair.
///
/// # Test Steps
/// 1. Seed the store with `{access: "A1", renewal: "R1"}`
/// 2. Mount three token-gated endpoints and a delayed refresh mock
/// 3. Issue the three calls concurrently
/// 4. Assert one refresh call, three successful outcomes, store on `A2`/`R2`
#[tokio::test]
async fn single_flight_renewal_replays_all_callers() {
    let server = MockServer::start().await;
    mount_token_gated_endpoint(&server, "/specialties", json!([{"id": 1}])).await;
    mount_token_gated_endpoint(&server, "/hospitals", json!([{"id": 2}])).await;
    mount_token_gated_endpoint(&server, "/auth/me", json!({"id": 3})).await;
    mount_refresh(&server, renewed_tokens().set_delay(Duration::from_millis(200)), 1).await;

    let gateway = authenticated_gateway(&server).await;

    let (a, b, c) = tokio::join!(
        gateway.call(RequestSpec::get("/specialties")),
        gateway.call(RequestSpec::get("/hospitals")),
        gateway.call(RequestSpec::get("/auth/me")),
    );

    assert_eq!(a.expect("specialties replay").status().as_u16(), 200);
    assert_eq!(b.expect("hospitals replay").status().as_u16(), 200);
    assert_eq!(c.expect("profile replay").status().as_u16(), 200);

    let store = gateway.credentials();
    assert_eq!(store.access_token().await.as_deref(), Some("A2"));
    assert_eq!(store.renewal_token().await.as_deref(), Some("R2"));

    // The refresh mock's expect(1) is verified when the server drops.
    let refresh_calls = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|req| req.url.path() == "/auth/refresh")
        .count();
    assert_eq!(refresh_calls, 1);
}

/// Validates FIFO replay ordering.
///
/// Calls register their expiry in the order a, b, c while the renewal is
/// held open; the replays under `A2` must be issued in the same order.
///
/// # Test Steps
/// 1. Mount `/a`, `/b`, `/c` token-gated and a refresh mock delayed 400ms
/// 2. Start the calls 50ms apart so the enqueue order is deterministic
/// 3. Read back the mock server's request log and compare replay order
#[tokio::test]
async fn replays_preserve_enqueue_order() {
    let server = MockServer::start().await;
    for endpoint in ["/a", "/b", "/c"] {
        mount_token_gated_endpoint(&server, endpoint, json!({})).await;
    }
    mount_refresh(&server, renewed_tokens().set_delay(Duration::from_millis(400)), 1).await;

    let gateway = authenticated_gateway(&server).await;

    let mut handles = Vec::new();
    for endpoint in ["/a", "/b", "/c"] {
        let gateway = Arc::clone(&gateway);
        handles.push(tokio::spawn(async move {
            gateway.call(RequestSpec::get(endpoint)).await
        }));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    for handle in handles {
        handle.await.expect("task").expect("replay succeeds");
    }

    let replay_order: Vec<String> = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|req| {
            req.headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value == "Bearer A2")
        })
        .map(|req| req.url.path().to_string())
        .collect();

    assert_eq!(replay_order, ["/a", "/b", "/c"]);
}

/// Validates the renewal-failure teardown scenario.
///
/// Same three-caller setup, but the refresh endpoint rejects the renewal
/// token: every caller must receive the uniform session-expired failure
/// (never the raw renewal error), the store must be cleared, and exactly one
/// session-ended notification must be observed.
#[tokio::test]
async fn renewal_failure_tears_down_session() {
    let server = MockServer::start().await;
    for endpoint in ["/a", "/b", "/c"] {
        mount_token_gated_endpoint(&server, endpoint, json!({})).await;
    }
    mount_refresh(
        &server,
        ResponseTemplate::new(401)
            .set_body_json(json!({"detail": "invalid refresh token"}))
            .set_delay(Duration::from_millis(200)),
        1,
    )
    .await;

    let gateway = authenticated_gateway(&server).await;
    let mut session_ended = gateway.subscribe_session_ended();

    let (a, b, c) = tokio::join!(
        gateway.call(RequestSpec::get("/a")),
        gateway.call(RequestSpec::get("/b")),
        gateway.call(RequestSpec::get("/c")),
    );

    for outcome in [a, b, c] {
        assert!(matches!(outcome, Err(GatewayError::SessionExpired)));
    }
    assert!(!gateway.is_authenticated().await);

    session_ended.recv().await.expect("one teardown notification");
    assert!(session_ended.try_recv().is_err());
}

/// Validates that an ordinary server error passes through verbatim.
///
/// A lone 500 must be surfaced with status and body intact, and no renewal
/// call may be issued.
#[tokio::test]
async fn plain_server_error_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hospitals"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;
    mount_refresh(&server, renewed_tokens(), 0).await;

    let gateway = authenticated_gateway(&server).await;

    let outcome = gateway.call(RequestSpec::get("/hospitals")).await;

    match outcome {
        Err(GatewayError::Rejected { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected pass-through rejection, got {other:?}"),
    }
    assert_eq!(gateway.credentials().access_token().await.as_deref(), Some("A1"));
}

/// Validates the no-retry-loop property.
///
/// The renewed credential is itself rejected: the replay's 401 must fail
/// hard without re-invoking renewal, so the refresh endpoint sees exactly
/// one call.
#[tokio::test]
async fn replay_rejected_again_fails_without_second_renewal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})))
        .mount(&server)
        .await;
    mount_refresh(&server, renewed_tokens(), 1).await;

    let gateway = authenticated_gateway(&server).await;

    let outcome = gateway.call(RequestSpec::get("/auth/me")).await;

    assert!(matches!(outcome, Err(GatewayError::Unauthorized)));
}

/// Validates that a 401 on an unauthenticated request never triggers
/// renewal.
///
/// A failed login is an ordinary rejection, surfaced verbatim so the caller
/// can read the server's detail message.
#[tokio::test]
async fn unauthenticated_rejection_bypasses_renewal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect credentials"})),
        )
        .mount(&server)
        .await;
    mount_refresh(&server, renewed_tokens(), 0).await;

    let gateway = authenticated_gateway(&server).await;

    let spec = RequestSpec::post("/auth/login")
        .with_json(json!({"document_number": "12345678", "password": "wrong"}))
        .unauthenticated();
    let outcome = gateway.call(spec).await;

    match outcome {
        Err(GatewayError::Rejected { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected pass-through rejection, got {other:?}"),
    }
}

/// Validates that a transport failure surfaces as a network error without
/// renewal involvement.
#[tokio::test]
async fn network_failure_surfaces_immediately() {
    // Point at a closed port; the connection is refused before any response.
    let config = GatewayConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_millis(500));
    let store = Arc::new(CredentialStore::new(MemoryStorage::new()));
    store
        .set(CredentialPair::new("A1", Some("R1".to_string())))
        .await
        .expect("seed credentials");
    let renewal = HttpRenewalClient::new(&config).expect("renewal client builds");
    let gateway = Gateway::new(&config, Arc::clone(&store), renewal).expect("gateway builds");

    let outcome = gateway.call(RequestSpec::get("/hospitals")).await;

    assert!(matches!(outcome, Err(GatewayError::Network(_))));
    // The session is untouched: network failures never trigger renewal.
    assert_eq!(store.access_token().await.as_deref(), Some("A1"));
}
