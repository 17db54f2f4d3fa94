//! Input check workflow lifecycle against a mock backend.

use std::sync::Arc;
use std::time::Duration;
use waf_console::gateway::GatewayClient;
use waf_console::workflow::InputCheckWorkflow;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn workflow(server: &MockServer) -> InputCheckWorkflow {
    let gateway = Arc::new(GatewayClient::new(&server.uri(), Duration::from_secs(2)).unwrap());
    InputCheckWorkflow::new(gateway)
}

#[tokio::test]
async fn blocked_input_renders_the_status_and_server_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user-input"))
        .and(body_json(serde_json::json!({"input": "' OR 1=1 --"})))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({"error": "Blocked by WAF"})),
        )
        .mount(&server)
        .await;

    let mut workflow = workflow(&server);
    let result = workflow.submit("' OR 1=1 --").await;

    assert!(!result.ok);
    assert_eq!(result.message, "❌ Error 403: Blocked by WAF");
    assert!(!workflow.in_flight());
}

#[tokio::test]
async fn safe_input_renders_a_success_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user-input"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "Input looks safe"})),
        )
        .mount(&server)
        .await;

    let mut workflow = workflow(&server);
    let result = workflow.submit("hello").await;

    assert!(result.ok);
    assert_eq!(result.message, "✅ Input looks safe");
}

#[tokio::test]
async fn whitespace_input_settles_locally_without_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user-input"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0) // validation must short-circuit before the network
        .mount(&server)
        .await;

    let mut workflow = workflow(&server);
    let result = workflow.submit("   \t\n ").await;

    assert!(!result.ok);
    assert_eq!(result.message, "❌ Input cannot be empty.");
}

#[tokio::test]
async fn input_is_trimmed_before_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user-input"))
        .and(body_json(serde_json::json!({"input": "probe"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut workflow = workflow(&server);
    let result = workflow.submit("  probe  ").await;
    assert!(result.ok);
}

#[tokio::test]
async fn the_last_result_persists_until_the_next_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user-input"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "first"})),
        )
        .mount(&server)
        .await;

    let mut workflow = workflow(&server);
    workflow.submit("one").await;
    assert_eq!(workflow.last_result().unwrap().message, "✅ first");

    // A failed follow-up supersedes the stored result.
    let second = workflow.submit("  ").await;
    assert_eq!(workflow.last_result(), Some(&second));
    assert_eq!(second.message, "❌ Input cannot be empty.");
}
