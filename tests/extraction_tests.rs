//! Extraction client integration tests against a mock HTTP server

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plansnap::application::ports::ExtractionClient;
use plansnap::domain::pipeline::ExtractionError;
use plansnap::infrastructure::HttpExtractionClient;

const TEXT: &str = "Lunch at Cafe, 2024-05-01T12:00 to 13:00";

async fn mock_response(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/process-text/"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn extracts_valid_plans() {
    let server = MockServer::start().await;
    mock_response(
        &server,
        200,
        json!({
            "extracted_info": {
                "plans": [{
                    "title": "Lunch at Cafe",
                    "location": "Cafe",
                    "start_time": "2024-05-01T12:00",
                    "end_time": "2024-05-01T13:00",
                    "details": "with the team"
                }]
            }
        }),
    )
    .await;

    let client = HttpExtractionClient::with_base_url(server.uri());
    let plans = client.extract(TEXT, "test-token", "UTC").await.unwrap();

    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].title, "Lunch at Cafe");
    assert_eq!(plans[0].location, "Cafe");
    assert_eq!(plans[0].details, "with the team");
}

#[tokio::test]
async fn sends_token_auth_and_request_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process-text/"))
        .and(header("authorization", "Token secret-token"))
        .and(body_json(json!({
            "text": TEXT,
            "timezone": "Asia/Seoul"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"extracted_info": {"plans": []}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpExtractionClient::with_base_url(server.uri());
    let plans = client
        .extract(TEXT, "secret-token", "Asia/Seoul")
        .await
        .unwrap();
    assert!(plans.is_empty());
}

#[tokio::test]
async fn malformed_candidates_are_skipped_not_fatal() {
    // 3 candidates, 1 missing start_time: exactly 2 records survive
    let server = MockServer::start().await;
    mock_response(
        &server,
        200,
        json!({
            "extracted_info": {
                "plans": [
                    {
                        "title": "Lunch",
                        "start_time": "2024-05-01T12:00",
                        "end_time": "2024-05-01T13:00"
                    },
                    {
                        "title": "Broken",
                        "end_time": "2024-05-01T15:00"
                    },
                    {
                        "title": "Review",
                        "start_time": "2024-05-02T14:00",
                        "end_time": "2024-05-02T15:00"
                    }
                ]
            }
        }),
    )
    .await;

    let client = HttpExtractionClient::with_base_url(server.uri());
    let plans = client.extract(TEXT, "test-token", "UTC").await.unwrap();

    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].title, "Lunch");
    assert_eq!(plans[1].title, "Review");
}

#[tokio::test]
async fn empty_plan_list_is_ok() {
    let server = MockServer::start().await;
    mock_response(&server, 200, json!({"extracted_info": {"plans": []}})).await;

    let client = HttpExtractionClient::with_base_url(server.uri());
    assert!(client
        .extract(TEXT, "test-token", "UTC")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn unauthorized_is_unauthenticated() {
    let server = MockServer::start().await;
    mock_response(&server, 401, json!({"detail": "Invalid token."})).await;

    let client = HttpExtractionClient::with_base_url(server.uri());
    let err = client.extract(TEXT, "bad-token", "UTC").await.unwrap_err();
    assert_eq!(err, ExtractionError::Unauthenticated);
}

#[tokio::test]
async fn forbidden_is_unauthenticated() {
    let server = MockServer::start().await;
    mock_response(&server, 403, json!({"detail": "Forbidden"})).await;

    let client = HttpExtractionClient::with_base_url(server.uri());
    let err = client.extract(TEXT, "bad-token", "UTC").await.unwrap_err();
    assert_eq!(err, ExtractionError::Unauthenticated);
}

#[tokio::test]
async fn server_error_is_network_error() {
    let server = MockServer::start().await;
    mock_response(&server, 500, json!({"detail": "boom"})).await;

    let client = HttpExtractionClient::with_base_url(server.uri());
    let err = client.extract(TEXT, "test-token", "UTC").await.unwrap_err();
    assert!(matches!(err, ExtractionError::NetworkError(_)));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Nothing is listening here
    let client = HttpExtractionClient::with_base_url("http://127.0.0.1:1");
    let err = client.extract(TEXT, "test-token", "UTC").await.unwrap_err();
    assert!(matches!(err, ExtractionError::NetworkError(_)));
}

#[tokio::test]
async fn undecodable_body_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process-text/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = HttpExtractionClient::with_base_url(server.uri());
    let err = client.extract(TEXT, "test-token", "UTC").await.unwrap_err();
    assert!(matches!(err, ExtractionError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_envelope_is_malformed_response() {
    let server = MockServer::start().await;
    mock_response(&server, 200, json!({"something_else": true})).await;

    let client = HttpExtractionClient::with_base_url(server.uri());
    let err = client.extract(TEXT, "test-token", "UTC").await.unwrap_err();
    assert!(matches!(err, ExtractionError::MalformedResponse(_)));
}
