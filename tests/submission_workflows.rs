//! Integration tests for the form submission workflow.

use async_trait::async_trait;
use formguard::prelude::*;
use formguard::{SignedTokenStore, SinkError, TokenStoreMode};
use serde_json::{Value, json};
use std::collections::HashSet;

fn raw(pairs: &[(&str, &str)]) -> RawSubmission {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn cookie_pair(response: &HttpResponse) -> String {
    response
        .header("Set-Cookie")
        .and_then(|c| c.split(';').next())
        .unwrap()
        .to_string()
}

async fn render<T: TokenStore, S: Sink>(controller: &FormController<T, S>) -> (String, String) {
    let response = controller
        .render_form(&HttpRequest::new("GET", "/person"))
        .await
        .unwrap();
    let token = response.json::<Value>().unwrap()["token"]
        .as_str()
        .unwrap()
        .to_string();
    (token, cookie_pair(&response))
}

fn post(cookie: &str, body: String) -> HttpRequest {
    HttpRequest::new("POST", "/person")
        .with_header("Content-Type", "application/x-www-form-urlencoded")
        .with_header("Cookie", cookie)
        .with_body(body)
}

// =============================================================================
// Validator
// =============================================================================

#[test]
fn test_issued_tokens_are_distinct() {
    let issuer = TokenIssuer::new();
    let tokens: HashSet<String> = (0..1_000).map(|_| issuer.issue().value).collect();
    assert_eq!(tokens.len(), 1_000);
}

#[test]
fn test_token_differing_by_one_character_rejected() {
    let err = SubmissionValidator::new()
        .validate(&raw(&[("_csrf", "T2"), ("name", "Carol"), ("age", "42")]), "T1")
        .unwrap_err();
    assert!(matches!(err, SubmissionError::TokenMismatch));
    assert_eq!(err.status_code(), 403);
}

#[test]
fn test_bad_token_never_reaches_schema() {
    let err = SubmissionValidator::new()
        .validate(&raw(&[("_csrf", "nope")]), "T1")
        .unwrap_err();
    assert!(err.field_errors().is_none());
}

#[test]
fn test_non_numeric_age_rejected() {
    let err = SubmissionValidator::new()
        .validate(
            &raw(&[("_csrf", "T1"), ("name", ""), ("age", "not-a-number")]),
            "T1",
        )
        .unwrap_err();

    let errors = err.field_errors().unwrap().field_errors();
    assert!(errors.contains_key("age"));
    assert_eq!(err.status_code(), 422);
}

#[test]
fn test_missing_fields_reported_together() {
    let err = SubmissionValidator::new()
        .validate(&raw(&[("_csrf", "T1")]), "T1")
        .unwrap_err();

    let errors = err.field_errors().unwrap().field_errors();
    assert_eq!(errors["name"], vec!["Required"]);
    assert_eq!(errors["age"], vec!["Required"]);
}

#[test]
fn test_benign_name_unchanged() {
    let record = SubmissionValidator::new()
        .validate(&raw(&[("_csrf", "T1"), ("name", "Alice"), ("age", "30")]), "T1")
        .unwrap();
    assert_eq!(record.name(), "Alice");
}

#[test]
fn test_script_stripped_and_age_preserved() {
    let record = SubmissionValidator::new()
        .validate(
            &raw(&[
                ("_csrf", "T1"),
                ("name", "<script>alert(1)</script>Bob"),
                ("age", "30"),
            ]),
            "T1",
        )
        .unwrap();

    assert!(!record.name().contains('<'));
    assert!(!record.name().contains("alert"));
    assert_eq!(record.age(), 30.0);
}

#[tokio::test]
async fn test_end_to_end_stores_number() {
    let sink = MemorySink::new();
    let record = SubmissionValidator::new()
        .validate(&raw(&[("_csrf", "T1"), ("name", "Carol"), ("age", "42")]), "T1")
        .unwrap();
    sink.store(record).await.unwrap();

    let stored = sink.records().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name(), "Carol");
    assert_eq!(stored[0].age(), 42.0);
    assert_eq!(
        serde_json::to_value(&stored[0]).unwrap(),
        json!({ "name": "Carol", "age": 42.0 })
    );
}

// =============================================================================
// Controller
// =============================================================================

fn memory_controller() -> FormController<MemoryTokenStore, MemorySink> {
    FormController::new(
        &FormGuardConfig::default(),
        MemoryTokenStore::new(),
        MemorySink::new(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_controller_accepts_and_stores() {
    let controller = memory_controller();
    let (token, cookie) = render(&controller).await;

    let response = controller
        .submit(&post(&cookie, format!("_csrf={}&name=Carol&age=42", token)))
        .await;

    assert_eq!(response.status, 201);
    assert_eq!(response.header("Content-Security-Policy"), Some("default-src 'self'"));

    let records = controller.sink().records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].age(), 42.0);
}

#[tokio::test]
async fn test_controller_rejects_wrong_token() {
    let controller = memory_controller();
    let (_token, cookie) = render(&controller).await;

    let response = controller
        .submit(&post(&cookie, "_csrf=forged&name=Carol&age=42".to_string()))
        .await;

    assert_eq!(response.status, 403);
    assert!(controller.sink().is_empty().await);
}

#[tokio::test]
async fn test_controller_handle_is_single_use() {
    let controller = memory_controller();
    let (token, cookie) = render(&controller).await;
    let body = format!("_csrf={}&name=Carol&age=42", token);

    assert_eq!(controller.submit(&post(&cookie, body.clone())).await.status, 201);
    assert_eq!(controller.submit(&post(&cookie, body)).await.status, 403);
    assert_eq!(controller.sink().len().await, 1);
}

#[tokio::test]
async fn test_controller_reports_field_errors() {
    let controller = memory_controller();
    let (token, cookie) = render(&controller).await;

    let response = controller
        .submit(&post(&cookie, format!("_csrf={}&name=&age=not-a-number", token)))
        .await;

    assert_eq!(response.status, 422);
    let body: Value = response.json().unwrap();
    assert_eq!(body["errors"]["age"], json!(["Invalid age"]));
    assert!(body["errors"].get("name").is_none());
    assert!(controller.sink().is_empty().await);
}

#[tokio::test]
async fn test_controller_accepts_header_token() {
    let controller = memory_controller();
    let (token, cookie) = render(&controller).await;

    let request = post(&cookie, "name=Alice&age=30".to_string()).with_header("X-CSRF-Token", token);
    assert_eq!(controller.submit(&request).await.status, 201);
}

#[tokio::test]
async fn test_controller_sanitizes_before_storing() {
    let controller = memory_controller();
    let (token, cookie) = render(&controller).await;

    let body = format!(
        "_csrf={}&name=%3Cscript%3Ealert(1)%3C%2Fscript%3EBob&age=30",
        token
    );
    let response = controller.submit(&post(&cookie, body)).await;

    assert_eq!(response.status, 201);
    assert_eq!(response.json::<Value>().unwrap()["name"], "Bob");
    assert_eq!(controller.sink().records().await[0].name(), "Bob");
}

#[tokio::test]
async fn test_signed_handles_survive_restart() {
    use base64::Engine;
    let config = FormGuardConfig {
        token_store: TokenStoreMode::Signed,
        secret: Some(base64::engine::general_purpose::STANDARD.encode([9u8; 32])),
        ..FormGuardConfig::default()
    };

    let first = FormController::from_config(&config, MemorySink::new()).unwrap();
    let (token, cookie) = render(&first).await;

    // a fresh instance with the same secret accepts the submission
    let second = FormController::from_config(&config, MemorySink::new()).unwrap();
    let response = second
        .submit(&post(&cookie, format!("_csrf={}&name=Carol&age=42", token)))
        .await;
    assert_eq!(response.status, 201);

    // a different secret does not
    let other = FormGuardConfig {
        secret: Some(base64::engine::general_purpose::STANDARD.encode([8u8; 32])),
        ..config
    };
    let third = FormController::from_config(&other, MemorySink::new()).unwrap();
    let response = third
        .submit(&post(&cookie, format!("_csrf={}&name=Carol&age=42", token)))
        .await;
    assert_eq!(response.status, 403);
}

#[tokio::test]
async fn test_abandoned_renders_are_bounded() {
    let config = FormGuardConfig {
        memory_capacity: 2,
        ..FormGuardConfig::default()
    };
    let store = MemoryTokenStore::with_capacity(config.memory_capacity);
    let controller = FormController::new(&config, store, MemorySink::new()).unwrap();

    let mut renders = Vec::new();
    for _ in 0..50 {
        renders.push(render(&controller).await);
    }
    assert_eq!(controller.store().len().await, 2);

    // the oldest render was evicted
    let (token, cookie) = &renders[0];
    let response = controller
        .submit(&post(cookie, format!("_csrf={}&name=Carol&age=42", token)))
        .await;
    assert_eq!(response.status, 403);

    let (token, cookie) = &renders[49];
    let response = controller
        .submit(&post(cookie, format!("_csrf={}&name=Carol&age=42", token)))
        .await;
    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn test_from_config_bounds_memory_store() {
    let config = FormGuardConfig {
        memory_capacity: 1,
        ..FormGuardConfig::default()
    };
    let controller = FormController::from_config(&config, MemorySink::new()).unwrap();

    let (first_token, first_cookie) = render(&controller).await;
    let (token, cookie) = render(&controller).await;

    let response = controller
        .submit(&post(&first_cookie, format!("_csrf={}&name=Carol&age=42", first_token)))
        .await;
    assert_eq!(response.status, 403);

    let response = controller
        .submit(&post(&cookie, format!("_csrf={}&name=Carol&age=42", token)))
        .await;
    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn test_empty_header_token_falls_back_to_field() {
    let controller = memory_controller();
    let (token, cookie) = render(&controller).await;

    let request = post(&cookie, format!("_csrf={}&name=Carol&age=42", token))
        .with_header("X-CSRF-Token", "");
    assert_eq!(controller.submit(&request).await.status, 201);
}

#[tokio::test]
async fn test_signed_store_shared_directly() {
    let secret = vec![5u8; 32];
    let store = SignedTokenStore::new(secret).unwrap();
    let token = TokenIssuer::new().issue();

    let handle = store.bind(&token).await.unwrap();
    assert_eq!(store.redeem(&handle).await.unwrap(), Some(token));
}

struct FailingSink;

#[async_trait]
impl Sink for FailingSink {
    async fn store(&self, _record: SanitizedPerson) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("disk full".to_string()))
    }
}

#[tokio::test]
async fn test_sink_failure_is_reported() {
    let controller =
        FormController::new(&FormGuardConfig::default(), MemoryTokenStore::new(), FailingSink)
            .unwrap();
    let (token, cookie) = render(&controller).await;

    let response = controller
        .submit(&post(&cookie, format!("_csrf={}&name=Carol&age=42", token)))
        .await;
    assert_eq!(response.status, 500);
}
