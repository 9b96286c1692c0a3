//! Integration tests for the audit pipeline
//!
//! These tests use wiremock to stand in for the audited page, the PageSpeed
//! API and the OpenAI API, and run full audits through the real HTTP providers.

use seo_audit::audit::AuditOrchestrator;
use seo_audit::config::Config;
use seo_audit::providers::FALLBACK_EXPLANATION;
use seo_audit::{AuditError, ScoreSet};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PSI_PATH: &str = "/pagespeedonline/v5/runPagespeed";
const RESPONSES_PATH: &str = "/v1/responses";

const PAGE_HTML: &str = r#"<!doctype html>
<html>
<head>
    <title>Acme Widgets - Hand-made widgets</title>
    <meta name="description" content="Acme makes hand-made widgets for homes and offices and ships them worldwide in days.">
    <meta name="robots" content="index, follow">
    <link rel="canonical" href="https://acme.example/">
</head>
<body>
    <h1>Widgets</h1>
    <img src="/a.png" alt="Blue widget">
    <img src="/b.png" alt="Red widget">
    <img src="/c.png">
    <img src="/d.png" alt="Green widget">
</body>
</html>"#;

/// Creates a configuration pointing every provider at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.page.timeout_secs = 5;
    config.performance.endpoint = format!("{}{}", base_url, PSI_PATH);
    config.performance.timeout_secs = 5;
    config.performance.api_key = Some("psi-test-key".to_string());
    config.explanation.endpoint = format!("{}/v1", base_url);
    config.explanation.timeout_secs = 5;
    config.explanation.api_key = Some("sk-test".to_string());
    config
}

fn pagespeed_body(score: f64) -> serde_json::Value {
    json!({
        "id": "https://acme.example/",
        "lighthouseResult": {
            "categories": {
                "performance": { "id": "performance", "score": score }
            }
        }
    })
}

async fn mount_page(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_pagespeed(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(PSI_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_explanation(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(RESPONSES_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

fn explanation_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "resp_test",
        "object": "response",
        "output": [{
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "output_text", "text": text, "annotations": [] }]
        }]
    }))
}

#[tokio::test]
async fn test_full_audit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let page_url = format!("{}/page", base_url);

    mount_page(&mock_server, 200, PAGE_HTML).await;

    Mock::given(method("GET"))
        .and(path(PSI_PATH))
        .and(query_param("url", page_url.as_str()))
        .and(query_param("strategy", "mobile"))
        .and(query_param("key", "psi-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pagespeed_body(0.64)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(RESPONSES_PATH))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_string_contains("gpt-4o-mini"))
        .and(body_string_contains("pageFacts"))
        .and(body_string_contains("prioritized todo list"))
        .respond_with(explanation_reply("1. Add alt text to every image."))
        .expect(1)
        .mount(&mock_server)
        .await;

    let orchestrator = AuditOrchestrator::from_config(&create_test_config(&base_url))
        .expect("Failed to build orchestrator");
    let result = orchestrator
        .perform_audit(&page_url)
        .await
        .expect("Audit failed");

    assert_eq!(result.url, page_url);
    assert_eq!(result.page_facts.title, "Acme Widgets - Hand-made widgets");
    assert_eq!(result.page_facts.first_h1, "Widgets");
    assert_eq!(result.page_facts.image_count, 4);
    assert_eq!(result.page_facts.images_missing_alt, 1);
    assert_eq!(result.page_facts.canonical_url, "https://acme.example/");
    assert_eq!(result.page_facts.robots_directive, "index, follow");

    // 1 of 4 images lacks alt text (25%), so all four checks pass
    assert_eq!(
        result.scores,
        ScoreSet {
            performance: 64,
            seo: 100,
            overall: 82,
        }
    );
    assert_eq!(result.explanation, "1. Add alt text to every image.");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_malformed_performance_response_is_absorbed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, 200, PAGE_HTML).await;
    mount_pagespeed(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;
    mount_explanation(&mock_server, explanation_reply("Fix performance.")).await;

    let orchestrator = AuditOrchestrator::from_config(&create_test_config(&base_url)).unwrap();
    let result = orchestrator
        .perform_audit(&format!("{}/page", base_url))
        .await
        .expect("Audit should succeed without a performance score");

    assert_eq!(result.scores.performance, 0);
    assert_eq!(result.scores.seo, 100);
    assert_eq!(result.scores.overall, 50);
    assert_eq!(result.explanation, "Fix performance.");
}

#[tokio::test]
async fn test_performance_error_status_is_absorbed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, 200, PAGE_HTML).await;
    mount_pagespeed(
        &mock_server,
        ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "Lighthouse returned error: NO_FCP" }
        })),
    )
    .await;
    mount_explanation(&mock_server, explanation_reply("ok")).await;

    let orchestrator = AuditOrchestrator::from_config(&create_test_config(&base_url)).unwrap();
    let result = orchestrator
        .perform_audit(&format!("{}/page", base_url))
        .await
        .unwrap();

    assert_eq!(result.scores.performance, 0);
}

#[tokio::test]
async fn test_performance_timeout_is_absorbed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, 200, PAGE_HTML).await;
    mount_pagespeed(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(pagespeed_body(0.99))
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    mount_explanation(&mock_server, explanation_reply("ok")).await;

    let mut config = create_test_config(&base_url);
    config.performance.timeout_secs = 1;

    let orchestrator = AuditOrchestrator::from_config(&config).unwrap();
    let result = orchestrator
        .perform_audit(&format!("{}/page", base_url))
        .await
        .unwrap();

    assert_eq!(result.scores.performance, 0);
    assert_eq!(result.explanation, "ok");
}

#[tokio::test]
async fn test_missing_pagespeed_key_skips_request() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, 200, PAGE_HTML).await;
    Mock::given(method("GET"))
        .and(path(PSI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(pagespeed_body(0.9)))
        .expect(0)
        .mount(&mock_server)
        .await;
    mount_explanation(&mock_server, explanation_reply("ok")).await;

    let mut config = create_test_config(&base_url);
    config.performance.api_key = None;

    let orchestrator = AuditOrchestrator::from_config(&config).unwrap();
    let result = orchestrator
        .perform_audit(&format!("{}/page", base_url))
        .await
        .unwrap();

    assert_eq!(result.scores.performance, 0);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_unreachable_page_is_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, 404, "<html><body>Not Found</body></html>").await;
    mount_pagespeed(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(pagespeed_body(0.9)),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(RESPONSES_PATH))
        .respond_with(explanation_reply("unused"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let orchestrator = AuditOrchestrator::from_config(&create_test_config(&base_url)).unwrap();
    let err = orchestrator
        .perform_audit(&format!("{}/page", base_url))
        .await
        .expect_err("Audit should fail when the page is unreachable");

    assert!(matches!(err, AuditError::PageUnreachable { .. }));
    assert_eq!(err.status_code(), 500);
    assert_eq!(
        err.user_message(),
        "Something went wrong while analyzing the site."
    );
    mock_server.verify().await;
}

#[tokio::test]
async fn test_explanation_quota_is_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, 200, PAGE_HTML).await;
    mount_pagespeed(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(pagespeed_body(0.9)),
    )
    .await;
    mount_explanation(
        &mock_server,
        ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "message": "You exceeded your current quota, please check your plan and billing details.",
                "type": "insufficient_quota",
                "param": null,
                "code": "insufficient_quota"
            }
        })),
    )
    .await;

    let orchestrator = AuditOrchestrator::from_config(&create_test_config(&base_url)).unwrap();
    let err = orchestrator
        .perform_audit(&format!("{}/page", base_url))
        .await
        .expect_err("Quota rejection should fail the audit");

    match &err {
        AuditError::ExplanationQuotaExceeded { message } => {
            assert!(message.starts_with("You exceeded your current quota"));
        }
        other => panic!("Expected ExplanationQuotaExceeded, got {:?}", other),
    }
    assert_eq!(err.status_code(), 429);
}

#[tokio::test]
async fn test_explanation_server_error_uses_fallback() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, 200, PAGE_HTML).await;
    mount_pagespeed(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(pagespeed_body(0.5)),
    )
    .await;
    mount_explanation(
        &mock_server,
        ResponseTemplate::new(503).set_body_string("upstream unavailable"),
    )
    .await;

    let orchestrator = AuditOrchestrator::from_config(&create_test_config(&base_url)).unwrap();
    let result = orchestrator
        .perform_audit(&format!("{}/page", base_url))
        .await
        .unwrap();

    assert_eq!(result.explanation, FALLBACK_EXPLANATION);
    assert_eq!(result.scores.performance, 50);
}

#[tokio::test]
async fn test_missing_openai_key_uses_fallback() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, 200, PAGE_HTML).await;
    mount_pagespeed(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(pagespeed_body(0.5)),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(RESPONSES_PATH))
        .respond_with(explanation_reply("unused"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url);
    config.explanation.api_key = None;

    let orchestrator = AuditOrchestrator::from_config(&config).unwrap();
    let result = orchestrator
        .perform_audit(&format!("{}/page", base_url))
        .await
        .unwrap();

    assert_eq!(result.explanation, "AI response not available.");
    mock_server.verify().await;
}

#[tokio::test]
async fn test_invalid_url_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let orchestrator = AuditOrchestrator::from_config(&create_test_config(&base_url)).unwrap();

    for input in ["", "   ", "acme.example/page", "ftp://acme.example/", "mailto:a@b.c"] {
        let err = orchestrator
            .perform_audit(input)
            .await
            .expect_err("Invalid URL should be rejected");
        assert!(matches!(err, AuditError::Validation(_)));
        assert_eq!(err.status_code(), 400);
    }

    mock_server.verify().await;
}
