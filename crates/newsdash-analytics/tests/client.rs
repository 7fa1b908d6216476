//! Integration tests for `AnalyticsClient` using wiremock HTTP mocks.

use newsdash_analytics::{AnalyticsClient, AnalyticsError};
use newsdash_core::{AnalysisPeriod, CompanyId, ErrorKind, ReportKey};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> AnalyticsClient {
    AnalyticsClient::new(base_url, 15).expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_live_returns_normalized_snapshot() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "company_name": "Acme",
        "has_data": true,
        "statistics": {"overall_sentiment_score": 140.0},
        "crisis_alert": {},
        "past_reports": [
            {"timestamp": "20250101_090000", "date": "2025-01-01"},
            {"timestamp": "20250103_090000", "date": "2025-01-03"}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/company/dashboard/C1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snapshot = client
        .fetch_live(&CompanyId::from("C1"))
        .await
        .expect("should parse snapshot");

    assert_eq!(snapshot.company_name, "Acme");
    assert!(snapshot.has_data);
    assert!(snapshot.crisis_alert.is_none());
    assert!((snapshot.overall_sentiment_score() - 100.0).abs() < f64::EPSILON);
    assert_eq!(snapshot.past_reports[0].timestamp, "20250103_090000");
}

#[tokio::test]
async fn fetch_live_accepts_no_data_placeholder() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/company/dashboard/C9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "has_data": false,
            "message": "No analysis found"
        })))
        .mount(&server)
        .await;

    let snapshot = test_client(&server.uri())
        .fetch_live(&CompanyId::from("C9"))
        .await
        .expect("placeholder is a valid snapshot");

    assert!(!snapshot.has_data);
    assert_eq!(snapshot.message.as_deref(), Some("No analysis found"));
}

#[tokio::test]
async fn fetch_report_hits_company_and_timestamp_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/company/report/C1/20250101_090000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "has_data": true,
            "analysis_date": "2025-01-01T09:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let key = ReportKey::new(CompanyId::from("C1"), "20250101_090000");
    let snapshot = test_client(&server.uri())
        .fetch_report(&key)
        .await
        .expect("should parse report");

    assert_eq!(snapshot.analysis_date.as_deref(), Some("2025-01-01T09:00:00"));
}

#[tokio::test]
async fn fetch_report_not_found_passes_status_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/company/report/C1/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Report not found"})),
        )
        .mount(&server)
        .await;

    let key = ReportKey::new(CompanyId::from("C1"), "missing");
    let err = test_client(&server.uri())
        .fetch_report(&key)
        .await
        .expect_err("404 must fail");

    assert!(
        matches!(err, AnalyticsError::Status { status: 404, ref body } if body.contains("Report not found")),
        "got {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::BackendFailure);
    assert_eq!(err.status(), 404);
}

#[tokio::test]
async fn trigger_analysis_posts_camel_case_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/company/fetch-news"))
        .and(body_json(serde_json::json!({
            "companyId": "C1",
            "analysisPeriod": "month"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .trigger_analysis(&CompanyId::from("C1"), AnalysisPeriod::Month)
        .await
        .expect("trigger should succeed");
}

#[tokio::test]
async fn malformed_json_is_internal_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/company/dashboard/C1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_live(&CompanyId::from("C1"))
        .await
        .expect_err("html is not a snapshot");

    assert!(matches!(err, AnalyticsError::Deserialize { .. }), "got {err:?}");
    assert_eq!(err.status(), 500);
}

#[tokio::test]
async fn unreachable_service_is_service_unavailable() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = test_client("http://127.0.0.1:9");
    let err = client
        .fetch_live(&CompanyId::from("C1"))
        .await
        .expect_err("connection must fail");

    assert!(matches!(err, AnalyticsError::Unreachable(_)), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    assert_eq!(err.status(), 503);
}
