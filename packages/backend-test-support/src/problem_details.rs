//! Problem Details assertions for HTTP error responses.
//!
//! Mirrors the backend's `application/problem+json` body without importing
//! backend types, so integration tests assert on the wire contract only.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProblemBody {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Read a service response and check it against the error contract.
///
/// Returns the parsed body so callers can make further assertions.
pub async fn expect_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
) -> ProblemBody {
    assert_eq!(resp.status(), expected_status);

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_default();
    assert_eq!(content_type, "application/problem+json");

    let header_trace = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("x-trace-id header should be present");

    let body = actix_web::test::read_body(resp).await;
    let problem: ProblemBody =
        serde_json::from_slice(&body).expect("body should be Problem Details JSON");

    assert_eq!(problem.trace_id, header_trace, "body trace_id must match header");
    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(problem.code, expected_code);
    problem
}
