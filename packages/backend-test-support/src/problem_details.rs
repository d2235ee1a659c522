//! Problem Details assertion helpers for backend testing.
//!
//! These operate on raw response parts so tests do not depend on backend
//! types, only on the stable wire contract.

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Local mirror of the backend's ProblemDetails body.
#[derive(Debug, Deserialize, Serialize)]
struct ProblemDetailsLike {
    #[serde(rename = "type")]
    type_: String,
    title: String,
    status: u16,
    detail: String,
    code: String,
    trace_id: String,
}

/// Assert that response parts conform to the stable error contract:
/// status matches, the body parses as ProblemDetails, and the code /
/// detail fields match expectations.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    body_bytes: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) {
    assert_eq!(
        status, expected_status,
        "unexpected HTTP status (body: {})",
        String::from_utf8_lossy(body_bytes)
    );

    let body: ProblemDetailsLike = serde_json::from_slice(body_bytes)
        .unwrap_or_else(|e| panic!("response body is not ProblemDetails: {e}"));

    assert_eq!(body.code, expected_code);
    assert_eq!(body.status, expected_status.as_u16());
    assert!(!body.trace_id.is_empty(), "trace_id must be present");

    if let Some(needle) = expected_detail_contains {
        assert!(
            body.detail.contains(needle),
            "detail {:?} does not contain {:?}",
            body.detail,
            needle
        );
    }
}

/// Assert the error contract on a test-server response from `actix_web::test`.
pub async fn assert_problem_details_from_srv_response<B>(
    resp: actix_web::dev::ServiceResponse<B>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) where
    B: actix_web::body::MessageBody,
{
    let status = resp.status();
    let body = actix_web::test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &body,
        expected_code,
        expected_status,
        expected_detail_contains,
    );
}
