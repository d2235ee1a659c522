//! Path extractor for case ids.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Extracts and validates the `case_id` path segment.
#[derive(Debug, Clone, Copy)]
pub struct CaseId(pub i64);

impl FromRequest for CaseId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("case_id")
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|id| *id > 0);

        ready(match parsed {
            Some(id) => Ok(CaseId(id)),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidCaseId,
                "case_id must be a positive integer",
            )),
        })
    }
}
