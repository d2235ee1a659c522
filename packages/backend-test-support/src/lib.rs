//! Shared helpers for backend integration tests.

pub mod logging;
pub mod problem_details;

pub use problem_details::{assert_problem_details_from_parts, assert_problem_details_from_srv_response};
