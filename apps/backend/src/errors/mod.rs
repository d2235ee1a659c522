//! Error taxonomy: domain-level errors and centralized error codes.

pub mod domain;
pub mod error_code;

pub use error_code::ErrorCode;
