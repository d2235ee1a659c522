//! Repository functions for the domain layer.
//!
//! Thin wrappers over the adapters: lift `DbErr` into `DomainError` and
//! convert entity models into domain-facing structs.

pub mod case_results;
pub mod cases;
pub mod participants;
pub mod rankings;
pub mod scenarios;
pub mod submissions;
pub mod users;
pub mod verdicts;
