//! Service layer: orchestration between domain logic and persistence.

pub mod case_context;
pub mod case_flow;
pub mod cases;
pub mod rankings;
pub mod users;
