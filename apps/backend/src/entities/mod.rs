//! SeaORM entity models. Enum columns are stored as short uppercase strings
//! so the same schema runs on Postgres and SQLite.

pub mod case_participants;
pub mod case_results;
pub mod cases;
pub mod rankings;
pub mod scenarios;
pub mod submissions;
pub mod users;
pub mod verdicts;
