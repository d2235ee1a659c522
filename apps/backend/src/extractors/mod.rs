pub mod case_id;
