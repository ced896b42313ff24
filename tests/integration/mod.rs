//! Integration tests exercising the full fetch → process → aggregate →
//! check pipeline across crate boundaries.

mod pipeline_tests;
mod fetch_tests;
mod checker_tests;
