//! In-memory integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `board_tests`: Quick create, reassignment, completion, and clearing
//! - `review_flow_tests`: Classification, review, and acceptance

mod in_memory {
    pub mod helpers;

    mod board_tests;
    mod review_flow_tests;
}
