//! Unit tests for task prioritization.

mod domain_tests;
mod support;
