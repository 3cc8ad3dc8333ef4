//! Step definitions for task review scenarios.

mod given;
mod then;
mod when;
pub mod world;
