//! Tasq: Eisenhower-matrix task prioritization.
//!
//! This crate provides the prioritization engine behind a personal task
//! board: quadrant placement rules, the task lifecycle from draft through
//! review to completion, and the mapping between quadrants and
//! urgency/importance levels used for manual reassignment.
//!
//! # Architecture
//!
//! Tasq follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage, classification, and
//!   presentation
//! - **Adapters**: Concrete implementations of ports (memory, JSON file,
//!   `PostgreSQL`, prompt-based classification)
//!
//! # Modules
//!
//! - [`config`]: Environment-driven configuration
//! - [`task`]: Board, review workflow, and persistence

pub mod config;
pub mod task;
