//! Task prioritization on an Eisenhower board.
//!
//! Tasks are placed in one of four quadrants by their urgency and
//! importance. A task is either placed directly (quick create) or first
//! classified and held for review. Once on the board it can be completed,
//! reassigned by dragging it to another quadrant, edited, or deleted. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
