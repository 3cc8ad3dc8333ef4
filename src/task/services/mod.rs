//! Application services for the task board and the review workflow.

mod collection;
mod review;

pub use collection::{
    Removal, TaskCollectionError, TaskCollectionResult, TaskCollectionService,
};
pub use review::{ReviewError, ReviewResult, ReviewService};
