//! Domain model for task prioritization.
//!
//! The domain covers the urgency/importance taxonomy, quadrant placement,
//! and the task lifecycle. It has no knowledge of storage, classification
//! providers, or presentation.

mod assessment;
mod draft;
mod error;
mod ids;
mod level;
mod quadrant;
mod task;

pub use assessment::{Assessment, Classification, SelfAssessment};
pub use draft::{DraftFields, ReviewEdits, TaskDraft, TaskPatch};
pub use error::{ParseLevelError, ParseQuadrantError, ParseTaskStatusError, TaskDomainError};
pub use ids::{DueDate, TaskId, TaskTitle};
pub use level::Level;
pub use quadrant::{Quadrant, QuadrantGroups};
pub use task::{PersistedTaskData, Task, TaskStatus, UNASSESSED_JUSTIFICATION};
