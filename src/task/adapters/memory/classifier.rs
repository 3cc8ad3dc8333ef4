//! Offline classifier adapters.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::task::{
    domain::Classification,
    ports::{ClassificationRequest, Classifier, ClassifierError, ClassifierResult},
};

/// Classifier that replays queued answers in order.
///
/// Every request is recorded so tests can inspect what was sent. When the
/// queue is empty the call fails.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClassifier {
    script: Arc<Mutex<VecDeque<ClassifierResult<Classification>>>>,
    requests: Arc<Mutex<Vec<ClassificationRequest>>>,
}

impl ScriptedClassifier {
    /// Creates a classifier with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful answer.
    #[must_use]
    pub fn then_answer(self, classification: Classification) -> Self {
        self.push(Ok(classification));
        self
    }

    /// Queues a failure.
    #[must_use]
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(Err(ClassifierError::new(message)));
        self
    }

    /// Queues an answer or failure on a shared classifier.
    pub fn push(&self, outcome: ClassifierResult<Classification>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    /// Returns every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ClassificationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> ClassifierResult<Classification> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ClassifierError::new("no scripted classification left")))
    }
}

/// Classifier that echoes the user's own assessment.
///
/// Useful when no model is configured: the review flow still works, and the
/// result matches what a quick create would have produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfAssessmentClassifier;

impl SelfAssessmentClassifier {
    /// Justification attached to echoed assessments.
    pub const JUSTIFICATION: &'static str =
        "No classifier configured; the self-assessment was used as given.";
}

#[async_trait]
impl Classifier for SelfAssessmentClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> ClassifierResult<Classification> {
        let assessment = request.self_assessment.or_low();
        Ok(Classification::new(
            assessment.urgency,
            assessment.importance,
            Self::JUSTIFICATION,
        ))
    }
}
