//! Classifier adapter that prompts a text-completion model.

use async_trait::async_trait;
use minijinja::{Environment, context};
use serde::Deserialize;
use tracing::debug;

use crate::task::{
    domain::{Classification, Level},
    ports::{ClassificationRequest, Classifier, ClassifierError, ClassifierResult, CompletionBackend},
};

const PROMPT_TEMPLATE: &str = "\
Analyse the following task using the Eisenhower Matrix.
Task title: {{ title }}
Description: {{ description or \"No description provided.\" }}
Due date: {{ complete_by }}
User self-assessed urgency: {{ urgency or \"Not provided\" }}
User self-assessed importance: {{ importance or \"Not provided\" }}

Decide the urgency and the importance, each one of Low, Medium or High.
If the user gave their own assessment, acknowledge it but give an objective view.
Answer with a single JSON object and nothing else:
{\"urgency\": \"Low|Medium|High\", \"importance\": \"Low|Medium|High\", \"justification\": \"...\"}
";

#[derive(Debug, Deserialize)]
struct RawAnswer {
    urgency: String,
    importance: String,
    justification: String,
}

/// Classifier that renders a prompt and parses the model's JSON answer.
///
/// Transport errors, malformed JSON, unknown levels, and blank
/// justifications all surface as [`ClassifierError`].
#[derive(Debug, Clone)]
pub struct PromptClassifier<B> {
    backend: B,
}

impl<B> PromptClassifier<B>
where
    B: CompletionBackend,
{
    /// Creates a classifier over `backend`.
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Renders the prompt sent for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] when the template fails to render.
    pub fn render_prompt(request: &ClassificationRequest) -> ClassifierResult<String> {
        let environment = Environment::new();
        let ctx = context! {
            title => request.title,
            description => request.description.trim(),
            complete_by => request.complete_by.date().to_string(),
            urgency => request.self_assessment.urgency.map(Level::as_str),
            importance => request.self_assessment.importance.map(Level::as_str),
        };
        environment
            .render_str(PROMPT_TEMPLATE, ctx)
            .map_err(|err| ClassifierError::new(format!("prompt rendering failed: {err}")))
    }
}

/// Parses a model answer into a classification.
///
/// A surrounding Markdown code fence is tolerated.
///
/// # Errors
///
/// Returns [`ClassifierError`] for malformed JSON, a missing field, an
/// unknown level, or a blank justification.
pub fn parse_answer(answer: &str) -> ClassifierResult<Classification> {
    let body = strip_code_fence(answer);
    let raw: RawAnswer = serde_json::from_str(body)
        .map_err(|err| ClassifierError::new(format!("malformed classifier answer: {err}")))?;
    let urgency = parse_level(&raw.urgency)?;
    let importance = parse_level(&raw.importance)?;
    let justification = raw.justification.trim();
    if justification.is_empty() {
        return Err(ClassifierError::new("classifier answer has no justification"));
    }
    Ok(Classification::new(urgency, importance, justification))
}

fn parse_level(value: &str) -> ClassifierResult<Level> {
    Level::try_from(value).map_err(|err| ClassifierError::new(err.to_string()))
}

fn strip_code_fence(answer: &str) -> &str {
    let trimmed = answer.trim();
    let Some(fenced) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = fenced.strip_prefix("json").unwrap_or(fenced);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[async_trait]
impl<B> Classifier for PromptClassifier<B>
where
    B: CompletionBackend,
{
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> ClassifierResult<Classification> {
        let prompt = Self::render_prompt(request)?;
        let answer = self
            .backend
            .complete(&prompt)
            .await
            .map_err(|err| ClassifierError::new(err.to_string()))?;
        debug!(chars = answer.len(), "classifier answer received");
        parse_answer(&answer)
    }
}
