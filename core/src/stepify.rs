//! The stepify pipeline: validate, prompt, generate, extract.

use serde::Serialize;
use serde_json::Value;

use crate::error::StepifyError;
use crate::extract::extract_json_with_path;
use crate::generation::{GenerationParams, ModelLoad};
use crate::prompt::build_stepify_prompt;
use crate::task::{process_text, schema_report, RuleTask};

/// Result of a successful model run. Serializes as `{"tasks": ...}` or
/// `{"raw": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepifyOutcome {
    Tasks(Value),
    Raw(String),
}

fn non_empty_input(text: Option<&str>) -> Result<&str, StepifyError> {
    let text = text.unwrap_or_default().trim();
    if text.is_empty() {
        return Err(StepifyError::EmptyInput);
    }
    Ok(text)
}

/// Ask the loaded model for microtasks.
///
/// Input is checked before model availability, so empty text is rejected
/// even when the server runs degraded.
pub async fn ai_stepify(
    model: &ModelLoad,
    text: Option<&str>,
    params: &GenerationParams,
) -> Result<StepifyOutcome, StepifyError> {
    let text = non_empty_input(text)?;
    let prompt = build_stepify_prompt(text);

    let generator = model.generator().ok_or(StepifyError::ModelUnavailable)?;

    let raw = generator
        .generate(&prompt, params)
        .await
        .map_err(|e| StepifyError::Generation(format!("{e:#}")))?;

    tracing::debug!(
        target: "stepify.ai",
        generator = generator.name(),
        input_len = text.len(),
        output_len = raw.len(),
        "generation finished"
    );

    match extract_json_with_path(&raw) {
        Some((value, path)) => {
            let report = schema_report(&value);
            tracing::debug!(
                target: "stepify.ai",
                path = ?path,
                items = report.items,
                conforming = report.conforming,
                "extracted structured output"
            );
            Ok(StepifyOutcome::Tasks(value))
        }
        None => {
            tracing::debug!(target: "stepify.ai", "no JSON in model output, returning raw text");
            Ok(StepifyOutcome::Raw(raw))
        }
    }
}

/// Model-free variant using the keyword rules.
pub fn rule_stepify(text: Option<&str>) -> Result<Vec<RuleTask>, StepifyError> {
    let text = non_empty_input(text)?;
    Ok(process_text(text))
}
