use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Safety,
    Supply,
    Guidance,
    Photo,
    Info,
    Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// The object shape the model is asked to emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Microtask {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub priority: Priority,
    pub estimated_minutes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Open,
}

/// A task produced by the keyword stepifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTask {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub priority: Priority,
    pub checklist: Vec<String>,
    pub estimated_minutes: u32,
    pub status: TaskStatus,
}

/// How much of a recovered value matches the requested microtask shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchemaReport {
    pub items: usize,
    pub conforming: usize,
}

/// Count entries that deserialize as [`Microtask`]. Informational only:
/// recovered values are passed through untouched either way.
pub fn schema_report(value: &Value) -> SchemaReport {
    let Value::Array(items) = value else {
        return SchemaReport::default();
    };

    let conforming = items
        .iter()
        .filter(|item| Microtask::deserialize(*item).is_ok())
        .count();

    SchemaReport {
        items: items.len(),
        conforming,
    }
}
