pub mod rules;
mod types;

pub use rules::process_text;
pub use types::{
    schema_report, Microtask, Priority, RuleTask, SchemaReport, TaskStatus, TaskType,
};
