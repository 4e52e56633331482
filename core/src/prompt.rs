/// Maximum number of microtasks the model is asked for.
pub const MAX_TASKS: usize = 6;

const INSTRUCTIONS: &str = "Extract up to 6 microtasks from the following text. \
Return a JSON array of objects. Each object must contain: title, description, type, priority, estimatedMinutes. \
Types should be one of: safety, supply, guidance, photo, info, action. Priorities: high, medium, low. \
Keep descriptions concise. Text:\n";

/// Build the fixed instruction prompt with `text` appended verbatim.
pub fn build_stepify_prompt(text: &str) -> String {
    let mut prompt = String::with_capacity(INSTRUCTIONS.len() + text.len());
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str(text);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let prompt = build_stepify_prompt("Check smoke alarms.\nRestock water.");
        assert!(prompt.ends_with("Text:\nCheck smoke alarms.\nRestock water."));
    }

    #[test]
    fn test_prompt_names_schema() {
        let prompt = build_stepify_prompt("x");
        assert!(prompt.starts_with("Extract up to 6 microtasks"));
        assert!(prompt.contains("title, description, type, priority, estimatedMinutes"));
        assert!(prompt.contains("safety, supply, guidance, photo, info, action"));
        assert!(prompt.contains("Priorities: high, medium, low."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_stepify_prompt("same"), build_stepify_prompt("same"));
    }
}
