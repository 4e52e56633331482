//! Keyword-based stepifier. Turns text into microtasks without a model.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use super::types::{Priority, RuleTask, TaskStatus, TaskType};
use crate::prompt::MAX_TASKS;

const SAFETY_KW: &[&str] = &[
    "避難", "救急", "けが", "危険", "火災", "怪我", "救助", "救護", "緊急", "急病",
];
const SUPPLY_KW: &[&str] = &[
    "備品", "消耗", "在庫", "数える", "数", "部数", "ペン", "電池", "充電",
];
const GUIDANCE_KW: &[&str] = &[
    "案内", "誘導", "誘導する", "道案内", "入口", "出口", "受付", "案内所",
];
const PHOTO_KW: &[&str] = &["写真", "撮る", "撮影", "camera", "photo"];
const INFO_KW: &[&str] = &["情報", "確認", "チェック", "確認する"];

const TITLE_MAX_CHARS: usize = 60;
const TITLE_KEEP_CHARS: usize = 57;
const DEDUP_KEY_CHARS: usize = 80;

lazy_static! {
    static ref NEWLINES_RE: Regex = Regex::new(r"\n+").expect("static regex");
    static ref SENTENCE_SPLIT_RE: Regex = Regex::new(r"\n|[。.!?！？]").expect("static regex");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("static regex");
    static ref URGENT_RE: Regex =
        Regex::new(r"(?i)緊急|至急|早急|急いで|urgent|asap").expect("static regex");
    static ref NUMBER_RE: Regex = Regex::new(r"[0-9]+(?:人|名|件|個)?").expect("static regex");
    static ref PHONE_RE: Regex = Regex::new(r"0[0-9][-0-9]{6,}").expect("static regex");
    static ref EMAIL_RE: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("static regex");
}

/// Split, classify and dedupe; at most [`MAX_TASKS`] tasks.
pub fn process_text(text: &str) -> Vec<RuleTask> {
    let raw = text.replace('\r', "");
    let normalized = NEWLINES_RE.replace_all(raw.trim(), "\n");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut tasks = Vec::new();

    let sentences = SENTENCE_SPLIT_RE
        .split(normalized)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    for sentence in sentences {
        if !seen.insert(dedup_key(sentence)) {
            continue;
        }

        let task_type = detect_type(sentence);
        tasks.push(RuleTask {
            id: format!("t{}", tasks.len() + 1),
            title: make_title(sentence),
            description: make_description(sentence),
            task_type,
            priority: detect_priority(sentence, task_type),
            checklist: checklist_for(task_type),
            estimated_minutes: estimate_minutes(task_type),
            status: TaskStatus::Open,
        });

        if tasks.len() >= MAX_TASKS {
            break;
        }
    }

    tasks
}

fn dedup_key(sentence: &str) -> String {
    let head: String = sentence.chars().take(DEDUP_KEY_CHARS).collect();
    WHITESPACE_RE.replace_all(&head, " ").to_lowercase()
}

fn contains_any(s: &str, keywords: &[&str]) -> bool {
    let lowered = s.to_lowercase();
    keywords.iter().any(|k| lowered.contains(k))
}

fn detect_type(s: &str) -> TaskType {
    if contains_any(s, SAFETY_KW) {
        TaskType::Safety
    } else if contains_any(s, SUPPLY_KW) {
        TaskType::Supply
    } else if contains_any(s, GUIDANCE_KW) {
        TaskType::Guidance
    } else if contains_any(s, PHOTO_KW) {
        TaskType::Photo
    } else if contains_any(s, INFO_KW) {
        TaskType::Info
    } else {
        TaskType::Action
    }
}

fn detect_priority(s: &str, task_type: TaskType) -> Priority {
    if task_type == TaskType::Safety || URGENT_RE.is_match(s) {
        return Priority::High;
    }
    match task_type {
        TaskType::Supply | TaskType::Guidance => Priority::Medium,
        _ => Priority::Low,
    }
}

fn estimate_minutes(task_type: TaskType) -> u32 {
    match task_type {
        TaskType::Safety => 5,
        TaskType::Supply => 10,
        TaskType::Photo => 3,
        _ => 8,
    }
}

fn checklist_for(task_type: TaskType) -> Vec<String> {
    let items: &[&str] = if task_type == TaskType::Safety {
        &["安全確保", "連絡", "完了報告"]
    } else {
        &["実行する", "完了報告"]
    };
    items.iter().map(|s| s.to_string()).collect()
}

fn make_title(sentence: &str) -> String {
    if sentence.chars().count() > TITLE_MAX_CHARS {
        let head: String = sentence.chars().take(TITLE_KEEP_CHARS).collect();
        format!("{head}...")
    } else {
        sentence.to_string()
    }
}

fn make_description(sentence: &str) -> String {
    let mut description = sentence.to_string();

    let numbers: Vec<&str> = NUMBER_RE.find_iter(sentence).map(|m| m.as_str()).collect();
    if !numbers.is_empty() {
        description.push_str("\n\n関連数値: ");
        description.push_str(&numbers.join(", "));
    }

    let contacts: Vec<&str> = PHONE_RE
        .find_iter(sentence)
        .chain(EMAIL_RE.find_iter(sentence))
        .map(|m| m.as_str())
        .collect();
    if !contacts.is_empty() {
        description.push_str("\n\n連絡先: ");
        description.push_str(&contacts.join(", "));
    }

    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classifies_mixed_text() {
        let tasks = process_text("写真を撮る。来場者を誘導する。忘れ物を数える。怪我人がいる。");
        assert_eq!(tasks.len(), 4);

        assert_eq!(tasks[0].task_type, TaskType::Photo);
        assert_eq!(tasks[0].priority, Priority::Low);
        assert_eq!(tasks[0].estimated_minutes, 3);

        assert_eq!(tasks[1].task_type, TaskType::Guidance);
        assert_eq!(tasks[1].priority, Priority::Medium);

        assert_eq!(tasks[2].task_type, TaskType::Supply);
        assert_eq!(tasks[2].estimated_minutes, 10);

        assert_eq!(tasks[3].task_type, TaskType::Safety);
        assert_eq!(tasks[3].priority, Priority::High);
        assert_eq!(tasks[3].estimated_minutes, 5);
        assert_eq!(tasks[3].checklist, vec!["安全確保", "連絡", "完了報告"]);

        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_urgent_words_raise_priority() {
        let tasks = process_text("Bring the chairs ASAP");
        assert_eq!(tasks[0].task_type, TaskType::Action);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].estimated_minutes, 8);
    }

    #[test]
    fn test_caps_at_six_and_dedupes() {
        let text = "a. a. b. c. d. e. f. g. h.";
        let tasks = process_text(text);
        assert_eq!(tasks.len(), MAX_TASKS);
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_long_sentence_title_is_truncated() {
        let sentence = "x".repeat(70);
        let tasks = process_text(&sentence);
        assert_eq!(tasks[0].title.chars().count(), 60);
        assert!(tasks[0].title.ends_with("..."));
        assert_eq!(tasks[0].description, sentence);
    }

    #[test]
    fn test_description_lists_numbers_and_contacts() {
        let tasks = process_text("受付に3人 連絡は 090-1234-5678");
        assert_eq!(tasks.len(), 1);
        let d = &tasks[0].description;
        assert!(d.contains("関連数値: 3人, 090, 1234, 5678"));
        assert!(d.contains("連絡先: 090-1234-5678"));
    }

    #[test]
    fn test_empty_text() {
        assert!(process_text("  \r\n ").is_empty());
        assert!(process_text("。。!?").is_empty());
    }
}
