//! Prompt assembly
//!
//! The analysis mode is a pure function of the file count, and every mode maps to
//! a fixed system instruction, question label and success message. Per-file
//! content is cut to an equal share of [`MAX_CONTENT_LENGTH`].

use std::borrow::Cow;

use serde::Serialize;

use crate::types::{AppError, AppResult, LLMMessage};

/// Character ceiling shared by all files of one request.
pub const MAX_CONTENT_LENGTH: usize = 100_000;
pub const MAX_FILES: usize = 10;
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated...]";

const SINGLE_FILE_INSTRUCTION: &str = "You are an expert data analyst. Analyze the provided file content and answer the user's question accurately.
- Provide clear, structured responses
- If data contains numbers, provide calculations when relevant
- If you cannot find the answer, clearly state that
- Use markdown formatting for better readability";

const COMPARISON_INSTRUCTION: &str = "You are an expert data analyst specializing in file comparison.
- Compare the two provided files and identify key differences
- Highlight additions, deletions, and modifications
- If data contains numbers, calculate variances and percentage changes
- Provide a clear summary with a comparison table
- Use markdown formatting for better readability";

const MULTI_FILE_INSTRUCTION: &str = "You are an expert data analyst specializing in multi-file analysis and trend identification.
- Analyze all provided files together
- Identify patterns, trends, and correlations across files
- If data contains numbers, calculate variances, totals, and percentages
- Provide consolidated insights from all files
- Use markdown formatting with tables where appropriate
- Answer specific questions considering data from all files";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Single,
    Comparison,
    Multi,
}

impl AnalysisMode {
    pub fn from_file_count(count: usize) -> Self {
        match count {
            0 | 1 => AnalysisMode::Single,
            2 => AnalysisMode::Comparison,
            _ => AnalysisMode::Multi,
        }
    }

    pub fn system_instruction(self) -> &'static str {
        match self {
            AnalysisMode::Single => SINGLE_FILE_INSTRUCTION,
            AnalysisMode::Comparison => COMPARISON_INSTRUCTION,
            AnalysisMode::Multi => MULTI_FILE_INSTRUCTION,
        }
    }

    pub fn question_label(self) -> &'static str {
        match self {
            AnalysisMode::Single => "Question",
            AnalysisMode::Comparison => "Comparison Question",
            AnalysisMode::Multi => "Analysis Question",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            AnalysisMode::Single => "Single file analysis completed successfully",
            AnalysisMode::Comparison => "File comparison completed successfully",
            AnalysisMode::Multi => "Multi-file analysis completed successfully",
        }
    }
}

/// Character budget for each of `file_count` files.
pub fn per_file_budget(file_count: usize) -> usize {
    MAX_CONTENT_LENGTH / file_count.max(1)
}

/// Hard cut after `max_chars` characters, followed by [`TRUNCATION_MARKER`].
pub fn truncate_content(content: &str, max_chars: usize) -> Cow<'_, str> {
    match content.char_indices().nth(max_chars) {
        None => Cow::Borrowed(content),
        Some((cut, _)) => Cow::Owned(format!("{}{}", &content[..cut], TRUNCATION_MARKER)),
    }
}

/// Extracted text of one file, labelled with the name shown to the model.
#[derive(Debug, Clone)]
pub struct FileContent {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub mode: AnalysisMode,
    pub system_instruction: String,
    pub user_message: String,
}

impl Prompt {
    pub fn assemble(files: &[FileContent], user_query: &str) -> AppResult<Self> {
        if files.is_empty() {
            return Err(AppError::Validation(
                "At least one file is required for analysis".to_string(),
            ));
        }

        let mode = AnalysisMode::from_file_count(files.len());
        let budget = per_file_budget(files.len());

        Ok(Self {
            mode,
            system_instruction: mode.system_instruction().to_string(),
            user_message: build_user_message(files, user_query, budget, mode),
        })
    }

    /// The system/user message pair sent to the completion API.
    pub fn into_messages(self) -> Vec<LLMMessage> {
        vec![
            LLMMessage::system(self.system_instruction),
            LLMMessage::user(self.user_message),
        ]
    }
}

fn build_user_message(
    files: &[FileContent],
    user_query: &str,
    budget: usize,
    mode: AnalysisMode,
) -> String {
    let mut sections = String::new();

    if let [file] = files {
        let content = truncate_content(&file.content, budget);
        sections.push_str(&format!("## File: {}\n```\n{}\n```", file.filename, content));
    } else {
        for (index, file) in files.iter().enumerate() {
            let content = truncate_content(&file.content, budget);
            sections.push_str(&format!(
                "## File {}: {}\n```\n{}\n```\n\n",
                index + 1,
                file.filename,
                content
            ));
        }
    }

    format!("{}\n\n## {}:\n{}", sections, mode.question_label(), user_query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content: &str) -> FileContent {
        FileContent {
            filename: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_mode_from_count() {
        assert_eq!(AnalysisMode::from_file_count(1), AnalysisMode::Single);
        assert_eq!(AnalysisMode::from_file_count(2), AnalysisMode::Comparison);
        for n in 3..=MAX_FILES {
            assert_eq!(AnalysisMode::from_file_count(n), AnalysisMode::Multi);
        }
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AnalysisMode::Comparison).unwrap(), "\"comparison\"");
    }

    #[test]
    fn test_truncate_passes_short_content() {
        assert_eq!(truncate_content("hello", 5), "hello");
        assert!(matches!(truncate_content("hello", 10), Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_cuts_and_marks() {
        let truncated = truncate_content("abcdefghij", 4);
        assert_eq!(truncated, "abcd\n\n[Content truncated...]");
        assert_eq!(truncated.chars().count(), 4 + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let once = truncate_content("the quick brown fox jumps", 9).into_owned();
        let twice = truncate_content(&once, 9).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let truncated = truncate_content("ééééé", 2);
        assert_eq!(truncated, format!("éé{}", TRUNCATION_MARKER));
    }

    #[test]
    fn test_single_file_message() {
        let prompt = Prompt::assemble(&[file("q1.csv", "a,b\n1,2")], "What is b?").unwrap();

        assert_eq!(prompt.mode, AnalysisMode::Single);
        assert_eq!(prompt.system_instruction, SINGLE_FILE_INSTRUCTION);
        assert_eq!(
            prompt.user_message,
            "## File: q1.csv\n```\na,b\n1,2\n```\n\n## Question:\nWhat is b?"
        );
    }

    #[test]
    fn test_comparison_message() {
        let prompt = Prompt::assemble(&[file("a.txt", "one"), file("b.txt", "two")], "Diff?").unwrap();

        assert_eq!(prompt.mode, AnalysisMode::Comparison);
        assert_eq!(
            prompt.user_message,
            "## File 1: a.txt\n```\none\n```\n\n## File 2: b.txt\n```\ntwo\n```\n\n\n\n## Comparison Question:\nDiff?"
        );
    }

    #[test]
    fn test_three_files_use_multi_template_and_budget() {
        let big = "x".repeat(40_000);
        let files = [file("jan.csv", &big), file("feb.csv", &big), file("mar.csv", "short")];

        let prompt = Prompt::assemble(&files, "Trend?").unwrap();

        assert_eq!(per_file_budget(3), 33_333);
        assert_eq!(prompt.mode, AnalysisMode::Multi);
        assert_eq!(prompt.system_instruction, MULTI_FILE_INSTRUCTION);
        assert!(prompt.user_message.ends_with("## Analysis Question:\nTrend?"));
        assert_eq!(prompt.user_message.matches(TRUNCATION_MARKER).count(), 2);
        let expected_cut = format!("```\n{}{}\n```", "x".repeat(33_333), TRUNCATION_MARKER);
        assert!(prompt.user_message.contains(&expected_cut));
        assert!(prompt.user_message.contains("## File 3: mar.csv\n```\nshort\n```"));
    }

    #[test]
    fn test_empty_file_list_is_rejected() {
        assert!(matches!(Prompt::assemble(&[], "anything"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_into_messages_roles() {
        let messages = Prompt::assemble(&[file("a.txt", "x")], "q").unwrap().into_messages();
        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, ["system", "user"]);
    }
}
