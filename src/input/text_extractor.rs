//! Text extraction from plain-text and Markdown sources

use crate::error::{Result, ScreenerError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            ScreenerError::InvalidInput(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(|e| {
            ScreenerError::InvalidInput(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        Ok(markdown_to_text(&markdown_content))
    }
}

/// Flatten Markdown to plain text, keeping one line per block and list item
/// so list markers survive as bullets for skill extraction. Headings, lists and
/// top-level paragraphs are separated by a blank line.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut item_depth = 0usize;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Item) => {
                flush(&mut current, &mut lines);
                item_depth += 1;
                current.push_str("- ");
            }
            Event::End(Tag::Item) => {
                flush(&mut current, &mut lines);
                item_depth = item_depth.saturating_sub(1);
            }
            Event::Start(Tag::Heading(..)) => {
                flush(&mut current, &mut lines);
                push_blank(&mut lines);
            }
            Event::Start(Tag::Paragraph) => {
                if current.trim() != "-" {
                    flush(&mut current, &mut lines);
                }
            }
            Event::End(Tag::Paragraph) => {
                flush(&mut current, &mut lines);
                if item_depth == 0 {
                    push_blank(&mut lines);
                }
            }
            Event::End(Tag::List(_)) => {
                flush(&mut current, &mut lines);
                if item_depth == 0 {
                    push_blank(&mut lines);
                }
            }
            Event::End(Tag::Heading(..)) | Event::SoftBreak | Event::HardBreak => {
                flush(&mut current, &mut lines);
            }
            Event::Text(text) | Event::Code(text) => current.push_str(&text),
            _ => {}
        }
    }
    flush(&mut current, &mut lines);

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn flush(current: &mut String, lines: &mut Vec<String>) {
    let line = current.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
    current.clear();
}

/// Blank separator line, never doubled and never leading
fn push_blank(lines: &mut Vec<String>) {
    if lines.last().is_some_and(|line| !line.is_empty()) {
        lines.push(String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::skill_extractor::SkillExtractor;
    use crate::processing::Vocabulary;

    #[test]
    fn test_markdown_flattening() {
        let markdown = "# Jane Doe\n\n**Backend Engineer**\n\n## Skills\n\n- Rust\n- `Kafka`\n";
        let text = markdown_to_text(markdown);
        assert_eq!(text, "Jane Doe\nBackend Engineer\n\nSkills\n- Rust\n- Kafka");
    }

    #[test]
    fn test_prose_after_skills_list_leaves_section() {
        let markdown = "# Jane Doe\n\n## Skills\n\n- Rust\n\nI once adopted a python named Monty.\n";
        let text = markdown_to_text(markdown);
        assert_eq!(text, "Jane Doe\n\nSkills\n- Rust\n\nI once adopted a python named Monty.");

        let extractor = SkillExtractor::new(Vocabulary::builtin()).unwrap();
        assert_eq!(extractor.extract(&text), vec!["rust"]);
    }

    #[test]
    fn test_nested_and_loose_lists_stay_in_section() {
        let markdown = "## Skills\n\n- Rust\n\n- Languages\n  - Go\n\n- Kafka\n\nThanks for reading.\n";
        let text = markdown_to_text(markdown);
        assert_eq!(text, "Skills\n- Rust\n- Languages\n- Go\n- Kafka\n\nThanks for reading.");
    }
}
