use crate::errors::{AppError, AppResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static HEADING_MARKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("valid regex"));
static BOLD_MARKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid regex"));
static ITALIC_MARKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("valid regex"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));
static LINK_SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid regex"));
static EXCESS_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n\s*\n").expect("valid regex"));
static FIRST_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("valid regex"));
static FILENAME_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Markdown,
    PlainText,
}

pub fn note_kind(path: &Path) -> AppResult<NoteKind> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "md" => Ok(NoteKind::Markdown),
        "txt" | "notes" => Ok(NoteKind::PlainText),
        other => Err(AppError::Cli(format!(
            "unsupported note type '.{other}'; supported types: .md, .notes, .txt"
        ))),
    }
}

/// Reads the raw note. Existence is checked before the extension so a missing
/// file is reported as such regardless of its name.
pub fn read_note(path: &Path) -> AppResult<String> {
    if !path.exists() {
        return Err(AppError::NotFound(format!(
            "note file not found: {}",
            path.display()
        )));
    }
    note_kind(path)?;
    let content = std::fs::read_to_string(path)
        .map_err(|error| AppError::Io(format!("{}: {}", path.display(), error)))?;
    tracing::info!(path = %path.display(), chars = content.chars().count(), "read note file");
    Ok(content)
}

/// Reduces a note to the prose the generator should see: formatting syntax is
/// stripped, structure markers removed, whitespace normalized.
pub fn clean_note(content: &str, kind: NoteKind) -> String {
    let mut text = content.replace("\r\n", "\n").replace('\r', "\n");

    if kind == NoteKind::Markdown {
        text = strip_frontmatter(&text).to_string();
        text = HEADING_MARKS.replace_all(&text, "").to_string();
        text = BOLD_MARKS.replace_all(&text, "$1").to_string();
        text = ITALIC_MARKS.replace_all(&text, "$1").to_string();
        text = INLINE_CODE.replace_all(&text, "$1").to_string();
        text = LINK_SYNTAX.replace_all(&text, "$1").to_string();
    }

    // A single pass can leave a fresh triple-blank behind, so run to fixpoint.
    loop {
        let collapsed = EXCESS_BLANK_LINES.replace_all(&text, "\n\n").to_string();
        if collapsed == text {
            break;
        }
        text = collapsed;
    }
    text.trim().to_string()
}

fn strip_frontmatter(content: &str) -> &str {
    if !content.starts_with("---") {
        return content;
    }
    let mut parts = content.splitn(3, "---");
    let _ = parts.next();
    let _ = parts.next();
    match parts.next() {
        Some(rest) => rest.trim_start(),
        None => content,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMetadata {
    pub title: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
}

/// Best-effort metadata: YAML frontmatter first, then the first heading for a
/// title and a date fragment in the file name. Nothing here is an error; a
/// note without metadata is the normal case.
pub fn note_metadata(content: &str, file_name: &str) -> NoteMetadata {
    let mut metadata = NoteMetadata::default();

    if let Some(frontmatter) = frontmatter_block(content) {
        if let Ok(value) = serde_yaml::from_str::<serde_yaml::Value>(frontmatter) {
            metadata.title = value
                .get("title")
                .and_then(|title| title.as_str())
                .map(str::to_string);
            metadata.date = value.get("date").map(yaml_scalar_to_string);
            metadata.tags = value
                .get("tags")
                .and_then(|tags| tags.as_sequence())
                .map(|tags| {
                    tags.iter()
                        .filter_map(|tag| tag.as_str())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
        }
    }

    if metadata.title.is_none() {
        metadata.title = FIRST_HEADING
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|title| title.as_str().trim().to_string());
    }

    if metadata.date.is_none() {
        metadata.date = FILENAME_DATE
            .find(file_name)
            .map(|fragment| fragment.as_str().to_string());
    }

    metadata
}

fn frontmatter_block(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---")?;
    let end = rest.find("---")?;
    Some(&rest[..end])
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => serde_yaml::to_string(value)
            .map(|rendered| rendered.trim().to_string())
            .unwrap_or_default(),
    }
}
