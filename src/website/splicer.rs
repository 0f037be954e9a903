use super::entry::{IndexEntry, ISO_DATE_FORMAT};
use super::parser::parse_entries;
use super::planner::insertion_index;
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Full region: opening anchor, entry list, three consecutive closing divs.
static REGION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)(<div className="mt10 ma20-l">)(.*?)(\s*</div>\s*</div>\s*</div>)"#)
        .expect("valid regex")
});

/// Degraded locator: the opening anchor followed by the first entry block.
static FIRST_ENTRY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)(<div className="mt10 ma20-l">\s*)(<a[^>]*>.*?</a>)"#).expect("valid regex")
});

const ENTRY_INDENT: &str = "                ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpliceError {
    #[error("entry region not found in document")]
    RegionNotFound,
}

/// Date used to place the new entry. An unparseable input is treated as
/// today, which puts the entry at the front of any backlog of older posts.
pub fn resolve_entry_date(date_iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_iso.trim(), ISO_DATE_FORMAT).unwrap_or_else(|_| {
        tracing::debug!(date = %date_iso, "unparseable post date; placing as if published today");
        Local::now().date_naive()
    })
}

/// Splices `rendered_entry` into `document` at its chronological position.
///
/// The full anchor pattern is tried first; when only the opening anchor and a
/// single entry block can be located, the new entry is prepended before that
/// first entry instead of being placed chronologically. When neither pattern
/// matches the document is left for a manual edit and `RegionNotFound` is
/// returned; no partially rewritten document is ever produced.
pub fn splice_entry(
    document: &str,
    rendered_entry: &str,
    date_iso: &str,
) -> Result<String, SpliceError> {
    if let Some(caps) = REGION_PATTERN.captures(document) {
        if let Some(updated) = rewrite_region(document, &caps, rendered_entry, date_iso) {
            return Ok(updated);
        }
    }

    if let Some(caps) = FIRST_ENTRY_PATTERN.captures(document) {
        if let Some(updated) = prepend_before_first_entry(document, &caps, rendered_entry) {
            tracing::warn!("full entry region not located; prepended before first entry");
            return Ok(updated);
        }
    }

    tracing::error!("no entry region or entry block located; index needs a manual edit");
    Err(SpliceError::RegionNotFound)
}

fn rewrite_region(
    document: &str,
    caps: &regex::Captures<'_>,
    rendered_entry: &str,
    date_iso: &str,
) -> Option<String> {
    let prefix = caps.get(1)?;
    let body = caps.get(2)?;
    let suffix = caps.get(3)?;

    let mut entries = parse_entries(body.as_str());
    let position = insertion_index(&entries, resolve_entry_date(date_iso));
    entries.insert(
        position,
        IndexEntry {
            text: rendered_entry.trim().to_string(),
            date: NaiveDate::parse_from_str(date_iso.trim(), ISO_DATE_FORMAT).ok(),
        },
    );

    let mut updated = String::with_capacity(document.len() + rendered_entry.len() + 32);
    updated.push_str(&document[..prefix.end()]);
    for entry in &entries {
        updated.push('\n');
        updated.push_str(ENTRY_INDENT);
        updated.push_str(&entry.text);
    }
    updated.push_str(&document[suffix.start()..]);
    Some(updated)
}

fn prepend_before_first_entry(
    document: &str,
    caps: &regex::Captures<'_>,
    rendered_entry: &str,
) -> Option<String> {
    let prefix = caps.get(1)?;
    let first_entry = caps.get(2)?;

    let mut updated = String::with_capacity(document.len() + rendered_entry.len() + 32);
    updated.push_str(&document[..prefix.end()]);
    updated.push_str(rendered_entry.trim());
    updated.push('\n');
    updated.push_str(ENTRY_INDENT);
    updated.push_str(&document[first_entry.start()..]);
    Some(updated)
}
