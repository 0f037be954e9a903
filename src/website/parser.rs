use super::entry::IndexEntry;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static ENTRY_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<a[^>]*>.*?</a>").expect("valid regex"));

static DATE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<p className="tertiary-text-color tl">([^<]+)</p>"#).expect("valid regex")
});

/// Display format first, then the legacy long-month labels already on disk,
/// then raw ISO. First match wins.
const DATE_FORMATS: &[&str] = &["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d"];

pub fn parse_date_label(label: &str) -> Option<NaiveDate> {
    let label = label.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(label, format).ok())
}

/// Recovers the ordered entry sequence from the raw text of the entry-list
/// region. Entries are non-nested anchor blocks; a block whose date label is
/// missing or unparseable is kept with `date: None` and its text intact, so a
/// later rewrite reproduces it byte-for-byte. An empty region yields an empty
/// sequence.
pub fn parse_entries(region_text: &str) -> Vec<IndexEntry> {
    ENTRY_BLOCK
        .find_iter(region_text)
        .map(|block| {
            let text = block.as_str().to_string();
            let date = DATE_LABEL
                .captures(block.as_str())
                .and_then(|caps| caps.get(1))
                .and_then(|label| parse_date_label(label.as_str()));
            IndexEntry { text, date }
        })
        .collect()
}
