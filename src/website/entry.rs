use super::escape_jsx;
use chrono::NaiveDate;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y";

/// One record of the writings index: the on-disk block text plus the date
/// recovered from its label. `date` is `None` when the label matches no known
/// format; such entries are carried verbatim and never reordered against each
/// other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub text: String,
    pub date: Option<NaiveDate>,
}

/// Formats an ISO date as the index display label (`Mar 01, 2024`). An input
/// that does not parse is shown verbatim rather than rejected.
pub fn display_date_label(date_iso: &str) -> String {
    match NaiveDate::parse_from_str(date_iso.trim(), ISO_DATE_FORMAT) {
        Ok(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => date_iso.to_string(),
    }
}

/// Renders one index entry block. `url_path` is pre-validated by slug
/// derivation and embedded as-is; the title is JSX-escaped.
pub fn render_entry(title: &str, date_iso: &str, url_path: &str) -> String {
    let escaped_title = escape_jsx(title);
    let label = display_date_label(date_iso);
    format!(
        r#"<a
                  className="primary-text-color ma0 pa0 f5 mr6 fw-bold"
                  href="{url_path}"
                >
                  <h4 className="f3 ma0 flex-l justify-between">
                    <p className="left fit-content">{escaped_title}</p>
                    <p className="tertiary-text-color tl">{label}</p>
                  </h4>
                </a>"#
    )
}

#[cfg(test)]
mod tests {
    use super::{display_date_label, render_entry};

    #[test]
    fn formats_iso_date_for_display() {
        assert_eq!(display_date_label("2024-03-01"), "Mar 01, 2024");
        assert_eq!(display_date_label("2024-12-25"), "Dec 25, 2024");
    }

    #[test]
    fn keeps_unparseable_date_verbatim() {
        assert_eq!(display_date_label("sometime"), "sometime");
        assert_eq!(display_date_label(""), "");
    }

    #[test]
    fn renders_entry_with_escaped_title() {
        let rendered = render_entry("Say \"hi\"", "2024-03-01", "/writings/say-hi");
        assert!(rendered.contains(r#"<p className="left fit-content">Say \"hi\"</p>"#));
        assert!(rendered.contains(r#"href="/writings/say-hi""#));
        assert!(rendered.contains(r#"<p className="tertiary-text-color tl">Mar 01, 2024</p>"#));
    }

    #[test]
    fn rendered_entry_is_a_single_anchor_block() {
        let rendered = render_entry("Post", "2024-01-02", "/writings/post");
        assert!(rendered.starts_with("<a"));
        assert!(rendered.ends_with("</a>"));
        assert_eq!(rendered.matches("<a").count(), 1);
        assert_eq!(rendered.matches("</a>").count(), 1);
    }
}
