use super::escape_jsx;
use crate::errors::{AppError, AppResult};
use crate::models::PostContent;
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

const DESCRIPTION_LIMIT: usize = 150;

/// Stable slug for a post title. Shared by the page file name and the index
/// entry href; both must agree or the index links to nothing.
pub fn slug_for_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        format!("post-{}", Local::now().format("%Y%m%d"))
    } else {
        slug.to_string()
    }
}

pub fn url_path(title: &str) -> String {
    format!("/writings/{}", slug_for_title(title))
}

/// SEO description: first sentence of the first paragraph when it carries any
/// substance, the whole paragraph otherwise, capped at 150 characters.
pub fn description_for(content: &str) -> String {
    let first_paragraph = content.split("\n\n").next().unwrap_or("").trim();
    let first_sentence = SENTENCE_BREAK
        .split(first_paragraph)
        .next()
        .unwrap_or("")
        .trim();

    let mut description = if first_sentence.len() > 10 {
        format!("{first_sentence}.")
    } else {
        first_paragraph.to_string()
    };

    if description.chars().count() > DESCRIPTION_LIMIT {
        description = description.chars().take(DESCRIPTION_LIMIT - 3).collect();
        description.push_str("...");
    }
    description
}

/// Renders the full page component for a post: blank-line-separated paragraphs
/// become styled `<p>` blocks inside the site's standard page chrome.
pub fn render_page(post: &PostContent) -> String {
    let title = escape_jsx(&post.title);
    let description = escape_jsx(&description_for(&post.content));
    let paragraphs = post
        .content
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| {
            format!(
                "<p className=\"ma0 pa0 pl5 pr5 mt4 f4 f3-ns sig-grey\">\n                {}\n              </p>",
                escape_jsx(paragraph)
            )
        })
        .collect::<Vec<_>>()
        .join("\n              ");

    format!(
        r#"import React, {{ useState }} from "react";
import Layout from "../../components/layout/index";
import SEO from "../../components/seo";
import {{ SectionBox }} from "../../components/home";

const handleScroll = (isModalOpen) => {{
  if (isModalOpen === true) {{
    document.documentElement.style.overflow = "hidden";
  }} else {{
    document.documentElement.style.overflowY = "scroll";
  }}
}};

const Page = (props) => {{
  const [isContactOpen, setContact] = useState(false);
  const handleContact = () => {{
    handleScroll(!isContactOpen);
    setContact(!isContactOpen);
  }};

  return (
    <Layout headerClass="">
      <SEO
        title="{title}"
        description={{`{description}`}}
      />
      <div
        class="main-content"
        style={{{{
          minHeight: "100vh",
        }}}}
      >
        <SectionBox
          heading="{title}"
          headingClass="ma0 pa0 f2 f-headline-ns sig-blue fw-600"
          bodyClass="col-12 mw-100 center"
          className="pt16"
        />
        <div className=" pt0 pb5 pt10-ns pb20-ns">
          <div className="mw-l center">
            {paragraphs}
          </div>
        </div>
      </div>
    </Layout>
  );
}};

export default Page;
"#
    )
}

/// Writes the page component as `<slug>.js` under the writings directory.
pub fn write_page(writings_dir: &Path, post: &PostContent) -> AppResult<PathBuf> {
    let file_path = writings_dir.join(format!("{}.js", slug_for_title(&post.title)));
    std::fs::write(&file_path, render_page(post))
        .map_err(|error| AppError::Io(format!("{}: {}", file_path.display(), error)))?;
    tracing::info!(path = %file_path.display(), "generated post page");
    Ok(file_path)
}
