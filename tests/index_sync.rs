use notepress::models::{IndexSyncStatus, PostContent};
use notepress::website::entry::render_entry;
use notepress::website::files::writing_pages;
use notepress::website::index_sync::{backup_path, IndexSync};
use notepress::website::page::{url_path, write_page};
use std::path::{Path, PathBuf};

/// An index page in the shape the site generator produces.
fn index_document(entries: &[String]) -> String {
    let mut body = String::new();
    for entry in entries {
        body.push('\n');
        body.push_str("                ");
        body.push_str(entry);
    }
    format!(
        "import React from \"react\";\n\
         import Layout from \"../../components/layout/index\";\n\
         import SEO from \"../../components/seo\";\n\
         \n\
         const Page = (props) => {{\n\
         \u{20} return (\n\
         \u{20}   <Layout headerClass=\"\">\n\
         \u{20}     <SEO title=\"Writings\" />\n\
         \u{20}     <div class=\"main-content\">\n\
         \u{20}       <div className=\"mw-l center\">\n\
         \u{20}         <div className=\"mt10 ma20-l\">{body}\n\
         \u{20}         </div>\n\
         \u{20}       </div>\n\
         \u{20}     </div>\n\
         \u{20}   </Layout>\n\
         \u{20} );\n\
         }};\n\
         \n\
         export default Page;\n"
    )
}

fn write_index(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("index.js");
    std::fs::write(&path, content).expect("write index");
    path
}

fn entry_for(title: &str, date_iso: &str) -> String {
    render_entry(title, date_iso, &url_path(title))
}

fn date_positions(document: &str, labels: &[&str]) -> Vec<usize> {
    labels
        .iter()
        .map(|label| document.find(label).unwrap_or_else(|| panic!("{label} not in document")))
        .collect()
}

#[test]
fn inserts_entry_in_date_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let document = index_document(&[
        entry_for("March Post", "2024-03-01"),
        entry_for("January Post", "2024-01-10"),
    ]);
    let index_path = write_index(dir.path(), &document);

    let sync = IndexSync::new(&index_path);
    let outcome = sync
        .update(&entry_for("February Post", "2024-02-15"), "2024-02-15")
        .expect("update");

    assert_eq!(outcome.status, IndexSyncStatus::Updated);
    let updated = std::fs::read_to_string(&index_path).expect("read index");
    let positions = date_positions(&updated, &["Mar 01, 2024", "Feb 15, 2024", "Jan 10, 2024"]);
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(!backup_path(&index_path).exists(), "backup must be discarded");
}

#[test]
fn empty_region_receives_exactly_the_new_entry() {
    let dir = tempfile::tempdir().expect("tempdir");
    let index_path = write_index(dir.path(), &index_document(&[]));

    let sync = IndexSync::new(&index_path);
    let outcome = sync
        .update(&entry_for("Only Post", "2024-02-15"), "2024-02-15")
        .expect("update");

    assert_eq!(outcome.status, IndexSyncStatus::Updated);
    let updated = std::fs::read_to_string(&index_path).expect("read index");
    assert_eq!(updated.matches("Feb 15, 2024").count(), 1);
    assert_eq!(updated.matches("<a").count(), updated.matches("</a>").count());
}

#[test]
fn missing_index_fails_fast_without_backup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let index_path = dir.path().join("index.js");

    let sync = IndexSync::new(&index_path);
    let error = sync
        .update(&entry_for("Post", "2024-02-15"), "2024-02-15")
        .expect_err("missing index");

    assert!(matches!(error, notepress::errors::AppError::NotFound(_)));
    assert!(!backup_path(&index_path).exists());
}

#[test]
fn unrecognized_document_is_left_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let document = "import React from \"react\";\nconst Page = () => null;\nexport default Page;\n";
    let index_path = write_index(dir.path(), document);

    let sync = IndexSync::new(&index_path);
    let outcome = sync
        .update(&entry_for("Post", "2024-02-15"), "2024-02-15")
        .expect("update");

    assert_eq!(outcome.status, IndexSyncStatus::RegionNotFound);
    assert!(outcome.message.is_some());
    let after = std::fs::read_to_string(&index_path).expect("read index");
    assert_eq!(after, document, "document bytes must be unchanged");
    assert!(!backup_path(&index_path).exists());
}

#[test]
fn failed_validation_restores_original_bytes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let document = index_document(&[entry_for("March Post", "2024-03-01")]);
    let index_path = write_index(dir.path(), &document);

    // A stray brace in the title survives splicing but breaks the balanced
    // delimiter check, forcing the post-write validation to fail.
    let sync = IndexSync::new(&index_path);
    let outcome = sync
        .update(&entry_for("Broken { Title", "2024-02-15"), "2024-02-15")
        .expect("update");

    assert_eq!(outcome.status, IndexSyncStatus::ValidationFailed);
    let after = std::fs::read_to_string(&index_path).expect("read index");
    assert_eq!(after, document, "restore must be byte-identical");
    assert!(!backup_path(&index_path).exists(), "backup must be discarded");
}

#[test]
fn degraded_document_still_accepts_an_entry() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Opening anchor and one entry, but no triple-close after the list: the
    // full region pattern cannot match and the degraded prepend path runs.
    let first = entry_for("March Post", "2024-03-01");
    let document = format!(
        "import React from \"react\";\n\
         const Page = (props) => (\n\
         \u{20} <div className=\"mt10 ma20-l\">\n\
         \u{20}               {first}\n\
         \u{20} </div>\n\
         );\n\
         export default Page;\n"
    );
    let index_path = write_index(dir.path(), &document);

    let sync = IndexSync::new(&index_path);
    let outcome = sync
        .update(&entry_for("June Post", "2024-06-01"), "2024-06-01")
        .expect("update");

    assert_eq!(outcome.status, IndexSyncStatus::Updated);
    let updated = std::fs::read_to_string(&index_path).expect("read index");
    let positions = date_positions(&updated, &["Jun 01, 2024", "Mar 01, 2024"]);
    assert!(positions[0] < positions[1], "new entry must be prepended");
    assert_eq!(updated.matches("<a").count(), updated.matches("</a>").count());
    assert_eq!(
        updated.matches("<div").count(),
        updated.matches("</div>").count()
    );
    assert!(!backup_path(&index_path).exists());
}

#[test]
fn writing_a_page_changes_the_file_list() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_index(dir.path(), &index_document(&[]));
    assert!(writing_pages(dir.path()).is_empty());

    let post = PostContent {
        title: "Fresh Post".to_string(),
        content: "Body paragraph.".to_string(),
        date: "2024-02-15".to_string(),
    };
    write_page(dir.path(), &post).expect("write page");

    let pages = writing_pages(dir.path());
    assert_eq!(pages.len(), 1);
    assert!(pages[0].ends_with("fresh-post.js"));
}
