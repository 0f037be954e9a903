use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::generator::PostGenerator;
use crate::git::GitOps;
use crate::models::{PipelineReport, PostContent};
use crate::note;
use crate::posts;
use crate::website::entry::{render_entry, ISO_DATE_FORMAT};
use crate::website::files::validate_site_root;
use crate::website::index_sync::IndexSync;
use crate::website::page::{url_path, write_page};
use chrono::{NaiveDate, Utc};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub deploy: bool,
    pub dry_run: bool,
}

/// End-to-end run: note in, published post out. The index update is the only
/// transactional step; a generated page is never rolled back when the index
/// cannot be updated, since the two are independent outputs.
pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, note_path: &Path, options: &RunOptions) -> AppResult<PipelineReport> {
        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("pipeline", run_id = %run_id);
        let _enter = span.enter();
        let started_at = Utc::now();

        let raw = note::read_note(note_path)?;
        let kind = note::note_kind(note_path)?;
        let notes = note::clean_note(&raw, kind);

        let generator = PostGenerator::from_config(&self.config);
        let mut post = generator.generate(&notes)?;
        resolve_post_date(&mut post, &raw, note_path);

        if options.dry_run {
            tracing::info!(title = %post.title, "dry run; skipping all writes");
            return Ok(PipelineReport {
                run_id,
                note_file: note_path.display().to_string(),
                post_title: post.title,
                page_path: None,
                archive_path: None,
                index_sync: None,
                committed: false,
                deployed: false,
                dry_run: true,
                started_at,
                finished_at: Utc::now(),
            });
        }

        validate_site_root(&self.config.site_root, &self.config.writings_dir)?;
        let page_path = write_page(&self.config.writings_path(), &post)?;
        let archive_path = posts::write_post(&self.config.posts_dir, &post)?;

        let rendered = render_entry(&post.title, &post.date, &url_path(&post.title));
        let sync = IndexSync::new(self.config.index_path());
        let outcome = sync.update(&rendered, &post.date)?;
        if !outcome.succeeded() {
            // The page stays published either way; the listing needs a hand.
            tracing::warn!(
                status = outcome.status.as_str(),
                "index not updated; generated page kept"
            );
        }

        let git = GitOps::new(
            &self.config.site_root,
            &self.config.git_remote,
            &self.config.git_branch,
        )?;
        git.commit_changes(&format!("Add new blog post: {}", post.title))?;
        let mut deployed = false;
        if options.deploy {
            git.deploy()?;
            deployed = true;
        }

        Ok(PipelineReport {
            run_id,
            note_file: note_path.display().to_string(),
            post_title: post.title,
            page_path: Some(page_path.display().to_string()),
            archive_path: Some(archive_path.display().to_string()),
            index_sync: Some(outcome),
            committed: true,
            deployed,
            dry_run: false,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// A provider date that does not parse is replaced by the note's own metadata
/// date when one exists; otherwise the raw value rides along and downstream
/// code degrades to its recency assumption.
fn resolve_post_date(post: &mut PostContent, raw_note: &str, note_path: &Path) {
    if NaiveDate::parse_from_str(post.date.trim(), ISO_DATE_FORMAT).is_ok() {
        return;
    }
    let file_name = note_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let metadata = note::note_metadata(raw_note, file_name);
    if let Some(date) = metadata.date {
        tracing::debug!(date = %date, "substituting note metadata date for post");
        post.date = date;
    }
}
