use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    #[default]
    Claude,
    Codex,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Codex => "codex",
        }
    }

    pub fn default_binary(self) -> &'static str {
        self.as_str()
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "claude" => Ok(Self::Claude),
            "codex" => Ok(Self::Codex),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// Post produced by the generation step. `date` stays a string: the provider
/// may return an empty or unparseable value and downstream code degrades to
/// displaying it verbatim instead of rejecting the post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContent {
    pub title: String,
    pub content: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexSyncStatus {
    Updated,
    RegionNotFound,
    ValidationFailed,
}

impl IndexSyncStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::RegionNotFound => "region-not-found",
            Self::ValidationFailed => "validation-failed",
        }
    }
}

/// Outcome of one index update transaction. Callers branch on the status
/// instead of scraping log output; `message` carries operator-facing detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSyncOutcome {
    pub status: IndexSyncStatus,
    pub message: Option<String>,
}

impl IndexSyncOutcome {
    pub fn updated() -> Self {
        Self {
            status: IndexSyncStatus::Updated,
            message: None,
        }
    }

    pub fn region_not_found(message: impl Into<String>) -> Self {
        Self {
            status: IndexSyncStatus::RegionNotFound,
            message: Some(message.into()),
        }
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self {
            status: IndexSyncStatus::ValidationFailed,
            message: Some(message.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == IndexSyncStatus::Updated
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub run_id: String,
    pub note_file: String,
    pub post_title: String,
    pub page_path: Option<String>,
    pub archive_path: Option<String>,
    pub index_sync: Option<IndexSyncOutcome>,
    pub committed: bool,
    pub deployed: bool,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
