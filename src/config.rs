use crate::errors::{AppError, AppResult};
use crate::models::Provider;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "notepress.yml";
const ENV_PREFIX: &str = "NOTEPRESS_";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Which headless CLI produces the post.
    pub provider: Provider,
    /// Model override passed through to the provider CLI.
    pub model: Option<String>,
    /// Binary override; defaults to the provider name on PATH.
    pub binary: Option<String>,
    pub llm_timeout_secs: u64,
    /// Directory receiving the plain-text archive copy of each post.
    pub posts_dir: PathBuf,
    /// Root of the generated website checkout.
    pub site_root: PathBuf,
    pub writings_dir: String,
    pub writings_index_file: String,
    pub git_remote: String,
    pub git_branch: String,
    pub notes_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Claude,
            model: None,
            binary: None,
            llm_timeout_secs: 180,
            posts_dir: PathBuf::from("./posts"),
            site_root: PathBuf::new(),
            writings_dir: "src/pages/writings".to_string(),
            writings_index_file: "src/pages/writings/index.js".to_string(),
            git_remote: "origin".to_string(),
            git_branch: "main".to_string(),
            notes_dir: PathBuf::from("notes"),
        }
    }
}

impl AppConfig {
    /// Loads configuration: file (explicit path, or `notepress.yml` in the
    /// working directory when present), then `NOTEPRESS_*` env overrides.
    pub fn load(config_path: Option<&Path>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::NotFound(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(std::env::vars());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|error| AppError::Io(format!("{}: {}", path.display(), error)))?;
        let config = serde_yaml::from_str(&raw)
            .map_err(|error| AppError::Cli(format!("invalid config {}: {}", path.display(), error)))?;
        Ok(config)
    }

    /// Applies `NOTEPRESS_*` variables from any source, so tests can feed
    /// overrides without touching the process environment.
    pub fn apply_overrides(&mut self, vars: impl Iterator<Item = (String, String)>) {
        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "PROVIDER" => {
                    if let Ok(provider) = value.parse() {
                        self.provider = provider;
                    } else {
                        tracing::warn!(value = %value, "ignoring unknown NOTEPRESS_PROVIDER");
                    }
                }
                "MODEL" => self.model = Some(value),
                "BINARY" => self.binary = Some(value),
                "LLM_TIMEOUT_SECS" => {
                    if let Ok(secs) = value.parse() {
                        self.llm_timeout_secs = secs;
                    }
                }
                "POSTS_DIR" => self.posts_dir = PathBuf::from(value),
                "SITE_ROOT" => self.site_root = PathBuf::from(value),
                "WRITINGS_DIR" => self.writings_dir = value,
                "WRITINGS_INDEX_FILE" => self.writings_index_file = value,
                "GIT_REMOTE" => self.git_remote = value,
                "GIT_BRANCH" => self.git_branch = value,
                "NOTES_DIR" => self.notes_dir = PathBuf::from(value),
                _ => {}
            }
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.site_root.join(&self.writings_index_file)
    }

    pub fn writings_path(&self) -> PathBuf {
        self.site_root.join(&self.writings_dir)
    }

    pub fn provider_binary(&self) -> String {
        self.binary
            .clone()
            .unwrap_or_else(|| self.provider.default_binary().to_string())
    }
}
