pub mod claude;
pub mod codex;

use crate::errors::{AppError, AppResult};
use crate::models::Provider;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidatedCommand {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

/// What an adapter recovered from the provider's buffered output: either an
/// already-structured JSON value or the assistant's text, which may itself
/// carry JSON (possibly fenced).
#[derive(Debug, Clone, PartialEq)]
pub enum FinalPayload {
    Structured(serde_json::Value),
    Text(String),
}

pub trait Adapter: Send + Sync {
    fn validate(&self, request: &GenerateRequest) -> AppResult<()> {
        if request.prompt.trim().is_empty() {
            return Err(AppError::Cli("Prompt cannot be empty".to_string()));
        }
        Ok(())
    }

    fn build_command(
        &self,
        request: &GenerateRequest,
        binary_path: &str,
    ) -> AppResult<ValidatedCommand>;

    fn parse_final(&self, buffered_output: &str) -> Option<FinalPayload>;
}

pub fn adapter_for(provider: Provider) -> &'static dyn Adapter {
    match provider {
        Provider::Claude => &claude::ClaudeAdapter,
        Provider::Codex => &codex::CodexAdapter,
    }
}
