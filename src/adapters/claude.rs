use super::{Adapter, FinalPayload, GenerateRequest, ValidatedCommand};
use crate::errors::AppResult;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct ClaudeAdapter;

impl Adapter for ClaudeAdapter {
    fn build_command(
        &self,
        request: &GenerateRequest,
        binary_path: &str,
    ) -> AppResult<ValidatedCommand> {
        let mut args = Vec::new();
        args.push("-p".to_string());
        args.push(request.prompt.clone());

        if let Some(model) = &request.model {
            args.push("--model".to_string());
            args.push(model.clone());
        }

        args.push("--output-format".to_string());
        args.push("json".to_string());

        let mut env = BTreeMap::new();
        env.insert("CLAUDE_NON_INTERACTIVE".to_string(), "1".to_string());

        Ok(ValidatedCommand {
            program: binary_path.to_string(),
            args,
            env,
        })
    }

    /// The claude CLI emits a JSON envelope whose `result` field holds the
    /// assistant text. Scan from the end so progress lines ahead of the
    /// envelope are ignored.
    fn parse_final(&self, buffered_output: &str) -> Option<FinalPayload> {
        for line in buffered_output.lines().rev() {
            let trimmed = line.trim();
            if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
                continue;
            }
            let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
                continue;
            };
            if let Some(result) = value.get("result").and_then(|result| result.as_str()) {
                return Some(FinalPayload::Text(result.to_string()));
            }
            if value.get("title").is_some() && value.get("content").is_some() {
                return Some(FinalPayload::Structured(value));
            }
        }
        None
    }
}
