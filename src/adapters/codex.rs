use super::{Adapter, FinalPayload, GenerateRequest, ValidatedCommand};
use crate::errors::AppResult;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct CodexAdapter;

impl Adapter for CodexAdapter {
    fn build_command(
        &self,
        request: &GenerateRequest,
        binary_path: &str,
    ) -> AppResult<ValidatedCommand> {
        let mut args = Vec::new();
        args.push("exec".to_string());
        args.push("--json".to_string());
        args.push("--skip-git-repo-check".to_string());

        if let Some(model) = &request.model {
            args.push("--model".to_string());
            args.push(model.clone());
        }

        // Codex takes the prompt as the trailing positional argument.
        args.push(request.prompt.clone());

        Ok(ValidatedCommand {
            program: binary_path.to_string(),
            args,
            env: BTreeMap::new(),
        })
    }

    /// Codex streams JSONL events; the post lands in the final agent message.
    fn parse_final(&self, buffered_output: &str) -> Option<FinalPayload> {
        for line in buffered_output.lines().rev() {
            let trimmed = line.trim();
            if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
                continue;
            }
            let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
                continue;
            };
            if value.get("title").is_some() && value.get("content").is_some() {
                return Some(FinalPayload::Structured(value));
            }
            if let Some(text) = agent_message_text(&value) {
                return Some(FinalPayload::Text(text.to_string()));
            }
        }
        None
    }
}

fn agent_message_text(value: &serde_json::Value) -> Option<&str> {
    if value.get("type").and_then(|kind| kind.as_str()) != Some("item.completed") {
        return None;
    }
    let item = value.get("item")?;
    if item.get("type").and_then(|kind| kind.as_str()) != Some("agent_message") {
        return None;
    }
    item.get("text").and_then(|text| text.as_str())
}

#[cfg(test)]
mod tests {
    use super::super::{Adapter, FinalPayload, GenerateRequest};
    use super::CodexAdapter;

    #[test]
    fn builds_exec_command_with_trailing_prompt() {
        let command = CodexAdapter
            .build_command(
                &GenerateRequest {
                    prompt: "write a post".to_string(),
                    model: None,
                },
                "codex",
            )
            .expect("command");
        assert_eq!(command.program, "codex");
        assert_eq!(command.args.first().map(String::as_str), Some("exec"));
        assert!(command.args.contains(&"--json".to_string()));
        assert_eq!(command.args.last().map(String::as_str), Some("write a post"));
    }

    #[test]
    fn extracts_final_agent_message() {
        let output = concat!(
            "{\"type\":\"item.completed\",\"item\":{\"type\":\"reasoning\",\"text\":\"hmm\"}}\n",
            "{\"type\":\"item.completed\",\"item\":{\"type\":\"agent_message\",\"text\":\"{\\\"title\\\":\\\"T\\\"}\"}}\n",
            "{\"type\":\"turn.completed\"}\n",
        );
        let payload = CodexAdapter.parse_final(output).expect("payload");
        assert_eq!(payload, FinalPayload::Text("{\"title\":\"T\"}".to_string()));
    }

    #[test]
    fn ignores_non_message_events() {
        let output = "{\"type\":\"turn.completed\"}\n";
        assert_eq!(CodexAdapter.parse_final(output), None);
    }
}
