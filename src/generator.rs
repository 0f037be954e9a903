use crate::adapters::{adapter_for, FinalPayload, GenerateRequest, ValidatedCommand};
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{PostContent, Provider};
use crate::prompts;
use once_cell::sync::Lazy;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

static POST_SCHEMA: Lazy<serde_json::Value> = Lazy::new(|| {
    serde_json::json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "minLength": 1 },
            "content": { "type": "string", "minLength": 1 },
            "date": { "type": "string" }
        },
        "required": ["title", "content", "date"]
    })
});

/// Bridge to the provider CLI: composes the prompt, runs one bounded
/// non-interactive invocation, and resolves the buffered output into a
/// validated [`PostContent`].
pub struct PostGenerator {
    provider: Provider,
    binary: String,
    model: Option<String>,
    timeout: Duration,
}

impl PostGenerator {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            provider: config.provider,
            binary: config.provider_binary(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs),
        }
    }

    pub fn generate(&self, notes: &str) -> AppResult<PostContent> {
        let request = GenerateRequest {
            prompt: prompts::compose_prompt(notes),
            model: self.model.clone(),
        };
        let adapter = adapter_for(self.provider);
        adapter.validate(&request)?;
        let command = adapter.build_command(&request, &self.binary)?;

        tracing::info!(provider = self.provider.as_str(), "generating post");
        let output = run_provider_command(&command, self.timeout)?;

        let payload = adapter.parse_final(&output);
        let value = resolve_post_value(payload, &output).ok_or_else(|| {
            AppError::Llm(format!(
                "{} produced no JSON post payload",
                self.provider.as_str()
            ))
        })?;
        validate_post_value(&value)?;

        let post: PostContent = serde_json::from_value(value)
            .map_err(|error| AppError::Llm(format!("malformed post payload: {error}")))?;
        tracing::info!(title = %post.title, "generated post");
        Ok(post)
    }
}

fn run_provider_command(command: &ValidatedCommand, timeout: Duration) -> AppResult<String> {
    let mut child = Command::new(&command.program)
        .args(&command.args)
        .envs(&command.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|error| {
            AppError::Llm(format!("failed to start {}: {}", command.program, error))
        })?;

    match child
        .wait_timeout(timeout)
        .map_err(|error| AppError::Llm(error.to_string()))?
    {
        Some(status) => {
            let mut stdout = String::new();
            if let Some(mut pipe) = child.stdout.take() {
                pipe.read_to_string(&mut stdout)
                    .map_err(|error| AppError::Llm(error.to_string()))?;
            }
            if !status.success() {
                return Err(AppError::Llm(format!(
                    "{} exited with {}",
                    command.program, status
                )));
            }
            Ok(stdout)
        }
        None => {
            let _ = child.kill();
            let _ = child.wait();
            Err(AppError::Llm(format!(
                "{} timed out after {}s",
                command.program,
                timeout.as_secs()
            )))
        }
    }
}

/// Providers often wrap JSON answers in markdown code fences.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}

pub fn parse_json_value(raw: &str) -> Option<serde_json::Value> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return None;
    }
    serde_json::from_str(cleaned).ok()
}

fn resolve_post_value(
    payload: Option<FinalPayload>,
    fallback_output: &str,
) -> Option<serde_json::Value> {
    match payload {
        Some(FinalPayload::Structured(value)) => Some(value),
        Some(FinalPayload::Text(text)) => parse_json_value(&text),
        None => parse_json_value(fallback_output),
    }
}

fn validate_post_value(value: &serde_json::Value) -> AppResult<()> {
    let compiled = jsonschema::JSONSchema::compile(&POST_SCHEMA)
        .map_err(|error| AppError::Internal(format!("invalid post schema: {error}")))?;

    let errors: Vec<String> = compiled
        .validate(value)
        .err()
        .map(|errors| {
            errors
                .map(|error| {
                    let path = error.instance_path.to_string();
                    if path.is_empty() {
                        error.to_string()
                    } else {
                        format!("{}: {}", path, error)
                    }
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Llm(format!(
            "post payload did not match schema: {}",
            errors.join("; ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_json_value, resolve_post_value, strip_code_fences, validate_post_value};
    use crate::adapters::FinalPayload;

    #[test]
    fn strips_json_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn parses_fenced_json() {
        let value = parse_json_value("```json\n{\"title\":\"T\"}\n```").expect("value");
        assert_eq!(value["title"], "T");
        assert_eq!(parse_json_value("not json"), None);
        assert_eq!(parse_json_value(""), None);
    }

    #[test]
    fn resolves_structured_before_fallback() {
        let structured = FinalPayload::Structured(serde_json::json!({"title": "A"}));
        let value = resolve_post_value(Some(structured), "{\"title\":\"B\"}").expect("value");
        assert_eq!(value["title"], "A");
    }

    #[test]
    fn resolves_text_payload_through_fence_stripping() {
        let text = FinalPayload::Text("```json\n{\"title\":\"A\"}\n```".to_string());
        let value = resolve_post_value(Some(text), "").expect("value");
        assert_eq!(value["title"], "A");
    }

    #[test]
    fn falls_back_to_raw_output() {
        let value = resolve_post_value(None, "{\"title\":\"C\"}").expect("value");
        assert_eq!(value["title"], "C");
    }

    #[test]
    fn schema_accepts_complete_post() {
        let value = serde_json::json!({
            "title": "T",
            "content": "C",
            "date": "2024-01-15"
        });
        assert!(validate_post_value(&value).is_ok());
    }

    #[test]
    fn schema_rejects_missing_fields() {
        let value = serde_json::json!({"title": "T", "content": "C"});
        let error = validate_post_value(&value).expect_err("should fail");
        assert!(error.to_string().contains("date"));
    }

    #[test]
    fn schema_allows_empty_date_string() {
        // An empty date degrades downstream instead of failing generation.
        let value = serde_json::json!({"title": "T", "content": "C", "date": ""});
        assert!(validate_post_value(&value).is_ok());
    }
}
