//! Retrying LLM client: one provider, bounded attempts, lenient JSON output.

use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use cvforge_core::Config;

use crate::json::extract_json;
use crate::provider::{LlmError, LlmProvider, Message};
use crate::providers::create_provider;

/// Bounded retry with linear backoff: attempt n sleeps n x `base_delay`
/// before running (the first attempt runs immediately).
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

/// A provider plus call defaults. Every extraction call site goes through
/// [`LlmClient::complete_json`].
pub struct LlmClient {
    provider: Box<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
    retry: RetryPolicy,
}

impl LlmClient {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
            retry: RetryPolicy::default(),
        }
    }

    /// Build from config, creating the configured provider. Fails fast on a
    /// missing credential.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let provider = create_provider(&config.llm, &config.ollama)?;
        Ok(Self::new(provider, config.llm.temperature, config.llm.max_tokens).with_retry(
            RetryPolicy {
                max_attempts: config.pipeline.max_attempts.max(1),
                base_delay: Duration::from_millis(config.pipeline.retry_delay_ms),
            },
        ))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = RetryPolicy {
            max_attempts: retry.max_attempts.max(1),
            ..retry
        };
        self
    }

    /// Send a system+user prompt pair and parse the completion as JSON.
    /// Network errors, non-2xx responses and unparseable output all count as
    /// failed attempts; the last error is returned once attempts run out.
    pub async fn complete_json(&self, system: &str, user: &str) -> Result<Value, LlmError> {
        let messages = vec![Message::system(system), Message::user(user)];

        let mut last_err: Option<LlmError> = None;
        for attempt in 1..=self.retry.max_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.retry.base_delay * (attempt - 1)).await;
            }

            match self
                .provider
                .complete(messages.clone(), self.temperature, self.max_tokens)
                .await
            {
                Ok(text) => match extract_json(&text) {
                    Ok(value) => return Ok(value),
                    Err(e) => {
                        warn!(attempt, error = %e, "LLM returned unparseable JSON");
                        last_err = Some(LlmError::Parse(e.reason));
                    }
                },
                Err(e) => {
                    warn!(attempt, error = %e, "LLM call failed");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| LlmError::Parse("no attempts were made".into())))
    }
}
