//! Retry loop around a chat backend.

use std::time::Duration;

use ca_core::GenerationResult;
use tracing::{error, warn};

use crate::backend::{ChatBackend, ChatMessage};

/// Retry budget and backoff shape for generation calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first (must be at least 1).
    pub max_retries: u32,
    /// Backoff unit: attempt `n` (0-indexed) sleeps `base_delay * 2^n`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff before re-attempting after failed attempt `attempt` (0-indexed).
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Generation client with bounded retries.
///
/// `generate` never returns an error: exhaustion produces a terminal
/// [`GenerationResult::Failure`] whose sentinel text scores as zero
/// matching terms downstream.
pub struct GenerationClient<B> {
    backend: B,
    policy: RetryPolicy,
}

impl<B: ChatBackend> GenerationClient<B> {
    /// Create a client over the given backend.
    pub fn new(backend: B, policy: RetryPolicy) -> Self {
        debug_assert!(policy.max_retries >= 1, "Retry budget must be at least 1");
        Self { backend, policy }
    }

    /// The active retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run one prompt against one model, retrying transient faults.
    ///
    /// Failed attempts back off exponentially; after the final attempt the
    /// failure is converted into a sentinel rather than escalated.
    pub async fn generate(&self, prompt: &str, model: &str) -> GenerationResult {
        debug_assert!(!prompt.is_empty(), "Prompt must not be empty");

        let messages = vec![ChatMessage::user(prompt)];
        let mut last_error = String::new();

        for attempt in 0..self.policy.max_retries {
            match self.backend.chat(model, &messages).await {
                Ok(text) => return GenerationResult::Text(text),
                Err(err) => {
                    last_error = err.to_string();
                    if attempt + 1 < self.policy.max_retries {
                        let wait = self.policy.backoff_delay(attempt);
                        warn!(
                            attempt = attempt + 1,
                            max_retries = self.policy.max_retries,
                            model,
                            error = %last_error,
                            wait_secs = wait.as_secs_f64(),
                            "generation attempt failed, retrying"
                        );
                        tokio::time::sleep(wait).await;
                    } else {
                        error!(
                            model,
                            attempts = self.policy.max_retries,
                            error = %last_error,
                            "generation failed after final attempt"
                        );
                    }
                }
            }
        }

        GenerationResult::Failure {
            reason: last_error,
            attempts: self.policy.max_retries,
        }
    }
}
