//! # ca-client
//!
//! Resilient client for remote text-generation backends.
//!
//! Wraps one chat-completion call in bounded retries with exponential
//! backoff, and converts every failure mode into either a complete text
//! or a terminal [`ca_core::GenerationResult::Failure`] sentinel. The
//! sentinel is an ordinary scorable value, so one dead backend never
//! halts an experiment sweep.
//!
//! The wire transport sits behind the [`ChatBackend`] trait; production
//! code talks to an Ollama-style HTTP endpoint, tests inject a scripted
//! backend.

pub mod backend;
pub mod client;

pub use backend::{ChatBackend, ChatMessage, ChatOptions, ClientError, OllamaBackend, DEFAULT_HOST};
pub use client::{GenerationClient, RetryPolicy};
