//! # ca-sink
//!
//! Artifact capture and append-only result logging.
//!
//! The sink owns the two durable outputs of a trial:
//!
//! - a representative prompt/story artifact pair per experiment
//!   configuration, published atomically so a crash never leaves half a
//!   pair;
//! - one CSV row per trial, appended to a shared results file whose fixed
//!   schema makes heterogeneous experiments comparable in one dataset.
//!
//! The sink never reads existing rows back; append order is the record of
//! execution order.

pub mod artifacts;
pub mod results;

pub use artifacts::ArtifactStore;
pub use results::{append_result, RESULT_HEADER};

use std::path::PathBuf;

/// Persistence faults; fatal for the trial that hit them.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SinkError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
