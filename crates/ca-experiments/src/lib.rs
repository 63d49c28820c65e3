//! # ca-experiments
//!
//! Experiment drivers for the constraint-adherence harness.
//!
//! Each driver sweeps its experimental matrix (models x configurations x
//! trials) sequentially: build a constraint set, render the prompt, call
//! the generation client, score the text, and append one row to the
//! family's results file before the next trial begins. Row order in the
//! results files therefore reflects real execution order.
//!
//! Families:
//!
//! | Driver | Varies | Scoring |
//! |--------|--------|---------|
//! | fatigue | rule count R in {5, 20, 50, 100} | lexical |
//! | taxonomy | lexical vs structural rules | lexical, 50/50 combined |
//! | contradictions | contradictory tense directives | lexical + tense class |
//! | complexity | L1..L4 rule ladder | lexical |
//! | formats | rule presentation format | lexical |

pub mod complexity;
pub mod context;
pub mod contradictions;
pub mod fatigue;
pub mod formats;
pub mod prompts;
pub mod taxonomy;

pub use context::{artifact_key, sample_terms, HarnessContext, DEFAULT_MODELS};

/// Driver-level failures. Generation faults never surface here; they are
/// absorbed into sentinel results upstream. What remains is persistence
/// and prompt encoding.
#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    #[error("sink error: {0}")]
    Sink(#[from] ca_sink::SinkError),

    #[error("prompt encoding error: {0}")]
    PromptEncoding(#[from] serde_json::Error),
}
