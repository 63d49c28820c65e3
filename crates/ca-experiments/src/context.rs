//! Shared harness context for experiment drivers.
//!
//! All configuration a driver needs travels in one explicit value;
//! there is no module-level output directory or global logger state, so
//! several harness instances can coexist (and tests get isolated
//! directories for free).

use std::path::PathBuf;

use ca_sink::ArtifactStore;
use rand::seq::SliceRandom;
use rand::Rng;

/// Models evaluated when the caller does not override the list.
pub const DEFAULT_MODELS: [&str; 5] = [
    "phi3:3.8b",
    "llama3.2:3b",
    "gemma2:2b",
    "qwen2:1.5b",
    "mistral:7b",
];

/// Configuration for one harness run.
#[derive(Debug, Clone)]
pub struct HarnessContext {
    /// Directory for artifacts and results files.
    pub output_dir: PathBuf,
    /// Models to sweep, in order.
    pub models: Vec<String>,
    /// Trials per experiment cell (1-indexed in records).
    pub trials: u32,
    /// Candidate words for rule sampling.
    pub lexicon: Vec<String>,
    /// Seed for reproducible term sampling.
    pub seed: u64,
}

impl HarnessContext {
    /// Create a context.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        models: Vec<String>,
        trials: u32,
        lexicon: Vec<String>,
        seed: u64,
    ) -> Self {
        debug_assert!(trials >= 1, "At least one trial per cell");
        debug_assert!(!models.is_empty(), "At least one model");
        debug_assert!(!lexicon.is_empty(), "Lexicon must not be empty");

        Self {
            output_dir: output_dir.into(),
            models,
            trials,
            lexicon,
            seed,
        }
    }

    /// Artifact store rooted at the output directory.
    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.output_dir)
    }

    /// Results file path for an experiment family.
    pub fn results_path(&self, family: &str) -> PathBuf {
        self.output_dir.join(format!("{family}.csv"))
    }
}

/// Sample `count` distinct lexicon entries for one trial.
pub fn sample_terms<R: Rng>(rng: &mut R, lexicon: &[String], count: usize) -> Vec<String> {
    debug_assert!(
        count <= lexicon.len(),
        "Cannot sample more terms than the lexicon holds"
    );
    lexicon.choose_multiple(rng, count).cloned().collect()
}

/// Artifact file-name key for an experiment/model pair.
///
/// Model tags contain `:` which is awkward in file names; it becomes `_`.
pub fn artifact_key(experiment_name: &str, model: &str) -> String {
    format!("{experiment_name}_{}", model.replace(':', "_"))
}
