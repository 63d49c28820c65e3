//! Trial outcome types.

use std::borrow::Cow;

/// Outcome of one generation call, after retries.
///
/// Never partially populated: a call either produced a complete text or
/// exhausted its retry budget. Exhaustion is a terminal value, not an
/// error, so every trial still has text to score and a row to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// The backend returned a complete response.
    Text(String),
    /// All attempts failed; `reason` is the last error seen.
    Failure { reason: String, attempts: u32 },
}

impl GenerationResult {
    /// True if the retry budget was exhausted.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// The text the scorer operates on.
    ///
    /// For failures this renders the error sentinel; no constraint term can
    /// match it, so failed trials score zero adherence instead of raising.
    pub fn scorable_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::Failure { attempts, .. } => Cow::Owned(format!(
                "ERROR: Failed to generate response after {attempts} attempts"
            )),
        }
    }
}

/// Lexical scoring outcome for one trial.
///
/// Invariants: `passed_count + failed_count` equals the number of scored
/// terms, and `adherence` is their passed fraction (1.0 for an empty set).
#[derive(Debug, Clone, PartialEq)]
pub struct AdherenceRecord {
    pub passed_count: usize,
    pub failed_count: usize,
    pub passed_terms: Vec<String>,
    pub failed_terms: Vec<String>,
    /// Fraction of terms satisfied, in [0, 1].
    pub adherence: f64,
}

/// One row of the shared results log.
///
/// Created once per trial after scoring, appended once, never mutated.
/// The schema is fixed across experiment families; fields a family does
/// not use are written as zero-values so all files stay comparable.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord {
    pub experiment_name: String,
    /// 1-indexed trial number within the experiment cell.
    pub trial: u32,
    pub model: String,
    /// Rule count as presented in the prompt (the `R` column).
    pub constraint_count: u32,
    pub passed: u32,
    pub failed: u32,
    pub adherence: f64,
    pub prompt_len: usize,
    pub details: String,
}

impl TrialRecord {
    /// Flatten a scored trial into a row.
    pub fn from_adherence(
        experiment_name: impl Into<String>,
        trial: u32,
        model: impl Into<String>,
        constraint_count: u32,
        adherence: &AdherenceRecord,
        prompt_len: usize,
        details: impl Into<String>,
    ) -> Self {
        debug_assert!(trial >= 1, "Trial numbers are 1-indexed");

        Self {
            experiment_name: experiment_name.into(),
            trial,
            model: model.into(),
            constraint_count,
            passed: adherence.passed_count as u32,
            failed: adherence.failed_count as u32,
            adherence: adherence.adherence,
            prompt_len,
            details: details.into(),
        }
    }
}
