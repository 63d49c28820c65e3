//! Representative prompt/story artifact capture.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::SinkError;

/// Writes the prompt/story artifact pair for representative trials.
///
/// Whether a trial is representative is the caller's sampling policy (by
/// convention the first trial of a configuration); the store only acts on
/// the flag. Rerunning an experiment overwrites its prior artifacts.
pub struct ArtifactStore {
    output_dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Persist the prompt and story for a representative trial.
    ///
    /// No-op unless `representative`. Both files are staged to temp files
    /// in the output directory and only renamed into place once both
    /// writes have succeeded, so the pair is published all-or-nothing.
    pub fn save_artifacts(
        &self,
        experiment_name: &str,
        trial: u32,
        prompt: &str,
        story: &str,
        representative: bool,
    ) -> Result<(), SinkError> {
        if !representative {
            return Ok(());
        }

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| SinkError::io(&self.output_dir, e))?;

        let prompt_path = self.output_dir.join(format!("{experiment_name}_prompt.txt"));
        let story_path = self.output_dir.join(format!("{experiment_name}_story.txt"));

        let prompt_staged = self.stage(prompt)?;
        let story_staged = self.stage(story)?;

        persist(prompt_staged, &prompt_path)?;
        persist(story_staged, &story_path)?;

        info!(experiment = experiment_name, trial, "saved artifacts");
        Ok(())
    }

    /// Write content to a staging temp file in the output directory.
    fn stage(&self, content: &str) -> Result<NamedTempFile, SinkError> {
        let mut staged = tempfile::Builder::new()
            .prefix(".artifact.")
            .tempfile_in(&self.output_dir)
            .map_err(|e| SinkError::io(&self.output_dir, e))?;
        staged
            .write_all(content.as_bytes())
            .map_err(|e| SinkError::io(staged.path().to_path_buf(), e))?;
        staged
            .flush()
            .map_err(|e| SinkError::io(staged.path().to_path_buf(), e))?;
        Ok(staged)
    }
}

fn persist(staged: NamedTempFile, target: &Path) -> Result<(), SinkError> {
    staged
        .persist(target)
        .map_err(|e| SinkError::io(target, e.error))?;
    Ok(())
}
