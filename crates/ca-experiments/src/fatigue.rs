//! Rule fatigue: adherence as the number of lexical rules grows.

use ca_client::{ChatBackend, GenerationClient};
use ca_core::{ConstraintSet, TrialRecord};
use ca_score::lexical_adherence;
use ca_sink::append_result;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing::info;

use crate::context::{artifact_key, sample_terms, HarnessContext};
use crate::prompts::rule_list_prompt;
use crate::ExperimentError;

/// Rule counts swept per model.
pub const RULE_COUNTS: [usize; 4] = [5, 20, 50, 100];

/// Results file family name.
pub const FAMILY: &str = "fatigue";

/// Run the rule fatigue sweep.
pub async fn run<B: ChatBackend>(
    ctx: &HarnessContext,
    client: &GenerationClient<B>,
) -> Result<(), ExperimentError> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(ctx.seed);
    let store = ctx.artifact_store();
    let results = ctx.results_path(FAMILY);

    for model in &ctx.models {
        for &rule_count in &RULE_COUNTS {
            let experiment_name = format!("fatigue_R{rule_count}");
            info!(model, experiment = %experiment_name, "starting experiment");

            for trial in 1..=ctx.trials {
                let constraints =
                    ConstraintSet::new(sample_terms(&mut rng, &ctx.lexicon, rule_count));
                let prompt = rule_list_prompt(&constraints);

                let result = client.generate(&prompt, model).await;
                let story = result.scorable_text();

                store.save_artifacts(
                    &artifact_key(&experiment_name, model),
                    trial,
                    &prompt,
                    &story,
                    trial == 1,
                )?;

                let adherence = lexical_adherence(&story, constraints.terms());
                let record = TrialRecord::from_adherence(
                    experiment_name.as_str(),
                    trial,
                    model.as_str(),
                    rule_count as u32,
                    &adherence,
                    prompt.len(),
                    "Volatile components active",
                );
                append_result(&results, &record)?;

                info!(
                    model,
                    trial,
                    passed = adherence.passed_count,
                    rules = rule_count,
                    adherence_pct = adherence.adherence * 100.0,
                    "trial complete"
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use ca_client::{ChatMessage, ClientError, RetryPolicy};
    use ca_core::load_lexicon;

    use super::*;

    /// Backend that always returns the same story.
    struct CannedBackend {
        story: String,
    }

    impl ChatBackend for CannedBackend {
        async fn chat(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
        ) -> Result<String, ClientError> {
            Ok(self.story.clone())
        }
    }

    fn test_context(dir: &std::path::Path) -> HarnessContext {
        // Missing lexicon path exercises the fallback vocabulary.
        let lexicon = load_lexicon(std::path::Path::new("/nonexistent/words"), 120);
        HarnessContext::new(dir, vec!["phi3:3.8b".to_string()], 2, lexicon, 11)
    }

    #[tokio::test]
    async fn test_sweep_appends_one_row_per_trial() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = test_context(dir.path());
        let client = GenerationClient::new(
            CannedBackend {
                story: "An apple by the river under the mountain sunlight.".to_string(),
            },
            RetryPolicy::default(),
        );

        run(&ctx, &client).await.expect("run");

        let content =
            std::fs::read_to_string(ctx.results_path(FAMILY)).expect("results file");
        let lines: Vec<&str> = content.lines().collect();
        // Header plus 4 rule counts x 2 trials.
        assert_eq!(lines.len(), 1 + RULE_COUNTS.len() * 2);
        assert!(lines[1].starts_with("fatigue_R5,1,phi3:3.8b,5,"));
        assert!(lines[2].starts_with("fatigue_R5,2,phi3:3.8b,5,"));
    }

    #[tokio::test]
    async fn test_exhausted_retries_still_record_rows() {
        use std::time::Duration;

        /// Backend that is permanently down.
        struct DownBackend;

        impl ChatBackend for DownBackend {
            async fn chat(
                &self,
                _model: &str,
                _messages: &[ChatMessage],
            ) -> Result<String, ClientError> {
                Err(ClientError::Backend {
                    status: 503,
                    message: "unavailable".to_string(),
                })
            }
        }

        let dir = tempfile::tempdir().expect("tempdir");
        let lexicon = load_lexicon(std::path::Path::new("/nonexistent/words"), 120);
        let ctx = HarnessContext::new(dir.path(), vec!["phi3:3.8b".to_string()], 1, lexicon, 11);
        let client = GenerationClient::new(
            DownBackend,
            RetryPolicy {
                max_retries: 2,
                base_delay: Duration::from_millis(1),
            },
        );

        run(&ctx, &client).await.expect("run");

        // The sentinel matches no lexical term, so every trial records
        // zero adherence; no row is ever missing.
        let content =
            std::fs::read_to_string(ctx.results_path(FAMILY)).expect("results file");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1 + RULE_COUNTS.len());
        assert!(lines[1].starts_with("fatigue_R5,1,phi3:3.8b,5,0,5,0,"));

        let story = std::fs::read_to_string(dir.path().join("fatigue_R5_phi3_3.8b_story.txt"))
            .expect("story artifact");
        assert_eq!(story, "ERROR: Failed to generate response after 2 attempts");
    }

    #[tokio::test]
    async fn test_first_trial_artifacts_are_captured() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = test_context(dir.path());
        let client = GenerationClient::new(
            CannedBackend {
                story: "A short story.".to_string(),
            },
            RetryPolicy::default(),
        );

        run(&ctx, &client).await.expect("run");

        let prompt_path = dir.path().join("fatigue_R5_phi3_3.8b_prompt.txt");
        let story_path = dir.path().join("fatigue_R5_phi3_3.8b_story.txt");
        assert!(prompt_path.exists());
        assert_eq!(
            std::fs::read_to_string(story_path).expect("story"),
            "A short story."
        );
    }
}
