//! Contradiction resolution: both tense directives at once.
//!
//! The prompt mandates past tense AND future tense; the tense classifier
//! reports which way the model resolved it. The classification is detail
//! text only, the adherence column stays purely lexical.

use ca_client::{ChatBackend, GenerationClient};
use ca_core::{ConstraintSet, TrialRecord};
use ca_score::{lexical_adherence, tense_resolution};
use ca_sink::append_result;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing::info;

use crate::context::{artifact_key, sample_terms, HarnessContext};
use crate::prompts::rule_list_prompt;
use crate::ExperimentError;

/// Lexical terms per trial.
pub const RULE_COUNT: usize = 20;

/// The contradictory directive pair.
pub const CONTRADICTION: [&str; 2] = [
    "Write the story only in the past tense.",
    "Write the story only in the future tense.",
];

/// Results file family name.
pub const FAMILY: &str = "contradictions";

/// Run the contradiction resolution sweep.
pub async fn run<B: ChatBackend>(
    ctx: &HarnessContext,
    client: &GenerationClient<B>,
) -> Result<(), ExperimentError> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(ctx.seed);
    let store = ctx.artifact_store();
    let results = ctx.results_path(FAMILY);

    for model in &ctx.models {
        let experiment_name = format!("contradiction_tense_R{RULE_COUNT}");
        info!(model, experiment = %experiment_name, "starting experiment");

        for trial in 1..=ctx.trials {
            let constraints = ConstraintSet::new(sample_terms(&mut rng, &ctx.lexicon, RULE_COUNT))
                .with_directives(CONTRADICTION.map(String::from).to_vec());
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
            let tense = tense_resolution(&story);
            let details = format!(
                "Tense resolution: {}; Past: {}, Future: {}",
                tense.resolution, tense.past_count, tense.future_count
            );

            // The two directives count toward the presented rule total.
            let record = TrialRecord::from_adherence(
                experiment_name.as_str(),
                trial,
                model.as_str(),
                constraints.rule_count() as u32,
                &adherence,
                prompt.len(),
                details,
            );
            append_result(&results, &record)?;

            info!(
                model,
                trial,
                adherence_pct = adherence.adherence * 100.0,
                tense = %tense.resolution,
                "trial complete"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use ca_client::{ChatMessage, ClientError, RetryPolicy};
    use ca_score::TenseResolution;

    use super::*;

    /// Story written firmly in the past tense.
    struct PastTenseBackend;

    impl ChatBackend for PastTenseBackend {
        async fn chat(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
        ) -> Result<String, ClientError> {
            Ok("It was cold. They were tired. She said nothing and went home. He saw \
                the road. It had rained. They thought about it. He did not mind."
                .to_string())
        }
    }

    #[tokio::test]
    async fn test_rule_total_includes_both_directives() {
        let dir = tempfile::tempdir().expect("tempdir");
        let lexicon: Vec<String> = (0..40).map(|i| format!("term{i}")).collect();
        let ctx = HarnessContext::new(dir.path(), vec!["m:1b".to_string()], 1, lexicon, 9);
        let client = GenerationClient::new(PastTenseBackend, RetryPolicy::default());

        run(&ctx, &client).await.expect("run");

        let content =
            std::fs::read_to_string(ctx.results_path(FAMILY)).expect("results file");
        let row = content.lines().nth(1).expect("data row");
        // R column is 22: 20 lexical terms plus the directive pair.
        assert!(row.starts_with("contradiction_tense_R20,1,m:1b,22,"));
        assert!(row.contains("Tense resolution: followed_past_tense"));
    }

    #[test]
    fn test_canned_story_classifies_past() {
        let report = tense_resolution(
            "It was cold. They were tired. She said nothing and went home.",
        );
        assert_eq!(report.resolution, TenseResolution::FollowedPastTense);
    }
}
