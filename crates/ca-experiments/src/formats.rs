//! Presentation format effects: the same rules, rendered four ways.

use ca_client::{ChatBackend, GenerationClient};
use ca_core::TrialRecord;
use ca_score::lexical_adherence;
use ca_sink::append_result;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing::info;

use crate::context::{artifact_key, sample_terms, HarnessContext};
use crate::prompts::{formatted_prompt, RuleFormat};
use crate::ExperimentError;

/// Lexical terms per trial.
pub const RULE_COUNT: usize = 50;

/// Results file family name.
pub const FAMILY: &str = "formats";

/// Run the presentation-format sweep.
pub async fn run<B: ChatBackend>(
    ctx: &HarnessContext,
    client: &GenerationClient<B>,
) -> Result<(), ExperimentError> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(ctx.seed);
    let store = ctx.artifact_store();
    let results = ctx.results_path(FAMILY);

    for model in &ctx.models {
        for format in RuleFormat::ALL {
            let experiment_name = format!("format_{}_R{RULE_COUNT}", format.name());
            info!(model, experiment = %experiment_name, "starting experiment");

            for trial in 1..=ctx.trials {
                let terms = sample_terms(&mut rng, &ctx.lexicon, RULE_COUNT);
                let prompt = formatted_prompt(&terms, format)?;

                let result = client.generate(&prompt, model).await;
                let story = result.scorable_text();

                store.save_artifacts(
                    &artifact_key(&experiment_name, model),
                    trial,
                    &prompt,
                    &story,
                    trial == 1,
                )?;

                let adherence = lexical_adherence(&story, &terms);
                let record = TrialRecord::from_adherence(
                    experiment_name.as_str(),
                    trial,
                    model.as_str(),
                    RULE_COUNT as u32,
                    &adherence,
                    prompt.len(),
                    format!("Format: {}", format.description()),
                );
                append_result(&results, &record)?;

                info!(
                    model,
                    trial,
                    format = format.name(),
                    passed = adherence.passed_count,
                    rules = RULE_COUNT,
                    adherence_pct = adherence.adherence * 100.0,
                    "trial complete"
                );
            }
        }
    }

    Ok(())
}
