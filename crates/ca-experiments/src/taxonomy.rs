//! Constraint-type taxonomy: lexical-only vs lexical+structural rules.

use ca_client::{ChatBackend, GenerationClient};
use ca_core::{ConstraintSet, TrialRecord};
use ca_score::{combined_adherence, lexical_adherence, structural_adherence, StructuralTargets};
use ca_sink::append_result;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing::info;

use crate::context::{artifact_key, sample_terms, HarnessContext};
use crate::prompts::rule_list_prompt;
use crate::ExperimentError;

/// Lexical terms per trial.
pub const RULE_COUNT: usize = 20;

/// Structural directives added in the structural condition. They state
/// the same targets the structural scorer checks.
pub const STRUCTURAL_RULES: [&str; 2] = [
    "Write exactly 3 paragraphs.",
    "Every sentence must have 15 words or fewer.",
];

/// Results file family name.
pub const FAMILY: &str = "taxonomy";

/// Run the lexical-vs-structural comparison.
pub async fn run<B: ChatBackend>(
    ctx: &HarnessContext,
    client: &GenerationClient<B>,
) -> Result<(), ExperimentError> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(ctx.seed);
    let store = ctx.artifact_store();
    let results = ctx.results_path(FAMILY);
    let targets = StructuralTargets::default();

    for model in &ctx.models {
        for structural in [false, true] {
            let constraint_type = if structural { "structural" } else { "lexical" };
            let experiment_name = format!("taxonomy_{constraint_type}_R{RULE_COUNT}");
            info!(model, experiment = %experiment_name, "starting experiment");

            for trial in 1..=ctx.trials {
                let terms = sample_terms(&mut rng, &ctx.lexicon, RULE_COUNT);
                let constraints = if structural {
                    ConstraintSet::new(terms)
                        .with_directives(STRUCTURAL_RULES.map(String::from).to_vec())
                } else {
                    ConstraintSet::new(terms)
                };
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

                let mut adherence = lexical_adherence(&story, constraints.terms());
                let details = if structural {
                    let report = structural_adherence(&story, &targets);
                    // The combined score replaces the lexical-only value.
                    adherence.adherence =
                        combined_adherence(adherence.adherence, report.structural_adherence);
                    format!(
                        "Type: structural. Paragraphs: {}/{}, Long sentences: {}",
                        report.paragraph_count, targets.paragraph_count, report.long_sentences
                    )
                } else {
                    "Type: lexical.".to_string()
                };

                let record = TrialRecord::from_adherence(
                    experiment_name.as_str(),
                    trial,
                    model.as_str(),
                    RULE_COUNT as u32,
                    &adherence,
                    prompt.len(),
                    details,
                );
                append_result(&results, &record)?;

                info!(
                    model,
                    trial,
                    constraint_type,
                    adherence_pct = adherence.adherence * 100.0,
                    "trial complete"
                );
            }
        }
    }

    Ok(())
}
