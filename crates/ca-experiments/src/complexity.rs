//! Progressive complexity ladder: L1 lexical-only through L4 hierarchy.

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

/// Lexical terms per trial.
pub const RULE_COUNT: usize = 20;

/// One rung of the complexity ladder.
#[derive(Debug, Clone, Copy)]
pub struct ComplexityLevel {
    pub name: &'static str,
    pub rules: &'static [&'static str],
}

/// The ladder, from bare lexical rules to hierarchical placement.
pub const COMPLEXITY_LEVELS: [ComplexityLevel; 4] = [
    ComplexityLevel {
        name: "L1_Lexical",
        rules: &[],
    },
    ComplexityLevel {
        name: "L2_Tense",
        rules: &["Write in the past tense."],
    },
    ComplexityLevel {
        name: "L3_Structure",
        rules: &[
            "Write in the past tense.",
            "The story must have exactly 3 paragraphs.",
        ],
    },
    ComplexityLevel {
        name: "L4_Hierarchy",
        rules: &[
            "Write in the past tense.",
            "The story must have exactly 3 paragraphs.",
            "The word 'apple' must appear in the first paragraph.",
        ],
    },
];

/// Results file family name.
pub const FAMILY: &str = "complexity";

/// Run the complexity ladder sweep.
pub async fn run<B: ChatBackend>(
    ctx: &HarnessContext,
    client: &GenerationClient<B>,
) -> Result<(), ExperimentError> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(ctx.seed);
    let store = ctx.artifact_store();
    let results = ctx.results_path(FAMILY);

    for model in &ctx.models {
        for level in &COMPLEXITY_LEVELS {
            let experiment_name = format!("complexity_{}_R{RULE_COUNT}", level.name);
            info!(model, experiment = %experiment_name, "starting experiment");

            for trial in 1..=ctx.trials {
                let mut terms = sample_terms(&mut rng, &ctx.lexicon, RULE_COUNT);
                // L4 references 'apple' by name; force it into the sampled
                // terms so the hierarchy rule stays satisfiable.
                if level.name.ends_with("Hierarchy")
                    && !terms.iter().any(|t| t == "apple")
                {
                    terms[0] = "apple".to_string();
                }

                let constraints = ConstraintSet::new(terms)
                    .with_directives(level.rules.iter().map(|r| (*r).to_string()).collect());
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
                let details = format!("Complexity: {}", level.name);
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
                    level = level.name,
                    adherence_pct = adherence.adherence * 100.0,
                    "trial complete"
                );
            }
        }
    }

    Ok(())
}
