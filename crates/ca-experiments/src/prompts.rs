//! Prompt rendering for constraint sets.
//!
//! The terms rendered here are the exact terms the scorer later checks;
//! builders take the constraint set (or term slice) they were given and
//! never relabel it.

use ca_core::ConstraintSet;
use serde::Serialize;

/// Header for rule-list prompts.
pub const PROMPT_HEADER: &str = "Create a short story subject to the following rules:\n";

/// Header for the presentation-format experiment.
pub const FORMAT_HEADER: &str = "Create a short story with the following requirements:\n";

/// Volatile preamble present in every prompt.
pub const VOLATILE_PREAMBLE: &str =
    "Memorize these rules. Review requirements before writing. Keep in mind throughout.\n\n";

/// Render a constraint set as the standard bulleted rule list.
///
/// One `- Include the word '<w>'` line per term, then one `- <rule>` line
/// per directive, in presentation order.
#[must_use]
pub fn rule_list_prompt(constraints: &ConstraintSet) -> String {
    let mut lines: Vec<String> = constraints
        .terms()
        .iter()
        .map(|word| format!("- Include the word '{word}'"))
        .collect();
    lines.extend(
        constraints
            .directives()
            .iter()
            .map(|rule| format!("- {rule}")),
    );

    format!("{PROMPT_HEADER}{VOLATILE_PREAMBLE}{}\n", lines.join("\n"))
}

/// Presentation formats for the same rule content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Numbered,
    Bullet,
    Json,
    Paragraph,
}

impl RuleFormat {
    /// All formats, in sweep order.
    pub const ALL: [RuleFormat; 4] = [
        RuleFormat::Numbered,
        RuleFormat::Bullet,
        RuleFormat::Json,
        RuleFormat::Paragraph,
    ];

    /// Short name used in experiment and file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Numbered => "numbered",
            Self::Bullet => "bullet",
            Self::Json => "json",
            Self::Paragraph => "paragraph",
        }
    }

    /// Human-readable description recorded in the details column.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Numbered => "Standard numbered list",
            Self::Bullet => "Bullet point format",
            Self::Json => "JSON structured rules",
            Self::Paragraph => "Paragraph prose format",
        }
    }
}

#[derive(Serialize)]
struct JsonRules<'a> {
    task: &'a str,
    required_words: &'a [String],
}

/// Render the same terms in one of the presentation formats.
pub fn formatted_prompt(terms: &[String], format: RuleFormat) -> Result<String, serde_json::Error> {
    let body = match format {
        RuleFormat::Numbered => terms
            .iter()
            .enumerate()
            .map(|(i, word)| format!("{}. Include the word '{word}'", i + 1))
            .collect::<Vec<_>>()
            .join("\n"),
        RuleFormat::Bullet => terms
            .iter()
            .map(|word| format!("- Include the word '{word}'"))
            .collect::<Vec<_>>()
            .join("\n"),
        RuleFormat::Json => {
            let rules = serde_json::to_string_pretty(&JsonRules {
                task: "write a story",
                required_words: terms,
            })?;
            format!("Please adhere to the constraints provided in the following JSON object:\n{rules}")
        }
        RuleFormat::Paragraph => format!(
            "Your story must include all of the following words: {}. Please ensure every \
             single word from this list appears naturally in your narrative.",
            terms.join(", ")
        ),
    };

    Ok(format!("{FORMAT_HEADER}{VOLATILE_PREAMBLE}{body}"))
}
