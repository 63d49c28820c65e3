//! Structural shape scoring.
//!
//! Paragraphs split on blank-line boundaries, sentences on periods.
//! Both sub-checks are binary and averaged, so the structural score is
//! always one of {0, 0.5, 1.0}.

/// Weight of the lexical score in the combined lexical+structural score.
pub const LEXICAL_WEIGHT: f64 = 0.5;
/// Weight of the structural score in the combined lexical+structural score.
pub const STRUCTURAL_WEIGHT: f64 = 0.5;

/// Targets for the two structural sub-checks.
///
/// The defaults mirror the structural directives presented in prompts
/// ("exactly 3 paragraphs", "15 words or fewer per sentence").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralTargets {
    /// Required exact paragraph count.
    pub paragraph_count: usize,
    /// Maximum words allowed per sentence.
    pub max_sentence_words: usize,
}

impl Default for StructuralTargets {
    fn default() -> Self {
        Self {
            paragraph_count: 3,
            max_sentence_words: 15,
        }
    }
}

/// Outcome of the structural checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructuralReport {
    /// Number of non-empty paragraphs found.
    pub paragraph_count: usize,
    /// Number of sentences exceeding the word cap.
    pub long_sentences: usize,
    /// Average of the two binary sub-checks: 0, 0.5, or 1.0.
    pub structural_adherence: f64,
}

/// Score the text's structural shape against the targets.
///
/// Empty text reports zero paragraphs, which fails the exact-count check.
#[must_use]
pub fn structural_adherence(text: &str, targets: &StructuralTargets) -> StructuralReport {
    let paragraphs: Vec<&str> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut long_sentences = 0;
    for paragraph in &paragraphs {
        for sentence in paragraph.split('.') {
            let sentence = sentence.trim();
            if !sentence.is_empty() && sentence.split_whitespace().count() > targets.max_sentence_words
            {
                long_sentences += 1;
            }
        }
    }

    let paragraph_ok = if paragraphs.len() == targets.paragraph_count {
        1.0
    } else {
        0.0
    };
    let sentence_ok = if long_sentences == 0 { 1.0 } else { 0.0 };

    StructuralReport {
        paragraph_count: paragraphs.len(),
        long_sentences,
        structural_adherence: (paragraph_ok + sentence_ok) / 2.0,
    }
}

/// Combine lexical and structural scores into the recorded adherence.
///
/// The unweighted 50/50 average replaces the lexical-only value whenever
/// structural constraints are active.
#[must_use]
pub fn combined_adherence(lexical: f64, structural: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&lexical), "Lexical score out of range");
    debug_assert!(
        (0.0..=1.0).contains(&structural),
        "Structural score out of range"
    );

    lexical * LEXICAL_WEIGHT + structural * STRUCTURAL_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_SHORT_PARAGRAPHS: &str = "\
The sun rose early. Birds sang.

The river ran cold. A fox watched it.

Night fell at last. All was quiet.";

    #[test]
    fn test_conforming_text_scores_full() {
        let report = structural_adherence(THREE_SHORT_PARAGRAPHS, &StructuralTargets::default());
        assert_eq!(report.paragraph_count, 3);
        assert_eq!(report.long_sentences, 0);
        assert!((report.structural_adherence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wrong_paragraph_count_scores_half() {
        let two_paragraphs = "Short one.\n\nShort two.";
        let report = structural_adherence(two_paragraphs, &StructuralTargets::default());
        assert_eq!(report.paragraph_count, 2);
        assert_eq!(report.long_sentences, 0);
        assert!((report.structural_adherence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_long_sentence_detected() {
        let rambling = "\
One.\n\nTwo.\n\nthis final sentence keeps going on and on and on with far too \
many words to fit under the configured cap.";
        let report = structural_adherence(rambling, &StructuralTargets::default());
        assert_eq!(report.paragraph_count, 3);
        assert_eq!(report.long_sentences, 1);
        assert!((report.structural_adherence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_text_reports_zero_paragraphs() {
        let report = structural_adherence("", &StructuralTargets::default());
        assert_eq!(report.paragraph_count, 0);
        assert_eq!(report.long_sentences, 0);
        // Paragraph check fails, sentence check vacuously passes.
        assert!((report.structural_adherence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_both_checks_failing_scores_zero() {
        let bad = "a sentence stretched well past fifteen words by simply repeating \
itself again and again and again and again";
        let report = structural_adherence(bad, &StructuralTargets::default());
        assert_eq!(report.paragraph_count, 1);
        assert_eq!(report.long_sentences, 1);
        assert!((report.structural_adherence - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_combined_is_unweighted_average() {
        assert!((combined_adherence(1.0, 0.0) - 0.5).abs() < f64::EPSILON);
        assert!((combined_adherence(0.8, 0.5) - 0.65).abs() < f64::EPSILON);
        assert!((combined_adherence(0.0, 0.0) - 0.0).abs() < f64::EPSILON);
    }
}
