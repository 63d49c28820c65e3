//! Lexical inclusion scoring.

use ca_core::AdherenceRecord;

/// Score how many required terms appear in the text.
///
/// Matching is case-insensitive and by substring, not whole word: "cat"
/// passes when the text contains "category". This looseness is deliberate
/// and load-bearing; tightening it to word boundaries would silently
/// change what every recorded adherence number means.
///
/// An empty term list scores 1.0 (vacuously satisfied).
#[must_use]
pub fn lexical_adherence(text: &str, terms: &[String]) -> AdherenceRecord {
    let lower_text = text.to_lowercase();

    let mut passed_terms = Vec::new();
    let mut failed_terms = Vec::new();
    for term in terms {
        if lower_text.contains(&term.to_lowercase()) {
            passed_terms.push(term.clone());
        } else {
            failed_terms.push(term.clone());
        }
    }

    let adherence = if terms.is_empty() {
        1.0
    } else {
        passed_terms.len() as f64 / terms.len() as f64
    };

    AdherenceRecord {
        passed_count: passed_terms.len(),
        failed_count: failed_terms.len(),
        passed_terms,
        failed_terms,
        adherence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let record = lexical_adherence("The RIVER was wide", &terms(&["river"]));
        assert_eq!(record.passed_count, 1);
        assert_eq!(record.failed_count, 0);
        assert!((record.adherence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_substring_match_is_preserved() {
        // Documented looseness: a term passes inside a longer word.
        let record = lexical_adherence("category theory", &terms(&["cat"]));
        assert_eq!(record.passed_terms, vec!["cat".to_string()]);
    }

    #[test]
    fn test_counts_partition_the_terms() {
        let record = lexical_adherence(
            "the journey crossed the mountain",
            &terms(&["journey", "mountain", "river", "shadow"]),
        );
        assert_eq!(record.passed_count, 2);
        assert_eq!(record.failed_count, 2);
        assert_eq!(record.passed_count + record.failed_count, 4);
        assert!((record.adherence - 0.5).abs() < f64::EPSILON);
        assert_eq!(record.failed_terms, terms(&["river", "shadow"]));
    }

    #[test]
    fn test_empty_terms_vacuously_pass() {
        let record = lexical_adherence("anything at all", &[]);
        assert_eq!(record.passed_count, 0);
        assert_eq!(record.failed_count, 0);
        assert!((record.adherence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_text_fails_everything() {
        let record = lexical_adherence("", &terms(&["apple", "river"]));
        assert_eq!(record.passed_count, 0);
        assert_eq!(record.failed_count, 2);
        assert!((record.adherence - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_adherence_stays_in_unit_interval() {
        let cases = [
            ("", vec!["a".to_string()]),
            ("a b c", vec!["a".to_string(), "z".to_string()]),
            ("a b c", vec![]),
        ];
        for (text, term_list) in cases {
            let record = lexical_adherence(text, &term_list);
            assert!(record.adherence >= 0.0 && record.adherence <= 1.0);
        }
    }
}
