//! Tense-resolution classification for contradictory directives.
//!
//! When a prompt mandates past tense AND future tense at once, the model
//! must resolve the contradiction somehow. This classifier infers which
//! way it went from marker-word frequencies. The outcome is categorical
//! and recorded as detail text; it is never folded into the adherence
//! fraction.

/// Past-tense marker vocabulary. Occurrences are substring counts.
pub const PAST_MARKERS: [&str; 8] = [
    "was", "were", "had", "did", "went", "saw", "thought", "said",
];

/// Future-tense marker vocabulary. Occurrences are substring counts.
pub const FUTURE_MARKERS: [&str; 4] = ["will", "shall", "going to", "would be"];

/// Past fraction above which the text counts as past tense.
pub const PAST_RATIO_THRESHOLD: f64 = 0.8;
/// Past fraction below which the text counts as future tense.
pub const FUTURE_RATIO_THRESHOLD: f64 = 0.2;

/// How the model resolved the contradictory tense directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenseResolution {
    /// No markers of either tense were found.
    NoClearTense,
    /// Past markers dominate (past fraction above the threshold).
    FollowedPastTense,
    /// Future markers dominate (past fraction below the threshold).
    FollowedFutureTense,
    /// Neither tense dominates.
    MixedOrIgnored,
}

impl TenseResolution {
    /// The label written into the `details` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoClearTense => "no_clear_tense",
            Self::FollowedPastTense => "followed_past_tense",
            Self::FollowedFutureTense => "followed_future_tense",
            Self::MixedOrIgnored => "mixed_or_ignored",
        }
    }
}

impl std::fmt::Display for TenseResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification outcome with the raw marker counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenseReport {
    pub resolution: TenseResolution,
    pub past_count: usize,
    pub future_count: usize,
}

/// Classify which tense the text settled on.
///
/// Marker occurrences are counted as non-overlapping substrings of the
/// lowercased text, so "wasteland" counts toward "was".
#[must_use]
pub fn tense_resolution(text: &str) -> TenseReport {
    let lower_text = text.to_lowercase();

    let past_count: usize = PAST_MARKERS
        .iter()
        .map(|marker| lower_text.matches(marker).count())
        .sum();
    let future_count: usize = FUTURE_MARKERS
        .iter()
        .map(|marker| lower_text.matches(marker).count())
        .sum();

    let total = past_count + future_count;
    if total == 0 {
        return TenseReport {
            resolution: TenseResolution::NoClearTense,
            past_count: 0,
            future_count: 0,
        };
    }

    let past_ratio = past_count as f64 / total as f64;
    let resolution = if past_ratio > PAST_RATIO_THRESHOLD {
        TenseResolution::FollowedPastTense
    } else if past_ratio < FUTURE_RATIO_THRESHOLD {
        TenseResolution::FollowedFutureTense
    } else {
        TenseResolution::MixedOrIgnored
    };

    TenseReport {
        resolution,
        past_count,
        future_count,
    }
}
