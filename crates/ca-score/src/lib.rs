//! # ca-score
//!
//! Pure adherence scoring for generated text.
//!
//! Three independent scorers share one contract: deterministic,
//! case-insensitive matching over an immutable `(text, constraints)`
//! input, no external state. They compose into the single adherence
//! fraction recorded per trial:
//!
//! | Scorer | Checks | Output |
//! |--------|--------|--------|
//! | lexical | required terms appear | `AdherenceRecord`, fraction in [0, 1] |
//! | structural | paragraph count, sentence length | {0, 0.5, 1.0}, averaged 50/50 into the lexical score |
//! | tense | past vs future marker ratio | categorical, recorded as detail text only |

pub mod lexical;
pub mod structural;
pub mod tense;

pub use lexical::lexical_adherence;
pub use structural::{
    combined_adherence, structural_adherence, StructuralReport, StructuralTargets,
};
pub use tense::{tense_resolution, TenseReport, TenseResolution};
