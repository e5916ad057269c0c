//! Sprout Algo - teammate matching service for Sprout cohort groups
//!
//! This library provides the core matching algorithm used by the Sprout app.
//! Participants in a cohort group are paired (or grouped into trios) from
//! their questionnaire answers, scored across five weighted compatibility
//! pillars: skills, availability, work style, motivation, and experience.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{compute_pair_score, MatchError, MatchResult, Matcher};
pub use models::{Answers, MatchExplanation, MatchThresholds, PairMatch, PillarWeights, TrioMatch};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let score = compute_pair_score(
            &Answers::default(),
            &Answers::default(),
            &PillarWeights::default(),
            &MatchThresholds::default(),
        );
        assert!((0.0..=100.0).contains(&score));
    }
}
