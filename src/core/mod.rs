// Core algorithm exports
pub mod explain;
pub mod matcher;
pub mod scoring;

pub use explain::{build_pair_explanation, build_trio_explanation};
pub use matcher::{MatchError, MatchResult, Matcher};
pub use scoring::compute_pair_score;
