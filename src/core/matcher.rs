use crate::core::explain::{build_pair_explanation, build_trio_explanation};
use crate::core::scoring::{compute_pair_score, round2};
use crate::models::{Answers, MatchExplanation, MatchThresholds, PairMatch, PillarWeights, TrioMatch};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors from the matching core
#[derive(Debug, Error)]
pub enum MatchError {
    /// The caller promised a complete answer map; a missing entry is a caller
    /// bug, not a recoverable runtime case.
    #[error("no answers supplied for participant {user_id}")]
    MissingAnswers { user_id: String },
}

/// Result of one matching run for a group
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MatchResult {
    #[serde(rename = "pairMatches")]
    pub pair_matches: Vec<PairMatch>,
    #[serde(rename = "trioMatches")]
    pub trio_matches: Vec<TrioMatch>,
    #[serde(rename = "unmatchedUserIds")]
    pub unmatched_user_ids: Vec<String>,
}

/// A scored candidate pair, prior to assignment
#[derive(Debug, Clone)]
struct PairCandidate {
    user_ids: [usize; 2],
    score: f64,
    explanation: MatchExplanation,
}

/// A gated candidate trio, prior to assignment
#[derive(Debug, Clone)]
struct TrioCandidate {
    user_ids: [usize; 3],
    score: f64,
    explanation: MatchExplanation,
}

/// Greedy pair/trio matcher over one group's eligible participants
///
/// # Algorithm
/// 1. Score every unordered pair (O(n²))
/// 2. Greedily assign disjoint pairs, best score first
/// 3. Try to salvage leftovers into trios under stricter thresholds (O(n³)
///    over the leftover pool)
/// 4. Report the rest unmatched
///
/// Greedy assignment approximates maximum-weight matching. Exact matching is
/// deliberately not used: group sizes are tens to low hundreds and the
/// greedy walk keeps results simple, fast, and deterministic. Sorting is
/// stable, so ties keep enumeration order (lower-index pair first) and a run
/// is byte-for-byte reproducible for the same input order and answers.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: PillarWeights,
    thresholds: MatchThresholds,
}

impl Matcher {
    pub fn new(weights: PillarWeights, thresholds: MatchThresholds) -> Self {
        Self { weights, thresholds }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: PillarWeights::default(),
            thresholds: MatchThresholds::default(),
        }
    }

    /// Score one pair with the matcher's configured weights and thresholds
    pub fn pair_score(&self, a: &Answers, b: &Answers) -> f64 {
        compute_pair_score(a, b, &self.weights, &self.thresholds)
    }

    /// Run matching for one group's eligible participants.
    ///
    /// `answers_by_user` must contain an entry for every id in `user_ids`;
    /// a missing entry fails the whole run with [`MatchError::MissingAnswers`]
    /// rather than silently scoring on absent data. The result partitions the
    /// input: every id lands in exactly one pair, one trio, or the unmatched
    /// list.
    pub fn run_matching(
        &self,
        user_ids: &[String],
        answers_by_user: &HashMap<String, Answers>,
    ) -> Result<MatchResult, MatchError> {
        let answers: Vec<&Answers> = user_ids
            .iter()
            .map(|id| {
                answers_by_user
                    .get(id)
                    .ok_or_else(|| MatchError::MissingAnswers { user_id: id.clone() })
            })
            .collect::<Result<_, _>>()?;

        // A pool of exactly 3 can never reach the trio phase through the
        // pairs-first walk (one pair always forms, stranding the third), so
        // the lone triple is gated directly. Larger pools go pairs-first.
        if user_ids.len() == 3 {
            if let Some(trio) = self.evaluate_trio([0, 1, 2], &answers) {
                return Ok(MatchResult {
                    pair_matches: vec![],
                    trio_matches: vec![resolve_trio(trio, user_ids)],
                    unmatched_user_ids: vec![],
                });
            }
        }

        // Stage 1: enumerate and score every unordered pair
        let mut candidates: Vec<PairCandidate> = Vec::new();
        for i in 0..answers.len() {
            for j in (i + 1)..answers.len() {
                candidates.push(PairCandidate {
                    user_ids: [i, j],
                    score: self.pair_score(answers[i], answers[j]),
                    explanation: build_pair_explanation(answers[i], answers[j]),
                });
            }
        }

        // Stage 2: greedy assignment, best score first (stable sort keeps
        // enumeration order on ties)
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut used: HashSet<usize> = HashSet::new();
        let mut pair_matches: Vec<PairMatch> = Vec::new();

        for candidate in candidates {
            let [i, j] = candidate.user_ids;
            if used.contains(&i) || used.contains(&j) {
                continue;
            }
            used.insert(i);
            used.insert(j);
            pair_matches.push(PairMatch {
                user_ids: [user_ids[i].clone(), user_ids[j].clone()],
                compatibility_score: candidate.score,
                explanation: candidate.explanation,
            });
        }

        // Stage 3: leftover pool, in input order
        let leftover: Vec<usize> = (0..user_ids.len()).filter(|i| !used.contains(i)).collect();

        // Stage 4: trio salvage
        let mut trio_matches: Vec<TrioMatch> = Vec::new();
        if leftover.len() >= 3 {
            let mut trios: Vec<TrioCandidate> = Vec::new();
            for a in 0..leftover.len() {
                for b in (a + 1)..leftover.len() {
                    for c in (b + 1)..leftover.len() {
                        let ids = [leftover[a], leftover[b], leftover[c]];
                        if let Some(trio) = self.evaluate_trio(ids, &answers) {
                            trios.push(trio);
                        }
                    }
                }
            }

            trios.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            for trio in trios {
                if trio.user_ids.iter().any(|i| used.contains(i)) {
                    continue;
                }
                for i in trio.user_ids {
                    used.insert(i);
                }
                trio_matches.push(resolve_trio(trio, user_ids));
            }
        }

        // Stage 5: anyone still unconsumed is unmatched
        let unmatched_user_ids: Vec<String> = (0..user_ids.len())
            .filter(|i| !used.contains(i))
            .map(|i| user_ids[i].clone())
            .collect();

        Ok(MatchResult {
            pair_matches,
            trio_matches,
            unmatched_user_ids,
        })
    }

    /// Gate a triple: trio score is the rounded average of the three internal
    /// pairwise scores; it must reach `trio_min_score` and at least 2 of the
    /// 3 pairs must strictly exceed `trio_strong_pair_score`. The second gate
    /// rejects trios held together by one strong pair and two weak ones.
    fn evaluate_trio(&self, ids: [usize; 3], answers: &[&Answers]) -> Option<TrioCandidate> {
        let [i, j, k] = ids;
        let p1 = self.pair_score(answers[i], answers[j]);
        let p2 = self.pair_score(answers[i], answers[k]);
        let p3 = self.pair_score(answers[j], answers[k]);

        let score = round2((p1 + p2 + p3) / 3.0);
        let strong_pairs = [p1, p2, p3]
            .iter()
            .filter(|s| **s > self.thresholds.trio_strong_pair_score)
            .count();

        if score >= self.thresholds.trio_min_score && strong_pairs >= 2 {
            Some(TrioCandidate {
                user_ids: ids,
                score,
                explanation: build_trio_explanation(answers[i], answers[j]),
            })
        } else {
            None
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn resolve_trio(trio: TrioCandidate, user_ids: &[String]) -> TrioMatch {
    let [i, j, k] = trio.user_ids;
    TrioMatch {
        user_ids: [user_ids[i].clone(), user_ids[j].clone(), user_ids[k].clone()],
        compatibility_score: trio.score,
        explanation: trio.explanation,
    }
}
