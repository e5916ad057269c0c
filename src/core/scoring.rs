use crate::models::{Answers, MatchThresholds, PillarWeights, SkillCategory};
use std::collections::HashSet;

/// Compute the compatibility score (0-100) for two participants' answers
///
/// Scoring formula:
/// score = (
///     skills_score * 0.35 +        # Complementary skill categories
///     availability_score * 0.25 +  # Hours-per-week + region alignment
///     work_style_score * 0.20 +    # Structure, comms, deadlines, ambiguity
///     motivation_score * 0.15 +    # Shared motivation tags (Jaccard)
///     experience_score * 0.05      # Project count + experience level gap
/// )
///
/// Pure and deterministic: the same two answer sets always produce the same
/// score, and the score is symmetric in its arguments. Rounded to 2 decimals.
pub fn compute_pair_score(
    a: &Answers,
    b: &Answers,
    weights: &PillarWeights,
    thresholds: &MatchThresholds,
) -> f64 {
    let total = weights.skills * skills_score(a, b)
        + weights.availability * availability_score(a, b, thresholds.availability_gap_hours)
        + weights.work_style * work_style_score(a, b)
        + weights.motivation * motivation_score(a, b)
        + weights.experience * experience_score(a, b);

    round2(total)
}

/// Round to 2 decimal places
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Skill pillar (0-100): complement matrix over primary skill categories.
/// Same-category pairings score lowest; cross-category pairings are rewarded.
/// A missing category counts as `other`.
pub fn skills_score(a: &Answers, b: &Answers) -> f64 {
    let s1 = a.primary_skill.unwrap_or(SkillCategory::Other);
    let s2 = b.primary_skill.unwrap_or(SkillCategory::Other);
    skill_complement(s1, s2)
}

/// Symmetric skill complement matrix. Same category scores 40 (50 for
/// other/other); cross-category entries range 65-100.
fn skill_complement(a: SkillCategory, b: SkillCategory) -> f64 {
    use SkillCategory::*;

    match (a.min(b), a.max(b)) {
        (Other, Other) => 50.0,
        (x, y) if x == y => 40.0,
        (Technical, Business) => 100.0,
        (Technical, Marketing) => 100.0,
        (Technical, Design) => 90.0,
        (Technical, Finance) => 70.0,
        (Technical, Other) => 70.0,
        (Business, Marketing) => 80.0,
        (Business, Design) => 90.0,
        (Business, Finance) => 80.0,
        (Business, Other) => 80.0,
        (Design, Marketing) => 90.0,
        (Design, Finance) => 70.0,
        (Design, Other) => 85.0,
        (Marketing, Finance) => 70.0,
        (Marketing, Other) => 80.0,
        (Finance, Other) => 65.0,
        _ => 50.0,
    }
}

/// Availability pillar (0-100): starts at 100, drops 4 points per hour of
/// gap between representative weekly hours, plus a 30-point step per full
/// 10-hour bracket beyond `gap_threshold_hours`. Differing regions multiply
/// the result by 0.7. Missing brackets count as 0 hours; two missing regions
/// compare equal.
pub fn availability_score(a: &Answers, b: &Answers, gap_threshold_hours: f64) -> f64 {
    let h1 = a.weekly_hours.map_or(0.0, |h| h.representative_hours());
    let h2 = b.weekly_hours.map_or(0.0, |h| h.representative_hours());
    let gap = (h1 - h2).abs();

    let bracket_gaps = if gap > gap_threshold_hours {
        ((gap - gap_threshold_hours) / 10.0).ceil()
    } else {
        0.0
    };

    let mut score = 100.0 - (gap * 4.0 + bracket_gaps * 30.0).min(100.0);

    if a.region != b.region {
        score *= 0.7;
    }

    score.clamp(0.0, 100.0)
}

/// Work-style pillar (0-100): mean of five equally weighted sub-scores —
/// three categorical equality checks (structure, communication, ambiguity)
/// and two 1-5 scale similarity checks (planner/executor, deadline
/// strictness).
pub fn work_style_score(a: &Answers, b: &Answers) -> f64 {
    let sum = categorical(&a.structure_preference, &b.structure_preference)
        + scale_similarity(a.planner_executor, b.planner_executor)
        + categorical(&a.communication_preference, &b.communication_preference)
        + scale_similarity(a.deadline_strictness, b.deadline_strictness)
        + categorical(&a.ambiguity_tolerance, &b.ambiguity_tolerance);

    sum / 5.0
}

/// 100 if identical (including both unanswered), 50 otherwise
#[inline]
fn categorical<T: PartialEq>(a: &Option<T>, b: &Option<T>) -> f64 {
    if a == b { 100.0 } else { 50.0 }
}

/// max(0, 100 - |difference| * 25) on a 1-5 scale; unanswered counts as 0
#[inline]
fn scale_similarity(a: Option<u8>, b: Option<u8>) -> f64 {
    let x = a.unwrap_or(0) as f64;
    let y = b.unwrap_or(0) as f64;
    (100.0 - (x - y).abs() * 25.0).max(0.0)
}

/// Motivation pillar (0-100): Jaccard similarity of motivation tag sets,
/// scaled to 100. Two empty selections default to a neutral-positive 70.
pub fn motivation_score(a: &Answers, b: &Answers) -> f64 {
    if a.motivations.is_empty() && b.motivations.is_empty() {
        return 70.0;
    }

    let set_a: HashSet<_> = a.motivations.iter().collect();
    let set_b: HashSet<_> = b.motivations.iter().collect();
    let overlap = set_a.intersection(&set_b).count();
    let total = set_a.union(&set_b).count();

    if total == 0 {
        70.0
    } else {
        (overlap as f64 / total as f64) * 100.0
    }
}

/// Experience pillar (0-100): worst-case gap across the two 4-level
/// experience brackets (project count, overall level), mapped
/// {0: 100, 1: 75, 2: 50, >=3: 25}. Unanswered brackets sit below the lowest
/// level, so one answered vs one unanswered reads as a one-step gap.
pub fn experience_score(a: &Answers, b: &Answers) -> f64 {
    let projects_gap = index_gap(
        a.project_count.map(|p| p.index()),
        b.project_count.map(|p| p.index()),
    );
    let level_gap = index_gap(
        a.experience_level.map(|l| l.index()),
        b.experience_level.map(|l| l.index()),
    );

    match projects_gap.max(level_gap) {
        0 => 100.0,
        1 => 75.0,
        2 => 50.0,
        _ => 25.0,
    }
}

#[inline]
fn index_gap(a: Option<u8>, b: Option<u8>) -> i32 {
    let x = a.map_or(-1, |v| v as i32);
    let y = b.map_or(-1, |v| v as i32);
    (x - y).abs()
}

impl SkillCategory {
    /// Ordering used only to canonicalize matrix lookups
    fn rank(&self) -> u8 {
        match self {
            SkillCategory::Technical => 0,
            SkillCategory::Business => 1,
            SkillCategory::Design => 2,
            SkillCategory::Marketing => 3,
            SkillCategory::Finance => 4,
            SkillCategory::Other => 5,
        }
    }

    fn min(self, other: Self) -> Self {
        if self.rank() <= other.rank() { self } else { other }
    }

    fn max(self, other: Self) -> Self {
        if self.rank() >= other.rank() { self } else { other }
    }
}
