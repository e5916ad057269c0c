// Unit tests for Sprout Algo

use sprout_algo::core::scoring::{
    availability_score, compute_pair_score, experience_score, motivation_score, skills_score,
    work_style_score,
};
use sprout_algo::core::{build_pair_explanation, Matcher};
use sprout_algo::models::{
    Answers, CommunicationPreference, ExperienceLevel, HoursBracket, MatchThresholds,
    MotivationTag, PillarWeights, ProjectCountBracket, Region, SkillCategory, StructurePreference,
};

fn full_answers(skill: SkillCategory) -> Answers {
    Answers {
        primary_skill: Some(skill),
        project_count: Some(ProjectCountBracket::OneToTwo),
        experience_level: Some(ExperienceLevel::SomeExperience),
        weekly_hours: Some(HoursBracket::FiveToTen),
        region: Some(Region::NaEast),
        structure_preference: Some(StructurePreference::MostlyFlexible),
        planner_executor: Some(2),
        communication_preference: Some(CommunicationPreference::Mix),
        deadline_strictness: Some(4),
        ambiguity_tolerance: Some(sprout_algo::models::AmbiguityTolerance::NeedsClarity),
        motivations: vec![MotivationTag::Learn, MotivationTag::Meet],
    }
}

#[test]
fn test_pair_score_weighted_sum() {
    let weights = PillarWeights::default();
    let thresholds = MatchThresholds::default();

    let a = full_answers(SkillCategory::Technical);
    let b = full_answers(SkillCategory::Business);

    let expected = weights.skills * skills_score(&a, &b)
        + weights.availability * availability_score(&a, &b, thresholds.availability_gap_hours)
        + weights.work_style * work_style_score(&a, &b)
        + weights.motivation * motivation_score(&a, &b)
        + weights.experience * experience_score(&a, &b);
    let expected = (expected * 100.0).round() / 100.0;

    assert_eq!(compute_pair_score(&a, &b, &weights, &thresholds), expected);
}

#[test]
fn test_pair_score_symmetry_across_profiles() {
    let weights = PillarWeights::default();
    let thresholds = MatchThresholds::default();

    let profiles = vec![
        full_answers(SkillCategory::Technical),
        full_answers(SkillCategory::Finance),
        Answers {
            weekly_hours: Some(HoursBracket::TwentyPlus),
            region: Some(Region::SouthAsia),
            motivations: vec![MotivationTag::Win],
            ..Default::default()
        },
        Answers::default(),
    ];

    for a in &profiles {
        for b in &profiles {
            assert_eq!(
                compute_pair_score(a, b, &weights, &thresholds),
                compute_pair_score(b, a, &weights, &thresholds),
            );
        }
    }
}

#[test]
fn test_pair_score_bounds_extremes() {
    let weights = PillarWeights::default();
    let thresholds = MatchThresholds::default();

    // Deliberately hostile combination: maximal availability gap, disjoint
    // motivations, distant experience
    let a = Answers {
        primary_skill: Some(SkillCategory::Technical),
        project_count: Some(ProjectCountBracket::Zero),
        experience_level: Some(ExperienceLevel::Starting),
        weekly_hours: Some(HoursBracket::Under5),
        region: Some(Region::NaWest),
        planner_executor: Some(1),
        deadline_strictness: Some(1),
        motivations: vec![MotivationTag::Resume],
        ..Default::default()
    };
    let b = Answers {
        primary_skill: Some(SkillCategory::Technical),
        project_count: Some(ProjectCountBracket::SixPlus),
        experience_level: Some(ExperienceLevel::VeryExperienced),
        weekly_hours: Some(HoursBracket::TwentyPlus),
        region: Some(Region::Europe),
        planner_executor: Some(5),
        deadline_strictness: Some(5),
        motivations: vec![MotivationTag::Win],
        ..Default::default()
    };

    let score = compute_pair_score(&a, &b, &weights, &thresholds);
    assert!((0.0..=100.0).contains(&score));
    assert!(score < 50.0, "hostile pairing unexpectedly scored {}", score);
}

#[test]
fn test_same_skill_pillar_never_beats_cross_category() {
    let same = skills_score(
        &full_answers(SkillCategory::Design),
        &full_answers(SkillCategory::Design),
    );

    let categories = [
        SkillCategory::Technical,
        SkillCategory::Business,
        SkillCategory::Design,
        SkillCategory::Marketing,
        SkillCategory::Finance,
        SkillCategory::Other,
    ];
    for c1 in categories {
        for c2 in categories {
            if c1 != c2 {
                assert!(skills_score(&full_answers(c1), &full_answers(c2)) > same);
            }
        }
    }
}

#[test]
fn test_availability_threshold_is_configurable() {
    let a = Answers {
        weekly_hours: Some(HoursBracket::FiveToTen),
        ..Default::default()
    };
    let b = Answers {
        weekly_hours: Some(HoursBracket::TenToTwenty),
        ..Default::default()
    };

    // 7.5h gap: under the default 10h threshold there is no step penalty
    assert_eq!(availability_score(&a, &b, 10.0), 70.0);
    // With a 5h threshold the same gap takes the 30-point step
    assert_eq!(availability_score(&a, &b, 5.0), 40.0);
}

#[test]
fn test_custom_weights_shift_the_score() {
    let thresholds = MatchThresholds::default();

    // Same-skill pair with otherwise identical answers: the skill pillar is
    // the only imperfect one, so shrinking its weight raises the total
    let a = full_answers(SkillCategory::Marketing);
    let b = full_answers(SkillCategory::Marketing);

    let default_score = compute_pair_score(&a, &b, &PillarWeights::default(), &thresholds);
    let skill_light = PillarWeights {
        skills: 0.05,
        availability: 0.25,
        work_style: 0.20,
        motivation: 0.15,
        experience: 0.35,
    };
    let shifted = compute_pair_score(&a, &b, &skill_light, &thresholds);

    assert!(shifted > default_score);
}

#[test]
fn test_explanation_is_deterministic() {
    let a = full_answers(SkillCategory::Technical);
    let b = full_answers(SkillCategory::Business);

    assert_eq!(build_pair_explanation(&a, &b), build_pair_explanation(&a, &b));
}

#[test]
fn test_matcher_pair_score_uses_configured_thresholds() {
    let a = Answers {
        weekly_hours: Some(HoursBracket::FiveToTen),
        ..Default::default()
    };
    let b = Answers {
        weekly_hours: Some(HoursBracket::TenToTwenty),
        ..Default::default()
    };

    let default_matcher = Matcher::with_defaults();
    let strict_matcher = Matcher::new(
        PillarWeights::default(),
        MatchThresholds {
            availability_gap_hours: 5.0,
            ..Default::default()
        },
    );

    assert!(strict_matcher.pair_score(&a, &b) < default_matcher.pair_score(&a, &b));
}
