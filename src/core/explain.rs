use crate::models::{Answers, MatchExplanation};

/// Build the human-readable explanation for a pair.
///
/// Each field is emitted only when its underlying condition actually holds:
/// differing primary skills, a shared communication preference, or two
/// reported availability brackets. Nothing here affects the score.
pub fn build_pair_explanation(a: &Answers, b: &Answers) -> MatchExplanation {
    let complementary_strength = match (a.primary_skill, b.primary_skill) {
        (Some(s1), Some(s2)) if s1 != s2 => {
            Some(format!("{} + {}", s1.display_name(), s2.display_name()))
        }
        _ => None,
    };

    let shared_trait = match (a.communication_preference, b.communication_preference) {
        (Some(c1), Some(c2)) if c1 == c2 => Some(format!("Both prefer {}", c1.phrase())),
        _ => None,
    };

    let availability_insight = match (a.weekly_hours, b.weekly_hours) {
        (Some(h1), Some(h2)) if h1 == h2 => {
            Some(format!("Both in {} commitment range", h1.code()))
        }
        (Some(h1), Some(h2)) => {
            Some(format!("Both in {} / {} commitment range", h1.code(), h2.code()))
        }
        _ => None,
    };

    MatchExplanation {
        complementary_strength,
        shared_trait,
        availability_insight,
        trio_balance: None,
    }
}

/// Trio explanation: the leading pair's explanation plus a balance note for
/// the third member.
pub fn build_trio_explanation(a: &Answers, b: &Answers) -> MatchExplanation {
    let mut explanation = build_pair_explanation(a, b);
    explanation.trio_balance = Some("Third member adds skill diversity".to_string());
    explanation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommunicationPreference, HoursBracket, SkillCategory};

    #[test]
    fn test_complementary_strength_on_differing_skills() {
        let a = Answers {
            primary_skill: Some(SkillCategory::Technical),
            ..Default::default()
        };
        let b = Answers {
            primary_skill: Some(SkillCategory::Business),
            ..Default::default()
        };

        let explanation = build_pair_explanation(&a, &b);
        assert_eq!(
            explanation.complementary_strength.as_deref(),
            Some("Technical + Business")
        );
    }

    #[test]
    fn test_no_complementary_strength_when_same_or_missing() {
        let a = Answers {
            primary_skill: Some(SkillCategory::Design),
            ..Default::default()
        };

        assert!(build_pair_explanation(&a, &a.clone())
            .complementary_strength
            .is_none());
        assert!(build_pair_explanation(&a, &Answers::default())
            .complementary_strength
            .is_none());
    }

    #[test]
    fn test_shared_trait_names_communication_mode() {
        let a = Answers {
            communication_preference: Some(CommunicationPreference::Async),
            ..Default::default()
        };

        let explanation = build_pair_explanation(&a, &a.clone());
        assert_eq!(
            explanation.shared_trait.as_deref(),
            Some("Both prefer async communication")
        );

        // Both unanswered must not claim a shared trait
        let empty = build_pair_explanation(&Answers::default(), &Answers::default());
        assert!(empty.shared_trait.is_none());
    }

    #[test]
    fn test_availability_insight_variants() {
        let a = Answers {
            weekly_hours: Some(HoursBracket::FiveToTen),
            ..Default::default()
        };
        let b = Answers {
            weekly_hours: Some(HoursBracket::TwentyPlus),
            ..Default::default()
        };

        assert_eq!(
            build_pair_explanation(&a, &a.clone()).availability_insight.as_deref(),
            Some("Both in 5-10 commitment range")
        );
        assert_eq!(
            build_pair_explanation(&a, &b).availability_insight.as_deref(),
            Some("Both in 5-10 / 20+ commitment range")
        );
        assert!(build_pair_explanation(&a, &Answers::default())
            .availability_insight
            .is_none());
    }

    #[test]
    fn test_trio_explanation_adds_balance_note() {
        let explanation = build_trio_explanation(&Answers::default(), &Answers::default());
        assert_eq!(
            explanation.trio_balance.as_deref(),
            Some("Third member adds skill diversity")
        );
    }
}
