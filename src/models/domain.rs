use serde::{Deserialize, Serialize};

/// Primary skill category (questionnaire q1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Business,
    Design,
    Marketing,
    Finance,
    Other,
}

impl SkillCategory {
    /// Display name used in match explanations
    pub fn display_name(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical",
            SkillCategory::Business => "Business",
            SkillCategory::Design => "Design",
            SkillCategory::Marketing => "Marketing",
            SkillCategory::Finance => "Finance",
            SkillCategory::Other => "Other",
        }
    }
}

/// Completed end-to-end project count bracket (q8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectCountBracket {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "6+")]
    SixPlus,
}

impl ProjectCountBracket {
    pub fn index(&self) -> u8 {
        match self {
            ProjectCountBracket::Zero => 0,
            ProjectCountBracket::OneToTwo => 1,
            ProjectCountBracket::ThreeToFive => 2,
            ProjectCountBracket::SixPlus => 3,
        }
    }
}

/// Overall experience level bracket (q11)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "starting")]
    Starting,
    #[serde(rename = "some")]
    SomeExperience,
    #[serde(rename = "fairly")]
    FairlyExperienced,
    #[serde(rename = "very")]
    VeryExperienced,
}

impl ExperienceLevel {
    pub fn index(&self) -> u8 {
        match self {
            ExperienceLevel::Starting => 0,
            ExperienceLevel::SomeExperience => 1,
            ExperienceLevel::FairlyExperienced => 2,
            ExperienceLevel::VeryExperienced => 3,
        }
    }
}

/// Weekly hours commitment bracket (q13)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoursBracket {
    #[serde(rename = "lt5")]
    Under5,
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "10-20")]
    TenToTwenty,
    #[serde(rename = "20+")]
    TwentyPlus,
}

impl HoursBracket {
    /// Representative hours-per-week for the bracket
    pub fn representative_hours(&self) -> f64 {
        match self {
            HoursBracket::Under5 => 2.5,
            HoursBracket::FiveToTen => 7.5,
            HoursBracket::TenToTwenty => 15.0,
            HoursBracket::TwentyPlus => 25.0,
        }
    }

    /// Wire code, also used in explanation text
    pub fn code(&self) -> &'static str {
        match self {
            HoursBracket::Under5 => "lt5",
            HoursBracket::FiveToTen => "5-10",
            HoursBracket::TenToTwenty => "10-20",
            HoursBracket::TwentyPlus => "20+",
        }
    }
}

/// Primary time zone / working region (q17)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    NaEast,
    NaWest,
    Europe,
    SouthAsia,
    EastAsia,
    Other,
}

/// Preferred degree of structure in how work is organized (q18)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructurePreference {
    HighlyStructured,
    MostlyStructured,
    MostlyFlexible,
    Spontaneous,
}

/// Preferred communication mode (q21)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationPreference {
    Async,
    Mix,
    Live,
}

impl CommunicationPreference {
    /// Phrase used in the shared-trait explanation
    pub fn phrase(&self) -> &'static str {
        match self {
            CommunicationPreference::Async => "async communication",
            CommunicationPreference::Live => "live calls",
            CommunicationPreference::Mix => "mix of async and calls",
        }
    }
}

/// Comfort with project ambiguity (q23)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmbiguityTolerance {
    #[serde(rename = "clear")]
    NeedsClarity,
    #[serde(rename = "some")]
    HandlesSome,
    #[serde(rename = "thrive")]
    Thrives,
}

/// Motivation for joining the program (q24, multi-select)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotivationTag {
    Build,
    Learn,
    Meet,
    Win,
    Resume,
    Explore,
}

/// One participant's questionnaire answers.
///
/// Only the subset of questions that feeds scoring is modeled; wire names are
/// the questionnaire ids used by the stored documents. Every field is optional
/// and deserialization is lenient: an unrecognized or malformed stored value
/// degrades to "not answered" instead of failing the run, since skipped
/// questions are expected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Answers {
    #[serde(rename = "q1", default, deserialize_with = "de::lenient")]
    pub primary_skill: Option<SkillCategory>,
    #[serde(rename = "q8", default, deserialize_with = "de::lenient")]
    pub project_count: Option<ProjectCountBracket>,
    #[serde(rename = "q11", default, deserialize_with = "de::lenient")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(rename = "q13", default, deserialize_with = "de::lenient")]
    pub weekly_hours: Option<HoursBracket>,
    #[serde(rename = "q17", default, deserialize_with = "de::lenient")]
    pub region: Option<Region>,
    #[serde(rename = "q18", default, deserialize_with = "de::lenient")]
    pub structure_preference: Option<StructurePreference>,
    #[serde(rename = "q19", default, deserialize_with = "de::lenient")]
    pub planner_executor: Option<u8>,
    #[serde(rename = "q21", default, deserialize_with = "de::lenient")]
    pub communication_preference: Option<CommunicationPreference>,
    #[serde(rename = "q22", default, deserialize_with = "de::lenient")]
    pub deadline_strictness: Option<u8>,
    #[serde(rename = "q23", default, deserialize_with = "de::lenient")]
    pub ambiguity_tolerance: Option<AmbiguityTolerance>,
    #[serde(rename = "q24", default, deserialize_with = "de::one_or_many")]
    pub motivations: Vec<MotivationTag>,
}

mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Deserialize to `Some(T)` when the stored value parses, `None` otherwise
    pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: serde::de::DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok())
    }

    /// Accept either a list of tags or a bare single tag, dropping any
    /// unrecognized entries
    pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: serde::de::DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            other => serde_json::from_value(other).ok().into_iter().collect(),
        })
    }
}

/// Human-readable reasons backing a match. Purely descriptive — never feeds
/// back into scoring. Fields whose condition does not hold are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchExplanation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complementary_strength: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_trait: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_insight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trio_balance: Option<String>,
}

/// An accepted pair assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairMatch {
    #[serde(rename = "userIds")]
    pub user_ids: [String; 2],
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: f64,
    pub explanation: MatchExplanation,
}

/// An accepted trio assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrioMatch {
    #[serde(rename = "userIds")]
    pub user_ids: [String; 3],
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: f64,
    pub explanation: MatchExplanation,
}

/// Pillar weights for the pair score. Must sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct PillarWeights {
    pub skills: f64,
    pub availability: f64,
    pub work_style: f64,
    pub motivation: f64,
    pub experience: f64,
}

impl Default for PillarWeights {
    fn default() -> Self {
        Self {
            skills: 0.35,
            availability: 0.25,
            work_style: 0.20,
            motivation: 0.15,
            experience: 0.05,
        }
    }
}

/// Tunable thresholds for trio gating and the availability penalty
#[derive(Debug, Clone, Copy)]
pub struct MatchThresholds {
    /// Minimum average pairwise score for a trio to form
    pub trio_min_score: f64,
    /// Pairwise score at least 2 of a trio's 3 internal pairs must exceed
    pub trio_strong_pair_score: f64,
    /// Hours-per-week gap above which the step penalty kicks in
    pub availability_gap_hours: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            trio_min_score: 70.0,
            trio_strong_pair_score: 65.0,
            availability_gap_hours: 10.0,
        }
    }
}

/// A cohort group document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_true() -> bool { true }

/// A participant belonging to a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: String,
    pub name: String,
    pub group_id: String,
    #[serde(default)]
    pub is_matched: bool,
}

/// A stored questionnaire response for one participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub id: String,
    pub user_id: String,
    pub group_id: String,
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub is_locked: bool,
}

impl QuestionnaireResponse {
    /// A response only counts toward matching once submitted
    pub fn submitted(&self) -> bool {
        self.submitted_at.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Pair,
    Trio,
}

/// A match document as persisted to the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub group_id: String,
    pub user_ids: Vec<String>,
    pub match_type: MatchType,
    pub compatibility_score: f64,
    pub match_explanation: MatchExplanation,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_deserialize_full() {
        let json = serde_json::json!({
            "q1": "technical",
            "q8": "3-5",
            "q11": "fairly",
            "q13": "10-20",
            "q17": "na_east",
            "q18": "mostly_structured",
            "q19": 3,
            "q21": "async",
            "q22": 4,
            "q23": "some",
            "q24": ["build", "learn"],
        });

        let answers: Answers = serde_json::from_value(json).unwrap();
        assert_eq!(answers.primary_skill, Some(SkillCategory::Technical));
        assert_eq!(answers.weekly_hours, Some(HoursBracket::TenToTwenty));
        assert_eq!(answers.planner_executor, Some(3));
        assert_eq!(answers.motivations, vec![MotivationTag::Build, MotivationTag::Learn]);
    }

    #[test]
    fn test_answers_ignore_unscored_questions() {
        // Questions outside the scoring subset are simply dropped
        let json = serde_json::json!({
            "q1": "design",
            "q2": ["frontend", "uiux"],
            "q3": "builder",
            "q25": "learning",
        });

        let answers: Answers = serde_json::from_value(json).unwrap();
        assert_eq!(answers.primary_skill, Some(SkillCategory::Design));
        assert!(answers.motivations.is_empty());
    }

    #[test]
    fn test_answers_lenient_on_malformed_values() {
        let json = serde_json::json!({
            "q1": "cooking",
            "q13": 12,
            "q19": "three",
            "q24": "build",
        });

        let answers: Answers = serde_json::from_value(json).unwrap();
        assert_eq!(answers.primary_skill, None);
        assert_eq!(answers.weekly_hours, None);
        assert_eq!(answers.planner_executor, None);
        // Single value accepted as a one-element selection
        assert_eq!(answers.motivations, vec![MotivationTag::Build]);
    }

    #[test]
    fn test_answers_empty_object() {
        let answers: Answers = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(answers.primary_skill.is_none());
        assert!(answers.motivations.is_empty());
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = PillarWeights::default();
        let sum = w.skills + w.availability + w.work_style + w.motivation + w.experience;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_explanation_omits_empty_fields() {
        let explanation = MatchExplanation {
            complementary_strength: Some("Technical + Business".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&explanation).unwrap();
        assert!(json.get("shared_trait").is_none());
        assert_eq!(json["complementary_strength"], "Technical + Business");
    }
}
