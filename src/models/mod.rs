// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AmbiguityTolerance, Answers, CommunicationPreference, ExperienceLevel, Group, GroupMember,
    HoursBracket, MatchExplanation, MatchRecord, MatchThresholds, MatchType, MotivationTag,
    PairMatch, PillarWeights, ProjectCountBracket, QuestionnaireResponse, Region, SkillCategory,
    StructurePreference, TrioMatch,
};
pub use requests::{PreviewMatchingRequest, PreviewParticipant, RunMatchingRequest};
pub use responses::{ErrorResponse, HealthResponse, RunMatchingResponse};
