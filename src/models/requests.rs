use crate::models::Answers;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to run matching for a group and persist the result
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RunMatchingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "group_id", rename = "groupId")]
    pub group_id: String,
}

/// One inline participant for a preview run
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PreviewParticipant {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub answers: Answers,
}

/// Request to run matching on inline answers without persisting anything
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PreviewMatchingRequest {
    #[validate(nested)]
    #[serde(default)]
    pub participants: Vec<PreviewParticipant>,
}
