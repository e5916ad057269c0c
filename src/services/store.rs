use crate::models::{Group, GroupMember, MatchRecord, QuestionnaireResponse};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Collection IDs in the document store
#[derive(Debug, Clone)]
pub struct StoreCollections {
    pub groups: String,
    pub users: String,
    pub questionnaire_responses: String,
    pub matches: String,
}

/// Document-store API client
///
/// Handles all communication with the external record store:
/// - Fetching groups, group members, and questionnaire responses
/// - Replacing a group's match records after a run
/// - Updating matched flags and locking responses
///
/// The matching core never talks to the store; the route layer snapshots
/// inputs through this client, runs the core, then persists through it.
pub struct StoreClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: StoreCollections,
}

impl StoreClient {
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: StoreCollections,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
    }

    /// Probe store availability
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        let url = format!("{}/health", self.base_url.trim_end_matches('/'));
        let response = self.authed(self.client.get(&url)).send().await?;
        Ok(response.status().is_success())
    }

    /// Fetch a group by its document ID
    pub async fn get_group(&self, group_id: &str) -> Result<Group, StoreError> {
        let url = format!("{}/{}", self.collection_url(&self.collections.groups), group_id);

        tracing::debug!("Fetching group: {}", group_id);

        let response = self.authed(self.client.get(&url)).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(format!("Group {} not found", group_id)));
        }
        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to fetch group: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        parse_document(&json)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse group: {}", e)))
    }

    /// List all members of a group
    pub async fn list_group_members(&self, group_id: &str) -> Result<Vec<GroupMember>, StoreError> {
        let documents = self
            .query_collection(
                &self.collections.users,
                &[format!("equal(\"group_id\", \"{}\")", group_id)],
            )
            .await?;

        let members: Vec<GroupMember> = documents
            .iter()
            .filter_map(|doc| parse_document(doc).ok())
            .collect();

        tracing::debug!("Found {} members in group {}", members.len(), group_id);

        Ok(members)
    }

    /// List all questionnaire responses for a group (submitted or not)
    pub async fn list_responses(
        &self,
        group_id: &str,
    ) -> Result<Vec<QuestionnaireResponse>, StoreError> {
        let documents = self
            .query_collection(
                &self.collections.questionnaire_responses,
                &[format!("equal(\"group_id\", \"{}\")", group_id)],
            )
            .await?;

        let responses: Vec<QuestionnaireResponse> = documents
            .iter()
            .filter_map(|doc| parse_document(doc).ok())
            .collect();

        tracing::debug!("Found {} responses in group {}", responses.len(), group_id);

        Ok(responses)
    }

    /// Delete every persisted match record for a group (replace semantics:
    /// a run fully supersedes the previous one)
    pub async fn delete_group_matches(&self, group_id: &str) -> Result<usize, StoreError> {
        let documents = self
            .query_collection(
                &self.collections.matches,
                &[format!("equal(\"group_id\", \"{}\")", group_id)],
            )
            .await?;

        let mut deleted = 0;
        for doc in &documents {
            let doc_id = doc
                .get("$id")
                .and_then(|id| id.as_str())
                .ok_or_else(|| StoreError::InvalidResponse("Match document missing $id".into()))?;

            let url = format!("{}/{}", self.collection_url(&self.collections.matches), doc_id);
            let response = self.authed(self.client.delete(&url)).send().await?;

            if !response.status().is_success() {
                return Err(StoreError::ApiError(format!(
                    "Failed to delete match {}: {}",
                    doc_id,
                    response.status()
                )));
            }
            deleted += 1;
        }

        tracing::debug!("Deleted {} prior matches for group {}", deleted, group_id);

        Ok(deleted)
    }

    /// Persist one match record
    pub async fn insert_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        let url = self.collection_url(&self.collections.matches);

        let mut payload = serde_json::to_value(record)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to encode match: {}", e)))?;
        if let Some(obj) = payload.as_object_mut() {
            obj.insert("$id".to_string(), Value::String(uuid::Uuid::new_v4().to_string()));
        }

        let response = self.authed(self.client.post(&url)).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to insert match: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Update a participant's matched flag
    pub async fn set_matched(&self, user_id: &str, is_matched: bool) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.collection_url(&self.collections.users), user_id);
        let payload = serde_json::json!({ "is_matched": is_matched });

        let response = self.authed(self.client.patch(&url)).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to update matched flag for {}: {}",
                user_id,
                response.status()
            )));
        }

        Ok(())
    }

    /// Lock a questionnaire response so it cannot change after matching
    pub async fn lock_response(&self, response_id: &str) -> Result<(), StoreError> {
        let url = format!(
            "{}/{}",
            self.collection_url(&self.collections.questionnaire_responses),
            response_id
        );
        let payload = serde_json::json!({ "is_locked": true });

        let response = self.authed(self.client.patch(&url)).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to lock response {}: {}",
                response_id,
                response.status()
            )));
        }

        Ok(())
    }

    async fn query_collection(
        &self,
        collection: &str,
        queries: &[String],
    ) -> Result<Vec<Value>, StoreError> {
        let queries_json = serde_json::to_string(queries)
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        let encoded = urlencoding::encode(&queries_json);
        let url = format!("{}?query={}", self.collection_url(collection), encoded);

        let response = self.authed(self.client.get(&url)).send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(StoreError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to query {}: {}",
                collection,
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| StoreError::InvalidResponse("Missing documents array".into()))?;

        Ok(documents.clone())
    }
}

/// Parse a store document into a domain type, filling `id` from the
/// document's `$id` when the payload itself carries none
fn parse_document<T: serde::de::DeserializeOwned>(doc: &Value) -> Result<T, serde_json::Error> {
    let mut data = doc.get("data").unwrap_or(doc).clone();
    if let Some(obj) = data.as_object_mut() {
        if !obj.contains_key("id") {
            if let Some(doc_id) = doc.get("$id").cloned() {
                obj.insert("id".to_string(), doc_id);
            }
        }
    }
    serde_json::from_value(data)
}
