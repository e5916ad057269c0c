use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use validator::Validate;

use crate::core::Matcher;
use crate::models::{
    Answers, ErrorResponse, HealthResponse, MatchRecord, MatchType, PreviewMatchingRequest,
    RunMatchingRequest, RunMatchingResponse,
};
use crate::services::{StoreClient, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreClient>,
    pub matcher: Matcher,
    pub admin_secret: String,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/run", web::post().to(run_matching))
        .route("/matches/preview", web::post().to(preview_matching));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// True when the request carries the configured admin secret as a bearer token
fn authorized(req: &HttpRequest, admin_secret: &str) -> bool {
    if admin_secret.is_empty() {
        return false;
    }
    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
            token == admin_secret
        })
        .unwrap_or(false)
}

/// Run matching for a group and persist the result
///
/// POST /api/v1/matches/run
///
/// Requires `Authorization: Bearer <admin secret>`.
///
/// Request body:
/// ```json
/// { "groupId": "string" }
/// ```
///
/// Snapshots the group's submitted questionnaire responses, runs the matching
/// core, then replaces the group's match records: prior matches are deleted,
/// matched flags reset and re-set, and consumed responses locked.
async fn run_matching(
    state: web::Data<AppState>,
    req: web::Json<RunMatchingRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if !authorized(&http_req, &state.admin_secret) {
        return HttpResponse::Unauthorized().json(ErrorResponse {
            error: "Unauthorized".to_string(),
            message: "Valid admin bearer token required".to_string(),
            status_code: 401,
        });
    }

    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let group_id = &req.group_id;
    tracing::info!("Running matching for group: {}", group_id);

    if let Err(e) = state.store.get_group(group_id).await {
        return match e {
            StoreError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
                error: "Group not found".to_string(),
                message: e.to_string(),
                status_code: 404,
            }),
            _ => store_failure("Failed to fetch group", e),
        };
    }

    let members = match state.store.list_group_members(group_id).await {
        Ok(members) => members,
        Err(e) => return store_failure("Failed to fetch group members", e),
    };

    if members.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "No users in group".to_string(),
            message: format!("Group {} has no members", group_id),
            status_code: 400,
        });
    }

    let responses = match state.store.list_responses(group_id).await {
        Ok(responses) => responses,
        Err(e) => return store_failure("Failed to fetch questionnaire responses", e),
    };

    // Snapshot: only submitted responses count, and their answers are fixed
    // for the duration of the run
    let mut answers_by_user: HashMap<String, Answers> = HashMap::new();
    let mut response_ids: Vec<String> = Vec::new();
    for response in &responses {
        if !response.submitted() {
            continue;
        }
        response_ids.push(response.id.clone());
        answers_by_user.insert(response.user_id.clone(), response.answers.clone());
    }

    // Eligible participants keep member order, which fixes enumeration order
    // and therefore tie-breaking
    let eligible_ids: Vec<String> = members
        .iter()
        .map(|m| m.id.clone())
        .filter(|id| answers_by_user.contains_key(id))
        .collect();

    if eligible_ids.len() < 2 {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Not enough eligible participants".to_string(),
            message: "Need at least 2 participants with submitted questionnaires".to_string(),
            status_code: 400,
        });
    }

    tracing::debug!(
        "Group {}: {} members, {} eligible",
        group_id,
        members.len(),
        eligible_ids.len()
    );

    let result = match state.matcher.run_matching(&eligible_ids, &answers_by_user) {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Matching failed for group {}: {}", group_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Matching failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Persist with replace semantics: clear old state first, then write the
    // new matches
    if let Err(e) = state.store.delete_group_matches(group_id).await {
        return store_failure("Failed to delete previous matches", e);
    }
    for member in &members {
        if let Err(e) = state.store.set_matched(&member.id, false).await {
            return store_failure("Failed to reset matched flag", e);
        }
    }
    for response_id in &response_ids {
        if let Err(e) = state.store.lock_response(response_id).await {
            return store_failure("Failed to lock response", e);
        }
    }

    let created_at = chrono::Utc::now();
    let mut matched_ids: Vec<String> = Vec::new();

    for pair in &result.pair_matches {
        matched_ids.extend(pair.user_ids.iter().cloned());
        let record = MatchRecord {
            group_id: group_id.clone(),
            user_ids: pair.user_ids.to_vec(),
            match_type: MatchType::Pair,
            compatibility_score: pair.compatibility_score,
            match_explanation: pair.explanation.clone(),
            created_at,
        };
        if let Err(e) = state.store.insert_match(&record).await {
            return store_failure("Failed to insert match", e);
        }
    }
    for trio in &result.trio_matches {
        matched_ids.extend(trio.user_ids.iter().cloned());
        let record = MatchRecord {
            group_id: group_id.clone(),
            user_ids: trio.user_ids.to_vec(),
            match_type: MatchType::Trio,
            compatibility_score: trio.compatibility_score,
            match_explanation: trio.explanation.clone(),
            created_at,
        };
        if let Err(e) = state.store.insert_match(&record).await {
            return store_failure("Failed to insert match", e);
        }
    }
    for user_id in &matched_ids {
        if let Err(e) = state.store.set_matched(user_id, true).await {
            return store_failure("Failed to set matched flag", e);
        }
    }

    let response = RunMatchingResponse {
        matched: matched_ids.len(),
        unmatched: result.unmatched_user_ids.len(),
        trios: result.trio_matches.len(),
    };

    tracing::info!(
        "Group {}: {} matched ({} pairs, {} trios), {} unmatched",
        group_id,
        response.matched,
        result.pair_matches.len(),
        response.trios,
        response.unmatched
    );

    HttpResponse::Ok().json(response)
}

/// Run matching on inline answers without touching the store
///
/// POST /api/v1/matches/preview
///
/// Request body:
/// ```json
/// { "participants": [{ "userId": "string", "answers": { "q1": "technical" } }] }
/// ```
async fn preview_matching(
    state: web::Data<AppState>,
    req: web::Json<PreviewMatchingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_ids: Vec<String> = req.participants.iter().map(|p| p.user_id.clone()).collect();

    let unique: HashSet<&String> = user_ids.iter().collect();
    if unique.len() != user_ids.len() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Duplicate participant".to_string(),
            message: "Each userId may appear only once".to_string(),
            status_code: 400,
        });
    }

    let answers_by_user: HashMap<String, Answers> = req
        .participants
        .iter()
        .map(|p| (p.user_id.clone(), p.answers.clone()))
        .collect();

    match state.matcher.run_matching(&user_ids, &answers_by_user) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Matching failed".to_string(),
            message: e.to_string(),
            status_code: 500,
        }),
    }
}

fn store_failure(context: &str, e: StoreError) -> HttpResponse {
    tracing::error!("{}: {}", context, e);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: context.to_string(),
        message: e.to_string(),
        status_code: 500,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_authorized_requires_exact_token() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer sesame"))
            .to_http_request();

        assert!(authorized(&req, "sesame"));
        assert!(!authorized(&req, "other"));
        // An empty configured secret never authorizes
        assert!(!authorized(&req, ""));
    }

    #[test]
    fn test_authorized_accepts_bare_token() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "sesame"))
            .to_http_request();

        assert!(authorized(&req, "sesame"));
    }

    #[test]
    fn test_unauthorized_without_header() {
        let req = TestRequest::default().to_http_request();
        assert!(!authorized(&req, "sesame"));
    }
}
