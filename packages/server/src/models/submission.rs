use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_optional_url;
use crate::entity::submission;
use crate::error::AppError;

/// Request body for creating or updating a project submission.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SubmissionRequest {
    /// Repository URL of the project.
    #[schema(example = "https://github.com/team/project")]
    pub repo_url: String,
    /// Optional demo or video URL.
    pub demo_url: Option<String>,
    /// Project description.
    pub description: String,
    /// Save as draft (true) or submit immediately (false).
    #[serde(default)]
    pub is_draft: bool,
}

pub fn validate_submission_request(payload: &SubmissionRequest) -> Result<(), AppError> {
    let repo = payload.repo_url.trim();
    if repo.is_empty() || repo.len() > 2048 {
        return Err(AppError::Validation(
            "repo_url must be a non-blank reference of at most 2048 characters".into(),
        ));
    }
    validate_optional_url("demo_url", &payload.demo_url)?;
    if payload.description.len() > 1_000_000 {
        return Err(AppError::Validation(
            "Description must be at most 1MB".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionResponse {
    pub id: i32,
    pub registration_id: i32,
    pub repo_url: String,
    pub demo_url: Option<String>,
    pub description: String,
    /// Draft submissions are editable; finalized ones carry `submitted_at`.
    pub is_draft: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<submission::Model> for SubmissionResponse {
    fn from(m: submission::Model) -> Self {
        Self {
            id: m.id,
            registration_id: m.registration_id,
            repo_url: m.repo_url,
            demo_url: m.demo_url,
            description: m.description,
            is_draft: m.is_draft,
            submitted_at: m.submitted_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(repo: &str) -> SubmissionRequest {
        SubmissionRequest {
            repo_url: repo.into(),
            demo_url: None,
            description: "Our project".into(),
            is_draft: true,
        }
    }

    #[test]
    fn rejects_blank_repo_url() {
        assert!(validate_submission_request(&request("   ")).is_err());
        assert!(validate_submission_request(&request("https://github.com/t/p")).is_ok());
    }

    #[test]
    fn rejects_blank_demo_url() {
        let mut payload = request("https://github.com/t/p");
        payload.demo_url = Some("  ".into());
        assert!(validate_submission_request(&payload).is_err());
    }
}
