use chrono::{DateTime, Utc};
use common::HackathonStatus;
use common::creation::{HackathonDraft, PaymentReceipt};
use common::eligibility::ParticipantAction;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::shared::{Pagination, validate_optional_url, validate_title};
use crate::error::AppError;

/// Request body for hackathon creation (both the request and confirm steps).
#[derive(Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateHackathonRequest {
    pub title: String,
    pub category: String,
    pub description: String,
    pub registration_start: DateTime<Utc>,
    pub registration_end: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub submission_deadline: DateTime<Utc>,
    pub min_team_size: u32,
    pub max_team_size: u32,
    #[serde(default)]
    pub allow_individual: bool,
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
    pub rules: Option<String>,
    pub dataset_url: Option<String>,
    pub contact_email: Option<String>,
    pub tracks: Vec<String>,
}

impl CreateHackathonRequest {
    /// The creation gate's view of this request.
    pub fn to_draft(&self) -> HackathonDraft {
        HackathonDraft {
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            registration_start: Some(self.registration_start),
            registration_end: Some(self.registration_end),
            start_date: Some(self.start_date),
            end_date: Some(self.end_date),
            submission_deadline: Some(self.submission_deadline),
            min_team_size: self.min_team_size,
            max_team_size: self.max_team_size,
            allow_individual: self.allow_individual,
            banner_url: self.banner_url.clone(),
            logo_url: self.logo_url.clone(),
            rules: self.rules.clone(),
            dataset_url: self.dataset_url.clone(),
            contact_email: self.contact_email.clone(),
            tracks: self.tracks.iter().map(|t| t.trim().to_string()).collect(),
        }
    }
}

/// Second step of paid creation: the same draft plus the payment receipt.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ConfirmCreateHackathonRequest {
    pub hackathon: CreateHackathonRequest,
    pub receipt: PaymentReceipt,
}

/// Returned with status 402 when the configured creation fee gates creation.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PaymentRequiredResponse {
    /// Fee in the platform currency's smallest unit.
    #[schema(example = 500)]
    pub amount: u64,
    pub message: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateHackathonRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub registration_start: Option<DateTime<Utc>>,
    pub registration_end: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub submission_deadline: Option<DateTime<Utc>>,
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
    pub rules: Option<String>,
    pub dataset_url: Option<String>,
    pub contact_email: Option<String>,
}

/// Request body for a lifecycle transition.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct TransitionRequest {
    /// Target status, e.g. "Published" or "Completed".
    pub target: HackathonStatus,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct HackathonListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
pub struct TrackResponse {
    pub id: i32,
    pub name: String,
    pub position: i32,
}

impl From<crate::entity::track::Model> for TrackResponse {
    fn from(m: crate::entity::track::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            position: m.position,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HackathonResponse {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub description: String,
    pub status: HackathonStatus,
    pub organizer_id: i32,
    pub registration_start: DateTime<Utc>,
    pub registration_end: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub submission_deadline: DateTime<Utc>,
    pub min_team_size: i32,
    pub max_team_size: i32,
    pub allow_individual: bool,
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
    pub rules: Option<String>,
    pub dataset_url: Option<String>,
    pub contact_email: Option<String>,
    pub tracks: Vec<TrackResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HackathonResponse {
    pub fn from_model(
        m: crate::entity::hackathon::Model,
        tracks: Vec<crate::entity::track::Model>,
    ) -> Self {
        Self {
            id: m.id,
            title: m.title,
            category: m.category,
            description: m.description,
            status: m.status,
            organizer_id: m.organizer_id,
            registration_start: m.registration_start,
            registration_end: m.registration_end,
            start_date: m.start_date,
            end_date: m.end_date,
            submission_deadline: m.submission_deadline,
            min_team_size: m.min_team_size,
            max_team_size: m.max_team_size,
            allow_individual: m.allow_individual,
            banner_url: m.banner_url,
            logo_url: m.logo_url,
            rules: m.rules,
            dataset_url: m.dataset_url,
            contact_email: m.contact_email,
            tracks: tracks.into_iter().map(TrackResponse::from).collect(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct HackathonListItem {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub status: HackathonStatus,
    pub organizer_id: i32,
    pub registration_end: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HackathonListResponse {
    pub data: Vec<HackathonListItem>,
    pub pagination: Pagination,
}

/// The single action the participant surface should offer right now.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EligibilityResponse {
    #[schema(example = "SubmitProject")]
    pub action: ParticipantAction,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Syntax check for a supplied contact email. Absence is the creation
/// gate's concern (it lists missing fields), so `None` and blank pass here.
fn validate_contact_email(contact_email: &Option<String>) -> Result<(), AppError> {
    if let Some(email) = contact_email {
        let email = email.trim();
        if !email.is_empty() && !common::team::is_valid_email(email) {
            return Err(AppError::Validation(
                "contact_email must be a valid email address".into(),
            ));
        }
    }
    Ok(())
}

fn validate_dates(
    registration_start: DateTime<Utc>,
    registration_end: DateTime<Utc>,
    start_date: DateTime<Utc>,
    submission_deadline: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<(), AppError> {
    // The lifecycle engine relies on this ordering for its window checks.
    if !(registration_start <= registration_end
        && registration_end <= start_date
        && start_date <= submission_deadline
        && submission_deadline <= end_date)
    {
        return Err(AppError::Validation(
            "Dates must satisfy registration_start <= registration_end <= start_date \
             <= submission_deadline <= end_date"
                .into(),
        ));
    }
    Ok(())
}

pub fn validate_create_hackathon(req: &CreateHackathonRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    if req.category.trim().is_empty() || req.category.chars().count() > 64 {
        return Err(AppError::Validation(
            "Category must be 1-64 characters".into(),
        ));
    }
    if req.description.len() > 1_000_000 {
        return Err(AppError::Validation(
            "Description must be at most 1MB".into(),
        ));
    }
    validate_dates(
        req.registration_start,
        req.registration_end,
        req.start_date,
        req.submission_deadline,
        req.end_date,
    )?;
    if req.min_team_size < 1 {
        return Err(AppError::Validation("min_team_size must be >= 1".into()));
    }
    if req.max_team_size < req.min_team_size {
        return Err(AppError::Validation(
            "max_team_size must be >= min_team_size".into(),
        ));
    }
    if req.max_team_size > 1000 {
        return Err(AppError::Validation(
            "max_team_size must be at most 1000".into(),
        ));
    }
    let mut seen = HashSet::new();
    for track in &req.tracks {
        let name = track.trim();
        if name.is_empty() || name.chars().count() > 128 {
            return Err(AppError::Validation(
                "Track names must be 1-128 characters".into(),
            ));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(AppError::Validation(format!("Duplicate track '{name}'")));
        }
    }
    validate_optional_url("banner_url", &req.banner_url)?;
    validate_optional_url("logo_url", &req.logo_url)?;
    validate_optional_url("dataset_url", &req.dataset_url)?;
    validate_contact_email(&req.contact_email)?;
    Ok(())
}

pub fn validate_update_hackathon(req: &UpdateHackathonRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref category) = req.category
        && (category.trim().is_empty() || category.chars().count() > 64)
    {
        return Err(AppError::Validation(
            "Category must be 1-64 characters".into(),
        ));
    }
    if let Some(ref description) = req.description
        && description.len() > 1_000_000
    {
        return Err(AppError::Validation(
            "Description must be at most 1MB".into(),
        ));
    }
    validate_optional_url("banner_url", &req.banner_url)?;
    validate_optional_url("logo_url", &req.logo_url)?;
    validate_optional_url("dataset_url", &req.dataset_url)?;
    validate_contact_email(&req.contact_email)?;
    Ok(())
}

/// Cross-field date validation for PATCH, against the effective values.
pub fn validate_effective_dates(
    req: &UpdateHackathonRequest,
    existing: &crate::entity::hackathon::Model,
) -> Result<(), AppError> {
    validate_dates(
        req.registration_start.unwrap_or(existing.registration_start),
        req.registration_end.unwrap_or(existing.registration_end),
        req.start_date.unwrap_or(existing.start_date),
        req.submission_deadline
            .unwrap_or(existing.submission_deadline),
        req.end_date.unwrap_or(existing.end_date),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn valid_request() -> CreateHackathonRequest {
        let t = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        CreateHackathonRequest {
            title: "Climate Data Challenge".into(),
            category: "Data Science".into(),
            description: "A challenge in **Markdown**.".into(),
            registration_start: t,
            registration_end: t + Duration::days(7),
            start_date: t + Duration::days(8),
            end_date: t + Duration::days(11),
            submission_deadline: t + Duration::days(10),
            min_team_size: 2,
            max_team_size: 5,
            allow_individual: false,
            banner_url: Some("https://cdn.example.com/banner.png".into()),
            logo_url: Some("https://cdn.example.com/logo.png".into()),
            rules: Some("Be excellent.".into()),
            dataset_url: Some("https://cdn.example.com/data.zip".into()),
            contact_email: Some("host@example.com".into()),
            tracks: vec!["Forecasting".into()],
        }
    }

    #[test]
    fn accepts_valid_request() {
        assert!(validate_create_hackathon(&valid_request()).is_ok());
    }

    #[test]
    fn rejects_misordered_dates() {
        let mut req = valid_request();
        req.submission_deadline = req.end_date + Duration::days(1);
        assert!(validate_create_hackathon(&req).is_err());

        let mut req = valid_request();
        req.registration_end = req.start_date + Duration::days(1);
        assert!(validate_create_hackathon(&req).is_err());
    }

    #[test]
    fn rejects_bad_team_bounds() {
        let mut req = valid_request();
        req.min_team_size = 0;
        assert!(validate_create_hackathon(&req).is_err());

        let mut req = valid_request();
        req.max_team_size = 1;
        assert!(validate_create_hackathon(&req).is_err());
    }

    #[test]
    fn rejects_malformed_contact_email() {
        let mut req = valid_request();
        req.contact_email = Some("not-an-email".into());
        assert!(validate_create_hackathon(&req).is_err());

        let update = UpdateHackathonRequest {
            contact_email: Some("host@nodot".into()),
            ..Default::default()
        };
        assert!(validate_update_hackathon(&update).is_err());
    }

    #[test]
    fn rejects_duplicate_tracks() {
        let mut req = valid_request();
        req.tracks = vec!["AI".into(), "ai ".into()];
        assert!(validate_create_hackathon(&req).is_err());
    }
}
