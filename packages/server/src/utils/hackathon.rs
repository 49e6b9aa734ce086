use common::eligibility::{HackathonSnapshot, SubmissionSnapshot};
use common::lifecycle::ContentChecklist;
use common::team::TeamRules;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::{hackathon, registration, submission, track};
use crate::error::AppError;
use crate::extractors::auth::AuthUser;

/// Look up a hackathon by ID, returning 404 if not found.
pub async fn find_hackathon<C: sea_orm::ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<hackathon::Model, AppError> {
    hackathon::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Hackathon not found".into()))
}

/// Look up a hackathon with a row lock for status or content updates.
pub async fn find_hackathon_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<hackathon::Model, AppError> {
    use sea_orm::sea_query::LockType;
    use sea_orm::QuerySelect;
    hackathon::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Hackathon not found".into()))
}

/// Verify the caller can see the given hackathon.
///
/// Admins see everything; everyone sees visible statuses; organizers see
/// their own drafts. Returns 404 (not 403) otherwise to prevent enumeration.
pub fn check_hackathon_access(
    auth_user: &AuthUser,
    hackathon: &hackathon::Model,
) -> Result<(), AppError> {
    if auth_user.actor().is_admin() {
        return Ok(());
    }
    if hackathon.status.is_visible() {
        return Ok(());
    }
    if hackathon.organizer_id == auth_user.user_id {
        return Ok(());
    }
    Err(AppError::NotFound("Hackathon not found".into()))
}

/// The eligibility evaluator's view of a hackathon row.
pub fn snapshot(model: &hackathon::Model) -> HackathonSnapshot {
    HackathonSnapshot {
        organizer_id: model.organizer_id,
        status: model.status,
        registration_end: model.registration_end,
        start_date: model.start_date,
        submission_deadline: model.submission_deadline,
    }
}

/// The lifecycle engine's view of a hackathon's mandatory content.
pub fn content_checklist(model: &hackathon::Model, track_count: usize) -> ContentChecklist {
    fn present(value: &Option<String>) -> bool {
        value.as_deref().is_some_and(|v| !v.trim().is_empty())
    }

    ContentChecklist {
        has_banner: present(&model.banner_url),
        has_logo: present(&model.logo_url),
        has_rules: present(&model.rules),
        track_count,
    }
}

/// The team validator's view of a hackathon's size rules.
pub fn team_rules(model: &hackathon::Model) -> TeamRules {
    TeamRules {
        min_team_size: model.min_team_size.max(0) as u32,
        max_team_size: model.max_team_size.max(0) as u32,
        allow_individual: model.allow_individual,
    }
}

pub fn submission_snapshot(model: &submission::Model) -> SubmissionSnapshot {
    SubmissionSnapshot {
        is_draft: model.is_draft,
        submitted_at: model.submitted_at,
    }
}

/// The caller's registration for a hackathon, if any.
pub async fn find_registration<C: sea_orm::ConnectionTrait>(
    db: &C,
    hackathon_id: i32,
    user_id: i32,
) -> Result<Option<registration::Model>, AppError> {
    Ok(registration::Entity::find()
        .filter(registration::Column::HackathonId.eq(hackathon_id))
        .filter(registration::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

/// Track rows of a hackathon, in display order.
pub async fn load_tracks<C: sea_orm::ConnectionTrait>(
    db: &C,
    hackathon_id: i32,
) -> Result<Vec<track::Model>, AppError> {
    Ok(track::Entity::find()
        .filter(track::Column::HackathonId.eq(hackathon_id))
        .order_by_asc(track::Column::Position)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use common::HackathonStatus;

    fn model() -> hackathon::Model {
        let t = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        hackathon::Model {
            id: 1,
            title: "Test".into(),
            category: "General".into(),
            description: "".into(),
            status: HackathonStatus::Draft,
            organizer_id: 7,
            registration_start: t,
            registration_end: t,
            start_date: t,
            end_date: t,
            submission_deadline: t,
            min_team_size: 2,
            max_team_size: 5,
            allow_individual: false,
            banner_url: Some("https://cdn/banner.png".into()),
            logo_url: Some("  ".into()),
            rules: None,
            dataset_url: None,
            contact_email: None,
            payment_id: None,
            provider_payment_id: None,
            created_at: t,
            updated_at: t,
        }
    }

    #[test]
    fn checklist_treats_blank_urls_as_missing() {
        let checklist = content_checklist(&model(), 1);
        assert!(checklist.has_banner);
        assert!(!checklist.has_logo);
        assert!(!checklist.has_rules);
        assert_eq!(checklist.missing(), vec!["logo", "rules"]);
    }

    #[test]
    fn team_rules_map_from_row() {
        let rules = team_rules(&model());
        assert_eq!(rules.min_team_size, 2);
        assert_eq!(rules.max_team_size, 5);
        assert!(!rules.allow_individual);
    }
}
