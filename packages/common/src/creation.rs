//! The paid-creation gate.
//!
//! A hackathon may only be persisted by an approved host, from a complete
//! draft, and — when the platform charges a creation fee — after the caller
//! has obtained a payment receipt from the payment collaborator. The gate
//! decides; it never touches storage or the payment provider itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::host_approval::{self, HostApprovalStatus};

/// Everything a hackathon needs before it can be persisted in `Draft`.
///
/// File references (banner, logo, dataset) are URLs produced by the storage
/// collaborator; this gate only requires that they exist.
#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct HackathonDraft {
    pub title: String,
    pub category: String,
    pub registration_start: Option<DateTime<Utc>>,
    pub registration_end: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub submission_deadline: Option<DateTime<Utc>>,
    pub min_team_size: u32,
    pub max_team_size: u32,
    pub allow_individual: bool,
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
    pub rules: Option<String>,
    pub dataset_url: Option<String>,
    pub contact_email: Option<String>,
    pub tracks: Vec<String>,
}

impl HackathonDraft {
    /// Names of the required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        fn blank(value: &Option<String>) -> bool {
            value.as_deref().is_none_or(|v| v.trim().is_empty())
        }

        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.tracks.iter().all(|t| t.trim().is_empty()) {
            missing.push("tracks");
        }
        if blank(&self.dataset_url) {
            missing.push("dataset_url");
        }
        if blank(&self.banner_url) {
            missing.push("banner_url");
        }
        if blank(&self.logo_url) {
            missing.push("logo_url");
        }
        if self.registration_start.is_none() {
            missing.push("registration_start");
        }
        if self.registration_end.is_none() {
            missing.push("registration_end");
        }
        if self.start_date.is_none() {
            missing.push("start_date");
        }
        if self.end_date.is_none() {
            missing.push("end_date");
        }
        if self.submission_deadline.is_none() {
            missing.push("submission_deadline");
        }
        if blank(&self.contact_email) {
            missing.push("contact_email");
        }
        missing
    }
}

/// Receipt handed back by the payment collaborator after a charge.
/// The gate trusts it beyond requiring non-blank identifiers.
#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PaymentReceipt {
    pub payment_id: String,
    pub provider_payment_id: String,
}

impl PaymentReceipt {
    pub fn is_complete(&self) -> bool {
        !self.payment_id.trim().is_empty() && !self.provider_payment_id.trim().is_empty()
    }
}

/// Outcome of `request_creation`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreationDecision {
    /// No fee configured; the hackathon may be created directly in `Draft`.
    Proceed,
    /// The fee must be paid first; re-invoke `confirm_creation` with a receipt.
    PaymentRequired { amount: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreationError {
    #[error("host account has not been approved")]
    HostNotApproved,
    #[error("hackathon draft is missing required fields: {}", missing.join(", "))]
    IncompleteDraft { missing: Vec<&'static str> },
    #[error("payment receipt is missing its identifiers")]
    InvalidReceipt,
}

fn check_preconditions(
    approval: HostApprovalStatus,
    draft: &HackathonDraft,
) -> Result<(), CreationError> {
    if !host_approval::can_create(approval) {
        return Err(CreationError::HostNotApproved);
    }
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(CreationError::IncompleteDraft { missing });
    }
    Ok(())
}

/// First step of creation: decide whether the draft may be persisted now or
/// whether the configured fee gates it behind a payment.
pub fn request_creation(
    approval: HostApprovalStatus,
    draft: &HackathonDraft,
    fee: u64,
) -> Result<CreationDecision, CreationError> {
    check_preconditions(approval, draft)?;
    if fee > 0 {
        return Ok(CreationDecision::PaymentRequired { amount: fee });
    }
    Ok(CreationDecision::Proceed)
}

/// Second step after payment: same preconditions plus a complete receipt.
/// Receipt validity beyond non-blank identifiers is the payment
/// collaborator's responsibility.
pub fn confirm_creation(
    approval: HostApprovalStatus,
    draft: &HackathonDraft,
    receipt: &PaymentReceipt,
) -> Result<(), CreationError> {
    check_preconditions(approval, draft)?;
    if !receipt.is_complete() {
        return Err(CreationError::InvalidReceipt);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn complete_draft() -> HackathonDraft {
        let t = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        HackathonDraft {
            title: "Climate Data Challenge".into(),
            category: "Data Science".into(),
            registration_start: Some(t),
            registration_end: Some(t + chrono::Duration::days(7)),
            start_date: Some(t + chrono::Duration::days(8)),
            end_date: Some(t + chrono::Duration::days(11)),
            submission_deadline: Some(t + chrono::Duration::days(10)),
            min_team_size: 2,
            max_team_size: 5,
            allow_individual: false,
            banner_url: Some("https://cdn.example.com/banner.png".into()),
            logo_url: Some("https://cdn.example.com/logo.png".into()),
            rules: Some("Be excellent to each other.".into()),
            dataset_url: Some("https://cdn.example.com/data.zip".into()),
            contact_email: Some("host@example.com".into()),
            tracks: vec!["Forecasting".into()],
        }
    }

    fn receipt() -> PaymentReceipt {
        PaymentReceipt {
            payment_id: "pay_123".into(),
            provider_payment_id: "prov_456".into(),
        }
    }

    #[test]
    fn zero_fee_never_requires_payment() {
        let decision =
            request_creation(HostApprovalStatus::Approved, &complete_draft(), 0).unwrap();
        assert_eq!(decision, CreationDecision::Proceed);
    }

    #[test]
    fn nonzero_fee_always_requires_payment() {
        let decision =
            request_creation(HostApprovalStatus::Approved, &complete_draft(), 500).unwrap();
        assert_eq!(decision, CreationDecision::PaymentRequired { amount: 500 });
    }

    #[test]
    fn unapproved_host_cannot_create() {
        for status in [HostApprovalStatus::Pending, HostApprovalStatus::Rejected] {
            assert_eq!(
                request_creation(status, &complete_draft(), 0),
                Err(CreationError::HostNotApproved)
            );
        }
    }

    #[test]
    fn incomplete_draft_reports_all_missing_fields() {
        let mut draft = complete_draft();
        draft.title = "  ".into();
        draft.tracks.clear();
        draft.banner_url = None;
        draft.contact_email = Some("".into());
        let err = request_creation(HostApprovalStatus::Approved, &draft, 0).unwrap_err();
        match err {
            CreationError::IncompleteDraft { missing } => {
                assert_eq!(missing, vec!["title", "tracks", "banner_url", "contact_email"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn confirm_requires_nonblank_receipt_identifiers() {
        assert!(confirm_creation(HostApprovalStatus::Approved, &complete_draft(), &receipt()).is_ok());

        let blank = PaymentReceipt {
            payment_id: " ".into(),
            provider_payment_id: "prov".into(),
        };
        assert_eq!(
            confirm_creation(HostApprovalStatus::Approved, &complete_draft(), &blank),
            Err(CreationError::InvalidReceipt)
        );
    }

    #[test]
    fn confirm_still_checks_approval_and_completeness() {
        assert_eq!(
            confirm_creation(HostApprovalStatus::Pending, &complete_draft(), &receipt()),
            Err(CreationError::HostNotApproved)
        );
        let mut draft = complete_draft();
        draft.logo_url = None;
        assert!(matches!(
            confirm_creation(HostApprovalStatus::Approved, &draft, &receipt()),
            Err(CreationError::IncompleteDraft { .. })
        ));
    }
}
