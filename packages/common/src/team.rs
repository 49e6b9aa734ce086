//! Team composition validation for registration.
//!
//! Violations are collected field by field and returned together, so the
//! registration form can surface every problem at once.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the user is registering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum RegistrationKind {
    Individual,
    Team,
}

impl RegistrationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Team => "Team",
        }
    }
}

impl fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Individual" => Ok(Self::Individual),
            "Team" => Ok(Self::Team),
            other => Err(format!("Invalid registration kind '{other}'")),
        }
    }
}

/// Role of a member within a team. The registering user is always the leader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum MemberRole {
    Leader,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leader => "Leader",
            Self::Member => "Member",
        }
    }
}

/// Team-size rules taken from the hackathon.
#[derive(Clone, Copy, Debug)]
pub struct TeamRules {
    pub min_team_size: u32,
    pub max_team_size: u32,
    pub allow_individual: bool,
}

/// A proposed member (or the registrant themselves).
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
}

/// Raw registration input, as the form supplies it.
#[derive(Clone, Debug)]
pub struct RegistrationInput {
    pub kind: RegistrationKind,
    pub team_name: Option<String>,
    /// Additional members; the registrant is not listed here.
    pub members: Vec<MemberDraft>,
    /// Chosen track name, when the hackathon defines tracks.
    pub track: Option<String>,
}

/// A single field-level problem with the registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldViolation {
    /// Field path, e.g. `team_name` or `members[2].email`.
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A validated member carrying its assigned role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedMember {
    pub name: String,
    pub email: String,
    pub role: MemberRole,
}

/// The validated team + registration draft, ready to persist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub kind: RegistrationKind,
    pub team_name: Option<String>,
    /// Leader first, then members in input order.
    pub members: Vec<ValidatedMember>,
    pub track: Option<String>,
}

/// Minimal syntactic email check: `local@domain` with a dot in the domain.
/// Deliverability is the mail collaborator's problem. Also used for the
/// hackathon contact email, so every email field gets the same rule.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn check_member(prefix: &str, member: &MemberDraft, violations: &mut Vec<FieldViolation>) {
    if member.name.trim().is_empty() {
        violations.push(FieldViolation::new(
            format!("{prefix}.name"),
            "Name must not be blank",
        ));
    }
    if !is_valid_email(member.email.trim()) {
        violations.push(FieldViolation::new(
            format!("{prefix}.email"),
            "A valid email address is required",
        ));
    }
}

/// Validate a registration against the hackathon's team rules and tracks.
///
/// `registrant` is the user performing the registration; they become the
/// team leader and count towards the team size. `tracks` is the hackathon's
/// defined track names; when empty, track selection is a no-op.
pub fn validate(
    rules: &TeamRules,
    tracks: &[String],
    registrant: &MemberDraft,
    input: &RegistrationInput,
) -> Result<RegistrationDraft, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    check_member("registrant", registrant, &mut violations);

    match input.kind {
        RegistrationKind::Individual => {
            if !rules.allow_individual {
                violations.push(FieldViolation::new(
                    "kind",
                    "This hackathon does not allow individual registration",
                ));
            }
            if !input.members.is_empty() {
                violations.push(FieldViolation::new(
                    "members",
                    "Individual registration cannot list additional members",
                ));
            }
        }
        RegistrationKind::Team => {
            match &input.team_name {
                Some(name) if !name.trim().is_empty() => {}
                _ => violations.push(FieldViolation::new("team_name", "Team name is required")),
            }

            let total = input.members.len() + 1; // leader included
            if (total as u32) < rules.min_team_size {
                violations.push(FieldViolation::new(
                    "members",
                    format!(
                        "Team must have at least {} members including the leader",
                        rules.min_team_size
                    ),
                ));
            }
            if (total as u32) > rules.max_team_size {
                violations.push(FieldViolation::new(
                    "members",
                    format!(
                        "Team must have at most {} members including the leader",
                        rules.max_team_size
                    ),
                ));
            }

            for (i, member) in input.members.iter().enumerate() {
                check_member(&format!("members[{i}]"), member, &mut violations);
            }
        }
    }

    // Duplicate emails, registrant included, case-insensitive.
    let mut seen = HashSet::new();
    seen.insert(registrant.email.trim().to_lowercase());
    for (i, member) in input.members.iter().enumerate() {
        if !seen.insert(member.email.trim().to_lowercase()) {
            violations.push(FieldViolation::new(
                format!("members[{i}].email"),
                "Duplicate email within the team",
            ));
        }
    }

    let track = if tracks.is_empty() {
        None
    } else {
        match &input.track {
            Some(chosen) if tracks.iter().any(|t| t == chosen) => Some(chosen.clone()),
            Some(chosen) => {
                violations.push(FieldViolation::new(
                    "track",
                    format!("'{chosen}' is not a track of this hackathon"),
                ));
                None
            }
            None => {
                violations.push(FieldViolation::new("track", "A track must be selected"));
                None
            }
        }
    };

    if !violations.is_empty() {
        return Err(violations);
    }

    let mut members = Vec::with_capacity(input.members.len() + 1);
    members.push(ValidatedMember {
        name: registrant.name.trim().to_string(),
        email: registrant.email.trim().to_string(),
        role: MemberRole::Leader,
    });
    for member in &input.members {
        members.push(ValidatedMember {
            name: member.name.trim().to_string(),
            email: member.email.trim().to_string(),
            role: MemberRole::Member,
        });
    }

    Ok(RegistrationDraft {
        kind: input.kind,
        team_name: input
            .team_name
            .as_ref()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        members,
        track,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(min: u32, max: u32, allow_individual: bool) -> TeamRules {
        TeamRules {
            min_team_size: min,
            max_team_size: max,
            allow_individual,
        }
    }

    fn registrant() -> MemberDraft {
        MemberDraft {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        }
    }

    fn member(n: usize) -> MemberDraft {
        MemberDraft {
            name: format!("Member {n}"),
            email: format!("member{n}@example.com"),
        }
    }

    fn team_input(members: usize) -> RegistrationInput {
        RegistrationInput {
            kind: RegistrationKind::Team,
            team_name: Some("Rustaceans".into()),
            members: (1..=members).map(member).collect(),
            track: None,
        }
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn leader_plus_one_meets_minimum_of_two() {
        let draft = validate(&rules(2, 5, false), &[], &registrant(), &team_input(1)).unwrap();
        assert_eq!(draft.members.len(), 2);
        assert_eq!(draft.members[0].role, MemberRole::Leader);
        assert_eq!(draft.members[0].email, "ada@example.com");
        assert_eq!(draft.members[1].role, MemberRole::Member);
    }

    #[test]
    fn leader_alone_is_below_minimum_of_two() {
        let violations =
            validate(&rules(2, 5, false), &[], &registrant(), &team_input(0)).unwrap_err();
        assert!(fields(&violations).contains(&"members"));
    }

    #[test]
    fn team_of_max_size_is_accepted() {
        assert!(validate(&rules(2, 5, false), &[], &registrant(), &team_input(4)).is_ok());
    }

    #[test]
    fn team_above_max_size_is_rejected() {
        let violations =
            validate(&rules(2, 5, false), &[], &registrant(), &team_input(5)).unwrap_err();
        assert!(fields(&violations).contains(&"members"));
    }

    #[test]
    fn duplicate_member_emails_are_rejected() {
        let mut input = team_input(2);
        input.members[1].email = "MEMBER1@example.com".into(); // case-insensitive dup
        let violations = validate(&rules(2, 5, false), &[], &registrant(), &input).unwrap_err();
        assert!(fields(&violations).contains(&"members[1].email"));
    }

    #[test]
    fn member_email_matching_registrant_is_rejected() {
        let mut input = team_input(1);
        input.members[0].email = "ada@example.com".into();
        let violations = validate(&rules(2, 5, false), &[], &registrant(), &input).unwrap_err();
        assert!(fields(&violations).contains(&"members[0].email"));
    }

    #[test]
    fn blank_team_name_is_rejected() {
        let mut input = team_input(1);
        input.team_name = Some("   ".into());
        let violations = validate(&rules(2, 5, false), &[], &registrant(), &input).unwrap_err();
        assert!(fields(&violations).contains(&"team_name"));
    }

    #[test]
    fn individual_requires_allow_individual() {
        let input = RegistrationInput {
            kind: RegistrationKind::Individual,
            team_name: None,
            members: vec![],
            track: None,
        };
        assert!(validate(&rules(1, 5, true), &[], &registrant(), &input).is_ok());
        let violations = validate(&rules(1, 5, false), &[], &registrant(), &input).unwrap_err();
        assert!(fields(&violations).contains(&"kind"));
    }

    #[test]
    fn individual_registration_becomes_single_member_team() {
        let input = RegistrationInput {
            kind: RegistrationKind::Individual,
            team_name: None,
            members: vec![],
            track: None,
        };
        let draft = validate(&rules(1, 5, true), &[], &registrant(), &input).unwrap();
        assert_eq!(draft.members.len(), 1);
        assert_eq!(draft.members[0].role, MemberRole::Leader);
    }

    #[test]
    fn individual_with_extra_members_is_rejected() {
        let input = RegistrationInput {
            kind: RegistrationKind::Individual,
            team_name: None,
            members: vec![member(1)],
            track: None,
        };
        let violations = validate(&rules(1, 5, true), &[], &registrant(), &input).unwrap_err();
        assert!(fields(&violations).contains(&"members"));
    }

    #[test]
    fn track_must_be_chosen_from_defined_set() {
        let tracks = vec!["AI".to_string(), "Web3".to_string()];

        let mut input = team_input(1);
        input.track = Some("AI".into());
        let draft = validate(&rules(2, 5, false), &tracks, &registrant(), &input).unwrap();
        assert_eq!(draft.track.as_deref(), Some("AI"));

        input.track = Some("Gaming".into());
        let violations =
            validate(&rules(2, 5, false), &tracks, &registrant(), &input).unwrap_err();
        assert!(fields(&violations).contains(&"track"));

        input.track = None;
        let violations =
            validate(&rules(2, 5, false), &tracks, &registrant(), &input).unwrap_err();
        assert!(fields(&violations).contains(&"track"));
    }

    #[test]
    fn track_is_noop_without_defined_tracks() {
        let mut input = team_input(1);
        input.track = Some("anything".into());
        let draft = validate(&rules(2, 5, false), &[], &registrant(), &input).unwrap();
        assert_eq!(draft.track, None);
    }

    #[test]
    fn violations_accumulate_instead_of_short_circuiting() {
        let input = RegistrationInput {
            kind: RegistrationKind::Team,
            team_name: None,
            members: vec![MemberDraft {
                name: "".into(),
                email: "not-an-email".into(),
            }],
            track: None,
        };
        let violations = validate(
            &rules(3, 5, false),
            &["AI".to_string()],
            &registrant(),
            &input,
        )
        .unwrap_err();
        let fields = fields(&violations);
        assert!(fields.contains(&"team_name"));
        assert!(fields.contains(&"members")); // size
        assert!(fields.contains(&"members[0].name"));
        assert!(fields.contains(&"members[0].email"));
        assert!(fields.contains(&"track"));
    }

    #[test]
    fn email_syntax() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("plain"));
        assert!(!is_valid_email("@no-local.com"));
        assert!(!is_valid_email("no-domain@"));
        assert!(!is_valid_email("no-tld@host"));
        assert!(!is_valid_email("spa ce@host.com"));
    }
}
