use common::platform_config::{CREATION_FEE_KEY, DEFAULT_CREATION_FEE};
use sea_orm::*;
use sea_query::{Index, PostgresQueryBuilder};
use tracing::info;

use crate::entity::{platform_config, registration, team_member};

/// Platform configuration rows seeded on startup when absent.
const DEFAULT_CONFIG: &[(&str, &str, &str)] = &[(
    CREATION_FEE_KEY,
    DEFAULT_CREATION_FEE,
    "Fee charged before a hackathon may be created. \"0\" disables the payment gate.",
)];

/// Seed the `platform_config` table with defaults, leaving existing values alone.
pub async fn seed_platform_config(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for &(key, value, description) in DEFAULT_CONFIG {
        let model = platform_config::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            description: Set(description.to_string()),
        };

        let result = platform_config::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(platform_config::Column::Key)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new platform config entries", inserted);
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite unique indexes, so we
/// create them manually on startup. These indexes are what serializes two
/// racing registration attempts down to one winner, so a failure here
/// aborts startup rather than running without the guarantee.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // At most one registration per (hackathon, user):
    // two concurrent requests can both pass the eligibility decision.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_registration_hackathon_user")
        .table(registration::Entity)
        .col(registration::Column::HackathonId)
        .col(registration::Column::UserId)
        .to_string(PostgresQueryBuilder);

    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_registration_hackathon_user exists");

    // Member emails unique within a team.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_team_member_registration_email")
        .table(team_member::Entity)
        .col(team_member::Column::RegistrationId)
        .col(team_member::Column::Email)
        .to_string(PostgresQueryBuilder);

    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_team_member_registration_email exists");

    Ok(())
}
