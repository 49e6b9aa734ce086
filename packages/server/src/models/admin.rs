use serde::{Deserialize, Serialize};

use crate::entity::platform_config;
use crate::error::AppError;

/// A single platform configuration entry.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ConfigEntryResponse {
    #[schema(example = "creation_fee")]
    pub key: String,
    #[schema(example = "500")]
    pub value: String,
    pub description: String,
}

impl From<platform_config::Model> for ConfigEntryResponse {
    fn from(m: platform_config::Model) -> Self {
        Self {
            key: m.key,
            value: m.value,
            description: m.description,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ConfigListResponse {
    pub data: Vec<ConfigEntryResponse>,
}

/// Request body for setting a configuration value.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpsertConfigRequest {
    #[schema(example = "500")]
    pub value: String,
    pub description: Option<String>,
}

pub fn validate_config_key(key: &str) -> Result<(), AppError> {
    if key.is_empty()
        || key.len() > 64
        || !key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(AppError::Validation(
            "Config keys must be 1-64 lowercase snake_case characters".into(),
        ));
    }
    Ok(())
}

/// Value checks for well-known keys. The creation fee must parse as an
/// unsigned integer; storing garbage there would break hackathon creation.
pub fn validate_config_value(key: &str, value: &str) -> Result<(), AppError> {
    if key == common::platform_config::CREATION_FEE_KEY
        && common::platform_config::parse_fee(value).is_err()
    {
        return Err(AppError::Validation(
            "creation_fee must be a non-negative integer".into(),
        ));
    }
    if value.len() > 4096 {
        return Err(AppError::Validation(
            "Config values must be at most 4096 characters".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_format() {
        assert!(validate_config_key("creation_fee").is_ok());
        assert!(validate_config_key("max_tracks_2").is_ok());
        assert!(validate_config_key("").is_err());
        assert!(validate_config_key("Creation-Fee").is_err());
    }

    #[test]
    fn creation_fee_value_must_parse() {
        assert!(validate_config_value("creation_fee", "0").is_ok());
        assert!(validate_config_value("creation_fee", "500").is_ok());
        assert!(validate_config_value("creation_fee", "lots").is_err());
        assert!(validate_config_value("creation_fee", "-1").is_err());
        assert!(validate_config_value("other_key", "lots").is_ok());
    }
}
