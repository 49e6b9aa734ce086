use serde::Serialize;

use crate::error::AppError;

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 20)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    pub total_pages: u64,
}

/// Escape LIKE wildcards in a user-supplied search term.
pub fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate an optional URL-ish reference (non-blank, at most 2048 chars).
pub fn validate_optional_url(field: &str, value: &Option<String>) -> Result<(), AppError> {
    if let Some(v) = value {
        let v = v.trim();
        if v.is_empty() || v.len() > 2048 {
            return Err(AppError::Validation(format!(
                "{field} must be a non-blank reference of at most 2048 characters"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_bounds() {
        assert!(validate_title("Hack the Planet").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(257)).is_err());
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
    }

    #[test]
    fn optional_url_allows_absent_rejects_blank() {
        assert!(validate_optional_url("banner_url", &None).is_ok());
        assert!(validate_optional_url("banner_url", &Some("https://x.io/a.png".into())).is_ok());
        assert!(validate_optional_url("banner_url", &Some("  ".into())).is_err());
    }
}
