use std::sync::LazyLock;

use regex::Regex;

use super::ApiError;

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub fn validate_id(resource: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {} ID: {}. ID must be a positive integer",
            resource, id
        )));
    }
    Ok(id)
}

/// Checks the character count of a trimmed text field.
pub fn validate_length<'a>(
    field: &str,
    value: &'a str,
    min: usize,
    max: usize,
) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(ApiError::validation(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(trimmed)
}

pub fn validate_title(title: &str) -> Result<&str, ApiError> {
    validate_length("Title", title, 2, 255)
}

pub fn validate_year(year: i32) -> Result<i32, ApiError> {
    if !(1900..=2100).contains(&year) {
        return Err(ApiError::validation(format!(
            "Invalid year: {}. Year must be between 1900 and 2100",
            year
        )));
    }
    Ok(year)
}

pub fn validate_min(field: &str, value: i32, min: i32) -> Result<i32, ApiError> {
    if value < min {
        return Err(ApiError::validation(format!(
            "{} must be at least {}",
            field, min
        )));
    }
    Ok(value)
}

pub fn validate_rating(rating: i32) -> Result<i32, ApiError> {
    if !(1..=10).contains(&rating) {
        return Err(ApiError::validation(format!(
            "Invalid rating: {}. Rating must be between 1 and 10",
            rating
        )));
    }
    Ok(rating)
}

pub fn validate_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim();
    let valid = EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email)) && email.len() <= 255;
    if !valid {
        return Err(ApiError::validation("Invalid email address"));
    }
    Ok(email.to_lowercase())
}

/// Accepts absolute http(s) URLs only.
pub fn validate_url(field: &str, value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(value.to_string()),
        _ => Err(ApiError::validation(format!("{} must be a valid URL", field))),
    }
}

/// Blank strings count as absent.
pub fn validate_optional_url(field: &str, value: Option<&str>) -> Result<Option<String>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => validate_url(field, v).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("Drama", 1).is_ok());
        assert!(validate_id("Drama", 0).is_err());
        assert!(validate_id("Drama", -4).is_err());
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("  Goblin ").unwrap(), "Goblin");
        assert!(validate_title("G").is_err());
        assert!(validate_title(&"a".repeat(256)).is_err());
        assert!(validate_title(&"가".repeat(255)).is_ok());
    }

    #[test]
    fn test_validate_year() {
        assert!(validate_year(2016).is_ok());
        assert!(validate_year(1900).is_ok());
        assert!(validate_year(1899).is_err());
        assert!(validate_year(2101).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(10).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(11).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(" Kim@Example.com ").unwrap(), "kim@example.com");
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@c.d").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("Poster", "https://img.example.com/goblin.jpg").is_ok());
        assert!(validate_url("Poster", "ftp://example.com/x").is_err());
        assert!(validate_url("Poster", "goblin.jpg").is_err());
        assert_eq!(validate_optional_url("Poster", Some("  ")).unwrap(), None);
        assert_eq!(validate_optional_url("Poster", None).unwrap(), None);
        assert!(validate_optional_url("Poster", Some("nope")).is_err());
    }

    #[test]
    fn test_validate_min() {
        assert!(validate_min("Duration", 1, 1).is_ok());
        assert!(validate_min("Duration", 0, 1).is_err());
        assert!(validate_min("Progress", 0, 0).is_ok());
    }
}
