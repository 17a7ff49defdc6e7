//! Domain types for the drama catalog.
//!
//! Identifier newtypes keep drama ids from being mixed up with the other
//! integer keys, and the closed enums below are the only values the catalog
//! accepts for statuses, roles and sort keys.

pub mod page;
pub mod slug;

pub use page::{Page, Pagination};
pub use slug::slugify;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Drama.
///
/// # Examples
///
/// ```rust
/// use drakor::domain::DramaId;
///
/// let id = DramaId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DramaId(i32);

impl DramaId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "DramaId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for DramaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DramaId> for i32 {
    fn from(id: DramaId) -> Self {
        id.0
    }
}

impl From<i32> for DramaId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for DramaId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for DramaId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// Returned when a string is not one of an enum's accepted values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be one of: {allowed}")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub allowed: &'static str,
}

/// Lifecycle status of a drama.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DramaStatus {
    Ongoing,
    Completed,
}

impl DramaStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for DramaStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownVariant {
                field: "status",
                allowed: "ongoing, completed",
            }),
        }
    }
}

impl fmt::Display for DramaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing of an actor within a drama.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Main,
    Support,
}

impl ActorRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Support => "support",
        }
    }
}

impl FromStr for ActorRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Self::Main),
            "support" => Ok(Self::Support),
            _ => Err(UnknownVariant {
                field: "role",
                allowed: "main, support",
            }),
        }
    }
}

/// Access level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownVariant {
                field: "role",
                allowed: "user, admin",
            }),
        }
    }
}

/// Ordering of the drama listing.
///
/// Unknown keys fall back to [`DramaSort::Latest`] instead of failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DramaSort {
    /// View counter, highest first.
    Popular,
    /// Aggregate rating, highest first.
    Rating,
    /// Creation time, earliest first.
    Oldest,
    /// Creation time, newest first.
    #[default]
    Latest,
}

impl DramaSort {
    #[must_use]
    pub fn from_key(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some("popular") => Self::Popular,
            Some("rating") => Self::Rating,
            Some("oldest") => Self::Oldest,
            _ => Self::Latest,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Rating => "rating",
            Self::Oldest => "oldest",
            Self::Latest => "latest",
        }
    }
}

/// Current UTC time as RFC 3339 with fixed microsecond precision.
///
/// Fixed width keeps lexical order of stored timestamps equal to chronological order.
#[must_use]
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drama_id_conversions() {
        let id = DramaId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i32::from(id), 42);
        assert_eq!(DramaId::from(42), id);
    }

    #[test]
    fn drama_id_serialization() {
        let id = DramaId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let back: DramaId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn sort_key_fallback() {
        assert_eq!(DramaSort::from_key(Some("popular")), DramaSort::Popular);
        assert_eq!(DramaSort::from_key(Some("rating")), DramaSort::Rating);
        assert_eq!(DramaSort::from_key(Some("oldest")), DramaSort::Oldest);
        assert_eq!(DramaSort::from_key(Some("latest")), DramaSort::Latest);
        assert_eq!(DramaSort::from_key(Some("trending")), DramaSort::Latest);
        assert_eq!(DramaSort::from_key(Some("")), DramaSort::Latest);
        assert_eq!(DramaSort::from_key(None), DramaSort::Latest);
    }

    #[test]
    fn status_and_role_parsing() {
        assert_eq!("ongoing".parse::<DramaStatus>(), Ok(DramaStatus::Ongoing));
        assert_eq!(
            "completed".parse::<DramaStatus>(),
            Ok(DramaStatus::Completed)
        );
        assert!("Ongoing".parse::<DramaStatus>().is_err());
        assert_eq!("support".parse::<ActorRole>(), Ok(ActorRole::Support));
        assert!("cameo".parse::<ActorRole>().is_err());
        assert_eq!("admin".parse::<UserRole>(), Ok(UserRole::Admin));
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::default().is_admin());
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&DramaStatus::Ongoing).unwrap(),
            "\"ongoing\""
        );
        assert_eq!(serde_json::to_string(&ActorRole::Main).unwrap(), "\"main\"");
        let role: ActorRole = serde_json::from_str("\"support\"").unwrap();
        assert_eq!(role, ActorRole::Support);
    }

    #[test]
    fn timestamps_are_fixed_width() {
        let a = timestamp_now();
        let b = timestamp_now();
        assert_eq!(a.len(), b.len());
        assert!(a.ends_with('Z'));
        assert!(a <= b);
    }
}
