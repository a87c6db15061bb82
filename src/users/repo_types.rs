use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Account status stored as a SMALLINT discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(into = "i16", try_from = "i16")]
#[repr(i16)]
pub enum UserStatus {
    Inactive = 0,
    Active = 1,
    Banned = 2,
}

impl From<UserStatus> for i16 {
    fn from(status: UserStatus) -> Self {
        status as i16
    }
}

impl TryFrom<i16> for UserStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(UserStatus::Inactive),
            1 => Ok(UserStatus::Active),
            2 => Ok(UserStatus::Banned),
            other => Err(format!("invalid user status: {other}")),
        }
    }
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 hash, not exposed in JSON
    pub status: UserStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Column values for a row that has not been inserted yet.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub status: UserStatus,
}

/// Filter and page window for the user listing.
///
/// Filters are conjunctive; empty strings count as absent. Page values
/// outside the allowed window fall back to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub username: Option<String>,
    pub email: Option<String>,
    pub status: Option<UserStatus>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListParams {
    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
            .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn limit_offset(&self) -> (i64, i64) {
        let page_size = self.page_size();
        (page_size, (self.page() - 1) * page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            status: UserStatus::Active,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("alice@example.com"));
    }

    #[test]
    fn status_serializes_as_number() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(json.contains("\"status\":1"));
    }

    #[test]
    fn status_round_trips_through_i16() {
        for status in [UserStatus::Inactive, UserStatus::Active, UserStatus::Banned] {
            assert_eq!(UserStatus::try_from(i16::from(status)), Ok(status));
        }
    }

    #[test]
    fn status_rejects_unknown_discriminant() {
        assert!(UserStatus::try_from(3i16).is_err());
        assert!(serde_json::from_str::<UserStatus>("3").is_err());
    }

    #[test]
    fn page_defaults_and_clamping() {
        let params = ListParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), 10);

        let params = ListParams {
            page: Some(0),
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), 10);

        let params = ListParams {
            page: Some(-3),
            page_size: Some(500),
            ..Default::default()
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), 10);
    }

    #[test]
    fn offset_is_page_window() {
        let params = ListParams {
            page: Some(3),
            page_size: Some(25),
            ..Default::default()
        };
        assert_eq!(params.limit_offset(), (25, 50));
    }
}
