//! Biography records: one person the user wants to remember.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

/// A stored biography.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Biography {
    pub id: Id,

    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub cellphone_number: String,

    /// Birth date as sent by the server, either `YYYY-MM-DD` or a full
    /// ISO-8601 timestamp.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub birth_date: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub notes: String,

    /// Photo as a URL or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Biography {
    /// The calendar date part of `birth_date`, if it parses.
    pub fn birth_day(&self) -> Option<NaiveDate> {
        let date_part = self.birth_date.get(..10)?;
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

/// Payload for creating a biography.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewBiography {
    pub name: String,
    pub cellphone_number: String,
    pub birth_date: String,
    pub tags: Vec<String>,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Partial update. Only the fields that are set are sent.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BiographyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cellphone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl BiographyPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cellphone_number.is_none()
            && self.birth_date.is_none()
            && self.tags.is_none()
            && self.notes.is_none()
            && self.profile_image.is_none()
    }
}
