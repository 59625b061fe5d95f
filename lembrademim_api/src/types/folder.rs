//! Folders and the biography-folder association.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Biography, Id};

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Id,

    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Id>,

    /// Number of biographies in the folder, when the listing includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography_count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating or renaming a folder.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewFolder {
    pub name: String,
}

/// A biography's membership in a folder.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BiographyFolder {
    pub id: Id,
    pub biography_id: Id,
    pub folder_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for adding a biography to a folder.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewBiographyFolder {
    pub biography_id: Id,
    pub folder_id: Id,
}

/// One entry of a folder's contents. Depending on the deployment the entry
/// either embeds the biography or only carries its id.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<Biography>,
}

impl FolderEntry {
    /// Id of the biography this entry refers to.
    pub fn biography_ref(&self) -> Option<&Id> {
        self.biography
            .as_ref()
            .map(|b| &b.id)
            .or(self.biography_id.as_ref())
    }
}
