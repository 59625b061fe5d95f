//! Query form of the biography-folder association removal.

use super::Query;
use crate::types::Id;

/// `DELETE /biographyfolder/remove?biographyId=..&folderId=..`
#[derive(Clone, Debug)]
pub struct AssociationQuery {
    pub biography_id: Id,
    pub folder_id: Id,
}

impl Query for AssociationQuery {
    fn route(&self) -> &'static str {
        "/biographyfolder/remove"
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("biographyId", self.biography_id.to_string()),
            ("folderId", self.folder_id.to_string()),
        ]
    }
}
