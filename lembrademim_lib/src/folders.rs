//! Folder workflows that combine several backend calls.

use futures::future::join_all;
use lembrademim_api::types::{BiographyFolder, Folder, FolderEntry, Id, NewBiographyFolder, NewFolder};
use lembrademim_api::{AssociationQuery, Client};

use crate::error::LibError;

/// Phrases the backend uses in a 404 when a biography has no folder links.
const BIOGRAPHY_NOT_FOUND: &[&str] = &["Biografia não encontrada", "Biography not found"];

/// Folder operations for the signed-in user.
#[derive(Clone)]
pub struct Folders {
    client: Client,
}

impl Folders {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Folder>, LibError> {
        Ok(self.client.list_folders().await?)
    }

    pub async fn get(&self, id: &Id) -> Result<Folder, LibError> {
        Ok(self.client.get_folder(id).await?)
    }

    pub async fn create_folder(&self, name: &str) -> Result<Folder, LibError> {
        let folder = self
            .client
            .create_folder(&NewFolder {
                name: name.to_string(),
            })
            .await?;
        tracing::info!("Created folder {} ({})", folder.id, folder.name);
        Ok(folder)
    }

    pub async fn rename_folder(&self, id: &Id, name: &str) -> Result<Folder, LibError> {
        let folder = self
            .client
            .update_folder(
                id,
                &NewFolder {
                    name: name.to_string(),
                },
            )
            .await?;
        tracing::info!("Renamed folder {} to {}", id, folder.name);
        Ok(folder)
    }

    /// Deletes a folder, refusing when it still holds biographies.
    ///
    /// If the contents cannot be listed the delete goes ahead and the server
    /// has the final word.
    pub async fn delete(&self, id: &Id) -> Result<(), LibError> {
        match self.client.folder_entries(id).await {
            Ok(entries) if !entries.is_empty() => {
                tracing::warn!("Folder {} holds {} biographies", id, entries.len());
                return Err(LibError::FolderNotEmpty {
                    folder_id: id.to_string(),
                    count: entries.len(),
                });
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Could not list folder {} contents, deleting anyway: {}", id, e);
            }
        }
        self.client.delete_folder(id).await?;
        tracing::info!("Deleted folder {}", id);
        Ok(())
    }

    pub async fn add_biography_to_folder(
        &self,
        biography_id: &Id,
        folder_id: &Id,
    ) -> Result<BiographyFolder, LibError> {
        let link = self
            .client
            .add_biography_to_folder(&NewBiographyFolder {
                biography_id: biography_id.clone(),
                folder_id: folder_id.clone(),
            })
            .await?;
        tracing::info!("Added biography {} to folder {}", biography_id, folder_id);
        Ok(link)
    }

    /// Removes a biography from a folder. Some deployments only accept the
    /// ids in the query string, others only in the body; the query form is
    /// tried first and the body form once if it fails.
    pub async fn remove_biography_from_folder(
        &self,
        biography_id: &Id,
        folder_id: &Id,
    ) -> Result<(), LibError> {
        let query = AssociationQuery {
            biography_id: biography_id.clone(),
            folder_id: folder_id.clone(),
        };
        if let Err(e) = self.client.remove_association(&query).await {
            tracing::debug!("Query-form removal failed, retrying with body: {}", e);
            self.client
                .remove_association_with_body(&NewBiographyFolder {
                    biography_id: biography_id.clone(),
                    folder_id: folder_id.clone(),
                })
                .await?;
        }
        tracing::info!("Removed biography {} from folder {}", biography_id, folder_id);
        Ok(())
    }

    /// Folders a biography belongs to. Failures read as "no folders".
    pub async fn folders_of_biography(&self, biography_id: &Id) -> Vec<Folder> {
        match self.client.folders_of_biography(biography_id).await {
            Ok(folders) => folders,
            Err(e) if is_biography_not_found(&e) => {
                tracing::debug!("Biography {} has no folders", biography_id);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Failed to load folders of biography {}: {}", biography_id, e);
                Vec::new()
            }
        }
    }

    /// Contents of a folder. Failures read as an empty folder.
    pub async fn biographies_in_folder(&self, folder_id: &Id) -> Vec<FolderEntry> {
        match self.client.folder_entries(folder_id).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to load contents of folder {}: {}", folder_id, e);
                Vec::new()
            }
        }
    }

    /// Detaches a biography from every folder it is in, returning how many
    /// folders were involved.
    ///
    /// Removals run concurrently and all of them are awaited. Removals that
    /// succeeded are not undone when another fails; the first failure is
    /// returned.
    pub async fn remove_biography_from_all_folders(
        &self,
        biography_id: &Id,
    ) -> Result<usize, LibError> {
        let folders = self.folders_of_biography(biography_id).await;
        let results = join_all(
            folders
                .iter()
                .map(|folder| self.remove_biography_from_folder(biography_id, &folder.id)),
        )
        .await;

        let count = results.len();
        results.into_iter().collect::<Result<Vec<()>, LibError>>()?;
        Ok(count)
    }
}

fn is_biography_not_found(err: &lembrademim_api::Error) -> bool {
    if err.status() != Some(404) {
        return false;
    }
    let message = err.message();
    let body = err.body().unwrap_or_default();
    BIOGRAPHY_NOT_FOUND
        .iter()
        .any(|phrase| message.contains(phrase) || body.contains(phrase))
}
