//! Backend routes. Each method is a single call through the executor with a
//! fixed method and path.

use crate::{
    query::{AssociationQuery, BiographySearch, Query},
    request::RequestDescriptor,
    types::{
        AuthResponse, Biography, BiographyFolder, BiographyPatch, Folder, FolderEntry, Id,
        LoginRequest, NewBiography, NewBiographyFolder, NewFolder, ResetPasswordConfirmRequest,
        ResetPasswordRequest, SignupRequest, TokenStatus, ValidateCodeRequest,
    },
    Client, Error,
};

impl Client {
    // Authentication

    /// `POST /auth/login`. Does not persist anything.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, Error> {
        self.request(
            RequestDescriptor::post("/auth/login")
                .json(credentials)
                .public(),
        )
        .await
    }

    /// `POST /user`: creates an account and returns a session for it.
    pub async fn signup(&self, data: &SignupRequest) -> Result<AuthResponse, Error> {
        self.request(RequestDescriptor::post("/user").json(data).public())
            .await
    }

    /// `GET /auth/validate` with the stored token.
    pub async fn validate_token(&self) -> Result<TokenStatus, Error> {
        self.request(RequestDescriptor::get("/auth/validate")).await
    }

    pub async fn request_password_reset(&self, data: &ResetPasswordRequest) -> Result<(), Error> {
        self.request_unit(
            RequestDescriptor::post("/auth/request-reset")
                .json(data)
                .public(),
        )
        .await
    }

    pub async fn validate_reset_code(&self, data: &ValidateCodeRequest) -> Result<(), Error> {
        self.request_unit(
            RequestDescriptor::post("/auth/validate-code")
                .json(data)
                .public(),
        )
        .await
    }

    pub async fn confirm_password_reset(
        &self,
        data: &ResetPasswordConfirmRequest,
    ) -> Result<(), Error> {
        self.request_unit(
            RequestDescriptor::post("/auth/reset-password")
                .json(data)
                .public(),
        )
        .await
    }

    // Biographies

    pub async fn create_biography(&self, data: &NewBiography) -> Result<Biography, Error> {
        self.request(RequestDescriptor::post("/biography").json(data))
            .await
    }

    /// All biographies of the signed-in user. A `null` body reads as empty.
    pub async fn list_biographies(&self) -> Result<Vec<Biography>, Error> {
        self.request::<Option<Vec<Biography>>>(RequestDescriptor::get("/biography"))
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn search_biographies(&self, query: &BiographySearch) -> Result<Vec<Biography>, Error> {
        self.request::<Option<Vec<Biography>>>(RequestDescriptor::get(query.to_path()))
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn get_biography(&self, id: &Id) -> Result<Biography, Error> {
        self.request(RequestDescriptor::get(format!("/biography/{}", id)))
            .await
    }

    pub async fn update_biography(&self, id: &Id, patch: &BiographyPatch) -> Result<Biography, Error> {
        self.request(RequestDescriptor::patch(format!("/biography/{}", id)).json(patch))
            .await
    }

    pub async fn delete_biography(&self, id: &Id) -> Result<(), Error> {
        self.request_unit(RequestDescriptor::delete(format!("/biography/{}", id)))
            .await
    }

    // Folders

    pub async fn list_folders(&self) -> Result<Vec<Folder>, Error> {
        self.request::<Option<Vec<Folder>>>(RequestDescriptor::get("/folder"))
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn get_folder(&self, id: &Id) -> Result<Folder, Error> {
        self.request(RequestDescriptor::get(format!("/folder/{}", id)))
            .await
    }

    pub async fn create_folder(&self, data: &NewFolder) -> Result<Folder, Error> {
        self.request(RequestDescriptor::post("/folder").json(data))
            .await
    }

    pub async fn update_folder(&self, id: &Id, data: &NewFolder) -> Result<Folder, Error> {
        self.request(RequestDescriptor::patch(format!("/folder/{}", id)).json(data))
            .await
    }

    /// `DELETE /folder/{id}`. Sent without a body.
    pub async fn delete_folder(&self, id: &Id) -> Result<(), Error> {
        self.request_unit(RequestDescriptor::delete(format!("/folder/{}", id)))
            .await
    }

    // Biography-folder associations

    pub async fn add_biography_to_folder(
        &self,
        data: &NewBiographyFolder,
    ) -> Result<BiographyFolder, Error> {
        self.request(RequestDescriptor::post("/biographyfolder").json(data))
            .await
    }

    /// Removal with the ids in the query string.
    pub async fn remove_association(&self, query: &AssociationQuery) -> Result<(), Error> {
        self.request_unit(RequestDescriptor::delete(query.to_path()))
            .await
    }

    /// Removal with the ids in a JSON body.
    pub async fn remove_association_with_body(&self, data: &NewBiographyFolder) -> Result<(), Error> {
        self.request_unit(RequestDescriptor::delete("/biographyfolder").json(data))
            .await
    }

    /// Folders a biography belongs to.
    pub async fn folders_of_biography(&self, biography_id: &Id) -> Result<Vec<Folder>, Error> {
        self.request::<Option<Vec<Folder>>>(RequestDescriptor::get(format!(
            "/biographyfolder/biography/{}",
            biography_id
        )))
        .await
        .map(Option::unwrap_or_default)
    }

    /// Contents of a folder.
    pub async fn folder_entries(&self, folder_id: &Id) -> Result<Vec<FolderEntry>, Error> {
        self.request::<Option<Vec<FolderEntry>>>(RequestDescriptor::get(format!(
            "/biographyfolder/folder/{}",
            folder_id
        )))
        .await
        .map(Option::unwrap_or_default)
    }
}
