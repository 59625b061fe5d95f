//! Error types for the library layer.

use std::fmt;

use lembrademim_api::StoreError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding session, storage and input validation failures.
#[derive(Debug)]
pub enum LibError {
    /// An error from the underlying API client.
    Api(lembrademim_api::Error),
    /// The credential store could not be read or written.
    Store(StoreError),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// The server accepted the credentials but sent no token.
    MissingToken,
    /// The server accepted the credentials but sent no user profile.
    MissingUser,
    /// A folder still holds biographies and cannot be deleted.
    FolderNotEmpty { folder_id: String, count: usize },
}

impl fmt::Display for LibError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "{}", e),
            Self::Store(e) => write!(f, "Credential store error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::MissingToken => write!(f, "Token not found in server response"),
            Self::MissingUser => write!(f, "User data not found in server response"),
            Self::FolderNotEmpty { folder_id, count } => write!(
                f,
                "Folder {} contains {} biographies and cannot be deleted. Remove the biographies from the folder first.",
                folder_id, count
            ),
        }
    }
}

impl std::error::Error for LibError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl LibError {
    /// HTTP status behind this error, when it came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status(),
            _ => None,
        }
    }
}

impl From<lembrademim_api::Error> for LibError {
    fn from(e: lembrademim_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<StoreError> for LibError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<serde_json::Error> for LibError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
