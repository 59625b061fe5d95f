mod id;
pub use self::id::Id;

mod auth;
pub use self::auth::{
    AuthResponse, LoginRequest, ResetPasswordConfirmRequest, ResetPasswordRequest, SignupRequest,
    TokenStatus, User, ValidateCodeRequest,
};

mod biography;
pub use self::biography::{Biography, BiographyPatch, NewBiography};

mod folder;
pub use self::folder::{BiographyFolder, Folder, FolderEntry, NewBiographyFolder, NewFolder};

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` as the field's default. Paired with
/// `#[serde(default)]`, a missing key and `null` decode the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
