mod client;
pub mod credentials;
mod diagnostic;
pub mod endpoints;
mod errors;
mod query;
pub mod request;
mod routes;
pub mod types;
pub use self::client::{AuthPolicy, Client, ClientBuilder, RawResponse};
pub use self::credentials::{CredentialStore, MemoryStore, StoreError, TOKEN_KEY, USER_KEY};
pub use self::diagnostic::{ConnectivityReport, HEALTH_PATH};
pub use self::endpoints::Endpoints;
pub use self::errors::{normalize_error_message, Error, MAX_BODY_LEN};
pub use self::query::{AssociationQuery, BiographySearch, Query};
pub use self::request::RequestDescriptor;
