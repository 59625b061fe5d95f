//! Library layer for Lembra de Mim: sessions, folder workflows, durable
//! credentials, configuration, and input validation.
//!
//! Wraps the `lembrademim_api` crate's fallback client with the flows the
//! app builds on top of individual backend calls.

pub mod config;
pub mod error;
pub mod folders;
pub mod messages;
pub mod session;
pub mod store;
pub mod validation;

pub use lembrademim_api;
pub use lembrademim_api::types;
pub use lembrademim_api::{
    AuthPolicy, BiographySearch, Client, ConnectivityReport, CredentialStore, Endpoints,
    MemoryStore, StoreError,
};

pub use config::Config;
pub use error::LibError;
pub use folders::Folders;
pub use session::{AuthSession, Session};
pub use store::FileStore;
