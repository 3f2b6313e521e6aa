//! All Box-specific functionality

pub mod auth;
pub mod cache;
pub mod client;
pub mod credentials;
pub mod jwt;

pub use auth::BoxJwtAuth;
pub use cache::ClientCache;
pub use client::{BoxClient, FolderItemsApi, ListParams};
pub use credentials::{CredentialSource, JwtConfig};
