//! Loading and validation of OAuth 2.0 client secrets files.
//!
//! A client secrets file is a JSON object with a single client type key
//! (`web` or `installed`) holding the client id, secret, redirect URIs and
//! endpoints. Loading can optionally go through a [`SecretsCache`] so the file
//! is read and validated only once.

mod cache;
mod error;
mod loader;
mod schema;
mod types;
mod validate;

pub use cache::{CachedLoader, MemoryCache, SECRETS_NAMESPACE, SecretsCache, load_file_cached};
pub use error::{CacheError, ClientSecretsError};
pub use loader::{Source, load, load_file, loads};
pub use schema::{ClientSchema, ClientType, PLACEHOLDER_PREFIX};
pub use types::{CacheEntry, ClientInfo, ClientSecrets};
pub use validate::validate;
