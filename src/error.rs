use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientSecretsError {
    #[error("Invalid file format: {reason}.")]
    MalformedDocument { reason: String },

    #[error("Unknown client type: {0}.")]
    UnknownClientType(String),

    #[error("Missing property \"{field}\" in a client type of \"{client_type}\".")]
    MissingField { field: String, client_type: String },

    #[error("Property \"{field}\" is not configured.")]
    PlaceholderNotConfigured { field: String },

    #[error("File not found: \"{name}\"")]
    FileNotFound {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cache unavailable: {0}")]
    CacheUnavailable(#[from] CacheError),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientSecretsError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            reason: reason.into(),
        }
    }

    /// Converts a `serde_json` failure for the source called `name`.
    ///
    /// Read failures keep their I/O cause; everything else is a malformed document.
    pub(crate) fn from_json(name: &str, err: serde_json::Error) -> Self {
        if err.is_io() {
            let source = std::io::Error::from(err);
            return Self::FileNotFound {
                name: name.to_string(),
                source,
            };
        }
        Self::malformed(err.to_string())
    }
}

/// Failure reported by a [`SecretsCache`](crate::SecretsCache) implementation.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {message}")]
    Backend { message: String },
}
