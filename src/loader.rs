use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{ClientSecrets, ClientSecretsError, validate};

const STREAM_NAME: &str = "<stream>";

/// Where a client secrets document is read from.
pub enum Source<'a> {
    Path(PathBuf),
    /// An already-open stream. `name` is used in errors and as the cache key.
    Reader {
        name: String,
        reader: Box<dyn Read + 'a>,
    },
}

impl<'a> Source<'a> {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn reader(name: impl Into<String>, reader: impl Read + 'a) -> Self {
        Self::Reader {
            name: name.into(),
            reader: Box::new(reader),
        }
    }

    /// Display name used in errors. Non UTF-8 paths are converted lossily.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Path(path) => path.to_string_lossy(),
            Self::Reader { name, .. } => Cow::Borrowed(name.as_str()),
        }
    }

    /// Key under which a validated document from this source is cached.
    ///
    /// `None` for paths that are not valid UTF-8, since a lossy key could
    /// collide with another path.
    pub fn cache_key(&self) -> Option<&str> {
        match self {
            Self::Path(path) => path.to_str(),
            Self::Reader { name, .. } => Some(name.as_str()),
        }
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Reader { name, .. } => f.debug_struct("Reader").field("name", name).finish(),
        }
    }
}

impl From<&str> for Source<'_> {
    fn from(path: &str) -> Self {
        Self::path(path)
    }
}

impl From<String> for Source<'_> {
    fn from(path: String) -> Self {
        Self::path(path)
    }
}

impl From<&Path> for Source<'_> {
    fn from(path: &Path) -> Self {
        Self::path(path)
    }
}

impl From<PathBuf> for Source<'_> {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// Parses and validates a document read to the end of `reader`.
pub fn load(reader: impl Read) -> Result<ClientSecrets, ClientSecretsError> {
    from_reader(STREAM_NAME, reader)
}

/// Parses and validates a document held in memory.
pub fn loads(text: &str) -> Result<ClientSecrets, ClientSecretsError> {
    let document: Value = serde_json::from_str(text)
        .map_err(|err| ClientSecretsError::from_json(STREAM_NAME, err))?;
    validate(document)
}

/// Loads a document from a path or a named stream, without any caching.
pub fn load_file<'a>(source: impl Into<Source<'a>>) -> Result<ClientSecrets, ClientSecretsError> {
    match source.into() {
        Source::Path(path) => {
            let name = path.to_string_lossy().into_owned();
            let file = File::open(&path).map_err(|source| ClientSecretsError::FileNotFound {
                name: name.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "reading client secrets file");
            from_reader(&name, BufReader::new(file))
        }
        Source::Reader { name, reader } => from_reader(&name, reader),
    }
}

fn from_reader(name: &str, reader: impl Read) -> Result<ClientSecrets, ClientSecretsError> {
    let document: Value =
        serde_json::from_reader(reader).map_err(|err| ClientSecretsError::from_json(name, err))?;
    validate(document)
}
