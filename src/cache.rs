use dashmap::DashMap;

use crate::{CacheEntry, CacheError, ClientSecrets, ClientSecretsError, Source, load_file};

/// Namespace reserved for validated client secrets entries.
pub const SECRETS_NAMESPACE: &str = "oauth2client:secrets#ns";

/// A key/value store that can hold validated client secrets.
///
/// Entries are only ever written by [`CachedLoader`], so reads are trusted
/// without being validated again.
pub trait SecretsCache {
    fn get(&self, key: &str, namespace: &str) -> Result<Option<CacheEntry>, CacheError>;

    fn set(&self, key: &str, value: CacheEntry, namespace: &str) -> Result<(), CacheError>;
}

impl<T: SecretsCache + ?Sized> SecretsCache for &T {
    fn get(&self, key: &str, namespace: &str) -> Result<Option<CacheEntry>, CacheError> {
        (**self).get(key, namespace)
    }

    fn set(&self, key: &str, value: CacheEntry, namespace: &str) -> Result<(), CacheError> {
        (**self).set(key, value, namespace)
    }
}

impl<T: SecretsCache + ?Sized> SecretsCache for Box<T> {
    fn get(&self, key: &str, namespace: &str) -> Result<Option<CacheEntry>, CacheError> {
        (**self).get(key, namespace)
    }

    fn set(&self, key: &str, value: CacheEntry, namespace: &str) -> Result<(), CacheError> {
        (**self).set(key, value, namespace)
    }
}

/// In-process cache keyed by namespace and key.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<(String, String), CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl SecretsCache for MemoryCache {
    fn get(&self, key: &str, namespace: &str) -> Result<Option<CacheEntry>, CacheError> {
        let entry = self
            .entries
            .get(&(namespace.to_string(), key.to_string()))
            .map(|entry| entry.value().clone());
        Ok(entry)
    }

    fn set(&self, key: &str, value: CacheEntry, namespace: &str) -> Result<(), CacheError> {
        self.entries
            .insert((namespace.to_string(), key.to_string()), value);
        Ok(())
    }
}

/// Loads client secrets through a cache, falling back to [`load_file`] on a miss.
#[derive(Debug, Clone)]
pub struct CachedLoader<C> {
    cache: C,
    strict: bool,
}

impl<C: SecretsCache> CachedLoader<C> {
    pub fn new(cache: C) -> Self {
        Self {
            cache,
            strict: false,
        }
    }

    /// When strict, cache failures are returned as
    /// [`ClientSecretsError::CacheUnavailable`] instead of being logged and skipped.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn load<'a>(
        &self,
        source: impl Into<Source<'a>>,
    ) -> Result<ClientSecrets, ClientSecretsError> {
        let source = source.into();
        let Some(key) = source.cache_key().map(str::to_string) else {
            tracing::debug!(source = ?source, "source has no cache key, loading directly");
            return load_file(source);
        };

        match self.cache.get(&key, SECRETS_NAMESPACE) {
            Ok(Some(entry)) if !entry.is_empty() => {
                if let Some(secrets) = ClientSecrets::from_cache_entry(entry) {
                    tracing::debug!(
                        key = %key,
                        client_type = %secrets.client_type,
                        "client secrets cache hit"
                    );
                    return Ok(secrets);
                }
                tracing::warn!(key = %key, "ignoring unreadable client secrets cache entry");
            }
            Ok(_) => tracing::debug!(key = %key, "client secrets cache miss"),
            Err(err) if self.strict => return Err(err.into()),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "client secrets cache lookup failed");
            }
        }

        let secrets = load_file(source)?;

        if let Err(err) = self
            .cache
            .set(&key, secrets.to_cache_entry(), SECRETS_NAMESPACE)
        {
            if self.strict {
                return Err(err.into());
            }
            tracing::warn!(key = %key, error = %err, "failed to store client secrets in cache");
        }

        Ok(secrets)
    }
}

/// Loads client secrets, consulting `cache` first when one is given.
///
/// Cache failures are logged and the document is read from `source` instead.
/// Use [`CachedLoader::strict`] to surface them.
pub fn load_file_cached<'a>(
    source: impl Into<Source<'a>>,
    cache: Option<&dyn SecretsCache>,
) -> Result<ClientSecrets, ClientSecretsError> {
    match cache {
        Some(cache) => CachedLoader::new(cache).load(source),
        None => load_file(source),
    }
}
