use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::{ClientSecretsError, ClientType};

/// Cached form of a validated document: `{client_type: client_info}`.
pub type CacheEntry = Map<String, Value>;

/// The fields stored under the client type key, kept exactly as they were read.
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientInfo(Map<String, Value>);

impl ClientInfo {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn client_id(&self) -> Option<&str> {
        self.get_str("client_id")
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.get_str("client_secret")
    }

    pub fn auth_uri(&self) -> Option<&str> {
        self.get_str("auth_uri")
    }

    pub fn token_uri(&self) -> Option<&str> {
        self.get_str("token_uri")
    }

    /// Redirect URIs that are strings; other array members are skipped.
    pub fn redirect_uris(&self) -> Vec<&str> {
        match self.get("redirect_uris") {
            Some(Value::Array(uris)) => uris.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }
}

impl fmt::Debug for ClientInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.0 {
            if key == "client_secret" {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

impl From<Map<String, Value>> for ClientInfo {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A validated client secrets document.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSecrets {
    pub client_type: ClientType,
    pub info: ClientInfo,
}

impl ClientSecrets {
    pub fn new(client_type: ClientType, info: ClientInfo) -> Self {
        Self { client_type, info }
    }

    pub fn into_parts(self) -> (ClientType, ClientInfo) {
        (self.client_type, self.info)
    }

    pub fn auth_url(&self) -> Result<Url, ClientSecretsError> {
        self.endpoint("auth_uri")
    }

    pub fn token_url(&self) -> Result<Url, ClientSecretsError> {
        self.endpoint("token_uri")
    }

    fn endpoint(&self, field: &str) -> Result<Url, ClientSecretsError> {
        let value = self
            .info
            .get_str(field)
            .ok_or_else(|| ClientSecretsError::MissingField {
                field: field.to_string(),
                client_type: self.client_type.to_string(),
            })?;
        Ok(Url::parse(value)?)
    }

    pub fn to_cache_entry(&self) -> CacheEntry {
        let mut entry = Map::new();
        entry.insert(
            self.client_type.as_str().to_string(),
            Value::Object(self.info.as_map().clone()),
        );
        entry
    }

    /// Reads back an entry written by [`ClientSecrets::to_cache_entry`].
    ///
    /// The fields are trusted as-is. Returns `None` unless the entry holds
    /// exactly one known client type mapped to an object.
    pub fn from_cache_entry(entry: CacheEntry) -> Option<Self> {
        if entry.len() != 1 {
            return None;
        }
        let (key, value) = entry.into_iter().next()?;
        let client_type = key.parse().ok()?;
        let info = serde_json::from_value(value).ok()?;
        Some(Self::new(client_type, info))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CacheEntry, ClientInfo, ClientSecrets};
    use crate::{ClientSecretsError, ClientType};

    fn info() -> ClientInfo {
        match json!({
            "client_id": "id1",
            "client_secret": "s1",
            "redirect_uris": ["http://localhost", 7],
            "auth_uri": "https://accounts.example.com/o/oauth2/auth",
            "token_uri": "not a url",
        }) {
            serde_json::Value::Object(fields) => ClientInfo::new(fields),
            _ => unreachable!(),
        }
    }

    #[test]
    fn accessors_read_known_fields() {
        let info = info();
        assert_eq!(info.client_id(), Some("id1"));
        assert_eq!(info.redirect_uris(), vec!["http://localhost"]);
    }

    #[test]
    fn endpoints_parse_as_urls() {
        let secrets = ClientSecrets::new(ClientType::Web, info());
        let auth = secrets.auth_url().unwrap();
        assert_eq!(auth.host_str(), Some("accounts.example.com"));
        assert!(matches!(secrets.token_url(), Err(ClientSecretsError::Url(_))));
    }

    #[test]
    fn serializes_as_a_plain_field_map() {
        let value = serde_json::to_value(info()).unwrap();
        assert_eq!(value["client_id"], "id1");
        assert_eq!(value["redirect_uris"][1], 7);

        let info: ClientInfo = serde_json::from_value(value).unwrap();
        assert_eq!(info.client_secret(), Some("s1"));
        assert!(serde_json::from_value::<ClientInfo>(json!(["id1"])).is_err());
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let rendered = format!("{:?}", info());
        assert!(rendered.contains("id1"));
        assert!(!rendered.contains("\"s1\""));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn cache_entry_reads_back_the_same_pair() {
        let secrets = ClientSecrets::new(ClientType::Installed, info());
        let entry = secrets.to_cache_entry();
        assert_eq!(entry.len(), 1);
        assert_eq!(ClientSecrets::from_cache_entry(entry), Some(secrets));
    }

    #[test]
    fn cache_entry_with_unknown_type_is_unusable() {
        let mut entry = ClientSecrets::new(ClientType::Web, info()).to_cache_entry();
        let value = entry.remove("web").unwrap();
        entry.insert("desktop".to_string(), value);
        assert_eq!(ClientSecrets::from_cache_entry(entry), None);
        assert_eq!(ClientSecrets::from_cache_entry(Default::default()), None);

        let mut entry = CacheEntry::new();
        entry.insert("web".to_string(), json!("client_id=abc"));
        assert_eq!(ClientSecrets::from_cache_entry(entry), None);
    }
}
