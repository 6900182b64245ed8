use std::fmt;
use std::str::FromStr;

use crate::ClientSecretsError;

/// Prefix marking a template value that was never filled in.
pub const PLACEHOLDER_PREFIX: &str = "[[";

const REQUIRED_FIELDS: &[&str] = &[
    "client_id",
    "client_secret",
    "redirect_uris",
    "auth_uri",
    "token_uri",
];

const STRING_FIELDS: &[&str] = &["client_id", "client_secret"];

/// Field rules for one client type.
///
/// `required` fields must be present. `string` fields must also hold text that
/// does not start with [`PLACEHOLDER_PREFIX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSchema {
    pub required: &'static [&'static str],
    pub string: &'static [&'static str],
}

const WEB_SCHEMA: ClientSchema = ClientSchema {
    required: REQUIRED_FIELDS,
    string: STRING_FIELDS,
};

const INSTALLED_SCHEMA: ClientSchema = ClientSchema {
    required: REQUIRED_FIELDS,
    string: STRING_FIELDS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientType {
    Web,
    Installed,
}

impl ClientType {
    pub const ALL: [ClientType; 2] = [ClientType::Web, ClientType::Installed];

    pub fn as_str(self) -> &'static str {
        match self {
            ClientType::Web => "web",
            ClientType::Installed => "installed",
        }
    }

    pub fn schema(self) -> &'static ClientSchema {
        match self {
            ClientType::Web => &WEB_SCHEMA,
            ClientType::Installed => &INSTALLED_SCHEMA,
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = ClientSecretsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ClientType::ALL
            .into_iter()
            .find(|client_type| client_type.as_str() == value)
            .ok_or_else(|| ClientSecretsError::UnknownClientType(value.to_string()))
    }
}
