use serde_json::Value;

use crate::schema::PLACEHOLDER_PREFIX;
use crate::{ClientInfo, ClientSecrets, ClientSecretsError, ClientType};

/// Checks a parsed document against the schema table.
///
/// The document must be an object with a single client type key whose value
/// holds every required field, and whose string fields are filled in.
pub fn validate(document: Value) -> Result<ClientSecrets, ClientSecretsError> {
    let document = match document {
        Value::Object(document) => document,
        Value::Null => return Err(ClientSecretsError::malformed("document is empty")),
        _ => return Err(ClientSecretsError::malformed("document is not an object")),
    };

    if document.len() != 1 {
        return Err(ClientSecretsError::malformed(format!(
            "expected exactly one client type, found {}",
            document.len()
        )));
    }

    let Some((key, info)) = document.into_iter().next() else {
        return Err(ClientSecretsError::malformed("document is empty"));
    };
    let client_type: ClientType = key.parse()?;

    let info = match info {
        Value::Object(info) => ClientInfo::new(info),
        _ => {
            return Err(ClientSecretsError::malformed(format!(
                "client type \"{client_type}\" does not map to an object"
            )));
        }
    };

    let schema = client_type.schema();
    for field in schema.required.iter().chain(schema.string) {
        if !info.contains(field) {
            return Err(ClientSecretsError::MissingField {
                field: (*field).to_string(),
                client_type: client_type.to_string(),
            });
        }
    }

    for field in schema.string {
        let value = info.get(field).and_then(Value::as_str).ok_or_else(|| {
            ClientSecretsError::malformed(format!("property \"{field}\" must be a string"))
        })?;
        if value.starts_with(PLACEHOLDER_PREFIX) {
            return Err(ClientSecretsError::PlaceholderNotConfigured {
                field: (*field).to_string(),
            });
        }
    }

    tracing::debug!(client_type = %client_type, "client secrets validated");
    Ok(ClientSecrets::new(client_type, info))
}
