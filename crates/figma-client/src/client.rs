//! Figma REST client
//!
//! A thin typed client over the two Figma endpoints the pipeline needs:
//! the file metadata endpoint (document name/version) and the local
//! variables endpoint (the token source of truth). Authentication is a
//! personal access token sent in the `X-Figma-Token` header.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Production Figma API base URL
pub const FIGMA_API_BASE: &str = "https://api.figma.com";

/// Environment variable holding the Figma file id
pub const FILE_ID_ENV: &str = "FIGMA_FILE_ID";

/// Environment variable holding the Figma access token
pub const TOKEN_ENV: &str = "FIGMA_TOKEN";

/// Request timeout for Figma API calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Errors
// =============================================================================

/// Errors that can occur talking to the Figma API
#[derive(Debug, Error)]
pub enum FigmaClientError {
    /// Required credentials were not provided
    #[error("Figma credentials missing: {0}. Pass --file-id/--token or set {FILE_ID_ENV}/{TOKEN_ENV}.")]
    CredentialsMissing(String),

    /// Transport-level HTTP failure
    #[error("HTTP error calling Figma: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Figma API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the API
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("Malformed Figma response: {0}")]
    MalformedResponse(String),
}

/// Result type for Figma client operations
pub type Result<T> = std::result::Result<T, FigmaClientError>;

// =============================================================================
// Credentials
// =============================================================================

/// Credentials for one Figma file
#[derive(Debug, Clone)]
pub struct FigmaCredentials {
    /// The Figma file id the tokens live in
    pub file_id: String,
    /// Personal access token
    pub access_token: String,
}

impl FigmaCredentials {
    /// Create credentials from explicit values
    pub fn new(file_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            access_token: access_token.into(),
        }
    }

    /// Read credentials from the environment
    ///
    /// Fails with [`FigmaClientError::CredentialsMissing`] naming each
    /// variable that is absent or empty.
    pub fn from_env() -> Result<Self> {
        let file_id = std::env::var(FILE_ID_ENV).ok().filter(|v| !v.is_empty());
        let token = std::env::var(TOKEN_ENV).ok().filter(|v| !v.is_empty());

        match (file_id, token) {
            (Some(file_id), Some(token)) => Ok(Self::new(file_id, token)),
            (None, Some(_)) => Err(FigmaClientError::CredentialsMissing(FILE_ID_ENV.into())),
            (Some(_), None) => Err(FigmaClientError::CredentialsMissing(TOKEN_ENV.into())),
            (None, None) => Err(FigmaClientError::CredentialsMissing(format!(
                "{FILE_ID_ENV} and {TOKEN_ENV}"
            ))),
        }
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Response of `GET /v1/files/{file_id}/meta`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetaResponse {
    /// File metadata
    pub file: FileMeta,
}

/// Figma file metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    /// Document name
    pub name: String,
    /// Document version at the time of the call
    pub version: String,
}

/// Response of `GET /v1/files/{file_id}/variables/local`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalVariablesResponse {
    /// Error flag set by the API
    #[serde(default)]
    pub error: bool,
    /// Variables payload
    pub meta: VariablesMeta,
}

/// The variables payload: variables plus their collections
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesMeta {
    /// All local variables, keyed by variable id
    pub variables: BTreeMap<String, FigmaVariable>,
    /// All variable collections, keyed by collection id
    pub variable_collections: BTreeMap<String, FigmaVariableCollection>,
}

/// One Figma variable
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaVariable {
    /// Variable id
    pub id: String,
    /// Slash-separated name path (e.g. `"color/primary/500"`)
    pub name: String,
    /// Owning collection id
    pub variable_collection_id: String,
    /// Resolved type: `"COLOR"`, `"FLOAT"`, or `"STRING"`
    pub resolved_type: String,
    /// Optional description
    #[serde(default)]
    pub description: String,
    /// Value per mode id
    pub values_by_mode: BTreeMap<String, FigmaVariableValue>,
}

/// One variable collection
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaVariableCollection {
    /// Collection id
    pub id: String,
    /// Collection name
    pub name: String,
    /// Mode the pipeline reads values from
    pub default_mode_id: String,
}

/// A variable value in one mode
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FigmaVariableValue {
    /// Alias onto another variable
    Alias {
        /// Always `"VARIABLE_ALIAS"`
        #[serde(rename = "type")]
        value_type: String,
        /// Referenced variable id
        id: String,
    },
    /// Color components in the 0..=1 range
    Color {
        /// Red
        r: f64,
        /// Green
        g: f64,
        /// Blue
        b: f64,
        /// Alpha
        a: f64,
    },
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
}

// =============================================================================
// Client
// =============================================================================

/// Typed client for the Figma REST API
///
/// # Example
/// ```rust,no_run
/// use figma_client::{FigmaClient, FigmaCredentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = FigmaCredentials::from_env()?;
///     let client = FigmaClient::new(credentials)?;
///     let collection = client.extract_tokens().await?;
///     println!("Extracted {} tokens", collection.metadata.token_count);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FigmaClient {
    http: reqwest::Client,
    base_url: String,
    credentials: FigmaCredentials,
}

impl FigmaClient {
    /// Create a client against the production Figma API
    pub fn new(credentials: FigmaCredentials) -> Result<Self> {
        Self::with_base_url(credentials, FIGMA_API_BASE)
    }

    /// Create a client against a custom base URL (used by tests)
    pub fn with_base_url(credentials: FigmaCredentials, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// The file id this client extracts from
    pub fn file_id(&self) -> &str {
        &self.credentials.file_id
    }

    /// Fetch document name and version
    pub async fn fetch_file_meta(&self) -> Result<FileMeta> {
        let response: FileMetaResponse = self
            .get_json(&format!("/v1/files/{}/meta", self.credentials.file_id))
            .await?;
        Ok(response.file)
    }

    /// Fetch all local variables of the file
    pub async fn fetch_local_variables(&self) -> Result<VariablesMeta> {
        let response: LocalVariablesResponse = self
            .get_json(&format!(
                "/v1/files/{}/variables/local",
                self.credentials.file_id
            ))
            .await?;
        if response.error {
            return Err(FigmaClientError::MalformedResponse(
                "variables response flagged error=true".to_string(),
            ));
        }
        Ok(response.meta)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(url.as_str())
            .header("X-Figma-Token", &self.credentials.access_token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FigmaClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| FigmaClientError::MalformedResponse(format!("{e} in {path}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_from_env() {
        // Env access is process-global; keep every case in one test.
        std::env::set_var(FILE_ID_ENV, "FILE123");
        std::env::set_var(TOKEN_ENV, "secret");
        let credentials = FigmaCredentials::from_env().unwrap();
        assert_eq!(credentials.file_id, "FILE123");
        assert_eq!(credentials.access_token, "secret");

        std::env::remove_var(TOKEN_ENV);
        let err = FigmaCredentials::from_env().unwrap_err();
        assert!(err.to_string().contains(TOKEN_ENV));

        std::env::remove_var(FILE_ID_ENV);
        let err = FigmaCredentials::from_env().unwrap_err();
        assert!(matches!(err, FigmaClientError::CredentialsMissing(_)));
    }

    #[test]
    fn test_credentials_missing_lists_both_vars() {
        // from_env is covered indirectly; the error text itself is the
        // contract users see.
        let err = FigmaClientError::CredentialsMissing(format!("{FILE_ID_ENV} and {TOKEN_ENV}"));
        let message = err.to_string();
        assert!(message.contains("FIGMA_FILE_ID"));
        assert!(message.contains("FIGMA_TOKEN"));
        assert!(message.contains("--file-id"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = FigmaClient::with_base_url(
            FigmaCredentials::new("FILE123", "token"),
            "http://localhost:9999/",
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_variable_value_deserializes_alias() {
        let json = r#"{"type": "VARIABLE_ALIAS", "id": "VariableID:1:23"}"#;
        let value: FigmaVariableValue = serde_json::from_str(json).unwrap();
        assert!(matches!(value, FigmaVariableValue::Alias { .. }));
    }

    #[test]
    fn test_variable_value_deserializes_color() {
        let json = r#"{"r": 0.23, "g": 0.51, "b": 0.96, "a": 1.0}"#;
        let value: FigmaVariableValue = serde_json::from_str(json).unwrap();
        match value {
            FigmaVariableValue::Color { r, a, .. } => {
                assert!((r - 0.23).abs() < f64::EPSILON);
                assert!((a - 1.0).abs() < f64::EPSILON);
            }
            other => panic!("expected color, got {other:?}"),
        }
    }

    #[test]
    fn test_variable_value_deserializes_number_and_text() {
        let number: FigmaVariableValue = serde_json::from_str("16.0").unwrap();
        assert!(matches!(number, FigmaVariableValue::Number(_)));

        let text: FigmaVariableValue = serde_json::from_str("\"Inter\"").unwrap();
        assert!(matches!(text, FigmaVariableValue::Text(_)));
    }
}
