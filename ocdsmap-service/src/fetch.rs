//! Schema retrieval.
//!
//! The release schema is expected to be already patched with extension
//! schemas; it may live on disk or behind an HTTP(S) URL. Fetch failures are
//! fatal and happen before any output file exists.

use crate::generator::{GeneratorError, GeneratorResult};
use ocdsmap_core::MappingError;
use serde_json::Value;
use tracing::info;

/// Load a JSON schema from a local path or an HTTP(S) URL.
///
/// # Errors
/// Fails on unreachable URLs, non-2xx responses, unreadable files, and
/// invalid JSON.
pub async fn load_schema(source: &str) -> GeneratorResult<Value> {
    if source.starts_with("http://") || source.starts_with("https://") {
        info!(url = source, "fetching schema");
        let response = reqwest::get(source)
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| GeneratorError::fetch(source, err))?;
        response
            .json()
            .await
            .map_err(|err| GeneratorError::fetch(source, err))
    } else {
        info!(path = source, "reading schema");
        let text = tokio::fs::read_to_string(source).await?;
        let schema = serde_json::from_str(&text).map_err(MappingError::from)?;
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"properties": {{}}}}"#).unwrap();
        let schema = load_schema(file.path().to_str().unwrap()).await.unwrap();
        assert!(schema.get("properties").is_some());
    }

    #[tokio::test]
    async fn test_invalid_json_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = load_schema(file.path().to_str().unwrap()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        assert!(load_schema("/no/such/schema.json").await.is_err());
    }
}
