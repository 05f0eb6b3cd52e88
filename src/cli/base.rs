//! Base functionality for the Dataverse CLI
//!
//! This module provides core utilities and traits used across the CLI including:
//! - Response handling and printing
//! - File parsing for JSON/YAML bodies
//! - Common traits for command processing

use std::error::Error;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::BaseClient;
use crate::response::Response;

/// Evaluates an API response and prints the result or error message
///
/// # Arguments
/// * `response` - The Result containing either a Response<T> or error string
///
/// # Type Parameters
/// * `T` - The type of data contained in a successful response
pub fn evaluate_and_print_response<T: Serialize>(response: Result<Response<T>, String>) {
    match response {
        Ok(response) => {
            response.print_result();
        }
        Err(e) => {
            println!("Error: {}", e);
        }
    }
}

/// Parses a JSON or YAML file into the specified type
///
/// # Arguments
/// * `path` - Path to the file to parse
///
/// # Type Parameters
/// * `P` - The path-like type for the file path
/// * `T` - The target type to deserialize into
///
/// # Returns
/// * `Ok(T)` - Successfully parsed file contents
/// * `Err` - File reading or parsing error
pub fn parse_file<P, T>(path: P) -> Result<T, Box<dyn Error>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path)?;

    if let Ok(content) = serde_json::from_str(&content) {
        Ok(content)
    } else if let Ok(content) = serde_yaml::from_str(&content) {
        Ok(content)
    } else {
        Err("Failed to parse the file as either JSON or YAML".into())
    }
}

/// Trait for processing CLI subcommands
///
/// Implementors define how to handle their specific subcommand variant
/// using the provided API client.
pub trait Matcher {
    /// Process this subcommand using the given client
    ///
    /// # Arguments
    /// * `client` - The BaseClient for making API requests
    fn process(self, client: &BaseClient);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_accepts_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, r#"{"key": "value"}"#).unwrap();

        let value: serde_json::Value = parse_file(&path).unwrap();
        assert_eq!(value["key"], "value");
    }

    #[test]
    fn test_parse_file_accepts_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.yaml");
        std::fs::write(&path, "key: value\n").unwrap();

        let value: serde_json::Value = parse_file(&path).unwrap();
        assert_eq!(value["key"], "value");
    }
}
