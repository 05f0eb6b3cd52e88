//! Authentication-related CLI commands and profile management
//!
//! This module provides functionality for:
//! - Managing authentication profiles with server URLs and API tokens
//! - Securely storing credentials in the system keyring
//! - Retrieving stored credentials for API requests

use colored::Colorize;
use keyring::{Entry, Result};
use reqwest::Url;
use structopt::StructOpt;

use crate::client::BaseClient;

use super::base::Matcher;

/// Subcommands for handling authentication in the Dataverse CLI
#[derive(StructOpt, Debug)]
#[structopt(about = "Handle authentication of the Dataverse CLI")]
pub enum AuthSubCommand {
    /// Set an authentication profile with a name, URL and token
    #[structopt(about = "Set the authentication profile")]
    Set {
        /// Name to identify this authentication profile
        #[structopt(short, long, help = "Name of the profile")]
        name: String,

        /// URL of the Dataverse server to authenticate against
        #[structopt(short, long, help = "URL of the Dataverse server")]
        url: String,

        /// API token used for authentication with the Dataverse server
        #[structopt(short, long, help = "API token for authentication")]
        token: String,
    },
}

/// Implementation of the Matcher trait for AuthSubCommand to process authentication commands
impl Matcher for AuthSubCommand {
    fn process(self, _client: &BaseClient) {
        match self {
            AuthSubCommand::Set { name, url, token } => match AuthProfile::new(name.clone(), url, token) {
                Ok(profile) => match profile.set_to_keyring() {
                    Ok(_) => {
                        println!(
                            "{} Profile '{}' saved successfully!",
                            "✅".bold(),
                            name.bold().green()
                        );
                        println!(
                            "   You can now use it with: {}",
                            format!("--profile {}", name).dimmed().italic()
                        );
                    }
                    Err(e) => {
                        println!(
                            "{} Failed to save profile to keyring: {}",
                            "❌".bold(),
                            e.to_string().red()
                        );
                    }
                },
                Err(e) => {
                    println!("{} Failed to create profile: {}", "❌".bold(), e.red());
                }
            },
        }
    }
}

/// A struct representing an authentication profile for the Dataverse CLI.
/// Contains a name for the profile, the Dataverse server URL, and an API token.
///
/// The AuthProfile provides methods for:
/// - Creating new profiles with validation
/// - Storing credentials securely in the system keyring
/// - Retrieving stored credentials
#[derive(Debug)]
pub struct AuthProfile {
    /// Name identifier for the profile
    name: String,
    /// URL of the Dataverse server
    url: String,
    /// API token for authentication
    token: String,
}

impl AuthProfile {
    /// Creates a new AuthProfile instance with validation of the URL.
    ///
    /// # Arguments
    /// * `name` - The name of the profile
    /// * `url` - The Dataverse server URL
    /// * `token` - The API token for authentication
    ///
    /// # Returns
    /// A Result containing either:
    /// - Ok(AuthProfile): A new validated AuthProfile instance
    /// - Err(String): An error message if validation fails
    pub fn new(name: String, url: String, token: String) -> std::result::Result<Self, String> {
        Url::parse(&url).map_err(|_| "Invalid URL format".to_string())?;

        Ok(AuthProfile { name, url, token })
    }

    /// Stores the profile credentials securely in the system keyring.
    ///
    /// The credentials are stored as a combined string in the format
    /// "url--token" under the profile name as the key.
    pub fn set_to_keyring(&self) -> Result<()> {
        let entry = Entry::new("edvcli", self.name.as_str())?;
        let combined = Self::combine_url_and_token(&self.url, &self.token);
        entry.set_password(combined.as_str())?;
        Ok(())
    }

    /// Retrieves profile credentials from the system keyring.
    ///
    /// # Arguments
    /// * `name` - The name of the profile to retrieve
    pub fn get_from_keyring(name: &str) -> Result<Self> {
        let entry = Entry::new("edvcli", name)?;
        let combined = entry.get_password()?;
        let (url, token) = Self::split_url_and_token(&combined);
        Ok(Self {
            name: name.to_string(),
            url,
            token,
        })
    }

    /// Combines the URL and token into a single string for storage.
    ///
    /// Uses "--" as a delimiter between URL and token since URLs cannot
    /// contain "--".
    fn combine_url_and_token(url: &str, token: &str) -> String {
        format!("{}--{}", url, token)
    }

    /// Splits a combined URL and token string back into separate components.
    fn split_url_and_token(combined: &str) -> (String, String) {
        match combined.split_once("--") {
            Some((url, token)) => (url.to_string(), token.to_string()),
            None => (combined.to_string(), String::new()),
        }
    }

    /// Returns the name of the authentication profile.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Returns the URL of the Dataverse server.
    pub fn get_url(&self) -> &str {
        &self.url
    }

    /// Returns the API token for authentication.
    pub fn get_token(&self) -> &str {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_rejects_invalid_url() {
        let profile = AuthProfile::new(
            "demo".to_string(),
            "not a url".to_string(),
            "token".to_string(),
        );
        assert!(profile.is_err());
    }

    #[test]
    fn test_combine_and_split_roundtrip() {
        let combined =
            AuthProfile::combine_url_and_token("https://demo.dataverse.org", "secret-token");
        let (url, token) = AuthProfile::split_url_and_token(&combined);

        assert_eq!(url, "https://demo.dataverse.org");
        assert_eq!(token, "secret-token");
    }
}
