use std::collections::HashMap;

use atty::Stream;
use colored::Colorize;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::Client;
use reqwest::Url;
use serde::Deserialize;

use crate::request::RequestType;
use crate::response::Response;

#[derive(Debug, Clone)]
pub struct BaseClient {
    base_url: Url,
    api_token: Option<String>,
    client: Client,
}

impl BaseClient {
    pub(crate) fn has_api_token(&self) -> bool {
        self.api_token.is_some()
    }
}

// This is the base client that will be used to make requests to the API.
// It acts as a wrapper around the reqwest::Client and provides methods
// to make GET, POST, and PUT requests.
impl BaseClient {
    pub fn new(base_url: &str, api_token: Option<&String>) -> Result<Self, reqwest::Error> {
        let base_url = Url::parse(base_url).unwrap_or_else(|_| {
            panic!("'{base_url}' is not a valid URL");
        });
        let default_headers = Self::default_headers(api_token);

        // Create a client with increased timeouts for large file uploads
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300)) // 5-minute timeout
            .connect_timeout(std::time::Duration::from_secs(60)) // 1-minute connect timeout
            .pool_idle_timeout(std::time::Duration::from_secs(90)) // Keep connections alive longer
            .pool_max_idle_per_host(10)
            .default_headers(default_headers)
            .build()?;

        Ok(BaseClient {
            base_url,
            api_token: api_token.map(|s| s.to_owned().to_string()),
            client,
        })
    }

    fn default_headers(api_token: Option<&String>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(api_token) = api_token {
            headers.insert(
                "X-Dataverse-key",
                api_token.parse().expect("Failed to parse API token"),
            );
        }

        // Add the default headers
        headers.insert("Connection", HeaderValue::from_static("keep-alive"));
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        headers.insert("User-Agent", HeaderValue::from_static("easydataverse/0.1.0"));
        headers.insert(
            "Accept-Encoding",
            HeaderValue::from_static("gzip, deflate, br, zstd"),
        );

        headers
    }

    /// Get the base URL of the client
    ///
    /// # Returns
    ///
    /// A reference to the base URL of the client
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get(
        &self,
        path: &str,
        parameters: Option<HashMap<String, String>>,
        context: RequestType,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.perform_request(reqwest::Method::GET, path, parameters, context)
            .await
    }

    pub async fn post(
        &self,
        path: &str,
        parameters: Option<HashMap<String, String>>,
        context: RequestType,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.perform_request(reqwest::Method::POST, path, parameters, context)
            .await
    }

    pub async fn put(
        &self,
        path: &str,
        parameters: Option<HashMap<String, String>>,
        context: RequestType,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.perform_request(reqwest::Method::PUT, path, parameters, context)
            .await
    }

    async fn perform_request(
        &self,
        method: reqwest::Method,
        path: &str,
        parameters: Option<HashMap<String, String>>,
        context: RequestType,
    ) -> Result<reqwest::Response, reqwest::Error> {
        // Process the URL and build the request based on the context
        let url = self
            .base_url
            .join(path)
            .unwrap_or_else(|_| panic!("Failed to join '{path}' onto the base URL"));

        // If the DEBUG environment variable is set, print the URL
        if std::env::var("DEBUG").is_ok() {
            print_call(url.to_string());
        }

        let request = context
            .to_request(self.client.request(method, url.clone()))
            .await
            .expect("Failed to build request");

        let request = match parameters {
            Some(parameters) => request.query(&parameters),
            None => request,
        };

        request.send().await
    }
}

// Helper function to evaluate a response
pub async fn evaluate_response<T>(
    response: Result<reqwest::Response, reqwest::Error>,
) -> Result<Response<T>, String>
where
    T: for<'de> Deserialize<'de>,
{
    // Check if the response is an error
    let response = match response {
        Ok(response) => response,
        Err(err) => {
            print_error(err.to_string());
            return Err(err.to_string());
        }
    };

    // Try to read the response into the response struct
    let raw_content = response.text().await.map_err(|err| err.to_string())?;
    let json = serde_json::from_str::<Response<T>>(&raw_content);

    match json {
        Ok(json) => Ok(json),
        Err(err) => {
            let message = format!("{} - {}", err, raw_content);
            print_error(message.clone());
            Err(message)
        }
    }
}

pub(crate) fn print_error(error: String) {
    println!("\n{} {}\n", "Error:".red().bold(), error,);
}

fn print_call(url: String) {
    if atty::is(Stream::Stdout) {
        println!("{}: {}", "Calling".to_string().blue().bold(), url);
    }
}
