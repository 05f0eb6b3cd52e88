use std::collections::HashMap;
use std::error::Error;

use reqwest::multipart::Part;
use reqwest::{multipart, RequestBuilder};

use crate::file::uploadfile::UploadFile;
use crate::progress::setup_progress_log;

pub enum RequestType {
    /// A plain request with no body.
    Plain,

    /// A JSON request with a JSON body and the content type set to application/json.
    JSON { body: String },

    /// A multipart request with a body and files.
    Multipart {
        bodies: Option<HashMap<String, String>>,
        files: Option<HashMap<String, UploadFile>>,
    },
}

impl RequestType {
    /// Convert the request type to a request builder.
    ///
    /// # Arguments
    /// * `self` - The request type.
    /// * `request` - The request builder.
    ///
    /// # Returns
    /// A `Result` containing the modified request builder or an error.
    pub async fn to_request(
        self,
        request: RequestBuilder,
    ) -> Result<RequestBuilder, Box<dyn Error>> {
        match self {
            RequestType::Plain => Ok(request),
            RequestType::JSON { body } => Self::build_json_request(&body, request),
            RequestType::Multipart { files, bodies } => {
                Self::build_form_request(bodies, files, request).await
            }
        }
    }

    /// Build a JSON request.
    ///
    /// # Arguments
    /// * `body` - The JSON body as a string.
    /// * `request` - The request builder.
    ///
    /// # Returns
    /// A `Result` containing the modified request builder or an error.
    fn build_json_request(
        body: &str,
        request: RequestBuilder,
    ) -> Result<RequestBuilder, Box<dyn Error>> {
        Ok(request
            .header("Content-Type", "application/json")
            .body(body.to_owned()))
    }

    /// Build a multipart form request.
    ///
    /// # Arguments
    /// * `bodies` - Optional map of body parts.
    /// * `files` - Optional map of files to be uploaded.
    /// * `request` - The request builder.
    ///
    /// # Returns
    /// A `Result` containing the modified request builder or an error.
    async fn build_form_request(
        bodies: Option<HashMap<String, String>>,
        files: Option<HashMap<String, UploadFile>>,
        request: RequestBuilder,
    ) -> Result<RequestBuilder, Box<dyn Error>> {
        let mut form = multipart::Form::new();

        if let Some(bodies) = bodies {
            for (key, value) in bodies {
                form = form.part(key.clone(), Part::text(value.clone()));
            }
        }

        if let Some(files) = files {
            for (key, file) in files {
                let part = Self::assemble_file_part(file).await?;
                form = form.part(key, part);
            }
        }

        Ok(request.multipart(form))
    }

    /// Assemble a file part for a multipart form request.
    ///
    /// The file content is streamed with a progress bar attached, so
    /// transfers report incrementally.
    ///
    /// # Arguments
    /// * `file` - The file to be uploaded.
    ///
    /// # Returns
    /// A `Result` containing the file part or an error.
    async fn assemble_file_part(file: UploadFile) -> Result<Part, Box<dyn Error>> {
        let name = file.name.clone();
        let pb = setup_progress_log(file.size, &file.name);
        let body = file.create_body(pb).await?;

        Part::stream(body)
            .file_name(name)
            .mime_str("application/octet-stream")
            .map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use reqwest::Client;

    use super::*;

    /// Test converting a plain request type to a request builder.
    #[tokio::test]
    async fn test_request_type_to_request_plain() {
        // Arrange
        let request = RequestType::Plain
            .to_request(Client::new().request(reqwest::Method::GET, "http://localhost"))
            .await
            .expect("Could not convert request");

        // Act
        let request = request.build().expect("Could not build request");

        assert_eq!(request.url().as_str(), "http://localhost/");
        assert_eq!(request.method(), reqwest::Method::GET);
    }

    /// Test converting a JSON request type to a request builder.
    #[tokio::test]
    async fn test_request_type_to_request_json() {
        // Arrange
        let request = RequestType::JSON {
            body: "{}".to_string(),
        }
        .to_request(Client::new().request(reqwest::Method::GET, "http://localhost"))
        .await
        .expect("Could not convert request");

        // Act
        let request = request.build().expect("Could not build request");

        // Assert
        assert_eq!(request.url().as_str(), "http://localhost/");
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request
                .body()
                .expect("Could not get body")
                .as_bytes()
                .expect("Could not get bytes"),
            "{}".as_bytes()
        );
        assert_eq!(
            request.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    /// Test converting a multipart form request type to a request builder.
    #[tokio::test]
    async fn test_request_type_to_request_form() {
        // Arrange
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("file.txt");
        std::fs::write(&file_path, "content").unwrap();

        let context = RequestType::Multipart {
            bodies: Some(HashMap::from([("body".to_string(), "{}".to_string())])),
            files: Some(HashMap::from([(
                "file".to_string(),
                UploadFile::from_path(&file_path).unwrap(),
            )])),
        };

        let request = context
            .to_request(Client::new().request(reqwest::Method::GET, "http://localhost"))
            .await
            .expect("Could not convert request");

        // Act
        let request = request.build().expect("Could not build request");

        // Assert
        assert_eq!(request.url().as_str(), "http://localhost/");
        assert_eq!(request.method(), reqwest::Method::GET);
        assert!(request
            .headers()
            .get("Content-Type")
            .expect("Content-Type not found")
            .to_str()
            .unwrap()
            .contains("multipart/form-data"));
        assert!(
            request.body().is_some(),
            "Body not found in request: {request:?}"
        );
    }
}
