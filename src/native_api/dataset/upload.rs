use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json;

use crate::file::uploadfile::UploadFile;
use crate::{
    client::{evaluate_response, BaseClient},
    identifier::Identifier,
    request::RequestType,
    response::Response,
};

/// The `jsonData` part sent along with file uploads and replacements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadBody {
    /// A free-text description of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The directory label the file is stored under in the dataset
    #[serde(rename = "directoryLabel", skip_serializing_if = "Option::is_none")]
    pub directory_label: Option<String>,

    /// Whether an existing file may be replaced in place
    #[serde(rename = "forceReplace", skip_serializing_if = "Option::is_none")]
    pub force_replace: Option<bool>,
}

/// The payload returned by the file upload and replace endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// The files affected by the operation
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}

/// One file entry of an [`UploadResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// The display label of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// The directory label of the file
    #[serde(rename = "directoryLabel", skip_serializing_if = "Option::is_none")]
    pub directory_label: Option<String>,

    /// The stored data file with its identifiers
    #[serde(rename = "dataFile", skip_serializing_if = "Option::is_none")]
    pub data_file: Option<DataFileMeta>,
}

/// The stored representation of an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataFileMeta {
    /// The database id of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The stored filename
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// The MD5 checksum computed by the installation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
}

/// Uploads a file to a dataset identified by either a persistent identifier (PID)
/// or a numeric ID.
///
/// This asynchronous function sends a POST request to the API endpoint designated
/// for adding files to a dataset. It sets up the request context for a multipart
/// request, including the streamed file and the optional `jsonData` metadata part.
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `id` - An `Identifier` enum instance representing the dataset to upload to.
/// * `file` - The `UploadFile` to transfer.
/// * `body` - An optional `UploadBody` with the description and directory label.
///
/// # Returns
///
/// A `Result` wrapping a `Response<UploadResponse>` with the outcome of the
/// upload operation, or a `String` error message on failure.
pub async fn upload_file_to_dataset(
    client: &BaseClient,
    id: &Identifier,
    file: UploadFile,
    body: Option<UploadBody>,
) -> Result<Response<UploadResponse>, String> {
    // Endpoint metadata
    let path = match id {
        Identifier::PersistentId(_) => "api/datasets/:persistentId/add".to_string(),
        Identifier::Id(id) => format!("api/datasets/{}/add", id),
    };

    // Build hash maps for the request
    let file: HashMap<String, UploadFile> = HashMap::from([("file".to_string(), file)]);
    let body = assemble_upload_body(body);

    // Build the request context
    let context = RequestType::Multipart {
        bodies: body,
        files: Some(file),
    };

    let response = send_file_upload_request(client, id, path, context).await;

    evaluate_response::<UploadResponse>(response).await
}

/// Assembles the upload body for a file upload request.
///
/// If a body is provided, it is serialized to JSON and wrapped in a HashMap
/// with the key "jsonData".
pub(crate) fn assemble_upload_body<T: Serialize>(
    body: Option<T>,
) -> Option<HashMap<String, String>> {
    body.as_ref().map(|b| {
        HashMap::from([(
            "jsonData".to_string(),
            serde_json::to_string(&b).expect("upload body is always serializable"),
        )])
    })
}

/// Sends a file upload request to the API.
///
/// This asynchronous function handles the details of sending a POST request to
/// upload a file, taking into account the type of identifier used (persistent
/// ID or numeric ID).
pub(crate) async fn send_file_upload_request(
    client: &BaseClient,
    id: &Identifier,
    path: String,
    context: RequestType,
) -> Result<reqwest::Response, reqwest::Error> {
    match id {
        Identifier::PersistentId(id) => {
            client
                .post(
                    path.as_str(),
                    Some(HashMap::from([("persistentId".to_string(), id.clone())])),
                    context,
                )
                .await
        }
        Identifier::Id(_) => client.post(path.as_str(), None, context).await,
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use lazy_static::lazy_static;

    use super::*;

    lazy_static! {
        static ref MOCK_SERVER: MockServer = MockServer::start();
    }

    fn upload_response_body() -> serde_json::Value {
        serde_json::json!({
            "status": "OK",
            "data": {
                "files": [
                    {
                        "label": "file.txt",
                        "dataFile": {"id": 7, "filename": "file.txt"}
                    }
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_upload_file_to_dataset_with_pid() {
        // Arrange
        let client = BaseClient::new(&MOCK_SERVER.base_url(), None).unwrap();

        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("file.txt");
        std::fs::write(&file_path, "content").unwrap();

        let mock = MOCK_SERVER.mock(|when, then| {
            when.method(POST)
                .path("/api/datasets/:persistentId/add")
                .query_param("persistentId", "doi:10.5072/FK2/UPLOAD");
            then.status(200).json_body(upload_response_body());
        });

        // Act
        let response = upload_file_to_dataset(
            &client,
            &Identifier::PersistentId("doi:10.5072/FK2/UPLOAD".to_string()),
            UploadFile::from_path(&file_path).unwrap(),
            None,
        )
        .await
        .expect("Failed to upload file to dataset");

        // Assert
        assert!(response.status.is_ok());
        let file = &response.data.unwrap().files[0];
        assert_eq!(file.data_file.as_ref().unwrap().id, Some(7));

        mock.assert();
    }

    #[tokio::test]
    async fn test_upload_file_to_dataset_with_id() {
        // Arrange
        let client = BaseClient::new(&MOCK_SERVER.base_url(), None).unwrap();

        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("file.txt");
        std::fs::write(&file_path, "content").unwrap();

        let mock = MOCK_SERVER.mock(|when, then| {
            when.method(POST).path("/api/datasets/42/add");
            then.status(200).json_body(upload_response_body());
        });

        // Act
        let response = upload_file_to_dataset(
            &client,
            &Identifier::Id(42),
            UploadFile::from_path(&file_path).unwrap(),
            Some(UploadBody {
                description: Some("raw data".to_string()),
                directory_label: Some("data".to_string()),
                force_replace: None,
            }),
        )
        .await
        .expect("Failed to upload file to dataset");

        // Assert
        assert!(response.status.is_ok());

        mock.assert();
    }

    #[test]
    fn test_assemble_upload_body_wraps_json_data() {
        let body = UploadBody {
            description: Some("raw data".to_string()),
            directory_label: Some("data".to_string()),
            force_replace: None,
        };

        let assembled = assemble_upload_body(Some(body)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&assembled["jsonData"]).unwrap();

        assert_eq!(json["description"], "raw data");
        assert_eq!(json["directoryLabel"], "data");
        assert!(json.get("forceReplace").is_none());
    }

    #[test]
    fn test_assemble_upload_body_without_body() {
        assert!(assemble_upload_body::<UploadBody>(None).is_none());
    }
}
