use serde::{Deserialize, Serialize};

use crate::{
    client::{evaluate_response, BaseClient},
    request::RequestType,
    response::Response,
};

/// The payload returned by the dataset creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDatasetResponse {
    /// The database id of the created dataset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The persistent identifier assigned to the dataset
    #[serde(rename = "persistentId", skip_serializing_if = "Option::is_none")]
    pub persistent_id: Option<String>,
}

/// Creates a dataset in a collection.
///
/// This asynchronous function sends a POST request to the dataset creation
/// endpoint of the given collection. The body is the full Dataverse JSON
/// envelope of the dataset (`datasetVersion` with its metadata blocks).
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `collection` - The alias of the collection the dataset is created in.
/// * `body` - The Dataverse JSON envelope as a string.
///
/// # Returns
///
/// A `Result` wrapping a `Response<CreateDatasetResponse>` carrying the
/// identifiers of the created dataset, or a `String` error message on failure.
pub async fn create_dataset(
    client: &BaseClient,
    collection: &str,
    body: String,
) -> Result<Response<CreateDatasetResponse>, String> {
    // Endpoint metadata
    let path = format!("api/dataverses/{}/datasets", collection);

    // Send request
    let context = RequestType::JSON { body };
    let response = client.post(path.as_str(), None, context).await;

    evaluate_response::<CreateDatasetResponse>(response).await
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use lazy_static::lazy_static;

    use crate::test_utils::create_test_dataset;

    use super::*;

    lazy_static! {
        static ref MOCK_SERVER: MockServer = MockServer::start();
    }

    #[tokio::test]
    async fn test_create_dataset() {
        // Arrange
        let client = BaseClient::new(&MOCK_SERVER.base_url(), None).unwrap();
        let dataset = create_test_dataset();

        let mock = MOCK_SERVER.mock(|when, then| {
            when.method(POST).path("/api/dataverses/subcollection/datasets");
            then.status(201).json_body(serde_json::json!({
                "status": "OK",
                "data": {"id": 42, "persistentId": "doi:10.5072/FK2/ABC123"}
            }));
        });

        // Act
        let response = create_dataset(&client, "subcollection", dataset.dataverse_json())
            .await
            .expect("Failed to create dataset");

        // Assert
        assert!(response.status.is_ok());
        let data = response.data.unwrap();
        assert_eq!(data.id, Some(42));
        assert_eq!(data.persistent_id.as_deref(), Some("doi:10.5072/FK2/ABC123"));

        mock.assert();
    }

    #[tokio::test]
    async fn test_create_dataset_error_status() {
        // Arrange
        let client = BaseClient::new(&MOCK_SERVER.base_url(), None).unwrap();
        let dataset = create_test_dataset();

        let mock = MOCK_SERVER.mock(|when, then| {
            when.method(POST).path("/api/dataverses/denied/datasets");
            then.status(403).json_body(serde_json::json!({
                "status": "ERROR",
                "message": "User is not permitted to create a dataset"
            }));
        });

        // Act
        let response = create_dataset(&client, "denied", dataset.dataverse_json())
            .await
            .expect("Failed to parse error response");

        // Assert
        assert!(response.status.is_err());
        assert!(response.message_text().contains("not permitted"));

        mock.assert();
    }
}
