use std::collections::HashMap;

use crate::{
    client::{evaluate_response, BaseClient},
    request::RequestType,
    response::Response,
};

/// Updates the metadata of the draft version of a dataset.
///
/// This asynchronous function sends a PUT request to the draft-version
/// endpoint of the dataset identified by the given persistent identifier.
/// The body is the bare `datasetVersion` object (metadata blocks without
/// the outer envelope).
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `pid` - The persistent identifier of the dataset to update.
/// * `body` - The `datasetVersion` body as a string.
///
/// # Returns
///
/// A `Result` wrapping a `Response<serde_json::Value>` with the updated
/// version metadata, or a `String` error message on failure.
pub async fn update_dataset_metadata(
    client: &BaseClient,
    pid: &str,
    body: String,
) -> Result<Response<serde_json::Value>, String> {
    // Endpoint metadata
    let path = "api/datasets/:persistentId/versions/:draft";

    // Send request
    let parameters = Some(HashMap::from([(
        "persistentId".to_string(),
        pid.to_string(),
    )]));
    let context = RequestType::JSON { body };
    let response = client.put(path, parameters, context).await;

    evaluate_response::<serde_json::Value>(response).await
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
    async fn test_update_dataset_metadata() {
        // Arrange
        let client = BaseClient::new(&MOCK_SERVER.base_url(), None).unwrap();
        let dataset = create_test_dataset();
        let body = dataset.dataset_version_value().to_string();

        let mock = MOCK_SERVER.mock(|when, then| {
            when.method(PUT)
                .path("/api/datasets/:persistentId/versions/:draft")
                .query_param("persistentId", "doi:10.5072/FK2/UPDATE");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "data": {"versionState": "DRAFT"}
            }));
        });

        // Act
        let response = update_dataset_metadata(&client, "doi:10.5072/FK2/UPDATE", body)
            .await
            .expect("Failed to update dataset metadata");

        // Assert
        assert!(response.status.is_ok());

        mock.assert();
    }
}
