use std::collections::HashMap;

use crate::{
    client::{evaluate_response, BaseClient},
    identifier::Identifier,
    request::RequestType,
    response::Response,
};

/// Retrieves the metadata for a dataset identified by either a persistent
/// identifier or a numeric ID.
///
/// This asynchronous function constructs the appropriate API endpoint URL
/// based on the type of identifier provided and requests the latest
/// version the caller may see (`:draft` with an API token, `:latest`
/// otherwise).
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `id` - An `Identifier` enum instance, which can be either a `PersistentId(String)`
///          or an `Id(i64)`, representing the unique identifier of the dataset.
///
/// # Returns
///
/// A `Result` wrapping a `Response<serde_json::Value>` with the raw version
/// metadata, or a `String` error message on failure.
pub async fn get_dataset_meta(
    client: &BaseClient,
    id: &Identifier,
) -> Result<Response<serde_json::Value>, String> {
    let version = if client.has_api_token() {
        ":draft"
    } else {
        ":latest"
    };

    // Endpoint metadata
    let url = match id {
        Identifier::PersistentId(_) => format!("api/datasets/:persistentId/versions/{version}"),
        Identifier::Id(id) => format!("api/datasets/{id}/versions/{version}"),
    };

    // Send request
    let parameters = id_query_params(id);
    let context = RequestType::Plain;
    let response = client.get(url.as_str(), parameters, context).await;

    evaluate_response::<serde_json::Value>(response).await
}

/// Constructs query parameters based on the provided identifier.
///
/// This function generates a `HashMap` of query parameters if the identifier is a
/// persistent ID. If the identifier is a numeric ID, it returns `None`.
pub(crate) fn id_query_params(id: &Identifier) -> Option<HashMap<String, String>> {
    match id {
        Identifier::PersistentId(id) => {
            Some(HashMap::from([("persistentId".to_string(), id.clone())]))
        }
        Identifier::Id(_) => None,
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

    #[tokio::test]
    async fn test_get_dataset_meta_by_id() {
        // Arrange
        let client = BaseClient::new(&MOCK_SERVER.base_url(), None).unwrap();

        let mock = MOCK_SERVER.mock(|when, then| {
            when.method(GET).path("/api/datasets/42/versions/:latest");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "data": {"id": 42}
            }));
        });

        // Act
        let response = get_dataset_meta(&client, &Identifier::Id(42))
            .await
            .expect("Failed to get dataset metadata");

        // Assert
        assert!(response.status.is_ok());

        mock.assert();
    }

    #[tokio::test]
    async fn test_get_dataset_meta_by_persistent_id_uses_draft_with_token() {
        // Arrange
        let token = "00000000-0000-0000-0000-000000000000".to_string();
        let client = BaseClient::new(&MOCK_SERVER.base_url(), Some(&token)).unwrap();

        let mock = MOCK_SERVER.mock(|when, then| {
            when.method(GET)
                .path("/api/datasets/:persistentId/versions/:draft")
                .query_param("persistentId", "doi:10.5072/FK2/META");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "data": {"versionState": "DRAFT"}
            }));
        });

        // Act
        let response = get_dataset_meta(
            &client,
            &Identifier::PersistentId("doi:10.5072/FK2/META".to_string()),
        )
        .await
        .expect("Failed to get dataset metadata");

        // Assert
        assert!(response.status.is_ok());

        mock.assert();
    }
}
