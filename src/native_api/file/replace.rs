use crate::file::uploadfile::UploadFile;
use crate::native_api::dataset::upload::{assemble_upload_body, UploadBody, UploadResponse};
use crate::{
    client::{evaluate_response, BaseClient},
    request::RequestType,
    response::Response,
};

/// Replaces the content of a stored file.
///
/// This asynchronous function sends a POST request to the replace endpoint of
/// the file identified by its database id. It sets up the request context for
/// a multipart request, including the streamed replacement file and the
/// optional `jsonData` metadata part (description, directory label, force
/// flag).
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `id` - The database id of the file to replace.
/// * `file` - The `UploadFile` holding the new content.
/// * `body` - An optional `UploadBody` with replacement metadata.
///
/// # Returns
///
/// A `Result` wrapping a `Response<UploadResponse>` with the outcome of the
/// replace operation, or a `String` error message on failure.
pub async fn replace_file(
    client: &BaseClient,
    id: i64,
    file: UploadFile,
    body: Option<UploadBody>,
) -> Result<Response<UploadResponse>, String> {
    // Endpoint metadata
    let path = format!("api/files/{}/replace", id);

    // Build hash maps and body for the request
    let file = std::collections::HashMap::from([("file".to_string(), file)]);
    let body = assemble_upload_body(body);

    // Send request
    let context = RequestType::Multipart {
        bodies: body,
        files: Some(file),
    };

    let response = client.post(path.as_str(), None, context).await;

    evaluate_response::<UploadResponse>(response).await
}
