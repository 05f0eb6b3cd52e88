//! Upload and update orchestration
//!
//! Drives a [`Dataset`] against an installation: validation gates every
//! network call, metadata goes first, then files are transferred
//! sequentially in list order. The first failing transfer aborts the
//! remaining batch; transfers that already succeeded are not rolled back,
//! so the remote draft reflects whatever completed.

use crate::client::BaseClient;
use crate::datafile::DataFile;
use crate::dataset::Dataset;
use crate::error::DataverseError;
use crate::file::uploadfile::UploadFile;
use crate::identifier::Identifier;
use crate::native_api::dataset::create::create_dataset;
use crate::native_api::dataset::edit::update_dataset_metadata;
use crate::native_api::dataset::upload::{upload_file_to_dataset, UploadBody, UploadResponse};
use crate::native_api::file::replace::replace_file;
use crate::response::Response;

/// Creates the dataset in the given collection and transfers its files.
///
/// Validation runs before anything is sent, so metadata problems never
/// leave partial remote state. On success the persistent identifier
/// reported by the installation is stored on the dataset (and returned),
/// and every transferred file receives its remote file id.
pub async fn upload_dataset(
    client: &BaseClient,
    dataset: &mut Dataset,
    collection: &str,
) -> Result<String, DataverseError> {
    dataset.validate()?;

    let response = create_dataset(client, collection, dataset.dataverse_json())
        .await
        .map_err(|message| DataverseError::transport("Dataset creation", collection, message))?;

    if response.status.is_err() {
        return Err(DataverseError::transport(
            "Dataset creation",
            collection,
            response.message_text(),
        ));
    }

    let pid = response
        .data
        .and_then(|data| data.persistent_id)
        .ok_or_else(|| {
            DataverseError::transport(
                "Dataset creation",
                collection,
                "No persistent identifier in response",
            )
        })?;

    dataset.p_id = Some(pid.clone());

    upload_new_files(client, &pid, &mut dataset.files).await?;

    Ok(pid)
}

/// Updates the draft version of an already-uploaded dataset.
///
/// Requires a persistent identifier from a previous upload. Metadata is
/// written first; afterwards files with a remote id have their content
/// replaced and files without one are uploaded as new. Entries without a
/// local path are skipped in both loops.
pub async fn update_dataset(
    client: &BaseClient,
    dataset: &mut Dataset,
) -> Result<(), DataverseError> {
    dataset.validate()?;

    let pid = dataset
        .p_id
        .clone()
        .ok_or(DataverseError::MissingIdentifier)?;

    let body = dataset.dataset_version_value().to_string();
    let response = update_dataset_metadata(client, &pid, body)
        .await
        .map_err(|message| DataverseError::transport("Metadata update", &pid, message))?;

    if response.status.is_err() {
        return Err(DataverseError::transport(
            "Metadata update",
            &pid,
            response.message_text(),
        ));
    }

    replace_existing_files(client, &mut dataset.files).await?;
    upload_new_files(client, &pid, &mut dataset.files).await?;

    Ok(())
}

/// Transfers every file that has no remote id yet, in list order.
async fn upload_new_files(
    client: &BaseClient,
    pid: &str,
    files: &mut [DataFile],
) -> Result<(), DataverseError> {
    let id = Identifier::PersistentId(pid.to_string());

    for file in files.iter_mut() {
        if file.file_id.is_some() {
            continue;
        }

        let Some(local_path) = file.local_path.clone() else {
            continue;
        };

        let upload = UploadFile::with_name(&local_path, &file.filename)
            .map_err(|error| {
                DataverseError::transport("File upload", &file.filename, error.to_string())
            })?;

        let response = upload_file_to_dataset(client, &id, upload, Some(upload_body(file, false)))
            .await
            .map_err(|message| {
                DataverseError::transport("File upload", &file.filename, message)
            })?;

        if response.status.is_err() {
            return Err(DataverseError::transport(
                "File upload",
                &file.filename,
                response.message_text(),
            ));
        }

        file.file_id = reported_file_id(&response);
    }

    Ok(())
}

/// Replaces the content of every file that already has a remote id.
async fn replace_existing_files(
    client: &BaseClient,
    files: &mut [DataFile],
) -> Result<(), DataverseError> {
    for file in files.iter_mut() {
        let Some(file_id) = file.file_id else {
            continue;
        };

        let Some(local_path) = file.local_path.clone() else {
            continue;
        };

        let upload = UploadFile::with_name(&local_path, &file.filename)
            .map_err(|error| {
                DataverseError::transport("File replacement", &file.filename, error.to_string())
            })?;

        let response = replace_file(client, file_id, upload, Some(upload_body(file, true)))
            .await
            .map_err(|message| {
                DataverseError::transport("File replacement", &file.filename, message)
            })?;

        if response.status.is_err() {
            return Err(DataverseError::transport(
                "File replacement",
                &file.filename,
                response.message_text(),
            ));
        }

        // A replacement stores a new data file under a new id
        if let Some(new_id) = reported_file_id(&response) {
            file.file_id = Some(new_id);
        }
    }

    Ok(())
}

fn upload_body(file: &DataFile, force_replace: bool) -> UploadBody {
    UploadBody {
        description: match file.description.is_empty() {
            true => None,
            false => Some(file.description.clone()),
        },
        directory_label: match file.dv_dir.is_empty() {
            true => None,
            false => Some(file.dv_dir.clone()),
        },
        force_replace: force_replace.then_some(true),
    }
}

fn reported_file_id(response: &Response<UploadResponse>) -> Option<i64> {
    response
        .data
        .as_ref()?
        .files
        .first()?
        .data_file
        .as_ref()?
        .id
}
