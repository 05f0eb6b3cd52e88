//! Dataset-related CLI commands
//!
//! This module provides commands for dataset management tasks like:
//! - Creating and updating datasets from raw JSON/YAML bodies
//! - Retrieving dataset metadata
//! - Uploading files to a dataset

use std::path::PathBuf;

use structopt::StructOpt;
use tokio::runtime::Runtime;

use crate::client::BaseClient;
use crate::file::UploadFile;
use crate::identifier::Identifier;
use crate::native_api::dataset::create::create_dataset;
use crate::native_api::dataset::edit::update_dataset_metadata;
use crate::native_api::dataset::metadata::get_dataset_meta;
use crate::native_api::dataset::upload::{upload_file_to_dataset, UploadBody};

use super::base::{evaluate_and_print_response, parse_file, Matcher};

/// Subcommands for managing datasets in a Dataverse instance
#[derive(StructOpt, Debug)]
#[structopt(about = "Handle datasets of the Dataverse instance")]
pub enum DatasetSubCommand {
    /// Retrieve a dataset's metadata
    #[structopt(about = "Retrieve a datasets metadata")]
    Meta {
        #[structopt(help = "(Persistent) identifier of the dataset to retrieve")]
        id: Identifier,
    },

    /// Create a new dataset in a collection
    #[structopt(about = "Create a dataset")]
    Create {
        #[structopt(long, short, help = "Alias of the collection to create the dataset in")]
        collection: String,

        #[structopt(
            long,
            short,
            help = "Path to the JSON/YAML file containing the dataset body"
        )]
        body: PathBuf,
    },

    /// Update the draft metadata of a dataset
    #[structopt(about = "Update the metadata of a dataset")]
    Update {
        #[structopt(long, short, help = "Persistent identifier of the dataset to update")]
        pid: String,

        #[structopt(
            long,
            short,
            help = "Path to the JSON/YAML file containing the dataset version body"
        )]
        body: PathBuf,
    },

    /// Upload a file to a dataset
    #[structopt(about = "Upload a file to a dataset")]
    Upload {
        #[structopt(
            long,
            short,
            help = "(Persistent) Identifier of the dataset to upload the file to"
        )]
        id: Identifier,

        #[structopt(help = "Path to the file to upload")]
        path: PathBuf,

        #[structopt(long, short, help = "Directory label to store the file under")]
        dv_dir: Option<String>,

        #[structopt(long, help = "Description of the file")]
        description: Option<String>,
    },
}

impl Matcher for DatasetSubCommand {
    fn process(self, client: &BaseClient) {
        let runtime = Runtime::new().expect("Failed to create a tokio runtime");

        match self {
            DatasetSubCommand::Meta { id } => {
                let response = runtime.block_on(get_dataset_meta(client, &id));
                evaluate_and_print_response(response);
            }
            DatasetSubCommand::Create { collection, body } => {
                let body: serde_json::Value =
                    parse_file(&body).expect("Failed to parse the body file");
                let response =
                    runtime.block_on(create_dataset(client, &collection, body.to_string()));
                evaluate_and_print_response(response);
            }
            DatasetSubCommand::Update { pid, body } => {
                let body: serde_json::Value =
                    parse_file(&body).expect("Failed to parse the body file");
                let body = unwrap_dataset_version(body);
                let response =
                    runtime.block_on(update_dataset_metadata(client, &pid, body.to_string()));
                evaluate_and_print_response(response);
            }
            DatasetSubCommand::Upload {
                id,
                path,
                dv_dir,
                description,
            } => {
                let file = UploadFile::from_path(&path).expect("Failed to read the file");
                let body = UploadBody {
                    description,
                    directory_label: dv_dir,
                    force_replace: None,
                };
                let response =
                    runtime.block_on(upload_file_to_dataset(client, &id, file, Some(body)));
                evaluate_and_print_response(response);
            }
        }
    }
}

// Accept both the full envelope and the bare datasetVersion body
fn unwrap_dataset_version(body: serde_json::Value) -> serde_json::Value {
    match body.get("datasetVersion") {
        Some(version) => version.clone(),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_dataset_version_accepts_envelope() {
        let envelope = serde_json::json!({
            "datasetVersion": {"metadataBlocks": {}}
        });

        let unwrapped = unwrap_dataset_version(envelope);
        assert!(unwrapped.get("metadataBlocks").is_some());
    }

    #[test]
    fn test_unwrap_dataset_version_passes_bare_body_through() {
        let body = serde_json::json!({"metadataBlocks": {}});
        let unwrapped = unwrap_dataset_version(body.clone());
        assert_eq!(unwrapped, body);
    }
}
