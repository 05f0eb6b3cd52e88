//! File-related CLI commands
//!
//! This module provides commands for managing stored files, currently the
//! in-place replacement of a file's content.

use std::path::PathBuf;

use structopt::StructOpt;
use tokio::runtime::Runtime;

use crate::client::BaseClient;
use crate::file::UploadFile;
use crate::native_api::dataset::upload::UploadBody;
use crate::native_api::file::replace::replace_file;

use super::base::{evaluate_and_print_response, Matcher};

/// Subcommands for managing files in a Dataverse instance
#[derive(StructOpt, Debug)]
#[structopt(about = "Handle files of the Dataverse instance")]
pub enum FileSubCommand {
    /// Replace the content of a stored file
    #[structopt(about = "Replace a file in a dataset")]
    Replace {
        #[structopt(long, short, help = "Identifier of the file to replace")]
        id: i64,

        #[structopt(help = "Path to the replacement file")]
        path: PathBuf,

        #[structopt(long, short, help = "Directory label to store the file under")]
        dv_dir: Option<String>,

        #[structopt(long, help = "Description of the file")]
        description: Option<String>,
    },
}

impl Matcher for FileSubCommand {
    fn process(self, client: &BaseClient) {
        let runtime = Runtime::new().expect("Failed to create a tokio runtime");

        match self {
            FileSubCommand::Replace {
                id,
                path,
                dv_dir,
                description,
            } => {
                let file = UploadFile::from_path(&path).expect("Failed to read the file");
                let body = UploadBody {
                    description,
                    directory_label: dv_dir,
                    force_replace: Some(true),
                };
                let response = runtime.block_on(replace_file(client, id, file, Some(body)));
                evaluate_and_print_response(response);
            }
        }
    }
}
