use std::path::PathBuf;

use thiserror::Error;

/// The error taxonomy of the crate.
///
/// Schema and validation problems are raised before any network call is
/// made; transport problems carry the operation and identifier so a
/// caller can decide on manual recovery (partial remote state is not
/// rolled back).
#[derive(Debug, Error)]
pub enum DataverseError {
    /// A metadata block was referenced by a name that is not registered
    /// on the dataset.
    #[error("Metadatablock '{block}' is not present in the dataset. Registered blocks: {}", .available.join(", "))]
    UnknownBlock {
        block: String,
        available: Vec<String>,
    },

    /// One or more required fields are missing or empty. Collected across
    /// all required paths before being raised once.
    #[error("Required fields are missing or empty: {}. Please provide a value for these fields.", .paths.join(", "))]
    MissingRequired { paths: Vec<String> },

    /// The same file (by filename, local path, directory, and
    /// description) has already been added to the dataset.
    #[error("File '{filename}' has already been added to the dataset")]
    DuplicateFile { filename: String },

    /// A file was addressed by a name that is not registered on the
    /// dataset.
    #[error("File '{filename}' is not present in the dataset")]
    UnknownFile { filename: String },

    /// The directory handed to bulk ingestion does not exist or is not a
    /// directory.
    #[error("Directory at '{}' does not exist or is not a directory. Please provide a valid directory.", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// An update was requested for a dataset that has never been
    /// uploaded.
    #[error("Dataset has no persistent identifier. Upload it before updating.")]
    MissingIdentifier,

    /// The remote API rejected an operation or the connection failed.
    /// The batch is aborted at the first failing transfer.
    #[error("{operation} failed for '{identifier}': {message}")]
    Transport {
        operation: String,
        identifier: String,
        message: String,
    },
}

impl DataverseError {
    /// Builds a transport error from an operation, the identifier it
    /// targeted, and the server or connection message.
    pub fn transport(
        operation: impl Into<String>,
        identifier: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        DataverseError::Transport {
            operation: operation.into(),
            identifier: identifier.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_lists_every_path() {
        let error = DataverseError::MissingRequired {
            paths: vec!["citation/title".to_string(), "citation/subject".to_string()],
        };

        let message = error.to_string();
        assert!(message.contains("citation/title"));
        assert!(message.contains("citation/subject"));
    }

    #[test]
    fn test_unknown_block_names_available_blocks() {
        let error = DataverseError::UnknownBlock {
            block: "geospatial".to_string(),
            available: vec!["citation".to_string()],
        };

        let message = error.to_string();
        assert!(message.contains("geospatial"));
        assert!(message.contains("citation"));
    }

    #[test]
    fn test_transport_carries_operation_context() {
        let error = DataverseError::transport("create dataset", "demo", "418 I'm a teapot");
        let message = error.to_string();

        assert!(message.contains("create dataset"));
        assert!(message.contains("demo"));
        assert!(message.contains("teapot"));
    }
}
