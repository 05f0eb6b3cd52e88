//! A Rust library for building, validating, and uploading Dataverse datasets.
//!
//! Metadata is modeled as typed objects with static field descriptors,
//! declared through the [`metadata_object!`] and [`controlled_vocabulary!`]
//! macros. Objects render into the Dataverse JSON wire format as well as
//! generic dict/JSON/YAML/XML forms, required fields are validated by
//! path before anything leaves the machine, and datasets with their files
//! are created and updated against the native API.

#![warn(unused_crate_dependencies)]

/// Client functionality for interacting with Dataverse APIs
pub mod client;

/// File entries queued for upload and directory ingestion
pub mod datafile;

/// The dataset aggregate: metadata blocks, files, persistent identifier
pub mod dataset;

/// The error taxonomy of the crate
pub mod error;

/// Types for handling Dataverse identifiers
pub mod identifier;

/// Progress tracking utilities
pub(crate) mod progress;

/// Types for making requests to Dataverse APIs
pub mod request;

/// Types for handling responses from Dataverse APIs
pub mod response;

/// Upload and update orchestration
pub mod uploader;

/// Declarative macros for metadata types
pub mod macros;

/// The metadata engine: descriptors, values, serialization, export, validation
pub mod metadata {
    pub use descriptor::{FieldDescriptor, TypeClass};
    pub use object::{MetadataBlock, MetadataObject, ObjectSchema};
    pub use value::{ControlledVocabulary, FieldValue, Scalar};

    /// Static per-field descriptors
    pub mod descriptor;
    /// Generic dict/JSON/YAML/XML exporters and hydration
    pub mod export;
    /// Core object traits and schema tree rendering
    pub mod object;
    /// The Dataverse wire serialization engine
    pub mod serialize;
    /// Required-field path validation
    pub mod validate;
    /// Runtime field values and scalar conversions
    pub mod value;
}

/// Metadata blocks shipped with the crate
pub mod blocks {
    /// The standard citation block
    pub mod citation;
}

/// File handling functionality
pub mod file {
    pub use uploadfile::UploadFile;

    /// File upload functionality
    pub(crate) mod uploadfile;
}

/// Native API functionality
pub mod native_api {
    /// Dataset operations
    pub mod dataset {
        pub use create::create_dataset;
        pub use edit::update_dataset_metadata;
        pub use metadata::get_dataset_meta;
        pub use upload::upload_file_to_dataset;

        /// Dataset creation
        pub mod create;
        /// Dataset metadata editing
        pub mod edit;
        /// Metadata retrieval
        pub mod metadata;
        /// File upload operations
        pub mod upload;
    }

    /// File operations
    pub mod file {
        pub use replace::replace_file;

        /// File replacement operations
        pub mod replace;
    }
}

/// Commonly used types and functions
pub mod prelude {
    pub use super::blocks::citation;
    pub use super::client::BaseClient;
    pub use super::datafile::DataFile;
    pub use super::dataset::Dataset;
    pub use super::error::DataverseError;
    pub use super::file::UploadFile;
    pub use super::identifier::Identifier;
    pub use super::metadata::{MetadataBlock, MetadataObject};
    pub use super::native_api::dataset;
    pub use super::native_api::file;
    pub use super::uploader::{update_dataset, upload_dataset};
}

/// Command-line interface functionality
pub mod cli {
    /// Authentication commands
    pub mod auth;
    /// Base CLI functionality
    pub mod base;
    /// Dataset commands
    pub mod dataset;
    /// File commands
    pub mod file;
}

/// Test utilities
#[cfg(test)]
mod test_utils;
