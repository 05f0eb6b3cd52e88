//! The dataset aggregate
//!
//! A [`Dataset`] owns an ordered map of metadata blocks, the list of file
//! entries queued for transfer, and the persistent identifier assigned by
//! the installation after the first successful upload.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::datafile::{collect_directory, DataFile};
use crate::error::DataverseError;
use crate::metadata::export;
use crate::metadata::object::MetadataBlock;
use crate::metadata::serialize;
use crate::metadata::validate;

/// The fields every dataset must carry before it is accepted for upload.
///
/// Paths address a metadata block by name followed by the snake_case
/// attribute trail; numeric indices of repeated elements are ignored
/// during validation.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "citation/title",
    "citation/author/name",
    "citation/dataset_contact/name",
    "citation/dataset_contact/email",
    "citation/ds_description/value",
    "citation/subject",
];

/// A dataset assembled from metadata blocks and file entries.
#[derive(Debug, Default)]
pub struct Dataset {
    /// Registered metadata blocks, keyed by block name in insertion order
    metadatablocks: IndexMap<String, Box<dyn MetadataBlock>>,

    /// Files queued for upload or replacement
    pub files: Vec<DataFile>,

    /// The persistent identifier, set once by the first successful upload
    pub p_id: Option<String>,
}

impl Dataset {
    pub fn new() -> Self {
        Dataset::default()
    }

    /// Registers a metadata block under its block name.
    ///
    /// Adding a block with a name that is already registered replaces the
    /// previous instance.
    pub fn add_metadatablock(&mut self, block: impl MetadataBlock + 'static) {
        self.metadatablocks
            .insert(block.block_name().to_string(), Box::new(block));
    }

    /// Returns a registered block by name.
    pub fn metadatablock(&self, name: &str) -> Option<&dyn MetadataBlock> {
        self.metadatablocks.get(name).map(|block| block.as_ref())
    }

    /// Returns the names of all registered blocks, in insertion order.
    pub fn metadatablock_names(&self) -> Vec<&str> {
        self.metadatablocks.keys().map(String::as_str).collect()
    }

    /// Adds a single file to the dataset.
    ///
    /// The filename is the basename of `local_path`. An entry that equals
    /// an existing one in filename, local path, directory, and
    /// description is rejected.
    pub fn add_file(
        &mut self,
        local_path: impl Into<PathBuf>,
        dv_dir: &str,
        description: &str,
    ) -> Result<(), DataverseError> {
        let file = DataFile::from_path(local_path, dv_dir, description);

        if self.files.contains(&file) {
            return Err(DataverseError::DuplicateFile {
                filename: file.filename,
            });
        }

        self.files.push(file);
        Ok(())
    }

    /// Ingests a directory tree into the dataset.
    ///
    /// See [`crate::datafile`] for the hidden/ignore filtering rules. A
    /// collected file whose filename is already registered re-points the
    /// existing entry to the new local path instead of appending a
    /// duplicate, so re-ingesting after local changes keeps the file list
    /// stable.
    pub fn add_directory(
        &mut self,
        dirpath: impl AsRef<Path>,
        dv_dir: &str,
        include_hidden: bool,
        ignores: &[String],
    ) -> Result<(), DataverseError> {
        let collected = collect_directory(dirpath.as_ref(), dv_dir, include_hidden, ignores)?;

        for file in collected {
            match self
                .files
                .iter_mut()
                .find(|existing| existing.filename == file.filename)
            {
                Some(existing) => existing.local_path = file.local_path,
                None => self.files.push(file),
            }
        }

        Ok(())
    }

    /// Re-points a registered file to a new local path.
    ///
    /// The new content is transferred on the next update.
    pub fn replace_file(
        &mut self,
        filename: &str,
        local_path: impl Into<PathBuf>,
    ) -> Result<(), DataverseError> {
        match self.files.iter_mut().find(|file| file.filename == filename) {
            Some(file) => {
                file.local_path = Some(local_path.into());
                Ok(())
            }
            None => Err(DataverseError::UnknownFile {
                filename: filename.to_string(),
            }),
        }
    }

    /// Checks every required field path and fails once with the full list
    /// of missing ones.
    ///
    /// A path addressing an unregistered block is a hard error and raised
    /// immediately; missing or empty values are collected across all
    /// paths first.
    pub fn validate(&self) -> Result<(), DataverseError> {
        let mut failing = Vec::new();

        for path in REQUIRED_FIELDS {
            let (block_name, field_path) = path.split_once('/').unwrap_or((path, ""));

            let block = self.metadatablocks.get(block_name).ok_or_else(|| {
                DataverseError::UnknownBlock {
                    block: block_name.to_string(),
                    available: self.metadatablocks.keys().cloned().collect(),
                }
            })?;

            if !validate::required_field_present(block.as_object(), field_path) {
                failing.push(path.to_string());
            }
        }

        if failing.is_empty() {
            Ok(())
        } else {
            Err(DataverseError::MissingRequired { paths: failing })
        }
    }

    /// Builds the dataset-level wire envelope
    /// `{ "datasetVersion": { "metadataBlocks": { ... } } }`.
    pub fn dataverse_value(&self) -> Value {
        let mut version = Map::new();
        version.insert(
            "metadataBlocks".to_string(),
            self.metadata_blocks_value(),
        );

        let mut envelope = Map::new();
        envelope.insert("datasetVersion".to_string(), Value::Object(version));
        Value::Object(envelope)
    }

    /// Builds the bare `datasetVersion` body used by metadata updates.
    pub fn dataset_version_value(&self) -> Value {
        let mut version = Map::new();
        version.insert(
            "metadataBlocks".to_string(),
            self.metadata_blocks_value(),
        );
        Value::Object(version)
    }

    fn metadata_blocks_value(&self) -> Value {
        let mut blocks = Map::new();

        for block in self.metadatablocks.values() {
            if let Value::Object(wrapped) = serialize::block_value(block.as_ref()) {
                blocks.extend(wrapped);
            }
        }

        Value::Object(blocks)
    }

    /// Returns the wire envelope as a JSON document, indented by two
    /// spaces.
    pub fn dataverse_json(&self) -> String {
        serde_json::to_string_pretty(&self.dataverse_value())
            .expect("wire value is always serializable")
    }

    /// Returns the generic dict form of the dataset: the per-block dict
    /// forms (empty blocks elided) plus the persistent identifier once
    /// one is assigned.
    pub fn to_value(&self) -> Value {
        let mut blocks = Map::new();

        for (name, block) in &self.metadatablocks {
            let value = export::to_value(block.as_object());
            let empty = value.as_object().map_or(true, |map| map.is_empty());

            if !empty {
                blocks.insert(name.clone(), value);
            }
        }

        let mut data = Map::new();
        data.insert("metadatablocks".to_string(), Value::Object(blocks));

        if let Some(p_id) = &self.p_id {
            data.insert("dataset_id".to_string(), Value::String(p_id.clone()));
        }

        Value::Object(data)
    }

    /// Returns the generic form as a JSON document, indented by two
    /// spaces.
    pub fn json(&self) -> String {
        serde_json::to_string_pretty(&self.to_value())
            .expect("metadata value is always serializable")
    }

    /// Returns the generic form as a YAML document in block style.
    pub fn yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.to_value())
    }

    /// Returns the generic form as an XML document rooted under
    /// `DatasetVersion`.
    pub fn xml(&self) -> String {
        let value = export::keys_to_camel(&self.to_value());
        export::unparse_xml("DatasetVersion", &value)
    }
}
