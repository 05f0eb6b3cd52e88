//! Shared helpers for the unit tests

use crate::blocks::citation::{Author, Citation, DatasetContact, DsDescription, Subject};
use crate::dataset::Dataset;

/// Builds a citation block that satisfies every required field.
pub(crate) fn create_test_citation() -> Citation {
    Citation {
        title: Some("Solar measurements".to_string()),
        author: vec![Author {
            name: Some("Jane Doe".to_string()),
            ..Default::default()
        }],
        dataset_contact: vec![DatasetContact {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@doe.org".to_string()),
            ..Default::default()
        }],
        ds_description: vec![DsDescription {
            value: Some("Radiance time series".to_string()),
            ..Default::default()
        }],
        subject: vec![Subject::Physics],
        ..Default::default()
    }
}

/// Builds a dataset that passes validation.
pub(crate) fn create_test_dataset() -> Dataset {
    let mut dataset = Dataset::new();
    dataset.add_metadatablock(create_test_citation());
    dataset
}
