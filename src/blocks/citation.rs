//! The standard citation metadata block
//!
//! This is the block every Dataverse installation ships and the one the
//! required-field gate operates on. Field idents follow the snake_case
//! attribute naming used across the generic formats; wire names follow
//! the installation schema.

use chrono::NaiveDate;

use crate::{controlled_vocabulary, metadata_object};

controlled_vocabulary! {
    /// Subject terms of the citation block.
    pub enum Subject {
        AgriculturalSciences => "Agricultural Sciences",
        ArtsAndHumanities => "Arts and Humanities",
        Astronomy => "Astronomy and Astrophysics",
        BusinessAndManagement => "Business and Management",
        Chemistry => "Chemistry",
        ComputerAndInformationScience => "Computer and Information Science",
        EarthAndEnvironmentalSciences => "Earth and Environmental Sciences",
        Engineering => "Engineering",
        Law => "Law",
        Mathematics => "Mathematical Sciences",
        MedicineHealthAndLifeSciences => "Medicine, Health and Life Sciences",
        Physics => "Physics",
        SocialSciences => "Social Sciences",
        Other => "Other",
    }
}

metadata_object! {
    /// An author of the dataset.
    pub struct Author {
        name: String = primitive "authorName",
        affiliation: String = primitive "authorAffiliation",
        identifier: String = primitive "authorIdentifier",
    }
}

metadata_object! {
    /// The point of contact for the dataset.
    pub struct DatasetContact {
        name: String = primitive "datasetContactName",
        affiliation: String = primitive "datasetContactAffiliation",
        email: String = primitive "datasetContactEmail",
    }
}

metadata_object! {
    /// A free-text description of the dataset.
    pub struct DsDescription {
        value: String = primitive "dsDescriptionValue",
        date: NaiveDate = primitive "dsDescriptionDate",
    }
}

metadata_object! {
    /// A keyword attached to the dataset.
    pub struct Keyword {
        value: String = primitive "keywordValue",
        vocabulary: String = primitive "keywordVocabulary",
        vocabulary_uri: String = primitive "keywordVocabularyURI",
    }
}

metadata_object! {
    /// The citation metadata block.
    pub struct Citation (block = "citation") {
        title: String = primitive "title",
        subtitle: String = primitive "subtitle",
        alternative_url: String = primitive "alternativeURL",
        author: Author = compound_list "author",
        dataset_contact: DatasetContact = compound_list "datasetContact",
        ds_description: DsDescription = compound_list "dsDescription",
        subject: Subject = vocabulary_list "subject",
        keyword: Keyword = compound_list "keyword",
        notes_text: String = primitive "notesText",
        depositor: String = primitive "depositor",
        date_of_deposit: NaiveDate = primitive "dateOfDeposit",
    }
}

impl Citation {
    /// Appends an author entry.
    pub fn add_author(&mut self, author: Author) {
        self.author.push(author);
    }

    /// Appends a contact entry.
    pub fn add_dataset_contact(&mut self, contact: DatasetContact) {
        self.dataset_contact.push(contact);
    }

    /// Appends a description entry.
    pub fn add_ds_description(&mut self, description: DsDescription) {
        self.ds_description.push(description);
    }

    /// Appends a keyword entry.
    pub fn add_keyword(&mut self, keyword: Keyword) {
        self.keyword.push(keyword);
    }
}

#[cfg(test)]
mod tests {
    use crate::metadata::export;
    use crate::metadata::object::{MetadataBlock, MetadataObject, ObjectSchema};

    use super::*;

    #[test]
    fn test_block_name() {
        assert_eq!(Citation::default().block_name(), "citation");
    }

    #[test]
    fn test_nested_compounds_are_not_blocks() {
        // Author only implements the object side of the metadata traits;
        // the wire engine must never wrap it at top level.
        let author = Author::default();
        assert_eq!(author.type_name(), "Author");
    }

    #[test]
    fn test_hydration_roundtrip_preserves_populated_fields() {
        let mut citation = Citation {
            title: Some("Solar measurements".to_string()),
            subject: vec![Subject::Physics, Subject::Other],
            ..Default::default()
        };
        citation.add_author(Author {
            name: Some("Jane Doe".to_string()),
            ..Default::default()
        });

        let json = export::to_json(&citation);
        let hydrated: Citation = export::from_json_str(&json).unwrap();

        assert_eq!(hydrated, citation);
    }

    #[test]
    fn test_yaml_hydration() {
        let yaml = "title: Solar measurements\nsubject:\n- Physics\n";
        let citation: Citation = export::from_yaml_str(yaml).unwrap();

        assert_eq!(citation.title.as_deref(), Some("Solar measurements"));
        assert_eq!(citation.subject, vec![Subject::Physics]);
        assert!(citation.author.is_empty());
    }

    #[test]
    fn test_schema_tree_lists_compound_children() {
        let rendered = Citation::schema().render();

        assert!(rendered.contains("Citation"));
        assert!(rendered.contains("author: Author [author, compound, multiple]"));
        assert!(rendered.contains("name: String [authorName, primitive, single]"));
        assert!(rendered.contains("subject: Subject [subject, controlledVocabulary, multiple]"));
    }
}
