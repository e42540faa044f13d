use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Metadata for a generic uploaded file, stored in redb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Surrogate key assigned by the store
    pub id: u64,
    /// Client-supplied name, stored verbatim
    pub filename: String,
    /// Generated UUID; also the blob name
    pub identifier: String,
}

/// A file record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFile {
    pub filename: String,
    pub identifier: String,
}

impl NewFile {
    /// Describe an upload of `filename` under a freshly generated identifier.
    pub fn generate(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            identifier: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub(crate) fn with_id(self, id: u64) -> FileRecord {
        FileRecord {
            id,
            filename: self.filename,
            identifier: self.identifier,
        }
    }
}

/// A paper: bibliographic metadata plus one stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub link: String,
    pub author: String,
    /// Generated UUID plus the original file extension
    pub stored_file_name: String,
    pub publication_date: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaper {
    pub title: String,
    pub description: String,
    pub abstract_text: String,
    pub link: String,
    pub author: String,
    pub stored_file_name: String,
    pub publication_date: DateTime<FixedOffset>,
}

impl NewPaper {
    pub(crate) fn with_id(self, id: u64) -> PaperRecord {
        PaperRecord {
            id,
            title: self.title,
            description: self.description,
            abstract_text: self.abstract_text,
            link: self.link,
            author: self.author,
            stored_file_name: self.stored_file_name,
            publication_date: self.publication_date,
        }
    }
}
