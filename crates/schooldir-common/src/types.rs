//! Core types shared between the storage layer and the service.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A registered school, exactly as stored in the `schools` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    /// Browser-resolvable path of the stored image, e.g. `/schoolImages/...`.
    pub image: String,
    pub email_id: String,
}

/// A validated school ready to be inserted.
///
/// Only [`crate::validation::Validator::validate`] produces values whose
/// fields satisfy the record constraints; the image path is filled in once the
/// upload has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image: String,
}

/// Summary echoed back after a successful create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchoolSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub image: String,
}

impl From<&School> for SchoolSummary {
    fn from(school: &School) -> Self {
        Self {
            id: school.id,
            name: school.name.clone(),
            city: school.city.clone(),
            state: school.state.clone(),
            image: school.image.clone(),
        }
    }
}

/// Optional list filters, combined with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchoolFilter {
    /// Case-insensitive substring of the name.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact city.
    #[serde(default)]
    pub city: Option<String>,
    /// Exact state.
    #[serde(default)]
    pub state: Option<String>,
}

impl SchoolFilter {
    /// Drop filter values that are empty or whitespace-only, trimming the rest.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            search: clean(self.search),
            city: clean(self.city),
            state: clean(self.state),
        }
    }
}

/// An uploaded image as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name supplied by the client.
    pub file_name: String,
    /// Declared MIME type, if any.
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// A raw create request before validation. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolSubmission {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    /// Free-form city used when `city` is the `Other` sentinel.
    pub custom_city: Option<String>,
    pub state: Option<String>,
    pub contact: Option<String>,
    pub email_id: Option<String>,
    pub image: Option<ImageUpload>,
}
