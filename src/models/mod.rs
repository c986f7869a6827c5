use crate::error::ListerError;
use aws_sdk_s3::types::Object;
use chrono::{DateTime, Utc};
use std::fmt;

/// One object from a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub key: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl FileRecord {
    /// Convert a provider entry. Entries without a key are dropped.
    pub fn from_object(object: Object) -> Option<Self> {
        let key = object.key?;
        let size = object.size.unwrap_or(0).max(0) as u64;
        let modified = object
            .last_modified
            .map(|d| DateTime::from_timestamp(d.secs(), d.subsec_nanos()).unwrap_or_default())
            .unwrap_or_default();

        Some(Self {
            key,
            size,
            modified,
        })
    }
}

/// First page of a bucket listing, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub records: Vec<FileRecord>,
    /// The provider has more objects than this page holds.
    pub truncated: bool,
}

/// A trimmed, non-empty bucket name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketName(String);

impl BucketName {
    pub fn parse(raw: &str) -> Result<Self, ListerError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ListerError::EmptyBucketName);
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
