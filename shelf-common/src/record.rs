//! Product listing records

use serde::{Deserialize, Serialize};

/// One product listing as supplied by a store
///
/// Both fields are required when deserializing; a listing without a title or
/// a supermarket is rejected rather than defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Title exactly as the store wrote it
    pub title: String,

    /// Store the listing came from
    pub supermarket: String,
}

impl Record {
    /// Create a new record
    pub fn new(title: impl Into<String>, supermarket: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            supermarket: supermarket.into(),
        }
    }
}
