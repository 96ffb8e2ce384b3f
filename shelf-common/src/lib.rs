//! # Shelf Common Library
//!
//! Shared code for the shelf tools including:
//! - Product title normalization
//! - Grouping of listings that describe the same product
//! - Record and group types
//! - Configuration loading
//! - Error types

pub mod config;
pub mod error;
pub mod grouping;
pub mod normalize;
pub mod record;

pub use error::{Error, Result};
pub use grouping::{group, Group, Grouper, GroupingSummary};
pub use normalize::{equality_key, normalize};
pub use record::Record;
