//! Domain logic for the worlds service.
//!
//! Nothing in this crate performs I/O: it holds the shared id/timestamp
//! types, the domain error, the TBW metadata extractor and the field
//! resolution policies applied to upload and update requests.

pub mod error;
pub mod fields;
pub mod tbw;
pub mod types;
pub mod world;
