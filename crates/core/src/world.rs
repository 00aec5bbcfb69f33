//! Field resolution policies for world uploads and updates.
//!
//! Uploads and updates are resolved differently on purpose:
//!
//! - [`resolve_upload`] requires `name` and `tbw`, then fills `version`,
//!   `author` and `image` from the request, falling back to metadata found
//!   in the TBW payload and finally to the defaults below.
//! - [`resolve_patch`] copies every supplied field verbatim. No metadata
//!   extraction, no defaults, no emptiness checks.

use crate::error::CoreError;
use crate::fields::{is_truthy, to_text, truthy_field, FieldMap};
use crate::tbw::{self, TbwMetadata};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name used in not-found errors.
pub const ENTITY: &str = "world";

pub const DEFAULT_VERSION: &str = "0";
pub const DEFAULT_AUTHOR: &str = "unknown";
pub const DEFAULT_IMAGE: &str = "";

pub const FIELD_NAME: &str = "name";
pub const FIELD_TBW: &str = "tbw";
pub const FIELD_FEATURED: &str = "featured";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_AUTHOR: &str = "author";
pub const FIELD_IMAGE: &str = "image";

const MSG_UPLOAD_REQUIRED: &str = "name and tbw are required";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A fully resolved upload, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldUpload {
    pub name: String,
    pub tbw: String,
    pub featured: bool,
    pub version: String,
    pub author: String,
    pub image: String,
}

/// Fields an update overwrites. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldPatch {
    pub name: Option<String>,
    pub tbw: Option<String>,
    pub featured: Option<bool>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
}

impl WorldPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// Upload resolution
// ---------------------------------------------------------------------------

/// Resolve an upload request body.
///
/// `name` and `tbw` must both be present and truthy. Each of `version`,
/// `author` and `image` resolves as: explicit truthy request value, then the
/// value extracted from the TBW payload, then the hardcoded default.
pub fn resolve_upload(fields: &FieldMap) -> Result<WorldUpload, CoreError> {
    let (Some(name), Some(tbw_value)) = (
        truthy_field(fields, FIELD_NAME),
        truthy_field(fields, FIELD_TBW),
    ) else {
        return Err(CoreError::Validation(MSG_UPLOAD_REQUIRED.into()));
    };

    let tbw = to_text(tbw_value);
    let TbwMetadata {
        author,
        version,
        image,
    } = tbw::extract_metadata(&tbw);

    Ok(WorldUpload {
        name: to_text(name),
        featured: fields.get(FIELD_FEATURED).is_some_and(is_truthy),
        version: explicit_or(fields, FIELD_VERSION, version, DEFAULT_VERSION),
        author: explicit_or(fields, FIELD_AUTHOR, author, DEFAULT_AUTHOR),
        image: explicit_or(fields, FIELD_IMAGE, image, DEFAULT_IMAGE),
        tbw,
    })
}

fn explicit_or(fields: &FieldMap, key: &str, extracted: Option<String>, default: &str) -> String {
    truthy_field(fields, key)
        .map(to_text)
        .or(extracted)
        .unwrap_or_else(|| default.to_string())
}

// ---------------------------------------------------------------------------
// Update resolution
// ---------------------------------------------------------------------------

/// Resolve an update request body.
///
/// Every key present in the body is taken verbatim, even when empty.
/// `featured` takes the value's truthiness.
pub fn resolve_patch(fields: &FieldMap) -> WorldPatch {
    let text = |key: &str| fields.get(key).map(to_text);

    WorldPatch {
        name: text(FIELD_NAME),
        tbw: text(FIELD_TBW),
        featured: fields.get(FIELD_FEATURED).map(is_truthy),
        version: text(FIELD_VERSION),
        author: text(FIELD_AUTHOR),
        image: text(FIELD_IMAGE),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
