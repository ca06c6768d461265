//! Metadata record for a name badge.
//!
//! A `MetadataRecord` is built once per request from resolved domain data.
//! Invariants:
//! - `is_normalized` is computed once in `new` and never recomputed.
//! - `attributes` starts with Created Date, Length, Segment Length, Character
//!   Set in that order; `add_attribute` only appends.
//! - `background_image` / `mime_type` are only ever set when `is_normalized`.
//! - `image` and `image_url` always carry the same markup.

use std::fmt;
use std::str::FromStr;

use core_text::{Normalizer, TextError, is_normalized};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod attribute;
pub mod format;

pub use attribute::{Attribute, AttributeValue, DisplayType, build_attributes};

pub const DEFAULT_EXTERNAL_URL_BASE: &str = "https://dapp.monadns.com/name/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Text(#[from] TextError),
    #[error("unknown metadata version: {0}")]
    UnknownVersion(String),
}

/// Template variant the renderer must use. Closed set; parsing anything else fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    V1,
    V2,
}

impl Version {
    pub const ALL: [Version; 2] = [Version::V1, Version::V2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V1 => "v1",
            Version::V2 => "v2",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MetadataError::UnknownVersion(s.to_string()))
    }
}

/// Raw inputs for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataInit {
    pub name: String,
    pub description: Option<String>,
    /// Epoch seconds.
    pub created_date: i64,
    pub token_id: String,
    pub version: Version,
    pub last_request_date: Option<i64>,
    pub external_url_base: String,
}

impl MetadataInit {
    pub fn new(
        name: impl Into<String>,
        token_id: impl Into<String>,
        created_date: i64,
        version: Version,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            created_date,
            token_id: token_id.into(),
            version,
            last_request_date: None,
            external_url_base: DEFAULT_EXTERNAL_URL_BASE.to_string(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn last_request_date(mut self, epoch: i64) -> Self {
        self.last_request_date = Some(epoch);
        self
    }

    pub fn external_url_base(mut self, base: impl Into<String>) -> Self {
        self.external_url_base = base.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataRecord {
    #[serde(skip)]
    raw_name: String,
    #[serde(rename = "name")]
    display_name: String,
    description: String,
    attributes: Vec<Attribute>,
    image: String,
    image_url: String,
    is_normalized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_image: Option<String>,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    external_url: Option<String>,
    version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_request_date: Option<i64>,
}

impl MetadataRecord {
    /// Build a record. Unnormalizable names degrade to `is_normalized == false`;
    /// a name without a leading label fails with `EmptyLabel`.
    pub fn new(init: MetadataInit, normalizer: &dyn Normalizer) -> Result<Self, MetadataError> {
        let MetadataInit {
            name,
            description,
            created_date,
            token_id,
            version,
            last_request_date,
            external_url_base,
        } = init;

        let label = format::label(&name)?;
        let normalized = is_normalized(&name, normalizer);
        let display_name = format::display_name(&name, &token_id, normalized);
        let description =
            format::description(&name, &display_name, description.as_deref(), normalized);
        let attributes = build_attributes(created_date, label)?;
        let external_url = normalized.then(|| format!("{external_url_base}{name}"));
        debug!(
            target: "model",
            is_normalized = normalized,
            attributes = attributes.len(),
            %version,
            "metadata_record_built"
        );

        Ok(Self {
            raw_name: name,
            display_name,
            description,
            attributes,
            image: String::new(),
            image_url: String::new(),
            is_normalized: normalized,
            background_image: None,
            mime_type: None,
            external_url,
            version,
            last_request_date,
        })
    }

    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Name used for display and layout: the raw name or its obfuscated fallback.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn is_normalized(&self) -> bool {
        self.is_normalized
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn background_image(&self) -> Option<&str> {
        self.background_image.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn external_url(&self) -> Option<&str> {
        self.external_url.as_deref()
    }

    pub fn last_request_date(&self) -> Option<i64> {
        self.last_request_date
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Writes `image` and `image_url` together.
    pub fn set_image(&mut self, markup: impl Into<String>) {
        let markup = markup.into();
        self.image_url.clone_from(&markup);
        self.image = markup;
    }

    /// No-op unless the name is normalized. Returns whether the background was stored.
    pub fn set_background(&mut self, base64: impl Into<String>, mime_type: Option<String>) -> bool {
        if !self.is_normalized {
            return false;
        }
        self.background_image = Some(base64.into());
        self.mime_type = mime_type;
        true
    }
}
