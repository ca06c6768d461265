//! Metadata attributes (OpenSea-style traits).

use core_text::{TextError, character_set, code_point_length, segment_length};
use serde::Serialize;

pub const CREATED_DATE: &str = "Created Date";
pub const LENGTH: &str = "Length";
pub const SEGMENT_LENGTH: &str = "Segment Length";
pub const CHARACTER_SET: &str = "Character Set";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    Date,
    Number,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(i64),
    Text(String),
}

/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    trait_type: String,
    display_type: DisplayType,
    value: AttributeValue,
}

impl Attribute {
    pub fn new(
        trait_type: impl Into<String>,
        display_type: DisplayType,
        value: AttributeValue,
    ) -> Self {
        Self {
            trait_type: trait_type.into(),
            display_type,
            value,
        }
    }

    pub fn date(trait_type: impl Into<String>, epoch_millis: i64) -> Self {
        Self::new(trait_type, DisplayType::Date, AttributeValue::Number(epoch_millis))
    }

    pub fn number(trait_type: impl Into<String>, value: i64) -> Self {
        Self::new(trait_type, DisplayType::Number, AttributeValue::Number(value))
    }

    pub fn text(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(trait_type, DisplayType::String, AttributeValue::Text(value.into()))
    }

    pub fn trait_type(&self) -> &str {
        &self.trait_type
    }

    pub fn display_type(&self) -> DisplayType {
        self.display_type
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }
}

/// Fixed-order attributes: Created Date, Length, Segment Length, Character Set.
/// `created_date` is epoch seconds; the attribute carries epoch milliseconds.
pub fn build_attributes(created_date: i64, label: &str) -> Result<Vec<Attribute>, TextError> {
    let length = code_point_length(label)?;
    let segments = segment_length(label)?;
    Ok(vec![
        Attribute::date(CREATED_DATE, created_date.saturating_mul(1000)),
        Attribute::number(LENGTH, length as i64),
        Attribute::number(SEGMENT_LENGTH, segments as i64),
        Attribute::text(CHARACTER_SET, character_set(label).as_str()),
    ])
}
