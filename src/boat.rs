//! Boat catalog domain types.
//!
//! These are the values the widgets hold for the duration of a render or edit
//! cycle. The catalog store owns the records; everything here is a copy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable, unique boat identifier
pub type BoatId = String;

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// A boat record as returned by the list query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    pub id: BoatId,
    pub name: String,
    pub boat_type_id: Option<String>,
    pub length: f64,
    pub price: f64,
    pub description: String,
    pub picture: String,
    pub geolocation: Option<Geolocation>,
}

/// A boat type, used as the results filter key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoatType {
    pub id: String,
    pub name: String,
}

/// A single renderable point on the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapMarker {
    pub location: Geolocation,
}

/// Fields that can be requested from the record-fetch facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordField {
    Name,
    Length,
    Price,
    Description,
    Picture,
    Latitude,
    Longitude,
}

/// Field values returned by a record fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordData {
    pub fields: HashMap<RecordField, serde_json::Value>,
}

impl RecordData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: RecordField, value: serde_json::Value) -> Self {
        self.fields.insert(field, value);
        self
    }

    /// Numeric value of a field; `None` when absent, null or not a number
    pub fn number(&self, field: RecordField) -> Option<f64> {
        self.fields.get(&field).and_then(serde_json::Value::as_f64)
    }

    pub fn text(&self, field: RecordField) -> Option<&str> {
        self.fields.get(&field).and_then(serde_json::Value::as_str)
    }
}

/// How a grid column is parsed and displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Currency,
}

/// Editable columns of the results grid, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoatField {
    Name,
    Length,
    Price,
    Description,
}

impl BoatField {
    pub const ALL: [BoatField; 4] = [Self::Name, Self::Length, Self::Price, Self::Description];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Length => "Length",
            Self::Price => "Price",
            Self::Description => "Description",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Name | Self::Description => FieldKind::Text,
            Self::Length => FieldKind::Number,
            Self::Price => FieldKind::Currency,
        }
    }

    pub fn is_editable(self) -> bool {
        true
    }

    /// Display value of this column for a boat
    pub fn display(self, boat: &Boat) -> String {
        match self {
            Self::Name => boat.name.clone(),
            Self::Length => format_number(boat.length),
            Self::Price => format_currency(boat.price),
            Self::Description => boat.description.clone(),
        }
    }
}

impl fmt::Display for BoatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error raised when a grid cell input cannot be turned into a field value
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct FieldParseError {
    pub field: BoatField,
    pub reason: String,
}

/// A partial boat record holding unsaved grid edits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoatDraft {
    pub id: BoatId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BoatDraft {
    pub fn new(id: impl Into<BoatId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.length.is_none() && self.price.is_none() && self.description.is_none()
    }

    /// Parse raw cell input for `field` and store it in this draft
    pub fn set_field(&mut self, field: BoatField, raw: &str) -> Result<(), FieldParseError> {
        match field.kind() {
            FieldKind::Text => {
                let value = raw.trim().to_string();
                match field {
                    BoatField::Name => self.name = Some(value),
                    _ => self.description = Some(value),
                }
            }
            FieldKind::Number | FieldKind::Currency => {
                let value = parse_amount(field, raw)?;
                match field {
                    BoatField::Length => self.length = Some(value),
                    _ => self.price = Some(value),
                }
            }
        }
        Ok(())
    }

    pub fn has_field(&self, field: BoatField) -> bool {
        match field {
            BoatField::Name => self.name.is_some(),
            BoatField::Length => self.length.is_some(),
            BoatField::Price => self.price.is_some(),
            BoatField::Description => self.description.is_some(),
        }
    }

    /// Overlay the drafted values on top of a boat
    pub fn apply_to(&self, boat: &mut Boat) {
        if let Some(name) = &self.name {
            boat.name = name.clone();
        }
        if let Some(length) = self.length {
            boat.length = length;
        }
        if let Some(price) = self.price {
            boat.price = price;
        }
        if let Some(description) = &self.description {
            boat.description = description.clone();
        }
    }
}

fn parse_amount(field: BoatField, raw: &str) -> Result<f64, FieldParseError> {
    let cleaned: String = raw.trim().chars().filter(|c| !matches!(c, '$' | ',' | '_')).collect();
    let value: f64 = cleaned.parse().map_err(|_| FieldParseError {
        field,
        reason: format!("'{}' is not a number", raw.trim()),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(FieldParseError {
            field,
            reason: "must be a non-negative number".to_string(),
        });
    }
    Ok(value)
}

/// Format a plain number, dropping a trailing `.0`
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Format a currency amount as `$1,234.50`
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}
