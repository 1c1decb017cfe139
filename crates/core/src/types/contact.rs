//! The `Contact` entity and its write payload.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ContactId;

/// Errors that can occur when validating a [`ContactInput`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are missing or empty.
    #[error("All fields are required")]
    MissingFields(Vec<ContactField>),
}

/// The client-supplied fields of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    FirstName,
    LastName,
    Phone,
}

impl ContactField {
    /// All fields, in form order.
    pub const ALL: [Self; 3] = [Self::FirstName, Self::LastName, Self::Phone];

    /// The wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Phone => "phone",
        }
    }

    /// The human-readable form label of the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Phone => "Phone",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored contact.
///
/// `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// The contact's editable fields.
    #[must_use]
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
        }
    }

    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Write payload for creating or replacing a contact.
///
/// Every field is optional on the wire so that an absent field is reported
/// as a validation failure rather than a malformed body. Fields accept any
/// JSON scalar: numbers become text, and `null`, `false` and zero count as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default, deserialize_with = "lenient_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
}

/// Read a field value as text.
///
/// Strings are kept verbatim and numbers or `true` become their text form
/// (`5551212` is stored as `"5551212"`). `null`, `false` and zero count as
/// absent. Arrays and objects are rejected as a malformed body.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(LenientTextVisitor)
}

struct LenientTextVisitor;

impl<'de> serde::de::Visitor<'de> for LenientTextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(v.then(|| v.to_string()))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok((v != 0).then(|| v.to_string()))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok((v != 0).then(|| v.to_string()))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // NaN is falsy as well
        Ok((v != 0.0 && !v.is_nan()).then(|| v.to_string()))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl ContactInput {
    /// Build an input with all three fields present.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            phone: Some(phone.into()),
        }
    }

    /// Check that every field is present and non-empty.
    ///
    /// Values are kept exactly as supplied; no trimming or format checks.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` naming every field that is
    /// absent or empty.
    pub fn validate(self) -> Result<ContactFields, ValidationError> {
        let Self {
            first_name,
            last_name,
            phone,
        } = self;

        let missing: Vec<ContactField> = [
            (ContactField::FirstName, &first_name),
            (ContactField::LastName, &last_name),
            (ContactField::Phone, &phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(field, _)| field)
        .collect();

        match (first_name, last_name, phone) {
            (Some(first_name), Some(last_name), Some(phone)) if missing.is_empty() => {
                Ok(ContactFields {
                    first_name,
                    last_name,
                    phone,
                })
            }
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }
}

/// Validated contact fields: all present and non-empty.
///
/// Only obtainable through [`ContactInput::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactFields {
    first_name: String,
    last_name: String,
    phone: String,
}

impl ContactFields {
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Get the value of a single field.
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Phone => &self.phone,
        }
    }
}

impl From<ContactFields> for ContactInput {
    fn from(fields: ContactFields) -> Self {
        Self::new(fields.first_name, fields.last_name, fields.phone)
    }
}
