//! Field-level validation errors shared by every service.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};
use smallvec::SmallVec;

/// An ordered field → message map, rendered to clients as a JSON object.
///
/// Only the first message recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: SmallVec<[(String, String); 2]>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error map holding a single field.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.fields.push((field.to_string(), message.into()));
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }

            write!(f, "{field}: {message}")?;
            first = false;
        }

        Ok(())
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;

        for (field, message) in self.iter() {
            map.serialize_entry(field, message)?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_message_per_field() {
        let mut errors = ValidationErrors::new();

        errors.add("email", "Email not provided");
        errors.add("email", "Email already taken");

        assert_eq!(errors.get("email"), Some("Email not provided"));
        assert_eq!(errors.iter().count(), 1);
    }

    #[test]
    fn serializes_as_json_object_in_insertion_order() -> Result<(), serde_json::Error> {
        let mut errors = ValidationErrors::new();

        errors.add("username", "Username already taken");
        errors.add("email", "Email already taken");

        assert_eq!(
            serde_json::to_string(&errors)?,
            r#"{"username":"Username already taken","email":"Email already taken"}"#
        );

        Ok(())
    }

    #[test]
    fn empty_errors_are_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(ValidationErrors::single("cart", "no items in cart").into_result().is_err());
    }
}
