use crate::error::{ConsoleError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw form input: field identifier → string value.
///
/// Absent fields read as the empty string, mirroring an untouched input box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValues {
    fields: BTreeMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (k, v) in pairs {
            form.set(k, v);
        }
        form
    }

    /// Builder-style `set` that skips `None`, for optional CLI flags.
    pub fn with(mut self, field: &str, value: Option<impl Into<String>>) -> Self {
        if let Some(v) = value {
            self.set(field, v);
        }
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// A field counts as filled when it holds something other than whitespace.
    pub fn is_filled(&self, field: &str) -> bool {
        !self.get(field).trim().is_empty()
    }

    /// Clear every field, as a form reset does.
    pub fn reset(&mut self) {
        self.fields.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|v| v.is_empty())
    }

    /// Parse one `key=value` assignment. The value may itself contain `=`.
    pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| ConsoleError::InvalidField(raw.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ConsoleError::InvalidField(raw.to_string()));
        }
        Ok((key.to_string(), value.to_string()))
    }

    /// Apply a list of `key=value` assignments on top of the current values.
    pub fn extend_assignments<S: AsRef<str>>(&mut self, raw: &[S]) -> Result<()> {
        for item in raw {
            let (k, v) = Self::parse_assignment(item.as_ref())?;
            self.set(k, v);
        }
        Ok(())
    }
}
