//! Declared record types and the typed instances validated against them.
//!
//! A [`RecordType`] is a fixed, ordered list of typed fields. Validating a
//! mapped [`Record`] against it yields a [`Model`]: the declared fields in
//! declared order (coerced to their types) plus an explicit `extra` map that
//! holds every pass-through key the type does not declare.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

use crate::{
    error::{Error, Result},
    value::{FieldType, Record, Value},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type", default = "FieldSpec::default_type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldSpec {
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            default: None,
        }
    }

    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: true,
            ..Self::optional(name, field_type)
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    const fn default_type() -> FieldType {
        FieldType::String
    }

    /// Blank input (absent, null or the empty placeholder) falls back to the
    /// default; a required field without one rejects it.
    fn resolve(&self, record_type: &str, raw: Option<Value>) -> Result<Value> {
        let value = match raw {
            Some(value) if !value.is_blank() => value,
            raw => match (&self.default, raw) {
                (Some(default), _) => default.clone(),
                (None, Some(Value::String(_))) if self.required => {
                    return Err(Error::validation(
                        record_type,
                        Some(&self.name),
                        "is required but was empty",
                    ));
                }
                (None, _) if self.required => {
                    return Err(Error::validation(record_type, Some(&self.name), "is required"));
                }
                (None, raw) => raw.unwrap_or_default(),
            },
        };
        self.field_type
            .coerce(value)
            .map_err(|message| Error::validation(record_type, Some(&self.name), message))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordType {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

impl RecordType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, replacing an earlier declaration of the same name in place.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Coerces a target-keyed record into a [`Model`]. Undeclared keys are kept as extras.
    pub fn validate(&self, mut raw: Record) -> Result<Model> {
        let mut values = IndexMap::with_capacity(self.fields.len());
        for spec in &self.fields {
            let value = spec.resolve(&self.name, raw.shift_remove(&spec.name))?;
            values.insert(spec.name.clone(), value);
        }
        Ok(Model { values, extra: raw })
    }

    pub(crate) fn ensure_valid(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("record type name must not be empty".to_string()));
        }
        for (idx, spec) in self.fields.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(Error::Config(format!(
                    "record type '{}' field {} has an empty name",
                    self.name,
                    idx + 1
                )));
            }
            if let Some(default) = &spec.default {
                spec.field_type.coerce(default.clone()).map_err(|message| {
                    Error::Config(format!(
                        "record type '{}' field '{}' default {message}",
                        self.name, spec.name
                    ))
                })?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A validated record: declared fields in declared order, then pass-through extras.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    values: IndexMap<String, Value>,
    extra: Record,
}

impl Model {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field).or_else(|| self.extra.get(field))
    }

    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub fn extra(&self) -> &Record {
        &self.extra
    }

    pub fn to_record(&self) -> Record {
        self.values
            .iter()
            .chain(self.extra.iter())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub(crate) fn matches(&self, criteria: &[(&str, Value)]) -> bool {
        criteria
            .iter()
            .all(|(field, expected)| self.get(field).unwrap_or(&Value::Null) == expected)
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len() + self.extra.len()))?;
        for (key, value) in self.values.iter().chain(self.extra.iter()) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
