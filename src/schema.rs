//! Input schemas: one vendor/format variant's field rules for a record type.
//!
//! An [`InputSchema`] is an ordered list of `(field, Mapping)` pairs built at
//! construction time. Its required source keys drive auto-detection in the
//! registry; field order only matters for display.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    mapping::{Mapping, MappingDefinition},
    model::RecordType,
    value::Record,
};

#[derive(Debug, Clone)]
pub struct InputSchema {
    name: String,
    family: Option<String>,
    record_type: String,
    priority: i32,
    fields: Vec<(String, Mapping)>,
}

impl InputSchema {
    pub fn builder(name: impl Into<String>, record_type: impl Into<String>) -> InputSchemaBuilder {
        InputSchemaBuilder {
            schema: InputSchema {
                name: name.into(),
                family: None,
                record_type: record_type.into(),
                priority: 0,
                fields: Vec::new(),
            },
        }
    }

    /// Schema that reads and writes every declared field under its own name.
    pub fn identity(record_type: &RecordType) -> Self {
        record_type
            .fields
            .iter()
            .fold(
                InputSchema::builder("Identity", record_type.name.clone()),
                |builder, spec| builder.field(spec.name.clone(), Mapping::identity()),
            )
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn fields(&self) -> &[(String, Mapping)] {
        &self.fields
    }

    /// `family(name)` when the schema belongs to a parser family, otherwise the bare name.
    pub fn display_name(&self) -> String {
        match &self.family {
            Some(family) => format!("{family}({})", self.name),
            None => self.name.clone(),
        }
    }

    pub fn required_source_keys(&self) -> IndexSet<&str> {
        self.fields
            .iter()
            .map(|(field, mapping)| mapping.effective_source_key(field))
            .collect()
    }

    pub fn target_keys(&self) -> IndexSet<&str> {
        self.fields
            .iter()
            .map(|(field, mapping)| mapping.effective_target_key(field))
            .collect()
    }

    /// True when every required source key is present in `sample`.
    pub fn matches(&self, sample: &Record) -> bool {
        self.required_source_keys()
            .iter()
            .all(|key| sample.contains_key(*key))
    }
}

impl fmt::Display for InputSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

pub struct InputSchemaBuilder {
    schema: InputSchema,
}

impl InputSchemaBuilder {
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.schema.family = Some(family.into());
        self
    }

    /// Higher priorities are tried first during detection.
    pub fn priority(mut self, priority: i32) -> Self {
        self.schema.priority = priority;
        self
    }

    /// Adds a field rule; redeclaring a field replaces its rule in place.
    pub fn field(mut self, name: impl Into<String>, mapping: Mapping) -> Self {
        let name = name.into();
        match self.schema.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = mapping,
            None => self.schema.fields.push((name, mapping)),
        }
        self
    }

    pub fn build(self) -> InputSchema {
        self.schema
    }
}

/// Serialized form of an input schema used by definition files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    pub record_type: String,
    #[serde(default)]
    pub priority: i32,
    pub fields: Vec<MappingDefinition>,
}

impl SchemaDefinition {
    pub fn into_schema(self) -> Result<InputSchema> {
        if self.name.trim().is_empty() {
            return Err(Error::Config(format!(
                "schema for record type '{}' has an empty name",
                self.record_type
            )));
        }
        if self.fields.is_empty() {
            return Err(Error::Config(format!(
                "schema '{}' declares no fields",
                self.name
            )));
        }
        let mut builder = InputSchema::builder(self.name, self.record_type).priority(self.priority);
        if let Some(family) = self.family {
            builder = builder.family(family);
        }
        for definition in self.fields {
            let (field, mapping) = definition.into_mapping()?;
            builder = builder.field(field, mapping);
        }
        Ok(builder.build())
    }
}
