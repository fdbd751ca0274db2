//! Record-type and input-schema registry with schema auto-detection.
//!
//! The registry is explicit: built-in vendor tables are registered at start
//! (see [`crate::vendors`]) and callers may add their own, either in code or
//! from YAML definition files. Detection samples a single record and returns
//! the first schema, in detection order, whose required source keys are all
//! present. Detection order is descending priority, then registration order.

use std::{fs, path::Path, sync::Arc, sync::OnceLock};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    model::RecordType,
    schema::{InputSchema, SchemaDefinition},
    value::Record,
    vendors,
};

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    record_types: IndexMap<String, Arc<RecordType>>,
    schemas: IndexMap<String, Vec<Arc<InputSchema>>>,
}

/// Contents of a schema definition file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryDefinitions {
    #[serde(default)]
    pub record_types: Vec<RecordType>,
    #[serde(default)]
    pub schemas: Vec<SchemaDefinition>,
}

static BUILTIN: OnceLock<SchemaRegistry> = OnceLock::new();

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry holding the built-in vendor tables, ready to be extended.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        vendors::register_all(&mut registry).expect("built-in vendor tables are valid");
        registry
    }

    /// Process-wide registry of built-in vendor tables.
    pub fn builtin() -> &'static SchemaRegistry {
        BUILTIN.get_or_init(Self::with_builtins)
    }

    /// Registers (or replaces) the default record type for its name.
    pub fn register_record_type(&mut self, record_type: RecordType) -> Result<Arc<RecordType>> {
        record_type.ensure_valid()?;
        let record_type = Arc::new(record_type);
        debug!(
            "Registering record type '{}' with {} field(s)",
            record_type.name,
            record_type.fields.len()
        );
        self.record_types
            .insert(record_type.name.clone(), Arc::clone(&record_type));
        Ok(record_type)
    }

    /// Registers a schema variant. A variant with the same name for the same
    /// record type is replaced in place, keeping its registration position.
    pub fn register_schema(&mut self, schema: InputSchema) -> Result<Arc<InputSchema>> {
        if schema.fields().is_empty() {
            return Err(Error::Config(format!(
                "schema '{}' declares no fields",
                schema.name()
            )));
        }
        let schema = Arc::new(schema);
        debug!(
            "Registering input schema {} for '{}'",
            schema.display_name(),
            schema.record_type()
        );
        let variants = self
            .schemas
            .entry(schema.record_type().to_string())
            .or_default();
        match variants.iter_mut().find(|existing| existing.name() == schema.name()) {
            Some(existing) => *existing = Arc::clone(&schema),
            None => variants.push(Arc::clone(&schema)),
        }
        Ok(schema)
    }

    pub fn record_type(&self, name: &str) -> Option<Arc<RecordType>> {
        self.record_types.get(name).cloned()
    }

    /// Schema variants for `record_type` in registration order.
    pub fn schemas(&self, record_type: &str) -> &[Arc<InputSchema>] {
        self.schemas
            .get(record_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Looks a schema up by name, ignoring ASCII case.
    pub fn schema(&self, record_type: &str, name: &str) -> Option<Arc<InputSchema>> {
        self.schemas(record_type)
            .iter()
            .find(|schema| schema.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Every record type that has a registered class or at least one schema.
    pub fn record_type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.record_types.keys().map(String::as_str).collect();
        for name in self.schemas.keys() {
            if !self.record_types.contains_key(name) {
                names.push(name);
            }
        }
        names
    }

    /// Variants in the order detection tries them.
    pub fn detection_order(&self, record_type: &str) -> Vec<Arc<InputSchema>> {
        let mut ordered = self.schemas(record_type).to_vec();
        ordered.sort_by_key(|schema| std::cmp::Reverse(schema.priority()));
        ordered
    }

    /// Picks the first variant whose required source keys are all present in `sample`.
    pub fn detect(&self, sample: &Record, record_type: &str) -> Result<Arc<InputSchema>> {
        let ordered = self.detection_order(record_type);
        for schema in &ordered {
            if schema.matches(sample) {
                debug!(
                    "Detected input schema {} for '{record_type}'",
                    schema.display_name()
                );
                return Ok(Arc::clone(schema));
            }
            debug!(
                "Input schema {} rejected: missing {:?}",
                schema.display_name(),
                schema
                    .required_source_keys()
                    .into_iter()
                    .filter(|key| !sample.contains_key(*key))
                    .collect::<Vec<_>>()
            );
        }
        Err(Error::SchemaDetection {
            record_type: record_type.to_string(),
            candidates: ordered.iter().map(|s| s.display_name()).collect(),
        })
    }

    /// Merges record types and schemas from a YAML definition document.
    pub fn extend_from_yaml_str(&mut self, yaml: &str) -> Result<()> {
        let definitions: RegistryDefinitions = serde_yaml::from_str(yaml)?;
        self.extend(definitions)
    }

    pub fn extend(&mut self, definitions: RegistryDefinitions) -> Result<()> {
        for record_type in definitions.record_types {
            self.register_record_type(record_type)?;
        }
        for definition in definitions.schemas {
            self.register_schema(definition.into_schema()?)?;
        }
        Ok(())
    }

    pub fn load_definitions(&mut self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.extend_from_yaml_str(&contents)
    }
}
