//! Batch translation: schema detection, per-record mapping and validation.
//!
//! Construction resolves the record type and the input schema up front, so
//! an unknown record type or an undetectable schema fails before any record
//! is touched. Translation itself has partial-success semantics: a record
//! whose transform or validation fails is dropped with a [`Diagnostic`] and
//! the rest of the batch continues, in input order.

use std::{fmt, sync::Arc};

use log::{debug, info, warn};

use crate::{
    error::{Error, Result},
    mapper::DataMapper,
    model::RecordType,
    model_list::ModelList,
    registry::SchemaRegistry,
    schema::InputSchema,
    value::Record,
};

#[derive(Debug, Clone)]
pub struct Translator {
    record_type: Arc<RecordType>,
    mapper: DataMapper,
    raw_data: Option<Vec<Record>>,
}

/// A record dropped during translation, identified by its index in the input batch.
#[derive(Debug)]
pub struct Diagnostic {
    pub index: usize,
    pub error: Error,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}: {}", self.index, self.error)
    }
}

/// Result of translating one batch: the accepted models and what was dropped.
#[derive(Debug)]
pub struct Translation {
    pub models: ModelList,
    pub diagnostics: Vec<Diagnostic>,
}

impl Translation {
    pub fn accepted(&self) -> usize {
        self.models.len()
    }

    pub fn dropped(&self) -> usize {
        self.diagnostics.len()
    }
}

pub struct TranslatorBuilder<'r> {
    registry: &'r SchemaRegistry,
    record_type: String,
    record_type_class: Option<Arc<RecordType>>,
    raw_data: Option<Vec<Record>>,
    input_schema: Option<Arc<InputSchema>>,
    schema_name: Option<String>,
}

impl Translator {
    /// Starts a translator for `record_type` against the built-in registry.
    pub fn builder(record_type: impl Into<String>) -> TranslatorBuilder<'static> {
        TranslatorBuilder {
            registry: SchemaRegistry::builtin(),
            record_type: record_type.into(),
            record_type_class: None,
            raw_data: None,
            input_schema: None,
            schema_name: None,
        }
    }

    /// Registered record type, schema detected from the first record of `raw_data`.
    pub fn new(record_type: impl Into<String>, raw_data: Vec<Record>) -> Result<Self> {
        Self::builder(record_type).raw_data(raw_data).build()
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    pub fn input_schema(&self) -> &Arc<InputSchema> {
        self.mapper.schema()
    }

    /// Translates `batch`, or the batch captured at construction when `None`.
    pub fn translate(&self, batch: Option<&[Record]>) -> Result<ModelList> {
        self.translate_report(batch).map(|translation| translation.models)
    }

    /// Like [`Translator::translate`], also returning the dropped-record diagnostics.
    pub fn translate_report(&self, batch: Option<&[Record]>) -> Result<Translation> {
        let batch = match batch {
            Some(batch) => batch,
            None => self.raw_data.as_deref().ok_or(Error::MissingInput)?,
        };

        let mut models = Vec::with_capacity(batch.len());
        let mut diagnostics = Vec::new();
        for (index, raw) in batch.iter().enumerate() {
            let outcome = self
                .mapper
                .apply_mappings(raw)
                .and_then(|mapped| self.record_type.validate(mapped));
            match outcome {
                Ok(model) => models.push(model),
                Err(error) => {
                    warn!("Dropping record {index}: {error}");
                    diagnostics.push(Diagnostic { index, error });
                }
            }
        }

        info!(
            "Translated {} of {} record(s) as '{}' using {}",
            models.len(),
            batch.len(),
            self.record_type.name,
            self.mapper.schema().display_name()
        );
        Ok(Translation {
            models: ModelList::from_models(
                Arc::clone(&self.record_type),
                Arc::clone(self.mapper.schema()),
                models,
            ),
            diagnostics,
        })
    }
}

impl<'r> TranslatorBuilder<'r> {
    /// Resolves record types and schemas from `registry` instead of the built-in one.
    pub fn registry<'n>(self, registry: &'n SchemaRegistry) -> TranslatorBuilder<'n> {
        TranslatorBuilder {
            registry,
            record_type: self.record_type,
            record_type_class: self.record_type_class,
            raw_data: self.raw_data,
            input_schema: self.input_schema,
            schema_name: self.schema_name,
        }
    }

    /// Uses this record type instead of the one registered under the record-type name.
    pub fn record_type_class(mut self, record_type: impl Into<Arc<RecordType>>) -> Self {
        self.record_type_class = Some(record_type.into());
        self
    }

    pub fn raw_data(mut self, raw_data: Vec<Record>) -> Self {
        self.raw_data = Some(raw_data);
        self
    }

    /// Skips detection and maps with this schema.
    pub fn input_schema(mut self, schema: impl Into<Arc<InputSchema>>) -> Self {
        self.input_schema = Some(schema.into());
        self
    }

    /// Skips detection and maps with the registered schema of this name.
    pub fn schema_name(mut self, name: impl Into<String>) -> Self {
        self.schema_name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Translator> {
        let record_type = match self.record_type_class {
            Some(record_type) => record_type,
            None => self
                .registry
                .record_type(&self.record_type)
                .ok_or_else(|| Error::UnsupportedRecordType(self.record_type.clone()))?,
        };

        let input_schema = match (self.input_schema, self.schema_name.as_deref()) {
            (Some(schema), _) => schema,
            (None, Some(name)) => self
                .registry
                .schema(&self.record_type, name)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "no input schema named '{name}' is registered for '{}'",
                        self.record_type
                    ))
                })?,
            (None, None) => {
                let sample = self
                    .raw_data
                    .as_deref()
                    .and_then(<[Record]>::first)
                    .ok_or_else(|| Error::SchemaDetection {
                        record_type: self.record_type.clone(),
                        candidates: self
                            .registry
                            .detection_order(&self.record_type)
                            .iter()
                            .map(|s| s.display_name())
                            .collect(),
                    })?;
                self.registry.detect(sample, &self.record_type)?
            }
        };

        debug!(
            "Translator for '{}' bound to record type '{}' and schema {}",
            self.record_type,
            record_type.name,
            input_schema.display_name()
        );
        Ok(Translator {
            record_type,
            mapper: DataMapper::new(input_schema),
            raw_data: self.raw_data,
        })
    }
}
