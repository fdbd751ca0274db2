//! Ordered, validated collection of translated records.
//!
//! A [`ModelList`] owns its models and is bound to one [`RecordType`] and the
//! [`InputSchema`] that produced it (the schema binding is metadata for
//! display only). Every insertion validates first, so the list never holds a
//! record its type would reject.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;

use crate::{
    error::{Error, Result},
    frame::Frame,
    model::{Model, RecordType},
    schema::InputSchema,
    table,
    value::{Record, Value},
};

#[derive(Debug, Clone)]
pub struct ModelList {
    record_type: Arc<RecordType>,
    input_schema: Arc<InputSchema>,
    items: Vec<Model>,
}

/// Names shown in the table header of a model list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMetadata {
    pub model: String,
    pub input_schema: String,
}

impl ModelList {
    pub fn new(record_type: Arc<RecordType>, input_schema: Arc<InputSchema>) -> Self {
        Self {
            record_type,
            input_schema,
            items: Vec::new(),
        }
    }

    /// Validates every dict; the first invalid one fails the whole build.
    pub fn from_dicts<I>(
        record_type: Arc<RecordType>,
        input_schema: Arc<InputSchema>,
        dicts: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut list = Self::new(record_type, input_schema);
        for dict in dicts {
            list.push(dict)?;
        }
        Ok(list)
    }

    pub fn from_json(
        json: &str,
        record_type: Arc<RecordType>,
        input_schema: Arc<InputSchema>,
    ) -> Result<Self> {
        let dicts: Vec<Record> = serde_json::from_str(json)?;
        Self::from_dicts(record_type, input_schema, dicts)
    }

    pub fn from_yaml(
        yaml: &str,
        record_type: Arc<RecordType>,
        input_schema: Arc<InputSchema>,
    ) -> Result<Self> {
        let dicts: Vec<Record> = serde_yaml::from_str(yaml)?;
        Self::from_dicts(record_type, input_schema, dicts)
    }

    pub(crate) fn from_models(
        record_type: Arc<RecordType>,
        input_schema: Arc<InputSchema>,
        items: Vec<Model>,
    ) -> Self {
        Self {
            record_type,
            input_schema,
            items,
        }
    }

    fn derive(&self, items: Vec<Model>) -> Self {
        Self::from_models(
            Arc::clone(&self.record_type),
            Arc::clone(&self.input_schema),
            items,
        )
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    pub fn input_schema(&self) -> &Arc<InputSchema> {
        &self.input_schema
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Model> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Model> {
        self.items.iter()
    }

    pub fn models(&self) -> &[Model] {
        &self.items
    }

    /// Validates `raw` and inserts it at `index`; indexes past the end append.
    pub fn insert(&mut self, index: usize, raw: Record) -> Result<()> {
        let model = self.record_type.validate(raw)?;
        let index = index.min(self.items.len());
        self.items.insert(index, model);
        Ok(())
    }

    pub fn push(&mut self, raw: Record) -> Result<()> {
        let model = self.record_type.validate(raw)?;
        self.items.push(model);
        Ok(())
    }

    /// Validates `raw` and replaces the model at `index`.
    pub fn set(&mut self, index: usize, raw: Record) -> Result<()> {
        let len = self.items.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.items[index] = self.record_type.validate(raw)?;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Model> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Models equal to every `(field, value)` criterion, as a new list.
    pub fn filter(&self, criteria: &[(&str, Value)]) -> ModelList {
        self.derive(
            self.items
                .iter()
                .filter(|model| model.matches(criteria))
                .cloned()
                .collect(),
        )
    }

    pub fn find(&self, criteria: &[(&str, Value)]) -> Option<&Model> {
        self.items.iter().find(|model| model.matches(criteria))
    }

    /// Stable in-place sort on one field; absent values sort as null.
    pub fn sort_by(&mut self, field: &str, reverse: bool) {
        self.items.sort_by(|a, b| {
            let left = a.get(field).unwrap_or(&Value::Null);
            let right = b.get(field).unwrap_or(&Value::Null);
            if reverse {
                right.sort_cmp(left)
            } else {
                left.sort_cmp(right)
            }
        });
    }

    /// Groups models by one field's value, in first-seen order of the values.
    pub fn group_by(&self, field: &str) -> IndexMap<Value, ModelList> {
        let mut groups: IndexMap<Value, Vec<Model>> = IndexMap::new();
        for model in &self.items {
            let key = model.get(field).cloned().unwrap_or_default();
            groups.entry(key).or_default().push(model.clone());
        }
        debug!("Grouped {} model(s) by '{field}' into {} group(s)", self.len(), groups.len());
        groups
            .into_iter()
            .map(|(key, items)| (key, self.derive(items)))
            .collect()
    }

    fn numeric_values<'a>(&'a self, field: &'a str) -> impl Iterator<Item = f64> + 'a {
        self.items
            .iter()
            .filter_map(move |model| model.get(field).and_then(Value::as_f64))
    }

    /// Sum of the numeric values of `field`; other values are skipped.
    pub fn sum(&self, field: &str) -> f64 {
        self.numeric_values(field).sum()
    }

    /// Mean of the numeric values of `field`, or 0 when there are none.
    pub fn average(&self, field: &str) -> f64 {
        let (total, count) = self
            .numeric_values(field)
            .fold((0.0, 0usize), |(total, count), value| (total + value, count + 1));
        if count == 0 { 0.0 } else { total / count as f64 }
    }

    pub fn count(&self, field: &str, value: &Value) -> usize {
        self.items
            .iter()
            .filter(|model| model.get(field).unwrap_or(&Value::Null) == value)
            .count()
    }

    pub fn to_dict(&self) -> Vec<Record> {
        self.items.iter().map(Model::to_record).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.items)?)
    }

    /// Declared fields first, then extra keys in the order they are first seen.
    pub fn to_frame(&self) -> Frame {
        let columns = self
            .record_type
            .fields
            .iter()
            .map(|f| f.name.clone())
            .chain(
                self.items
                    .iter()
                    .flat_map(|model| model.extra().keys().cloned()),
            )
            .unique()
            .collect::<Vec<_>>();
        Frame::from_rows(
            &columns,
            self.items.iter().map(|model| {
                model
                    .values()
                    .iter()
                    .chain(model.extra().iter())
                    .map(|(k, v)| (k.as_str(), v))
                    .collect::<Vec<_>>()
            }),
        )
    }

    pub fn metadata(&self) -> ListMetadata {
        ListMetadata {
            model: self.record_type.name.clone(),
            input_schema: self.input_schema.display_name(),
        }
    }

    /// Grid of the declared fields, preceded by the model and schema names.
    pub fn to_table(&self) -> String {
        if self.items.is_empty() {
            return format!("ModelList({}): []", self.record_type.name);
        }
        let headers = self
            .record_type
            .fields
            .iter()
            .map(|f| f.name.clone())
            .collect::<Vec<_>>();
        let rows = self
            .items
            .iter()
            .map(|model| {
                headers
                    .iter()
                    .map(|h| model.get(h).map(Value::as_display).unwrap_or_default())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let metadata = self.metadata();
        format!(
            "ModelList({})\n\nInputSchema: {}\n\n{}",
            metadata.model,
            metadata.input_schema,
            table::render_grid(&headers, &rows)
        )
    }
}

impl PartialEq for ModelList {
    fn eq(&self, other: &Self) -> bool {
        self.record_type == other.record_type
            && self.input_schema.name() == other.input_schema.name()
            && self.items == other.items
    }
}

impl<'a> IntoIterator for &'a ModelList {
    type Item = &'a Model;
    type IntoIter = std::slice::Iter<'a, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for ModelList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelList({}, {} items)", self.record_type.name, self.items.len())
    }
}
