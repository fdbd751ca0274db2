use std::sync::Arc;

use log::trace;

use crate::{
    error::Result,
    schema::InputSchema,
    value::{Record, Value},
};

/// Applies one input schema to raw records.
#[derive(Debug, Clone)]
pub struct DataMapper {
    schema: Arc<InputSchema>,
}

impl DataMapper {
    pub fn new(schema: Arc<InputSchema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Arc<InputSchema> {
        &self.schema
    }

    /// Maps `record` onto the schema's target keys.
    ///
    /// Absent source values become an empty-string placeholder. Keys the
    /// schema does not consume are carried through unchanged unless a mapped
    /// field already claimed that name. A failing transform fails the whole
    /// record; no partial map is returned.
    pub fn apply_mappings(&self, record: &Record) -> Result<Record> {
        let mut mapped = Record::with_capacity(record.len());
        for (field, mapping) in self.schema.fields() {
            let (target_key, value) = mapping.apply(field, record)?;
            mapped.insert(target_key, value.unwrap_or_else(|| Value::String(String::new())));
        }

        let source_keys = self.schema.required_source_keys();
        for (key, value) in record {
            if source_keys.contains(key.as_str()) || mapped.contains_key(key) {
                continue;
            }
            trace!("Carrying through unmapped key '{key}'");
            mapped.insert(key.clone(), value.clone());
        }
        Ok(mapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, mapping::Mapping, transform::Transform, value::record};

    fn mapper() -> DataMapper {
        let schema = InputSchema::builder("CiscoNXOS", "cdp_neighbors")
            .field("hostname", Mapping::from_source("neighbor_name"))
            .field("platform", Mapping::identity())
            .field(
                "local_port",
                Mapping::from_source("local_interface")
                    .with_transform(Transform::lookup("abbreviate_interface").unwrap()),
            )
            .build();
        DataMapper::new(Arc::new(schema))
    }

    #[test]
    fn maps_fields_and_carries_extras() {
        let mapped = mapper()
            .apply_mappings(&record([
                ("neighbor_name", "NXOS_Device_1"),
                ("platform", "N9K-C93180YC-EX"),
                ("local_interface", "Ethernet1/0/1"),
                ("nxos_specific", "detail"),
            ]))
            .unwrap();
        assert_eq!(
            mapped,
            record([
                ("hostname", "NXOS_Device_1"),
                ("platform", "N9K-C93180YC-EX"),
                ("local_port", "Et1/0/1"),
                ("nxos_specific", "detail"),
            ])
        );
    }

    #[test]
    fn absent_values_become_empty_strings() {
        let mapped = mapper()
            .apply_mappings(&record([("neighbor_name", "sw1")]))
            .unwrap();
        assert_eq!(mapped.get("platform"), Some(&Value::from("")));
        assert_eq!(mapped.get("local_port"), Some(&Value::from("")));
    }

    #[test]
    fn extras_never_overwrite_mapped_targets() {
        let mapped = mapper()
            .apply_mappings(&record([
                ("neighbor_name", "sw1"),
                ("hostname", "stale"),
            ]))
            .unwrap();
        assert_eq!(mapped.get("hostname"), Some(&Value::from("sw1")));
        assert_eq!(mapped.len(), 3);
    }

    #[test]
    fn transform_failure_fails_whole_record() {
        let err = mapper()
            .apply_mappings(&record([
                ("neighbor_name", Value::from("sw1")),
                ("local_interface", Value::Boolean(true)),
            ]))
            .unwrap_err();
        assert!(matches!(err, Error::Transform { .. }));
    }

    #[test]
    fn reapplying_identity_schema_is_stable() {
        let schema = InputSchema::builder("Identity", "arp")
            .field("address", Mapping::identity())
            .field("mac", Mapping::identity())
            .build();
        let mapper = DataMapper::new(Arc::new(schema));
        let raw = record([("address", "10.0.0.1"), ("mac", "aa:bb"), ("age", "5")]);
        let once = mapper.apply_mappings(&raw).unwrap();
        let twice = mapper.apply_mappings(&once).unwrap();
        assert_eq!(once, twice);
    }
}
