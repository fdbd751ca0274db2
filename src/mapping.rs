use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    transform::Transform,
    value::{Record, Value},
};

/// A single field-translation rule. Unset keys default to the owning field's name.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    pub source_key: Option<String>,
    pub target_key: Option<String>,
    pub transform: Option<Transform>,
}

impl Mapping {
    /// Identity rule: read and write the owning field's own name.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn from_source(source_key: impl Into<String>) -> Self {
        Self {
            source_key: Some(source_key.into()),
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target_key: impl Into<String>) -> Self {
        self.target_key = Some(target_key.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn effective_source_key<'a>(&'a self, field: &'a str) -> &'a str {
        self.source_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .unwrap_or(field)
    }

    pub fn effective_target_key<'a>(&'a self, field: &'a str) -> &'a str {
        self.target_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .unwrap_or(field)
    }

    /// Reads this rule's source value from `record`, transforming it when present.
    /// A missing (or null) source value is returned as `None`, never an error.
    pub fn apply(&self, field: &str, record: &Record) -> Result<(String, Option<Value>)> {
        let source_key = self.effective_source_key(field);
        let target_key = self.effective_target_key(field).to_string();
        let value = match record.get(source_key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.clone()),
        };
        let value = match (value, &self.transform) {
            (Some(value), Some(transform)) => {
                Some(transform.apply(value).map_err(|err| Error::Transform {
                    field: field.to_string(),
                    source_key: source_key.to_string(),
                    message: format!("{err:#}"),
                })?)
            }
            (value, _) => value,
        };
        Ok((target_key, value))
    }
}

/// Serialized form of a mapping used by schema definition files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDefinition {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

impl MappingDefinition {
    pub fn into_mapping(self) -> Result<(String, Mapping)> {
        let transform = match self.transform.as_deref() {
            Some(name) => Some(Transform::lookup(name).ok_or_else(|| {
                Error::Config(format!(
                    "field '{}' references unknown transform '{name}' (available: {})",
                    self.field,
                    Transform::catalog().join(", ")
                ))
            })?),
            None => None,
        };
        Ok((
            self.field,
            Mapping {
                source_key: self.source_key,
                target_key: self.target_key,
                transform,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::record;

    #[test]
    fn apply_without_transform_is_identity() {
        let mapping = Mapping::from_source("destination_host");
        let raw = record([("destination_host", "DeviceA")]);
        let (target, value) = mapping.apply("hostname", &raw).unwrap();
        assert_eq!(target, "hostname");
        assert_eq!(value, Some(Value::from("DeviceA")));
    }

    #[test]
    fn apply_reports_missing_source_as_absent() {
        let mapping = Mapping::identity().with_transform(Transform::lookup("uppercase").unwrap());
        let (target, value) = mapping.apply("platform", &record([("other", "x")])).unwrap();
        assert_eq!(target, "platform");
        assert_eq!(value, None);

        let (_, value) = mapping
            .apply("platform", &record([("platform", Value::Null)]))
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn apply_honours_explicit_target_key() {
        let mapping = Mapping::from_source("mgmt_address").with_target("management_ip");
        let (target, value) = mapping
            .apply("ip_address", &record([("mgmt_address", "10.0.0.1")]))
            .unwrap();
        assert_eq!(target, "management_ip");
        assert_eq!(value, Some(Value::from("10.0.0.1")));
    }

    #[test]
    fn transform_failures_carry_field_context() {
        let mapping = Mapping::from_source("local_interface")
            .with_transform(Transform::lookup("abbreviate_interface").unwrap());
        let err = mapping
            .apply("local_port", &record([("local_interface", 12)]))
            .unwrap_err();
        match err {
            Error::Transform {
                field, source_key, ..
            } => {
                assert_eq!(field, "local_port");
                assert_eq!(source_key, "local_interface");
            }
            other => panic!("expected transform error, got {other:?}"),
        }
    }

    #[test]
    fn definitions_resolve_transforms_by_name() {
        let definition = MappingDefinition {
            field: "mac".to_string(),
            source_key: Some("mac_address".to_string()),
            target_key: None,
            transform: Some("normalize_mac".to_string()),
        };
        let (field, mapping) = definition.into_mapping().unwrap();
        assert_eq!(field, "mac");
        assert_eq!(mapping.transform.unwrap().name(), "normalize_mac");

        let unknown = MappingDefinition {
            field: "mac".to_string(),
            source_key: None,
            target_key: None,
            transform: Some("reverse".to_string()),
        };
        assert!(matches!(unknown.into_mapping(), Err(Error::Config(_))));
    }
}
