//! Value transforms applied by field mappings.
//!
//! A [`Transform`] is a named, shareable function from one scalar to another.
//! The built-in catalog can be looked up by name so YAML schema definitions
//! can reference transforms; `a|b` names chain catalog entries left to right.

pub mod network;
pub mod string_ops;

use std::{borrow::Cow, fmt, sync::Arc};

use anyhow::{Result, anyhow};

use crate::value::Value;

pub type TransformFn = dyn Fn(Value) -> Result<Value> + Send + Sync;

#[derive(Clone)]
pub struct Transform {
    name: String,
    func: Arc<TransformFn>,
}

impl Transform {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Wraps a string operation. Non-string inputs are rejected.
    pub fn for_strings(name: &str, op: fn(&str) -> Cow<'_, str>) -> Self {
        let label = name.to_string();
        Self::new(name, move |value| match value {
            Value::String(s) => Ok(Value::String(op(&s).into_owned())),
            other => Err(anyhow!(
                "{label} expects a string but received {} '{}'",
                other.kind(),
                other
            )),
        })
    }

    /// Runs each transform in order, feeding the output of one into the next.
    pub fn pipeline(transforms: Vec<Transform>) -> Self {
        let name = transforms
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join("|");
        Self::new(name, move |value| {
            transforms
                .iter()
                .try_fold(value, |current, transform| transform.apply(current))
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, value: Value) -> Result<Value> {
        (self.func)(value)
    }

    /// Resolves a catalog name, or a `|`-separated chain of catalog names.
    pub fn lookup(name: &str) -> Option<Transform> {
        let parts = name
            .split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>();
        match parts.as_slice() {
            [] => None,
            [single] => builtin(single),
            many => many
                .iter()
                .map(|part| builtin(part))
                .collect::<Option<Vec<_>>>()
                .map(Transform::pipeline),
        }
    }

    pub fn catalog() -> &'static [&'static str] {
        &[
            "abbreviate_interface",
            "canonical_interface",
            "lowercase",
            "uppercase",
            "trim",
            "snake_case",
            "collapse_whitespace",
            "normalize_mac",
        ]
    }
}

fn builtin(name: &str) -> Option<Transform> {
    let transform = match name {
        "abbreviate_interface" => {
            Transform::for_strings(name, network::abbreviate_interface_name)
        }
        "canonical_interface" => Transform::for_strings(name, network::canonical_interface_name),
        "lowercase" => Transform::for_strings(name, string_ops::lowercase),
        "uppercase" => Transform::for_strings(name, string_ops::uppercase),
        "trim" => Transform::for_strings(name, string_ops::trim),
        "snake_case" => Transform::for_strings(name, string_ops::snake_case),
        "collapse_whitespace" => Transform::for_strings(name, string_ops::collapse_whitespace),
        "normalize_mac" => Transform::new(name, |value| match value {
            Value::String(s) => network::normalize_mac(&s).map(Value::String),
            other => Err(anyhow!(
                "normalize_mac expects a string but received {}",
                other.kind()
            )),
        }),
        _ => return None,
    };
    Some(transform)
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.name).finish()
    }
}
