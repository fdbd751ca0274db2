use anyhow::{Result, anyhow};
use itertools::Itertools;

use crate::{cli::SchemasArgs, error::Error, table, translate_cmd::load_registry};

pub fn execute(args: &SchemasArgs) -> Result<()> {
    let registry = load_registry(&args.definitions)?;
    let record_types = match &args.record_type {
        Some(name) => {
            registry
                .record_type(name)
                .ok_or_else(|| anyhow!(Error::UnsupportedRecordType(name.clone())))?;
            vec![name.as_str()]
        }
        None => registry.record_type_names(),
    };

    if args.fields {
        let headers = ["record_type", "field", "type", "required", "default"]
            .map(String::from)
            .to_vec();
        let rows = record_types
            .iter()
            .filter_map(|name| registry.record_type(name))
            .flat_map(|record_type| {
                record_type
                    .fields
                    .iter()
                    .map(|spec| {
                        vec![
                            record_type.name.clone(),
                            spec.name.clone(),
                            spec.field_type.to_string(),
                            spec.required.to_string(),
                            spec.default
                                .as_ref()
                                .map(|v| v.as_display())
                                .unwrap_or_default(),
                        ]
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        table::print_table(&headers, &rows);
        return Ok(());
    }

    let headers = ["record_type", "schema", "priority", "detected_by"]
        .map(String::from)
        .to_vec();
    let rows = record_types
        .iter()
        .flat_map(|name| registry.detection_order(name))
        .map(|schema| {
            vec![
                schema.record_type().to_string(),
                schema.display_name(),
                schema.priority().to_string(),
                schema.required_source_keys().iter().join(","),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows);
    Ok(())
}
