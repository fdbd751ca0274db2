//! Built-in vendor tables: default record types and the parser-specific
//! input schemas that map onto them.

pub mod arp;
pub mod cdp_neighbors;

use crate::{error::Result, registry::SchemaRegistry, transform::Transform};

/// Parser family for schemas keyed on ntc-templates field names.
pub const NTC_TEMPLATES: &str = "ntc_templates";

pub fn register_all(registry: &mut SchemaRegistry) -> Result<()> {
    registry.register_record_type(cdp_neighbors::record_type())?;
    for schema in cdp_neighbors::schemas() {
        registry.register_schema(schema)?;
    }
    registry.register_record_type(arp::record_type())?;
    for schema in arp::schemas() {
        registry.register_schema(schema)?;
    }
    Ok(())
}

fn catalog(name: &str) -> Transform {
    Transform::lookup(name).unwrap_or_else(|| panic!("transform '{name}' is in the catalog"))
}
