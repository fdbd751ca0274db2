use crate::{
    mapping::Mapping,
    model::{FieldSpec, RecordType},
    schema::InputSchema,
    value::FieldType,
};

use super::{NTC_TEMPLATES, catalog};

pub const RECORD_TYPE: &str = "arp";

pub fn record_type() -> RecordType {
    RecordType::new(RECORD_TYPE)
        .field(FieldSpec::required("address", FieldType::String))
        .field(FieldSpec::required("mac", FieldType::String))
        .field(FieldSpec::required("interface", FieldType::String))
}

fn mac(source_key: &str) -> Mapping {
    Mapping::from_source(source_key).with_transform(catalog("normalize_mac"))
}

/// `show ip arp` on IOS; keys already match the record type.
pub fn cisco_ios() -> InputSchema {
    InputSchema::builder("CiscoIOS", RECORD_TYPE)
        .family(NTC_TEMPLATES)
        .field("address", Mapping::identity())
        .field("mac", mac("mac"))
        .field("interface", Mapping::identity())
        .build()
}

/// `show ip arp` on NX-OS.
pub fn cisco_nxos() -> InputSchema {
    InputSchema::builder("CiscoNXOS", RECORD_TYPE)
        .family(NTC_TEMPLATES)
        .field("address", Mapping::from_source("ip_address"))
        .field("mac", mac("mac_address"))
        .field(
            "interface",
            Mapping::identity().with_transform(catalog("abbreviate_interface")),
        )
        .build()
}

pub fn schemas() -> Vec<InputSchema> {
    vec![cisco_ios(), cisco_nxos()]
}
