use crate::{
    mapping::Mapping,
    model::{FieldSpec, RecordType},
    schema::InputSchema,
    value::FieldType,
};

use super::{NTC_TEMPLATES, catalog};

pub const RECORD_TYPE: &str = "cdp_neighbors";

pub fn record_type() -> RecordType {
    [
        "hostname",
        "ip_address",
        "platform",
        "local_port",
        "remote_port",
        "software_version",
        "capabilities",
    ]
    .into_iter()
    .fold(RecordType::new(RECORD_TYPE), |record_type, name| {
        record_type.field(FieldSpec::optional(name, FieldType::String))
    })
}

fn port(source_key: &str) -> Mapping {
    Mapping::from_source(source_key).with_transform(catalog("abbreviate_interface"))
}

/// `show cdp neighbors detail` on IOS / IOS-XE.
pub fn cisco_ios() -> InputSchema {
    InputSchema::builder("CiscoIOS", RECORD_TYPE)
        .family(NTC_TEMPLATES)
        .field("hostname", Mapping::from_source("destination_host"))
        .field("ip_address", Mapping::from_source("management_ip"))
        .field("platform", Mapping::identity())
        .field("local_port", port("local_port"))
        .field("remote_port", port("remote_port"))
        .field("software_version", Mapping::identity())
        .field("capabilities", Mapping::identity())
        .build()
}

/// `show cdp neighbors detail` on NX-OS.
pub fn cisco_nxos() -> InputSchema {
    InputSchema::builder("CiscoNXOS", RECORD_TYPE)
        .family(NTC_TEMPLATES)
        .field("hostname", Mapping::from_source("neighbor_name"))
        .field("ip_address", Mapping::from_source("mgmt_address"))
        .field("platform", Mapping::identity())
        .field("local_port", port("local_interface"))
        .field("remote_port", port("neighbor_interface"))
        .field("software_version", Mapping::from_source("neighbor_description"))
        .field("capabilities", Mapping::identity())
        .build()
}

pub fn schemas() -> Vec<InputSchema> {
    vec![cisco_ios(), cisco_nxos()]
}
