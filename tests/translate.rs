mod common;

use std::sync::Arc;

use common::{fixture_path, read_json_records};
use net_model_translator::{
    Error, FieldSpec, FieldType, InputSchema, Mapping, RecordType, SchemaRegistry, Transform,
    Translator, Value, value::record,
};

fn field(list: &net_model_translator::ModelList, index: usize, name: &str) -> Value {
    list.get(index)
        .and_then(|model| model.get(name))
        .cloned()
        .unwrap_or_default()
}

#[test]
fn cdp_ios_records_translate_with_abbreviated_ports() {
    let batch = read_json_records("cdp_ios.json");
    let translator = Translator::new("cdp_neighbors", batch).expect("translator");
    assert_eq!(
        translator.input_schema().display_name(),
        "ntc_templates(CiscoIOS)"
    );

    let models = translator.translate(None).expect("translate");
    assert_eq!(models.len(), 2);
    assert_eq!(field(&models, 0, "hostname"), Value::from("DeviceA"));
    assert_eq!(field(&models, 0, "ip_address"), Value::from("192.168.1.1"));
    assert_eq!(field(&models, 0, "local_port"), Value::from("Gi0/1"));
    assert_eq!(field(&models, 0, "remote_port"), Value::from("Gi0/2"));
    assert_eq!(field(&models, 0, "platform"), Value::from("Cisco IOS"));
    assert_eq!(field(&models, 0, "software_version"), Value::from("15.2(4)M6"));
    assert_eq!(field(&models, 0, "capabilities"), Value::from("Router Switch"));
}

#[test]
fn records_missing_optional_fields_are_kept_with_placeholders() {
    let batch = read_json_records("cdp_ios.json");
    let models = Translator::new("cdp_neighbors", batch)
        .and_then(|t| t.translate(None))
        .expect("translate");

    let second = models.get(1).expect("second record kept");
    assert_eq!(second.get("hostname"), Some(&Value::from("DeviceB")));
    for name in ["local_port", "remote_port", "software_version", "capabilities"] {
        assert_eq!(second.get(name), Some(&Value::from("")), "field {name}");
    }
    assert!(second.extra().is_empty());
}

#[test]
fn nxos_records_detect_second_schema_and_keep_extras() {
    let path = fixture_path("cdp_nxos.yaml");
    let yaml = std::fs::read_to_string(path).expect("read fixture");
    let batch: Vec<net_model_translator::Record> = serde_yaml::from_str(&yaml).expect("yaml");

    let translator = Translator::new("cdp_neighbors", batch).expect("translator");
    assert_eq!(translator.input_schema().name(), "CiscoNXOS");
    let models = translator.translate(None).expect("translate");

    assert_eq!(field(&models, 0, "hostname"), Value::from("leaf-01"));
    assert_eq!(field(&models, 0, "local_port"), Value::from("Et1/49"));
    assert_eq!(
        field(&models, 0, "software_version"),
        Value::from("Cisco Nexus Operating System (NX-OS) Software, Version 9.3(8)")
    );
    let first = models.get(0).unwrap();
    assert_eq!(first.extra().get("vlan_id"), Some(&Value::Integer(10)));
    assert!(first.extra().get("neighbor_name").is_none());
}

#[test]
fn translated_length_never_exceeds_batch_length() {
    let mut batch = read_json_records("cdp_ios.json");
    let mut broken = batch[0].clone();
    broken.insert("remote_port".to_string(), Value::Boolean(true));
    batch.push(broken);

    let translator = Translator::new("cdp_neighbors", batch.clone()).expect("translator");
    let report = translator.translate_report(None).expect("translate");
    assert_eq!(report.accepted() + report.dropped(), batch.len());
    assert!(report.accepted() < batch.len());
    assert_eq!(report.diagnostics[0].index, 2);
    assert!(report.diagnostics[0].error.is_record_level());

    let clean = read_json_records("cdp_ios.json");
    let report = translator.translate_report(Some(&clean)).expect("translate");
    assert_eq!(report.accepted(), clean.len());
    assert!(report.diagnostics.is_empty());
}

#[test]
fn explicit_record_type_and_schema_skip_registry_lookup() {
    let record_type = RecordType::new("cisco_ios")
        .field(FieldSpec::required("hostname", FieldType::String))
        .field(FieldSpec::optional("uptime_days", FieldType::Integer));
    let schema = InputSchema::builder("Custom", "cisco_ios")
        .field(
            "hostname",
            Mapping::from_source("device").with_transform(Transform::lookup("uppercase").unwrap()),
        )
        .field("uptime_days", Mapping::from_source("uptime"))
        .build();

    let translator = Translator::builder("cisco_ios")
        .record_type_class(record_type)
        .input_schema(schema)
        .build()
        .expect("translator");
    let batch = vec![
        record([("device", Value::from("edge1")), ("uptime", Value::from("42"))]),
        record([("device", Value::from("edge2")), ("uptime", Value::from("n/a"))]),
    ];
    let report = translator.translate_report(Some(&batch)).expect("translate");

    assert_eq!(report.accepted(), 1);
    assert_eq!(field(&report.models, 0, "hostname"), Value::from("EDGE1"));
    assert_eq!(field(&report.models, 0, "uptime_days"), Value::Integer(42));
    assert!(matches!(
        report.diagnostics[0].error,
        Error::Validation { ref field, .. } if field.as_deref() == Some("uptime_days")
    ));
}

#[test]
fn definitions_file_extends_a_private_registry() {
    let mut registry = SchemaRegistry::with_builtins();
    registry
        .load_definitions(&fixture_path("lldp_definitions.yaml"))
        .expect("definitions");
    assert!(SchemaRegistry::builtin().record_type("lldp_neighbors").is_none());

    let batch = read_json_records("lldp_junos.json");
    let translator = Translator::builder("lldp_neighbors")
        .registry(&registry)
        .raw_data(batch)
        .build()
        .expect("translator");
    let report = translator.translate_report(None).expect("translate");

    assert_eq!(report.accepted(), 2);
    assert_eq!(field(&report.models, 0, "hostname"), Value::from("core-01"));
    assert_eq!(field(&report.models, 0, "ttl"), Value::Integer(90));
    assert_eq!(field(&report.models, 1, "ttl"), Value::Integer(120));
    assert_eq!(report.diagnostics[0].index, 2);
}

#[test]
fn detection_failure_names_candidates() {
    let batch = vec![record([("peer", "10.0.0.1")])];
    let err = Translator::new("cdp_neighbors", batch).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'cdp_neighbors'"));
    assert!(message.contains("ntc_templates(CiscoIOS), ntc_templates(CiscoNXOS)"));
}

#[test]
fn translators_are_shareable_across_threads() {
    let translator = Arc::new(
        Translator::new("cdp_neighbors", read_json_records("cdp_ios.json")).expect("translator"),
    );
    let handles = (0..4)
        .map(|_| {
            let translator = Arc::clone(&translator);
            std::thread::spawn(move || translator.translate(None).map(|m| m.len()))
        })
        .collect::<Vec<_>>();
    for handle in handles {
        assert_eq!(handle.join().expect("thread").expect("translate"), 2);
    }
}
