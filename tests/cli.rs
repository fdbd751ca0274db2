mod common;

use assert_cmd::Command;
use common::{TestWorkspace, fixture_path};
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn translator_cmd() -> Command {
    let mut cmd = Command::cargo_bin("net-model-translator").expect("binary exists");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture(name: &str) -> String {
    fixture_path(name).to_str().expect("fixture path utf-8").to_string()
}

#[test]
fn translate_renders_table_by_default() {
    translator_cmd()
        .args(["translate", "-i", &fixture("cdp_ios.json"), "-t", "cdp_neighbors"])
        .assert()
        .success()
        .stdout(contains("ModelList(cdp_neighbors)"))
        .stdout(contains("InputSchema: ntc_templates(CiscoIOS)"))
        .stdout(contains("Gi0/1").and(contains("DeviceB")))
        .stderr(contains("Translated 2 of 2 record(s)"));
}

#[test]
fn translate_writes_json_to_output_file() {
    let workspace = TestWorkspace::new();
    let output = workspace.path().join("neighbors.json");
    translator_cmd()
        .args([
            "translate",
            "-i",
            &fixture("cdp_nxos.yaml"),
            "-t",
            "cdp_neighbors",
            "--format",
            "json",
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&workspace.read("neighbors.json")).expect("valid json");
    let rows = written.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["hostname"], "leaf-01");
    assert_eq!(rows[0]["local_port"], "Et1/49");
    assert_eq!(rows[1]["vlan_id"], 20);
}

#[test]
fn translate_csv_input_drops_bad_records_and_logs_them() {
    translator_cmd()
        .args([
            "translate",
            "-i",
            &fixture("arp_ios.csv"),
            "-t",
            "arp",
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout(contains("address,mac,interface,age\n"))
        .stdout(contains("10.0.0.1,00:50:56:a1:00:01,Vlan10,5\n"))
        .stdout(contains("10.0.0.3").not())
        .stderr(contains("Dropping record 2"));
}

#[test]
fn strict_mode_fails_on_dropped_records() {
    translator_cmd()
        .args([
            "translate",
            "-i",
            &fixture("arp_ios.csv"),
            "-t",
            "arp",
            "--strict",
        ])
        .assert()
        .failure()
        .stderr(contains("error: 1 record(s) failed translation"))
        .stderr(contains("'not-a-mac' is not a MAC address"));
}

#[test]
fn translate_reads_stdin_with_explicit_format() {
    let yaml = std::fs::read_to_string(fixture_path("cdp_nxos.yaml")).expect("fixture");
    translator_cmd()
        .args([
            "translate",
            "-i",
            "-",
            "--input-format",
            "yaml",
            "-t",
            "cdp_neighbors",
            "--format",
            "yaml",
        ])
        .write_stdin(yaml)
        .assert()
        .success()
        .stdout(contains("- hostname: leaf-01\n"))
        .stdout(contains("vlan_id: 20"));
}

#[test]
fn translate_with_named_schema_skips_detection() {
    translator_cmd()
        .args([
            "translate",
            "-i",
            &fixture("cdp_ios.json"),
            "-t",
            "cdp_neighbors",
            "--schema",
            "ciscoios",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(contains("\"hostname\": \"DeviceA\""));
}

#[test]
fn translate_with_definitions_file() {
    translator_cmd()
        .args([
            "translate",
            "-i",
            &fixture("lldp_junos.json"),
            "-t",
            "lldp_neighbors",
            "-d",
            &fixture("lldp_definitions.yaml"),
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout(contains("hostname,local_port,ttl\ncore-01,ge-0/0/1,90\ncore-02,ge-0/0/2,120\n"));
}

#[test]
fn unknown_record_type_is_reported() {
    translator_cmd()
        .args(["translate", "-i", &fixture("cdp_ios.json"), "-t", "bgp_peers"])
        .assert()
        .failure()
        .stderr(contains("Unsupported record type 'bgp_peers'"));
}

#[test]
fn detect_prints_matching_schema() {
    translator_cmd()
        .args(["detect", "-i", &fixture("cdp_nxos.yaml"), "-t", "cdp_neighbors"])
        .assert()
        .success()
        .stdout("ntc_templates(CiscoNXOS)\n");
}

#[test]
fn detect_reports_candidates_when_nothing_matches() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("peers.json", r#"[{"peer": "10.0.0.1"}]"#);
    translator_cmd()
        .args(["detect", "-i", input.to_str().unwrap(), "-t", "arp"])
        .assert()
        .failure()
        .stderr(contains("candidates: ntc_templates(CiscoIOS), ntc_templates(CiscoNXOS)"));
}

#[test]
fn schemas_lists_detection_order_and_fields() {
    translator_cmd()
        .args(["schemas"])
        .assert()
        .success()
        .stdout(contains("record_type"))
        .stdout(contains("ntc_templates(CiscoNXOS)"))
        .stdout(contains("address,mac,interface"));

    translator_cmd()
        .args(["schemas", "-t", "arp", "--fields"])
        .assert()
        .success()
        .stdout(contains("arp          mac        string  true"))
        .stdout(contains("cdp_neighbors").not());
}

#[test]
fn schemas_rejects_unknown_record_type() {
    translator_cmd()
        .args(["schemas", "-t", "bgp"])
        .assert()
        .failure()
        .stderr(contains("Unsupported record type 'bgp'"));
}
