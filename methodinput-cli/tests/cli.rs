use assert_cmd::cargo::{self};
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;

const METHOD: &str = r#"{
    "id": "assemble",
    "name": "Assemble reads",
    "parameters": [
        {
            "id": "assembler",
            "required": true,
            "default_values": ["spades"],
            "dropdown_options": {"options": [
                {"value": "spades", "display": "SPAdES"},
                {"value": "megahit", "display": "MEGAHIT"}
            ]}
        },
        {
            "id": "min_contig",
            "required": true,
            "text_options": {"validate_as": "int", "min": 100}
        },
        {
            "id": "reads",
            "text_options": {"suggestion_type": "Reads"}
        }
    ]
}"#;

fn run_json(args: &[&str]) -> Value {
    let output = cargo::cargo_bin_cmd!("methodinput")
        .args(["--method", METHOD])
        .args(args)
        .output()
        .expect("run methodinput");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("json output")
}

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("methodinput");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("methodinput"))
        .stdout(contains("--method"));
}

#[test]
fn defaults_seed_the_cell() {
    let report = run_json(&[]);
    assert_eq!(report["method"], "assemble");
    assert_eq!(report["valid"], false);
    assert_eq!(report["parameters"][0], "spades");
    assert_eq!(report["parameters"][1], Value::Null);
    assert_eq!(report["validation"]["min_contig"]["diagnosis"], "required-missing");
    assert_eq!(report["validation"]["reads"]["diagnosis"], "optional-empty");
}

#[test]
fn set_pushes_values_through_the_bus() {
    let report = run_json(&["--set", "min_contig=500", "--set", "assembler=\"megahit\""]);
    assert_eq!(report["valid"], true);
    assert_eq!(report["state"]["assembler"], "megahit");
    assert_eq!(report["state"]["min_contig"], 500);
}

#[test]
fn host_pushed_values_are_checked_on_render() {
    let report = run_json(&["--set", "min_contig=7"]);
    assert_eq!(report["valid"], false);
    assert_eq!(report["validation"]["min_contig"]["diagnosis"], "invalid-value");
    assert!(
        report["validation"]["min_contig"]["errorMessage"]
            .as_str()
            .is_some_and(|message| message.contains("minimum"))
    );
}

#[test]
fn reset_restores_defaults() {
    let report = run_json(&["--set", "assembler=megahit", "--reset"]);
    assert_eq!(report["state"]["assembler"], "spades");
}

#[test]
fn transcript_lists_bus_traffic() {
    let report = run_json(&["--transcript"]);
    let transcript = report["transcript"].as_array().expect("transcript");
    assert_eq!(transcript.len(), 6);
    assert_eq!(transcript[0]["param"], "assembler");
    assert_eq!(transcript[0]["type"], "sync");
    assert_eq!(transcript[1]["type"], "validation");
}

#[test]
fn disabled_parameters_do_not_block_validity() {
    let report = run_json(&["--disable", "min_contig"]);
    assert_eq!(report["validation"]["min_contig"]["diagnosis"], "disabled");
    assert_eq!(report["valid"], true);
}

#[test]
fn strict_mode_fails_on_invalid_parameters() {
    cargo::cargo_bin_cmd!("methodinput")
        .args(["--method", METHOD, "--strict"])
        .assert()
        .failure()
        .stderr(contains("failed validation"));
}

#[test]
fn unknown_parameters_are_rejected() {
    cargo::cargo_bin_cmd!("methodinput")
        .args(["--method", METHOD, "--set", "threads=4"])
        .assert()
        .failure()
        .stderr(contains("threads"));
}

#[test]
fn broken_method_documents_are_reported() {
    cargo::cargo_bin_cmd!("methodinput")
        .args(["--method", r#"{"id": "m", "parameters": [{"id": "p", "dropdown_options": {"options": []}}]}"#])
        .assert()
        .failure()
        .stderr(contains("invalid method document"));
}

#[test]
fn toml_output_handles_unset_parameters() {
    cargo::cargo_bin_cmd!("methodinput")
        .args(["--method", METHOD, "-f", "toml"])
        .assert()
        .success()
        .stdout(contains("method = \"assemble\""))
        .stdout(contains("[state]"))
        .stdout(contains("assembler = \"spades\""))
        .stdout(contains("min_contig =").not());
}

#[test]
fn toml_output_handles_a_single_unset_parameter() {
    cargo::cargo_bin_cmd!("methodinput")
        .args(["--method", r#"{"id":"m","parameters":[{"id":"label"}]}"#, "-f", "toml", "--no-pretty"])
        .assert()
        .success()
        .stdout(contains("method = \"m\""))
        .stdout(contains("parameters = [\"\"]"));
}
