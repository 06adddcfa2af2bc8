use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!("scriptctx-rs-smoke-{}-{}", name, nanos))
}

fn sc_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sc-cli"))
        .args(args)
        .output()
        .expect("cli should execute")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn render_raw_prints_preamble_then_snippets() {
    let output = sc_cli(&["render", "--raw", "--eval", "var x = 1;"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "var console = {warn: function(){}, log: print, error: print}\nvar global = {}\nvar x = 1;\n"
    );
}

#[test]
fn run_manifest_exposes_globals_and_reports_value() {
    let lib = temp_path("lib.js");
    fs::write(&lib, "global.Lib = {v: 42};").expect("write lib");
    let manifest = temp_path("manifest.json");
    let body = serde_json::json!({
        "steps": [
            {"file": lib.to_string_lossy(), "globals": ["Lib"]},
            {"inline": "console.log('v', Lib.v);"},
            {"inline": "Lib.v"}
        ]
    });
    fs::write(&manifest, body.to_string()).expect("write manifest");

    let output = sc_cli(&["run", "--manifest", &manifest.to_string_lossy()]);
    let stdout = stdout_of(&output);
    assert!(output.status.success(), "stdout:\n{}", stdout);
    assert!(stdout.contains("RESULT:OK"));
    assert!(stdout.contains("PRINT_JSON:\"v 42\""));
    assert!(stdout.contains("VALUE_JSON:42.0"));
    fs::remove_file(&lib).expect("cleanup");
    fs::remove_file(&manifest).expect("cleanup");
}

#[test]
fn failures_use_stable_report() {
    let output = sc_cli(&["run", "--file", "not-a-real-path-or-url", "--expose", "Lib"]);
    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("RESULT:ERROR"));
    assert!(stdout.contains("ERROR_CODE:RESOURCE_UNAVAILABLE"));

    let output = sc_cli(&["run", "--eval", "undefinedFunction()"]);
    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("ERROR_CODE:INTERPRETER_FAULT"));
    assert!(stdout.contains("ERROR_MSG_JSON:"));
}
