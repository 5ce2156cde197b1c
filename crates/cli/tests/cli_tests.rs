// Integration tests for the `smilefetch` binary.
// Run with: cargo test -p smilefetch-cli --test cli_tests

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use httpmock::prelude::*;
use rust_xlsxwriter::Workbook as XlsxWorkbook;

fn smilefetch() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_smilefetch"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(cmd: &mut Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run smilefetch");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn write_settings(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("settings.toml");
    std::fs::write(&path, body).unwrap();
    path
}

fn write_input(path: &Path, names: &[&str]) {
    let mut workbook = XlsxWorkbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Compound").unwrap();
    for (i, name) in names.iter().enumerate() {
        sheet.write_string(i as u32 + 1, 0, *name).unwrap();
    }
    workbook.save(path).unwrap();
}

fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

#[test]
fn missing_input_file_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let settings = write_settings(dir.path(), "");
    let output = smilefetch()
        .arg(dir.path().join("nope.xlsx"))
        .arg("--config")
        .arg(&settings)
        .output()
        .expect("failed to run smilefetch");

    assert_exit(&output, 3);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error reading the Excel file"), "stderr: {}", stderr);
    assert!(!dir.path().join("processed_nope.xlsx").exists());
}

#[test]
fn invalid_settings_exit_5() {
    let dir = tempfile::tempdir().unwrap();
    let settings = write_settings(dir.path(), "[report.fill]\nnot_found = \"red\"\n");
    let output = smilefetch()
        .arg(dir.path().join("names.xlsx"))
        .arg("--config")
        .arg(&settings)
        .output()
        .expect("failed to run smilefetch");

    assert_exit(&output, 5);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("report.fill.not_found"), "stderr: {}", stderr);
}

#[test]
fn missing_settings_file_exits_5() {
    let dir = tempfile::tempdir().unwrap();
    let output = smilefetch()
        .arg(dir.path().join("names.xlsx"))
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .output()
        .expect("failed to run smilefetch");

    assert_exit(&output, 5);
}

#[test]
fn empty_prompt_answer_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let settings = write_settings(dir.path(), "");
    let output = run_with_stdin(smilefetch().arg("--config").arg(&settings), "\n");

    assert_exit(&output, 2);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please enter the Excel file path:"), "stdout: {}", stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no input file given"), "stderr: {}", stderr);
}

#[test]
fn prompted_path_runs_pipeline() {
    let server = MockServer::start();
    let compound = server.mock(|when, then| {
        when.method(GET)
            .path("/compound/name/caffeine/property/CanonicalSMILES/JSON");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "PropertyTable": {
                    "Properties": [{ "CID": 2519, "CanonicalSMILES": "CN1C=NC2=C1C(=O)N(C(=O)N2C)C" }]
                }
            }));
    });

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("names.xlsx");
    write_input(&input, &["caffeine"]);
    let settings = write_settings(
        dir.path(),
        &format!("[lookup]\napi_base = \"{}\"\n", server.base_url()),
    );

    let output = run_with_stdin(
        smilefetch().arg("--config").arg(&settings),
        &format!("\"{}\"\n", input.display()),
    );

    assert_exit(&output, 0);
    compound.assert_calls(1);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = dir.path().join("processed_names.xlsx");
    assert!(
        stdout.contains(&format!("Processed file saved as {}", expected.display())),
        "stdout: {}",
        stdout
    );
    assert!(stdout.contains("1 compound: 1 found, 0 substances, 0 not found"), "stdout: {}", stdout);
    assert!(expected.exists());
}

#[test]
fn not_found_rows_do_not_fail_the_run() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.method(GET);
        then.status(404);
    });

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("names.xlsx");
    write_input(&input, &["xyznonexistentcompound123", "another missing one"]);
    let settings = write_settings(
        dir.path(),
        &format!("[lookup]\napi_base = \"{}\"\n", server.base_url()),
    );

    let output = smilefetch()
        .arg(&input)
        .arg("--config")
        .arg(&settings)
        .output()
        .expect("failed to run smilefetch");

    assert_exit(&output, 0);
    // Compound then substance for each name.
    any.assert_calls(4);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Substance 'xyznonexistentcompound123' not found in PubChem."),
        "stderr: {}",
        stderr
    );
    assert!(stderr.contains("[2/2] another missing one: not found"), "stderr: {}", stderr);
}

#[test]
fn quiet_suppresses_progress() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(404);
    });

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("names.xlsx");
    write_input(&input, &["nothing"]);
    let settings = write_settings(
        dir.path(),
        &format!("[lookup]\napi_base = \"{}\"\n", server.base_url()),
    );

    let output = smilefetch()
        .arg(&input)
        .arg("--quiet")
        .arg("--config")
        .arg(&settings)
        .output()
        .expect("failed to run smilefetch");

    assert_exit(&output, 0);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("[1/1]"), "stderr: {}", stderr);
}
