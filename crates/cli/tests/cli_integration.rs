use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("toptions-integ-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn toptions() -> Command {
    Command::new(env!("CARGO_BIN_EXE_toptions"))
}

fn write_definition(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("toptions.json");
    fs::write(&path, json).expect("failed to write definition");
    path
}

fn assert_success(out: &Output, what: &str) {
    assert!(
        out.status.success(),
        "{what} failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
}

fn stdout_json(out: &Output) -> serde_json::Value {
    serde_json::from_slice(&out.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}):\n{}",
            String::from_utf8_lossy(&out.stdout)
        )
    })
}

const MIXED: &str = r#"{
  "foo": { "type": "arg", "index": 0 },
  "bar": { "type": "flag" },
  "baz": { "type": "bit" },
  "buz": { "type": "level", "alias": "u" },
  "biz": { "type": "list" },
  "boz": { "type": "raw" }
}"#;

#[test]
fn help_works() {
    let out = toptions()
        .arg("--help")
        .output()
        .expect("failed to run toptions --help");
    assert_success(&out, "toptions --help");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("parse") && stdout.contains("check") && stdout.contains("init"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn parse_prints_configuration() {
    let dir = make_temp_dir("parse");
    let definition = write_definition(&dir, MIXED);

    let out = toptions()
        .arg("parse")
        .arg("--definition")
        .arg(&definition)
        .arg("--")
        .args([
            "--bar", "fuz", "-uu", "--biz", "faz", "boo", "--baz", "--biz", "fiz", "--", "doo",
            "goo",
        ])
        .output()
        .expect("failed to run toptions parse");
    assert_success(&out, "toptions parse");

    assert_eq!(
        stdout_json(&out),
        serde_json::json!({
            "foo": "boo",
            "bar": "fuz",
            "baz": true,
            "buz": 2,
            "biz": ["faz", "fiz"],
            "boz": ["doo", "goo"],
            "unrecognized": { "named": [], "positional": [] },
        })
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn strict_parse_fails_on_unrecognized_input() {
    let dir = make_temp_dir("strict");
    let definition = write_definition(&dir, MIXED);

    let out = toptions()
        .arg("parse")
        .arg("-d")
        .arg(&definition)
        .arg("--strict")
        .arg("--compact")
        .args(["--", "a", "b", "--nope"])
        .output()
        .expect("failed to run toptions parse --strict");
    assert!(!out.status.success(), "strict parse unexpectedly succeeded");

    let json = stdout_json(&out);
    assert_eq!(json["unrecognized"]["named"], serde_json::json!(["nope"]));
    assert_eq!(json["unrecognized"]["positional"], serde_json::json!(["b"]));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("option `nope`") && stderr.contains("argument `b`"),
        "unexpected stderr:\n{stderr}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn check_rejects_conflicting_aliases() {
    let dir = make_temp_dir("check-conflict");
    let definition = write_definition(
        &dir,
        r#"{
  "verbose": { "type": "level", "alias": "v" },
  "version": { "type": "bit", "alias": "v" }
}"#,
    );

    let out = toptions()
        .arg("check")
        .arg("-d")
        .arg(&definition)
        .output()
        .expect("failed to run toptions check");
    assert!(!out.status.success(), "check accepted a conflicting alias");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("alias `-v` is declared by both `verbose` and `version`"),
        "unexpected stderr:\n{stderr}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn init_then_check_round_trips() {
    let dir = make_temp_dir("init");

    let out = toptions()
        .arg("init")
        .arg(&dir)
        .output()
        .expect("failed to run toptions init");
    assert_success(&out, "toptions init");
    assert!(dir.join("toptions.json").is_file(), "toptions.json not created");

    let out = toptions()
        .arg("check")
        .arg("--json")
        .arg("--definition")
        .arg(dir.join("toptions.json"))
        .output()
        .expect("failed to run toptions check --json");
    assert_success(&out, "toptions check --json");

    let json = stdout_json(&out);
    assert_eq!(json["positional"], serde_json::json!(["input"]));
    let kinds: Vec<&str> = json["options"]
        .as_array()
        .expect("options is an array")
        .iter()
        .filter_map(|o| o["kind"].as_str())
        .collect();
    assert_eq!(
        kinds,
        ["arg", "flag", "bit", "level", "list", "args", "raw"]
    );

    let out = toptions()
        .arg("init")
        .arg(&dir)
        .output()
        .expect("failed to rerun toptions init");
    assert!(!out.status.success(), "init overwrote without --force");

    let _ = fs::remove_dir_all(&dir);
}
