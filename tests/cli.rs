use std::{
    io::Write,
    process::{Command, Output},
};

const TABLE: &str = r#"[
    { "name": "--help", "arity": 0 },
    { "name": "--build-file", "arity": 1 },
    { "name": "--pkg-begin", "arity": 2 },
    { "name": "--emit", "arity": 1, "allowed": ["asm", "bin"] },
    { "name": "--build-file", "arity": 1 }
]"#;

fn run(args: &[&str]) -> Output {
    let mut table = tempfile::NamedTempFile::new().unwrap();
    table.write_all(TABLE.as_bytes()).unwrap();
    table.flush().unwrap();

    Command::new(env!("CARGO_BIN_EXE_flagscan"))
        .arg("--table")
        .arg(table.path())
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn cli_human_output() {
    let output = run(&["--", "--build-file", "b.cfg", "x", "--pkg-begin", "n", "p", "y"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "flags:\n  --build-file = \"b.cfg\"\n  --pkg-begin = [\"n\", \"p\"]\npositionals: [\"x\", \"y\"]\n"
    );
}

#[test]
fn cli_json_output_with_passthrough() {
    let output = run(&["--json", "--", "--help", "main.c", "--", "-O2", "--bogus"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "flags": { "--help": "Present" },
            "positionals": ["main.c"],
            "passthrough": ["-O2", "--bogus"],
        })
    );
}

#[test]
fn cli_parse_error() {
    let output = run(&["--", "--emit", "llvm-ir"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error: Flag `--emit` does not accept \"llvm-ir\""));
    assert!(stderr.contains("  asm\n  bin\n"));
}

#[test]
fn cli_usage_and_shadowed_warning() {
    let output = run(&["--verbose", "--usage"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "Usage: [--help] [--build-file <BUILD_FILE>] [--pkg-begin <PKG_BEGIN> <PKG_BEGIN>] [--emit <asm|bin>]\n"
    );
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("warning: table entry --build-file is shadowed"));
}

#[test]
fn cli_missing_table() {
    let output = Command::new(env!("CARGO_BIN_EXE_flagscan"))
        .args(["--table", "/nonexistent/table.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Could not read input"));
}
