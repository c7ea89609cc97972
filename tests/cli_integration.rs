//! CLI integration tests for ffigen.
//!
//! These tests drive the binary end to end: declarations on stdin or from a
//! file, bindings on stdout or to a file, diagnostics on stderr.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the ffigen binary command.
fn ffigen() -> Command {
    let mut cmd = Command::cargo_bin("ffigen").unwrap();
    cmd.env_remove("FFIGEN_LIBRARY");
    cmd
}

/// Create a temporary directory for test inputs.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

const STDIO_DECLS: &str = r#"[
  {"tag": "typedef", "name": "size_t", "location": "/usr/include/stddef.h:46:23",
   "type": {"tag": ":unsigned-long", "bit-size": 64, "bit-alignment": 64}},
  {"tag": "struct", "name": "point", "location": "geo.h:1:8", "bit-size": 64,
   "fields": [{"tag": "field", "name": "x", "bit-offset": 0, "type": {"tag": ":int"}},
              {"tag": "field", "name": "y", "bit-offset": 32, "type": {"tag": ":int"}}]},
  {"tag": "enum", "name": "color", "fields": []},
  {"tag": "function", "name": "strlen", "location": "/usr/include/string.h:407:15",
   "variadic": false, "inline": false, "storage-class": "extern",
   "parameters": [{"tag": "parameter", "name": "s",
                   "type": {"tag": ":pointer", "type": {"tag": ":char"}}}],
   "return-type": {"tag": "size_t"}},
  {"tag": "function", "name": "printf", "location": "/usr/include/stdio.h:356:12",
   "variadic": true, "inline": false, "storage-class": "extern",
   "parameters": [{"tag": "parameter", "name": "format",
                   "type": {"tag": ":pointer", "type": {"tag": ":char"}}}],
   "return-type": {"tag": ":int"}},
  {"tag": "function", "name": "translate", "location": "geo.h:6:14",
   "parameters": [{"tag": "parameter", "name": "p", "type": {"tag": ":struct", "name": "point"}},
                  {"tag": "parameter", "name": "dx", "type": {"tag": ":double"}}],
   "return-type": {"tag": ":struct", "name": "point"}}
]"#;

// ============================================================================
// configuration
// ============================================================================

#[test]
fn test_missing_library_fails_before_reading_input() {
    ffigen()
        .write_stdin("this is not json")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--library"));
}

#[test]
fn test_short_library_flag() {
    ffigen()
        .args(["-l", "libc.so.6"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deno.dlopen(\"libc.so.6\", symbols)"));
}

#[test]
fn test_library_from_environment() {
    ffigen()
        .env("FFIGEN_LIBRARY", "libenv.so")
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deno.dlopen(\"libenv.so\", symbols)"));
}

#[test]
fn test_invalid_emit_format() {
    ffigen()
        .args(["--library", "libc.so.6", "--emit", "yaml"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid emit format 'yaml'"));
}

// ============================================================================
// generation
// ============================================================================

#[test]
fn test_generates_bindings_from_stdin() {
    ffigen()
        .args(["--library", "libgeo.so"])
        .write_stdin(STDIO_DECLS)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "  // strlen @ /usr/include/string.h:407:15\n  \"strlen\": { parameters: [\"pointer\"], result: \"u64\" },",
        ))
        .stdout(predicate::str::contains(
            "\"translate\": { parameters: [{ struct: [\"i32\", \"i32\"] }, \"f64\"], result: { struct: [\"i32\", \"i32\"] } },",
        ))
        .stdout(predicate::str::contains("\"printf\"").not())
        .stdout(predicate::str::contains("export default library.symbols;"))
        .stderr(predicate::str::contains("skipping function `printf`"))
        .stderr(predicate::str::contains("variadic"))
        .stderr(predicate::str::contains("ignoring `enum` records"))
        .stderr(predicate::str::contains("enum: 1"))
        .stderr(predicate::str::contains(
            "functions: total=3 generated=2 skipped=1",
        ))
        .stderr(predicate::str::contains(
            "typedefs:  total=2 generated=2 skipped=0",
        ));
}

#[test]
fn test_empty_input_yields_empty_module() {
    ffigen()
        .args(["--library", "libnone.so"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::contains("const symbols = {\n} as const;"))
        .stderr(predicate::str::contains(
            "functions: total=0 generated=0 skipped=0",
        ))
        .stderr(predicate::str::contains(
            "typedefs:  total=0 generated=0 skipped=0",
        ));
}

#[test]
fn test_unmapped_parameter_is_reported() {
    let decls = r#"[{"tag": "function", "name": "fclose", "location": "stdio.h:178:12",
        "parameters": [{"tag": "parameter", "name": "stream", "type": {"tag": "FILE"}}],
        "return-type": {"tag": ":int"}}]"#;

    ffigen()
        .args(["--library", "libc.so.6"])
        .write_stdin(decls)
        .assert()
        .success()
        .stdout(predicate::str::contains("fclose").not())
        .stderr(predicate::str::contains(
            "skipping function `fclose` @ stdio.h:178:12: parameter `stream` has unmapped type `FILE`",
        ))
        .stderr(predicate::str::contains("no functions could be bound"))
        .stderr(predicate::str::contains(
            "functions: total=1 generated=0 skipped=1",
        ));
}

#[test]
fn test_duplicate_declaration_is_reported() {
    let decls = r#"[
      {"tag": "function", "name": "abs", "location": "stdlib.h:980:12",
       "parameters": [{"tag": "parameter", "name": "x", "type": {"tag": ":int"}}],
       "return-type": {"tag": ":int"}},
      {"tag": "function", "name": "abs", "location": "math.h:12:5",
       "parameters": [{"tag": "parameter", "name": "x", "type": {"tag": ":int"}}],
       "return-type": {"tag": ":int"}}
    ]"#;

    ffigen()
        .args(["--library", "libc.so.6"])
        .write_stdin(decls)
        .assert()
        .success()
        .stdout(predicate::str::contains("// abs @ stdlib.h:980:12"))
        .stderr(predicate::str::contains(
            "skipping function `abs` @ math.h:12:5: already bound by an earlier declaration",
        ))
        .stderr(predicate::str::contains(
            "functions: total=2 generated=1 skipped=1",
        ));
}

#[test]
fn test_typedef_of_struct_declared_later() {
    let decls = r#"[
      {"tag": "typedef", "name": "point_t", "location": "geo.h:1:22",
       "type": {"tag": ":struct", "name": "point"}},
      {"tag": "struct", "name": "point", "location": "geo.h:2:8",
       "fields": [{"tag": "field", "name": "x", "type": {"tag": ":int"}}]},
      {"tag": "function", "name": "origin", "location": "geo.h:5:9",
       "parameters": [], "return-type": {"tag": "point_t"}}
    ]"#;

    ffigen()
        .args(["--library", "libgeo.so"])
        .write_stdin(decls)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"origin\": { parameters: [], result: { struct: [\"i32\"] } },",
        ))
        .stderr(predicate::str::contains(
            "typedefs:  total=2 generated=2 skipped=0",
        ));
}

#[test]
fn test_record_without_tag_is_tallied() {
    let decls = r#"[
      {"name": "stray"},
      {"tag": "function", "name": "getpid", "location": "unistd.h:650:16",
       "parameters": [], "return-type": {"tag": ":int"}}
    ]"#;

    ffigen()
        .args(["--library", "libc.so.6"])
        .write_stdin(decls)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"getpid\""))
        .stderr(predicate::str::contains("<missing>: 1"));
}

#[test]
fn test_quiet_suppresses_skip_lines_but_not_summary() {
    ffigen()
        .args(["--library", "libgeo.so", "--quiet"])
        .write_stdin(STDIO_DECLS)
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping").not())
        .stderr(predicate::str::contains("Summary:"));
}

#[test]
fn test_input_and_output_files() {
    let tmp = temp_dir();
    let input = tmp.path().join("decls.json");
    let output = tmp.path().join("bindings.ts");
    fs::write(&input, STDIO_DECLS).unwrap();

    ffigen()
        .args(["--library", "libgeo.so", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let bindings = fs::read_to_string(&output).unwrap();
    assert!(bindings.contains("\"strlen\""));
    assert!(bindings.contains("Deno.dlopen(\"libgeo.so\", symbols)"));
}

#[test]
fn test_emit_json() {
    let output = ffigen()
        .args(["--library", "libgeo.so", "--emit", "json"])
        .write_stdin(STDIO_DECLS)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["strlen"]["result"], "u64");
    assert_eq!(value["translate"]["parameters"][1], "f64");
    assert!(value.get("printf").is_none());
}

// ============================================================================
// fatal input errors
// ============================================================================

#[test]
fn test_bad_parameter_tag_aborts() {
    let decls = r#"[{"tag": "function", "name": "f", "location": "a.h:1:1",
        "parameters": [{"tag": "field", "name": "x", "type": {"tag": ":int"}}],
        "return-type": {"tag": ":int"}}]"#;

    ffigen()
        .args(["--library", "liba.so"])
        .write_stdin(decls)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "parameter `x` of `f` has tag `field`, expected `parameter`",
        ))
        .stderr(predicate::str::contains("--> a.h:1:1"));
}

#[test]
fn test_void_parameter_aborts() {
    let decls = r#"[{"tag": "function", "name": "g",
        "parameters": [{"tag": "parameter", "name": "v", "type": {"tag": ":void"}}],
        "return-type": {"tag": ":void"}}]"#;

    ffigen()
        .args(["--library", "liba.so"])
        .write_stdin(decls)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parameter `v` of `g` has type void"));
}

#[test]
fn test_non_array_input_aborts() {
    ffigen()
        .args(["--library", "liba.so"])
        .write_stdin(r#"{"tag": "typedef"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON array"));
}

#[test]
fn test_missing_input_file() {
    let tmp = temp_dir();

    ffigen()
        .args(["--library", "liba.so", "--input"])
        .arg(tmp.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read declarations"));
}
