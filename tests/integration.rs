//! End-to-end tests: a realistic protocol definition parsed whole, serialized
//! key order, and loader extension dispatch.

use pdl2json::{load, parse, parse_with_options, Error, ParseOptions};
use serde_json::json;

const LOG_PROTO: &str = "\
version
  major 1
  minor 3

# Provides access to log entries.
domain Log
  depends on Runtime

  # A log entry.
  type LogEntry extends object
    properties
      string source
      string text
      optional number timestamp

  type Level extends string
    enum
      verbose
      info
      error

  # Clears the log.
  command clear
  command startViolationsReport
    parameters
      array of ViolationSetting config
    returns
      LogEntry entry
  deprecated command disable
    redirect Runtime

  event entryAdded
    parameters
      LogEntry entry

experimental domain Runtime
  type RemoteObjectId extends string
  command evaluate
    parameters
      string expression
      optional boolean silent
      experimental binary context
";

#[test]
fn full_protocol_tree() {
    let doc = parse(LOG_PROTO, "log.pdl").expect("parse");
    assert_eq!(doc["version"], json!({"major": "1", "minor": "3"}));
    assert_eq!(
        doc["domains"][0],
        json!({
            "domain": "Log",
            "description": "Provides access to log entries.",
            "dependencies": ["Runtime"],
            "types": [
                {
                    "id": "LogEntry",
                    "description": "A log entry.",
                    "type": "object",
                    "properties": [
                        {"name": "source", "type": "string"},
                        {"name": "text", "type": "string"},
                        {"name": "timestamp", "optional": true, "type": "number"}
                    ]
                },
                {
                    "id": "Level",
                    "type": "string",
                    "enum": ["verbose", "info", "error"]
                }
            ],
            "commands": [
                {"name": "clear", "description": "Clears the log."},
                {
                    "name": "startViolationsReport",
                    "parameters": [{
                        "name": "config",
                        "type": "array",
                        "items": {"$ref": "ViolationSetting"}
                    }],
                    "returns": [{"name": "entry", "$ref": "LogEntry"}]
                },
                {"name": "disable", "deprecated": true, "redirect": "Runtime"}
            ],
            "events": [{
                "name": "entryAdded",
                "parameters": [{"name": "entry", "$ref": "LogEntry"}]
            }]
        })
    );
    assert_eq!(
        doc["domains"][1],
        json!({
            "domain": "Runtime",
            "experimental": true,
            "types": [{"id": "RemoteObjectId", "type": "string"}],
            "commands": [{
                "name": "evaluate",
                "parameters": [
                    {"name": "expression", "type": "string"},
                    {"name": "silent", "optional": true, "type": "boolean"},
                    {"name": "context", "experimental": true, "type": "binary"}
                ]
            }]
        })
    );
}

#[test]
fn binary_coercion_differs_only_in_binary_fields() {
    let off = parse(LOG_PROTO, "log.pdl").expect("parse");
    let on = parse_with_options(
        LOG_PROTO,
        "log.pdl",
        ParseOptions {
            map_binary_to_string: true,
        },
    )
    .expect("parse");

    assert_eq!(
        on["domains"][1]["commands"][0]["parameters"][2]["type"],
        "string"
    );
    let mut patched = on.clone();
    patched["domains"][1]["commands"][0]["parameters"][2]["type"] = json!("binary");
    assert_eq!(patched, off);
}

#[test]
fn serialized_key_order_is_source_order() {
    let src = "\
version
  major 1
  minor 0

domain Demo
  command run
    parameters
      optional integer depth
";
    let doc = parse(src, "order.pdl").expect("parse");
    let text = serde_json::to_string(&doc).expect("serialize");
    assert_eq!(
        text,
        r#"{"version":{"major":"1","minor":"0"},"domains":[{"domain":"Demo","commands":[{"name":"run","parameters":[{"name":"depth","optional":true,"type":"integer"}]}]}]}"#
    );
}

#[test]
fn domain_lists_serialize_in_first_use_order() {
    // Commands declared before types stay before them in the output.
    let src = "\
domain D
  command go
  type Id extends string
";
    let doc = parse(src, "firstuse.pdl").expect("parse");
    let text = serde_json::to_string(&doc).expect("serialize");
    assert_eq!(
        text,
        r#"{"version":{},"domains":[{"domain":"D","commands":[{"name":"go"}],"types":[{"id":"Id","type":"string"}]}]}"#
    );
}

// ==================== Loader dispatch ====================

#[test]
fn load_dispatches_on_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pdl_path = dir.path().join("browser_protocol.pdl");
    let json_path = dir.path().join("protocol.json");
    std::fs::write(&pdl_path, "domain Demo\n").expect("write pdl");
    std::fs::write(
        &json_path,
        r#"{"version": {"major": "1", "minor": "0"}, "domains": []}"#,
    )
    .expect("write json");

    let src = std::fs::read_to_string(&pdl_path).expect("read pdl");
    let name = pdl_path.to_str().expect("utf-8 path");
    let doc = load(&src, name, ParseOptions::default()).expect("load pdl");
    assert_eq!(doc["domains"][0]["domain"], "Demo");

    let src = std::fs::read_to_string(&json_path).expect("read json");
    let name = json_path.to_str().expect("utf-8 path");
    let doc = load(&src, name, ParseOptions::default()).expect("load json");
    assert_eq!(doc["version"]["major"], "1");
    assert_eq!(doc["domains"], json!([]));
}

#[test]
fn load_propagates_syntax_errors() {
    let err = load("garbage here\n", "broken.pdl", ParseOptions::default())
        .expect_err("should fail");
    match err {
        Error::Syntax(e) => {
            assert_eq!(e.source_id, "broken.pdl");
            assert_eq!(e.line, 0);
            assert_eq!(e.text, "garbage here");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn load_rejects_bad_json() {
    let err = load("not json", "protocol.json", ParseOptions::default())
        .expect_err("should fail");
    assert!(matches!(err, Error::Json(_)));
}
