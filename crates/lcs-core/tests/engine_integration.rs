//! Integration tests for the configuration engine
//!
//! These tests drive a realistic template schema through derivation, a
//! scripted session and materialization.

use lcs_core::{
    derive_prompts, materialize, run_session, AcceptDefaults, Answers, Error, PromptBackend,
    PromptDescriptor, QuestionKind, Result, SchemaNode,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;

const LCS_SCHEMA: &str = r##"{
  "title": "LCS Configuration",
  "description": "Configuration for a lambda container service",
  "type": "object",
  "properties": {
    "serviceName": {
      "type": "string",
      "description": "Service name",
      "pattern": "^[a-z0-9-]+$",
      "default": "my-service"
    },
    "aws": {
      "type": "object",
      "description": "AWS settings",
      "properties": {
        "accountId": { "type": "string", "description": "AWS account", "pattern": "^[0-9]{12}$" },
        "region": { "type": "string", "enum": ["us-east-1", "eu-west-1", "ap-southeast-2"], "default": "eu-west-1" },
        "memory": { "type": "integer", "default": 512 }
      }
    },
    "branding": {
      "type": "object",
      "properties": {
        "color": { "type": "string", "pattern": "^#[0-9a-fA-F]{6}$", "default": "#112233" },
        "homepage": { "type": "string", "format": "uri" }
      }
    },
    "origins": { "type": "array", "description": "Allowed origins", "default": ["localhost"] },
    "tracing": { "type": "boolean", "default": false },
    "extra": { "description": "Free-form" }
  }
}"##;

/// Answers keyed by path; unknown paths fail like an interrupted terminal
struct ByPath(HashMap<&'static str, Value>);

impl PromptBackend for ByPath {
    fn ask(&mut self, prompt: &PromptDescriptor) -> Result<Value> {
        let answer = self
            .0
            .get(prompt.path.as_str())
            .cloned()
            .unwrap_or_else(|| prompt.initial_answer());
        if let Value::String(text) = &answer {
            if let Err(message) = prompt.validate(text) {
                return Err(Error::prompt(prompt.path.clone(), message));
            }
        }
        Ok(answer)
    }
}

fn schema() -> SchemaNode {
    SchemaNode::from_json_str(LCS_SCHEMA).unwrap()
}

#[test]
fn test_prompt_count_matches_leaf_count() {
    let schema = schema();
    let prompts = derive_prompts(&schema);
    assert_eq!(prompts.len(), schema.leaf_count());
    assert_eq!(prompts.len(), 9);
}

#[test]
fn test_prompt_order_is_declaration_order() {
    let prompts = derive_prompts(&schema());
    let paths: Vec<&str> = prompts.iter().map(|p| p.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "serviceName",
            "aws.accountId",
            "aws.region",
            "aws.memory",
            "branding.color",
            "branding.homepage",
            "origins",
            "tracing",
            "extra",
        ]
    );
}

#[test]
fn test_question_kinds_and_labels() {
    let prompts = derive_prompts(&schema());
    let by_path: HashMap<&str, &PromptDescriptor> =
        prompts.iter().map(|p| (p.path.as_str(), p)).collect();

    assert!(matches!(
        by_path["aws.region"].kind,
        QuestionKind::Select { .. }
    ));
    assert_eq!(by_path["aws.memory"].kind, QuestionKind::Number);
    assert_eq!(by_path["tracing"].kind, QuestionKind::Confirm);
    assert_eq!(by_path["aws.accountId"].label, "[AWS] AWS account");
    assert_eq!(by_path["origins"].label, "Allowed origins (comma-separated):");
    assert!(by_path["branding.homepage"]
        .label
        .starts_with("[BRANDING] Enter value for"));
}

#[test]
fn test_defaults_round_trip() {
    let config = materialize(&Answers::new(), &schema());
    assert_eq!(
        Value::Object(config),
        json!({
            "serviceName": "my-service",
            "aws": { "region": "eu-west-1", "memory": 512 },
            "branding": { "color": "#112233" },
            "origins": ["localhost"],
            "tracing": false
        })
    );
}

#[test]
fn test_every_leaf_defaulted_reproduces_defaults_exactly() {
    let schema = SchemaNode::from_json_str(
        r#"{"properties":{
            "a":{"type":"object","properties":{"b":{"type":"string","default":"d"},"c":{"type":"number","default":5}}},
            "e":{"type":"boolean","default":true}
        }}"#,
    )
    .unwrap();

    let config = materialize(&Answers::new(), &schema);
    assert_eq!(
        Value::Object(config),
        json!({ "a": { "b": "d", "c": 5 }, "e": true })
    );
}

#[test]
fn test_full_session_materializes_typed_config() {
    let schema = schema();
    let prompts = derive_prompts(&schema);
    let backend = ByPath(HashMap::from([
        ("serviceName", json!("orders-api")),
        ("aws.accountId", json!("123456789012")),
        ("aws.region", json!("ap-southeast-2")),
        ("aws.memory", json!(1024)),
        ("branding.homepage", json!("https://orders.example.com")),
        ("origins", json!(" a.com, b.com ,,c.com ")),
        ("tracing", json!(true)),
        ("extra", json!("{\"raw\":true}")),
    ]));

    let answers = run_session(&prompts, backend).unwrap();
    let config = materialize(&answers, &schema);

    let rendered = serde_json::to_string_pretty(&config).unwrap();
    let expected = r##"{
  "serviceName": "orders-api",
  "aws": {
    "accountId": "123456789012",
    "region": "ap-southeast-2",
    "memory": 1024
  },
  "branding": {
    "color": "#112233",
    "homepage": "https://orders.example.com"
  },
  "origins": [
    "a.com",
    "b.com",
    "c.com"
  ],
  "tracing": true,
  "extra": "{\"raw\":true}"
}"##;
    assert_eq!(rendered, expected);
}

#[test]
fn test_validator_rejection_surfaces_as_error() {
    let prompts = derive_prompts(&schema());
    let backend = ByPath(HashMap::from([("aws.accountId", json!("12345"))]));

    let err = run_session(&prompts, backend).unwrap_err();
    match err {
        Error::Prompt { path, message } => {
            assert_eq!(path, "aws.accountId");
            assert_eq!(message, "AWS Account ID must be exactly 12 digits");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_materialize_is_idempotent() {
    let schema = schema();
    let answers: Answers = [
        ("aws.memory", json!("2048")),
        ("origins", json!("x,y")),
        ("unknown.path", json!("kept")),
    ]
    .into_iter()
    .collect();

    let first = materialize(&answers, &schema);
    let second = materialize(&answers, &schema);
    assert_eq!(first, second);
    assert_eq!(first["aws"]["memory"], json!(2048));
    assert_eq!(first["unknown"]["path"], json!("kept"));
}

#[test]
fn test_suppressed_field_is_not_falsified() {
    let schema = SchemaNode::from_json_str(
        r#"{"properties":{
            "enabled":{"type":"boolean"},
            "count":{"type":"integer"},
            "name":{"type":"string"}
        }}"#,
    )
    .unwrap();
    let answers: Answers = [("name", json!("only"))].into_iter().collect();

    let config = materialize(&answers, &schema);
    assert_eq!(Value::Object(config), json!({ "name": "only" }));
}

#[test]
fn test_accept_defaults_session() {
    let schema = schema();
    let answers = run_session(&derive_prompts(&schema), AcceptDefaults).unwrap();
    let config = materialize(&answers, &schema);

    assert_eq!(config["aws"]["region"], json!("eu-west-1"));
    assert_eq!(config["aws"]["accountId"], json!(""));
    assert_eq!(config["origins"], json!(["localhost"]));
    assert_eq!(config["tracing"], json!(false));
}

#[test]
fn test_schema_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LCS_SCHEMA.as_bytes()).unwrap();

    let schema = SchemaNode::from_file(file.path()).unwrap();
    assert_eq!(schema.title.as_deref(), Some("LCS Configuration"));
    assert_eq!(derive_prompts(&schema).len(), 9);
}
