// crates/vault-gateway-contract/tests/tool_schemas.rs
// ============================================================================
// Module: Tool Schema Tests
// Description: Compile and exercise every tool input schema.
// Purpose: Keep the advertised tool surface consistent with the data model.
// Dependencies: vault-gateway-contract, jsonschema
// ============================================================================

//! Tool schema contract tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions favor direct unwraps."
)]

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;
use vault_gateway_contract::ToolName;
use vault_gateway_contract::tool_contract;
use vault_gateway_contract::tool_definitions;
use vault_gateway_core::ItemCategory;

fn compile(tool: ToolName) -> Validator {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&tool_contract(tool).input_schema)
        .unwrap_or_else(|err| panic!("{tool} schema failed to compile: {err}"))
}

#[test]
fn definitions_follow_canonical_order() {
    let names: Vec<ToolName> = tool_definitions().into_iter().map(|def| def.name).collect();
    assert_eq!(names, ToolName::all().to_vec());
}

#[test]
fn every_schema_compiles_and_is_closed() {
    for tool in ToolName::all() {
        let schema = tool_contract(*tool).input_schema;
        assert_eq!(schema["additionalProperties"], Value::Bool(false), "{tool}");
        assert_eq!(schema["$schema"], "https://json-schema.org/draft/2020-12/schema");
        let validator = compile(*tool);
        assert!(!validator.is_valid(&json!({"unexpected": true})), "{tool} accepted unknown key");
    }
}

#[test]
fn definitions_serialize_with_mcp_keys() {
    let value = serde_json::to_value(&tool_definitions()[0]).unwrap();
    assert_eq!(value["name"], "list_vaults");
    assert!(value.get("inputSchema").is_some());
    assert_eq!(value["annotations"]["readOnlyHint"], true);
}

#[test]
fn destructive_tools_are_annotated() {
    for tool in [ToolName::UpdateItem, ToolName::PatchItem, ToolName::DeleteItem] {
        let annotations = tool_contract(tool).annotations;
        assert!(annotations.destructive_hint, "{tool}");
        assert!(!annotations.read_only_hint, "{tool}");
    }
    assert!(!tool_contract(ToolName::CreateItem).annotations.idempotent_hint);
}

#[test]
fn category_enum_matches_model() {
    let schema = tool_contract(ToolName::CreateItem).input_schema;
    let advertised: Vec<String> = schema["properties"]["category"]["enum"]
        .as_array()
        .unwrap()
        .iter()
        .map(|value| value.as_str().unwrap().to_string())
        .collect();
    let expected: Vec<String> =
        ItemCategory::ALL.iter().map(|category| category.as_str().to_string()).collect();
    assert_eq!(advertised, expected);
}

#[test]
fn create_item_schema_accepts_valid_and_rejects_unknown_category() {
    let validator = compile(ToolName::CreateItem);
    let valid = json!({
        "vaultId": "v1",
        "title": "Prod DB",
        "category": "DATABASE",
        "tags": ["pg"],
        "fields": [{"label": "password", "type": "CONCEALED", "purpose": "PASSWORD", "generate": true}]
    });
    assert!(validator.is_valid(&valid));

    let mut bad_category = valid.clone();
    bad_category["category"] = json!("SPACESHIP");
    assert!(!validator.is_valid(&bad_category));

    let mut bad_field = valid;
    bad_field["fields"][0]["type"] = json!("BLOB");
    let errors: Vec<String> =
        validator.iter_errors(&bad_field).map(|err| err.to_string()).collect();
    assert!(!errors.is_empty());
}

#[test]
fn update_item_requires_item_id() {
    let validator = compile(ToolName::UpdateItem);
    assert!(!validator.is_valid(&json!({"vaultId": "v1", "title": "t", "category": "LOGIN"})));
    let with_id = json!({"vaultId": "v1", "itemId": "i1", "title": "t", "category": "LOGIN"});
    assert!(validator.is_valid(&with_id));
}

#[test]
fn patch_item_rejects_unknown_operations() {
    let validator = compile(ToolName::PatchItem);
    let ok = json!({
        "vaultId": "v",
        "itemId": "i",
        "operations": [{"op": "replace", "path": "/title", "value": "x"}]
    });
    let bad = json!({"vaultId": "v", "itemId": "i", "operations": [{"op": "merge", "path": "/"}]});
    let empty = json!({"vaultId": "v", "itemId": "i", "operations": []});
    assert!(validator.is_valid(&ok));
    assert!(!validator.is_valid(&bad));
    assert!(!validator.is_valid(&empty));
}

#[test]
fn list_schemas_bound_paging() {
    let validator = compile(ToolName::ListVaults);
    assert!(validator.is_valid(&json!({"limit": 5, "offset": 0, "responseFormat": "json"})));
    assert!(!validator.is_valid(&json!({"limit": 0})));
    assert!(!validator.is_valid(&json!({"offset": -1})));
    assert!(!validator.is_valid(&json!({"responseFormat": "html"})));
}
