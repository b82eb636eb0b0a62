// crates/vault-gateway-contract/src/tooling.rs
// ============================================================================
// Module: Tool Contracts
// Description: Descriptions and input schemas for every gateway tool.
// Purpose: Generate the tools/list surface and argument validation schemas.
// Dependencies: serde_json, vault-gateway-core
// ============================================================================

//! ## Overview
//! Every tool input schema is a closed JSON Schema (draft 2020-12) object:
//! unknown arguments are rejected and enumerations are closed. Argument keys
//! are camelCase.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;
use vault_gateway_core::FieldPurpose;
use vault_gateway_core::FieldType;
use vault_gateway_core::ItemCategory;
use vault_gateway_core::PatchOp;
use vault_gateway_core::ToolName;

use crate::types::ToolAnnotations;
use crate::types::ToolContract;
use crate::types::ToolDefinition;

// ============================================================================
// SECTION: Contracts
// ============================================================================

/// Returns every tool contract in canonical order.
#[must_use]
pub fn tool_contracts() -> Vec<ToolContract> {
    ToolName::all().iter().map(|tool| tool_contract(*tool)).collect()
}

/// Returns the MCP tool definitions for tool listing.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    tool_contracts()
        .into_iter()
        .map(|contract| ToolDefinition {
            name: contract.name,
            title: contract.title,
            description: contract.description,
            input_schema: contract.input_schema,
            annotations: contract.annotations,
        })
        .collect()
}

/// Returns the contract for one tool.
#[must_use]
pub fn tool_contract(tool: ToolName) -> ToolContract {
    match tool {
        ToolName::ListVaults => build_tool_contract(
            tool,
            "List Vaults",
            "List vaults the tenant token can access, optionally filtered with a backend filter \
             expression such as `name eq \"Production\"`.",
            tool_input_schema(
                &json!({
                    "filter": schema_for_string("Backend filter expression, e.g. name eq \"Production\"."),
                    "limit": schema_limit(),
                    "offset": schema_offset(),
                    "responseFormat": schema_response_format(),
                }),
                &[],
            ),
            vec!["Paginates locally; use nextOffset from the response to continue.".to_string()],
        ),
        ToolName::GetVault => build_tool_contract(
            tool,
            "Get Vault",
            "Fetch one vault's metadata, including its item count.",
            tool_input_schema(
                &json!({
                    "vaultId": schema_identifier("Vault identifier."),
                    "responseFormat": schema_response_format(),
                }),
                &["vaultId"],
            ),
            Vec::new(),
        ),
        ToolName::ListItems => build_tool_contract(
            tool,
            "List Items",
            "List item summaries in a vault, optionally filtered with a backend filter \
             expression such as `title eq \"Database\"`.",
            tool_input_schema(
                &json!({
                    "vaultId": schema_identifier("Vault identifier."),
                    "filter": schema_for_string("Backend filter expression, e.g. title eq \"Database\"."),
                    "limit": schema_limit(),
                    "offset": schema_offset(),
                    "responseFormat": schema_response_format(),
                }),
                &["vaultId"],
            ),
            vec!["Summaries omit field values; call get_item for full details.".to_string()],
        ),
        ToolName::GetItem => build_tool_contract(
            tool,
            "Get Item",
            "Fetch one item with its fields, sections, URLs and file references.",
            tool_input_schema(
                &json!({
                    "vaultId": schema_identifier("Vault identifier."),
                    "itemId": schema_identifier("Item identifier."),
                    "responseFormat": schema_response_format(),
                }),
                &["vaultId", "itemId"],
            ),
            vec!["The response includes secret field values.".to_string()],
        ),
        ToolName::CreateItem => build_tool_contract(
            tool,
            "Create Item",
            "Create an item in a vault. The item is always placed in the vault named by vaultId.",
            tool_input_schema(&item_properties(false), &["vaultId", "title", "category"]),
            vec!["Set generate on a field to have the backend generate its value.".to_string()],
        ),
        ToolName::UpdateItem => build_tool_contract(
            tool,
            "Update Item",
            "Replace an item with the supplied content. Omitted fields are removed; use \
             patch_item for partial changes.",
            tool_input_schema(&item_properties(true), &["vaultId", "itemId", "title", "category"]),
            vec!["Full replacement: send every field that should remain.".to_string()],
        ),
        ToolName::PatchItem => build_tool_contract(
            tool,
            "Patch Item",
            "Apply RFC 6902 JSON Patch operations to an item.",
            tool_input_schema(
                &json!({
                    "vaultId": schema_identifier("Vault identifier."),
                    "itemId": schema_identifier("Item identifier."),
                    "operations": {
                        "type": "array",
                        "minItems": 1,
                        "description": "JSON Patch operations applied in order.",
                        "items": patch_operation_schema(),
                    },
                    "responseFormat": schema_response_format(),
                }),
                &["vaultId", "itemId", "operations"],
            ),
            vec![
                "Operations are forwarded verbatim; the backend applies them atomically."
                    .to_string(),
            ],
        ),
        ToolName::DeleteItem => build_tool_contract(
            tool,
            "Delete Item",
            "Delete an item from a vault.",
            tool_input_schema(
                &json!({
                    "vaultId": schema_identifier("Vault identifier."),
                    "itemId": schema_identifier("Item identifier."),
                    "responseFormat": schema_response_format(),
                }),
                &["vaultId", "itemId"],
            ),
            vec!["Deletion cannot be undone through the gateway.".to_string()],
        ),
        ToolName::ListFiles => build_tool_contract(
            tool,
            "List Files",
            "List files attached to an item.",
            tool_input_schema(
                &json!({
                    "vaultId": schema_identifier("Vault identifier."),
                    "itemId": schema_identifier("Item identifier."),
                    "inlineContent": schema_inline_content(),
                    "limit": schema_limit(),
                    "offset": schema_offset(),
                    "responseFormat": schema_response_format(),
                }),
                &["vaultId", "itemId"],
            ),
            Vec::new(),
        ),
        ToolName::GetFile => build_tool_contract(
            tool,
            "Get File",
            "Fetch metadata for one attached file.",
            tool_input_schema(
                &json!({
                    "vaultId": schema_identifier("Vault identifier."),
                    "itemId": schema_identifier("Item identifier."),
                    "fileId": schema_identifier("File identifier."),
                    "inlineContent": schema_inline_content(),
                    "responseFormat": schema_response_format(),
                }),
                &["vaultId", "itemId", "fileId"],
            ),
            Vec::new(),
        ),
        ToolName::GetFileContent => build_tool_contract(
            tool,
            "Get File Content",
            "Download an attached file. Text content is returned as-is; binary content is \
             returned base64 encoded.",
            tool_input_schema(
                &json!({
                    "vaultId": schema_identifier("Vault identifier."),
                    "itemId": schema_identifier("Item identifier."),
                    "fileId": schema_identifier("File identifier."),
                    "responseFormat": schema_response_format(),
                }),
                &["vaultId", "itemId", "fileId"],
            ),
            vec!["Large files are truncated to the response character limit.".to_string()],
        ),
        ToolName::ListActivity => build_tool_contract(
            tool,
            "List Activity",
            "List recent API activity records for the tenant.",
            tool_input_schema(
                &json!({
                    "limit": schema_limit(),
                    "offset": schema_offset(),
                    "responseFormat": schema_response_format(),
                }),
                &[],
            ),
            vec![
                "The backend gives no continuation signal; hasMore is always false. Request the \
                 next offset to keep reading."
                    .to_string(),
            ],
        ),
        ToolName::GetHealth => build_tool_contract(
            tool,
            "Get Health",
            "Fetch backend health, including dependency status.",
            tool_input_schema(&json!({"responseFormat": schema_response_format()}), &[]),
            Vec::new(),
        ),
        ToolName::Heartbeat => build_tool_contract(
            tool,
            "Heartbeat",
            "Ping the backend heartbeat endpoint.",
            tool_input_schema(&json!({}), &[]),
            Vec::new(),
        ),
        ToolName::TestConnection => build_tool_contract(
            tool,
            "Test Connection",
            "Check whether the backend is reachable with the supplied credentials. Always \
             reports a status instead of failing.",
            tool_input_schema(&json!({"responseFormat": schema_response_format()}), &[]),
            Vec::new(),
        ),
    }
}

/// Builds a tool contract with annotations derived from the tool name.
fn build_tool_contract(
    name: ToolName,
    title: &str,
    description: &str,
    input_schema: Value,
    notes: Vec<String>,
) -> ToolContract {
    ToolContract {
        name,
        title: title.to_string(),
        description: description.to_string(),
        input_schema,
        annotations: ToolAnnotations {
            read_only_hint: name.is_read_only(),
            destructive_hint: name.is_destructive(),
            idempotent_hint: !matches!(name, ToolName::CreateItem | ToolName::PatchItem),
            open_world_hint: true,
        },
        notes,
    }
}

// ============================================================================
// SECTION: Item Schemas
// ============================================================================

/// Properties shared by the create and update tools.
fn item_properties(with_item_id: bool) -> Value {
    let mut properties = json!({
        "vaultId": schema_identifier("Vault identifier."),
        "title": {
            "type": "string",
            "minLength": 1,
            "description": "Item title."
        },
        "category": schema_enum(
            ItemCategory::ALL.iter().map(|category| category.as_str()),
            "Item category.",
        ),
        "urls": {
            "type": "array",
            "description": "Associated URLs.",
            "items": object_schema(
                &json!({
                    "href": schema_for_string("Target URL."),
                    "label": schema_for_string("Display label."),
                    "primary": {"type": "boolean", "description": "Primary URL flag."}
                }),
                &["href"],
            )
        },
        "tags": {
            "type": "array",
            "items": {"type": "string"},
            "description": "Item tags."
        },
        "favorite": {"type": "boolean", "description": "Mark the item as a favorite."},
        "sections": {
            "type": "array",
            "description": "Field sections.",
            "items": object_schema(
                &json!({
                    "id": schema_identifier("Section identifier."),
                    "label": schema_for_string("Section label.")
                }),
                &["id"],
            )
        },
        "fields": {
            "type": "array",
            "description": "Item fields.",
            "items": item_field_schema()
        },
        "responseFormat": schema_response_format(),
    });
    if with_item_id && let Value::Object(map) = &mut properties {
        map.insert("itemId".to_string(), schema_identifier("Item identifier."));
    }
    properties
}

/// Schema for one item field.
fn item_field_schema() -> Value {
    object_schema(
        &json!({
            "id": schema_identifier("Field identifier."),
            "type": schema_enum(FieldType::ALL.iter().map(|kind| kind.as_str()), "Field type."),
            "purpose": schema_enum(
                FieldPurpose::ALL.iter().map(|purpose| purpose.as_str()),
                "Semantic purpose.",
            ),
            "label": schema_for_string("Field label."),
            "value": schema_for_string("Field value."),
            "section": object_schema(
                &json!({"id": schema_identifier("Section identifier.")}),
                &["id"],
            ),
            "generate": {"type": "boolean", "description": "Generate the value on the backend."}
        }),
        &[],
    )
}

/// Schema for one JSON Patch operation.
fn patch_operation_schema() -> Value {
    object_schema(
        &json!({
            "op": schema_enum(PatchOp::ALL.iter().map(|op| op.as_str()), "Operation kind."),
            "path": schema_for_string("Target JSON pointer."),
            "value": {"description": "Operation value."},
            "from": schema_for_string("Source JSON pointer for move and copy.")
        }),
        &["op", "path"],
    )
}

// ============================================================================
// SECTION: Schema Helpers
// ============================================================================

/// Builds a standard tool input schema wrapper.
fn tool_input_schema(properties: &Value, required: &[&str]) -> Value {
    with_schema(object_schema(properties, required))
}

/// Builds a closed object schema.
fn object_schema(properties: &Value, required: &[&str]) -> Value {
    let required_values: Vec<Value> =
        required.iter().map(|value| Value::String((*value).to_string())).collect();
    json!({
        "type": "object",
        "required": required_values,
        "properties": properties,
        "additionalProperties": false
    })
}

/// Adds a `$schema` header to a top-level JSON schema.
fn with_schema(schema: Value) -> Value {
    let Value::Object(mut map) = schema else {
        return schema;
    };
    map.insert(
        String::from("$schema"),
        Value::String(String::from("https://json-schema.org/draft/2020-12/schema")),
    );
    Value::Object(map)
}

/// Returns a schema describing identifiers.
fn schema_identifier(description: &str) -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": description
    })
}

/// Returns a plain string schema.
fn schema_for_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Returns a closed string enumeration schema.
fn schema_enum<'a>(values: impl Iterator<Item = &'a str>, description: &str) -> Value {
    let values: Vec<Value> = values.map(|value| Value::String(value.to_string())).collect();
    json!({
        "type": "string",
        "enum": values,
        "description": description
    })
}

/// Page size schema.
fn schema_limit() -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "description": "Maximum records to return. Defaults to the server page size."
    })
}

/// Page offset schema.
fn schema_offset() -> Value {
    json!({
        "type": "integer",
        "minimum": 0,
        "default": 0,
        "description": "Records to skip before the page starts."
    })
}

/// Inline file content flag schema.
fn schema_inline_content() -> Value {
    json!({
        "type": "boolean",
        "default": false,
        "description": "Include base64 file content in the metadata."
    })
}

/// Response format selector schema.
fn schema_response_format() -> Value {
    json!({
        "type": "string",
        "enum": ["markdown", "json"],
        "default": "markdown",
        "description": "Render as a Markdown document or as raw JSON."
    })
}
