// crates/vault-gateway-mcp/src/validation.rs
// ============================================================================
// Module: Tool Argument Validation
// Description: Compiled JSON Schema checks for tool call arguments.
// Purpose: Reject malformed arguments with per-field messages before dispatch.
// Dependencies: jsonschema, serde_json, vault-gateway-contract
// ============================================================================

//! ## Overview
//! Each tool's input schema is split into required keys, allowed keys and one
//! compiled validator per property. Splitting per property keeps every
//! message attached to the argument that caused it, which is what callers see
//! in the `fields` map of a validation error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use vault_gateway_contract::ToolDefinition;
use vault_gateway_core::BackendError;
use vault_gateway_core::ToolName;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Compiled validators for every tool.
pub struct ArgumentValidators {
    /// Per-tool validators.
    tools: BTreeMap<ToolName, ToolArguments>,
}

/// Compiled validator for one tool.
struct ToolArguments {
    /// Keys that must be present.
    required: Vec<String>,
    /// Validator per allowed key.
    properties: BTreeMap<String, Validator>,
}

// ============================================================================
// SECTION: Implementation
// ============================================================================

impl ArgumentValidators {
    /// Compiles validators for the given tool definitions.
    ///
    /// # Errors
    ///
    /// Returns a message naming the tool and property whose schema fails to
    /// compile.
    pub fn compile(definitions: &[ToolDefinition]) -> Result<Self, String> {
        let mut tools = BTreeMap::new();
        for definition in definitions {
            tools.insert(definition.name, ToolArguments::compile(definition)?);
        }
        Ok(Self {
            tools,
        })
    }

    /// Validates arguments for a tool.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Validation`] with messages keyed by argument
    /// name.
    pub fn validate(&self, tool: ToolName, arguments: &Value) -> Result<(), BackendError> {
        let Some(validator) = self.tools.get(&tool) else {
            return Ok(());
        };
        let fields = validator.check(arguments);
        if fields.is_empty() {
            Ok(())
        } else {
            Err(BackendError::validation(format!("invalid arguments for {tool}"), fields))
        }
    }
}

impl ToolArguments {
    fn compile(definition: &ToolDefinition) -> Result<Self, String> {
        let schema = &definition.input_schema;
        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|keys| keys.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();
        let mut properties = BTreeMap::new();
        if let Some(map) = schema.get("properties").and_then(Value::as_object) {
            for (name, property) in map {
                let validator = jsonschema::options()
                    .with_draft(Draft::Draft202012)
                    .build(property)
                    .map_err(|err| format!("{}.{name}: {err}", definition.name))?;
                properties.insert(name.clone(), validator);
            }
        }
        Ok(Self {
            required,
            properties,
        })
    }

    fn check(&self, arguments: &Value) -> BTreeMap<String, Vec<String>> {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let Some(map) = arguments.as_object() else {
            fields.insert("arguments".to_string(), vec!["must be a JSON object".to_string()]);
            return fields;
        };
        for key in &self.required {
            if !map.contains_key(key) {
                fields.entry(key.clone()).or_default().push("is required".to_string());
            }
        }
        for (key, value) in map {
            match self.properties.get(key) {
                None => {
                    fields
                        .entry(key.clone())
                        .or_default()
                        .push("is not a recognized argument".to_string());
                }
                Some(validator) => {
                    let messages: Vec<String> =
                        validator.iter_errors(value).map(|err| err.to_string()).collect();
                    if !messages.is_empty() {
                        fields.entry(key.clone()).or_default().extend(messages);
                    }
                }
            }
        }
        fields
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
