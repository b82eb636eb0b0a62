// crates/vault-gateway-mcp/src/format.rs
// ============================================================================
// Module: Response Formatter
// Description: JSON and Markdown rendering of tool results and failures.
// Purpose: Turn backend payloads into MCP text content blocks.
// Dependencies: serde, serde_json, vault-gateway-core
// ============================================================================

//! ## Overview
//! Tool results are rendered either as pretty-printed JSON, which parses back
//! to the original payload, or as a Markdown document with per-entity table
//! layouts. Failures always render as a single text block flagged as an
//! error, carrying the message and a structured detail object.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use vault_gateway_core::BackendError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Cell placeholder for missing values.
const MISSING: &str = "-";
/// Column cap for generic tables.
const GENERIC_MAX_COLUMNS: usize = 5;
/// Bytes per kilobyte.
const KIB: u64 = 1024;
/// Bytes per megabyte.
const MIB: u64 = KIB * 1024;
/// Bytes per gigabyte.
const GIB: u64 = MIB * 1024;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Output format requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown document.
    #[default]
    Markdown,
    /// Pretty-printed JSON.
    Json,
}

/// Entity kind driving Markdown layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Vault records.
    Vault,
    /// Item records.
    Item,
    /// File records.
    File,
    /// Activity records.
    Activity,
    /// Health report.
    Health,
    /// Connectivity probe result.
    Connection,
    /// Heartbeat reply.
    Heartbeat,
    /// Deletion confirmation.
    Deletion,
    /// Downloaded file content.
    FileContent,
    /// Anything else.
    Generic,
}

impl EntityKind {
    /// Plural label used in headings and summaries.
    const fn plural(self) -> &'static str {
        match self {
            Self::Vault => "vaults",
            Self::Item => "items",
            Self::File => "files",
            Self::Activity => "activity records",
            Self::Health => "health reports",
            Self::Connection => "connection checks",
            Self::Heartbeat => "heartbeats",
            Self::Deletion => "deletions",
            Self::FileContent => "file downloads",
            Self::Generic => "records",
        }
    }

    /// Heading used for collections.
    const fn heading(self) -> &'static str {
        match self {
            Self::Vault => "Vaults",
            Self::Item => "Items",
            Self::File => "Files",
            Self::Activity => "Activity",
            _ => "Results",
        }
    }
}

/// MCP tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    /// Content blocks.
    pub content: Vec<ToolContent>,
    /// Marks the result as a failure.
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
    /// Failure code for audit; never serialized.
    #[serde(skip)]
    pub error_code: Option<String>,
}

/// MCP content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    /// Text block.
    Text {
        /// Rendered text.
        text: String,
    },
}

impl ToolOutput {
    /// Builds a successful single-text result.
    #[must_use]
    pub fn text(text: String) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text,
            }],
            is_error: false,
            error_code: None,
        }
    }

    /// Returns the text of the first block.
    #[must_use]
    pub fn first_text(&self) -> &str {
        self.content.first().map_or("", |ToolContent::Text { text }| text.as_str())
    }
}

/// Serde helper for skipping false flags.
#[allow(clippy::trivially_copy_pass_by_ref, reason = "Serde skip predicates take references.")]
const fn is_false(value: &bool) -> bool {
    !*value
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a payload in the requested format.
#[must_use]
pub fn render(payload: &Value, format: ResponseFormat, kind: EntityKind) -> String {
    match format {
        ResponseFormat::Json => {
            serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
        }
        ResponseFormat::Markdown => render_markdown(payload, kind),
    }
}

/// Renders a failure as a single error block.
#[must_use]
pub fn render_error(error: &BackendError) -> ToolOutput {
    let suffix = if error.is_retryable() { " (retryable)" } else { "" };
    let details = serde_json::to_value(error.details())
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| "{}".to_string());
    let text = format!("Error: {}{suffix}\n\nDetails:\n{details}", error.message());
    ToolOutput {
        content: vec![ToolContent::Text {
            text,
        }],
        is_error: true,
        error_code: Some(error.code().to_string()),
    }
}

/// Formats a byte count with binary units and one decimal place.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "Display rounding to one decimal place.")]
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GIB as f64)
    }
}

/// Cuts text to `limit` characters, appending a truncation notice.
#[must_use]
pub fn truncate_to_limit(text: String, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        None => text,
        Some((cut, _)) => {
            let mut truncated = text[.. cut].to_string();
            let _ = write!(
                truncated,
                "\n\n[Response truncated at {limit} characters. Request a smaller page with \
                 limit/offset or narrow the filter.]"
            );
            truncated
        }
    }
}

// ============================================================================
// SECTION: Markdown
// ============================================================================

/// Dispatches Markdown rendering on payload shape and entity kind.
fn render_markdown(payload: &Value, kind: EntityKind) -> String {
    if let Some(page) = as_page(payload) {
        return render_page(page, kind);
    }
    if let Value::Array(records) = payload {
        return render_collection(records, kind);
    }
    match kind {
        EntityKind::Vault => render_vault(payload),
        EntityKind::Item => render_item(payload),
        EntityKind::File => render_file(payload),
        EntityKind::Health => render_health(payload),
        EntityKind::Connection => render_connection(payload),
        EntityKind::Heartbeat => format!("**Heartbeat:** `{}`", text_at(payload, "heartbeat")),
        EntityKind::Deletion => format!(
            "Deleted item `{}` from vault `{}`.",
            text_at(payload, "itemId"),
            text_at(payload, "vaultId")
        ),
        EntityKind::FileContent => render_file_content(payload),
        EntityKind::Activity | EntityKind::Generic => {
            let records = std::slice::from_ref(payload);
            render_table(&generic_headers(records), records, EntityKind::Generic)
        }
    }
}

/// Returns the page object when the payload is a paginated result.
fn as_page(payload: &Value) -> Option<&Map<String, Value>> {
    let map = payload.as_object()?;
    (map.get("items").is_some_and(Value::is_array) && map.contains_key("hasMore")).then_some(map)
}

/// Renders a paginated result with summary and continuation lines.
fn render_page(page: &Map<String, Value>, kind: EntityKind) -> String {
    let records: &[Value] = page.get("items").and_then(Value::as_array).map_or(&[], Vec::as_slice);
    let count = page.get("count").and_then(Value::as_u64).unwrap_or(records.len() as u64);
    let mut out = format!("## {}\n\n", kind.heading());
    match page.get("total").and_then(Value::as_u64) {
        Some(total) => {
            let _ = writeln!(out, "Showing {count} of {total} {}", kind.plural());
        }
        None => {
            let _ = writeln!(out, "Showing {count} {}", kind.plural());
        }
    }
    out.push('\n');
    out.push_str(&collection_body(records, kind));
    if page.get("hasMore").and_then(Value::as_bool).unwrap_or(false) {
        match page.get("nextOffset").and_then(Value::as_u64) {
            Some(next) => {
                let _ = write!(out, "\n\nMore available (next offset: {next})");
            }
            None => out.push_str("\n\nMore available"),
        }
    }
    out
}

/// Renders a bare collection.
fn render_collection(records: &[Value], kind: EntityKind) -> String {
    format!("## {}\n\n{}", kind.heading(), collection_body(records, kind))
}

/// Renders the table or empty marker for a collection.
fn collection_body(records: &[Value], kind: EntityKind) -> String {
    if records.is_empty() {
        return format!("_No {} found._", kind.plural());
    }
    let headers = match kind {
        EntityKind::Vault => vec!["ID", "Name", "Description", "Items"],
        EntityKind::Item => vec!["ID", "Title", "Category", "Vault", "Tags"],
        EntityKind::File => vec!["ID", "Name", "Size", "Content Type"],
        EntityKind::Activity => vec!["Request ID", "Timestamp", "Action", "Result", "Resource"],
        _ => return render_table(&generic_headers(records), records, EntityKind::Generic),
    };
    let headers: Vec<String> = headers.into_iter().map(str::to_string).collect();
    render_table(&headers, records, kind)
}

/// Renders a Markdown table.
fn render_table(headers: &[String], records: &[Value], kind: EntityKind) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "| {} |", headers.join(" | "));
    let _ = write!(out, "|{}", " --- |".repeat(headers.len()));
    for record in records {
        let cells = row(record, headers, kind);
        let _ = write!(out, "\n| {} |", cells.join(" | "));
    }
    out
}

/// Extracts one table row for the entity kind.
fn row(record: &Value, headers: &[String], kind: EntityKind) -> Vec<String> {
    match kind {
        EntityKind::Vault => vec![
            cell(record.get("id")),
            cell(record.get("name")),
            cell(record.get("description")),
            cell(record.get("items").or_else(|| record.get("itemCount"))),
        ],
        EntityKind::Item => vec![
            cell(record.get("id")),
            cell(record.get("title")),
            cell(record.get("category")),
            cell(
                record
                    .pointer("/vault/name")
                    .or_else(|| record.pointer("/vault/id")),
            ),
            cell(record.get("tags")),
        ],
        EntityKind::File => vec![
            cell(record.get("id")),
            cell(record.get("name")),
            record
                .get("size")
                .and_then(Value::as_u64)
                .map_or_else(|| MISSING.to_string(), format_size),
            cell(record.get("contentType")),
        ],
        EntityKind::Activity => vec![
            cell(record.get("requestId")),
            cell(record.get("timestamp")),
            cell(record.get("action")),
            cell(record.get("result")),
            cell(
                record
                    .pointer("/resource/item/id")
                    .or_else(|| record.pointer("/resource/vault/id")),
            ),
        ],
        _ => headers.iter().map(|header| cell(record.get(header.as_str()))).collect(),
    }
}

/// Column headers for generic tables: first record's keys, capped.
fn generic_headers(records: &[Value]) -> Vec<String> {
    records
        .first()
        .and_then(Value::as_object)
        .map(|map| map.keys().take(GENERIC_MAX_COLUMNS).cloned().collect())
        .unwrap_or_else(|| vec!["value".to_string()])
}

/// Formats one table cell.
fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::String(text)) if text.is_empty() => MISSING.to_string(),
        Some(Value::String(text)) => escape(text),
        Some(Value::Array(values)) if values.is_empty() => MISSING.to_string(),
        Some(Value::Array(values)) => {
            let parts: Vec<String> = values
                .iter()
                .map(|value| value.as_str().map_or_else(|| value.to_string(), str::to_string))
                .collect();
            escape(&parts.join(", "))
        }
        Some(other) => escape(&other.to_string()),
    }
}

/// Escapes table-breaking characters.
fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace("\r\n", " ").replace('\n', " ")
}

/// Reads a string-ish value for prose lines.
fn text_at(payload: &Value, key: &str) -> String {
    cell(payload.get(key))
}

/// Appends a bullet line when the value is present.
fn bullet(out: &mut String, label: &str, value: Option<&Value>) {
    let rendered = cell(value);
    if rendered != MISSING {
        let _ = writeln!(out, "- **{label}:** {rendered}");
    }
}

/// Renders a single vault.
fn render_vault(vault: &Value) -> String {
    let mut out = format!("## Vault: {}\n\n", text_at(vault, "name"));
    bullet(&mut out, "ID", vault.get("id"));
    bullet(&mut out, "Description", vault.get("description"));
    bullet(&mut out, "Items", vault.get("items").or_else(|| vault.get("itemCount")));
    bullet(&mut out, "Type", vault.get("type"));
    bullet(&mut out, "Created", vault.get("createdAt"));
    bullet(&mut out, "Updated", vault.get("updatedAt"));
    out.trim_end().to_string()
}

/// Renders a single item with fields and files.
fn render_item(item: &Value) -> String {
    let mut out = format!("## {}\n\n", text_at(item, "title"));
    bullet(&mut out, "ID", item.get("id"));
    bullet(&mut out, "Category", item.get("category"));
    bullet(&mut out, "Vault", item.pointer("/vault/name").or_else(|| item.pointer("/vault/id")));
    bullet(&mut out, "Tags", item.get("tags"));
    bullet(&mut out, "Favorite", item.get("favorite"));
    bullet(&mut out, "Version", item.get("version"));
    bullet(&mut out, "State", item.get("state"));
    bullet(&mut out, "Updated", item.get("updatedAt"));
    if let Some(urls) = item.get("urls").and_then(Value::as_array).filter(|urls| !urls.is_empty()) {
        out.push_str("\n### URLs\n\n");
        for url in urls {
            let label = url.get("label").and_then(Value::as_str);
            let href = text_at(url, "href");
            match label {
                Some(label) => {
                    let _ = writeln!(out, "- {}: {href}", escape(label));
                }
                None => {
                    let _ = writeln!(out, "- {href}");
                }
            }
        }
    }
    if let Some(fields) = item.get("fields").and_then(Value::as_array).filter(|f| !f.is_empty()) {
        out.push_str("\n### Fields\n\n");
        let mut table =
            String::from("| Label | Type | Purpose | Value |\n| --- | --- | --- | --- |");
        for field in fields {
            let label = field.get("label").or_else(|| field.get("id"));
            let _ = write!(
                table,
                "\n| {} | {} | {} | {} |",
                cell(label),
                cell(field.get("type")),
                cell(field.get("purpose")),
                cell(field.get("value"))
            );
        }
        out.push_str(&table);
        out.push('\n');
    }
    if let Some(files) = item.get("files").and_then(Value::as_array).filter(|f| !f.is_empty()) {
        out.push_str("\n### Files\n\n");
        out.push_str(&collection_body(files, EntityKind::File));
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Renders file metadata.
fn render_file(file: &Value) -> String {
    let mut out = format!("## File: {}\n\n", text_at(file, "name"));
    bullet(&mut out, "ID", file.get("id"));
    if let Some(size) = file.get("size").and_then(Value::as_u64) {
        let _ = writeln!(out, "- **Size:** {}", format_size(size));
    }
    bullet(&mut out, "Content Type", file.get("contentType"));
    bullet(&mut out, "Content Path", file.get("content_path"));
    if let Some(content) = file.get("content").and_then(Value::as_str) {
        let _ = writeln!(out, "- **Inline Content:** {} base64 characters", content.len());
    }
    out.trim_end().to_string()
}

/// Renders a health report with its dependency table.
fn render_health(health: &Value) -> String {
    let mut out = String::from("## Server Health\n\n");
    bullet(&mut out, "Name", health.get("name"));
    bullet(&mut out, "Version", health.get("version"));
    out.push_str("\n### Dependencies\n\n");
    match health.get("dependencies").and_then(Value::as_array).filter(|deps| !deps.is_empty()) {
        Some(dependencies) => {
            out.push_str("| Service | Status | Message |\n| --- | --- | --- |");
            for dependency in dependencies {
                let _ = write!(
                    out,
                    "\n| {} | {} | {} |",
                    cell(dependency.get("service")),
                    cell(dependency.get("status")),
                    cell(dependency.get("message"))
                );
            }
        }
        None => out.push_str("_No dependencies reported._"),
    }
    out
}

/// Renders a connectivity probe result.
fn render_connection(status: &Value) -> String {
    let connected = status.get("connected").and_then(Value::as_bool).unwrap_or(false);
    let mut out = String::from("## Connection Test\n\n");
    let state = if connected { "Connected" } else { "Not connected" };
    let _ = writeln!(out, "- **Status:** {state}");
    bullet(&mut out, "Message", status.get("message"));
    bullet(&mut out, "Backend", status.get("name"));
    bullet(&mut out, "Version", status.get("version"));
    out.trim_end().to_string()
}

/// Renders downloaded file content.
fn render_file_content(download: &Value) -> String {
    let mut out = String::from("## File Content\n\n");
    bullet(&mut out, "File", download.get("fileId"));
    if let Some(size) = download.get("size").and_then(Value::as_u64) {
        let _ = writeln!(out, "- **Size:** {}", format_size(size));
    }
    bullet(&mut out, "Encoding", download.get("encoding"));
    let content = download.get("content").and_then(Value::as_str).unwrap_or_default();
    let _ = write!(out, "\n```\n{content}\n```");
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions favor direct unwraps.")]

    use std::collections::BTreeMap;

    use serde_json::json;
    use vault_gateway_core::BackendError;
    use vault_gateway_core::PaginatedResult;

    use super::EntityKind;
    use super::ResponseFormat;
    use super::format_size;
    use super::render;
    use super::render_error;
    use super::truncate_to_limit;

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_size(1536), "1.5 KB");
    }

    #[test]
    fn json_mode_parses_back_to_payload() {
        let payload = json!({"id": "v1", "name": "Prod", "items": 2});
        let text = render(&payload, ResponseFormat::Json, EntityKind::Vault);
        assert!(text.contains('\n'));
        assert_eq!(serde_json::from_str::<serde_json::Value>(&text).unwrap(), payload);
    }

    #[test]
    fn vault_page_renders_table_and_continuation() {
        let vaults = vec![
            json!({"id": "v1", "name": "Prod", "description": "prod | secrets", "items": 4}),
            json!({"id": "v2", "name": "Dev"}),
            json!({"id": "v3", "name": "QA"}),
        ];
        let page = serde_json::to_value(PaginatedResult::from_page(vaults, 0, 2)).unwrap();
        let text = render(&page, ResponseFormat::Markdown, EntityKind::Vault);
        assert!(text.starts_with("## Vaults"));
        assert!(text.contains("Showing 2 of 3 vaults"));
        assert!(text.contains("| ID | Name | Description | Items |"));
        assert!(text.contains("| v1 | Prod | prod \\| secrets | 4 |"));
        assert!(text.contains("| v2 | Dev | - | - |"));
        assert!(text.contains("More available (next offset: 2)"));
    }

    #[test]
    fn empty_pages_say_so() {
        let page =
            serde_json::to_value(PaginatedResult::<serde_json::Value>::single_page(vec![]))
                .unwrap();
        let text = render(&page, ResponseFormat::Markdown, EntityKind::Item);
        assert!(text.contains("Showing 0 items"));
        assert!(text.contains("_No items found._"));
        assert!(!text.contains("More available"));
    }

    #[test]
    fn item_rows_prefer_vault_name_and_join_tags() {
        let page = serde_json::to_value(PaginatedResult::single_page(vec![json!({
            "id": "i1", "title": "DB", "category": "DATABASE",
            "vault": {"id": "v1", "name": "Prod"}, "tags": ["pg", "infra"]
        })]))
        .unwrap();
        let text = render(&page, ResponseFormat::Markdown, EntityKind::Item);
        assert!(text.contains("| i1 | DB | DATABASE | Prod | pg, infra |"));
    }

    #[test]
    fn file_rows_format_sizes() {
        let text = render(
            &json!([{"id": "f1", "name": "a.bin", "size": 5_242_880, "contentType": "application/octet-stream"}]),
            ResponseFormat::Markdown,
            EntityKind::File,
        );
        assert!(text.contains("| f1 | a.bin | 5.0 MB | application/octet-stream |"));
    }

    #[test]
    fn activity_resource_falls_back_to_vault() {
        let page = serde_json::to_value(PaginatedResult::single_page(vec![
            json!({"requestId": "r1", "action": "READ", "result": "SUCCESS", "resource": {"vault": {"id": "v1"}}}),
            json!({"requestId": "r2", "action": "UPDATE", "result": "DENY", "resource": {"vault": {"id": "v1"}, "item": {"id": "i1"}}}),
        ]))
        .unwrap();
        let text = render(&page, ResponseFormat::Markdown, EntityKind::Activity);
        assert!(text.contains("| r1 | - | READ | SUCCESS | v1 |"));
        assert!(text.contains("| r2 | - | UPDATE | DENY | i1 |"));
    }

    #[test]
    fn health_lists_dependencies() {
        let text = render(
            &json!({"name": "Connect", "version": "1.7.3", "dependencies": [
                {"service": "sync", "status": "ACTIVE"}
            ]}),
            ResponseFormat::Markdown,
            EntityKind::Health,
        );
        assert!(text.contains("- **Version:** 1.7.3"));
        assert!(text.contains("| sync | ACTIVE | - |"));
        let empty =
            render(&json!({"name": "Connect"}), ResponseFormat::Markdown, EntityKind::Health);
        assert!(empty.contains("_No dependencies reported._"));
    }

    #[test]
    fn generic_tables_cap_columns() {
        let text = render(
            &json!([{"a": 1, "b": 2, "c": 3, "d": 4, "e": 5, "f": 6}]),
            ResponseFormat::Markdown,
            EntityKind::Generic,
        );
        let header = text.lines().find(|line| line.starts_with("| a")).unwrap();
        assert_eq!(header.matches('|').count(), 6);
    }

    #[test]
    fn generic_headers_follow_backend_key_order() {
        let payload: serde_json::Value =
            serde_json::from_str(r#"[{"zeta": 1, "alpha": 2, "mid": 3}, {"alpha": 4}]"#).unwrap();
        let text = render(&payload, ResponseFormat::Markdown, EntityKind::Generic);
        let header = text.lines().find(|line| line.starts_with("| ")).unwrap();
        assert_eq!(header, "| zeta | alpha | mid |");
        assert!(text.contains("| 1 | 2 | 3 |"));
        assert!(text.contains("| - | 4 | - |"));
    }

    #[test]
    fn item_detail_includes_field_table() {
        let text = render(
            &json!({"id": "i1", "title": "Login", "category": "LOGIN", "vault": {"id": "v1"},
                "fields": [{"id": "password", "type": "CONCEALED", "purpose": "PASSWORD", "value": "s3cr|t"}]}),
            ResponseFormat::Markdown,
            EntityKind::Item,
        );
        assert!(text.starts_with("## Login"));
        assert!(text.contains("| password | CONCEALED | PASSWORD | s3cr\\|t |"));
    }

    #[test]
    fn errors_render_message_flag_and_details() {
        let output = render_error(&BackendError::RateLimited {
            retry_after_secs: 30,
        });
        assert!(output.is_error);
        assert_eq!(output.content.len(), 1);
        let text = output.first_text();
        assert!(text.starts_with("Error: rate limit exceeded; retry after 30 seconds (retryable)"));
        assert!(text.contains("\"retryAfter\": 30"));
        assert_eq!(output.error_code.as_deref(), Some("RATE_LIMIT_EXCEEDED"));

        let mut fields = BTreeMap::new();
        fields.insert("category".to_string(), vec!["not allowed".to_string()]);
        let output = render_error(&BackendError::validation("invalid arguments", fields));
        assert!(!output.first_text().contains("(retryable)"));
        assert!(output.first_text().contains("\"category\""));
    }

    #[test]
    fn error_output_serializes_is_error_flag() {
        let output = render_error(&BackendError::not_found("vault", "v9"));
        let value = serde_json::to_value(output).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["type"], "text");
        assert!(value.get("errorCode").is_none());
        let ok = serde_json::to_value(super::ToolOutput::text("hi".into())).unwrap();
        assert!(ok.get("isError").is_none());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(10);
        let out = truncate_to_limit(text.clone(), 4);
        assert!(out.starts_with("éééé\n\n[Response truncated at 4 characters"));
        assert_eq!(truncate_to_limit(text.clone(), 10), text);
    }
}
