// crates/vault-gateway-client/src/client.rs
// ============================================================================
// Module: Connect Client
// Description: HTTP adapter for the Connect-style secrets REST API.
// Purpose: Issue one authenticated request per operation and map failures.
// Dependencies: reqwest, serde_json, tracing, vault-gateway-core
// ============================================================================

//! ## Overview
//! [`ConnectClient`] binds one tenant's credentials to the shared transport.
//! Versioned API routes live under `{host}/v1`; the health and heartbeat
//! probes live at the host root. Path segments are percent-encoded, so ids
//! can never escape their position in the route.
//!
//! Every request carries `Authorization: Bearer <token>`. A client without a
//! token fails with an authentication error before touching the network.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::Method;
use reqwest::Url;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::RETRY_AFTER;
use serde::Serialize;
use serde::de::DeserializeOwned;
use vault_gateway_core::ActivityRecord;
use vault_gateway_core::BackendError;
use vault_gateway_core::Item;
use vault_gateway_core::ItemFile;
use vault_gateway_core::PaginatedResult;
use vault_gateway_core::PatchOperation;
use vault_gateway_core::ServerHealth;
use vault_gateway_core::TenantCredentials;
use vault_gateway_core::Vault;
use vault_gateway_core::VaultRef;

use crate::backend::VaultBackend;
use crate::response::decode_json;
use crate::response::error_for_status;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Backend host used when a tenant supplies none.
pub const DEFAULT_BACKEND_HOST: &str = "http://localhost:8080";

/// Versioned API prefix.
const API_PREFIX: &str = "v1";
/// JSON media type.
const MEDIA_JSON: &str = "application/json";
/// JSON Patch media type.
const MEDIA_JSON_PATCH: &str = "application/json-patch+json";
/// Accept header for raw downloads.
const MEDIA_ANY: &str = "*/*";
/// Accept header for the heartbeat probe.
const MEDIA_TEXT: &str = "text/plain";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Tenant-bound client for the secrets backend.
#[derive(Clone)]
pub struct ConnectClient {
    /// Shared, credential-free transport.
    http: Client,
    /// Backend host without trailing slashes.
    host: String,
    /// Bearer token for this tenant.
    token: Option<String>,
    /// Token fingerprint for diagnostics.
    tenant: Option<String>,
}

/// Route scope relative to the backend host.
#[derive(Clone, Copy)]
enum Scope {
    /// Under the versioned API prefix.
    Api,
    /// At the host root.
    Root,
}

/// One outbound request.
struct Call {
    /// HTTP method.
    method: Method,
    /// Fully built URL.
    url: Url,
    /// Accept header value.
    accept: &'static str,
    /// Encoded body and its content type.
    body: Option<(Vec<u8>, &'static str)>,
    /// Entity kind for not-found mapping.
    kind: &'static str,
    /// Entity identifier for not-found mapping.
    id: String,
}

impl Call {
    /// Builds a body-less call.
    fn new(method: Method, url: Url, kind: &'static str, id: impl Into<String>) -> Self {
        Self {
            method,
            url,
            accept: MEDIA_JSON,
            body: None,
            kind,
            id: id.into(),
        }
    }

    /// Attaches a serialized body.
    fn with_body<T: Serialize + ?Sized>(
        mut self,
        payload: &T,
        content_type: &'static str,
    ) -> Result<Self, BackendError> {
        let bytes = serde_json::to_vec(payload).map_err(|err| BackendError::Transport {
            message: format!("failed to encode request body: {err}"),
        })?;
        self.body = Some((bytes, content_type));
        Ok(self)
    }

    /// Overrides the Accept header.
    const fn accepting(mut self, accept: &'static str) -> Self {
        self.accept = accept;
        self
    }
}

// ============================================================================
// SECTION: Construction
// ============================================================================

impl ConnectClient {
    /// Binds credentials to the shared transport.
    ///
    /// Missing host falls back to [`DEFAULT_BACKEND_HOST`]. A missing token is
    /// accepted here and rejected on the first call.
    #[must_use]
    pub fn new(http: Client, credentials: &TenantCredentials) -> Self {
        let host = credentials
            .backend_host
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .unwrap_or(DEFAULT_BACKEND_HOST)
            .trim_end_matches('/')
            .to_string();
        Self {
            http,
            host,
            token: credentials.auth_token.clone(),
            tenant: credentials.fingerprint(),
        }
    }

    /// Returns the versioned API base URL.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}/{API_PREFIX}", self.host)
    }

    /// Returns the backend host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Builds a URL from encoded path segments and query pairs.
    fn url(
        &self,
        scope: Scope,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url, BackendError> {
        let mut url = Url::parse(&self.host).map_err(|err| BackendError::Transport {
            message: format!("invalid backend host {}: {err}", self.host),
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|()| BackendError::Transport {
                message: format!("backend host {} cannot carry a path", self.host),
            })?;
            path.pop_if_empty();
            if matches!(scope, Scope::Api) {
                path.push(API_PREFIX);
            }
            path.extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    // ========================================================================
    // SECTION: Execution
    // ========================================================================

    /// Sends a call and returns the status and body of a success response.
    async fn execute(&self, call: Call) -> Result<(u16, Bytes), BackendError> {
        let token = self.token.as_deref().ok_or_else(|| BackendError::Authentication {
            message: "no bearer token bound to client".to_string(),
        })?;
        let path = call.url.path().to_string();
        let method = call.method.clone();
        let mut request = self
            .http
            .request(call.method, call.url)
            .bearer_auth(token)
            .header(ACCEPT, call.accept);
        if let Some((body, content_type)) = call.body {
            request = request.header(CONTENT_TYPE, content_type).body(body);
        }
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(transport_error)?;
        tracing::debug!(
            method = %method,
            path = %path,
            status,
            tenant = self.tenant.as_deref().unwrap_or("-"),
            "backend request completed"
        );
        if (200 .. 300).contains(&status) {
            Ok((status, body))
        } else {
            Err(error_for_status(status, retry_after.as_deref(), &body, call.kind, &call.id))
        }
    }

    /// Sends a call and decodes a JSON object.
    async fn fetch<T: DeserializeOwned>(&self, call: Call) -> Result<T, BackendError> {
        let (status, body) = self.execute(call).await?;
        decode_json(status, &body)
    }

    /// Sends a call and decodes a JSON array; an empty body is an empty list.
    async fn fetch_list<T: DeserializeOwned>(&self, call: Call) -> Result<Vec<T>, BackendError> {
        let (status, body) = self.execute(call).await?;
        let list: Option<Vec<T>> = decode_json(status, &body)?;
        Ok(list.unwrap_or_default())
    }
}

/// Maps a reqwest failure to a transport error with a descriptive message.
fn transport_error(err: reqwest::Error) -> BackendError {
    let message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        format!("network error: {err}")
    };
    BackendError::Transport {
        message,
    }
}

/// Builds an optional `filter` query pair.
fn filter_query(filter: Option<&str>) -> Vec<(&'static str, String)> {
    filter
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| vec![("filter", value.to_string())])
        .unwrap_or_default()
}

/// Builds the inline-content query pair.
fn inline_query(inline_content: bool) -> Vec<(&'static str, String)> {
    if inline_content { vec![("inline_files", "true".to_string())] } else { Vec::new() }
}

// ============================================================================
// SECTION: Backend Operations
// ============================================================================

#[async_trait]
impl VaultBackend for ConnectClient {
    async fn list_vaults(&self, filter: Option<&str>) -> Result<Vec<Vault>, BackendError> {
        let url = self.url(Scope::Api, &["vaults"], &filter_query(filter))?;
        self.fetch_list(Call::new(Method::GET, url, "vault", "")).await
    }

    async fn get_vault(&self, vault_id: &str) -> Result<Vault, BackendError> {
        let url = self.url(Scope::Api, &["vaults", vault_id], &[])?;
        self.fetch(Call::new(Method::GET, url, "vault", vault_id)).await
    }

    async fn list_items(
        &self,
        vault_id: &str,
        filter: Option<&str>,
    ) -> Result<Vec<Item>, BackendError> {
        let url = self.url(Scope::Api, &["vaults", vault_id, "items"], &filter_query(filter))?;
        self.fetch_list(Call::new(Method::GET, url, "vault", vault_id)).await
    }

    async fn get_item(&self, vault_id: &str, item_id: &str) -> Result<Item, BackendError> {
        let url = self.url(Scope::Api, &["vaults", vault_id, "items", item_id], &[])?;
        self.fetch(Call::new(Method::GET, url, "item", item_id)).await
    }

    async fn create_item(&self, vault_id: &str, mut item: Item) -> Result<Item, BackendError> {
        item.vault = VaultRef::id(vault_id);
        let url = self.url(Scope::Api, &["vaults", vault_id, "items"], &[])?;
        let call = Call::new(Method::POST, url, "vault", vault_id).with_body(&item, MEDIA_JSON)?;
        self.fetch(call).await
    }

    async fn update_item(
        &self,
        vault_id: &str,
        item_id: &str,
        mut item: Item,
    ) -> Result<Item, BackendError> {
        item.id = Some(item_id.to_string());
        item.vault = VaultRef::id(vault_id);
        let url = self.url(Scope::Api, &["vaults", vault_id, "items", item_id], &[])?;
        let call = Call::new(Method::PUT, url, "item", item_id).with_body(&item, MEDIA_JSON)?;
        self.fetch(call).await
    }

    async fn patch_item(
        &self,
        vault_id: &str,
        item_id: &str,
        operations: &[PatchOperation],
    ) -> Result<Item, BackendError> {
        let url = self.url(Scope::Api, &["vaults", vault_id, "items", item_id], &[])?;
        let call =
            Call::new(Method::PATCH, url, "item", item_id).with_body(operations, MEDIA_JSON_PATCH)?;
        self.fetch(call).await
    }

    async fn delete_item(&self, vault_id: &str, item_id: &str) -> Result<(), BackendError> {
        let url = self.url(Scope::Api, &["vaults", vault_id, "items", item_id], &[])?;
        self.execute(Call::new(Method::DELETE, url, "item", item_id)).await.map(|_| ())
    }

    async fn list_files(
        &self,
        vault_id: &str,
        item_id: &str,
        inline_content: bool,
    ) -> Result<Vec<ItemFile>, BackendError> {
        let url = self.url(
            Scope::Api,
            &["vaults", vault_id, "items", item_id, "files"],
            &inline_query(inline_content),
        )?;
        self.fetch_list(Call::new(Method::GET, url, "item", item_id)).await
    }

    async fn get_file(
        &self,
        vault_id: &str,
        item_id: &str,
        file_id: &str,
        inline_content: bool,
    ) -> Result<ItemFile, BackendError> {
        let url = self.url(
            Scope::Api,
            &["vaults", vault_id, "items", item_id, "files", file_id],
            &inline_query(inline_content),
        )?;
        self.fetch(Call::new(Method::GET, url, "file", file_id)).await
    }

    async fn get_file_content(
        &self,
        vault_id: &str,
        item_id: &str,
        file_id: &str,
    ) -> Result<Bytes, BackendError> {
        let url = self.url(
            Scope::Api,
            &["vaults", vault_id, "items", item_id, "files", file_id, "content"],
            &[],
        )?;
        let call = Call::new(Method::GET, url, "file", file_id).accepting(MEDIA_ANY);
        self.execute(call).await.map(|(_, body)| body)
    }

    async fn list_activity(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<PaginatedResult<ActivityRecord>, BackendError> {
        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }
        let url = self.url(Scope::Api, &["activity"], &query)?;
        let records = self.fetch_list(Call::new(Method::GET, url, "activity", "")).await?;
        Ok(PaginatedResult::single_page(records))
    }

    async fn get_health(&self) -> Result<ServerHealth, BackendError> {
        let url = self.url(Scope::Root, &["health"], &[])?;
        self.fetch(Call::new(Method::GET, url, "health", "")).await
    }

    async fn heartbeat(&self) -> Result<String, BackendError> {
        let url = self.url(Scope::Root, &["heartbeat"], &[])?;
        let call = Call::new(Method::GET, url, "heartbeat", "").accepting(MEDIA_TEXT);
        let (_, body) = self.execute(call).await?;
        Ok(String::from_utf8_lossy(&body).trim().to_string())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
