// crates/vault-gateway-core/src/lib.rs
// ============================================================================
// Module: Vault Gateway Core Library
// Description: Public API surface for the Vault Gateway core.
// Purpose: Expose the data model, error taxonomy, and tenant credentials.
// Dependencies: crate::{credentials, errors, model, tooling}
// ============================================================================

//! ## Overview
//! Vault Gateway core holds the transport-agnostic pieces of the gateway: the
//! records exchanged with the secrets backend, the failure taxonomy every
//! backend call maps onto, the per-request tenant credentials, and the
//! canonical tool identifiers shared by the contract and MCP crates.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod credentials;
pub mod errors;
pub mod model;
pub mod tooling;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use credentials::CredentialField;
pub use credentials::MissingCredentials;
pub use credentials::TenantCredentials;
pub use errors::BackendError;
pub use errors::ErrorDetails;
pub use model::ActivityAction;
pub use model::ActivityActor;
pub use model::ActivityRecord;
pub use model::ActivityResource;
pub use model::ActivityResult;
pub use model::ConnectionStatus;
pub use model::Dependency;
pub use model::DependencyStatus;
pub use model::FieldPurpose;
pub use model::FieldType;
pub use model::Item;
pub use model::ItemCategory;
pub use model::ItemField;
pub use model::ItemFile;
pub use model::ItemSection;
pub use model::ItemState;
pub use model::ItemUrl;
pub use model::PaginatedResult;
pub use model::PatchOp;
pub use model::PatchOperation;
pub use model::ResourceRef;
pub use model::SectionRef;
pub use model::ServerHealth;
pub use model::Vault;
pub use model::VaultRef;
pub use tooling::ToolName;
