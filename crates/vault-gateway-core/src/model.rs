// crates/vault-gateway-core/src/model.rs
// ============================================================================
// Module: Backend Data Model
// Description: Records exchanged with the secrets backend.
// Purpose: Typed, serde-backed mirrors of vaults, items, files, and activity.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The gateway only reshapes backend data, so these records mirror the
//! backend's JSON: camelCase keys and optional fields omitted when absent.
//! Records returned by the backend keep keys the model does not name in an
//! `extra` map, and enumerations keep labels they do not recognize in an
//! `Other` variant, so a newer backend never breaks decoding and structured
//! output re-emits what the backend sent. Tool input stays closed: the
//! contract schemas list only the named labels.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Vaults
// ============================================================================

/// Named container of secret items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    /// Opaque vault identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Attribute version counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_version: Option<u64>,
    /// Content version counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_version: Option<u64>,
    /// Number of items in the vault.
    #[serde(
        default,
        rename = "items",
        alias = "itemCount",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_count: Option<u64>,
    /// Backend vault type label.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub vault_type: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Vault reference embedded in items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRef {
    /// Vault identifier.
    pub id: String,
    /// Vault name when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VaultRef {
    /// Builds a reference carrying only the identifier.
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            extra: Map::new(),
        }
    }
}

// ============================================================================
// SECTION: Items
// ============================================================================

/// Item categories recognized by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    /// Website or application login.
    Login,
    /// Standalone password.
    Password,
    /// API key or token.
    ApiCredential,
    /// Server access record.
    Server,
    /// Database connection record.
    Database,
    /// Payment card.
    CreditCard,
    /// Membership card.
    Membership,
    /// Passport.
    Passport,
    /// Software license key.
    SoftwareLicense,
    /// Outdoor (hunting, fishing) license.
    OutdoorLicense,
    /// Free-form secure note.
    SecureNote,
    /// Wireless router credentials.
    WirelessRouter,
    /// Bank account.
    BankAccount,
    /// Driver license.
    DriverLicense,
    /// Identity profile.
    Identity,
    /// Reward program.
    RewardProgram,
    /// Stored document.
    Document,
    /// Email account.
    EmailAccount,
    /// Social security number.
    SocialSecurityNumber,
    /// Medical record.
    MedicalRecord,
    /// SSH key pair.
    SshKey,
    /// Backend-defined custom category.
    Custom,
    /// Label this gateway does not recognize, kept as sent.
    #[serde(untagged)]
    Other(String),
}

impl ItemCategory {
    /// Every named category, in wire order.
    pub const ALL: [Self; 22] = [
        Self::Login,
        Self::Password,
        Self::ApiCredential,
        Self::Server,
        Self::Database,
        Self::CreditCard,
        Self::Membership,
        Self::Passport,
        Self::SoftwareLicense,
        Self::OutdoorLicense,
        Self::SecureNote,
        Self::WirelessRouter,
        Self::BankAccount,
        Self::DriverLicense,
        Self::Identity,
        Self::RewardProgram,
        Self::Document,
        Self::EmailAccount,
        Self::SocialSecurityNumber,
        Self::MedicalRecord,
        Self::SshKey,
        Self::Custom,
    ];

    /// Returns the wire label for the category.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Login => "LOGIN",
            Self::Password => "PASSWORD",
            Self::ApiCredential => "API_CREDENTIAL",
            Self::Server => "SERVER",
            Self::Database => "DATABASE",
            Self::CreditCard => "CREDIT_CARD",
            Self::Membership => "MEMBERSHIP",
            Self::Passport => "PASSPORT",
            Self::SoftwareLicense => "SOFTWARE_LICENSE",
            Self::OutdoorLicense => "OUTDOOR_LICENSE",
            Self::SecureNote => "SECURE_NOTE",
            Self::WirelessRouter => "WIRELESS_ROUTER",
            Self::BankAccount => "BANK_ACCOUNT",
            Self::DriverLicense => "DRIVER_LICENSE",
            Self::Identity => "IDENTITY",
            Self::RewardProgram => "REWARD_PROGRAM",
            Self::Document => "DOCUMENT",
            Self::EmailAccount => "EMAIL_ACCOUNT",
            Self::SocialSecurityNumber => "SOCIAL_SECURITY_NUMBER",
            Self::MedicalRecord => "MEDICAL_RECORD",
            Self::SshKey => "SSH_KEY",
            Self::Custom => "CUSTOM",
            Self::Other(raw) => raw,
        }
    }
}

/// Lifecycle state of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemState {
    /// Live item.
    Active,
    /// Archived item.
    Archived,
    /// Deleted item.
    Deleted,
    /// Label this gateway does not recognize, kept as sent.
    #[serde(untagged)]
    Other(String),
}

/// Structured secret record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Item identifier; absent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display title.
    pub title: String,
    /// Item category.
    pub category: ItemCategory,
    /// Owning vault.
    pub vault: VaultRef,
    /// Associated URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<ItemUrl>>,
    /// Favorite flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Item version counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// Lifecycle state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ItemState>,
    /// Field sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<ItemSection>>,
    /// Item fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<ItemField>>,
    /// Attached files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<ItemFile>>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Last editor identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// URL attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUrl {
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Primary URL flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    /// Target URL.
    pub href: String,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Field grouping inside an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSection {
    /// Section identifier.
    pub id: String,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference from a field or file to its section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    /// Section identifier.
    pub id: String,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Field value types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    /// Plain text.
    String,
    /// Masked secret text.
    Concealed,
    /// Email address.
    Email,
    /// URL.
    Url,
    /// One-time password seed.
    Otp,
    /// Calendar date.
    Date,
    /// Month and year.
    MonthYear,
    /// Phone number.
    Phone,
    /// Menu selection.
    Menu,
    /// File reference.
    File,
    /// Postal address.
    Address,
    /// Card network type.
    CreditCardType,
    /// Card number.
    CreditCardNumber,
    /// Reference to another item.
    Reference,
    /// SSH key material.
    Sshkey,
    /// Label this gateway does not recognize, kept as sent.
    #[serde(untagged)]
    Other(String),
}

impl FieldType {
    /// Every named field type, in wire order.
    pub const ALL: [Self; 15] = [
        Self::String,
        Self::Concealed,
        Self::Email,
        Self::Url,
        Self::Otp,
        Self::Date,
        Self::MonthYear,
        Self::Phone,
        Self::Menu,
        Self::File,
        Self::Address,
        Self::CreditCardType,
        Self::CreditCardNumber,
        Self::Reference,
        Self::Sshkey,
    ];

    /// Returns the wire label for the field type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "STRING",
            Self::Concealed => "CONCEALED",
            Self::Email => "EMAIL",
            Self::Url => "URL",
            Self::Otp => "OTP",
            Self::Date => "DATE",
            Self::MonthYear => "MONTH_YEAR",
            Self::Phone => "PHONE",
            Self::Menu => "MENU",
            Self::File => "FILE",
            Self::Address => "ADDRESS",
            Self::CreditCardType => "CREDIT_CARD_TYPE",
            Self::CreditCardNumber => "CREDIT_CARD_NUMBER",
            Self::Reference => "REFERENCE",
            Self::Sshkey => "SSHKEY",
            Self::Other(raw) => raw,
        }
    }
}

/// Semantic role of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldPurpose {
    /// Username field.
    Username,
    /// Password field.
    Password,
    /// Notes field.
    Notes,
    /// Label this gateway does not recognize, kept as sent.
    #[serde(untagged)]
    Other(String),
}

impl FieldPurpose {
    /// Every named purpose, in wire order.
    pub const ALL: [Self; 3] = [Self::Username, Self::Password, Self::Notes];

    /// Returns the wire label for the purpose.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Username => "USERNAME",
            Self::Password => "PASSWORD",
            Self::Notes => "NOTES",
            Self::Other(raw) => raw,
        }
    }
}

/// Single field inside an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemField {
    /// Field identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Value type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    /// Semantic role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<FieldPurpose>,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Field value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Owning section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionRef>,
    /// Ask the backend to generate the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate: Option<bool>,
    /// Entropy of a generated value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entropy: Option<f64>,
    /// Current TOTP code for OTP fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totp: Option<String>,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// SECTION: Files
// ============================================================================

/// File attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFile {
    /// File identifier.
    pub id: String,
    /// File name.
    pub name: String,
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// MIME content type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Backend path to the raw content.
    #[serde(default, rename = "content_path", skip_serializing_if = "Option::is_none")]
    pub content_path: Option<String>,
    /// Owning section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionRef>,
    /// Base64 content when requested inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// SECTION: Activity
// ============================================================================

/// Audited API action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    /// Read access.
    Read,
    /// Creation.
    Create,
    /// Update.
    Update,
    /// Deletion.
    Delete,
    /// Label this gateway does not recognize, kept as sent.
    #[serde(untagged)]
    Other(String),
}

/// Outcome of an audited action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityResult {
    /// Action permitted.
    Success,
    /// Action denied.
    Deny,
    /// Label this gateway does not recognize, kept as sent.
    #[serde(untagged)]
    Other(String),
}

/// Identifier-only reference used by activity records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Referenced identifier.
    pub id: String,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Caller that performed an audited action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityActor {
    /// Actor identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Account identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Token identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Caller user agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Caller IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_ip: Option<String>,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resource touched by an audited action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResource {
    /// Resource type label.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Vault reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<ResourceRef>,
    /// Item reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ResourceRef>,
    /// Item version touched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_version: Option<u64>,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One audited API request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Request identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Request timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Action performed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActivityAction>,
    /// Action outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ActivityResult>,
    /// Acting caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActivityActor>,
    /// Touched resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ActivityResource>,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// SECTION: Health
// ============================================================================

/// Health of a backend dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DependencyStatus {
    /// Dependency reachable.
    Active,
    /// Dependency unreachable.
    Inactive,
    /// Dependency state unknown.
    Unknown,
    /// Label this gateway does not recognize, kept as sent.
    #[serde(untagged)]
    Other(String),
}

/// Backend dependency entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Dependency name.
    pub service: String,
    /// Dependency status.
    pub status: DependencyStatus,
    /// Status detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Backend health report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerHealth {
    /// Backend product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Backend version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Dependency statuses.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Backend keys not modeled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    /// Whether the backend answered the probe.
    pub connected: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Backend product name when connected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Backend version when connected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

// ============================================================================
// SECTION: JSON Patch
// ============================================================================

/// RFC 6902 operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Add a value.
    Add,
    /// Remove a value.
    Remove,
    /// Replace a value.
    Replace,
    /// Move a value.
    Move,
    /// Copy a value.
    Copy,
    /// Assert a value.
    Test,
}

impl PatchOp {
    /// Every operation kind, in wire order.
    pub const ALL: [Self; 6] =
        [Self::Add, Self::Remove, Self::Replace, Self::Move, Self::Copy, Self::Test];

    /// Returns the wire label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
            Self::Move => "move",
            Self::Copy => "copy",
            Self::Test => "test",
        }
    }
}

/// Single JSON Patch operation, forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    /// Operation kind.
    pub op: PatchOp,
    /// Target JSON pointer.
    pub path: String,
    /// Operation value. A present `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    /// Source pointer for move and copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

/// Decodes a key that is present, including an explicit `null`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// ============================================================================
// SECTION: Pagination
// ============================================================================

/// One page of a collection.
///
/// # Invariants
/// - `count == items.len()`.
/// - `next_offset` is present only when `has_more` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Number of records on this page.
    pub count: usize,
    /// Total records when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    /// Whether more records follow.
    pub has_more: bool,
    /// Offset of the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<usize>,
}

impl<T> PaginatedResult<T> {
    /// Slices a fully materialized collection into one page.
    #[must_use]
    pub fn from_page(all: Vec<T>, offset: usize, limit: usize) -> Self {
        let total = all.len();
        let items: Vec<T> = all.into_iter().skip(offset).take(limit).collect();
        let count = items.len();
        let end = offset.saturating_add(count);
        let has_more = end < total;
        Self {
            items,
            count,
            total: Some(total),
            has_more,
            next_offset: has_more.then_some(end),
        }
    }

    /// Wraps records whose continuation is unknown as a final page.
    #[must_use]
    pub fn single_page(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            items,
            count,
            total: None,
            has_more: false,
            next_offset: None,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
