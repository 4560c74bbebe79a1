//! Project context supplied by callers
//!
//! An [`McpContext`] is a snapshot of the target project's structure. It grounds
//! context-aware generation and answers structure queries. Callers send it as
//! loosely-typed JSON, so it must pass [`McpContext::from_value`] before use.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GenerationError, Result};

/// Names of the structural parts of a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStructure {
    /// Collection slugs
    pub collections: Vec<String>,
    /// Global slugs
    pub globals: Vec<String>,
    /// Installed plugins
    pub plugins: Vec<String>,
    /// Hook file names or paths
    pub hooks: Vec<String>,
}

/// Outgoing relationships of one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Owning collection slug
    pub collection: String,
    /// Related collection or global slugs
    pub relates_to: Vec<String>,
}

/// Hook lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookStage {
    /// Before a document is written
    BeforeChange,
    /// After a document is written
    AfterChange,
    /// Before a document is read
    BeforeRead,
    /// After a document is read
    AfterRead,
    /// Before a document is deleted
    BeforeDelete,
    /// After a document is deleted
    AfterDelete,
    /// After a user logs in
    AfterLogin,
    /// After a user logs out
    AfterLogout,
}

impl HookStage {
    /// Wire name of the stage
    pub fn as_str(&self) -> &'static str {
        match self {
            HookStage::BeforeChange => "beforeChange",
            HookStage::AfterChange => "afterChange",
            HookStage::BeforeRead => "beforeRead",
            HookStage::AfterRead => "afterRead",
            HookStage::BeforeDelete => "beforeDelete",
            HookStage::AfterDelete => "afterDelete",
            HookStage::AfterLogin => "afterLogin",
            HookStage::AfterLogout => "afterLogout",
        }
    }
}

/// Operation a hook runs for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookOperation {
    /// Document creation
    Create,
    /// Document update
    Update,
    /// Document read
    Read,
    /// Document deletion
    Delete,
    /// User login
    Login,
    /// Token refresh
    Refresh,
    /// Password reset request
    ForgotPassword,
}

impl HookOperation {
    /// Wire name of the operation
    pub fn as_str(&self) -> &'static str {
        match self {
            HookOperation::Create => "create",
            HookOperation::Update => "update",
            HookOperation::Read => "read",
            HookOperation::Delete => "delete",
            HookOperation::Login => "login",
            HookOperation::Refresh => "refresh",
            HookOperation::ForgotPassword => "forgotPassword",
        }
    }
}

/// The hook the caller is currently working inside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookContext {
    /// Lifecycle stage
    pub stage: HookStage,
    /// Triggering operation
    pub operation: HookOperation,
    /// Collection the hook belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_slug: Option<String>,
}

/// Snapshot of a target project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpContext {
    /// Structural summary
    pub project_structure: ProjectStructure,
    /// Contents of the generated `payload-types.ts`
    pub type_defs: String,
    /// Collection relationships
    pub relationships: Vec<Relationship>,
    /// Current hook; the key must be present, `null` when there is none
    #[serde(deserialize_with = "deserialize_present")]
    pub hook_context: Option<HookContext>,
}

/// Accepts `null` but, unlike a plain `Option`, not a missing key
fn deserialize_present<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<HookContext>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<HookContext>::deserialize(deserializer)
}

impl McpContext {
    /// Shape-checks and converts a raw JSON context
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(GenerationError::InvalidContext(
                "context must be an object".to_string(),
            ));
        }
        Self::deserialize(value).map_err(|e| GenerationError::InvalidContext(e.to_string()))
    }
}

/// Result of a project structure query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureQueryResult {
    /// Matching collections
    pub collections: Vec<String>,
    /// Matching globals
    pub globals: Vec<String>,
    /// Matching plugins
    pub plugins: Vec<String>,
    /// Matching hooks
    pub hooks: Vec<String>,
}

/// Answers a free-text structure query from the supplied context
///
/// The first of "collection", "global" or "hook" found in the query
/// (case-insensitive, checked in that order) keeps only that category.
/// Any other query echoes the full structure.
pub fn query_project_structure(query: &str, context: &McpContext) -> StructureQueryResult {
    tracing::info!(query, "Querying project structure from provided context");

    let structure = &context.project_structure;
    let query = query.to_lowercase();

    let mut result = StructureQueryResult {
        collections: structure.collections.clone(),
        globals: structure.globals.clone(),
        plugins: structure.plugins.clone(),
        hooks: structure.hooks.clone(),
    };

    if query.contains("collection") {
        result.globals.clear();
        result.plugins.clear();
        result.hooks.clear();
    } else if query.contains("global") {
        result.collections.clear();
        result.plugins.clear();
        result.hooks.clear();
    } else if query.contains("hook") {
        result.collections.clear();
        result.globals.clear();
        result.plugins.clear();
    }

    result
}
