//! Core data models for code generation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload field types a [`FieldSpec`] may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Single-line text
    Text,
    /// Numeric value
    Number,
    /// Email address
    Email,
    /// Multi-line text
    Textarea,
    /// Rich text editor content
    RichText,
    /// Dropdown of options
    Select,
    /// Boolean checkbox
    Checkbox,
    /// Radio group
    Radio,
    /// Reference to another collection
    Relationship,
    /// Reference to an upload collection
    Upload,
    /// Repeating group of sub-fields
    Array,
    /// Nested group of sub-fields
    Group,
    /// Tabbed layout
    Tabs,
    /// Collapsible layout
    Collapsible,
    /// Row layout
    Row,
    /// Geographic point
    Point,
    /// Date value
    Date,
    /// Code editor
    Code,
    /// Raw JSON
    Json,
}

impl FieldType {
    /// All field types, in declaration order
    pub const ALL: [FieldType; 19] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Email,
        FieldType::Textarea,
        FieldType::RichText,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::Relationship,
        FieldType::Upload,
        FieldType::Array,
        FieldType::Group,
        FieldType::Tabs,
        FieldType::Collapsible,
        FieldType::Row,
        FieldType::Point,
        FieldType::Date,
        FieldType::Code,
        FieldType::Json,
    ];
}

/// Target collection(s) of a relationship field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationTo {
    /// A single collection slug
    One(String),
    /// Polymorphic relationship across several collections
    Many(Vec<String>),
}

/// Description of one Payload field
///
/// Attributes not modelled explicitly (`options`, nested `fields`,
/// `defaultValue`, ...) are kept in `extra` in the order they arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Field name, must be non-empty
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether a value is required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Whether the field is localized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized: Option<bool>,
    /// Relationship target, only meaningful for relationship fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_to: Option<RelationTo>,
    /// Admin UI hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<Map<String, Value>>,
    /// Type-specific options
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldSpec {
    /// Creates a field with only a name and type
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: None,
            localized: None,
            relation_to: None,
            admin: None,
            extra: Map::new(),
        }
    }

    /// Marks the field as required
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets the relationship target
    pub fn relation_to(mut self, relation_to: RelationTo) -> Self {
        self.relation_to = Some(relation_to);
        self
    }
}

/// Parameters for generating a full collection definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSpec {
    /// Collection slug, expected to be kebab-case
    pub slug: String,
    /// Singular label
    #[serde(default)]
    pub singular: String,
    /// Plural label, also used for the exported identifier
    #[serde(default)]
    pub plural: String,
    /// Fields in output order
    pub fields: Vec<FieldSpec>,
    /// Emit `timestamps: true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<bool>,
    /// Enable draft versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
}

/// Database adapter wired into a scaffolded project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbAdapter {
    /// MongoDB via `@payloadcms/db-mongodb`
    Mongoose,
    /// PostgreSQL via `@payloadcms/db-postgres`
    Postgres,
}

impl DbAdapter {
    /// Accepted adapter names
    pub const NAMES: [&'static str; 2] = ["mongoose", "postgres"];
}

impl FromStr for DbAdapter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mongoose" => Ok(DbAdapter::Mongoose),
            "postgres" => Ok(DbAdapter::Postgres),
            other => Err(other.to_string()),
        }
    }
}

/// Framework a scaffolded project is built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Next.js app router
    NextJs,
    /// Standalone Express server
    Express,
}

impl Framework {
    /// Accepted framework names
    pub const NAMES: [&'static str; 2] = ["nextjs", "express"];
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nextjs" => Ok(Framework::NextJs),
            "express" => Ok(Framework::Express),
            other => Err(other.to_string()),
        }
    }
}

/// Options for scaffolding a new project
///
/// Adapter and framework stay as raw strings so that an unsupported value
/// reaches the option validator instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldProjectConfig {
    /// Project name, kebab-case
    #[serde(default)]
    pub project_name: String,
    /// Database adapter name
    #[serde(default)]
    pub db_adapter: String,
    /// Framework name, defaults to nextjs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    /// Add an example `Pages` collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_example: Option<bool>,
    /// Plugin packages to list in the generated project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,
}

/// Outcome of validating a [`ScaffoldProjectConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldValidation {
    /// True when no violations were found
    pub is_valid: bool,
    /// Every violation, in check order
    pub errors: Vec<String>,
}

/// Classification of payload text used by validation and formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    /// TypeScript source
    Typescript,
    /// A `payload.config.ts`
    PayloadConfig,
    /// A collection definition
    Collection,
    /// A field definition
    Field,
    /// JSON document
    Json,
}

impl ContentKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Typescript => "typescript",
            ContentKind::PayloadConfig => "payloadConfig",
            ContentKind::Collection => "collection",
            ContentKind::Field => "field",
            ContentKind::Json => "json",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "typescript" => Ok(ContentKind::Typescript),
            "payloadConfig" => Ok(ContentKind::PayloadConfig),
            "collection" => Ok(ContentKind::Collection),
            "field" => Ok(ContentKind::Field),
            "json" => Ok(ContentKind::Json),
            other => Err(format!(
                "Unsupported fileType: {}. Supported: typescript, payloadConfig, collection, field, json",
                other
            )),
        }
    }
}
