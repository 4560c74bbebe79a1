#![warn(missing_docs)]

//! Code generation for Payload CMS projects
//!
//! Produces source text from structured input without executing or writing
//! it anywhere: template rendering, field and collection synthesis, project
//! scaffolding, rule-based validation and model-assisted generation grounded
//! in a caller-supplied project context.

pub mod code_generator;
pub mod code_validator;
pub mod collection_synthesizer;
pub mod context;
pub mod error;
pub mod field_synthesizer;
pub mod formatter;
pub mod generation_manager;
pub mod models;
pub mod prompt_builder;
pub mod scaffolding;
pub mod templates;

// Re-export public API
pub use code_generator::{extract_code, ContextAwareGenerator, GenerationConfig, ModelClient};
pub use code_validator::{
    query_rules, rules, validate_code, Severity, ValidationMessage, ValidationReport,
    ValidationRule,
};
pub use collection_synthesizer::{select_title_field, synthesize_collection};
pub use context::{
    query_project_structure, HookContext, HookOperation, HookStage, McpContext,
    ProjectStructure, Relationship, StructureQueryResult,
};
pub use error::{GenerationError, Result};
pub use field_synthesizer::synthesize_field;
pub use formatter::{CodeFormatter, DefaultFormatter, FormatError, ParserHint, SharedFormatter};
pub use generation_manager::GenerationManager;
pub use models::{
    CollectionSpec, ContentKind, DbAdapter, FieldSpec, FieldType, Framework, RelationTo,
    ScaffoldProjectConfig, ScaffoldValidation,
};
pub use prompt_builder::{GeneratedPrompt, PromptBuilder};
pub use scaffolding::{scaffold_project, validate_scaffold_options, FileSet};
pub use templates::{TemplateKind, TemplateOptions};
