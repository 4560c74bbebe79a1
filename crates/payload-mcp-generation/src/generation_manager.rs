//! Generation facade
//!
//! Owns the formatter and the context-aware generator, and runs every
//! generated text through the formatter with the right parser hint.

use std::sync::Arc;

use tracing::info;

use crate::code_generator::ContextAwareGenerator;
use crate::collection_synthesizer::synthesize_collection;
use crate::context::McpContext;
use crate::error::Result;
use crate::field_synthesizer::synthesize_field;
use crate::formatter::{format_code, DefaultFormatter, ParserHint, SharedFormatter};
use crate::models::{CollectionSpec, FieldSpec, ScaffoldProjectConfig};
use crate::scaffolding::{scaffold_project, FileSet};
use crate::templates::{TemplateKind, TemplateOptions};

/// Entry point for all generation operations
#[derive(Clone)]
pub struct GenerationManager {
    formatter: SharedFormatter,
    generator: ContextAwareGenerator,
}

impl GenerationManager {
    /// Creates a manager using the built-in formatter
    pub fn new(generator: ContextAwareGenerator) -> Self {
        Self::with_formatter(generator, Arc::new(DefaultFormatter::new()))
    }

    /// Creates a manager with a custom formatter
    pub fn with_formatter(generator: ContextAwareGenerator, formatter: SharedFormatter) -> Self {
        Self {
            formatter,
            generator,
        }
    }

    /// The context-aware generator
    pub fn generator(&self) -> &ContextAwareGenerator {
        &self.generator
    }

    fn format(&self, code: &str, parser: ParserHint) -> String {
        format_code(self.formatter.as_ref(), code, parser)
    }

    /// Renders a template
    pub fn generate_template(&self, kind: TemplateKind, options: &TemplateOptions) -> Result<String> {
        info!(kind = %kind, "Generating template");
        let raw = kind.render(options)?;
        Ok(self.format(&raw, kind.parser_hint()))
    }

    /// Renders a full collection definition
    pub fn generate_collection(&self, spec: &CollectionSpec) -> Result<String> {
        let raw = synthesize_collection(spec)?;
        Ok(self.format(&raw, ParserHint::Typescript))
    }

    /// Renders one field definition
    pub fn generate_field(&self, spec: &FieldSpec) -> Result<String> {
        info!(name = %spec.name, field_type = ?spec.field_type, "Generating field definition");
        let raw = synthesize_field(spec)?;
        Ok(self.format(&raw, ParserHint::Json))
    }

    /// Generates the files of a new project
    ///
    /// The config must already have passed
    /// [`validate_scaffold_options`](crate::scaffolding::validate_scaffold_options).
    pub fn scaffold_project(&self, config: &ScaffoldProjectConfig) -> Result<FileSet> {
        scaffold_project(config, self.formatter.as_ref())
    }

    /// Asks the model for code grounded in `context`
    ///
    /// # Example
    ///
    /// ```rust
    /// use payload_mcp_generation::{
    ///     ContextAwareGenerator, GenerationError, GenerationManager, McpContext,
    /// };
    ///
    /// # tokio_test::block_on(async {
    /// let manager = GenerationManager::new(ContextAwareGenerator::unavailable());
    /// let result = manager.generate_code("a slug hook", &McpContext::default()).await;
    /// assert!(matches!(result, Err(GenerationError::ModelUnavailable)));
    /// # });
    /// ```
    pub async fn generate_code(&self, prompt: &str, context: &McpContext) -> Result<String> {
        let raw = self.generator.generate(prompt, context).await?;
        Ok(self.format(&raw, ParserHint::Typescript))
    }
}

impl std::fmt::Debug for GenerationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationManager")
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}
