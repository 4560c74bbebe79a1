//! Collection synthesis
//!
//! Composes synthesized fields and collection-level options into a complete
//! `CollectionConfig` module.

use tracing::{info, warn};

use crate::error::{GenerationError, Result};
use crate::field_synthesizer::{indent_continuation, synthesize_field};
use crate::models::{CollectionSpec, FieldSpec, FieldType};
use crate::templates::{ts_string, CaseTransform};

/// Picks the field used as the admin title
///
/// A field named `title` wins, then the first text field, then the first
/// field; `id` when there are no fields at all.
pub fn select_title_field(fields: &[FieldSpec]) -> &str {
    fields
        .iter()
        .find(|f| f.name == "title")
        .or_else(|| fields.iter().find(|f| f.field_type == FieldType::Text))
        .or_else(|| fields.first())
        .map(|f| f.name.as_str())
        .unwrap_or("id")
}

/// Exported identifier for the collection
///
/// The plural label with everything but ASCII letters and digits removed,
/// or the PascalCase slug when no usable plural was given.
pub fn collection_identifier(spec: &CollectionSpec) -> String {
    let from_plural: String = spec
        .plural
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    if from_plural.is_empty() {
        CaseTransform::PascalCase.apply(&spec.slug)
    } else {
        from_plural
    }
}

/// Renders an unformatted collection module
pub fn synthesize_collection(spec: &CollectionSpec) -> Result<String> {
    info!(slug = %spec.slug, "Generating full collection definition");

    if spec.fields.is_empty() {
        return Err(GenerationError::InvalidInput(format!(
            "collection '{}' must declare at least one field",
            spec.slug
        )));
    }
    if spec.slug != CaseTransform::KebabCase.apply(&spec.slug) {
        warn!(slug = %spec.slug, "Collection slug is not kebab-case");
    }

    let field_defs = spec
        .fields
        .iter()
        .map(|field| synthesize_field(field).map(|code| format!("    {}", indent_continuation(&code, "    "))))
        .collect::<Result<Vec<_>>>()?;

    let identifier = collection_identifier(spec);
    let mut code = String::new();

    code.push_str("// Generated by payload-mcp. Payload types must be available in the target project.\n");
    code.push_str("import type { CollectionConfig } from 'payload/types';\n\n");
    code.push_str(&format!("const {}: CollectionConfig = {{\n", identifier));
    code.push_str(&format!("  slug: {},\n", ts_string(&spec.slug)));
    if !spec.singular.is_empty() && !spec.plural.is_empty() {
        code.push_str(&format!(
            "  labels: {{\n    singular: {},\n    plural: {},\n  }},\n",
            ts_string(&spec.singular),
            ts_string(&spec.plural)
        ));
    }
    code.push_str("  admin: {\n");
    code.push_str(&format!(
        "    useAsTitle: {},\n",
        ts_string(select_title_field(&spec.fields))
    ));
    code.push_str("  },\n");
    code.push_str("  fields: [\n");
    code.push_str(&field_defs.join(",\n"));
    code.push_str("\n  ],\n");
    if spec.timestamps == Some(true) {
        code.push_str("  timestamps: true,\n");
    }
    if spec.draft == Some(true) {
        code.push_str("  versions: { drafts: true },\n");
    }
    code.push_str("};\n\n");
    code.push_str(&format!("export default {};\n", identifier));

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(fields: Vec<FieldSpec>) -> CollectionSpec {
        CollectionSpec {
            slug: "blog-posts".to_string(),
            singular: "Blog Post".to_string(),
            plural: "Blog Posts".to_string(),
            fields,
            timestamps: None,
            draft: None,
        }
    }

    #[test]
    fn test_title_prefers_field_named_title() {
        let fields = vec![
            FieldSpec::new("headline", FieldType::Text),
            FieldSpec::new("title", FieldType::Textarea),
        ];
        assert_eq!(select_title_field(&fields), "title");
    }

    #[test]
    fn test_title_falls_back_to_first_text_field() {
        let fields = vec![
            FieldSpec::new("views", FieldType::Number),
            FieldSpec::new("headline", FieldType::Text),
        ];
        assert_eq!(select_title_field(&fields), "headline");
    }

    #[test]
    fn test_title_falls_back_to_first_field_then_id() {
        let fields = vec![
            FieldSpec::new("views", FieldType::Number),
            FieldSpec::new("publishedAt", FieldType::Date),
        ];
        assert_eq!(select_title_field(&fields), "views");
        assert_eq!(select_title_field(&[]), "id");
    }

    #[test]
    fn test_identifier_from_plural_or_slug() {
        let mut s = spec(vec![]);
        assert_eq!(collection_identifier(&s), "BlogPosts");
        s.plural = "  ".to_string();
        assert_eq!(collection_identifier(&s), "BlogPosts");
        s.slug = "media-items".to_string();
        assert_eq!(collection_identifier(&s), "MediaItems");
    }

    #[test]
    fn test_synthesize_collection_preserves_field_order_and_flags() {
        let mut s = spec(vec![
            FieldSpec::new("title", FieldType::Text).required(true),
            FieldSpec::new("body", FieldType::RichText),
        ]);
        s.timestamps = Some(true);
        s.draft = Some(true);

        let code = synthesize_collection(&s).unwrap();
        assert!(code.contains("const BlogPosts: CollectionConfig = {"));
        assert!(code.contains("slug: 'blog-posts',"));
        assert!(code.contains("useAsTitle: 'title',"));
        assert!(code.contains("timestamps: true,"));
        assert!(code.contains("versions: { drafts: true },"));
        assert!(code.contains("export default BlogPosts;"));

        let title_at = code.find("\"name\": \"title\"").unwrap();
        let body_at = code.find("\"name\": \"body\"").unwrap();
        assert!(title_at < body_at);
    }

    #[test]
    fn test_flags_absent_when_not_requested() {
        let code = synthesize_collection(&spec(vec![FieldSpec::new("title", FieldType::Text)])).unwrap();
        assert!(!code.contains("timestamps"));
        assert!(!code.contains("versions"));
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        let result = synthesize_collection(&spec(vec![]));
        assert!(matches!(result, Err(GenerationError::InvalidInput(_))));
    }
}
