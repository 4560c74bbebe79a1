//! Placeholder resolution and case transformation

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Represents a case transformation for placeholder values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTransform {
    /// PascalCase (e.g., MyProject)
    PascalCase,
    /// kebab-case (e.g., my-project)
    KebabCase,
    /// Title Case (e.g., My Project)
    TitleCase,
}

impl CaseTransform {
    /// Apply case transformation to a string
    pub fn apply(&self, input: &str) -> String {
        use heck::{ToKebabCase, ToPascalCase, ToTitleCase};

        match self {
            CaseTransform::PascalCase => input.to_pascal_case(),
            CaseTransform::KebabCase => input.to_kebab_case(),
            CaseTransform::TitleCase => input.to_title_case(),
        }
    }
}

/// Resolves `{{name}}` placeholders in template text
#[derive(Debug, Clone, Default)]
pub struct PlaceholderResolver {
    /// Mapping of placeholder names to their values
    values: HashMap<String, String>,
}

impl PlaceholderResolver {
    /// Create a new placeholder resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds values from an options bag
    ///
    /// Each `(name, default)` takes the option's string value when it is a
    /// non-empty string and the default otherwise.
    pub fn from_options(options: &Map<String, Value>, defaults: &[(&str, &str)]) -> Self {
        let mut resolver = Self::new();
        for (name, default) in defaults {
            let value = options
                .get(*name)
                .and_then(Value::as_str)
                .filter(|v| !v.is_empty())
                .unwrap_or(default);
            resolver.add_value(*name, value);
        }
        resolver
    }

    /// Add a value for a placeholder
    pub fn add_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a placeholder value
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Substitutes every known `{{name}}` in `template`
    ///
    /// Substitution is single pass: text coming from values is never
    /// rescanned, and unknown placeholders are left untouched.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let name = after[..end].trim();
                    match self.resolve(name) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_transforms() {
        assert_eq!(CaseTransform::PascalCase.apply("blog-posts"), "BlogPosts");
        assert_eq!(CaseTransform::KebabCase.apply("BlogPosts"), "blog-posts");
        assert_eq!(CaseTransform::TitleCase.apply("my-awesome-site"), "My Awesome Site");
    }

    #[test]
    fn test_from_options_uses_defaults_for_missing_or_blank() {
        let options = json!({"slug": "posts", "plural": "", "name": 3});
        let resolver = PlaceholderResolver::from_options(
            options.as_object().unwrap(),
            &[("slug", "new-items"), ("plural", "New Items"), ("name", "x")],
        );
        assert_eq!(resolver.resolve("slug"), Some("posts"));
        assert_eq!(resolver.resolve("plural"), Some("New Items"));
        assert_eq!(resolver.resolve("name"), Some("x"));
    }

    #[test]
    fn test_render_substitutes_known_placeholders_once() {
        let mut resolver = PlaceholderResolver::new();
        resolver.add_value("name", "{{other}}");
        resolver.add_value("other", "nope");
        assert_eq!(
            resolver.render("const {{ name }} = {{missing}};"),
            "const {{other}} = {{missing}};"
        );
    }

    #[test]
    fn test_render_leaves_unclosed_braces() {
        let resolver = PlaceholderResolver::new();
        assert_eq!(resolver.render("a {{ b"), "a {{ b");
    }
}
