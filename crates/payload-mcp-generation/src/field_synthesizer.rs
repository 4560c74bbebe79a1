//! Field synthesis
//!
//! Renders a [`FieldSpec`] as an object literal. Keys are quoted, so the
//! output is valid TypeScript and valid JSON at the same time.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{GenerationError, Result};
use crate::models::FieldSpec;

/// Renders one field as an object literal
///
/// Attributes appear in declaration order followed by any extra options; unset
/// attributes are omitted. Nested values are indented one level per depth.
pub fn synthesize_field(spec: &FieldSpec) -> Result<String> {
    debug!(name = %spec.name, "Synthesizing field");

    match serde_json::to_value(spec)? {
        Value::Object(map) => render_object_literal(&map),
        other => Err(GenerationError::Synthesis(format!(
            "field '{}' did not serialize to an object (got {})",
            spec.name, other
        ))),
    }
}

/// Renders a map as a two-space indented object literal
pub fn render_object_literal(map: &Map<String, Value>) -> Result<String> {
    if map.is_empty() {
        return Ok("{}".to_string());
    }

    let last = map.len() - 1;
    let mut out = String::from("{");

    for (index, (key, value)) in map.iter().enumerate() {
        let rendered = serde_json::to_string_pretty(value)?;
        let indented = indent_continuation(&rendered, "  ");
        let key = serde_json::to_string(key)?;
        let separator = if index < last { "," } else { "" };
        out.push_str(&format!("\n  {}: {}{}", key, indented, separator));
    }

    out.push_str("\n}");
    Ok(out)
}

/// Prefixes every line but the first with `indent`
pub(crate) fn indent_continuation(text: &str, indent: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
