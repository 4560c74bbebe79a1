//! Template registry
//!
//! Every [`TemplateKind`] maps to one renderer in [`registry`]. The set of
//! kinds is closed, so adding a kind means adding a variant and the compiler
//! points at every match that needs a new arm.

pub mod registry;
pub mod resolver;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::formatter::ParserHint;

pub use registry::TemplateOptions;
pub use resolver::{CaseTransform, PlaceholderResolver};

/// Source-text shapes the registry can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateKind {
    /// Collection config
    Collection,
    /// Global config
    Global,
    /// Single field definition
    Field,
    /// Collection hook
    Hook,
    /// Access control function
    AccessControl,
    /// Custom endpoint handler
    Endpoint,
    /// React component
    Component,
    /// Payload plugin
    Plugin,
    /// Test suite
    Test,
    /// Database migration
    Migration,
    /// Framework route
    CustomRoute,
    /// Plain function
    GenericFunction,
    /// Plain class
    GenericClass,
}

impl TemplateKind {
    /// Every registered kind, in registry order
    pub const ALL: [TemplateKind; 13] = [
        TemplateKind::Collection,
        TemplateKind::Global,
        TemplateKind::Field,
        TemplateKind::Hook,
        TemplateKind::AccessControl,
        TemplateKind::Endpoint,
        TemplateKind::Component,
        TemplateKind::Plugin,
        TemplateKind::Test,
        TemplateKind::Migration,
        TemplateKind::CustomRoute,
        TemplateKind::GenericFunction,
        TemplateKind::GenericClass,
    ];

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Collection => "collection",
            TemplateKind::Global => "global",
            TemplateKind::Field => "field",
            TemplateKind::Hook => "hook",
            TemplateKind::AccessControl => "accessControl",
            TemplateKind::Endpoint => "endpoint",
            TemplateKind::Component => "component",
            TemplateKind::Plugin => "plugin",
            TemplateKind::Test => "test",
            TemplateKind::Migration => "migration",
            TemplateKind::CustomRoute => "customRoute",
            TemplateKind::GenericFunction => "genericFunction",
            TemplateKind::GenericClass => "genericClass",
        }
    }

    /// Formatter hint for rendered output
    pub fn parser_hint(&self) -> ParserHint {
        match self {
            TemplateKind::Field => ParserHint::Json,
            _ => ParserHint::Typescript,
        }
    }

    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(TemplateKind::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GenerationError::UnknownTemplateKind {
                kind: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

/// Renders `value` as a single-quoted TypeScript string literal
pub fn ts_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
