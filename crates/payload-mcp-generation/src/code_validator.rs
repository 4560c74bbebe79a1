//! Rule-based code validation
//!
//! A small static catalog of heuristic rules. Each rule applies to a set of
//! [`ContentKind`]s and owns at most one check. This is not a linter: checks
//! are regex scans and a strict JSON parse, nothing more.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::ContentKind;

/// Severity of a rule's findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported under `errors`
    Error,
    /// Reported under `warnings`
    Warning,
    /// Reported under `info`
    Info,
}

/// Heuristic a rule runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleCheck {
    WellFormedJson,
    KebabCaseSlug,
    NoAnyType,
    /// Catalogued for querying only
    Documented,
}

/// Catalog entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    /// Stable rule identifier
    pub id: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Severity of findings
    pub severity: Severity,
    /// Content kinds the rule applies to
    pub applies_to: Vec<ContentKind>,
    #[serde(skip)]
    check: RuleCheck,
}

impl ValidationRule {
    /// Whether the rule applies to `kind`
    pub fn applies_to(&self, kind: ContentKind) -> bool {
        self.applies_to.contains(&kind)
    }

    fn matches_query(&self, query: &str) -> bool {
        self.id.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
            || self
                .applies_to
                .iter()
                .any(|kind| kind.as_str().to_lowercase().contains(query))
    }
}

/// One finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMessage {
    /// Rule that produced the finding
    pub rule_id: String,
    /// What was found
    pub message: String,
    /// Rule description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// 1-based line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-based column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

/// Findings partitioned by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Error-severity findings
    pub errors: Vec<ValidationMessage>,
    /// Warning-severity findings
    pub warnings: Vec<ValidationMessage>,
    /// Info-severity findings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<ValidationMessage>,
}

impl ValidationReport {
    /// True when there are no errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn bucket(&mut self, severity: Severity) -> &mut Vec<ValidationMessage> {
        match severity {
            Severity::Error => &mut self.errors,
            Severity::Warning => &mut self.warnings,
            Severity::Info => &mut self.info,
        }
    }
}

static RULES: Lazy<Vec<ValidationRule>> = Lazy::new(|| {
    vec![
        ValidationRule {
            id: "PAYLOAD001",
            description: "Collections slugs should be kebab-case.",
            severity: Severity::Warning,
            applies_to: vec![ContentKind::Collection, ContentKind::PayloadConfig],
            check: RuleCheck::KebabCaseSlug,
        },
        ValidationRule {
            id: "PAYLOAD002",
            description: "Prefer `blockSlug` over `slug` for Block definitions.",
            severity: Severity::Warning,
            applies_to: vec![ContentKind::Collection, ContentKind::Field],
            check: RuleCheck::Documented,
        },
        ValidationRule {
            id: "TS001",
            description: "Avoid using `any` type.",
            severity: Severity::Warning,
            applies_to: vec![ContentKind::Typescript],
            check: RuleCheck::NoAnyType,
        },
        ValidationRule {
            id: "JSON001",
            description: "Ensure JSON is well-formed.",
            severity: Severity::Error,
            applies_to: vec![ContentKind::Json],
            check: RuleCheck::WellFormedJson,
        },
    ]
});

static SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"slug:\s*['"]([a-zA-Z0-9_-]+)['"]"#).expect("slug pattern is valid")
});

static ANY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bany\b").expect("any pattern is valid"));

/// The full rule catalog
pub fn rules() -> &'static [ValidationRule] {
    &RULES
}

/// Filters the catalog by a case-insensitive substring
///
/// Matches against id, description and applicable kinds. An empty query
/// returns every rule.
pub fn query_rules(query: &str) -> Vec<&'static ValidationRule> {
    info!(query, "Querying validation rules");

    if query.is_empty() {
        return RULES.iter().collect();
    }
    let query = query.to_lowercase();
    RULES.iter().filter(|rule| rule.matches_query(&query)).collect()
}

/// Runs every rule that applies to `kind` against `code`
pub fn validate_code(code: &str, kind: ContentKind) -> ValidationReport {
    info!(kind = %kind, length = code.len(), "Validating code");

    let mut report = ValidationReport::default();
    for rule in RULES.iter().filter(|rule| rule.applies_to(kind)) {
        let findings = run_check(rule, code, report.bucket(rule.severity));
        report.bucket(rule.severity).extend(findings);
    }

    debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validation complete"
    );
    report
}

/// Runs one rule; `existing` holds findings already in the rule's bucket
fn run_check(
    rule: &ValidationRule,
    code: &str,
    existing: &[ValidationMessage],
) -> Vec<ValidationMessage> {
    match rule.check {
        RuleCheck::WellFormedJson => check_json(rule, code),
        RuleCheck::KebabCaseSlug => check_slugs(rule, code, existing),
        RuleCheck::NoAnyType => check_any(rule, code, existing),
        RuleCheck::Documented => Vec::new(),
    }
}

fn finding(rule: &ValidationRule, message: String) -> ValidationMessage {
    ValidationMessage {
        rule_id: rule.id.to_string(),
        message,
        details: Some(rule.description.to_string()),
        line: None,
        column: None,
    }
}

fn check_json(rule: &ValidationRule, code: &str) -> Vec<ValidationMessage> {
    match serde_json::from_str::<serde_json::Value>(code) {
        Ok(_) => Vec::new(),
        Err(e) => {
            let mut message = finding(rule, format!("Invalid JSON: {}", e));
            message.line = Some(e.line());
            message.column = Some(e.column());
            vec![message]
        }
    }
}

/// Flags slug literals that change under lowercase and `_` to `-`
///
/// A slug is skipped when an earlier finding for this rule already mentions
/// it anywhere in its message.
fn check_slugs(
    rule: &ValidationRule,
    code: &str,
    existing: &[ValidationMessage],
) -> Vec<ValidationMessage> {
    let mut found: Vec<ValidationMessage> = Vec::new();

    for captures in SLUG_PATTERN.captures_iter(code) {
        let Some(slug) = captures.get(1) else {
            continue;
        };
        let text = slug.as_str();
        if text == text.to_lowercase().replace('_', "-") {
            continue;
        }
        let reported = existing
            .iter()
            .chain(found.iter())
            .any(|m| m.rule_id == rule.id && m.message.contains(text));
        if reported {
            continue;
        }

        let mut message = finding(rule, format!("Potential non-kebab-case slug found: '{}'.", text));
        let (line, column) = position(code, slug.start());
        message.line = Some(line);
        message.column = Some(column);
        found.push(message);
    }

    found
}

fn check_any(
    rule: &ValidationRule,
    code: &str,
    existing: &[ValidationMessage],
) -> Vec<ValidationMessage> {
    if existing.iter().any(|m| m.rule_id == rule.id) {
        return Vec::new();
    }
    match ANY_PATTERN.find(code) {
        Some(m) => {
            let mut message = finding(rule, format!("Code contains 'any'. {}", rule.description));
            let (line, column) = position(code, m.start());
            message.line = Some(line);
            message.column = Some(column);
            vec![message]
        }
        None => Vec::new(),
    }
}

/// 1-based line and column of a byte offset
fn position(code: &str, offset: usize) -> (usize, usize) {
    let before = &code[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, before[line_start..].chars().count() + 1)
}
