//! Code formatting
//!
//! Generated text goes through a [`CodeFormatter`] before it leaves the crate.
//! Formatting is best effort: [`format_code`] falls back to the unformatted
//! text when the formatter rejects its input.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

/// Parser hint telling the formatter what kind of text it receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserHint {
    /// TypeScript / TSX source
    Typescript,
    /// JSON document
    Json,
}

impl ParserHint {
    /// Parser name
    pub fn as_str(&self) -> &'static str {
        match self {
            ParserHint::Typescript => "typescript",
            ParserHint::Json => "json",
        }
    }
}

/// Errors raised by a formatter
#[derive(Debug, Error)]
pub enum FormatError {
    /// JSON input did not parse
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Brackets do not pair up
    #[error("Unbalanced '{delimiter}' at line {line}")]
    Unbalanced {
        /// Offending delimiter
        delimiter: char,
        /// 1-based line number
        line: usize,
    },

    /// A string or comment never closes
    #[error("Unterminated {0}")]
    Unterminated(&'static str),
}

/// Pretty-prints source text for a parser hint
pub trait CodeFormatter: Send + Sync {
    /// Formats `code`, or fails if it cannot be parsed as `parser`
    fn format(&self, code: &str, parser: ParserHint) -> Result<String, FormatError>;
}

/// Formats `code`, returning the original text if formatting fails
pub fn format_code(formatter: &dyn CodeFormatter, code: &str, parser: ParserHint) -> String {
    match formatter.format(code, parser) {
        Ok(formatted) => formatted,
        Err(e) => {
            warn!(
                "Formatting failed for parser '{}': {}",
                parser.as_str(),
                e
            );
            code.to_string()
        }
    }
}

/// Shared handle to a formatter
pub type SharedFormatter = Arc<dyn CodeFormatter>;

/// Built-in formatter
///
/// JSON is re-indented with two spaces, keeping key order. Source text has its
/// delimiters checked, trailing whitespace stripped, runs of blank lines
/// collapsed and a single trailing newline enforced.
#[derive(Debug, Clone, Default)]
pub struct DefaultFormatter;

impl DefaultFormatter {
    /// Create a new formatter
    pub fn new() -> Self {
        Self
    }

    fn format_json(&self, content: &str) -> Result<String, FormatError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let mut formatted = serde_json::to_string_pretty(&value)?;
        formatted.push('\n');
        Ok(formatted)
    }

    fn format_source(&self, content: &str) -> Result<String, FormatError> {
        check_delimiters(content)?;

        let mut lines: Vec<&str> = Vec::new();
        let mut blank_run = 0;
        for line in content.lines().map(str::trim_end) {
            if line.is_empty() {
                blank_run += 1;
                if blank_run > 1 || lines.is_empty() {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            lines.push(line);
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let mut formatted = lines.join("\n");
        formatted.push('\n');
        Ok(formatted)
    }
}

impl CodeFormatter for DefaultFormatter {
    fn format(&self, code: &str, parser: ParserHint) -> Result<String, FormatError> {
        match parser {
            ParserHint::Json => self.format_json(code),
            ParserHint::Typescript => self.format_source(code),
        }
    }
}

/// Checks that (), [] and {} pair up outside strings and comments
fn check_delimiters(content: &str) -> Result<(), FormatError> {
    #[derive(Clone, Copy)]
    enum State {
        Code,
        Str(char),
        LineComment,
        BlockComment,
    }

    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut state = State::Code;
    let mut line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        match state {
            State::Code => match c {
                '"' | '\'' | '`' => state = State::Str(c),
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                '(' | '[' | '{' => stack.push((c, line)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        _ => return Err(FormatError::Unbalanced { delimiter: c, line }),
                    }
                }
                _ => {}
            },
            State::Str(quote) => match c {
                '\\' => {
                    if chars.next() == Some('\n') {
                        line += 1;
                    }
                }
                '\n' if quote != '`' => return Err(FormatError::Unterminated("string literal")),
                c if c == quote => state = State::Code,
                _ => {}
            },
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
        }
    }

    match state {
        State::Str(_) => return Err(FormatError::Unterminated("string literal")),
        State::BlockComment => return Err(FormatError::Unterminated("block comment")),
        _ => {}
    }

    match stack.pop() {
        Some((delimiter, line)) => Err(FormatError::Unbalanced { delimiter, line }),
        None => Ok(()),
    }
}
