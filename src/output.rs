//! Output formatting for human and JSON modes
//!
//! Token listings and vocabulary reports can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// One token as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    /// Kind name
    pub kind: String,
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
    /// 1-based line of the start offset
    pub line: u32,
    /// 1-based column of the start offset
    pub column: u32,
    /// Matched text
    pub text: String,
}

impl TokenRecord {
    fn is_undetermined(&self) -> bool {
        self.kind == "UNDETERMINED"
    }
}

/// Result of tokenizing one input
#[derive(Debug, Serialize)]
pub struct TokenListing {
    /// Where the input came from
    pub source: String,
    /// Tokens returned by the scanner, in order
    pub tokens: Vec<TokenRecord>,
    /// Skipped spans; empty unless requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<TokenRecord>,
    /// Number of characters no pattern recognised
    pub unrecognized: usize,
}

impl TokenListing {
    /// Render the listing based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => self.render_json(),
        }
    }

    /// Human-readable rendering, one token per line
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            let kind = if token.is_undetermined() {
                token.kind.red().bold()
            } else {
                token.kind.bold()
            };
            let _ = writeln!(out, "{:>4}:{:<4} {kind} '{}'", token.line, token.column, escape(&token.text));
        }

        if !self.skipped.is_empty() {
            let _ = writeln!(out, "\nSkipped:");
            for token in &self.skipped {
                let _ = writeln!(
                    out,
                    "{:>4}:{:<4} {} '{}'",
                    token.line,
                    token.column,
                    token.kind.dimmed(),
                    escape(&token.text)
                );
            }
        }

        if self.unrecognized > 0 {
            let _ = writeln!(
                out,
                "\n{} unrecognized character(s) in {}",
                self.unrecognized.to_string().red(),
                self.source
            );
        }
        out
    }

    fn render_json(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing token listing: {e}"),
        }
    }
}

/// One entry of a vocabulary report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindInfo {
    /// Tie-break priority (registration index)
    pub priority: usize,
    /// Kind name
    pub name: String,
    /// Whether the kind is skipped
    pub skip: bool,
}

/// Result of validating a vocabulary file
#[derive(Debug, Serialize)]
pub struct VocabularyReport {
    /// The vocabulary file
    pub source: String,
    /// Kinds in priority order
    pub kinds: Vec<KindInfo>,
}

impl VocabularyReport {
    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => match serde_json::to_string_pretty(self) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Error serializing vocabulary report: {e}"),
            },
        }
    }

    /// Human-readable rendering
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut out = format!("{}: {} token kind(s)\n", self.source, self.kinds.len());
        for kind in &self.kinds {
            let marker = if kind.skip { " (skip)" } else { "" };
            let _ = writeln!(out, "  {:>3}  {}{marker}", kind.priority, kind.name);
        }
        out
    }
}

/// Make control characters visible in single-line output
fn escape(text: &str) -> String {
    text.escape_debug().to_string()
}
