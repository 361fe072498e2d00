//! Linter for PDL source files: style rules the grammar itself does not
//! enforce.
//!
//! ## Rules
//!
//! - **Indentation**: spaces only (no tabs); nesting steps are two spaces, so
//!   the indentation width must be even.
//! - **Comment spacing**: comment text must be separated from `#` by a space.
//!   The parser drops the character right after `#`, so `#text` silently
//!   loses its first letter.
//! - **No trailing whitespace**: a trailing space after an enum literal turns
//!   the line into a syntax error, and trailing whitespace is noise anywhere
//!   else.
//!
//! Run the linter via the `lint_pdl` binary: `cargo run --bin lint_pdl -- file.pdl`
//! or pipe: `lint_pdl < file.pdl`. Exit code 1 if any error-level findings.

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Identifies which rule produced the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintRule {
    /// Indentation must use spaces only (no tabs).
    IndentationSpacesOnly,
    /// Indentation must be a multiple of two spaces.
    IndentationWidth,
    /// Comment text must be separated from `#` by a space.
    CommentSpacing,
    /// Trailing whitespace is not allowed.
    NoTrailingWhitespace,
}

/// A single lint message with location (1-based line and column).
#[derive(Debug, Clone)]
pub struct LintMessage {
    pub line: usize,
    pub column: usize,
    pub rule: LintRule,
    pub severity: Severity,
    pub message: String,
}

/// Run all lint rules on PDL source. Returns messages in line order.
pub fn lint(source: &str) -> Vec<LintMessage> {
    let mut out = Vec::new();

    for (i, line) in source.lines().enumerate() {
        let line_no = i + 1;

        if line != line.trim_end() {
            out.push(LintMessage {
                line: line_no,
                column: line.trim_end().len() + 1,
                rule: LintRule::NoTrailingWhitespace,
                severity: Severity::Warning,
                message: "trailing whitespace not allowed".to_string(),
            });
        }

        let trimmed = line.trim_start();
        let leading = &line[..line.len() - trimmed.len()];

        if leading.contains('\t') {
            out.push(LintMessage {
                line: line_no,
                column: 1,
                rule: LintRule::IndentationSpacesOnly,
                severity: Severity::Error,
                message: "indentation must use spaces only (no tabs)".to_string(),
            });
        } else if !trimmed.is_empty() && leading.len() % 2 != 0 {
            out.push(LintMessage {
                line: line_no,
                column: 1,
                rule: LintRule::IndentationWidth,
                severity: Severity::Error,
                message: format!(
                    "indentation must be a multiple of two spaces (found {})",
                    leading.len()
                ),
            });
        }

        if let Some(rest) = trimmed.strip_prefix('#') {
            if !rest.is_empty() && !rest.starts_with(' ') {
                out.push(LintMessage {
                    line: line_no,
                    column: leading.len() + 2,
                    rule: LintRule::CommentSpacing,
                    severity: Severity::Warning,
                    message: "comment text must be separated from `#` by a space".to_string(),
                });
            }
        }
    }

    out
}

/// Fix PDL source to satisfy the mechanical lint rules: tabs in the
/// indentation become two spaces each, a missing space after `#` is inserted,
/// trailing whitespace is removed. Indentation width is not touched.
pub fn lint_fix(source: &str) -> String {
    let mut out_lines: Vec<String> = Vec::new();

    for line in source.lines() {
        let line = line.trim_end();
        let trimmed = line.trim_start();
        let leading = &line[..line.len() - trimmed.len()];
        let indent = leading.replace('\t', "  ");

        let content = match trimmed.strip_prefix('#') {
            Some(rest) if !rest.is_empty() && !rest.starts_with(' ') => {
                format!("# {}", rest)
            }
            _ => trimmed.to_string(),
        };

        out_lines.push(format!("{}{}", indent, content));
    }

    let mut fixed = out_lines.join("\n");
    if source.ends_with('\n') {
        fixed.push('\n');
    }
    fixed
}
