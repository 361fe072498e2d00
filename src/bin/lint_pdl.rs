//! Lint PDL source files: spaces-only indentation, even indentation width,
//! a space after `#`, no trailing whitespace.
//!
//! Usage:
//!   lint_pdl [OPTIONS] [FILE.pdl ...]
//!   lint_pdl < file.pdl
//!
//! When given file(s), the linter rewrites them to satisfy the fixable rules,
//! then reports any remaining issues.
//!
//! Options:
//!   --fix, -f    With stdin: print fixed source to stdout instead of linting.
//!   --human, -H  Human-readable output
//!
//! If no files are given, reads from stdin (lint only unless --fix).

use pdl2json::lint::{lint, lint_fix, LintMessage, LintRule, Severity};
use std::io::{self, Read, Write};

fn rule_id(rule: LintRule) -> &'static str {
    match rule {
        LintRule::IndentationSpacesOnly => "indentation-spaces-only",
        LintRule::IndentationWidth => "indentation-width",
        LintRule::CommentSpacing => "comment-spacing",
        LintRule::NoTrailingWhitespace => "no-trailing-whitespace",
    }
}

#[derive(Clone, Copy)]
enum OutputStyle {
    Compact,
    Human,
}

fn print_message(path: &str, m: &LintMessage, style: OutputStyle) {
    let severity = match m.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    match style {
        OutputStyle::Compact => {
            println!(
                "{}:{}:{}: {}: {} [{}]",
                path,
                m.line,
                m.column,
                severity,
                m.message,
                rule_id(m.rule)
            );
        }
        OutputStyle::Human => {
            println!("  {} {}:{}: {}", path, m.line, m.column, m.message);
            println!("    rule: {}", rule_id(m.rule));
        }
    }
}

/// Print all messages for one source, returning (errors, warnings).
fn report(path: &str, messages: &[LintMessage], style: OutputStyle) -> (usize, usize) {
    let mut errors = 0;
    let mut warnings = 0;
    for m in messages {
        match m.severity {
            Severity::Error => errors += 1,
            Severity::Warning => warnings += 1,
        }
        print_message(path, m, style);
    }
    (errors, warnings)
}

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let fix = if let Some(pos) = args.iter().position(|a| a == "--fix" || a == "-f") {
        args.remove(pos);
        true
    } else {
        false
    };
    let style = if let Some(pos) = args.iter().position(|a| a == "--human" || a == "-H") {
        args.remove(pos);
        OutputStyle::Human
    } else {
        OutputStyle::Compact
    };

    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    let mut io_failed = false;

    if args.is_empty() {
        let mut src = String::new();
        io::stdin().read_to_string(&mut src)?;
        if fix {
            io::stdout().write_all(lint_fix(&src).as_bytes())?;
            return Ok(());
        }
        let (errors, warnings) = report("<stdin>", &lint(&src), style);
        total_errors += errors;
        total_warnings += warnings;
    } else {
        for path in &args {
            let src = match std::fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}: {}", path, e);
                    io_failed = true;
                    continue;
                }
            };
            let fixed = lint_fix(&src);
            if fixed != src {
                if let Err(e) = std::fs::write(path, &fixed) {
                    eprintln!("{}: write failed: {}", path, e);
                    io_failed = true;
                    continue;
                }
                eprintln!("{}: fixed", path);
            }
            let (errors, warnings) = report(path, &lint(&fixed), style);
            total_errors += errors;
            total_warnings += warnings;
        }
    }

    if total_errors > 0 || total_warnings > 0 {
        eprintln!("lint: {} error(s), {} warning(s)", total_errors, total_warnings);
    }
    if total_errors > 0 || io_failed {
        std::process::exit(1);
    }
    Ok(())
}
