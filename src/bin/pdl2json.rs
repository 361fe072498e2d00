//! Convert a protocol definition file to a JSON protocol document.
//!
//! Usage:
//!   pdl2json [OPTIONS] [FILE]
//!   pdl2json < file.pdl
//!
//! A FILE whose name ends in `.pdl` is parsed with the PDL grammar; any other
//! name is decoded as an existing JSON protocol document. Stdin is always
//! treated as PDL.
//!
//! Options:
//!   --map-binary-to-string   Emit string in place of binary types
//!   --compact                One-line JSON instead of pretty-printed
//!   -o FILE                  Write output to FILE instead of stdout

use anyhow::Context;
use pdl2json::{load, parse_with_options, ParseOptions};
use std::io::{self, Read, Write};

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut options = ParseOptions::default();
    if let Some(pos) = args.iter().position(|a| a == "--map-binary-to-string") {
        args.remove(pos);
        options.map_binary_to_string = true;
    }
    let compact = if let Some(pos) = args.iter().position(|a| a == "--compact") {
        args.remove(pos);
        true
    } else {
        false
    };
    let out_path = if let Some(pos) = args.iter().position(|a| a == "-o") {
        args.remove(pos);
        if pos < args.len() {
            Some(args.remove(pos))
        } else {
            anyhow::bail!("-o requires a file argument");
        }
    } else {
        None
    };
    if args.len() > 1 {
        anyhow::bail!("expected at most one input file, got {}", args.len());
    }

    let doc = match args.first() {
        Some(path) => {
            let src = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            load(&src, path, options)?
        }
        None => {
            let mut src = String::new();
            io::stdin().read_to_string(&mut src)?;
            parse_with_options(&src, "<stdin>", options)?
        }
    };

    let mut rendered = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    rendered.push('\n');

    match out_path {
        Some(path) => {
            std::fs::write(&path, rendered).with_context(|| format!("writing {}", path))?
        }
        None => io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(())
}
