//! Parser fuzz target: feed arbitrary bytes to the PDL translator.
//! The parser must not panic; it returns Ok(document) or Err(SyntaxError).
//! The first input byte selects the binary-to-string option so both kind
//! resolution paths get coverage.
//! Build with: cargo fuzz run parser_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let s = match std::str::from_utf8(rest) {
        Ok(x) => x,
        Err(_) => return,
    };
    let options = pdl2json::ParseOptions {
        map_binary_to_string: selector & 1 != 0,
    };
    let _ = pdl2json::parse_with_options(s, "fuzz.pdl", options);
    let _ = pdl2json::load(s, "fuzz.json", options);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run parser_fuzz");
}
