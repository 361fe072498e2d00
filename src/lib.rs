//! # pdl2json — Protocol Definition Language translator
//!
//! A translator for the PDL format: a compact, indentation- and
//! keyword-driven description of an RPC-style protocol (domains, types,
//! commands, events, enums, parameters). The output is a JSON protocol
//! document, with object keys in source order, ready for code generators and
//! other tooling.
//!
//! ## PDL structure
//!
//! - **Domains**: named protocol modules, optionally `experimental` or
//!   `deprecated`, with `depends on` declarations
//! - **Types**: `type Id extends <kind>`, where the kind is a primitive
//!   (`integer`, `number`, `boolean`, `string`, `object`, `any`, `array`,
//!   `binary`), `enum` (emitted as `string` plus a literal list), `array of
//!   <kind>`, or a reference to another named type
//! - **Commands / events**: with `parameters`, `returns`, and `properties`
//!   subitem lists, `optional` markers, and `redirect` targets
//! - **Descriptions**: `#` comment lines attach to the declaration that
//!   immediately follows them
//!
//! ## Example PDL
//!
//! ```text
//! version
//!   major 1
//!   minor 3
//!
//! # Runtime evaluation support.
//! domain Runtime
//!   depends on IO
//!
//!   type Severity extends string
//!     enum
//!       info
//!       error
//!
//!   command evaluate
//!     parameters
//!       string expression
//!       optional boolean silent
//!     returns
//!       string result
//! ```
//!
//! ## Usage
//!
//! ```
//! let doc = pdl2json::parse("domain Demo\n", "demo.pdl").expect("parse");
//! assert_eq!(doc["domains"][0]["domain"], "Demo");
//! ```
//!
//! Translation is fail-fast: the first line that matches no grammar production
//! aborts with a [`SyntaxError`] carrying the source id, 0-based line index,
//! and the offending line. See the `pdl2json` binary for file conversion and
//! `lint_pdl` for style checks.

pub mod doc;
pub mod lint;
pub mod parser;

pub use doc::PRIMITIVE_TYPES;
pub use parser::{load, parse, parse_with_options, Error, ParseOptions, SyntaxError};
