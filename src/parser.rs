//! Parse PDL source into a protocol document, one line at a time.
//!
//! The grammar is line-oriented: indentation width selects the nesting level
//! and an ordered cascade of line patterns decides what each line contributes.
//! The first matching pattern wins; it mutates the carried cursor state
//! (current domain, current item, current subitem list, open enum list) and
//! appends to the output tree. A line matching no pattern aborts the whole
//! translation with [`SyntaxError`] — there is no recovery and no partial
//! document.
//!
//! Every call owns its parser state for the duration of the call, so
//! independent translations may run concurrently.

use crate::doc::{assign_type, create_item, push_to_list, Item};
use serde_json::Value;
use thiserror::Error;

/// Fatal parse failure: the first line that matches no grammar production.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error in {source_id}:{line}, illegal token: {text}")]
pub struct SyntaxError {
    /// Identifier of the source, typically a file path.
    pub source_id: String,
    /// 0-based index of the offending line.
    pub line: usize,
    /// The offending line, verbatim.
    pub text: String,
}

/// Any failure loading a protocol description through [`load`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("invalid JSON protocol: {0}")]
    Json(#[from] serde_json::Error),
}

/// Translation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Emit `string` in place of `binary` for binary-typed declarations.
    pub map_binary_to_string: bool,
}

/// Parse PDL source into a protocol document with default options.
///
/// `source_id` only labels diagnostics; it is not opened or inspected.
pub fn parse(source: &str, source_id: &str) -> Result<Value, SyntaxError> {
    parse_with_options(source, source_id, ParseOptions::default())
}

/// Parse PDL source into a protocol document.
///
/// The document is a JSON object with `version` first and `domains` second;
/// within each entry, keys appear in the order the grammar produced them and
/// optional keys are present only when the source declared them.
pub fn parse_with_options(
    source: &str,
    source_id: &str,
    options: ParseOptions,
) -> Result<Value, SyntaxError> {
    let mut parser = Parser::new(options);
    for (index, line) in source.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !parser.line(line) {
            return Err(SyntaxError {
                source_id: source_id.to_string(),
                line: index,
                text: line.to_string(),
            });
        }
    }
    Ok(Value::Object(parser.finish()))
}

/// Load a protocol description by file name: names ending in `.pdl` go
/// through the PDL grammar, anything else is decoded as a JSON protocol
/// document and returned unchanged.
pub fn load(data: &str, file_name: &str, options: ParseOptions) -> Result<Value, Error> {
    if file_name.ends_with(".pdl") {
        Ok(parse_with_options(data, file_name, options)?)
    } else {
        Ok(serde_json::from_str(data)?)
    }
}

/// Which list of the current domain holds the most recently opened item.
#[derive(Debug, Clone, Copy)]
enum ItemList {
    Types,
    Commands,
    Events,
}

impl ItemList {
    fn key(self) -> &'static str {
        match self {
            ItemList::Types => "types",
            ItemList::Commands => "commands",
            ItemList::Events => "events",
        }
    }
}

/// Where the currently open enum-literal list lives.
#[derive(Debug, Clone, Copy)]
enum EnumTarget {
    /// On the current item, opened by an `enum` header line.
    Item,
    /// On the last appended subitem, opened by an enum-kind declaration.
    Subitem,
}

struct Parser {
    options: ParseOptions,
    protocol: Item,
    /// Comment text waiting to attach to the next declaration.
    description: String,
    /// Set once a non-comment line passes; the buffer is cleared at the start
    /// of the line after that, so the declaration directly following a
    /// comment block still sees it.
    nuke_description: bool,
    item_list: Option<ItemList>,
    subitems_key: Option<&'static str>,
    enum_target: Option<EnumTarget>,
}

impl Parser {
    fn new(options: ParseOptions) -> Self {
        let mut protocol = Item::new();
        protocol.insert("version".to_string(), Value::Object(Item::new()));
        protocol.insert("domains".to_string(), Value::Array(Vec::new()));
        Parser {
            options,
            protocol,
            description: String::new(),
            nuke_description: false,
            item_list: None,
            subitems_key: None,
            enum_target: None,
        }
    }

    fn finish(self) -> Item {
        self.protocol
    }

    /// Classify one line and apply it. Returns false when no production
    /// matches, including when a production's required context (current
    /// domain, current item, open subitem or enum list) is not active.
    fn line(&mut self, line: &str) -> bool {
        if self.nuke_description {
            self.description.clear();
            self.nuke_description = false;
        }
        let trimmed = line.trim();

        if let Some(text) = comment_text(trimmed) {
            if !self.description.is_empty() {
                self.description.push('\n');
            }
            self.description.push_str(text);
            return true;
        }
        self.nuke_description = true;

        if trimmed.is_empty() {
            return true;
        }

        if let Some(d) = domain_line(line) {
            let domain = create_item(
                Some(("domain", d.name)),
                None,
                &self.description,
                d.experimental,
                d.deprecated,
            );
            if let Some(domains) = self.protocol.get_mut("domains").and_then(Value::as_array_mut) {
                domains.push(Value::Object(domain));
            }
            self.item_list = None;
            self.subitems_key = None;
            self.enum_target = None;
            return true;
        }

        if let Some(name) = depends_on_line(line) {
            let Some(domain) = self.current_domain() else {
                return false;
            };
            push_to_list(domain, "dependencies", Value::String(name.to_string()));
            return true;
        }

        if let Some(t) = type_line(line) {
            let mut item = create_item(
                Some(("id", t.id)),
                None,
                &self.description,
                t.experimental,
                t.deprecated,
            );
            assign_type(&mut item, t.kind, t.array_of, self.options.map_binary_to_string);
            let Some(domain) = self.current_domain() else {
                return false;
            };
            push_to_list(domain, "types", Value::Object(item));
            self.item_list = Some(ItemList::Types);
            self.subitems_key = None;
            self.enum_target = None;
            return true;
        }

        if let Some(it) = item_line(line) {
            let item = create_item(
                None,
                Some(it.name),
                &self.description,
                it.experimental,
                it.deprecated,
            );
            let list = if it.command {
                ItemList::Commands
            } else {
                ItemList::Events
            };
            let Some(domain) = self.current_domain() else {
                return false;
            };
            push_to_list(domain, list.key(), Value::Object(item));
            self.item_list = Some(list);
            self.subitems_key = None;
            self.enum_target = None;
            return true;
        }

        if let Some(p) = subitem_line(line) {
            let mut param = create_item(
                None,
                Some(p.name),
                &self.description,
                p.experimental,
                p.deprecated,
            );
            if p.optional {
                param.insert("optional".to_string(), Value::Bool(true));
            }
            assign_type(&mut param, p.kind, p.array_of, self.options.map_binary_to_string);
            // The raw kind decides this, so `array of enum` opens a list too.
            let opens_enum = p.kind == "enum";
            if opens_enum {
                param.insert("enum".to_string(), Value::Array(Vec::new()));
            }
            let Some(subitems) = self.current_subitems() else {
                return false;
            };
            subitems.push(Value::Object(param));
            self.enum_target = opens_enum.then_some(EnumTarget::Subitem);
            return true;
        }

        if let Some(key) = subitems_header(line) {
            let Some(item) = self.current_item() else {
                return false;
            };
            item.insert(key.to_string(), Value::Array(Vec::new()));
            self.subitems_key = Some(key);
            self.enum_target = None;
            return true;
        }

        if enum_header(line) {
            let Some(item) = self.current_item() else {
                return false;
            };
            item.insert("enum".to_string(), Value::Array(Vec::new()));
            self.enum_target = Some(EnumTarget::Item);
            return true;
        }

        if version_header(line) {
            return true;
        }

        if let Some(digits) = version_field(line, "major") {
            self.set_version("major", digits);
            return true;
        }

        if let Some(digits) = version_field(line, "minor") {
            self.set_version("minor", digits);
            return true;
        }

        if let Some(target) = redirect_line(line) {
            let Some(item) = self.current_item() else {
                return false;
            };
            item.insert("redirect".to_string(), Value::String(target.to_string()));
            return true;
        }

        if let Some(literal) = enum_literal(line) {
            let Some(literals) = self.open_enum() else {
                return false;
            };
            literals.push(Value::String(literal.to_string()));
            return true;
        }

        false
    }

    fn set_version(&mut self, key: &str, digits: &str) {
        if let Some(version) = self.protocol.get_mut("version").and_then(Value::as_object_mut) {
            version.insert(key.to_string(), Value::String(digits.to_string()));
        }
    }

    fn current_domain(&mut self) -> Option<&mut Item> {
        self.protocol
            .get_mut("domains")?
            .as_array_mut()?
            .last_mut()?
            .as_object_mut()
    }

    fn current_item(&mut self) -> Option<&mut Item> {
        let list = self.item_list?;
        self.current_domain()?
            .get_mut(list.key())?
            .as_array_mut()?
            .last_mut()?
            .as_object_mut()
    }

    fn current_subitems(&mut self) -> Option<&mut Vec<Value>> {
        let key = self.subitems_key?;
        self.current_item()?.get_mut(key)?.as_array_mut()
    }

    fn open_enum(&mut self) -> Option<&mut Vec<Value>> {
        match self.enum_target? {
            EnumTarget::Item => self.current_item()?.get_mut("enum")?.as_array_mut(),
            EnumTarget::Subitem => self
                .current_subitems()?
                .last_mut()?
                .as_object_mut()?
                .get_mut("enum")?
                .as_array_mut(),
        }
    }
}

// ==================== Line patterns ====================
//
// Matchers take the raw (untrimmed) line: leading spaces are part of the
// pattern, since indentation width is what separates a type declaration from
// a parameter from an enum literal.

struct DomainLine<'a> {
    experimental: bool,
    deprecated: bool,
    name: &'a str,
}

struct TypeLine<'a> {
    experimental: bool,
    deprecated: bool,
    id: &'a str,
    array_of: bool,
    kind: &'a str,
}

struct ItemLine<'a> {
    experimental: bool,
    deprecated: bool,
    command: bool,
    name: &'a str,
}

struct SubitemLine<'a> {
    experimental: bool,
    deprecated: bool,
    optional: bool,
    array_of: bool,
    kind: &'a str,
    name: &'a str,
}

/// `# text` → comment content: the marker and the single character after it
/// (the conventional space) are dropped.
fn comment_text(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix('#')?;
    let mut chars = rest.chars();
    chars.next();
    Some(chars.as_str())
}

/// Optional `word ` prefix (the keyword plus exactly one space).
fn flag<'a>(s: &'a str, word: &str) -> (bool, &'a str) {
    match s.strip_prefix(word).and_then(|rest| rest.strip_prefix(' ')) {
        Some(rest) => (true, rest),
        None => (false, s),
    }
}

/// Longest leading run of non-whitespace characters.
fn token(s: &str) -> Option<(&str, &str)> {
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    if end == 0 {
        None
    } else {
        Some((&s[..end], &s[end..]))
    }
}

/// `word` followed by end of line or a space.
fn keyword(s: &str, word: &str) -> bool {
    match s.strip_prefix(word) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}

/// Longest leading run of ASCII digits.
fn digits(s: &str) -> Option<&str> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        None
    } else {
        Some(&s[..end])
    }
}

fn domain_line(line: &str) -> Option<DomainLine<'_>> {
    let (experimental, rest) = flag(line, "experimental");
    let (deprecated, rest) = flag(rest, "deprecated");
    let name = rest.strip_prefix("domain ")?;
    Some(DomainLine {
        experimental,
        deprecated,
        name,
    })
}

fn depends_on_line(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("  depends on ")?;
    token(rest).map(|(name, _)| name)
}

fn type_line(line: &str) -> Option<TypeLine<'_>> {
    let rest = line.strip_prefix("  ")?;
    let (experimental, rest) = flag(rest, "experimental");
    let (deprecated, rest) = flag(rest, "deprecated");
    let rest = rest.strip_prefix("type ")?;
    let (id, rest) = rest.rsplit_once(" extends ")?;
    let (array_of, rest) = flag(rest, "array of");
    let (kind, _) = token(rest)?;
    Some(TypeLine {
        experimental,
        deprecated,
        id,
        array_of,
        kind,
    })
}

fn item_line(line: &str) -> Option<ItemLine<'_>> {
    let rest = line.strip_prefix("  ")?;
    let (experimental, rest) = flag(rest, "experimental");
    let (deprecated, rest) = flag(rest, "deprecated");
    let (command, name) = if let Some(name) = rest.strip_prefix("command ") {
        (true, name)
    } else if let Some(name) = rest.strip_prefix("event ") {
        (false, name)
    } else {
        return None;
    };
    Some(ItemLine {
        experimental,
        deprecated,
        command,
        name,
    })
}

fn subitem_line(line: &str) -> Option<SubitemLine<'_>> {
    let rest = line.strip_prefix("      ")?;
    let (experimental, rest) = flag(rest, "experimental");
    let (deprecated, rest) = flag(rest, "deprecated");
    let (optional, rest) = flag(rest, "optional");
    let (array_of, rest) = flag(rest, "array of");
    let (kind, rest) = token(rest)?;
    let rest = rest.strip_prefix(' ')?;
    let (name, _) = token(rest)?;
    Some(SubitemLine {
        experimental,
        deprecated,
        optional,
        array_of,
        kind,
        name,
    })
}

fn subitems_header(line: &str) -> Option<&'static str> {
    let rest = line.strip_prefix("    ")?;
    ["parameters", "returns", "properties"]
        .into_iter()
        .find(|&key| keyword(rest, key))
}

fn enum_header(line: &str) -> bool {
    line.strip_prefix("    ")
        .is_some_and(|rest| keyword(rest, "enum"))
}

fn version_header(line: &str) -> bool {
    keyword(line, "version")
}

fn version_field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line
        .strip_prefix("  ")?
        .strip_prefix(key)?
        .strip_prefix(' ')?;
    digits(rest)
}

fn redirect_line(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("    redirect ")?;
    token(rest).map(|(name, _)| name)
}

/// A single bare token at six or eight spaces of indentation, nothing after
/// it — an enum literal.
fn enum_literal(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("      ")?;
    let rest = rest.strip_prefix("  ").unwrap_or(rest);
    let (value, tail) = token(rest)?;
    tail.is_empty().then_some(value)
}
