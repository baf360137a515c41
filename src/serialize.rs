//! Canonical text form and schema-driven emission.
//!
//! `to_ruby` renders a specification as program text that re-interprets to
//! an equal record:
//!
//! ```text
//! Specification.new do |s|
//!   s.name = %q{rfoo}
//!   s.version = "1.0"
//!   ...
//!   s.add_dependency(%q<rbar>, ["> 0.4.0"])
//! end
//! ```
//!
//! Fields appear in schema declaration order and are omitted while they
//! still hold their default. `parse_ruby` is the matching reader; it
//! assigns through the coercing setters, so round-tripping any validated
//! record yields an equal one.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::schema::{self, FieldId, FieldValue, SCHEMA};
use crate::specification::Specification;
use crate::validation::{Result, SpecificationError};
use crate::PRODUCER_VERSION;

const HEADER: &str = "Specification.new do |s|";
const FOOTER: &str = "end";

impl Specification {
    /// Canonical regenerable form. Stamps the producer version first.
    pub fn to_ruby(&mut self) -> String {
        self.set_rubygems_version(PRODUCER_VERSION);

        let mut out = String::from(HEADER);
        out.push('\n');

        for field in SCHEMA {
            if field.id == FieldId::Dependencies {
                continue;
            }
            let value = match field.id {
                // The serializer emits the stored value, not the
                // sole-executable fallback the getter derives.
                FieldId::DefaultExecutable => self
                    .explicit_default_executable()
                    .map(|s| FieldValue::Str(s.to_string()))
                    .unwrap_or(FieldValue::Nil),
                id => self.field_value(id),
            };
            if value == field.default.materialize() {
                continue;
            }
            if let Some(rendered) = render_value(&value) {
                out.push_str(&format!("  s.{} = {}\n", field.name, rendered));
            }
        }

        for dep in self.dependencies() {
            out.push_str(&format!(
                "  s.add_dependency(%q<{}>, {})\n",
                dep.name(),
                render_string_list(&dep.requirements_list()),
            ));
        }

        out.push_str(FOOTER);
        out.push('\n');
        out
    }

    /// Schema-ordered field names for external structured emitters, with
    /// the producer version stamped first.
    pub fn serializable_field_names(&mut self) -> Vec<&'static str> {
        self.set_rubygems_version(PRODUCER_VERSION);
        SCHEMA.iter().map(|f| f.name).collect()
    }
}

/// Type-directed rendering of one field value as a Ruby literal. `Nil`
/// and dependency lists render nothing.
fn render_value(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Nil | FieldValue::Dependencies(_) => None,
        FieldValue::Str(s) => Some(format!("%q{{{s}}}")),
        FieldValue::Int(i) => Some(i.to_string()),
        FieldValue::Bool(b) => Some(b.to_string()),
        FieldValue::List(items) => Some(render_string_list(items)),
        FieldValue::Version(v) => Some(quote(v.as_str())),
        FieldValue::Requirement(r) => Some(quote(r.as_str())),
        FieldValue::Date(d) => Some(format!("%q{{{}}}", d.format("%Y-%m-%d"))),
        FieldValue::Platform(p) => Some(format!("%q{{{p}}}")),
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn render_string_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
    format!("[{}]", quoted.join(", "))
}

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\w+::)?Specification\.new do \|s\|$").expect("header pattern is well-formed")
});
static ASSIGN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^s\.([a-z_]+)\s*=\s*(.+)$").expect("assignment pattern is well-formed")
});
static DEP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^s\.add_dependency\(%q<([^>]*)>,\s*(\[.*\])\)$")
        .expect("dependency pattern is well-formed")
});
static QUOTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).expect("string pattern is well-formed"));

fn parse_error(line: usize, message: impl Into<String>) -> SpecificationError {
    SpecificationError::Parse {
        line,
        message: message.into(),
    }
}

/// Reads the canonical text form back into a specification. Unknown fields
/// and malformed lines are errors; singular-alias assignments are accepted
/// and wrapped into their one-element list.
pub fn parse_ruby(text: &str) -> Result<Specification> {
    let mut spec = Specification::default();
    let mut in_body = false;
    let mut finished = false;

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if finished {
            return Err(parse_error(line_no, "content after end"));
        }
        if !in_body {
            if HEADER_RE.is_match(line) {
                in_body = true;
                continue;
            }
            return Err(parse_error(line_no, "expected specification header"));
        }
        if line == FOOTER {
            finished = true;
            continue;
        }
        if let Some(caps) = DEP_RE.captures(line) {
            let name = caps[1].to_string();
            let requirements = parse_string_list(&caps[2], line_no)?;
            let refs: Vec<&str> = requirements.iter().map(String::as_str).collect();
            spec.add_dependency_on(name, &refs)?;
            continue;
        }
        if let Some(caps) = ASSIGN_RE.captures(line) {
            let field_name = caps[1].to_string();
            let field = schema::by_name(&field_name)
                .ok_or_else(|| parse_error(line_no, format!("unknown field {field_name}")))?;
            let mut value = parse_literal(&caps[2], line_no)?;
            if field.singular == Some(field_name.as_str()) {
                match value {
                    FieldValue::Str(s) => value = FieldValue::List(vec![s]),
                    _ => return Err(parse_error(line_no, "singular alias takes a single value")),
                }
            }
            spec.assign_field(field.id, value)?;
            continue;
        }
        return Err(parse_error(line_no, "unrecognized line"));
    }

    if !in_body {
        return Err(parse_error(1, "expected specification header"));
    }
    if !finished {
        return Err(parse_error(text.lines().count(), "missing end"));
    }
    Ok(spec)
}

fn parse_literal(literal: &str, line_no: usize) -> Result<FieldValue> {
    let literal = literal.trim();
    if let Some(inner) = literal.strip_prefix("%q{").and_then(|s| s.strip_suffix('}')) {
        return Ok(FieldValue::Str(inner.to_string()));
    }
    if let Some(inner) = literal.strip_prefix("%q<").and_then(|s| s.strip_suffix('>')) {
        return Ok(FieldValue::Str(inner.to_string()));
    }
    if literal.starts_with('"') && literal.ends_with('"') && literal.len() >= 2 {
        return Ok(FieldValue::Str(unescape(&literal[1..literal.len() - 1])));
    }
    if literal.starts_with('[') && literal.ends_with(']') {
        return Ok(FieldValue::List(parse_string_list(literal, line_no)?));
    }
    if literal == "true" || literal == "false" {
        return Ok(FieldValue::Bool(literal == "true"));
    }
    if let Ok(int) = literal.parse::<i64>() {
        return Ok(FieldValue::Int(int));
    }
    Err(parse_error(line_no, format!("unparsable value {literal}")))
}

fn parse_string_list(literal: &str, line_no: usize) -> Result<Vec<String>> {
    let literal = literal.trim();
    let inner = literal
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| parse_error(line_no, "expected a list"))?;
    Ok(QUOTED_RE
        .captures_iter(inner)
        .map(|caps| unescape(&caps[1]))
        .collect())
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Structured-document emission: a JSON object holding every serializable
/// field, keyed by schema name. This is the consumer of
/// `serializable_field_names`; the canonical text form stays `to_ruby`.
pub fn to_json(spec: &mut Specification) -> Value {
    let names = spec.serializable_field_names();
    let mut map = serde_json::Map::with_capacity(names.len());
    for (field, name) in SCHEMA.iter().zip(names) {
        map.insert(name.to_string(), json_value(&spec.field_value(field.id)));
    }
    Value::Object(map)
}

fn json_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Nil => Value::Null,
        FieldValue::Str(s) => Value::String(s.clone()),
        FieldValue::Int(i) => Value::from(*i),
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::List(items) => Value::from(items.clone()),
        FieldValue::Version(v) => Value::String(v.as_str().to_string()),
        FieldValue::Requirement(r) => Value::String(r.as_str().to_string()),
        FieldValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        FieldValue::Platform(p) => Value::String(p.to_string()),
        FieldValue::Dependencies(deps) => serde_json::to_value(deps).unwrap_or(Value::Null),
    }
}
