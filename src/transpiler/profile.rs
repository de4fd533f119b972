//! File-based dialect profiles.
//!
//! A profile names a built-in dialect as its base and overrides individual
//! spatial lowerings, either with an SQL template or by declining so the
//! portable emulation is used instead.
//!
//! ```toml
//! name = "spatialite-text"
//! base = "sqlite"
//! index_base = 1
//!
//! [lowerings]
//! "point2d.distance_to" = "ST_Distance({0}, {1})"
//! "line2d.construct" = "MakeLine({*})"
//! "polygon2d.overlaps" = "decline"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dialect::Dialect;
use super::traits::SpatialGenerator;
use crate::ast::{GeoKind, GeoOp};
use crate::error::{GeoError, GeoResult};

const DECLINE: &str = "decline";

/// Serialized form of a dialect profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialectProfile {
    pub name: String,
    /// Built-in dialect providing everything not overridden.
    pub base: Dialect,
    /// Replaces the base dialect's member index base.
    #[serde(default)]
    pub index_base: Option<i64>,
    /// `<kind>.<operation>` to a template or `decline`.
    #[serde(default)]
    pub lowerings: HashMap<String, String>,
}

impl DialectProfile {
    pub fn from_toml(content: &str) -> GeoResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> GeoResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a profile file; `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> GeoResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let profile = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_toml(&content)?
        };
        debug!(path = %path.display(), name = %profile.name, "loaded dialect profile");
        Ok(profile)
    }

    /// Validate the overrides and build the generator.
    pub fn into_generator(self) -> GeoResult<ProfileGenerator> {
        let mut overrides = HashMap::with_capacity(self.lowerings.len());
        for (key, value) in &self.lowerings {
            let (kind, op) = parse_key(key)?;
            let lowering = if value.trim() == DECLINE {
                Override::Decline
            } else {
                Override::Template(parse_template(key, value, op.arity())?)
            };
            overrides.insert((kind, op), lowering);
        }
        debug!(
            name = %self.name,
            base = %self.base,
            overrides = overrides.len(),
            "built dialect profile"
        );
        Ok(ProfileGenerator {
            name: self.name,
            base: self.base.generator(),
            index_base: self.index_base,
            overrides,
        })
    }
}

fn parse_key(key: &str) -> GeoResult<(GeoKind, GeoOp)> {
    let unknown = || GeoError::UnknownOperation(key.to_string());
    let (kind, op) = key.split_once('.').ok_or_else(unknown)?;
    let kind = GeoKind::from_name(kind.trim()).ok_or_else(unknown)?;
    let op = GeoOp::from_name(op.trim()).ok_or_else(unknown)?;
    Ok((kind, op))
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Text(String),
    Arg(usize),
    /// Every operand, comma separated.
    All,
}

#[derive(Debug, Clone, PartialEq)]
enum Override {
    Template(Vec<Piece>),
    Decline,
}

fn parse_template(key: &str, template: &str, arity: Option<usize>) -> GeoResult<Vec<Piece>> {
    let invalid = |reason: String| GeoError::Config(format!("'{}': {}", key, reason));
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| invalid("unclosed placeholder".to_string()))?;
        let placeholder = after[..close].trim();
        let piece = if placeholder == "*" {
            Piece::All
        } else {
            let index: usize = placeholder
                .parse()
                .map_err(|_| invalid(format!("bad placeholder '{{{}}}'", placeholder)))?;
            if let Some(arity) = arity {
                if index >= arity {
                    return Err(invalid(format!(
                        "placeholder {{{}}} but the operation takes {} operand(s)",
                        index, arity
                    )));
                }
            }
            Piece::Arg(index)
        };
        if !text.is_empty() {
            pieces.push(Piece::Text(std::mem::take(&mut text)));
        }
        pieces.push(piece);
        rest = &after[close + 1..];
    }
    text.push_str(rest);
    if !text.is_empty() {
        pieces.push(Piece::Text(text));
    }
    Ok(pieces)
}

/// Render a template, or `None` when it references a missing operand.
fn render(pieces: &[Piece], args: &[String]) -> Option<String> {
    let mut sql = String::new();
    for piece in pieces {
        match piece {
            Piece::Text(text) => sql.push_str(text),
            Piece::Arg(index) => sql.push_str(args.get(*index)?),
            Piece::All => sql.push_str(&args.join(", ")),
        }
    }
    Some(sql)
}

/// A built-in dialect with profile overrides applied.
pub struct ProfileGenerator {
    name: String,
    base: Box<dyn SpatialGenerator>,
    index_base: Option<i64>,
    overrides: HashMap<(GeoKind, GeoOp), Override>,
}

impl SpatialGenerator for ProfileGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn quote_identifier(&self, name: &str) -> String {
        self.base.quote_identifier(name)
    }

    fn string_literal(&self, value: &str) -> String {
        self.base.string_literal(value)
    }

    fn number_literal(&self, value: f64) -> String {
        self.base.number_literal(value)
    }

    fn bool_literal(&self, value: bool) -> String {
        self.base.bool_literal(value)
    }

    fn string_concat(&self, parts: &[&str]) -> String {
        self.base.string_concat(parts)
    }

    fn position(&self, needle: &str, haystack: &str) -> String {
        self.base.position(needle, haystack)
    }

    fn substring(&self, text: &str, start: &str, length: Option<&str>) -> String {
        self.base.substring(text, start, length)
    }

    fn substring_before(&self, text: &str, delimiter: &str) -> String {
        self.base.substring_before(text, delimiter)
    }

    fn substring_after(&self, text: &str, delimiter: &str) -> String {
        self.base.substring_after(text, delimiter)
    }

    fn wkt_ordinate(&self, text: &str, n: u32) -> String {
        self.base.wkt_ordinate(text, n)
    }

    fn length(&self, text: &str) -> String {
        self.base.length(text)
    }

    fn trim(&self, text: &str) -> String {
        self.base.trim(text)
    }

    fn replace(&self, text: &str, from: &str, to: &str) -> String {
        self.base.replace(text, from, to)
    }

    fn text_to_number(&self, text: &str) -> String {
        self.base.text_to_number(text)
    }

    fn number_to_text(&self, number: &str) -> String {
        self.base.number_to_text(number)
    }

    fn sqrt(&self, number: &str) -> String {
        self.base.sqrt(number)
    }

    fn least(&self, a: &str, b: &str) -> String {
        self.base.least(a, b)
    }

    fn greatest(&self, a: &str, b: &str) -> String {
        self.base.greatest(a, b)
    }

    fn geometry_literal(&self, kind: GeoKind, wkt: &str) -> String {
        self.base.geometry_literal(kind, wkt)
    }

    fn geometry_from_text(&self, kind: GeoKind, text: &str) -> String {
        self.base.geometry_from_text(kind, text)
    }

    fn index_base(&self) -> i64 {
        self.index_base.unwrap_or_else(|| self.base.index_base())
    }

    fn lower(&self, kind: GeoKind, op: GeoOp, args: &[String]) -> Option<String> {
        match self.overrides.get(&(kind, op)) {
            Some(Override::Decline) => None,
            Some(Override::Template(pieces)) => render(pieces, args),
            None => self.base.lower(kind, op, args),
        }
    }
}
