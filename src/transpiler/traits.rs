use crate::ast::values::format_number;
use crate::ast::{GeoKind, GeoOp};

/// Escape an identifier with double quotes, doubling embedded quotes.
pub fn escape_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// A target dialect: the scalar rendering primitives the compiler needs,
/// and the native spatial lowerings it offers.
///
/// Every rendering method has an ANSI-flavoured default; dialects override
/// what differs. [`SpatialGenerator::lower`] returns `None` to decline an
/// operator, which makes the compiler emulate it portably.
pub trait SpatialGenerator: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name)
    }

    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn number_literal(&self, value: f64) -> String {
        format_number(value)
    }

    fn bool_literal(&self, value: bool) -> String {
        let literal = if value { "TRUE" } else { "FALSE" };
        literal.to_string()
    }

    /// Concatenation of already-rendered parts.
    fn string_concat(&self, parts: &[&str]) -> String {
        format!("({})", parts.join(" || "))
    }

    /// 1-based position of `needle` in `haystack`, 0 when absent.
    fn position(&self, needle: &str, haystack: &str) -> String {
        format!("POSITION({} IN {})", needle, haystack)
    }

    /// Substring from a 1-based start, to the end when `length` is `None`.
    fn substring(&self, text: &str, start: &str, length: Option<&str>) -> String {
        match length {
            Some(len) => format!("SUBSTRING({} FROM {} FOR {})", text, start, len),
            None => format!("SUBSTRING({} FROM {})", text, start),
        }
    }

    /// Text before the first `delimiter`; empty when it does not occur.
    fn substring_before(&self, text: &str, delimiter: &str) -> String {
        let at = self.position(delimiter, text);
        format!(
            "CASE WHEN {at} > 0 THEN {} ELSE '' END",
            self.substring(text, "1", Some(&format!("{at} - 1"))),
        )
    }

    /// Text after the first `delimiter`; the whole text when it does not occur.
    fn substring_after(&self, text: &str, delimiter: &str) -> String {
        let at = self.position(delimiter, text);
        let start = format!("{at} + {}", self.length(delimiter));
        format!(
            "CASE WHEN {at} > 0 THEN {} ELSE {text} END",
            self.substring(text, &start, None),
        )
    }

    /// The `n`-th number between the parentheses of a WKT text, numbers
    /// separated by spaces or commas. The default walks the text with the
    /// substring primitives.
    fn wkt_ordinate(&self, text: &str, n: u32) -> String {
        let space = self.string_literal(" ");
        let open = self.string_literal("(");
        let mut body = self.substring_after(text, &open);
        for separator in ["(", ")", ","] {
            body = self.replace(&body, &self.string_literal(separator), &space);
        }
        body = self.trim(&body);
        for _ in 0..n {
            body = self.trim(&self.substring_after(&body, &space));
        }
        let padded = self.string_concat(&[&body, &space]);
        self.text_to_number(&self.substring_before(&padded, &space))
    }

    fn length(&self, text: &str) -> String {
        format!("LENGTH({})", text)
    }

    fn trim(&self, text: &str) -> String {
        format!("TRIM({})", text)
    }

    fn replace(&self, text: &str, from: &str, to: &str) -> String {
        format!("REPLACE({}, {}, {})", text, from, to)
    }

    fn text_to_number(&self, text: &str) -> String {
        format!("CAST({} AS DOUBLE PRECISION)", text)
    }

    fn number_to_text(&self, number: &str) -> String {
        format!("CAST({} AS TEXT)", number)
    }

    fn sqrt(&self, number: &str) -> String {
        format!("SQRT({})", number)
    }

    fn least(&self, a: &str, b: &str) -> String {
        format!("LEAST({}, {})", a, b)
    }

    fn greatest(&self, a: &str, b: &str) -> String {
        format!("GREATEST({}, {})", a, b)
    }

    /// A geometry literal given as WKT.
    fn geometry_literal(&self, kind: GeoKind, wkt: &str) -> String {
        let _ = kind;
        self.string_literal(wkt)
    }

    /// Turn rendered WKT text into a geometry value.
    fn geometry_from_text(&self, kind: GeoKind, text: &str) -> String {
        let _ = kind;
        text.to_string()
    }

    /// Base of the dialect's member indexes; expression trees are 0-based.
    fn index_base(&self) -> i64 {
        0
    }

    /// Native SQL for `op` on geometries of `kind`, given rendered
    /// operands, or `None` to decline.
    fn lower(&self, kind: GeoKind, op: GeoOp, args: &[String]) -> Option<String> {
        let _ = (kind, op, args);
        None
    }
}
