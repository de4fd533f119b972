use crate::transpiler::traits::SpatialGenerator;

/// SQLite with geometry stored as WKT text.
///
/// No spatial functions are available, so every spatial operator is
/// declined and emulated over the text.
pub struct SqliteGenerator;

impl SpatialGenerator for SqliteGenerator {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn bool_literal(&self, value: bool) -> String {
        let literal = if value { "1" } else { "0" };
        literal.to_string()
    }

    fn position(&self, needle: &str, haystack: &str) -> String {
        format!("INSTR({}, {})", haystack, needle)
    }

    fn substring(&self, text: &str, start: &str, length: Option<&str>) -> String {
        match length {
            Some(len) => format!("SUBSTR({}, {}, {})", text, start, len),
            None => format!("SUBSTR({}, {})", text, start),
        }
    }

    fn text_to_number(&self, text: &str) -> String {
        format!("CAST({} AS REAL)", text)
    }

    // Rewrites the coordinates as a JSON array; needs JSON1 and
    // single-spaced WKT.
    fn wkt_ordinate(&self, text: &str, n: u32) -> String {
        let tag = "'ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz ('";
        let numbers = format!(
            "REPLACE(REPLACE(TRIM(REPLACE(REPLACE(LTRIM({}, {}), '(', ''), ')', '')), ', ', ','), ' ', ',')",
            text, tag
        );
        format!("CAST(json_extract('[' || {} || ']', '$[{}]') AS REAL)", numbers, n)
    }

    // CAST(2.0 AS TEXT) is '2.0'; %g drops the fraction like WKT literals do.
    fn number_to_text(&self, number: &str) -> String {
        format!("PRINTF('%.15g', {})", number)
    }

    fn least(&self, a: &str, b: &str) -> String {
        format!("MIN({}, {})", a, b)
    }

    fn greatest(&self, a: &str, b: &str) -> String {
        format!("MAX({}, {})", a, b)
    }
}
