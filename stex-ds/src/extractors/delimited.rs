//! Delimited-text statement parsing
//!
//! Bank exports are CSV-like files with a preamble (account holder, period,
//! branding), one header row, and data rows, often followed by summary
//! trailer lines. `ProfileExtractor` locates the header row declared by its
//! profile and converts everything below it.

use std::path::Path;

use serde_json::Value;

use stex_common::StatementTable;

use super::profiles::StatementProfile;
use super::{BankExtractor, ExtractError};

/// Extractor driven by a per-bank `StatementProfile`
pub struct ProfileExtractor {
    profile: &'static StatementProfile,
}

impl ProfileExtractor {
    pub fn new(profile: &'static StatementProfile) -> Self {
        Self { profile }
    }

    fn parse_text(&self, text: &str) -> Result<StatementTable, ExtractError> {
        let p = self.profile;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let records = parse_rows(text, p.delimiter);

        let header_at = records
            .iter()
            .position(|row| is_header(row, p.header))
            .ok_or_else(|| {
                ExtractError::Parse(format!(
                    "header row {:?} not found; not a {} export?",
                    p.header, p.label
                ))
            })?;

        let mut table =
            StatementTable::new(p.columns.iter().map(|c| c.to_string()).collect());
        for record in &records[header_at + 1..] {
            // Summary and trailer lines have a different shape; skip them.
            if record.len() != p.header.len() {
                continue;
            }
            let row = record
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let cell = cell.trim();
                    if p.amount_columns.contains(&i) {
                        parse_amount(cell, p.decimal_comma)
                    } else {
                        Value::String(cell.to_string())
                    }
                })
                .collect();
            table.push_row(row);
        }

        Ok(table)
    }
}

impl BankExtractor for ProfileExtractor {
    fn key(&self) -> &'static str {
        self.profile.key
    }

    fn label(&self) -> &'static str {
        self.profile.label
    }

    fn extract(&self, path: &Path) -> Result<StatementTable, ExtractError> {
        let bytes = std::fs::read(path)?;
        // Bank exports are frequently Latin-1; lossy conversion keeps the
        // tabular structure intact either way.
        let text = String::from_utf8_lossy(&bytes);
        self.parse_text(&text)
    }
}

/// Minimal delimited-line parser (quotes + CRLF tolerant)
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                // Drop blank lines
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if the file lacks a final newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

fn is_header(row: &[String], expected: &[&str]) -> bool {
    row.len() == expected.len()
        && row
            .iter()
            .zip(expected)
            .all(|(cell, want)| cell.trim().eq_ignore_ascii_case(want))
}

/// Parse a statement amount cell into a JSON number.
///
/// Handles the forms banks actually emit: "$ 1.234,56", "-1.234,56",
/// "(1.234,56)" for debits, and plain "1234.56" for dot-decimal exports.
/// Empty cells become null; cells that do not parse pass through as
/// strings.
fn parse_amount(cell: &str, decimal_comma: bool) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    let mut negative = false;
    let body = match trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        Some(inner) => {
            negative = true;
            inner
        }
        None => trimmed,
    };

    let mut cleaned = String::with_capacity(body.len());
    for ch in body.chars() {
        match ch {
            '-' => negative = true,
            '0'..='9' => cleaned.push(ch),
            '.' if !decimal_comma => cleaned.push('.'),
            ',' if decimal_comma => cleaned.push('.'),
            // Thousands separators, currency symbols, spacing
            '.' | ',' | '$' | '+' | ' ' | '\u{a0}' => {}
            _ if ch.is_alphabetic() => return Value::String(trimmed.to_string()),
            _ => {}
        }
    }

    match cleaned.parse::<f64>() {
        Ok(value) => {
            let signed = if negative { -value } else { value };
            serde_json::Number::from_f64(signed)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(trimmed.to_string()))
        }
        Err(_) => Value::String(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::profiles;
    use serde_json::json;

    fn galicia() -> ProfileExtractor {
        let profile = profiles::PROFILES
            .iter()
            .find(|p| p.key == "banco_galicia")
            .unwrap();
        ProfileExtractor::new(profile)
    }

    #[test]
    fn parse_rows_handles_quotes_and_crlf() {
        let rows = parse_rows("a;\"b;1\";c\r\nd;\"say \"\"hi\"\"\";f\r\n", ';');
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b;1".to_string(), "c".to_string()],
                vec!["d".to_string(), "say \"hi\"".to_string(), "f".to_string()],
            ]
        );
    }

    #[test]
    fn parse_rows_drops_blank_lines_and_flushes_trailing_row() {
        let rows = parse_rows("a;b\r\n\r\nc;d", ';');
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ]
        );
    }

    #[test]
    fn header_is_located_after_preamble() {
        let text = "Banco Galicia - Resumen de movimientos\r\n\
                    Cuenta;1234-5 678901/2;;;;\r\n\
                    \r\n\
                    Fecha;Descripción;Origen;Débito;Crédito;Saldo\r\n\
                    01/03/2024;Transferencia recibida;CBU 2850590940;;$ 150.000,00;$ 275.310,50\r\n\
                    04/03/2024;Pago de servicios;Débito automático;$ 12.345,67;;$ 262.964,83\r\n";

        let table = galicia().parse_text(text).unwrap();
        assert_eq!(
            table.columns,
            vec!["fecha", "descripcion", "origen", "debito", "credito", "saldo"]
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][0], json!("01/03/2024"));
        assert_eq!(table.rows[0][3], Value::Null);
        assert_eq!(table.rows[0][4], json!(150000.0));
        assert_eq!(table.rows[1][3], json!(12345.67));
    }

    #[test]
    fn trailer_lines_with_different_arity_are_skipped() {
        let text = "Fecha;Descripción;Origen;Débito;Crédito;Saldo\r\n\
                    01/03/2024;Compra;Tarjeta;$ 100,00;;$ 900,00\r\n\
                    Saldo final;$ 900,00\r\n";

        let table = galicia().parse_text(text).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn missing_header_is_a_parse_error() {
        let err = galicia().parse_text("no;header;here\r\n").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn amounts_parse_in_comma_decimal_convention() {
        assert_eq!(parse_amount("$ 1.234,56", true), json!(1234.56));
        assert_eq!(parse_amount("-1.234,56", true), json!(-1234.56));
        assert_eq!(parse_amount("(1.234,56)", true), json!(-1234.56));
        assert_eq!(parse_amount("", true), Value::Null);
    }

    #[test]
    fn amounts_parse_in_dot_decimal_convention() {
        assert_eq!(parse_amount("1,234.56", false), json!(1234.56));
        assert_eq!(parse_amount("-987.10", false), json!(-987.1));
    }

    #[test]
    fn non_numeric_amount_cells_pass_through_as_strings() {
        assert_eq!(
            parse_amount("SALDO ANTERIOR", true),
            json!("SALDO ANTERIOR")
        );
    }
}
