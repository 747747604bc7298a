//! Tabular extraction result model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered tabular output of a bank extractor.
///
/// Column order and row order are exactly what the extractor produced;
/// nothing downstream re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    /// Field names in extractor-declared order
    pub columns: Vec<String>,
    /// Data rows, one cell per column
    pub rows: Vec<Vec<Value>>,
}

impl StatementTable {
    /// Create an empty table with the given column names
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a data row
    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as CSV (comma separated, quotes + CRLF safe).
    ///
    /// Used for the spreadsheet download response format. Null cells render
    /// as empty fields.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        write_row(&mut out, self.columns.iter().map(String::as_str));
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(cell_text).collect();
            write_row(&mut out, cells.iter().map(String::as_str));
        }
        out
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(',');
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn csv_quotes_fields_containing_separators() {
        let mut table = StatementTable::new(vec!["fecha".to_string(), "descripcion".to_string()]);
        table.push_row(vec![
            json!("01/03/2024"),
            json!("Pago servicio, cuota 3 \"marzo\""),
        ]);

        let csv = table.to_csv();
        assert_eq!(
            csv,
            "fecha,descripcion\r\n01/03/2024,\"Pago servicio, cuota 3 \"\"marzo\"\"\"\r\n"
        );
    }

    #[test]
    fn csv_renders_nulls_as_empty_and_numbers_plain() {
        let mut table = StatementTable::new(vec![
            "debito".to_string(),
            "credito".to_string(),
            "saldo".to_string(),
        ]);
        table.push_row(vec![Value::Null, json!(150000.0), json!(275310.5)]);

        let csv = table.to_csv();
        assert_eq!(csv, "debito,credito,saldo\r\n,150000.0,275310.5\r\n");
    }

    #[test]
    fn row_count_tracks_pushed_rows() {
        let mut table = StatementTable::new(vec!["a".to_string()]);
        assert!(table.is_empty());
        table.push_row(vec![json!("x")]);
        table.push_row(vec![json!("y")]);
        assert_eq!(table.row_count(), 2);
    }
}
