//! CSV export — full-table dump with a header row of column names.
//!
//! Rows go out in identifier order with the stored encodings verbatim
//! (0/1 flags, 's'/'n' codes, NULL as an empty cell). A store with no
//! records writes no file at all.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use thiserror::Error;

use crate::db::DatabaseError;
use crate::models::schema;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("I/O error writing export: {0}")]
    Io(#[from] io::Error),
}

impl From<rusqlite::Error> for ExportError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.into())
    }
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
}

/// Dump every row and every column to `<dir>/<base>_<timestamp>.csv`.
///
/// Returns `Ok(None)` without touching the filesystem when the table is
/// empty.
pub fn export_all(
    conn: &Connection,
    dir: &Path,
    base_filename: Option<&str>,
) -> Result<Option<ExportSummary>, ExportError> {
    let columns = schema::column_names();
    let sql = format!(
        "SELECT {} FROM {} ORDER BY id",
        columns.join(", "),
        schema::TABLE
    );
    let mut stmt = conn.prepare(&sql)?;

    let mut lines: Vec<String> = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            cells.push(cell(row.get_ref(idx)?));
        }
        lines.push(cells.join(","));
    }

    if lines.is_empty() {
        return Ok(None);
    }

    let base = base_filename.unwrap_or("export");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{base}_{timestamp}.csv"));

    let mut contents = String::with_capacity(lines.len() * 128);
    contents.push_str(&columns.join(","));
    contents.push('\n');
    for line in &lines {
        contents.push_str(line);
        contents.push('\n');
    }

    fs::create_dir_all(dir)?;
    fs::write(&path, contents)?;

    tracing::info!("Exported {} record(s) to {}", lines.len(), path.display());
    Ok(Some(ExportSummary { path, rows: lines.len() }))
}

fn cell(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) => escape(&String::from_utf8_lossy(bytes)),
        // No blob columns are declared
        ValueRef::Blob(_) => String::new(),
    }
}

/// Standard CSV quoting: wrap fields containing a delimiter, quote or
/// line break; double any inner quotes.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_patient, open_memory_database};
    use crate::models::{Record, Value};

    fn named_record(name: &str) -> Record {
        let mut rec = Record::new();
        rec.set("nome_completo", Value::Text(name.into()));
        rec
    }

    #[test]
    fn empty_store_writes_nothing() {
        let conn = open_memory_database().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let result = export_all(&conn, dir.path(), None).unwrap();
        assert!(result.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn export_has_header_plus_one_line_per_record() {
        let conn = open_memory_database().unwrap();
        for name in ["Ana Silva", "Beatriz", "Carla"] {
            insert_patient(&conn, &named_record(name)).unwrap();
        }
        let dir = tempfile::tempdir().unwrap();

        let summary = export_all(&conn, dir.path(), None).unwrap().unwrap();
        assert_eq!(summary.rows, 3);

        let contents = fs::read_to_string(&summary.path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], schema::column_names().join(","));
    }

    #[test]
    fn rows_come_out_in_identifier_order() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &named_record("Zuleica")).unwrap();
        insert_patient(&conn, &named_record("Ana")).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let summary = export_all(&conn, dir.path(), None).unwrap().unwrap();
        let contents = fs::read_to_string(&summary.path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert!(lines[1].contains("Zuleica"));
        assert!(lines[2].contains("Ana"));
    }

    #[test]
    fn stored_encodings_appear_verbatim() {
        let conn = open_memory_database().unwrap();
        let mut rec = named_record("Teste");
        rec.set("motivo_contracepcao", Value::Bool(true));
        rec.set("anemia", Value::Bool(false));
        insert_patient(&conn, &rec).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let summary = export_all(&conn, dir.path(), None).unwrap().unwrap();
        let contents = fs::read_to_string(&summary.path).unwrap();
        let row = contents.lines().nth(1).unwrap();
        let cells: Vec<&str> = row.split(',').collect();

        let columns = schema::column_names();
        let col = |name: &str| columns.iter().position(|c| *c == name).unwrap();
        assert_eq!(cells[col("motivo_contracepcao")], "1");
        assert_eq!(cells[col("anemia")], "n");
        assert_eq!(cells[col("telefone")], "");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &named_record("Silva, Ana")).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let summary = export_all(&conn, dir.path(), None).unwrap().unwrap();
        let contents = fs::read_to_string(&summary.path).unwrap();
        assert!(contents.contains("\"Silva, Ana\""));
    }

    #[test]
    fn custom_base_filename_is_used() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &named_record("Ana")).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let summary = export_all(&conn, dir.path(), Some("pacientes")).unwrap().unwrap();
        let file_name = summary.path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("pacientes_"));
        assert!(file_name.ends_with(".csv"));
    }

    #[test]
    fn escape_doubles_inner_quotes() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("diz \"oi\""), "\"diz \"\"oi\"\"\"");
    }
}
