//! Patient repository — insert and read accessors over the `pacientes` table.
//!
//! The insert path validates every field name against the static registry
//! before touching SQL, and applies the storage encoding for booleans
//! (0/1 for motivation flags, 's'/'n' for clinical yes/no answers). The
//! read accessors reverse that mapping, so callers only ever see `Value`.
//! No update and no delete exist anywhere in this surface.

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params, Connection};

use super::DatabaseError;
use crate::models::schema::{self, FieldDef, FieldKind};
use crate::models::{PatientSummary, Record, SearchMatch, Value};

/// Insert one assembled record as a single committed row.
///
/// Fails wholesale with `SchemaViolation` (naming the offenders, writing
/// nothing) if any field is not a declared column. Returns the
/// autogenerated identifier.
pub fn insert_patient(conn: &Connection, record: &Record) -> Result<i64, DatabaseError> {
    let mut unknown = Vec::new();
    let mut columns = Vec::new();
    let mut values = Vec::new();

    for (name, value) in record.iter() {
        match schema::field(name) {
            Some(def) => {
                columns.push(def.name);
                values.push(encode(def, value));
            }
            None => unknown.push(name.to_string()),
        }
    }

    if !unknown.is_empty() {
        return Err(DatabaseError::SchemaViolation { fields: unknown });
    }

    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema::TABLE,
        columns.join(", "),
        placeholders.join(", ")
    );

    conn.execute(&sql, rusqlite::params_from_iter(values))?;
    Ok(conn.last_insert_rowid())
}

/// Up to `limit` most recent records, newest first.
pub fn list_recent(conn: &Connection, limit: i64) -> Result<Vec<PatientSummary>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, nome_completo, data_nascimento, telefone, data_insercao, data_registro
         FROM pacientes
         ORDER BY id DESC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], |row| {
        Ok(PatientSummary {
            id: row.get(0)?,
            nome_completo: row.get(1)?,
            data_nascimento: row.get(2)?,
            telefone: row.get(3)?,
            data_insercao: row.get(4)?,
            data_registro: row.get(5)?,
        })
    })?;

    let mut summaries = Vec::new();
    for row in rows {
        summaries.push(row?);
    }
    Ok(summaries)
}

/// Substring search on the full name, unanchored on both ends,
/// ordered by name ascending.
pub fn search_by_name(conn: &Connection, name: &str) -> Result<Vec<SearchMatch>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, nome_completo, data_nascimento, telefone, cpf, data_insercao
         FROM pacientes
         WHERE nome_completo LIKE ?1
         ORDER BY nome_completo",
    )?;

    let rows = stmt.query_map(params![format!("%{name}%")], |row| {
        Ok(SearchMatch {
            id: row.get(0)?,
            nome_completo: row.get(1)?,
            data_nascimento: row.get(2)?,
            telefone: row.get(3)?,
            cpf: row.get(4)?,
            data_insercao: row.get(5)?,
        })
    })?;

    let mut matches = Vec::new();
    for row in rows {
        matches.push(row?);
    }
    Ok(matches)
}

/// Full row by identifier: every non-null column in declaration order,
/// paired with its column label. `None` when no row matches.
pub fn fetch_by_id(
    conn: &Connection,
    id: i64,
) -> Result<Option<Vec<(&'static str, Value)>>, DatabaseError> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?1",
        schema::column_names().join(", "),
        schema::TABLE
    );
    let mut stmt = conn.prepare(&sql)?;

    let result = stmt.query_row(params![id], |row| {
        let mut fields = Vec::new();
        for (idx, def) in schema::FIELDS.iter().enumerate() {
            if let Some(value) = decode(def, row.get_ref(idx)?) {
                fields.push((def.name, value));
            }
        }
        Ok(fields)
    });

    match result {
        Ok(fields) => Ok(Some(fields)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Total stored records.
pub fn count_patients(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM pacientes", [], |row| row.get(0))?;
    Ok(count)
}

/// Storage encoding: booleans become 0/1 integers for motivation flags
/// and 's'/'n' text for clinical yes/no columns.
fn encode(def: &FieldDef, value: &Value) -> SqlValue {
    match value {
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Integer(i) => SqlValue::Integer(*i),
        Value::Real(f) => SqlValue::Real(*f),
        Value::Bool(b) => match def.kind {
            FieldKind::YesNo => SqlValue::Text(if *b { "s" } else { "n" }.to_string()),
            _ => SqlValue::Integer(*b as i64),
        },
    }
}

/// Reverse of `encode`; NULL decodes to `None`.
fn decode(def: &FieldDef, value: ValueRef<'_>) -> Option<Value> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(match def.kind {
            FieldKind::Flag => Value::Bool(i != 0),
            _ => Value::Integer(i),
        }),
        ValueRef::Real(f) => Some(Value::Real(f)),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            Some(match def.kind {
                FieldKind::YesNo => Value::Bool(text == "s"),
                _ => Value::Text(text),
            })
        }
        // No blob columns are declared
        ValueRef::Blob(_) => None,
    }
}
