//! In-memory representation of one patient encounter.
//!
//! A `Record` is an insertion-ordered field map. Booleans are a single
//! `Value::Bool` regardless of how the column stores them (0/1 for
//! motivation flags, 's'/'n' for clinical yes/no answers) — the encoding
//! split lives entirely in `db::repository`.

use serde::{Deserialize, Serialize};

/// One field value as the rest of the crate sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
}

/// Flat field-name → value map for one intake session.
///
/// Absent optional answers are simply not present; the store turns a
/// missing key into a SQL NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn set_text(&mut self, name: &str, value: Option<String>) {
        if let Some(v) = value {
            self.set(name, Value::Text(v));
        }
    }

    pub fn set_integer(&mut self, name: &str, value: Option<i64>) {
        if let Some(v) = value {
            self.set(name, Value::Integer(v));
        }
    }

    pub fn set_real(&mut self, name: &str, value: Option<f64>) {
        if let Some(v) = value {
            self.set(name, Value::Real(v));
        }
    }

    /// Optional clinical yes/no answer; a blank answer leaves the field absent.
    pub fn set_yes_no(&mut self, name: &str, value: Option<bool>) {
        if let Some(v) = value {
            self.set(name, Value::Bool(v));
        }
    }

    /// Motivation checkbox — always present, blank counts as unchecked.
    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.set(name, Value::Bool(value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Append another section's fields, in order. Section key sets are
    /// disjoint by construction of the registry; on a clash the later
    /// value wins.
    pub fn merge(&mut self, other: Record) {
        for (name, value) in other.fields {
            self.set(name, value);
        }
    }
}

/// Summary projection used by the "últimos registros" listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: i64,
    pub nome_completo: String,
    pub data_nascimento: Option<String>,
    pub telefone: Option<String>,
    pub data_insercao: Option<String>,
    pub data_registro: String,
}

/// Summary projection used by name search (adds CPF).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMatch {
    pub id: i64,
    pub nome_completo: String,
    pub data_nascimento: Option<String>,
    pub telefone: Option<String>,
    pub cpf: Option<String>,
    pub data_insercao: Option<String>,
}
