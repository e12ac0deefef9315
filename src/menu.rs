//! Menu loop — the operator-facing surface of the system.
//!
//! Five numbered options dispatching to intake, listing, search, export
//! and shutdown. Every option is synchronous and returns to the menu;
//! only storage-engine faults escape this loop.

use std::io::{self, BufRead, Write};
use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

use crate::db::{self, DatabaseError};
use crate::export::{self, ExportError};
use crate::intake::{self, Prompter};
use crate::models::schema::{self, FieldKind};
use crate::models::Value;

/// Default number of rows shown by "Listar Registros".
pub const LIST_LIMIT: i64 = 10;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub fn run_menu<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    conn: &Connection,
    exports_dir: &Path,
) -> Result<(), MenuError> {
    loop {
        p.section_header("SISTEMA DE FORMULÁRIO DIU")?;
        p.line("1. Novo Registro - Criar um novo registro de paciente")?;
        p.line("2. Listar Registros - Ver os últimos registros salvos")?;
        p.line("3. Buscar Paciente - Buscar registros por nome")?;
        p.line("4. Exportar para CSV - Exportar todos os dados para arquivo CSV")?;
        p.line("5. Sair - Encerrar o sistema")?;
        p.line(&"=".repeat(60))?;

        match p.read_text("Escolha uma opção (1-5): ")?.as_deref() {
            Some("1") => new_record(p, conn)?,
            Some("2") => list_records(p, conn)?,
            Some("3") => search_patient(p, conn)?,
            Some("4") => export_csv(p, conn, exports_dir)?,
            Some("5") => {
                p.line("\nEncerrando o sistema...")?;
                return Ok(());
            }
            _ => p.line("\n✗ Opção inválida! Tente novamente.")?,
        }
    }
}

fn new_record<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    conn: &Connection,
) -> Result<(), MenuError> {
    p.line(&format!("\n{}", "#".repeat(60)))?;
    p.line("NOVO REGISTRO DE PACIENTE")?;
    p.line(&"#".repeat(60))?;

    let record = intake::collect_record(p)?;

    p.line(&format!("\n{}", "-".repeat(60)))?;
    if p.read_yes_no("Deseja salvar este registro? (s/n): ")? != Some(true) {
        p.line("\n✗ Registro cancelado.")?;
        return Ok(());
    }

    match db::insert_patient(conn, &record) {
        Ok(id) => {
            tracing::info!("Registro {id} salvo");
            p.line("\n✓ Registro salvo com sucesso!")?;
            p.line(&format!("ID do registro: {id}"))?;
        }
        // The one save error the operator can cause; everything else is fatal
        Err(DatabaseError::SchemaViolation { fields }) => {
            tracing::warn!("Colunas inválidas no registro: {}", fields.join(", "));
            p.line(&format!(
                "\n✗ Erro: Colunas inválidas detectadas: {}",
                fields.join(", ")
            ))?;
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn list_records<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    conn: &Connection,
) -> Result<(), MenuError> {
    p.section_header(&format!("ÚLTIMOS {LIST_LIMIT} REGISTROS"))?;

    let summaries = db::list_recent(conn, LIST_LIMIT)?;
    if summaries.is_empty() {
        p.line("Nenhum registro encontrado.")?;
        return Ok(());
    }

    for s in summaries {
        p.line(&format!("\nID: {}", s.id))?;
        p.line(&format!("Nome: {}", s.nome_completo))?;
        p.line(&format!(
            "Data Nascimento: {}",
            s.data_nascimento.as_deref().unwrap_or("N/A")
        ))?;
        p.line(&format!("Telefone: {}", s.telefone.as_deref().unwrap_or("N/A")))?;
        p.line(&format!(
            "Data Inserção DIU: {}",
            s.data_insercao.as_deref().unwrap_or("N/A")
        ))?;
        p.line(&format!("Data Registro: {}", s.data_registro))?;
        p.line(&"-".repeat(60))?;
    }
    Ok(())
}

fn search_patient<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    conn: &Connection,
) -> Result<(), MenuError> {
    p.section_header("BUSCAR PACIENTE")?;

    let name = p.read_required_text("Digite o nome (ou parte do nome) para buscar: ")?;
    let matches = db::search_by_name(conn, &name)?;

    if matches.is_empty() {
        p.line(&format!("\nNenhum paciente encontrado com o nome '{name}'."))?;
        return Ok(());
    }

    p.line(&format!("\n{} paciente(s) encontrado(s):\n", matches.len()))?;
    for m in &matches {
        p.line(&format!("ID: {}", m.id))?;
        p.line(&format!("Nome: {}", m.nome_completo))?;
        p.line(&format!(
            "Data Nascimento: {}",
            m.data_nascimento.as_deref().unwrap_or("N/A")
        ))?;
        p.line(&format!("Telefone: {}", m.telefone.as_deref().unwrap_or("N/A")))?;
        p.line(&format!("CPF: {}", m.cpf.as_deref().unwrap_or("N/A")))?;
        p.line(&format!(
            "Data Inserção DIU: {}",
            m.data_insercao.as_deref().unwrap_or("N/A")
        ))?;
        p.line(&"-".repeat(60))?;
    }

    let drill_down =
        p.read_yes_no("\nDeseja ver os detalhes completos de algum registro? (s/n): ")?;
    if drill_down == Some(true) {
        if let Some(id) = p.read_integer("Digite o ID do registro: ", None, None)? {
            show_details(p, conn, id)?;
        }
    }
    Ok(())
}

fn show_details<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    conn: &Connection,
    id: i64,
) -> Result<(), MenuError> {
    match db::fetch_by_id(conn, id)? {
        None => p.line(&format!("\nRegistro com ID {id} não encontrado."))?,
        Some(fields) => {
            p.section_header(&format!("DETALHES DO REGISTRO #{id}"))?;
            for (name, value) in fields {
                p.line(&format!("{name}: {}", display_value(name, &value)))?;
            }
        }
    }
    Ok(())
}

/// Render a decoded value with its stored representation: flags as 0/1,
/// clinical yes/no answers as 's'/'n'.
fn display_value(name: &str, value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Bool(b) => match schema::field(name).map(|f| f.kind) {
            Some(FieldKind::YesNo) => if *b { "s" } else { "n" }.to_string(),
            _ => i64::from(*b).to_string(),
        },
    }
}

fn export_csv<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    conn: &Connection,
    exports_dir: &Path,
) -> Result<(), MenuError> {
    p.section_header("EXPORTAR PARA CSV")?;

    let base = p.read_text("Nome do arquivo (sem extensão) [export]: ")?;
    match export::export_all(conn, exports_dir, base.as_deref())? {
        None => p.line("Nenhum registro para exportar.")?,
        Some(summary) => {
            p.line(&format!(
                "\n✓ {} registro(s) exportado(s) com sucesso!",
                summary.rows
            ))?;
            p.line(&format!("Arquivo: {}", summary.path.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{count_patients, insert_patient, open_memory_database};
    use crate::models::Record;
    use std::io::Cursor;

    fn run_script(
        conn: &Connection,
        exports_dir: &Path,
        lines: &[&str],
    ) -> Result<String, MenuError> {
        let mut script = lines.join("\n");
        script.push('\n');
        let mut p = Prompter::new(Cursor::new(script), Vec::<u8>::new());
        let result = run_menu(&mut p, conn, exports_dir);
        let output = String::from_utf8(p.into_output()).unwrap();
        result.map(|()| output)
    }

    fn named_record(name: &str) -> Record {
        let mut rec = Record::new();
        rec.set("nome_completo", Value::Text(name.into()));
        rec
    }

    /// Answers for a minimal "Novo Registro" pass: name only, then every
    /// optional prompt left blank (11 + 11 + 16 + 7 + 20 prompts).
    fn minimal_intake(name: &str) -> Vec<&str> {
        let mut lines = vec![name];
        lines.extend(std::iter::repeat("").take(64));
        lines
    }

    #[test]
    fn quit_breaks_the_loop() {
        let conn = open_memory_database().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = run_script(&conn, dir.path(), &["5"]).unwrap();
        assert!(output.contains("Encerrando o sistema..."));
    }

    #[test]
    fn invalid_option_reprompts() {
        let conn = open_memory_database().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = run_script(&conn, dir.path(), &["9", "", "5"]).unwrap();
        assert_eq!(output.matches("Opção inválida! Tente novamente.").count(), 2);
    }

    #[test]
    fn new_record_saves_after_confirmation() {
        let conn = open_memory_database().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let mut lines = vec!["1"];
        lines.extend(minimal_intake("Ana Silva"));
        lines.push("s"); // confirmation
        lines.push("5");

        let output = run_script(&conn, dir.path(), &lines).unwrap();
        assert!(output.contains("✓ Registro salvo com sucesso!"));
        assert!(output.contains("ID do registro: 1"));
        assert_eq!(count_patients(&conn).unwrap(), 1);
    }

    #[test]
    fn new_record_discards_without_confirmation() {
        let conn = open_memory_database().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let mut lines = vec!["1"];
        lines.extend(minimal_intake("Ana Silva"));
        lines.push("n");
        lines.push("5");

        let output = run_script(&conn, dir.path(), &lines).unwrap();
        assert!(output.contains("✗ Registro cancelado."));
        assert_eq!(count_patients(&conn).unwrap(), 0);
    }

    #[test]
    fn listing_shows_saved_records_with_placeholders() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &named_record("Ana Silva")).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let output = run_script(&conn, dir.path(), &["2", "5"]).unwrap();
        assert!(output.contains("Nome: Ana Silva"));
        assert!(output.contains("Telefone: N/A"));
    }

    #[test]
    fn listing_empty_store_reports_nothing_found() {
        let conn = open_memory_database().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = run_script(&conn, dir.path(), &["2", "5"]).unwrap();
        assert!(output.contains("Nenhum registro encontrado."));
    }

    #[test]
    fn search_finds_and_drills_down() {
        let conn = open_memory_database().unwrap();
        let id = insert_patient(&conn, &named_record("Ana Silva")).unwrap();
        insert_patient(&conn, &named_record("Beatriz")).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let id_line = id.to_string();
        let output =
            run_script(&conn, dir.path(), &["3", "Ana", "s", &id_line, "5"]).unwrap();
        assert!(output.contains("1 paciente(s) encontrado(s)"));
        assert!(output.contains(&format!("DETALHES DO REGISTRO #{id}")));
        assert!(output.contains("nome_completo: Ana Silva"));
        assert!(!output.contains("Beatriz"));
    }

    #[test]
    fn search_miss_reports_no_match() {
        let conn = open_memory_database().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = run_script(&conn, dir.path(), &["3", "Carla", "5"]).unwrap();
        assert!(output.contains("Nenhum paciente encontrado com o nome 'Carla'."));
    }

    #[test]
    fn drill_down_unknown_id_reports_not_found() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &named_record("Ana Silva")).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let output = run_script(&conn, dir.path(), &["3", "Ana", "s", "42", "5"]).unwrap();
        assert!(output.contains("Registro com ID 42 não encontrado."));
    }

    #[test]
    fn export_reports_count_and_path() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &named_record("Ana Silva")).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let output = run_script(&conn, dir.path(), &["4", "", "5"]).unwrap();
        assert!(output.contains("✓ 1 registro(s) exportado(s) com sucesso!"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn export_empty_store_writes_nothing() {
        let conn = open_memory_database().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let output = run_script(&conn, dir.path(), &["4", "", "5"]).unwrap();
        assert!(output.contains("Nenhum registro para exportar."));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn display_value_uses_stored_representations() {
        assert_eq!(display_value("motivo_tpm", &Value::Bool(true)), "1");
        assert_eq!(display_value("motivo_tpm", &Value::Bool(false)), "0");
        assert_eq!(display_value("anemia", &Value::Bool(true)), "s");
        assert_eq!(display_value("anemia", &Value::Bool(false)), "n");
        assert_eq!(display_value("dor_nota", &Value::Integer(7)), "7");
        assert_eq!(display_value("peso_kg", &Value::Real(62.5)), "62.5");
    }
}
