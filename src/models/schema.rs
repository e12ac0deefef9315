//! Static field registry for the `pacientes` table.
//!
//! Single source of truth for column names, declared order, value kinds and
//! prompt constraints. The section collectors, the persistence layer and the
//! CSV export all consult this table, so a field added here is automatically
//! validated on insert and included in exports.

/// Intake section a field belongs to. `Meta` covers the columns the store
/// manages itself (id, registration timestamp).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Meta,
    Identification,
    Motivation,
    Gynecological,
    Obstetric,
    Insertion,
}

/// Declared kind of a column, driving both prompt validation and the
/// storage encoding of booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, stored verbatim.
    Text,
    /// Integer with optional inclusive bounds enforced at the prompt.
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    /// Floating-point measurement.
    Real,
    /// Clinical yes/no answer, stored as the single-character code 's'/'n'.
    YesNo,
    /// Motivation checkbox, stored as 0/1 and never null.
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub section: Section,
}

pub const TABLE: &str = "pacientes";

const fn text(name: &'static str, section: Section) -> FieldDef {
    FieldDef { name, kind: FieldKind::Text, required: false, section }
}

const fn integer(name: &'static str, section: Section) -> FieldDef {
    FieldDef { name, kind: FieldKind::Integer { min: None, max: None }, required: false, section }
}

const fn bounded(name: &'static str, min: i64, max: i64, section: Section) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Integer { min: Some(min), max: Some(max) },
        required: false,
        section,
    }
}

const fn real(name: &'static str, section: Section) -> FieldDef {
    FieldDef { name, kind: FieldKind::Real, required: false, section }
}

const fn yes_no(name: &'static str, section: Section) -> FieldDef {
    FieldDef { name, kind: FieldKind::YesNo, required: false, section }
}

const fn flag(name: &'static str, section: Section) -> FieldDef {
    FieldDef { name, kind: FieldKind::Flag, required: false, section }
}

/// Every column of `pacientes`, in declaration order (id first,
/// data_registro last). Must stay in sync with
/// `resources/migrations/001_initial.sql` — see the parity test in
/// `db::sqlite`.
pub const FIELDS: &[FieldDef] = &[
    integer("id", Section::Meta),
    // ── Identificação ──────────────────────────────────────────────
    FieldDef {
        name: "nome_completo",
        kind: FieldKind::Text,
        required: true,
        section: Section::Identification,
    },
    text("data_nascimento", Section::Identification),
    text("telefone", Section::Identification),
    text("cpf", Section::Identification),
    text("sus", Section::Identification),
    text("cor", Section::Identification),
    text("religiao", Section::Identification),
    text("profissao", Section::Identification),
    text("escolaridade", Section::Identification),
    text("endereco", Section::Identification),
    text("local_atendimento", Section::Identification),
    // ── Motivação para inserção do DIU ─────────────────────────────
    flag("motivo_contracepcao", Section::Motivation),
    flag("motivo_pos_aborto", Section::Motivation),
    flag("motivo_sua", Section::Motivation),
    flag("motivo_doenca_hematologica", Section::Motivation),
    flag("motivo_transplantada", Section::Motivation),
    flag("motivo_mioma", Section::Motivation),
    flag("motivo_endometriose", Section::Motivation),
    flag("motivo_dor_pelvica", Section::Motivation),
    flag("motivo_tpm", Section::Motivation),
    flag("motivo_terapia_pos_menopausa", Section::Motivation),
    text("motivo_outro", Section::Motivation),
    // ── Dados ginecológicos ────────────────────────────────────────
    text("dum", Section::Gynecological),
    text("ultima_co", Section::Gynecological),
    text("cm_regularidade", Section::Gynecological),
    integer("cm_duracao_dias", Section::Gynecological),
    yes_no("teve_ist", Section::Gynecological),
    yes_no("parceiro_fixo", Section::Gynecological),
    yes_no("alto_risco_ist", Section::Gynecological),
    yes_no("uso_mac", Section::Gynecological),
    text("uso_mac_qual", Section::Gynecological),
    yes_no("anemia", Section::Gynecological),
    yes_no("sangramento_aumentado", Section::Gynecological),
    yes_no("dipa_3meses", Section::Gynecological),
    yes_no("ist_ativa", Section::Gynecological),
    text("ist_ativa_qual", Section::Gynecological),
    yes_no("hiv_aids", Section::Gynecological),
    yes_no("uso_antirretrovirais", Section::Gynecological),
    text("antirretrovirais_quais", Section::Gynecological),
    yes_no("sangramento_nao_investigado", Section::Gynecological),
    yes_no("cancer_cervical", Section::Gynecological),
    // ── História obstétrica ────────────────────────────────────────
    integer("gesta", Section::Obstetric),
    integer("para", Section::Obstetric),
    integer("cesarea", Section::Obstetric),
    integer("abortos", Section::Obstetric),
    text("data_ultimo_parto", Section::Obstetric),
    text("data_ultimo_aborto", Section::Obstetric),
    yes_no("infeccao_pos_parto_aborto", Section::Obstetric),
    // ── Inserção do DIU ────────────────────────────────────────────
    yes_no("informada_contraindicacoes", Section::Insertion),
    text("diu_escolhido", Section::Insertion),
    real("peso_kg", Section::Insertion),
    real("altura_cm", Section::Insertion),
    text("pa_mmhg", Section::Insertion),
    text("data_insercao", Section::Insertion),
    text("data_primeira_revisao", Section::Insertion),
    text("exame_pelvico", Section::Insertion),
    yes_no("cervicite_purulenta", Section::Insertion),
    yes_no("confirma_elegibilidade", Section::Insertion),
    text("insercao_resultado", Section::Insertion),
    text("insercao_motivo", Section::Insertion),
    text("posicao_uterina", Section::Insertion),
    yes_no("reflexo_vaginal", Section::Insertion),
    yes_no("uso_analgesia", Section::Insertion),
    text("analgesia_qual", Section::Insertion),
    yes_no("uso_dilatadores", Section::Insertion),
    real("histerometria_cm", Section::Insertion),
    bounded("dor_nota", 1, 10, Section::Insertion),
    text("dor_momento", Section::Insertion),
    text("dificuldade_insercao", Section::Insertion),
    text("motivo_dificuldade", Section::Insertion),
    text("inserido_por", Section::Insertion),
    // ── Meta ───────────────────────────────────────────────────────
    text("data_registro", Section::Meta),
];

/// Look up a field by column name.
pub fn field(name: &str) -> Option<&'static FieldDef> {
    FIELDS.iter().find(|f| f.name == name)
}

/// Whether `name` is a declared column of `pacientes`.
pub fn is_declared(name: &str) -> bool {
    field(name).is_some()
}

/// All column names in declaration order.
pub fn column_names() -> Vec<&'static str> {
    FIELDS.iter().map(|f| f.name).collect()
}

/// Declared bounds for an integer column, `(None, None)` otherwise.
/// Collectors pass these straight to the prompt so the registry stays the
/// single place bounds are written down.
pub fn integer_bounds(name: &str) -> (Option<i64>, Option<i64>) {
    match field(name).map(|f| f.kind) {
        Some(FieldKind::Integer { min, max }) => (min, max),
        _ => (None, None),
    }
}
