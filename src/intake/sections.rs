//! Section collectors — the five fixed prompt sequences of the intake form.
//!
//! Each collector issues its prompts in declaration order and returns a
//! section-scoped `Record`. Conditional sub-fields are resolved right after
//! their governing answer, inside the same collector; when the trigger is
//! not met the sub-field is never prompted and stays absent.

use std::io::{self, BufRead, Write};

use super::reader::Prompter;
use crate::models::enums::{InsertionDifficulty, InsertionOutcome};
use crate::models::schema;
use crate::models::{Record, Value};

pub fn collect_identification<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
) -> io::Result<Record> {
    p.section_header("IDENTIFICAÇÃO")?;

    let mut rec = Record::new();
    rec.set(
        "nome_completo",
        Value::Text(p.read_required_text("Nome completo: ")?),
    );
    rec.set_text(
        "data_nascimento",
        p.read_text("Data de nascimento (DD/MM/AAAA): ")?,
    );
    rec.set_text("telefone", p.read_text("Telefone: ")?);
    rec.set_text("cpf", p.read_text("CPF: ")?);
    rec.set_text("sus", p.read_text("SUS: ")?);
    rec.set_text("cor", p.read_text("Cor: ")?);
    rec.set_text("religiao", p.read_text("Religião: ")?);
    rec.set_text("profissao", p.read_text("Profissão: ")?);
    rec.set_text("escolaridade", p.read_text("Escolaridade: ")?);
    rec.set_text("endereco", p.read_text("Endereço: ")?);
    rec.set_text("local_atendimento", p.read_text("Local de atendimento: ")?);
    Ok(rec)
}

pub fn collect_motivation<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> io::Result<Record> {
    p.section_header("MOTIVAÇÃO PARA INSERÇÃO DO DIU")?;
    p.line("Marque as opções aplicáveis (s/n):")?;

    let mut rec = Record::new();
    let flags = [
        ("motivo_contracepcao", "1. Contracepção (s/n): "),
        ("motivo_pos_aborto", "2. Pós aborto (s/n): "),
        ("motivo_sua", "3. SUA (s/n): "),
        ("motivo_doenca_hematologica", "4. Doença hematológica (s/n): "),
        ("motivo_transplantada", "5. Transplantada (s/n): "),
        ("motivo_mioma", "6. Mioma (s/n): "),
        ("motivo_endometriose", "7. Endometriose (s/n): "),
        ("motivo_dor_pelvica", "8. Dor pélvica (s/n): "),
        ("motivo_tpm", "9. TPM (s/n): "),
        (
            "motivo_terapia_pos_menopausa",
            "10. Terapia pós menopausa (s/n): ",
        ),
    ];
    for (name, prompt) in flags {
        // Unanswered checkbox counts as unchecked, never as null
        rec.set_flag(name, p.read_yes_no(prompt)?.unwrap_or(false));
    }
    rec.set_text("motivo_outro", p.read_text("Outro motivo (descreva): ")?);
    Ok(rec)
}

pub fn collect_gynecological<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
) -> io::Result<Record> {
    p.section_header("DADOS GINECOLÓGICOS")?;

    let mut rec = Record::new();
    rec.set_text(
        "dum",
        p.read_text("Data da última menstruação (DUM) (DD/MM/AAAA): ")?,
    );
    rec.set_text("ultima_co", p.read_text("Última C.O: ")?);
    rec.set_text("cm_regularidade", p.read_text("C.M (regular/irregular): ")?);
    let (min, max) = schema::integer_bounds("cm_duracao_dias");
    rec.set_integer("cm_duracao_dias", p.read_integer("Duração em dias: ", min, max)?);
    rec.set_yes_no("teve_ist", p.read_yes_no("Já teve IST? (s/n): ")?);
    rec.set_yes_no("parceiro_fixo", p.read_yes_no("Possui parceiro fixo? (s/n): ")?);
    rec.set_yes_no("alto_risco_ist", p.read_yes_no("Alto risco de IST? (s/n): ")?);

    let uso_mac = p.read_yes_no("Uso de MAC? (s/n): ")?;
    rec.set_yes_no("uso_mac", uso_mac);
    if uso_mac == Some(true) {
        rec.set_text("uso_mac_qual", p.read_text("Qual MAC: ")?);
    }

    rec.set_yes_no("anemia", p.read_yes_no("Anemia? (s/n): ")?);
    rec.set_yes_no(
        "sangramento_aumentado",
        p.read_yes_no("Sangramento uterino aumentado na menstruação? (s/n): ")?,
    );
    rec.set_yes_no("dipa_3meses", p.read_yes_no("DIPA nos últimos 3 meses? (s/n): ")?);

    let ist_ativa = p.read_yes_no("IST ativa? (s/n): ")?;
    rec.set_yes_no("ist_ativa", ist_ativa);
    if ist_ativa == Some(true) {
        rec.set_text("ist_ativa_qual", p.read_text("Qual IST: ")?);
    }

    rec.set_yes_no("hiv_aids", p.read_yes_no("HIV/AIDS? (s/n): ")?);

    let antirretrovirais = p.read_yes_no("Uso de antirretrovirais? (s/n): ")?;
    rec.set_yes_no("uso_antirretrovirais", antirretrovirais);
    if antirretrovirais == Some(true) {
        rec.set_text(
            "antirretrovirais_quais",
            p.read_text("Quais antirretrovirais: ")?,
        );
    }

    rec.set_yes_no(
        "sangramento_nao_investigado",
        p.read_yes_no("Sangramento uterino não investigado? (s/n): ")?,
    );
    rec.set_yes_no("cancer_cervical", p.read_yes_no("Câncer cervical? (s/n): ")?);
    Ok(rec)
}

pub fn collect_obstetric<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> io::Result<Record> {
    p.section_header("HISTÓRIA OBSTÉTRICA")?;

    let mut rec = Record::new();
    for (name, prompt) in [
        ("gesta", "Gesta: "),
        ("para", "Para: "),
        ("cesarea", "Cesárea: "),
        ("abortos", "Abortos: "),
    ] {
        let (min, max) = schema::integer_bounds(name);
        rec.set_integer(name, p.read_integer(prompt, min, max)?);
    }
    rec.set_text(
        "data_ultimo_parto",
        p.read_text("Data do último parto (DD/MM/AAAA): ")?,
    );
    rec.set_text(
        "data_ultimo_aborto",
        p.read_text("Data do último aborto (DD/MM/AAAA): ")?,
    );
    rec.set_yes_no(
        "infeccao_pos_parto_aborto",
        p.read_yes_no("Teve infecção pós-parto ou pós-aborto? (s/n): ")?,
    );
    Ok(rec)
}

pub fn collect_insertion<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> io::Result<Record> {
    p.section_header("INSERÇÃO DO DIU")?;

    let mut rec = Record::new();
    rec.set_yes_no(
        "informada_contraindicacoes",
        p.read_yes_no("Foi informada sobre contraindicações e efeitos? (s/n): ")?,
    );
    rec.set_text("diu_escolhido", p.read_text("DIU escolhido (TCU/Levonorgestrel): ")?);
    rec.set_real("peso_kg", p.read_decimal("Peso (kg): ")?);
    rec.set_real("altura_cm", p.read_decimal("Altura (cm): ")?);
    rec.set_text("pa_mmhg", p.read_text("PA (mmHg): ")?);
    rec.set_text("data_insercao", p.read_text("Data de inserção (DD/MM/AAAA): ")?);
    rec.set_text(
        "data_primeira_revisao",
        p.read_text("Data da primeira revisão (DD/MM/AAAA): ")?,
    );
    rec.set_text("exame_pelvico", p.read_text("Exame pélvico (normal/anormal): ")?);
    rec.set_yes_no(
        "cervicite_purulenta",
        p.read_yes_no("Cervicite purulenta? (s/n): ")?,
    );
    rec.set_yes_no(
        "confirma_elegibilidade",
        p.read_yes_no("Confirma elegibilidade para o DIU? (s/n): ")?,
    );

    let resultado =
        p.read_category::<InsertionOutcome>("Inserção (fácil/difícil/não realizada): ")?;
    if let Some(resultado) = resultado {
        rec.set("insercao_resultado", Value::Text(resultado.as_str().into()));
        if resultado.requires_reason() {
            rec.set_text("insercao_motivo", p.read_text("Motivo: ")?);
        }
    }

    rec.set_text("posicao_uterina", p.read_text("Posição uterina (AVF/MVF/RVF): ")?);
    rec.set_yes_no("reflexo_vaginal", p.read_yes_no("Reflexo vaginal? (s/n): ")?);

    let analgesia = p.read_yes_no("Uso de analgesia? (s/n): ")?;
    rec.set_yes_no("uso_analgesia", analgesia);
    if analgesia == Some(true) {
        rec.set_text("analgesia_qual", p.read_text("Qual analgesia: ")?);
    }

    rec.set_yes_no(
        "uso_dilatadores",
        p.read_yes_no("Uso de dilatadores cervicais? (s/n): ")?,
    );
    rec.set_real("histerometria_cm", p.read_decimal("Histerometria (cm): ")?);
    let (min, max) = schema::integer_bounds("dor_nota");
    rec.set_integer(
        "dor_nota",
        p.read_integer("Nota de dor na inserção (1-10): ", min, max)?,
    );
    rec.set_text(
        "dor_momento",
        p.read_text(
            "Em qual momento (Histerometria/Liberação do DIU/Fixação do colo do útero/Outro): ",
        )?,
    );

    let dificuldade = p.read_category::<InsertionDifficulty>(
        "Dificuldade na inserção (sem dificuldade/dificuldade esperada/mais difícil que o esperado/não foi possível inserir): ",
    )?;
    if let Some(dificuldade) = dificuldade {
        rec.set("dificuldade_insercao", Value::Text(dificuldade.as_str().into()));
        if dificuldade.requires_reason() {
            rec.set_text("motivo_dificuldade", p.read_text("Motivo da dificuldade: ")?);
        }
    }

    rec.set_text(
        "inserido_por",
        p.read_text("Inserido por (staff/residente/enfermeira/estudante/MFC/supervisor): ")?,
    );
    Ok(rec)
}
