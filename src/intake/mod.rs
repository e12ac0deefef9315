//! Intake pipeline — validated prompts, section collectors, record assembly.

pub mod reader;
pub mod sections;

pub use reader::Prompter;

use std::io::{self, BufRead, Write};

use crate::models::Record;

/// Run the five section collectors in order and merge their answers into
/// one flat record. Schema validation happens later, at the store.
pub fn collect_record<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> io::Result<Record> {
    let mut record = Record::new();
    record.merge(sections::collect_identification(p)?);
    record.merge(sections::collect_motivation(p)?);
    record.merge(sections::collect_gynecological(p)?);
    record.merge(sections::collect_obstetric(p)?);
    record.merge(sections::collect_insertion(p)?);
    Ok(record)
}
