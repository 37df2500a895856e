use crate::core::io::traits::StructureFile;
use crate::core::models::structure::{Structure, StructureBuilder, StructureError};
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

const MIN_COORDINATE_LINE_LEN: usize = 54;
const DEFAULT_CHAIN_ID: char = 'A';

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Inconsistent data on line {line}: {source}")]
    Inconsistency {
        line: usize,
        #[source]
        source: StructureError,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Record name from columns 1-6. Lines shorter than six columns are used whole.
fn record_name(line: &str) -> &str {
    line.get(..6).unwrap_or(line).trim()
}

struct AtomRecord<'a> {
    serial: usize,
    name: &'a str,
    res_name: &'a str,
    chain_id: char,
    res_number: isize,
    position: Point3<f64>,
}

fn parse_int<T: std::str::FromStr>(
    line: &str,
    line_num: usize,
    range: (usize, usize),
    columns: &str,
) -> Result<T, PdbError> {
    let value = slice_and_trim(line, range.0, range.1);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: columns.into(),
            value: value.into(),
        },
    })
}

fn parse_float(
    line: &str,
    line_num: usize,
    range: (usize, usize),
    columns: &str,
) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, range.0, range.1);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: columns.into(),
            value: value.into(),
        },
    })
}

fn parse_atom_record(line: &str, line_num: usize) -> Result<AtomRecord<'_>, PdbError> {
    if line.len() < MIN_COORDINATE_LINE_LEN {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::LineTooShort,
        });
    }

    let name = slice_and_trim(line, 12, 16);
    if name.is_empty() {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::MissingRequiredField {
                columns: "13-16".into(),
            },
        });
    }
    let res_name = slice_and_trim(line, 17, 20);
    if res_name.is_empty() {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::MissingRequiredField {
                columns: "18-20".into(),
            },
        });
    }

    let serial = parse_int(line, line_num, (6, 11), "7-11")?;
    let chain_id = slice_and_trim(line, 21, 22)
        .chars()
        .next()
        .unwrap_or(DEFAULT_CHAIN_ID);
    let res_number = parse_int(line, line_num, (22, 26), "23-26")?;
    let x = parse_float(line, line_num, (30, 38), "31-38")?;
    let y = parse_float(line, line_num, (38, 46), "39-46")?;
    let z = parse_float(line, line_num, (46, 54), "47-54")?;

    Ok(AtomRecord {
        serial,
        name,
        res_name,
        chain_id,
        res_number,
        position: Point3::new(x, y, z),
    })
}

/// Alternate location indicator in column 17; only the primary location is kept.
fn is_primary_location(line: &str) -> bool {
    matches!(line.get(16..17), None | Some(" ") | Some("A"))
}

/// Assembles one model while tracking chain and residue transitions.
struct ModelReader {
    builder: StructureBuilder,
    current_chain: Option<char>,
    current_residue: Option<isize>,
}

impl ModelReader {
    fn new() -> Self {
        Self {
            builder: StructureBuilder::new(),
            current_chain: None,
            current_residue: None,
        }
    }

    fn push(&mut self, record: &AtomRecord<'_>, line_num: usize) -> Result<(), PdbError> {
        let inconsistency = |source: StructureError| PdbError::Inconsistency {
            line: line_num,
            source,
        };
        if self.current_chain != Some(record.chain_id) {
            self.builder.start_chain(record.chain_id);
            self.current_chain = Some(record.chain_id);
            self.current_residue = None;
        }
        if self.current_residue != Some(record.res_number) {
            self.builder
                .start_residue(record.res_number, record.res_name)
                .map_err(inconsistency)?;
            self.current_residue = Some(record.res_number);
        }
        self.builder
            .add_atom(record.serial, record.name, record.position)
            .map_err(inconsistency)?;
        Ok(())
    }

    fn finish(self) -> Option<Structure> {
        if self.builder.is_empty() {
            None
        } else {
            Some(self.builder.build())
        }
    }
}

pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        Self::read_models_from(reader)?
            .into_iter()
            .next()
            .ok_or_else(|| PdbError::MissingRecord("ATOM records".into()))
    }

    /// Reads every model of a PDB file.
    ///
    /// `MODEL` starts a model and `ENDMDL` closes it. `HETATM` records are skipped.
    /// `END` stops reading only in files without `MODEL` records, so trajectories
    /// that close every model with `END` are read to the last model.
    fn read_models_from(reader: &mut impl BufRead) -> Result<Vec<Structure>, Self::Error> {
        let mut models = Vec::new();
        let mut current: Option<ModelReader> = None;
        let mut multi_model = false;
        let mut hetero_records = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match record_name(&line) {
                "MODEL" => {
                    multi_model = true;
                    if let Some(model) = current.take().and_then(ModelReader::finish) {
                        models.push(model);
                    }
                    current = Some(ModelReader::new());
                }
                "ENDMDL" => {
                    if let Some(model) = current.take().and_then(ModelReader::finish) {
                        models.push(model);
                    }
                }
                "ATOM" => {
                    if !is_primary_location(&line) {
                        continue;
                    }
                    let record = parse_atom_record(&line, line_num)?;
                    current
                        .get_or_insert_with(ModelReader::new)
                        .push(&record, line_num)?;
                }
                "HETATM" => hetero_records += 1,
                "END" if !multi_model => break,
                _ => {}
            }
        }

        if let Some(model) = current.take().and_then(ModelReader::finish) {
            models.push(model);
        }
        if hetero_records > 0 {
            debug!(hetero_records, "Skipped HETATM records.");
        }
        if models.is_empty() {
            return Err(PdbError::MissingRecord("ATOM records".into()));
        }
        Ok(models)
    }
}
