use crate::engine::error::EcoError;
use crate::engine::report::PathwayReport;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One row of a pathway summary CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRecord {
    pub name: String,
    pub total_eco: usize,
    pub min_eco_contacts: String,
}

impl SummaryRecord {
    pub fn from_report(name: impl Into<String>, report: &PathwayReport) -> Self {
        Self {
            name: name.into(),
            total_eco: report.total_eco,
            min_eco_contacts: report.contacts_literal(),
        }
    }
}

/// Writes records under a `name,total_eco,min_eco_contacts` header.
pub fn write_records<W: Write>(writer: W, records: &[SummaryRecord]) -> Result<(), EcoError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if records.is_empty() {
        csv_writer.write_record(["name", "total_eco", "min_eco_contacts"])?;
    }
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer
        .flush()
        .map_err(|e| EcoError::Csv(csv::Error::from(e)))?;
    Ok(())
}

pub fn write_summary(path: &Path, records: &[SummaryRecord]) -> Result<(), EcoError> {
    let file = std::fs::File::create(path).map_err(|e| EcoError::io(path, e))?;
    write_records(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::report::{LabeledContact, PathwayStep};

    fn render(records: &[SummaryRecord]) -> String {
        let mut buffer = Vec::new();
        write_records(&mut buffer, records).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn empty_summary_still_has_a_header() {
        assert_eq!(render(&[]), "name,total_eco,min_eco_contacts\n");
    }

    #[test]
    fn contact_lists_are_quoted_as_one_field() {
        let report = PathwayReport {
            total_eco: 3,
            steps: vec![PathwayStep {
                cluster_id: 0,
                min_eco: 3,
                contacts: vec![
                    LabeledContact {
                        first: "A:ALA:5".to_string(),
                        second: "A:ALA:8".to_string(),
                        eco: 3,
                    },
                    LabeledContact {
                        first: "A:ALA:4".to_string(),
                        second: "A:ALA:9".to_string(),
                        eco: 5,
                    },
                ],
            }],
        };
        let record = SummaryRecord::from_report("pathway_1.pdb_pathway_3.pdb", &report);
        assert_eq!(
            render(&[record]),
            "name,total_eco,min_eco_contacts\n\
             pathway_1.pdb_pathway_3.pdb,3,\"[[['A:ALA:5', 'A:ALA:8'], ['A:ALA:4', 'A:ALA:9']]]\"\n"
        );
    }

    #[test]
    fn summary_is_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let records = vec![SummaryRecord {
            name: "sys".to_string(),
            total_eco: 12,
            min_eco_contacts: "[]".to_string(),
        }];
        write_summary(&path, &records).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "name,total_eco,min_eco_contacts\nsys,12,[]\n");
    }
}
