use super::error::EcoError;
use super::formation::Formation;
use crate::core::graph::contact::ContactGraph;
use serde::Serialize;
use std::io::{BufRead, Write};

const CLUSTER_HEADER: &str = "formed cluster";
const TOTAL_PREFIX: &str = "total ECO for this pathway:";
const BY_CLUSTER_PREFIX: &str = "the minECO pathway (by cluster):";
const BY_CONTACT_PREFIX: &str = "the minECO pathway (by contact):";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledContact {
    pub first: String,
    pub second: String,
    pub eco: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathwayStep {
    pub cluster_id: usize,
    pub min_eco: usize,
    pub contacts: Vec<LabeledContact>,
}

/// The minimum-ECO pathway of one structure pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PathwayReport {
    pub total_eco: usize,
    pub steps: Vec<PathwayStep>,
}

impl PathwayReport {
    /// Labels each formed contact with the residue names found in `labels`.
    pub fn from_formation(formation: &Formation, labels: &ContactGraph) -> Self {
        let steps = formation
            .steps
            .iter()
            .map(|step| PathwayStep {
                cluster_id: step.cluster_id,
                min_eco: step.min_eco,
                contacts: step
                    .contacts
                    .iter()
                    .map(|c| LabeledContact {
                        first: labels.label(c.contact.first),
                        second: labels.label(c.contact.second),
                        eco: c.eco,
                    })
                    .collect(),
            })
            .collect();
        Self {
            total_eco: formation.total_eco,
            steps,
        }
    }

    /// Cluster ids in formation order.
    pub fn cluster_order(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.cluster_id).collect()
    }

    /// Label pairs of every formed contact, grouped by step.
    pub fn contact_pathway(&self) -> Vec<Vec<(&str, &str)>> {
        self.steps
            .iter()
            .map(|s| {
                s.contacts
                    .iter()
                    .map(|c| (c.first.as_str(), c.second.as_str()))
                    .collect()
            })
            .collect()
    }

    /// The contact pathway as a nested list literal, e.g.
    /// `[[['A:ALA:10', 'A:LEU:50']], [['A:GLY:3', 'A:SER:9']]]`.
    pub fn contacts_literal(&self) -> String {
        let steps: Vec<String> = self
            .contact_pathway()
            .iter()
            .map(|pairs| {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(a, b)| format!("['{a}', '{b}']"))
                    .collect();
                format!("[{}]", pairs.join(", "))
            })
            .collect();
        format!("[{}]", steps.join(", "))
    }

    pub fn clusters_literal(&self) -> String {
        let ids: Vec<String> = self.cluster_order().iter().map(|id| id.to_string()).collect();
        format!("[{}]", ids.join(", "))
    }
}

/// The two summary lines of a pathway log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSummary {
    pub total_eco: usize,
    /// The by-contact line's value, kept verbatim.
    pub min_eco_contacts: String,
}

/// Text rendering of a [`PathwayReport`].
///
/// ```text
/// formed cluster 3 with contacts
/// A:ALA:10 A:LEU:50 4
/// total ECO for this pathway:4
/// the minECO pathway (by cluster):[3]
/// the minECO pathway (by contact):[[['A:ALA:10', 'A:LEU:50']]]
/// ```
///
/// Each `formed cluster` header line ends with a single trailing space.
pub struct PathwayLog;

impl PathwayLog {
    pub fn write_to(report: &PathwayReport, writer: &mut impl Write) -> std::io::Result<()> {
        for step in &report.steps {
            writeln!(writer, "{CLUSTER_HEADER} {} with contacts ", step.cluster_id)?;
            for c in &step.contacts {
                writeln!(writer, "{} {} {}", c.first, c.second, c.eco)?;
            }
        }
        writeln!(writer, "{TOTAL_PREFIX}{}", report.total_eco)?;
        writeln!(writer, "{BY_CLUSTER_PREFIX}{}", report.clusters_literal())?;
        writeln!(writer, "{BY_CONTACT_PREFIX}{}", report.contacts_literal())?;
        Ok(())
    }

    pub fn render(report: &PathwayReport) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = Self::write_to(report, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Reads the total ECO and the by-contact pathway back from a log.
    ///
    /// When a line occurs more than once the last occurrence wins.
    pub fn read_summary(reader: impl BufRead) -> Result<LogSummary, EcoError> {
        let mut total = None;
        let mut contacts = None;
        let mut line_count = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| EcoError::LogFormat {
                line: index + 1,
                message: e.to_string(),
            })?;
            line_count = index + 1;
            if let Some(value) = line.strip_prefix(TOTAL_PREFIX) {
                let value = value.trim();
                let parsed = value.parse::<usize>().map_err(|_| EcoError::LogFormat {
                    line: index + 1,
                    message: format!("total ECO '{value}' is not a non-negative integer"),
                })?;
                total = Some(parsed);
            } else if let Some(value) = line.strip_prefix(BY_CONTACT_PREFIX) {
                contacts = Some(value.trim().to_string());
            }
        }

        match (total, contacts) {
            (Some(total_eco), Some(min_eco_contacts)) => Ok(LogSummary {
                total_eco,
                min_eco_contacts,
            }),
            (None, _) => Err(EcoError::LogFormat {
                line: line_count,
                message: format!("no '{TOTAL_PREFIX}' line"),
            }),
            (_, None) => Err(EcoError::LogFormat {
                line: line_count,
                message: format!("no '{BY_CONTACT_PREFIX}' line"),
            }),
        }
    }
}
