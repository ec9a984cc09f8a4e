//! CSV intake for roster, daily activity and qualified lead exports.

mod parser;

use crate::workflows::kpi::domain::{
    AgentIdentity, CycleId, QualifiedLeadRecord, RawActivityRecord,
};
use crate::workflows::kpi::CycleInputs;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CycleImportError {
    #[error("failed to read cycle export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid cycle CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: invalid {field} '{value}'")]
    InvalidValue {
        line: usize,
        field: &'static str,
        value: String,
    },
}

pub struct CycleImporter;

impl CycleImporter {
    pub fn roster_from_reader<R: Read>(reader: R) -> Result<Vec<AgentIdentity>, CycleImportError> {
        parser::parse_roster(reader)
    }

    pub fn activity_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<RawActivityRecord>, CycleImportError> {
        parser::parse_activity(reader)
    }

    pub fn leads_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<QualifiedLeadRecord>, CycleImportError> {
        parser::parse_leads(reader)
    }

    /// Loads the three exports for a scoring run. Records from other cycles are
    /// kept; the aggregator filters by `cycle_id`.
    pub fn from_paths<P: AsRef<Path>>(
        cycle_id: CycleId,
        roster: P,
        activity: P,
        leads: P,
    ) -> Result<CycleInputs, CycleImportError> {
        let roster = Self::roster_from_reader(std::fs::File::open(roster)?)?;
        let activity = Self::activity_from_reader(std::fs::File::open(activity)?)?;
        let leads = Self::leads_from_reader(std::fs::File::open(leads)?)?;

        Ok(CycleInputs {
            cycle_id,
            roster,
            activity,
            leads,
        })
    }
}
