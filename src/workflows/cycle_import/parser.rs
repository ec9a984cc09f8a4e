use crate::workflows::kpi::domain::{
    default_lead_status, AgentId, AgentIdentity, CycleId, QualifiedLeadRecord, RawActivityRecord,
};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::CycleImportError;

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source)
}

pub(crate) fn parse_roster<R: Read>(source: R) -> Result<Vec<AgentIdentity>, CycleImportError> {
    let mut csv_reader = reader(source);
    let mut roster = Vec::new();

    for row in csv_reader.deserialize::<RosterRow>() {
        let row = row?;
        roster.push(AgentIdentity {
            id: AgentId(clean_identifier(&row.agent_id)),
            name: row.name,
        });
    }

    Ok(roster)
}

pub(crate) fn parse_activity<R: Read>(
    source: R,
) -> Result<Vec<RawActivityRecord>, CycleImportError> {
    let mut csv_reader = reader(source);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<ActivityRow>().enumerate() {
        let row = row?;
        // header occupies line 1
        let line = index + 2;

        if !row.avg_response_time.is_finite() || row.avg_response_time < 0.0 {
            return Err(CycleImportError::InvalidValue {
                line,
                field: "Avg Response Time",
                value: row.avg_response_time.to_string(),
            });
        }

        let date = match row.date.as_deref() {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| CycleImportError::InvalidValue {
                line,
                field: "Date",
                value: raw.to_string(),
            })?),
            None => None,
        };

        records.push(RawActivityRecord {
            agent_id: AgentId(clean_identifier(&row.agent_id)),
            cycle_id: CycleId(clean_identifier(&row.cycle_id)),
            date,
            messages_received: row.messages_received,
            calls_done: row.calls_done,
            closings: row.closings,
            avg_response_time_minutes: row.avg_response_time,
        });
    }

    Ok(records)
}

pub(crate) fn parse_leads<R: Read>(
    source: R,
) -> Result<Vec<QualifiedLeadRecord>, CycleImportError> {
    let mut csv_reader = reader(source);
    let mut leads = Vec::new();

    for (index, row) in csv_reader.deserialize::<LeadRow>().enumerate() {
        let row = row?;
        let line = index + 2;

        let date_collected = match row.date_collected.as_deref() {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| CycleImportError::InvalidValue {
                line,
                field: "Date Collected",
                value: raw.to_string(),
            })?),
            None => None,
        };

        leads.push(QualifiedLeadRecord {
            agent_id: AgentId(clean_identifier(&row.agent_id)),
            cycle_id: CycleId(clean_identifier(&row.cycle_id)),
            lead_name: row.lead_name,
            date_collected,
            status: row.status.unwrap_or_else(default_lead_status),
        });
    }

    Ok(leads)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Agent ID")]
    agent_id: String,
    #[serde(rename = "Name")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ActivityRow {
    #[serde(rename = "Agent ID")]
    agent_id: String,
    #[serde(rename = "Cycle ID")]
    cycle_id: String,
    #[serde(rename = "Date", default, deserialize_with = "empty_string_as_none")]
    date: Option<String>,
    #[serde(rename = "Messages Received")]
    messages_received: u32,
    #[serde(rename = "Calls Done")]
    calls_done: u32,
    #[serde(rename = "Closings")]
    closings: u32,
    #[serde(rename = "Avg Response Time")]
    avg_response_time: f64,
}

#[derive(Debug, Deserialize)]
struct LeadRow {
    #[serde(rename = "Agent ID")]
    agent_id: String,
    #[serde(rename = "Cycle ID")]
    cycle_id: String,
    #[serde(
        rename = "Lead Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    lead_name: Option<String>,
    #[serde(
        rename = "Date Collected",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    date_collected: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Store exports sometimes carry a byte-order mark or zero-width spaces.
fn clean_identifier(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
