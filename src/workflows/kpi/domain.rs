use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for agents as issued by the data store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for scoring cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(pub String);

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Roster entry. Agents on the roster are scored even without any activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub id: AgentId,
    pub name: String,
}

/// One agent's activity for one day, as entered by an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawActivityRecord {
    pub agent_id: AgentId,
    pub cycle_id: CycleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub messages_received: u32,
    pub calls_done: u32,
    pub closings: u32,
    pub avg_response_time_minutes: f64,
}

/// A vetted prospect. Only its existence counts towards scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedLeadRecord {
    pub agent_id: AgentId,
    pub cycle_id: CycleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_collected: Option<NaiveDate>,
    #[serde(default = "default_lead_status")]
    pub status: String,
}

pub(crate) fn default_lead_status() -> String {
    "Qualified".to_string()
}

/// Per-agent totals and derived rates for a single cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAggregate {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub total_messages: u64,
    pub total_calls: u64,
    pub total_closings: u64,
    /// Mean of the agent's own daily response times, 0 without records.
    pub mean_response_time: f64,
    pub qualified_leads_count: u64,
    pub closing_rate: f64,
    pub call_conversion: f64,
    pub qualified_leads_rate: f64,
}

impl AgentAggregate {
    pub fn empty(agent: &AgentIdentity) -> Self {
        Self {
            agent_id: agent.id.clone(),
            agent_name: agent.name.clone(),
            total_messages: 0,
            total_calls: 0,
            total_closings: 0,
            mean_response_time: 0.0,
            qualified_leads_count: 0,
            closing_rate: 0.0,
            call_conversion: 0.0,
            qualified_leads_rate: 0.0,
        }
    }
}

/// Authenticated role tag supplied by the session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Agent,
}

/// Identity the scoreboard is being rendered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub role: Role,
    pub agent_id: AgentId,
}

impl Viewer {
    pub fn admin(agent_id: impl Into<String>) -> Self {
        Self {
            role: Role::Admin,
            agent_id: AgentId(agent_id.into()),
        }
    }

    pub fn agent(agent_id: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            agent_id: AgentId(agent_id.into()),
        }
    }

    pub fn can_see(&self, agent_id: &AgentId) -> bool {
        self.role == Role::Admin || &self.agent_id == agent_id
    }
}
