use crate::workflows::kpi::domain::{
    AgentAggregate, AgentId, AgentIdentity, CycleId, QualifiedLeadRecord, RawActivityRecord,
};
use crate::workflows::kpi::{CycleInputs, KpiScore};

pub(super) const CYCLE: &str = "2025-01";

pub(super) fn cycle_id() -> CycleId {
    CycleId(CYCLE.to_string())
}

pub(super) fn agent(id: &str, name: &str) -> AgentIdentity {
    AgentIdentity {
        id: AgentId(id.to_string()),
        name: name.to_string(),
    }
}

pub(super) fn roster() -> Vec<AgentIdentity> {
    vec![
        agent("agent-rahma", "Rahma"),
        agent("agent-yomna", "Yomna"),
        agent("agent-menna", "Menna"),
    ]
}

pub(super) fn activity(
    agent_id: &str,
    messages: u32,
    calls: u32,
    closings: u32,
    response_minutes: f64,
) -> RawActivityRecord {
    RawActivityRecord {
        agent_id: AgentId(agent_id.to_string()),
        cycle_id: cycle_id(),
        date: None,
        messages_received: messages,
        calls_done: calls,
        closings,
        avg_response_time_minutes: response_minutes,
    }
}

pub(super) fn lead(agent_id: &str) -> QualifiedLeadRecord {
    QualifiedLeadRecord {
        agent_id: AgentId(agent_id.to_string()),
        cycle_id: cycle_id(),
        lead_name: Some(format!("Lead for {agent_id}")),
        date_collected: None,
        status: "Qualified".to_string(),
    }
}

pub(super) fn inputs() -> CycleInputs {
    CycleInputs {
        cycle_id: cycle_id(),
        roster: roster(),
        activity: vec![
            activity("agent-rahma", 10, 5, 2, 2.0),
            activity("agent-rahma", 20, 8, 3, 4.0),
            activity("agent-yomna", 40, 28, 3, 6.0),
            activity("agent-menna", 25, 10, 1, 12.0),
        ],
        leads: vec![
            lead("agent-rahma"),
            lead("agent-rahma"),
            lead("agent-yomna"),
        ],
    }
}

pub(super) fn aggregate_with_response(name: &str, mean_response_time: f64) -> AgentAggregate {
    let mut aggregate = AgentAggregate::empty(&agent(&name.to_lowercase(), name));
    aggregate.mean_response_time = mean_response_time;
    aggregate
}

pub(super) fn score(name: &str, total: f64) -> KpiScore {
    KpiScore {
        agent_id: AgentId(name.to_lowercase()),
        agent_name: name.to_string(),
        closing_score: 0.0,
        call_conv_score: 0.0,
        response_score: 0.0,
        qual_leads_score: 0.0,
        total_score: total,
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
