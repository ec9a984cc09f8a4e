use super::domain::{
    AgentAggregate, AgentId, AgentIdentity, CycleId, QualifiedLeadRecord, RawActivityRecord,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Default)]
struct Accumulator {
    messages: u64,
    calls: u64,
    closings: u64,
    response_time_sum: f64,
    records: u32,
    leads: u64,
}

/// Builds one aggregate per roster agent, in roster order, from the records
/// belonging to `cycle_id`. Records for agents missing from the roster are skipped,
/// and a repeated roster id yields a single aggregate at its first position.
pub fn aggregate_cycle(
    cycle_id: &CycleId,
    roster: &[AgentIdentity],
    activity: &[RawActivityRecord],
    leads: &[QualifiedLeadRecord],
) -> Vec<AgentAggregate> {
    let mut slots: HashMap<&AgentId, Accumulator> = roster
        .iter()
        .map(|agent| (&agent.id, Accumulator::default()))
        .collect();
    let mut skipped = 0usize;

    for record in activity.iter().filter(|record| &record.cycle_id == cycle_id) {
        match slots.get_mut(&record.agent_id) {
            Some(slot) => {
                slot.messages += u64::from(record.messages_received);
                slot.calls += u64::from(record.calls_done);
                slot.closings += u64::from(record.closings);
                slot.response_time_sum += record.avg_response_time_minutes;
                slot.records += 1;
            }
            None => skipped += 1,
        }
    }

    for lead in leads.iter().filter(|lead| &lead.cycle_id == cycle_id) {
        match slots.get_mut(&lead.agent_id) {
            Some(slot) => slot.leads += 1,
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(%cycle_id, skipped, "ignored records for agents outside the roster");
    }

    let mut emitted: HashSet<&AgentId> = HashSet::with_capacity(roster.len());
    roster
        .iter()
        .filter(|agent| emitted.insert(&agent.id))
        .map(|agent| {
            let mut aggregate = AgentAggregate::empty(agent);
            if let Some(slot) = slots.get(&agent.id) {
                apply(&mut aggregate, slot);
            }
            aggregate
        })
        .collect()
}

fn apply(aggregate: &mut AgentAggregate, slot: &Accumulator) {
    aggregate.total_messages = slot.messages;
    aggregate.total_calls = slot.calls;
    aggregate.total_closings = slot.closings;
    aggregate.qualified_leads_count = slot.leads;

    if slot.records > 0 {
        aggregate.mean_response_time = slot.response_time_sum / f64::from(slot.records);
    }

    if slot.messages > 0 {
        let messages = slot.messages as f64;
        aggregate.closing_rate = slot.closings as f64 / messages;
        aggregate.call_conversion = slot.calls as f64 / messages;
        aggregate.qualified_leads_rate = slot.leads as f64 / messages;
    }
}
