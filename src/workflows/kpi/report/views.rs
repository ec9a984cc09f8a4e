use super::super::domain::{AgentAggregate, CycleId};
use super::super::ranking::RankedScore;
use super::super::scoring::{round_tenths, KpiScore};
use super::summary::TeamTotals;
use serde::Serialize;

/// Upper bound of the radar chart axis.
const RADAR_CEILING: f64 = 100.0;

/// Performance table row with rates expressed as percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRow {
    pub agent_name: String,
    pub total_messages: u64,
    pub total_calls: u64,
    pub total_closings: u64,
    pub closing_rate_pct: f64,
    pub call_conversion_pct: f64,
    pub mean_response_time: f64,
    pub qualified_leads_count: u64,
}

impl PerformanceRow {
    pub fn from_aggregate(aggregate: &AgentAggregate) -> Self {
        Self {
            agent_name: aggregate.agent_name.clone(),
            total_messages: aggregate.total_messages,
            total_calls: aggregate.total_calls,
            total_closings: aggregate.total_closings,
            closing_rate_pct: round_tenths(aggregate.closing_rate * 100.0),
            call_conversion_pct: round_tenths(aggregate.call_conversion * 100.0),
            mean_response_time: round_tenths(aggregate.mean_response_time),
            qualified_leads_count: aggregate.qualified_leads_count,
        }
    }
}

/// Sub-scores capped at 100 for charting. The underlying score is unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarView {
    pub agent_name: String,
    pub closing: f64,
    pub call_conversion: f64,
    pub response_time: f64,
    pub qualified_leads: f64,
}

impl RadarView {
    pub fn from_score(score: &KpiScore) -> Self {
        Self {
            agent_name: score.agent_name.clone(),
            closing: score.closing_score.min(RADAR_CEILING),
            call_conversion: score.call_conv_score.min(RADAR_CEILING),
            response_time: score.response_score.min(RADAR_CEILING),
            qualified_leads: score.qual_leads_score.min(RADAR_CEILING),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreboardSummary {
    pub cycle_id: CycleId,
    pub totals: TeamTotals,
    pub performance: Vec<PerformanceRow>,
    pub radar: Vec<RadarView>,
    pub rankings: Vec<RankedScore>,
}
