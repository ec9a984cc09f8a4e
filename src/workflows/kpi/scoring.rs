use super::config::KpiConfig;
use super::domain::{AgentAggregate, AgentId};
use serde::{Deserialize, Serialize};

/// Used as the best response time when no agent has a positive mean.
const FALLBACK_BEST_RESPONSE_TIME: f64 = 1.0;

/// Normalized sub-scores and weighted total for one agent.
///
/// Sub-scores are not clamped: exceeding a target yields values above 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiScore {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub closing_score: f64,
    pub call_conv_score: f64,
    pub response_score: f64,
    pub qual_leads_score: f64,
    pub total_score: f64,
}

/// Lowest positive mean response time across all aggregates.
pub(crate) fn best_response_time(aggregates: &[AgentAggregate]) -> f64 {
    aggregates
        .iter()
        .map(|aggregate| aggregate.mean_response_time)
        .filter(|time| *time > 0.0)
        .min_by(f64::total_cmp)
        .unwrap_or(FALLBACK_BEST_RESPONSE_TIME)
}

/// Scores every aggregate, preserving input order.
///
/// Response time is scored relative to the fastest peer rather than a target.
/// The total is weighted from unrounded sub-scores; all five values are then
/// rounded to one decimal.
pub fn calculate_scores(aggregates: &[AgentAggregate], config: &KpiConfig) -> Vec<KpiScore> {
    let best_response = best_response_time(aggregates);
    let KpiConfig { weights, targets } = config;

    aggregates
        .iter()
        .map(|aggregate| {
            let closing_score = aggregate.closing_rate / targets.max_closing_rate * 100.0;
            let call_conv_score = aggregate.call_conversion / targets.call_conversion * 100.0;
            let response_score = if aggregate.mean_response_time > 0.0 {
                best_response / aggregate.mean_response_time * 100.0
            } else {
                0.0
            };
            let qual_leads_score = aggregate.qualified_leads_rate / targets.qualified_leads * 100.0;

            let total_score = closing_score * weights.closing_rate
                + call_conv_score * weights.call_conversion
                + response_score * weights.response_time
                + qual_leads_score * weights.qualified_leads;

            KpiScore {
                agent_id: aggregate.agent_id.clone(),
                agent_name: aggregate.agent_name.clone(),
                closing_score: round_tenths(closing_score),
                call_conv_score: round_tenths(call_conv_score),
                response_score: round_tenths(response_score),
                qual_leads_score: round_tenths(qual_leads_score),
                total_score: round_tenths(total_score),
            }
        })
        .collect()
}

/// Half-up rounding at the tenths digit.
pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}
