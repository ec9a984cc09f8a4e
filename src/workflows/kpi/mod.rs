//! Weighted KPI scoring for sales agents.
//!
//! A scoring run aggregates one cycle's raw activity and qualified leads per
//! roster agent, normalizes the resulting rates against the cycle targets,
//! combines them with the cycle weights and ranks agents by total score. Runs
//! are pure: the caller fetches records beforehand and re-runs after any edit.

mod aggregate;
mod config;
pub mod domain;
mod history;
mod ranking;
pub mod report;
pub mod router;
mod scoring;

#[cfg(test)]
mod tests;

pub use aggregate::aggregate_cycle;
pub use config::{KpiConfig, ScoringError, TargetConfig, WeightConfig};
pub use domain::{
    AgentAggregate, AgentId, AgentIdentity, CycleId, QualifiedLeadRecord, RawActivityRecord, Role,
    Viewer,
};
pub use history::ConfigHistory;
pub use ranking::{rank_scores, RankedScore, RankingPolicy};
pub use report::{AgentScorecard, Scoreboard, TeamTotals};
pub use router::scoreboard_router;
pub use scoring::{calculate_scores, KpiScore};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the data store hands over for one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleInputs {
    pub cycle_id: CycleId,
    pub roster: Vec<AgentIdentity>,
    #[serde(default)]
    pub activity: Vec<RawActivityRecord>,
    #[serde(default)]
    pub leads: Vec<QualifiedLeadRecord>,
}

impl CycleInputs {
    /// Response times must be non-negative, whichever intake produced the records.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let invalid = self.activity.iter().find(|record| {
            let minutes = record.avg_response_time_minutes;
            !minutes.is_finite() || minutes < 0.0
        });

        match invalid {
            Some(record) => Err(ScoringError::InvalidResponseTime {
                agent_id: record.agent_id.to_string(),
                value: record.avg_response_time_minutes,
            }),
            None => Ok(()),
        }
    }
}

/// Stateless engine applying one cycle's configuration to its inputs.
#[derive(Debug, Clone)]
pub struct KpiEngine {
    config: KpiConfig,
    policy: RankingPolicy,
}

impl KpiEngine {
    pub fn new(config: KpiConfig) -> Self {
        Self {
            config,
            policy: RankingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RankingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &KpiConfig {
        &self.config
    }

    pub fn evaluate(&self, inputs: &CycleInputs) -> Result<Scoreboard, ScoringError> {
        self.config.validate()?;
        inputs.validate()?;

        let aggregates = aggregate_cycle(
            &inputs.cycle_id,
            &inputs.roster,
            &inputs.activity,
            &inputs.leads,
        );
        let scores = calculate_scores(&aggregates, &self.config);
        let rankings = rank_scores(scores.clone(), self.policy);

        debug!(
            cycle_id = %inputs.cycle_id,
            agents = aggregates.len(),
            activity_records = inputs.activity.len(),
            lead_records = inputs.leads.len(),
            "kpi scoreboard computed"
        );

        Ok(Scoreboard {
            cycle_id: inputs.cycle_id.clone(),
            ranking_policy: self.policy,
            aggregates,
            scores,
            rankings,
        })
    }
}
