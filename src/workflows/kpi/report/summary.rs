use super::super::domain::{AgentAggregate, AgentId, CycleId, Viewer};
use super::super::ranking::{RankedScore, RankingPolicy};
use super::super::scoring::KpiScore;
use super::views::{PerformanceRow, RadarView, ScoreboardSummary};
use serde::{Deserialize, Serialize};

/// Result of one scoring run over a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub cycle_id: CycleId,
    pub ranking_policy: RankingPolicy,
    /// Roster order.
    pub aggregates: Vec<AgentAggregate>,
    /// Roster order, unranked.
    pub scores: Vec<KpiScore>,
    /// Descending by total score.
    pub rankings: Vec<RankedScore>,
}

/// Cycle-wide activity totals shown above the per-agent tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTotals {
    pub messages: u64,
    pub calls: u64,
    pub closings: u64,
    pub qualified_leads: u64,
}

/// Everything a single agent is allowed to see about their own cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentScorecard {
    pub cycle_id: CycleId,
    pub aggregate: AgentAggregate,
    pub ranked: RankedScore,
    pub radar: RadarView,
}

impl Scoreboard {
    pub fn team_totals(&self) -> TeamTotals {
        self.aggregates
            .iter()
            .fold(TeamTotals::default(), |totals, aggregate| TeamTotals {
                messages: totals.messages + aggregate.total_messages,
                calls: totals.calls + aggregate.total_calls,
                closings: totals.closings + aggregate.total_closings,
                qualified_leads: totals.qualified_leads + aggregate.qualified_leads_count,
            })
    }

    pub fn scorecard(&self, agent_id: &AgentId) -> Option<AgentScorecard> {
        let aggregate = self
            .aggregates
            .iter()
            .find(|aggregate| &aggregate.agent_id == agent_id)?;
        let ranked = self
            .rankings
            .iter()
            .find(|entry| &entry.score.agent_id == agent_id)?;

        Some(AgentScorecard {
            cycle_id: self.cycle_id.clone(),
            aggregate: aggregate.clone(),
            ranked: ranked.clone(),
            radar: RadarView::from_score(&ranked.score),
        })
    }

    /// Copy restricted to what `viewer` may see. Agents keep the rank they
    /// hold on the full board.
    pub fn visible_to(&self, viewer: &Viewer) -> Scoreboard {
        Scoreboard {
            cycle_id: self.cycle_id.clone(),
            ranking_policy: self.ranking_policy,
            aggregates: self
                .aggregates
                .iter()
                .filter(|aggregate| viewer.can_see(&aggregate.agent_id))
                .cloned()
                .collect(),
            scores: self
                .scores
                .iter()
                .filter(|score| viewer.can_see(&score.agent_id))
                .cloned()
                .collect(),
            rankings: self
                .rankings
                .iter()
                .filter(|entry| viewer.can_see(&entry.score.agent_id))
                .cloned()
                .collect(),
        }
    }

    pub fn summary(&self) -> ScoreboardSummary {
        ScoreboardSummary {
            cycle_id: self.cycle_id.clone(),
            totals: self.team_totals(),
            performance: self.aggregates.iter().map(PerformanceRow::from_aggregate).collect(),
            radar: self.scores.iter().map(RadarView::from_score).collect(),
            rankings: self.rankings.clone(),
        }
    }
}
