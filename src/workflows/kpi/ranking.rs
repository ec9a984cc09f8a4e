use super::scoring::KpiScore;
use serde::{Deserialize, Serialize};

/// How equal total scores are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingPolicy {
    /// Ranks are consecutive positions; ties keep their input order.
    #[default]
    Sequential,
    /// Equal totals share a rank and the next rank skips ("1, 1, 3").
    Competition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedScore {
    pub rank: u32,
    #[serde(flatten)]
    pub score: KpiScore,
}

/// Sorts descending by total score with a stable sort and assigns 1-based ranks.
pub fn rank_scores(scores: Vec<KpiScore>, policy: RankingPolicy) -> Vec<RankedScore> {
    let mut sorted = scores;
    sorted.sort_by(|left, right| right.total_score.total_cmp(&left.total_score));

    let mut ranked: Vec<RankedScore> = Vec::with_capacity(sorted.len());
    for (index, score) in sorted.into_iter().enumerate() {
        let position = index as u32 + 1;
        let rank = match (policy, ranked.last()) {
            (RankingPolicy::Competition, Some(previous))
                if previous.score.total_score == score.total_score =>
            {
                previous.rank
            }
            _ => position,
        };
        ranked.push(RankedScore { rank, score });
    }

    ranked
}
