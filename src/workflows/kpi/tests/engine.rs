use super::common::*;
use crate::workflows::kpi::domain::{AgentAggregate, AgentId};
use crate::workflows::kpi::scoring::best_response_time;
use crate::workflows::kpi::{
    aggregate_cycle, calculate_scores, rank_scores, KpiConfig, KpiEngine, RankingPolicy,
    ScoringError,
};

#[test]
fn aggregation_sums_records_and_derives_rates() {
    let board = KpiEngine::new(KpiConfig::default())
        .evaluate(&inputs())
        .expect("scoreboard builds");

    let rahma = &board.aggregates[0];
    assert_eq!(rahma.agent_name, "Rahma");
    assert_eq!(rahma.total_messages, 30);
    assert_eq!(rahma.total_calls, 13);
    assert_eq!(rahma.total_closings, 5);
    assert_eq!(rahma.qualified_leads_count, 2);
    assert_close(rahma.mean_response_time, 3.0);
    assert_close(rahma.closing_rate, 5.0 / 30.0);
    assert_close(rahma.call_conversion, 13.0 / 30.0);
    assert_close(rahma.qualified_leads_rate, 2.0 / 30.0);
}

#[test]
fn roster_agents_without_records_get_zero_aggregates() {
    let mut cycle = inputs();
    cycle.roster.push(agent("agent-new", "Nour"));

    let board = KpiEngine::new(KpiConfig::default())
        .evaluate(&cycle)
        .expect("scoreboard builds");

    let nour = board.aggregates.last().expect("new agent aggregated");
    assert_eq!(nour.agent_id, AgentId("agent-new".to_string()));
    assert_eq!(nour, &AgentAggregate::empty(&agent("agent-new", "Nour")));

    let score = board.scores.last().expect("new agent scored");
    assert_eq!(score.total_score, 0.0);
    assert_eq!(board.rankings.last().map(|entry| entry.rank), Some(4));
}

#[test]
fn zero_messages_yield_zero_rates() {
    let roster = vec![agent("quiet", "Quiet")];
    let activity = vec![activity("quiet", 0, 3, 1, 5.0)];
    let leads = vec![lead("quiet")];

    let aggregates = aggregate_cycle(&cycle_id(), &roster, &activity, &leads);

    assert_eq!(aggregates[0].qualified_leads_count, 1);
    assert_eq!(aggregates[0].closing_rate, 0.0);
    assert_eq!(aggregates[0].call_conversion, 0.0);
    assert_eq!(aggregates[0].qualified_leads_rate, 0.0);
}

#[test]
fn fastest_responder_scores_one_hundred_and_peers_scale_down() {
    let aggregates = vec![
        aggregate_with_response("Rahma", 2.0),
        aggregate_with_response("Yomna", 4.0),
        aggregate_with_response("Menna", 8.0),
    ];

    let scores = calculate_scores(&aggregates, &KpiConfig::default());

    let responses: Vec<f64> = scores.iter().map(|score| score.response_score).collect();
    assert_eq!(responses, [100.0, 50.0, 25.0]);
}

#[test]
fn missing_response_times_fall_back_without_dividing_by_zero() {
    let aggregates = vec![
        aggregate_with_response("Rahma", 0.0),
        aggregate_with_response("Yomna", 0.0),
    ];

    assert_eq!(best_response_time(&aggregates), 1.0);
    let scores = calculate_scores(&aggregates, &KpiConfig::default());
    assert!(scores.iter().all(|score| score.response_score == 0.0));
    assert!(scores.iter().all(|score| score.total_score == 0.0));
}

#[test]
fn agent_without_response_time_is_excluded_from_best() {
    let aggregates = vec![
        aggregate_with_response("Rahma", 0.0),
        aggregate_with_response("Yomna", 5.0),
    ];

    let scores = calculate_scores(&aggregates, &KpiConfig::default());
    assert_eq!(scores[0].response_score, 0.0);
    assert_eq!(scores[1].response_score, 100.0);
}

#[test]
fn total_is_weighted_sum_of_sub_scores() {
    let mut aggregate = aggregate_with_response("Rahma", 2.0);
    aggregate.closing_rate = 0.075;
    aggregate.call_conversion = 0.56;
    aggregate.qualified_leads_rate = 0.45;

    let scores = calculate_scores(&[aggregate], &KpiConfig::default());

    let score = &scores[0];
    assert_eq!(score.closing_score, 50.0);
    assert_eq!(score.call_conv_score, 80.0);
    assert_eq!(score.response_score, 100.0);
    assert_eq!(score.qual_leads_score, 60.0);
    assert_eq!(score.total_score, 68.0);
}

#[test]
fn unnormalized_weights_scale_total_without_rescaling() {
    let mut aggregate = aggregate_with_response("Rahma", 2.0);
    aggregate.closing_rate = 0.075;
    aggregate.call_conversion = 0.56;
    aggregate.qualified_leads_rate = 0.45;

    let mut config = KpiConfig::default();
    config.weights.closing_rate = 0.8;
    config.weights.call_conversion = 0.6;
    config.weights.response_time = 0.3;
    config.weights.qualified_leads = 0.3;

    let scores = calculate_scores(&[aggregate], &config);
    assert_eq!(scores[0].total_score, 136.0);
}

#[test]
fn scores_above_target_are_not_clamped() {
    let mut aggregate = aggregate_with_response("Rahma", 2.0);
    aggregate.closing_rate = 0.30;
    aggregate.call_conversion = 1.4;

    let scores = calculate_scores(&[aggregate], &KpiConfig::default());

    assert_eq!(scores[0].closing_score, 200.0);
    assert_eq!(scores[0].call_conv_score, 200.0);
}

#[test]
fn ties_keep_input_order_with_distinct_ranks() {
    let ranked = rank_scores(
        vec![score("A", 68.0), score("B", 68.0), score("C", 90.0)],
        RankingPolicy::Sequential,
    );

    let view: Vec<_> = ranked
        .iter()
        .map(|entry| (entry.score.agent_name.as_str(), entry.rank, entry.score.total_score))
        .collect();
    assert_eq!(view, [("C", 1, 90.0), ("A", 2, 68.0), ("B", 3, 68.0)]);
}

#[test]
fn evaluation_is_deterministic() {
    let engine = KpiEngine::new(KpiConfig::default());
    let first = engine.evaluate(&inputs()).expect("first run");
    let second = engine.evaluate(&inputs()).expect("second run");

    assert_eq!(first, second);
    for (left, right) in first.scores.iter().zip(&second.scores) {
        assert_eq!(left.total_score.to_bits(), right.total_score.to_bits());
        assert_eq!(left.response_score.to_bits(), right.response_score.to_bits());
    }
}

#[test]
fn full_cycle_scores_and_ranks_agents() {
    let board = KpiEngine::new(KpiConfig::default())
        .evaluate(&inputs())
        .expect("scoreboard builds");

    let rahma = &board.scores[0];
    assert_eq!(rahma.closing_score, 111.1);
    assert_eq!(rahma.call_conv_score, 61.9);
    assert_eq!(rahma.response_score, 100.0);
    assert_eq!(rahma.qual_leads_score, 8.9);
    assert_eq!(rahma.total_score, 79.3);

    let yomna = &board.scores[1];
    assert_eq!(yomna.closing_score, 50.0);
    assert_eq!(yomna.call_conv_score, 100.0);
    assert_eq!(yomna.response_score, 50.0);
    assert_eq!(yomna.total_score, 58.0);

    let menna = &board.scores[2];
    assert_eq!(menna.response_score, 25.0);
    assert_eq!(menna.qual_leads_score, 0.0);
    assert_eq!(menna.total_score, 31.6);

    let order: Vec<_> = board
        .rankings
        .iter()
        .map(|entry| (entry.rank, entry.score.agent_name.as_str()))
        .collect();
    assert_eq!(order, [(1, "Rahma"), (2, "Yomna"), (3, "Menna")]);
}

#[test]
fn invalid_targets_are_rejected_before_scoring() {
    let mut config = KpiConfig::default();
    config.targets.qualified_leads = 0.0;

    let error = KpiEngine::new(config)
        .evaluate(&inputs())
        .expect_err("zero target rejected");

    assert_eq!(
        error,
        ScoringError::InvalidTarget {
            field: "qualified_leads",
            value: 0.0
        }
    );
}

#[test]
fn inputs_are_left_untouched() {
    let cycle = inputs();
    let snapshot = cycle.clone();
    KpiEngine::new(KpiConfig::default())
        .with_policy(RankingPolicy::Competition)
        .evaluate(&cycle)
        .expect("scoreboard builds");
    assert_eq!(cycle, snapshot);
}

#[test]
fn duplicated_roster_agent_is_scored_once() {
    let mut cycle = inputs();
    cycle.roster.push(agent("agent-rahma", "Rahma"));

    let board = KpiEngine::new(KpiConfig::default())
        .evaluate(&cycle)
        .expect("scoreboard builds");

    let order: Vec<_> = board
        .rankings
        .iter()
        .map(|ranked| (ranked.rank, ranked.score.agent_name.as_str()))
        .collect();
    assert_eq!(order, [(1, "Rahma"), (2, "Yomna"), (3, "Menna")]);

    let totals = board.team_totals();
    assert_eq!(totals.messages, 95);
    assert_eq!(totals.qualified_leads, 3);
}

#[test]
fn negative_response_time_is_rejected_before_scoring() {
    let mut cycle = inputs();
    cycle.activity[2].avg_response_time_minutes = -1.0;

    let error = KpiEngine::new(KpiConfig::default())
        .evaluate(&cycle)
        .expect_err("negative response time rejected");

    assert_eq!(
        error,
        ScoringError::InvalidResponseTime {
            agent_id: "agent-yomna".to_string(),
            value: -1.0
        }
    );
}
