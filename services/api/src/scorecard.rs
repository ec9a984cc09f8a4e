use clap::Args;
use sales_kpi::config::AppConfig;
use sales_kpi::error::AppError;
use sales_kpi::workflows::cycle_import::CycleImporter;
use sales_kpi::workflows::kpi::{AgentId, CycleId, KpiEngine, RankingPolicy, Viewer};
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Cycle identifier as it appears in the activity and lead exports
    #[arg(long)]
    pub(crate) cycle: String,
    /// Roster CSV export (Agent ID, Name)
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Daily activity CSV export
    #[arg(long)]
    pub(crate) activity: PathBuf,
    /// Qualified leads CSV export
    #[arg(long)]
    pub(crate) leads: PathBuf,
    /// Give equal totals the same rank instead of ordering them by roster position
    #[arg(long)]
    pub(crate) competition: bool,
    /// Print only this agent's scorecard
    #[arg(long)]
    pub(crate) agent: Option<String>,
    /// Print the display summary (totals, percentages, capped radar values)
    #[arg(long, conflicts_with = "agent")]
    pub(crate) summary: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let inputs = CycleImporter::from_paths(
        CycleId(args.cycle),
        args.roster,
        args.activity,
        args.leads,
    )?;

    let policy = if args.competition {
        RankingPolicy::Competition
    } else {
        RankingPolicy::Sequential
    };
    let board = KpiEngine::new(config.scoring)
        .with_policy(policy)
        .evaluate(&inputs)?;

    let rendered = match args.agent {
        Some(agent_id) => {
            let agent_id = AgentId(agent_id);
            let card = board
                .visible_to(&Viewer::agent(agent_id.0.clone()))
                .scorecard(&agent_id)
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("agent {agent_id} is not on the roster"),
                    )
                })?;
            serde_json::to_string_pretty(&card)
        }
        None if args.summary => serde_json::to_string_pretty(&board.summary()),
        None => serde_json::to_string_pretty(&board),
    }
    .map_err(io::Error::from)?;

    println!("{rendered}");
    Ok(())
}
