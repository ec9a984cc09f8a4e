mod summary;
pub mod views;

pub use summary::{AgentScorecard, Scoreboard, TeamTotals};
