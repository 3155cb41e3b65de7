//! IPL strategist core crate.
//!
//! - `oracle`: deterministic "historical" meeting results
//! - `blender`: form-based win probability and the session points table
//! - `insights`: matchup analysis and the match-day report
//! - `dashboard`: HTTP presentation layer over the above

mod blender;
mod config;
mod dashboard;
mod insights;
mod lineage;
mod observability;
mod oracle;
mod standings;
mod teams;

pub use blender::{
    blend_probability, predict, FormBar, PredictError, Prediction, BASE_PROBABILITY,
    FORM_WEIGHT, HOME_BONUS, MAX_PROBABILITY, MIN_PROBABILITY,
};
pub use config::{app_config_from_env, logging_config_from_env, AppConfig, DEFAULT_DASHBOARD_ADDR};
pub use dashboard::{
    dashboard_router, render_dashboard_html, render_standings_rows, run_history, run_prediction,
    DashboardError, ErrorBody, HistoryQuery, InsightsQuery, PredictRequest, PredictResponse,
    SessionStandings, StandingsResponse, STANDINGS_HEADERS,
};
pub use insights::{
    head_to_head, match_report, matchup_insights, HeadToHead, InsightError, MatchReport,
    MatchSetup, MatchTime, MatchupInsights, PitchCondition, PlayerCard, ReportError, TossDecision,
};
pub use lineage::{name_in_season, seasons, SeasonName, FIRST_SEASON, LAST_SEASON};
pub use observability::{
    init_logging, log_app_bind, log_app_start, log_session_ready, LogFormat, LoggingConfig,
    LoggingInitError,
};
pub use oracle::{historical, HistoricalOutcome, HistoricalResult, Margin, MatchInstance, Side};
pub use standings::{Standings, StandingsEntry, StandingsRow, POINTS_PER_WIN};
pub use teams::{parse_team_selection, Team, TeamId, TeamParseError, TeamRegistry, ALL_TEAMS};
