//! Strategist dashboard: HTML page and JSON API over the prediction core.

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::blender::{predict, PredictError, Prediction};
use crate::insights::{
    match_report, matchup_insights, InsightError, MatchReport, MatchSetup, MatchTime,
    MatchupInsights, PitchCondition, ReportError, TossDecision,
};
use crate::lineage::{seasons, FIRST_SEASON, LAST_SEASON};
use crate::oracle::{historical, HistoricalOutcome, MatchInstance};
use crate::standings::{Standings, StandingsEntry};
use crate::teams::{parse_team_selection, Team, TeamParseError, TeamRegistry};

pub const STANDINGS_HEADERS: [&str; 5] = ["Team", "Pld", "W", "L", "Pts"];

/// Points table for one dashboard session, shared across request handlers.
#[derive(Clone, Default)]
pub struct SessionStandings {
    inner: Arc<Mutex<Standings>>,
}

impl SessionStandings {
    pub fn new(standings: Standings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(standings)),
        }
    }

    /// Runs `f` with the table locked for its whole duration.
    pub fn with_table<R>(&self, f: impl FnOnce(&mut Standings) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    pub fn table(&self) -> Vec<StandingsEntry> {
        self.with_table(|standings| standings.table())
    }

    pub fn reset(&self) {
        self.with_table(|standings| *standings = Standings::new());
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Parse(#[from] TeamParseError),
    #[error("year {0} is outside the 2008-2025 seasons")]
    YearOutOfRange(i32),
    #[error("year is required")]
    MissingYear,
    #[error("malformed request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Insight(#[from] InsightError),
    #[error(transparent)]
    Predict(#[from] PredictError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl DashboardError {
    fn code(&self) -> &'static str {
        match self {
            DashboardError::Parse(_) => "invalid_input",
            DashboardError::YearOutOfRange(_) | DashboardError::MissingYear => "invalid_year",
            DashboardError::Insight(_) | DashboardError::Predict(_) => "invalid_selection",
            DashboardError::Report(_) => "incomplete_setup",
            DashboardError::BadRequest(_) => "bad_request",
        }
    }
}

impl From<QueryRejection> for DashboardError {
    fn from(rejection: QueryRejection) -> Self {
        DashboardError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for DashboardError {
    fn from(rejection: JsonRejection) -> Self {
        DashboardError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        warn!(
            component = "dashboard",
            event = "http.request.rejected",
            code = self.code(),
            message = %self
        );
        let body = ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightsQuery {
    pub home: Option<String>,
    pub away: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    pub year: Option<i32>,
    pub instance: Option<MatchInstance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub home: Option<String>,
    pub away: Option<String>,
    pub venue: String,
    pub toss_winner: Option<String>,
    #[serde(default)]
    pub toss_decision: TossDecision,
    pub pitch: PitchCondition,
    pub match_time: MatchTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub prediction: Prediction,
    pub report: MatchReport,
    pub standings: Vec<StandingsEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StandingsResponse {
    pub rows: Vec<StandingsEntry>,
}

#[derive(Clone)]
struct DashboardAppState {
    registry: Arc<TeamRegistry>,
    standings: SessionStandings,
}

pub fn dashboard_router(registry: Arc<TeamRegistry>, standings: SessionStandings) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard_html))
        .route("/api/teams", get(get_teams))
        .route("/api/insights", get(get_insights))
        .route("/api/history", get(get_history))
        .route("/api/predict", post(post_predict))
        .route("/api/standings", get(get_standings))
        .route("/api/standings/reset", post(post_standings_reset))
        .with_state(DashboardAppState {
            registry,
            standings,
        })
}

/// Validates the setup, predicts, and builds the report while holding the
/// session table, so a rejected request never records a match.
pub fn run_prediction(
    request: &PredictRequest,
    registry: &TeamRegistry,
    standings: &SessionStandings,
) -> Result<PredictResponse, DashboardError> {
    let home = parse_team_selection(request.home.as_deref())?;
    let away = parse_team_selection(request.away.as_deref())?;
    let venue = registry.parse_venue(&request.venue)?;
    let setup = MatchSetup {
        toss_winner: parse_team_selection(request.toss_winner.as_deref())?,
        toss_decision: request.toss_decision,
        pitch: request.pitch,
        match_time: request.match_time,
    };

    if let (Some(home), Some(away)) = (home, away) {
        if home != away {
            setup.validate(home, away)?;
        }
    }

    standings.with_table(|table| -> Result<PredictResponse, DashboardError> {
        let prediction = predict(home, away, venue, registry, table)?;
        let report = match_report(&prediction, &setup, registry)?;
        Ok(PredictResponse {
            prediction,
            report,
            standings: table.table(),
        })
    })
}

pub fn run_history(query: &HistoryQuery) -> Result<HistoricalOutcome, DashboardError> {
    let team_a = parse_team_selection(query.team_a.as_deref())?;
    let team_b = parse_team_selection(query.team_b.as_deref())?;
    let year = query.year.ok_or(DashboardError::MissingYear)?;
    if !(FIRST_SEASON..=LAST_SEASON).contains(&year) {
        return Err(DashboardError::YearOutOfRange(year));
    }
    let instance = query.instance.unwrap_or(MatchInstance::First);
    Ok(historical(team_a, team_b, year, instance))
}

pub fn render_dashboard_html(registry: &TeamRegistry, table: &[StandingsEntry]) -> String {
    let now_utc = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let mut out = String::new();
    out.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>IPL 2026 Strategist</title>\n");
    out.push_str("<style>:root{--bg:#0b0d17;--card:rgba(255,255,255,.05);--ink:#f2f4f8;--muted:#9aa3b5;--gold:#ffd700;--line:#232842}*{box-sizing:border-box}body{margin:0;background:var(--bg);color:var(--ink);font-family:\"Space Grotesk\",\"Segoe UI\",sans-serif}.shell{max-width:1200px;margin:0 auto;padding:24px 18px}.hero{background:linear-gradient(90deg,#1e3c72,#2a5298);padding:26px;border-radius:12px;text-align:center;color:var(--gold);border-bottom:4px solid var(--gold)}.hero h1{margin:0 0 6px}.hero-meta{font-size:.85rem;color:#dce3f5}.card{margin-top:16px;background:var(--card);border-left:5px solid var(--gold);padding:16px 18px;border-radius:8px}.row{display:flex;gap:12px;flex-wrap:wrap;align-items:end}label{display:flex;flex-direction:column;font-size:.8rem;color:var(--muted);gap:4px}select,button{font:inherit;padding:7px 10px;border-radius:8px;border:1px solid var(--line);background:#141833;color:var(--ink)}button{background:var(--gold);color:#111;font-weight:700;cursor:pointer}.bar{height:22px;border-radius:6px;margin:6px 0;color:#111;font-size:.8rem;padding:2px 8px}.gauge{font-size:2.4rem;font-weight:700;color:var(--gold)}table{width:100%;border-collapse:collapse}th,td{padding:8px 10px;border-bottom:1px solid var(--line);text-align:left}th{font-size:.78rem;text-transform:uppercase;color:var(--muted)}pre{white-space:pre-wrap}</style>\n");
    out.push_str("</head><body><main class=\"shell\">\n");
    out.push_str("<section class=\"hero\"><h1>IPL 2026 Strategist</h1>");
    out.push_str(&format!(
        "<div class=\"hero-meta\">Generated: {}</div></section>\n",
        escape_html(&now_utc)
    ));

    out.push_str("<section class=\"card\" id=\"matchup\"><div class=\"row\">\n");
    push_team_select(&mut out, "home", "Home Team", registry.teams());
    push_team_select(&mut out, "away", "Away Team", registry.teams());
    out.push_str("<button id=\"btn-analyze\" type=\"button\">1. Analyze Matchup</button>");
    out.push_str("</div><div id=\"insights\">Venue &amp; stats will appear here.</div></section>\n");

    out.push_str("<section class=\"card\" id=\"setup\"><div class=\"row\">\n");
    out.push_str("<label>Venue<select name=\"venue\">");
    for venue in registry.venues() {
        out.push_str(&format!(
            "<option value=\"{0}\">{0}</option>",
            escape_html(venue)
        ));
    }
    out.push_str("</select></label>");
    out.push_str("<label>Toss Winner<select name=\"toss_winner\"><option value=\"\">-</option></select></label>");
    push_choice_select(
        &mut out,
        "toss_decision",
        "Toss Decision",
        &[("field", "Field"), ("bat", "Bat")],
    );
    push_choice_select(
        &mut out,
        "pitch",
        "Pitch Conditions",
        &[
            ("dry_sunny", PitchCondition::DrySunny.label()),
            ("dew_expected", PitchCondition::DewExpected.label()),
            ("rainy", PitchCondition::Rainy.label()),
        ],
    );
    push_choice_select(
        &mut out,
        "match_time",
        "Match Time",
        &[("day", MatchTime::Day.label()), ("night", MatchTime::Night.label())],
    );
    out.push_str("<button id=\"btn-predict\" type=\"button\">2. Generate Prediction</button>");
    out.push_str("</div><div class=\"row\"><div id=\"form-bars\" style=\"flex:1\"></div><div class=\"gauge\" id=\"gauge\">-</div></div><pre id=\"report\"></pre></section>\n");

    out.push_str("<section class=\"card\" id=\"history\"><div class=\"row\">\n");
    out.push_str("<label>Season<select name=\"year\">");
    for year in seasons().rev() {
        out.push_str(&format!("<option value=\"{year}\">{year}</option>"));
    }
    out.push_str("</select></label>");
    push_choice_select(
        &mut out,
        "instance",
        "Meeting",
        &[("first", "First"), ("second", "Second")],
    );
    out.push_str("</div><div id=\"history-text\">Pick two teams to see their meeting.</div></section>\n");

    out.push_str("<section class=\"card\"><table id=\"standings-table\"><thead><tr>");
    for header in STANDINGS_HEADERS {
        out.push_str("<th>");
        out.push_str(&escape_html(header));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>\n");
    out.push_str(&render_standings_rows(table));
    out.push_str("</tbody></table></section>\n");

    out.push_str(DASHBOARD_SCRIPT);
    out.push_str("</main></body></html>\n");
    out
}

pub fn render_standings_rows(table: &[StandingsEntry]) -> String {
    let mut out = String::new();
    for entry in table {
        out.push_str("<tr>");
        for cell in [
            entry.team.name().to_string(),
            entry.row.played.to_string(),
            entry.row.won.to_string(),
            entry.row.lost.to_string(),
            entry.row.points.to_string(),
        ] {
            out.push_str("<td>");
            out.push_str(&escape_html(&cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out
}

fn push_team_select(out: &mut String, name: &str, label: &str, teams: &[Team]) {
    out.push_str(&format!(
        "<label>{}<select name=\"{}\"><option value=\"\">-</option>",
        escape_html(label),
        name
    ));
    for team in teams {
        out.push_str(&format!(
            "<option value=\"{0}\">{0}</option>",
            escape_html(team.id.name())
        ));
    }
    out.push_str("</select></label>");
}

fn push_choice_select(out: &mut String, name: &str, label: &str, choices: &[(&str, &str)]) {
    out.push_str(&format!(
        "<label>{}<select name=\"{}\">",
        escape_html(label),
        name
    ));
    for (value, text) in choices {
        out.push_str(&format!(
            "<option value=\"{}\">{}</option>",
            value,
            escape_html(text)
        ));
    }
    out.push_str("</select></label>");
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const DASHBOARD_SCRIPT: &str = r#"<script>
const $ = (name) => document.querySelector(`[name="${name}"]`);
const text = (s) => String(s).replace(/[&<>"']/g, (c) => `&#${c.charCodeAt(0)};`);
async function api(path, init) {
  const res = await fetch(path, init);
  const body = await res.json();
  if (!res.ok) throw new Error(body.message || res.statusText);
  return body;
}
function renderTable(rows) {
  document.querySelector('#standings-table tbody').innerHTML = rows
    .map((r) => `<tr><td>${text(r.team)}</td><td>${r.played}</td><td>${r.won}</td><td>${r.lost}</td><td>${r.points}</td></tr>`)
    .join('');
}
async function analyze() {
  const out = document.getElementById('insights');
  try {
    const q = new URLSearchParams({ home: $('home').value, away: $('away').value });
    const i = await api(`/api/insights?${q}`);
    out.innerHTML = `Location: <b>${text(i.venue)}</b> | Historic avg: <b>${i.venue_avg_score}</b> runs | H2H: ${i.head_to_head.home_wins}-${i.head_to_head.away_wins} in ${i.head_to_head.meetings}`;
    $('venue').value = i.venue;
    $('toss_winner').innerHTML = '<option value="">-</option>' + i.toss_choices.map((t) => `<option>${text(t)}</option>`).join('');
  } catch (e) {
    out.textContent = `Error: ${e.message}`;
  }
}
async function generate() {
  const report = document.getElementById('report');
  const body = {
    home: $('home').value, away: $('away').value, venue: $('venue').value,
    toss_winner: $('toss_winner').value, toss_decision: $('toss_decision').value,
    pitch: $('pitch').value, match_time: $('match_time').value,
  };
  try {
    const r = await api('/api/predict', { method: 'POST', headers: { 'content-type': 'application/json' }, body: JSON.stringify(body) });
    const p = r.prediction;
    document.getElementById('gauge').textContent = `${p.gauge}%`;
    document.getElementById('form-bars').innerHTML = p.form_bars
      .map((b) => `<div class="bar" style="width:${b.value}%;background:${b.color}">${text(b.team)} ${b.value}</div>`)
      .join('');
    const rp = r.report;
    report.textContent = `${rp.home.team}: ${rp.home.batter} | ${rp.home.bowler}\n${rp.away.team}: ${rp.away.batter} | ${rp.away.bowler}\n\nVerdict: ${rp.verdict}`;
    renderTable(r.standings);
  } catch (e) {
    report.textContent = `Error: ${e.message}`;
  }
}
async function history() {
  const out = document.getElementById('history-text');
  try {
    const q = new URLSearchParams({ team_a: $('home').value, team_b: $('away').value, year: $('year').value, instance: $('instance').value });
    const h = await api(`/api/history?${q}`);
    if (h.status === 'no_selection') out.textContent = 'Pick two different teams.';
    else if (h.status === 'team_did_not_exist') out.textContent = `One of these teams did not exist in ${h.year}.`;
    else out.textContent = `${h.winner} won by ${h.margin.value} ${h.margin.kind}.`;
  } catch (e) {
    out.textContent = `Error: ${e.message}`;
  }
}
document.getElementById('btn-analyze').addEventListener('click', analyze);
document.getElementById('btn-predict').addEventListener('click', generate);
['home', 'away', 'year', 'instance'].forEach((n) => $(n).addEventListener('change', history));
</script>
"#;

async fn get_dashboard_html(State(state): State<DashboardAppState>) -> impl IntoResponse {
    let table = state.standings.table();
    Html(render_dashboard_html(&state.registry, &table))
}

async fn get_teams(State(state): State<DashboardAppState>) -> impl IntoResponse {
    Json(state.registry.teams().to_vec())
}

async fn get_insights(
    State(state): State<DashboardAppState>,
    query: Result<Query<InsightsQuery>, QueryRejection>,
) -> Result<Json<MatchupInsights>, DashboardError> {
    let Query(query) = query?;
    let home = parse_team_selection(query.home.as_deref())?;
    let away = parse_team_selection(query.away.as_deref())?;
    let insights = matchup_insights(home, away, &state.registry)?;
    info!(
        component = "dashboard",
        event = "http.insights.request",
        home = %insights.home,
        away = %insights.away,
        meetings = insights.head_to_head.meetings
    );
    Ok(Json(insights))
}

async fn get_history(
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoricalOutcome>, DashboardError> {
    let Query(query) = query?;
    let outcome = run_history(&query)?;
    info!(
        component = "dashboard",
        event = "http.history.request",
        year = ?query.year,
        instance = ?query.instance
    );
    Ok(Json(outcome))
}

async fn post_predict(
    State(state): State<DashboardAppState>,
    request: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, DashboardError> {
    let Json(request) = request?;
    let response = run_prediction(&request, &state.registry, &state.standings)?;
    info!(
        component = "dashboard",
        event = "http.predict.request",
        winner = %response.prediction.winner,
        probability = response.prediction.probability
    );
    Ok(Json(response))
}

async fn get_standings(State(state): State<DashboardAppState>) -> impl IntoResponse {
    Json(StandingsResponse {
        rows: state.standings.table(),
    })
}

async fn post_standings_reset(State(state): State<DashboardAppState>) -> impl IntoResponse {
    state.standings.reset();
    info!(component = "dashboard", event = "http.standings.reset");
    Json(StandingsResponse {
        rows: state.standings.table(),
    })
}
