//! Matchup analysis and the match-day performance report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blender::Prediction;
use crate::lineage::seasons;
use crate::oracle::{historical, HistoricalOutcome, MatchInstance, Side};
use crate::teams::TeamRegistry;
use crate::TeamId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InsightError {
    #[error("select two different teams")]
    InvalidSelection,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("complete the matchup and toss steps first")]
    MissingToss,
    #[error("toss winner {0} is not playing this match")]
    TossWinnerNotInMatch(TeamId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadToHead {
    pub meetings: u32,
    pub home_wins: u32,
    pub away_wins: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchupInsights {
    pub home: TeamId,
    pub away: TeamId,
    pub venue: &'static str,
    pub venue_avg_score: u32,
    pub head_to_head: HeadToHead,
    pub toss_choices: [TeamId; 2],
}

pub fn matchup_insights(
    home: Option<TeamId>,
    away: Option<TeamId>,
    registry: &TeamRegistry,
) -> Result<MatchupInsights, InsightError> {
    let (home, away) = match (home, away) {
        (Some(h), Some(a)) if h != a => (h, a),
        _ => return Err(InsightError::InvalidSelection),
    };
    let team = registry.get(home);

    Ok(MatchupInsights {
        home,
        away,
        venue: team.venue,
        venue_avg_score: team.avg_score,
        head_to_head: head_to_head(home, away),
        toss_choices: [home, away],
    })
}

/// Tallies oracle results across every season both franchises played.
pub fn head_to_head(home: TeamId, away: TeamId) -> HeadToHead {
    let mut tally = HeadToHead::default();
    for year in seasons() {
        for instance in [MatchInstance::First, MatchInstance::Second] {
            if let HistoricalOutcome::Result(result) =
                historical(Some(home), Some(away), year, instance)
            {
                tally.meetings += 1;
                match result.winner_side {
                    Side::A => tally.home_wins += 1,
                    Side::B => tally.away_wins += 1,
                }
            }
        }
    }
    tally
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TossDecision {
    Bat,
    #[default]
    Field,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchCondition {
    DrySunny,
    DewExpected,
    Rainy,
}

impl PitchCondition {
    pub fn label(self) -> &'static str {
        match self {
            PitchCondition::DrySunny => "Dry & Sunny",
            PitchCondition::DewExpected => "Dew Expected",
            PitchCondition::Rainy => "Rainy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTime {
    Day,
    Night,
}

impl MatchTime {
    pub fn label(self) -> &'static str {
        match self {
            MatchTime::Day => "Day",
            MatchTime::Night => "Night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub toss_winner: Option<TeamId>,
    #[serde(default)]
    pub toss_decision: TossDecision,
    pub pitch: PitchCondition,
    pub match_time: MatchTime,
}

impl MatchSetup {
    pub fn validate(&self, team_a: TeamId, team_b: TeamId) -> Result<TeamId, ReportError> {
        let toss_winner = self.toss_winner.ok_or(ReportError::MissingToss)?;
        if toss_winner != team_a && toss_winner != team_b {
            return Err(ReportError::TossWinnerNotInMatch(toss_winner));
        }
        Ok(toss_winner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerCard {
    pub team: TeamId,
    pub batter: &'static str,
    pub bowler: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub home: PlayerCard,
    pub away: PlayerCard,
    pub toss_winner: TeamId,
    pub toss_decision: TossDecision,
    pub favored: TeamId,
    pub pitch: PitchCondition,
    pub match_time: MatchTime,
    pub verdict: String,
}

pub fn match_report(
    prediction: &Prediction,
    setup: &MatchSetup,
    registry: &TeamRegistry,
) -> Result<MatchReport, ReportError> {
    let toss_winner = setup.validate(prediction.team_a, prediction.team_b)?;
    let card = |id: TeamId| {
        let team = registry.get(id);
        PlayerCard {
            team: id,
            batter: team.key_batter,
            bowler: team.key_bowler,
        }
    };

    Ok(MatchReport {
        home: card(prediction.team_a),
        away: card(prediction.team_b),
        toss_winner,
        toss_decision: setup.toss_decision,
        favored: prediction.winner,
        pitch: setup.pitch,
        match_time: setup.match_time,
        verdict: format!(
            "{} is favored in {} conditions ({}).",
            prediction.winner,
            setup.match_time.label(),
            setup.pitch.label()
        ),
    })
}
