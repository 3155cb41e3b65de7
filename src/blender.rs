//! Form-based win probability and simulated match recording.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::standings::Standings;
use crate::teams::TeamRegistry;
use crate::TeamId;

pub const BASE_PROBABILITY: f64 = 50.0;
pub const FORM_WEIGHT: f64 = 40.0;
pub const HOME_BONUS: f64 = 5.0;
pub const MIN_PROBABILITY: u32 = 10;
pub const MAX_PROBABILITY: u32 = 90;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictError {
    #[error("select two different teams")]
    InvalidSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormBar {
    pub team: TeamId,
    /// Form rating scaled to 0..=100.
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub venue: String,
    pub home_advantage: bool,
    /// Team A's win probability in percent, within `[10, 90]`.
    pub probability: u32,
    pub winner: TeamId,
    pub loser: TeamId,
    pub form_bars: [FormBar; 2],
    pub gauge: u32,
}

/// Blends form and venue into team A's win probability and records the
/// resulting match in `standings`.
///
/// Every successful call records one more match, even for repeated inputs.
pub fn predict(
    team_a: Option<TeamId>,
    team_b: Option<TeamId>,
    venue: &str,
    registry: &TeamRegistry,
    standings: &mut Standings,
) -> Result<Prediction, PredictError> {
    let (team_a, team_b) = match (team_a, team_b) {
        (Some(a), Some(b)) if a != b => (a, b),
        _ => {
            warn!(
                component = "blender",
                event = "blender.rejected",
                team_a = ?team_a,
                team_b = ?team_b
            );
            return Err(PredictError::InvalidSelection);
        }
    };

    let a = registry.get(team_a);
    let b = registry.get(team_b);
    let home_advantage = venue.trim() == a.venue;
    let probability = blend_probability(a.form, b.form, home_advantage);

    let (winner, loser) = if probability > 50 {
        (team_a, team_b)
    } else {
        (team_b, team_a)
    };
    standings.record_result(winner, loser);

    info!(
        component = "blender",
        event = "blender.predicted",
        team_a = %team_a,
        team_b = %team_b,
        venue = venue.trim(),
        home_advantage,
        probability,
        winner = %winner
    );

    Ok(Prediction {
        team_a,
        team_b,
        venue: venue.trim().to_string(),
        home_advantage,
        probability,
        winner,
        loser,
        form_bars: [
            FormBar {
                team: team_a,
                value: scale_form(a.form),
                color: a.color,
            },
            FormBar {
                team: team_b,
                value: scale_form(b.form),
                color: b.color,
            },
        ],
        gauge: probability,
    })
}

pub fn blend_probability(form_a: f64, form_b: f64, home_advantage: bool) -> u32 {
    let mut raw = BASE_PROBABILITY + (form_a - form_b) * FORM_WEIGHT;
    if home_advantage {
        raw += HOME_BONUS;
    }
    let rounded = raw.round().max(0.0) as u32;
    rounded.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

fn scale_form(form: f64) -> f64 {
    (form * 100.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::StandingsRow;

    #[test]
    fn blend_adds_home_bonus_and_rounds() {
        assert_eq!(blend_probability(0.96, 0.81, true), 61);
        assert_eq!(blend_probability(0.96, 0.81, false), 56);
        assert_eq!(blend_probability(0.5, 0.5, false), 50);
    }

    #[test]
    fn blend_clamps_to_bounds() {
        assert_eq!(blend_probability(1.0, 0.0, true), MAX_PROBABILITY);
        assert_eq!(blend_probability(0.0, 1.0, false), MIN_PROBABILITY);
        assert_eq!(blend_probability(0.0, 1.0, true), MIN_PROBABILITY);
    }

    #[test]
    fn stronger_form_never_drops_below_even_away_from_home() {
        for (a, b) in [(0.9, 0.1), (0.6, 0.55), (0.81, 0.8)] {
            assert!(blend_probability(a, b, false) >= 50);
        }
    }

    #[test]
    fn home_favourite_wins_and_table_updates() {
        let registry = TeamRegistry::season_2026();
        let mut standings = Standings::new();

        let prediction = predict(
            Some(TeamId::RoyalChallengersBengaluru),
            Some(TeamId::ChennaiSuperKings),
            "M. Chinnaswamy Stadium",
            &registry,
            &mut standings,
        )
        .expect("valid selection");

        assert_eq!(prediction.probability, 61);
        assert_eq!(prediction.gauge, 61);
        assert!(prediction.home_advantage);
        assert_eq!(prediction.winner, TeamId::RoyalChallengersBengaluru);
        assert_eq!(prediction.loser, TeamId::ChennaiSuperKings);
        assert_eq!(prediction.form_bars[0].value, 96.0);
        assert_eq!(prediction.form_bars[1].value, 81.0);
        assert_eq!(
            standings.row(TeamId::RoyalChallengersBengaluru),
            StandingsRow {
                played: 1,
                won: 1,
                lost: 0,
                points: 2
            }
        );
        assert_eq!(
            standings.row(TeamId::ChennaiSuperKings),
            StandingsRow {
                played: 1,
                won: 0,
                lost: 1,
                points: 0
            }
        );
    }

    #[test]
    fn weaker_team_a_loses_at_away_ground() {
        let registry = TeamRegistry::season_2026();
        let mut standings = Standings::new();

        // 50 + (0.77 - 0.84) * 40, no bonus at team B's ground.
        let prediction = predict(
            Some(TeamId::LucknowSuperGiants),
            Some(TeamId::PunjabKings),
            "PCA Stadium",
            &registry,
            &mut standings,
        )
        .expect("valid selection");

        assert_eq!(prediction.probability, 47);
        assert_eq!(prediction.winner, TeamId::PunjabKings);
    }

    #[test]
    fn same_or_missing_team_is_rejected_without_mutation() {
        let registry = TeamRegistry::season_2026();
        let mut standings = Standings::new();
        let before = standings.clone();

        assert_eq!(
            predict(
                Some(TeamId::MumbaiIndians),
                Some(TeamId::MumbaiIndians),
                "Wankhede Stadium",
                &registry,
                &mut standings,
            ),
            Err(PredictError::InvalidSelection)
        );
        assert_eq!(
            predict(
                None,
                Some(TeamId::MumbaiIndians),
                "Wankhede Stadium",
                &registry,
                &mut standings,
            ),
            Err(PredictError::InvalidSelection)
        );
        assert_eq!(standings, before);
    }

    #[test]
    fn repeated_calls_record_separate_matches() {
        let registry = TeamRegistry::season_2026();
        let mut standings = Standings::new();

        for _ in 0..2 {
            predict(
                Some(TeamId::RoyalChallengersBengaluru),
                Some(TeamId::ChennaiSuperKings),
                "M. Chinnaswamy Stadium",
                &registry,
                &mut standings,
            )
            .expect("valid selection");
        }

        assert_eq!(standings.row(TeamId::RoyalChallengersBengaluru).played, 2);
        assert_eq!(standings.row(TeamId::ChennaiSuperKings).played, 2);
        assert_eq!(standings.row(TeamId::RoyalChallengersBengaluru).points, 4);
    }
}
