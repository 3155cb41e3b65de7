//! Static team registry for the 2026 season.
//!
//! Teams are keyed by [`TeamId`]; display names are parsed back into ids at
//! the edges (query strings, JSON bodies) and never used as lookup keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TeamId {
    ChennaiSuperKings,
    DelhiCapitals,
    GujaratTitans,
    KolkataKnightRiders,
    LucknowSuperGiants,
    MumbaiIndians,
    PunjabKings,
    RajasthanRoyals,
    RoyalChallengersBengaluru,
    SunrisersHyderabad,
}

/// Alphabetical by display name, matching dropdown order.
pub const ALL_TEAMS: [TeamId; 10] = [
    TeamId::ChennaiSuperKings,
    TeamId::DelhiCapitals,
    TeamId::GujaratTitans,
    TeamId::KolkataKnightRiders,
    TeamId::LucknowSuperGiants,
    TeamId::MumbaiIndians,
    TeamId::PunjabKings,
    TeamId::RajasthanRoyals,
    TeamId::RoyalChallengersBengaluru,
    TeamId::SunrisersHyderabad,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TeamParseError {
    #[error("unknown team: {0}")]
    UnknownTeam(String),
    #[error("unknown venue: {0}")]
    UnknownVenue(String),
}

impl TeamId {
    pub fn name(self) -> &'static str {
        match self {
            TeamId::ChennaiSuperKings => "Chennai Super Kings",
            TeamId::DelhiCapitals => "Delhi Capitals",
            TeamId::GujaratTitans => "Gujarat Titans",
            TeamId::KolkataKnightRiders => "Kolkata Knight Riders",
            TeamId::LucknowSuperGiants => "Lucknow Super Giants",
            TeamId::MumbaiIndians => "Mumbai Indians",
            TeamId::PunjabKings => "Punjab Kings",
            TeamId::RajasthanRoyals => "Rajasthan Royals",
            TeamId::RoyalChallengersBengaluru => "Royal Challengers Bengaluru",
            TeamId::SunrisersHyderabad => "Sunrisers Hyderabad",
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TeamId {
    type Err = TeamParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        ALL_TEAMS
            .into_iter()
            .find(|team| team.name() == trimmed)
            .ok_or_else(|| TeamParseError::UnknownTeam(trimmed.to_string()))
    }
}

impl Serialize for TeamId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TeamId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses an optional selector value; blank strings count as "unset".
pub fn parse_team_selection(raw: Option<&str>) -> Result<Option<TeamId>, TeamParseError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => name.parse().map(Some),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub color: &'static str,
    pub venue: &'static str,
    /// Current form in `[0, 1]`.
    pub form: f64,
    pub avg_score: u32,
    pub key_batter: &'static str,
    pub key_bowler: &'static str,
}

#[derive(Debug, Clone)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl TeamRegistry {
    pub fn season_2026() -> Self {
        let teams = ALL_TEAMS.into_iter().map(season_2026_team).collect();
        Self { teams }
    }

    pub fn get(&self, id: TeamId) -> &Team {
        // `teams` holds every id in `ALL_TEAMS` order.
        &self.teams[id as usize]
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn venues(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.teams.iter().map(|team| team.venue)
    }

    pub fn parse_venue(&self, raw: &str) -> Result<&'static str, TeamParseError> {
        let trimmed = raw.trim();
        self.venues()
            .find(|venue| *venue == trimmed)
            .ok_or_else(|| TeamParseError::UnknownVenue(trimmed.to_string()))
    }
}

impl Default for TeamRegistry {
    fn default() -> Self {
        Self::season_2026()
    }
}

fn season_2026_team(id: TeamId) -> Team {
    let (color, venue, form, avg_score, key_batter, key_bowler) = match id {
        TeamId::ChennaiSuperKings => (
            "#FFFF00",
            "M.A. Chidambaram Stadium",
            0.81,
            165,
            "Ruturaj Gaikwad (583 Runs)",
            "Noor Ahmad (Mystery Spin)",
        ),
        TeamId::DelhiCapitals => (
            "#00008B",
            "Arun Jaitley Stadium",
            0.82,
            172,
            "Rishabh Pant (446 Runs)",
            "Kuldeep Yadav (16 Wkts)",
        ),
        TeamId::GujaratTitans => (
            "#1B2133",
            "Narendra Modi Stadium",
            0.88,
            178,
            "Shubman Gill (890 Runs)",
            "Rashid Khan (27 Wkts)",
        ),
        TeamId::KolkataKnightRiders => (
            "#2E0854",
            "Eden Gardens",
            0.90,
            182,
            "Rinku Singh (474 Runs)",
            "V. Chakaravarthy (21 Wkts)",
        ),
        TeamId::LucknowSuperGiants => (
            "#0057E2",
            "Ekana Stadium",
            0.77,
            158,
            "Nicholas Pooran (358 Runs)",
            "Ravi Bishnoi (16 Wkts)",
        ),
        TeamId::MumbaiIndians => (
            "#004BA0",
            "Wankhede Stadium",
            0.93,
            185,
            "Suryakumar Yadav (605 Runs)",
            "Jasprit Bumrah (20 Wkts)",
        ),
        TeamId::PunjabKings => (
            "#D71920",
            "PCA Stadium",
            0.84,
            174,
            "Shreyas Iyer (Captain)",
            "Arshdeep Singh (19 Wkts)",
        ),
        TeamId::RajasthanRoyals => (
            "#EA1A85",
            "Sawai Mansingh Stadium",
            0.79,
            162,
            "Yashasvi Jaiswal (625 Runs)",
            "Ravindra Jadeja (Captain)",
        ),
        TeamId::RoyalChallengersBengaluru => (
            "#EC1C24",
            "M. Chinnaswamy Stadium",
            0.96,
            195,
            "Virat Kohli (639 Runs)",
            "Mohammed Siraj (19 Wkts)",
        ),
        TeamId::SunrisersHyderabad => (
            "#FF822A",
            "Rajiv Gandhi Stadium",
            0.86,
            178,
            "Heinrich Klaasen (448 Runs)",
            "Pat Cummins (17 Wkts)",
        ),
    };

    Team {
        id,
        color,
        venue,
        form,
        avg_score,
        key_batter,
        key_bowler,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lookup_matches_id_for_every_team() {
        let registry = TeamRegistry::season_2026();
        for id in ALL_TEAMS {
            assert_eq!(registry.get(id).id, id);
        }
    }

    #[test]
    fn all_teams_are_sorted_by_display_name() {
        let names: Vec<&str> = ALL_TEAMS.iter().map(|team| team.name()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn forms_stay_in_unit_interval_and_venues_are_unique() {
        let registry = TeamRegistry::season_2026();
        let mut venues: Vec<&str> = registry.venues().collect();
        venues.sort_unstable();
        venues.dedup();

        assert_eq!(venues.len(), ALL_TEAMS.len());
        assert!(registry
            .teams()
            .iter()
            .all(|team| (0.0..=1.0).contains(&team.form)));
    }

    #[test]
    fn parses_names_and_rejects_unknown_teams() {
        assert_eq!(
            "Mumbai Indians".parse::<TeamId>(),
            Ok(TeamId::MumbaiIndians)
        );
        assert_eq!(" Eden Gardens ".parse::<TeamId>().ok(), None);
        assert_eq!(
            "Deccan Chargers".parse::<TeamId>(),
            Err(TeamParseError::UnknownTeam("Deccan Chargers".to_string()))
        );
    }

    #[test]
    fn blank_selection_is_unset_not_an_error() {
        assert_eq!(parse_team_selection(None), Ok(None));
        assert_eq!(parse_team_selection(Some("  ")), Ok(None));
        assert_eq!(
            parse_team_selection(Some("Punjab Kings")),
            Ok(Some(TeamId::PunjabKings))
        );
    }

    #[test]
    fn venue_parsing_only_accepts_registered_grounds() {
        let registry = TeamRegistry::season_2026();
        assert_eq!(registry.parse_venue("Eden Gardens"), Ok("Eden Gardens"));
        assert!(matches!(
            registry.parse_venue("Lord's"),
            Err(TeamParseError::UnknownVenue(_))
        ));
    }
}
