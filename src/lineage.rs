//! Franchise names by season.
//!
//! A current team maps to whatever name its slot carried in a given year, or
//! to nothing when the franchise had not been founded yet.

use std::ops::RangeInclusive;

use crate::TeamId;

pub const FIRST_SEASON: i32 = 2008;
pub const LAST_SEASON: i32 = 2025;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonName {
    Known(&'static str),
    NotFounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineageRule {
    team: TeamId,
    from: i32,
    to: i32,
    name: Option<&'static str>,
}

const LINEAGE_RULES: [LineageRule; 8] = [
    LineageRule {
        team: TeamId::ChennaiSuperKings,
        from: 2016,
        to: 2017,
        name: Some("Rising Pune Supergiant"),
    },
    LineageRule {
        team: TeamId::RajasthanRoyals,
        from: 2016,
        to: 2017,
        name: Some("Gujarat Lions"),
    },
    LineageRule {
        team: TeamId::PunjabKings,
        from: FIRST_SEASON,
        to: 2020,
        name: Some("Kings XI Punjab"),
    },
    LineageRule {
        team: TeamId::RoyalChallengersBengaluru,
        from: FIRST_SEASON,
        to: 2023,
        name: Some("Royal Challengers Bangalore"),
    },
    LineageRule {
        team: TeamId::SunrisersHyderabad,
        from: FIRST_SEASON,
        to: 2012,
        name: Some("Deccan Chargers"),
    },
    LineageRule {
        team: TeamId::DelhiCapitals,
        from: FIRST_SEASON,
        to: 2018,
        name: Some("Delhi Daredevils"),
    },
    LineageRule {
        team: TeamId::GujaratTitans,
        from: FIRST_SEASON,
        to: 2021,
        name: None,
    },
    LineageRule {
        team: TeamId::LucknowSuperGiants,
        from: FIRST_SEASON,
        to: 2021,
        name: None,
    },
];

pub fn name_in_season(team: TeamId, year: i32) -> SeasonName {
    if year < FIRST_SEASON {
        return SeasonName::NotFounded;
    }

    LINEAGE_RULES
        .iter()
        .find(|rule| rule.team == team && (rule.from..=rule.to).contains(&year))
        .map(|rule| match rule.name {
            Some(name) => SeasonName::Known(name),
            None => SeasonName::NotFounded,
        })
        .unwrap_or(SeasonName::Known(team.name()))
}

pub fn seasons() -> RangeInclusive<i32> {
    FIRST_SEASON..=LAST_SEASON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspended_franchises_map_to_stand_in_teams() {
        assert_eq!(
            name_in_season(TeamId::ChennaiSuperKings, 2016),
            SeasonName::Known("Rising Pune Supergiant")
        );
        assert_eq!(
            name_in_season(TeamId::RajasthanRoyals, 2017),
            SeasonName::Known("Gujarat Lions")
        );
        assert_eq!(
            name_in_season(TeamId::ChennaiSuperKings, 2018),
            SeasonName::Known("Chennai Super Kings")
        );
    }

    #[test]
    fn renamed_franchises_switch_on_boundary_year() {
        assert_eq!(
            name_in_season(TeamId::DelhiCapitals, 2018),
            SeasonName::Known("Delhi Daredevils")
        );
        assert_eq!(
            name_in_season(TeamId::DelhiCapitals, 2019),
            SeasonName::Known("Delhi Capitals")
        );
        assert_eq!(
            name_in_season(TeamId::SunrisersHyderabad, 2012),
            SeasonName::Known("Deccan Chargers")
        );
        assert_eq!(
            name_in_season(TeamId::RoyalChallengersBengaluru, 2024),
            SeasonName::Known("Royal Challengers Bengaluru")
        );
    }

    #[test]
    fn expansion_teams_do_not_exist_before_2022() {
        assert_eq!(
            name_in_season(TeamId::GujaratTitans, 2021),
            SeasonName::NotFounded
        );
        assert_eq!(
            name_in_season(TeamId::LucknowSuperGiants, 2022),
            SeasonName::Known("Lucknow Super Giants")
        );
    }

    #[test]
    fn nobody_exists_before_the_first_season() {
        assert_eq!(
            name_in_season(TeamId::MumbaiIndians, 2007),
            SeasonName::NotFounded
        );
        assert_eq!(seasons().count(), 18);
    }
}
