//! Session points table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::teams::ALL_TEAMS;
use crate::TeamId;

pub const POINTS_PER_WIN: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StandingsRow {
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingsEntry {
    pub team: TeamId,
    #[serde(flatten)]
    pub row: StandingsRow,
}

/// One row per team, zeroed at creation. Rows are only ever touched through
/// [`Standings::record_result`], which keeps `played == won + lost` and
/// `points == 2 * won`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    rows: BTreeMap<TeamId, StandingsRow>,
}

impl Standings {
    pub fn new() -> Self {
        Self {
            rows: ALL_TEAMS
                .into_iter()
                .map(|team| (team, StandingsRow::default()))
                .collect(),
        }
    }

    pub fn row(&self, team: TeamId) -> StandingsRow {
        self.rows.get(&team).copied().unwrap_or_default()
    }

    pub fn record_result(&mut self, winner: TeamId, loser: TeamId) {
        let row = self.rows.entry(winner).or_default();
        row.played += 1;
        row.won += 1;
        row.points += POINTS_PER_WIN;

        let row = self.rows.entry(loser).or_default();
        row.played += 1;
        row.lost += 1;
    }

    pub fn matches_recorded(&self) -> u32 {
        self.rows.values().map(|row| row.won).sum()
    }

    /// Table order: points, then wins, then team name.
    pub fn table(&self) -> Vec<StandingsEntry> {
        let mut entries: Vec<StandingsEntry> = self
            .rows
            .iter()
            .map(|(team, row)| StandingsEntry {
                team: *team,
                row: *row,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.row
                .points
                .cmp(&a.row.points)
                .then(b.row.won.cmp(&a.row.won))
                .then(a.team.name().cmp(b.team.name()))
        });
        entries
    }
}

impl Default for Standings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed_for_every_team() {
        let standings = Standings::new();
        let table = standings.table();

        assert_eq!(table.len(), ALL_TEAMS.len());
        assert!(table.iter().all(|entry| entry.row == StandingsRow::default()));
        assert_eq!(table[0].team, TeamId::ChennaiSuperKings);
    }

    #[test]
    fn record_result_keeps_invariants() {
        let mut standings = Standings::new();
        standings.record_result(TeamId::MumbaiIndians, TeamId::PunjabKings);
        standings.record_result(TeamId::PunjabKings, TeamId::MumbaiIndians);
        standings.record_result(TeamId::MumbaiIndians, TeamId::DelhiCapitals);

        for entry in standings.table() {
            assert_eq!(entry.row.played, entry.row.won + entry.row.lost);
            assert_eq!(entry.row.points, entry.row.won * POINTS_PER_WIN);
        }
        assert_eq!(
            standings.row(TeamId::MumbaiIndians),
            StandingsRow {
                played: 3,
                won: 2,
                lost: 1,
                points: 4
            }
        );
        assert_eq!(standings.matches_recorded(), 3);
    }

    #[test]
    fn table_orders_by_points_then_wins_then_name() {
        let mut standings = Standings::new();
        standings.record_result(TeamId::SunrisersHyderabad, TeamId::GujaratTitans);
        standings.record_result(TeamId::DelhiCapitals, TeamId::GujaratTitans);
        standings.record_result(TeamId::SunrisersHyderabad, TeamId::DelhiCapitals);

        let order: Vec<TeamId> = standings.table().iter().map(|e| e.team).collect();
        assert_eq!(order[0], TeamId::SunrisersHyderabad);
        assert_eq!(order[1], TeamId::DelhiCapitals);
        assert_eq!(order[2], TeamId::ChennaiSuperKings);
        assert_eq!(*order.last().unwrap(), TeamId::RoyalChallengersBengaluru);
    }
}
