//! Demo data the directory can be seeded with.

use super::models::{
    LeaderboardEntry, Site, SiteRef, SiteStatus, Tournament, TournamentId, TournamentStatus,
    TournamentType,
};
use chrono::{DateTime, TimeZone, Utc};

/// Seed collections for a demo directory
#[derive(Debug, Clone)]
pub struct DemoData {
    pub sites: Vec<Site>,
    pub tournaments: Vec<Tournament>,
    /// Standings per tournament, already ordered by chips
    pub leaderboards: Vec<(TournamentId, Vec<LeaderboardEntry>)>,
}

impl DemoData {
    /// Two sites, two tournaments and their leaderboards
    pub fn standard() -> Self {
        let sites = vec![
            Site {
                id: 1,
                site_code: "SITE001".to_string(),
                site_name: "Las Vegas Main".to_string(),
                status: SiteStatus::Active,
                created_at: at(2025, 12, 20, 10),
            },
            Site {
                id: 2,
                site_code: "SITE002".to_string(),
                site_name: "Atlantic City".to_string(),
                status: SiteStatus::Active,
                created_at: at(2025, 12, 21, 10),
            },
        ];

        let tournaments = vec![
            Tournament {
                id: 1,
                name: "Winter Championship 2025".to_string(),
                site: SiteRef {
                    id: 1,
                    site_name: Some("Las Vegas Main".to_string()),
                },
                starting_chips: 10_000,
                total_rounds: 15,
                max_players: 200,
                tournament_type: TournamentType::Pvp,
                status: TournamentStatus::from_id(1),
                start_time: Some(at(2025, 12, 25, 18)),
                end_time: Some(at(2025, 12, 26, 2)),
                created_at: at(2025, 12, 22, 10),
                registered_players: 45,
            },
            Tournament {
                id: 2,
                name: "Daily Dealer Challenge".to_string(),
                site: SiteRef {
                    id: 1,
                    site_name: Some("Las Vegas Main".to_string()),
                },
                starting_chips: 5_000,
                total_rounds: 10,
                max_players: 100,
                tournament_type: TournamentType::Pvd,
                status: TournamentStatus::from_id(2),
                start_time: Some(at(2025, 12, 23, 20)),
                end_time: Some(at(2025, 12, 24, 0)),
                created_at: at(2025, 12, 22, 11),
                registered_players: 12,
            },
        ];

        let leaderboards = vec![
            (
                1,
                vec![
                    LeaderboardEntry::new("PokerPro_42", 125_000, 45, 12),
                    LeaderboardEntry::new("CardShark99", 98_000, 38, 15),
                    LeaderboardEntry::new("BluffMaster", 87_500, 35, 18),
                    LeaderboardEntry::new("AllIn_King", 76_000, 32, 20),
                    LeaderboardEntry::new("RiverRat", 68_000, 28, 22),
                ],
            ),
            (
                2,
                vec![
                    LeaderboardEntry::new("DealerSlayer", 65_000, 25, 5),
                    LeaderboardEntry::new("ChipCollector", 54_000, 22, 8),
                    LeaderboardEntry::new("FoldOrGold", 48_000, 20, 10),
                ],
            ),
        ];

        Self {
            sites,
            tournaments,
            leaderboards,
        }
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_demo_data_shape() {
        let data = DemoData::standard();
        assert_eq!(data.sites.len(), 2);
        assert_eq!(data.tournaments.len(), 2);
        assert_eq!(data.leaderboards[0].1.len(), 5);
        assert_eq!(data.leaderboards[1].1.len(), 3);
    }

    #[test]
    fn test_demo_leaderboards_sorted_by_chips() {
        for (_, entries) in DemoData::standard().leaderboards {
            assert!(
                entries
                    .windows(2)
                    .all(|pair| pair[0].chips_current >= pair[1].chips_current)
            );
        }
    }

    #[test]
    fn test_demo_tournaments_within_capacity() {
        for tournament in DemoData::standard().tournaments {
            assert!(tournament.registered_players <= tournament.max_players);
        }
    }

    #[test]
    fn test_demo_timestamps() {
        let data = DemoData::standard();
        assert_eq!(
            data.sites[0].created_at.to_rfc3339(),
            "2025-12-20T10:00:00+00:00"
        );
        assert_eq!(
            data.tournaments[0].end_time.map(|t| t.to_rfc3339()),
            Some("2025-12-26T02:00:00+00:00".to_string())
        );
    }
}
