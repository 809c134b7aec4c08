//! Directory manager owning every collection.

use super::{
    errors::{DirectoryError, DirectoryResult, RegistrationField},
    fixtures::DemoData,
    latency::{LatencySimulator, NoLatency, Operation},
    models::{
        DirectoryStats, LeaderboardEntry, NewRegistration, NewSite, NewTournament, Registration,
        RegistrationId, Site, SiteId, SiteRef, Tournament, TournamentId, TournamentStatus,
    },
};
use chrono::Utc;
use log::{debug, info, warn};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// Everything the directory stores
#[derive(Debug)]
struct DirectoryState {
    sites: Vec<Site>,
    tournaments: Vec<Tournament>,
    leaderboards: HashMap<TournamentId, Vec<LeaderboardEntry>>,
    registrations: HashMap<TournamentId, Vec<Registration>>,
    next_site_id: SiteId,
    next_tournament_id: TournamentId,
    last_registration_id: RegistrationId,
}

impl DirectoryState {
    fn empty() -> Self {
        Self {
            sites: Vec::new(),
            tournaments: Vec::new(),
            leaderboards: HashMap::new(),
            registrations: HashMap::new(),
            next_site_id: 1,
            next_tournament_id: 1,
            last_registration_id: 0,
        }
    }

    fn seeded(data: DemoData) -> Self {
        let next_site_id = data.sites.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let next_tournament_id = data.tournaments.iter().map(|t| t.id).max().unwrap_or(0) + 1;

        let mut leaderboards: HashMap<_, _> = data
            .tournaments
            .iter()
            .map(|t| (t.id, Vec::new()))
            .collect();
        leaderboards.extend(data.leaderboards);

        let registrations = data
            .tournaments
            .iter()
            .map(|t| (t.id, Vec::new()))
            .collect();

        Self {
            sites: data.sites,
            tournaments: data.tournaments,
            leaderboards,
            registrations,
            next_site_id,
            next_tournament_id,
            last_registration_id: 0,
        }
    }

    /// Time-based id, bumped past the previous one when the clock has not moved
    fn next_registration_id(&mut self) -> RegistrationId {
        let id = Utc::now()
            .timestamp_millis()
            .max(self.last_registration_id + 1);
        self.last_registration_id = id;
        id
    }
}

/// Directory manager
///
/// All collections sit behind a single lock. Each mutating call validates,
/// checks and writes under one write guard, so a failed call never leaves a
/// partial change behind and two registrations can never both take the last
/// seat.
#[derive(Clone)]
pub struct DirectoryManager {
    state: Arc<RwLock<DirectoryState>>,
    latency: Arc<dyn LatencySimulator>,
}

impl Default for DirectoryManager {
    fn default() -> Self {
        Self::new(Arc::new(NoLatency))
    }
}

impl DirectoryManager {
    /// Create an empty directory
    ///
    /// # Arguments
    ///
    /// * `latency` - Delay strategy applied before every call
    pub fn new(latency: Arc<dyn LatencySimulator>) -> Self {
        Self {
            state: Arc::new(RwLock::new(DirectoryState::empty())),
            latency,
        }
    }

    /// Create a directory seeded with [`DemoData::standard`]
    pub fn with_demo_data(latency: Arc<dyn LatencySimulator>) -> Self {
        Self::with_data(DemoData::standard(), latency)
    }

    /// Create a directory seeded with the given data
    pub fn with_data(data: DemoData, latency: Arc<dyn LatencySimulator>) -> Self {
        Self {
            state: Arc::new(RwLock::new(DirectoryState::seeded(data))),
            latency,
        }
    }

    // ------------------------------------------------------------------
    // Sites
    // ------------------------------------------------------------------

    /// Register a new site
    ///
    /// Site codes are not required to be unique.
    ///
    /// # Errors
    ///
    /// * `DirectoryError::Validation` - Empty site code or name
    pub async fn create_site(&self, request: NewSite) -> DirectoryResult<Site> {
        self.latency.simulate(Operation::CreateSite).await;
        request.validate()?;

        let mut state = self.state.write().await;
        let site = Site {
            id: state.next_site_id,
            site_code: request.site_code,
            site_name: request.site_name,
            status: request.status,
            created_at: Utc::now(),
        };
        state.next_site_id += 1;
        state.sites.push(site.clone());

        info!("Created site {} ({}) with ID {}", site.site_name, site.site_code, site.id);
        Ok(site)
    }

    /// All sites in insertion order, unfiltered
    pub async fn list_sites(&self) -> Vec<Site> {
        self.latency.simulate(Operation::ListSites).await;
        self.state.read().await.sites.clone()
    }

    /// Get a site by id
    pub async fn get_site(&self, site_id: SiteId) -> DirectoryResult<Site> {
        self.latency.simulate(Operation::Lookup).await;
        self.state
            .read()
            .await
            .sites
            .iter()
            .find(|s| s.id == site_id)
            .cloned()
            .ok_or(DirectoryError::SiteNotFound(site_id))
    }

    /// First site registered under `site_code`, if any
    pub async fn find_site_by_code(&self, site_code: &str) -> Option<Site> {
        self.latency.simulate(Operation::Lookup).await;
        self.state
            .read()
            .await
            .sites
            .iter()
            .find(|s| s.site_code == site_code)
            .cloned()
    }

    // ------------------------------------------------------------------
    // Tournaments
    // ------------------------------------------------------------------

    /// Create a tournament with an empty leaderboard and no registrations
    ///
    /// An unknown `site_id` does not fail the call; the tournament keeps the
    /// id with no site name.
    ///
    /// # Errors
    ///
    /// * `DirectoryError::Validation` - Empty name or a zero count
    pub async fn create_tournament(&self, request: NewTournament) -> DirectoryResult<Tournament> {
        self.latency.simulate(Operation::CreateTournament).await;
        request.validate()?;

        let mut state = self.state.write().await;
        let site_name = state
            .sites
            .iter()
            .find(|s| s.id == request.site_id)
            .map(|s| s.site_name.clone());

        if site_name.is_none() {
            warn!(
                "Creating tournament '{}' for unknown site {}",
                request.name, request.site_id
            );
        }

        let tournament = Tournament {
            id: state.next_tournament_id,
            name: request.name,
            site: SiteRef {
                id: request.site_id,
                site_name,
            },
            starting_chips: request.starting_chips,
            total_rounds: request.total_rounds,
            max_players: request.max_players,
            tournament_type: request.tournament_type,
            status: TournamentStatus::from_id(request.status_id),
            start_time: request.start_time,
            end_time: request.end_time,
            created_at: Utc::now(),
            registered_players: 0,
        };

        state.next_tournament_id += 1;
        state.leaderboards.insert(tournament.id, Vec::new());
        state.registrations.insert(tournament.id, Vec::new());
        state.tournaments.push(tournament.clone());

        info!(
            "Created tournament '{}' with ID {} ({} seats)",
            tournament.name, tournament.id, tournament.max_players
        );
        Ok(tournament)
    }

    /// All tournaments in insertion order
    pub async fn list_tournaments(&self) -> Vec<Tournament> {
        self.latency.simulate(Operation::ListTournaments).await;
        self.state.read().await.tournaments.clone()
    }

    /// Get a tournament by id
    pub async fn get_tournament(&self, tournament_id: TournamentId) -> DirectoryResult<Tournament> {
        self.latency.simulate(Operation::Lookup).await;
        self.state
            .read()
            .await
            .tournaments
            .iter()
            .find(|t| t.id == tournament_id)
            .cloned()
            .ok_or(DirectoryError::TournamentNotFound(tournament_id))
    }

    // ------------------------------------------------------------------
    // Leaderboards
    // ------------------------------------------------------------------

    /// Leaderboard in stored order with `rank` set to position + 1
    ///
    /// Entries are not re-sorted. Unknown tournaments yield an empty list.
    pub async fn get_leaderboard(&self, tournament_id: TournamentId) -> Vec<LeaderboardEntry> {
        self.latency.simulate(Operation::GetLeaderboard).await;
        let state = self.state.read().await;
        let entries = state
            .leaderboards
            .get(&tournament_id)
            .map(|entries| ranked(entries.iter().cloned()))
            .unwrap_or_default();

        debug!(
            "Leaderboard for tournament {} has {} entries",
            tournament_id,
            entries.len()
        );
        entries
    }

    /// Replace a tournament's standings
    ///
    /// Used by whatever scores the games; the given order becomes the
    /// stored order and any incoming `rank` is discarded. Registrations are
    /// not consulted.
    ///
    /// # Errors
    ///
    /// * `DirectoryError::TournamentNotFound` - Unknown tournament
    /// * `DirectoryError::Validation` - An entry has an empty username
    pub async fn publish_leaderboard(
        &self,
        tournament_id: TournamentId,
        entries: Vec<LeaderboardEntry>,
    ) -> DirectoryResult<Vec<LeaderboardEntry>> {
        self.latency.simulate(Operation::PublishLeaderboard).await;

        if entries.iter().any(|e| e.username.trim().is_empty()) {
            return Err(DirectoryError::validation(
                "leaderboard entries require a username",
            ));
        }

        let mut state = self.state.write().await;
        if !state.tournaments.iter().any(|t| t.id == tournament_id) {
            return Err(DirectoryError::TournamentNotFound(tournament_id));
        }

        let stored: Vec<_> = entries
            .into_iter()
            .map(|entry| LeaderboardEntry { rank: 0, ..entry })
            .collect();
        let published = ranked(stored.iter().cloned());
        state.leaderboards.insert(tournament_id, stored);

        info!(
            "Published {} leaderboard entries for tournament {}",
            published.len(),
            tournament_id
        );
        Ok(published)
    }

    // ------------------------------------------------------------------
    // Registrations
    // ------------------------------------------------------------------

    /// Register a player for a tournament
    ///
    /// Checks run in order: tournament exists, a seat is open, neither the
    /// username nor the email is already registered. The registration is
    /// stored and the seat taken together.
    ///
    /// # Errors
    ///
    /// * `DirectoryError::Validation` - Empty username or email
    /// * `DirectoryError::TournamentNotFound` - Unknown tournament
    /// * `DirectoryError::TournamentFull` - No open seats
    /// * `DirectoryError::AlreadyRegistered` - Username or email taken
    pub async fn register_player(
        &self,
        tournament_id: TournamentId,
        request: NewRegistration,
    ) -> DirectoryResult<Registration> {
        self.latency.simulate(Operation::RegisterPlayer).await;
        request.validate()?;

        let mut state = self.state.write().await;

        let index = state
            .tournaments
            .iter()
            .position(|t| t.id == tournament_id)
            .ok_or(DirectoryError::TournamentNotFound(tournament_id))?;

        let max_players = state.tournaments[index].max_players;
        if state.tournaments[index].is_full() {
            warn!(
                "Rejected {} for tournament {}: full at {} players",
                request.username, tournament_id, max_players
            );
            return Err(DirectoryError::TournamentFull {
                tournament_id,
                max_players,
            });
        }

        let collision = state
            .registrations
            .get(&tournament_id)
            .into_iter()
            .flatten()
            .find_map(|r| {
                if r.username == request.username {
                    Some(RegistrationField::Username)
                } else if r.email == request.email {
                    Some(RegistrationField::Email)
                } else {
                    None
                }
            });

        if let Some(field) = collision {
            warn!(
                "Rejected {} for tournament {}: {} already registered",
                request.username, tournament_id, field
            );
            return Err(DirectoryError::AlreadyRegistered {
                tournament_id,
                field,
            });
        }

        let registration = Registration {
            id: state.next_registration_id(),
            tournament_id,
            username: request.username,
            email: request.email,
            registered_at: Utc::now(),
        };
        state
            .registrations
            .entry(tournament_id)
            .or_default()
            .push(registration.clone());
        state.tournaments[index].registered_players += 1;

        info!(
            "Registered {} for tournament {} ({}/{})",
            registration.username,
            tournament_id,
            state.tournaments[index].registered_players,
            max_players
        );
        Ok(registration)
    }

    /// Registrations for a tournament in insertion order
    ///
    /// # Errors
    ///
    /// * `DirectoryError::TournamentNotFound` - Unknown tournament
    pub async fn list_registrations(
        &self,
        tournament_id: TournamentId,
    ) -> DirectoryResult<Vec<Registration>> {
        self.latency.simulate(Operation::Lookup).await;
        let state = self.state.read().await;
        if !state.tournaments.iter().any(|t| t.id == tournament_id) {
            return Err(DirectoryError::TournamentNotFound(tournament_id));
        }
        Ok(state
            .registrations
            .get(&tournament_id)
            .cloned()
            .unwrap_or_default())
    }

    /// Collection sizes; never delayed
    pub async fn stats(&self) -> DirectoryStats {
        let state = self.state.read().await;
        DirectoryStats {
            sites: state.sites.len(),
            tournaments: state.tournaments.len(),
            registrations: state.registrations.values().map(Vec::len).sum(),
        }
    }
}

fn ranked(entries: impl Iterator<Item = LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries
        .enumerate()
        .map(|(index, entry)| LeaderboardEntry {
            rank: index as u32 + 1,
            ..entry
        })
        .collect()
}
