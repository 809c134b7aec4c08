//! Directory data models.

use super::errors::{DirectoryError, DirectoryResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Site ID type
pub type SiteId = i64;

/// Tournament ID type
pub type TournamentId = i64;

/// Registration ID type (Unix milliseconds at registration)
pub type RegistrationId = i64;

/// Status id whose display name is `ACTIVE`
pub const ACTIVE_STATUS_ID: i32 = 1;

/// Status id applied when the caller supplies none
pub const DEFAULT_STATUS_ID: i32 = 2;

/// Site status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SiteStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteStatus::Active => write!(f, "ACTIVE"),
            SiteStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

impl FromStr for SiteStatus {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(SiteStatus::Active),
            "INACTIVE" => Ok(SiteStatus::Inactive),
            _ => Err(DirectoryError::validation(format!(
                "status must be ACTIVE or INACTIVE, got '{s}'"
            ))),
        }
    }
}

/// Tournament type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TournamentType {
    /// Player versus dealer
    #[default]
    Pvd,
    /// Player versus player
    Pvp,
}

impl std::fmt::Display for TournamentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentType::Pvd => write!(f, "PVD"),
            TournamentType::Pvp => write!(f, "PVP"),
        }
    }
}

impl FromStr for TournamentType {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PVD" => Ok(TournamentType::Pvd),
            "PVP" => Ok(TournamentType::Pvp),
            _ => Err(DirectoryError::validation(format!(
                "tournamentType must be PVD or PVP, got '{s}'"
            ))),
        }
    }
}

/// Tournament status as shown to players.
///
/// Informational only: the name is derived from the id and no transitions
/// are enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentStatus {
    pub id: i32,
    pub name: String,
}

impl TournamentStatus {
    /// Build a status from its id (`1` is ACTIVE, anything else CREATED)
    pub fn from_id(id: i32) -> Self {
        let name = if id == ACTIVE_STATUS_ID {
            "ACTIVE"
        } else {
            "CREATED"
        };
        Self {
            id,
            name: name.to_string(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.id == ACTIVE_STATUS_ID
    }
}

impl Default for TournamentStatus {
    fn default() -> Self {
        Self::from_id(DEFAULT_STATUS_ID)
    }
}

/// Venue hosting tournaments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: SiteId,
    pub site_code: String,
    pub site_name: String,
    pub status: SiteStatus,
    pub created_at: DateTime<Utc>,
}

/// Site reference stored on a tournament.
///
/// `site_name` is a snapshot taken at creation; it is `None` when the id did
/// not resolve to a known site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRef {
    pub id: SiteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
}

/// Tournament record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub site: SiteRef,
    pub starting_chips: u32,
    pub total_rounds: u32,
    pub max_players: u32,
    pub tournament_type: TournamentType,
    pub status: TournamentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Always `<= max_players`
    pub registered_players: u32,
}

impl Tournament {
    pub fn is_full(&self) -> bool {
        self.registered_players >= self.max_players
    }

    pub fn open_seats(&self) -> u32 {
        self.max_players.saturating_sub(self.registered_players)
    }
}

/// Player registration for one tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: RegistrationId,
    pub tournament_id: TournamentId,
    pub username: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

/// One leaderboard row.
///
/// `rank` is not a property of the player: it is recomputed from the row's
/// position every time the leaderboard is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub username: String,
    pub chips_current: u64,
    pub total_wins: u32,
    pub total_losses: u32,
    #[serde(default)]
    pub rank: u32,
}

impl LeaderboardEntry {
    /// Create an unranked entry
    pub fn new(username: impl Into<String>, chips_current: u64, total_wins: u32, total_losses: u32) -> Self {
        Self {
            username: username.into(),
            chips_current,
            total_wins,
            total_losses,
            rank: 0,
        }
    }
}

/// Input for creating a site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSite {
    pub site_code: String,
    pub site_name: String,
    pub status: SiteStatus,
}

impl NewSite {
    /// Create an ACTIVE site request
    pub fn new(site_code: impl Into<String>, site_name: impl Into<String>) -> Self {
        Self {
            site_code: site_code.into(),
            site_name: site_name.into(),
            status: SiteStatus::default(),
        }
    }

    pub fn with_status(mut self, status: SiteStatus) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn validate(&self) -> DirectoryResult<()> {
        require("siteCode", &self.site_code)?;
        require("siteName", &self.site_name)
    }
}

/// Input for creating a tournament
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTournament {
    pub name: String,
    pub site_id: SiteId,
    pub starting_chips: u32,
    pub total_rounds: u32,
    pub max_players: u32,
    pub tournament_type: TournamentType,
    pub status_id: i32,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl NewTournament {
    /// Create a PVD tournament request in CREATED status with no schedule
    pub fn new(
        name: impl Into<String>,
        site_id: SiteId,
        starting_chips: u32,
        total_rounds: u32,
        max_players: u32,
    ) -> Self {
        Self {
            name: name.into(),
            site_id,
            starting_chips,
            total_rounds,
            max_players,
            tournament_type: TournamentType::default(),
            status_id: DEFAULT_STATUS_ID,
            start_time: None,
            end_time: None,
        }
    }

    pub fn with_type(mut self, tournament_type: TournamentType) -> Self {
        self.tournament_type = tournament_type;
        self
    }

    pub fn with_status_id(mut self, status_id: i32) -> Self {
        self.status_id = status_id;
        self
    }

    pub fn with_schedule(
        mut self,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    pub(crate) fn validate(&self) -> DirectoryResult<()> {
        require("name", &self.name)?;
        require_positive("startingChips", self.starting_chips)?;
        require_positive("totalRounds", self.total_rounds)?;
        require_positive("maxPlayers", self.max_players)
    }
}

/// Input for registering a player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub username: String,
    pub email: String,
}

impl NewRegistration {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    pub(crate) fn validate(&self) -> DirectoryResult<()> {
        require("username", &self.username)?;
        require("email", &self.email)
    }
}

/// Collection sizes, for health checks and metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub sites: usize,
    pub tournaments: usize,
    pub registrations: usize,
}

/// Parse an ISO-8601 (RFC 3339) boundary timestamp
pub fn parse_timestamp(field: &str, value: &str) -> DirectoryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            DirectoryError::validation(format!(
                "{field} must be an ISO-8601 timestamp, got '{value}'"
            ))
        })
}

fn require(field: &str, value: &str) -> DirectoryResult<()> {
    if value.trim().is_empty() {
        return Err(DirectoryError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_positive(field: &str, value: u32) -> DirectoryResult<()> {
    if value == 0 {
        return Err(DirectoryError::validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}
