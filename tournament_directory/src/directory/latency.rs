//! Simulated backend latency.
//!
//! The directory can answer instantly or pause before every call the way a
//! remote backend would. The pause happens before any state is locked.

use async_trait::async_trait;
use std::time::Duration;

/// Directory call being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateSite,
    ListSites,
    CreateTournament,
    ListTournaments,
    GetLeaderboard,
    PublishLeaderboard,
    RegisterPlayer,
    /// Single-record reads (by id or code) and registration listings
    Lookup,
}

/// Strategy deciding how long a directory call takes
#[async_trait]
pub trait LatencySimulator: Send + Sync {
    /// Suspend for the duration configured for `operation`
    async fn simulate(&self, operation: Operation);
}

/// Answers immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl LatencySimulator for NoLatency {
    async fn simulate(&self, _operation: Operation) {}
}

/// Per-operation delays in milliseconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyProfile {
    /// Creating sites or tournaments, publishing standings
    pub create_ms: u64,
    /// Listing sites or tournaments
    pub list_ms: u64,
    /// Reading a leaderboard
    pub leaderboard_ms: u64,
    /// Registering a player
    pub register_ms: u64,
    /// Single-record lookups
    pub lookup_ms: u64,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            create_ms: 500,
            list_ms: 300,
            leaderboard_ms: 400,
            register_ms: 500,
            lookup_ms: 300,
        }
    }
}

impl LatencyProfile {
    /// Profile with every delay set to zero
    pub fn zero() -> Self {
        Self {
            create_ms: 0,
            list_ms: 0,
            leaderboard_ms: 0,
            register_ms: 0,
            lookup_ms: 0,
        }
    }

    /// Load the profile from environment variables
    ///
    /// Reads `LATENCY_CREATE_MS`, `LATENCY_LIST_MS`, `LATENCY_LEADERBOARD_MS`,
    /// `LATENCY_REGISTER_MS` and `LATENCY_LOOKUP_MS`, falling back to the
    /// [`Default`] profile for anything missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            create_ms: parse_env_or("LATENCY_CREATE_MS", defaults.create_ms),
            list_ms: parse_env_or("LATENCY_LIST_MS", defaults.list_ms),
            leaderboard_ms: parse_env_or("LATENCY_LEADERBOARD_MS", defaults.leaderboard_ms),
            register_ms: parse_env_or("LATENCY_REGISTER_MS", defaults.register_ms),
            lookup_ms: parse_env_or("LATENCY_LOOKUP_MS", defaults.lookup_ms),
        }
    }

    /// Delay applied to `operation`
    pub fn delay_for(&self, operation: Operation) -> Duration {
        let ms = match operation {
            Operation::CreateSite | Operation::CreateTournament | Operation::PublishLeaderboard => {
                self.create_ms
            }
            Operation::ListSites | Operation::ListTournaments => self.list_ms,
            Operation::GetLeaderboard => self.leaderboard_ms,
            Operation::RegisterPlayer => self.register_ms,
            Operation::Lookup => self.lookup_ms,
        };
        Duration::from_millis(ms)
    }

    /// Longest delay in the profile
    pub fn max_delay(&self) -> Duration {
        let ms = [
            self.create_ms,
            self.list_ms,
            self.leaderboard_ms,
            self.register_ms,
            self.lookup_ms,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        Duration::from_millis(ms)
    }
}

/// Sleeps on the tokio timer for the profile's delay
#[derive(Debug, Clone, Default)]
pub struct FixedLatency {
    profile: LatencyProfile,
}

impl FixedLatency {
    pub fn new(profile: LatencyProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &LatencyProfile {
        &self.profile
    }
}

#[async_trait]
impl LatencySimulator for FixedLatency {
    async fn simulate(&self, operation: Operation) {
        let delay = self.profile.delay_for(operation);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
