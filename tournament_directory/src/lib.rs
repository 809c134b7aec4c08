//! # Tournament Directory
//!
//! An in-memory directory for poker-style tournaments: the venues ("sites")
//! that host them, the tournaments themselves, player registrations and the
//! per-tournament leaderboards.
//!
//! The whole directory is owned by a single [`DirectoryManager`]. It is cheap
//! to clone (the state sits behind an `Arc`) so one instance can be shared by
//! every request handler of a server process.
//!
//! ## Core Modules
//!
//! - [`directory`]: Data models, errors, the latency strategy and the manager
//!
//! ## Example
//!
//! ```
//! use tournament_directory::{DirectoryManager, NewRegistration, NewSite, NewTournament};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), tournament_directory::DirectoryError> {
//! let directory = DirectoryManager::default();
//!
//! let site = directory
//!     .create_site(NewSite::new("SITE003", "Monaco Casino"))
//!     .await?;
//! let tournament = directory
//!     .create_tournament(NewTournament::new("Spring Open", site.id, 5000, 10, 2))
//!     .await?;
//!
//! directory
//!     .register_player(tournament.id, NewRegistration::new("alice", "alice@example.com"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// Sites, tournaments, registrations and leaderboards.
pub mod directory;

pub use directory::{
    DirectoryError, DirectoryManager, DirectoryResult, DirectoryStats, ErrorKind,
    FixedLatency, LatencyProfile, LatencySimulator, LeaderboardEntry, NewRegistration, NewSite,
    NewTournament, NoLatency, Operation, Registration, RegistrationField, Site, SiteId, SiteRef,
    SiteStatus, Tournament, TournamentId, TournamentStatus, TournamentType,
};
