//! Directory module holding every collection the presentation layer reads.
//!
//! This module provides:
//! - Site registration and listing
//! - Tournament creation, listing and lookup
//! - Player registration with capacity and duplicate checks
//! - Leaderboards with ranks derived from stored order
//! - A pluggable latency strategy that imitates a remote backend
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use tournament_directory::directory::{DirectoryManager, FixedLatency, LatencyProfile};
//!
//! # #[tokio::main]
//! # async fn main() {
//! // Seeded directory with the default simulated delays
//! let directory = DirectoryManager::with_demo_data(Arc::new(FixedLatency::new(
//!     LatencyProfile::default(),
//! )));
//!
//! let leaderboard = directory.get_leaderboard(1).await;
//! assert_eq!(leaderboard[0].rank, 1);
//! # }
//! ```

pub mod errors;
pub mod fixtures;
pub mod latency;
pub mod manager;
pub mod models;

pub use errors::{DirectoryError, DirectoryResult, ErrorKind, RegistrationField};
pub use latency::{FixedLatency, LatencyProfile, LatencySimulator, NoLatency, Operation};
pub use manager::DirectoryManager;
pub use models::{
    DirectoryStats, LeaderboardEntry, NewRegistration, NewSite, NewTournament, Registration,
    RegistrationId, Site, SiteId, SiteRef, SiteStatus, Tournament, TournamentId,
    TournamentStatus, TournamentType,
};
