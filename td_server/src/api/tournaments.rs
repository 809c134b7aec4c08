//! Tournament, leaderboard and registration endpoints.

use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tournament_directory::{
    DirectoryError, LeaderboardEntry, NewRegistration, NewTournament, Registration, Tournament,
    TournamentId, TournamentType, directory::models::{DEFAULT_STATUS_ID, parse_timestamp},
};

use super::{AppState, errors::ApiError, request_id::RequestId};
use crate::metrics;

/// `{ "id": ... }` reference as sent by clients
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

/// Create tournament request body.
///
/// The site may be given as `site: { id }` or `siteId`, the status as
/// `status: { id }` or `statusId`. Empty schedule strings count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournamentRequest {
    #[serde(default)]
    pub name: String,
    pub site: Option<IdRef>,
    pub site_id: Option<i64>,
    pub starting_chips: Option<i64>,
    pub total_rounds: Option<i64>,
    pub max_players: Option<i64>,
    pub tournament_type: Option<String>,
    pub status: Option<IdRef>,
    pub status_id: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl CreateTournamentRequest {
    fn into_new_tournament(self) -> Result<NewTournament, DirectoryError> {
        let site_id = self
            .site
            .map(|site| site.id)
            .or(self.site_id)
            .ok_or_else(|| DirectoryError::validation("site.id is required"))?;

        let status_id = match self.status.map(|status| status.id).or(self.status_id) {
            Some(id) => i32::try_from(id)
                .map_err(|_| DirectoryError::validation(format!("status id {id} is out of range")))?,
            None => DEFAULT_STATUS_ID,
        };

        let tournament_type = match non_empty(self.tournament_type.as_deref()) {
            Some(value) => value.parse::<TournamentType>()?,
            None => TournamentType::default(),
        };

        let start_time = non_empty(self.start_time.as_deref())
            .map(|value| parse_timestamp("startTime", value))
            .transpose()?;
        let end_time = non_empty(self.end_time.as_deref())
            .map(|value| parse_timestamp("endTime", value))
            .transpose()?;

        Ok(NewTournament::new(
            self.name,
            site_id,
            count("startingChips", self.starting_chips)?,
            count("totalRounds", self.total_rounds)?,
            count("maxPlayers", self.max_players)?,
        )
        .with_type(tournament_type)
        .with_status_id(status_id)
        .with_schedule(start_time, end_time))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Missing counts become 0 and are rejected by the directory.
fn count(field: &str, value: Option<i64>) -> Result<u32, DirectoryError> {
    match value {
        None => Ok(0),
        Some(v) if v <= 0 => Err(DirectoryError::validation(format!(
            "{field} must be greater than 0"
        ))),
        Some(v) => u32::try_from(v)
            .map_err(|_| DirectoryError::validation(format!("{field} is too large"))),
    }
}

/// Register player request body
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Create a tournament.
///
/// ```bash
/// curl -X POST http://localhost:6969/api/v1/tournaments \
///   -H "Content-Type: application/json" \
///   -d '{"name":"Spring Open","site":{"id":1},"startingChips":5000,"totalRounds":10,"maxPlayers":50}'
/// ```
pub async fn create_tournament(
    State(state): State<AppState>,
    body: Result<Json<CreateTournamentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Tournament>), ApiError> {
    let Json(request) = body?;
    let tournament = state
        .directory
        .create_tournament(request.into_new_tournament()?)
        .await?;

    metrics::directory_size(state.directory.stats().await);

    Ok((StatusCode::CREATED, Json(tournament)))
}

pub async fn list_tournaments(State(state): State<AppState>) -> Json<Vec<Tournament>> {
    Json(state.directory.list_tournaments().await)
}

pub async fn get_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<Json<Tournament>, ApiError> {
    Ok(Json(state.directory.get_tournament(tournament_id).await?))
}

/// Ranked leaderboard; empty for unknown tournaments.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Json<Vec<LeaderboardEntry>> {
    Json(state.directory.get_leaderboard(tournament_id).await)
}

/// Replace a tournament's standings. Incoming `rank` values are ignored.
///
/// ```bash
/// curl -X PUT http://localhost:6969/api/v1/tournaments/1/leaderboard \
///   -H "Content-Type: application/json" \
///   -d '[{"username":"alice","chipsCurrent":9000,"totalWins":3,"totalLosses":1}]'
/// ```
pub async fn publish_leaderboard(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
    body: Result<Json<Vec<LeaderboardEntry>>, JsonRejection>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let Json(entries) = body?;
    Ok(Json(
        state
            .directory
            .publish_leaderboard(tournament_id, entries)
            .await?,
    ))
}

/// Register a player.
///
/// ```bash
/// curl -X POST http://localhost:6969/api/v1/tournaments/1/registrations \
///   -H "Content-Type: application/json" \
///   -d '{"username":"alice","email":"alice@example.com"}'
/// ```
pub async fn register_player(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(tournament_id): Path<TournamentId>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let Json(request) = body?;

    let result = state
        .directory
        .register_player(
            tournament_id,
            NewRegistration::new(request.username, request.email),
        )
        .await;

    match result {
        Ok(registration) => {
            metrics::registration_attempts_total("ok");
            metrics::directory_size(state.directory.stats().await);
            tracing::info!(
                request_id = %request_id.as_str(),
                tournament_id,
                registration_id = registration.id,
                "Player registered"
            );
            Ok((StatusCode::CREATED, Json(registration)))
        }
        Err(err) => {
            metrics::registration_attempts_total(err.kind().as_str());
            tracing::warn!(
                request_id = %request_id.as_str(),
                tournament_id,
                error = %err,
                "Registration rejected"
            );
            Err(err.into())
        }
    }
}

pub async fn list_registrations(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<Json<Vec<Registration>>, ApiError> {
    Ok(Json(
        state.directory.list_registrations(tournament_id).await?,
    ))
}
