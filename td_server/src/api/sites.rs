//! Site endpoints.

use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tournament_directory::{NewSite, Site, SiteId, SiteStatus};

use super::{AppState, errors::ApiError};
use crate::metrics;

/// Create site request body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSiteRequest {
    #[serde(default)]
    pub site_code: String,
    #[serde(default)]
    pub site_name: String,
    /// `ACTIVE` or `INACTIVE`; ACTIVE when absent
    pub status: Option<String>,
}

impl CreateSiteRequest {
    fn into_new_site(self) -> Result<NewSite, ApiError> {
        let site = NewSite::new(self.site_code, self.site_name);
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(site),
            Some(status) => Ok(site.with_status(status.parse::<SiteStatus>()?)),
        }
    }
}

/// Create a site.
///
/// ```bash
/// curl -X POST http://localhost:6969/api/v1/sites \
///   -H "Content-Type: application/json" \
///   -d '{"siteCode":"SITE003","siteName":"Monaco Casino"}'
/// ```
pub async fn create_site(
    State(state): State<AppState>,
    body: Result<Json<CreateSiteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Site>), ApiError> {
    let Json(request) = body?;
    let site = state.directory.create_site(request.into_new_site()?).await?;

    metrics::directory_size(state.directory.stats().await);

    Ok((StatusCode::CREATED, Json(site)))
}

/// List all sites in creation order.
pub async fn list_sites(State(state): State<AppState>) -> Json<Vec<Site>> {
    Json(state.directory.list_sites().await)
}

pub async fn get_site(
    State(state): State<AppState>,
    Path(site_id): Path<SiteId>,
) -> Result<Json<Site>, ApiError> {
    Ok(Json(state.directory.get_site(site_id).await?))
}

/// First site whose code matches exactly.
pub async fn get_site_by_code(
    State(state): State<AppState>,
    Path(site_code): Path<String>,
) -> Result<Json<Site>, ApiError> {
    state
        .directory
        .find_site_by_code(&site_code)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Site not found"))
}
