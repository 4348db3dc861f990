use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::{ApiError, ApiJson, ApiQuery};
use crate::models::{Application, ApplicationForm, ApplicationStatus};
use crate::storage::{append_application, read_applications};

#[derive(Debug, Deserialize)]
pub struct ListApplicationsParams {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationsResponse {
    pub applications: Vec<Application>,
}

pub async fn submit_application(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ApplicationForm>,
) -> Result<(StatusCode, Json<Application>), ApiError> {
    let application =
        Application::from_form(form).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    append_application(&state.storage, &application)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(
        "Application {} from {} for {}",
        application.id, application.username, application.gamemode
    );
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn list_applications(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListApplicationsParams>,
) -> Result<Json<ApplicationsResponse>, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<ApplicationStatus>)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let mut applications =
        read_applications(&state.storage).map_err(|e| ApiError::Internal(e.to_string()))?;
    if let Some(status) = status {
        applications.retain(|a| a.status == status);
    }

    Ok(Json(ApplicationsResponse { applications }))
}
