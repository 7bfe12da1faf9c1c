use crate::error::{AppError, Result};
use crate::extract::CurrentUser;
use crate::model::PasteForm;
use crate::state::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use pasta_core::{PasteId, ServiceError};

pub async fn create_paste_handler(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    form: std::result::Result<Form<PasteForm>, FormRejection>,
) -> Result<Response> {
    let identity = identity.ok_or(ServiceError::Unauthenticated)?;
    let Form(form) = form.map_err(|rejection| AppError::InvalidForm(rejection.body_text()))?;

    let id = state
        .pastebin()
        .create(form.into(), Some(&identity))
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, id.to_path())]).into_response())
}

pub async fn delete_paste_handler(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<StatusCode> {
    let identity = identity.ok_or(ServiceError::Unauthenticated)?;
    let id = PasteId::new(raw_id.as_str()).map_err(|_| ServiceError::NotFound(raw_id))?;

    state.pastebin().delete(&id, Some(&identity)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_without_id_handler(CurrentUser(identity): CurrentUser) -> Result<StatusCode> {
    identity.ok_or(ServiceError::Unauthenticated)?;
    Err(AppError::MissingId)
}
