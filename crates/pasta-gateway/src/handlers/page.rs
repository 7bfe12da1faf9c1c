use crate::error::Result;
use crate::state::AppState;
use crate::views::{render, ArchiveRow, ArchiveTemplate, IndexTemplate, PasteTemplate};
use axum::extract::{Path, State};
use axum::response::Html;
use pasta_core::{PasteId, ServiceError};
use tracing::trace;

pub async fn index_handler() -> Result<Html<String>> {
    render(&IndexTemplate)
}

pub async fn show_paste_handler(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    // Anything that cannot be an id cannot name a stored paste.
    let id = PasteId::new(raw_id.as_str()).map_err(|_| ServiceError::NotFound(raw_id))?;
    trace!(id = %id, "rendering paste");

    let paste = state.pastebin().get(&id).await?;
    render(&PasteTemplate {
        paste: paste.into(),
    })
}

pub async fn archive_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let rows = state
        .pastebin()
        .list_recent()
        .await?
        .into_iter()
        .map(ArchiveRow::from)
        .collect();

    render(&ArchiveTemplate { rows })
}
