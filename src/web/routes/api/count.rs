use axum::{extract::State, Json};
use tracing::info;

use crate::{
    mailjet_client,
    web::{types::CountResponse, WebResult},
    AppState,
};

#[derive(Debug, thiserror::Error)]
pub enum CountError {
    #[error("mailjet error: {0}")]
    Mailjet(#[from] mailjet_client::Error),
}

#[tracing::instrument(name = "Counting waitlist subscribers", skip(app_state))]
pub async fn count(State(app_state): State<AppState>) -> WebResult<Json<CountResponse>> {
    let count = app_state
        .mailjet_client
        .waitlist()
        .map_err(CountError::Mailjet)?
        .subscriber_count()
        .await
        .map_err(CountError::Mailjet)?;
    info!(count, "SUCCESS!");

    Ok(Json(CountResponse { count }))
}
