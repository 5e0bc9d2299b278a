use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::{
    mailjet_client,
    web::{
        types::{DataParsingError, SubscribeBody, SubscribeResponse, WaitlistEmail},
        WebResult,
    },
    AppState,
};

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
    #[error("request body rejected: {0}")]
    BodyRejected(String),
    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("mailjet error: {0}")]
    Mailjet(#[from] mailjet_client::Error),
}

// ###################################
// ->   API
// ###################################
/// Credentials are checked before the body, a misconfigured server answers 500 to everyone.
#[tracing::instrument(
    name = "Adding an email to the waitlist",
    skip(app_state, body),
    fields(subscriber_email = tracing::field::Empty)
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    body: Result<Json<SubscribeBody>, JsonRejection>,
) -> WebResult<Json<SubscribeResponse>> {
    let waitlist = app_state
        .mailjet_client
        .waitlist()
        .map_err(SubscribeError::Mailjet)?;

    let Json(body) = body.map_err(|rej| SubscribeError::BodyRejected(rej.body_text()))?;
    let email = WaitlistEmail::parse(body.email.unwrap_or_default())
        .map_err(SubscribeError::DataParsing)?;
    tracing::Span::current().record("subscriber_email", email.as_ref());

    waitlist
        .subscribe(&email)
        .await
        .map_err(SubscribeError::Mailjet)?;
    info!("SUCCESS!");

    Ok(Json(SubscribeResponse::succeeded()))
}
