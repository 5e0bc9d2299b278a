use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;
use strum_macros::AsRefStr;

use super::routes::{CountError, SubscribeError};
use crate::mailjet_client;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("method not allowed: {0}")]
    MethodNotAllowed(Method),

    #[error("subscribe error: {0}")]
    Subscribe(#[from] SubscribeError),
    #[error("count error: {0}")]
    Count(#[from] CountError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, MethodNotAllowed),
            Error::Subscribe(SubscribeError::BodyRejected(msg)) => {
                (StatusCode::BAD_REQUEST, InvalidInput(msg.clone()))
            }
            Error::Subscribe(SubscribeError::DataParsing(data_er)) => {
                (StatusCode::BAD_REQUEST, InvalidInput(data_er.to_string()))
            }
            Error::Subscribe(SubscribeError::Mailjet(mj_er))
            | Error::Count(CountError::Mailjet(mj_er)) => mailjet_status_and_client_error(mj_er),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

fn mailjet_status_and_client_error(error: &mailjet_client::Error) -> (StatusCode, ClientError) {
    use mailjet_client::Error::*;

    match error {
        MissingCredentials | InvalidCredentials => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ClientError::MissingConfiguration,
        ),
        Rejected { payload, .. } => (
            StatusCode::BAD_REQUEST,
            ClientError::VendorRejected(payload.clone()),
        ),
        UrlParsing(_) | Reqwest(_) | Deser(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ClientError::VendorUnavailable(error.to_string()),
        ),
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// What the front end gets to see. Rendered as `{"success": false, "error": ...}`.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Method not allowed")]
    MethodNotAllowed,
    #[display("{_0}")]
    InvalidInput(String),
    #[display("Missing environment variables")]
    MissingConfiguration,
    #[display("{_0}")]
    VendorRejected(Value),
    #[display("{_0}")]
    VendorUnavailable(String),
    #[display("Service error")]
    ServiceError,
}

impl ClientError {
    /// The `error` field of the response body; vendor payloads are passed through as JSON.
    pub fn detail(&self) -> Value {
        match self {
            ClientError::VendorRejected(payload) => payload.clone(),
            other => json!(other.to_string()),
        }
    }

    pub fn body(&self) -> Value {
        json!({
            "success": false,
            "error": self.detail(),
        })
    }
}
