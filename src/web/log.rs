use axum::http::{Method, StatusCode, Uri};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use super::{ClientError, Error};

pub fn log_request(
    req_id: &str,
    req_method: &Method,
    uri: &Uri,
    status_code: StatusCode,
    web_error: Option<&Error>,
    client_status_and_error: Option<&(StatusCode, ClientError)>,
) {
    let logline = LogLine {
        timestamp: chrono::Utc::now().to_rfc3339(),
        req_id,
        req_method: req_method.as_str(),
        uri: uri.to_string(),
        status_code: client_status_and_error
            .map(|(sc, _)| sc.as_u16())
            .unwrap_or(status_code.as_u16()),
        client_error_type: client_status_and_error.map(|(_, ce)| ce.as_ref()),
        web_error_type: web_error.map(|we| we.as_ref()),
        web_error_data: web_error.map(|we| we.to_string()),
    };

    debug!("LOGLINE: {}", json!(logline));
}

#[derive(Serialize)]
struct LogLine<'a> {
    timestamp: String,
    req_id: &'a str,

    req_method: &'a str,
    uri: String,
    status_code: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    client_error_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_error_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_error_data: Option<String>,
}
