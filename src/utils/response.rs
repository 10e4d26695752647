use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// `{ success: true, data, message }`, the body of every 2xx reply.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

#[derive(Serialize)]
pub struct Failure<'a> {
    pub code: &'a str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct FailureEnvelope<'a> {
    pub success: bool,
    pub error: Failure<'a>,
}

fn reply<T: Serialize>(status: StatusCode, data: T, message: impl Into<String>) -> Response {
    let envelope = Envelope {
        success: true,
        data,
        message: message.into(),
    };
    (status, Json(envelope)).into_response()
}

pub fn success<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    reply(StatusCode::OK, data, message)
}

pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    reply(StatusCode::CREATED, data, message)
}

pub fn error(
    code: &str,
    message: impl Into<String>,
    details: Option<Value>,
    status: StatusCode,
) -> Response {
    let envelope = FailureEnvelope {
        success: false,
        error: Failure {
            code,
            message: message.into(),
            details,
        },
    };
    (status, Json(envelope)).into_response()
}
