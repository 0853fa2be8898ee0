//! Request/response normalization shared by every HTTP handler.
//!
//! Free functions over the [`Parts`] and [`Body`] of the in-flight exchange,
//! replacing per-handler boilerplate for parameter extraction, JSON
//! (de)serialization and error formatting. Every response built here is one
//! of three shapes: a JSON body, the canonical error body
//! `{errcode, error, success: false}` with a non-2xx status, or a verbatim
//! relay of an upstream-computed response.
//!
//! The body stream of an exchange is single-shot: [`read_body_utf8`],
//! [`parse_json_body`] and [`parse_json_field`] consume the [`Body`] by
//! value, so a second read is a type error rather than a runtime surprise.
//! Callers needing the parsed value twice must cache it.

use std::borrow::Cow;
use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    extract::ConnectInfo,
    response::{IntoResponse, Response},
    Json,
};
use http::{request::Parts, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Map, Value};

use crate::types::{DomainError, HandlerError, UpstreamResponse};

/// Cap on buffered request bodies. Requests to this service are small JSON
/// documents; anything larger is a transport anomaly.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Returns the caller's network address as recorded by the transport, or
/// `"unknown"` if connection info was not propagated to this exchange.
#[must_use]
pub fn remote_address(parts: &Parts) -> String {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_owned(), |info| info.0.ip().to_string())
}

/// Returns the first value bound to `name` in the query string, with
/// `+`-as-space and percent-decoding applied.
///
/// An absent parameter decodes the empty string and yields `Ok("")` rather
/// than an error.
///
/// # Errors
///
/// [`HandlerError::Decoding`] if the raw value is not valid percent-encoded
/// UTF-8.
pub fn query_param(parts: &Parts, name: &str) -> Result<String, HandlerError> {
    let raw = parts
        .uri
        .query()
        .unwrap_or("")
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decoded_key_matches(key, name))
        .map_or("", |(_, value)| value);

    // Form encoding spells spaces as '+'; normalize before percent-decoding.
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(Cow::into_owned)
        .map_err(|_| HandlerError::Decoding {
            name: name.to_owned(),
        })
}

/// Parameter names are matched decoded, like their values. A key that does
/// not decode cleanly cannot be the one the caller named, so it never
/// matches.
fn decoded_key_matches(key: &str, name: &str) -> bool {
    let key = key.replace('+', " ");
    urlencoding::decode(&key).is_ok_and(|decoded| decoded == name)
}

/// Returns the value of a path template variable.
///
/// Path variables are modeled as query parameters in this layer; this exists
/// so call sites can state their intent.
///
/// # Errors
///
/// Same as [`query_param`].
pub fn path_variable(parts: &Parts, name: &str) -> Result<String, HandlerError> {
    query_param(parts, name)
}

/// Reads the entire request body as UTF-8 text. Single-shot.
///
/// # Errors
///
/// [`HandlerError::BodyRead`] if the stream fails or the bytes are not
/// valid UTF-8.
pub async fn read_body_utf8(body: Body) -> Result<String, HandlerError> {
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|err| HandlerError::BodyRead(err.to_string()))?;
    String::from_utf8(bytes.to_vec()).map_err(|err| HandlerError::BodyRead(err.to_string()))
}

/// Deserializes the request body as a JSON value of type `T`.
///
/// # Errors
///
/// [`HandlerError::BodyRead`] if the stream cannot be read;
/// [`HandlerError::Json`] with the codec's own error if the JSON is
/// rejected.
pub async fn parse_json_body<T: DeserializeOwned>(body: Body) -> Result<T, HandlerError> {
    let text = read_body_utf8(body).await?;
    serde_json::from_str(&text).map_err(HandlerError::from)
}

/// Parses the body as a JSON object and returns the nested object bound to
/// `key`.
///
/// # Errors
///
/// [`HandlerError::MissingJsonObject`] if the top-level value is not an
/// object or `key` is absent or not an object, plus everything
/// [`parse_json_body`] can fail with.
pub async fn parse_json_field(body: Body, key: &str) -> Result<Map<String, Value>, HandlerError> {
    let value: Value = parse_json_body(body).await?;
    value
        .get(key)
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| HandlerError::MissingJsonObject {
            key: key.to_owned(),
        })
}

/// Writes `text` as the full response body, UTF-8 encoded. No content-type
/// or status side effects; the status is 200 by construction.
#[must_use]
pub fn body_response(text: impl Into<String>) -> Response {
    Response::new(Body::from(text.into()))
}

/// Serializes `value` and emits it with `Content-Type: application/json`
/// and the given status. All structured JSON output flows through here, so
/// status, header and body are set together.
pub fn json_response_with_status<T: Serialize>(status: StatusCode, value: &T) -> Response {
    (status, Json(value)).into_response()
}

/// Serializes `value` as a 200 JSON response.
pub fn json_response<T: Serialize>(value: &T) -> Response {
    json_response_with_status(StatusCode::OK, value)
}

/// Builds the canonical error body and records the failure.
///
/// This is the only place error telemetry is produced: an error that never
/// reaches the wire is never logged, and one that does is logged exactly
/// once, with the request method and URL.
pub fn build_error_body(parts: &Parts, errcode: &str, error: &str) -> Value {
    tracing::info!(
        "Request {} {} - error {}: {}",
        parts.method,
        parts.uri,
        errcode,
        error
    );
    json!({
        "errcode": errcode,
        "error": error,
        "success": false,
    })
}

/// Emits the canonical error body with the given status.
pub fn error_response(parts: &Parts, status: StatusCode, errcode: &str, error: &str) -> Response {
    json_response_with_status(status, &build_error_body(parts, errcode, error))
}

/// Translates a [`DomainError`] to the wire: its declared status and the
/// canonical error body. The single sanctioned path from internal error to
/// error response.
pub fn domain_error_response(parts: &Parts, err: &DomainError) -> Response {
    error_response(parts, err.status(), err.code(), err.message())
}

/// Relays an upstream-computed response verbatim: its status, every one of
/// its header values (appended, so headers already on the response survive),
/// and its body as UTF-8 text.
#[must_use]
pub fn relay_upstream(upstream: &UpstreamResponse) -> Response {
    let mut response = body_response(upstream.body().to_owned());
    *response.status_mut() = upstream.status();
    for (name, value) in upstream.headers() {
        response.headers_mut().append(name.clone(), value.clone());
    }
    response
}
