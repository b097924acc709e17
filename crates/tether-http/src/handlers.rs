use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use tether_domain::{Channel, ChannelService, DomainError, Thing, ThingService};

use crate::error::ApiError;
use crate::query::parse_pagination;

const CONTENT_TYPE_JSON: &str = "application/json";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub things: Arc<ThingService>,
    pub channels: Arc<ChannelService>,
}

/// The management credential travels verbatim in the Authorization header;
/// a missing header becomes an empty credential and dies on the oracle path.
fn credential(headers: &HeaderMap) -> &str {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Creation and update bodies must declare exactly `application/json`;
/// anything else fails before the body is even looked at.
fn require_json(headers: &HeaderMap) -> Result<(), ApiError> {
    match headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    {
        Some(CONTENT_TYPE_JSON) => Ok(()),
        _ => Err(ApiError::UnsupportedContentType),
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|err| ApiError::Domain(DomainError::MalformedEntity(err.to_string())))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

// Things

pub async fn add_thing(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    require_json(&headers)?;
    let thing: Thing = decode(&body)?;

    let thing = state.things.add(credential(&headers), thing).await?;
    Ok((StatusCode::CREATED, Json(thing)))
}

pub async fn update_thing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    require_json(&headers)?;
    let mut thing: Thing = decode(&body)?;
    thing.id = id;

    state.things.update(credential(&headers), thing).await?;
    Ok(StatusCode::OK)
}

pub async fn view_thing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Thing>, ApiError> {
    let thing = state.things.view(credential(&headers), &id).await?;
    Ok(Json(thing))
}

pub async fn list_things(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Json<Vec<Thing>>, ApiError> {
    let (offset, limit) = parse_pagination(query.as_deref())?;
    let things = state
        .things
        .list(credential(&headers), offset, limit)
        .await?;
    Ok(Json(things))
}

pub async fn remove_thing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state.things.remove(credential(&headers), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Channels

pub async fn create_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    require_json(&headers)?;
    let channel: Channel = decode(&body)?;

    let channel = state.channels.create(credential(&headers), channel).await?;
    Ok((StatusCode::CREATED, Json(channel)))
}

pub async fn update_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    require_json(&headers)?;
    let mut channel: Channel = decode(&body)?;
    channel.id = id;

    state
        .channels
        .update(credential(&headers), channel)
        .await?;
    Ok(StatusCode::OK)
}

pub async fn view_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Channel>, ApiError> {
    let channel = state.channels.view(credential(&headers), &id).await?;
    Ok(Json(channel))
}

pub async fn list_channels(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Json<Vec<Channel>>, ApiError> {
    let (offset, limit) = parse_pagination(query.as_deref())?;
    let channels = state
        .channels
        .list(credential(&headers), offset, limit)
        .await?;
    Ok(Json(channels))
}

pub async fn remove_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state.channels.remove(credential(&headers), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Connectivity

pub async fn connect(
    State(state): State<AppState>,
    Path((id, thing_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state
        .channels
        .connect(credential(&headers), &id, &thing_id)
        .await?;
    Ok(StatusCode::OK)
}

pub async fn disconnect(
    State(state): State<AppState>,
    Path((id, thing_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state
        .channels
        .disconnect(credential(&headers), &id, &thing_id)
        .await?;
    Ok(StatusCode::OK)
}
