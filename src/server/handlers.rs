use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
};
use serde_json::{Value, json};

use super::{
    auth::AuthenticatedUser,
    error::{AppError, AppResult},
    models::{BoatPatch, BoatPayload},
    state::AppState,
};
use crate::connection::{BOATS_COLLECTION, BOATS_RESOURCE, PROFILE_RESOURCE};
use crate::core::{Boat, BoatData, BoatId};

const NAME_MANDATORY: &str = "Name is mandatory";
const DESCRIPTION_MANDATORY: &str = "Description is mandatory";

pub async fn list_boats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Value>> {
    let base = base_url(&headers);
    let boats = state.repo.list().await?;
    let items: Vec<Value> = boats.iter().map(|boat| render_boat(boat, &base)).collect();

    Ok(Json(json!({
        "_embedded": { BOATS_COLLECTION: items },
        "_links": {
            "self": { "href": format!("{base}{BOATS_RESOURCE}") },
            "profile": { "href": format!("{base}{PROFILE_RESOURCE}/{BOATS_COLLECTION}") },
        },
    })))
}

pub async fn get_boat(
    State(state): State<AppState>,
    Path(id): Path<BoatId>,
    headers: HeaderMap,
) -> AppResult<Json<Value>> {
    let boat = state
        .repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(render_boat(&boat, &base_url(&headers))))
}

pub async fn create_boat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BoatPayload>,
) -> AppResult<(StatusCode, HeaderMap, Json<Value>)> {
    let data = BoatData::from(payload);
    validate_data(&data)?;

    let boat = state.repo.create(data).await?;
    tracing::info!(id = boat.id, name = %boat.name, "boat created");

    let base = base_url(&headers);
    let mut response_headers = HeaderMap::new();
    if let Ok(location) = self_href(&base, boat.id).parse() {
        response_headers.insert(header::LOCATION, location);
    }

    Ok((
        StatusCode::CREATED,
        response_headers,
        Json(render_boat(&boat, &base)),
    ))
}

pub async fn patch_boat(
    State(state): State<AppState>,
    Path(id): Path<BoatId>,
    headers: HeaderMap,
    Json(payload): Json<BoatPatch>,
) -> AppResult<Json<Value>> {
    if let Some(name) = payload.name.as_deref() {
        ensure_not_blank(name, NAME_MANDATORY)?;
    }
    if let Some(description) = payload.description.as_deref() {
        ensure_not_blank(description, DESCRIPTION_MANDATORY)?;
    }

    let boat = state
        .repo
        .patch(id, payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "boat modified");

    Ok(Json(render_boat(&boat, &base_url(&headers))))
}

pub async fn replace_boat(
    State(state): State<AppState>,
    Path(id): Path<BoatId>,
    headers: HeaderMap,
    Json(payload): Json<BoatPayload>,
) -> AppResult<Json<Value>> {
    let data = BoatData::from(payload);
    validate_data(&data)?;

    let boat = state
        .repo
        .replace(id, data)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "boat replaced");

    Ok(Json(render_boat(&boat, &base_url(&headers))))
}

pub async fn delete_boat(
    State(state): State<AppState>,
    Path(id): Path<BoatId>,
) -> AppResult<StatusCode> {
    let deleted = state.repo.delete(id).await?;
    if !deleted {
        return Err(not_found(id));
    }
    tracing::info!(id, "boat deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn profile(
    Extension(user): Extension<AuthenticatedUser>,
    headers: HeaderMap,
) -> Json<Value> {
    tracing::debug!(user = %user.0, "profile requested");
    let base = base_url(&headers);

    Json(json!({
        "_links": {
            "self": { "href": format!("{base}{PROFILE_RESOURCE}") },
            BOATS_COLLECTION: { "href": format!("{base}{PROFILE_RESOURCE}/{BOATS_COLLECTION}") },
        },
    }))
}

/// A record with its HAL links
pub fn render_boat(boat: &Boat, base: &str) -> Value {
    let href = self_href(base, boat.id);
    json!({
        "id": boat.id,
        "name": boat.name,
        "description": boat.description,
        "_links": {
            "self": { "href": href },
            "boat": { "href": href },
        },
    })
}

fn self_href(base: &str, id: BoatId) -> String {
    format!("{base}{BOATS_RESOURCE}/{id}")
}

fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}")
}

fn not_found(id: BoatId) -> AppError {
    AppError::not_found(format!("boat {id} not found"))
}

fn ensure_not_blank(value: &str, message: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(())
}

fn validate_data(data: &BoatData) -> AppResult<()> {
    ensure_not_blank(&data.name, NAME_MANDATORY)?;
    ensure_not_blank(&data.description, DESCRIPTION_MANDATORY)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_boat_links() {
        let rendered = render_boat(&Boat::new(3, "Alpha", "first"), "http://localhost:8080");
        assert_eq!(rendered["id"], 3);
        assert_eq!(
            rendered["_links"]["self"]["href"],
            "http://localhost:8080/api/boats/3"
        );
        assert_eq!(rendered["_links"]["boat"], rendered["_links"]["self"]);
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let err = validate_data(&BoatData::new("  ", "x")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == NAME_MANDATORY));

        let err = validate_data(&BoatData::new("Alpha", "")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == DESCRIPTION_MANDATORY));

        assert!(validate_data(&BoatData::new("Alpha", "first")).is_ok());
    }

    #[test]
    fn test_base_url_uses_host_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(base_url(&headers), "http://localhost");

        headers.insert(header::HOST, "boats.test:9000".parse().unwrap());
        assert_eq!(base_url(&headers), "http://boats.test:9000");
    }
}
