//! Guest admin endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::config::DATETIME_FORMAT;
use crate::db::Guest;
use crate::http::error::ApiError;
use crate::http::extractors::JsonObject;
use crate::http::server::AppState;
use crate::models::{Category, Gender, GuestFilter, GuestStatus};

const CREATED_MESSAGE: &str = "Invitado creado correctamente";

/// Registration response
#[derive(Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub token: String,
}

/// List query parameters, both optional and case-insensitive
#[derive(Debug, Default, PartialEq)]
pub struct ListGuestsParams {
    pub tipo: Option<String>,
    pub genero: Option<String>,
}

impl ListGuestsParams {
    /// Collect from raw query pairs. A repeated key keeps its first value;
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "tipo" => &mut params.tipo,
                "genero" => &mut params.genero,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// Guest as rendered to clients
#[derive(Serialize)]
pub struct GuestResponse {
    pub id: i64,
    pub nombre_completo: String,
    pub telefono: String,
    pub tipo: Category,
    pub genero: Gender,
    pub estado: GuestStatus,
    pub token: String,
    pub token_expires_at: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Guest> for GuestResponse {
    fn from(g: Guest) -> Self {
        Self {
            id: g.id,
            nombre_completo: g.full_name,
            telefono: g.phone,
            tipo: g.category,
            genero: g.gender,
            estado: g.status,
            token: g.token,
            token_expires_at: g.token_expires_at.format(DATETIME_FORMAT).to_string(),
            created_at: g.created_at.map(|t| t.format(DATETIME_FORMAT).to_string()),
            updated_at: g.updated_at.map(|t| t.format(DATETIME_FORMAT).to_string()),
        }
    }
}

/// List envelope
#[derive(Serialize)]
pub struct GuestListResponse {
    pub data: Vec<GuestResponse>,
}

/// POST /admin/guests - register a guest and issue its token
async fn create_guest(
    State(state): State<Arc<AppState>>,
    JsonObject(payload): JsonObject,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let registration = state.registry.register_payload(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: CREATED_MESSAGE,
            token: registration.token.into_string(),
        }),
    ))
}

/// GET /admin/guests - list guests, newest first
async fn list_guests(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<GuestListResponse>, ApiError> {
    let params = ListGuestsParams::from_pairs(pairs);
    let filter = GuestFilter::new(params.tipo.as_deref(), params.genero.as_deref());
    let guests = state.registry.list(&filter).await?;

    Ok(Json(GuestListResponse {
        data: guests.into_iter().map(GuestResponse::from).collect(),
    }))
}

/// Guest routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/admin/guests", get(list_guests).post(create_guest))
}
