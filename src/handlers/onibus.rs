// src/handlers/onibus.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::onibus::Onibus};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnibusPayload {
    #[validate(length(min = 2, message = "Informe o tipo do ônibus"))]
    #[schema(example = "Leito")]
    pub tipo: String,

    #[validate(length(min = 2, message = "Informe a empresa"))]
    #[schema(example = "Viação 1001")]
    pub empresa: String,

    #[validate(range(min = 1, message = "A capacidade deve ser positiva"))]
    #[schema(example = 46)]
    pub capacidade: i32,

    #[schema(example = "BUS-07")]
    pub numero_identificacao: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagemPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "onibus/bus-07.jpg")]
    pub image_path: String,
}

// POST /api/onibus
#[utoipa::path(
    post,
    path = "/api/onibus",
    tag = "Onibus",
    request_body = OnibusPayload,
    responses(
        (status = 201, description = "Ônibus cadastrado", body = Onibus)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_onibus(
    State(app_state): State<AppState>,
    Json(payload): Json<OnibusPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let onibus = app_state
        .onibus_repo
        .create(
            &payload.tipo,
            &payload.empresa,
            payload.capacidade,
            payload.numero_identificacao.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(onibus)))
}

// GET /api/onibus
#[utoipa::path(
    get,
    path = "/api/onibus",
    tag = "Onibus",
    responses(
        (status = 200, description = "Frota cadastrada", body = Vec<Onibus>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_onibus(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let frota = app_state.onibus_repo.list().await?;

    Ok((StatusCode::OK, Json(frota)))
}

// PUT /api/onibus/{id}
#[utoipa::path(
    put,
    path = "/api/onibus/{id}",
    tag = "Onibus",
    params(("id" = Uuid, Path, description = "ID do ônibus")),
    request_body = OnibusPayload,
    responses(
        (status = 200, description = "Ônibus atualizado", body = Onibus),
        (status = 404, description = "Ônibus não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_onibus(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OnibusPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let onibus = app_state
        .onibus_repo
        .update(
            id,
            &payload.tipo,
            &payload.empresa,
            payload.capacidade,
            payload.numero_identificacao.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(onibus)))
}

// PUT /api/onibus/{id}/imagem
#[utoipa::path(
    put,
    path = "/api/onibus/{id}/imagem",
    tag = "Onibus",
    params(("id" = Uuid, Path, description = "ID do ônibus")),
    request_body = ImagemPayload,
    responses(
        (status = 200, description = "Imagem atualizada", body = Onibus)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_imagem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ImagemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let onibus = app_state
        .onibus_repo
        .set_image_path(id, &payload.image_path)
        .await?;

    Ok((StatusCode::OK, Json(onibus)))
}

// DELETE /api/onibus/{id}
#[utoipa::path(
    delete,
    path = "/api/onibus/{id}",
    tag = "Onibus",
    params(("id" = Uuid, Path, description = "ID do ônibus")),
    responses(
        (status = 204, description = "Ônibus removido"),
        (status = 409, description = "Ônibus vinculado a viagens")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_onibus(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.onibus_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
