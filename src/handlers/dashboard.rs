// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{OcupacaoViagem, ResumoDashboard, TopCliente},
};

// GET /api/dashboard/resumo
#[utoipa::path(
    get,
    path = "/api/dashboard/resumo",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Indicadores gerais", body = ResumoDashboard)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_resumo(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resumo = app_state.dashboard_repo.get_resumo().await?;

    Ok((StatusCode::OK, Json(resumo)))
}

// GET /api/dashboard/ocupacao
#[utoipa::path(
    get,
    path = "/api/dashboard/ocupacao",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Ocupação por viagem", body = Vec<OcupacaoViagem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_ocupacao(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let ocupacao = app_state.dashboard_repo.get_ocupacao().await?;

    Ok((StatusCode::OK, Json(ocupacao)))
}

// GET /api/dashboard/top-clientes
#[utoipa::path(
    get,
    path = "/api/dashboard/top-clientes",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Clientes com mais caravanas", body = Vec<TopCliente>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_top_clientes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let ranking = app_state.dashboard_repo.get_top_clientes().await?;

    Ok((StatusCode::OK, Json(ranking)))
}
