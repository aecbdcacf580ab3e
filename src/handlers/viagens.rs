// src/handlers/viagens.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::viagem_repo::ViagemInput,
    models::{
        passageiro::{GrupoEmbarque, PassageiroDetalhe},
        payment::Payment,
        viagem::{Viagem, ViagemDetalhe},
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViagemPayload {
    #[validate(length(min = 2, message = "Informe o adversário"))]
    #[schema(example = "Palmeiras")]
    pub adversario: String,

    #[schema(value_type = String, format = Date, example = "2025-12-07")]
    pub data_jogo: NaiveDate,

    #[schema(value_type = Option<String>, format = DateTime)]
    pub data_saida: Option<DateTime<Utc>>,

    #[serde(default = "local_jogo_padrao")]
    #[schema(example = "Maracanã")]
    pub local_jogo: String,

    #[schema(value_type = f64, example = 150.0)]
    pub valor_padrao: Decimal,

    #[schema(example = "Norte")]
    pub setor_padrao: Option<String>,

    pub onibus_id: Option<Uuid>,

    // Quando omitida, é herdada do ônibus vinculado
    #[serde(default)]
    pub capacidade_onibus: i32,

    #[schema(example = "Campos dos Goytacazes")]
    pub cidade_saida: Option<String>,

    #[serde(default = "status_padrao")]
    #[schema(example = "aberta")]
    pub status: String,
}

fn local_jogo_padrao() -> String {
    "Maracanã".to_string()
}

fn status_padrao() -> String {
    "aberta".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ListViagensQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPassageirosQuery {
    pub onibus_id: Option<Uuid>,
    #[serde(default)]
    pub por_cidade: bool,
}

// POST /api/viagens
#[utoipa::path(
    post,
    path = "/api/viagens",
    tag = "Viagens",
    request_body = ViagemPayload,
    responses(
        (status = 201, description = "Viagem criada", body = Viagem),
        (status = 404, description = "Ônibus não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_viagem(
    State(app_state): State<AppState>,
    Json(payload): Json<ViagemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let viagem = app_state
        .viagem_service
        .create(ViagemInput {
            adversario: &payload.adversario,
            data_jogo: payload.data_jogo,
            data_saida: payload.data_saida,
            local_jogo: &payload.local_jogo,
            valor_padrao: payload.valor_padrao,
            setor_padrao: payload.setor_padrao.as_deref(),
            onibus_id: payload.onibus_id,
            capacidade_onibus: payload.capacidade_onibus,
            cidade_saida: payload.cidade_saida.as_deref(),
            status: &payload.status,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(viagem)))
}

// GET /api/viagens?status=
#[utoipa::path(
    get,
    path = "/api/viagens",
    tag = "Viagens",
    params(
        ("status" = Option<String>, Query, description = "Filtra pelo status ('aberta', 'encerrada'...)")
    ),
    responses(
        (status = 200, description = "Lista de viagens", body = Vec<Viagem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_viagens(
    State(app_state): State<AppState>,
    Query(query): Query<ListViagensQuery>,
) -> Result<impl IntoResponse, AppError> {
    let viagens = app_state
        .viagem_service
        .list(query.status.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(viagens)))
}

// GET /api/viagens/{id}
#[utoipa::path(
    get,
    path = "/api/viagens/{id}",
    tag = "Viagens",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    responses(
        (status = 200, description = "Viagem com ocupação", body = ViagemDetalhe),
        (status = 404, description = "Viagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_viagem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state.viagem_service.get_detalhe(id).await?;

    Ok((StatusCode::OK, Json(detalhe)))
}

// PUT /api/viagens/{id}
#[utoipa::path(
    put,
    path = "/api/viagens/{id}",
    tag = "Viagens",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    request_body = ViagemPayload,
    responses(
        (status = 200, description = "Viagem atualizada", body = Viagem),
        (status = 404, description = "Viagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_viagem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ViagemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let viagem = app_state
        .viagem_service
        .update(
            id,
            ViagemInput {
                adversario: &payload.adversario,
                data_jogo: payload.data_jogo,
                data_saida: payload.data_saida,
                local_jogo: &payload.local_jogo,
                valor_padrao: payload.valor_padrao,
                setor_padrao: payload.setor_padrao.as_deref(),
                onibus_id: payload.onibus_id,
                capacidade_onibus: payload.capacidade_onibus,
                cidade_saida: payload.cidade_saida.as_deref(),
                status: &payload.status,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(viagem)))
}

// DELETE /api/viagens/{id}
#[utoipa::path(
    delete,
    path = "/api/viagens/{id}",
    tag = "Viagens",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    responses(
        (status = 204, description = "Viagem removida"),
        (status = 404, description = "Viagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_viagem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.viagem_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/viagens/{id}/passageiros
//
// `porCidade=true` devolve os grupos de embarque; sem o parâmetro,
// a lista plana (opcionalmente filtrada por ônibus).
#[utoipa::path(
    get,
    path = "/api/viagens/{id}/passageiros",
    tag = "Viagens",
    params(
        ("id" = Uuid, Path, description = "ID da viagem"),
        ("onibusId" = Option<Uuid>, Query, description = "Filtra pelo ônibus de embarque"),
        ("porCidade" = Option<bool>, Query, description = "Agrupa por cidade de embarque")
    ),
    responses(
        (status = 200, description = "Passageiros da viagem", body = Vec<PassageiroDetalhe>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_passageiros_da_viagem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListPassageirosQuery>,
) -> Result<axum::response::Response, AppError> {
    if query.por_cidade {
        let grupos: Vec<GrupoEmbarque> = app_state
            .passageiro_service
            .listar_por_cidade(id, query.onibus_id)
            .await?;
        return Ok((StatusCode::OK, Json(grupos)).into_response());
    }

    let passageiros = app_state
        .passageiro_service
        .listar(id, query.onibus_id)
        .await?;

    Ok((StatusCode::OK, Json(passageiros)).into_response())
}

// GET /api/viagens/{id}/manifesto
#[utoipa::path(
    get,
    path = "/api/viagens/{id}/manifesto",
    tag = "Viagens",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    responses(
        (status = 200, description = "Lista de embarque em PDF", content_type = "application/pdf"),
        (status = 404, description = "Viagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_manifesto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pdf = app_state.manifesto_service.gerar_manifesto(id).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"manifesto-{}.pdf\"", id),
            ),
        ],
        pdf,
    ))
}

// GET /api/viagens/{id}/pagamentos
#[utoipa::path(
    get,
    path = "/api/viagens/{id}/pagamentos",
    tag = "Viagens",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    responses(
        (status = 200, description = "Pagamentos da viagem", body = Vec<Payment>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_pagamentos_da_viagem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pagamentos = app_state.checkout_service.listar_por_viagem(id).await?;

    Ok((StatusCode::OK, Json(pagamentos)))
}
