// src/handlers/whatsapp.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::whatsapp::{ResumoEnvio, TemplateUso, WhatsappLog, WhatsappTemplate},
};

// =============================================================================
//  TEMPLATES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Lembrete de embarque")]
    pub nome: String,

    #[serde(default = "categoria_padrao")]
    #[schema(example = "embarque")]
    pub categoria: String,

    #[validate(length(min = 1, message = "A mensagem não pode ser vazia"))]
    #[schema(example = "Oi {primeiro_nome}! Amanhã tem Flamengo x {adversario}. Embarque em {cidade_embarque}.")]
    pub mensagem: String,
}

fn categoria_padrao() -> String {
    "geral".to_string()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AtivoPayload {
    pub ativo: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTemplatesQuery {
    #[serde(default)]
    pub somente_ativos: bool,
}

// POST /api/whatsapp/templates
#[utoipa::path(
    post,
    path = "/api/whatsapp/templates",
    tag = "WhatsApp",
    request_body = TemplatePayload,
    responses(
        (status = 201, description = "Template criado", body = WhatsappTemplate),
        (status = 409, description = "Nome de template já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_template(
    State(app_state): State<AppState>,
    Json(payload): Json<TemplatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let template = app_state
        .template_service
        .create(&payload.nome, &payload.categoria, &payload.mensagem)
        .await?;

    Ok((StatusCode::CREATED, Json(template)))
}

// GET /api/whatsapp/templates
#[utoipa::path(
    get,
    path = "/api/whatsapp/templates",
    tag = "WhatsApp",
    params(
        ("somenteAtivos" = Option<bool>, Query, description = "Só templates ativos")
    ),
    responses(
        (status = 200, description = "Templates cadastrados", body = Vec<WhatsappTemplate>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_templates(
    State(app_state): State<AppState>,
    Query(query): Query<ListTemplatesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let templates = app_state
        .template_service
        .list(query.somente_ativos)
        .await?;

    Ok((StatusCode::OK, Json(templates)))
}

// PUT /api/whatsapp/templates/{id}
#[utoipa::path(
    put,
    path = "/api/whatsapp/templates/{id}",
    tag = "WhatsApp",
    params(("id" = Uuid, Path, description = "ID do template")),
    request_body = TemplatePayload,
    responses(
        (status = 200, description = "Template atualizado", body = WhatsappTemplate),
        (status = 404, description = "Template não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_template(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TemplatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let template = app_state
        .template_service
        .update(id, &payload.nome, &payload.categoria, &payload.mensagem)
        .await?;

    Ok((StatusCode::OK, Json(template)))
}

// PATCH /api/whatsapp/templates/{id}/ativo
#[utoipa::path(
    patch,
    path = "/api/whatsapp/templates/{id}/ativo",
    tag = "WhatsApp",
    params(("id" = Uuid, Path, description = "ID do template")),
    request_body = AtivoPayload,
    responses(
        (status = 200, description = "Template ativado/desativado", body = WhatsappTemplate)
    ),
    security(("api_jwt" = []))
)]
pub async fn set_template_ativo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtivoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let template = app_state
        .template_service
        .set_ativo(id, payload.ativo)
        .await?;

    Ok((StatusCode::OK, Json(template)))
}

// DELETE /api/whatsapp/templates/{id}
#[utoipa::path(
    delete,
    path = "/api/whatsapp/templates/{id}",
    tag = "WhatsApp",
    params(("id" = Uuid, Path, description = "ID do template")),
    responses(
        (status = 204, description = "Template removido")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_template(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.template_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/whatsapp/templates/estatisticas
#[utoipa::path(
    get,
    path = "/api/whatsapp/templates/estatisticas",
    tag = "WhatsApp",
    responses(
        (status = 200, description = "Uso acumulado por template", body = Vec<TemplateUso>)
    ),
    security(("api_jwt" = []))
)]
pub async fn template_estatisticas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.template_service.usage_stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}

// =============================================================================
//  ENVIO EM LOTE
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnviarLotePayload {
    #[validate(length(min = 1, message = "Selecione ao menos um template"))]
    pub template_ids: Vec<Uuid>,

    // Restringe o lote a um ônibus de embarque
    pub onibus_id: Option<Uuid>,
}

// POST /api/viagens/{id}/whatsapp
#[utoipa::path(
    post,
    path = "/api/viagens/{id}/whatsapp",
    tag = "WhatsApp",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    request_body = EnviarLotePayload,
    responses(
        (status = 200, description = "Resumo do lote enviado", body = ResumoEnvio),
        (status = 404, description = "Viagem ou template não encontrado"),
        (status = 500, description = "Provedor de WhatsApp não configurado")
    ),
    security(("api_jwt" = []))
)]
pub async fn enviar_lote(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EnviarLotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let resumo = app_state
        .whatsapp_service
        .enviar_lote(id, &payload.template_ids, payload.onibus_id)
        .await?;

    Ok((StatusCode::OK, Json(resumo)))
}

// GET /api/viagens/{id}/whatsapp/logs
#[utoipa::path(
    get,
    path = "/api/viagens/{id}/whatsapp/logs",
    tag = "WhatsApp",
    params(("id" = Uuid, Path, description = "ID da viagem")),
    responses(
        (status = 200, description = "Lotes enviados para a viagem", body = Vec<WhatsappLog>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_logs(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let logs = app_state.whatsapp_service.listar_logs(id).await?;

    Ok((StatusCode::OK, Json(logs)))
}
