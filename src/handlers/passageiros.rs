// src/handlers/passageiros.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::passageiro::Passageiro};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InscreverPayload {
    pub viagem_id: Uuid,
    pub cliente_id: Uuid,

    // Quando omitido, herda o valor padrão da viagem
    #[schema(value_type = Option<f64>, example = 150.0)]
    pub valor: Option<Decimal>,

    #[serde(default)]
    #[schema(value_type = f64, example = 0.0)]
    pub desconto: Decimal,

    #[serde(default = "pagamento_pendente")]
    #[schema(example = "pendente")]
    pub status_pagamento: String,

    #[schema(example = "pix")]
    pub forma_pagamento: Option<String>,

    pub onibus_id: Option<Uuid>,

    #[schema(example = "Campos dos Goytacazes")]
    pub cidade_embarque: Option<String>,

    #[schema(example = "Norte")]
    pub setor_maracana: Option<String>,

    #[serde(default = "passeios_vazio")]
    #[schema(example = json!(["Cristo Redentor"]))]
    pub passeios: Value,

    pub observacoes: Option<String>,
}

fn pagamento_pendente() -> String {
    "pendente".to_string()
}

fn passeios_vazio() -> Value {
    Value::Array(vec![])
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarPagamentoPayload {
    #[schema(value_type = f64, example = 150.0)]
    pub valor: Decimal,

    #[serde(default)]
    #[schema(value_type = f64, example = 25.0)]
    pub desconto: Decimal,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "pago")]
    pub status_pagamento: String,

    #[schema(example = "cartão")]
    pub forma_pagamento: Option<String>,

    pub onibus_id: Option<Uuid>,
}

// POST /api/passageiros
#[utoipa::path(
    post,
    path = "/api/passageiros",
    tag = "Passageiros",
    request_body = InscreverPayload,
    responses(
        (status = 201, description = "Passageiro inscrito", body = Passageiro),
        (status = 404, description = "Viagem ou cliente não encontrado"),
        (status = 409, description = "Capacidade esgotada")
    ),
    security(("api_jwt" = []))
)]
pub async fn inscrever_passageiro(
    State(app_state): State<AppState>,
    Json(payload): Json<InscreverPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let passageiro = app_state
        .passageiro_service
        .inscrever(
            payload.viagem_id,
            payload.cliente_id,
            payload.valor,
            payload.desconto,
            payload.status_pagamento,
            payload.forma_pagamento,
            payload.onibus_id,
            payload.cidade_embarque,
            payload.setor_maracana,
            payload.passeios,
            payload.observacoes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(passageiro)))
}

// PUT /api/passageiros/{id}
#[utoipa::path(
    put,
    path = "/api/passageiros/{id}",
    tag = "Passageiros",
    params(("id" = Uuid, Path, description = "ID do passageiro")),
    request_body = AtualizarPagamentoPayload,
    responses(
        (status = 200, description = "Passageiro atualizado", body = Passageiro),
        (status = 404, description = "Passageiro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_passageiro(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarPagamentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let passageiro = app_state
        .passageiro_service
        .atualizar_pagamento(
            id,
            payload.valor,
            payload.desconto,
            &payload.status_pagamento,
            payload.forma_pagamento.as_deref(),
            payload.onibus_id,
        )
        .await?;

    Ok((StatusCode::OK, Json(passageiro)))
}

// DELETE /api/passageiros/{id}
//
// O cancelamento remove o vínculo, como no fluxo original.
#[utoipa::path(
    delete,
    path = "/api/passageiros/{id}",
    tag = "Passageiros",
    params(("id" = Uuid, Path, description = "ID do passageiro")),
    responses(
        (status = 204, description = "Passageiro removido"),
        (status = 404, description = "Passageiro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remover_passageiro(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.passageiro_service.remover(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
