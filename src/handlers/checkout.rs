// src/handlers/checkout.rs
//
// Equivalentes das funções serverless create-checkout / verify-payment.
// Ficam fora do guard: o site público chama direto.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::payment::{CheckoutResponse, VerificacaoPagamento},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutPayload {
    pub trip_id: Uuid,

    pub client_id: Option<Uuid>,

    #[schema(value_type = f64, example = 150.0)]
    pub price: Decimal,

    #[schema(example = "Caravana - Flamengo x Palmeiras")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "cs_test_a1b2c3")]
    pub session_id: String,
}

// POST /api/checkout
#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = "Checkout",
    request_body = CreateCheckoutPayload,
    responses(
        (status = 200, description = "URL de pagamento hospedada", body = CheckoutResponse),
        (status = 404, description = "Viagem não encontrada"),
        (status = 500, description = "Chave do provedor não configurada")
    )
)]
pub async fn create_checkout(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let resposta = app_state
        .checkout_service
        .criar_checkout(
            payload.trip_id,
            payload.client_id,
            payload.price,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(resposta)))
}

// POST /api/checkout/verificar
#[utoipa::path(
    post,
    path = "/api/checkout/verificar",
    tag = "Checkout",
    request_body = VerifyPaymentPayload,
    responses(
        (status = 200, description = "Situação atual da sessão", body = VerificacaoPagamento),
        (status = 502, description = "Provedor indisponível")
    )
)]
pub async fn verify_payment(
    State(app_state): State<AppState>,
    Json(payload): Json<VerifyPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let verificacao = app_state
        .checkout_service
        .verificar_pagamento(&payload.session_id)
        .await?;

    Ok((StatusCode::OK, Json(verificacao)))
}
