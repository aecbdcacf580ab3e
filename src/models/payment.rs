// src/models/payment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Registro local de uma sessão de checkout.
/// 'pendente' -> 'pago' só acontece quando a verificação é chamada;
/// não há webhook nem reconciliação automática.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub viagem_id: Uuid,
    pub cliente_id: Option<Uuid>,

    pub valor: Decimal,
    pub moeda: String,
    pub status: String,

    pub stripe_session_id: Option<String>,
    // Chave derivada de viagem+cliente+valor para não duplicar sessão
    pub idempotency_key: Option<String>,

    pub descricao: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resposta do create-checkout: a URL hospedada do provedor.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub url: String,
}

/// Resposta do verify-payment.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificacaoPagamento {
    pub status: String,
    pub customer: Option<String>,
    pub amount: i64,
    pub is_paid: bool,
}
