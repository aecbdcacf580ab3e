// src/models/passageiro.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// Vínculo Cliente x Viagem, com os dados financeiros e de embarque.
/// Sempre referencia exatamente uma viagem e um cliente.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Passageiro {
    pub id: Uuid,
    pub viagem_id: Uuid,
    pub cliente_id: Uuid,

    pub valor: Decimal,
    pub desconto: Decimal,

    // 'pago' | 'pendente' | 'cancelado'
    pub status_pagamento: String,
    pub forma_pagamento: Option<String>,

    pub onibus_id: Option<Uuid>,
    pub cidade_embarque: Option<String>,
    pub setor_maracana: Option<String>,

    // Passeios opcionais comprados junto (array JSON de nomes)
    pub passeios: Value,

    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Passageiro com os dados do cliente já juntados, para listas e envio.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassageiroDetalhe {
    pub id: Uuid,
    pub viagem_id: Uuid,
    pub cliente_id: Uuid,

    pub nome: String,
    pub telefone: Option<String>,
    pub cpf: Option<String>,

    pub valor: Decimal,
    pub desconto: Decimal,
    pub status_pagamento: String,
    pub forma_pagamento: Option<String>,

    pub onibus_id: Option<Uuid>,
    pub cidade_embarque: Option<String>,
    pub setor_maracana: Option<String>,
    pub passeios: Value,
}

/// Passageiros agrupados por cidade de embarque.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrupoEmbarque {
    pub cidade: String,
    pub quantidade: usize,
    pub passageiros: Vec<PassageiroDetalhe>,
}
