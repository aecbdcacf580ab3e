// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Indicadores gerais do back-office.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDashboard {
    pub total_clientes: i64,
    pub viagens_abertas: i64,
    pub receita_confirmada: Decimal,
    pub valor_pendente: Decimal,
}

/// Ocupação de uma viagem no painel (uma linha por viagem,
/// calculada numa única query agregada).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OcupacaoViagem {
    pub viagem_id: Uuid,
    pub adversario: String,
    pub capacidade: i32,
    pub total_passageiros: i64,
    pub percentual: i32,
}

/// Ranking de clientes por participação em caravanas.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopCliente {
    pub cliente_id: Uuid,
    pub nome: String,
    pub total_viagens: i64,
    pub total_pago: Decimal,
}
