// src/models/onibus.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Veículo da frota (própria ou fretada).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Onibus {
    pub id: Uuid,

    pub tipo: String,
    pub empresa: String,
    pub capacidade: i32,
    pub numero_identificacao: Option<String>,

    // Caminho da foto no storage, quando houver
    pub image_path: Option<String>,

    pub created_at: DateTime<Utc>,
}
