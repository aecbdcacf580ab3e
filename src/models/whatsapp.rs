// src/models/whatsapp.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// Template de mensagem com placeholders `{assim}`.
/// `variaveis` é recalculado a cada escrita a partir da mensagem.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappTemplate {
    pub id: Uuid,

    pub nome: String,
    pub categoria: String,
    pub mensagem: String,
    pub variaveis: Vec<String>,

    pub ativo: bool,
    pub uso_count: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registro de um lote de envio. Vale sempre:
/// total_tentado = total_enviado + total_falhou.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WhatsappLog {
    pub id: Uuid,
    pub viagem_id: Uuid,

    pub template_nomes: Vec<String>,
    pub filtro_onibus: Option<Uuid>,

    pub total_tentado: i32,
    pub total_enviado: i32,
    pub total_falhou: i32,

    // Resultado por destinatário
    pub detalhes: Value,

    pub created_at: DateTime<Utc>,
}

/// Resultado de uma tentativa individual de envio.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvioResultado {
    pub cliente_id: Uuid,
    pub nome: String,
    pub telefone: String,
    pub template: String,
    pub sucesso: bool,
    pub detalhe: Option<String>,
}

/// Resumo devolvido ao fim do lote.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoEnvio {
    pub log_id: Uuid,
    pub total_tentado: i32,
    pub total_enviado: i32,
    pub total_falhou: i32,
    pub ignorados_sem_telefone: i32,
}

/// Estatística de uso por template.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUso {
    pub id: Uuid,
    pub nome: String,
    pub categoria: String,
    pub uso_count: i64,
    pub ultimo_envio: Option<DateTime<Utc>>,
}
