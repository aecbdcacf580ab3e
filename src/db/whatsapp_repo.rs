// src/db/whatsapp_repo.rs

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::whatsapp::{TemplateUso, WhatsappLog, WhatsappTemplate},
};

#[derive(Clone)]
pub struct WhatsappRepository {
    pool: PgPool,
}

impl WhatsappRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  TEMPLATES
    // =========================================================================

    pub async fn create_template(
        &self,
        nome: &str,
        categoria: &str,
        mensagem: &str,
        variaveis: &[String],
    ) -> Result<WhatsappTemplate, AppError> {
        sqlx::query_as::<_, WhatsappTemplate>(
            r#"
            INSERT INTO whatsapp_templates (nome, categoria, mensagem, variaveis)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(categoria)
        .bind(mensagem)
        .bind(variaveis)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "Já existe um template chamado '{}'.",
                        nome
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn update_template(
        &self,
        id: Uuid,
        nome: &str,
        categoria: &str,
        mensagem: &str,
        variaveis: &[String],
    ) -> Result<WhatsappTemplate, AppError> {
        sqlx::query_as::<_, WhatsappTemplate>(
            r#"
            UPDATE whatsapp_templates SET
                nome = $2, categoria = $3, mensagem = $4, variaveis = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(categoria)
        .bind(mensagem)
        .bind(variaveis)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::TemplateNotFound)
    }

    pub async fn set_ativo(&self, id: Uuid, ativo: bool) -> Result<WhatsappTemplate, AppError> {
        sqlx::query_as::<_, WhatsappTemplate>(
            "UPDATE whatsapp_templates SET ativo = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(ativo)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::TemplateNotFound)
    }

    pub async fn find_template(&self, id: Uuid) -> Result<Option<WhatsappTemplate>, AppError> {
        let template = sqlx::query_as::<_, WhatsappTemplate>(
            "SELECT * FROM whatsapp_templates WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    pub async fn list_templates(&self, somente_ativos: bool) -> Result<Vec<WhatsappTemplate>, AppError> {
        let templates = sqlx::query_as::<_, WhatsappTemplate>(
            r#"
            SELECT * FROM whatsapp_templates
            WHERE ($1 = FALSE OR ativo = TRUE)
            ORDER BY categoria, nome
            "#,
        )
        .bind(somente_ativos)
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    pub async fn delete_template(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM whatsapp_templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::TemplateNotFound);
        }

        Ok(())
    }

    /// Soma `quantidade` envios renderizados ao contador do template.
    pub async fn increment_uso(&self, id: Uuid, quantidade: i64) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE whatsapp_templates SET uso_count = uso_count + $2 WHERE id = $1",
        )
        .bind(id)
        .bind(quantidade)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Estatística de uso: contador acumulado + data do último lote
    /// em que o template apareceu.
    pub async fn usage_stats(&self) -> Result<Vec<TemplateUso>, AppError> {
        let stats = sqlx::query_as::<_, TemplateUso>(
            r#"
            SELECT
                t.id, t.nome, t.categoria, t.uso_count,
                MAX(l.created_at) AS ultimo_envio
            FROM whatsapp_templates t
            LEFT JOIN whatsapp_logs l ON t.nome = ANY(l.template_nomes)
            GROUP BY t.id, t.nome, t.categoria, t.uso_count
            ORDER BY t.uso_count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stats)
    }

    // =========================================================================
    //  LOGS DE ENVIO
    // =========================================================================

    pub async fn insert_log(
        &self,
        viagem_id: Uuid,
        template_nomes: &[String],
        filtro_onibus: Option<Uuid>,
        total_tentado: i32,
        total_enviado: i32,
        total_falhou: i32,
        detalhes: &Value,
    ) -> Result<WhatsappLog, AppError> {
        let log = sqlx::query_as::<_, WhatsappLog>(
            r#"
            INSERT INTO whatsapp_logs (
                viagem_id, template_nomes, filtro_onibus,
                total_tentado, total_enviado, total_falhou, detalhes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(viagem_id)
        .bind(template_nomes)
        .bind(filtro_onibus)
        .bind(total_tentado)
        .bind(total_enviado)
        .bind(total_falhou)
        .bind(detalhes)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn list_logs(&self, viagem_id: Uuid) -> Result<Vec<WhatsappLog>, AppError> {
        let logs = sqlx::query_as::<_, WhatsappLog>(
            "SELECT * FROM whatsapp_logs WHERE viagem_id = $1 ORDER BY created_at DESC",
        )
        .bind(viagem_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}
