// src/db/onibus_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::onibus::Onibus};

#[derive(Clone)]
pub struct OnibusRepository {
    pool: PgPool,
}

impl OnibusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        tipo: &str,
        empresa: &str,
        capacidade: i32,
        numero_identificacao: Option<&str>,
    ) -> Result<Onibus, AppError> {
        let onibus = sqlx::query_as::<_, Onibus>(
            r#"
            INSERT INTO onibus (tipo, empresa, capacidade, numero_identificacao)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tipo)
        .bind(empresa)
        .bind(capacidade)
        .bind(numero_identificacao)
        .fetch_one(&self.pool)
        .await?;

        Ok(onibus)
    }

    pub async fn update(
        &self,
        id: Uuid,
        tipo: &str,
        empresa: &str,
        capacidade: i32,
        numero_identificacao: Option<&str>,
    ) -> Result<Onibus, AppError> {
        sqlx::query_as::<_, Onibus>(
            r#"
            UPDATE onibus SET
                tipo = $2, empresa = $3, capacidade = $4, numero_identificacao = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tipo)
        .bind(empresa)
        .bind(capacidade)
        .bind(numero_identificacao)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::OnibusNotFound)
    }

    pub async fn set_image_path(&self, id: Uuid, image_path: &str) -> Result<Onibus, AppError> {
        sqlx::query_as::<_, Onibus>(
            "UPDATE onibus SET image_path = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(image_path)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::OnibusNotFound)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Onibus>, AppError> {
        let onibus = sqlx::query_as::<_, Onibus>("SELECT * FROM onibus WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(onibus)
    }

    pub async fn list(&self) -> Result<Vec<Onibus>, AppError> {
        let frota = sqlx::query_as::<_, Onibus>("SELECT * FROM onibus ORDER BY empresa, tipo")
            .fetch_all(&self.pool)
            .await?;

        Ok(frota)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM onibus WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::RegistroEmUso(
                            "Ônibus vinculado a viagens e não pode ser removido.".to_string(),
                        );
                    }
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::OnibusNotFound);
        }

        Ok(())
    }
}
