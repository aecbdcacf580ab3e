// src/db/viagem_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::viagem::Viagem};

pub struct ViagemInput<'a> {
    pub adversario: &'a str,
    pub data_jogo: NaiveDate,
    pub data_saida: Option<DateTime<Utc>>,
    pub local_jogo: &'a str,
    pub valor_padrao: Decimal,
    pub setor_padrao: Option<&'a str>,
    pub onibus_id: Option<Uuid>,
    pub capacidade_onibus: i32,
    pub cidade_saida: Option<&'a str>,
    pub status: &'a str,
}

#[derive(Clone)]
pub struct ViagemRepository {
    pool: PgPool,
}

impl ViagemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &ViagemInput<'_>) -> Result<Viagem, AppError> {
        let viagem = sqlx::query_as::<_, Viagem>(
            r#"
            INSERT INTO viagens (
                adversario, data_jogo, data_saida, local_jogo,
                valor_padrao, setor_padrao, onibus_id, capacidade_onibus,
                cidade_saida, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(input.adversario)
        .bind(input.data_jogo)
        .bind(input.data_saida)
        .bind(input.local_jogo)
        .bind(input.valor_padrao)
        .bind(input.setor_padrao)
        .bind(input.onibus_id)
        .bind(input.capacidade_onibus)
        .bind(input.cidade_saida)
        .bind(input.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(viagem)
    }

    pub async fn update(&self, id: Uuid, input: &ViagemInput<'_>) -> Result<Viagem, AppError> {
        sqlx::query_as::<_, Viagem>(
            r#"
            UPDATE viagens SET
                adversario = $2, data_jogo = $3, data_saida = $4, local_jogo = $5,
                valor_padrao = $6, setor_padrao = $7, onibus_id = $8,
                capacidade_onibus = $9, cidade_saida = $10, status = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.adversario)
        .bind(input.data_jogo)
        .bind(input.data_saida)
        .bind(input.local_jogo)
        .bind(input.valor_padrao)
        .bind(input.setor_padrao)
        .bind(input.onibus_id)
        .bind(input.capacidade_onibus)
        .bind(input.cidade_saida)
        .bind(input.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ViagemNotFound)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Viagem>, AppError> {
        let viagem = sqlx::query_as::<_, Viagem>("SELECT * FROM viagens WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(viagem)
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Viagem>, AppError> {
        let viagens = match status {
            Some(status) => {
                sqlx::query_as::<_, Viagem>(
                    "SELECT * FROM viagens WHERE status = $1 ORDER BY data_jogo ASC",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Viagem>("SELECT * FROM viagens ORDER BY data_jogo ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(viagens)
    }

    /// Viagens abertas com vaga, para o site público.
    pub async fn list_abertas_com_vagas(&self) -> Result<Vec<Viagem>, AppError> {
        let viagens = sqlx::query_as::<_, Viagem>(
            r#"
            SELECT v.* FROM viagens v
            WHERE v.status = 'aberta'
              AND v.data_jogo >= CURRENT_DATE
              AND v.capacidade_onibus > (
                  SELECT COUNT(*) FROM viagem_passageiros p
                  WHERE p.viagem_id = v.id AND p.status_pagamento <> 'cancelado'
              )
            ORDER BY v.data_jogo ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(viagens)
    }

    /// Ocupação = passageiros não cancelados da viagem.
    pub async fn count_passageiros(&self, viagem_id: Uuid) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM viagem_passageiros
            WHERE viagem_id = $1 AND status_pagamento <> 'cancelado'
            "#,
        )
        .bind(viagem_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM viagens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ViagemNotFound);
        }

        Ok(())
    }
}
