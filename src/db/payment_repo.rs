// src/db/payment_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::payment::Payment};

#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        viagem_id: Uuid,
        cliente_id: Option<Uuid>,
        valor: Decimal,
        stripe_session_id: &str,
        idempotency_key: Option<&str>,
        descricao: Option<&str>,
    ) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (
                viagem_id, cliente_id, valor, moeda, status,
                stripe_session_id, idempotency_key, descricao
            )
            VALUES ($1, $2, $3, 'brl', 'pendente', $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(viagem_id)
        .bind(cliente_id)
        .bind(valor)
        .bind(stripe_session_id)
        .bind(idempotency_key)
        .bind(descricao)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Sessão pendente já criada para a mesma chave (viagem+cliente+valor).
    pub async fn find_pendente_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE idempotency_key = $1 AND status = 'pendente'",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn find_by_session_id(&self, session_id: &str) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE stripe_session_id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Payment, AppError> {
        sqlx::query_as::<_, Payment>(
            "UPDATE payments SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::PagamentoNotFound)
    }

    pub async fn list_by_viagem(&self, viagem_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE viagem_id = $1 ORDER BY created_at DESC",
        )
        .bind(viagem_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}
