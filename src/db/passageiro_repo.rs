// src/db/passageiro_repo.rs

use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::passageiro::{Passageiro, PassageiroDetalhe},
};

pub struct PassageiroInput {
    pub viagem_id: Uuid,
    pub cliente_id: Uuid,
    pub valor: Decimal,
    pub desconto: Decimal,
    pub status_pagamento: String,
    pub forma_pagamento: Option<String>,
    pub onibus_id: Option<Uuid>,
    pub cidade_embarque: Option<String>,
    pub setor_maracana: Option<String>,
    pub passeios: Value,
    pub observacoes: Option<String>,
}

const COLUNAS_DETALHE: &str = r#"
    p.id, p.viagem_id, p.cliente_id,
    c.nome, c.telefone, c.cpf,
    p.valor, p.desconto, p.status_pagamento, p.forma_pagamento,
    p.onibus_id, p.cidade_embarque, p.setor_maracana, p.passeios
"#;

#[derive(Clone)]
pub struct PassageiroRepository {
    pool: PgPool,
}

impl PassageiroRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inscreve um cliente na viagem dentro de uma transação,
    /// conferindo a capacidade antes do INSERT.
    pub async fn inscrever(
        &self,
        input: &PassageiroInput,
        capacidade: i32,
    ) -> Result<Passageiro, AppError> {
        let mut tx = self.pool.begin().await?;

        let ocupados: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM viagem_passageiros
            WHERE viagem_id = $1 AND status_pagamento <> 'cancelado'
            "#,
        )
        .bind(input.viagem_id)
        .fetch_one(&mut *tx)
        .await?;

        if ocupados >= capacidade as i64 {
            return Err(AppError::CapacidadeEsgotada);
        }

        let passageiro = sqlx::query_as::<_, Passageiro>(
            r#"
            INSERT INTO viagem_passageiros (
                viagem_id, cliente_id, valor, desconto, status_pagamento,
                forma_pagamento, onibus_id, cidade_embarque, setor_maracana,
                passeios, observacoes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(input.viagem_id)
        .bind(input.cliente_id)
        .bind(input.valor)
        .bind(input.desconto)
        .bind(&input.status_pagamento)
        .bind(input.forma_pagamento.as_deref())
        .bind(input.onibus_id)
        .bind(input.cidade_embarque.as_deref())
        .bind(input.setor_maracana.as_deref())
        .bind(&input.passeios)
        .bind(input.observacoes.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(passageiro)
    }

    /// Lista os passageiros de uma viagem com os dados do cliente,
    /// opcionalmente filtrados pelo ônibus de embarque.
    pub async fn list_by_viagem(
        &self,
        viagem_id: Uuid,
        onibus_id: Option<Uuid>,
    ) -> Result<Vec<PassageiroDetalhe>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUNAS_DETALHE}
            FROM viagem_passageiros p
            INNER JOIN clientes c ON c.id = p.cliente_id
            WHERE p.viagem_id = $1
              AND ($2::uuid IS NULL OR p.onibus_id = $2)
            ORDER BY c.nome ASC
            "#
        );

        let passageiros = sqlx::query_as::<_, PassageiroDetalhe>(&sql)
            .bind(viagem_id)
            .bind(onibus_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(passageiros)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Passageiro>, AppError> {
        let passageiro =
            sqlx::query_as::<_, Passageiro>("SELECT * FROM viagem_passageiros WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(passageiro)
    }

    /// Atualiza a parte financeira / de alocação conforme os pagamentos chegam.
    pub async fn update_pagamento(
        &self,
        id: Uuid,
        valor: Decimal,
        desconto: Decimal,
        status_pagamento: &str,
        forma_pagamento: Option<&str>,
        onibus_id: Option<Uuid>,
    ) -> Result<Passageiro, AppError> {
        sqlx::query_as::<_, Passageiro>(
            r#"
            UPDATE viagem_passageiros SET
                valor = $2, desconto = $3, status_pagamento = $4,
                forma_pagamento = $5, onibus_id = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(valor)
        .bind(desconto)
        .bind(status_pagamento)
        .bind(forma_pagamento)
        .bind(onibus_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::PassageiroNotFound)
    }

    /// Cancelamento remove a linha, como o fluxo original faz.
    pub async fn remover(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM viagem_passageiros WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::PassageiroNotFound);
        }

        Ok(())
    }
}
