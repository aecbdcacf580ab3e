// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{OcupacaoViagem, ResumoDashboard, TopCliente},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Resumo Geral
    pub async fn get_resumo(&self) -> Result<ResumoDashboard, AppError> {
        // Transação para um snapshot consistente dos quatro números
        let mut tx = self.pool.begin().await?;

        let total_clientes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clientes")
            .fetch_one(&mut *tx)
            .await?;

        let viagens_abertas: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM viagens WHERE status = 'aberta' AND data_jogo >= CURRENT_DATE",
        )
        .fetch_one(&mut *tx)
        .await?;

        let receita_confirmada: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(valor - desconto), 0)
            FROM viagem_passageiros
            WHERE status_pagamento = 'pago'
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let valor_pendente: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(valor - desconto), 0)
            FROM viagem_passageiros
            WHERE status_pagamento = 'pendente'
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ResumoDashboard {
            total_clientes,
            viagens_abertas,
            receita_confirmada,
            valor_pendente,
        })
    }

    // 2. Ocupação por viagem
    //
    // Uma única query agregada, em vez de um COUNT por viagem.
    pub async fn get_ocupacao(&self) -> Result<Vec<OcupacaoViagem>, AppError> {
        let data = sqlx::query_as::<_, OcupacaoViagem>(
            r#"
            SELECT
                v.id AS viagem_id,
                v.adversario,
                v.capacidade_onibus AS capacidade,
                COUNT(p.id) FILTER (WHERE p.status_pagamento <> 'cancelado') AS total_passageiros,
                CASE
                    WHEN v.capacidade_onibus > 0 THEN
                        ROUND(
                            COUNT(p.id) FILTER (WHERE p.status_pagamento <> 'cancelado')
                            * 100.0 / v.capacidade_onibus
                        )::int
                    ELSE 0
                END AS percentual
            FROM viagens v
            LEFT JOIN viagem_passageiros p ON p.viagem_id = v.id
            GROUP BY v.id, v.adversario, v.capacidade_onibus
            ORDER BY v.data_jogo ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }

    // 3. Top clientes (mais caravanas e mais pagamentos)
    pub async fn get_top_clientes(&self) -> Result<Vec<TopCliente>, AppError> {
        let data = sqlx::query_as::<_, TopCliente>(
            r#"
            SELECT
                c.id AS cliente_id,
                c.nome,
                COUNT(p.id) AS total_viagens,
                COALESCE(SUM(p.valor - p.desconto) FILTER (WHERE p.status_pagamento = 'pago'), 0)
                    AS total_pago
            FROM clientes c
            INNER JOIN viagem_passageiros p ON p.cliente_id = c.id
            WHERE p.status_pagamento <> 'cancelado'
            GROUP BY c.id, c.nome
            ORDER BY total_viagens DESC, total_pago DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }
}
