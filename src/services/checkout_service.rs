// src/services/checkout_service.rs
//
// Fluxo de checkout: cria a sessão hospedada no provedor e registra o
// pagamento local como 'pendente'. A verificação é uma consulta sem
// estado; a transição pendente -> pago só é observada quando alguém
// chama o verify.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PaymentRepository, ViagemRepository},
    models::payment::{CheckoutResponse, Payment, VerificacaoPagamento},
    services::stripe::StripeClient,
};

#[derive(Clone)]
pub struct CheckoutService {
    payment_repo: PaymentRepository,
    viagem_repo: ViagemRepository,
    // None quando STRIPE_SECRET_KEY não está no ambiente
    stripe: Option<StripeClient>,
    site_url: String,
}

impl CheckoutService {
    pub fn new(
        payment_repo: PaymentRepository,
        viagem_repo: ViagemRepository,
        stripe: Option<StripeClient>,
        site_url: String,
    ) -> Self {
        Self {
            payment_repo,
            viagem_repo,
            stripe,
            site_url,
        }
    }

    fn stripe(&self) -> Result<&StripeClient, AppError> {
        self.stripe
            .as_ref()
            .ok_or_else(|| AppError::ConfigError("STRIPE_SECRET_KEY".to_string()))
    }

    /// Cria (ou reaproveita) a sessão de checkout de uma viagem.
    pub async fn criar_checkout(
        &self,
        viagem_id: Uuid,
        cliente_id: Option<Uuid>,
        valor: Decimal,
        descricao: Option<&str>,
    ) -> Result<CheckoutResponse, AppError> {
        let stripe = self.stripe()?;

        let viagem = self
            .viagem_repo
            .find_by_id(viagem_id)
            .await?
            .ok_or(AppError::ViagemNotFound)?;

        let valor_centavos = valor_em_centavos(valor)?;

        // Mesma viagem + cliente + valor => mesma sessão. Uma repetição
        // do clique não cria sessão duplicada no provedor.
        let idempotency_key = chave_idempotencia(viagem_id, cliente_id, valor_centavos);

        if let Some(pendente) = self
            .payment_repo
            .find_pendente_by_idempotency_key(&idempotency_key)
            .await?
        {
            if let Some(session_id) = &pendente.stripe_session_id {
                let sessao = stripe.retrieve_checkout_session(session_id).await?;
                if let Some(url) = sessao.url {
                    tracing::info!(
                        "Checkout reaproveitado para a viagem {} (sessão {})",
                        viagem_id,
                        session_id
                    );
                    return Ok(CheckoutResponse { url });
                }
            }
        }

        let descricao = descricao
            .map(|d| d.to_string())
            .unwrap_or_else(|| format!("Caravana - Flamengo x {}", viagem.adversario));

        let success_url = format!("{}/pagamento/sucesso", self.site_url);
        let cancel_url = format!("{}/pagamento/cancelado", self.site_url);

        let sessao = stripe
            .create_checkout_session(
                valor_centavos,
                &descricao,
                &success_url,
                &cancel_url,
                &viagem_id.to_string(),
                cliente_id.map(|c| c.to_string()).as_deref(),
            )
            .await?;

        let url = sessao.url.clone().ok_or_else(|| {
            AppError::ProviderError("Sessão criada sem URL de redirecionamento.".to_string())
        })?;

        self.payment_repo
            .create(
                viagem_id,
                cliente_id,
                valor,
                &sessao.id,
                Some(&idempotency_key),
                Some(&descricao),
            )
            .await?;

        Ok(CheckoutResponse { url })
    }

    /// Consulta o provedor e reflete o resultado no registro local.
    pub async fn verificar_pagamento(
        &self,
        session_id: &str,
    ) -> Result<VerificacaoPagamento, AppError> {
        let stripe = self.stripe()?;

        let sessao = stripe.retrieve_checkout_session(session_id).await?;
        let is_paid = sessao.payment_status == "paid";

        if is_paid {
            if let Some(payment) = self.payment_repo.find_by_session_id(session_id).await? {
                if payment.status != "pago" {
                    self.payment_repo.update_status(payment.id, "pago").await?;
                }
            }
        }

        Ok(VerificacaoPagamento {
            status: sessao.payment_status,
            customer: sessao
                .customer_details
                .and_then(|c| c.email.or(c.name)),
            amount: sessao.amount_total.unwrap_or(0),
            is_paid,
        })
    }

    pub async fn listar_por_viagem(&self, viagem_id: Uuid) -> Result<Vec<Payment>, AppError> {
        self.payment_repo.list_by_viagem(viagem_id).await
    }
}

/// O provedor cobra na menor unidade da moeda.
fn valor_em_centavos(valor: Decimal) -> Result<i64, AppError> {
    (valor * Decimal::new(100, 0))
        .round()
        .to_i64()
        .ok_or_else(|| anyhow::anyhow!("Valor fora da faixa aceita: {}", valor).into())
}

fn chave_idempotencia(viagem_id: Uuid, cliente_id: Option<Uuid>, centavos: i64) -> String {
    format!(
        "{}:{}:{}",
        viagem_id,
        cliente_id
            .map(|c| c.to_string())
            .unwrap_or_else(|| "anon".to_string()),
        centavos
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{PaymentRepository, ViagemRepository};
    use sqlx::PgPool;

    #[test]
    fn valor_vira_menor_unidade() {
        assert_eq!(valor_em_centavos(Decimal::new(15000, 2)).unwrap(), 15000);
        assert_eq!(valor_em_centavos(Decimal::new(995, 1)).unwrap(), 9950);
    }

    #[test]
    fn mesma_compra_gera_a_mesma_chave() {
        let viagem = Uuid::new_v4();
        let cliente = Some(Uuid::new_v4());

        let a = chave_idempotencia(viagem, cliente, 15000);
        let b = chave_idempotencia(viagem, cliente, 15000);
        assert_eq!(a, b);

        // Valor diferente, chave diferente
        let c = chave_idempotencia(viagem, cliente, 20000);
        assert_ne!(a, c);

        // Comprador anônimo tem chave própria
        let d = chave_idempotencia(viagem, None, 15000);
        assert!(d.contains(":anon:"));
        assert_ne!(a, d);
    }

    #[tokio::test]
    async fn sem_chave_do_stripe_o_checkout_falha_com_erro_de_configuracao() {
        // Pool preguiçosa: nenhuma conexão é aberta, e o serviço falha
        // na checagem de configuração antes de tocar o banco.
        let pool = PgPool::connect_lazy("postgres://localhost/caravanas_test").unwrap();
        let service = CheckoutService::new(
            PaymentRepository::new(pool.clone()),
            ViagemRepository::new(pool),
            None,
            "http://localhost:3000".to_string(),
        );

        let erro = service
            .criar_checkout(Uuid::new_v4(), None, Decimal::new(15000, 2), None)
            .await
            .unwrap_err();

        match erro {
            AppError::ConfigError(msg) => assert!(msg.contains("STRIPE_SECRET_KEY")),
            outro => panic!("esperava ConfigError, veio {:?}", outro),
        }
    }
}
