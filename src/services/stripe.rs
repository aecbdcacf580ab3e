// src/services/stripe.rs
//
// Cliente mínimo da API de Checkout do Stripe. Só o que o fluxo usa:
// criar uma Checkout Session e consultá-la depois.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::common::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
    // 'paid' | 'unpaid' | 'no_payment_required'
    pub payment_status: String,
    pub amount_total: Option<i64>,
    pub customer_details: Option<CustomerDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    base_url: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(base_url: String, secret_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            secret_key,
        }
    }

    /// Cria uma Checkout Session com o valor em centavos (menor unidade).
    pub async fn create_checkout_session(
        &self,
        valor_centavos: i64,
        descricao: &str,
        success_url: &str,
        cancel_url: &str,
        viagem_id: &str,
        cliente_id: Option<&str>,
    ) -> Result<CheckoutSession, AppError> {
        let centavos = valor_centavos.to_string();
        let mut form: Vec<(&str, &str)> = vec![
            ("mode", "payment"),
            ("success_url", success_url),
            ("cancel_url", cancel_url),
            ("line_items[0][price_data][currency]", "brl"),
            ("line_items[0][price_data][product_data][name]", descricao),
            ("line_items[0][price_data][unit_amount]", &centavos),
            ("line_items[0][quantity]", "1"),
            ("metadata[viagem_id]", viagem_id),
        ];
        if let Some(cliente_id) = cliente_id {
            form.push(("metadata[cliente_id]", cliente_id));
        }

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.base_url))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;

        Self::parse_session(response).await
    }

    /// Consulta o estado atual de uma sessão. Chamada sem estado local:
    /// quem decide o que fazer com o resultado é o serviço de checkout.
    pub async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, AppError> {
        let response = self
            .client
            .get(format!("{}/v1/checkout/sessions/{}", self.base_url, session_id))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        Self::parse_session(response).await
    }

    async fn parse_session(response: reqwest::Response) -> Result<CheckoutSession, AppError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            // O Stripe devolve { "error": { "message": ... } }
            let mensagem = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("error")
                        .and_then(|e| e.get("message"))
                        .and_then(|m| m.as_str())
                        .map(|m| m.to_string())
                })
                .unwrap_or(body);

            return Err(AppError::ProviderError(format!(
                "Stripe respondeu {}: {}",
                status, mensagem
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::ProviderError(format!("Resposta inesperada do Stripe: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn cria_sessao_e_devolve_url() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/checkout/sessions")
                .body_contains("unit_amount")
                .body_contains("15000");
            then.status(200).json_body(serde_json::json!({
                "id": "cs_test_123",
                "url": "https://checkout.stripe.com/pay/cs_test_123",
                "payment_status": "unpaid",
                "amount_total": 15000
            }));
        });

        let client = StripeClient::new(server.base_url(), "sk_test".into());
        let session = client
            .create_checkout_session(
                15000,
                "Caravana - Flamengo x Palmeiras",
                "https://exemplo.com/ok",
                "https://exemplo.com/cancelado",
                "viagem-1",
                None,
            )
            .await
            .unwrap();

        mock.assert();
        assert_eq!(session.id, "cs_test_123");
        assert_eq!(session.payment_status, "unpaid");
        assert!(session.url.unwrap().contains("cs_test_123"));
    }

    #[tokio::test]
    async fn sessao_paga_na_consulta() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/v1/checkout/sessions/cs_test_123");
            then.status(200).json_body(serde_json::json!({
                "id": "cs_test_123",
                "url": null,
                "payment_status": "paid",
                "amount_total": 15000,
                "customer_details": { "email": "maria@email.com", "name": "Maria" }
            }));
        });

        let client = StripeClient::new(server.base_url(), "sk_test".into());
        let session = client.retrieve_checkout_session("cs_test_123").await.unwrap();

        assert_eq!(session.payment_status, "paid");
        assert_eq!(
            session.customer_details.unwrap().email.unwrap(),
            "maria@email.com"
        );
    }

    #[tokio::test]
    async fn erro_do_stripe_expoe_mensagem() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/v1/checkout/sessions/cs_x");
            then.status(404).json_body(serde_json::json!({
                "error": { "message": "No such checkout.session: cs_x" }
            }));
        });

        let client = StripeClient::new(server.base_url(), "sk_test".into());
        let erro = client.retrieve_checkout_session("cs_x").await.unwrap_err();

        match erro {
            AppError::ProviderError(msg) => assert!(msg.contains("No such checkout.session")),
            outro => panic!("esperava ProviderError, veio {:?}", outro),
        }
    }
}
