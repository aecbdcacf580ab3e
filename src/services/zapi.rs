// src/services/zapi.rs
//
// Cliente do provedor de WhatsApp (Z-API). Uma requisição por destinatário;
// o formato de resposta do provedor é tratado como opaco e devolvido
// inteiro para o log de envio.

use reqwest::Client;
use serde_json::{Value, json};

use crate::common::error::AppError;

#[derive(Clone)]
pub struct ZapiClient {
    client: Client,
    base_url: String,
    instance_id: String,
    token: String,
}

impl ZapiClient {
    pub fn new(base_url: String, instance_id: String, token: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            instance_id,
            token,
        }
    }

    /// Envia uma mensagem de texto para um telefone já normalizado
    /// (somente dígitos, com código do país).
    pub async fn send_text(&self, telefone: &str, mensagem: &str) -> Result<Value, AppError> {
        let url = format!(
            "{}/instances/{}/token/{}/send-text",
            self.base_url, self.instance_id, self.token
        );

        let payload = json!({
            "phone": telefone,
            "message": mensagem,
        });

        let response = self.client.post(&url).json(&payload).send().await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(AppError::ProviderError(format!(
                "Z-API respondeu {}: {}",
                status, body
            )));
        }

        let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::String(body));
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn envia_texto_com_sucesso() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/instances/inst1/token/tok1/send-text")
                .json_body(serde_json::json!({
                    "phone": "5521987654321",
                    "message": "Oi Maria"
                }));
            then.status(200)
                .json_body(serde_json::json!({ "zaapId": "abc", "messageId": "m1" }));
        });

        let client = ZapiClient::new(server.base_url(), "inst1".into(), "tok1".into());
        let resposta = client.send_text("5521987654321", "Oi Maria").await.unwrap();

        mock.assert();
        assert_eq!(resposta["messageId"], "m1");
    }

    #[tokio::test]
    async fn erro_do_provedor_vira_provider_error() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST)
                .path("/instances/inst1/token/tok1/send-text");
            then.status(401).body("invalid token");
        });

        let client = ZapiClient::new(server.base_url(), "inst1".into(), "tok1".into());
        let erro = client.send_text("5521987654321", "Oi").await.unwrap_err();

        match erro {
            AppError::ProviderError(msg) => assert!(msg.contains("401")),
            outro => panic!("esperava ProviderError, veio {:?}", outro),
        }
    }
}
