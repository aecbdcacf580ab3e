// src/services/cep.rs
//
// Consulta de endereço por CEP no ViaCEP, usada pelo auto-complete
// do cadastro público.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::{error::AppError, format::somente_digitos};

/// Endereço devolvido para o formulário.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoCep {
    pub cep: String,
    pub logradouro: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
}

// Formato bruto do ViaCEP. CEP inexistente vem como { "erro": true }.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    cep: Option<String>,
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    erro: Option<bool>,
}

#[derive(Clone)]
pub struct CepClient {
    client: Client,
    base_url: String,
}

impl CepClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub async fn buscar(&self, cep: &str) -> Result<EnderecoCep, AppError> {
        let digitos = somente_digitos(cep);
        if digitos.len() != 8 {
            return Err(AppError::CepNotFound);
        }

        let url = format!("{}/ws/{}/json/", self.base_url, digitos);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::CepNotFound);
        }

        let body: ViaCepResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProviderError(format!("Resposta inesperada do ViaCEP: {}", e)))?;

        if body.erro.unwrap_or(false) {
            return Err(AppError::CepNotFound);
        }

        Ok(EnderecoCep {
            cep: body.cep.unwrap_or_else(|| digitos.clone()),
            logradouro: body.logradouro.unwrap_or_default(),
            bairro: body.bairro.unwrap_or_default(),
            cidade: body.localidade.unwrap_or_default(),
            uf: body.uf.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn cep_encontrado() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/ws/01310930/json/");
            then.status(200).json_body(serde_json::json!({
                "cep": "01310-930",
                "logradouro": "Avenida Paulista",
                "bairro": "Bela Vista",
                "localidade": "São Paulo",
                "uf": "SP"
            }));
        });

        let client = CepClient::new(server.base_url());
        let endereco = client.buscar("01310-930").await.unwrap();

        assert_eq!(endereco.cidade, "São Paulo");
        assert_eq!(endereco.logradouro, "Avenida Paulista");
    }

    #[tokio::test]
    async fn cep_inexistente_vira_not_found() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/ws/99999999/json/");
            then.status(200).json_body(serde_json::json!({ "erro": true }));
        });

        let client = CepClient::new(server.base_url());
        let erro = client.buscar("99999999").await.unwrap_err();

        assert!(matches!(erro, AppError::CepNotFound));
    }

    #[tokio::test]
    async fn cep_malformado_nem_consulta() {
        let client = CepClient::new("http://127.0.0.1:1".to_string());
        let erro = client.buscar("123").await.unwrap_err();
        assert!(matches!(erro, AppError::CepNotFound));
    }
}
