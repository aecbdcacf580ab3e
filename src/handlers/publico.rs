// src/handlers/publico.rs
//
// Superfície pública do site: viagens abertas, cadastro sem autenticação
// e consulta de CEP para o auto-complete do formulário. Fronteira de
// confiança explícita: tudo aqui é acessível sem login.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, format::somente_digitos},
    config::AppState,
    db::cliente_repo::ClienteInput,
    models::viagem::Viagem,
    services::cep::EnderecoCep,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CadastroPublicoPayload {
    pub viagem_id: Uuid,

    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "João Pereira")]
    pub nome: String,

    #[validate(length(min = 10, message = "Informe o telefone com DDD"))]
    #[schema(example = "(22) 99876-5432")]
    pub telefone: String,

    #[schema(example = "529.982.247-25")]
    pub cpf: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub data_nascimento: Option<NaiveDate>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub cep: Option<String>,
    pub endereco: Option<String>,
    pub numero: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,

    #[schema(example = "Instagram")]
    pub como_conheceu: Option<String>,

    #[schema(example = "Campos dos Goytacazes")]
    pub cidade_embarque: Option<String>,

    #[serde(default = "passeios_vazio")]
    #[schema(example = json!(["Cristo Redentor"]))]
    pub passeios: Value,
}

fn passeios_vazio() -> Value {
    Value::Array(vec![])
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CadastroPublicoResponse {
    pub cliente_id: Uuid,
    pub passageiro_id: Uuid,
}

// GET /api/publico/viagens
#[utoipa::path(
    get,
    path = "/api/publico/viagens",
    tag = "Publico",
    responses(
        (status = 200, description = "Viagens abertas com vagas", body = Vec<Viagem>)
    )
)]
pub async fn list_viagens_abertas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let viagens = app_state.viagem_service.list_publicas().await?;

    Ok((StatusCode::OK, Json(viagens)))
}

// POST /api/publico/cadastro
//
// Reaproveita o cliente pelo CPF quando já existe; senão cria um novo.
// Em seguida inscreve na viagem como 'pendente', com checagem de vaga.
#[utoipa::path(
    post,
    path = "/api/publico/cadastro",
    tag = "Publico",
    request_body = CadastroPublicoPayload,
    responses(
        (status = 201, description = "Cadastro recebido", body = CadastroPublicoResponse),
        (status = 404, description = "Viagem não encontrada"),
        (status = 409, description = "Capacidade esgotada")
    )
)]
pub async fn cadastro_publico(
    State(app_state): State<AppState>,
    Json(payload): Json<CadastroPublicoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let cliente_existente = match payload.cpf.as_deref() {
        Some(cpf) => {
            let cpf_limpo = somente_digitos(cpf);
            app_state.cliente_service.find_por_cpf(&cpf_limpo).await?
        }
        None => None,
    };

    let cliente = match cliente_existente {
        Some(cliente) => cliente,
        None => {
            app_state
                .cliente_service
                .create(ClienteInput {
                    nome: payload.nome,
                    telefone: Some(payload.telefone),
                    cpf: payload.cpf,
                    data_nascimento: payload.data_nascimento,
                    email: payload.email,
                    cep: payload.cep,
                    endereco: payload.endereco,
                    numero: payload.numero,
                    complemento: None,
                    bairro: payload.bairro,
                    cidade: payload.cidade,
                    estado: payload.estado,
                    como_conheceu: payload.como_conheceu,
                    observacoes: None,
                })
                .await?
        }
    };

    let passageiro = app_state
        .passageiro_service
        .inscrever(
            payload.viagem_id,
            cliente.id,
            None, // herda o valor padrão da viagem
            rust_decimal::Decimal::ZERO,
            "pendente".to_string(),
            None,
            None,
            payload.cidade_embarque,
            None,
            payload.passeios,
            None,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CadastroPublicoResponse {
            cliente_id: cliente.id,
            passageiro_id: passageiro.id,
        }),
    ))
}

// GET /api/publico/cep/{cep}
#[utoipa::path(
    get,
    path = "/api/publico/cep/{cep}",
    tag = "Publico",
    params(("cep" = String, Path, description = "CEP com ou sem hífen")),
    responses(
        (status = 200, description = "Endereço encontrado", body = EnderecoCep),
        (status = 404, description = "CEP não encontrado")
    )
)]
pub async fn buscar_cep(
    State(app_state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let endereco = app_state.cep_client.buscar(&cep).await?;

    Ok((StatusCode::OK, Json(endereco)))
}
