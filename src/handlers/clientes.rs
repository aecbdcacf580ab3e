// src/handlers/clientes.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::cliente_repo::ClienteInput,
    models::cliente::Cliente,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Maria da Silva")]
    pub nome: String,

    #[schema(example = "(21) 98765-4321")]
    pub telefone: Option<String>,

    #[schema(example = "529.982.247-25")]
    pub cpf: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "1990-05-20")]
    pub data_nascimento: Option<NaiveDate>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,

    #[schema(example = "01310-930")]
    pub cep: Option<String>,
    pub endereco: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,

    #[schema(example = "Indicação de amigo")]
    pub como_conheceu: Option<String>,
    pub observacoes: Option<String>,
}

impl ClientePayload {
    fn into_input(self) -> ClienteInput {
        ClienteInput {
            nome: self.nome,
            telefone: self.telefone,
            cpf: self.cpf,
            data_nascimento: self.data_nascimento,
            email: self.email,
            cep: self.cep,
            endereco: self.endereco,
            numero: self.numero,
            complemento: self.complemento,
            bairro: self.bairro,
            cidade: self.cidade,
            estado: self.estado,
            como_conheceu: self.como_conheceu,
            observacoes: self.observacoes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub busca: Option<String>,
}

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = ClientePayload,
    responses(
        (status = 201, description = "Cliente criado", body = Cliente),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CPF já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_cliente(
    State(app_state): State<AppState>,
    Json(payload): Json<ClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let cliente = app_state
        .cliente_service
        .create(payload.into_input())
        .await?;

    Ok((StatusCode::CREATED, Json(cliente)))
}

// GET /api/clientes?busca=
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    params(
        ("busca" = Option<String>, Query, description = "Busca por nome, CPF ou telefone")
    ),
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Cliente>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clientes(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state
        .cliente_service
        .list(query.busca.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(clientes)))
}

// GET /api/clientes/{id}
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service.get(id).await?;

    Ok((StatusCode::OK, Json(cliente)))
}

// PUT /api/clientes/{id}
#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = ClientePayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let cliente = app_state
        .cliente_service
        .update(id, payload.into_input())
        .await?;

    Ok((StatusCode::OK, Json(cliente)))
}

// DELETE /api/clientes/{id}
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 409, description = "Cliente possui viagens vinculadas")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.cliente_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
