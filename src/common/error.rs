use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Cliente não encontrado")]
    ClienteNotFound,

    #[error("Viagem não encontrada")]
    ViagemNotFound,

    #[error("Ônibus não encontrado")]
    OnibusNotFound,

    #[error("Passageiro não encontrado")]
    PassageiroNotFound,

    #[error("Template não encontrado")]
    TemplateNotFound,

    #[error("Pagamento não encontrado")]
    PagamentoNotFound,

    #[error("CEP não encontrado")]
    CepNotFound,

    #[error("Capacidade do ônibus esgotada")]
    CapacidadeEsgotada,

    #[error("Registro ainda referenciado: {0}")]
    RegistroEmUso(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Variável de ambiente ausente na hora do uso (Stripe/Z-API).
    // Ausência é falha dura, não modo degradado.
    #[error("Configuração ausente: {0}")]
    ConfigError(String),

    // Resposta inesperada de um provedor externo (Stripe, Z-API, ViaCEP)
    #[error("Erro do provedor externo: {0}")]
    ProviderError(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Erro de HTTP: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::ClienteNotFound => {
                (StatusCode::NOT_FOUND, "Cliente não encontrado.".to_string())
            }
            AppError::ViagemNotFound => {
                (StatusCode::NOT_FOUND, "Viagem não encontrada.".to_string())
            }
            AppError::OnibusNotFound => {
                (StatusCode::NOT_FOUND, "Ônibus não encontrado.".to_string())
            }
            AppError::PassageiroNotFound => {
                (StatusCode::NOT_FOUND, "Passageiro não encontrado.".to_string())
            }
            AppError::TemplateNotFound => {
                (StatusCode::NOT_FOUND, "Template não encontrado.".to_string())
            }
            AppError::PagamentoNotFound => {
                (StatusCode::NOT_FOUND, "Pagamento não encontrado.".to_string())
            }
            AppError::CepNotFound => {
                (StatusCode::NOT_FOUND, "CEP não encontrado.".to_string())
            }
            AppError::CapacidadeEsgotada => (
                StatusCode::CONFLICT,
                "A capacidade do ônibus desta viagem está esgotada.".to_string(),
            ),
            AppError::RegistroEmUso(msg) => (StatusCode::CONFLICT, msg),
            AppError::UniqueConstraintViolation(msg) => (StatusCode::CONFLICT, msg),
            AppError::ConfigError(ref msg) => {
                tracing::error!("Configuração ausente: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Configuração ausente no servidor: {}", msg),
                )
            }
            AppError::ProviderError(ref msg) => {
                tracing::error!("Falha no provedor externo: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "O provedor externo retornou um erro.".to_string(),
                )
            }
            AppError::HttpError(ref e) => {
                tracing::error!("Falha de rede com provedor externo: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Falha de comunicação com o provedor externo.".to_string(),
                )
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
