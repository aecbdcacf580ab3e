// src/db/cliente_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::cliente::Cliente};

/// Campos aceitos na criação/edição de um cliente.
/// (Os handlers validam antes; aqui só persistimos.)
pub struct ClienteInput {
    pub nome: String,
    pub telefone: Option<String>,
    pub cpf: Option<String>,
    pub data_nascimento: Option<NaiveDate>,
    pub email: Option<String>,
    pub cep: Option<String>,
    pub endereco: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub como_conheceu: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &ClienteInput) -> Result<Cliente, AppError> {
        sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (
                nome, telefone, cpf, data_nascimento, email,
                cep, endereco, numero, complemento, bairro, cidade, estado,
                como_conheceu, observacoes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(&input.nome)
        .bind(input.telefone.as_deref())
        .bind(input.cpf.as_deref())
        .bind(input.data_nascimento)
        .bind(input.email.as_deref())
        .bind(input.cep.as_deref())
        .bind(input.endereco.as_deref())
        .bind(input.numero.as_deref())
        .bind(input.complemento.as_deref())
        .bind(input.bairro.as_deref())
        .bind(input.cidade.as_deref())
        .bind(input.estado.as_deref())
        .bind(input.como_conheceu.as_deref())
        .bind(input.observacoes.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "CPF '{}' já cadastrado.",
                        input.cpf.as_deref().unwrap_or("?")
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn update(&self, id: Uuid, input: &ClienteInput) -> Result<Cliente, AppError> {
        sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes SET
                nome = $2, telefone = $3, cpf = $4, data_nascimento = $5, email = $6,
                cep = $7, endereco = $8, numero = $9, complemento = $10,
                bairro = $11, cidade = $12, estado = $13,
                como_conheceu = $14, observacoes = $15,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.nome)
        .bind(input.telefone.as_deref())
        .bind(input.cpf.as_deref())
        .bind(input.data_nascimento)
        .bind(input.email.as_deref())
        .bind(input.cep.as_deref())
        .bind(input.endereco.as_deref())
        .bind(input.numero.as_deref())
        .bind(input.complemento.as_deref())
        .bind(input.bairro.as_deref())
        .bind(input.cidade.as_deref())
        .bind(input.estado.as_deref())
        .bind(input.como_conheceu.as_deref())
        .bind(input.observacoes.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ClienteNotFound)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cliente)
    }

    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Cliente>, AppError> {
        let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE cpf = $1")
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cliente)
    }

    pub async fn list(&self) -> Result<Vec<Cliente>, AppError> {
        let clientes =
            sqlx::query_as::<_, Cliente>("SELECT * FROM clientes ORDER BY nome ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(clientes)
    }

    /// Busca por nome, CPF ou telefone (para a barra de busca do back-office)
    pub async fn search(&self, query: &str) -> Result<Vec<Cliente>, AppError> {
        let search_term = format!("%{}%", query);

        let clientes = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT * FROM clientes
            WHERE nome ILIKE $1
               OR cpf ILIKE $1
               OR telefone ILIKE $1
            ORDER BY nome ASC
            LIMIT 50
            "#,
        )
        .bind(search_term)
        .fetch_all(&self.pool)
        .await?;

        Ok(clientes)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::RegistroEmUso(
                            "Cliente possui viagens vinculadas e não pode ser removido.".to_string(),
                        );
                    }
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::ClienteNotFound);
        }

        Ok(())
    }
}
