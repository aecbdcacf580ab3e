// src/services/cliente_service.rs

use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::{
        error::AppError,
        format::{formatar_cep, somente_digitos, validar_cpf},
    },
    db::cliente_repo::{ClienteInput, ClienteRepository},
    models::cliente::Cliente,
};

#[derive(Clone)]
pub struct ClienteService {
    repo: ClienteRepository,
}

impl ClienteService {
    pub fn new(repo: ClienteRepository) -> Self {
        Self { repo }
    }

    /// CPF é gravado só com dígitos e o CEP já com hífen.
    /// CPF com dígito verificador errado nem chega ao banco.
    fn normalizar(input: &mut ClienteInput) -> Result<(), AppError> {
        if let Some(cpf) = input.cpf.take() {
            let cpf_limpo = somente_digitos(&cpf);
            if !validar_cpf(&cpf_limpo) {
                let mut errors = ValidationErrors::new();
                let mut err = ValidationError::new("invalid_cpf");
                err.message = Some("CPF inválido.".into());
                errors.add("cpf", err);
                return Err(AppError::ValidationError(errors));
            }
            input.cpf = Some(cpf_limpo);
        }

        if let Some(cep) = input.cep.take() {
            input.cep = Some(formatar_cep(&cep));
        }

        Ok(())
    }

    pub async fn create(&self, mut input: ClienteInput) -> Result<Cliente, AppError> {
        Self::normalizar(&mut input)?;
        self.repo.create(&input).await
    }

    pub async fn update(&self, id: Uuid, mut input: ClienteInput) -> Result<Cliente, AppError> {
        Self::normalizar(&mut input)?;
        self.repo.update(id, &input).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Cliente, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::ClienteNotFound)
    }

    /// Usado pelo cadastro público para reaproveitar cadastro existente.
    pub async fn find_por_cpf(&self, cpf: &str) -> Result<Option<Cliente>, AppError> {
        self.repo.find_by_cpf(cpf).await
    }

    pub async fn list(&self, busca: Option<&str>) -> Result<Vec<Cliente>, AppError> {
        match busca {
            Some(query) if !query.trim().is_empty() => self.repo.search(query.trim()).await,
            _ => self.repo.list().await,
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}
