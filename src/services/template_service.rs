// src/services/template_service.rs

use uuid::Uuid;

use crate::{
    common::{error::AppError, template::extrair_variaveis},
    db::WhatsappRepository,
    models::whatsapp::{TemplateUso, WhatsappTemplate},
};

#[derive(Clone)]
pub struct TemplateService {
    repo: WhatsappRepository,
}

impl TemplateService {
    pub fn new(repo: WhatsappRepository) -> Self {
        Self { repo }
    }

    /// As variáveis são sempre recalculadas a partir do texto da mensagem,
    /// nunca aceitas do cliente.
    pub async fn create(
        &self,
        nome: &str,
        categoria: &str,
        mensagem: &str,
    ) -> Result<WhatsappTemplate, AppError> {
        let variaveis = extrair_variaveis(mensagem);
        self.repo
            .create_template(nome, categoria, mensagem, &variaveis)
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        nome: &str,
        categoria: &str,
        mensagem: &str,
    ) -> Result<WhatsappTemplate, AppError> {
        let variaveis = extrair_variaveis(mensagem);
        self.repo
            .update_template(id, nome, categoria, mensagem, &variaveis)
            .await
    }

    pub async fn set_ativo(&self, id: Uuid, ativo: bool) -> Result<WhatsappTemplate, AppError> {
        self.repo.set_ativo(id, ativo).await
    }

    pub async fn get(&self, id: Uuid) -> Result<WhatsappTemplate, AppError> {
        self.repo
            .find_template(id)
            .await?
            .ok_or(AppError::TemplateNotFound)
    }

    pub async fn list(&self, somente_ativos: bool) -> Result<Vec<WhatsappTemplate>, AppError> {
        self.repo.list_templates(somente_ativos).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete_template(id).await
    }

    pub async fn usage_stats(&self) -> Result<Vec<TemplateUso>, AppError> {
        self.repo.usage_stats().await
    }
}
