// src/services/viagem_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        OnibusRepository, ViagemRepository,
        viagem_repo::ViagemInput,
    },
    models::viagem::{Ocupacao, Viagem, ViagemDetalhe},
};

#[derive(Clone)]
pub struct ViagemService {
    repo: ViagemRepository,
    onibus_repo: OnibusRepository,
}

impl ViagemService {
    pub fn new(repo: ViagemRepository, onibus_repo: OnibusRepository) -> Self {
        Self { repo, onibus_repo }
    }

    /// Resolve o ônibus pelo id e herda a capacidade dele quando o
    /// cadastro não informar uma capacidade própria.
    async fn resolver_capacidade(&self, input: &mut ViagemInput<'_>) -> Result<(), AppError> {
        if let Some(onibus_id) = input.onibus_id {
            let onibus = self
                .onibus_repo
                .find_by_id(onibus_id)
                .await?
                .ok_or(AppError::OnibusNotFound)?;

            if input.capacidade_onibus <= 0 {
                input.capacidade_onibus = onibus.capacidade;
            }
        }

        Ok(())
    }

    pub async fn create(&self, mut input: ViagemInput<'_>) -> Result<Viagem, AppError> {
        self.resolver_capacidade(&mut input).await?;
        self.repo.create(&input).await
    }

    pub async fn update(&self, id: Uuid, mut input: ViagemInput<'_>) -> Result<Viagem, AppError> {
        self.resolver_capacidade(&mut input).await?;
        self.repo.update(id, &input).await
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Viagem>, AppError> {
        self.repo.list(status).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Viagem, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::ViagemNotFound)
    }

    /// Viagem com a ocupação calculada (passageiros não cancelados).
    pub async fn get_detalhe(&self, id: Uuid) -> Result<ViagemDetalhe, AppError> {
        let viagem = self.get(id).await?;
        let total = self.repo.count_passageiros(id).await?;
        let ocupacao = Ocupacao::calcular(total, viagem.capacidade_onibus);

        Ok(ViagemDetalhe { viagem, ocupacao })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }

    pub async fn list_publicas(&self) -> Result<Vec<Viagem>, AppError> {
        self.repo.list_abertas_com_vagas().await
    }
}
