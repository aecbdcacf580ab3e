// src/services/passageiro_service.rs

use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        ClienteRepository, PassageiroRepository, ViagemRepository,
        passageiro_repo::PassageiroInput,
    },
    models::passageiro::{GrupoEmbarque, Passageiro, PassageiroDetalhe},
};

#[derive(Clone)]
pub struct PassageiroService {
    repo: PassageiroRepository,
    viagem_repo: ViagemRepository,
    cliente_repo: ClienteRepository,
}

impl PassageiroService {
    pub fn new(
        repo: PassageiroRepository,
        viagem_repo: ViagemRepository,
        cliente_repo: ClienteRepository,
    ) -> Self {
        Self {
            repo,
            viagem_repo,
            cliente_repo,
        }
    }

    /// Inscreve um cliente numa viagem. Valor e setor caem para o padrão
    /// da viagem quando não informados; a capacidade é conferida dentro
    /// da transação de inscrição.
    pub async fn inscrever(
        &self,
        viagem_id: Uuid,
        cliente_id: Uuid,
        valor: Option<Decimal>,
        desconto: Decimal,
        status_pagamento: String,
        forma_pagamento: Option<String>,
        onibus_id: Option<Uuid>,
        cidade_embarque: Option<String>,
        setor_maracana: Option<String>,
        passeios: Value,
        observacoes: Option<String>,
    ) -> Result<Passageiro, AppError> {
        let viagem = self
            .viagem_repo
            .find_by_id(viagem_id)
            .await?
            .ok_or(AppError::ViagemNotFound)?;

        self.cliente_repo
            .find_by_id(cliente_id)
            .await?
            .ok_or(AppError::ClienteNotFound)?;

        let input = PassageiroInput {
            viagem_id,
            cliente_id,
            valor: valor.unwrap_or(viagem.valor_padrao),
            desconto,
            status_pagamento,
            forma_pagamento,
            onibus_id: onibus_id.or(viagem.onibus_id),
            cidade_embarque: cidade_embarque.or_else(|| viagem.cidade_saida.clone()),
            setor_maracana: setor_maracana.or_else(|| viagem.setor_padrao.clone()),
            passeios,
            observacoes,
        };

        self.repo.inscrever(&input, viagem.capacidade_onibus).await
    }

    pub async fn listar(
        &self,
        viagem_id: Uuid,
        onibus_id: Option<Uuid>,
    ) -> Result<Vec<PassageiroDetalhe>, AppError> {
        self.repo.list_by_viagem(viagem_id, onibus_id).await
    }

    /// Lista de embarque agrupada por cidade, na ordem alfabética das
    /// cidades. Passageiro sem cidade entra em "Sem cidade definida".
    pub async fn listar_por_cidade(
        &self,
        viagem_id: Uuid,
        onibus_id: Option<Uuid>,
    ) -> Result<Vec<GrupoEmbarque>, AppError> {
        let passageiros = self.repo.list_by_viagem(viagem_id, onibus_id).await?;
        Ok(Self::agrupar_por_cidade(passageiros))
    }

    pub fn agrupar_por_cidade(passageiros: Vec<PassageiroDetalhe>) -> Vec<GrupoEmbarque> {
        let mut grupos: Vec<GrupoEmbarque> = Vec::new();

        for passageiro in passageiros {
            let cidade = passageiro
                .cidade_embarque
                .clone()
                .unwrap_or_else(|| "Sem cidade definida".to_string());

            match grupos.iter_mut().find(|g| g.cidade == cidade) {
                Some(grupo) => grupo.passageiros.push(passageiro),
                None => grupos.push(GrupoEmbarque {
                    cidade,
                    quantidade: 0,
                    passageiros: vec![passageiro],
                }),
            }
        }

        grupos.sort_by(|a, b| a.cidade.cmp(&b.cidade));
        for grupo in &mut grupos {
            grupo.quantidade = grupo.passageiros.len();
        }

        grupos
    }

    pub async fn atualizar_pagamento(
        &self,
        id: Uuid,
        valor: Decimal,
        desconto: Decimal,
        status_pagamento: &str,
        forma_pagamento: Option<&str>,
        onibus_id: Option<Uuid>,
    ) -> Result<Passageiro, AppError> {
        self.repo
            .update_pagamento(id, valor, desconto, status_pagamento, forma_pagamento, onibus_id)
            .await
    }

    pub async fn remover(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.remover(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn detalhe(nome: &str, cidade: Option<&str>) -> PassageiroDetalhe {
        PassageiroDetalhe {
            id: Uuid::new_v4(),
            viagem_id: Uuid::new_v4(),
            cliente_id: Uuid::new_v4(),
            nome: nome.to_string(),
            telefone: None,
            cpf: None,
            valor: Decimal::ZERO,
            desconto: Decimal::ZERO,
            status_pagamento: "pendente".to_string(),
            forma_pagamento: None,
            onibus_id: None,
            cidade_embarque: cidade.map(|c| c.to_string()),
            setor_maracana: None,
            passeios: serde_json::json!([]),
        }
    }

    #[test]
    fn agrupa_por_cidade_com_contagem() {
        let grupos = PassageiroService::agrupar_por_cidade(vec![
            detalhe("Ana", Some("Niterói")),
            detalhe("Bruno", Some("Campos")),
            detalhe("Carla", Some("Niterói")),
        ]);

        assert_eq!(grupos.len(), 2);
        assert_eq!(grupos[0].cidade, "Campos");
        assert_eq!(grupos[0].quantidade, 1);
        assert_eq!(grupos[1].cidade, "Niterói");
        assert_eq!(grupos[1].quantidade, 2);
    }

    #[test]
    fn sem_cidade_vai_para_grupo_proprio() {
        let grupos = PassageiroService::agrupar_por_cidade(vec![detalhe("Ana", None)]);

        assert_eq!(grupos.len(), 1);
        assert_eq!(grupos[0].cidade, "Sem cidade definida");
    }
}
