// src/services/whatsapp_service.rs
//
// Orquestra o envio em lote: filtra passageiros com telefone válido,
// renderiza cada template por passageiro, chama o provedor uma vez por
// par passageiro-template e registra um resumo do lote. A falha de um
// destinatário não derruba o lote; não há retentativa.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        format::{formatar_data, formatar_moeda, normalizar_telefone},
        template::renderizar,
    },
    db::{PassageiroRepository, ViagemRepository, WhatsappRepository},
    models::{
        passageiro::PassageiroDetalhe,
        viagem::Viagem,
        whatsapp::{EnvioResultado, ResumoEnvio, WhatsappLog},
    },
    services::zapi::ZapiClient,
};

#[derive(Clone)]
pub struct WhatsappService {
    repo: WhatsappRepository,
    passageiro_repo: PassageiroRepository,
    viagem_repo: ViagemRepository,
    // None quando ZAPI_INSTANCE_ID / ZAPI_TOKEN não estão no ambiente.
    // O envio falha inteiro antes da primeira mensagem nesse caso.
    zapi: Option<ZapiClient>,
    link_publico: Option<String>,
}

impl WhatsappService {
    pub fn new(
        repo: WhatsappRepository,
        passageiro_repo: PassageiroRepository,
        viagem_repo: ViagemRepository,
        zapi: Option<ZapiClient>,
        link_publico: Option<String>,
    ) -> Self {
        Self {
            repo,
            passageiro_repo,
            viagem_repo,
            zapi,
            link_publico,
        }
    }

    /// Dispara um lote para os passageiros da viagem, opcionalmente
    /// restrito a um ônibus, com um ou mais templates.
    pub async fn enviar_lote(
        &self,
        viagem_id: Uuid,
        template_ids: &[Uuid],
        filtro_onibus: Option<Uuid>,
    ) -> Result<ResumoEnvio, AppError> {
        let zapi = self.zapi.as_ref().ok_or_else(|| {
            AppError::ConfigError("ZAPI_INSTANCE_ID / ZAPI_TOKEN".to_string())
        })?;

        let viagem = self
            .viagem_repo
            .find_by_id(viagem_id)
            .await?
            .ok_or(AppError::ViagemNotFound)?;

        let mut templates = Vec::with_capacity(template_ids.len());
        for id in template_ids {
            let template = self
                .repo
                .find_template(*id)
                .await?
                .ok_or(AppError::TemplateNotFound)?;
            templates.push(template);
        }

        let passageiros = self
            .passageiro_repo
            .list_by_viagem(viagem_id, filtro_onibus)
            .await?;

        // Só entra no lote quem tem telefone entregável (>= 10 dígitos)
        let mut destinatarios = Vec::new();
        let mut ignorados_sem_telefone = 0;
        for passageiro in passageiros {
            match passageiro
                .telefone
                .as_deref()
                .and_then(normalizar_telefone)
            {
                Some(telefone) => destinatarios.push((telefone, passageiro)),
                None => ignorados_sem_telefone += 1,
            }
        }

        let mut resultados: Vec<EnvioResultado> = Vec::new();

        for template in &templates {
            for (telefone, passageiro) in &destinatarios {
                let variaveis = montar_variaveis(&viagem, passageiro, self.link_publico.as_deref());
                let mensagem = renderizar(&template.mensagem, &variaveis);

                // Envio sequencial, um por destinatário. Falha individual
                // é terminal para a tentativa e o lote segue.
                let (sucesso, detalhe) = match zapi.send_text(telefone, &mensagem).await {
                    Ok(resposta) => (true, Some(resposta.to_string())),
                    Err(e) => {
                        tracing::warn!(
                            "Falha ao enviar para {} (template '{}'): {}",
                            telefone,
                            template.nome,
                            e
                        );
                        (false, Some(e.to_string()))
                    }
                };

                resultados.push(EnvioResultado {
                    cliente_id: passageiro.cliente_id,
                    nome: passageiro.nome.clone(),
                    telefone: telefone.clone(),
                    template: template.nome.clone(),
                    sucesso,
                    detalhe,
                });
            }

            self.repo
                .increment_uso(template.id, destinatarios.len() as i64)
                .await?;
        }

        let (total_tentado, total_enviado, total_falhou) = resumir(&resultados);

        let template_nomes: Vec<String> = templates.iter().map(|t| t.nome.clone()).collect();
        let detalhes = serde_json::to_value(&resultados)
            .map_err(|e| anyhow::anyhow!("Falha ao serializar detalhes do lote: {}", e))?;

        let log = self
            .repo
            .insert_log(
                viagem_id,
                &template_nomes,
                filtro_onibus,
                total_tentado,
                total_enviado,
                total_falhou,
                &detalhes,
            )
            .await?;

        tracing::info!(
            "Lote da viagem {}: {} tentadas, {} enviadas, {} falharam",
            viagem_id,
            total_tentado,
            total_enviado,
            total_falhou
        );

        Ok(ResumoEnvio {
            log_id: log.id,
            total_tentado,
            total_enviado,
            total_falhou,
            ignorados_sem_telefone,
        })
    }

    pub async fn listar_logs(&self, viagem_id: Uuid) -> Result<Vec<WhatsappLog>, AppError> {
        self.repo.list_logs(viagem_id).await
    }
}

/// Conjunto fixo de variáveis disponível nos templates.
fn montar_variaveis(
    viagem: &Viagem,
    passageiro: &PassageiroDetalhe,
    link_publico: Option<&str>,
) -> HashMap<String, String> {
    let primeiro_nome = passageiro
        .nome
        .split_whitespace()
        .next()
        .unwrap_or(&passageiro.nome)
        .to_string();

    let link = link_publico
        .map(|base| format!("{}/cadastro-publico?viagem={}", base, viagem.id))
        .unwrap_or_default();

    HashMap::from([
        ("nome".to_string(), passageiro.nome.clone()),
        ("primeiro_nome".to_string(), primeiro_nome),
        ("adversario".to_string(), viagem.adversario.clone()),
        ("data_jogo".to_string(), formatar_data(viagem.data_jogo)),
        ("local_jogo".to_string(), viagem.local_jogo.clone()),
        (
            "cidade_embarque".to_string(),
            passageiro.cidade_embarque.clone().unwrap_or_default(),
        ),
        (
            "setor".to_string(),
            passageiro.setor_maracana.clone().unwrap_or_default(),
        ),
        (
            "valor".to_string(),
            formatar_moeda(passageiro.valor - passageiro.desconto),
        ),
        ("link".to_string(), link),
    ])
}

/// Fecha a conta do lote: tentado = enviado + falhou, sempre.
fn resumir(resultados: &[EnvioResultado]) -> (i32, i32, i32) {
    let total_tentado = resultados.len() as i32;
    let total_enviado = resultados.iter().filter(|r| r.sucesso).count() as i32;
    (total_tentado, total_enviado, total_tentado - total_enviado)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn viagem_exemplo() -> Viagem {
        Viagem {
            id: Uuid::new_v4(),
            adversario: "Palmeiras".to_string(),
            data_jogo: NaiveDate::from_ymd_opt(2025, 12, 7).unwrap(),
            data_saida: None,
            local_jogo: "Maracanã".to_string(),
            valor_padrao: Decimal::new(15000, 2),
            setor_padrao: Some("Norte".to_string()),
            onibus_id: None,
            capacidade_onibus: 50,
            cidade_saida: Some("Campos".to_string()),
            status: "aberta".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn passageiro_exemplo() -> PassageiroDetalhe {
        PassageiroDetalhe {
            id: Uuid::new_v4(),
            viagem_id: Uuid::new_v4(),
            cliente_id: Uuid::new_v4(),
            nome: "Maria da Silva".to_string(),
            telefone: Some("(21) 98765-4321".to_string()),
            cpf: None,
            valor: Decimal::new(15000, 2),
            desconto: Decimal::new(2500, 2),
            status_pagamento: "pendente".to_string(),
            forma_pagamento: None,
            onibus_id: None,
            cidade_embarque: Some("Campos".to_string()),
            setor_maracana: Some("Sul".to_string()),
            passeios: serde_json::json!([]),
        }
    }

    #[test]
    fn variaveis_cobrem_o_conjunto_fixo() {
        let variaveis = montar_variaveis(
            &viagem_exemplo(),
            &passageiro_exemplo(),
            Some("https://caravana.com.br"),
        );

        assert_eq!(variaveis["nome"], "Maria da Silva");
        assert_eq!(variaveis["primeiro_nome"], "Maria");
        assert_eq!(variaveis["adversario"], "Palmeiras");
        assert_eq!(variaveis["data_jogo"], "07/12/2025");
        assert_eq!(variaveis["cidade_embarque"], "Campos");
        assert_eq!(variaveis["setor"], "Sul");
        // valor - desconto
        assert_eq!(variaveis["valor"], "R$ 125,00");
        assert!(variaveis["link"].contains("/cadastro-publico?viagem="));
    }

    #[test]
    fn sem_link_configurado_a_variavel_fica_vazia() {
        let variaveis = montar_variaveis(&viagem_exemplo(), &passageiro_exemplo(), None);
        assert_eq!(variaveis["link"], "");
    }

    #[tokio::test]
    async fn sem_zapi_configurado_o_lote_falha_antes_de_qualquer_envio() {
        use crate::db::{PassageiroRepository, ViagemRepository, WhatsappRepository};
        use sqlx::PgPool;

        // Pool preguiçosa: a checagem de configuração vem antes de
        // qualquer consulta ao banco.
        let pool = PgPool::connect_lazy("postgres://localhost/caravanas_test").unwrap();
        let service = WhatsappService::new(
            WhatsappRepository::new(pool.clone()),
            PassageiroRepository::new(pool.clone()),
            ViagemRepository::new(pool),
            None,
            None,
        );

        let erro = service
            .enviar_lote(Uuid::new_v4(), &[Uuid::new_v4()], None)
            .await
            .unwrap_err();

        match erro {
            AppError::ConfigError(msg) => assert!(msg.contains("ZAPI")),
            outro => panic!("esperava ConfigError, veio {:?}", outro),
        }
    }

    #[test]
    fn resumo_fecha_a_conta_com_falhas_no_meio() {
        let base = EnvioResultado {
            cliente_id: Uuid::new_v4(),
            nome: "X".to_string(),
            telefone: "5521900000000".to_string(),
            template: "t".to_string(),
            sucesso: true,
            detalhe: None,
        };

        let resultados = vec![
            EnvioResultado { sucesso: true, ..base.clone() },
            EnvioResultado { sucesso: false, ..base.clone() },
            EnvioResultado { sucesso: true, ..base.clone() },
            EnvioResultado { sucesso: false, ..base },
        ];

        let (tentado, enviado, falhou) = resumir(&resultados);
        assert_eq!(tentado, 4);
        assert_eq!(enviado, 2);
        assert_eq!(falhou, 2);
        assert_eq!(tentado, enviado + falhou);
    }
}
