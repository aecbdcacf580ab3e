// src/models/viagem.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Uma caravana agendada para um jogo.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Viagem {
    pub id: Uuid,

    pub adversario: String,
    pub data_jogo: NaiveDate,
    pub data_saida: Option<DateTime<Utc>>,
    pub local_jogo: String,

    pub valor_padrao: Decimal,
    pub setor_padrao: Option<String>,

    // Vínculo por id (não por par tipo+empresa)
    pub onibus_id: Option<Uuid>,
    pub capacidade_onibus: i32,

    pub cidade_saida: Option<String>,
    pub status: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ocupação de uma viagem: passageiros não cancelados sobre a capacidade.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ocupacao {
    pub total_passageiros: i64,
    pub capacidade: i32,
    /// Percentual arredondado para o inteiro mais próximo (37/50 -> 74)
    pub percentual: i32,
}

impl Ocupacao {
    pub fn calcular(total_passageiros: i64, capacidade: i32) -> Self {
        let percentual = if capacidade > 0 {
            ((total_passageiros as f64 / capacidade as f64) * 100.0).round() as i32
        } else {
            0
        };
        Self {
            total_passageiros,
            capacidade,
            percentual,
        }
    }
}

/// Viagem com a ocupação calculada, para a tela de detalhe.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViagemDetalhe {
    #[serde(flatten)]
    pub viagem: Viagem,
    pub ocupacao: Ocupacao,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ocupacao_arredonda_para_o_inteiro_mais_proximo() {
        let ocupacao = Ocupacao::calcular(37, 50);
        assert_eq!(ocupacao.percentual, 74);
    }

    #[test]
    fn ocupacao_cheia_da_cem() {
        assert_eq!(Ocupacao::calcular(50, 50).percentual, 100);
    }

    #[test]
    fn capacidade_zero_nao_divide() {
        assert_eq!(Ocupacao::calcular(10, 0).percentual, 0);
    }

    #[test]
    fn um_terco_arredonda_para_baixo() {
        // 1/3 = 33,33...%
        assert_eq!(Ocupacao::calcular(1, 3).percentual, 33);
    }
}
