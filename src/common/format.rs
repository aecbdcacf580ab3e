// src/common/format.rs
//
// Formatadores puros usados pelos serviços e pelo manifesto.
// Nenhum deles toca banco ou rede.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Mantém apenas os dígitos da entrada.
pub fn somente_digitos(valor: &str) -> String {
    valor.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normaliza um telefone para o formato aceito pelo provedor de WhatsApp.
///
/// Regras: remove tudo que não é dígito, descarta zero de tronco à esquerda,
/// exige no mínimo 10 dígitos (DDD + número) e prefixa o código do país (55)
/// quando ausente. Retorna `None` para números inaproveitáveis.
pub fn normalizar_telefone(telefone: &str) -> Option<String> {
    let mut digitos = somente_digitos(telefone);

    if let Some(sem_zero) = digitos.strip_prefix('0') {
        digitos = sem_zero.to_string();
    }

    if digitos.len() < 10 {
        return None;
    }

    if digitos.starts_with("55") && digitos.len() >= 12 {
        Some(digitos)
    } else {
        Some(format!("55{}", digitos))
    }
}

/// "01310930" -> "01310-930". Entradas que não tenham exatamente
/// 8 dígitos voltam como chegaram.
pub fn formatar_cep(cep: &str) -> String {
    let digitos = somente_digitos(cep);
    if digitos.len() != 8 {
        return cep.to_string();
    }
    format!("{}-{}", &digitos[..5], &digitos[5..])
}

/// "12345678900" -> "123.456.789-00". Entradas fora do padrão voltam intactas.
pub fn formatar_cpf(cpf: &str) -> String {
    let digitos = somente_digitos(cpf);
    if digitos.len() != 11 {
        return cpf.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digitos[..3],
        &digitos[3..6],
        &digitos[6..9],
        &digitos[9..]
    )
}

/// Validação de CPF pelos dois dígitos verificadores.
pub fn validar_cpf(cpf: &str) -> bool {
    let digitos = somente_digitos(cpf);
    if digitos.len() != 11 {
        return false;
    }

    let nums: Vec<u32> = digitos.chars().filter_map(|c| c.to_digit(10)).collect();

    // CPFs com todos os dígitos iguais passam na conta mas são inválidos
    if nums.iter().all(|&n| n == nums[0]) {
        return false;
    }

    let dv = |quantidade: usize| -> u32 {
        let soma: u32 = nums[..quantidade]
            .iter()
            .enumerate()
            .map(|(i, &n)| n * (quantidade as u32 + 1 - i as u32))
            .sum();
        let resto = (soma * 10) % 11;
        if resto == 10 { 0 } else { resto }
    };

    dv(9) == nums[9] && dv(10) == nums[10]
}

/// Formata um valor monetário no padrão pt-BR: "R$ 1.234,56".
pub fn formatar_moeda(valor: Decimal) -> String {
    let arredondado = valor.round_dp(2);
    let texto = format!("{:.2}", arredondado);
    let negativo = texto.starts_with('-');
    let texto = texto.trim_start_matches('-');

    let (inteiro, centavos) = texto.split_once('.').unwrap_or((texto, "00"));

    // Agrupamento de milhar com ponto
    let mut agrupado = String::new();
    for (i, c) in inteiro.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }
    let inteiro: String = agrupado.chars().rev().collect();

    let sinal = if negativo { "-" } else { "" };
    format!("R$ {}{},{}", sinal, inteiro, centavos)
}

/// Data no formato brasileiro: "07/12/2025".
pub fn formatar_data(data: NaiveDate) -> String {
    data.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cep_recebe_hifen() {
        assert_eq!(formatar_cep("01310930"), "01310-930");
    }

    #[test]
    fn cep_ja_formatado_continua_igual() {
        assert_eq!(formatar_cep("01310-930"), "01310-930");
    }

    #[test]
    fn cep_incompleto_volta_intacto() {
        assert_eq!(formatar_cep("0131"), "0131");
    }

    #[test]
    fn telefone_com_ddd_recebe_codigo_do_pais() {
        assert_eq!(
            normalizar_telefone("(21) 98765-4321"),
            Some("5521987654321".to_string())
        );
    }

    #[test]
    fn telefone_com_codigo_do_pais_nao_duplica() {
        assert_eq!(
            normalizar_telefone("+55 21 98765-4321"),
            Some("5521987654321".to_string())
        );
    }

    #[test]
    fn telefone_curto_e_descartado() {
        // 9 dígitos: sem DDD não há como entregar
        assert_eq!(normalizar_telefone("987654321"), None);
        assert_eq!(normalizar_telefone(""), None);
    }

    #[test]
    fn telefone_fixo_de_10_digitos_e_aceito() {
        assert_eq!(
            normalizar_telefone("21 3456-7890"),
            Some("552134567890".to_string())
        );
    }

    #[test]
    fn cpf_formatado() {
        assert_eq!(formatar_cpf("12345678900"), "123.456.789-00");
        assert_eq!(formatar_cpf("123"), "123");
    }

    #[test]
    fn cpf_valido_passa() {
        // CPF de exemplo com dígitos verificadores corretos
        assert!(validar_cpf("529.982.247-25"));
    }

    #[test]
    fn cpf_com_digito_errado_falha() {
        assert!(!validar_cpf("529.982.247-26"));
    }

    #[test]
    fn cpf_repetido_falha() {
        assert!(!validar_cpf("111.111.111-11"));
    }

    #[test]
    fn moeda_em_ptbr() {
        assert_eq!(formatar_moeda(Decimal::new(123456, 2)), "R$ 1.234,56");
        assert_eq!(formatar_moeda(Decimal::new(50, 2)), "R$ 0,50");
        assert_eq!(formatar_moeda(Decimal::new(1_000_000, 0)), "R$ 1.000.000,00");
    }

    #[test]
    fn data_em_ptbr() {
        let data = NaiveDate::from_ymd_opt(2025, 12, 7).unwrap();
        assert_eq!(formatar_data(data), "07/12/2025");
    }
}
