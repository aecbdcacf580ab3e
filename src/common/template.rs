// src/common/template.rs
//
// Substituição literal de variáveis `{nome}` nas mensagens de WhatsApp.
// Não é uma linguagem de template: sem escape, sem condicionais, sem laços.
// Variáveis desconhecidas ficam no texto de propósito, para que dado
// faltando apareça na mensagem em vez de sumir em silêncio.

use std::collections::HashMap;

/// Substitui cada `{chave}` conhecida pelo valor mapeado.
pub fn renderizar(template: &str, variaveis: &HashMap<String, String>) -> String {
    let mut resultado = template.to_string();
    for (chave, valor) in variaveis {
        resultado = resultado.replace(&format!("{{{}}}", chave), valor);
    }
    resultado
}

/// Extrai os nomes de variáveis `{assim}` presentes na mensagem,
/// na ordem em que aparecem, sem repetição.
///
/// Só letras, dígitos e `_` formam um nome; qualquer outra coisa entre
/// chaves é texto comum.
pub fn extrair_variaveis(template: &str) -> Vec<String> {
    let mut variaveis = Vec::new();
    let bytes = template.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' {
            if let Some(fim) = template[i + 1..].find('}') {
                let nome = &template[i + 1..i + 1 + fim];
                let valido = !nome.is_empty()
                    && nome.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
                if valido && !variaveis.contains(&nome.to_string()) {
                    variaveis.push(nome.to_string());
                }
                i += fim + 2;
                continue;
            }
        }
        i += 1;
    }

    variaveis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapa(pares: &[(&str, &str)]) -> HashMap<String, String> {
        pares
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn texto_sem_variaveis_e_identidade() {
        let vars = mapa(&[("nome", "Maria")]);
        assert_eq!(renderizar("Bom dia, torcedor!", &vars), "Bom dia, torcedor!");
    }

    #[test]
    fn variaveis_cobertas_desaparecem() {
        let vars = mapa(&[("nome", "Maria"), ("adversario", "Palmeiras")]);
        let saida = renderizar("Oi {nome}, jogo contra {adversario}!", &vars);
        assert_eq!(saida, "Oi Maria, jogo contra Palmeiras!");
        assert!(!saida.contains("{nome}"));
        assert!(!saida.contains("{adversario}"));
    }

    #[test]
    fn variavel_desconhecida_fica_visivel() {
        let vars = mapa(&[("nome", "Maria")]);
        let saida = renderizar("Oi {nome}, setor {setor}", &vars);
        assert_eq!(saida, "Oi Maria, setor {setor}");
    }

    #[test]
    fn ocorrencias_repetidas_sao_todas_substituidas() {
        let vars = mapa(&[("nome", "Zé")]);
        assert_eq!(renderizar("{nome} {nome}", &vars), "Zé Zé");
    }

    #[test]
    fn extrai_na_ordem_sem_repetir() {
        let vars = extrair_variaveis("Oi {nome}, contra {adversario} dia {data_jogo}. Até lá, {nome}!");
        assert_eq!(vars, vec!["nome", "adversario", "data_jogo"]);
    }

    #[test]
    fn chaves_sem_nome_valido_sao_ignoradas() {
        assert!(extrair_variaveis("JSON de exemplo: { \"a\": 1 }").is_empty());
        assert!(extrair_variaveis("sem nada").is_empty());
        assert!(extrair_variaveis("vazio {}").is_empty());
    }
}
