// src/services/manifesto_service.rs
//
// Gera a lista de embarque da viagem em PDF: cabeçalho da caravana,
// passageiros agrupados por cidade de embarque e QR Code do link de
// cadastro público quando configurado.

use genpdf::{Element, elements, style};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        format::{formatar_cpf, formatar_data, formatar_moeda},
    },
    db::{PassageiroRepository, ViagemRepository},
    models::viagem::Ocupacao,
    services::passageiro_service::PassageiroService,
};

#[derive(Clone)]
pub struct ManifestoService {
    viagem_repo: ViagemRepository,
    passageiro_repo: PassageiroRepository,
    link_publico: Option<String>,
}

impl ManifestoService {
    pub fn new(
        viagem_repo: ViagemRepository,
        passageiro_repo: PassageiroRepository,
        link_publico: Option<String>,
    ) -> Self {
        Self {
            viagem_repo,
            passageiro_repo,
            link_publico,
        }
    }

    pub async fn gerar_manifesto(&self, viagem_id: Uuid) -> Result<Vec<u8>, AppError> {
        // 1. Busca os dados
        let viagem = self
            .viagem_repo
            .find_by_id(viagem_id)
            .await?
            .ok_or(AppError::ViagemNotFound)?;

        let passageiros = self
            .passageiro_repo
            .list_by_viagem(viagem_id, None)
            .await?;

        let total_nao_cancelados = passageiros
            .iter()
            .filter(|p| p.status_pagamento != "cancelado")
            .count() as i64;
        let ocupacao = Ocupacao::calcular(total_nao_cancelados, viagem.capacidade_onibus);

        let grupos = PassageiroService::agrupar_por_cidade(passageiros);

        // 2. Configura o PDF
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Lista de Embarque - Flamengo x {}", viagem.adversario));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new("CARAVANA RUBRO-NEGRA")
                .styled(style::Style::new().bold().with_font_size(18)),
        );

        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new(format!("LISTA DE EMBARQUE - Flamengo x {}", viagem.adversario))
                .styled(style::Style::new().bold().with_font_size(14)),
        );

        doc.push(elements::Paragraph::new(format!(
            "Jogo: {} - {}",
            formatar_data(viagem.data_jogo),
            viagem.local_jogo
        )));

        if let Some(saida) = viagem.data_saida {
            doc.push(elements::Paragraph::new(format!(
                "Saída: {}",
                saida.format("%d/%m/%Y %H:%M")
            )));
        }

        doc.push(elements::Paragraph::new(format!(
            "Ocupação: {} de {} lugares ({}%)",
            ocupacao.total_passageiros, ocupacao.capacidade, ocupacao.percentual
        )));

        doc.push(elements::Break::new(2));

        // --- PASSAGEIROS POR CIDADE ---
        for grupo in grupos {
            doc.push(
                elements::Paragraph::new(format!(
                    "{} ({} passageiros)",
                    grupo.cidade, grupo.quantidade
                ))
                .styled(style::Style::new().bold().with_font_size(12)),
            );

            doc.push(elements::Break::new(0.5));

            // Pesos das colunas: Nome (4), CPF (2), Telefone (2), Setor (1), Valor (2), Situação (2)
            let mut table = elements::TableLayout::new(vec![4, 2, 2, 1, 2, 2]);
            table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

            let style_bold = style::Style::new().bold();
            table
                .row()
                .element(elements::Paragraph::new("Nome").styled(style_bold))
                .element(elements::Paragraph::new("CPF").styled(style_bold))
                .element(elements::Paragraph::new("Telefone").styled(style_bold))
                .element(elements::Paragraph::new("Setor").styled(style_bold))
                .element(elements::Paragraph::new("Valor").styled(style_bold))
                .element(elements::Paragraph::new("Situação").styled(style_bold))
                .push()
                .expect("Table error");

            for passageiro in grupo.passageiros {
                table
                    .row()
                    .element(elements::Paragraph::new(passageiro.nome))
                    .element(elements::Paragraph::new(
                        passageiro.cpf.as_deref().map(formatar_cpf).unwrap_or_default(),
                    ))
                    .element(elements::Paragraph::new(
                        passageiro.telefone.unwrap_or_default(),
                    ))
                    .element(elements::Paragraph::new(
                        passageiro.setor_maracana.unwrap_or_default(),
                    ))
                    .element(elements::Paragraph::new(formatar_moeda(
                        passageiro.valor - passageiro.desconto,
                    )))
                    .element(elements::Paragraph::new(passageiro.status_pagamento))
                    .push()
                    .expect("Table row error");
            }

            doc.push(table);
            doc.push(elements::Break::new(1.5));
        }

        // --- QR CODE DO CADASTRO PÚBLICO ---
        if let Some(base) = &self.link_publico {
            let link = format!("{}/cadastro-publico?viagem={}", base, viagem.id);

            doc.push(
                elements::Paragraph::new("CADASTRO PARA A PRÓXIMA CARAVANA")
                    .styled(style::Style::new().bold().with_font_size(12)),
            );
            doc.push(elements::Paragraph::new(link.clone()));
            doc.push(elements::Break::new(1));

            let code = QrCode::new(link.as_bytes())
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

            let image_buffer = code.render::<Luma<u8>>().build();
            let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

            let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
                .with_scale(genpdf::Scale::new(0.5, 0.5));

            doc.push(pdf_image);
        }

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}
