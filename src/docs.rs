// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Clientes ---
        handlers::clientes::create_cliente,
        handlers::clientes::list_clientes,
        handlers::clientes::get_cliente,
        handlers::clientes::update_cliente,
        handlers::clientes::delete_cliente,

        // --- Viagens ---
        handlers::viagens::create_viagem,
        handlers::viagens::list_viagens,
        handlers::viagens::get_viagem,
        handlers::viagens::update_viagem,
        handlers::viagens::delete_viagem,
        handlers::viagens::list_passageiros_da_viagem,
        handlers::viagens::get_manifesto,
        handlers::viagens::list_pagamentos_da_viagem,

        // --- Ônibus ---
        handlers::onibus::create_onibus,
        handlers::onibus::list_onibus,
        handlers::onibus::update_onibus,
        handlers::onibus::update_imagem,
        handlers::onibus::delete_onibus,

        // --- Passageiros ---
        handlers::passageiros::inscrever_passageiro,
        handlers::passageiros::atualizar_passageiro,
        handlers::passageiros::remover_passageiro,

        // --- WhatsApp ---
        handlers::whatsapp::create_template,
        handlers::whatsapp::list_templates,
        handlers::whatsapp::update_template,
        handlers::whatsapp::set_template_ativo,
        handlers::whatsapp::delete_template,
        handlers::whatsapp::template_estatisticas,
        handlers::whatsapp::enviar_lote,
        handlers::whatsapp::list_logs,

        // --- Checkout ---
        handlers::checkout::create_checkout,
        handlers::checkout::verify_payment,

        // --- Público ---
        handlers::publico::list_viagens_abertas,
        handlers::publico::cadastro_publico,
        handlers::publico::buscar_cep,

        // --- Dashboard ---
        handlers::dashboard::get_resumo,
        handlers::dashboard::get_ocupacao,
        handlers::dashboard::get_top_clientes,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Clientes ---
            models::cliente::Cliente,
            handlers::clientes::ClientePayload,

            // --- Viagens ---
            models::viagem::Viagem,
            models::viagem::Ocupacao,
            models::viagem::ViagemDetalhe,
            handlers::viagens::ViagemPayload,

            // --- Ônibus ---
            models::onibus::Onibus,
            handlers::onibus::OnibusPayload,
            handlers::onibus::ImagemPayload,

            // --- Passageiros ---
            models::passageiro::Passageiro,
            models::passageiro::PassageiroDetalhe,
            models::passageiro::GrupoEmbarque,
            handlers::passageiros::InscreverPayload,
            handlers::passageiros::AtualizarPagamentoPayload,

            // --- WhatsApp ---
            models::whatsapp::WhatsappTemplate,
            models::whatsapp::WhatsappLog,
            models::whatsapp::EnvioResultado,
            models::whatsapp::ResumoEnvio,
            models::whatsapp::TemplateUso,
            handlers::whatsapp::TemplatePayload,
            handlers::whatsapp::AtivoPayload,
            handlers::whatsapp::EnviarLotePayload,

            // --- Checkout ---
            models::payment::Payment,
            models::payment::CheckoutResponse,
            models::payment::VerificacaoPagamento,
            handlers::checkout::CreateCheckoutPayload,
            handlers::checkout::VerifyPaymentPayload,

            // --- Público ---
            handlers::publico::CadastroPublicoPayload,
            handlers::publico::CadastroPublicoResponse,
            services::cep::EnderecoCep,

            // --- Dashboard ---
            models::dashboard::ResumoDashboard,
            models::dashboard::OcupacaoViagem,
            models::dashboard::TopCliente,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação da equipe"),
        (name = "Clientes", description = "Cadastro de clientes"),
        (name = "Viagens", description = "Caravanas agendadas"),
        (name = "Onibus", description = "Frota"),
        (name = "Passageiros", description = "Vínculo cliente x viagem"),
        (name = "WhatsApp", description = "Templates e envio em lote"),
        (name = "Checkout", description = "Sessões de pagamento"),
        (name = "Publico", description = "Site público e cadastro aberto"),
        (name = "Dashboard", description = "Indicadores gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
