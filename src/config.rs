// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        ClienteRepository, DashboardRepository, OnibusRepository, PassageiroRepository,
        PaymentRepository, UserRepository, ViagemRepository, WhatsappRepository,
    },
    services::{
        auth::AuthService, cep::CepClient, checkout_service::CheckoutService,
        cliente_service::ClienteService, manifesto_service::ManifestoService,
        passageiro_service::PassageiroService, stripe::StripeClient,
        template_service::TemplateService, viagem_service::ViagemService,
        whatsapp_service::WhatsappService, zapi::ZapiClient,
    },
};

// O estado compartilhado que será acessível em toda a aplicação.
// Nada de singleton de módulo: tudo é construído aqui e injetado.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub cliente_service: ClienteService,
    pub viagem_service: ViagemService,
    pub onibus_repo: OnibusRepository,
    pub passageiro_service: PassageiroService,
    pub template_service: TemplateService,
    pub whatsapp_service: WhatsappService,
    pub checkout_service: CheckoutService,
    pub manifesto_service: ManifestoService,
    pub dashboard_repo: DashboardRepository,
    pub cep_client: CepClient,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // Provedores externos. A ausência das chaves não impede o boot;
        // o endpoint correspondente falha com erro de configuração no uso.
        let stripe = env::var("STRIPE_SECRET_KEY").ok().map(|secret| {
            StripeClient::new("https://api.stripe.com".to_string(), secret)
        });
        if stripe.is_none() {
            tracing::warn!("STRIPE_SECRET_KEY ausente: checkout indisponível.");
        }

        let zapi = match (env::var("ZAPI_INSTANCE_ID"), env::var("ZAPI_TOKEN")) {
            (Ok(instance_id), Ok(token)) => {
                let base_url = env::var("ZAPI_BASE_URL")
                    .unwrap_or_else(|_| "https://api.z-api.io".to_string());
                Some(ZapiClient::new(base_url, instance_id, token))
            }
            _ => {
                tracing::warn!("ZAPI_INSTANCE_ID / ZAPI_TOKEN ausentes: envio de WhatsApp indisponível.");
                None
            }
        };

        let site_url = env::var("SITE_URL").ok();
        let checkout_site_url = site_url
            .clone()
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let cep_client = CepClient::new(
            env::var("VIACEP_BASE_URL").unwrap_or_else(|_| "https://viacep.com.br".to_string()),
        );

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let cliente_repo = ClienteRepository::new(db_pool.clone());
        let viagem_repo = ViagemRepository::new(db_pool.clone());
        let onibus_repo = OnibusRepository::new(db_pool.clone());
        let passageiro_repo = PassageiroRepository::new(db_pool.clone());
        let whatsapp_repo = WhatsappRepository::new(db_pool.clone());
        let payment_repo = PaymentRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let cliente_service = ClienteService::new(cliente_repo.clone());
        let viagem_service = ViagemService::new(viagem_repo.clone(), onibus_repo.clone());
        let passageiro_service = PassageiroService::new(
            passageiro_repo.clone(),
            viagem_repo.clone(),
            cliente_repo.clone(),
        );
        let template_service = TemplateService::new(whatsapp_repo.clone());
        let whatsapp_service = WhatsappService::new(
            whatsapp_repo,
            passageiro_repo.clone(),
            viagem_repo.clone(),
            zapi,
            site_url.clone(),
        );
        let checkout_service = CheckoutService::new(
            payment_repo,
            viagem_repo.clone(),
            stripe,
            checkout_site_url,
        );
        let manifesto_service =
            ManifestoService::new(viagem_repo, passageiro_repo, site_url);

        Ok(Self {
            db_pool,
            auth_service,
            cliente_service,
            viagem_service,
            onibus_repo,
            passageiro_service,
            template_service,
            whatsapp_service,
            checkout_service,
            manifesto_service,
            dashboard_repo,
            cep_client,
        })
    }
}
