// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // /me fica atrás do guard
    let me_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let cliente_routes = Router::new()
        .route(
            "/",
            post(handlers::clientes::create_cliente).get(handlers::clientes::list_clientes),
        )
        .route(
            "/{id}",
            get(handlers::clientes::get_cliente)
                .put(handlers::clientes::update_cliente)
                .delete(handlers::clientes::delete_cliente),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let viagem_routes = Router::new()
        .route(
            "/",
            post(handlers::viagens::create_viagem).get(handlers::viagens::list_viagens),
        )
        .route(
            "/{id}",
            get(handlers::viagens::get_viagem)
                .put(handlers::viagens::update_viagem)
                .delete(handlers::viagens::delete_viagem),
        )
        .route(
            "/{id}/passageiros",
            get(handlers::viagens::list_passageiros_da_viagem),
        )
        .route("/{id}/manifesto", get(handlers::viagens::get_manifesto))
        .route(
            "/{id}/pagamentos",
            get(handlers::viagens::list_pagamentos_da_viagem),
        )
        .route("/{id}/whatsapp", post(handlers::whatsapp::enviar_lote))
        .route("/{id}/whatsapp/logs", get(handlers::whatsapp::list_logs))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let onibus_routes = Router::new()
        .route(
            "/",
            post(handlers::onibus::create_onibus).get(handlers::onibus::list_onibus),
        )
        .route(
            "/{id}",
            put(handlers::onibus::update_onibus)
                .delete(handlers::onibus::delete_onibus),
        )
        .route("/{id}/imagem", put(handlers::onibus::update_imagem))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let passageiro_routes = Router::new()
        .route("/", post(handlers::passageiros::inscrever_passageiro))
        .route(
            "/{id}",
            put(handlers::passageiros::atualizar_passageiro)
                .delete(handlers::passageiros::remover_passageiro),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let whatsapp_routes = Router::new()
        .route(
            "/templates",
            post(handlers::whatsapp::create_template).get(handlers::whatsapp::list_templates),
        )
        .route(
            "/templates/estatisticas",
            get(handlers::whatsapp::template_estatisticas),
        )
        .route(
            "/templates/{id}",
            put(handlers::whatsapp::update_template)
                .delete(handlers::whatsapp::delete_template),
        )
        .route(
            "/templates/{id}/ativo",
            patch(handlers::whatsapp::set_template_ativo),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/resumo", get(handlers::dashboard::get_resumo))
        .route("/ocupacao", get(handlers::dashboard::get_ocupacao))
        .route("/top-clientes", get(handlers::dashboard::get_top_clientes))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Equivalentes das funções serverless: o site chama sem login
    let checkout_routes = Router::new()
        .route("/", post(handlers::checkout::create_checkout))
        .route("/verificar", post(handlers::checkout::verify_payment));

    // Site público: viagens abertas, cadastro e CEP
    let publico_routes = Router::new()
        .route("/viagens", get(handlers::publico::list_viagens_abertas))
        .route("/cadastro", post(handlers::publico::cadastro_publico))
        .route("/cep/{cep}", get(handlers::publico::buscar_cep));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes.merge(me_routes))
        .nest("/api/clientes", cliente_routes)
        .nest("/api/viagens", viagem_routes)
        .nest("/api/onibus", onibus_routes)
        .nest("/api/passageiros", passageiro_routes)
        .nest("/api/whatsapp", whatsapp_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/checkout", checkout_routes)
        .nest("/api/publico", publico_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
