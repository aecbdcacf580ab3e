pub mod auth;
pub mod cep;
pub mod checkout_service;
pub mod cliente_service;
pub mod manifesto_service;
pub mod passageiro_service;
pub mod stripe;
pub mod template_service;
pub mod viagem_service;
pub mod whatsapp_service;
pub mod zapi;
