pub mod auth;
pub mod checkout;
pub mod clientes;
pub mod dashboard;
pub mod onibus;
pub mod passageiros;
pub mod publico;
pub mod viagens;
pub mod whatsapp;
