pub mod auth;
pub mod cliente;
pub mod dashboard;
pub mod onibus;
pub mod passageiro;
pub mod payment;
pub mod viagem;
pub mod whatsapp;
