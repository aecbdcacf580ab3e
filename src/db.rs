pub mod user_repo;
pub use user_repo::UserRepository;
pub mod cliente_repo;
pub use cliente_repo::ClienteRepository;
pub mod viagem_repo;
pub use viagem_repo::ViagemRepository;
pub mod onibus_repo;
pub use onibus_repo::OnibusRepository;
pub mod passageiro_repo;
pub use passageiro_repo::PassageiroRepository;
pub mod whatsapp_repo;
pub use whatsapp_repo::WhatsappRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
