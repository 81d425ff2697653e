pub mod notification_repo;
pub mod token_repo;

pub use notification_repo::NotificationRepository;
pub use token_repo::{PgTokenRepository, TokenSource};
