pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod logging;
pub mod push;
pub mod repository;
pub mod sweeper;

pub use config::ServerConfig;
pub use domain::events::{DomainEvent, OrderStatus};
pub use error::{Result, ServerError};
pub use infra::EventBus;
pub use push::{
    BatchDispatcher, DispatchOutcome, DispatchTarget, EventRouter, NotificationPayload, Token,
    PROVIDER_BATCH_LIMIT,
};
pub use repository::{NotificationRepository, PgTokenRepository, TokenSource};
pub use sweeper::RetentionSweeper;
