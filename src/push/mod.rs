pub mod dispatcher;
pub mod message;
pub mod provider;
pub mod router;
pub mod types;

pub use dispatcher::{BatchDispatcher, PROVIDER_BATCH_LIMIT};
pub use router::EventRouter;
pub use types::{DispatchOutcome, DispatchTarget, NotificationPayload, Token};
