pub mod events;

pub use events::{DomainEvent, OrderStatus};
