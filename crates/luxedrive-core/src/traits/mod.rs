//! Core traits defined in `luxedrive-core` and implemented by other crates.

pub mod delivery;
pub mod transport;

pub use delivery::{Delivery, DeliveryQueue};
pub use transport::{MailMessage, MailTransport, MessageTransport, TextMessage};
