//! Channel handlers wrapping the outbound transports.

pub mod mail;
pub mod messaging;

pub use mail::MailHandler;
pub use messaging::MessagingHandler;

use luxedrive_core::error::{AppError, ErrorKind};

use crate::executor::DeliveryError;

/// Classify a transport failure. Missing credentials and rejected
/// requests will not improve on retry; everything else might.
pub(crate) fn classify(err: AppError) -> DeliveryError {
    match err.kind {
        ErrorKind::Configuration | ErrorKind::Validation => DeliveryError::Permanent(err.message),
        ErrorKind::ExternalService | ErrorKind::ServiceUnavailable => {
            DeliveryError::Transient(err.message)
        }
        _ => DeliveryError::Internal(err),
    }
}
