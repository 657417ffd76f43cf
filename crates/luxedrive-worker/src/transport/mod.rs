//! HTTP implementations of the mail and messaging transports.

pub mod sendgrid;
pub mod twilio;

pub use sendgrid::SendGridMailTransport;
pub use twilio::TwilioMessageTransport;

use std::time::Duration;

use luxedrive_core::error::AppError;

/// Build the shared HTTP client with a per-request timeout.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::configuration(format!("Failed to construct HTTP client: {e}")))
}

/// Map a provider's HTTP status to an error. Client errors other than
/// rate limiting are final; the rest may succeed later.
pub(crate) fn status_error(provider: &str, status: reqwest::StatusCode, body: &str) -> AppError {
    let snippet: String = body.chars().take(200).collect();
    let message = format!("{provider} request failed with HTTP {}: {snippet}", status.as_u16());
    if status.is_client_error() && status != reqwest::StatusCode::TOO_MANY_REQUESTS {
        AppError::validation(message)
    } else {
        AppError::external_service(message)
    }
}
