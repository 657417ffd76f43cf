//! Booking notification configuration.

use serde::{Deserialize, Serialize};

/// Admin contacts and transport settings used when a booking is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Email of the staff account that receives the in-app notification.
    /// When unset or not matching an active staff user, any active
    /// superuser is used instead.
    #[serde(default)]
    pub inapp_admin_email: Option<String>,
    /// Recipient of the booking email.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Recipient of the booking text message. Messaging is skipped when unset.
    #[serde(default)]
    pub admin_phone: Option<String>,
    /// Base URL of the frontend, used for the admin deep link.
    #[serde(default)]
    pub frontend_url: Option<String>,
    /// Sender address for outgoing email.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Timeout applied to every transport call, in seconds.
    #[serde(default = "default_transport_timeout")]
    pub transport_timeout_seconds: u64,
    /// Mail API settings.
    #[serde(default)]
    pub mail: MailConfig,
    /// Messaging API settings.
    #[serde(default)]
    pub messaging: MessagingConfig,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            inapp_admin_email: None,
            admin_email: default_admin_email(),
            admin_phone: None,
            frontend_url: None,
            from_email: default_from_email(),
            transport_timeout_seconds: default_transport_timeout(),
            mail: MailConfig::default(),
            messaging: MessagingConfig::default(),
        }
    }
}

impl NotificationsConfig {
    /// Link to the admin bookings page of the frontend.
    pub fn admin_bookings_url(&self) -> String {
        let base = self
            .frontend_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_FRONTEND_URL);
        format!("{}/#/admin/bookings", base.trim_end_matches('/'))
    }
}

/// Frontend base used when none is configured.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// SendGrid-compatible mail API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Endpoint of the v3 send API.
    #[serde(default = "default_mail_endpoint")]
    pub endpoint: String,
    /// Bearer API key. Email delivery fails permanently when unset.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            endpoint: default_mail_endpoint(),
            api_key: None,
        }
    }
}

/// Twilio-compatible messaging API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Base URL of the messaging API.
    #[serde(default = "default_messaging_endpoint")]
    pub endpoint: String,
    /// Account identifier used for the request path and basic auth.
    #[serde(default)]
    pub account_sid: Option<String>,
    /// Auth token used for basic auth.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Sender number, e.g. `whatsapp:+14155238886`.
    #[serde(default)]
    pub from: Option<String>,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_messaging_endpoint(),
            account_sid: None,
            auth_token: None,
            from: None,
        }
    }
}

fn default_admin_email() -> String {
    "admin@luxedrive.com".to_string()
}

fn default_from_email() -> String {
    "noreply@luxedrive.com".to_string()
}

fn default_transport_timeout() -> u64 {
    10
}

fn default_mail_endpoint() -> String {
    "https://api.sendgrid.com/v3/mail/send".to_string()
}

fn default_messaging_endpoint() -> String {
    "https://api.twilio.com/2010-04-01".to_string()
}
