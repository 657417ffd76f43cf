//! Booking configuration.

use serde::{Deserialize, Serialize};

/// Booking creation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How many fresh references are tried when the store reports a
    /// reference collision.
    #[serde(default = "default_reference_attempts")]
    pub reference_max_attempts: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            reference_max_attempts: default_reference_attempts(),
        }
    }
}

fn default_reference_attempts() -> u32 {
    5
}
