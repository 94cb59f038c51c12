//! USSD service configuration.

use serde::Deserialize;

use crate::adapters::http::ussd::ReplyEncoding;

use super::error::ConfigValidationError;

/// USSD service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UssdConfig {
    /// Dial code that resets a session to the root menu.
    #[serde(default = "default_service_code")]
    pub service_code: String,

    /// Daily storage rate in RWF.
    #[serde(default = "default_daily_storage_fee")]
    pub daily_storage_fee: i64,

    /// How replies are rendered on the wire.
    #[serde(default = "default_reply_encoding")]
    pub reply_encoding: ReplyEncoding,

    /// Rows shown by the booking history action.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

impl UssdConfig {
    /// Validates USSD configuration.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.service_code.starts_with('*') || !self.service_code.ends_with('#') {
            return Err(ConfigValidationError::InvalidServiceCode);
        }
        if self.daily_storage_fee <= 0 {
            return Err(ConfigValidationError::InvalidStorageFee);
        }
        if self.history_limit == 0 || self.history_limit > 50 {
            return Err(ConfigValidationError::InvalidHistoryLimit);
        }
        Ok(())
    }
}

impl Default for UssdConfig {
    fn default() -> Self {
        Self {
            service_code: default_service_code(),
            daily_storage_fee: default_daily_storage_fee(),
            reply_encoding: default_reply_encoding(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_service_code() -> String {
    "*662*800*100#".to_string()
}

fn default_daily_storage_fee() -> i64 {
    19_000
}

fn default_reply_encoding() -> ReplyEncoding {
    ReplyEncoding::Json
}

fn default_history_limit() -> u32 {
    5
}
