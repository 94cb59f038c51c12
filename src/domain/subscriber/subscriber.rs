//! Subscriber aggregate.
//!
//! Created once through the registration menu flow and immutable
//! afterwards; every owner-scoped query keys off the subscriber id.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Msisdn, NationalId, SubscriberId, Timestamp, ValidationError};

use super::TemporaryPin;

/// Maximum length for the registered name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Menu language chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Kinyarwanda,
}

impl Language {
    /// Maps the registration menu digit to a language.
    pub fn from_option_digit(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Language::English),
            "2" => Some(Language::Kinyarwanda),
            _ => None,
        }
    }

    /// Stable storage tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Kinyarwanda => "rw",
        }
    }

    /// Parses the storage tag back into a language.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "en" => Some(Language::English),
            "rw" => Some(Language::Kinyarwanda),
            _ => None,
        }
    }
}

/// Validated registration data, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriber {
    msisdn: Msisdn,
    full_name: String,
    email: String,
    national_id: NationalId,
    city: String,
    language: Language,
    temporary_pin: TemporaryPin,
}

impl NewSubscriber {
    /// Validates registration input collected over the menu.
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `TooLong` for the name or city
    /// - `InvalidFormat` for the email
    pub fn new(
        msisdn: Msisdn,
        full_name: impl Into<String>,
        email: impl Into<String>,
        national_id: NationalId,
        city: impl Into<String>,
        language: Language,
        temporary_pin: TemporaryPin,
    ) -> Result<Self, ValidationError> {
        let full_name = full_name.into().trim().to_string();
        if full_name.is_empty() {
            return Err(ValidationError::empty_field("full_name"));
        }
        if full_name.len() > MAX_NAME_LENGTH {
            return Err(ValidationError::too_long("full_name", MAX_NAME_LENGTH));
        }

        let email = email.into().trim().to_string();
        validate_email(&email)?;

        let city = city.into().trim().to_string();
        if city.is_empty() {
            return Err(ValidationError::empty_field("city"));
        }

        Ok(Self {
            msisdn,
            full_name,
            email,
            national_id,
            city,
            language,
            temporary_pin,
        })
    }

    pub fn msisdn(&self) -> &Msisdn {
        &self.msisdn
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn temporary_pin(&self) -> &TemporaryPin {
        &self.temporary_pin
    }
}

/// Registered subscriber as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    id: SubscriberId,
    msisdn: Msisdn,
    full_name: String,
    email: String,
    national_id: NationalId,
    city: String,
    language: Language,
    registered_at: Timestamp,
}

impl Subscriber {
    /// Reconstitutes a subscriber from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SubscriberId,
        msisdn: Msisdn,
        full_name: String,
        email: String,
        national_id: NationalId,
        city: String,
        language: Language,
        registered_at: Timestamp,
    ) -> Self {
        Self {
            id,
            msisdn,
            full_name,
            email,
            national_id,
            city,
            language,
            registered_at,
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn msisdn(&self) -> &Msisdn {
        &self.msisdn
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn registered_at(&self) -> &Timestamp {
        &self.registered_at
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    // Lightweight shape check; a confirmation mail is the real validator.
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };
    if !well_formed {
        return Err(ValidationError::invalid_format(
            "email",
            "expected name@domain.tld",
        ));
    }
    Ok(())
}
