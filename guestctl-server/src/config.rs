//! Event configuration - the fixed event timestamp and token expiry
//!
//! The event date is supplied once at startup (`EVENT_DATE`, format
//! `YYYY-MM-DD HH:MM:SS`) and handed to the registry; nothing below the
//! CLI reads the environment.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDateTime};

/// Timestamp layout used for configuration and storage.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Event configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid event date '{value}': expected YYYY-MM-DD HH:MM:SS")]
    InvalidEventDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("event date {0} is too late to compute a token expiry")]
    OutOfRange(NaiveDateTime),
}

/// The event every guest is invited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchedule {
    event_at: NaiveDateTime,
    token_expires_at: NaiveDateTime,
}

impl EventSchedule {
    /// Build a schedule; tokens expire exactly one calendar day after the event.
    pub fn new(event_at: NaiveDateTime) -> Result<Self, ConfigError> {
        let token_expires_at = event_at
            .checked_add_days(Days::new(1))
            .ok_or(ConfigError::OutOfRange(event_at))?;

        Ok(Self {
            event_at,
            token_expires_at,
        })
    }

    pub fn event_at(&self) -> NaiveDateTime {
        self.event_at
    }

    /// Expiry shared by every token issued for this event.
    pub fn token_expires_at(&self) -> NaiveDateTime {
        self.token_expires_at
    }
}

impl FromStr for EventSchedule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let event_at = NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT).map_err(|source| {
            ConfigError::InvalidEventDate {
                value: s.to_owned(),
                source,
            }
        })?;
        Self::new(event_at)
    }
}

impl fmt::Display for EventSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event_at.format(DATETIME_FORMAT))
    }
}
