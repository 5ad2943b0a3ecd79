//! guestctl-server: event guest-list HTTP API
//!
//! Registers invitees (one per phone number), issues each an access token
//! that expires the day after the event, and lists guests filtered by
//! category and gender. Backed by a single SQLite table.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod registry;

pub use config::{ConfigError, EventSchedule};
pub use registry::{GuestRegistry, Registration, RegistryError};
