//! Domain models with validation at construction
//!
//! All client input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod guest;
pub mod token;

pub use validation::ValidationError;
pub use guest::{Category, Gender, GuestFilter, GuestStatus, NewGuest, REQUIRED_FIELDS};
pub use token::AccessToken;
