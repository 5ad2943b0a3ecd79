//! Validation error types

use std::fmt;

/// Validation error for guest registration payloads.
///
/// Display strings are the client-facing messages returned in the
/// `error` field of a 400 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is not a non-empty JSON object, or a field has the wrong type
    InvalidFormat,

    /// Required field absent or empty
    MissingField { field: &'static str },

    /// `tipo` outside JOVEN / ADULTO
    InvalidCategory { value: String },

    /// `genero` outside MASC / FEM
    InvalidGender { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat => write!(f, "formato invalido"),
            Self::MissingField { field } => write!(f, "campo {} es obligatorio", field),
            Self::InvalidCategory { .. } => write!(f, "Tipo inválido. Use JOVEN o ADULTO"),
            Self::InvalidGender { .. } => write!(f, "Género inválido. Use MASC o FEM"),
        }
    }
}

impl std::error::Error for ValidationError {}
