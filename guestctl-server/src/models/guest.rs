//! Guest domain types - registration payload, enumerations, list filter
//!
//! Enumerations carry their stored (Spanish) wire values for both serde
//! and sqlx, so the same strings flow through JSON and the CHECK
//! constraints in the schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ValidationError;

/// Payload fields, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 4] = ["nombre_completo", "telefono", "tipo", "genero"];

/// Guest age bracket (`tipo`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Category {
    #[serde(rename = "JOVEN")]
    #[sqlx(rename = "JOVEN")]
    Youth,
    #[serde(rename = "ADULTO")]
    #[sqlx(rename = "ADULTO")]
    Adult,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youth => "JOVEN",
            Self::Adult => "ADULTO",
        }
    }

    /// Parse a client value; case-insensitive, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match normalize_code(raw).as_str() {
            "JOVEN" => Ok(Self::Youth),
            "ADULTO" => Ok(Self::Adult),
            other => Err(ValidationError::InvalidCategory {
                value: other.to_owned(),
            }),
        }
    }
}

/// Guest gender (`genero`)
///
/// `Unspecified` exists only as the storage default; registration requires
/// an explicit `MASC` or `FEM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Gender {
    #[serde(rename = "MASC")]
    #[sqlx(rename = "MASC")]
    Male,
    #[serde(rename = "FEM")]
    #[sqlx(rename = "FEM")]
    Female,
    #[serde(rename = "NO_ESPECIFICADO")]
    #[sqlx(rename = "NO_ESPECIFICADO")]
    Unspecified,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MASC",
            Self::Female => "FEM",
            Self::Unspecified => "NO_ESPECIFICADO",
        }
    }

    /// Parse a gender declared at registration. `NO_ESPECIFICADO` is rejected.
    pub fn parse_declared(raw: &str) -> Result<Self, ValidationError> {
        match normalize_code(raw).as_str() {
            "MASC" => Ok(Self::Male),
            "FEM" => Ok(Self::Female),
            other => Err(ValidationError::InvalidGender {
                value: other.to_owned(),
            }),
        }
    }
}

/// Confirmation state (`estado`). Only `Invited` is ever written here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
pub enum GuestStatus {
    #[default]
    #[serde(rename = "INVITADO")]
    #[sqlx(rename = "INVITADO")]
    Invited,
    #[serde(rename = "PRECONFIRMADO")]
    #[sqlx(rename = "PRECONFIRMADO")]
    PreConfirmed,
    #[serde(rename = "CONFIRMADO")]
    #[sqlx(rename = "CONFIRMADO")]
    Confirmed,
    #[serde(rename = "NO_ASISTE")]
    #[sqlx(rename = "NO_ASISTE")]
    NotAttending,
}

impl GuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invited => "INVITADO",
            Self::PreConfirmed => "PRECONFIRMADO",
            Self::Confirmed => "CONFIRMADO",
            Self::NotAttending => "NO_ASISTE",
        }
    }
}

/// A validated, normalized registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    /// Trimmed and lowercased
    pub full_name: String,
    /// Trimmed
    pub phone: String,
    pub category: Category,
    pub gender: Gender,
}

impl NewGuest {
    /// Validate a decoded JSON object, failing on the first violation.
    ///
    /// # Rules
    /// - Empty object is `InvalidFormat`
    /// - Each of [`REQUIRED_FIELDS`] must be present and non-blank, checked in order
    /// - Required fields must be strings
    /// - `tipo` must be JOVEN or ADULTO, then `genero` must be MASC or FEM
    ///
    /// # Example
    /// ```
    /// use guestctl_server::models::{Category, NewGuest};
    /// use serde_json::json;
    ///
    /// let payload = json!({
    ///     "nombre_completo": " Ana Perez ",
    ///     "telefono": "5551234",
    ///     "tipo": "joven",
    ///     "genero": "fem",
    /// });
    /// let guest = NewGuest::from_payload(payload.as_object().unwrap()).unwrap();
    /// assert_eq!(guest.full_name, "ana perez");
    /// assert_eq!(guest.category, Category::Youth);
    /// ```
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
        if payload.is_empty() {
            return Err(ValidationError::InvalidFormat);
        }

        for field in REQUIRED_FIELDS {
            if is_blank(payload.get(field)) {
                return Err(ValidationError::MissingField { field });
            }
        }

        let text = |field: &str| {
            payload
                .get(field)
                .and_then(Value::as_str)
                .ok_or(ValidationError::InvalidFormat)
        };

        let full_name = text("nombre_completo")?.trim().to_lowercase();
        let phone = text("telefono")?.trim().to_owned();
        let category = Category::parse(text("tipo")?)?;
        let gender = Gender::parse_declared(text("genero")?)?;

        Ok(Self {
            full_name,
            phone,
            category,
            gender,
        })
    }
}

/// Optional list constraints, AND-combined.
///
/// Values are normalized but not checked against the enumerations; an
/// unknown value simply matches no guest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestFilter {
    pub category: Option<String>,
    pub gender: Option<String>,
}

impl GuestFilter {
    pub fn new(category: Option<&str>, gender: Option<&str>) -> Self {
        Self {
            category: category.and_then(normalize_filter),
            gender: gender.and_then(normalize_filter),
        }
    }
}

fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn normalize_filter(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    Some(normalize_code(raw))
}

/// Absent, null, false, zero, empty containers and blank strings all count
/// as a missing field.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
        Some(Value::Bool(true)) => false,
    }
}
