//! Patient account types

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Patient gender, wire-encoded as `M`/`F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// Patient profile as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub document_number: String,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    pub active: bool,
    // Naive server column; serialized without an offset.
    pub created_at: NaiveDateTime,
}

/// Registration payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientCreate {
    pub document_number: String,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub email: String,
    pub password: String,
}

/// Login payload (document number + password).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientLogin {
    pub document_number: String,
    pub password: String,
}
