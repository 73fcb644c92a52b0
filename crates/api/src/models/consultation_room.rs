//! Consultation room types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Consultation room as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRoom {
    pub id: i64,
    pub room_number: String,
    pub name: String,
    pub floor: Option<String>,
    pub building: Option<String>,
    pub description: Option<String>,
    pub active: bool,
    // Naive server columns; serialized without an offset.
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Abbreviated room record embedded in slots and appointment details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRoomSimple {
    pub id: i64,
    pub room_number: String,
    pub name: String,
}

/// Room with its assigned specialties, as returned by the room listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRoomWithSpecialties {
    #[serde(flatten)]
    pub room: ConsultationRoom,
    #[serde(default)]
    pub specialties: Vec<SpecialtyRef>,
}

/// `{id, name}` reference used in room-to-specialty assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyRef {
    pub id: i64,
    pub name: String,
}
