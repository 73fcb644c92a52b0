//! Available-slot types

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::consultation_room::ConsultationRoomSimple;

/// Half-day shift, wire-encoded lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Morning,
    Afternoon,
}

impl Shift {
    /// Shift name as sent in query strings.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
        }
    }
}

/// One bookable time slot in a specific room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub consultation_room: ConsultationRoomSimple,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Server response for an availability query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    pub specialty_id: i64,
    pub specialty_name: String,
    pub date: NaiveDate,
    pub shift: Shift,
    pub slots: Vec<TimeSlot>,
}

/// Parameters for an availability query.
#[derive(Debug, Clone, Copy)]
pub struct SlotQuery {
    pub hospital_id: i64,
    pub specialty_id: i64,
    pub date: NaiveDate,
    pub shift: Shift,
}
