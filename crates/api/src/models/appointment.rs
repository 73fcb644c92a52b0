//! Appointment types

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::consultation_room::ConsultationRoomSimple;
use super::patient::Patient;
use super::slot::Shift;
use super::specialty::Specialty;

/// Appointment lifecycle status, wire-encoded lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

/// Appointment as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub specialty_id: i64,
    pub consultation_room_id: i64,
    pub appointment_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub shift: Shift,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub observations: Option<String>,
    // Naive server columns; serialized without an offset.
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Appointment with its related records expanded, returned by detail and
/// listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub patient: Patient,
    pub specialty: Specialty,
    pub consultation_room: ConsultationRoomSimple,
}

/// Booking payload. The server derives `end_time` from the slot length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub specialty_id: i64,
    pub consultation_room_id: i64,
    pub appointment_date: NaiveDate,
    pub start_time: NaiveTime,
    pub shift: Shift,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Partial update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates decoding of the server's offset-less timestamps.
    ///
    /// The appointment columns are naive, so the server emits
    /// `2026-08-20T10:00:00` with no `Z` or offset suffix.
    ///
    /// Assertions:
    /// - Ensures an appointment with offset-less timestamps decodes.
    #[test]
    fn naive_server_timestamps_decode() {
        let appointment: Result<Appointment, _> = serde_json::from_str(
            r#"{
                "id": 10,
                "patient_id": 1,
                "specialty_id": 2,
                "consultation_room_id": 3,
                "appointment_date": "2026-09-01",
                "start_time": "08:00:00",
                "end_time": "08:20:00",
                "shift": "morning",
                "status": "pending",
                "reason": null,
                "observations": null,
                "created_at": "2026-08-20T10:00:00",
                "updated_at": "2026-08-20T10:00:00"
            }"#,
        );

        let appointment = appointment.expect("offset-less timestamps decode");
        assert_eq!(appointment.created_at.to_string(), "2026-08-20 10:00:00");
    }

    /// Validates the partial-update encoding.
    ///
    /// Assertions:
    /// - Ensures unset fields are omitted from the payload entirely.
    #[test]
    fn update_payload_omits_unset_fields() {
        let update = AppointmentUpdate {
            status: Some(AppointmentStatus::Confirmed),
            ..AppointmentUpdate::default()
        };

        let encoded = serde_json::to_value(&update).expect("encode");
        assert_eq!(encoded, serde_json::json!({"status": "confirmed"}));
    }
}
